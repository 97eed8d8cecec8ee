//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy: the issue and timeline reads the stale bot
//! classifies, and the label/comment mutations that apply its decisions.

use crate::types::{Issue, IssueTimelineEvent};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Implementations can be direct (hitting the API) or in-memory fakes for
/// tests. Retry and rate-limit handling belong to implementations, never to
/// callers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, IssueTimelineEvent};
///
/// async fn timeline(client: &dyn GitHubClient) -> anyhow::Result<Vec<IssueTimelineEvent>> {
///     client.fetch_timeline("rust-lang", "rust", 1234).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch a single issue by number
    async fn fetch_issue(&self, owner: &str, repo: &str, number: u64) -> anyhow::Result<Issue>;

    /// Fetch open issues that have at least one assignee
    ///
    /// Pull requests are excluded. The result is sorted by issue number,
    /// highest first.
    async fn fetch_assigned_issues(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<Issue>>;

    /// Fetch the complete timeline of an issue
    ///
    /// Pagination is handled internally; the returned events are in the
    /// order the API delivers them (oldest first).
    async fn fetch_timeline(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<IssueTimelineEvent>>;

    // === Issue Mutations ===

    /// Add labels to an issue
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<()>;

    /// Remove one label from an issue
    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> anyhow::Result<()>;

    /// Post a comment on an issue
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> anyhow::Result<()>;

    /// Collapse a comment as outdated
    ///
    /// # Arguments
    ///
    /// * `node_id` - GraphQL node id of the comment
    async fn minimize_comment(&self, node_id: &str) -> anyhow::Result<()>;
}
