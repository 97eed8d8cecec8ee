//! GitHub API client for issue housekeeping
//!
//! This crate provides a trait-based GitHub API client covering what an
//! issue housekeeping bot needs: reading issues and their timelines, and
//! applying label, comment and minimization changes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_issue() / fetch_assigned_issues()       │
//! │  - fetch_timeline()                              │
//! │  - add_labels() / remove_label()                 │
//! │  - create_comment() / minimize_comment()         │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │◄──── ClientManager (per host)
//!              │ (direct API)    │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let octocrab = octocrab::Octocrab::builder()
//!     .personal_token("token".to_string())
//!     .build()?;
//!
//! let client = OctocrabClient::new(Arc::new(octocrab));
//! let timeline = client.fetch_timeline("owner", "repo", 42).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod client_manager;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use client::GitHubClient;
pub use client_manager::{ClientManager, TokenResolver};
pub use octocrab_client::OctocrabClient;
pub use types::{Actor, Issue, IssueTimelineEvent, SourceIssue, TimelineSource};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
