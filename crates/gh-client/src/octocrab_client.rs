//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::types::{Issue, IssueTimelineEvent};
use anyhow::{bail, Context};
use async_trait::async_trait;
use log::debug;
use octocrab::params::issues::Filter;
use octocrab::Octocrab;
use serde::Serialize;
use std::sync::Arc;

const PER_PAGE: u8 = 100;

const MINIMIZE_COMMENT_MUTATION: &str = r#"
mutation($id: ID!) {
  minimizeComment(input: { subjectId: $id, classifier: OUTDATED }) {
    minimizedComment { isMinimized }
  }
}
"#;

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_issue(&self, owner: &str, repo: &str, number: u64) -> anyhow::Result<Issue> {
        debug!("Fetching issue {}/{}#{}", owner, repo, number);

        let issue = self
            .octocrab
            .issues(owner, repo)
            .get(number)
            .await
            .with_context(|| format!("Failed to fetch issue {}/{}#{}", owner, repo, number))?;

        Ok(convert_issue(&issue))
    }

    async fn fetch_assigned_issues(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<Issue>> {
        debug!("Fetching assigned issues for {}/{}", owner, repo);

        let mut issues = Vec::new();
        let mut page_num = 1u32;

        loop {
            let page = self
                .octocrab
                .issues(owner, repo)
                .list()
                .state(octocrab::params::State::Open)
                .assignee(any_assignee())
                .per_page(PER_PAGE)
                .page(page_num)
                .send()
                .await
                .with_context(|| format!("Failed to list issues for {}/{}", owner, repo))?;

            let page_len = page.items.len();

            // The issues endpoint also lists pull requests
            issues.extend(
                page.items
                    .iter()
                    .map(convert_issue)
                    .filter(|issue| !issue.is_pull_request && !issue.assignees.is_empty()),
            );

            if page_len < usize::from(PER_PAGE) {
                break;
            }

            page_num += 1;
        }

        issues.sort_by(|a, b| b.number.cmp(&a.number));

        debug!("Fetched {} assigned issues for {}/{}", issues.len(), owner, repo);
        Ok(issues)
    }

    async fn fetch_timeline(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<IssueTimelineEvent>> {
        debug!("Fetching timeline for {}/{}#{}", owner, repo, number);

        let route = format!("/repos/{}/{}/issues/{}/timeline", owner, repo, number);
        let mut events = Vec::new();
        let mut page_num = 1u32;

        loop {
            let params = PageParams {
                per_page: PER_PAGE,
                page: page_num,
            };
            let page: Vec<IssueTimelineEvent> = self
                .octocrab
                .get(&route, Some(&params))
                .await
                .with_context(|| {
                    format!(
                        "Failed to fetch timeline page {} for {}/{}#{}",
                        page_num, owner, repo, number
                    )
                })?;

            let page_len = page.len();
            events.extend(page);

            if page_len < usize::from(PER_PAGE) {
                break;
            }

            page_num += 1;
        }

        debug!(
            "Fetched {} timeline events for {}/{}#{}",
            events.len(),
            owner,
            repo,
            number
        );
        Ok(events)
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<()> {
        debug!("Adding labels {:?} to {}/{}#{}", labels, owner, repo, number);

        self.octocrab
            .issues(owner, repo)
            .add_labels(number, labels)
            .await
            .with_context(|| format!("Failed to add labels to {}/{}#{}", owner, repo, number))?;

        Ok(())
    }

    async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> anyhow::Result<()> {
        debug!("Removing label {:?} from {}/{}#{}", label, owner, repo, number);

        self.octocrab
            .issues(owner, repo)
            .remove_label(number, label)
            .await
            .with_context(|| {
                format!(
                    "Failed to remove label {:?} from {}/{}#{}",
                    label, owner, repo, number
                )
            })?;

        Ok(())
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> anyhow::Result<()> {
        debug!("Commenting on {}/{}#{}", owner, repo, number);

        self.octocrab
            .issues(owner, repo)
            .create_comment(number, body)
            .await
            .with_context(|| format!("Failed to comment on {}/{}#{}", owner, repo, number))?;

        Ok(())
    }

    async fn minimize_comment(&self, node_id: &str) -> anyhow::Result<()> {
        debug!("Minimizing comment {}", node_id);

        let payload = serde_json::json!({
            "query": MINIMIZE_COMMENT_MUTATION,
            "variables": { "id": node_id },
        });
        let response: serde_json::Value = self
            .octocrab
            .graphql(&payload)
            .await
            .with_context(|| format!("Failed to minimize comment {}", node_id))?;

        if let Some(errors) = response.get("errors") {
            bail!("GraphQL error minimizing comment {}: {}", node_id, errors);
        }

        Ok(())
    }
}

/// `assignee=*`: only issues with at least one assignee
fn any_assignee() -> Filter<&'static str> {
    Filter::Any
}

/// Convert octocrab Issue to our Issue type
fn convert_issue(issue: &octocrab::models::issues::Issue) -> Issue {
    Issue {
        number: issue.number,
        title: issue.title.clone(),
        open: matches!(issue.state, octocrab::models::IssueState::Open),
        assignees: issue.assignees.iter().map(|a| a.login.clone()).collect(),
        labels: issue.labels.iter().map(|l| l.name.clone()).collect(),
        is_pull_request: issue.pull_request.is_some(),
        html_url: issue.html_url.to_string(),
        updated_at: issue.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_query() {
        let params = PageParams {
            per_page: PER_PAGE,
            page: 3,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["per_page"], 100);
        assert_eq!(value["page"], 3);
    }

    #[test]
    fn test_assigned_issue_listing_filters_server_side() {
        let value = serde_json::to_value(any_assignee()).unwrap();
        assert_eq!(value, "*");
    }

    #[test]
    fn test_minimize_mutation_shape() {
        assert!(MINIMIZE_COMMENT_MUTATION.contains("minimizeComment"));
        assert!(MINIMIZE_COMMENT_MUTATION.contains("classifier: OUTDATED"));
        assert!(MINIMIZE_COMMENT_MUTATION.contains("$id: ID!"));
    }
}
