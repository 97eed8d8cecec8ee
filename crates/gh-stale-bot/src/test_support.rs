//! In-memory `GitHubClient` for tests

use anyhow::bail;
use async_trait::async_trait;
use chrono::Utc;
use gh_client::{GitHubClient, Issue, IssueTimelineEvent};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Records every mutation as a short string, e.g. `remove 42 status: updated`
#[derive(Default)]
pub struct MockClient {
    pub issues: Vec<Issue>,
    pub timelines: HashMap<u64, Vec<IssueTimelineEvent>>,
    /// Operations (by their recorded string) that fail
    pub failing: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> anyhow::Result<()> {
        let fails = self.failing.contains(&call);
        self.calls.lock().unwrap().push(call.clone());
        if fails {
            bail!("injected failure: {}", call);
        }
        Ok(())
    }
}

pub fn issue(number: u64, assignees: &[&str], labels: &[&str]) -> Issue {
    Issue {
        number,
        title: format!("Issue {}", number),
        open: true,
        assignees: assignees.iter().map(|s| s.to_string()).collect(),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        is_pull_request: false,
        html_url: format!("https://github.com/owner/repo/issues/{}", number),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn fetch_issue(&self, _owner: &str, _repo: &str, number: u64) -> anyhow::Result<Issue> {
        match self.issues.iter().find(|i| i.number == number) {
            Some(issue) => Ok(issue.clone()),
            None => bail!("issue {} not found", number),
        }
    }

    async fn fetch_assigned_issues(&self, _owner: &str, _repo: &str) -> anyhow::Result<Vec<Issue>> {
        Ok(self
            .issues
            .iter()
            .filter(|i| i.open && !i.is_pull_request && !i.assignees.is_empty())
            .cloned()
            .collect())
    }

    async fn fetch_timeline(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<IssueTimelineEvent>> {
        match self.timelines.get(&number) {
            Some(events) => Ok(events.clone()),
            None => bail!("timeline {} not found", number),
        }
    }

    async fn add_labels(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        labels: &[String],
    ) -> anyhow::Result<()> {
        self.record(format!("add {} {}", number, labels.join(",")))
    }

    async fn remove_label(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        label: &str,
    ) -> anyhow::Result<()> {
        self.record(format!("remove {} {}", number, label))
    }

    async fn create_comment(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
        body: &str,
    ) -> anyhow::Result<()> {
        self.record(format!("comment {} {}", number, body))
    }

    async fn minimize_comment(&self, node_id: &str) -> anyhow::Result<()> {
        self.record(format!("minimize {}", node_id))
    }
}
