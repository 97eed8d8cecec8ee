//! Action executor
//!
//! Applies an `ActionPlan` to one issue through a `GitHubClient`. Every
//! operation stands on its own: a failed call is logged and counted, and
//! the remaining operations still run. The next run recomputes everything
//! from the timeline, so a partial failure simply gets retried then.

use crate::cli::RepoRef;
use gh_client::{GitHubClient, Issue};
use gh_stale_classifier::ActionPlan;
use gh_stale_config::{LabelNames, NoticeTemplates};
use log::{error, info};
use std::time::Duration;

/// Outcome counters for one issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub labels_added: usize,
    pub labels_removed: usize,
    pub comments_posted: usize,
    pub comments_minimized: usize,
    pub failures: usize,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }

    fn record(
        &mut self,
        result: anyhow::Result<()>,
        what: &str,
        on_success: impl FnOnce(&mut Self),
    ) {
        match result {
            Ok(()) => on_success(self),
            Err(e) => {
                error!("{} failed: {:#}", what, e);
                self.failures += 1;
            }
        }
    }
}

/// Applies plans through a client
pub struct Executor<'a, C: GitHubClient + ?Sized> {
    client: &'a C,
    labels: &'a LabelNames,
    notices: &'a NoticeTemplates,
    minimize_delay: Duration,
    dry_run: bool,
}

impl<'a, C: GitHubClient + ?Sized> Executor<'a, C> {
    pub fn new(
        client: &'a C,
        labels: &'a LabelNames,
        notices: &'a NoticeTemplates,
        minimize_delay: Duration,
        dry_run: bool,
    ) -> Self {
        Self {
            client,
            labels,
            notices,
            minimize_delay,
            dry_run,
        }
    }

    /// Apply `plan` to `issue`
    ///
    /// Label changes are reduced to what differs from the issue's current
    /// labels. Order: removals, additions, notice comment, minimizations.
    pub async fn apply(
        &self,
        repo: &RepoRef,
        issue: &Issue,
        plan: &ActionPlan,
    ) -> ExecutionReport {
        let mut report = ExecutionReport::default();
        let number = issue.number;
        let delta = plan.against_labels(&self.labels.present(&issue.labels));

        for class in &delta.labels_to_remove {
            let name = self.labels.name(*class);
            if self.dry_run {
                info!("[dry-run] {}#{}: would remove label {:?}", repo, number, name);
                continue;
            }
            let result = self
                .client
                .remove_label(&repo.owner, &repo.name, number, name)
                .await;
            report.record(
                result,
                &format!("{}#{}: remove label {:?}", repo, number, name),
                |r| r.labels_removed += 1,
            );
        }

        if !delta.labels_to_add.is_empty() {
            let names: Vec<String> = delta
                .labels_to_add
                .iter()
                .map(|class| self.labels.name(*class).to_string())
                .collect();
            if self.dry_run {
                info!("[dry-run] {}#{}: would add labels {:?}", repo, number, names);
            } else {
                let count = names.len();
                let result = self
                    .client
                    .add_labels(&repo.owner, &repo.name, number, &names)
                    .await;
                report.record(
                    result,
                    &format!("{}#{}: add labels {:?}", repo, number, names),
                    |r| r.labels_added += count,
                );
            }
        }

        if let Some(body) = plan
            .notice()
            .and_then(|class| self.notices.render(class, &issue.assignees))
        {
            if self.dry_run {
                info!("[dry-run] {}#{}: would comment {:?}", repo, number, body);
            } else {
                let result = self
                    .client
                    .create_comment(&repo.owner, &repo.name, number, &body)
                    .await;
                report.record(
                    result,
                    &format!("{}#{}: post notice", repo, number),
                    |r| r.comments_posted += 1,
                );
            }
        }

        for (index, comment_id) in plan.minimize_comment_ids.iter().enumerate() {
            if self.dry_run {
                info!(
                    "[dry-run] {}#{}: would minimize comment {}",
                    repo, number, comment_id
                );
                continue;
            }
            if index > 0 && !self.minimize_delay.is_zero() {
                tokio::time::sleep(self.minimize_delay).await;
            }
            let result = self.client.minimize_comment(comment_id.as_str()).await;
            report.record(
                result,
                &format!("{}#{}: minimize comment {}", repo, number, comment_id),
                |r| r.comments_minimized += 1,
            );
        }

        report
    }
}
