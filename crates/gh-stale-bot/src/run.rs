//! Per-issue orchestration
//!
//! fetch issue + timeline -> convert -> classify -> resolve -> execute

use crate::cli::RepoRef;
use crate::executor::{ExecutionReport, Executor};
use crate::timeline::convert_timeline;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use gh_client::{GitHubClient, Issue};
use gh_stale_classifier::{classify, resolve, Classification, ClassifierInput, Cutoffs};
use gh_stale_config::AppConfig;
use log::{error, info};
use std::collections::HashSet;

/// What happened to one issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Classified and (possibly) acted upon
    Processed {
        classification: Classification,
        report: ExecutionReport,
    },
    /// Not eligible for housekeeping
    Skipped { reason: &'static str },
}

/// Totals for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    /// Issues that could not be fetched or had a failed operation
    pub failed: usize,
}

/// Runs classification passes against one client with one configuration
pub struct Housekeeper<'a, C: GitHubClient + ?Sized> {
    client: &'a C,
    config: &'a AppConfig,
    cutoffs: Cutoffs,
    bot_actors: HashSet<String>,
    dry_run: bool,
}

impl<'a, C: GitHubClient + ?Sized> Housekeeper<'a, C> {
    /// `now` is read once by the caller and used for every issue of the run
    pub fn new(
        client: &'a C,
        config: &'a AppConfig,
        now: DateTime<Utc>,
        dry_run: bool,
    ) -> Result<Self> {
        let cutoffs = config
            .cutoffs
            .resolve(now)
            .context("Invalid cutoff configuration")?;

        Ok(Self {
            client,
            config,
            cutoffs,
            bot_actors: config.bot_actor_set(),
            dry_run,
        })
    }

    /// Process the given issue numbers, or every assigned open issue if empty
    pub async fn run(&self, repo: &RepoRef, numbers: &[u64]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if numbers.is_empty() {
            let issues = self
                .client
                .fetch_assigned_issues(&repo.owner, &repo.name)
                .await?;
            info!("{}: {} assigned open issue(s)", repo, issues.len());

            for issue in &issues {
                let outcome = self.process_issue(repo, issue).await;
                tally(&mut summary, repo, issue.number, outcome);
            }
        } else {
            for &number in numbers {
                let outcome = self.process_number(repo, number).await;
                tally(&mut summary, repo, number, outcome);
            }
        }

        info!(
            "{}: {} processed, {} skipped, {} failed",
            repo, summary.processed, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Fetch an issue by number and process it
    pub async fn process_number(&self, repo: &RepoRef, number: u64) -> Result<IssueOutcome> {
        let issue = self
            .client
            .fetch_issue(&repo.owner, &repo.name, number)
            .await?;
        self.process_issue(repo, &issue).await
    }

    /// Classify one issue and apply the resulting plan
    pub async fn process_issue(&self, repo: &RepoRef, issue: &Issue) -> Result<IssueOutcome> {
        if let Some(reason) = skip_reason(issue) {
            info!("{}#{}: skipped, {}", repo, issue.number, reason);
            return Ok(IssueOutcome::Skipped { reason });
        }

        let raw = self
            .client
            .fetch_timeline(&repo.owner, &repo.name, issue.number)
            .await?;
        let timeline = convert_timeline(issue.number, &raw);

        let authorized: HashSet<String> = issue.assignees.iter().cloned().collect();
        let input = ClassifierInput {
            item_number: issue.number,
            authorized_actors: &authorized,
            bot_actors: &self.bot_actors,
            minimization_marker: &self.config.minimization_marker,
        };
        let classification = classify(&timeline, &input, &self.cutoffs);
        let plan = resolve(&classification);

        info!(
            "{}#{}: stale={} label={:?} suppressed={} minimize={}",
            repo,
            issue.number,
            classification.is_stale,
            classification.label_class,
            classification.suppress_notice,
            plan.minimize_comment_ids.len()
        );

        let executor = Executor::new(
            self.client,
            &self.config.labels,
            &self.config.notices,
            self.config.minimize_delay(),
            self.dry_run,
        );
        let report = executor.apply(repo, issue, &plan).await;

        Ok(IssueOutcome::Processed {
            classification,
            report,
        })
    }
}

fn skip_reason(issue: &Issue) -> Option<&'static str> {
    if issue.is_pull_request {
        Some("it is a pull request")
    } else if !issue.open {
        Some("it is closed")
    } else if issue.assignees.is_empty() {
        Some("it has no assignees")
    } else {
        None
    }
}

fn tally(summary: &mut RunSummary, repo: &RepoRef, number: u64, outcome: Result<IssueOutcome>) {
    match outcome {
        Ok(IssueOutcome::Processed { report, .. }) => {
            summary.processed += 1;
            if !report.is_success() {
                summary.failed += 1;
            }
        }
        Ok(IssueOutcome::Skipped { .. }) => summary.skipped += 1,
        Err(e) => {
            error!("{}#{}: {:#}", repo, number, e);
            summary.failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{issue, MockClient};
    use chrono::{Duration, SecondsFormat, TimeZone};
    use gh_client::IssueTimelineEvent;
    use gh_stale_classifier::LabelClass;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ts(days_ago: i64) -> String {
        (now() - Duration::days(days_ago)).to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn raw(value: serde_json::Value) -> IssueTimelineEvent {
        serde_json::from_value(value).unwrap()
    }

    fn assigned(login: &str, days_ago: i64) -> IssueTimelineEvent {
        raw(json!({
            "event": "assigned",
            "actor": { "login": "maintainer" },
            "assignee": { "login": login },
            "created_at": ts(days_ago)
        }))
    }

    fn commented(id: &str, login: &str, body: &str, days_ago: i64) -> IssueTimelineEvent {
        raw(json!({
            "event": "commented",
            "node_id": id,
            "user": { "login": login },
            "body": body,
            "created_at": ts(days_ago)
        }))
    }

    fn repo() -> RepoRef {
        "owner/repo".parse().unwrap()
    }

    fn config() -> AppConfig {
        AppConfig {
            minimize_delay_ms: 0,
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_first_notice() {
        let client = MockClient {
            issues: vec![issue(42, &["alice"], &[])],
            timelines: [(
                42,
                vec![
                    assigned("alice", 20),
                    commented("IC_1", "alice", "looking into it", 10),
                ],
            )]
            .into(),
            ..MockClient::default()
        };
        let config = config();
        let housekeeper = Housekeeper::new(&client, &config, now(), false).unwrap();

        let outcome = housekeeper.process_number(&repo(), 42).await.unwrap();
        let IssueOutcome::Processed { classification, report } = outcome else {
            panic!("expected the issue to be processed");
        };

        assert!(classification.is_stale);
        assert_eq!(classification.label_class, Some(LabelClass::FirstNotice));
        assert!(report.is_success());
        assert_eq!(client.calls().len(), 2);
        assert_eq!(client.calls()[0], "add 42 stale: first notice");
        assert!(client.calls()[1].starts_with("comment 42 @alice"));
    }

    #[tokio::test]
    async fn test_open_linked_pull_request_clears_labels() {
        let pr = raw(json!({
            "event": "cross-referenced",
            "actor": { "login": "alice" },
            "created_at": ts(30),
            "source": {
                "type": "issue",
                "issue": {
                    "number": 99,
                    "body": "Fixes #42",
                    "state": "open",
                    "pull_request": { "url": "https://api.github.com/repos/owner/repo/pulls/99" }
                }
            }
        }));
        let client = MockClient {
            issues: vec![issue(42, &["alice"], &["stale: second notice"])],
            timelines: [(42, vec![assigned("alice", 60), pr])].into(),
            ..MockClient::default()
        };
        let config = config();
        let housekeeper = Housekeeper::new(&client, &config, now(), false).unwrap();

        housekeeper.process_number(&repo(), 42).await.unwrap();
        assert_eq!(client.calls(), vec!["remove 42 stale: second notice"]);
    }

    #[tokio::test]
    async fn test_bot_comments_are_minimized() {
        let client = MockClient {
            issues: vec![issue(42, &["alice"], &[])],
            timelines: [(
                42,
                vec![
                    commented("IC_old", "github-actions[bot]", "ping", 40),
                    commented("IC_mid", "github-actions[bot]", "ping", 10),
                    commented("IC_new", "github-actions[bot]", "ping", 2),
                    commented("IC_me", "alice", "done soon", 1),
                ],
            )]
            .into(),
            ..MockClient::default()
        };
        let config = config();
        let housekeeper = Housekeeper::new(&client, &config, now(), false).unwrap();

        housekeeper.process_number(&repo(), 42).await.unwrap();
        assert_eq!(client.calls(), vec!["minimize IC_mid"]);
    }

    #[tokio::test]
    async fn test_unassigned_issue_is_skipped() {
        let client = MockClient {
            issues: vec![issue(5, &[], &[])],
            ..MockClient::default()
        };
        let config = config();
        let housekeeper = Housekeeper::new(&client, &config, now(), false).unwrap();

        let outcome = housekeeper.process_number(&repo(), 5).await.unwrap();
        assert_eq!(
            outcome,
            IssueOutcome::Skipped {
                reason: "it has no assignees"
            }
        );
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_run_continues_after_fetch_failure() {
        let client = MockClient {
            issues: vec![issue(1, &["alice"], &[]), issue(2, &["bob"], &[])],
            timelines: [(2, vec![commented("IC_1", "bob", "wip", 1)])].into(),
            ..MockClient::default()
        };
        let config = config();
        let housekeeper = Housekeeper::new(&client, &config, now(), false).unwrap();

        let summary = housekeeper.run(&repo(), &[]).await.unwrap();
        assert_eq!(
            summary,
            RunSummary {
                processed: 1,
                skipped: 0,
                failed: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_run_with_explicit_numbers() {
        let client = MockClient {
            issues: vec![issue(3, &["carol"], &[])],
            timelines: [(3, vec![commented("IC_1", "carol", "wip", 1)])].into(),
            ..MockClient::default()
        };
        let config = config();
        let housekeeper = Housekeeper::new(&client, &config, now(), false).unwrap();

        let summary = housekeeper.run(&repo(), &[3, 4]).await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_out_of_range_cutoff_is_an_error() {
        let client = MockClient::default();
        let mut config = config();
        config.cutoffs.horizon_days = 4_000_000_000;

        assert!(Housekeeper::new(&client, &config, now(), false).is_err());
    }

    #[test]
    fn test_invalid_cutoffs_fail_before_classification() {
        let client = MockClient::default();
        let mut config = config();
        config.cutoffs.stale_days = 2;

        assert!(Housekeeper::new(&client, &config, now(), false).is_err());
    }
}
