//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the classifier's domain model
//! to keep this crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issue from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number (e.g., 123)
    pub number: u64,

    /// Issue title
    pub title: String,

    /// Whether the issue is open
    pub open: bool,

    /// Logins of the current assignees
    pub assignees: Vec<String>,

    /// Names of the labels currently on the issue
    pub labels: Vec<String>,

    /// GitHub lists pull requests as issues; this tells them apart
    pub is_pull_request: bool,

    /// Issue URL for opening in browser
    pub html_url: String,

    /// When the issue was last updated
    pub updated_at: DateTime<Utc>,
}

/// Minimal user reference as embedded in timeline payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

/// One raw entry of `GET /repos/{owner}/{repo}/issues/{number}/timeline`
///
/// The timeline endpoint returns a different shape for every event type, so
/// every field except the event name is optional here. Checking that the
/// fields an event type needs are actually present is the consumer's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueTimelineEvent {
    /// Event name (e.g., "commented", "assigned", "cross-referenced")
    #[serde(default)]
    pub event: String,

    /// Who triggered the event
    pub actor: Option<Actor>,

    /// Comment author ("commented" events)
    pub user: Option<Actor>,

    /// GraphQL node id ("commented" events)
    pub node_id: Option<String>,

    /// Comment body ("commented" events)
    pub body: Option<String>,

    pub created_at: Option<DateTime<Utc>>,

    /// Last edit ("commented" events)
    pub updated_at: Option<DateTime<Utc>>,

    /// Who was (un)assigned ("assigned"/"unassigned" events)
    pub assignee: Option<Actor>,

    /// Referencing issue or PR ("cross-referenced" events)
    pub source: Option<TimelineSource>,
}

/// Source of a cross-reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSource {
    /// Source type, "issue" for both issues and pull requests
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub issue: Option<SourceIssue>,
}

/// Issue or pull request that made a cross-reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceIssue {
    pub number: u64,

    pub body: Option<String>,

    /// "open" or "closed"
    pub state: Option<String>,

    /// Present (with links) only when the source is a pull request
    pub pull_request: Option<serde_json::Value>,

    /// Author of the source issue or pull request
    pub user: Option<Actor>,
}

impl SourceIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_commented_event_deserialize() {
        let raw = json!({
            "event": "commented",
            "id": 1,
            "node_id": "IC_kwDOAbc",
            "actor": { "login": "alice", "id": 7 },
            "user": { "login": "alice", "id": 7 },
            "body": "Working on it",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z",
            "author_association": "MEMBER"
        });

        let event: IssueTimelineEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.event, "commented");
        assert_eq!(event.node_id.as_deref(), Some("IC_kwDOAbc"));
        assert_eq!(event.user.unwrap().login, "alice");
        assert!(event.updated_at.unwrap() > event.created_at.unwrap());
    }

    #[test]
    fn test_cross_referenced_event_deserialize() {
        let raw = json!({
            "event": "cross-referenced",
            "actor": { "login": "alice" },
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
            "source": {
                "type": "issue",
                "issue": {
                    "number": 77,
                    "body": "Fixes #42",
                    "state": "open",
                    "user": { "login": "alice" },
                    "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/77" }
                }
            }
        });

        let event: IssueTimelineEvent = serde_json::from_value(raw).unwrap();
        let issue = event.source.unwrap().issue.unwrap();
        assert_eq!(issue.number, 77);
        assert!(issue.is_pull_request());
        assert_eq!(issue.state.as_deref(), Some("open"));
    }

    #[test]
    fn test_unknown_event_deserialize() {
        let raw = json!({
            "event": "labeled",
            "actor": { "login": "bob" },
            "created_at": "2024-05-01T10:00:00Z",
            "label": { "name": "bug", "color": "d73a4a" }
        });

        let event: IssueTimelineEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.event, "labeled");
        assert!(event.source.is_none());
        assert!(event.updated_at.is_none());
    }

    #[test]
    fn test_issue_serialization() {
        let issue = Issue {
            number: 42,
            title: "Crash on start".to_string(),
            open: true,
            assignees: vec!["alice".to_string()],
            labels: vec!["bug".to_string()],
            is_pull_request: false,
            html_url: "https://github.com/owner/repo/issues/42".to_string(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&issue).unwrap();
        let deserialized: Issue = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, issue);
    }
}
