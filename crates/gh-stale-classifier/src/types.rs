//! Timeline events and classification results
//!
//! These types are the classifier's whole vocabulary. They are plain data:
//! an adapter builds `TimelineEvent`s from whatever the issue tracker
//! returns, and an executor consumes the results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Opaque comment identifier, used to target minimization
///
/// For GitHub this is the comment's GraphQL node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One lifecycle occurrence on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// What happened, with the fields specific to that kind
    pub kind: EventKind,

    /// Login of the actor who triggered the event
    pub actor: Option<String>,

    /// Last-touched time (update time, else creation time)
    pub occurred_at: DateTime<Utc>,

    /// Original creation time, independent of later edits
    pub created_at: DateTime<Utc>,
}

/// Kind of a timeline event
///
/// Fields that only exist for one kind live on that variant, so an event
/// that is missing them cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A comment was posted
    Commented { comment_id: CommentId, body: String },
    /// Someone was assigned
    Assigned { assignee: String },
    /// Someone was unassigned
    Unassigned { assignee: String },
    /// Another issue or pull request mentioned this one
    CrossReferenced(CrossReference),
    /// Anything the classifier does not care about
    Other,
}

/// Source side of a cross-reference event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    /// Body text of the referencing issue or pull request
    pub source_body: String,
    pub source_state: SourceState,
    pub source_is_pull_request: bool,
    /// Login of whoever created the reference
    pub source_actor: Option<String>,
}

/// Open/closed state of a cross-reference source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Open,
    Closed,
}

/// Label classes the classifier can ask for
///
/// Classes are compared by identity; turning them into repository label
/// text is the job of a label-name resolver at the boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LabelClass {
    /// Recently updated by an assignee
    Updated,
    /// First escalation
    FirstNotice,
    /// Second (final) escalation
    SecondNotice,
}

/// Result of classifying one issue timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_stale: bool,

    /// Label class that applies, `None` while in the grace period or when
    /// an open linked pull request overrides everything
    pub label_class: Option<LabelClass>,

    /// Bot comments that are now old enough to minimize, most recent first
    pub comments_to_minimize: Vec<CommentId>,

    /// An open pull request by an assignee links this issue
    pub suppress_notice: bool,

    /// Most recent assignee comment or assignment, if any
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl Classification {
    /// Classification for an issue with an open, linked, assignee-authored
    /// pull request
    pub fn suppressed() -> Self {
        Self {
            is_stale: false,
            label_class: None,
            comments_to_minimize: Vec::new(),
            suppress_notice: true,
            last_activity_at: None,
        }
    }
}
