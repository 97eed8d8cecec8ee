//! Timeline adapter
//!
//! Turns raw timeline entries from the GitHub API into classifier events.
//! Unknown event names become `EventKind::Other`. Entries that lack a field
//! their event name requires are skipped here, with a warning, so the
//! classifier only ever sees well-formed events.

use chrono::{DateTime, Utc};
use gh_client::IssueTimelineEvent;
use gh_stale_classifier::{CommentId, CrossReference, EventKind, SourceState, TimelineEvent};
use log::{trace, warn};
use thiserror::Error;

/// Why a raw timeline entry could not be converted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedEvent {
    #[error("'{event}' event without {field}")]
    MissingField { event: String, field: &'static str },

    #[error("cross-reference with unknown source state '{0}'")]
    UnknownSourceState(String),
}

fn missing(raw: &IssueTimelineEvent, field: &'static str) -> MalformedEvent {
    MalformedEvent::MissingField {
        event: raw.event.clone(),
        field,
    }
}

/// Convert one raw entry
///
/// Returns `Ok(None)` for entries that carry no timestamp and are of no
/// interest anyway (e.g. "committed" events, which date themselves through
/// the commit author instead).
pub fn convert_event(raw: &IssueTimelineEvent) -> Result<Option<TimelineEvent>, MalformedEvent> {
    let actor_login = raw.actor.as_ref().map(|a| a.login.clone());

    let kind = match raw.event.as_str() {
        "commented" => EventKind::Commented {
            comment_id: CommentId::new(
                raw.node_id
                    .clone()
                    .ok_or_else(|| missing(raw, "node_id"))?,
            ),
            body: raw.body.clone().unwrap_or_default(),
        },
        "assigned" => EventKind::Assigned {
            assignee: raw
                .assignee
                .as_ref()
                .map(|a| a.login.clone())
                .ok_or_else(|| missing(raw, "assignee"))?,
        },
        "unassigned" => EventKind::Unassigned {
            assignee: raw
                .assignee
                .as_ref()
                .map(|a| a.login.clone())
                .ok_or_else(|| missing(raw, "assignee"))?,
        },
        "cross-referenced" => {
            let issue = raw
                .source
                .as_ref()
                .and_then(|s| s.issue.as_ref())
                .ok_or_else(|| missing(raw, "source issue"))?;
            let state = issue
                .state
                .as_deref()
                .ok_or_else(|| missing(raw, "source state"))?;

            EventKind::CrossReferenced(CrossReference {
                source_body: issue.body.clone().unwrap_or_default(),
                source_state: parse_source_state(state)?,
                source_is_pull_request: issue.is_pull_request(),
                source_actor: actor_login
                    .clone()
                    .or_else(|| issue.user.as_ref().map(|u| u.login.clone())),
            })
        }
        _ => EventKind::Other,
    };

    let Some(created_at) = raw.created_at else {
        if matches!(kind, EventKind::Other) {
            return Ok(None);
        }
        return Err(missing(raw, "created_at"));
    };

    // Comment events name the author in `user`
    let actor = match kind {
        EventKind::Commented { .. } => {
            raw.user.as_ref().map(|u| u.login.clone()).or(actor_login)
        }
        _ => actor_login,
    };

    Ok(Some(TimelineEvent {
        kind,
        actor,
        occurred_at: occurred_at(raw.updated_at, created_at),
        created_at,
    }))
}

fn occurred_at(updated_at: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> DateTime<Utc> {
    updated_at.unwrap_or(created_at)
}

fn parse_source_state(state: &str) -> Result<SourceState, MalformedEvent> {
    match state.to_lowercase().as_str() {
        "open" => Ok(SourceState::Open),
        "closed" => Ok(SourceState::Closed),
        _ => Err(MalformedEvent::UnknownSourceState(state.to_string())),
    }
}

/// Convert a whole timeline, skipping entries that cannot be used
pub fn convert_timeline(issue_number: u64, raw: &[IssueTimelineEvent]) -> Vec<TimelineEvent> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, entry)| match convert_event(entry) {
            Ok(Some(event)) => Some(event),
            Ok(None) => {
                trace!("#{}: timeline entry {} has no timestamp", issue_number, index);
                None
            }
            Err(e) => {
                warn!("#{}: skipping timeline entry {}: {}", issue_number, index, e);
                None
            }
        })
        .collect()
}
