//! Timeline staleness classifier
//!
//! A single backward pass over an issue timeline. The scan collects the most
//! recent assignee comment, the most recent assignment to an assignee, and
//! the bot comments that have aged into the minimization window. An open pull
//! request by an assignee that closes the issue ends the scan immediately.

use crate::cutoffs::Cutoffs;
use crate::link::links_issue;
use crate::types::{
    Classification, CommentId, CrossReference, EventKind, LabelClass, SourceState, TimelineEvent,
};
use chrono::{DateTime, Utc};
use log::{debug, trace};
use std::collections::HashSet;

/// Per-issue parameters for a classification pass
#[derive(Debug, Clone, Copy)]
pub struct ClassifierInput<'a> {
    /// Number of the issue whose timeline is classified
    pub item_number: u64,

    /// Logins whose comments and assignments count as activity
    pub authorized_actors: &'a HashSet<String>,

    /// Logins whose comments may be minimized
    pub bot_actors: &'a HashSet<String>,

    /// Comments containing this text are never minimized
    pub minimization_marker: &'a str,
}

impl ClassifierInput<'_> {
    fn is_authorized(&self, login: Option<&str>) -> bool {
        login.is_some_and(|l| self.authorized_actors.contains(l))
    }

    fn is_bot(&self, login: Option<&str>) -> bool {
        login.is_some_and(|l| self.bot_actors.contains(l))
    }

    /// An empty marker exempts nothing
    fn is_exempt(&self, body: &str) -> bool {
        !self.minimization_marker.is_empty() && body.contains(self.minimization_marker)
    }

    /// Open pull request, opened by an assignee, that closes this issue
    fn is_override(&self, xref: &CrossReference) -> bool {
        xref.source_is_pull_request
            && xref.source_state == SourceState::Open
            && self.is_authorized(xref.source_actor.as_deref())
            && links_issue(&xref.source_body, self.item_number)
    }
}

/// Classify an issue timeline
///
/// `timeline` is taken in the order the tracker returned it (oldest first)
/// and scanned from the back. Never fails; events the classifier does not
/// care about are ignored.
pub fn classify(
    timeline: &[TimelineEvent],
    input: &ClassifierInput<'_>,
    cutoffs: &Cutoffs,
) -> Classification {
    let mut last_comment_at: Option<DateTime<Utc>> = None;
    let mut last_assignment_at: Option<DateTime<Utc>> = None;
    let mut to_minimize: Vec<CommentId> = Vec::new();

    for event in timeline.iter().rev() {
        let actor = event.actor.as_deref();

        match &event.kind {
            EventKind::CrossReferenced(xref) if input.is_override(xref) => {
                debug!(
                    "#{}: open linked pull request by {:?}, suppressing notices",
                    input.item_number, xref.source_actor
                );
                return Classification::suppressed();
            }
            EventKind::Commented { .. }
                if last_comment_at.is_none() && input.is_authorized(actor) =>
            {
                last_comment_at = Some(event.occurred_at);
            }
            EventKind::Assigned { assignee }
                if last_assignment_at.is_none()
                    && input.is_authorized(Some(assignee.as_str())) =>
            {
                last_assignment_at = Some(event.occurred_at);
            }
            _ => {}
        }

        if let EventKind::Commented { comment_id, body } = &event.kind {
            let in_window =
                event.created_at > cutoffs.horizon && event.created_at < cutoffs.grace_end;
            if in_window && input.is_bot(actor) && !input.is_exempt(body) {
                trace!("#{}: bot comment {} is minimizable", input.item_number, comment_id);
                to_minimize.push(comment_id.clone());
            }
        }
    }

    let last_activity_at = last_comment_at.max(last_assignment_at);
    let (is_stale, label_class) = grade(last_activity_at, cutoffs);

    debug!(
        "#{}: last activity {:?} -> stale={} label={:?}, {} comment(s) to minimize",
        input.item_number,
        last_activity_at,
        is_stale,
        label_class,
        to_minimize.len()
    );

    Classification {
        is_stale,
        label_class,
        comments_to_minimize: to_minimize,
        suppress_notice: false,
        last_activity_at,
    }
}

/// Map the last activity time onto the cutoff windows
///
/// Boundaries are inclusive on the "within" side.
fn grade(
    last_activity_at: Option<DateTime<Utc>>,
    cutoffs: &Cutoffs,
) -> (bool, Option<LabelClass>) {
    match last_activity_at {
        None => (true, Some(LabelClass::SecondNotice)),
        Some(at) if at >= cutoffs.current => (false, Some(LabelClass::Updated)),
        Some(at) if at >= cutoffs.grace_end => (false, None),
        Some(at) if at >= cutoffs.stale_end => (true, Some(LabelClass::FirstNotice)),
        Some(_) => (true, Some(LabelClass::SecondNotice)),
    }
}
