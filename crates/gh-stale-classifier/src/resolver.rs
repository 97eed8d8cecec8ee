//! Action resolver
//!
//! Maps a `Classification` onto the label and comment operations that bring
//! an issue in line with it.
//!
//! The `Updated` label is never added here, only kept: when an issue is
//! recently updated the competing labels are removed and `Updated` is left as
//! it is. Adding it is up to whoever maintains the label outside this bot.

use crate::types::{Classification, CommentId, LabelClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

/// Operations an executor performs for one issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub labels_to_add: BTreeSet<LabelClass>,
    pub labels_to_remove: BTreeSet<LabelClass>,
    /// Post the notice comment for the added label
    pub post_comment: bool,
    /// Bot comments to minimize, in order
    pub minimize_comment_ids: Vec<CommentId>,
}

impl ActionPlan {
    /// The label whose notice should be posted, if any
    pub fn notice(&self) -> Option<LabelClass> {
        if !self.post_comment {
            return None;
        }
        self.labels_to_add.iter().copied().max()
    }

    /// Drop adds for labels already present and removals for labels that are
    /// absent
    pub fn against_labels(&self, present: &BTreeSet<LabelClass>) -> ActionPlan {
        ActionPlan {
            labels_to_add: self.labels_to_add.difference(present).copied().collect(),
            labels_to_remove: self.labels_to_remove.intersection(present).copied().collect(),
            post_comment: self.post_comment,
            minimize_comment_ids: self.minimize_comment_ids.clone(),
        }
    }

    /// Nothing to do
    pub fn is_empty(&self) -> bool {
        self.labels_to_add.is_empty()
            && self.labels_to_remove.is_empty()
            && !self.post_comment
            && self.minimize_comment_ids.is_empty()
    }
}

/// Resolve a classification into an action plan
pub fn resolve(classification: &Classification) -> ActionPlan {
    let minimize_comment_ids = classification.comments_to_minimize.clone();

    if classification.suppress_notice {
        return ActionPlan {
            labels_to_remove: LabelClass::iter().collect(),
            minimize_comment_ids,
            ..ActionPlan::default()
        };
    }

    match classification.label_class {
        None => ActionPlan {
            labels_to_remove: LabelClass::iter().collect(),
            minimize_comment_ids,
            ..ActionPlan::default()
        },
        Some(LabelClass::Updated) => ActionPlan {
            labels_to_remove: [LabelClass::FirstNotice, LabelClass::SecondNotice].into(),
            minimize_comment_ids,
            ..ActionPlan::default()
        },
        Some(notice) => ActionPlan {
            labels_to_add: [notice].into(),
            labels_to_remove: LabelClass::iter().filter(|c| *c != notice).collect(),
            post_comment: true,
            minimize_comment_ids,
        },
    }
}
