//! Label name resolution
//!
//! The classifier speaks in `LabelClass` values; repositories speak in label
//! text. This is the only place that knows how one maps to the other.

use gh_stale_classifier::LabelClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

/// Repository label text for each label class
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LabelNames {
    #[serde(default = "default_updated")]
    pub updated: String,

    #[serde(default = "default_first_notice")]
    pub first_notice: String,

    #[serde(default = "default_second_notice")]
    pub second_notice: String,
}

fn default_updated() -> String {
    "status: updated".to_string()
}

fn default_first_notice() -> String {
    "stale: first notice".to_string()
}

fn default_second_notice() -> String {
    "stale: second notice".to_string()
}

impl Default for LabelNames {
    fn default() -> Self {
        Self {
            updated: default_updated(),
            first_notice: default_first_notice(),
            second_notice: default_second_notice(),
        }
    }
}

impl LabelNames {
    /// Label text for a class
    pub fn name(&self, class: LabelClass) -> &str {
        match class {
            LabelClass::Updated => &self.updated,
            LabelClass::FirstNotice => &self.first_notice,
            LabelClass::SecondNotice => &self.second_notice,
        }
    }

    /// Class for a label text; GitHub label names are case-insensitive
    pub fn class_of(&self, label: &str) -> Option<LabelClass> {
        LabelClass::iter().find(|class| self.name(*class).eq_ignore_ascii_case(label))
    }

    /// Classes present among an issue's labels; unrelated labels are ignored
    pub fn present<S: AsRef<str>>(&self, labels: &[S]) -> BTreeSet<LabelClass> {
        labels
            .iter()
            .filter_map(|label| self.class_of(label.as_ref()))
            .collect()
    }
}
