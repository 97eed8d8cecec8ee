//! Application configuration
//!
//! Configuration loaded from a `.gh-stale-bot.toml` file. Every field has a
//! default, so an empty file (or no file) is a valid configuration.

use anyhow::{bail, Context, Result};
use gh_stale_classifier::{CutoffWindow, LabelClass};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::labels::LabelNames;

/// Placeholder in notice templates, replaced by `@login` mentions
pub const ASSIGNEES_PLACEHOLDER: &str = "{assignees}";

/// Application configuration loaded from .gh-stale-bot.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Activity windows, in days
    #[serde(default)]
    pub cutoffs: CutoffWindow,

    /// Repository label text for each label class
    #[serde(default)]
    pub labels: LabelNames,

    /// Logins whose old comments get minimized
    #[serde(default = "default_bot_actors")]
    pub bot_actors: Vec<String>,

    /// Comments containing this text are never minimized
    #[serde(default = "default_minimization_marker")]
    pub minimization_marker: String,

    /// Pause between consecutive minimize calls
    #[serde(default = "default_minimize_delay_ms")]
    pub minimize_delay_ms: u64,

    /// Comment templates posted with each notice label
    #[serde(default)]
    pub notices: NoticeTemplates,
}

fn default_bot_actors() -> Vec<String> {
    vec!["github-actions[bot]".to_string()]
}

fn default_minimization_marker() -> String {
    "<!-- stale-bot:keep -->".to_string()
}

fn default_minimize_delay_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cutoffs: CutoffWindow::default(),
            labels: LabelNames::default(),
            bot_actors: default_bot_actors(),
            minimization_marker: default_minimization_marker(),
            minimize_delay_ms: default_minimize_delay_ms(),
            notices: NoticeTemplates::default(),
        }
    }
}

impl AppConfig {
    /// Load config from an explicit path, or from the implicit locations
    ///
    /// Falls back to defaults when no file exists. A file that exists but
    /// does not parse, or whose cutoffs do not increase, is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(source) = crate::load_config_file(explicit)? else {
            log::debug!("Using default app config");
            return Ok(Self::default());
        };

        let config = Self::from_toml(&source.content)
            .with_context(|| format!("Invalid config file {}", source.path.display()))?;
        log::info!("Loaded app config from {}", source.path.display());
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.cutoffs.validate()?;
        if config.minimization_marker.is_empty() {
            bail!("minimization_marker must not be empty");
        }
        Ok(config)
    }

    pub fn bot_actor_set(&self) -> HashSet<String> {
        self.bot_actors.iter().cloned().collect()
    }

    pub fn minimize_delay(&self) -> Duration {
        Duration::from_millis(self.minimize_delay_ms)
    }
}

/// Notice comment templates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NoticeTemplates {
    #[serde(default = "default_first_notice")]
    pub first_notice: String,

    #[serde(default = "default_second_notice")]
    pub second_notice: String,
}

fn default_first_notice() -> String {
    "{assignees} this issue has had no update from its assignees for a while. \
     Please leave a short status comment, or unassign yourself if you are no \
     longer working on it."
        .to_string()
}

fn default_second_notice() -> String {
    "{assignees} this issue is still without an update from its assignees. \
     Please comment with the current status so it can be reassigned if needed."
        .to_string()
}

impl Default for NoticeTemplates {
    fn default() -> Self {
        Self {
            first_notice: default_first_notice(),
            second_notice: default_second_notice(),
        }
    }
}

impl NoticeTemplates {
    /// Comment body for a notice label, `None` for `Updated`
    pub fn render(&self, class: LabelClass, assignees: &[String]) -> Option<String> {
        let template = match class {
            LabelClass::Updated => return None,
            LabelClass::FirstNotice => &self.first_notice,
            LabelClass::SecondNotice => &self.second_notice,
        };

        let mentions = assignees
            .iter()
            .map(|login| format!("@{}", login))
            .collect::<Vec<_>>()
            .join(" ");

        Some(template.replace(ASSIGNEES_PLACEHOLDER, &mentions).trim().to_string())
    }
}
