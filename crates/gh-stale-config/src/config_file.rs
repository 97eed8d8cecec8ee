use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::paths;

/// Raw config file content and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub content: String,
}

/// Load config file content
///
/// An explicit path must exist. Without one, the first readable file of
/// `paths::search_paths()` wins:
/// 1. `.gh-stale-bot.toml` in the current working directory
/// 2. `config.toml` in the platform config directory
/// 3. `.gh-stale-bot.toml` in the home directory
///
/// Returns `None` if no implicit location has a file.
pub fn load_config_file(explicit: Option<&Path>) -> Result<Option<ConfigSource>> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        return Ok(Some(ConfigSource {
            path: path.to_path_buf(),
            content,
        }));
    }

    Ok(first_readable(&paths::search_paths()))
}

fn first_readable(candidates: &[PathBuf]) -> Option<ConfigSource> {
    candidates.iter().find_map(|path| {
        let content = std::fs::read_to_string(path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(ConfigSource {
            path: path.clone(),
            content,
        })
    })
}
