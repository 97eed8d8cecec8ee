//! Configuration file locations
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/gh-stale-bot/config.toml`
//! - macOS: `~/Library/Application Support/gh-stale-bot/config.toml`
//! - Windows: `%APPDATA%\gh-stale-bot\config.toml`

use std::env;
use std::path::PathBuf;

const APP_NAME: &str = "gh-stale-bot";

/// Dotfile name used in the working directory and in `$HOME`
pub const LOCAL_CONFIG_FILE: &str = ".gh-stale-bot.toml";

/// Get the application config directory, if the platform has one
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Get path to the global config file
pub fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get path to the config dotfile in the working directory
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG_FILE)
}

/// Get path to the config dotfile in the home directory
pub fn home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(LOCAL_CONFIG_FILE))
}

/// All implicit config locations, highest priority first
pub fn search_paths() -> Vec<PathBuf> {
    std::iter::once(local_config_path())
        .chain(global_config_path())
        .chain(home_config_path())
        .collect()
}
