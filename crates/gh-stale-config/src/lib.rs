//! Configuration for gh-stale-bot
//!
//! This crate provides:
//! - Config file discovery (working directory, platform config dir, home)
//! - Application configuration (AppConfig) with validated cutoff windows
//! - Label name resolution between label classes and repository labels
//! - Notice comment templates

pub mod app_config;
pub mod config_file;
pub mod labels;
pub mod paths;

pub use app_config::{AppConfig, NoticeTemplates};
pub use config_file::{load_config_file, ConfigSource};
pub use labels::LabelNames;
