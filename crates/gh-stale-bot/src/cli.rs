//! Command line interface

use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Label and ping assigned issues whose assignees went quiet
#[derive(Debug, Parser)]
#[command(name = "gh-stale-bot", version, about)]
pub struct Cli {
    /// Repository to process, as owner/name
    #[arg(long, short)]
    pub repo: RepoRef,

    /// Only process these issue numbers (repeatable); default is every
    /// open issue with an assignee
    #[arg(long = "issue", short = 'i', value_name = "NUMBER")]
    pub issues: Vec<u64>,

    /// GitHub host, for GitHub Enterprise
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Config file; default is .gh-stale-bot.toml in the working directory,
    /// the user config directory, or the home directory
    #[arg(long, short, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log planned changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(long, short)]
    pub verbose: bool,
}

/// Repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("expected owner/name, got '{}'", s)),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
