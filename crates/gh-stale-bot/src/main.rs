mod cli;
mod executor;
mod logger;
mod run;
#[cfg(test)]
mod test_support;
mod timeline;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use gh_client::ClientManager;
use gh_stale_config::AppConfig;
use log::info;

use crate::cli::Cli;
use crate::run::Housekeeper;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (GITHUB_TOKEN etc.)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref())?;

    let mut clients = ClientManager::new();
    let client = clients
        .get_client(cli.host.as_deref())
        .await
        .context("Failed to create GitHub client")?;

    if cli.dry_run {
        info!("Dry run, no changes will be made");
    }

    let now = Utc::now();
    let housekeeper = Housekeeper::new(&client, &config, now, cli.dry_run)?;
    let summary = housekeeper.run(&cli.repo, &cli.issues).await?;

    if summary.failed > 0 {
        bail!("{} issue(s) failed", summary.failed);
    }
    Ok(())
}
