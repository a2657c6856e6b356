use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use postdeck_core::config::ClientConfig;
use postdeck_core::impls::{FileKeyValueStore, HttpPostsApi};
use postdeck_core::PostContext;
use tracing::debug;

mod cli;
mod commands;
mod logging;
mod views;

use cli::Cli;

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    dirs::data_dir()
        .map(|d| d.join("postdeck"))
        .context("no data directory on this platform; pass --data-dir")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let config =
        ClientConfig::new(cli.api_url.clone()).with_timeout(Duration::from_secs(cli.timeout_secs));
    let dir = data_dir(&cli)?;
    debug!(api = %config.base(), data_dir = %dir.display(), "starting");

    let api = HttpPostsApi::new(&config).context("building HTTP client")?;
    let store = FileKeyValueStore::open(&dir)
        .with_context(|| format!("opening data directory {}", dir.display()))?;

    // 状態はこのコンテキストだけが持ち、各コマンドに明示的に渡す
    let mut ctx = PostContext::builder().api(api).store(store).build()?;

    let mut stdout = std::io::stdout().lock();
    commands::run(&mut ctx, cli.command, &mut stdout).await
}
