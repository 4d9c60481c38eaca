use std::sync::Arc;

use anyhow::Context;
use aud_auth::{DetachedHost, HostChannel, LineHost};
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod progress;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("auditor error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = aud_config::AuditorConfig::load_with_dotenv()
        .context("failed to load auditor configuration")?;

    // Only the relay answers a host on stdout; every other command prints results there.
    let host: Arc<dyn HostChannel> = if matches!(cli.command, cli::Commands::Relay) {
        Arc::new(LineHost::new(std::io::stdout()))
    } else {
        Arc::new(DetachedHost)
    };

    let ctx = context::AppContext::init(config, host)
        .context("failed to initialize auditor application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("AUDITOR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
