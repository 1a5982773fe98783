//! storacha-rclone CLI
//!
//! Save S3 credentials once, then list or download objects from the
//! configured bucket.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use storacha_rclone::cli::{Cli, Command, LogLevel};
use storacha_rclone::commands;
use storacha_rclone::config::ConfigStore;
use storacha_rclone::prompt::TerminalPrompter;
use storacha_rclone::s3::SessionOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::debug!("Starting storacha-rclone v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize logging (to stderr, so stdout only carries command output).
fn init_logging(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;

    Ok(())
}

async fn run(cli: Cli) -> storacha_rclone::Result<()> {
    let config = ConfigStore::from_home()?;

    let mut options = SessionOptions::default();
    if let Some(endpoint) = cli.endpoint_url {
        options = options.with_endpoint(endpoint);
    }

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Login => {
            commands::login(&config, &mut TerminalPrompter, &mut stdout)?;
        }
        Command::List { prefix } => {
            commands::list(&config, &options, prefix.as_deref(), &mut stdout).await?;
        }
        Command::Get { key, out } => {
            commands::get(&config, &options, &key, out.as_deref(), &mut stdout).await?;
        }
    }

    Ok(())
}
