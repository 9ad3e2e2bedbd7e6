//! AutoTap - foreground app funnel automation
//!
//! Main entry point for the AutoTap CLI.

mod cli;
mod cmd_inspect;
mod cmd_run;
mod register;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autotap_config::ConfigLoader;

use crate::cli::{Cli, Commands};

/// Get the .autotap directory path.
fn autotap_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".autotap"))
        .unwrap_or_else(|| PathBuf::from(".autotap"))
}

/// Console output plus a daily-rotated file under `~/.autotap/logs`.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = autotap_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("autotap")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { seed } => cmd_run::run_workflow(config, seed).await,
        Commands::Classify => cmd_inspect::classify(&config).await,
        Commands::Query { selector, xpath } => {
            cmd_inspect::query_nodes(&config, &selector, xpath).await
        }
        Commands::Dump { json } => cmd_inspect::dump(&config, json).await,
        Commands::CheckConfig => cmd_inspect::check_config(&config),
    }
}
