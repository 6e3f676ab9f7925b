mod cerebras;
mod cli;
mod config;
mod exa;
mod research;

pub const USER_AGENT: &str = concat!("research/", env!("CARGO_PKG_VERSION"));

use std::process::ExitCode;

use clap::Parser;
use cli::{AppError, Cli, USAGE, exit_code};
use config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("research=warn")),
        )
        .init();

    match cli::run(Cli::parse(), Config::from_env).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ AppError::InvalidInvocation) => {
            println!("{USAGE}");
            exit_code(&e)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "research failed");
            eprintln!("❌ Error: {e}");
            exit_code(&e)
        }
    }
}
