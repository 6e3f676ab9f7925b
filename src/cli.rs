use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use crate::cerebras::CerebrasClient;
use crate::config::{Config, ConfigError};
use crate::exa::ExaClient;
use crate::research::{self, ResearchError, format_report};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Whole-request timeout; completions are the slow path.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

pub const USAGE: &str = "Usage: research <query>\nExample: research \"latest AI breakthroughs\"";

/// Search the web with Exa and summarize the top sources with a Cerebras-hosted LLM.
///
/// Requires `EXA_API_KEY` and `CEREBRAS_API_KEY` in the environment.
#[derive(Debug, Parser)]
#[command(name = "research", version)]
pub struct Cli {
    /// Query words; joined with single spaces. Words may start with `-`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
}

impl Cli {
    pub fn query(&self) -> Option<String> {
        let query = self.query.join(" ");
        (!query.trim().is_empty()).then_some(query)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no query given")]
    InvalidInvocation,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Research(#[from] ResearchError),
}

/// Every failure, including a missing query, exits with status 1.
pub fn exit_code(err: &AppError) -> ExitCode {
    match err {
        AppError::InvalidInvocation
        | AppError::Config(_)
        | AppError::Http(_)
        | AppError::Research(_) => ExitCode::from(1),
    }
}

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()
}

/// Runs one research invocation. Credentials load before any client is built,
/// so a missing key fails without touching the network.
pub async fn run(
    cli: Cli,
    load_config: impl FnOnce() -> Result<Config, ConfigError>,
) -> Result<(), AppError> {
    let query = cli.query().ok_or(AppError::InvalidInvocation)?;

    println!("✅ Setting up API clients...");
    let config = load_config()?;
    let http = build_http_client()?;
    let exa = ExaClient::new(http.clone(), config.search_api_key);
    let cerebras = CerebrasClient::new(http, config.completion_api_key);
    println!("✅ Setup complete\n");

    info!(query = %query, "starting research");
    let outcome = research::research(&exa, &cerebras, &query, |p| println!("{p}")).await?;

    println!("\n{}", format_report(&outcome, &query));
    Ok(())
}
