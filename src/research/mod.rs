//! Research pipeline: search, filter, build context, complete, and report formatting.

pub mod context;
pub mod filter;

use std::fmt;

use tracing::{debug, info};

use crate::cerebras::{CerebrasError, CompletionClient};
use crate::exa::{DEFAULT_RESULT_COUNT, ExaError, SearchClient};
use context::build_prompt;
use filter::filter_sources;

pub const NO_SOURCES_SUMMARY: &str = "No sources found";
const SEPARATOR_WIDTH: usize = 50;

/// A search result with enough text to be worth citing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchResult {
    pub query: String,
    pub source_count: usize,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchOutcome {
    Completed(ResearchResult),
    /// Nothing survived filtering; the model was not consulted and there are no insights.
    NoSources,
}

#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("search failed: {0}")]
    Search(#[from] ExaError),

    #[error("completion failed: {0}")]
    Completion(#[from] CerebrasError),
}

/// Milestones reported while a query is being researched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Researching(String),
    Found(usize),
    Scraped(usize),
    AnalysisComplete,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Researching(query) => write!(f, "🔍 Researching: {query}"),
            Progress::Found(n) => write!(f, "📊 Found {n} sources"),
            Progress::Scraped(n) => write!(f, "📄 Scraped {n} sources"),
            Progress::AnalysisComplete => f.write_str("🧠 Analysis complete"),
        }
    }
}

pub async fn research(
    search: &impl SearchClient,
    completion: &impl CompletionClient,
    query: &str,
    mut on_progress: impl FnMut(Progress),
) -> Result<ResearchOutcome, ResearchError> {
    on_progress(Progress::Researching(query.to_string()));

    let results = search.search(query, DEFAULT_RESULT_COUNT).await?;
    on_progress(Progress::Found(results.len()));

    let sources = filter_sources(&results);
    on_progress(Progress::Scraped(sources.len()));
    debug!(
        results = results.len(),
        sources = sources.len(),
        "filtered search results"
    );

    if sources.is_empty() {
        info!(query, "no usable sources, skipping completion");
        return Ok(ResearchOutcome::NoSources);
    }

    let prompt = build_prompt(query, &sources);
    let response = completion.complete(&prompt).await?;
    on_progress(Progress::AnalysisComplete);

    Ok(ResearchOutcome::Completed(ResearchResult {
        query: query.to_string(),
        source_count: sources.len(),
        response,
    }))
}

/// `query` is only used for `NoSources`; a completed result carries its own.
pub fn format_report(outcome: &ResearchOutcome, query: &str) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let (query, source_count, response) = match outcome {
        ResearchOutcome::Completed(result) => (
            result.query.as_str(),
            result.source_count,
            result.response.clone(),
        ),
        ResearchOutcome::NoSources => (query, 0, format!("SUMMARY: {NO_SOURCES_SUMMARY}")),
    };

    format!(
        "{separator}\nRESEARCH RESULTS\n{separator}\nQuery: {query}\nSources analyzed: {source_count}\n\n{response}\n{separator}"
    )
}
