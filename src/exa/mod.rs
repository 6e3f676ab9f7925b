//! Exa web search: request/response types and the HTTP client.

pub mod client;
pub mod types;

pub use client::{DEFAULT_RESULT_COUNT, ExaClient, ExaError, SearchClient};
pub use types::SearchResult;
