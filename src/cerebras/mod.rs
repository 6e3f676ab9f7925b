//! Cerebras chat completions (OpenAI-compatible wire format).

pub mod client;
pub mod types;

pub use client::{CerebrasClient, CerebrasError, CompletionClient};
