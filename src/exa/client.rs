use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{Contents, ErrorBody, SearchRequest, SearchResponse, SearchResult, TextOptions};
use crate::config::ApiKey;

const API_BASE: &str = "https://api.exa.ai";
/// Provider picks neural or keyword search per query.
const SEARCH_TYPE: &str = "auto";
const MAX_TEXT_CHARS: u32 = 1000;
pub const DEFAULT_RESULT_COUNT: u8 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ExaError {
    #[error("Exa rejected the API key ({0}). Check EXA_API_KEY.")]
    Unauthorized(u16),

    #[error("Exa rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("Exa quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Exa API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Web search returning ranked text results.
/// Implemented by `ExaClient` for production; mock implementations used in tests.
pub trait SearchClient {
    async fn search(&self, query: &str, count: u8) -> Result<Vec<SearchResult>, ExaError>;
}

pub struct ExaClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl ExaClient {
    pub fn new(http: Client, api_key: ApiKey) -> Self {
        Self {
            http,
            api_key,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::new("test-key"),
            base_url: base_url.to_string(),
        }
    }
}

impl SearchClient for ExaClient {
    async fn search(&self, query: &str, count: u8) -> Result<Vec<SearchResult>, ExaError> {
        let url = format!("{}/search", self.base_url);
        let request = SearchRequest {
            query,
            search_type: SEARCH_TYPE,
            num_results: count,
            contents: Contents {
                text: TextOptions {
                    max_characters: MAX_TEXT_CHARS,
                },
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-api-key", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_status(status, &text);
            warn!(error = %err, "Exa search failed");
            return Err(err);
        }

        let body: SearchResponse = response.json().await?;
        let results: Vec<SearchResult> = body
            .results
            .into_iter()
            .take(count as usize)
            .map(SearchResult::from)
            .collect();

        debug!(count = results.len(), "exa search complete");
        Ok(results)
    }
}

fn classify_status(status: StatusCode, body: &str) -> ExaError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| {
            let end = body.floor_char_boundary(200);
            format!("HTTP {status}: {}", &body[..end])
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExaError::Unauthorized(status.as_u16()),
        StatusCode::PAYMENT_REQUIRED => ExaError::QuotaExhausted(message),
        StatusCode::TOO_MANY_REQUESTS => ExaError::RateLimited,
        _ => ExaError::Api {
            code: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_401_as_unauthorized() {
        let err = classify_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ExaError::Unauthorized(401)));
        assert!(err.to_string().contains("EXA_API_KEY"));
    }

    #[test]
    fn classify_402_as_quota_with_body_message() {
        let err = classify_status(
            StatusCode::PAYMENT_REQUIRED,
            r#"{"requestId":"abc","error":"Out of credits"}"#,
        );
        match err {
            ExaError::QuotaExhausted(message) => assert_eq!(message, "Out of credits"),
            other => panic!("expected QuotaExhausted, got: {other:?}"),
        }
    }

    #[test]
    fn classify_500_with_plain_body_keeps_snippet() {
        let body = "x".repeat(500);
        match classify_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ExaError::Api { code, message } => {
                assert_eq!(code, 500);
                assert!(message.starts_with("HTTP 500"));
                assert!(message.len() < 300);
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }
}
