use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ChatRequest, ChatResponse, ErrorBody, Message};
use crate::config::ApiKey;

const API_BASE: &str = "https://api.cerebras.ai/v1";
const MODEL: &str = "llama-4-scout-17b-16e-instruct";
const MAX_TOKENS: u32 = 600;
const TEMPERATURE: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum CerebrasError {
    #[error("Cerebras rejected the API key ({0}). Check CEREBRAS_API_KEY.")]
    Unauthorized(u16),

    #[error("Cerebras rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("Cerebras API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Cerebras returned no completion choices")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Single-turn text completion.
/// Implemented by `CerebrasClient` for production; mock implementations used in tests.
pub trait CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CerebrasError>;
}

pub struct CerebrasClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl CerebrasClient {
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

impl CompletionClient for CerebrasClient {
    async fn complete(&self, prompt: &str) -> Result<String, CerebrasError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: MODEL,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_status(status, &text);
            warn!(error = %err, "Cerebras completion failed");
            return Err(err);
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(CerebrasError::EmptyResponse)?;

        debug!(model = MODEL, chars = content.len(), "cerebras completion complete");
        Ok(content)
    }
}

fn classify_status(status: StatusCode, body: &str) -> CerebrasError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            return CerebrasError::Unauthorized(status.as_u16());
        }
        StatusCode::TOO_MANY_REQUESTS => return CerebrasError::RateLimited,
        _ => {}
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            let end = body.floor_char_boundary(200);
            format!("HTTP {status}: {}", &body[..end])
        });

    CerebrasError::Api {
        code: status.as_u16(),
        message,
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn complete_sends_fixed_parameters_and_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama-4-scout-17b-16e-instruct",
                "messages": [{ "role": "user", "content": "hello prompt" }],
                "max_tokens": 600,
                "temperature": 0.2
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "SUMMARY: done" } },
                    { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CerebrasClient::with_base_url(Client::new(), &server.uri());
        let text = client.complete("hello prompt").await.unwrap();
        assert_eq!(text, "SUMMARY: done");
    }

    #[tokio::test]
    async fn complete_empty_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = CerebrasClient::with_base_url(Client::new(), &server.uri());
        let result = client.complete("prompt").await;
        assert!(matches!(result, Err(CerebrasError::EmptyResponse)));
    }

    #[tokio::test]
    async fn complete_429_returns_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let client = CerebrasClient::with_base_url(Client::new(), &server.uri());
        let result = client.complete("prompt").await;
        assert!(matches!(result, Err(CerebrasError::RateLimited)));
    }

    #[tokio::test]
    async fn complete_500_without_json_keeps_snippet() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = CerebrasClient::with_base_url(Client::new(), &server.uri());
        match client.complete("prompt").await {
            Err(CerebrasError::Api { code: 500, message }) => {
                assert!(message.contains("upstream down"), "got: {message}");
            }
            other => panic!("expected Api(500), got: {other:?}"),
        }
    }
}
