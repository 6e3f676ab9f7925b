//! Credential loading. Both keys are required and checked before any client exists.

use std::env;

pub const SEARCH_KEY_VAR: &str = "EXA_API_KEY";
pub const COMPLETION_KEY_VAR: &str = "CEREBRAS_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub search_api_key: ApiKey,
    pub completion_api_key: ApiKey,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    /// Absent, empty, and whitespace-only values all count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(ApiKey::new)
                .ok_or(ConfigError::MissingCredential(name))
        };

        Ok(Self {
            search_api_key: required(SEARCH_KEY_VAR)?,
            completion_api_key: required(COMPLETION_KEY_VAR)?,
        })
    }
}
