//! Client configuration shared by the web app and the tester.

use crate::api::{Resource, RetryPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix of every backend endpoint.
    pub api_base: String,
    /// Header carrying the CSRF token on mutating requests.
    pub csrf_header: String,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/method/devsecops.api".to_string(),
            csrf_header: "X-CSRF-Token".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Parse a JSON document; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error for malformed JSON or values that fail [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the api base, ignoring blank values.
    #[must_use]
    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = base.trim();
        if !base.is_empty() {
            self.api_base = base.to_string();
        }
        self
    }

    /// # Errors
    /// Returns [`ConfigError::Invalid`] when a field cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.csrf_header.trim().is_empty() {
            return Err(ConfigError::Invalid("csrf_header is empty".to_string()));
        }
        Ok(())
    }

    /// `{api_base}/{resource}/{action}`, e.g. `/api/method/devsecops.api/incidents/list`.
    #[must_use]
    pub fn endpoint(&self, resource: Resource, action: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_base.trim_end_matches('/'),
            resource.segment(),
            action.trim_start_matches('/')
        )
    }
}
