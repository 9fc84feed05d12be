//! Backend response envelopes and request retry rules.
//!
//! Every endpoint answers `{ "success": bool, "data": ..., "error": "..." }`.
//! The hosting framework sometimes wraps that once more as
//! `{ "message": { ... } }`; [`decode_envelope`] accepts both.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend rejected the request: {0}")]
    Backend(String),
    #[error("response reported success but carried no data")]
    MissingData,
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request failed with status {status}: {message}")]
    Transport { status: u16, message: String },
    #[error("no CSRF token available for a mutating request")]
    MissingCsrfToken,
}

impl ApiError {
    /// Network-level failures that may succeed on another attempt. Status 0
    /// is what the browser reports when the request never reached a server.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport { status, .. } => {
                *status == 0 || *status == 429 || *status >= 500
            }
            Self::Backend(_) | Self::MissingData | Self::Decode(_) | Self::MissingCsrfToken => {
                false
            }
        }
    }
}

/// Backend collections the dashboard reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Incidents,
    ChangeRequests,
    RiskRegisters,
    MonitoringDashboards,
    PasswordVault,
    Projects,
    ProjectApps,
}

impl Resource {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Incidents => "incidents",
            Self::ChangeRequests => "change_requests",
            Self::RiskRegisters => "risk_registers",
            Self::MonitoringDashboards => "monitoring_dashboards",
            Self::PasswordVault => "password_vault",
            Self::Projects => "projects",
            Self::ProjectApps => "project_apps",
        }
    }
}

/// HTTP verbs the api layer issues; anything but `Get` needs a CSRF token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// Unwrap the framework envelope and decode `data`.
///
/// # Errors
/// [`ApiError::Backend`] when `success` is false, [`ApiError::MissingData`]
/// when `data` is absent, [`ApiError::Decode`] when the shape is wrong.
pub fn decode_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> = serde_json::from_value(unwrap_message(value))?;
    if !envelope.success {
        return Err(ApiError::Backend(
            envelope
                .error
                .unwrap_or_else(|| "request failed".to_string()),
        ));
    }
    envelope.data.ok_or(ApiError::MissingData)
}

/// For writes that answer only with `success`.
///
/// # Errors
/// [`ApiError::Backend`] when `success` is false.
pub fn decode_ack(value: Value) -> Result<(), ApiError> {
    let envelope: ApiEnvelope<Value> = serde_json::from_value(unwrap_message(value))?;
    if envelope.success {
        Ok(())
    } else {
        Err(ApiError::Backend(
            envelope
                .error
                .unwrap_or_else(|| "request failed".to_string()),
        ))
    }
}

fn unwrap_message(value: Value) -> Value {
    match value {
        Value::Object(mut map) if !map.contains_key("success") => {
            map.remove("message").unwrap_or(Value::Object(map))
        }
        other => other,
    }
}

/// Exponential backoff for transient request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u32,
    pub max_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based: the wait after the first
    /// failure is `delay_for(1)`).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> u32 {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay_ms
            .saturating_mul(1_u32 << exponent)
            .min(self.max_delay_ms)
    }

    /// Whether a failure on attempt `attempt` (1-based) should be retried.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32, err: &ApiError) -> bool {
        attempt < self.max_attempts && err.is_transient()
    }
}
