//! Backend calls: `fetch` with cookies, CSRF on writes, retries on transient
//! failures and envelope decoding.

use devsecops_core::{ApiError, ClientConfig, Method, Resource, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::future::Future;
#[cfg(target_arch = "wasm32")]
use {
    crate::dom,
    devsecops_core::{decode_ack, decode_envelope},
    serde_json::Value,
    wasm_bindgen::{JsCast, JsValue},
    wasm_bindgen_futures::JsFuture,
    web_sys::{Headers, Request, RequestCredentials, RequestInit, Response},
};

/// Row shown on list screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RecordSummary {
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Headers for one request. Writes must carry the CSRF token.
///
/// # Errors
/// [`ApiError::MissingCsrfToken`] for a mutating method without a token.
pub fn request_headers(
    config: &ClientConfig,
    method: Method,
    csrf_token: Option<String>,
) -> Result<Vec<(String, String)>, ApiError> {
    let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
    if method.is_mutating() {
        let token = csrf_token.ok_or(ApiError::MissingCsrfToken)?;
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        headers.push((config.csrf_header.clone(), token));
    }
    Ok(headers)
}

#[must_use]
pub fn list_url(config: &ClientConfig, resource: Resource) -> String {
    config.endpoint(resource, "list")
}

#[must_use]
pub fn record_url(config: &ClientConfig, resource: Resource, id: &str) -> String {
    format!("{}?name={}", config.endpoint(resource, "get"), urlencoding::encode(id))
}

#[must_use]
pub fn save_url(config: &ClientConfig, resource: Resource) -> String {
    config.endpoint(resource, "save")
}

/// Run `attempt` until it succeeds, fails permanently or the policy's
/// attempt budget is spent. `sleep` waits the given number of milliseconds.
///
/// # Errors
/// The last error seen.
pub async fn with_retry<T, F, Fut, S, SFut>(
    policy: &RetryPolicy,
    mut attempt: F,
    mut sleep: S,
) -> Result<T, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
    S: FnMut(u32) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut number = 1;
    loop {
        match attempt(number).await {
            Ok(value) => return Ok(value),
            Err(err) if policy.should_retry(number, &err) => {
                let delay = policy.delay_for(number);
                log::warn!("attempt {number} failed: {err}; retrying in {delay}ms");
                sleep(delay).await;
                number += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn transport_error(err: &JsValue) -> ApiError {
    ApiError::Transport {
        status: 0,
        message: dom::js_error_message(err),
    }
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
async fn fetch_json(
    config: &ClientConfig,
    method: Method,
    url: &str,
    body: Option<&Value>,
) -> Result<Value, ApiError> {
    let window = dom::window().ok_or_else(|| transport_error(&JsValue::from_str("no window")))?;
    let init = RequestInit::new();
    init.set_method(method.as_str());
    init.set_credentials(RequestCredentials::Include);
    let headers = Headers::new().map_err(|err| transport_error(&err))?;
    for (name, value) in request_headers(config, method, dom::csrf_token())? {
        headers
            .set(&name, &value)
            .map_err(|err| transport_error(&err))?;
    }
    init.set_headers(&headers);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body.to_string()));
    }

    let request =
        Request::new_with_str_and_init(url, &init).map_err(|err| transport_error(&err))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .and_then(|value| value.dyn_into::<Response>())
        .map_err(|err| transport_error(&err))?;
    if !response.ok() {
        return Err(ApiError::Transport {
            status: response.status(),
            message: response.status_text(),
        });
    }
    let json = response.json().map_err(|err| transport_error(&err))?;
    let json = JsFuture::from(json)
        .await
        .map_err(|err| transport_error(&err))?;
    serde_wasm_bindgen::from_value(json).map_err(|err| ApiError::Transport {
        status: response.status(),
        message: err.to_string(),
    })
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
async fn fetch_with_retry(
    config: &ClientConfig,
    method: Method,
    url: &str,
    body: Option<&Value>,
) -> Result<Value, ApiError> {
    with_retry(
        &config.retry,
        move |_| fetch_json(config, method, url, body),
        |delay| async move {
            let delay = i32::try_from(delay).unwrap_or(i32::MAX);
            if let Err(err) = dom::sleep_ms(delay).await {
                log::warn!("retry delay skipped: {err}");
            }
        },
    )
    .await
}

/// # Errors
/// Any transport, backend or decoding failure.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn list_records(
    config: &ClientConfig,
    resource: Resource,
) -> Result<Vec<RecordSummary>, ApiError> {
    let value = fetch_with_retry(config, Method::Get, &list_url(config, resource), None).await?;
    decode_envelope(value)
}

/// # Errors
/// Any transport, backend or decoding failure.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn get_record(
    config: &ClientConfig,
    resource: Resource,
    id: &str,
) -> Result<Value, ApiError> {
    let value = fetch_with_retry(config, Method::Get, &record_url(config, resource, id), None).await?;
    decode_envelope(value)
}

/// Create or update a record. Writes are not retried.
///
/// # Errors
/// Any transport or backend failure, or a missing CSRF token.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn save_record(
    config: &ClientConfig,
    resource: Resource,
    record: &Value,
) -> Result<(), ApiError> {
    let value = fetch_json(config, Method::Post, &save_url(config, resource), Some(record)).await?;
    decode_ack(value)
}
