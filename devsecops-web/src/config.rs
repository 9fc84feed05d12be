//! Build-time configuration for the dashboard frontend.
//!
//! `PUBLIC_URL` sets the base path the app is served under (e.g. `/desk`).
//! `DEVSECOPS_CLIENT_CONFIG` holds a JSON [`ClientConfig`] document and
//! `DEVSECOPS_API_BASE` overrides its backend prefix. `DEVSECOPS_LOG` picks
//! the console log level. All are read at compile time.

use devsecops_core::ClientConfig;
use log::LevelFilter;

/// Backend configuration with any compile-time override applied.
#[must_use]
pub fn client_config() -> ClientConfig {
    build_client_config(
        option_env!("DEVSECOPS_CLIENT_CONFIG"),
        option_env!("DEVSECOPS_API_BASE").unwrap_or(""),
    )
}

fn build_client_config(json: Option<&str>, api_base: &str) -> ClientConfig {
    let base = match json.filter(|json| !json.trim().is_empty()) {
        Some(json) => ClientConfig::from_json(json).unwrap_or_else(|err| {
            log::warn!("{err}; using the default client configuration");
            ClientConfig::default()
        }),
        None => ClientConfig::default(),
    };
    base.with_api_base(api_base)
}

#[must_use]
pub fn log_level() -> LevelFilter {
    parse_level(option_env!("DEVSECOPS_LOG").unwrap_or("info"))
}

/// Path to a static asset, respecting the deployment base path.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn parse_level(value: &str) -> LevelFilter {
    value.trim().parse().unwrap_or(LevelFilter::Info)
}
