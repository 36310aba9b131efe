//! Shared outbound HTTP client construction

use reqwest::Client;
use std::time::Duration;

use crate::LocalcastError;
use crate::config::HttpConfig;

/// Build a pooled client with the configured per-call timeout. Every
/// adapter owns one; `Client` is cheap to clone and safe to share.
pub fn build_client(config: &HttpConfig) -> Result<Client, LocalcastError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Join a configured base URL and a path without doubling slashes
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
