// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::Result;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and return its body text.
///
/// Transport failures propagate; callers parse the body themselves so the
/// HTML document never has to cross an await point.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let text = client.get(url).send().await?.text().await?;
    Ok(text)
}
