// src/services/spotify.rs

//! Spotify Web API client.
//!
//! Thin token-authenticated proxy: responses are passed through as JSON
//! values, not modeled. The access token comes from the injected
//! [`TokenStore`](crate::services::TokenStore) on every call.

use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::services::TokenStore;

/// Client for the Spotify player and search endpoints.
pub struct SpotifyClient {
    client: Client,
    api_base_url: String,
    tokens: Arc<TokenStore>,
}

impl SpotifyClient {
    /// Create a new Spotify client around a token store.
    pub fn new(client: Client, api_base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        Self {
            client,
            api_base_url: api_base_url.into(),
            tokens,
        }
    }

    /// Current playback state.
    ///
    /// Spotify answers 204 with an empty body when nothing is playing;
    /// that surfaces as JSON `null`.
    pub async fn playback_status(&self) -> Result<Value> {
        let token = self.tokens.get().await?;
        let response = self
            .client
            .get(format!("{}/v1/me/player", self.api_base_url))
            .bearer_auth(&token)
            .send()
            .await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Search for tracks matching a query.
    pub async fn search(&self, query: &str) -> Result<Value> {
        let token = self.tokens.get().await?;
        let response = self
            .client
            .get(format!("{}/v1/search", self.api_base_url))
            .bearer_auth(&token)
            .query(&[("q", query), ("type", "track"), ("limit", "10")])
            .send()
            .await?;

        Ok(response.json().await?)
    }

    /// Add a track URI to the playback queue. Spotify answers 204 on
    /// success.
    pub async fn queue(&self, uri: &str) -> Result<()> {
        let token = self.tokens.get().await?;
        let response = self
            .client
            .post(format!("{}/v1/me/player/queue", self.api_base_url))
            .bearer_auth(&token)
            .query(&[("uri", uri)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upstream(
                "spotify",
                format!("queue returned {}", response.status()),
            ));
        }
        Ok(())
    }
}
