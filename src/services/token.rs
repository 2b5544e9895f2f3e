// src/services/token.rs

//! Spotify access token store.
//!
//! Holds the process-wide OAuth token cache: one access token plus its
//! expiration timestamp, refreshed lazily via the stored refresh token and
//! written back to the secrets file so restarts reuse it. The store is an
//! explicit injected object; nothing else touches the secrets file.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};

/// Lifetime assumed for a refreshed token when the response omits
/// `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Contents of the secrets file.
///
/// Unknown fields (auth URL, scopes, ...) are carried through `extra` so a
/// rewrite never loses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifySecrets {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,

    #[serde(default)]
    pub access_token: String,

    /// Unix timestamp after which the access token is dead
    #[serde(default)]
    pub expiration: i64,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SpotifySecrets {
    /// Load secrets from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whether the access token is expired or within the refresh margin.
    pub fn is_stale(&self, now: i64, margin_secs: i64) -> bool {
        now + margin_secs > self.expiration
    }
}

/// Shape of the token endpoint's refresh response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// Lazily-refreshing access token cache backed by the secrets file.
pub struct TokenStore {
    client: Client,
    token_url: String,
    path: PathBuf,
    margin_secs: i64,
    state: Mutex<SpotifySecrets>,
}

impl TokenStore {
    /// Load the secrets file and build a store around it.
    pub fn load(
        client: Client,
        token_url: impl Into<String>,
        path: impl Into<PathBuf>,
        margin_secs: i64,
    ) -> Result<Self> {
        let path = path.into();
        let secrets = SpotifySecrets::load(&path)?;

        Ok(Self {
            client,
            token_url: token_url.into(),
            path,
            margin_secs,
            state: Mutex::new(secrets),
        })
    }

    /// Get a usable access token, refreshing first if it is within the
    /// margin of expiring.
    ///
    /// The lock is held across the refresh, so concurrent callers wait for
    /// one refresh instead of racing their own.
    pub async fn get(&self) -> Result<String> {
        let mut state = self.state.lock().await;

        if state.is_stale(Utc::now().timestamp(), self.margin_secs) {
            log::info!("Spotify access token stale, refreshing");
            self.refresh(&mut state).await?;
        }

        Ok(state.access_token.clone())
    }

    /// Force the next `get` to refresh.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.expiration = 0;
    }

    async fn refresh(&self, state: &mut SpotifySecrets) -> Result<()> {
        let credentials =
            URL_SAFE.encode(format!("{}:{}", state.client_id, state.client_secret));
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", state.refresh_token.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upstream(
                "spotify",
                format!("token refresh returned {}", response.status()),
            ));
        }

        let token: TokenResponse = response.json().await?;
        state.access_token = token.access_token;
        state.expiration = Utc::now().timestamp()
            + token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);

        self.save(state)
    }

    /// Persist the current secrets so the next process reuses the token.
    fn save(&self, state: &SpotifySecrets) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_secrets() -> SpotifySecrets {
        SpotifySecrets {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
            access_token: "access".to_string(),
            expiration: 1_000,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn stale_within_margin() {
        let secrets = sample_secrets();
        assert!(secrets.is_stale(990, 30)); // 990 + 30 > 1000
        assert!(!secrets.is_stale(900, 30));
        assert!(secrets.is_stale(2_000, 30));
    }

    #[test]
    fn secrets_round_trip_preserves_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spotify.json");

        let raw = serde_json::json!({
            "client_id": "client",
            "client_secret": "secret",
            "refresh_token": "refresh",
            "access_token": "access",
            "expiration": 1000,
            "base_auth_url": "https://accounts.example.com/authorize",
            "scopes": ["user-read-playback-state"],
        });
        std::fs::write(&path, serde_json::to_string(&raw).unwrap()).unwrap();

        let secrets = SpotifySecrets::load(&path).unwrap();
        assert_eq!(secrets.client_id, "client");
        assert!(secrets.extra.contains_key("base_auth_url"));

        let rewritten = serde_json::to_value(&secrets).unwrap();
        assert_eq!(rewritten["scopes"][0], "user-read-playback-state");
    }

    #[test]
    fn missing_token_fields_default_to_stale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spotify.json");

        let raw = serde_json::json!({
            "client_id": "client",
            "client_secret": "secret",
            "refresh_token": "refresh",
        });
        std::fs::write(&path, serde_json::to_string(&raw).unwrap()).unwrap();

        let secrets = SpotifySecrets::load(&path).unwrap();
        assert_eq!(secrets.expiration, 0);
        assert!(secrets.is_stale(Utc::now().timestamp(), 30));
    }

    #[tokio::test]
    async fn invalidate_forces_staleness() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spotify.json");
        std::fs::write(
            &path,
            serde_json::to_string(&sample_secrets()).unwrap(),
        )
        .unwrap();

        let store = TokenStore::load(
            Client::new(),
            "https://accounts.example.com/api/token",
            path.clone(),
            30,
        )
        .unwrap();

        store.invalidate().await;
        let state = store.state.lock().await;
        assert_eq!(state.expiration, 0);
    }
}
