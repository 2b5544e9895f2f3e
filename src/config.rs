// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Laundry status page settings
    #[serde(default)]
    pub laundry: LaundryConfig,

    /// Spotify API settings
    #[serde(default)]
    pub spotify: SpotifyConfig,

    /// Chess archive API settings
    #[serde(default)]
    pub chess: ChessConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(AppError::validation("server.bind_addr is empty"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.laundry.index_url.trim().is_empty() {
            return Err(AppError::validation("laundry.index_url is empty"));
        }
        if self.laundry.location_base_url.trim().is_empty() {
            return Err(AppError::validation("laundry.location_base_url is empty"));
        }
        if self.laundry.default_location.trim().is_empty() {
            return Err(AppError::validation("laundry.default_location is empty"));
        }
        if self.spotify.refresh_margin_secs == 0 {
            return Err(AppError::validation(
                "spotify.refresh_margin_secs must be > 0",
            ));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address and port to listen on
    #[serde(default = "defaults::bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: defaults::bind_addr(),
        }
    }
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for outbound requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent outbound requests per fan-out
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Laundry status page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaundryConfig {
    /// URL of the top-level village index page
    #[serde(default = "defaults::laundry_index_url")]
    pub index_url: String,

    /// Base URL a location id is appended to for a site's status page
    #[serde(default = "defaults::laundry_location_base_url")]
    pub location_base_url: String,

    /// Location id used when a request does not name one
    #[serde(default = "defaults::laundry_default_location")]
    pub default_location: String,
}

impl Default for LaundryConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::laundry_index_url(),
            location_base_url: defaults::laundry_location_base_url(),
            default_location: defaults::laundry_default_location(),
        }
    }
}

/// Spotify API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    /// Path to the JSON secrets file holding client credentials and tokens
    #[serde(default = "defaults::spotify_secrets_path")]
    pub secrets_path: String,

    /// OAuth token endpoint
    #[serde(default = "defaults::spotify_token_url")]
    pub token_url: String,

    /// Web API base URL
    #[serde(default = "defaults::spotify_api_base_url")]
    pub api_base_url: String,

    /// Refresh the access token this many seconds before it expires
    #[serde(default = "defaults::spotify_refresh_margin")]
    pub refresh_margin_secs: i64,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            secrets_path: defaults::spotify_secrets_path(),
            token_url: defaults::spotify_token_url(),
            api_base_url: defaults::spotify_api_base_url(),
            refresh_margin_secs: defaults::spotify_refresh_margin(),
        }
    }
}

/// Chess archive API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessConfig {
    /// Lichess bulk game export endpoint, username appended
    #[serde(default = "defaults::lichess_export_url")]
    pub lichess_export_url: String,

    /// chess.com public API base URL
    #[serde(default = "defaults::chesscom_api_url")]
    pub chesscom_api_url: String,
}

impl Default for ChessConfig {
    fn default() -> Self {
        Self {
            lichess_export_url: defaults::lichess_export_url(),
            chesscom_api_url: defaults::chesscom_api_url(),
        }
    }
}

mod defaults {
    // Server defaults
    pub fn bind_addr() -> String {
        "0.0.0.0:8080".into()
    }

    // HTTP client defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; washboard/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Laundry defaults
    pub fn laundry_index_url() -> String {
        "http://washalert.washlaundry.com/washalertweb/calpoly/cal-poly.html".into()
    }
    pub fn laundry_location_base_url() -> String {
        "http://washalert.washlaundry.com/washalertweb/calpoly/washalertweb.aspx?location=".into()
    }
    pub fn laundry_default_location() -> String {
        "676b5302-485a-4edb-8b36-a20d82a3ae20".into()
    }

    // Spotify defaults
    pub fn spotify_secrets_path() -> String {
        "secret/spotify.json".into()
    }
    pub fn spotify_token_url() -> String {
        "https://accounts.spotify.com/api/token".into()
    }
    pub fn spotify_api_base_url() -> String {
        "https://api.spotify.com".into()
    }
    pub fn spotify_refresh_margin() -> i64 {
        30
    }

    // Chess defaults
    pub fn lichess_export_url() -> String {
        "https://lichess.org/api/games/user".into()
    }
    pub fn chesscom_api_url() -> String {
        "https://api.chess.com".into()
    }
}
