// src/api/mod.rs

//! HTTP surface: route wiring and shared application state.
//!
//! Every route is CORS-open; the frontend and the voice assistant both
//! call this backend from other origins.

mod chess;
mod laundry;
mod spotify;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::Result;
use crate::services::{ChessClient, DirectoryScraper, MachineScraper, SpotifyClient, TokenStore};
use crate::utils::http::create_client;

/// Shared application state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub laundry: MachineScraper,
    pub directory: DirectoryScraper,
    pub spotify: SpotifyClient,
    pub chess: ChessClient,
}

/// State wrapper used by the router.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build all services from configuration.
    ///
    /// Fails when the HTTP client cannot be built or the Spotify secrets
    /// file cannot be read.
    pub fn new(config: Config) -> Result<Self> {
        let client = create_client(&config.http)?;

        let tokens = Arc::new(TokenStore::load(
            client.clone(),
            config.spotify.token_url.clone(),
            config.spotify.secrets_path.clone(),
            config.spotify.refresh_margin_secs,
        )?);

        let laundry = MachineScraper::new(client.clone(), config.laundry.location_base_url.clone());
        let directory = DirectoryScraper::new(
            client.clone(),
            config.laundry.index_url.clone(),
            config.http.max_concurrent,
        );
        let spotify = SpotifyClient::new(
            client.clone(),
            config.spotify.api_base_url.clone(),
            tokens,
        );
        let chess = ChessClient::new(
            client,
            config.chess.lichess_export_url.clone(),
            config.chess.chesscom_api_url.clone(),
        );

        Ok(Self {
            config,
            laundry,
            directory,
            spotify,
            chess,
        })
    }
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/laundry_locations", get(laundry::locations))
        .route(
            "/fulfillment",
            get(laundry::fulfillment).post(laundry::fulfillment),
        )
        .route(
            "/raw_status",
            get(laundry::raw_status).post(laundry::raw_status),
        )
        .route("/playback_status", get(spotify::playback_status))
        .route("/search_spotify", get(spotify::search))
        .route("/queue_song", get(spotify::queue_song))
        .route("/get_pgn", get(chess::get_pgn))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
