// src/api/spotify.rs

//! Spotify proxy endpoints. Upstream JSON is passed through untouched.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

use super::SharedState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    uri: String,
}

/// `GET /playback_status` — current player state.
pub async fn playback_status(State(state): State<SharedState>) -> Result<Json<Value>> {
    Ok(Json(state.spotify.playback_status().await?))
}

/// `GET /search_spotify?q=` — track search.
pub async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>> {
    Ok(Json(state.spotify.search(&query.q).await?))
}

/// `GET /queue_song?uri=` — queue a track, then report the fresh player
/// state.
pub async fn queue_song(
    State(state): State<SharedState>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<Value>> {
    state.spotify.queue(&query.uri).await?;
    Ok(Json(state.spotify.playback_status().await?))
}
