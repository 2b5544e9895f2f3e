// src/api/chess.rs

//! Chess PGN proxy endpoint.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::Result;
use crate::services::chess::apply_alias;

use super::SharedState;

/// `GET /get_pgn?lc=<user>&cc=<user>&alias=<name>` — concatenated PGN
/// from the requested archives.
///
/// Sources appear in query-string order; `lc` selects Lichess, `cc`
/// chess.com, unknown keys are ignored. With `alias` every queried
/// username is rewritten to it.
pub async fn get_pgn(
    State(state): State<SharedState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let mut usernames = Vec::new();
    let mut parts = Vec::new();

    for (key, username) in &params {
        let games = match key.as_str() {
            "lc" => state.chess.lichess_games(username).await?,
            "cc" => state.chess.chesscom_games(username).await?,
            _ => continue,
        };

        usernames.push(username.clone());
        parts.push(games);
    }

    let mut pgn = parts.join("\n\n");
    if let Some((_, alias)) = params.iter().find(|(key, _)| key == "alias") {
        pgn = apply_alias(&pgn, &usernames, alias);
    }

    Ok((
        [(header::CONTENT_TYPE, "application/x-chess-pgn")],
        pgn,
    )
        .into_response())
}
