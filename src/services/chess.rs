// src/services/chess.rs

//! Chess game archive client.
//!
//! Fetches complete game histories as PGN text from Lichess (one bulk
//! export call) and chess.com (an archives index followed by one call per
//! month), and rewrites player names when an alias is requested.

use regex::RegexBuilder;
use reqwest::Client;
use serde::Deserialize;

use crate::error::Result;
use crate::utils::http::fetch_text;

/// chess.com archives index.
#[derive(Debug, Deserialize)]
struct ArchivesIndex {
    archives: Vec<String>,
}

/// One month of chess.com games.
#[derive(Debug, Deserialize)]
struct MonthlyArchive {
    #[serde(default)]
    games: Vec<ArchivedGame>,
}

#[derive(Debug, Deserialize)]
struct ArchivedGame {
    /// Absent for variants chess.com does not export as PGN
    pgn: Option<String>,
}

/// Client for the chess archive APIs.
pub struct ChessClient {
    client: Client,
    lichess_export_url: String,
    chesscom_api_url: String,
}

impl ChessClient {
    /// Create a new chess archive client.
    pub fn new(
        client: Client,
        lichess_export_url: impl Into<String>,
        chesscom_api_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            lichess_export_url: lichess_export_url.into(),
            chesscom_api_url: chesscom_api_url.into(),
        }
    }

    /// Fetch a user's complete game history from Lichess as PGN text.
    pub async fn lichess_games(&self, username: &str) -> Result<String> {
        let url = format!(
            "{}/{}",
            self.lichess_export_url.trim_end_matches('/'),
            username
        );
        fetch_text(&self.client, &url).await
    }

    /// Fetch a user's complete game history from chess.com as PGN text.
    ///
    /// chess.com splits history into monthly archives; every month is
    /// fetched and the games concatenated in archive order.
    pub async fn chesscom_games(&self, username: &str) -> Result<String> {
        let index_url = format!(
            "{}/pub/player/{}/games/archives",
            self.chesscom_api_url.trim_end_matches('/'),
            username
        );
        let index: ArchivesIndex = self.client.get(&index_url).send().await?.json().await?;
        log::debug!(
            "chess.com user {username}: {} monthly archives",
            index.archives.len()
        );

        let mut months = Vec::with_capacity(index.archives.len());
        for archive_url in &index.archives {
            let month: MonthlyArchive = self.client.get(archive_url).send().await?.json().await?;
            months.push(month);
        }

        Ok(collect_pgns(&months))
    }
}

/// Concatenate every game's PGN across months, blank-line separated.
fn collect_pgns(months: &[MonthlyArchive]) -> String {
    months
        .iter()
        .flat_map(|month| &month.games)
        .filter_map(|game| game.pgn.as_deref())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Rewrite every listed username in a PGN to the alias,
/// case-insensitively.
pub fn apply_alias(pgn: &str, usernames: &[String], alias: &str) -> String {
    if usernames.is_empty() {
        return pgn.to_string();
    }

    let pattern = usernames
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&format!("({pattern})"))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(pgn, alias).into_owned(),
        Err(_) => pgn.to_string(),
    }
}
