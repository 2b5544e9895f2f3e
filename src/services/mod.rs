// src/services/mod.rs

//! Services for scraping, summarizing, and talking to upstream APIs.

pub mod chess;
pub mod directory;
pub mod machines;
pub mod spotify;
pub mod status;
pub mod token;

pub use chess::ChessClient;
pub use directory::DirectoryScraper;
pub use machines::MachineScraper;
pub use spotify::SpotifyClient;
pub use token::{SpotifySecrets, TokenStore};
