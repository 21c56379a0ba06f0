//! Client for the SteamGridDB public game endpoint.
//!
//! The public route needs no API key; the site expects a `Referer` header
//! pointing back at the game's own page. Responses wrap the payload in a
//! `{ "success": …, "data": … }` envelope.

use tracing::debug;

use crate::types::{GameAssets, GameResponse};

/// Production base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com";

/// Errors from SteamGridDB requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("failed to fetch game images")]
    Api,

    #[error("game has no SteamGridDB id")]
    MissingId,
}

/// Async client for the public game endpoint.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client against the production site.
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (tests, mirrors).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Fetches artwork metadata for a game by its SteamGridDB id.
    ///
    /// An unsuccessful envelope (`success == false` or missing `data`) maps
    /// to [`Error::Api`]; transport failures and non-2xx statuses map to
    /// [`Error::Http`].
    pub async fn fetch_game(&self, grid_db_id: &str) -> Result<GameAssets, Error> {
        if grid_db_id.is_empty() {
            return Err(Error::MissingId);
        }

        let url = game_url(&self.base_url, grid_db_id);
        debug!(%url, "fetching SteamGridDB game assets");

        let response = self
            .http
            .get(&url)
            .header(
                reqwest::header::REFERER,
                referer_url(&self.base_url, grid_db_id),
            )
            .send()
            .await
            .map_err(|e| Error::Http(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!(
                "{url} returned status {}",
                response.status()
            )));
        }

        let envelope: GameResponse = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("failed to read response from {url}: {e}")))?;

        unwrap_envelope(envelope)
    }
}

/// URL of the public game endpoint for an id.
fn game_url(base: &str, grid_db_id: &str) -> String {
    format!("{base}/api/public/game/{grid_db_id}")
}

/// Referer the site expects alongside public API calls.
fn referer_url(base: &str, grid_db_id: &str) -> String {
    format!("{base}/game/{grid_db_id}/icons")
}

/// Rejects unsuccessful or empty envelopes.
fn unwrap_envelope(envelope: GameResponse) -> Result<GameAssets, Error> {
    match envelope {
        GameResponse {
            success: true,
            data: Some(data),
        } => Ok(data),
        _ => Err(Error::Api),
    }
}
