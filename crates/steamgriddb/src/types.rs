//! Typed subset of the public game endpoint payload.
//!
//! The endpoint returns far more than the fields modeled here; unknown
//! fields are tolerated and dropped, and `platforms` is kept as raw JSON
//! since its shape varies per store backend.

use serde::Deserialize;

/// Envelope wrapping every public endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct GameResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<GameAssets>,
}

/// Artwork metadata for a single game.
#[derive(Debug, Clone, Deserialize)]
pub struct GameAssets {
    pub game: GameEntry,
    #[serde(default)]
    pub totals: Option<AssetTotals>,
    #[serde(default)]
    pub header: Option<AssetSlot>,
    #[serde(default)]
    pub logo: Option<AssetSlot>,
    /// Per-store platform metadata, shape varies; kept raw.
    #[serde(default)]
    pub platforms: serde_json::Value,
}

/// The game record inside the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GameEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub release_date: i64,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Counts of available assets per kind.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AssetTotals {
    #[serde(default)]
    pub grids: i32,
    #[serde(default)]
    pub heroes: i32,
    #[serde(default)]
    pub logos: i32,
    #[serde(default)]
    pub icons: i32,
}

/// A selected asset slot (header, logo, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSlot {
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub asset: Option<AssetInfo>,
}

/// A single asset entry.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}
