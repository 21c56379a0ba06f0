//! SteamGridDB public API client for game artwork metadata.
//!
//! Provides an async client for the unauthenticated
//! [SteamGridDB](https://www.steamgriddb.com) game endpoint — the route the
//! site's own frontend uses — keyed by a game's SteamGridDB id.

pub mod client;
pub mod types;

pub use client::{Client, DEFAULT_BASE_URL, Error};
pub use types::{AssetInfo, AssetSlot, AssetTotals, GameAssets, GameEntry, GameResponse};
