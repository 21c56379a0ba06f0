//! Domain types for the game catalog.

use serde::{Deserialize, Serialize};

use crate::assets;

/// A game in the library catalog.
///
/// `id` and `slug` are both unique within the catalog (assumed, not
/// enforced). The slug drives derived asset paths — see [`Game::icon_path`]
/// and [`Game::capsule_path`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u32,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "ExternalIds::is_empty")]
    pub external_ids: ExternalIds,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub game_path: String,
}

impl Game {
    /// Derived icon image path, computed from the slug. Never stored.
    pub fn icon_path(&self) -> String {
        assets::icon_path(&self.slug)
    }

    /// Derived capsule image path, computed from the slug. Never stored.
    pub fn capsule_path(&self) -> String {
        assets::capsule_path(&self.slug)
    }
}

/// Identifiers for a game in third-party catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIds {
    /// SteamGridDB game id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub grid_db: String,
    /// Steam app id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub steam: String,
}

impl ExternalIds {
    /// True when no external catalog id is set.
    pub fn is_empty(&self) -> bool {
        self.grid_db.is_empty() && self.steam.is_empty()
    }
}
