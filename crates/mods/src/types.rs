//! Domain types for the mod directory.

use serde::{Deserialize, Serialize};

/// A mod belonging to a game.
///
/// `game_id` is a foreign reference to a game's numeric id; referential
/// integrity is not enforced at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mod {
    pub id: u32,
    pub game_id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A pagination window over a filtered mod sequence.
///
/// Both bounds are required to paginate; operations taking `Option<Page>`
/// return the full filtered sequence when it is absent. Out-of-range windows
/// yield short or empty results, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_json_roundtrip() {
        let m = Mod {
            id: 7,
            game_id: 1,
            name: "Mod 007".into(),
            description: "A seeded mod.".into(),
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"gameId\":1"));
        let parsed: Mod = serde_json::from_str(&json).unwrap();
        assert_eq!(m, parsed);
    }

    #[test]
    fn mod_omit_empty_description() {
        let m = Mod {
            id: 1,
            game_id: 1,
            name: "Mod 001".into(),
            description: String::new(),
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("description"));
    }
}
