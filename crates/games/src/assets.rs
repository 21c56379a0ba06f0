//! Derived asset path resolution.
//!
//! Asset paths are pure functions of a game's slug and are never stored
//! alongside the game.

/// Path of the icon image for a game slug.
pub fn icon_path(slug: &str) -> String {
    format!("/images/{slug}/icon.jpg")
}

/// Path of the capsule (cover) image for a game slug.
pub fn capsule_path(slug: &str) -> String {
    format!("/images/{slug}/capsule.jpg")
}
