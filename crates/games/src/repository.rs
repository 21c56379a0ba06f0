//! Repository seam for the game catalog.
//!
//! Stores depend only on the [`GameRepository`] trait. The bundled
//! [`InMemoryGameRepository`] stands in for a future backend: it owns the
//! seed catalog and an optional artificial delay simulating a network
//! round trip. Store logic never sees either.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::GamesError;
use crate::types::{ExternalIds, Game};

/// Abstract access to the game catalog.
///
/// A real implementation would call a backend service; the in-memory one
/// serves seed data. Same boxed-future shape as the mods repository, but
/// returning `GamesError`.
pub trait GameRepository: Send + Sync {
    /// Returns the full catalog in stable order.
    fn list(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>>;

    /// Appends a game unconditionally. Duplicates are allowed.
    fn add(&self, game: Game)
    -> Pin<Box<dyn Future<Output = Result<(), GamesError>> + Send + '_>>;

    /// Looks up a game by numeric id.
    fn find_by_id(
        &self,
        id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Game, GamesError>> + Send + '_>>;

    /// Looks up a game by slug.
    fn find_by_slug(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Game, GamesError>> + Send + '_>>;

    /// Case-insensitive substring search on game names.
    fn search(
        &self,
        query: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>>;

    /// Returns the games currently detected as installed.
    fn installed(&self)
    -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>>;
}

/// Seeded in-memory game catalog with simulated round-trip latency.
pub struct InMemoryGameRepository {
    games: RwLock<Vec<Game>>,
    latency: Duration,
}

impl InMemoryGameRepository {
    /// Creates a seeded repository with no artificial delay.
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Creates a seeded repository that sleeps for `latency` before
    /// answering, simulating a backend round trip.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            games: RwLock::new(seed_catalog()),
            latency,
        }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRepository for InMemoryGameRepository {
    fn list(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>> {
        Box::pin(async move {
            self.round_trip().await;
            Ok(self.games.read().await.clone())
        })
    }

    fn add(
        &self,
        game: Game,
    ) -> Pin<Box<dyn Future<Output = Result<(), GamesError>> + Send + '_>> {
        Box::pin(async move {
            self.round_trip().await;
            debug!(id = game.id, slug = %game.slug, "adding game to catalog");
            self.games.write().await.push(game);
            Ok(())
        })
    }

    fn find_by_id(
        &self,
        id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Game, GamesError>> + Send + '_>> {
        Box::pin(async move {
            self.round_trip().await;
            self.games
                .read()
                .await
                .iter()
                .find(|g| g.id == id)
                .cloned()
                .ok_or(GamesError::NotFound(id))
        })
    }

    fn find_by_slug(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Game, GamesError>> + Send + '_>> {
        let slug = slug.to_owned();
        Box::pin(async move {
            self.round_trip().await;
            self.games
                .read()
                .await
                .iter()
                .find(|g| g.slug == slug)
                .cloned()
                .ok_or(GamesError::UnknownSlug(slug))
        })
    }

    fn search(
        &self,
        query: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>> {
        let needle = query.to_lowercase();
        Box::pin(async move {
            self.round_trip().await;
            Ok(self
                .games
                .read()
                .await
                .iter()
                .filter(|g| g.name.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        })
    }

    fn installed(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Game>, GamesError>> + Send + '_>> {
        Box::pin(async move {
            self.round_trip().await;
            // Even ids stand in for real install detection.
            Ok(self
                .games
                .read()
                .await
                .iter()
                .filter(|g| g.id % 2 == 0)
                .cloned()
                .collect())
        })
    }
}

fn seed_game(
    id: u32,
    slug: &str,
    name: &str,
    description: &str,
    grid_db: &str,
    steam: &str,
) -> Game {
    Game {
        id,
        slug: slug.into(),
        name: name.into(),
        description: description.into(),
        external_ids: ExternalIds {
            grid_db: grid_db.into(),
            steam: steam.into(),
        },
        game_path: format!("/mnt/games/{slug}"),
    }
}

/// The seed catalog standing in for a future backend's dataset.
pub fn seed_catalog() -> Vec<Game> {
    vec![
        seed_game(
            1,
            "dying-light",
            "Dying Light",
            "An open world first-person survival horror game set in a post-apocalyptic world.",
            "2716",
            "239140",
        ),
        seed_game(
            2,
            "dying-light-2",
            "Dying Light 2",
            "The sequel to Dying Light, featuring a larger world and more complex gameplay mechanics.",
            "5148398",
            "534380",
        ),
        seed_game(
            3,
            "factorio",
            "Factorio",
            "A game about building and managing factories to produce items and automate processes.",
            "10052",
            "427520",
        ),
        seed_game(
            4,
            "satisfactory",
            "Satisfactory",
            "A first-person open-world factory building game with a focus on exploration and automation.",
            "14065",
            "526870",
        ),
        seed_game(
            5,
            "stardew-valley",
            "Stardew Valley",
            "A farming simulation game where players can grow crops, raise animals, and build relationships with villagers.",
            "9569",
            "413150",
        ),
        seed_game(
            6,
            "terraria",
            "Terraria",
            "A 2D sandbox adventure game with crafting, building, and exploration elements.",
            "1226",
            "105600",
        ),
        seed_game(
            7,
            "starbound",
            "Starbound",
            "A procedurally generated space exploration game with crafting and building mechanics.",
            "2048",
            "211820",
        ),
    ]
}
