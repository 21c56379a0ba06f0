//! Repository seam for the mod directory.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use crate::error::ModsError;
use crate::types::Mod;

/// Abstract access to the mod directory.
///
/// Same boxed-future shape as the games repository, but returning
/// `ModsError`. Counting stays synchronous: the UI polls it per row and the
/// seed set needs no round trip.
pub trait ModRepository: Send + Sync {
    /// Returns all mods with the given `game_id`, in seed order.
    fn list_for_game(
        &self,
        game_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Mod>, ModsError>> + Send + '_>>;

    /// Counts the mods with the given `game_id`.
    fn count_for_game(&self, game_id: u32) -> usize;
}

/// Seeded in-memory mod directory with simulated round-trip latency.
pub struct InMemoryModRepository {
    mods: Vec<Mod>,
    latency: Duration,
}

impl InMemoryModRepository {
    /// Creates a seeded repository with no artificial delay.
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Creates a seeded repository that sleeps for `latency` before
    /// answering list queries.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            mods: seed_mods(),
            latency,
        }
    }
}

impl Default for InMemoryModRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ModRepository for InMemoryModRepository {
    fn list_for_game(
        &self,
        game_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Mod>, ModsError>> + Send + '_>> {
        Box::pin(async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            debug!(game_id, "listing mods for game");
            Ok(self
                .mods
                .iter()
                .filter(|m| m.game_id == game_id)
                .cloned()
                .collect())
        })
    }

    fn count_for_game(&self, game_id: u32) -> usize {
        self.mods.iter().filter(|m| m.game_id == game_id).count()
    }
}

/// The seed mod set: 100 mods for game 1, deterministically generated.
pub fn seed_mods() -> Vec<Mod> {
    (1..=100)
        .map(|i| Mod {
            id: i,
            game_id: 1,
            name: format!("Mod {i:03}"),
            description: format!("Seeded description for mod {i:03}"),
        })
        .collect()
}
