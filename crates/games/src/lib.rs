//! Game catalog store: domain type, repository seam, observable state.
//!
//! This crate implements the **data-access core** for the game library
//! screens. It is a library crate with no UI dependencies — views read
//! state snapshots from [`GamesStore`], invoke its async operations, and
//! subscribe to the events it republishes. The backend is abstracted behind
//! the [`GameRepository`] trait; the bundled in-memory implementation owns
//! the seed catalog and the simulated network latency, so neither leaks
//! into store logic.

pub mod assets;
pub mod error;
pub mod repository;
pub mod store;
pub mod types;

// Re-export primary types for convenience.
pub use error::GamesError;
pub use repository::{GameRepository, InMemoryGameRepository};
pub use store::{GamesEvent, GamesState, GamesStore, RECENT_GAMES_COUNT};
pub use types::{ExternalIds, Game};
