//! Per-game mod directory: domain type, repository seam, paginated store.
//!
//! Same shape as the game catalog crate: views read [`ModsStore`] snapshots
//! and invoke its async operations; the backend hides behind the
//! [`ModRepository`] trait, with a seeded in-memory implementation standing
//! in for a future service.

pub mod error;
pub mod repository;
pub mod store;
pub mod types;

// Re-export primary types for convenience.
pub use error::ModsError;
pub use repository::{InMemoryModRepository, ModRepository};
pub use store::{ModsEvent, ModsState, ModsStore};
pub use types::{Mod, Page};
