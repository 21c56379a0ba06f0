//! Error types for game catalog operations.

/// Errors produced by game catalog repositories.
#[derive(Debug, thiserror::Error)]
pub enum GamesError {
    #[error("game {0} not found")]
    NotFound(u32),

    #[error("no game matches slug '{0}'")]
    UnknownSlug(String),

    #[error("repository error: {0}")]
    Repository(String),
}
