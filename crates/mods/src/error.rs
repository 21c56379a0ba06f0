//! Error types for mod directory operations.

/// Errors produced by mod repositories.
///
/// Same shape as the games crate's error, kept separate so a future backend
/// can grow mod-specific variants independently.
#[derive(Debug, thiserror::Error)]
pub enum ModsError {
    #[error("repository error: {0}")]
    Repository(String),
}
