use thiserror::Error;

/// Errors surfaced by the persistence boundary.
///
/// Domain mutations themselves do not raise: operations on unknown ids
/// are silent no-ops and guarded deletions report through boolean
/// returns, so only storage and serialization can actually fail.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
