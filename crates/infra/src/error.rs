use thiserror::Error;

/// Failure of an external collaborator (catalog or order store).
///
/// These are infrastructure errors, as opposed to domain errors (validation,
/// state transitions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage could not be reached or is in a broken state.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be read or decoded.
    #[error("invalid stored data: {0}")]
    Data(String),
}

pub(crate) fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}
