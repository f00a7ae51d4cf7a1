use thiserror::Error;

use super::RepositoryError;

#[derive(Debug, Error)]
pub enum AllocatorError {
    /// The retry bound was exhausted without winning a code. Signals either
    /// a saturated keyspace or a misconfigured alphabet/length.
    #[error("Short code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    /// Storage failures unrelated to code uniqueness pass through unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
