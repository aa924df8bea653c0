//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by [`TodoStore`](super::TodoStore) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given id exists
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// Seeding was attempted on a store that already holds records
    #[error("The store is already populated ({count} todos)")]
    AlreadyPopulated { count: usize },

    /// Seeding finished with an unexpected record count
    #[error("Populating the store failed: expected {expected} todos, found {actual}")]
    PopulationFailed { expected: usize, actual: usize },
}

impl StoreError {
    /// Whether this error refers to a missing record
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
