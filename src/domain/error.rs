//! Domain errors

use thiserror::Error;

/// Domain-level error taxonomy.
///
/// Every failure the core can produce is one of these kinds; the API layer
/// maps them onto HTTP status codes without inspecting messages.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record exists but is in a state that forbids the operation
    /// (inactive item, non-bookable item, already-cancelled booking).
    #[error("{0}")]
    InvalidState(String),

    /// Domain-level validation failure (bad pricing configuration,
    /// invalid time slot, missing strategy input).
    #[error("{0}")]
    Validation(String),

    /// Slot already booked — raised by the advisory pre-check or by the
    /// storage unique index, indistinguishably.
    #[error("{0}")]
    Conflict(String),

    /// Storage/database error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
