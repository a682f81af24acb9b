use thiserror::Error;

/// Error types for the ledger engine.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A recoverable, user-correctable input rejection. Surfaced to the
    /// caller with the offending field and a reason; never treated as a
    /// failure of the engine itself.
    #[error("Validation error on '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// A stored record violates one of its own invariants, e.g. a service
    /// bill whose total does not match its components.
    #[error("Inconsistent record: {0}")]
    Inconsistent(String),
}

impl LedgerError {
    /// Shorthand for a validation rejection.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
