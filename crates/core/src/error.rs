//! Domain-level error type shared by the DB and API layers.

/// Domain errors produced by core validation and lookups.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup came up empty.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Human-readable entity name (e.g. `"Review"`).
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// Input failed a validation rule. The message is user-facing and
    /// actionable.
    #[error("{0}")]
    Validation(String),

    /// A write conflicts with existing state (e.g. duplicate slug).
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// An internal invariant was violated. Not user-facing.
    #[error("{0}")]
    Internal(String),
}
