/// Domain-level error type shared by every layer above the store.
///
/// The API crate maps each variant onto an HTTP status; the variants
/// themselves stay transport-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist or is out of the caller's scope.
    /// `key` is the offending id or name, so the message pinpoints it.
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// Malformed input: blank title, mismatched reorder set, bad scope pair.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A concurrent mutation invalidated an expected precondition.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No valid caller identity was presented.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller's effective access level is below what the operation needs.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure. Details are logged, not exposed.
    #[error("internal error: {0}")]
    Internal(String),
}
