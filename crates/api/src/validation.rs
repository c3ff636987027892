//! Custom validator functions shared by request DTOs.

use validator::ValidationError;

/// Reject strings that are empty after trimming. Used for project and board
/// titles, which must be non-empty in the domain model.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank"));
    }
    Ok(())
}
