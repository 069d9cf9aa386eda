//! Domain-level error taxonomy shared across crates.
//!
//! Outward-facing errors always carry a stable machine-readable kind plus a
//! human-readable message; the HTTP layer in `sprout-api` maps these onto
//! status codes and JSON bodies. Internal detail (stack traces, SQL) never
//! crosses this boundary.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist. `key` is the lookup value as the
    /// caller supplied it (an id, username, or token).
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with any displayable key.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_includes_entity_and_key() {
        let err = CoreError::not_found("user", "a@b.com");
        assert_eq!(err.to_string(), "user not found: a@b.com");
    }

    #[test]
    fn conflict_display() {
        let err = CoreError::Conflict("username already in use".into());
        assert_eq!(err.to_string(), "Conflict: username already in use");
    }
}
