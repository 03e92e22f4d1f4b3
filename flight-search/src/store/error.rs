//! Store error types.

/// Errors from a schedule store.
///
/// Every variant is an infrastructure failure. "Nothing matched" is never
/// an error: lookups return `Ok(None)` or an empty list instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure in the database driver
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "store unavailable: connection refused");

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("database error:"));
    }
}
