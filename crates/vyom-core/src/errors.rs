//! Storage error types.

/// Errors raised by a [`DurableStorage`](crate::storage::DurableStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or otherwise not reachable.
    #[error("durable storage unavailable: {0}")]
    Unavailable(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file did not hold a string map.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_display() {
        let err = StorageError::Unavailable("storage disabled".to_string());
        assert_eq!(
            err.to_string(),
            "durable storage unavailable: storage disabled"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::from(io_err);
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
