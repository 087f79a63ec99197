//! Attribution error types.

/// Why an attribution cookie value was rejected.
#[derive(Debug, thiserror::Error)]
pub enum AttributionError {
    /// Percent-decoding produced bytes that are not UTF-8.
    #[error("cookie value is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The decoded text is not JSON of the record shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `touchCount` was zero.
    #[error("touch count must be at least 1")]
    InvalidTouchCount,

    /// `sessionId` was empty.
    #[error("session id is empty")]
    EmptySessionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_touch_count_display() {
        assert_eq!(
            AttributionError::InvalidTouchCount.to_string(),
            "touch count must be at least 1"
        );
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let err = AttributionError::from(json_err);
        assert!(err.to_string().starts_with("JSON error"));
    }
}
