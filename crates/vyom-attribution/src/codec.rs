//! Cookie value codec: URL-encoded compact JSON.

use crate::errors::AttributionError;
use crate::record::AttributionRecord;

/// Decode a raw cookie value into a validated record.
///
/// The value is percent-decoded (`+` stays a literal plus, as with
/// `decodeURIComponent`), parsed as JSON of the record shape, and checked
/// with [`AttributionRecord::validate`].
pub fn decode_cookie_value(raw: &str) -> Result<AttributionRecord, AttributionError> {
    let decoded = urlencoding::decode(raw)?;
    let record: AttributionRecord = serde_json::from_str(&decoded)?;
    record.validate()?;
    Ok(record)
}

/// Encode a record as a cookie value.
pub fn encode_cookie_value(record: &AttributionRecord) -> Result<String, AttributionError> {
    let json = serde_json::to_string(record)?;
    Ok(urlencoding::encode(&json).into_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use vyom_core::SessionId;

    const MINIMAL: &str = "%7B%22sessionId%22%3A%22s1%22%2C%22touchCount%22%3A2%7D";

    #[test]
    fn decodes_minimal_record() {
        let record = decode_cookie_value(MINIMAL).unwrap();
        assert_eq!(record.session_id.as_str(), "s1");
        assert_eq!(record.touch_count, 2);
        assert!(record.first_touch_at.is_none());
        assert!(record.utm_source.is_none());
        assert!(record.referrer.is_none());
        assert!(record.last_visit_at.is_none());
    }

    #[test]
    fn decoding_twice_is_structurally_equal() {
        assert_eq!(
            decode_cookie_value(MINIMAL).unwrap(),
            decode_cookie_value(MINIMAL).unwrap()
        );
    }

    #[test]
    fn unencoded_json_is_accepted() {
        let record = decode_cookie_value(r#"{"sessionId":"s1","touchCount":1}"#).unwrap();
        assert_eq!(record.touch_count, 1);
    }

    #[test]
    fn not_json_is_json_error() {
        assert_matches!(decode_cookie_value("not-json"), Err(AttributionError::Json(_)));
    }

    #[test]
    fn wrong_shape_is_json_error() {
        assert_matches!(
            decode_cookie_value("%5B1%2C2%5D"),
            Err(AttributionError::Json(_))
        );
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        assert_matches!(decode_cookie_value("%FF%FE"), Err(AttributionError::Encoding(_)));
    }

    #[test]
    fn zero_touches_rejected_after_parse() {
        assert_matches!(
            decode_cookie_value(r#"{"sessionId":"s1","touchCount":0}"#),
            Err(AttributionError::InvalidTouchCount)
        );
    }

    #[test]
    fn encoded_value_is_cookie_safe() {
        let mut record = AttributionRecord::new(SessionId::from("s1"), 3);
        record.utm_campaign = Some("spring sale; 50% off".to_string());
        record.first_touch_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());

        let value = encode_cookie_value(&record).unwrap();
        assert!(!value.contains(';'));
        assert!(!value.contains(' '));
        assert!(!value.contains('"'));
        assert_eq!(decode_cookie_value(&value).unwrap(), record);
    }

    #[test]
    fn encodes_minimal_record_like_the_edge_layer() {
        let record = AttributionRecord::new(SessionId::from("s1"), 2);
        assert_eq!(encode_cookie_value(&record).unwrap(), MINIMAL);
    }
}
