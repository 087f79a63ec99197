//! The attribution record wire type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vyom_core::SessionId;

use crate::errors::AttributionError;

/// How a visitor arrived, and how often they have come back.
///
/// Field names are camelCase on the wire. Unknown fields are rejected: the
/// writer is a separate deployment and a shape change must fail loudly
/// rather than be half-read. Absent optional fields are omitted when
/// serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttributionRecord {
    /// Browsing session the first touch belonged to.
    pub session_id: SessionId,
    /// When the visitor was first seen. Never overwritten once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_touch_at: Option<DateTime<Utc>>,
    /// `utm_source` of the first touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    /// `utm_medium` of the first touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    /// `utm_campaign` of the first touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    /// `utm_content` of the first touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
    /// `utm_term` of the first touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    /// `Referer` of the first touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Path of the first tracked page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
    /// Device class of the first touch (`mobile`, `tablet`, `desktop`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Number of tracked touches, at least 1.
    pub touch_count: u32,
    /// Path of the most recent touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page_visited: Option<String>,
    /// Time of the most recent touch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit_at: Option<DateTime<Utc>>,
}

impl AttributionRecord {
    /// A record with only the required fields set.
    pub fn new(session_id: SessionId, touch_count: u32) -> Self {
        Self {
            session_id,
            first_touch_at: None,
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            utm_content: None,
            utm_term: None,
            referrer: None,
            landing_page: None,
            device: None,
            touch_count,
            last_page_visited: None,
            last_visit_at: None,
        }
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), AttributionError> {
        if self.session_id.as_str().is_empty() {
            return Err(AttributionError::EmptySessionId);
        }
        if self.touch_count == 0 {
            return Err(AttributionError::InvalidTouchCount);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
