//! Attribution events for the backend ingestion endpoint.
//!
//! Every tracked touch yields one [`IngestionEvent`]. Delivery belongs to the
//! API client; this module only shapes the payload and its idempotency key.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vyom_core::SessionId;

use super::device::Device;
use super::utm::UtmParameters;
use super::{Touch, random_base36};

/// Kind of touch being reported. The edge layer only sees navigations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchType {
    /// A tracked page navigation.
    Click,
}

/// Payload for `POST /api/v1/attribution/events`.
///
/// The `utm_*` keys stay snake_case; the endpoint reads them that way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionEvent {
    /// Kind of touch.
    pub touch_type: TouchType,
    /// Inferred traffic source.
    pub source: String,
    /// Inferred paid/organic split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_source: Option<String>,
    /// Inferred medium, `organic` when nothing else applies.
    pub medium: String,
    /// `utm_campaign`, surfaced as the campaign.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    /// `ad_id` query parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
    /// `creative_id` query parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<String>,
    /// Path of the touched page.
    pub landing_page: String,
    /// `Referer` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    /// Raw `utm_source`.
    #[serde(rename = "utm_source", skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    /// Raw `utm_medium`.
    #[serde(rename = "utm_medium", skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    /// Raw `utm_campaign`.
    #[serde(rename = "utm_campaign", skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    /// Raw `utm_content`.
    #[serde(rename = "utm_content", skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
    /// Raw `utm_term`.
    #[serde(rename = "utm_term", skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    /// Device class.
    pub device: Device,
    /// `User-Agent` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Edge session the touch belongs to.
    pub session_id: SessionId,
    /// When the touch happened.
    pub occurred_at: DateTime<Utc>,
    /// Deduplication key, see [`idempotency_key`].
    pub idempotency_key: String,
}

impl IngestionEvent {
    /// Build the click event for `touch`.
    pub fn click(touch: &Touch, session_id: &SessionId) -> Self {
        let utm = UtmParameters::from_url(&touch.url);
        let inference = utm.infer_source();
        let query = |name: &str| {
            touch
                .url
                .query_pairs()
                .find(|(k, v)| k == name && !v.is_empty())
                .map(|(_, v)| v.into_owned())
        };

        Self {
            touch_type: TouchType::Click,
            source: inference.source,
            sub_source: inference.sub_source,
            medium: inference.medium.unwrap_or_else(|| "organic".to_string()),
            campaign: utm.campaign.clone(),
            ad_id: query("ad_id"),
            creative_id: query("creative_id"),
            landing_page: touch.url.path().to_string(),
            referrer: touch.referrer.clone(),
            idempotency_key: idempotency_key(
                session_id,
                touch.at,
                utm.source.as_deref().unwrap_or("direct"),
            ),
            utm_source: utm.source,
            utm_medium: utm.medium,
            utm_campaign: utm.campaign,
            utm_content: utm.content,
            utm_term: utm.term,
            device: touch.device(),
            user_agent: touch.user_agent.clone(),
            session_id: session_id.clone(),
            occurred_at: touch.at,
        }
    }
}

/// `<sessionId>_<epoch millis>_<source>_<9 random base36 chars>`.
///
/// The random suffix keeps two touches in the same millisecond distinct.
pub fn idempotency_key(session_id: &SessionId, at: DateTime<Utc>, source: &str) -> String {
    format!(
        "{session_id}_{}_{source}_{}",
        at.timestamp_millis(),
        random_base36(9)
    )
}
