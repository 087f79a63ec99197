//! Edge-layer touch recording.
//!
//! Runs once per navigation, before the page is served: decides whether the
//! request is tracked, folds the touch into the visitor's existing record,
//! and returns the `Set-Cookie` values plus the event for the ingestion
//! endpoint. First-touch fields are written once; only the touch count and
//! the last-visit fields move on later touches.

pub mod device;
pub mod ingest;
pub mod utm;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;
use url::Url;
use vyom_core::{CookieSource, SessionId};
use vyom_settings::AttributionSettings;

use crate::codec::{decode_cookie_value, encode_cookie_value};
use crate::errors::AttributionError;
use crate::record::AttributionRecord;

pub use device::Device;
pub use ingest::{IngestionEvent, TouchType, idempotency_key};
pub use utm::{SourceInference, UtmParameters};

const STATIC_EXTENSIONS: [&str; 7] = ["ico", "png", "svg", "jpg", "jpeg", "gif", "webp"];
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One incoming navigation.
#[derive(Clone, Debug)]
pub struct Touch {
    /// Full request URL.
    pub url: Url,
    /// `Referer` header, if sent.
    pub referrer: Option<String>,
    /// `User-Agent` header, if sent.
    pub user_agent: Option<String>,
    /// Request time.
    pub at: DateTime<Utc>,
}

impl Touch {
    /// A touch with no headers.
    pub fn new(url: Url, at: DateTime<Utc>) -> Self {
        Self {
            url,
            referrer: None,
            user_agent: None,
            at,
        }
    }

    /// Set the `Referer` header. Empty values count as absent.
    #[must_use]
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into()).filter(|r| !r.is_empty());
        self
    }

    /// Set the `User-Agent` header. Empty values count as absent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into()).filter(|ua| !ua.is_empty());
        self
    }

    /// Device class of the requesting browser.
    pub fn device(&self) -> Device {
        Device::detect(self.user_agent.as_deref().unwrap_or_default())
    }
}

/// Whether a request path should be recorded as a touch.
///
/// Paths under any of `skip_prefixes` and static assets are skipped.
pub fn should_track(path: &str, skip_prefixes: &[String]) -> bool {
    if skip_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
        return false;
    }
    let is_static = path
        .rsplit_once('.')
        .is_some_and(|(_, ext)| STATIC_EXTENSIONS.contains(&ext));
    !is_static
}

/// Fold `touch` into the visitor's record.
///
/// Without a previous record this is the first touch: every first-touch
/// field comes from `touch` and the count starts at 1. Otherwise the
/// previous record is kept as-is except for the count (incremented,
/// saturating) and the last-visit fields.
pub fn record_touch(
    previous: Option<&AttributionRecord>,
    session_id: &SessionId,
    touch: &Touch,
) -> AttributionRecord {
    let path = touch.url.path().to_string();

    if let Some(previous) = previous {
        let mut next = previous.clone();
        next.touch_count = previous.touch_count.saturating_add(1);
        next.last_page_visited = Some(path);
        next.last_visit_at = Some(touch.at);
        return next;
    }

    let utm = UtmParameters::from_url(&touch.url);
    AttributionRecord {
        session_id: session_id.clone(),
        first_touch_at: Some(touch.at),
        utm_source: utm.source,
        utm_medium: utm.medium,
        utm_campaign: utm.campaign,
        utm_content: utm.content,
        utm_term: utm.term,
        referrer: touch.referrer.clone(),
        landing_page: Some(path.clone()),
        device: Some(touch.device().to_string()),
        touch_count: 1,
        last_page_visited: Some(path),
        last_visit_at: Some(touch.at),
    }
}

/// `session_<epoch millis>_<9 random base36 chars>`.
pub fn generate_session_id(at: DateTime<Utc>) -> SessionId {
    SessionId::from(format!("session_{}_{}", at.timestamp_millis(), random_base36(9)))
}

/// A `Set-Cookie` value readable by client scripts (no `HttpOnly`).
pub fn set_cookie_header(name: &str, value: &str, max_age_secs: u64, secure: bool) -> String {
    let mut header = format!("{name}={value}; Max-Age={max_age_secs}; Path=/; SameSite=Lax");
    if secure {
        header.push_str("; Secure");
    }
    header
}

pub(crate) fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}

/// Everything the edge layer emits for one tracked touch.
#[derive(Clone, Debug)]
pub struct TouchOutcome {
    /// The record now stored in the attribution cookie.
    pub record: AttributionRecord,
    /// Session the touch was attributed to. Always `record.session_id`.
    pub session_id: SessionId,
    /// Whether `session_id` was minted for this request.
    pub new_session: bool,
    /// `Set-Cookie` header values to attach to the response.
    pub set_cookies: Vec<String>,
    /// Event for the ingestion endpoint.
    pub event: IngestionEvent,
}

/// Records touches according to [`AttributionSettings`].
#[derive(Clone, Debug)]
pub struct EdgeRecorder {
    settings: AttributionSettings,
    secure: bool,
}

impl EdgeRecorder {
    /// A recorder writing non-`Secure` cookies.
    pub fn new(settings: AttributionSettings) -> Self {
        Self {
            settings,
            secure: false,
        }
    }

    /// Mark written cookies `Secure` (production).
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Record `touch` against the request's `cookies`.
    ///
    /// Returns `Ok(None)` for untracked paths. An unreadable previous record
    /// is logged and replaced by a fresh first touch.
    ///
    /// The session comes from the previous record when there is one, else
    /// from the session cookie, else it is minted. The session cookie is
    /// (re)written whenever it is missing or disagrees with that choice.
    pub fn record(
        &self,
        cookies: &impl CookieSource,
        touch: &Touch,
    ) -> Result<Option<TouchOutcome>, AttributionError> {
        if !should_track(touch.url.path(), &self.settings.skip_prefixes) {
            return Ok(None);
        }

        let previous = cookies
            .cookie(&self.settings.cookie_name)
            .and_then(|raw| match decode_cookie_value(&raw) {
                Ok(record) => Some(record),
                Err(error) => {
                    debug!(%error, "previous attribution cookie unreadable, starting a new record");
                    None
                }
            });
        let session_cookie = cookies
            .cookie(&self.settings.session_cookie_name)
            .filter(|s| !s.is_empty());

        // A surviving record owns the session; the cookie only fills in for it.
        let (session_id, new_session) = match (&previous, &session_cookie) {
            (Some(record), _) => (record.session_id.clone(), false),
            (None, Some(existing)) => (SessionId::from(existing.as_str()), false),
            (None, None) => (generate_session_id(touch.at), true),
        };

        let record = record_touch(previous.as_ref(), &session_id, touch);
        let value = encode_cookie_value(&record)?;

        let mut set_cookies = vec![set_cookie_header(
            &self.settings.cookie_name,
            &value,
            self.settings.max_age_secs(),
            self.secure,
        )];
        if session_cookie.as_deref() != Some(session_id.as_str()) {
            set_cookies.push(set_cookie_header(
                &self.settings.session_cookie_name,
                session_id.as_str(),
                self.settings.session_max_age_secs(),
                self.secure,
            ));
        }

        debug!(
            session_id = %session_id,
            touch_count = record.touch_count,
            path = touch.url.path(),
            "recorded attribution touch"
        );

        Ok(Some(TouchOutcome {
            event: IngestionEvent::click(touch, &session_id),
            record,
            session_id,
            new_session,
            set_cookies,
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
