//! Client-side attribution capture.
//!
//! A consuming view calls [`AttributionReader::mount`] once when it mounts
//! and keeps the returned [`AttributionSnapshot`] for its lifetime. The
//! snapshot never changes; a later mount reads the cookie again and so sees
//! whatever the edge layer wrote in between.

use tracing::debug;
use vyom_core::CookieSource;
use vyom_core::constants::ATTRIBUTION_COOKIE_NAME;

use crate::codec::decode_cookie_value;
use crate::record::AttributionRecord;

/// Read-only observer of the attribution cookie.
#[derive(Clone, Debug)]
pub struct AttributionReader<C> {
    cookies: C,
    cookie_name: String,
}

impl<C: CookieSource> AttributionReader<C> {
    /// Reader for the default `vyom_attribution` cookie.
    pub fn new(cookies: C) -> Self {
        Self::with_cookie_name(cookies, ATTRIBUTION_COOKIE_NAME)
    }

    /// Reader for a custom cookie name.
    pub fn with_cookie_name(cookies: C, cookie_name: impl Into<String>) -> Self {
        Self {
            cookies,
            cookie_name: cookie_name.into(),
        }
    }

    /// Name of the cookie this reader looks up.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Read and decode the cookie.
    ///
    /// Returns `None` when the cookie is absent or cannot be decoded; the two
    /// cases are deliberately indistinguishable here. Decode failures are
    /// logged at debug level. Never panics and never writes the cookie.
    pub fn read_attribution(&self) -> Option<AttributionRecord> {
        let raw = self.cookies.cookie(&self.cookie_name)?;
        match decode_cookie_value(&raw) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(cookie = %self.cookie_name, %error, "discarding malformed attribution cookie");
                None
            }
        }
    }

    /// Capture the record for one mounted view.
    pub fn mount(&self) -> AttributionSnapshot {
        AttributionSnapshot {
            record: self.read_attribution(),
        }
    }
}

/// The attribution record captured at mount time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributionSnapshot {
    record: Option<AttributionRecord>,
}

impl AttributionSnapshot {
    /// The captured record, if there was a usable cookie.
    pub fn record(&self) -> Option<&AttributionRecord> {
        self.record.as_ref()
    }

    /// Whether attribution data was captured.
    pub fn is_present(&self) -> bool {
        self.record.is_some()
    }

    /// Take ownership of the captured record.
    pub fn into_record(self) -> Option<AttributionRecord> {
        self.record
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
