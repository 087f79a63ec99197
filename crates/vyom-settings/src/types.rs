//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a settings
//! file may name only the fields it overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vyom_core::constants::{ATTRIBUTION_COOKIE_NAME, SESSION_COOKIE_NAME, TOKEN_STORAGE_KEY};

/// Root settings type.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VyomSettings {
    /// Attribution cookie names and edge-layer behavior.
    pub attribution: AttributionSettings,
    /// Session store persistence.
    pub session: SessionSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Attribution cookie settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributionSettings {
    /// Name of the cookie carrying the attribution record.
    pub cookie_name: String,
    /// Name of the cookie carrying the edge session id.
    pub session_cookie_name: String,
    /// Lifetime of the attribution cookie, in days.
    pub max_age_days: u32,
    /// Lifetime of the session cookie, in days.
    pub session_max_age_days: u32,
    /// Request path prefixes the edge layer never records a touch for.
    pub skip_prefixes: Vec<String>,
}

impl Default for AttributionSettings {
    fn default() -> Self {
        Self {
            cookie_name: ATTRIBUTION_COOKIE_NAME.to_string(),
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
            max_age_days: 90,
            session_max_age_days: 180,
            skip_prefixes: vec!["/api".to_string(), "/_next".to_string()],
        }
    }
}

impl AttributionSettings {
    /// Attribution cookie lifetime in seconds (`Max-Age`).
    pub fn max_age_secs(&self) -> u64 {
        u64::from(self.max_age_days) * 24 * 60 * 60
    }

    /// Session cookie lifetime in seconds (`Max-Age`).
    pub fn session_max_age_secs(&self) -> u64 {
        u64::from(self.session_max_age_days) * 24 * 60 * 60
    }
}

/// Session store settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSettings {
    /// Durable storage key holding the bearer token.
    pub token_key: String,
    /// File backing durable storage. `None` resolves to `~/.vyom/storage.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_key: TOKEN_STORAGE_KEY.to_string(),
            storage_path: None,
        }
    }
}

impl SessionSettings {
    /// Resolved path of the durable storage file.
    pub fn resolved_storage_path(&self) -> PathBuf {
        match &self.storage_path {
            Some(p) => PathBuf::from(p),
            None => crate::loader::vyom_dir().join("storage.json"),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
