//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`VyomSettings::default()`]
//! 2. If `~/.vyom/settings.json` exists, deep-merge user values over defaults
//! 3. Apply `VYOM_*` environment variable overrides (highest priority)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::VyomSettings;

/// Directory holding Vyom's local files (`~/.vyom`).
pub fn vyom_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".vyom")
}

/// Resolve the path to the settings file (`~/.vyom/settings.json`).
pub fn settings_path() -> PathBuf {
    vyom_dir().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<VyomSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults; a file with invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<VyomSettings> {
    let defaults = serde_json::to_value(VyomSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: VyomSettings = serde_json::from_value(merged)?;
    apply_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides read through `lookup` (normally the process environment).
///
/// Empty values are ignored. Out-of-range numbers are ignored with a warning.
pub fn apply_overrides(settings: &mut VyomSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Attribution ─────────────────────────────────────────────────
    if let Some(v) = read("VYOM_ATTRIBUTION_COOKIE") {
        settings.attribution.cookie_name = v;
    }
    if let Some(v) = read("VYOM_SESSION_COOKIE") {
        settings.attribution.session_cookie_name = v;
    }
    if let Some(v) = read("VYOM_ATTRIBUTION_MAX_AGE_DAYS") {
        match parse_u32_range(&v, 1, 3650) {
            Some(days) => settings.attribution.max_age_days = days,
            None => {
                tracing::warn!(key = "VYOM_ATTRIBUTION_MAX_AGE_DAYS", value = %v, "invalid u32 env var, ignoring");
            }
        }
    }

    // ── Session ─────────────────────────────────────────────────────
    if let Some(v) = read("VYOM_TOKEN_KEY") {
        settings.session.token_key = v;
    }
    if let Some(v) = read("VYOM_STORAGE_PATH") {
        settings.session.storage_path = Some(v);
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read("VYOM_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

/// Parse a string as a `u32` within an inclusive range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (min..=max).contains(&n).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
