//! # vyom-settings
//!
//! Configuration for the attribution and session stores.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`VyomSettings::default()`]
//! 2. **User file**: `~/.vyom/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `VYOM_*` overrides (highest priority)
//!
//! There is no process-wide settings instance: the host loads a
//! [`VyomSettings`] once and hands the relevant section to each store.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{AttributionSettings, LoggingSettings, SessionSettings, VyomSettings};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
