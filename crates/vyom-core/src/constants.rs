//! Package-level constants and wire names.

/// Current version of the Vyom state layer (sourced from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = "vyom";

/// Cookie written by the edge layer with the visitor's attribution record.
pub const ATTRIBUTION_COOKIE_NAME: &str = "vyom_attribution";

/// Cookie holding the edge layer's browsing session identifier.
pub const SESSION_COOKIE_NAME: &str = "vyom_session";

/// Durable storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "auth_token";
