//! # vyom-core
//!
//! Foundation types shared by the Vyom client-side state crates.
//!
//! - **Branded IDs**: `SessionId`, `UserId`, `TenantId` as newtypes for type safety
//! - **Durable storage**: the [`DurableStorage`] adapter trait with memory,
//!   file and disabled backends
//! - **Cookies**: the [`CookieSource`] trait and a header-parsing [`CookieJar`]
//! - **Logging**: subscriber initialization and in-memory capture for tests

#![deny(unsafe_code)]

pub mod constants;
pub mod cookies;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod storage;

pub use cookies::{CookieJar, CookieSource};
pub use errors::StorageError;
pub use ids::{SessionId, TenantId, UserId};
pub use storage::{DisabledStorage, DurableStorage, FileStorage, MemoryStorage};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
