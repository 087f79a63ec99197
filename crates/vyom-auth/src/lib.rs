//! # vyom-auth
//!
//! The authenticated user's identity and bearer token.
//!
//! [`SessionStore`] owns the in-memory session and mirrors the token into a
//! [`DurableStorage`](vyom_core::DurableStorage) key so it survives reloads.
//! Only the token is durable; the user profile is re-fetched with it by the
//! login collaborator after each reload, which then calls
//! [`SessionStore::set_user`].
//!
//! The store is constructed explicitly and handed to the UI root, usually
//! behind an `Arc`. Readers take snapshots or subscribe to a watch channel;
//! every mutation publishes exactly one complete new state.

#![deny(unsafe_code)]

pub mod store;
pub mod types;

pub use store::SessionStore;
pub use types::{AuthPhase, SessionState, User};
