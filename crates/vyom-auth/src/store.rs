//! The session store.
//!
//! Write order for every mutation is durable storage first, then one
//! `send_modify` on the watch channel. Mutations hold a store-wide lock
//! across both steps, so concurrent callers are applied one after another.
//! A subscriber therefore never sees a half-applied transition, and after a
//! mutation returns the durable key and the in-memory token agree (unless
//! storage has failed, see below).
//!
//! Storage failures never reach the caller. The first failed read or write
//! logs a warning and switches the store to memory-only mode for the rest of
//! its life: the session keeps working but will not survive a reload. Any
//! token persisted before the failure is removed on a best-effort basis so a
//! reload cannot bring back a replaced token.
//!
//! Other tabs sharing the same storage are not watched. A logout in one tab
//! leaves another tab's store authenticated until it is rebuilt.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};
use vyom_core::DurableStorage;
use vyom_core::constants::TOKEN_STORAGE_KEY;

use crate::types::{SessionState, User};

/// Owner of the session triple `{user, token, is_authenticated}`.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    token_key: String,
    state: watch::Sender<SessionState>,
    memory_only: AtomicBool,
    write_lock: Mutex<()>,
}

impl<S: DurableStorage> SessionStore<S> {
    /// Build the store, restoring the token from the default `auth_token` key.
    pub fn hydrate(storage: S) -> Self {
        Self::hydrate_with_key(storage, TOKEN_STORAGE_KEY)
    }

    /// Build the store, restoring the token from `token_key`.
    ///
    /// Reads storage exactly once. A stored token starts the session
    /// authenticated with no user; an empty stored value counts as absent.
    pub fn hydrate_with_key(storage: S, token_key: impl Into<String>) -> Self {
        let token_key = token_key.into();
        let mut memory_only = false;

        let token = match storage.get(&token_key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(error) => {
                warn!(key = %token_key, %error, "durable storage unreadable, session will not survive reload");
                memory_only = true;
                None
            }
        };
        debug!(key = %token_key, restored = token.is_some(), "session store hydrated");

        let (state, _) = watch::channel(SessionState { user: None, token });
        Self {
            storage,
            token_key,
            state,
            memory_only: AtomicBool::new(memory_only),
            write_lock: Mutex::new(()),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every future state. The receiver starts at the current one.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Whether persistence has been abandoned after a storage failure.
    pub fn is_memory_only(&self) -> bool {
        self.memory_only.load(Ordering::Relaxed)
    }

    /// Durable key the token is mirrored to.
    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Store a new bearer token.
    ///
    /// Persists first, then publishes `{token, is_authenticated = true}`.
    /// The user is left untouched. An empty token is ignored.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            warn!(key = %self.token_key, "ignoring empty bearer token");
            return;
        }

        let _guard = self.write_lock.lock();
        self.persist_token(&token);
        self.state.send_modify(|state| state.token = Some(token));
        debug!("bearer token set");
    }

    /// Replace the user profile. Memory only; the profile is never persisted.
    ///
    /// The previous profile is replaced wholesale, never merged.
    pub fn set_user(&self, user: User) {
        debug!(user_id = %user.id, tenant_id = %user.tenant_id, "user profile set");
        let _guard = self.write_lock.lock();
        self.state.send_modify(|state| state.user = Some(user));
    }

    /// Sign out: delete the durable token, then clear user and token together.
    ///
    /// Removal is attempted even in memory-only mode, so a token persisted
    /// before a later failure does not resurrect the session on reload.
    pub fn logout(&self) {
        let _guard = self.write_lock.lock();
        if let Err(error) = self.storage.remove(&self.token_key) {
            self.degrade("remove", &error);
        }

        self.state.send_modify(|state| {
            state.user = None;
            state.token = None;
        });
        debug!("session cleared");
    }

    /// The API rejected the token (HTTP 401). Same effect as [`logout`](Self::logout).
    pub fn expire(&self) {
        warn!("bearer token rejected, clearing session");
        self.logout();
    }

    fn persist_token(&self, token: &str) {
        if !self.is_memory_only() {
            match self.storage.set(&self.token_key, token) {
                Ok(()) => return,
                Err(error) => self.degrade("set", &error),
            }
        }
        self.discard_persisted();
    }

    /// Best-effort removal of a token written before storage failed.
    fn discard_persisted(&self) {
        if let Err(error) = self.storage.remove(&self.token_key) {
            debug!(key = %self.token_key, %error, "could not clear previously persisted token");
        }
    }

    fn degrade(&self, op: &'static str, error: &vyom_core::StorageError) {
        warn!(key = %self.token_key, op, %error, "durable storage failed, continuing in memory only");
        self.memory_only.store(true, Ordering::Relaxed);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
