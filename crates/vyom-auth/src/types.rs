//! Session state types.

use serde::{Deserialize, Serialize};
use vyom_core::{TenantId, UserId};

/// The authenticated user's profile, as returned by `GET /auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Tenant the user belongs to.
    pub tenant_id: TenantId,
    /// Role name used for access checks.
    pub role: String,
}

/// How far login has progressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    /// Neither token nor user.
    Anonymous,
    /// Exactly one of token and user is set, e.g. a token restored on
    /// reload whose profile has not been fetched yet.
    Resolving,
    /// Token and user are both set.
    Authenticated,
}

/// One immutable view of the session.
///
/// Fields are only writable by [`SessionStore`](crate::SessionStore).
/// `is_authenticated` is computed from the token on every call, so it cannot
/// drift from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) user: Option<User>,
    pub(crate) token: Option<String>,
}

impl SessionState {
    /// The user profile, once fetched.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The bearer token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a bearer token is held.
    ///
    /// A restored token makes this true before the user is known; check
    /// [`phase`](Self::phase) before relying on [`user`](Self::user).
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Classify the state.
    pub fn phase(&self) -> AuthPhase {
        match (&self.token, &self.user) {
            (Some(_), Some(_)) => AuthPhase::Authenticated,
            (None, None) => AuthPhase::Anonymous,
            _ => AuthPhase::Resolving,
        }
    }

    /// Headers the API client attaches to authenticated requests.
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        if let Some(user) = &self.user {
            headers.push(("X-Tenant-ID", user.tenant_id.to_string()));
            headers.push(("X-User-ID", user.id.to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: UserId::from("1"),
            email: "agent@vyom.example".to_string(),
            tenant_id: TenantId::from("t1"),
            role: "sales_agent".to_string(),
        }
    }

    #[test]
    fn default_is_anonymous() {
        let state = SessionState::default();
        assert_eq!(state.phase(), AuthPhase::Anonymous);
        assert!(!state.is_authenticated());
        assert!(state.auth_headers().is_empty());
    }

    #[test]
    fn token_only_is_resolving_but_authenticated() {
        let state = SessionState {
            user: None,
            token: Some("xyz".to_string()),
        };
        assert_eq!(state.phase(), AuthPhase::Resolving);
        assert!(state.is_authenticated());
        assert_eq!(
            state.auth_headers(),
            vec![("Authorization", "Bearer xyz".to_string())]
        );
    }

    #[test]
    fn user_only_is_resolving_and_not_authenticated() {
        let state = SessionState {
            user: Some(user()),
            token: None,
        };
        assert_eq!(state.phase(), AuthPhase::Resolving);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn full_state_headers() {
        let state = SessionState {
            user: Some(user()),
            token: Some("abc".to_string()),
        };
        assert_eq!(state.phase(), AuthPhase::Authenticated);
        let headers = state.auth_headers();
        assert_eq!(headers.len(), 3);
        assert!(headers.contains(&("X-Tenant-ID", "t1".to_string())));
        assert!(headers.contains(&("X-User-ID", "1".to_string())));
    }

    #[test]
    fn user_wire_format_is_camel_case() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","email":"agent@vyom.example","tenantId":"t1","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(user.tenant_id.as_str(), "t1");
        assert_eq!(user.role, "admin");
    }
}
