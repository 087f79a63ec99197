//! Branded ID newtypes for type safety.
//!
//! Identifiers arrive from outside this layer (the edge cookie, the remote
//! API's user profile), so the wrappers are transparent over `String` and
//! accept any opaque value. Nothing here mints IDs: session IDs come from
//! the edge recorder, user and tenant IDs from the API.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! branded_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Return the inner string as a slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

branded_id!(
    /// Opaque browsing-session identifier assigned by the edge layer.
    SessionId
);

branded_id!(
    /// Authenticated user identifier as issued by the remote API.
    UserId
);

branded_id!(
    /// Tenant the authenticated user belongs to.
    TenantId
);
