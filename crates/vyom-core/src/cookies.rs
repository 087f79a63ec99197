//! Cookie sources.
//!
//! Cookies are owned by the edge layer; everything here is read-only. Values
//! are returned exactly as they appear on the wire (still URL-encoded), and
//! decoding is left to the consumer that knows the value's schema.

use std::collections::HashMap;

/// Read access to the ambient cookie store.
pub trait CookieSource {
    /// Raw value of the cookie named `name`, if present.
    fn cookie(&self, name: &str) -> Option<String>;
}

/// A parsed `Cookie:` header (or `document.cookie` string).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: HashMap<String, String>,
}

impl CookieJar {
    /// Parse a `name=value; name2=value2` header.
    ///
    /// Pairs without `=` and pairs with an empty name are skipped. When a name
    /// repeats, the first occurrence wins, which matches how browsers order
    /// the more specific path first.
    pub fn parse(header: &str) -> Self {
        let mut cookies = HashMap::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let _ = cookies
                .entry(name.to_owned())
                .or_insert_with(|| value.trim().to_owned());
        }
        Self { cookies }
    }

    /// Set a cookie value, replacing any existing one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let _ = self.cookies.insert(name.into(), value.into());
    }

    /// Number of cookies in the jar.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieSource for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}

impl<T: CookieSource + ?Sized> CookieSource for &T {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
