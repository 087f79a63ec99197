//! # vyom-attribution
//!
//! Multi-touch marketing attribution carried in a single cookie.
//!
//! The edge layer ([`edge`]) records every tracked navigation into an
//! [`AttributionRecord`] and writes it as URL-encoded JSON. The client side
//! ([`capture`]) reads that cookie once per mounted view and exposes the
//! decoded record as an immutable snapshot. A missing cookie and a malformed
//! cookie both read as "no attribution data".

#![deny(unsafe_code)]

pub mod capture;
pub mod codec;
pub mod edge;
pub mod errors;
pub mod record;

pub use capture::{AttributionReader, AttributionSnapshot};
pub use codec::{decode_cookie_value, encode_cookie_value};
pub use errors::AttributionError;
pub use record::AttributionRecord;
