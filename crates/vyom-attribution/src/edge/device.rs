//! Device class detection from the `User-Agent` header.

use std::fmt;

use serde::{Deserialize, Serialize};

const MOBILE_MARKERS: [&str; 4] = ["mobile", "android", "iphone", "ipod"];
const TABLET_MARKERS: [&str; 2] = ["tablet", "ipad"];

/// Coarse device class recorded with a touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Phones, and any UA mentioning Android.
    Mobile,
    /// Tablets and iPads.
    Tablet,
    /// Everything else, including a missing UA.
    Desktop,
}

impl Device {
    /// Classify a user agent string (case-insensitive). Mobile markers are
    /// checked before tablet markers.
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if MOBILE_MARKERS.iter().any(|m| ua.contains(m)) {
            Self::Mobile
        } else if TABLET_MARKERS.iter().any(|m| ua.contains(m)) {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Wire name of the device class.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iphone_is_mobile() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
        assert_eq!(Device::detect(ua), Device::Mobile);
    }

    #[test]
    fn android_tablet_counts_as_mobile() {
        let ua = "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36";
        assert_eq!(Device::detect(ua), Device::Mobile);
    }

    #[test]
    fn ipad_is_tablet() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)";
        assert_eq!(Device::detect(ua), Device::Tablet);
    }

    #[test]
    fn desktop_and_empty() {
        let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0";
        assert_eq!(Device::detect(ua), Device::Desktop);
        assert_eq!(Device::detect(""), Device::Desktop);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(Device::detect("SOME MOBILE BROWSER"), Device::Mobile);
    }

    #[test]
    fn display_matches_serde() {
        assert_eq!(Device::Tablet.to_string(), "tablet");
        assert_eq!(serde_json::to_string(&Device::Tablet).unwrap(), "\"tablet\"");
    }
}
