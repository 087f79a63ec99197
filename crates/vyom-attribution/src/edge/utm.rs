//! UTM parameter extraction and source inference.

use url::Url;

/// The five `utm_*` query parameters of a landing URL.
///
/// Only the first occurrence of each parameter counts, and an empty value
/// counts as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtmParameters {
    /// `utm_source`
    pub source: Option<String>,
    /// `utm_medium`
    pub medium: Option<String>,
    /// `utm_campaign`
    pub campaign: Option<String>,
    /// `utm_content`
    pub content: Option<String>,
    /// `utm_term`
    pub term: Option<String>,
}

impl UtmParameters {
    /// Extract the parameters from `url`'s query string.
    pub fn from_url(url: &Url) -> Self {
        let mut utm = Self::default();
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                "utm_source" => &mut utm.source,
                "utm_medium" => &mut utm.medium,
                "utm_campaign" => &mut utm.campaign,
                "utm_content" => &mut utm.content,
                "utm_term" => &mut utm.term,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        utm
    }

    /// Classify the traffic source.
    pub fn infer_source(&self) -> SourceInference {
        let mut inference = SourceInference {
            source: "direct".to_string(),
            sub_source: None,
            medium: None,
        };

        if let Some(source) = &self.source {
            inference.source.clone_from(source);
            match source.as_str() {
                "google" => {
                    let sub = if self.medium.as_deref() == Some("cpc") {
                        "google_ads"
                    } else {
                        "google_organic"
                    };
                    inference.sub_source = Some(sub.to_string());
                }
                "facebook" => inference.sub_source = Some("facebook_ads".to_string()),
                "email" => inference.medium = Some("email".to_string()),
                _ => {}
            }
        }

        if inference.medium.is_none() {
            inference.medium.clone_from(&self.medium);
        }
        inference
    }
}

/// Where a touch came from, as reported to the attribution endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceInference {
    /// Traffic source (`direct` when no `utm_source` is present).
    pub source: String,
    /// Paid/organic split for the major ad networks.
    pub sub_source: Option<String>,
    /// Marketing medium.
    pub medium: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utm(query: &str) -> UtmParameters {
        UtmParameters::from_url(&Url::parse(&format!("https://vyom.example/landing?{query}")).unwrap())
    }

    #[test]
    fn extracts_all_five() {
        let p = utm("utm_source=google&utm_medium=cpc&utm_campaign=spring&utm_content=hero&utm_term=flats");
        assert_eq!(p.source.as_deref(), Some("google"));
        assert_eq!(p.medium.as_deref(), Some("cpc"));
        assert_eq!(p.campaign.as_deref(), Some("spring"));
        assert_eq!(p.content.as_deref(), Some("hero"));
        assert_eq!(p.term.as_deref(), Some("flats"));
    }

    #[test]
    fn decodes_values_and_ignores_other_params() {
        let p = utm("ref=x&utm_campaign=spring%20sale");
        assert_eq!(p.campaign.as_deref(), Some("spring sale"));
        assert!(p.source.is_none());
    }

    #[test]
    fn first_occurrence_wins_and_empty_is_absent() {
        let p = utm("utm_source=a&utm_source=b&utm_medium=");
        assert_eq!(p.source.as_deref(), Some("a"));
        assert!(p.medium.is_none());
    }

    #[test]
    fn no_query_is_direct() {
        let inference = UtmParameters::default().infer_source();
        assert_eq!(inference.source, "direct");
        assert!(inference.sub_source.is_none());
        assert!(inference.medium.is_none());
    }

    #[test]
    fn google_cpc_is_ads() {
        let inference = utm("utm_source=google&utm_medium=cpc").infer_source();
        assert_eq!(inference.source, "google");
        assert_eq!(inference.sub_source.as_deref(), Some("google_ads"));
        assert_eq!(inference.medium.as_deref(), Some("cpc"));
    }

    #[test]
    fn google_without_cpc_is_organic() {
        let inference = utm("utm_source=google").infer_source();
        assert_eq!(inference.sub_source.as_deref(), Some("google_organic"));
    }

    #[test]
    fn facebook_is_ads() {
        let inference = utm("utm_source=facebook&utm_medium=social").infer_source();
        assert_eq!(inference.sub_source.as_deref(), Some("facebook_ads"));
        assert_eq!(inference.medium.as_deref(), Some("social"));
    }

    #[test]
    fn email_forces_medium() {
        let inference = utm("utm_source=email&utm_medium=newsletter").infer_source();
        assert_eq!(inference.source, "email");
        assert_eq!(inference.medium.as_deref(), Some("email"));
    }
}
