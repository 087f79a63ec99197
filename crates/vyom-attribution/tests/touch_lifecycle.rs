#![allow(missing_docs, unused_results)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use url::Url;
use vyom_attribution::edge::{EdgeRecorder, Touch, record_touch};
use vyom_attribution::{AttributionReader, encode_cookie_value};
use vyom_core::{CookieJar, SessionId};
use vyom_settings::AttributionSettings;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Apply the edge layer's `Set-Cookie` values to a browser-side jar.
fn apply_set_cookies(jar: &mut CookieJar, set_cookies: &[String]) {
    for header in set_cookies {
        let pair = header.split(';').next().unwrap();
        let (name, value) = pair.split_once('=').unwrap();
        jar.insert(name, value);
    }
}

#[test]
fn client_sees_edge_writes_on_next_mount() {
    let recorder = EdgeRecorder::new(AttributionSettings::default());
    let mut browser = CookieJar::default();

    let landing = Touch::new(
        Url::parse("https://vyom.example/projects?utm_source=google&utm_medium=cpc&utm_campaign=launch").unwrap(),
        start(),
    )
    .with_user_agent("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)");
    let outcome = recorder.record(&browser, &landing).unwrap().unwrap();
    apply_set_cookies(&mut browser, &outcome.set_cookies);

    let first_view = AttributionReader::new(&browser).mount();
    let record = first_view.record().unwrap();
    assert_eq!(record.touch_count, 1);
    assert_eq!(record.utm_campaign.as_deref(), Some("launch"));
    assert_eq!(record.device.as_deref(), Some("tablet"));

    let next = Touch::new(Url::parse("https://vyom.example/bookings").unwrap(), start() + Duration::minutes(2));
    let outcome = recorder.record(&browser, &next).unwrap().unwrap();
    apply_set_cookies(&mut browser, &outcome.set_cookies);

    // the already-mounted view keeps its snapshot
    assert_eq!(first_view.record().unwrap().touch_count, 1);

    let second_view = AttributionReader::new(&browser).mount();
    let record = second_view.record().unwrap();
    assert_eq!(record.touch_count, 2);
    assert_eq!(record.landing_page.as_deref(), Some("/projects"));
    assert_eq!(record.last_page_visited.as_deref(), Some("/bookings"));
    assert_eq!(record.session_id, first_view.record().unwrap().session_id);
}

#[test]
fn skipped_requests_leave_cookies_alone() {
    let recorder = EdgeRecorder::new(AttributionSettings::default());
    let asset = Touch::new(Url::parse("https://vyom.example/logo.png").unwrap(), start());
    assert!(recorder.record(&CookieJar::default(), &asset).unwrap().is_none());
}

#[test]
fn custom_cookie_names_flow_through() {
    let settings = AttributionSettings {
        cookie_name: "acme_attr".to_string(),
        session_cookie_name: "acme_sess".to_string(),
        ..AttributionSettings::default()
    };
    let recorder = EdgeRecorder::new(settings);
    let mut browser = CookieJar::default();
    let touch = Touch::new(Url::parse("https://vyom.example/").unwrap(), start());
    let outcome = recorder.record(&browser, &touch).unwrap().unwrap();
    apply_set_cookies(&mut browser, &outcome.set_cookies);

    assert!(AttributionReader::new(&browser).read_attribution().is_none());
    assert!(AttributionReader::with_cookie_name(&browser, "acme_attr").read_attribution().is_some());
}

proptest! {
    #[test]
    fn touches_preserve_first_touch_and_count_up(paths in proptest::collection::vec("/[a-z]{1,8}", 1..20)) {
        let session = SessionId::from("s1");
        let mut record: Option<vyom_attribution::AttributionRecord> = None;
        let mut previous_count = 0_u32;

        for (i, path) in paths.iter().enumerate() {
            let at = start() + Duration::minutes(i64::try_from(i).unwrap());
            let url = Url::parse(&format!("https://vyom.example{path}?utm_source=s{i}")).unwrap();
            let next = record_touch(record.as_ref(), &session, &Touch::new(url, at));

            prop_assert!(next.touch_count > previous_count);
            prop_assert_eq!(next.first_touch_at, Some(start()));
            prop_assert_eq!(next.utm_source.as_deref(), Some("s0"));
            prop_assert_eq!(next.last_page_visited.as_deref(), Some(path.as_str()));
            prop_assert_eq!(next.last_visit_at, Some(at));

            // what the client decodes is exactly what the edge wrote
            let mut jar = CookieJar::default();
            jar.insert("vyom_attribution", encode_cookie_value(&next).unwrap());
            let decoded = AttributionReader::new(&jar).read_attribution();
            prop_assert_eq!(decoded.as_ref(), Some(&next));

            previous_count = next.touch_count;
            record = Some(next);
        }
    }
}
