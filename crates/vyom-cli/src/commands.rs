//! Subcommand implementations. Each returns the text to print.

use anyhow::{Context, Result};
use chrono::Utc;
use url::Url;
use vyom_attribution::edge::{EdgeRecorder, Touch};
use vyom_attribution::{AttributionReader, AttributionRecord, decode_cookie_value};
use vyom_auth::SessionStore;
use vyom_core::{CookieJar, FileStorage};
use vyom_settings::{AttributionSettings, SessionSettings};

const NO_ATTRIBUTION: &str = "no attribution data";

fn render(record: Option<&AttributionRecord>) -> Result<String> {
    match record {
        Some(record) => serde_json::to_string_pretty(record).context("failed to render record"),
        None => Ok(NO_ATTRIBUTION.to_string()),
    }
}

/// `attribution decode`: unlike the store, say why a value is rejected.
pub fn decode(value: &str) -> Result<String> {
    match decode_cookie_value(value) {
        Ok(record) => render(Some(&record)),
        Err(error) => Ok(format!("{NO_ATTRIBUTION} ({error})")),
    }
}

/// `attribution read`: go through the store exactly as a mounted view does.
pub fn read(settings: &AttributionSettings, cookie_header: &str) -> Result<String> {
    let jar = CookieJar::parse(cookie_header);
    let snapshot = AttributionReader::with_cookie_name(jar, &settings.cookie_name).mount();
    render(snapshot.record())
}

/// Arguments for [`touch`].
pub struct TouchArgs<'a> {
    pub url: &'a str,
    pub referrer: Option<&'a str>,
    pub user_agent: Option<&'a str>,
    pub cookies: &'a str,
    pub secure: bool,
}

/// `attribution touch`: print `Set-Cookie` lines and the ingestion payload.
pub fn touch(settings: &AttributionSettings, args: &TouchArgs<'_>) -> Result<String> {
    let url = Url::parse(args.url).with_context(|| format!("invalid URL: {}", args.url))?;
    let mut touch = Touch::new(url, Utc::now());
    if let Some(referrer) = args.referrer {
        touch = touch.with_referrer(referrer);
    }
    if let Some(user_agent) = args.user_agent {
        touch = touch.with_user_agent(user_agent);
    }

    let recorder = EdgeRecorder::new(settings.clone()).secure(args.secure);
    let Some(outcome) = recorder.record(&CookieJar::parse(args.cookies), &touch)? else {
        return Ok(format!("not tracked: {}", touch.url.path()));
    };

    let mut lines: Vec<String> = outcome
        .set_cookies
        .iter()
        .map(|c| format!("Set-Cookie: {c}"))
        .collect();
    lines.push(serde_json::to_string_pretty(&outcome.event).context("failed to render event")?);
    Ok(lines.join("\n"))
}

/// Hydrate a session store over the configured storage file.
pub fn open_session(settings: &SessionSettings) -> SessionStore<FileStorage> {
    let storage = FileStorage::new(settings.resolved_storage_path());
    SessionStore::hydrate_with_key(storage, settings.token_key.clone())
}

/// One-line summary of a session store.
pub fn describe_session(store: &SessionStore<FileStorage>) -> String {
    let state = store.snapshot();
    let mut line = format!(
        "phase={:?} authenticated={} storage={}",
        state.phase(),
        state.is_authenticated(),
        store.storage().path().display()
    );
    if store.is_memory_only() {
        line.push_str(" (memory only)");
    }
    line
}
