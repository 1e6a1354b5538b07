use std::{env, time::Duration};

use crate::domain::RosterStrategy;

// Runtime/server configuration read from the environment (after `.env`).

pub fn http_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

const DEFAULT_APP_URL: &str = "https://thewheel.vercel.app";

pub fn app_url() -> String {
    env::var("APP_URL").unwrap_or_else(|_| DEFAULT_APP_URL.to_string())
}

pub fn edusign_api_url() -> String {
    env::var("EDUSIGN_API_URL").unwrap_or_else(|_| "https://api.edusign.fr/v1".to_string())
}

// Process-wide fallback token used when a school has no stored credential.
pub fn default_api_key() -> Option<String> {
    env::var("EDUSIGN_API_KEY")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn roster_strategy() -> RosterStrategy {
    match env::var("ROSTER_STRATEGY") {
        Ok(value) => value.parse().unwrap_or_else(|error| {
            tracing::warn!(%error, "falling back to the direct roster strategy.");
            RosterStrategy::Direct
        }),
        Err(_) => RosterStrategy::Direct,
    }
}

// Per-call timeout for Edusign requests.
pub fn edusign_timeout() -> Duration {
    duration_ms("EDUSIGN_TIMEOUT_MS", 5_000)
}

// Timeout for the whole remote phase of one roster resolution.
pub fn roster_timeout() -> Duration {
    duration_ms("ROSTER_TIMEOUT_MS", 15_000)
}

pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

// Legal pages live on the Edusign site unless overridden.
pub const DEFAULT_PRIVACY_URL: &str = "https://edusign.com/fr/politique-de-confidentialite/";
pub const DEFAULT_TERMS_URL: &str = "https://edusign.com/fr/conditions-generales-dutilisation/";
pub const DEFAULT_SUPPORT_URL: &str = "https://support.edusign.com/";

pub fn privacy_url() -> String {
    url_or("PRIVACY_URL", DEFAULT_PRIVACY_URL)
}

pub fn terms_url() -> String {
    url_or("TERMS_URL", DEFAULT_TERMS_URL)
}

pub fn support_url() -> String {
    url_or("SUPPORT_URL", DEFAULT_SUPPORT_URL)
}

fn url_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn duration_ms(key: &str, default_ms: u64) -> Duration {
    let millis = env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(millis)
}

/// Everything the server needs to build its state.
///
/// Integration tests construct this directly instead of touching the
/// environment.
#[derive(Clone)]
pub struct Settings {
    pub app_url: String,
    pub edusign_api_url: String,
    pub default_api_key: Option<String>,
    pub roster_strategy: RosterStrategy,
    pub edusign_timeout: Duration,
    pub roster_timeout: Duration,
    pub database_url: Option<String>,
    pub privacy_url: String,
    pub terms_url: String,
    pub support_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            app_url: app_url(),
            edusign_api_url: edusign_api_url(),
            default_api_key: default_api_key(),
            roster_strategy: roster_strategy(),
            edusign_timeout: edusign_timeout(),
            roster_timeout: roster_timeout(),
            database_url: database_url(),
            privacy_url: privacy_url(),
            terms_url: terms_url(),
            support_url: support_url(),
        }
    }
}
