use std::{env, time::Duration};

use url::Url;

use crate::{BACKEND_URL_ENV, DEFAULT_BACKEND_URL, DEFAULT_LOGIN_TIMEOUT_MS, LOGIN_TIMEOUT_ENV};

const LOGIN_ENDPOINT_PATH: &str = "api/login";

pub(crate) fn normalize_backend_url(raw: &str, default_backend_url: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_backend_url.to_string();
    }

    match Url::parse(trimmed) {
        Ok(mut parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if !parsed.path().ends_with('/') {
                let path = format!("{}/", parsed.path());
                parsed.set_path(&path);
            }
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        _ => default_backend_url.to_string(),
    }
}

pub(crate) fn resolve_backend_url() -> String {
    normalize_backend_url(
        &env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
        DEFAULT_BACKEND_URL,
    )
}

/// The backend may be mounted under a sub-path, so the endpoint is joined relative to it.
pub(crate) fn login_endpoint(backend_url: &str) -> Result<Url, String> {
    let base = Url::parse(backend_url)
        .map_err(|error| format!("Invalid backend URL '{backend_url}': {error}"))?;
    base.join(LOGIN_ENDPOINT_PATH)
        .map_err(|error| format!("Failed to build login endpoint from '{backend_url}': {error}"))
}

pub(crate) fn parse_login_timeout(raw: Option<&str>) -> Duration {
    let timeout_ms = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_LOGIN_TIMEOUT_MS);
    Duration::from_millis(timeout_ms)
}

pub(crate) fn resolve_login_timeout() -> Duration {
    parse_login_timeout(env::var(LOGIN_TIMEOUT_ENV).ok().as_deref())
}
