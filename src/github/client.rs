use crate::config::Config;
use crate::error::{FetchError, FetchResult, Result};
use crate::github::cache::ResponseCache;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

pub const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
pub const CLIENT_ID: &str = "lookout-github-viewer";

/// Read-only access to the GitHub REST API with a shared response cache.
///
/// Clones share the same cache, so every request made during a session
/// sees responses captured by any other.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<Mutex<ResponseCache>>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>, ttl: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_ID));

        if let Some(token) = token {
            let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Arc::new(Mutex::new(ResponseCache::new(ttl))),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base_url, config.token(), config.cache_ttl())
    }

    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// GET `endpoint` (path plus query) and parse the body as `T`.
    ///
    /// A fresh cached body for the exact same path is returned without a
    /// request. Only successful, parseable responses are cached.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> FetchResult<T> {
        let cached = self.lock_cache().get(endpoint, Instant::now()).cloned();
        if let Some(body) = cached {
            tracing::debug!(endpoint, "cache hit");
            return serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()));
        }

        let url = format!("{}{}", self.base_url, endpoint);
        tracing::info!(%url, "GET");

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            FetchError::Remote(format!("GitHub API error: {e}"))
        })?;

        let status = response.status();
        let text = response.text().await;

        if !status.is_success() {
            let err = classify_failure(status, text.as_deref().unwrap_or_default());
            tracing::warn!(endpoint, status = status.as_u16(), error = %err, "non-success status");
            return Err(err);
        }

        let text = text.map_err(|e| FetchError::Remote(format!("GitHub API error: {e}")))?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))?;
        let parsed = T::deserialize(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        self.lock_cache().insert(endpoint, body, Instant::now());
        Ok(parsed)
    }
}

/// Map a non-success status and its body to a [`FetchError`].
pub fn classify_failure(status: StatusCode, body: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        StatusCode::FORBIDDEN => FetchError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ApiErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    format!(
                        "GitHub API error: {} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or_default()
                    )
                    .trim_end()
                    .to_string()
                });
            FetchError::Remote(message)
        }
    }
}
