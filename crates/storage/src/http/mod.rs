//! reqwest client for the game's JSON backend.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use math_core::model::{NewAttempt, StatsFilter, StatsReport};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::repository::{
    AttemptRepository, AuthRepository, Credentials, SessionStatus, StorageError,
};

mod wire;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `MONSTER_API_URL` and `MONSTER_HTTP_TIMEOUT_SECS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("MONSTER_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let timeout = env::var("MONSTER_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Duration::from_secs);
        Self { base_url, timeout }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HttpInitError {
    #[error("invalid backend url: {raw}")]
    InvalidBaseUrl { raw: String },
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Backend adapter speaking the `/api/*` JSON endpoints.
///
/// The client keeps a cookie store so the server-side session survives
/// between requests.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    /// # Errors
    ///
    /// Returns `HttpInitError` if the base URL is not absolute or the client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, HttpInitError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, StorageError> {
        self.base_url
            .join(path)
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(credentials)
            .send()
            .await
            .map_err(|e| wire::transport(&e))?;
        let reply: wire::UserReply = decode(response).await?;
        Ok(reply.username)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, HttpInitError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| HttpInitError::InvalidBaseUrl {
        raw: raw.to_owned(),
    })?;
    if url.cannot_be_a_base() {
        return Err(HttpInitError::InvalidBaseUrl {
            raw: raw.to_owned(),
        });
    }
    Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(wire::classify_failure(status, &body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StorageError> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| wire::transport(&e))
}

#[async_trait]
impl AuthRepository for HttpRepository {
    async fn check_session(&self) -> Result<SessionStatus, StorageError> {
        let response = self
            .client
            .get(self.endpoint("api/check_session")?)
            .send()
            .await
            .map_err(|e| wire::transport(&e))?;
        decode(response).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<String, StorageError> {
        self.post_credentials("api/register", credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, StorageError> {
        self.post_credentials("api/login", credentials).await
    }

    async fn logout(&self) -> Result<(), StorageError> {
        let response = self
            .client
            .post(self.endpoint("api/logout")?)
            .send()
            .await
            .map_err(|e| wire::transport(&e))?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for HttpRepository {
    async fn save_attempt(&self, attempt: &NewAttempt) -> Result<(), StorageError> {
        let response = self
            .client
            .post(self.endpoint("api/save_attempt")?)
            .json(attempt)
            .send()
            .await
            .map_err(|e| wire::transport(&e))?;
        ensure_success(response).await?;
        log::debug!("attempt saved: {:?}", attempt.question);
        Ok(())
    }

    async fn fetch_stats(&self, filter: StatsFilter) -> Result<StatsReport, StorageError> {
        let response = self
            .client
            .get(self.endpoint("api/stats")?)
            .query(&[("game_type", filter.as_query_value())])
            .send()
            .await
            .map_err(|e| wire::transport(&e))?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_under_base_path() {
        let repo = HttpRepository::new(&ApiConfig::new("http://localhost:5000")).unwrap();
        assert_eq!(
            repo.endpoint("api/login").unwrap().as_str(),
            "http://localhost:5000/api/login"
        );

        let nested = HttpRepository::new(&ApiConfig::new("https://example.com/monster")).unwrap();
        assert_eq!(
            nested.endpoint("api/stats").unwrap().as_str(),
            "https://example.com/monster/api/stats"
        );
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = HttpRepository::new(&ApiConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, HttpInitError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn default_config_points_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[tokio::test]
    async fn unreachable_backend_is_connection_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let config = ApiConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let repo = HttpRepository::new(&config).unwrap();
        let err = repo.check_session().await.unwrap_err();
        assert!(matches!(err, StorageError::Connection(_)), "{err:?}");
    }
}
