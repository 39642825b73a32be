use async_trait::async_trait;
use math_core::Clock;
use math_core::model::{
    AttemptRecord, AttemptStats, NewAttempt, RECENT_ATTEMPTS_LIMIT, StatsFilter, StatsReport,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    /// The backend has no authenticated user for this client.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend refused the request with a message meant for the player.
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected status {0}")]
    HttpStatus(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Username/password pair sent to the auth endpoints.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Result of asking the backend who is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
}

impl SessionStatus {
    /// The logged-in username, if the session is authenticated.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        if self.authenticated {
            self.username.as_deref()
        } else {
            None
        }
    }
}

/// Account and server-session contract.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached or replies unexpectedly.
    async fn check_session(&self) -> Result<SessionStatus, StorageError>;

    /// Create an account and log it in, returning the username.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Rejected` with the backend's message when refused.
    async fn register(&self, credentials: &Credentials) -> Result<String, StorageError>;

    /// Log in, returning the username.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Rejected` with the backend's message when refused.
    async fn login(&self, credentials: &Credentials) -> Result<String, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn logout(&self) -> Result<(), StorageError>;
}

/// Attempt persistence and statistics contract.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn save_attempt(&self, attempt: &NewAttempt) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the statistics cannot be loaded.
    async fn fetch_stats(&self, filter: StatsFilter) -> Result<StatsReport, StorageError>;
}

/// Minimum password length the backend accepts on registration.
pub const MIN_PASSWORD_LEN: usize = 4;

/// In-memory stand-in for the backend, used by tests and offline play.
///
/// Mirrors the backend's observable rules: registration validates and logs the
/// new user in, attempts and statistics require a logged-in user, and recent
/// attempts come back newest first.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    clock: Clock,
    users: Arc<Mutex<HashMap<String, String>>>,
    current_user: Arc<Mutex<Option<String>>>,
    attempts: Arc<Mutex<HashMap<String, Vec<AttemptRecord>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Attempts recorded for a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn attempts_for(&self, username: &str) -> Result<Vec<AttemptRecord>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(username).cloned().unwrap_or_default())
    }

    fn logged_in(&self) -> Result<String, StorageError> {
        let guard = self
            .current_user
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clone().ok_or(StorageError::Unauthenticated)
    }

    fn set_current(&self, username: Option<String>) -> Result<(), StorageError> {
        let mut guard = self
            .current_user
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = username;
        Ok(())
    }
}

fn require_fields(credentials: &Credentials) -> Result<(), StorageError> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(StorageError::Rejected(
            "Username and password required".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AuthRepository for InMemoryRepository {
    async fn check_session(&self) -> Result<SessionStatus, StorageError> {
        match self.logged_in() {
            Ok(username) => Ok(SessionStatus {
                authenticated: true,
                username: Some(username),
            }),
            Err(StorageError::Unauthenticated) => Ok(SessionStatus::default()),
            Err(err) => Err(err),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<String, StorageError> {
        require_fields(credentials)?;
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(StorageError::Rejected(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        {
            let mut users = self
                .users
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            if users.contains_key(&credentials.username) {
                return Err(StorageError::Rejected("Username already exists".into()));
            }
            users.insert(credentials.username.clone(), credentials.password.clone());
        }
        self.set_current(Some(credentials.username.clone()))?;
        Ok(credentials.username.clone())
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, StorageError> {
        require_fields(credentials)?;
        let matches = {
            let users = self
                .users
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            users.get(&credentials.username) == Some(&credentials.password)
        };
        if !matches {
            return Err(StorageError::Rejected(
                "Invalid username or password".into(),
            ));
        }
        self.set_current(Some(credentials.username.clone()))?;
        Ok(credentials.username.clone())
    }

    async fn logout(&self) -> Result<(), StorageError> {
        self.set_current(None)
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn save_attempt(&self, attempt: &NewAttempt) -> Result<(), StorageError> {
        let username = self.logged_in()?;
        let record = AttemptRecord::from_new(attempt, self.clock.now());
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entry(username).or_default().push(record);
        Ok(())
    }

    async fn fetch_stats(&self, filter: StatsFilter) -> Result<StatsReport, StorageError> {
        let username = self.logged_in()?;
        let matching: Vec<AttemptRecord> = self
            .attempts_for(&username)?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();

        let stats = AttemptStats::from_records(&matching);
        let recent_attempts = matching
            .into_iter()
            .rev()
            .take(RECENT_ATTEMPTS_LIMIT)
            .collect();

        Ok(StatsReport {
            stats,
            recent_attempts,
        })
    }
}

/// Aggregates the backend contracts behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub auth: Arc<dyn AuthRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let auth: Arc<dyn AuthRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self { auth, attempts }
    }
}
