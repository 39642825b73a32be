use std::sync::Arc;

use storage::{ApiConfig, HttpInitError, HttpRepository, Storage};

use crate::Clock;
use crate::auth_service::AuthService;
use crate::game::GameLoopService;
use crate::stats_service::StatsService;

/// Assembles the app-facing services over one backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    stats: Arc<StatsService>,
    game_loop: Arc<GameLoopService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock) -> Self {
        Self {
            auth: Arc::new(AuthService::new(Arc::clone(&storage.auth))),
            stats: Arc::new(StatsService::new(Arc::clone(&storage.attempts))),
            game_loop: Arc::new(GameLoopService::new(clock, Arc::clone(&storage.attempts))),
        }
    }

    /// Services talking to the HTTP backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `HttpInitError` if the HTTP client cannot be built.
    pub fn http(config: &ApiConfig, clock: Clock) -> Result<Self, HttpInitError> {
        let repo = Arc::new(HttpRepository::new(config)?);
        let storage = Storage {
            auth: repo.clone(),
            attempts: repo,
        };
        Ok(Self::new(&storage, clock))
    }

    /// Services backed by the in-memory repository (offline play).
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn game_loop(&self) -> Arc<GameLoopService> {
        Arc::clone(&self.game_loop)
    }
}
