use std::sync::{Arc, Mutex, PoisonError};

use dioxus::prelude::*;
use services::{AuthService, GameController, GameLoopService, StatsService};

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn stats(&self) -> Arc<StatsService>;
    fn game_loop(&self) -> Arc<GameLoopService>;
}

/// Services plus the one game controller shared by every screen.
#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    stats: Arc<StatsService>,
    game: Arc<Mutex<GameController>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let game = app.game_loop().controller();
        Self {
            auth: app.auth(),
            stats: app.stats(),
            game: Arc::new(Mutex::new(game)),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    /// Run `f` against the game controller.
    ///
    /// The lock is never held across an await point.
    pub fn with_game<R>(&self, f: impl FnOnce(&mut GameController) -> R) -> R {
        let mut game = self.game.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut game)
    }
}

/// Name of the signed-in player, `None` until login or a session check succeeds.
#[derive(Clone, Copy, PartialEq)]
pub struct CurrentUser(pub Signal<Option<String>>);

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
