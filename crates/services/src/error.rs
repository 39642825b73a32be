//! Shared error types for the services crate.

use thiserror::Error;

use math_core::model::{GameTypeError, PuzzleError};
use storage::StorageError;

/// Errors emitted by the game controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("no game has been started")]
    NotStarted,
    #[error(transparent)]
    GameType(#[from] GameTypeError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

/// Which account action failed, for user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,
    #[error("{0}")]
    Rejected(String),
    #[error("{action:?} request failed: {source}")]
    Unavailable {
        action: AuthAction,
        #[source]
        source: StorageError,
    },
}

impl AuthError {
    /// Message shown under the login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AuthError::MissingCredentials => "Please enter username and password".into(),
            AuthError::Rejected(message) => message.clone(),
            AuthError::Unavailable {
                action: AuthAction::Login,
                ..
            } => "Login failed. Please try again.".into(),
            AuthError::Unavailable {
                action: AuthAction::Register,
                ..
            } => "Registration failed. Please try again.".into(),
        }
    }
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StatsError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Failed to load statistics. Please try again."
    }
}
