#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod game;
pub mod stats_service;
pub mod timer;

pub use math_core::Clock;

pub use app_services::AppServices;
pub use auth_service::AuthService;
pub use error::{AuthAction, AuthError, GameError, StatsError};
pub use game::{
    AttemptDispatch, CheckedAnswer, FEEDBACK_DELAY, GameController, GameLoopService, GamePhase,
};
pub use stats_service::StatsService;
pub use timer::{AttemptTimer, TICK_INTERVAL};
