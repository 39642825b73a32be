mod auth;
mod game;
mod game_select;
mod nav;
mod state;
mod stats;

pub use auth::AuthView;
pub use game::GameView;
pub use game_select::GameSelectView;
pub use nav::LogoutButton;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use stats::StatsView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
