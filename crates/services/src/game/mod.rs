mod controller;
mod workflow;

// Public API of the game subsystem.
pub use controller::{AttemptDispatch, CheckedAnswer, FEEDBACK_DELAY, GameController, GamePhase};
pub use workflow::GameLoopService;
