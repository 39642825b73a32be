mod attempt;
mod game_type;
mod puzzle;
mod score;

pub use attempt::{
    AttemptRecord, AttemptStats, NewAttempt, RECENT_ATTEMPTS_LIMIT, StatsFilter, StatsReport,
};
pub use game_type::{GameType, GameTypeError};
pub use puzzle::{
    DiagramCell, Operator, PartWholeDiagram, PartWholeSlot, Phrasing, Puzzle, PuzzleError,
    PuzzleShape, RenderHint,
};
pub use score::{POINTS_PER_CORRECT, Scoreboard};
