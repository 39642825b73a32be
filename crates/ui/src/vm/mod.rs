mod game_vm;
mod stats_vm;
mod time_fmt;

pub use game_vm::{
    ALIENS, DiagramCellVm, FeedbackVm, GameBoardVm, MONSTERS, Mascots, PuzzleVm, enter_game,
    game_blurb,
};
pub use stats_vm::{AttemptRowVm, StatsTotalsVm, StatsVm, filter_options, map_stats_report};
pub use time_fmt::{format_datetime, format_seconds, format_timer};
