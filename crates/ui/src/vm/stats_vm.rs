use math_core::model::{AttemptRecord, GameType, StatsFilter, StatsReport};

use super::time_fmt::{format_datetime, format_seconds};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsTotalsVm {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub accuracy: String,
    pub avg_time: String,
    pub best_time: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub game: &'static str,
    pub question: String,
    pub time: String,
    pub correct: bool,
    pub timestamp: String,
}

impl AttemptRowVm {
    #[must_use]
    pub fn row_class(&self) -> &'static str {
        if self.correct {
            "correct-row"
        } else {
            "incorrect-row"
        }
    }

    #[must_use]
    pub fn result_icon(&self) -> &'static str {
        if self.correct { "✅" } else { "❌" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub totals: StatsTotalsVm,
    pub rows: Vec<AttemptRowVm>,
}

#[must_use]
pub fn map_stats_report(report: &StatsReport) -> StatsVm {
    let stats = report.stats;
    StatsVm {
        totals: StatsTotalsVm {
            total_attempts: stats.total_attempts,
            correct_attempts: stats.correct_attempts,
            accuracy: format!("{:.1}%", stats.accuracy),
            avg_time: format_seconds(stats.avg_time),
            best_time: format_seconds(stats.best_time),
        },
        rows: report.recent_attempts.iter().map(map_row).collect(),
    }
}

fn map_row(record: &AttemptRecord) -> AttemptRowVm {
    AttemptRowVm {
        game: record.game_type().map_or("-", GameType::title),
        question: record.question.clone(),
        time: format_seconds(record.time_taken_seconds),
        correct: record.solved_correctly,
        timestamp: record
            .timestamp()
            .map_or_else(|| "-".to_owned(), format_datetime),
    }
}

/// `(query value, label)` pairs for the stats filter select.
#[must_use]
pub fn filter_options() -> Vec<(&'static str, &'static str)> {
    std::iter::once((StatsFilter::All.as_query_value(), "All games"))
        .chain(GameType::ALL.into_iter().map(|game_type| {
            (
                StatsFilter::Game(game_type).as_query_value(),
                game_type.title(),
            )
        }))
        .collect()
}
