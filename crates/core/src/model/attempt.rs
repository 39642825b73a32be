use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::{GameType, GameTypeError};

/// Number of recent attempts a stats report carries.
pub const RECENT_ATTEMPTS_LIMIT: usize = 20;

/// One submitted answer, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttempt {
    pub game_type: GameType,
    pub question: String,
    pub time_taken_seconds: f64,
    pub solved_correctly: bool,
}

/// A persisted attempt as reported back by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    #[serde(default)]
    pub game_type: Option<String>,
    pub question: String,
    pub time_taken_seconds: f64,
    pub solved_correctly: bool,
    #[serde(default)]
    pub timestamp_utc: Option<String>,
}

impl AttemptRecord {
    #[must_use]
    pub fn from_new(attempt: &NewAttempt, recorded_at: DateTime<Utc>) -> Self {
        Self {
            game_type: Some(attempt.game_type.as_str().to_owned()),
            question: attempt.question.clone(),
            time_taken_seconds: attempt.time_taken_seconds,
            solved_correctly: attempt.solved_correctly,
            timestamp_utc: Some(recorded_at.to_rfc3339()),
        }
    }

    /// The game type, if the backend sent a recognizable one.
    #[must_use]
    pub fn game_type(&self) -> Option<GameType> {
        self.game_type.as_deref().and_then(|raw| raw.parse().ok())
    }

    /// Parses `timestamp_utc`, accepting RFC 3339 or a zone-less ISO timestamp in UTC.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp_utc.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Aggregate attempt statistics. Absent or null fields count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAttemptStats")]
pub struct AttemptStats {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    /// Percentage of correct attempts, 0–100.
    pub accuracy: f64,
    pub avg_time: f64,
    pub best_time: f64,
}

#[derive(Deserialize)]
struct RawAttemptStats {
    #[serde(default)]
    total_attempts: Option<u32>,
    #[serde(default)]
    correct_attempts: Option<u32>,
    #[serde(default)]
    accuracy: Option<f64>,
    #[serde(default)]
    avg_time: Option<f64>,
    #[serde(default)]
    best_time: Option<f64>,
}

impl From<RawAttemptStats> for AttemptStats {
    fn from(raw: RawAttemptStats) -> Self {
        Self {
            total_attempts: raw.total_attempts.unwrap_or(0),
            correct_attempts: raw.correct_attempts.unwrap_or(0),
            accuracy: raw.accuracy.unwrap_or(0.0),
            avg_time: raw.avg_time.unwrap_or(0.0),
            best_time: raw.best_time.unwrap_or(0.0),
        }
    }
}

impl AttemptStats {
    /// Aggregate a set of attempts the same way the backend does.
    #[must_use]
    pub fn from_records(records: &[AttemptRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let total = records.len();
        let correct = records.iter().filter(|r| r.solved_correctly).count();
        let time_sum: f64 = records.iter().map(|r| r.time_taken_seconds).sum();
        let best = records
            .iter()
            .map(|r| r.time_taken_seconds)
            .fold(f64::INFINITY, f64::min);

        #[allow(clippy::cast_precision_loss)]
        let (accuracy, avg_time) = (
            correct as f64 / total as f64 * 100.0,
            time_sum / total as f64,
        );

        Self {
            total_attempts: u32::try_from(total).unwrap_or(u32::MAX),
            correct_attempts: u32::try_from(correct).unwrap_or(u32::MAX),
            accuracy,
            avg_time,
            best_time: best,
        }
    }
}

/// Response of a statistics query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    #[serde(default)]
    pub stats: AttemptStats,
    #[serde(default)]
    pub recent_attempts: Vec<AttemptRecord>,
}

/// Which attempts a statistics query covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatsFilter {
    #[default]
    All,
    Game(GameType),
}

impl StatsFilter {
    /// Value of the `game_type` query parameter.
    #[must_use]
    pub fn as_query_value(self) -> &'static str {
        match self {
            StatsFilter::All => "all",
            StatsFilter::Game(game_type) => game_type.as_str(),
        }
    }

    #[must_use]
    pub fn matches(self, record: &AttemptRecord) -> bool {
        match self {
            StatsFilter::All => true,
            StatsFilter::Game(game_type) => record.game_type() == Some(game_type),
        }
    }
}

impl FromStr for StatsFilter {
    type Err = GameTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatsFilter::All);
        }
        s.parse().map(StatsFilter::Game)
    }
}
