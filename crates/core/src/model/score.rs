/// Points awarded for each correctly solved puzzle.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Running totals for one game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    streak: u32,
    solved: u32,
}

impl Scoreboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Consecutive correct answers since the last miss.
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn solved(&self) -> u32 {
        self.solved
    }

    pub fn record_correct(&mut self) {
        self.score = self.score.saturating_add(POINTS_PER_CORRECT);
        self.streak = self.streak.saturating_add(1);
        self.solved = self.solved.saturating_add(1);
    }

    /// A miss only breaks the streak; score and solved count are kept.
    pub fn record_miss(&mut self) {
        self.streak = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
