//! Random puzzle generation.
//!
//! Each game type has one generator function; dispatch over [`GameType`] is
//! exhaustive, so every variant always yields a fresh puzzle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::model::{GameType, Operator, PartWholeSlot, Phrasing, Puzzle, PuzzleError};

/// Inclusive range for the larger operand of every puzzle (result, whole, minuend).
const LARGE_MIN: i32 = 6;
const LARGE_MAX: i32 = 20;

/// Inclusive range for the base of a "more than" question.
const MORE_BASE_MIN: i32 = 1;
const MORE_BASE_MAX: i32 = 15;

/// Inclusive range for the difference in more-or-less questions.
const DIFF_MIN: i32 = 1;
const DIFF_MAX: i32 = 5;

/// Produces puzzles from a random source.
#[derive(Debug, Clone)]
pub struct PuzzleGenerator<R = StdRng> {
    rng: R,
}

impl PuzzleGenerator<StdRng> {
    /// A generator seeded from operating-system randomness.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A deterministic generator for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PuzzleGenerator<StdRng> {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl<R: Rng> PuzzleGenerator<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one puzzle of the given type.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError` only if a drawn value falls outside its range,
    /// which the bounds below rule out.
    pub fn generate(&mut self, game_type: GameType) -> Result<Puzzle, PuzzleError> {
        match game_type {
            GameType::MissingNumber => self.missing_number(),
            GameType::MoreOrLess => self.more_or_less(),
            GameType::PartWhole => self.part_whole(),
        }
    }

    /// Generate a puzzle from a wire-format game type name.
    ///
    /// # Errors
    ///
    /// Returns `Error::GameType` for an unrecognized name.
    pub fn generate_named(&mut self, game_type: &str) -> Result<Puzzle, Error> {
        let game_type: GameType = game_type.parse()?;
        Ok(self.generate(game_type)?)
    }

    fn missing_number(&mut self) -> Result<Puzzle, PuzzleError> {
        if self.rng.random_bool(0.5) {
            let result = self.rng.random_range(LARGE_MIN..=LARGE_MAX);
            let num1 = self.rng.random_range(1..result);
            Puzzle::missing_number(num1, Operator::Add, result)
        } else {
            let num1 = self.rng.random_range(LARGE_MIN..=LARGE_MAX);
            let answer = self.rng.random_range(0..num1);
            Puzzle::missing_number(num1, Operator::Subtract, num1 - answer)
        }
    }

    fn more_or_less(&mut self) -> Result<Puzzle, PuzzleError> {
        let phrasing = Phrasing::ALL[self.rng.random_range(0..Phrasing::ALL.len())];
        let difference = self.rng.random_range(DIFF_MIN..=DIFF_MAX);
        let value = match phrasing {
            Phrasing::MoreThan => self.rng.random_range(MORE_BASE_MIN..=MORE_BASE_MAX),
            Phrasing::LessThan | Phrasing::IsMoreThan => {
                self.rng.random_range(LARGE_MIN..=LARGE_MAX)
            }
        };
        Puzzle::more_or_less(phrasing, value, difference)
    }

    fn part_whole(&mut self) -> Result<Puzzle, PuzzleError> {
        let whole = self.rng.random_range(LARGE_MIN..=LARGE_MAX);
        let part1 = self.rng.random_range(1..whole);
        let hidden = PartWholeSlot::ALL[self.rng.random_range(0..PartWholeSlot::ALL.len())];
        Puzzle::part_whole(whole, part1, whole - part1, hidden)
    }
}
