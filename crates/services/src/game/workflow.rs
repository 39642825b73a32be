use std::sync::Arc;

use math_core::model::GameType;
use math_core::{Clock, PuzzleGenerator};
use storage::AttemptRepository;

use crate::error::GameError;
use crate::game::GameController;

/// Builds game controllers wired to the attempt backend.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    attempts: Arc<dyn AttemptRepository>,
    seed: Option<u64>,
}

impl GameLoopService {
    #[must_use]
    pub fn new(clock: Clock, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self {
            clock,
            attempts,
            seed: None,
        }
    }

    /// Use a deterministic puzzle sequence (tests, demos).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A controller with no game running yet.
    #[must_use]
    pub fn controller(&self) -> GameController {
        let generator = self
            .seed
            .map_or_else(PuzzleGenerator::from_os_rng, PuzzleGenerator::seeded);
        GameController::new(self.clock, generator, Arc::clone(&self.attempts))
    }

    /// A controller with a game of `game_type` already started.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the first puzzle cannot be generated.
    pub fn start_game(&self, game_type: GameType) -> Result<GameController, GameError> {
        let mut controller = self.controller();
        controller.start_game(game_type)?;
        Ok(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_core::time::fixed_clock;
    use storage::InMemoryRepository;

    #[test]
    fn seeded_loops_repeat_their_puzzles() {
        let service =
            GameLoopService::new(fixed_clock(), Arc::new(InMemoryRepository::new())).with_seed(8);
        let first = service.start_game(GameType::PartWhole).unwrap();
        let second = service.start_game(GameType::PartWhole).unwrap();
        assert_eq!(first.puzzle(), second.puzzle());
    }
}
