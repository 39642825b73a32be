use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use math_core::model::{GameType, NewAttempt, Puzzle, Scoreboard};
use math_core::{Clock, PuzzleGenerator};
use storage::AttemptRepository;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::GameError;
use crate::timer::AttemptTimer;

/// How long answer feedback stays on screen before the game moves on.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

//
// ─── PHASES AND OUTCOMES ──────────────────────────────────────────────────────
//

/// Where the controller is in the play loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No game running (game selection, stats, or logged out).
    Idle,
    /// A puzzle is on screen and the timer runs.
    Playing,
    /// Correct answer shown; the next puzzle follows the feedback delay.
    Advancing,
    /// Wrong answer shown; the same puzzle is retried after the feedback delay.
    Retrying,
}

/// Handle to the detached save of one attempt.
///
/// Dropping it leaves the save running in the background.
#[derive(Debug, Default)]
pub struct AttemptDispatch(Option<JoinHandle<()>>);

impl AttemptDispatch {
    /// Wait for the save to finish. Save failures are logged, never returned.
    pub async fn settled(self) {
        if let Some(handle) = self.0 {
            if let Err(err) = handle.await {
                log::warn!("attempt save task did not finish: {err}");
            }
        }
    }

    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        self.0.is_some()
    }
}

/// Result of checking one submitted answer.
#[derive(Debug)]
pub struct CheckedAnswer {
    pub correct: bool,
    pub elapsed_secs: f64,
    pub scoreboard: Scoreboard,
    pub save: AttemptDispatch,
}

impl CheckedAnswer {
    /// Feedback line shown under the answer box.
    #[must_use]
    pub fn message(&self) -> String {
        if self.correct {
            format!("Awesome! You got it in {:.1}s!", self.elapsed_secs)
        } else {
            "Oops! Try again!".to_string()
        }
    }
}

//
// ─── CONTROLLER ───────────────────────────────────────────────────────────────
//

/// Session state for one player at the game screen.
///
/// Owns the current puzzle, the scoreboard, and the attempt timer. Attempts
/// are saved on detached tasks so a slow or failing backend never holds up
/// scoring.
pub struct GameController {
    game_type: Option<GameType>,
    scoreboard: Scoreboard,
    puzzle: Option<Puzzle>,
    phase: GamePhase,
    timer: AttemptTimer,
    generator: PuzzleGenerator,
    attempts: Arc<dyn AttemptRepository>,
}

impl GameController {
    #[must_use]
    pub fn new(
        clock: Clock,
        generator: PuzzleGenerator,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            game_type: None,
            scoreboard: Scoreboard::new(),
            puzzle: None,
            phase: GamePhase::Idle,
            timer: AttemptTimer::new(clock),
            generator,
            attempts,
        }
    }

    #[must_use]
    pub fn game_type(&self) -> Option<GameType> {
        self.game_type
    }

    #[must_use]
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    #[must_use]
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Seconds spent on the current puzzle attempt.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.timer.elapsed()
    }

    /// Receiver for the 100 ms elapsed-time display updates.
    #[must_use]
    pub fn timer_display(&self) -> watch::Receiver<f64> {
        self.timer.subscribe()
    }

    /// Begin a fresh game: zero the scoreboard, show the first puzzle, start timing.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Puzzle` if puzzle generation fails.
    pub fn start_game(&mut self, game_type: GameType) -> Result<(), GameError> {
        log::info!("starting {game_type} game");
        self.scoreboard.reset();
        self.game_type = Some(game_type);
        self.next_puzzle(game_type)
    }

    /// [`Self::start_game`] from a wire-format game type name.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameType` for an unknown name; the current game is left untouched.
    pub fn start_game_named(&mut self, game_type: &str) -> Result<(), GameError> {
        let game_type: GameType = game_type.parse()?;
        self.start_game(game_type)
    }

    /// Check the player's input against the current puzzle.
    ///
    /// Returns `None`, changing nothing and saving nothing, when the input is
    /// not an integer, no puzzle is active, or feedback is still showing.
    pub fn check_answer(&mut self, input: &str) -> Option<CheckedAnswer> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let guess: i32 = input.trim().parse().ok()?;
        let (game_type, question, correct) = {
            let puzzle = self.puzzle.as_ref()?;
            (
                puzzle.kind(),
                puzzle.question_text().to_owned(),
                puzzle.is_correct(guess),
            )
        };

        self.timer.stop();
        let elapsed_secs = self.timer.elapsed();

        let save = self.dispatch_save(NewAttempt {
            game_type,
            question,
            time_taken_seconds: elapsed_secs,
            solved_correctly: correct,
        });

        if correct {
            self.scoreboard.record_correct();
            self.phase = GamePhase::Advancing;
        } else {
            self.scoreboard.record_miss();
            self.phase = GamePhase::Retrying;
        }

        Some(CheckedAnswer {
            correct,
            elapsed_secs,
            scoreboard: self.scoreboard,
            save,
        })
    }

    /// Finish the feedback pause: next puzzle after a hit, same puzzle after a miss.
    ///
    /// Returns the phase that was resolved, or `None` if no feedback was pending.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the next puzzle cannot be generated.
    pub fn continue_after_feedback(&mut self) -> Result<Option<GamePhase>, GameError> {
        match self.phase {
            GamePhase::Advancing => {
                let game_type = self.game_type.ok_or(GameError::NotStarted)?;
                self.next_puzzle(game_type)?;
                Ok(Some(GamePhase::Advancing))
            }
            GamePhase::Retrying => {
                self.timer.start();
                self.phase = GamePhase::Playing;
                Ok(Some(GamePhase::Retrying))
            }
            GamePhase::Idle | GamePhase::Playing => Ok(None),
        }
    }

    /// Stop timing while the player looks elsewhere (e.g. the stats screen).
    pub fn pause(&mut self) {
        self.timer.stop();
        self.phase = GamePhase::Idle;
    }

    /// Come back to the running game with a new puzzle, keeping the scoreboard.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotStarted` if no game type was ever chosen.
    pub fn resume(&mut self) -> Result<(), GameError> {
        let game_type = self.game_type.ok_or(GameError::NotStarted)?;
        self.next_puzzle(game_type)
    }

    /// Leave the game (back to selection or logout): stop timing and drop the puzzle.
    pub fn end(&mut self) {
        self.timer.stop();
        self.puzzle = None;
        self.phase = GamePhase::Idle;
        if let Some(game_type) = self.game_type.take() {
            log::info!(
                "ended {game_type} game: score {} solved {}",
                self.scoreboard.score(),
                self.scoreboard.solved()
            );
        }
    }

    fn next_puzzle(&mut self, game_type: GameType) -> Result<(), GameError> {
        let puzzle = self.generator.generate(game_type)?;
        log::debug!("new puzzle: {}", puzzle.question_text());
        self.puzzle = Some(puzzle);
        self.phase = GamePhase::Playing;
        self.timer.start();
        Ok(())
    }

    fn dispatch_save(&self, attempt: NewAttempt) -> AttemptDispatch {
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("no async runtime; attempt not saved: {}", attempt.question);
            return AttemptDispatch::default();
        };
        let attempts = Arc::clone(&self.attempts);
        AttemptDispatch(Some(runtime.spawn(async move {
            if let Err(err) = attempts.save_attempt(&attempt).await {
                log::warn!("failed to save attempt {:?}: {err}", attempt.question);
            }
        })))
    }

    #[cfg(test)]
    pub(crate) fn set_puzzle(&mut self, puzzle: Puzzle) {
        self.game_type = Some(puzzle.kind());
        self.puzzle = Some(puzzle);
        self.phase = GamePhase::Playing;
        self.timer.start();
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("game_type", &self.game_type)
            .field("scoreboard", &self.scoreboard)
            .field("puzzle", &self.puzzle)
            .field("phase", &self.phase)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
