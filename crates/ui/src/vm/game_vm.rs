use math_core::model::{DiagramCell, GameType, Puzzle, RenderHint};
use rand::Rng;
use rand::seq::IndexedRandom;
use services::{CheckedAnswer, GameController, GameError, GamePhase};

pub const MONSTERS: [&str; 7] = ["👾", "👽", "🛸", "🤖", "👹", "🦖", "🐲"];
pub const ALIENS: [&str; 6] = ["👽", "🛸", "🌟", "⭐", "✨", "💫"];

/// Decorative pair shown above each puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mascots {
    pub monster: &'static str,
    pub alien: &'static str,
}

impl Default for Mascots {
    fn default() -> Self {
        Self {
            monster: MONSTERS[0],
            alien: ALIENS[0],
        }
    }
}

impl Mascots {
    #[must_use]
    pub fn random() -> Self {
        Self::pick(&mut rand::rng())
    }

    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let fallback = Self::default();
        Self {
            monster: MONSTERS.choose(rng).copied().unwrap_or(fallback.monster),
            alien: ALIENS.choose(rng).copied().unwrap_or(fallback.alien),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramCellVm {
    pub text: String,
    pub hidden: bool,
}

impl From<DiagramCell> for DiagramCellVm {
    fn from(cell: DiagramCell) -> Self {
        Self {
            text: cell.to_string(),
            hidden: matches!(cell, DiagramCell::Hidden),
        }
    }
}

/// How the current puzzle is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PuzzleVm {
    Equation(String),
    Diagram {
        top: DiagramCellVm,
        left: DiagramCellVm,
        right: DiagramCellVm,
    },
}

impl PuzzleVm {
    #[must_use]
    pub fn from_puzzle(puzzle: &Puzzle) -> Self {
        match (puzzle.render_hint(), puzzle.diagram()) {
            (RenderHint::Diagram, Some(diagram)) => Self::Diagram {
                top: diagram.top.into(),
                left: diagram.left.into(),
                right: diagram.right.into(),
            },
            _ => Self::Equation(puzzle.question_text().to_owned()),
        }
    }
}

/// Snapshot of the game screen taken after every controller transition.
#[derive(Clone, Debug, PartialEq)]
pub struct GameBoardVm {
    pub title: &'static str,
    pub score: u32,
    pub streak: u32,
    pub solved: u32,
    pub puzzle: Option<PuzzleVm>,
    pub accepting_answers: bool,
}

impl GameBoardVm {
    #[must_use]
    pub fn from_controller(game: &GameController) -> Self {
        let scoreboard = game.scoreboard();
        Self {
            title: game.game_type().map_or("Monster Math", GameType::title),
            score: scoreboard.score(),
            streak: scoreboard.streak(),
            solved: scoreboard.solved(),
            puzzle: game.puzzle().map(PuzzleVm::from_puzzle),
            accepting_answers: game.phase() == GamePhase::Playing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub message: String,
    pub correct: bool,
}

impl FeedbackVm {
    #[must_use]
    pub fn from_checked(checked: &CheckedAnswer) -> Self {
        let icon = if checked.correct { "🎉" } else { "😅" };
        Self {
            message: format!("{icon} {}", checked.message()),
            correct: checked.correct,
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct { "success" } else { "error" }
    }
}

#[must_use]
pub fn game_blurb(game_type: GameType) -> &'static str {
    match game_type {
        GameType::MissingNumber => "Find the hidden number: 7 + ? = 12",
        GameType::MoreOrLess => "Count on and back: What is 3 more than 9?",
        GameType::PartWhole => "Split a number into two parts",
    }
}

/// Bring the controller to the game named in the route.
///
/// Re-entering the paused game keeps the scoreboard and deals a fresh
/// puzzle; any other game starts from zero.
///
/// # Errors
///
/// Returns `GameError::GameType` for an unknown name.
pub fn enter_game(game: &mut GameController, requested: &str) -> Result<(), GameError> {
    let game_type: GameType = requested.parse()?;
    match (game.game_type(), game.phase()) {
        (Some(current), GamePhase::Idle) if current == game_type => game.resume(),
        (Some(current), _) if current == game_type => Ok(()),
        _ => game.start_game(game_type),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use math_core::model::{Operator, PartWholeSlot};
    use math_core::time::fixed_clock;
    use math_core::PuzzleGenerator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::InMemoryRepository;

    use super::*;

    fn controller() -> GameController {
        GameController::new(
            fixed_clock(),
            PuzzleGenerator::seeded(3),
            Arc::new(InMemoryRepository::new()),
        )
    }

    #[test]
    fn mascots_come_from_the_pools() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let mascots = Mascots::pick(&mut rng);
            assert!(MONSTERS.contains(&mascots.monster));
            assert!(ALIENS.contains(&mascots.alien));
        }
    }

    #[test]
    fn part_whole_puzzles_draw_as_diagram() {
        let puzzle = Puzzle::part_whole(10, 4, 6, PartWholeSlot::Part1).unwrap();
        let PuzzleVm::Diagram { top, left, right } = PuzzleVm::from_puzzle(&puzzle) else {
            panic!("expected diagram");
        };
        assert_eq!(top.text, "10");
        assert_eq!(left.text, "?");
        assert!(left.hidden);
        assert_eq!(right.text, "6");
        assert!(!right.hidden);
    }

    #[test]
    fn equations_draw_as_text() {
        let puzzle = Puzzle::missing_number(7, Operator::Add, 12).unwrap();
        assert_eq!(
            PuzzleVm::from_puzzle(&puzzle),
            PuzzleVm::Equation(puzzle.question_text().to_owned())
        );
    }

    #[test]
    fn board_tracks_controller_state() {
        let mut game = controller();
        let idle = GameBoardVm::from_controller(&game);
        assert!(idle.puzzle.is_none());
        assert!(!idle.accepting_answers);

        game.start_game(GameType::MoreOrLess).unwrap();
        let board = GameBoardVm::from_controller(&game);
        assert_eq!(board.title, "More or Less");
        assert_eq!((board.score, board.streak, board.solved), (0, 0, 0));
        assert!(board.accepting_answers);
        assert!(matches!(board.puzzle, Some(PuzzleVm::Equation(_))));
    }

    #[test]
    fn entering_the_paused_game_keeps_the_score() {
        let mut game = controller();
        enter_game(&mut game, "missing_number").unwrap();
        let answer = game.puzzle().unwrap().answer().to_string();
        game.check_answer(&answer).unwrap();
        game.pause();

        enter_game(&mut game, "missing_number").unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.scoreboard().score(), 10);

        enter_game(&mut game, "part_whole").unwrap();
        assert_eq!(game.game_type(), Some(GameType::PartWhole));
        assert_eq!(game.scoreboard().score(), 0);
    }

    #[test]
    fn entering_an_unknown_game_fails() {
        let mut game = controller();
        let err = enter_game(&mut game, "long_division").unwrap_err();
        assert!(matches!(err, GameError::GameType(_)));
        assert_eq!(game.game_type(), None);
    }

    #[test]
    fn blurbs_cover_every_game() {
        for game_type in GameType::ALL {
            assert!(!game_blurb(game_type).is_empty());
        }
    }
}
