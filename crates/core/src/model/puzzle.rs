use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::GameType;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when assembling a puzzle from explicit field values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("answer would be negative ({0})")]
    NegativeAnswer(i32),

    #[error("parts {part1} + {part2} do not add up to {whole}")]
    PartsMismatch { whole: i32, part1: i32, part2: i32 },
}

//
// ─── DISPLAY PIECES ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

/// Wording used by a more-or-less question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phrasing {
    /// "What is 3 more than 9?"
    MoreThan,
    /// "What is 2 less than 14?"
    LessThan,
    /// "12 is 4 more than what number?"
    IsMoreThan,
}

impl Phrasing {
    pub const ALL: [Phrasing; 3] = [Phrasing::MoreThan, Phrasing::LessThan, Phrasing::IsMoreThan];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phrasing::MoreThan => "more_than",
            Phrasing::LessThan => "less_than",
            Phrasing::IsMoreThan => "is_more_than",
        }
    }
}

/// Which of the three part-whole values is concealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartWholeSlot {
    Whole,
    Part1,
    Part2,
}

impl PartWholeSlot {
    pub const ALL: [PartWholeSlot; 3] = [
        PartWholeSlot::Whole,
        PartWholeSlot::Part1,
        PartWholeSlot::Part2,
    ];
}

/// How the presentation layer should lay a puzzle out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    Text,
    Diagram,
}

/// One value slot of a part-whole diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramCell {
    Value(i32),
    Hidden,
}

impl DiagramCell {
    #[must_use]
    pub fn is_hidden(self) -> bool {
        matches!(self, DiagramCell::Hidden)
    }
}

impl fmt::Display for DiagramCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramCell::Value(value) => write!(f, "{value}"),
            DiagramCell::Hidden => f.write_str("?"),
        }
    }
}

/// Top (whole) and bottom (parts) values of a part-whole diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartWholeDiagram {
    pub top: DiagramCell,
    pub left: DiagramCell,
    pub right: DiagramCell,
}

//
// ─── PUZZLE ───────────────────────────────────────────────────────────────────
//

/// Variant-specific fields of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleShape {
    MissingNumber {
        num1: i32,
        op: Operator,
        result: i32,
    },
    MoreOrLess {
        phrasing: Phrasing,
        /// The base value for `MoreThan`/`LessThan`, the result for `IsMoreThan`.
        value: i32,
        difference: i32,
    },
    PartWhole {
        whole: i32,
        part1: i32,
        part2: i32,
        hidden: PartWholeSlot,
    },
}

/// A single arithmetic question with its expected answer.
///
/// Puzzles are immutable: the answer is derived from the shape when the
/// puzzle is built, and a new puzzle replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    shape: PuzzleShape,
    answer: i32,
    question_text: String,
}

impl Puzzle {
    /// `num1 op ? = result`.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::NegativeAnswer` when no non-negative value fills the gap.
    pub fn missing_number(num1: i32, op: Operator, result: i32) -> Result<Self, PuzzleError> {
        let answer = match op {
            Operator::Add => result - num1,
            Operator::Subtract => num1 - result,
        };
        if answer < 0 {
            return Err(PuzzleError::NegativeAnswer(answer));
        }
        Ok(Self {
            shape: PuzzleShape::MissingNumber { num1, op, result },
            answer,
            question_text: format!("{num1} {} ? = {result}", op.symbol()),
        })
    }

    /// A worded more-or-less question.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::NegativeAnswer` when the difference exceeds the value
    /// for the subtracting phrasings.
    pub fn more_or_less(
        phrasing: Phrasing,
        value: i32,
        difference: i32,
    ) -> Result<Self, PuzzleError> {
        let (answer, question_text) = match phrasing {
            Phrasing::MoreThan => (
                value + difference,
                format!("What is {difference} more than {value}?"),
            ),
            Phrasing::LessThan => (
                value - difference,
                format!("What is {difference} less than {value}?"),
            ),
            Phrasing::IsMoreThan => (
                value - difference,
                format!("{value} is {difference} more than what number?"),
            ),
        };
        if answer < 0 {
            return Err(PuzzleError::NegativeAnswer(answer));
        }
        Ok(Self {
            shape: PuzzleShape::MoreOrLess {
                phrasing,
                value,
                difference,
            },
            answer,
            question_text,
        })
    }

    /// `whole = part1 + part2` with one slot concealed.
    ///
    /// # Errors
    ///
    /// Returns `PuzzleError::PartsMismatch` if the parts do not sum to the whole.
    pub fn part_whole(
        whole: i32,
        part1: i32,
        part2: i32,
        hidden: PartWholeSlot,
    ) -> Result<Self, PuzzleError> {
        if part1 + part2 != whole {
            return Err(PuzzleError::PartsMismatch {
                whole,
                part1,
                part2,
            });
        }
        let answer = match hidden {
            PartWholeSlot::Whole => whole,
            PartWholeSlot::Part1 => part1,
            PartWholeSlot::Part2 => part2,
        };
        let mut puzzle = Self {
            shape: PuzzleShape::PartWhole {
                whole,
                part1,
                part2,
                hidden,
            },
            answer,
            question_text: String::new(),
        };
        if let Some(diagram) = puzzle.diagram() {
            puzzle.question_text = format!(
                "{} = {} + {}",
                diagram.top, diagram.left, diagram.right
            );
        }
        Ok(puzzle)
    }

    #[must_use]
    pub fn kind(&self) -> GameType {
        match self.shape {
            PuzzleShape::MissingNumber { .. } => GameType::MissingNumber,
            PuzzleShape::MoreOrLess { .. } => GameType::MoreOrLess,
            PuzzleShape::PartWhole { .. } => GameType::PartWhole,
        }
    }

    #[must_use]
    pub fn shape(&self) -> &PuzzleShape {
        &self.shape
    }

    #[must_use]
    pub fn answer(&self) -> i32 {
        self.answer
    }

    /// Text persisted with each attempt and shown for text-rendered puzzles.
    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn render_hint(&self) -> RenderHint {
        match self.shape {
            PuzzleShape::PartWhole { .. } => RenderHint::Diagram,
            PuzzleShape::MissingNumber { .. } | PuzzleShape::MoreOrLess { .. } => RenderHint::Text,
        }
    }

    /// Diagram slots for part-whole puzzles; `None` for the other variants.
    #[must_use]
    pub fn diagram(&self) -> Option<PartWholeDiagram> {
        let PuzzleShape::PartWhole {
            whole,
            part1,
            part2,
            hidden,
        } = self.shape
        else {
            return None;
        };
        let cell = |slot: PartWholeSlot, value: i32| {
            if slot == hidden {
                DiagramCell::Hidden
            } else {
                DiagramCell::Value(value)
            }
        };
        Some(PartWholeDiagram {
            top: cell(PartWholeSlot::Whole, whole),
            left: cell(PartWholeSlot::Part1, part1),
            right: cell(PartWholeSlot::Part2, part2),
        })
    }

    #[must_use]
    pub fn is_correct(&self, guess: i32) -> bool {
        guess == self.answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_number_addition_derives_gap() {
        let puzzle = Puzzle::missing_number(7, Operator::Add, 12).unwrap();
        assert_eq!(puzzle.answer(), 5);
        assert_eq!(puzzle.question_text(), "7 + ? = 12");
        assert_eq!(puzzle.kind(), GameType::MissingNumber);
        assert_eq!(puzzle.render_hint(), RenderHint::Text);
    }

    #[test]
    fn missing_number_subtraction_derives_gap() {
        let puzzle = Puzzle::missing_number(15, Operator::Subtract, 9).unwrap();
        assert_eq!(puzzle.answer(), 6);
        assert_eq!(puzzle.question_text(), "15 - ? = 9");
    }

    #[test]
    fn missing_number_rejects_impossible_gap() {
        let err = Puzzle::missing_number(15, Operator::Add, 9).unwrap_err();
        assert_eq!(err, PuzzleError::NegativeAnswer(-6));
    }

    #[test]
    fn more_or_less_templates() {
        let more = Puzzle::more_or_less(Phrasing::MoreThan, 9, 3).unwrap();
        assert_eq!(more.answer(), 12);
        assert_eq!(more.question_text(), "What is 3 more than 9?");

        let less = Puzzle::more_or_less(Phrasing::LessThan, 14, 2).unwrap();
        assert_eq!(less.answer(), 12);
        assert_eq!(less.question_text(), "What is 2 less than 14?");

        let reverse = Puzzle::more_or_less(Phrasing::IsMoreThan, 12, 4).unwrap();
        assert_eq!(reverse.answer(), 8);
        assert_eq!(reverse.question_text(), "12 is 4 more than what number?");
        assert!(reverse.diagram().is_none());
    }

    #[test]
    fn part_whole_hides_exactly_one_slot() {
        let puzzle = Puzzle::part_whole(10, 4, 6, PartWholeSlot::Part1).unwrap();
        let diagram = puzzle.diagram().unwrap();
        assert_eq!(diagram.top, DiagramCell::Value(10));
        assert_eq!(diagram.left, DiagramCell::Hidden);
        assert_eq!(diagram.right, DiagramCell::Value(6));
        assert_eq!(diagram.left.to_string(), "?");
        assert_eq!(puzzle.answer(), 4);
        assert_eq!(puzzle.question_text(), "10 = ? + 6");
        assert_eq!(puzzle.render_hint(), RenderHint::Diagram);
        assert!(puzzle.is_correct(4));
        assert!(!puzzle.is_correct(6));
    }

    #[test]
    fn part_whole_rejects_mismatched_parts() {
        let err = Puzzle::part_whole(10, 4, 5, PartWholeSlot::Whole).unwrap_err();
        assert!(matches!(err, PuzzleError::PartsMismatch { whole: 10, .. }));
    }
}
