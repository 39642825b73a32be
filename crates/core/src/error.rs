use thiserror::Error;

use crate::model::{GameTypeError, PuzzleError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    GameType(#[from] GameTypeError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
