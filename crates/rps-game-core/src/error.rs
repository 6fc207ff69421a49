//! Error types for the game core.

use thiserror::Error;

/// Textual input that does not name one of the three moves
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Invalid move: {0:?} (expected rock, paper or scissors)")]
pub struct InvalidMoveError(pub String);

/// Errors surfaced by the game core
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),
}
