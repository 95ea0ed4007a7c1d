//! Errors produced by the rules engine.
//!
//! Parsing (FEN, algebraic notation, coordinate moves) reports
//! [`anyhow::Error`] with context instead: callers only ever print those.

use thiserror::Error;

use crate::chess::core::{Color, Square};

/// Failures of board queries and move application. A failed call never
/// changes the position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Source square of a move does not hold a piece.
    #[error("no piece on {0}")]
    EmptySourceSquare(Square),
    /// Coordinates outside of `0..8`.
    #[error("square ({rank}, {file}) is off the board")]
    OutOfBounds {
        #[allow(missing_docs)]
        rank: u8,
        #[allow(missing_docs)]
        file: u8,
    },
    /// Destination is not among the legal moves of the piece.
    #[error("illegal move {from}{to}")]
    IllegalMove {
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// The piece on the source square belongs to the player who is not to
    /// move.
    #[error("piece on {square} does not belong to {expected:?}")]
    WrongSide {
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        expected: Color,
    },
    /// The game has already ended in checkmate or stalemate.
    #[error("game is over")]
    GameOver,
}
