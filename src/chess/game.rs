//! A game of chess between two players sharing one board: the position, the
//! moves played so far and the rules enforcement policy.

use log::debug;

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{Move, MoveList, Square};
use crate::chess::error::Error;
use crate::chess::position::{GameStatus, MoveOutcome, Position};

/// Tunes how strictly [`Game`] treats its callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Re-check that the piece belongs to the player to move and that the
    /// destination is legal before applying a move. When disabled, callers are
    /// trusted to only pass destinations from [`Game::legal_moves`].
    pub validate_moves: bool,
    /// Keep the list of played moves.
    pub record_history: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            validate_moves: false,
            record_history: true,
        }
    }
}

/// Owns the position and drives it move by move until checkmate or
/// stalemate.
///
/// ```
/// use hotseat::chess::core::Square;
/// use hotseat::chess::game::{Game, GameConfig};
/// use hotseat::chess::position::GameStatus;
///
/// let mut game = Game::new(GameConfig::default());
/// let square = |name| Square::try_from(name).unwrap();
/// for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
///     let _ = game.play(square(from), square(to)).unwrap();
/// }
/// assert!(matches!(game.status(), GameStatus::Checkmate { .. }));
/// assert_eq!(game.history().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    config: GameConfig,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Starts a new game from the standard initial layout.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(Position::starting(), config)
    }

    /// Continues a game from an arbitrary position.
    #[must_use]
    pub fn from_position(position: Position, config: GameConfig) -> Self {
        let status = position.status();
        Self {
            position,
            config,
            status,
            history: Vec::new(),
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn config(&self) -> GameConfig {
        self.config
    }

    /// Status after the last played move.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Moves played so far, empty unless [`GameConfig::record_history`] is
    /// set.
    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Legal destinations of the piece on `square`.
    #[must_use]
    pub fn legal_moves(&self, square: Square) -> Bitboard {
        self.position.legal_moves(square)
    }

    /// Every legal move of the player to move.
    #[must_use]
    pub fn all_legal_moves(&self) -> MoveList {
        self.position.generate_moves()
    }

    /// Moves the piece on `from` to `to` and passes the turn.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] once the game has ended.
    /// - [`Error::EmptySourceSquare`] if there is no piece on `from`.
    /// - With [`GameConfig::validate_moves`]: [`Error::WrongSide`] if the piece
    ///   belongs to the player who is not to move and [`Error::IllegalMove`] if
    ///   `to` is not a legal destination.
    ///
    /// The game is not modified when an error is returned.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, Error> {
        if self.status.is_over() {
            return Err(Error::GameOver);
        }
        if self.config.validate_moves {
            self.validate(from, to)?;
        }
        let outcome = self.position.apply_move(from, to)?;
        self.status = outcome.status;
        if self.config.record_history {
            self.history.push(outcome.played);
        }
        if self.status.is_over() {
            debug!("game over after {} moves: {}", self.history.len(), self.status);
        }
        Ok(outcome)
    }

    /// Same as [`Game::play`] for a [`Move`].
    ///
    /// # Errors
    ///
    /// See [`Game::play`].
    pub fn make_move(&mut self, next_move: Move) -> Result<MoveOutcome, Error> {
        self.play(next_move.from, next_move.to)
    }

    fn validate(&self, from: Square, to: Square) -> Result<(), Error> {
        let Some(piece) = self.position.piece_at(from) else {
            return Err(Error::EmptySourceSquare(from));
        };
        let expected = self.position.side_to_move();
        if piece.color != expected {
            return Err(Error::WrongSide {
                square: from,
                expected,
            });
        }
        if !self.position.legal_moves(from).contains(to) {
            return Err(Error::IllegalMove { from, to });
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
