//! Square-centric ("mailbox") board: every square either holds a [`Piece`] or
//! is empty. Looking up the piece on a square is a single array access, which
//! is what move generation for a two-player GUI game needs most often.

use std::fmt::{self, Write};
use std::mem;

use crate::chess::core::{Color, Piece, PieceKind, Square, BOARD_SIZE, BOARD_WIDTH};

/// 8×8 grid of squares stored in row-major order (a8, b8, ..., h1).
///
/// The board does not enforce chess invariants (one king per side, no pawns on
/// the backranks): [`crate::chess::position::Position`] does.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Standard layout of pieces before the first move. White pieces occupy
    /// ranks 6 and 7, black pieces occupy ranks 0 and 1.
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in (0..BOARD_WIDTH).zip(BACKRANK) {
                board.set(
                    square(color.backrank(), file),
                    Some(Piece::new(color, kind)),
                );
                board.set(
                    square(color.pawns_starting_rank(), file),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Returns the piece standing on the square.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Returns true if there is no piece on the square.
    #[must_use]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.at(square).is_none()
    }

    /// Overwrites the contents of the square.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    /// Overwrites the contents of the square and returns what stood there.
    pub fn replace(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        mem::replace(&mut self.squares[square.index()], piece)
    }

    /// Empties the square and returns what stood there.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Iterates over occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    /// Iterates over squares occupied by pieces of given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Locates the king of given color by scanning the board. Positions cache
    /// the result, this is used to establish the cache.
    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(color, PieceKind::King))
            .map(|(square, _)| square)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

// Coordinates produced by iterating over `0..BOARD_WIDTH` are always valid.
const fn square(rank: u8, file: u8) -> Square {
    Square::from_index(rank * BOARD_WIDTH + file)
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_WIDTH {
            let mut empty_squares = 0u8;
            for file in 0..BOARD_WIDTH {
                if let Some(piece) = self.at(square(rank, file)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != BOARD_WIDTH - 1 {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_WIDTH {
            for file in 0..BOARD_WIDTH {
                match self.at(square(rank, file)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != BOARD_WIDTH - 1 {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if rank != BOARD_WIDTH - 1 {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
