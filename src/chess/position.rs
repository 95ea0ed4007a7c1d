//! Provides fully-specified [Chess Position] implementation: stores the board,
//! the player to move, castling rights and the en passant target.
//!
//! Legality filtering, move application with all the special-move side effects
//! and terminal-state detection are implemented here as the only ways of
//! querying and mutating a [`Position`].
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;
use std::num::NonZeroU16;

use anyhow::{bail, Context};
use log::{debug, trace};

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{
    CastleRights,
    CastlingSide,
    Color,
    Move,
    MoveFlags,
    MoveList,
    Piece,
    PieceKind,
    Square,
    BOARD_WIDTH,
};
use crate::chess::error::Error;
use crate::chess::movegen;

/// Result of the game from the perspective of the player to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The player to move has at least one legal move.
    InProgress,
    /// The player to move is in check and has no legal moves.
    Checkmate {
        #[allow(missing_docs)]
        winner: Color,
    },
    /// The player to move is not in check and has no legal moves.
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate and stalemate.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("in progress"),
            Self::Checkmate { winner } => write!(f, "checkmate, {winner:?} wins"),
            Self::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Everything the caller needs to know about an applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move as requested.
    pub played: Move,
    /// The piece as it stood on the source square before the move.
    pub piece: Piece,
    /// Captured piece, including the pawn taken en passant.
    pub captured: Option<Piece>,
    #[allow(missing_docs)]
    pub flags: MoveFlags,
    /// Status of the game for the player who moves next.
    pub status: GameStatus,
}

/// State of the chess game: board, player to move, castling rights, en passant
/// target and the move counters.
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`] from [Forsyth-Edwards Notation] (FEN). It will clean up the
/// input (trim newlines and whitespace) and also accept trimmed FEN without
/// the move counters, as found in [Extended Position Description] (EPD)
/// databases.
///
/// FEN denotes the en passant square as the square the pawn skipped over.
/// Internally the en passant target is the square of the pawn that has just
/// made a double step: that is the pawn which gets captured.
///
/// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
/// [Extended Position Description]: https://www.chessprogramming.org/Extended_Position_Description
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    /// King squares indexed by [`Color`]. Kept in sync with the board by every
    /// mutation, including the check-safety simulation.
    kings: [Square; 2],
    last_moved: Option<Square>,
    /// [Halfmove Clock][^ply] keeps track of the number of (half-)moves
    /// since the last capture or pawn move. It is only reported, the
    /// fifty-move rule is not enforced.
    ///
    /// [Halfmove Clock]: https://www.chessprogramming.org/Halfmove_Clock
    /// [^ply]: "Half-move" or ["ply"](https://www.chessprogramming.org/Ply) means a move of only
    ///     one side.
    halfmove_clock: u8,
    fullmove_counter: NonZeroU16,
}

impl Position {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use hotseat::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let board = Board::starting();
        let kings = [
            Square::from_index(Color::White.backrank() * BOARD_WIDTH + 4),
            Square::from_index(Color::Black.backrank() * BOARD_WIDTH + 4),
        ];
        Self {
            board,
            side_to_move: Color::White,
            castling: CastleRights::all(),
            en_passant: None,
            kings,
            last_moved: None,
            halfmove_clock: 0,
            fullmove_counter: NonZeroU16::MIN,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Square of the pawn that has just made a double step.
    #[must_use]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Destination of the most recent move.
    #[must_use]
    pub const fn last_moved(&self) -> Option<Square> {
        self.last_moved
    }

    /// Cached square of the given player's king.
    #[must_use]
    pub const fn king(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn halfmove_clock(&self) -> u8 {
        self.halfmove_clock
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn fullmove_counter(&self) -> NonZeroU16 {
        self.fullmove_counter
    }

    /// Returns the piece standing on the square.
    #[must_use]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.at(square)
    }

    /// Movement geometry of the piece on `square`, ignoring king safety.
    /// Castling is included when the rights and the board geometry allow it,
    /// even if the king is attacked.
    #[must_use]
    pub fn pseudo_legal_moves(&self, square: Square) -> Bitboard {
        movegen::pseudo_legal_moves(&self.board, square, self.en_passant, self.castling)
    }

    /// Destinations of the piece on `square` that do not leave its own king in
    /// check. Returns an empty set for an empty square. Works for pieces of
    /// either color, regardless of whose turn it is.
    #[must_use]
    pub fn legal_moves(&self, square: Square) -> Bitboard {
        let mut scratch = self.clone();
        scratch.legal_moves_in_place(square)
    }

    /// All legal moves of the player to move.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut scratch = self.clone();
        let mut moves = MoveList::new();
        for from in self.occupancy(self.side_to_move) {
            for to in scratch.legal_moves_in_place(from) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    fn legal_moves_in_place(&mut self, from: Square) -> Bitboard {
        let Some(piece) = self.board.at(from) else {
            return Bitboard::empty();
        };
        let mut candidates = movegen::piece_moves(&self.board, from, piece, self.en_passant);
        if piece.kind == PieceKind::King {
            candidates |= self.castling_moves(from, piece);
        }
        candidates
            .iter()
            .filter(|&to| !self.leaves_king_in_check(from, to, piece))
            .collect()
    }

    /// The check-safety simulation with the pawn captured en passant lifted
    /// off the board for its duration: the capture may resolve a check by that
    /// pawn or expose the king along the rank.
    fn leaves_king_in_check(&mut self, from: Square, to: Square, piece: Piece) -> bool {
        let en_passant_victim = self.en_passant.filter(|_| {
            piece.kind == PieceKind::Pawn && from.file() != to.file() && self.board.is_empty(to)
        });
        let Some(victim) = en_passant_victim else {
            return self.would_be_in_check_after(from, to, piece.color);
        };
        let lifted = self.board.take(victim);
        let in_check = self.would_be_in_check_after(from, to, piece.color);
        self.board.set(victim, lifted);
        in_check
    }

    /// King destinations for castling that pass the safety checks: the king
    /// is not in check and neither of the two squares it walks through or lands
    /// on is attacked.
    fn castling_moves(&mut self, king: Square, piece: Piece) -> Bitboard {
        let candidates = movegen::castling_candidates(&self.board, king, piece, self.castling);
        if candidates.is_empty() || self.is_in_check(piece.color) {
            return Bitboard::empty();
        }
        let mut moves = Bitboard::empty();
        for side in candidates {
            let (_, step) = side.direction().delta();
            let safe = [step, 2 * step].into_iter().all(|files| {
                king.offset(0, files).is_some_and(|transit| {
                    !self.would_be_in_check_after(king, transit, piece.color)
                })
            });
            if safe {
                moves.insert(movegen::castle_destination(piece.color, side));
            }
        }
        moves
    }

    /// Relocates the piece on `from` to `to` without any special-move side
    /// effects, checks whether the king of `color` is attacked and restores the
    /// board and the king cache. Observably this is a pure query.
    pub fn would_be_in_check_after(&mut self, from: Square, to: Square, color: Color) -> bool {
        let Some(moving) = self.board.take(from) else {
            return self.is_in_check(color);
        };
        let captured = self.board.replace(to, Some(moving));
        let kings = self.kings;
        if moving.kind == PieceKind::King {
            self.kings[moving.color.index()] = to;
        }
        let in_check = self.is_in_check(color);
        self.board.set(to, captured);
        self.board.set(from, Some(moving));
        self.kings = kings;
        trace!("simulated {from}{to}: {color:?} in check = {in_check}");
        in_check
    }

    /// Returns true if any opposing piece can reach the king of `color` by its
    /// movement geometry.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        let king = self.king(color);
        self.occupancy(color.opposite())
            .iter()
            .any(|attacker| self.pseudo_legal_moves(attacker).contains(king))
    }

    /// Applies the move and passes the turn to the opponent.
    ///
    /// The destination is trusted to come from [`Position::legal_moves`]: no
    /// legality re-check is performed. [`crate::chess::game::Game`] can be
    /// configured to validate moves before they get here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySourceSquare`] if there is no piece on `from`. The
    /// position is not modified in that case.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, Error> {
        let Some(piece) = self.board.at(from) else {
            return Err(Error::EmptySourceSquare(from));
        };
        let mover = piece.color;
        let previous_en_passant = self.en_passant.take();
        let mut flags = MoveFlags::empty();
        let mut captured = self.board.at(to);
        if let Some(victim) = captured {
            flags |= MoveFlags::CAPTURE;
            if victim.kind == PieceKind::Rook {
                self.revoke_rook_right(victim.color, to);
            }
        }
        match piece.kind {
            PieceKind::King => {
                self.kings[mover.index()] = to;
                self.castling.remove(CastleRights::both(mover));
                if from.file().abs_diff(to.file()) == 2 {
                    self.relocate_castling_rook(from, to);
                    flags |= MoveFlags::CASTLE;
                }
            },
            PieceKind::Rook => self.revoke_rook_right(mover, from),
            PieceKind::Pawn => {
                if from.rank().abs_diff(to.rank()) == 2 {
                    self.en_passant = Some(to);
                    flags |= MoveFlags::DOUBLE_PAWN_PUSH;
                } else if from.file() != to.file() && captured.is_none() {
                    let victim = Square::from_index(from.rank() * BOARD_WIDTH + to.file());
                    if previous_en_passant == Some(victim) {
                        captured = self.board.take(victim);
                        flags |= MoveFlags::CAPTURE | MoveFlags::EN_PASSANT;
                        debug!("{from}{to} captures en passant on {victim}");
                    }
                }
                if to.rank() == mover.promotion_rank() {
                    self.board.set(from, None);
                    self.board.set(to, Some(Piece::new(mover, PieceKind::Queen)));
                    self.last_moved = Some(to);
                    debug!("{from}{to} promotes to queen");
                    return Ok(self.finish_move(
                        Move::new(from, to),
                        piece,
                        captured,
                        flags | MoveFlags::PROMOTION,
                    ));
                }
            },
            PieceKind::Queen | PieceKind::Bishop | PieceKind::Knight => (),
        }
        self.board.set(from, None);
        self.board.set(to, Some(piece.moved()));
        self.last_moved = Some(to);
        Ok(self.finish_move(Move::new(from, to), piece, captured, flags))
    }

    /// Same as [`Position::apply_move`] for a [`Move`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySourceSquare`] if there is no piece on the source
    /// square.
    pub fn make_move(&mut self, next_move: Move) -> Result<MoveOutcome, Error> {
        self.apply_move(next_move.from, next_move.to)
    }

    fn relocate_castling_rook(&mut self, from: Square, to: Square) {
        let side = if to.file() > from.file() {
            CastlingSide::Short
        } else {
            CastlingSide::Long
        };
        let rank = from.rank() * BOARD_WIDTH;
        let rook_from = Square::from_index(rank + side.rook_file());
        let rook_to = Square::from_index(rank + side.rook_destination_file());
        if let Some(rook) = self.board.take(rook_from) {
            self.board.set(rook_to, Some(rook.moved()));
            debug!("castling moves the rook {rook_from}{rook_to}");
        }
    }

    /// Rooks leaving or captured on their home square take the corresponding
    /// castling right with them.
    fn revoke_rook_right(&mut self, color: Color, square: Square) {
        if square.rank() != color.backrank() {
            return;
        }
        for side in CastlingSide::BOTH {
            if square.file() == side.rook_file() {
                self.castling.remove(CastleRights::side(color, side));
            }
        }
    }

    fn finish_move(
        &mut self,
        played: Move,
        piece: Piece,
        captured: Option<Piece>,
        mut flags: MoveFlags,
    ) -> MoveOutcome {
        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if piece.color == Color::Black {
            self.fullmove_counter = self.fullmove_counter.saturating_add(1);
        }
        self.side_to_move = piece.color.opposite();
        if self.is_in_check(self.side_to_move) {
            flags |= MoveFlags::CHECK;
        }
        let status = self.status();
        debug!("{:?} {piece} {played}: {flags:?}, {status}", piece.color);
        MoveOutcome {
            played,
            piece,
            captured,
            flags,
            status,
        }
    }

    /// Status of the game for the player to move.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let color = self.side_to_move;
        if self.has_any_legal_move(color) {
            GameStatus::InProgress
        } else if self.is_in_check(color) {
            GameStatus::Checkmate {
                winner: color.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// The king of `color` is attacked and no piece of `color` has a legal
    /// move.
    #[must_use]
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// The king of `color` is not attacked but no piece of `color` has a legal
    /// move.
    #[must_use]
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    fn has_any_legal_move(&self, color: Color) -> bool {
        let mut scratch = self.clone();
        self.occupancy(color)
            .iter()
            .any(|square| !scratch.legal_moves_in_place(square).is_empty())
    }

    fn occupancy(&self, color: Color) -> Bitboard {
        self.board.pieces_of(color).map(|(square, _)| square).collect()
    }

    /// Parses board from Forsyth-Edwards Notation. It will also accept trimmed
    /// FEN (EPD with 4 parts).
    ///
    /// FEN ::=
    ///       Piece Placement
    ///   ' ' Side to move
    ///   ' ' Castling ability
    ///   ' ' En passant target square
    ///   ' ' Halfmove clock
    ///   ' ' Fullmove counter
    ///
    /// The last two parts (together) are optional and will default to "0 1".
    ///
    /// FEN does not track whether a piece has moved: pawns outside of their
    /// starting rank are considered moved, as well as kings and rooks which
    /// are not covered by a castling right.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid FEN or describes a position
    /// that can not be reached: wrong number of kings, pawns on the backranks,
    /// castling rights without the king and rook on their home squares, an en
    /// passant square without the pawn that has just moved or the player who
    /// has just moved being in check.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split(' ');
        // Parse Piece Placement.
        let mut board = Board::empty();
        let Some(pieces_placement) = parts.next() else {
            bail!("incorrect FEN: missing pieces placement")
        };
        let mut rank: u8 = 0;
        for rank_fen in pieces_placement.split('/') {
            if rank == BOARD_WIDTH {
                bail!("incorrect FEN: expected 8 ranks, got {pieces_placement}");
            }
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file > BOARD_WIDTH {
                    bail!("file exceeded {BOARD_WIDTH}");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='9' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                let square = Square::new(rank, file)
                    .with_context(|| format!("incorrect FEN: rank {rank_fen} is too long"))?;
                board.set(square, Some(piece));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!("incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {file}");
            }
            rank += 1;
        }
        if rank != BOARD_WIDTH {
            bail!("incorrect FEN: there should be 8 ranks, got {pieces_placement}");
        }
        let side_to_move: Color = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        let castling: CastleRights = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing castling rights"),
        };
        let en_passant = match parts.next() {
            Some("-") => None,
            Some(value) => Some(Square::try_from(value)?),
            None => bail!("incorrect FEN: missing en passant square"),
        };
        let (halfmove_clock, fullmove_counter) = match parts.next() {
            // This is a correct EPD: use defaults.
            None => (0, NonZeroU16::MIN),
            Some(value) => {
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("halfmove clock can not contain anything other than digits");
                }
                let halfmove_clock = value.parse::<u8>().with_context(|| {
                    format!("incorrect FEN: halfmove clock can not be parsed {value}")
                })?;
                let Some(value) = parts.next() else {
                    bail!("incorrect FEN: missing fullmove counter")
                };
                if !value.bytes().all(|c| c.is_ascii_digit()) {
                    bail!("fullmove counter clock can not contain anything other than digits");
                }
                let fullmove_counter = value.parse::<NonZeroU16>().with_context(|| {
                    format!("incorrect FEN: fullmove counter can not be parsed {value}")
                })?;
                (halfmove_clock, fullmove_counter)
            },
        };
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        let kings = [
            find_single_king(&board, Color::White)?,
            find_single_king(&board, Color::Black)?,
        ];
        let mut result = Self {
            board,
            side_to_move,
            castling,
            en_passant: None,
            kings,
            last_moved: None,
            halfmove_clock,
            fullmove_counter,
        };
        if let Some(skipped) = en_passant {
            result.en_passant = Some(result.en_passant_target(skipped)?);
        }
        result.validate()?;
        result.mark_moved_pieces();
        Ok(result)
    }

    /// Converts the FEN en passant square (the one the pawn skipped) into the
    /// square of the pawn that made the double step.
    fn en_passant_target(&self, skipped: Square) -> anyhow::Result<Square> {
        let they = self.side_to_move.opposite();
        let Some(target) = skipped.shift(they.push_direction()) else {
            bail!("incorrect FEN: en passant square {skipped} is on the edge");
        };
        if target.rank() != self.side_to_move.en_passant_rank() {
            bail!("incorrect FEN: en passant square {skipped} is on the wrong rank");
        }
        if !self
            .board
            .at(target)
            .is_some_and(|pawn| pawn.is(they, PieceKind::Pawn))
        {
            bail!("incorrect FEN: no pawn that has just moved in front of en passant square {skipped}");
        }
        if !self.board.is_empty(skipped) {
            bail!("incorrect FEN: en passant square {skipped} is occupied");
        }
        Ok(target)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (square, piece) in self.board.pieces() {
            if piece.kind == PieceKind::Pawn
                && (square.rank() == Color::White.backrank()
                    || square.rank() == Color::Black.backrank())
            {
                bail!("pawns can not be placed on backranks, got {piece} on {square}");
            }
        }
        for color in [Color::White, Color::Black] {
            for side in CastlingSide::BOTH {
                let right = CastleRights::side(color, side);
                if !self.castling.contains(right) {
                    continue;
                }
                let rank = color.backrank() * BOARD_WIDTH;
                let king = Square::from_index(rank + 4);
                let rook = Square::from_index(rank + side.rook_file());
                let in_place = self.king(color) == king
                    && self
                        .board
                        .at(rook)
                        .is_some_and(|piece| piece.is(color, PieceKind::Rook));
                if !in_place {
                    bail!("castling right {right} requires the king and the rook on their home squares");
                }
            }
        }
        if self.is_in_check(self.side_to_move.opposite()) {
            bail!(
                "{:?} has just moved and can not be in check",
                self.side_to_move.opposite()
            );
        }
        Ok(())
    }

    fn mark_moved_pieces(&mut self) {
        let castling = self.castling;
        for square in Square::iter() {
            let Some(piece) = self.board.at(square) else {
                continue;
            };
            let color = piece.color;
            let has_moved = match piece.kind {
                PieceKind::Pawn => square.rank() != color.pawns_starting_rank(),
                PieceKind::King => !castling.intersects(CastleRights::both(color)),
                PieceKind::Rook => !CastlingSide::BOTH.into_iter().any(|side| {
                    castling.contains(CastleRights::side(color, side))
                        && square.rank() == color.backrank()
                        && square.file() == side.rook_file()
                }),
                PieceKind::Queen | PieceKind::Bishop | PieceKind::Knight => false,
            };
            if has_moved {
                self.board.set(square, Some(piece.moved()));
            }
        }
    }
}

fn find_single_king(board: &Board, color: Color) -> anyhow::Result<Square> {
    let mut kings = board
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(square, _)| square);
    match (kings.next(), kings.next()) {
        (Some(king), None) => Ok(king),
        (None, _) => bail!("expected exactly one {color:?} king, got none"),
        (Some(_), Some(_)) => bail!("expected exactly one {color:?} king, got several"),
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Trims the input and strips optional `fen ` or `epd ` prefix before
    /// parsing.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    /// Prints board in Forsyth-Edwards Notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", &self.board)?;
        write!(f, "{} ", &self.side_to_move)?;
        write!(f, "{} ", &self.castling)?;
        match self
            .en_passant
            .and_then(|target| target.shift(self.side_to_move.push_direction()))
        {
            Some(skipped) => write!(f, "{skipped} "),
            None => write!(f, "- "),
        }?;
        write!(f, "{} ", &self.halfmove_clock)?;
        write!(f, "{}", &self.fullmove_counter)?;
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Player to move: {:?}", &self.side_to_move)?;
        writeln!(f, "Fullmove counter: {:?}", &self.fullmove_counter)?;
        writeln!(f, "En Passant: {:?}", &self.en_passant)?;
        // bitflags' default fmt::Debug implementation is not very convenient:
        // dump FEN instead.
        writeln!(f, "Castling rights: {}", &self.castling)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn square(input: &str) -> Square {
        Square::try_from(input).expect("valid square")
    }

    fn setup(fen: &str) -> Position {
        let position = Position::try_from(fen);
        assert!(position.is_ok(), "input: {fen}: {position:?}");
        let position = position.unwrap();
        assert_eq!(position.to_string(), fen);
        position
    }

    fn destinations(position: &Position, from: &str) -> Vec<String> {
        position
            .legal_moves(square(from))
            .iter()
            .map(|square| square.to_string())
            .sorted()
            .collect()
    }

    #[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
    #[test_case("2r3r1/p3k3/1p3pp1/1B5p/5P2/2P1p1P1/PP4KP/3R4 w - - 0 34")]
    #[test_case("rnbqk1nr/p3bppp/1p2p3/2ppP3/3P4/P7/1PP1NPPP/R1BQKBNR w KQkq c6 0 7")]
    #[test_case("r2qkb1r/1pp1pp1p/p1np1np1/1B6/3PP1b1/2N1BN2/PPP2PPP/R2QK2R w KQkq - 0 7")]
    #[test_case("r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24")]
    #[test_case("r1b1qrk1/ppp2pbp/n2p1np1/4p1B1/2PPP3/2NB1N1P/PP3PP1/R2QK2R w KQ e6 0 9")]
    #[test_case("8/8/8/8/2P5/3k4/8/KB6 b - c3 0 1")]
    #[test_case("rnbq1rk1/pp4pp/1b1ppn2/2p2p2/2PP4/1P2PN2/PB2BPPP/RN1Q1RK1 w - c6 0 9")]
    fn correct_fen(fen: &str) {
        let _ = setup(fen);
    }

    #[test]
    fn en_passant_square_conversion() {
        let position = setup("rnbqk1nr/p3bppp/1p2p3/2ppP3/3P4/P7/1PP1NPPP/R1BQKBNR w KQkq c6 0 7");
        assert_eq!(position.en_passant(), Some(square("c5")));
        let position = setup("8/8/8/8/2P5/3k4/8/KB6 b - c3 0 1");
        assert_eq!(position.en_passant(), Some(square("c4")));
    }

    #[test]
    fn derived_move_history() {
        let position = setup("r3k3/5p2/2p5/p7/P3r3/2N2n2/1PP2P2/2K2B2 w q - 0 24");
        let piece = |at| position.piece_at(square(at)).unwrap();
        assert!(!piece("a8").has_moved);
        assert!(!piece("e8").has_moved);
        assert!(piece("e4").has_moved);
        assert!(piece("c1").has_moved);
        assert!(!piece("f7").has_moved);
        assert!(piece("c6").has_moved);
        assert!(!piece("b2").has_moved);
        assert!(piece("a4").has_moved);
        assert_eq!(position.king(Color::White), square("c1"));
        assert_eq!(position.king(Color::Black), square("e8"));
    }

    #[test]
    fn correct_epd() {
        let epd = "rnbqkb1r/pp2pppp/3p1n2/8/3NP3/2N5/PPP2PPP/R1BQKB1R b KQkq -";
        let position = Position::try_from(epd).unwrap();
        assert_eq!(position.to_string(), format!("{epd} 0 1"));
    }

    #[test]
    fn no_crash() {
        assert!(Position::try_from("3k2p1N/82/8/8/7B/6K1/3R4/8 b - - 0 1").is_err());
        assert!(
            Position::try_from("3kn3/R2p1N2/8/8/70000000000000000B/6K1/3R4/8 b - - 0 1").is_err()
        );
        assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3R4/8 b - - 0 48 b - - 0 4/8 b").is_err());
        assert!(Position::try_from("\tfen3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 23").is_err());
        assert!(Position::try_from("fen3kn3/R2p1N2/8/8/7B/6K1/3R4/8 b - - 0 23").is_err());
        assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3r4/8 b - - +8 1").is_err());
        assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3r4/8 b - - 8").is_err());
        assert!(Position::try_from("3kn3/R4N2/8/8/7B/6K1/3r4/8 b - - 0 0").is_err());
        assert!(Position::try_from("kkkkkkkkk/8/8/8/8/8/8/K7 w - - 0 1").is_err());
        assert!(Position::try_from("k7/8/8/8/8/8/8/K7/8 w - - 0 1").is_err());
        assert!(Position::try_from("k7/8/8/8/8/8/K7 w - - 0 1").is_err());
        assert!(Position::try_from("").is_err());
        assert!(Position::try_from("k7/8/8/8/8/8/8/K7 w - - 0 1 \u{1f600}").is_err());
    }

    #[test]
    fn clean_board_str() {
        // Prefix with "fen".
        assert!(Position::try_from(
            "fen rn1qkb1r/pp3ppp/2p1pn2/3p1b2/2PP4/5NP1/PP2PPBP/RNBQK2R w KQkq - 0 1"
        )
        .is_ok());
        // Prefix with "epd".
        assert!(Position::try_from(
            "epd rnbqkb1r/ppp1pp1p/5np1/3p4/3P1B2/5N2/PPP1PPPP/RN1QKB1R w KQkq -"
        )
        .is_ok());
        // Whitespace and newlines.
        assert!(Position::try_from(
            "\n  rnbqkbnr/pp2pppp/8/3p4/3P4/3B4/PPP2PPP/RNBQK1NR b KQkq - 0 1 \n"
        )
        .is_ok());
    }

    #[test_case("k7/8/8/8/8/8/8/8 w - - 0 1"; "missing king")]
    #[test_case("k7/8/8/8/8/8/8/KK6 w - - 0 1"; "two kings")]
    #[test_case("k6P/8/8/8/8/8/8/K7 w - - 0 1"; "pawn on last rank")]
    #[test_case("k7/8/8/8/8/8/8/K6p w - - 0 1"; "pawn on first rank")]
    #[test_case("k7/8/8/8/8/8/8/K6R w K - 0 1"; "castling without king at home")]
    #[test_case("4k3/8/8/8/8/8/8/4K3 w k - 0 1"; "castling without rook")]
    #[test_case("4k3/8/8/8/8/8/8/4K3 w - e3 0 1"; "en passant without pawn")]
    #[test_case("4k3/8/8/4p3/8/8/8/4K3 w - e3 0 1"; "en passant on wrong rank")]
    #[test_case("4k3/8/4n3/4p3/8/8/8/4K3 w - e6 0 1"; "en passant square occupied")]
    #[test_case("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1"; "opponent in check")]
    fn illegal_positions(fen: &str) {
        assert!(Position::try_from(fen).is_err(), "{fen}");
    }

    #[test]
    fn starting_moves() {
        let position = Position::starting();
        assert_eq!(position.generate_moves().len(), 20);
        assert_eq!(destinations(&position, "e2"), vec!["e3", "e4"]);
        assert_eq!(destinations(&position, "g8"), vec!["f6", "h6"]);
        assert!(destinations(&position, "e4").is_empty());
        assert!(destinations(&position, "e1").is_empty());
        assert_eq!(position.status(), GameStatus::InProgress);
        assert!(!position.is_in_check(Color::White));
        assert!(!position.is_in_check(Color::Black));
    }

    #[test]
    fn simulation_restores_position() {
        let mut position =
            setup("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let original = position.clone();
        for next_move in original.generate_moves() {
            let _ = position.would_be_in_check_after(next_move.from, next_move.to, Color::White);
            assert_eq!(position, original, "{next_move}");
        }
        // King moves update the cache during the simulation only.
        assert!(!position.would_be_in_check_after(square("e1"), square("d1"), Color::White));
        assert_eq!(position.king(Color::White), square("e1"));
        // Capturing own king is never asked for, but sliding into an attack is.
        let mut position = setup("4k3/8/8/8/8/8/8/R3K2r w - - 0 1");
        let original = position.clone();
        assert!(position.would_be_in_check_after(square("e1"), square("f1"), Color::White));
        assert!(!position.would_be_in_check_after(square("e1"), square("e2"), Color::White));
        assert!(position.would_be_in_check_after(square("a1"), square("a2"), Color::White));
        assert_eq!(position, original);
    }

    #[test]
    fn apply_move_updates_state() {
        let mut position = Position::starting();
        let outcome = position.apply_move(square("e2"), square("e4")).unwrap();
        assert_eq!(outcome.flags, MoveFlags::DOUBLE_PAWN_PUSH);
        assert_eq!(outcome.captured, None);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.en_passant(), Some(square("e4")));
        assert_eq!(position.last_moved(), Some(square("e4")));
        assert!(position.piece_at(square("e4")).unwrap().has_moved);
        assert_eq!(
            position.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        let _ = position.apply_move(square("g8"), square("f6")).unwrap();
        assert_eq!(position.en_passant(), None);
        assert_eq!(
            position.to_string(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2"
        );
    }

    #[test]
    fn empty_source_square() {
        let mut position = Position::starting();
        let original = position.clone();
        assert_eq!(
            position.apply_move(square("e4"), square("e5")),
            Err(Error::EmptySourceSquare(square("e4")))
        );
        assert_eq!(position, original);
    }

    #[test]
    fn status_display() {
        assert_eq!(GameStatus::InProgress.to_string(), "in progress");
        assert_eq!(
            GameStatus::Checkmate {
                winner: Color::Black
            }
            .to_string(),
            "checkmate, Black wins"
        );
        assert_eq!(GameStatus::Stalemate.to_string(), "stalemate");
        assert!(GameStatus::Stalemate.is_over());
        assert!(!GameStatus::InProgress.is_over());
    }

    #[test]
    fn debug_dump() {
        assert_eq!(
            format!("{:?}", Position::starting()),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R\n\
             Player to move: White\n\
             Fullmove counter: 1\n\
             En Passant: None\n\
             Castling rights: KQkq\n\
             FEN: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"
        );
    }
}
