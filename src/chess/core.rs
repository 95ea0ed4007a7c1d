//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::chess::error::Error;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Upper bound on the number of legal moves in any reachable position (218)
/// rounded up to the next power of two.
pub const MAX_MOVES: usize = 256;

/// Moves are accumulated on the stack: the number of legal moves is bounded.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// A relocation of a piece from one square to another. Castling is encoded as
/// the king move (`e1g1`), en passant as the capturing pawn move onto the empty
/// square behind the captured pawn. Promotions are implicit: a pawn reaching
/// the last rank always becomes a queen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
}

impl Move {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses a move in coordinate notation (`e2e4`). The queen promotion
    /// suffix (`e7e8q`) is accepted for compatibility with [UCI], other
    /// promotion pieces are rejected because underpromotion does not exist in
    /// this engine.
    ///
    /// [UCI]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not two squares optionally followed by
    /// `q`.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        let input = match input.len() {
            4 => input,
            5 => match input.strip_suffix('q') {
                Some(stripped) => stripped,
                None => bail!("only queen promotion is supported, got {input}"),
            },
            _ => bail!("move should be 4 or 5 chars long, got {input}"),
        };
        if !input.is_ascii() {
            bail!("move should only contain ASCII symbols, got {input}");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(from.try_into()?, to.try_into()?))
    }
}

impl fmt::Display for Move {
    /// Serializes a move in coordinate notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

bitflags::bitflags! {
    /// Side effects of an applied move, reported back to the caller so that
    /// the presentation layer can pick sounds and animations.
    ///
    /// Castling is technically a king move: the rook relocation is a side
    /// effect. En passant is always also a capture.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        /// Pawn advancement by 2 squares from the original rank.
        const DOUBLE_PAWN_PUSH = 0b0000_0001;
        /// Short or long castle.
        const CASTLE = 0b0000_0010;
        /// Moves that change the material balance.
        const CAPTURE = 0b0000_0100;
        /// Capture "in passing".
        const EN_PASSANT = 0b0000_1000;
        /// Pawn reached the last rank and became a queen.
        const PROMOTION = 0b0001_0000;
        /// The opponent's king is attacked after the move.
        const CHECK = 0b0010_0000;
    }
}

/// Board squares are addressed by `(rank, file)` in the on-screen orientation:
/// rank 0 is Black's back rank (8 in algebraic notation) and rank 7 is White's
/// back rank (1 in algebraic notation), file 0 is the a-file.
///
/// ```
/// use hotseat::chess::core::Square;
///
/// let e2 = Square::try_from("e2").unwrap();
/// assert_eq!((e2.rank(), e2.file()), (6, 4));
/// assert_eq!(Square::new(0, 0).unwrap().to_string(), "a8");
/// assert!(Square::new(8, 0).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Connects rank (row) and file (column) to form a full square.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] unless both coordinates are within
    /// `0..BOARD_WIDTH`.
    pub const fn new(rank: u8, file: u8) -> Result<Self, Error> {
        if rank >= BOARD_WIDTH || file >= BOARD_WIDTH {
            return Err(Error::OutOfBounds { rank, file });
        }
        Ok(Self { rank, file })
    }

    /// Callers guarantee `index < BOARD_SIZE`.
    pub(crate) const fn from_index(index: u8) -> Self {
        debug_assert!(index < BOARD_SIZE);
        Self {
            rank: index / BOARD_WIDTH,
            file: index % BOARD_WIDTH,
        }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Row-major index of the square in `0..BOARD_SIZE`.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.rank * BOARD_WIDTH + self.file) as usize
    }

    /// Iterates over all squares of the board in row-major order (a8, b8, ...,
    /// h1).
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).map(Self::from_index)
    }

    /// Moves the square by given number of ranks and files. Returns `None` if
    /// the result is off the board.
    #[must_use]
    pub fn offset(self, ranks: i8, files: i8) -> Option<Self> {
        let rank = self.rank.checked_add_signed(ranks)?;
        let file = self.file.checked_add_signed(files)?;
        Self::new(rank, file).ok()
    }

    /// Moves the square one step in the given direction.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (ranks, files) = direction.delta();
        self.offset(ranks, files)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Parses a square in algebraic notation (`e4`).
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            )
        };
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        // Algebraic rank 8 is the top row.
        let rank = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Ok(Self::new(rank, file)?)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(b'a' + self.file))?;
        f.write_char(char::from(b'8' - self.rank))
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Also known as NorthWest.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as SouthEast.
    DownRight,
}

impl Direction {
    /// Directions a rook slides in.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
    /// Directions a bishop slides in.
    pub const DIAGONAL: [Self; 4] = [
        Self::UpLeft,
        Self::UpRight,
        Self::DownRight,
        Self::DownLeft,
    ];
    /// Directions a queen slides in and a king steps in.
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Right,
        Self::Down,
        Self::Left,
        Self::UpLeft,
        Self::UpRight,
        Self::DownRight,
        Self::DownLeft,
    ];

    /// `(ranks, files)` delta of a single step. "Up" decreases the rank
    /// index because rank 0 is at the top.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn opposite(self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::Up => Self::Down,
            Self::UpRight => Self::DownLeft,
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::DownLeft => Self::UpRight,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
        }
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Direction pawns of this color advance in.
    #[must_use]
    pub const fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }

    /// Rank the king and rooks start on.
    #[must_use]
    pub const fn backrank(self) -> u8 {
        match self {
            Self::White => BOARD_WIDTH - 1,
            Self::Black => 0,
        }
    }

    /// Rank the pawns start on.
    #[must_use]
    pub const fn pawns_starting_rank(self) -> u8 {
        match self {
            Self::White => BOARD_WIDTH - 2,
            Self::Black => 1,
        }
    }

    /// Rank pawns of this color promote on.
    #[must_use]
    pub const fn promotion_rank(self) -> u8 {
        self.opposite().backrank()
    }

    /// Rank a pawn of this color has to stand on to capture en passant: the
    /// rank opponent's pawns land on after a double push.
    #[must_use]
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Self::White => 3,
            Self::Black => 4,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("color should be 'w' or 'b', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. The piece does not know its
/// square: the board slot it occupies is the only source of truth.
///
/// `has_moved` is only consulted for castling and double pawn pushes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub color: Color,
    #[allow(missing_docs)]
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    /// Returns true if the piece has given color and kind regardless of its
    /// move history.
    #[must_use]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    #[must_use]
    pub(crate) const fn moved(self) -> Self {
        Self {
            has_moved: true,
            ..self
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    /// White pieces are uppercase, black pieces are lowercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.color {
            Color::White => f.write_str(&symbol.to_ascii_uppercase()),
            Color::Black => f.write_str(&symbol),
        }
    }
}

/// Kingside (short, O-O) or queenside (long, O-O-O) castling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastlingSide {
    #[allow(missing_docs)]
    Short,
    #[allow(missing_docs)]
    Long,
}

impl CastlingSide {
    #[allow(missing_docs)]
    pub const BOTH: [Self; 2] = [Self::Short, Self::Long];

    /// File of the rook's home square.
    #[must_use]
    pub const fn rook_file(self) -> u8 {
        match self {
            Self::Short => BOARD_WIDTH - 1,
            Self::Long => 0,
        }
    }

    /// File the king lands on.
    #[must_use]
    pub const fn king_destination_file(self) -> u8 {
        match self {
            Self::Short => 6,
            Self::Long => 2,
        }
    }

    /// File the rook lands on: the square king walks through.
    #[must_use]
    pub const fn rook_destination_file(self) -> u8 {
        match self {
            Self::Short => 5,
            Self::Long => 3,
        }
    }

    /// Direction of the king walk along the backrank.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Short => Direction::Right,
            Self::Long => Direction::Left,
        }
    }
}

bitflags::bitflags! {
    /// Track the ability to [castle] each side (kingside is often referred to
    /// as O-O or h-side castle, queenside -- O-O-O or a-side castle). When the
    /// king moves, player loses ability to castle both sides. When the rook
    /// moves or is captured on its home square, player loses ability to castle
    /// its corresponding side. Rights are never restored.
    ///
    /// The full rules are:
    ///
    /// - The king and the castling rook must not have previously moved.
    /// - The king must not be in check, and no square the king walks through
    ///   or lands on may be under attack by an enemy piece.
    /// - All the squares between the king and the castling rook must be
    ///   vacant.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
    }
}

impl CastleRights {
    /// Both sides for the given color.
    #[must_use]
    pub const fn both(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_BOTH,
            Color::Black => Self::BLACK_BOTH,
        }
    }

    /// The right for the given color and side.
    #[must_use]
    pub const fn side(color: Color, side: CastlingSide) -> Self {
        match (color, side) {
            (Color::White, CastlingSide::Short) => Self::WHITE_SHORT,
            (Color::White, CastlingSide::Long) => Self::WHITE_LONG,
            (Color::Black, CastlingSide::Short) => Self::BLACK_SHORT,
            (Color::Black, CastlingSide::Long) => Self::BLACK_LONG,
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses [`CastleRights`] for both players from the FEN format. The user
    /// is responsible for providing valid input cleaned up from the actual FEN
    /// chunk.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if given pattern does not match
    ///
    /// [`CastleRights`] := - | (K)? (Q)? (k)? (q)?
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::empty());
        }
        let mut result = Self::empty();
        let mut previous = None;
        for symbol in input.chars() {
            let right = match symbol {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => bail!("unknown castle rights: {input}"),
            };
            // Canonical order is KQkq, the flag values are descending.
            if previous.is_some_and(|previous: Self| previous.bits() <= right.bits()) {
                bail!("unknown castle rights: {input}");
            }
            previous = Some(right);
            result |= right;
        }
        if result.is_empty() {
            bail!("unknown castle rights: {input}");
        }
        Ok(result)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        for (right, symbol) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(right) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::mem::size_of;

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn square(input: &str) -> Square {
        Square::try_from(input).expect("valid square")
    }

    #[test]
    fn square_coordinates() {
        assert_eq!(square("a8"), Square::new(0, 0).unwrap());
        assert_eq!(square("h8"), Square::new(0, 7).unwrap());
        assert_eq!(square("a1"), Square::new(7, 0).unwrap());
        assert_eq!(square("e1"), Square::new(7, 4).unwrap());
        assert_eq!(square("e2").index(), 6 * 8 + 4);
        assert_eq!(Square::from_index(63), square("h1"));
        assert_eq!(Square::iter().count(), BOARD_SIZE as usize);
        assert_eq!(Square::iter().next(), Some(square("a8")));
        assert_eq!(Square::iter().last(), Some(square("h1")));
    }

    #[test_case(8, 0; "rank too large")]
    #[test_case(0, 8; "file too large")]
    #[test_case(255, 255; "both too large")]
    fn square_out_of_bounds(rank: u8, file: u8) {
        assert_eq!(
            Square::new(rank, file),
            Err(Error::OutOfBounds { rank, file })
        );
    }

    #[test]
    fn square_parsing() {
        for name in ["a1", "h8", "d5", "g2"] {
            assert_eq!(square(name).to_string(), name);
        }
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("a0").is_err());
        assert!(Square::try_from("e").is_err());
        assert!(Square::try_from("e22").is_err());
        assert!(Square::try_from("é1").is_err());
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'i'")]
    fn square_from_incorrect_file() {
        let _ = Square::try_from("i4").unwrap();
    }

    #[test]
    fn within_board_shift() {
        let square = square("e4");
        assert_eq!(square.shift(Direction::Left), Some(self::square("d4")));
        assert_eq!(square.shift(Direction::Up), Some(self::square("e5")));
        assert_eq!(square.shift(Direction::UpRight), Some(self::square("f5")));
        assert_eq!(square.shift(Direction::UpLeft), Some(self::square("d5")));
        assert_eq!(square.shift(Direction::Right), Some(self::square("f4")));
        assert_eq!(square.shift(Direction::Down), Some(self::square("e3")));
        assert_eq!(square.shift(Direction::DownRight), Some(self::square("f3")));
        assert_eq!(square.shift(Direction::DownLeft), Some(self::square("d3")));
    }

    #[test]
    fn corner_squares_shift() {
        let a1 = square("a1");
        assert_eq!(a1.shift(Direction::Up), Some(square("a2")));
        assert_eq!(a1.shift(Direction::UpRight), Some(square("b2")));
        for direction in [
            Direction::Left,
            Direction::UpLeft,
            Direction::Down,
            Direction::DownRight,
            Direction::DownLeft,
        ] {
            assert_eq!(a1.shift(direction), None);
        }

        let h8 = square("h8");
        assert_eq!(h8.shift(Direction::Down), Some(square("h7")));
        assert_eq!(h8.shift(Direction::DownLeft), Some(square("g7")));
        for direction in [
            Direction::Up,
            Direction::UpRight,
            Direction::UpLeft,
            Direction::DownRight,
            Direction::Right,
        ] {
            assert_eq!(h8.shift(direction), None);
        }
        assert_eq!(square("b1").offset(-2, -1), Some(square("a3")));
        assert_eq!(square("b1").offset(-1, -2), None);
    }

    #[test]
    fn directions() {
        for direction in Direction::ALL {
            let (ranks, files) = direction.delta();
            assert_eq!(direction.opposite().delta(), (-ranks, -files));
        }
        assert_eq!(Color::White.push_direction(), Direction::Up);
        assert_eq!(Color::Black.push_direction().opposite(), Direction::Up);
    }

    #[test]
    fn color_ranks() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.backrank(), square("e1").rank());
        assert_eq!(Color::Black.backrank(), square("e8").rank());
        assert_eq!(Color::White.pawns_starting_rank(), square("e2").rank());
        assert_eq!(Color::Black.pawns_starting_rank(), square("e7").rank());
        assert_eq!(Color::White.promotion_rank(), square("e8").rank());
        assert_eq!(Color::White.en_passant_rank(), square("e5").rank());
        assert_eq!(Color::Black.en_passant_rank(), square("e4").rank());
        assert_eq!(Color::try_from("w").unwrap(), Color::White);
        assert!(Color::try_from("white").is_err());
    }

    #[test]
    fn pieces() {
        for symbol in "KQRBNPkqrbnp".chars() {
            assert_eq!(Piece::try_from(symbol).unwrap().to_string(), symbol.to_string());
        }
        assert!(Piece::try_from('x').is_err());
        let queen = Piece::try_from('Q').unwrap();
        assert!(queen.is(Color::White, PieceKind::Queen));
        assert!(!queen.has_moved);
        assert!(queen.moved().is(Color::White, PieceKind::Queen));
        assert!(queen.moved().has_moved);
    }

    #[test]
    fn moves() {
        let next_move = Move::from_uci("e2e4").unwrap();
        assert_eq!(next_move, Move::new(square("e2"), square("e4")));
        assert_eq!(next_move.to_string(), "e2e4");
        assert_eq!(Move::from_uci("a7a8q").unwrap().to_string(), "a7a8");
        assert!(Move::from_uci("a7a8n").is_err());
        assert!(Move::from_uci("e2").is_err());
        assert!(Move::from_uci("e2e9").is_err());
    }

    #[test_case("KQkq", CastleRights::all())]
    #[test_case("-", CastleRights::empty())]
    #[test_case("Kq", CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG)]
    #[test_case("k", CastleRights::BLACK_SHORT)]
    fn castle_rights(input: &str, expected: CastleRights) {
        let rights = CastleRights::try_from(input).unwrap();
        assert_eq!(rights, expected);
        assert_eq!(rights.to_string(), input);
    }

    #[test]
    fn incorrect_castle_rights() {
        for input in ["", "qk", "KK", "KQkqK", "x", "-K"] {
            assert!(CastleRights::try_from(input).is_err(), "{input}");
        }
    }

    #[test]
    fn castling_sides() {
        assert_eq!(
            CastleRights::side(Color::Black, CastlingSide::Short)
                | CastleRights::side(Color::Black, CastlingSide::Long),
            CastleRights::both(Color::Black)
        );
        for side in CastlingSide::BOTH {
            let (_, step) = side.direction().delta();
            assert_eq!(
                i16::from(side.king_destination_file()) - 4,
                2 * i16::from(step)
            );
            assert_eq!(
                i16::from(side.rook_destination_file()) - 4,
                i16::from(step)
            );
        }
    }

    #[test]
    fn primitive_size() {
        assert_eq!(size_of::<Square>(), 2);
        assert_eq!(size_of::<Piece>(), size_of::<Option<Piece>>());
    }
}
