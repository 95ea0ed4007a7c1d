//! Pseudo-legal move generation: the movement geometry of each piece kind.
//!
//! Nothing here knows about king safety. The only consumers are
//! [`crate::chess::position::Position::legal_moves`], which filters the output
//! through the check-safety simulation, and the attack scan in
//! [`crate::chess::position::Position::is_in_check`]. Castling is offered by
//! geometry alone (rights, unmoved rook at home, empty path) so that the attack
//! scan never recurses into safety checks.

use arrayvec::ArrayVec;

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{
    CastleRights, CastlingSide, Color, Direction, Piece, PieceKind, Square, BOARD_WIDTH,
};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

// Kings castle from the e-file.
const KING_FILE: u8 = 4;

/// Destinations of the piece on `from` according to its movement geometry,
/// including castling by geometry. Returns an empty set for an empty square.
///
/// `en_passant` is the square of the pawn that has just made a double step, if
/// any.
#[must_use]
pub fn pseudo_legal_moves(
    board: &Board,
    from: Square,
    en_passant: Option<Square>,
    castling: CastleRights,
) -> Bitboard {
    let Some(piece) = board.at(from) else {
        return Bitboard::empty();
    };
    let mut moves = piece_moves(board, from, piece, en_passant);
    if piece.kind == PieceKind::King {
        for side in castling_candidates(board, from, piece, castling) {
            moves.insert(castle_destination(piece.color, side));
        }
    }
    moves
}

/// Movement geometry without castling.
#[must_use]
pub fn piece_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    en_passant: Option<Square>,
) -> Bitboard {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece, en_passant),
        PieceKind::Knight => step_moves(
            board,
            piece.color,
            KNIGHT_OFFSETS.iter().filter_map(|&(ranks, files)| from.offset(ranks, files)),
        ),
        PieceKind::King => step_moves(
            board,
            piece.color,
            Direction::ALL.iter().filter_map(|&direction| from.shift(direction)),
        ),
        PieceKind::Bishop => slide_moves(board, from, piece.color, &Direction::DIAGONAL),
        PieceKind::Rook => slide_moves(board, from, piece.color, &Direction::ORTHOGONAL),
        PieceKind::Queen => slide_moves(board, from, piece.color, &Direction::ALL),
    }
}

/// Castling sides available by geometry: the king has not moved and stands on
/// its home square, the right is still held, the rook of that side is present
/// and unmoved on its home square and every square between them is empty.
///
/// Whether the king is attacked is not considered here.
#[must_use]
pub fn castling_candidates(
    board: &Board,
    king: Square,
    piece: Piece,
    castling: CastleRights,
) -> ArrayVec<CastlingSide, 2> {
    let mut sides = ArrayVec::new();
    let color = piece.color;
    if piece.kind != PieceKind::King
        || piece.has_moved
        || king.rank() != color.backrank()
        || king.file() != KING_FILE
    {
        return sides;
    }
    for side in CastlingSide::BOTH {
        if !castling.contains(CastleRights::side(color, side)) {
            continue;
        }
        let Some(rook) = backrank_square(color, side.rook_file()) else {
            continue;
        };
        let rook_at_home = board
            .at(rook)
            .is_some_and(|rook| rook.is(color, PieceKind::Rook) && !rook.has_moved);
        if !rook_at_home {
            continue;
        }
        let (low, high) = match side {
            CastlingSide::Short => (KING_FILE + 1, side.rook_file()),
            CastlingSide::Long => (side.rook_file() + 1, KING_FILE),
        };
        let path_clear = (low..high)
            .filter_map(|file| backrank_square(color, file))
            .all(|square| board.is_empty(square));
        if path_clear {
            sides.push(side);
        }
    }
    sides
}

/// Square the king lands on when castling to the given side.
#[must_use]
pub(crate) fn castle_destination(color: Color, side: CastlingSide) -> Square {
    Square::from_index(color.backrank() * BOARD_WIDTH + side.king_destination_file())
}

fn backrank_square(color: Color, file: u8) -> Option<Square> {
    Square::new(color.backrank(), file).ok()
}

fn can_land(board: &Board, square: Square, color: Color) -> bool {
    board.at(square).map_or(true, |piece| piece.color != color)
}

fn step_moves(board: &Board, color: Color, targets: impl Iterator<Item = Square>) -> Bitboard {
    targets.filter(|&square| can_land(board, square, color)).collect()
}

fn slide_moves(board: &Board, from: Square, color: Color, directions: &[Direction]) -> Bitboard {
    let mut moves = Bitboard::empty();
    for &direction in directions {
        let mut current = from;
        while let Some(next) = current.shift(direction) {
            match board.at(next) {
                None => moves.insert(next),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.insert(next);
                    }
                    break;
                },
            }
            current = next;
        }
    }
    moves
}

fn pawn_moves(board: &Board, from: Square, pawn: Piece, en_passant: Option<Square>) -> Bitboard {
    let mut moves = Bitboard::empty();
    let color = pawn.color;
    let forward = color.push_direction();
    if let Some(single) = from.shift(forward) {
        if board.is_empty(single) {
            moves.insert(single);
            if !pawn.has_moved && from.rank() == color.pawns_starting_rank() {
                if let Some(double) = single.shift(forward) {
                    if board.is_empty(double) {
                        moves.insert(double);
                    }
                }
            }
        }
    }
    let (ranks, _) = forward.delta();
    for files in [-1, 1] {
        if let Some(target) = from.offset(ranks, files) {
            if board.at(target).is_some_and(|piece| piece.color != color) {
                moves.insert(target);
            }
        }
    }
    if let Some(target) = en_passant {
        if let Some(destination) = en_passant_destination(board, from, pawn, target) {
            moves.insert(destination);
        }
    }
    moves
}

/// Square a pawn on `from` lands on when capturing the pawn on `target` en
/// passant: the capturing pawn stands on its en passant rank right next to the
/// enemy pawn that has just made a double step.
pub(crate) fn en_passant_destination(
    board: &Board,
    from: Square,
    pawn: Piece,
    target: Square,
) -> Option<Square> {
    let color = pawn.color;
    if pawn.kind != PieceKind::Pawn
        || from.rank() != color.en_passant_rank()
        || target.rank() != from.rank()
        || from.file().abs_diff(target.file()) != 1
    {
        return None;
    }
    if !board
        .at(target)
        .is_some_and(|victim| victim.is(color.opposite(), PieceKind::Pawn))
    {
        return None;
    }
    target
        .shift(color.push_direction())
        .filter(|&destination| board.is_empty(destination))
}
