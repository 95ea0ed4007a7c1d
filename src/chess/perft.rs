//! [Perft] (*per*formance *t*esting) is a technique for checking correctness of
//! move generation: the number of leaf nodes of the legal move tree at a given
//! depth is compared against well-known reference values.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use crate::chess::position::Position;

/// Counts the positions reachable from `position` in exactly `depth` plies.
///
/// Promotions only ever produce a queen, so the counts only match the
/// reference tables for positions where no pawn promotes within `depth`.
///
/// ```
/// use hotseat::chess::perft::perft;
/// use hotseat::chess::position::Position;
///
/// assert_eq!(perft(&Position::starting(), 2), 400);
/// ```
#[must_use]
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = position.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&next_move| {
            let mut next = position.clone();
            next.make_move(next_move)
                .map_or(0, |_| perft(&next, depth - 1))
        })
        .sum()
}
