//! [`Bitboard`] is the set of squares returned by move generation.
//!
//! Every destination set in the engine is a [`Bitboard`]: a single [u64] where
//! each bit corresponds to one square. Union, membership and iteration are
//! single instructions and the iteration order is deterministic (row-major,
//! a8 first, h1 last).
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Sub};

use itertools::Itertools;

use crate::chess::core::{Square, BOARD_WIDTH};

/// A set of board squares backed by a single machine word.
///
/// Mirroring [`Square::index`] semantics, the least significant bit
/// corresponds to a8, and the most significant bit - to h1.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// The set with no squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    /// Returns true if `square` is a member.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        (self.bits & (1u64 << square.index())) != 0
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Adds the square to the set.
    pub fn insert(&mut self, square: Square) {
        *self |= Self::from(square);
    }

    /// Removes the square from the set.
    pub fn remove(&mut self, square: Square) {
        *self = *self - Self::from(square);
    }

    /// Squares of the set in index order.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    /// Prints the set as a grid: rank 8 on top, `1` for members and `.` for
    /// the rest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = Square::iter()
            .map(|square| if self.contains(square) { '1' } else { '.' })
            .chunks(BOARD_WIDTH as usize)
            .into_iter()
            .map(|mut rank| rank.join(SQUARE_SEPARATOR))
            .join(LINE_SEPARATOR);
        f.write_str(&grid)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl Sub for Bitboard {
    type Output = Self;

    /// Squares of `self` that are not in `rhs`.
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits & !rhs.bits)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square.index())
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut result = Self::empty();
        for square in iter {
            result.insert(square);
        }
        result
    }
}

impl IntoIterator for Bitboard {
    type IntoIter = BitboardIterator;
    type Item = Square;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Yields members of a [`Bitboard`] by repeatedly taking the lowest set bit.
#[derive(Clone, Debug)]
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let next_index = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        // trailing_zeros() of a non-zero u64 is within 0..64.
        #[allow(clippy::cast_possible_truncation)]
        Some(Square::from_index(next_index as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitboardIterator {}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
