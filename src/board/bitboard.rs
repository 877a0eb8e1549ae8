/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::Not,
};

use super::{Color, File, Rank, Square};

/// A [`Bitboard`] represents a set of squares as the bits of a 64-bit integer.
///
/// Bit `i` corresponds to [`Square`] index `i`, using
/// [Little-Endian Rank-File Mapping (LERF)](https://www.chessprogramming.org/Square_Mapping_Considerations#Little-Endian_Rank-File_Mapping),
/// so the first rank occupies the lowest eight bits.
///
/// The all-ones board [`Bitboard::FULL_BOARD`] doubles as the "no shared line" sentinel in the
/// between-squares tables of [`crate::AttackTables`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const FILE_A: Self = Self(0x0101010101010101);
    pub const RANK_1: Self = Self(0x00000000000000FF);
    pub const RANK_2: Self = Self(0x000000000000FF00);
    pub const RANK_4: Self = Self(0x00000000FF000000);
    pub const RANK_5: Self = Self(0x000000FF00000000);
    pub const RANK_7: Self = Self(0x00FF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);

    /// Constructs a new [`Bitboard`] with only the bit of `square` set.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::H8);
    /// assert_eq!(board.inner(), 0x8000000000000000);
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.0)
    }

    /// Constructs a new [`Bitboard`] covering an entire [`File`].
    #[inline(always)]
    pub const fn from_file(file: File) -> Self {
        Self(Self::FILE_A.0 << file.0)
    }

    /// Constructs a new [`Bitboard`] covering an entire [`Rank`].
    #[inline(always)]
    pub const fn from_rank(rank: Rank) -> Self {
        Self(Self::RANK_1.0 << (rank.0 * 8))
    }

    /// The rank on which `color`'s promotions land.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Color};
    /// assert_eq!(Bitboard::promotion_rank(Color::White), Bitboard::RANK_8);
    /// assert_eq!(Bitboard::promotion_rank(Color::Black), Bitboard::RANK_1);
    /// ```
    #[inline(always)]
    pub const fn promotion_rank(color: Color) -> Self {
        [Self::RANK_8, Self::RANK_1][color.index()]
    }

    /// The rank from which `color`'s pawns may double-push.
    #[inline(always)]
    pub const fn pawn_start_rank(color: Color) -> Self {
        [Self::RANK_2, Self::RANK_7][color.index()]
    }

    /// The rank on which `color`'s double-pushed pawns land.
    #[inline(always)]
    pub const fn double_push_rank(color: Color) -> Self {
        [Self::RANK_4, Self::RANK_5][color.index()]
    }

    /// Every square from `color`'s back rank up to and including `rank`, from `color`'s perspective.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Color, Rank};
    /// assert_eq!(Bitboard::half_up_to(Color::White, Rank::TWO), Bitboard::RANK_1 | Bitboard::RANK_2);
    /// assert_eq!(Bitboard::half_up_to(Color::Black, Rank::SEVEN), Bitboard::RANK_7 | Bitboard::RANK_8);
    /// ```
    #[inline(always)]
    pub const fn half_up_to(color: Color, rank: Rank) -> Self {
        let first = 1u64 << (rank.0 * 8);
        match color {
            // Everything below the next rank up
            Color::White => Self((first << 8).wrapping_sub(1)),
            // Everything from this rank up
            Color::Black => Self(!(first - 1)),
        }
    }

    /// Fetches the inner bit pattern.
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Mirrors this board across the horizontal center line, so rank 1 becomes rank 8.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Bitboard;
    /// assert_eq!(Bitboard::RANK_2.flipped(), Bitboard::RANK_7);
    /// ```
    #[inline(always)]
    pub const fn flipped(&self) -> Self {
        Self(self.0.swap_bytes())
    }

    /// Returns `true` if no bits are set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if at least one bit is set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `self` and `other` share at least one bit.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Square};
    /// assert!(Bitboard::RANK_1.intersects(Square::C1));
    /// assert!(!Bitboard::RANK_1.intersects(Square::C2));
    /// ```
    #[inline(always)]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        (*self & other.into()).is_nonempty()
    }

    /// Sets the bit(s) specified by `other`.
    #[inline(always)]
    pub fn set(&mut self, other: impl Into<Self>) {
        *self |= other.into()
    }

    /// Clears the bit(s) specified by `other`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Bitboard, Square};
    /// let mut board = Bitboard::RANK_1;
    /// board.clear(Square::C1);
    /// assert_eq!(board.inner(), 0xFB);
    /// ```
    #[inline(always)]
    pub fn clear(&mut self, other: impl Into<Self>) {
        *self &= !other.into()
    }

    /// The lowest set bit, as a [`Square`], or `None` if the board is empty.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        self.is_nonempty()
            .then(|| Square(self.0.trailing_zeros() as u8))
    }

    /// The lowest set bit, as a [`Square`].
    ///
    /// Calling this on an empty board yields an invalid square.
    #[inline(always)]
    pub const fn to_square_unchecked(&self) -> Square {
        debug_assert!(self.0 != 0, "Cannot take the square of an empty Bitboard");
        Square(self.0.trailing_zeros() as u8)
    }

    /// Removes and returns the lowest set bit, as a [`Square`].
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.0 &= self.0.wrapping_sub(1);
        lsb
    }

    /// Returns a [`BitboardIter`] over all set bits as [`Square`]s, lowest first.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }

    /// Number of set bits.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Bitboard;
    /// assert_eq!(Bitboard::RANK_1.population(), 8);
    /// ```
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

macro_rules! impl_bitwise_op {
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<File> for Bitboard {
    #[inline(always)]
    fn from(value: File) -> Self {
        Self::from_file(value)
    }
}

impl From<Rank> for Bitboard {
    #[inline(always)]
    fn from(value: Rank) -> Self {
        Self::from_rank(value)
    }
}

impl Default for Bitboard {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY_BOARD
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let occupant = if self.intersects(Square::new(file, rank)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{occupant} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "0x{:0>16x}", self.0)?;
        write!(f, "{self}")
    }
}

/// An iterator over all set bits in a [`Bitboard`].
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_to_string() {
        let board = Bitboard::RANK_2 | Bitboard::from_file(File::C);
        let expected = ". . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        . . X . . . . . \n\
                        X X X X X X X X \n\
                        . . X . . . . . \n";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_bitboard_iteration_is_ascending() {
        let board = Bitboard::from_square(Square::H8) | Square::A1 | Square::E4;
        let squares: Vec<_> = board.iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
        assert_eq!(board.iter().len(), 3);
    }

    #[test]
    fn test_bitboard_masking() {
        assert_eq!(Bitboard::from_rank(Rank::FOUR), Bitboard::RANK_4);
        assert_eq!(Bitboard::from_file(File::H).flipped(), Bitboard::from_file(File::H));
        assert_eq!(!Bitboard::FILE_A & Bitboard::FILE_A, Bitboard::EMPTY_BOARD);
    }

    #[test]
    fn test_halves_are_complementary() {
        for rank in Rank::iter().take(7) {
            let white = Bitboard::half_up_to(Color::White, rank);
            let next = Rank::new_unchecked(rank.0 + 1);
            let black = Bitboard::half_up_to(Color::Black, next);
            assert_eq!(white ^ black, Bitboard::FULL_BOARD, "split at {rank}");
        }
    }

    #[test]
    fn test_halves_mirror_each_other() {
        assert_eq!(
            Bitboard::half_up_to(Color::Black, Rank::SEVEN),
            Bitboard(0xFFFF_0000_0000_0000)
        );
        assert_eq!(Bitboard::half_up_to(Color::Black, Rank::ONE), Bitboard::FULL_BOARD);
        assert_eq!(Bitboard::half_up_to(Color::White, Rank::EIGHT), Bitboard::FULL_BOARD);

        for rank in Rank::iter() {
            let white = Bitboard::half_up_to(Color::White, rank);
            let black = Bitboard::half_up_to(Color::Black, rank.relative_to(Color::Black));
            assert_eq!(white.flipped(), black, "{rank}");
        }
    }
}
