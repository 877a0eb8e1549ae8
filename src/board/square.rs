/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, bail, Context, Result};

use super::Color;

/// Represents a single square on an `8x8` chess board.
///
/// Encoded with [Least Significant File Mapping](https://www.chessprogramming.org/Square_Mapping_Considerations#Deduction_on_Files_and_Ranks),
/// so `square = file + rank * 8`. This is the index used for bit positions in a [`crate::Bitboard`].
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// For ray-stepping, every square also has a [`PaddedSquare`] encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self(0);
    pub const B1: Self = Self(1);
    pub const C1: Self = Self(2);
    pub const D1: Self = Self(3);
    pub const E1: Self = Self(4);
    pub const F1: Self = Self(5);
    pub const G1: Self = Self(6);
    pub const H1: Self = Self(7);

    pub const A2: Self = Self(8);
    pub const B2: Self = Self(9);
    pub const C2: Self = Self(10);
    pub const D2: Self = Self(11);
    pub const E2: Self = Self(12);
    pub const F2: Self = Self(13);
    pub const G2: Self = Self(14);
    pub const H2: Self = Self(15);

    pub const A3: Self = Self(16);
    pub const B3: Self = Self(17);
    pub const C3: Self = Self(18);
    pub const D3: Self = Self(19);
    pub const E3: Self = Self(20);
    pub const F3: Self = Self(21);
    pub const G3: Self = Self(22);
    pub const H3: Self = Self(23);

    pub const A4: Self = Self(24);
    pub const B4: Self = Self(25);
    pub const C4: Self = Self(26);
    pub const D4: Self = Self(27);
    pub const E4: Self = Self(28);
    pub const F4: Self = Self(29);
    pub const G4: Self = Self(30);
    pub const H4: Self = Self(31);

    pub const A5: Self = Self(32);
    pub const B5: Self = Self(33);
    pub const C5: Self = Self(34);
    pub const D5: Self = Self(35);
    pub const E5: Self = Self(36);
    pub const F5: Self = Self(37);
    pub const G5: Self = Self(38);
    pub const H5: Self = Self(39);

    pub const A6: Self = Self(40);
    pub const B6: Self = Self(41);
    pub const C6: Self = Self(42);
    pub const D6: Self = Self(43);
    pub const E6: Self = Self(44);
    pub const F6: Self = Self(45);
    pub const G6: Self = Self(46);
    pub const H6: Self = Self(47);

    pub const A7: Self = Self(48);
    pub const B7: Self = Self(49);
    pub const C7: Self = Self(50);
    pub const D7: Self = Self(51);
    pub const E7: Self = Self(52);
    pub const F7: Self = Self(53);
    pub const G7: Self = Self(54);
    pub const H7: Self = Self(55);

    pub const A8: Self = Self(56);
    pub const B8: Self = Self(57);
    pub const C8: Self = Self(58);
    pub const D8: Self = Self(59);
    pub const E8: Self = Self(60);
    pub const F8: Self = Self(61);
    pub const G8: Self = Self(62);
    pub const H8: Self = Self(63);

    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Lowest valid inner value.
    pub const MIN: u8 = 0;

    /// Highest valid inner value.
    pub const MAX: u8 = 63;

    /// Creates a new [`Square`] from a [`File`] and a [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::{File, Rank, Square};
    /// assert_eq!(Square::new(File::C, Rank::FOUR), Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Square;
    /// assert_eq!(Square::from_index(26).unwrap(), Square::C4);
    /// assert!(Square::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(index as u8))
    }

    /// An iterator over all squares, from A1 to H8.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Index of this [`Square`], for use in lookup tables.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The [`File`] of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & 7)
    }

    /// The [`Rank`] of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Converts this [`Square`] into its 0x88 [`PaddedSquare`] encoding.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Square;
    /// assert_eq!(Square::A1.padded().index(), 0);
    /// assert_eq!(Square::A2.padded().index(), 16);
    /// assert_eq!(Square::H8.padded().index(), 119);
    /// ```
    #[inline(always)]
    pub const fn padded(&self) -> PaddedSquare {
        PaddedSquare::new(self.file(), self.rank())
    }

    /// Offsets this [`Square`] by `files` and `ranks`, returning `None` if the result is off the board.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Square;
    /// assert_eq!(Square::B1.offset(2, 1), Some(Square::D2));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, files: i8, ranks: i8) -> Option<Self> {
        let file = self.file().0 as i8 + files;
        let rank = self.rank().0 as i8 + ranks;

        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Self((file + rank * 8) as u8))
        }
    }

    /// Moves this [`Square`] `n` ranks "forward" from `color`'s perspective.
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Color, Square};
    /// assert_eq!(Square::E2.forward_by(Color::White, 2), Some(Square::E4));
    /// assert_eq!(Square::E7.forward_by(Color::Black, 2), Some(Square::E5));
    /// assert_eq!(Square::E8.forward_by(Color::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: i8) -> Option<Self> {
        self.offset(0, n * color.negation_multiplier())
    }

    /// Moves this [`Square`] `n` ranks "backward" from `color`'s perspective.
    #[inline(always)]
    pub const fn backward_by(&self, color: Color, n: i8) -> Option<Self> {
        self.offset(0, -n * color.negation_multiplier())
    }

    /// Mirrors this [`Square`] across the horizontal center line, so A1 becomes A8.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Square;
    /// assert_eq!(Square::A1.flipped_rank(), Square::A8);
    /// assert_eq!(Square::C4.flipped_rank(), Square::C5);
    /// ```
    #[inline(always)]
    pub const fn flipped_rank(self) -> Self {
        Self(self.0 ^ 56)
    }

    /// If `color` is Black, flips the [`Rank`] of this [`Square`]. Otherwise, does nothing.
    #[inline(always)]
    pub const fn rank_relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => self.flipped_rank(),
        }
    }

    /// Number of files between `self` and `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().0.abs_diff(other.file().0)
    }

    /// Number of ranks between `self` and `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().0.abs_diff(other.rank().0)
    }

    /// Returns `true` if `self` and `other` share a diagonal (and are not the same square).
    #[inline(always)]
    pub const fn is_diagonal_to(&self, other: Self) -> bool {
        self.0 != other.0 && self.distance_files(other) == self.distance_ranks(other)
    }

    /// Returns `true` if `self` and `other` share a rank or file (and are not the same square).
    #[inline(always)]
    pub const fn is_orthogonal_to(&self, other: Self) -> bool {
        self.0 != other.0 && (self.file().0 == other.file().0 || self.rank().0 == other.rank().0)
    }

    /// Parses a [`Square`] from a UCI-compliant string, such as `e4`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Square;
    /// assert_eq!(Square::from_uci("c4").unwrap(), Square::C4);
    /// assert!(Square::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();

        let file = chars
            .next()
            .context("Cannot create Square from empty string")?;
        let rank = chars
            .next()
            .context(format!("Missing rank in Square string {square:?}"))?;

        if chars.next().is_some() {
            bail!("Square strings must be exactly two characters. Got {square:?}");
        }

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }

    /// Converts this [`Square`] into a UCI-compliant string, such as `e4`.
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to_uci(), self.0)
    }
}

/// A square in the 0x88 "padded" encoding, `file + 16 * rank`.
///
/// Each rank is followed by eight phantom squares, so stepping off the edge of the board
/// in any direction lands on an index with bit `3` or bit `7` set. This makes ray-walking
/// a single add followed by [`PaddedSquare::is_on_board`].
/// ```text
/// 8| 112 113 114 115 116 117 118 119 | 120 .. 127
/// ...
/// 2|  16  17  18  19  20  21  22  23 |  24 ..  31
/// 1|   0   1   2   3   4   5   6   7 |   8 ..  15
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct PaddedSquare(u8);

impl PaddedSquare {
    /// Number of padded indices, including off-board ones.
    pub const COUNT: usize = 128;

    /// Mask of the bits that are only ever set on off-board indices.
    const OFF_BOARD: u8 = 0x88;

    /// Creates a new [`PaddedSquare`] from a [`File`] and a [`Rank`].
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 + 16 * rank.0)
    }

    /// Creates a [`PaddedSquare`] from a raw index in `[0, 128)`, which may be off the board.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 128, "Padded index must be between [0,128)");
        Self(index as u8)
    }

    /// An iterator over all 128 padded indices, including off-board ones.
    #[inline(always)]
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Raw index of this [`PaddedSquare`], for use in 128-entry lookup tables.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this index denotes a real square of the board.
    ///
    /// # Example
    /// ```
    /// # use tadpole::PaddedSquare;
    /// assert!(PaddedSquare::from_index(0x77).is_on_board());
    /// assert!(!PaddedSquare::from_index(0x08).is_on_board());
    /// assert!(!PaddedSquare::from_index(0x78).is_on_board());
    /// ```
    #[inline(always)]
    pub const fn is_on_board(&self) -> bool {
        self.0 & Self::OFF_BOARD == 0
    }

    /// Steps by `delta`, returning `None` if the destination is off the board.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Square;
    /// let e4 = Square::E4.padded();
    /// assert_eq!(e4.step(17).and_then(|sq| sq.to_square()), Some(Square::F5));
    /// assert_eq!(Square::H4.padded().step(1), None);
    /// assert_eq!(Square::A1.padded().step(-16), None);
    /// ```
    #[inline(always)]
    pub const fn step(&self, delta: i8) -> Option<Self> {
        let index = self.0 as i16 + delta as i16;
        if index < 0 || index >= Self::COUNT as i16 {
            return None;
        }

        let stepped = Self(index as u8);
        if stepped.is_on_board() {
            Some(stepped)
        } else {
            None
        }
    }

    /// Converts this index back into a dense [`Square`], if it is on the board.
    #[inline(always)]
    pub const fn to_square(&self) -> Option<Square> {
        if self.is_on_board() {
            Some(Square((self.0 & 7) | (self.0 >> 4) << 3))
        } else {
            None
        }
    }
}

impl From<Square> for PaddedSquare {
    #[inline(always)]
    fn from(value: Square) -> Self {
        value.padded()
    }
}

impl fmt::Debug for PaddedSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_square() {
            Some(square) => write!(f, "{square} (0x{:02x})", self.0),
            None => write!(f, "off-board (0x{:02x})", self.0),
        }
    }
}

/// A column on the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const COUNT: usize = 8;

    /// Creates a [`File`] from an index in `[0, 7]`, without error checking.
    #[inline(always)]
    pub const fn new_unchecked(index: u8) -> Self {
        debug_assert!(index < 8, "File must be between [0,8)");
        Self(index)
    }

    /// An iterator over all files, from `a` to `h`.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Parses a [`File`] from a lowercase character, `a` through `h`.
    pub fn from_char(file: char) -> Result<Self> {
        if !('a'..='h').contains(&file) {
            bail!("File chars must be [a, h]. Got {file:?}");
        }
        Ok(Self(file as u8 - b'a'))
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A row on the board, `1` through `8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const COUNT: usize = 8;

    /// Creates a [`Rank`] from an index in `[0, 7]`, without error checking.
    #[inline(always)]
    pub const fn new_unchecked(index: u8) -> Self {
        debug_assert!(index < 8, "Rank must be between [0,8)");
        Self(index)
    }

    /// An iterator over all ranks, from `1` to `8`.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// This rank as seen from `color`'s side of the board, so Black's back rank is [`Rank::ONE`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::{Color, Rank};
    /// assert_eq!(Rank::SEVEN.relative_to(Color::White), Rank::SEVEN);
    /// assert_eq!(Rank::SEVEN.relative_to(Color::Black), Rank::TWO);
    /// ```
    #[inline(always)]
    pub const fn relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => Self(7 - self.0),
        }
    }

    /// Parses a [`Rank`] from a character, `1` through `8`.
    pub fn from_char(rank: char) -> Result<Self> {
        let digit = rank
            .to_digit(10)
            .ok_or_else(|| anyhow!("Rank chars must be [1, 8]. Got {rank:?}"))?;

        if !(1..=8).contains(&digit) {
            bail!("Rank chars must be [1, 8]. Got {rank:?}");
        }
        Ok(Self(digit as u8 - 1))
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        assert_eq!(Square::new(File::A, Rank::ONE), Square::A1);
        assert_eq!(Square::new(File::H, Rank::EIGHT), Square::H8);
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::FOUR);
        assert_eq!(Square::iter().count(), Square::COUNT);
    }

    #[test]
    fn test_parsing() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square::A1);
        assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
        assert!("".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("j1".parse::<Square>().is_err());
        assert!("a1b".parse::<Square>().is_err());
        assert_eq!(Square::G7.to_uci(), "g7");
    }

    #[test]
    fn test_padded_round_trip_covers_board() {
        let on_board = PaddedSquare::iter().filter(|sq| sq.is_on_board()).count();
        assert_eq!(on_board, Square::COUNT);

        for square in Square::iter() {
            assert_eq!(square.padded().to_square(), Some(square));
        }
    }

    #[test]
    fn test_padded_steps_stop_at_edges() {
        // Rook, bishop, and knight deltas from the corners
        assert_eq!(Square::H1.padded().step(1), None);
        assert_eq!(Square::H1.padded().step(17), None);
        assert_eq!(Square::A8.padded().step(16), None);
        assert_eq!(Square::A8.padded().step(15), None);
        assert_eq!(Square::A1.padded().step(-17), None);
        assert_eq!(Square::G1.padded().step(18), None);
        assert_eq!(
            Square::G1.padded().step(14).and_then(|sq| sq.to_square()),
            Some(Square::E2)
        );
    }

    #[test]
    fn test_offsets_and_relative_ranks() {
        assert_eq!(Square::E1.rank_relative_to(Color::Black), Square::E8);
        assert_eq!(Square::D2.backward_by(Color::Black, 1), Some(Square::D3));
        assert_eq!(Square::D2.backward_by(Color::White, 1), Some(Square::D1));
        assert_eq!(Square::A1.offset(7, 7), Some(Square::H8));
        assert!(Square::C1.is_diagonal_to(Square::H6));
        assert!(!Square::C1.is_diagonal_to(Square::C1));
        assert!(Square::C1.is_orthogonal_to(Square::C8));
        assert!(!Square::C1.is_orthogonal_to(Square::D2));
    }
}
