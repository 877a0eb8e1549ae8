/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, File, Piece, PieceKind, Rank, Square};

#[rustfmt::skip]
const PAWN: Psqt = Psqt::new([
     0,  0,  0,  0,  0,  0,  0,  0,
    10, 22, 32, 50, 51, 32, 22, 10,
     8, 12, 12, 24, 25, 14, 12,  8,
     5,  6,  7, 20, 21, 12,  7,  6,
     2,  2, 15, 18, 19,  7,  2,  2,
     1,  1,  4,  5,  5,  2,  1,  1,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
]);

#[rustfmt::skip]
const KNIGHT: Psqt = Psqt::new([
    -10, -8, -7, -5, -5, -7, -8, -10,
      1,  2,  9,  9,  9,  9,  2,   1,
     -6,  5, 10, 12, 16, 15,  5,  -6,
     -6,  6, 16, 15, 15, 16,  6,  -6,
     -6,  5,  9, 14, 14,  9,  5,  -6,
    -13,  8,  8, 10, 10,  9,  8, -13,
     -8,  1,  3,  4,  4,  3,  1,  -8,
    -10, -3, -7, -5, -5, -7, -3, -10,
]);

#[rustfmt::skip]
const BISHOP: Psqt = Psqt::new([
    -4, -3, -2, -1, -1, -2, -3, -4,
     0,  2,  2,  3,  3,  2,  2,  0,
     0,  1,  9, 10, 10,  9,  1,  0,
     0,  8, 15, 18, 18, 15,  8,  0,
     0,  1, 13, 18, 18, 13,  1,  0,
     0,  5,  7,  8,  8,  7,  5,  0,
    -5,  6,  1,  7,  7,  1,  6, -5,
    -4, -3, -2, -1, -1, -2, -3, -4,
]);

#[rustfmt::skip]
const ROOK: Psqt = Psqt::new([
     6,  6,  6,  6,  6,  6,  6,  6,
    12, 18, 22, 25, 25, 22, 18, 12,
    -2,  3,  5, 10, 10,  5,  3, -2,
    -3,  3,  4,  9,  9,  4,  3, -3,
    -3,  2,  3,  8,  8,  3,  2, -3,
    -3,  1,  2,  7,  7,  2,  1, -3,
    -5,  0,  1,  6,  6,  1,  0, -5,
    -4, -5,  1,  6,  6,  3, -5, -4,
]);

#[rustfmt::skip]
const QUEEN: Psqt = Psqt::new([
      5,   6,  6,  8,  8,  6,   6,   5,
      7,   8,  9, 11, 11,  9,   8,   7,
      0,   1,  5, 10, 10,  5,   1,   0,
      0,   1,  5, 11, 11,  5,   1,   0,
      0,   1,  8, 13, 13,  8,   1,   0,
      0,   1,  7, 11, 11,  7,   1,   0,
     -6,  -5,  1,  5,  5,  1,  -5,  -6,
    -12, -12, -8,  4,  4, -8, -12, -12,
]);

/// King shelter weights, scaled by how exposed the King is.
#[rustfmt::skip]
const KING: Psqt = Psqt::new([
    2, 1, 1, 2, 1, 3, 1, 2,
    2, 2, 2, 2, 2, 3, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3,
    3, 4, 4, 4, 4, 4, 4, 3,
    3, 4, 4, 4, 4, 4, 4, 3,
    3, 3, 3, 3, 3, 3, 3, 3,
    2, 2, 2, 2, 2, 3, 2, 2,
    2, 1, 1, 2, 1, 3, 1, 2,
]);

/// A [Piece-Square Table](https://www.chessprogramming.org/Piece-Square_Tables), stored
/// from White's perspective.
#[derive(Debug)]
pub struct Psqt([i32; Square::COUNT]);

impl Psqt {
    /// The incremental piece-square bonus for `piece` on `square`, from `piece`'s perspective.
    ///
    /// Only Knights, Bishops, Rooks, and Queens carry one. Pawns are scored with their
    /// structure and Kings with their safety.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// assert_eq!(Psqt::positional(Piece::WHITE_KNIGHT, Square::E4), 14);
    /// assert_eq!(Psqt::positional(Piece::BLACK_KNIGHT, Square::E5), 14);
    /// assert_eq!(Psqt::positional(Piece::WHITE_PAWN, Square::E4), 0);
    /// ```
    #[inline(always)]
    pub fn positional(piece: Piece, square: Square) -> i32 {
        match piece.kind() {
            PieceKind::Knight => KNIGHT.get_relative(square, piece.color()),
            PieceKind::Bishop => BISHOP.get_relative(square, piece.color()),
            PieceKind::Rook => ROOK.get_relative(square, piece.color()),
            PieceKind::Queen => QUEEN.get_relative(square, piece.color()),
            PieceKind::Pawn | PieceKind::King => 0,
        }
    }

    #[inline(always)]
    pub fn pawn() -> &'static Self {
        &PAWN
    }

    /// Doubles as the endgame King centralisation table.
    #[inline(always)]
    pub fn knight() -> &'static Self {
        &KNIGHT
    }

    #[inline(always)]
    pub fn king() -> &'static Self {
        &KING
    }

    /// Creates a new [`Psqt`] from values written as the board is printed: rank 8 first.
    const fn new(psqt: [i32; Square::COUNT]) -> Self {
        let mut flipped = psqt;

        let mut i = 0;
        while i < psqt.len() {
            // Flip the rank so that index 0 is a1
            flipped[i] = psqt[i ^ 56];
            i += 1;
        }

        Self(flipped)
    }

    #[inline(always)]
    pub const fn get(&self, square: Square) -> i32 {
        self.0[square.index()]
    }

    /// Get the value of this PSQT at the provided square, relative to `color`.
    #[inline(always)]
    pub const fn get_relative(&self, square: Square, color: Color) -> i32 {
        self.get(square.rank_relative_to(color))
    }
}

impl fmt::Display for Psqt {
    /// Printing a [`Psqt`] will display it in the same way it is written in the code (White's perspective).
    ///
    /// If the alternate formatter is used (`#`), it will print as if from Black's perspective.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = if f.alternate() {
            Color::Black
        } else {
            Color::White
        };

        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;
            for file in File::iter() {
                let value = self.get_relative(Square::new(file, rank), color);
                write!(f, "{value:3} ")?;
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "----")?;
        }
        write!(f, "\n    ")?;
        for file in File::iter() {
            write!(f, "{file}   ")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_is_mirrored_for_black() {
        for square in Square::iter() {
            for kind in PieceKind::all() {
                let white = Psqt::positional(Piece::new(Color::White, kind), square);
                let black = Psqt::positional(
                    Piece::new(Color::Black, kind),
                    square.rank_relative_to(Color::Black),
                );
                assert_eq!(white, black, "{kind} on {square}");
            }
        }
    }

    #[test]
    fn test_tables_are_stored_a1_first() {
        assert_eq!(Psqt::pawn().get(Square::D7), 50);
        assert_eq!(Psqt::pawn().get(Square::D2), 0);
        assert_eq!(Psqt::knight().get(Square::A1), -10);
        assert_eq!(Psqt::knight().get(Square::A3), -13);
        assert_eq!(Psqt::king().get(Square::F1), 3);
    }
}
