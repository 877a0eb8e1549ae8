/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{
    AttackTables, Bitboard, Board, Color, File, Piece, PieceKind, Rank, RotatedOccupancy, Square,
};

/// Per-color, per-square counts of how many pieces attack each square.
///
/// Filled by [`AttackTables::generate_checks`] and reused between calls.
#[derive(Clone, PartialEq, Eq)]
pub struct CheckTable([[u8; Square::COUNT]; Color::COUNT]);

impl CheckTable {
    #[inline(always)]
    pub const fn new() -> Self {
        Self([[0; Square::COUNT]; Color::COUNT])
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.0 = [[0; Square::COUNT]; Color::COUNT];
    }

    /// Number of `color` pieces attacking `square`.
    #[inline(always)]
    pub fn get(&self, color: Color, square: Square) -> u8 {
        self.0[color][square]
    }

    #[inline(always)]
    fn mark(&mut self, color: Color, squares: Bitboard) {
        for square in squares {
            self.0[color][square] = self.0[color][square].saturating_add(1);
        }
    }
}

impl Default for CheckTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CheckTable {
    /// Prints both colors' counts side by side, White on the left.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for color in Color::all() {
                write!(f, "{rank}|")?;
                for file in File::iter() {
                    match self.get(color, Square::new(file, rank)) {
                        0 => write!(f, " .")?,
                        n => write!(f, " {n}")?,
                    }
                }
                write!(f, "    ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl AttackTables {
    /// Every `color` piece attacking `square`, with sliders resolved through x-rays.
    ///
    /// A Bishop, Rook, or Queen counts as an attacker if the only pieces between it and
    /// `square` are same-color sliders that move along the same line.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// // Queen on d1 stacked behind the Rook on d2
    /// let board = Board::from_fen("3k4/8/8/8/8/8/3R4/3QK3 w - - 0 1").unwrap();
    /// let attackers = tables.all_attackers(&board, Square::D7, Color::White);
    /// assert_eq!(attackers, Bitboard::from_square(Square::D1) | Square::D2);
    ///
    /// let direct = tables.attackers_no_xray(&board, Square::D7, Color::White);
    /// assert_eq!(direct, Bitboard::from_square(Square::D2));
    /// ```
    pub fn all_attackers(&self, board: &Board, square: Square, color: Color) -> Bitboard {
        let occupied = board.occupied();
        let mut attackers = self.leaper_attackers(board, square, color);

        for (kind, sliders) in [
            (PieceKind::Bishop, board.diagonal_sliders(color)),
            (PieceKind::Rook, board.orthogonal_sliders(color)),
        ] {
            let blockers = occupied ^ sliders;
            for from in self.attack_vectors(color, kind, square) & sliders {
                let span = self.span(square, from);
                if span != Bitboard::FULL_BOARD && (blockers & span).is_empty() {
                    attackers.set(from);
                }
            }
        }

        attackers
    }

    /// Every `color` piece directly attacking `square`, ignoring anything stacked behind.
    pub fn attackers_no_xray(&self, board: &Board, square: Square, color: Color) -> Bitboard {
        let occupancy = board.occupancy();
        self.leaper_attackers(board, square, color)
            | (self.bishop_attacks(square, occupancy) & board.diagonal_sliders(color))
            | (self.rook_attacks(square, occupancy) & board.orthogonal_sliders(color))
    }

    /// Returns `true` if any `color` piece attacks `square`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// let board = Board::default();
    /// assert!(tables.is_square_attacked_by(&board, Square::F3, Color::White));
    /// assert!(!tables.is_square_attacked_by(&board, Square::E4, Color::White));
    /// ```
    pub fn is_square_attacked_by(&self, board: &Board, square: Square, color: Color) -> bool {
        let occupancy = board.occupancy();
        (self.bishop_attacks(square, occupancy) & board.diagonal_sliders(color)).is_nonempty()
            || (self.rook_attacks(square, occupancy) & board.orthogonal_sliders(color))
                .is_nonempty()
            || self.leaper_attackers(board, square, color).is_nonempty()
    }

    /// The squares of every `color` piece attacking `target`, plus the open squares between
    /// each attacking slider and `target`.
    ///
    /// With `target` as a King, these are exactly the squares where a capture or an
    /// interposition could stop the check.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// let board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
    /// let vectors = tables.attack_vectors_to(&board, Square::E1, Color::Black);
    /// let expected = Bitboard::from_iter([Square::A1, Square::B1, Square::C1, Square::D1]);
    /// assert_eq!(vectors, expected);
    /// ```
    pub fn attack_vectors_to(&self, board: &Board, target: Square, color: Color) -> Bitboard {
        let occupied = board.occupied();
        let mut vectors = self.leaper_attackers(board, target, color);

        for (kind, sliders) in [
            (PieceKind::Bishop, board.diagonal_sliders(color)),
            (PieceKind::Rook, board.orthogonal_sliders(color)),
        ] {
            for from in self.attack_vectors(color, kind, target) & sliders {
                let span = self.span(target, from);
                if (occupied & span).is_empty() {
                    vectors |= span | from;
                }
            }
        }

        vectors
    }

    /// Counts, for every square, how many pieces of the side to move attack it.
    ///
    /// Sliders reach up to and including the first occupied square in each direction.
    /// Only the side to move's row of `checks` is filled; the other is left cleared.
    pub fn generate_checks(&self, board: &Board, checks: &mut CheckTable) {
        checks.clear();

        let color = board.side_to_move();
        let occupancy = board.occupancy();

        for square in board.color(color) {
            let Some(kind) = board.kind_at(square) else {
                continue;
            };

            checks.mark(color, self.attacks_for(Piece::new(color, kind), square, occupancy));
        }
    }

    /// Squares `piece` on `square` attacks, with sliders stopping at the first occupied square.
    #[inline(always)]
    pub fn attacks_for(
        &self,
        piece: Piece,
        square: Square,
        occupancy: &RotatedOccupancy,
    ) -> Bitboard {
        match piece.kind() {
            PieceKind::Pawn => self.pawn_attacks(piece.color(), square),
            PieceKind::Knight => self.knight_attacks(square),
            PieceKind::Bishop => self.bishop_attacks(square, occupancy),
            PieceKind::Rook => self.rook_attacks(square, occupancy),
            PieceKind::Queen => self.queen_attacks(square, occupancy),
            PieceKind::King => self.king_attacks(square),
        }
    }

    /// Pawns, Knights, and the King of `color` that attack `square`.
    #[inline(always)]
    fn leaper_attackers(&self, board: &Board, square: Square, color: Color) -> Bitboard {
        (self.attack_vectors(color, PieceKind::Pawn, square) & board.pawns(color))
            | (self.attack_vectors(color, PieceKind::Knight, square)
                & board.piece_parts(color, PieceKind::Knight))
            | (self.attack_vectors(color, PieceKind::King, square)
                & board.piece_parts(color, PieceKind::King))
    }
}
