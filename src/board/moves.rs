/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, Result};

use super::{AttackTables, Board, MoveGenerator, Piece, PieceKind, Square};
use crate::MAX_NUM_MOVES;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
///
/// Generators write into a caller-owned list, so no allocation happens during search.
/// The list's length marks the end of the generated moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A move, recorded with everything needed to apply it without consulting the board.
///
/// Besides the origin and destination, a [`Move`] carries the moving piece, the captured
/// piece and the square it was captured on (which differs from the destination for en passant),
/// the promotion kind, and for castling, the rook's origin and destination.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<(Piece, Square)>,
    promotion: Option<PieceKind>,
    castle: Option<(Square, Square)>,
}

impl Move {
    /// A non-capturing move of `piece` from `from` to `to`.
    #[inline(always)]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
            castle: None,
        }
    }

    /// `piece` moves from `from` to `to`, capturing `captured` on `to`.
    #[inline(always)]
    pub const fn capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Self {
            captured: Some((captured, to)),
            ..Self::quiet(from, to, piece)
        }
    }

    /// A pawn moves diagonally to the empty `to`, capturing the pawn on `captured_square`.
    #[inline(always)]
    pub const fn en_passant(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Piece,
        captured_square: Square,
    ) -> Self {
        Self {
            captured: Some((captured, captured_square)),
            ..Self::quiet(from, to, piece)
        }
    }

    /// A pawn reaches the last rank and becomes `promotion`, capturing `captured` if present.
    #[inline(always)]
    pub const fn promotion(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promotion: PieceKind,
    ) -> Self {
        let captured = match captured {
            Some(captured) => Some((captured, to)),
            None => None,
        };

        Self {
            captured,
            promotion: Some(promotion),
            ..Self::quiet(from, to, piece)
        }
    }

    /// The king moves from `from` to `to`, and the rook from `rook_from` to `rook_to`.
    #[inline(always)]
    pub const fn castle(
        from: Square,
        to: Square,
        king: Piece,
        rook_from: Square,
        rook_to: Square,
    ) -> Self {
        Self {
            castle: Some((rook_from, rook_to)),
            ..Self::quiet(from, to, king)
        }
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The piece being moved, as it was before any promotion.
    #[inline(always)]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// The captured piece, if any.
    #[inline(always)]
    pub const fn captured(&self) -> Option<Piece> {
        match self.captured {
            Some((piece, _)) => Some(piece),
            None => None,
        }
    }

    /// The square the captured piece stood on, if any.
    #[inline(always)]
    pub const fn captured_square(&self) -> Option<Square> {
        match self.captured {
            Some((_, square)) => Some(square),
            None => None,
        }
    }

    #[inline(always)]
    pub const fn promotion_kind(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// The rook's origin and destination, if this is a castling move.
    #[inline(always)]
    pub const fn castle_rook(&self) -> Option<(Square, Square)> {
        self.castle
    }

    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.castle.is_some()
    }

    /// Returns `true` if the captured piece did not stand on the destination square.
    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.captured_square().is_some_and(|sq| sq != self.to)
    }

    /// Returns `true` if this is a pawn advancing two ranks.
    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.piece.kind(), PieceKind::Pawn) && self.from.distance_ranks(self.to) == 2
    }

    /// Finds the move described by `uci` (such as `e2e4` or `e7e8q`) among the
    /// pseudo-legal moves of `board`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::default();
    /// let mv = Move::from_uci(&board, AttackTables::get(), "g1f3").unwrap();
    /// assert_eq!(mv.piece(), Piece::WHITE_KNIGHT);
    /// assert!(Move::from_uci(&board, AttackTables::get(), "e2e5").is_err());
    /// ```
    pub fn from_uci(board: &Board, tables: &AttackTables, uci: &str) -> Result<Self> {
        let mut moves = MoveList::new();
        MoveGenerator::new(tables).generate_moves(board, &mut moves);

        moves
            .into_iter()
            .find(|mv| *mv == uci)
            .ok_or_else(|| anyhow!("{uci:?} is not a pseudo-legal move in {}", board.to_fen()))
    }

    /// Converts this move into UCI notation: origin, destination, and a lowercase promotion kind.
    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(promotion) => format!("{}{}{}", self.from, self.to, promotion.char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.to_uci(), self.piece.name())?;
        if let Some((captured, square)) = self.captured {
            write!(f, " takes {} on {square}", captured.name())?;
        }
        if let Some((rook_from, rook_to)) = self.castle {
            write!(f, ", rook {rook_from}{rook_to}")?;
        }
        write!(f, ")")
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    /// Compares against a UCI string, so tests can write `mv == "e2e4"`.
    fn eq(&self, other: &T) -> bool {
        self.to_uci() == other.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_records() {
        let push = Move::quiet(Square::E2, Square::E4, Piece::WHITE_PAWN);
        assert!(push.is_pawn_double_push());
        assert!(!push.is_capture());
        assert_eq!(push, "e2e4");

        let ep = Move::en_passant(
            Square::E5,
            Square::D6,
            Piece::WHITE_PAWN,
            Piece::BLACK_PAWN,
            Square::D5,
        );
        assert!(ep.is_capture());
        assert!(ep.is_en_passant());
        assert_eq!(ep.captured_square(), Some(Square::D5));

        let promo = Move::promotion(
            Square::B7,
            Square::A8,
            Piece::WHITE_PAWN,
            Some(Piece::BLACK_ROOK),
            PieceKind::Knight,
        );
        assert_eq!(promo.to_uci(), "b7a8n");
        assert!(!promo.is_en_passant());

        let castle = Move::castle(
            Square::E8,
            Square::C8,
            Piece::BLACK_KING,
            Square::A8,
            Square::D8,
        );
        assert!(castle.is_castle());
        assert_eq!(castle.castle_rook(), Some((Square::A8, Square::D8)));
    }
}
