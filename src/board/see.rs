/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{AttackTables, Bitboard, Board, Color, Move, PieceKind, Square};

/// Maximum number of captures an exchange can contain, the initial move included.
const MAX_EXCHANGE_LENGTH: usize = 32;

/// Reusable scratch space for static exchange evaluation.
///
/// Each exchange overwrites the buffer, so one instance can serve any number of calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapScratch([i32; MAX_EXCHANGE_LENGTH]);

impl SwapScratch {
    #[inline(always)]
    pub const fn new() -> Self {
        Self([0; MAX_EXCHANGE_LENGTH])
    }

    /// Plays out the exchange that follows `mover` moving a piece worth `moved_value` from
    /// `from` to `to`, where it captured something worth `taken_value`.
    ///
    /// Both sides recapture on `to` with their least valuable attacker, and either side may
    /// stop whenever continuing would lose material. Sliders stacked behind a piece that
    /// leaves the line join the exchange once it has gone.
    ///
    /// Returns the material balance from `mover`'s perspective; a non-negative result means
    /// the move does not lose material.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// // Queen takes a Pawn that another Pawn defends
    /// let board = Board::from_fen("4k3/8/3p4/4p3/8/8/4Q3/4K3 w - - 0 1").unwrap();
    /// let mut scratch = SwapScratch::new();
    /// let tables = AttackTables::get();
    /// let score = scratch.swap(tables, &board, Square::E2, Square::E5, Color::White, 900, 100);
    /// assert_eq!(score, -800);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn swap(
        &mut self,
        tables: &AttackTables,
        board: &Board,
        from: Square,
        to: Square,
        mover: Color,
        moved_value: i32,
        taken_value: i32,
    ) -> i32 {
        let scores = &mut self.0;
        let mut gone = Bitboard::from_square(from);

        let mut attackers = (tables.attackers_no_xray(board, to, Color::White)
            | tables.attackers_no_xray(board, to, Color::Black)
            | revealed_behind(tables, board, to, from, gone))
            & !gone;

        scores[0] = taken_value;
        let mut on_square = moved_value;
        let mut side = mover.opponent();
        let mut depth = 1;

        while depth < MAX_EXCHANGE_LENGTH {
            let Some((kind, square)) = least_valuable(board, attackers & board.color(side)) else {
                break;
            };

            scores[depth] = on_square - scores[depth - 1];
            depth += 1;

            on_square = kind.exchange_value();
            gone.set(square);
            attackers = (attackers | revealed_behind(tables, board, to, square, gone)) & !gone;
            side = side.opponent();
        }

        while depth > 1 {
            depth -= 1;
            if scores[depth] > -scores[depth - 1] {
                scores[depth - 1] = -scores[depth];
            }
        }

        scores[0]
    }
}

impl Default for SwapScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackTables {
    /// Static exchange evaluation of `mv` on `board`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// let board = Board::from_fen("4k3/8/8/4p3/8/5N2/8/4K3 w - - 0 1").unwrap();
    /// let mv = Move::from_uci(&board, tables, "f3e5").unwrap();
    /// assert_eq!(tables.see(&board, mv, &mut SwapScratch::new()), 100);
    /// ```
    pub fn see(&self, board: &Board, mv: Move, scratch: &mut SwapScratch) -> i32 {
        let moved = match mv.promotion_kind() {
            Some(promotion) => promotion,
            None => mv.piece().kind(),
        };
        let taken = mv.captured().map_or(0, |piece| piece.kind().exchange_value());

        scratch.swap(
            self,
            board,
            mv.from(),
            mv.to(),
            mv.piece().color(),
            moved.exchange_value(),
            taken,
        )
    }
}

/// The cheapest piece in `attackers`, ordered Pawn, Knight, Bishop, Rook, Queen, King.
#[inline(always)]
fn least_valuable(board: &Board, attackers: Bitboard) -> Option<(PieceKind, Square)> {
    PieceKind::all()
        .into_iter()
        .find_map(|kind| (attackers & board.kind(kind)).lsb().map(|square| (kind, square)))
}

/// The slider (of either color) that starts attacking `target` once `vacated` is empty,
/// ignoring pieces in `gone`.
fn revealed_behind(
    tables: &AttackTables,
    board: &Board,
    target: Square,
    vacated: Square,
    gone: Bitboard,
) -> Bitboard {
    let sliders = if target.is_orthogonal_to(vacated) {
        board.orthogonal_sliders(Color::White) | board.orthogonal_sliders(Color::Black)
    } else if target.is_diagonal_to(vacated) {
        board.diagonal_sliders(Color::White) | board.diagonal_sliders(Color::Black)
    } else {
        return Bitboard::EMPTY_BOARD;
    };

    let blockers = board.occupied() & !gone;
    let nearest = (tables.shadow(target, vacated) & blockers)
        .into_iter()
        .find(|square| (tables.span(vacated, *square) & blockers).is_empty());

    match nearest {
        Some(square) if sliders.intersects(square) => Bitboard::from_square(square),
        _ => Bitboard::EMPTY_BOARD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap(fen: &str, from: Square, to: Square, moved: i32, taken: i32) -> i32 {
        let board = Board::from_fen(fen).unwrap();
        let mover = board.side_to_move();
        SwapScratch::new().swap(AttackTables::get(), &board, from, to, mover, moved, taken)
    }

    #[test]
    fn test_undefended_capture_keeps_the_piece() {
        let score = swap("4k3/8/8/4p3/8/5N2/8/4K3 w - - 0 1", Square::F3, Square::E5, 300, 100);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_losing_capture() {
        let score = swap("4k3/8/3p4/4p3/8/8/4Q3/4K3 w - - 0 1", Square::E2, Square::E5, 900, 100);
        assert_eq!(score, -800);
    }

    #[test]
    fn test_even_trade_stops_at_zero() {
        // Pawn takes Pawn, a Knight recaptures, and White has nothing left
        let score = swap("4k3/8/5n2/3p4/4P3/8/8/4K3 w - - 0 1", Square::E4, Square::D5, 100, 100);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_xray_attacker_joins_exchange() {
        // The Queen on e1 backs up the Rook once it leaves e2
        let fen = "4r2k/8/4p3/8/8/8/4R3/K3Q3 w - - 0 1";
        assert_eq!(swap(fen, Square::E2, Square::E6, 500, 100), 100);

        // Without the Queen the Rook is lost for a Pawn
        let fen = "4r2k/8/4p3/8/8/8/4R3/K7 w - - 0 1";
        assert_eq!(swap(fen, Square::E2, Square::E6, 500, 100), -400);
    }

    #[test]
    fn test_unsafe_pawn_advance() {
        // e5-e6 walks into the d7 pawn
        let score = swap("4k3/3p4/8/4P3/8/8/8/4K3 w - - 0 1", Square::E5, Square::E6, 100, 0);
        assert_eq!(score, -100);

        // With a Rook behind, the recapture evens it out
        let score = swap("4k3/3p4/8/4P3/8/8/8/4RK2 w - - 0 1", Square::E5, Square::E6, 100, 0);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_king_does_not_recapture_into_defence() {
        // Nxf7 with the Bishop on c4 covering f7: the King cannot take back
        let board = Board::from_fen("4k3/5p2/8/6N1/2B5/8/8/4K3 w - - 0 1").unwrap();
        let tables = AttackTables::get();
        let mv = Move::from_uci(&board, tables, "g5f7").unwrap();
        assert_eq!(tables.see(&board, mv, &mut SwapScratch::new()), 100);
    }
}
