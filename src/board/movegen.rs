/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    AttackTables, Bitboard, Board, CastleSide, Color, Move, MoveList, Piece, PieceKind, Square,
};

/// Every promotion kind, in the order promotions are emitted.
const PROMOTIONS: [PieceKind; 4] = PieceKind::promotions();

/// Which subset of moves a generator call produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GenMode {
    /// Every pseudo-legal move.
    All,
    /// Captures only, with all four promotion kinds.
    Captures,
    /// Captures plus Queen promotions, for quiescence search.
    Quiescence,
}

impl GenMode {
    #[inline(always)]
    const fn quiets(self) -> bool {
        matches!(self, Self::All)
    }

    #[inline(always)]
    const fn promotion_pushes(self) -> bool {
        !matches!(self, Self::Captures)
    }

    #[inline(always)]
    fn promotions(self) -> &'static [PieceKind] {
        match self {
            Self::Quiescence => &[PieceKind::Queen],
            _ => &PROMOTIONS,
        }
    }
}

/// Generates pseudo-legal moves into a caller-owned [`MoveList`].
///
/// Every generator clears the list before filling it and returns the number of moves written.
/// King steps are the only moves guaranteed not to leave the mover in check; everything else
/// must be confirmed with [`Board::is_legal_after`].
#[derive(Clone, Copy, Debug)]
pub struct MoveGenerator<'a> {
    tables: &'a AttackTables,
}

impl<'a> MoveGenerator<'a> {
    #[inline(always)]
    pub const fn new(tables: &'a AttackTables) -> Self {
        Self { tables }
    }

    /// Every pseudo-legal move for the side to move, castling included.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut moves = MoveList::new();
    /// let count = MoveGenerator::new(AttackTables::get()).generate_moves(&Board::default(), &mut moves);
    /// assert_eq!(count, 20);
    /// assert!(moves.iter().any(|mv| *mv == "g1f3"));
    /// ```
    pub fn generate_moves(&self, board: &Board, moves: &mut MoveList) -> usize {
        moves.clear();
        self.pawn_moves(board, GenMode::All, moves);
        self.piece_moves(board, GenMode::All, moves);
        self.king_moves(board, GenMode::All, moves);
        self.castling_moves(board, moves);
        moves.len()
    }

    /// Every capture, including all four promotion kinds on capturing promotions and en passant.
    ///
    /// Non-capturing promotions are left out.
    pub fn generate_captures(&self, board: &Board, moves: &mut MoveList) -> usize {
        moves.clear();
        self.pawn_moves(board, GenMode::Captures, moves);
        self.piece_moves(board, GenMode::Captures, moves);
        self.king_moves(board, GenMode::Captures, moves);
        moves.len()
    }

    /// Captures and promotions for quiescence search.
    ///
    /// Promotions, capturing or not, only ever promote to a Queen here.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    /// let mut moves = MoveList::new();
    /// let count = MoveGenerator::new(AttackTables::get()).generate_qmoves(&board, &mut moves);
    /// assert_eq!(count, 1);
    /// assert_eq!(moves[0], "b7b8q");
    /// ```
    pub fn generate_qmoves(&self, board: &Board, moves: &mut MoveList) -> usize {
        moves.clear();
        self.pawn_moves(board, GenMode::Quiescence, moves);
        self.piece_moves(board, GenMode::Quiescence, moves);
        self.king_moves(board, GenMode::Quiescence, moves);
        moves.len()
    }

    /// Every pseudo-legal pawn move: pushes, captures, promotions, and en passant.
    pub fn generate_pawn_moves(&self, board: &Board, moves: &mut MoveList) -> usize {
        moves.clear();
        self.pawn_moves(board, GenMode::All, moves);
        moves.len()
    }

    /// Moves that may get the side to move out of check.
    ///
    /// Produces safe King steps, captures of a checking piece, interpositions on a checking
    /// ray (pushes included), and en passant when it removes or blocks the checker.
    /// With two checkers a non-King move can only answer one of them; those moves are still
    /// emitted and must be discarded by the caller's legality check.
    pub fn generate_evasions(&self, board: &Board, moves: &mut MoveList) -> usize {
        moves.clear();

        let color = board.side_to_move();
        let opponent = color.opponent();
        let king_square = board.king_square(color);
        let vectors = self.tables.attack_vectors_to(board, king_square, opponent);

        self.king_moves(board, GenMode::All, moves);

        for target in vectors {
            match board.piece_at(target) {
                // Capture the checker
                Some(checker) => {
                    let capturers = self.tables.attackers_no_xray(board, target, color)
                        & !board.piece_parts(color, PieceKind::King);
                    for from in capturers {
                        if let Some(piece) = board.piece_at(from) {
                            let captured = Some(checker);
                            self.push_pawn_aware(piece, from, target, captured, GenMode::All, moves);
                        }
                    }
                }

                // Interpose
                None => {
                    let blockers = self.tables.attackers_no_xray(board, target, color)
                        & !board.kind(PieceKind::Pawn)
                        & !board.kind(PieceKind::King);
                    for from in blockers {
                        if let Some(piece) = board.piece_at(from) {
                            moves.push(Move::quiet(from, target, piece));
                        }
                    }
                    self.pawn_pushes_onto(board, target, moves);
                }
            }
        }

        // En passant either removes a checking pawn or lands on the checking ray
        if let Some(ep_square) = board.ep_square() {
            let victim_square = ep_square.backward_by(color, 1);
            if vectors.intersects(ep_square) || victim_square.is_some_and(|sq| vectors.intersects(sq))
            {
                self.en_passant_moves(board, moves);
            }
        }

        moves.len()
    }

    /// Pawn pushes, captures, promotions, and en passant, restricted by `mode`.
    fn pawn_moves(&self, board: &Board, mode: GenMode, moves: &mut MoveList) {
        let color = board.side_to_move();
        let pawn = Piece::new(color, PieceKind::Pawn);
        let occupied = board.occupied();
        let enemies = Self::capturable(board, color.opponent());
        let last_rank = Bitboard::promotion_rank(color);
        let start_rank = Bitboard::pawn_start_rank(color);

        for from in board.pawns(color) {
            if let Some(to) = from.forward_by(color, 1).filter(|to| !occupied.intersects(*to)) {
                if last_rank.intersects(to) {
                    if mode.promotion_pushes() {
                        self.push_promotions(pawn, from, to, None, mode, moves);
                    }
                } else if mode.quiets() {
                    moves.push(Move::quiet(from, to, pawn));

                    if start_rank.intersects(from) {
                        if let Some(double) = to.forward_by(color, 1) {
                            if !occupied.intersects(double) {
                                moves.push(Move::quiet(from, double, pawn));
                            }
                        }
                    }
                }
            }

            for to in self.tables.pawn_attacks(color, from) & enemies {
                self.push_pawn_aware(pawn, from, to, board.piece_at(to), mode, moves);
            }
        }

        self.en_passant_moves(board, moves);
    }

    /// Pawn pushes (single or double) that land on the empty `target`.
    fn pawn_pushes_onto(&self, board: &Board, target: Square, moves: &mut MoveList) {
        let color = board.side_to_move();
        let pawn = Piece::new(color, PieceKind::Pawn);

        let Some(behind) = target.backward_by(color, 1) else {
            return;
        };

        match board.piece_at(behind) {
            Some(piece) if piece == pawn => {
                self.push_pawn_aware(pawn, behind, target, None, GenMode::All, moves);
            }
            None if Bitboard::double_push_rank(color).intersects(target) => {
                if let Some(from) = behind.backward_by(color, 1) {
                    if board.piece_at(from) == Some(pawn) {
                        moves.push(Move::quiet(from, target, pawn));
                    }
                }
            }
            _ => {}
        }
    }

    /// En passant captures onto the board's en passant square, if it has one.
    fn en_passant_moves(&self, board: &Board, moves: &mut MoveList) {
        let color = board.side_to_move();
        let Some(ep_square) = board.ep_square() else {
            return;
        };
        let Some(victim_square) = ep_square.backward_by(color, 1) else {
            return;
        };

        let victim = Piece::new(color.opponent(), PieceKind::Pawn);
        if board.piece_at(victim_square) != Some(victim) || board.occupied().intersects(ep_square) {
            return;
        }

        let pawn = Piece::new(color, PieceKind::Pawn);
        for from in self.tables.attack_vectors(color, PieceKind::Pawn, ep_square) & board.pawns(color)
        {
            moves.push(Move::en_passant(from, ep_square, pawn, victim, victim_square));
        }
    }

    /// Knight, Bishop, Rook, and Queen moves.
    fn piece_moves(&self, board: &Board, mode: GenMode, moves: &mut MoveList) {
        let color = board.side_to_move();
        let occupancy = board.occupancy();
        let targets = self.targets(board, mode);

        for kind in [
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ] {
            let piece = Piece::new(color, kind);
            for from in board.piece_parts(color, kind) {
                let attacks = self.tables.attacks_for(piece, from, occupancy) & targets;
                Self::serialize(board, piece, from, attacks, moves);
            }
        }
    }

    /// King steps onto squares the opponent does not attack.
    ///
    /// Safety is judged with the King lifted off the board, so it cannot hide from a slider
    /// by stepping along the line it is checked on.
    fn king_moves(&self, board: &Board, mode: GenMode, moves: &mut MoveList) {
        let color = board.side_to_move();
        let opponent = color.opponent();
        let king = Piece::new(color, PieceKind::King);
        let from = board.king_square(color);

        let mut lifted = *board;
        lifted.take(from);

        let safe = (self.tables.king_attacks(from) & self.targets(board, mode))
            .into_iter()
            .filter(|to| !self.tables.is_square_attacked_by(&lifted, *to, opponent))
            .collect();

        Self::serialize(board, king, from, safe, moves);
    }

    /// Castling moves whose King path is clear and unattacked.
    fn castling_moves(&self, board: &Board, moves: &mut MoveList) {
        let color = board.side_to_move();
        let opponent = color.opponent();
        let king = Piece::new(color, PieceKind::King);
        let rook = Piece::new(color, PieceKind::Rook);
        let from = board.king_square(color);

        if from != Square::E1.rank_relative_to(color) {
            return;
        }

        for side in CastleSide::all() {
            let rook_from = side.rook_home(color);
            if !board.can_castle(color, side) || board.piece_at(rook_from) != Some(rook) {
                continue;
            }

            if board.occupied().intersects(self.tables.span(from, rook_from)) {
                continue;
            }

            let to = side.king_destination(color);
            let rook_to = side.rook_destination(color);
            let path_attacked = [from, rook_to, to]
                .into_iter()
                .any(|sq| self.tables.is_square_attacked_by(board, sq, opponent));

            if !path_attacked {
                moves.push(Move::castle(from, to, king, rook_from, rook_to));
            }
        }
    }

    /// Destinations allowed for non-pawn pieces under `mode`.
    #[inline(always)]
    fn targets(&self, board: &Board, mode: GenMode) -> Bitboard {
        let color = board.side_to_move();
        let enemies = Self::capturable(board, color.opponent());
        if mode.quiets() {
            enemies | !board.occupied()
        } else {
            enemies
        }
    }

    /// `color`'s pieces that may be captured. The King never is.
    #[inline(always)]
    fn capturable(board: &Board, color: Color) -> Bitboard {
        board.color(color) ^ board.piece_parts(color, PieceKind::King)
    }

    /// Pushes a move of `piece` to each square of `destinations`, as a capture where occupied.
    #[inline(always)]
    fn serialize(
        board: &Board,
        piece: Piece,
        from: Square,
        destinations: Bitboard,
        moves: &mut MoveList,
    ) {
        for to in destinations {
            match board.piece_at(to) {
                Some(captured) => moves.push(Move::capture(from, to, piece, captured)),
                None => moves.push(Move::quiet(from, to, piece)),
            }
        }
    }

    /// Pushes a move of `piece`, expanding it into promotions when a pawn reaches the last rank.
    #[inline(always)]
    fn push_pawn_aware(
        &self,
        piece: Piece,
        from: Square,
        to: Square,
        captured: Option<Piece>,
        mode: GenMode,
        moves: &mut MoveList,
    ) {
        let promotes = piece.kind() == PieceKind::Pawn
            && Bitboard::promotion_rank(piece.color()).intersects(to);

        match (promotes, captured) {
            (true, _) => self.push_promotions(piece, from, to, captured, mode, moves),
            (false, Some(captured)) => moves.push(Move::capture(from, to, piece, captured)),
            (false, None) => moves.push(Move::quiet(from, to, piece)),
        }
    }

    #[inline(always)]
    fn push_promotions(
        &self,
        pawn: Piece,
        from: Square,
        to: Square,
        captured: Option<Piece>,
        mode: GenMode,
        moves: &mut MoveList,
    ) {
        for &kind in mode.promotions() {
            moves.push(Move::promotion(from, to, pawn, captured, kind));
        }
    }
}
