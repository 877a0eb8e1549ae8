/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{AttackTables, Bitboard, Board, Color, PieceKind, Rank, Square, SwapScratch};

/// King shelter, king-zone attacks, and endgame King activity.
mod king;
/// Tunable evaluation weights.
pub mod params;
/// Pawn structure scoring and its cache.
mod pawns;
/// Piece-square tables.
mod psqt;

pub use king::*;
pub use pawns::*;
pub use psqt::*;

use params::*;

/// Material balance and total material of the position a search started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RootMaterial {
    /// White material minus Black material, in centipawns.
    balance: i32,

    /// Material units of both sides together.
    units: i32,
}

/// Encapsulates the logic of scoring a chess position.
///
/// Generally, a high score is good for White, and a low score is good for Black.
/// However, during a negamax search, positions must be evaluated from the side-to-move's perspective.
/// That is, if it is Black's turn, a "good" evaluation for Black will be a positive number.
///
/// An [`Evaluator`] owns its pawn cache and exchange scratch space, so each search thread
/// should have its own. Only the [`AttackTables`] are shared.
pub struct Evaluator<'a> {
    tables: &'a AttackTables,
    pawns: PawnTable,
    swap: SwapScratch,
    root: Option<RootMaterial>,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] with a default-sized pawn cache.
    pub fn new(tables: &'a AttackTables) -> Self {
        Self::with_pawn_table(tables, PawnTable::default())
    }

    pub fn with_pawn_table(tables: &'a AttackTables, pawns: PawnTable) -> Self {
        Self {
            tables,
            pawns,
            swap: SwapScratch::new(),
            root: None,
        }
    }

    /// Remembers the material of `board` as the root of the upcoming search.
    ///
    /// While a root is set, a side that was behind there is discouraged from trading pieces.
    pub fn set_root(&mut self, board: &Board) {
        self.root = Some(RootMaterial {
            balance: board.material(),
            units: board.material_units(Color::White) + board.material_units(Color::Black),
        });
    }

    pub fn clear_root(&mut self) {
        self.root = None;
    }

    #[inline(always)]
    pub fn pawn_table(&self) -> &PawnTable {
        &self.pawns
    }

    /// Evaluate `board` from the side-to-move's perspective.
    ///
    /// A positive/high number is good for the side-to-move, while a negative number is better for the opponent.
    /// A score of 0 is considered equal.
    ///
    /// The window bounds are accepted for future lazy-evaluation cutoffs; every term is
    /// computed regardless of them.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut evaluator = Evaluator::new(AttackTables::get());
    /// let board = Board::default();
    /// assert_eq!(evaluator.score_position(&board, -30000, 30000), 0);
    /// ```
    #[inline(always)]
    pub fn score_position(&mut self, board: &Board, _alpha: i32, _beta: i32) -> i32 {
        self.evaluate(board).score()
    }

    /// Computes every evaluation term of `board` separately.
    pub fn evaluate(&mut self, board: &Board) -> EvalBreakdown {
        let flags = *self.pawns.probe(board);
        let units = Color::all().map(|color| board.material_units(color));

        let mut eval = EvalBreakdown {
            side_to_move: board.side_to_move(),
            material: board.material(),
            positional: board.positional(),
            pawns: flags.score,
            center: flags.center_score,
            ..Default::default()
        };

        let undeveloped = Color::all().map(|color| undeveloped(board, color));
        for color in Color::all() {
            let sign = color.negation_multiplier() as i32;
            eval.pieces += sign * self.score_pieces(board, &flags, color, undeveloped[color]);
            eval.passed_pawns += sign
                * scaled_by_material(
                    self.score_passed_pawns(board, &flags, color),
                    units[color.opponent()],
                );
            eval.king_safety[color] = king_safety(self.tables, board, &flags, color);
        }

        if undeveloped.iter().any(|pieces| pieces.is_nonempty()) {
            eval.development = development(board, undeveloped);
        }

        if let Some(root) = self.root {
            eval.trade = trade_down(root, units);
        }

        let behind = if flags.endgame_score > 0 {
            Color::Black
        } else {
            Color::White
        };
        eval.wings = scaled_by_material(flags.endgame_score, units[behind]);

        eval.total = eval.material
            + eval.positional
            + eval.pieces
            + eval.development
            + eval.trade
            + eval.pawns
            + eval.wings
            + eval.passed_pawns
            + eval.king_safety[Color::White]
            - eval.king_safety[Color::Black];

        // A side without pawns and with less than a Rook cannot win
        if units[Color::White] < INSUFFICIENT_MATERIAL_UNITS && flags.pawn_counts[Color::White] == 0
        {
            eval.total = eval.total.min(0);
        }
        if units[Color::Black] < INSUFFICIENT_MATERIAL_UNITS && flags.pawn_counts[Color::Black] == 0
        {
            eval.total = eval.total.max(0);
        }

        eval
    }

    /// Mobility, placement, and development terms of `color`'s minor and major pieces.
    fn score_pieces(
        &self,
        board: &Board,
        flags: &PawnFlags,
        color: Color,
        undeveloped: Bitboard,
    ) -> i32 {
        let tables = self.tables;
        let occupancy = board.occupancy();
        let opponent = color.opponent();
        let enemy_king = board.king_square(opponent);
        let moves = |square: Square| board.move_count(square) as i32;

        // Pieces wandering about while others are still at home
        let cramped = |square: Square| {
            let moved = moves(square);
            let per_move = if undeveloped.is_empty() { 2 } else { 4 + moved };
            (per_move * moved).min(CRAMPED_LIMIT)
        };

        let mut score = 0;

        for square in board.piece_parts(color, PieceKind::Knight) {
            score -= ((moves(square) - 1) * moves(square)).min(CRAMPED_LIMIT);

            if !board.pawns(opponent).intersects(PawnMasks::get().outpost(color, square)) {
                let rank = square.rank().relative_to(color).index() as i32;
                score += KNIGHT_OUTPOST + 2 * (rank - 4);
            }
        }

        let bishops = board.piece_parts(color, PieceKind::Bishop);
        score += (bishops.population() as i32 - 1).max(0) * TWO_BISHOPS;
        for square in bishops {
            score -= ((moves(square) - 1) * moves(square)).min(CRAMPED_LIMIT);
            score += tables.bishop_mobility(square, occupancy);
        }

        for square in board.piece_parts(color, PieceKind::Rook) {
            score += tables.rook_mobility(square, occupancy) * 2;

            let open = flags.open_files.intersects(square);
            let half_open = !flags.closed_files[color].intersects(square);
            if open {
                score += ROOK_OPEN_FILE;
            } else if half_open {
                score += ROOK_HALF_OPEN_FILE;
            } else {
                score -= ROOK_HALF_OPEN_FILE;
            }
            if flags.open_ranks.intersects(square) {
                score += ROOK_OPEN_RANK;
            }

            if square.file() == enemy_king.file() {
                score += if open {
                    ROOK_OPPOSITE_KING_OPEN
                } else if half_open {
                    ROOK_OPPOSITE_KING_HALF_OPEN
                } else {
                    ROOK_OPPOSITE_KING
                };
            }

            score -= cramped(square);
        }

        for square in board.piece_parts(color, PieceKind::Queen) {
            if undeveloped.is_empty() {
                score += tables.rook_mobility(square, occupancy);
                score += tables.bishop_mobility(square, occupancy);
            }
            score -= cramped(square);
        }

        score
    }

    /// Bonus for `color`'s passed pawns, before scaling by the opponent's material.
    ///
    /// Pawns about to promote are tested with exchange evaluation: first whether the next
    /// square is safe, then whether the promotion square is. A pawn the lone enemy King can
    /// no longer catch is worth its bonus again.
    fn score_passed_pawns(&mut self, board: &Board, flags: &PawnFlags, color: Color) -> i32 {
        let opponent = color.opponent();
        let enemy_king = board.king_square(opponent);
        let lone_king = board.color(opponent) == board.piece_parts(opponent, PieceKind::King);
        let pawn_to_move = board.side_to_move() == color;
        let mut score = 0;

        for square in flags.passed[color] {
            let value = PASSED_PAWN[square.rank().relative_to(color).index()];
            score += value >> 1;

            let Some(advance) = square.forward_by(color, 1) else {
                continue;
            };
            if board.piece_at(advance).is_some()
                || advance.rank().relative_to(color).index() < Rank::SEVEN.index()
            {
                continue;
            }

            score += value >> 3;
            let pawn = PieceKind::Pawn.exchange_value();
            if self.swap.swap(self.tables, board, square, advance, color, pawn, 0) < 0 {
                continue;
            }
            score += value >> 1;

            let queening = Square::new(square.file(), Rank::EIGHT.relative_to(color));
            if self.swap.swap(self.tables, board, square, queening, color, pawn, 0) >= 0 {
                score += value >> 1;
            }

            if lone_king
                && !PawnMasks::get()
                    .runaway(color, square, pawn_to_move)
                    .intersects(enemy_king)
            {
                score += value;
            }
        }

        score
    }
}

/// Minor pieces still on `color`'s back rank, plus the King if it is still on its e-file home.
fn undeveloped(board: &Board, color: Color) -> Bitboard {
    let back_rank = Bitboard::from_rank(Rank::ONE.relative_to(color));
    let minors =
        board.piece_parts(color, PieceKind::Knight) | board.piece_parts(color, PieceKind::Bishop);
    let home = Square::E1.rank_relative_to(color);

    (minors & back_rank) | (board.piece_parts(color, PieceKind::King) & home)
}

/// Opening terms, from White's perspective: development lead, early Queen sorties, and
/// blocked center pawns.
fn development(board: &Board, undeveloped: [Bitboard; Color::COUNT]) -> i32 {
    let lead = undeveloped[Color::Black].population() as i32
        - undeveloped[Color::White].population() as i32;
    let mut score = (lead * DEVELOPMENT).clamp(-DEVELOPMENT_LIMIT, DEVELOPMENT_LIMIT);

    for color in Color::all() {
        let sign = color.negation_multiplier() as i32;
        let queens = board.piece_parts(color, PieceKind::Queen);
        let queen_moves = queens
            .into_iter()
            .map(|square| board.move_count(square) as i32)
            .sum::<i32>();

        if undeveloped[color].is_nonempty() && queens.is_nonempty() && queen_moves > 1 {
            score -= sign * (queen_moves * QUEEN_TOO_EARLY).min(QUEEN_TOO_EARLY_LIMIT);
        }

        for pawn in [Square::D2, Square::E2] {
            let pawn = pawn.rank_relative_to(color);
            if !board.pawns(color).intersects(pawn) {
                continue;
            }
            score -= sign * UNMOVED_CENTER_PAWN;

            let blocked = pawn
                .forward_by(color, 1)
                .is_some_and(|front| board.color(color).intersects(front));
            if blocked {
                score -= sign * BLOCKED_CENTER_PAWN;
            }
        }
    }

    score
}

/// Penalty, from White's perspective, for the side that was behind at the root trading
/// pieces while still behind.
fn trade_down(root: RootMaterial, units: [i32; Color::COUNT]) -> i32 {
    let (white, black) = (units[Color::White], units[Color::Black]);
    if white + black >= root.units {
        return 0;
    }

    if root.balance < 0 && black > white {
        -TRADE_WHEN_LOSING
    } else if root.balance > 0 && white > black {
        TRADE_WHEN_LOSING
    } else {
        0
    }
}

/// Scales an endgame term by how little material the opponent has left.
#[inline(always)]
fn scaled_by_material(score: i32, opponent_units: i32) -> i32 {
    score * (FULL_MATERIAL_UNITS - opponent_units).max(0) / FULL_MATERIAL_UNITS
}

/// Every term of an evaluation, from White's perspective unless noted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub side_to_move: Color,
    pub material: i32,
    pub positional: i32,
    pub pieces: i32,
    pub development: i32,
    pub trade: i32,
    pub pawns: i32,
    pub wings: i32,
    pub passed_pawns: i32,

    /// `[color]`: King safety from that color's own perspective.
    pub king_safety: [i32; Color::COUNT],

    /// Center pawn balance. Reported only; not part of the total.
    pub center: i32,

    /// Sum of the terms, after clamping drawn material.
    pub total: i32,
}

impl EvalBreakdown {
    /// The total from the side-to-move's perspective.
    #[inline(always)]
    pub fn score(&self) -> i32 {
        self.total * self.side_to_move.negation_multiplier() as i32
    }
}

impl fmt::Display for EvalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("Material", self.material),
            ("Positional", self.positional),
            ("Pieces", self.pieces),
            ("Development", self.development),
            ("Trades", self.trade),
            ("Pawns", self.pawns),
            ("Wings", self.wings),
            ("Passed pawns", self.passed_pawns),
            ("White king", self.king_safety[Color::White]),
            ("Black king", -self.king_safety[Color::Black]),
        ];

        for (name, value) in rows {
            writeln!(f, "{name:<14}{value:>+7}")?;
        }
        writeln!(f, "{:<14}{:>+7}", "(Center)", self.center)?;
        writeln!(f, "{:-<21}", "")?;
        writeln!(f, "{:<14}{:>+7}", "Total", self.total)?;

        let winning_side = match self.total {
            0 => "N/A",
            total if total > 0 => Color::White.name(),
            _ => Color::Black.name(),
        };
        writeln!(f, "\nWinning side: {winning_side}")?;
        write!(f, "Score: {} ({} to move)", self.score(), self.side_to_move.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_KIWIPETE;

    fn score(fen: &str) -> i32 {
        let board = Board::from_fen(fen).unwrap();
        Evaluator::new(AttackTables::get()).score_position(&board, -30000, 30000)
    }

    #[test]
    fn test_eval_is_symmetric() {
        let fens = [
            FEN_KIWIPETE,
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "8/5pk1/6p1/3P4/8/6P1/5PK1/8 w - - 0 1",
            "2r3k1/1q3ppp/8/8/8/8/5PPP/2R1Q1K1 b - - 0 1",
        ];
        let tables = AttackTables::get();

        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            let mut evaluator = Evaluator::new(tables);
            let mirrored = board.mirrored();

            let white = evaluator.evaluate(&board);
            let black = evaluator.evaluate(&mirrored);
            assert_eq!(white.total, -black.total, "{fen}");
            assert_eq!(white.score(), black.score(), "{fen}");
        }
    }

    #[test]
    fn test_side_to_move_flips_sign() {
        let white = score("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let black = score("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert!(white > 0);
        assert!(black < 0);
    }

    #[test]
    fn test_insufficient_material_is_drawn() {
        assert_eq!(score("4k3/8/8/8/8/8/8/4KN2 w - - 0 1"), 0);
        assert_eq!(score("4k3/8/8/8/8/8/8/3BK3 b - - 0 1"), 0);
        assert!(score("4k3/8/8/8/8/8/8/R3K3 w - - 0 1") > 400);
    }

    #[test]
    fn test_trading_down_when_ahead() {
        let tables = AttackTables::get();
        let mut evaluator = Evaluator::new(tables);
        let traded = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(evaluator.evaluate(&traded).trade, 0);

        evaluator.set_root(&Board::from_fen("r3k3/8/8/8/8/8/8/RR2K3 w - - 0 1").unwrap());
        assert_eq!(evaluator.evaluate(&traded).trade, TRADE_WHEN_LOSING);

        evaluator.clear_root();
        assert_eq!(evaluator.evaluate(&traded).trade, 0);
    }

    #[test]
    fn test_passed_pawn_on_seventh() {
        let tables = AttackTables::get();
        let mut evaluator = Evaluator::new(tables);

        // Nothing stops the pawn and the lone King is too far away
        let free = Board::from_fen("k7/6P1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let value = PASSED_PAWN[6];
        let expected = (value >> 1) + (value >> 3) + (value >> 1) + (value >> 1) + value;
        assert_eq!(evaluator.evaluate(&free).passed_pawns, expected);

        // The Rook guards the promotion square
        let guarded = Board::from_fen("k5r1/6P1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(evaluator.evaluate(&guarded).passed_pawns < expected);
    }

    #[test]
    fn test_pawn_cache_is_used() {
        let tables = AttackTables::get();
        let mut evaluator = Evaluator::new(tables);
        let board = Board::default();

        evaluator.score_position(&board, 0, 0);
        evaluator.score_position(&board, 0, 0);
        assert_eq!(evaluator.pawn_table().misses(), 1);
        assert_eq!(evaluator.pawn_table().hits(), 1);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let board = Board::from_fen(FEN_KIWIPETE).unwrap();
        let eval = Evaluator::new(AttackTables::get()).evaluate(&board);
        let sum = eval.material
            + eval.positional
            + eval.pieces
            + eval.development
            + eval.trade
            + eval.pawns
            + eval.wings
            + eval.passed_pawns
            + eval.king_safety[Color::White]
            - eval.king_safety[Color::Black];
        assert_eq!(eval.total, sum);
        assert!(eval.to_string().contains("Score:"));
    }
}
