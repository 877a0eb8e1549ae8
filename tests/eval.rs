/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tadpole::{
    score_pawns, AttackTables, Board, Evaluator, Move, PawnFlags, PawnTable, FEN_KIWIPETE,
    FEN_STARTPOS,
};

const WINDOW: i32 = 30_000;

fn score(evaluator: &mut Evaluator, fen: &str) -> i32 {
    let board = Board::from_fen(fen).unwrap();
    evaluator.score_position(&board, -WINDOW, WINDOW)
}

#[test]
fn test_startpos_is_balanced() {
    let mut evaluator = Evaluator::new(AttackTables::get());
    assert_eq!(score(&mut evaluator, FEN_STARTPOS), 0);
}

#[test]
fn test_mirrored_positions_score_the_same_for_the_side_to_move() {
    let mut evaluator = Evaluator::new(AttackTables::get());
    for fen in [
        FEN_KIWIPETE,
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "6k1/5ppp/8/8/8/8/1P3PPP/6K1 b - - 0 1",
    ] {
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(
            evaluator.score_position(&board, -WINDOW, WINDOW),
            evaluator.score_position(&board.mirrored(), -WINDOW, WINDOW),
            "{fen}"
        );
    }
}

#[test]
fn test_extra_material_is_good() {
    let mut evaluator = Evaluator::new(AttackTables::get());
    let white = score(&mut evaluator, "k7/8/8/8/8/8/8/3QK3 w - - 0 1");
    let black = score(&mut evaluator, "k7/8/8/8/8/8/8/3QK3 b - - 0 1");
    assert!(white > 500);
    assert_eq!(white, -black);
}

#[test]
fn test_pawn_cache_reuses_and_invalidates() {
    let tables = AttackTables::get();
    let mut evaluator = Evaluator::with_pawn_table(tables, PawnTable::new(1 << 10));
    let board = Board::default();

    evaluator.score_position(&board, -WINDOW, WINDOW);
    assert_eq!(evaluator.pawn_table().misses(), 1);

    // A Knight move leaves the pawn structure alone
    let knight = board.with_move_made(Move::from_uci(&board, tables, "g1f3").unwrap());
    evaluator.score_position(&knight, -WINDOW, WINDOW);
    assert_eq!(evaluator.pawn_table().hits(), 1);
    assert_eq!(evaluator.pawn_table().misses(), 1);

    let pawn = knight.with_move_made(Move::from_uci(&knight, tables, "e7e5").unwrap());
    evaluator.score_position(&pawn, -WINDOW, WINDOW);
    assert_eq!(evaluator.pawn_table().misses(), 2);
}

#[test]
fn test_pawn_cache_shares_flags_between_piece_placements() {
    let mut table = PawnTable::new(1 << 10);
    let first = Board::from_fen("r3k2r/pp3ppp/2n5/3p4/3P4/2N5/PP3PPP/R3K2R w KQkq - 0 1").unwrap();
    let second = Board::from_fen("4k3/pp3ppp/8/3p4/3P4/8/PP3PPP/2Q1K3 b - - 0 1").unwrap();
    assert_eq!(first.pawn_key(), second.pawn_key());

    let cached = *table.probe(&first);
    let reused = *table.probe(&second);
    assert_eq!((table.hits(), table.misses()), (1, 1));
    assert_eq!(cached, reused);

    let mut fresh = PawnFlags::new();
    score_pawns(&second, &mut fresh);
    assert_eq!(reused, fresh);

    // Moving a single pawn invalidates the entry
    let pushed = Board::from_fen("4k3/pp3ppp/8/3p4/3P4/7P/PP3PP1/2Q1K3 b - - 0 1").unwrap();
    let mut expected = PawnFlags::new();
    score_pawns(&pushed, &mut expected);
    assert_eq!(*table.probe(&pushed), expected);
    assert_eq!(table.misses(), 2);
}

#[test]
fn test_breakdown_matches_score() {
    let mut evaluator = Evaluator::new(AttackTables::get());
    let board = Board::from_fen(FEN_KIWIPETE).unwrap();

    let breakdown = evaluator.evaluate(&board);
    assert_eq!(breakdown.score(), evaluator.score_position(&board, -WINDOW, WINDOW));

    let text = breakdown.to_string();
    assert!(text.contains("Score:"));
}
