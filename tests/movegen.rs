/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tadpole::{
    AttackTables, Board, Move, MoveGenerator, MoveList, PieceKind, FEN_KIWIPETE, FEN_STARTPOS,
};

type Generate = fn(&MoveGenerator<'static>, &Board, &mut MoveList) -> usize;

fn legal(fen: &str, generate: Generate) -> Vec<String> {
    let tables = AttackTables::get();
    let board = Board::from_fen(fen).unwrap();
    let mut moves = MoveList::new();
    generate(&MoveGenerator::new(tables), &board, &mut moves);

    let mut legal = moves
        .into_iter()
        .filter(|mv| board.is_legal_after(tables, *mv))
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>();
    legal.sort();
    legal
}

#[test]
fn test_legal_move_counts() {
    for (fen, expected) in [
        (FEN_STARTPOS, 20),
        (FEN_KIWIPETE, 48),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 14),
        ("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 6),
        ("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 44),
    ] {
        assert_eq!(legal(fen, MoveGenerator::generate_moves).len(), expected, "{fen}");
    }
}

#[test]
fn test_captures_are_the_capturing_subset() {
    let tables = AttackTables::get();
    for fen in [FEN_KIWIPETE, "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"] {
        let board = Board::from_fen(fen).unwrap();
        let captures = legal(fen, MoveGenerator::generate_captures);
        let expected = legal(fen, MoveGenerator::generate_moves)
            .into_iter()
            .filter(|uci| {
                let mv = Move::from_uci(&board, tables, uci).unwrap();
                mv.is_capture()
            })
            .collect::<Vec<_>>();
        assert_eq!(captures, expected, "{fen}");
    }

    assert_eq!(legal(FEN_KIWIPETE, MoveGenerator::generate_captures).len(), 8);
}

#[test]
fn test_qmoves_only_promote_to_queens() {
    let fen = "r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1";
    assert_eq!(legal(fen, MoveGenerator::generate_qmoves), ["b7a8q", "b7b8q"]);

    // Captures still include every promotion kind on capturing promotions
    let captures = legal(fen, MoveGenerator::generate_captures);
    assert_eq!(captures.len(), PieceKind::promotions().len());
}

#[test]
fn test_evasions_match_legal_moves_in_check() {
    for fen in [
        // Rook adjacent to the King
        "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1",
        // Bishop check that can be blocked or captured
        "4k3/8/8/8/1b6/8/8/RN2K2R w KQ - 0 1",
        // Knight check
        "4k3/8/8/8/8/3n4/8/R3K2R w KQ - 0 1",
        // Double check
        "4k3/8/8/8/1b6/8/8/4K2r w - - 0 1",
        // Pawn check answered by en passant
        "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1",
        // Checkmate
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ] {
        assert_eq!(
            legal(fen, MoveGenerator::generate_evasions),
            legal(fen, MoveGenerator::generate_moves),
            "{fen}"
        );
    }

    assert!(legal("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1", MoveGenerator::generate_evasions)
        .contains(&String::from("e4d3")));
}

#[test]
fn test_pawn_moves_subset() {
    let tables = AttackTables::get();
    let board = Board::default();
    let mut moves = MoveList::new();
    let count = MoveGenerator::new(tables).generate_pawn_moves(&board, &mut moves);

    assert_eq!(count, 16);
    assert!(moves.iter().all(|mv| mv.piece().kind() == PieceKind::Pawn));
}
