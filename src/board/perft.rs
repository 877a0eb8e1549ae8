/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{AttackTables, Board, MoveGenerator, MoveList};

/// Perform a perft at the specified depth, counting the leaf positions reachable by legal moves.
///
/// Legality comes from filtering the pseudo-legal moves with [`Board::is_legal_after`].
///
/// # Example
/// ```
/// # use tadpole::*;
/// assert_eq!(perft(&Board::default(), AttackTables::get(), 2), 400);
/// ```
#[inline(always)]
pub fn perft(board: &Board, tables: &AttackTables, depth: usize) -> u64 {
    perft_generic::<true, false>(board, tables, depth)
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable after
/// each legal move at the root.
#[inline(always)]
pub fn splitperft(board: &Board, tables: &AttackTables, depth: usize) -> u64 {
    perft_generic::<true, true>(board, tables, depth)
}

/// Generic version of [`perft`] that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, the legal moves at depth 1 are counted instead of made.
/// If `SPLIT` is set to `true`, the node count below each root move is printed.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(
    board: &Board,
    tables: &AttackTables,
    depth: usize,
) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    MoveGenerator::new(tables).generate_moves(board, &mut moves);
    let legal = moves
        .into_iter()
        .filter(|mv| board.is_legal_after(tables, *mv));

    // Bulk counting; no need to recurse again just to apply a single move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return legal.count() as u64;
    }

    legal.fold(0, |nodes, mv| {
        let new_nodes =
            perft_generic::<BULK, false>(&board.with_move_made(mv), tables, depth - 1);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}
