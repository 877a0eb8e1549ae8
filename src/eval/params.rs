/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Tunable evaluation weights, in centipawns unless noted otherwise.

/// Penalty for trading pieces while behind in material, compared to the root position.
pub const TRADE_WHEN_LOSING: i32 = 60;

/// Per undeveloped minor piece (or unmoved King) difference between the two sides.
pub const DEVELOPMENT: i32 = 7;

/// Cap on the development term.
pub const DEVELOPMENT_LIMIT: i32 = 36;

/// Per Queen move made while minor pieces are still at home.
pub const QUEEN_TOO_EARLY: i32 = 13;

pub const QUEEN_TOO_EARLY_LIMIT: i32 = 44;

/// Cap on the penalty for heavy pieces crowding out undeveloped ones.
pub const CRAMPED_LIMIT: i32 = 30;

/// A d- or e-pawn still on its starting square.
pub const UNMOVED_CENTER_PAWN: i32 = 3;

/// An unmoved d- or e-pawn with a friendly piece standing in front of it.
pub const BLOCKED_CENTER_PAWN: i32 = 35;

/// Passed pawn bonus, by relative rank.
pub const PASSED_PAWN: [i32; 8] = [0, 7, 14, 40, 90, 140, 230, 450];

pub const DOUBLED_PAWN: i32 = 36;

/// Backward or isolated pawn penalty, by file.
pub const BACKWARD_PAWN: [i32; 8] = [15, 18, 21, 15, 15, 21, 18, 15];

pub const KNIGHT_OUTPOST: i32 = 8;

pub const TWO_BISHOPS: i32 = 10;

pub const ROOK_OPEN_FILE: i32 = 18;

/// Rook on a file not blocked by a friendly pawn in front of it. Also the penalty when it is.
pub const ROOK_HALF_OPEN_FILE: i32 = 11;

/// Rook on a rank with no pawns at all.
pub const ROOK_OPEN_RANK: i32 = 11;

/// Rook on the enemy King's file, by how open that file is.
pub const ROOK_OPPOSITE_KING: i32 = 4;
pub const ROOK_OPPOSITE_KING_HALF_OPEN: i32 = 12;
pub const ROOK_OPPOSITE_KING_OPEN: i32 = 20;

/// A King that can still castle but stands in the center, or forfeited a castling option.
pub const KING_FORFEIT_CASTLE: i32 = 35;

/// Per enemy Bishop or Queen on a diagonal through the King.
pub const KING_DIAGONAL_PRESSURE: i32 = 4;

/// Returned by the King attack score when the attacker has an undefended entry and the
/// King has nowhere safe to go.
pub const KING_ATTACK_SENTINEL: i32 = 10000;

/// Endgame King bonus per relative rank of each adjacent passed pawn.
pub const KING_NEAR_PASSER: i32 = 3;

/// Material units at or above which the opponent's attack is scored in full.
pub const KING_ATTACK_UNITS: i32 = 17;

/// Sides with fewer material units than this and no pawns cannot be scored as winning.
pub const INSUFFICIENT_MATERIAL_UNITS: i32 = 5;

/// Material units of a full set of pieces, excluding pawns.
pub const FULL_MATERIAL_UNITS: i32 = 31;

/// Raw wing balance, indexed `[white wing][black wing]`.
///
/// Wing indices are built from which files of the wing hold a pawn: the outermost file is
/// worth 4, the next 2, and the innermost 1.
#[rustfmt::skip]
const RAW_WING_SCORES: [[i32; 8]; 8] = [
    [ 0, -20, -20, -40, -20, -40, -40, -60],
    [20,   0,   0, -20, -10, -20, -20, -40],
    [20,   0,   0, -20,   0, -20, -30, -40],
    [40,  20,  20,   0,   0,   0, -10, -20],
    [20,   0,   0, -20,   0, -20, -20, -40],
    [40,  30,  10,   0,  20,   0,   0, -10],
    [40,  30,  20,   0,  20,   0,   0, -20],
    [60,  40,  40,  20,  40,  10,  20,   0],
];

/// Wing balance, indexed `[white wing][black wing]`, from White's perspective.
///
/// Symmetrised so that swapping the sides exactly negates the score.
pub const WING_SCORES: [[i32; 8]; 8] = wing_scores();

const fn wing_scores() -> [[i32; 8]; 8] {
    let mut scores = [[0; 8]; 8];
    let mut white = 0;
    while white < 8 {
        let mut black = 0;
        while black < 8 {
            scores[white][black] =
                (RAW_WING_SCORES[white][black] - RAW_WING_SCORES[black][white]) / 8;
            black += 1;
        }
        white += 1;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wing_scores_are_antisymmetric() {
        for white in 0..8 {
            for black in 0..8 {
                assert_eq!(WING_SCORES[white][black], -WING_SCORES[black][white]);
            }
            assert_eq!(WING_SCORES[white][white], 0);
        }
        assert_eq!(WING_SCORES[7][0], 15);
    }
}
