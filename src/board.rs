/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Attacker, x-ray, and check queries against a [`Board`].
mod attacks;
/// A set of squares, represented as a 64-bit integer.
mod bitboard;
/// Pseudo-legal move generation: full, captures-only, quiescence, and evasions.
mod movegen;
/// The [`Move`] record and the fixed-capacity [`MoveList`].
mod moves;
/// Perft node counting, used to validate move generation.
mod perft;
/// Colors, piece kinds, and pieces.
mod piece;
/// The [`Board`] itself: placement, incremental scores, and FEN handling.
mod position;
/// Const pseudo-random number generation for Zobrist keys.
mod prng;
/// Squares, files, ranks, and 0x88 padded squares.
mod square;
/// Static exchange evaluation.
mod see;
/// Precomputed geometry and sliding-attack tables.
mod tables;
/// Zobrist hashing.
mod zobrist;

pub use attacks::*;
pub use bitboard::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use see::*;
pub use square::*;
pub use tables::*;
pub use zobrist::*;
