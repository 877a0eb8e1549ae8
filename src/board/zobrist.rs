/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{prng::SplitMix, Color, File, Piece, PieceKind, Square};
use crate::NUM_CASTLING_RIGHTS;

/// Zobrist keys, generated at compile time so they remain constant between builds.
static ZOBRIST_TABLE: ZobristHashTable = ZobristHashTable::new();

/// A key generated from a Zobrist hash.
///
/// The [`crate::Board`] keeps two of these: one over everything, and one over pawns only
/// (the key of the pawn-structure cache).
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ZobristKey(u64);

impl ZobristKey {
    /// Return the inner `u64` of this key.
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Adds/removes `hash_key` to this [`ZobristKey`] with XOR.
    #[inline(always)]
    pub fn hash(&mut self, hash_key: u64) {
        self.0 ^= hash_key;
    }

    /// Adds/removes the hash for `piece` at `square`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut d7 = ZobristKey::default();
    /// d7.hash_piece(Square::D7, Piece::BLACK_PAWN);
    ///
    /// let mut d5 = ZobristKey::default();
    /// d5.hash_piece(Square::D5, Piece::BLACK_PAWN);
    /// assert_ne!(d7, d5);
    ///
    /// // Hashing twice is a no-op
    /// d5.hash_piece(Square::D5, Piece::BLACK_PAWN);
    /// assert_eq!(d5, ZobristKey::default());
    /// ```
    #[inline(always)]
    pub fn hash_piece(&mut self, square: Square, piece: Piece) {
        self.hash(ZOBRIST_TABLE.pieces[square][piece_index(piece)]);
    }

    /// Adds/removes the hash for an en passant target square.
    ///
    /// Only the file matters; the rank is implied by the side to move.
    #[inline(always)]
    pub fn hash_ep_square(&mut self, ep_square: Square) {
        self.hash(ZOBRIST_TABLE.ep_files[ep_square.file().index()]);
    }

    /// Adds/removes the hash for a castling-rights bitmask in `[0, 16)`.
    #[inline(always)]
    pub fn hash_castling_rights(&mut self, rights: usize) {
        self.hash(ZOBRIST_TABLE.castling[rights & (NUM_CASTLING_RIGHTS - 1)]);
    }

    /// Adds/removes the hash for Black being the side to move.
    ///
    /// White to move hashes nothing, so toggling this on every move is sufficient.
    #[inline(always)]
    pub fn hash_side_to_move(&mut self, color: Color) {
        if color == Color::Black {
            self.hash(ZOBRIST_TABLE.black_to_move);
        }
    }

    /// Flips the side to move, regardless of who it was.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.hash(ZOBRIST_TABLE.black_to_move);
    }
}

#[inline(always)]
const fn piece_index(piece: Piece) -> usize {
    piece.color().index() * PieceKind::COUNT + piece.kind().index()
}

/// Random keys for every hashable component of a position.
struct ZobristHashTable {
    pieces: [[u64; Color::COUNT * PieceKind::COUNT]; Square::COUNT],
    ep_files: [u64; File::COUNT],
    castling: [u64; NUM_CASTLING_RIGHTS],
    black_to_move: u64,
}

impl ZobristHashTable {
    const fn new() -> Self {
        let mut rng = SplitMix::new();
        let mut pieces = [[0; Color::COUNT * PieceKind::COUNT]; Square::COUNT];
        let mut ep_files = [0; File::COUNT];
        let mut castling = [0; NUM_CASTLING_RIGHTS];

        let mut i = 0;
        while i < Square::COUNT {
            let mut j = 0;
            while j < Color::COUNT * PieceKind::COUNT {
                let (key, next) = rng.next_const();
                pieces[i][j] = key;
                rng = next;
                j += 1;
            }
            i += 1;
        }

        i = 0;
        while i < File::COUNT {
            let (key, next) = rng.next_const();
            ep_files[i] = key;
            rng = next;
            i += 1;
        }

        // No rights hashes to zero, so a position without castling rights keys only on pieces.
        i = 1;
        while i < NUM_CASTLING_RIGHTS {
            let (key, next) = rng.next_const();
            castling[i] = key;
            rng = next;
            i += 1;
        }

        let (black_to_move, _) = rng.next_const();

        Self {
            pieces,
            ep_files,
            castling,
            black_to_move,
        }
    }
}
