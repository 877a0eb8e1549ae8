/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Seed for the Zobrist key stream. Changing it changes every hash key.
const SEED: u64 = 0x5EED_0F_7AD_F0_1E5;

/// A `const`-evaluable pseudo-random number generator using the "splitmix64" algorithm.
///
/// Only used to fill the Zobrist table at compile time, so keys stay identical between builds.
/// Reference: <https://prng.di.unimi.it/splitmix64.c>
pub(crate) struct SplitMix(u64);

impl SplitMix {
    /// A generator seeded with the library's seed.
    #[inline(always)]
    pub(crate) const fn new() -> Self {
        Self(SEED)
    }

    /// Returns `(next, Self)`, since `const fn`s cannot take `&mut self`.
    #[inline(always)]
    pub(crate) const fn next_const(self) -> (u64, Self) {
        let state = self.0.wrapping_add(0x9E3779B97F4A7C15);

        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);

        (z ^ (z >> 31), Self(state))
    }
}
