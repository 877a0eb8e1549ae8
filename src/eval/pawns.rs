/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::OnceLock;

use super::params::{BACKWARD_PAWN, DOUBLED_PAWN, WING_SCORES};
use super::Psqt;
use crate::{Bitboard, Board, Color, File, Square, ZobristKey};

/// Default number of slots in a [`PawnTable`].
pub const DEFAULT_PAWN_TABLE_SIZE: usize = 1 << 14;

/// Files making up each wing, outermost first. The outermost file is worth 4 in a wing
/// index, the next 2, the innermost 1.
const QUEENSIDE: [File; 3] = [File::A, File::B, File::C];
const KINGSIDE: [File; 3] = [File::H, File::G, File::F];
const CENTER: [File; 2] = [File::D, File::E];

/// Geometric masks used to classify pawns, per color and square.
pub struct PawnMasks {
    /// Squares ahead on the same and adjacent files. No enemy pawn here means passed.
    passed: [[Bitboard; Square::COUNT]; Color::COUNT],

    /// Adjacent-file squares up to three ranks behind, plus the two side neighbours.
    support: [[Bitboard; Square::COUNT]; Color::COUNT],

    /// Squares ahead on the adjacent files, where enemy pawns could come from to attack.
    outpost: [[Bitboard; Square::COUNT]; Color::COUNT],

    /// Squares a lone King must stand on to catch a pawn here, with the pawn's side to move.
    runaway: [[Bitboard; Square::COUNT]; Color::COUNT],
}

impl PawnMasks {
    fn new() -> Self {
        let mut masks = Self {
            passed: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
            support: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
            outpost: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
            runaway: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
        };

        for color in Color::all() {
            for square in Square::iter() {
                for ahead in 1..8 {
                    for files in -1..=1 {
                        if let Some(to) = square
                            .forward_by(color, ahead)
                            .and_then(|to| to.offset(files, 0))
                        {
                            masks.passed[color][square].set(to);
                            if files != 0 {
                                masks.outpost[color][square].set(to);
                            }
                        }
                    }
                }

                for files in [-1, 1] {
                    for behind in 0..=3 {
                        if let Some(from) = square
                            .backward_by(color, behind)
                            .and_then(|from| from.offset(files, 0))
                        {
                            masks.support[color][square].set(from);
                        }
                    }
                }

                // The pawn needs `reach` moves to promote, and the King must be within that many
                // files of it, somewhere on or ahead of its rank.
                let rank = square.rank().relative_to(color).index() as i8;
                let reach = 7 - rank;
                for ahead in 0..=reach {
                    for files in -reach..=reach {
                        if let Some(to) = square
                            .forward_by(color, ahead)
                            .and_then(|to| to.offset(files, 0))
                        {
                            masks.runaway[color][square].set(to);
                        }
                    }
                }
            }
        }

        masks
    }

    /// A process-wide instance, built on first use.
    #[inline(always)]
    pub fn get() -> &'static Self {
        static MASKS: OnceLock<PawnMasks> = OnceLock::new();
        MASKS.get_or_init(Self::new)
    }

    #[inline(always)]
    pub fn passed(&self, color: Color, square: Square) -> Bitboard {
        self.passed[color][square]
    }

    #[inline(always)]
    pub fn support(&self, color: Color, square: Square) -> Bitboard {
        self.support[color][square]
    }

    #[inline(always)]
    pub fn outpost(&self, color: Color, square: Square) -> Bitboard {
        self.outpost[color][square]
    }

    /// The squares from which the opposing King catches a `color` pawn on `square`.
    ///
    /// If `pawn_to_move` is false, the King gets a tempo and the cone of the square one rank
    /// behind is used instead.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let masks = PawnMasks::get();
    /// assert!(masks.runaway(Color::White, Square::A5, true).intersects(Square::D8));
    /// assert!(!masks.runaway(Color::White, Square::A5, true).intersects(Square::E8));
    /// assert!(masks.runaway(Color::White, Square::A5, false).intersects(Square::E8));
    /// ```
    #[inline(always)]
    pub fn runaway(&self, color: Color, square: Square, pawn_to_move: bool) -> Bitboard {
        let origin = if pawn_to_move {
            Some(square)
        } else {
            square.backward_by(color, 1)
        };

        match origin {
            Some(origin) => self.runaway[color][origin],
            None => self.runaway[color][square],
        }
    }
}

/// Everything the evaluator needs to know about a pawn structure.
///
/// Scores are from White's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PawnFlags {
    /// Piece-square, chain, phalanx, backward, isolated, and doubled terms.
    pub score: i32,

    /// Queenside plus kingside wing balance, weighed by material in the endgame.
    pub endgame_score: i32,

    /// Wing balance over the d and e files.
    pub center_score: i32,

    /// Number of pawns of each color.
    pub pawn_counts: [u8; Color::COUNT],

    /// Passed pawns of each color.
    pub passed: [Bitboard; Color::COUNT],

    /// Every square of every file with no pawns.
    pub open_files: Bitboard,

    /// Every square of every rank with no pawns.
    pub open_ranks: Bitboard,

    /// Files where a pawn is blocked by an enemy pawn directly ahead of it.
    pub locked_files: Bitboard,

    /// `[color]`: squares on a file at or behind a `color` pawn, seen from `color`'s side.
    ///
    /// A `color` Rook standing here has a friendly pawn in front of it.
    pub closed_files: [Bitboard; Color::COUNT],
}

impl PawnFlags {
    pub const fn new() -> Self {
        Self {
            score: 0,
            endgame_score: 0,
            center_score: 0,
            pawn_counts: [0; Color::COUNT],
            passed: [Bitboard::EMPTY_BOARD; Color::COUNT],
            open_files: Bitboard::FULL_BOARD,
            open_ranks: Bitboard::FULL_BOARD,
            locked_files: Bitboard::EMPTY_BOARD,
            closed_files: [Bitboard::EMPTY_BOARD; Color::COUNT],
        }
    }

    /// Passed pawns of both colors.
    #[inline(always)]
    pub fn all_passed(&self) -> Bitboard {
        self.passed[Color::White] | self.passed[Color::Black]
    }
}

impl Default for PawnFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores the pawn structure of `board` into `flags`, overwriting whatever was there.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let mut flags = PawnFlags::new();
/// score_pawns(&Board::default(), &mut flags);
/// assert_eq!(flags.score, 0);
/// assert_eq!(flags.open_files, Bitboard::EMPTY_BOARD);
/// ```
pub fn score_pawns(board: &Board, flags: &mut PawnFlags) {
    let masks = PawnMasks::get();
    *flags = PawnFlags::new();

    for color in Color::all() {
        let sign = color.negation_multiplier() as i32;
        let opponent = color.opponent();
        let own = board.pawns(color);
        let enemy = board.pawns(opponent);
        flags.pawn_counts[color] = own.population();

        for square in own {
            let file = Bitboard::from_file(square.file());
            let rank = square.rank().relative_to(color).index();
            let psqt = Psqt::pawn().get_relative(square, color);
            let mut score = psqt;

            // Phalanx, counted once per pair
            if rank > 1 && square.offset(-1, 0).is_some_and(|side| own.intersects(side)) {
                score += psqt >> 1;
            }

            // Chain: each friendly pawn defending this one
            for files in [-1, 1] {
                let defender = square
                    .backward_by(color, 1)
                    .and_then(|behind| behind.offset(files, 0));
                if defender.is_some_and(|defender| own.intersects(defender)) {
                    score += psqt >> 2;
                    flags.closed_files[opponent] |=
                        file & Bitboard::half_up_to(opponent, square.rank());
                }
            }
            flags.closed_files[color] |= file & Bitboard::half_up_to(color, square.rank());

            if square
                .forward_by(color, 1)
                .is_some_and(|ahead| enemy.intersects(ahead))
            {
                flags.locked_files |= file;
            }

            let behind = file & !Bitboard::half_up_to(opponent, square.rank());
            if own.intersects(behind) {
                score -= DOUBLED_PAWN;
            }

            if !own.intersects(masks.support(color, square)) {
                let penalty = BACKWARD_PAWN[square.file().index()] >> 1;
                score -= penalty;
                if !enemy.intersects(file) {
                    score -= penalty;
                }
            }

            if !enemy.intersects(masks.passed(color, square)) {
                flags.passed[color].set(square);
            }

            flags.open_files &= !file;
            flags.open_ranks &= !Bitboard::from_rank(square.rank());
            flags.score += sign * score;
        }
    }

    let wing = |files: &[File], color: Color, counted: Bitboard| {
        let pawns = board.pawns(color) & counted;
        files
            .iter()
            .rev()
            .enumerate()
            .filter(|(_, file)| pawns.intersects(**file))
            .fold(0, |index, (bit, _)| index | 1 << bit)
    };
    let balance = |files: &[File], counted: Bitboard| {
        WING_SCORES[wing(files, Color::White, counted)][wing(files, Color::Black, counted)]
    };

    // Locked pawns do not count on the wings, but do in the center
    let unlocked = !flags.locked_files;
    flags.endgame_score = balance(&QUEENSIDE, unlocked) + balance(&KINGSIDE, unlocked);
    flags.center_score = balance(&CENTER, Bitboard::FULL_BOARD);
}

/// One slot of a [`PawnTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PawnEntry {
    /// Pawn key of the structure stored here, or `None` if the slot was never filled.
    pub key: Option<ZobristKey>,
    pub flags: PawnFlags,
}

impl PawnEntry {
    /// Returns `true` if this entry holds the pawn structure of `board`.
    #[inline(always)]
    pub fn matches(&self, board: &Board) -> bool {
        self.key == Some(board.pawn_key())
    }
}

/// A fixed-size cache of pawn-structure scores, keyed by [`Board::pawn_key`].
///
/// Each key maps to exactly one slot; a new structure simply overwrites whatever was there.
#[derive(Clone, Debug)]
pub struct PawnTable {
    entries: Box<[PawnEntry]>,
    hits: u64,
    misses: u64,
}

impl PawnTable {
    /// Creates a table with at least `size` slots, rounded up to a power of two.
    pub fn new(size: usize) -> Self {
        let size = size.max(1).next_power_of_two();
        Self {
            entries: vec![PawnEntry::default(); size].into_boxed_slice(),
            hits: 0,
            misses: 0,
        }
    }

    /// The slot `board`'s pawn structure maps to, whatever it currently holds.
    ///
    /// Check [`PawnEntry::matches`] before trusting its flags.
    #[inline(always)]
    pub fn entry(&mut self, board: &Board) -> &mut PawnEntry {
        let index = board.pawn_key().inner() as usize & (self.entries.len() - 1);
        &mut self.entries[index]
    }

    /// The flags of `board`'s pawn structure, scored and stored first if not already present.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut table = PawnTable::new(16);
    /// let board = Board::default();
    /// let score = table.probe(&board).score;
    /// assert_eq!(table.probe(&board).score, score);
    /// assert_eq!((table.hits(), table.misses()), (1, 1));
    /// ```
    pub fn probe(&mut self, board: &Board) -> &PawnFlags {
        let entry_hit = self.entry(board).matches(board);
        if entry_hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }

        let entry = self.entry(board);
        if !entry_hit {
            score_pawns(board, &mut entry.flags);
            entry.key = Some(board.pawn_key());
        }
        &entry.flags
    }

    /// Empties every slot and resets the counters.
    pub fn clear(&mut self) {
        self.entries.fill(PawnEntry::default());
        self.hits = 0;
        self.misses = 0;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[inline(always)]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for PawnTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAWN_TABLE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttackTables, Move};

    fn flags(fen: &str) -> PawnFlags {
        let mut flags = PawnFlags::new();
        score_pawns(&Board::from_fen(fen).unwrap(), &mut flags);
        flags
    }

    #[test]
    fn test_masks_are_mirrored_between_colors() {
        let masks = PawnMasks::get();
        for square in Square::iter() {
            let mirror = square.flipped_rank();
            assert_eq!(
                masks.passed(Color::White, square).flipped(),
                masks.passed(Color::Black, mirror)
            );
            assert_eq!(
                masks.support(Color::White, square).flipped(),
                masks.support(Color::Black, mirror)
            );
            assert_eq!(
                masks.runaway(Color::White, square, true).flipped(),
                masks.runaway(Color::Black, mirror, true)
            );
        }
    }

    #[test]
    fn test_passed_pawn_detection() {
        // d5 is blocked by nothing on c-e files; a2 faces the a7 pawn
        let flags = flags("4k3/p7/8/3P4/8/8/P7/4K3 w - - 0 1");
        assert_eq!(flags.passed[Color::White], Bitboard::from_square(Square::D5));
        assert_eq!(flags.passed[Color::Black], Bitboard::EMPTY_BOARD);
        assert!(flags.open_files.intersects(Square::E4));
        assert!(!flags.open_files.intersects(Square::A4));
        assert!(!flags.open_files.intersects(Square::D1));
    }

    #[test]
    fn test_doubled_and_isolated_pawns_are_penalised() {
        let healthy = flags("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1");
        let doubled = flags("4k3/8/8/8/8/3P4/3P4/4K3 w - - 0 1");
        assert!(doubled.score < healthy.score);
    }

    #[test]
    fn test_pawn_score_is_mirrored() {
        let fen = "4k3/pp3p2/2p5/4P3/3P4/8/PP3PPP/4K3 w - - 0 1";
        let board = Board::from_fen(fen).unwrap();
        let mut white = PawnFlags::new();
        let mut black = PawnFlags::new();
        score_pawns(&board, &mut white);
        score_pawns(&board.mirrored(), &mut black);

        assert_eq!(white.score, -black.score);
        assert_eq!(white.endgame_score, -black.endgame_score);
        assert_eq!(white.center_score, -black.center_score);
        assert_eq!(white.passed[Color::White].flipped(), black.passed[Color::Black]);
    }

    #[test]
    fn test_locked_files_leave_the_wing() {
        // Both a-pawns are locked; White's h-pawn makes the kingside White's
        let flags = flags("4k3/8/8/p7/P7/8/7P/4K3 w - - 0 1");
        assert_eq!(flags.locked_files, Bitboard::FILE_A);
        assert_eq!(flags.endgame_score, WING_SCORES[4][0]);
        assert!(flags.endgame_score > 0);
    }

    #[test]
    fn test_locked_center_pawns_still_count() {
        // d4 and d5 lock each other, but both still hold the center
        let center = flags("4k3/8/8/3p4/3PP3/8/8/4K3 w - - 0 1");
        assert_eq!(center.locked_files, Bitboard::from_file(File::D));
        assert_eq!(center.center_score, WING_SCORES[0b11][0b10]);
    }

    #[test]
    fn test_pawns_are_counted_per_color() {
        let counted = flags("4k3/pp6/8/8/8/8/PPP5/4K3 w - - 0 1");
        assert_eq!(counted.pawn_counts, [3, 2]);

        let bare = flags("4k3/8/8/8/8/8/8/4KB2 w - - 0 1");
        assert_eq!(bare.pawn_counts, [0, 0]);
    }

    #[test]
    fn test_table_recomputes_on_new_structure() {
        let mut table = PawnTable::new(64);
        let start = Board::default();
        let e4 = Move::from_uci(&start, AttackTables::get(), "e2e4").unwrap();
        let after = start.with_move_made(e4);

        let before = table.probe(&start).score;
        table.probe(&after);
        assert_eq!(table.misses(), 2);

        assert!(table.entry(&after).matches(&after));
        assert_eq!(table.probe(&start).score, before);
        assert_eq!(table.hits() + table.misses(), 3);
    }
}
