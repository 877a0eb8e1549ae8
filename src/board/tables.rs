/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, sync::OnceLock};

use super::{Bitboard, Color, PaddedSquare, PieceKind, Square};

/// Orthogonal steps in the 0x88 encoding.
const ROOK_DELTAS: [i8; 4] = [1, -1, 16, -16];

/// Diagonal steps in the 0x88 encoding. `±17` runs along a1-h8, `±15` along h1-a8.
const BISHOP_DELTAS: [i8; 4] = [17, -17, 15, -15];

const KNIGHT_DELTAS: [i8; 8] = [14, 18, 31, 33, -14, -18, -31, -33];

const KING_DELTAS: [i8; 8] = [1, -1, 16, -16, 17, -17, 15, -15];

/// Capture steps of a pawn, indexed by color.
const PAWN_CAPTURE_DELTAS: [[i8; 2]; Color::COUNT] = [[15, 17], [-15, -17]];

/// Number of occupancy patterns of a single line (rank, file, or diagonal).
const LINE_PATTERNS: usize = 256;

/// One of the four bit orderings kept for rotated-bitboard lookups.
///
/// In every orientation, the squares of a single line occupy a contiguous run of bits,
/// so that line's occupancy can be extracted with a shift and a mask.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    /// Ranks, in normal square order.
    R0,
    /// Files, as if the board were rotated left by 90 degrees.
    Rl90,
    /// a1-h8 diagonals, as if the board were rotated left by 45 degrees.
    Rl45,
    /// h1-a8 diagonals, as if the board were rotated right by 45 degrees.
    Rr45,
}

impl Orientation {
    pub const COUNT: usize = 4;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::R0, Self::Rl90, Self::Rl45, Self::Rr45]
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Where each square lives in each [`Orientation`].
struct LineGeometry {
    /// Bit index of the square within the rotated board.
    bit: [[u8; Square::COUNT]; Orientation::COUNT],
    /// Bit index at which the square's line starts.
    shift: [[u8; Square::COUNT]; Orientation::COUNT],
    /// Number of squares on the square's line.
    len: [[u8; Square::COUNT]; Orientation::COUNT],
    /// Position of the square within its line.
    pos: [[u8; Square::COUNT]; Orientation::COUNT],
}

/// Length of diagonal number `line` in `[0, 15)`, ordered from one corner to the other.
const fn diagonal_len(line: i8) -> i8 {
    let off = line - 7;
    8 - if off < 0 { -off } else { off }
}

/// Bit at which diagonal number `line` starts, when diagonals are packed end to end.
const fn diagonal_shift(line: i8) -> i8 {
    let mut shift = 0;
    let mut l = 0;
    while l < line {
        shift += diagonal_len(l);
        l += 1;
    }
    shift
}

const fn max0(x: i8) -> i8 {
    if x > 0 {
        x
    } else {
        0
    }
}

#[rustfmt::skip]
static GEOMETRY: LineGeometry = {
    let mut bit = [[0; Square::COUNT]; Orientation::COUNT];
    let mut shift = [[0; Square::COUNT]; Orientation::COUNT];
    let mut len = [[0; Square::COUNT]; Orientation::COUNT];
    let mut pos = [[0; Square::COUNT]; Orientation::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let file = (i % 8) as i8;
        let rank = (i / 8) as i8;

        // Ranks
        shift[0][i] = (rank * 8) as u8;
        len[0][i] = 8;
        pos[0][i] = file as u8;

        // Files
        shift[1][i] = (file * 8) as u8;
        len[1][i] = 8;
        pos[1][i] = rank as u8;

        // a1-h8 diagonals, numbered by `file - rank`, starting at a8
        let line = file - rank + 7;
        shift[2][i] = diagonal_shift(line) as u8;
        len[2][i] = diagonal_len(line) as u8;
        pos[2][i] = (file - max0(file - rank)) as u8;

        // h1-a8 diagonals, numbered by `file + rank`, starting at a1
        let line = file + rank;
        shift[3][i] = diagonal_shift(line) as u8;
        len[3][i] = diagonal_len(line) as u8;
        pos[3][i] = (file - max0(file + rank - 7)) as u8;

        let mut o = 0;
        while o < Orientation::COUNT {
            bit[o][i] = shift[o][i] + pos[o][i];
            o += 1;
        }
        i += 1;
    }

    LineGeometry { bit, shift, len, pos }
};

/// The square at position `p` along `square`'s line in `orientation`.
const fn square_on_line(orientation: Orientation, square: Square, p: u8) -> Square {
    let file = square.file().0 as i8;
    let rank = square.rank().0 as i8;
    let p = p as i8;

    let (f, r) = match orientation {
        Orientation::R0 => (p, rank),
        Orientation::Rl90 => (file, p),
        Orientation::Rl45 => {
            let d = file - rank;
            let f = max0(d) + p;
            (f, f - d)
        }
        Orientation::Rr45 => {
            let s = file + rank;
            let f = max0(s - 7) + p;
            (f, s - f)
        }
    };

    Square((f + r * 8) as u8)
}

/// The occupied squares of a [`crate::Board`], kept in all four [`Orientation`]s at once.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RotatedOccupancy([Bitboard; Orientation::COUNT]);

impl RotatedOccupancy {
    /// Marks `square` as occupied in every orientation.
    #[inline(always)]
    pub fn place(&mut self, square: Square) {
        for o in Orientation::all() {
            self.0[o.index()].0 |= 1 << GEOMETRY.bit[o.index()][square.index()];
        }
    }

    /// Marks `square` as empty in every orientation.
    #[inline(always)]
    pub fn remove(&mut self, square: Square) {
        for o in Orientation::all() {
            self.0[o.index()].0 &= !(1 << GEOMETRY.bit[o.index()][square.index()]);
        }
    }

    /// The rotated board for `orientation`.
    #[inline(always)]
    pub const fn get(&self, orientation: Orientation) -> Bitboard {
        self.0[orientation.index()]
    }

    /// The 8-bit occupancy pattern of `square`'s line in `orientation`.
    #[inline(always)]
    pub fn line_pattern(&self, orientation: Orientation, square: Square) -> usize {
        let o = orientation.index();
        let i = square.index();
        let mask = (1u64 << GEOMETRY.len[o][i]) - 1;
        ((self.0[o].0 >> GEOMETRY.shift[o][i]) & mask) as usize
    }
}

/// Every static table used by move generation, attack queries, and evaluation.
///
/// Built once by [`AttackTables::new`] and never mutated afterwards, so a single instance
/// can be shared by reference between any number of readers. [`AttackTables::get`] returns
/// a lazily-built process-wide instance.
pub struct AttackTables {
    /// `[color][kind][square]`: every square from which a `color` `kind` on an empty board attacks `square`.
    attack_vectors: [[[Bitboard; Square::COUNT]; PieceKind::COUNT]; Color::COUNT],

    /// Union of `attack_vectors` over all kinds.
    any_attack_vectors: [[Bitboard; Square::COUNT]; Color::COUNT],

    /// Bishop rays split by axis: `[0]` is a1-h8, `[1]` is h1-a8.
    king_diagonals: [[Bitboard; Square::COUNT]; 2],

    /// `[from][to]` in 0x88 indices: squares strictly between, or [`Bitboard::FULL_BOARD`] if unconnected.
    spans: Box<[Bitboard]>,

    /// `[from][to]` in 0x88 indices: squares beyond `to`, continuing away from `from`.
    shadows: Box<[Bitboard]>,

    /// `[orientation][square][pattern]`: sliding attacks along one line.
    slide_attacks: Box<[Bitboard]>,

    /// Population counts of `slide_attacks`.
    slide_mobility: Box<[u8]>,
}

impl AttackTables {
    /// Builds every table from scratch.
    ///
    /// This is pure computation, taking a few milliseconds. Prefer [`AttackTables::get`]
    /// unless a private instance is really needed.
    pub fn new() -> Self {
        let mut tables = Self {
            attack_vectors: [[[Bitboard::EMPTY_BOARD; Square::COUNT]; PieceKind::COUNT];
                Color::COUNT],
            any_attack_vectors: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
            king_diagonals: [[Bitboard::EMPTY_BOARD; Square::COUNT]; 2],
            spans: vec![Bitboard::FULL_BOARD; PaddedSquare::COUNT * PaddedSquare::COUNT]
                .into_boxed_slice(),
            shadows: vec![Bitboard::EMPTY_BOARD; PaddedSquare::COUNT * PaddedSquare::COUNT]
                .into_boxed_slice(),
            slide_attacks: vec![
                Bitboard::EMPTY_BOARD;
                Orientation::COUNT * Square::COUNT * LINE_PATTERNS
            ]
            .into_boxed_slice(),
            slide_mobility: vec![0; Orientation::COUNT * Square::COUNT * LINE_PATTERNS]
                .into_boxed_slice(),
        };

        tables.build_attack_vectors();
        tables.build_spans_and_shadows();
        tables.build_sliding_tables();

        tables
    }

    /// A process-wide instance, built on first use.
    #[inline(always)]
    pub fn get() -> &'static Self {
        static TABLES: OnceLock<AttackTables> = OnceLock::new();
        TABLES.get_or_init(Self::new)
    }

    fn build_attack_vectors(&mut self) {
        for color in Color::all() {
            for kind in PieceKind::all() {
                for from in Square::iter() {
                    for to in targets_on_empty_board(color, kind, from) {
                        self.attack_vectors[color][kind][to].set(from);
                        self.any_attack_vectors[color][to].set(from);
                    }
                }
            }
        }

        for from in Square::iter() {
            for (axis, deltas) in [[17, -17], [15, -15]].into_iter().enumerate() {
                for delta in deltas {
                    for to in ray(from.padded(), delta) {
                        self.king_diagonals[axis][from].set(to);
                    }
                }
            }
        }

        // Leapers and sliders attack symmetrically; only pawns depend on color.
        for kind in PieceKind::all() {
            if kind != PieceKind::Pawn {
                assert_eq!(
                    self.attack_vectors[Color::White][kind],
                    self.attack_vectors[Color::Black][kind],
                    "{} attack vectors differ between colors",
                    kind.name()
                );
            }
        }
    }

    fn build_spans_and_shadows(&mut self) {
        for from in Square::iter() {
            let from = from.padded();

            for delta in KING_DELTAS {
                let line: Vec<Square> = ray(from, delta).collect();

                for (i, to) in line.iter().enumerate() {
                    let index = span_index(from, to.padded());
                    self.spans[index] = line[..i].iter().copied().collect();
                    self.shadows[index] = line[i + 1..].iter().copied().collect();
                }
            }
        }
    }

    fn build_sliding_tables(&mut self) {
        for orientation in Orientation::all() {
            let o = orientation.index();

            let mut bits_used = Bitboard::EMPTY_BOARD;
            for square in Square::iter() {
                bits_used.set(Bitboard(1u64 << GEOMETRY.bit[o][square]));
            }
            assert_eq!(
                bits_used,
                Bitboard::FULL_BOARD,
                "{orientation:?} does not map squares one-to-one"
            );

            for square in Square::iter() {
                let len = GEOMETRY.len[o][square];
                let pos = GEOMETRY.pos[o][square];

                for pattern in 0..(1usize << len) {
                    let mut attacks = Bitboard::EMPTY_BOARD;

                    // Toward the end of the line, then toward its start, stopping on the first blocker
                    for p in (pos + 1)..len {
                        attacks.set(square_on_line(orientation, square, p));
                        if pattern & (1 << p) != 0 {
                            break;
                        }
                    }
                    for p in (0..pos).rev() {
                        attacks.set(square_on_line(orientation, square, p));
                        if pattern & (1 << p) != 0 {
                            break;
                        }
                    }

                    let index = slide_index(orientation, square, pattern);
                    self.slide_attacks[index] = attacks;
                    self.slide_mobility[index] = attacks.population();
                }
            }
        }
    }

    /// Every square from which a `color` `kind` would attack `square` on an otherwise empty board.
    ///
    /// For pawns this contains only capture origins; pushes never attack.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// let from = tables.attack_vectors(Color::White, PieceKind::Pawn, Square::E4);
    /// assert_eq!(from, Bitboard::from_square(Square::D3) | Square::F3);
    /// ```
    #[inline(always)]
    pub fn attack_vectors(&self, color: Color, kind: PieceKind, square: Square) -> Bitboard {
        self.attack_vectors[color][kind][square]
    }

    /// Every square from which any `color` piece could attack `square` on an empty board.
    #[inline(always)]
    pub fn any_attack_vectors(&self, color: Color, square: Square) -> Bitboard {
        self.any_attack_vectors[color][square]
    }

    /// Squares a `color` pawn on `square` attacks.
    #[inline(always)]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.attack_vectors[color.opponent()][PieceKind::Pawn][square]
    }

    #[inline(always)]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.attack_vectors[Color::White][PieceKind::Knight][square]
    }

    #[inline(always)]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.attack_vectors[Color::White][PieceKind::King][square]
    }

    /// Both diagonals through `square` on an empty board, split by `axis` (`0` = a1-h8, `1` = h1-a8).
    #[inline(always)]
    pub fn king_diagonal(&self, axis: usize, square: Square) -> Bitboard {
        self.king_diagonals[axis][square]
    }

    /// Squares strictly between `from` and `to`.
    ///
    /// Returns [`Bitboard::FULL_BOARD`] if the two share no rank, file, or diagonal,
    /// if they are the same square, or if either is off the board.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// assert_eq!(tables.span(Square::A1, Square::A3), Bitboard::from_square(Square::A2));
    /// assert_eq!(tables.span(Square::A1, Square::B1), Bitboard::EMPTY_BOARD);
    /// assert_eq!(tables.span(Square::A1, Square::B3), Bitboard::FULL_BOARD);
    /// ```
    #[inline(always)]
    pub fn span(&self, from: impl Into<PaddedSquare>, to: impl Into<PaddedSquare>) -> Bitboard {
        self.spans[span_index(from.into(), to.into())]
    }

    /// Squares beyond `to`, continuing in the direction from `from` to `to` until the edge.
    ///
    /// Empty if the two share no line.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let tables = AttackTables::get();
    /// let beyond = tables.shadow(Square::A1, Square::F6);
    /// assert_eq!(beyond, Bitboard::from_square(Square::G7) | Square::H8);
    /// ```
    #[inline(always)]
    pub fn shadow(&self, from: impl Into<PaddedSquare>, to: impl Into<PaddedSquare>) -> Bitboard {
        self.shadows[span_index(from.into(), to.into())]
    }

    /// Sliding attacks from `square` along its line in `orientation`, and their count.
    #[inline(always)]
    pub fn slide(
        &self,
        orientation: Orientation,
        square: Square,
        occupancy: &RotatedOccupancy,
    ) -> (Bitboard, u8) {
        let index = slide_index(
            orientation,
            square,
            occupancy.line_pattern(orientation, square),
        );
        (self.slide_attacks[index], self.slide_mobility[index])
    }

    /// Squares a rook on `square` attacks given `occupancy`, captures included.
    #[inline(always)]
    pub fn rook_attacks(&self, square: Square, occupancy: &RotatedOccupancy) -> Bitboard {
        self.slide(Orientation::R0, square, occupancy).0
            | self.slide(Orientation::Rl90, square, occupancy).0
    }

    /// Squares a bishop on `square` attacks given `occupancy`, captures included.
    #[inline(always)]
    pub fn bishop_attacks(&self, square: Square, occupancy: &RotatedOccupancy) -> Bitboard {
        self.slide(Orientation::Rl45, square, occupancy).0
            | self.slide(Orientation::Rr45, square, occupancy).0
    }

    #[inline(always)]
    pub fn queen_attacks(&self, square: Square, occupancy: &RotatedOccupancy) -> Bitboard {
        self.rook_attacks(square, occupancy) | self.bishop_attacks(square, occupancy)
    }

    /// Number of squares a rook on `square` attacks, read straight from the tables.
    #[inline(always)]
    pub fn rook_mobility(&self, square: Square, occupancy: &RotatedOccupancy) -> i32 {
        (self.slide(Orientation::R0, square, occupancy).1
            + self.slide(Orientation::Rl90, square, occupancy).1) as i32
    }

    /// Number of squares a bishop on `square` attacks, read straight from the tables.
    #[inline(always)]
    pub fn bishop_mobility(&self, square: Square, occupancy: &RotatedOccupancy) -> i32 {
        (self.slide(Orientation::Rl45, square, occupancy).1
            + self.slide(Orientation::Rr45, square, occupancy).1) as i32
    }
}

impl fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTables")
            .field("spans", &self.spans.len())
            .field("shadows", &self.shadows.len())
            .field("slide_attacks", &self.slide_attacks.len())
            .finish_non_exhaustive()
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

#[inline(always)]
fn span_index(from: PaddedSquare, to: PaddedSquare) -> usize {
    from.index() * PaddedSquare::COUNT + to.index()
}

#[inline(always)]
fn slide_index(orientation: Orientation, square: Square, pattern: usize) -> usize {
    debug_assert!(pattern < LINE_PATTERNS);
    (orientation.index() * Square::COUNT + square.index()) * LINE_PATTERNS + pattern
}

/// Squares reached by repeatedly stepping `delta` from `from`, until the edge of the board.
fn ray(from: PaddedSquare, delta: i8) -> impl Iterator<Item = Square> {
    std::iter::successors(from.step(delta), move |sq| sq.step(delta))
        .filter_map(|sq| sq.to_square())
}

/// Squares a lone `color` `kind` on `from` could capture on, on an otherwise empty board.
fn targets_on_empty_board(color: Color, kind: PieceKind, from: Square) -> Bitboard {
    let from = from.padded();
    let step = |deltas: &[i8]| -> Bitboard {
        deltas
            .iter()
            .filter_map(|&delta| from.step(delta))
            .filter_map(|sq| sq.to_square())
            .collect()
    };
    let slide = |deltas: &[i8]| -> Bitboard {
        deltas.iter().flat_map(|&delta| ray(from, delta)).collect()
    };

    match kind {
        PieceKind::Pawn => step(&PAWN_CAPTURE_DELTAS[color]),
        PieceKind::Knight => step(&KNIGHT_DELTAS),
        PieceKind::King => step(&KING_DELTAS),
        PieceKind::Bishop => slide(&BISHOP_DELTAS),
        PieceKind::Rook => slide(&ROOK_DELTAS),
        PieceKind::Queen => slide(&KING_DELTAS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks from `a` toward `b` one square at a time, if they share a line.
    fn walk(a: Square, b: Square) -> Option<(i8, i8)> {
        let df = b.file().0 as i8 - a.file().0 as i8;
        let dr = b.rank().0 as i8 - a.rank().0 as i8;
        if a == b || !(df == 0 || dr == 0 || df.abs() == dr.abs()) {
            return None;
        }
        Some((df.signum(), dr.signum()))
    }

    #[test]
    fn test_spans_are_exact_open_intervals() {
        let tables = AttackTables::get();

        for a in Square::iter() {
            for b in Square::iter() {
                let expected = match walk(a, b) {
                    None => Bitboard::FULL_BOARD,
                    Some((df, dr)) => {
                        let mut between = Bitboard::EMPTY_BOARD;
                        let mut sq = a.offset(df, dr);
                        while let Some(s) = sq {
                            if s == b {
                                break;
                            }
                            between.set(s);
                            sq = s.offset(df, dr);
                        }
                        between
                    }
                };
                assert_eq!(tables.span(a, b), expected, "span {a} -> {b}");
            }
        }
    }

    #[test]
    fn test_shadows_continue_past_destination() {
        let tables = AttackTables::get();

        for a in Square::iter() {
            for b in Square::iter() {
                let expected = match walk(a, b) {
                    None => Bitboard::EMPTY_BOARD,
                    Some((df, dr)) => {
                        let mut beyond = Bitboard::EMPTY_BOARD;
                        let mut sq = b.offset(df, dr);
                        while let Some(s) = sq {
                            beyond.set(s);
                            sq = s.offset(df, dr);
                        }
                        beyond
                    }
                };
                assert_eq!(tables.shadow(a, b), expected, "shadow {a} -> {b}");
            }
        }
    }

    #[test]
    fn test_off_board_spans_are_sentinels() {
        let tables = AttackTables::get();
        let off = PaddedSquare::from_index(0x08);
        assert_eq!(tables.span(off, Square::A1), Bitboard::FULL_BOARD);
        assert_eq!(tables.span(Square::A1, off), Bitboard::FULL_BOARD);
        assert_eq!(tables.shadow(Square::A1, off), Bitboard::EMPTY_BOARD);
    }

    #[test]
    fn test_attack_vectors_are_reverse_maps() {
        let tables = AttackTables::get();

        // A knight on b1 attacks a3, c3, and d2, so b1 appears in each of their vectors
        for to in [Square::A3, Square::C3, Square::D2] {
            assert!(tables.knight_attacks(to).intersects(Square::B1));
        }
        assert_eq!(tables.knight_attacks(Square::B1).population(), 3);

        // Black pawns attack downward, so they hit e4 from d5 and f5
        let from = tables.attack_vectors(Color::Black, PieceKind::Pawn, Square::E4);
        assert_eq!(from, Bitboard::from_square(Square::D5) | Square::F5);
        assert_eq!(
            tables.pawn_attacks(Color::White, Square::E4),
            Bitboard::from_square(Square::D5) | Square::F5
        );

        assert_eq!(tables.king_attacks(Square::A1).population(), 3);
        assert_eq!(
            tables
                .attack_vectors(Color::White, PieceKind::Queen, Square::D4)
                .population(),
            27
        );
        assert_eq!(
            tables.any_attack_vectors(Color::White, Square::A1),
            tables.attack_vectors(Color::White, PieceKind::Queen, Square::A1)
                | tables.knight_attacks(Square::A1)
        );
    }

    #[test]
    fn test_king_diagonals_split_bishop_rays() {
        let tables = AttackTables::get();
        for square in Square::iter() {
            let a1h8 = tables.king_diagonal(0, square);
            let h1a8 = tables.king_diagonal(1, square);
            assert!((a1h8 & h1a8).is_empty());
            assert_eq!(
                a1h8 | h1a8,
                tables.attack_vectors(Color::White, PieceKind::Bishop, square)
            );
        }
        assert!(tables.king_diagonal(0, Square::C3).intersects(Square::H8));
        assert!(tables.king_diagonal(1, Square::C3).intersects(Square::A5));
    }

    #[test]
    fn test_rotated_lookups_match_ray_walks() {
        let tables = AttackTables::get();

        // An arbitrary occupancy with blockers on every kind of line
        let occupied = Bitboard(0x91_7D_73_1C_12_A4_FF_91);
        let mut rotated = RotatedOccupancy::default();
        for square in occupied {
            rotated.place(square);
        }

        for square in Square::iter() {
            let walk = |deltas: &[i8]| -> Bitboard {
                let mut attacks = Bitboard::EMPTY_BOARD;
                for &delta in deltas {
                    for to in ray(square.padded(), delta) {
                        attacks.set(to);
                        if occupied.intersects(to) {
                            break;
                        }
                    }
                }
                attacks
            };

            let rook = walk(&ROOK_DELTAS);
            let bishop = walk(&BISHOP_DELTAS);
            assert_eq!(tables.rook_attacks(square, &rotated), rook, "rook on {square}");
            assert_eq!(tables.bishop_attacks(square, &rotated), bishop, "bishop on {square}");
            assert_eq!(tables.rook_mobility(square, &rotated), rook.population() as i32);
            assert_eq!(tables.bishop_mobility(square, &rotated), bishop.population() as i32);
        }
    }

    #[test]
    fn test_rotated_occupancy_place_and_remove() {
        let mut rotated = RotatedOccupancy::default();
        rotated.place(Square::E4);
        for o in Orientation::all() {
            assert_eq!(rotated.get(o).population(), 1);
        }
        rotated.remove(Square::E4);
        assert_eq!(rotated, RotatedOccupancy::default());
    }
}
