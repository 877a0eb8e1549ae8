/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{
    AttackTables, Bitboard, Color, File, Move, Piece, PieceKind, Rank, RotatedOccupancy, Square,
    ZobristKey,
};
use crate::{Psqt, FEN_STARTPOS};

/// The two directions a King can castle in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CastleSide {
    /// Towards the H file.
    Short,
    /// Towards the A file.
    Long,
}

impl CastleSide {
    pub const COUNT: usize = 2;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Short, Self::Long]
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Square the castling Rook starts on.
    #[inline(always)]
    pub const fn rook_home(&self, color: Color) -> Square {
        match self {
            Self::Short => Square::H1.rank_relative_to(color),
            Self::Long => Square::A1.rank_relative_to(color),
        }
    }

    /// Square the King lands on after castling.
    #[inline(always)]
    pub const fn king_destination(&self, color: Color) -> Square {
        match self {
            Self::Short => Square::G1.rank_relative_to(color),
            Self::Long => Square::C1.rank_relative_to(color),
        }
    }

    /// Square the Rook lands on after castling.
    #[inline(always)]
    pub const fn rook_destination(&self, color: Color) -> Square {
        match self {
            Self::Short => Square::F1.rank_relative_to(color),
            Self::Long => Square::D1.rank_relative_to(color),
        }
    }

    /// The FEN character for this right: `K`, `Q`, `k`, or `q`.
    #[inline(always)]
    pub const fn char(&self, color: Color) -> char {
        match (color, self) {
            (Color::White, Self::Short) => 'K',
            (Color::White, Self::Long) => 'Q',
            (Color::Black, Self::Short) => 'k',
            (Color::Black, Self::Long) => 'q',
        }
    }

    /// Bit of this right inside a castling-rights index in `[0, 16)`.
    #[inline(always)]
    const fn bit(&self, color: Color) -> usize {
        1 << (color.index() * 2 + self.index())
    }
}

/// A chess position: piece placement in several redundant representations, plus all of
/// the state that move generation and evaluation read.
///
/// Pieces are tracked three ways at once, and kept in sync on every placement and removal:
/// per-color and per-kind [`Bitboard`]s, a 64-entry mailbox, and the rotated occupancy
/// boards used for sliding-attack lookups.
///
/// Castling is not stored as a set of rights. Instead the board counts how often each King
/// and each castling Rook has moved; a side may castle while both counters are zero.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// All squares occupied by a specific color.
    colors: [Bitboard; Color::COUNT],

    /// All squares occupied by a specific kind of piece.
    pieces: [Bitboard; PieceKind::COUNT],

    /// Occupancy in the four sliding orientations.
    occupancy: RotatedOccupancy,

    /// The piece on each square, if any.
    mailbox: [Option<Piece>; Square::COUNT],

    /// How many times the piece on each square has moved. Travels with the piece.
    move_counts: [u16; Square::COUNT],

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Square a pawn skipped over on the previous move, if any.
    ep_square: Option<Square>,

    king_moves: [u16; Color::COUNT],

    /// `[color][CastleSide]`
    rook_moves: [[u16; CastleSide::COUNT]; Color::COUNT],

    castled: [bool; Color::COUNT],

    /// White material minus Black material, in centipawns. Kings count as zero.
    material: i32,

    /// White piece-square bonuses minus Black's, for Knights, Bishops, Rooks and Queens.
    positional: i32,

    key: ZobristKey,

    /// Zobrist key over pawns only.
    pawn_key: ZobristKey,

    /// Used to enforce the fifty-move rule.
    halfmove: usize,

    /// A fullmove is a complete turn by White and then by Black.
    fullmove: usize,

    /// Number of moves made on this board since it was set up.
    move_index: usize,
}

impl Board {
    /// Creates a new, empty [`Board`] with White to move and no castling available.
    ///
    /// # Example
    /// ```
    /// # use tadpole::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    pub fn new() -> Self {
        Self {
            colors: [Bitboard::EMPTY_BOARD; Color::COUNT],
            pieces: [Bitboard::EMPTY_BOARD; PieceKind::COUNT],
            occupancy: RotatedOccupancy::default(),
            mailbox: [None; Square::COUNT],
            move_counts: [0; Square::COUNT],
            side_to_move: Color::White,
            ep_square: None,
            king_moves: [1; Color::COUNT],
            rook_moves: [[1; CastleSide::COUNT]; Color::COUNT],
            castled: [false; Color::COUNT],
            material: 0,
            positional: 0,
            key: ZobristKey::default(),
            pawn_key: ZobristKey::default(),
            halfmove: 0,
            fullmove: 1,
            move_index: 0,
        }
    }

    /// Parses a [FEN](https://www.chessprogramming.org/Forsyth-Edwards_Notation) string.
    ///
    /// Everything after the placements is optional and defaults to `w - - 0 1`.
    /// Each side must have exactly one King.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::from_fen(FEN_KIWIPETE).unwrap();
    /// assert_eq!(board.to_fen(), FEN_KIWIPETE);
    /// assert!(board.can_castle(Color::Black, CastleSide::Long));
    ///
    /// assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();
        let mut split = fen.trim().split(' ');

        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;

        if placements.matches('/').count() != 7 {
            bail!("FEN must have piece placements for all 8 ranks");
        }

        // Reversed so that White's pieces are at the "bottom" of the board
        for (rank, placements) in placements.split('/').rev().enumerate() {
            let mut file = 0;

            for piece_char in placements.chars() {
                if file >= File::COUNT as u8 {
                    bail!("FEN rank {} has more than 8 files: {placements:?}", rank + 1);
                }

                if let Ok(piece) = Piece::from_uci(piece_char) {
                    let square = Square::new(File::new_unchecked(file), Rank::new_unchecked(rank as u8));
                    board.place(piece, square);
                    file += 1;
                } else {
                    let Some(empty) = piece_char.to_digit(10) else {
                        bail!(
                            "FEN placements must contain piece chars or digits. Got {piece_char:?}"
                        );
                    };
                    file += empty as u8;
                }
            }

            if file != File::COUNT as u8 {
                bail!("FEN rank {} must span exactly 8 files: {placements:?}", rank + 1);
            }
        }

        for color in Color::all() {
            let kings = board.piece_parts(color, PieceKind::King).population();
            if kings != 1 {
                bail!("FEN must have exactly one {} King. Found {kings}", color.name());
            }
        }

        let active_color = split.next().unwrap_or("w");
        board.side_to_move = Color::from_str(active_color)?;

        let castling = split.next().unwrap_or("-");
        for color in Color::all() {
            let mut any = false;
            for side in CastleSide::all() {
                let allowed = castling.contains(side.char(color));
                board.rook_moves[color][side.index()] = u16::from(!allowed);
                any |= allowed;
            }
            board.king_moves[color] = u16::from(!any);
        }

        let en_passant_target = split.next().unwrap_or("-");
        board.ep_square = match en_passant_target {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        let halfmove = split.next().unwrap_or("0");
        board.halfmove = halfmove.parse().or(Err(anyhow!(
            "FEN string must have valid halfmove counter. Got {halfmove:?}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        board.fullmove = fullmove.parse().or(Err(anyhow!(
            "FEN string must have valid fullmove counter. Got {fullmove:?}"
        )))?;

        board.hash_state();

        Ok(board)
    }

    /// Generates a FEN string from this [`Board`].
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// assert_eq!(Board::default().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        let mut placements: [String; Rank::COUNT] = Default::default();

        for rank in Rank::iter() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank.index()] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank.index()].push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank.index()] += &empty_spaces.to_string();
            }
        }
        placements.reverse();

        let ep = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));

        format!(
            "{} {} {} {ep} {} {}",
            placements.join("/"),
            self.side_to_move.to_uci(),
            self.castling_rights_uci(),
            self.halfmove,
            self.fullmove
        )
    }

    /// Castling availability in FEN notation, such as `KQkq` or `-`.
    pub fn castling_rights_uci(&self) -> String {
        let rights: String = Color::all()
            .into_iter()
            .flat_map(|color| CastleSide::all().map(move |side| (color, side)))
            .filter(|&(color, side)| self.can_castle(color, side))
            .map(|(color, side)| side.char(color))
            .collect();

        if rights.is_empty() {
            String::from("-")
        } else {
            rights
        }
    }

    /// Places `piece` on the empty `square`, updating every representation and both keys.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let mut board = Board::new();
    /// board.place(Piece::WHITE_KNIGHT, Square::C4);
    /// assert_eq!(board.material(), 300);
    /// assert_eq!(board.to_fen(), "8/8/8/8/2N5/8/8/8 w - - 0 1");
    /// ```
    pub fn place(&mut self, piece: Piece, square: Square) {
        debug_assert!(
            self.mailbox[square].is_none(),
            "Cannot place {piece:?} on occupied {square}"
        );

        let (color, kind) = (piece.color(), piece.kind());
        let sign = color.negation_multiplier() as i32;

        self.colors[color].set(square);
        self.pieces[kind].set(square);
        self.occupancy.place(square);
        self.mailbox[square] = Some(piece);

        self.material += sign * kind.value();
        self.positional += sign * Psqt::positional(piece, square);

        self.key.hash_piece(square, piece);
        if kind == PieceKind::Pawn {
            self.pawn_key.hash_piece(square, piece);
        }
    }

    /// Takes the [`Piece`] from `square`, if there is one present.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.mailbox[square].take()?;
        let (color, kind) = (piece.color(), piece.kind());
        let sign = color.negation_multiplier() as i32;

        self.colors[color].clear(square);
        self.pieces[kind].clear(square);
        self.occupancy.remove(square);

        self.material -= sign * kind.value();
        self.positional -= sign * Psqt::positional(piece, square);

        self.key.hash_piece(square, piece);
        if kind == PieceKind::Pawn {
            self.pawn_key.hash_piece(square, piece);
        }

        Some(piece)
    }

    /// Applies `mv` without checking its legality.
    ///
    /// The captured piece is removed from its own square (which differs from the destination
    /// for en passant), promotions replace the pawn, and castling also moves the Rook.
    pub fn make_move(&mut self, mv: Move) {
        let (from, to) = (mv.from(), mv.to());
        let piece = mv.piece();
        let color = piece.color();
        let rights_before = self.castling_rights_index();

        if let Some(ep_square) = self.ep_square.take() {
            self.key.hash_ep_square(ep_square);
        }

        self.halfmove += 1;
        self.fullmove += color.index();

        let moves_made = self.move_counts[from];
        self.move_counts[from] = 0;
        self.take(from);

        if let Some(victim_square) = mv.captured_square() {
            if let Some(victim) = self.take(victim_square) {
                // A Rook captured on its home corner can no longer castle
                if victim.kind() == PieceKind::Rook {
                    self.note_rook_moved(victim.color(), victim_square);
                }
            }
            self.move_counts[victim_square] = 0;
            self.halfmove = 0;
        }

        let placed = match mv.promotion_kind() {
            Some(promotion) => piece.promoted(promotion),
            None => piece,
        };
        self.place(placed, to);
        self.move_counts[to] = moves_made.saturating_add(1);

        if let Some((rook_from, rook_to)) = mv.castle_rook() {
            let rook_moves_made = self.move_counts[rook_from];
            self.move_counts[rook_from] = 0;
            if let Some(rook) = self.take(rook_from) {
                self.place(rook, rook_to);
            }
            self.move_counts[rook_to] = rook_moves_made.saturating_add(1);
            self.note_rook_moved(color, rook_from);
            self.castled[color] = true;
        }

        match piece.kind() {
            PieceKind::Pawn => {
                self.halfmove = 0;
                if mv.is_pawn_double_push() {
                    self.ep_square = from.forward_by(color, 1);
                    if let Some(ep_square) = self.ep_square {
                        self.key.hash_ep_square(ep_square);
                    }
                }
            }
            PieceKind::Rook => self.note_rook_moved(color, from),
            PieceKind::King => self.king_moves[color] = self.king_moves[color].saturating_add(1),
            _ => {}
        }

        let rights_after = self.castling_rights_index();
        if rights_before != rights_after {
            self.key.hash_castling_rights(rights_before);
            self.key.hash_castling_rights(rights_after);
        }

        self.side_to_move = color.opponent();
        self.key.toggle_side_to_move();
        self.move_index += 1;
    }

    /// Copies `self` and returns the [`Board`] after `mv` has been applied.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::default();
    /// let mv = Move::quiet(Square::E2, Square::E4, Piece::WHITE_PAWN);
    /// let after = board.with_move_made(mv);
    /// assert_eq!(after.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    /// assert_ne!(board.pawn_key(), after.pawn_key());
    /// ```
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }

    /// Returns `true` if the side to move's King is attacked.
    #[inline(always)]
    pub fn is_in_check(&self, tables: &AttackTables) -> bool {
        tables.is_square_attacked_by(
            self,
            self.king_square(self.side_to_move),
            self.side_to_move.opponent(),
        )
    }

    /// Returns `true` if making `mv` does not leave the mover's King attacked.
    ///
    /// Move generation only guarantees this for King moves; every other move must pass
    /// through here (or an equivalent check) before it is considered legal.
    #[inline(always)]
    pub fn is_legal_after(&self, tables: &AttackTables, mv: Move) -> bool {
        let color = mv.piece().color();
        let after = self.with_move_made(mv);
        !tables.is_square_attacked_by(&after, after.king_square(color), color.opponent())
    }

    /// The same position with colors swapped and the board mirrored top to bottom.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::from_fen("4k3/8/8/8/3P4/8/8/R3K3 w Q - 0 1").unwrap();
    /// assert_eq!(board.mirrored().to_fen(), "r3k3/8/8/3p4/8/8/8/4K3 b q - 0 1");
    /// assert_eq!(board.mirrored().mirrored(), board);
    /// ```
    pub fn mirrored(&self) -> Self {
        let mut mirror = Self::new();

        for square in self.occupied() {
            if let Some(piece) = self.piece_at(square) {
                mirror.place(piece.inverted(), square.flipped_rank());
                mirror.move_counts[square.flipped_rank()] = self.move_counts[square];
            }
        }

        mirror.side_to_move = self.side_to_move.opponent();
        mirror.ep_square = self.ep_square.map(Square::flipped_rank);
        for color in Color::all() {
            mirror.king_moves[color.opponent()] = self.king_moves[color];
            mirror.rook_moves[color.opponent()] = self.rook_moves[color];
            mirror.castled[color.opponent()] = self.castled[color];
        }
        mirror.halfmove = self.halfmove;
        mirror.fullmove = self.fullmove;
        mirror.move_index = self.move_index;

        mirror.hash_state();
        mirror
    }

    /// Hashes the side to move, en passant square, and castling rights into the key.
    ///
    /// Piece hashes are already present from [`Board::place`].
    fn hash_state(&mut self) {
        self.key.hash_side_to_move(self.side_to_move);
        if let Some(ep_square) = self.ep_square {
            self.key.hash_ep_square(ep_square);
        }
        self.key.hash_castling_rights(self.castling_rights_index());
    }

    #[inline(always)]
    fn note_rook_moved(&mut self, color: Color, square: Square) {
        for side in CastleSide::all() {
            if square == side.rook_home(color) {
                let count = &mut self.rook_moves[color][side.index()];
                *count = count.saturating_add(1);
            }
        }
    }

    /// Bitmask in `[0, 16)` of the castling moves still available.
    #[inline(always)]
    pub fn castling_rights_index(&self) -> usize {
        let mut rights = 0;
        for color in Color::all() {
            for side in CastleSide::all() {
                if self.can_castle(color, side) {
                    rights |= side.bit(color);
                }
            }
        }
        rights
    }

    /// Returns `true` if neither `color`'s King nor its `side` Rook have moved.
    ///
    /// Says nothing about whether castling is currently possible.
    #[inline(always)]
    pub const fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.king_moves[color.index()] == 0 && self.rook_moves[color.index()][side.index()] == 0
    }

    #[inline(always)]
    pub const fn king_moves(&self, color: Color) -> u16 {
        self.king_moves[color.index()]
    }

    #[inline(always)]
    pub const fn rook_moves(&self, color: Color, side: CastleSide) -> u16 {
        self.rook_moves[color.index()][side.index()]
    }

    /// Returns `true` if `color` has castled on this board.
    #[inline(always)]
    pub const fn has_castled(&self, color: Color) -> bool {
        self.castled[color.index()]
    }

    /// How many times the piece currently on `square` has moved.
    #[inline(always)]
    pub const fn move_count(&self, square: Square) -> u16 {
        self.move_counts[square.index()]
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The square a pawn skipped over on the previous move, if any.
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    #[inline(always)]
    pub const fn move_index(&self) -> usize {
        self.move_index
    }

    #[inline(always)]
    pub const fn key(&self) -> ZobristKey {
        self.key
    }

    /// Zobrist key over pawn placement only, used to index the pawn-structure cache.
    #[inline(always)]
    pub const fn pawn_key(&self) -> ZobristKey {
        self.pawn_key
    }

    /// White material minus Black material, in centipawns.
    #[inline(always)]
    pub const fn material(&self) -> i32 {
        self.material
    }

    /// White piece-square bonuses minus Black's.
    #[inline(always)]
    pub const fn positional(&self) -> i32 {
        self.positional
    }

    /// Material units of `color`'s non-pawn pieces: 3 per minor, 5 per Rook, 9 per Queen.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// assert_eq!(Board::default().material_units(Color::Black), 31);
    /// ```
    pub fn material_units(&self, color: Color) -> i32 {
        PieceKind::all().into_iter().fold(0, |units, kind| {
            units + self.piece_parts(color, kind).population() as i32 * kind.units()
        })
    }

    /// The rotated occupancy boards for sliding-attack lookups.
    #[inline(always)]
    pub const fn occupancy(&self) -> &RotatedOccupancy {
        &self.occupancy
    }

    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.mailbox[square].map(|piece| piece.color())
    }

    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.mailbox[square].map(|piece| piece.kind())
    }

    /// Every square occupied by `color`.
    #[inline(always)]
    pub const fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Every square occupied by a `kind`, of either color.
    #[inline(always)]
    pub const fn kind(&self, kind: PieceKind) -> Bitboard {
        self.pieces[kind.index()]
    }

    /// Every square occupied by a `color` `kind`.
    ///
    /// # Example
    /// ```
    /// # use tadpole::*;
    /// let board = Board::default();
    /// assert_eq!(board.piece_parts(Color::White, PieceKind::Pawn), Bitboard::RANK_2);
    /// ```
    #[inline(always)]
    pub const fn piece_parts(&self, color: Color, kind: PieceKind) -> Bitboard {
        Bitboard(self.colors[color.index()].0 & self.pieces[kind.index()].0)
    }

    #[inline(always)]
    pub const fn pawns(&self, color: Color) -> Bitboard {
        self.piece_parts(color, PieceKind::Pawn)
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.colors[Color::White] | self.colors[Color::Black]
    }

    /// Bishops and Queens of `color`.
    #[inline(always)]
    pub fn diagonal_sliders(&self, color: Color) -> Bitboard {
        (self.pieces[PieceKind::Bishop] | self.pieces[PieceKind::Queen]) & self.colors[color]
    }

    /// Rooks and Queens of `color`.
    #[inline(always)]
    pub fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        (self.pieces[PieceKind::Rook] | self.pieces[PieceKind::Queen]) & self.colors[color]
    }

    /// Square of `color`'s King.
    ///
    /// Every [`Board`] built through [`Board::from_fen`] has exactly one King per side.
    #[inline(always)]
    pub const fn king_square(&self, color: Color) -> Square {
        self.piece_parts(color, PieceKind::King).to_square_unchecked()
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safety: The FEN for startpos is always valid
        unsafe { Self::from_fen(FEN_STARTPOS).unwrap_unchecked() }
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                let piece_char = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            if rank == Rank::EIGHT {
                write!(f, "           FEN: {}", self.to_fen())?;
            } else if rank == Rank::SEVEN {
                write!(f, "          Side: {}", self.side_to_move.name())?;
            } else if rank == Rank::SIX {
                write!(f, "      Castling: {}", self.castling_rights_uci())?;
            } else if rank == Rank::FIVE {
                let ep = self
                    .ep_square
                    .map(|square| square.to_uci())
                    .unwrap_or(String::from("-"));
                write!(f, "            EP: {ep}")?;
            } else if rank == Rank::FOUR {
                write!(f, "      Material: {:+}", self.material)?;
            } else if rank == Rank::THREE {
                write!(f, "    Positional: {:+}", self.positional)?;
            } else if rank == Rank::TWO {
                write!(f, "           Key: {:016x}", self.key.inner())?;
            } else if rank == Rank::ONE {
                write!(f, "      Pawn key: {:016x}", self.pawn_key.inner())?;
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}
