/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::sync::OnceLock;

use super::params::{
    KING_ATTACK_SENTINEL, KING_ATTACK_UNITS, KING_DIAGONAL_PRESSURE, KING_FORFEIT_CASTLE,
    KING_NEAR_PASSER,
};
use super::{PawnFlags, Psqt};
use crate::{AttackTables, Bitboard, Board, CastleSide, Color, PieceKind, Rank, Square};

/// The rings of squares around a King that attackers are counted on, per color and square.
pub struct KingZones {
    /// Three squares two ranks in front of the King.
    staging: [[Bitboard; Square::COUNT]; Color::COUNT],

    /// Three squares directly in front of the King, where its shelter pawns stand.
    pawn_area: [[Bitboard; Square::COUNT]; Color::COUNT],

    /// Every square adjacent to the King.
    near: [[Bitboard; Square::COUNT]; Color::COUNT],
}

impl KingZones {
    fn new() -> Self {
        let mut zones = Self {
            staging: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
            pawn_area: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
            near: [[Bitboard::EMPTY_BOARD; Square::COUNT]; Color::COUNT],
        };

        for color in Color::all() {
            for square in Square::iter() {
                for files in -1..=1 {
                    let at = |ranks: i8| {
                        square
                            .forward_by(color, ranks)
                            .and_then(|to| to.offset(files, 0))
                    };

                    if let Some(to) = at(2) {
                        zones.staging[color][square].set(to);
                    }
                    if let Some(to) = at(1) {
                        zones.pawn_area[color][square].set(to);
                        zones.near[color][square].set(to);
                    }
                    if let Some(to) = at(-1) {
                        zones.near[color][square].set(to);
                    }
                    if let Some(to) = at(0).filter(|to| *to != square) {
                        zones.near[color][square].set(to);
                    }
                }
            }
        }

        zones
    }

    /// A process-wide instance, built on first use.
    #[inline(always)]
    pub fn get() -> &'static Self {
        static ZONES: OnceLock<KingZones> = OnceLock::new();
        ZONES.get_or_init(Self::new)
    }

    #[inline(always)]
    pub fn staging(&self, color: Color, square: Square) -> Bitboard {
        self.staging[color][square]
    }

    #[inline(always)]
    pub fn pawn_area(&self, color: Color, square: Square) -> Bitboard {
        self.pawn_area[color][square]
    }

    #[inline(always)]
    pub fn near(&self, color: Color, square: Square) -> Bitboard {
        self.near[color][square]
    }
}

/// King safety of `color`, from `color`'s perspective.
///
/// Against a queenless opponent with little material, this rewards a central King close to
/// passed pawns. Otherwise it is the negated danger from a poor pawn shelter and from
/// enemy pieces bearing on the squares around the King.
pub fn king_safety(tables: &AttackTables, board: &Board, flags: &PawnFlags, color: Color) -> i32 {
    let opponent = color.opponent();
    let king = board.king_square(color);

    if board.piece_parts(opponent, PieceKind::Queen).is_empty()
        && board.material_units(opponent) < KING_ATTACK_UNITS
    {
        let rank = king.rank().relative_to(color).index() as i32;
        let passers = (tables.king_attacks(king) & flags.all_passed()).population() as i32;
        return Psqt::knight().get_relative(king, color) + passers * rank * KING_NEAR_PASSER;
    }

    let mut score = 0;
    let mut shelter = pawn_shelter(tables, board, flags, king, color);

    if board.king_moves(color) == 0 && !board.has_castled(color) {
        // Still free to castle either way: credit the shelters it could reach
        let castled = |side: CastleSide| {
            if board.rook_moves(color, side) == 0 {
                pawn_shelter(tables, board, flags, side.king_destination(color), color)
            } else {
                shelter + KING_FORFEIT_CASTLE
            }
        };
        shelter = (shelter + castled(CastleSide::Short) + castled(CastleSide::Long)) / 3;
    } else if (3..=5).contains(&king.file().index()) {
        score -= KING_FORFEIT_CASTLE;
    }

    score - shelter - attacking_pieces(tables, board, king, color)
}

/// How exposed a `defender` King on `king` would be, given its pawn cover. Higher is worse.
///
/// Each square in front of the King that is empty, or held by an enemy piece other than a
/// Pawn or Bishop, weakens the shelter; more so if its file is open or lacks friendly
/// pawns. The result is scaled by the attacker's remaining material.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let tables = AttackTables::get();
/// let board = Board::from_fen("r5k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();
/// let mut flags = PawnFlags::new();
/// score_pawns(&board, &mut flags);
/// assert_eq!(pawn_shelter(tables, &board, &flags, Square::G1, Color::White), 1);
/// ```
pub fn pawn_shelter(
    tables: &AttackTables,
    board: &Board,
    flags: &PawnFlags,
    king: Square,
    defender: Color,
) -> i32 {
    let attacker = defender.opponent();
    let own_half = Bitboard::half_up_to(defender, Rank::FOUR.relative_to(defender));
    let mut holes = 1;

    for square in KingZones::get().pawn_area(defender, king) {
        let exposed = match board.piece_at(square) {
            None => true,
            Some(piece) => {
                piece.color() == attacker
                    && !matches!(piece.kind(), PieceKind::Pawn | PieceKind::Bishop)
            }
        };
        if !exposed {
            continue;
        }

        let file = Bitboard::from_file(square.file());
        if flags.open_files.intersects(square) {
            holes += 7;
        } else {
            if !board.pawns(attacker).intersects(file) {
                holes += 2;
            }
            if !board.pawns(defender).intersects(file & own_half) {
                holes += 4;
            }
            holes += 1;
        }
    }

    let diagonals = tables.king_diagonal(0, king) | tables.king_diagonal(1, king);
    let pressure = (diagonals & board.diagonal_sliders(attacker)).population() as i32;

    (board.material_units(attacker) / 5) * Psqt::king().get_relative(king, defender) * holes
        + pressure * KING_DIAGONAL_PRESSURE
}

/// Danger to a `defender` King on `king` from enemy pieces attacking the squares around it.
///
/// Attacks on undefended squares next to the King count in full, attacks on defended ones
/// by half, and attacks on the staging squares further out are diluted by how many defended
/// or safe squares the King has. The defender's own King does not count as a defender.
///
/// If the attacker is to move, reaches an undefended square next to the King, and the King
/// has no safe square to step to, this returns [`KING_ATTACK_SENTINEL`].
pub fn attacking_pieces(
    tables: &AttackTables,
    board: &Board,
    king: Square,
    defender: Color,
) -> i32 {
    let zones = KingZones::get();
    let attacker = defender.opponent();
    let defenders = board.color(defender) & !board.piece_parts(defender, PieceKind::King);
    let is_defended = |square: Square| {
        (tables.attackers_no_xray(board, square, defender) & defenders).is_nonempty()
    };

    let mut staging = 0;
    let mut adjacent = 0;
    let mut undefended = 0;
    let mut defended_squares = 0;
    let mut safe_squares = 0;

    for square in zones.staging(defender, king) {
        let occupant = board.color(attacker) & square;
        let attackers = tables.all_attackers(board, square, attacker);

        if attackers.is_nonempty() {
            let score = attacks_to_square(board, attackers | occupant, attacker);
            if is_defended(square) {
                staging += score >> 2;
                defended_squares += 1;
            } else {
                staging += score >> 1;
            }
        } else if !is_defended(square) {
            staging += attacks_to_square(board, occupant, attacker);
        }
    }

    for square in zones.near(defender, king) {
        let occupant = board.color(attacker) & square;
        let attackers = tables.all_attackers(board, square, attacker);

        if attackers.is_nonempty() {
            let score = attacks_to_square(board, attackers | occupant, attacker);
            if is_defended(square) {
                adjacent += score >> 1;
                defended_squares += 1;
            } else {
                undefended += score;
            }
        } else if board.color_at(square) != Some(defender) {
            safe_squares += 1;
        }
    }

    if undefended > 0 && safe_squares == 0 && board.side_to_move() == attacker {
        return KING_ATTACK_SENTINEL;
    }

    undefended + adjacent + staging / (defended_squares + safe_squares).max(1)
}

/// Weighs a set of `attacker` pieces bearing on one square.
///
/// Every attacker is worth more the more company it has; a lone Queen is worth nothing.
///
/// # Example
/// ```
/// # use tadpole::*;
/// let board = Board::from_fen("4k3/8/8/8/8/2N5/1Q6/4K3 w - - 0 1").unwrap();
/// let knight = Bitboard::from_square(Square::C3);
/// let queen = Bitboard::from_square(Square::B2);
/// assert_eq!(attacks_to_square(&board, knight, Color::White), 26);
/// assert_eq!(attacks_to_square(&board, queen, Color::White), 0);
/// assert_eq!(attacks_to_square(&board, knight | queen, Color::White), 26 * 2 + 94);
/// ```
pub fn attacks_to_square(board: &Board, attackers: Bitboard, attacker: Color) -> i32 {
    let count =
        |kind: PieceKind| (attackers & board.piece_parts(attacker, kind)).population() as i32;

    let pawns = count(PieceKind::Pawn);
    let minors = count(PieceKind::Knight) + count(PieceKind::Bishop);
    let rooks = count(PieceKind::Rook);
    let queens = count(PieceKind::Queen);
    let king = count(PieceKind::King);

    let pieces = pawns + minors + rooks + king;
    let with_queens = pieces + queens;

    10 * pawns * with_queens
        + 26 * minors * with_queens
        + 60 * rooks * with_queens
        + 94 * queens * pieces
        + king
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> (Board, PawnFlags) {
        let board = Board::from_fen(fen).unwrap();
        let mut flags = PawnFlags::new();
        super::super::score_pawns(&board, &mut flags);
        (board, flags)
    }

    #[test]
    fn test_zones_around_a_corner_king() {
        let zones = KingZones::get();
        assert_eq!(
            zones.near(Color::Black, Square::H8),
            Bitboard::from_iter([Square::G8, Square::G7, Square::H7])
        );
        assert_eq!(
            zones.pawn_area(Color::White, Square::G1),
            Bitboard::from_iter([Square::F2, Square::G2, Square::H2])
        );
        assert_eq!(
            zones.staging(Color::Black, Square::H8),
            Bitboard::from_iter([Square::G6, Square::H6])
        );
        assert_eq!(zones.staging(Color::White, Square::E8), Bitboard::EMPTY_BOARD);
    }

    #[test]
    fn test_missing_shelter_pawn_weakens_the_king() {
        let tables = AttackTables::get();

        let (intact, flags) = board("r5k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1");
        assert_eq!(pawn_shelter(tables, &intact, &flags, Square::G1, Color::White), 1);
        assert_eq!(attacking_pieces(tables, &intact, Square::G1, Color::White), 0);

        // g2 gone: +4 for no g-pawn in White's half, +1 for the hole itself
        let (holed, flags) = board("r5k1/5ppp/8/8/8/8/5P1P/6K1 w - - 0 1");
        assert_eq!(pawn_shelter(tables, &holed, &flags, Square::G1, Color::White), 6);
    }

    #[test]
    fn test_smothered_king_returns_sentinel() {
        let tables = AttackTables::get();

        // The Knight hits g8, and g7 and h7 are blocked by Black's own pawns
        let (board, _) = board("7k/4N1pp/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            attacking_pieces(tables, &board, Square::H8, Color::Black),
            KING_ATTACK_SENTINEL
        );

        // With Black to move there is no immediate threat, only the raw attack scores
        let board = Board::from_fen("7k/4N1pp/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(attacking_pieces(tables, &board, Square::H8, Color::Black), 26 + 6);
    }

    #[test]
    fn test_endgame_king_prefers_the_center() {
        let tables = AttackTables::get();
        let (center, flags) = board("4k3/8/8/8/4K3/8/8/8 w - - 0 1");
        let center = king_safety(tables, &center, &flags, Color::White);

        let (corner, flags) = board("4k3/8/8/8/8/8/8/K7 w - - 0 1");
        let corner = king_safety(tables, &corner, &flags, Color::White);
        assert!(center > corner);
    }
}
