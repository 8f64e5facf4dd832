// This file is part of the ruleboard library.
// Copyright (C) 2026 The ruleboard developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Xiangqi movement rules.
//!
//! The board has 10 rows and 9 columns. Black starts on rows 0 to 4, red
//! on rows 5 to 9, and the river runs between rows 4 and 5. Each side has
//! a palace of 3 × 3 squares in the middle of its back rows.
//!
//! The functions in this module work on a bare [`Board`] and are
//! pseudo-legal: they do not consider whether the mover's own general is
//! left in check. [`Xiangqi`] adds that filter.
//!
//! # Examples
//!
//! ```
//! use ruleboard::{xiangqi, Board, Color, Role, Square};
//!
//! let mut board = Board::empty(ruleboard::Dimensions::XIANGQI);
//! let cannon = Role::Cannon.of(Color::RED);
//! board.set_piece_at(Square::new(5, 4), cannon);
//! board.set_piece_at(Square::new(3, 4), Role::Soldier.of(Color::RED));
//! board.set_piece_at(Square::new(1, 4), Role::Soldier.of(Color::Black));
//!
//! // Capture over exactly one screen.
//! assert!(xiangqi::is_valid_move(&board, cannon, Square::new(5, 4), Square::new(1, 4)));
//! // A quiet move may not jump.
//! assert!(!xiangqi::is_valid_move(&board, cannon, Square::new(5, 4), Square::new(2, 4)));
//! ```

use crate::{
    board::{Board, SquareList},
    color::{ByColor, Color},
    m::Move,
    position::{FromSetup, Position, PositionError, PositionErrorKinds},
    role::Role,
    setup::Setup,
    square::{Dimensions, Square},
    types::{Piece, PieceFlags},
    variant::Variant,
};

/// Tests if `sq` lies in the palace of `color`: columns 3 to 5 and rows
/// 0 to 2 for black, rows 7 to 9 for red.
pub const fn is_in_palace(sq: Square, color: Color) -> bool {
    let rows_ok = match color {
        Color::Black => sq.row <= 2,
        Color::White => 7 <= sq.row && sq.row <= 9,
    };
    rows_ok && 3 <= sq.col && sq.col <= 5
}

/// Tests if `sq` is on the half of the board where `color` starts.
pub const fn is_on_own_side(sq: Square, color: Color) -> bool {
    match color {
        Color::Black => sq.row <= 4,
        Color::White => 5 <= sq.row && sq.row <= 9,
    }
}

/// Tests if `sq` is across the river from the point of view of `color`.
pub const fn has_crossed_river(sq: Square, color: Color) -> bool {
    match color {
        Color::Black => 5 <= sq.row && sq.row <= 9,
        Color::White => sq.row <= 4,
    }
}

fn is_orthogonal_step(from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs() + dcol.abs() == 1
}

fn is_orthogonal_line(from: Square, to: Square) -> bool {
    from != to && (from.row == to.row || from.col == to.col)
}

/// Tests if the general of `color`, moving from `from` to `to`, would stand
/// on an open file with the other general.
fn would_face_general(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let Some(other) = board.find_king(color.other()) else {
        return false;
    };
    if other.col != to.col {
        return false;
    }
    let Some(between) = board.count_between(to, other) else {
        return false;
    };
    let vacated = is_between(to, from, other) && board.is_occupied(from);
    between - usize::from(vacated) == 0
}

/// Tests if `x` lies strictly between `a` and `b` on a common file.
fn is_between(a: Square, x: Square, b: Square) -> bool {
    a.col == x.col
        && x.col == b.col
        && a.row.min(b.row) < x.row
        && x.row < a.row.max(b.row)
}

/// One orthogonal step, staying inside the own palace. The general may not
/// step onto an open file with the other general.
pub fn is_valid_general_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    is_orthogonal_step(from, to)
        && is_in_palace(to, piece.color)
        && !would_face_general(board, piece.color, from, to)
}

/// One diagonal step, staying inside the own palace.
pub fn is_valid_advisor_move(_board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs() == 1 && dcol.abs() == 1 && is_in_palace(to, piece.color)
}

/// Exactly two diagonal steps on the own side of the river. Blocked if the
/// square in between (the eye) is occupied by any piece.
pub fn is_valid_elephant_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs() == 2
        && dcol.abs() == 2
        && is_on_own_side(to, piece.color)
        && from
            .offset(drow / 2, dcol / 2)
            .is_some_and(|eye| !board.is_occupied(eye))
}

/// An L-shaped jump of (2, 1) or (1, 2). Blocked if the square next to the
/// horse along the long side of the L (the leg) is occupied.
pub fn is_valid_horse_move(board: &Board, _piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    let leg = match (drow.abs(), dcol.abs()) {
        (2, 1) => from.offset(drow / 2, 0),
        (1, 2) => from.offset(0, dcol / 2),
        _ => return false,
    };
    leg.is_some_and(|leg| !board.is_occupied(leg))
}

/// Any distance along a row or column, over empty squares only.
pub fn is_valid_chariot_move(board: &Board, _piece: Piece, from: Square, to: Square) -> bool {
    is_orthogonal_line(from, to) && board.is_path_clear(from, to)
}

/// Moves like a chariot, but captures by jumping over exactly one piece
/// (the screen).
pub fn is_valid_cannon_move(board: &Board, _piece: Piece, from: Square, to: Square) -> bool {
    if !is_orthogonal_line(from, to) {
        return false;
    }
    let screens = usize::from(board.is_occupied(to));
    board.count_between(from, to) == Some(screens)
}

/// One step forward. Once across the river, also one step sideways.
/// Never backwards.
///
/// A soldier counts as crossed if it stands beyond the river or carries
/// [`PieceFlags::CROSSED_RIVER`].
pub fn is_valid_soldier_move(_board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    let crossed = piece.has_crossed_river() || has_crossed_river(from, piece.color);
    (drow == piece.color.forward() && dcol == 0) || (crossed && drow == 0 && dcol.abs() == 1)
}

/// Tests if `piece` may move from `from` to `to` on `board`. Squares off the
/// board, null moves and destinations occupied by an ally are rejected
/// before the piece specific rule is consulted.
pub fn is_valid_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if !board.is_valid(from) || !board.is_valid(to) || from == to {
        return false;
    }
    if board.color_at(to) == Some(piece.color) {
        return false;
    }
    match piece.role {
        Role::King => is_valid_general_move(board, piece, from, to),
        Role::Advisor => is_valid_advisor_move(board, piece, from, to),
        Role::Elephant => is_valid_elephant_move(board, piece, from, to),
        Role::Horse => is_valid_horse_move(board, piece, from, to),
        Role::Chariot => is_valid_chariot_move(board, piece, from, to),
        Role::Cannon => is_valid_cannon_move(board, piece, from, to),
        Role::Soldier => is_valid_soldier_move(board, piece, from, to),
        Role::Pawn | Role::Knight | Role::Bishop | Role::Rook | Role::Queen => false,
    }
}

/// All destinations of the piece on `from`, in row-major order.
pub fn possible_moves(board: &Board, from: Square) -> SquareList {
    let mut moves = SquareList::new();
    if let Some(piece) = board.piece_at(from) {
        moves.extend(
            board
                .dimensions()
                .squares()
                .filter(|&to| is_valid_move(board, piece, from, to)),
        );
    }
    moves
}

/// Tests if `piece` on `from` attacks `to`. Same as the move geometry, but
/// without the open file restriction for generals.
fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    match piece.role {
        Role::King => is_orthogonal_step(from, to) && is_in_palace(to, piece.color),
        _ => is_valid_move(board, piece, from, to),
    }
}

/// Tests if both generals are on the same file with nothing between them.
pub fn kings_facing(board: &Board) -> bool {
    match (board.find_king(Color::White), board.find_king(Color::Black)) {
        (Some(red), Some(black)) => red.col == black.col && board.is_path_clear(red, black),
        _ => false,
    }
}

/// Tests if the general of `color` is attacked by an enemy piece, or faces
/// the other general on an open file. Returns `false` if there is no
/// general of that color.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    kings_facing(board)
        || board
            .pieces_of(color.other())
            .any(|(from, piece)| attacks(board, piece, from, king))
}

/// A xiangqi position.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Xiangqi {
    board: Board,
    turn: Color,
}

impl Default for Xiangqi {
    fn default() -> Xiangqi {
        Xiangqi {
            board: Board::xiangqi(),
            turn: Color::RED,
        }
    }
}

impl FromSetup for Xiangqi {
    fn from_setup(setup: Setup) -> Result<Xiangqi, PositionError<Xiangqi>> {
        let mut errors = PositionErrorKinds::empty();
        let board = setup.board;

        if board.dimensions() != Dimensions::XIANGQI {
            errors |= PositionErrorKinds::WRONG_DIMENSIONS;
        }
        if board.is_empty() {
            errors |= PositionErrorKinds::EMPTY_BOARD;
        }
        if setup.ep_square.is_some() {
            errors |= PositionErrorKinds::INVALID_EP_SQUARE;
        }

        let mut kings = ByColor::<usize>::default();
        let mut material = ByColor::<usize>::default();
        for (sq, piece) in board.pieces() {
            *material.get_mut(piece.color) += 1;
            if !Variant::Xiangqi.roles().contains(&piece.role) {
                errors |= PositionErrorKinds::FOREIGN_PIECE;
            }
            let in_zone = match piece.role {
                Role::King | Role::Advisor => is_in_palace(sq, piece.color),
                Role::Elephant => is_on_own_side(sq, piece.color),
                _ => true,
            };
            if !in_zone {
                errors |= PositionErrorKinds::KING_OUTSIDE_PALACE;
            }
            if piece.role == Role::King {
                *kings.get_mut(piece.color) += 1;
            }
        }
        if kings.any(|n| *n == 0) {
            errors |= PositionErrorKinds::MISSING_KING;
        }
        if kings.any(|n| *n > 1) {
            errors |= PositionErrorKinds::TOO_MANY_KINGS;
        }
        if material.any(|n| *n > 16) {
            errors |= PositionErrorKinds::TOO_MUCH_MATERIAL;
        }
        if is_king_in_check(&board, setup.turn.other()) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        PositionError::new(
            errors,
            Xiangqi {
                board,
                turn: setup.turn,
            },
        )
    }
}

impl Position for Xiangqi {
    fn variant(&self) -> Variant {
        Variant::Xiangqi
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn turn(&self) -> Color {
        self.turn
    }

    fn is_valid_move(&self, piece: Piece, from: Square, to: Square) -> bool {
        is_valid_move(&self.board, piece, from, to)
    }

    fn is_king_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    fn is_safe(&self, m: Move) -> bool {
        let mut after = self.clone();
        after.play_unchecked(m);
        !after.is_king_in_check(m.piece.color)
    }

    fn play_unchecked(&mut self, m: Move) {
        self.board.remove_piece_at(m.from);
        let mut piece = m.piece.with_flags(PieceFlags::MOVED);
        if piece.role == Role::Soldier && has_crossed_river(m.to, piece.color) {
            piece = piece.with_flags(PieceFlags::CROSSED_RIVER);
        }
        self.board.set_piece_at(m.to, piece);
        self.turn = self.turn.other();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Status;

    fn board_with(pieces: &[(u8, u8, Piece)]) -> Board {
        let mut board = Board::empty(Dimensions::XIANGQI);
        for &(row, col, piece) in pieces {
            board.set_piece_at(Square::new(row, col), piece);
        }
        board
    }

    fn setup(pieces: &[(u8, u8, Piece)], turn: Color) -> Xiangqi {
        Xiangqi::from_setup(Setup {
            board: board_with(pieces),
            turn,
            ep_square: None,
        })
        .expect("valid xiangqi setup")
    }

    const RED_KING: Piece = Color::RED.king();
    const BLACK_KING: Piece = Color::Black.king();

    #[test]
    fn test_zones() {
        assert!(is_in_palace(Square::new(0, 3), Color::Black));
        assert!(is_in_palace(Square::new(2, 5), Color::Black));
        assert!(!is_in_palace(Square::new(3, 4), Color::Black));
        assert!(!is_in_palace(Square::new(1, 6), Color::Black));
        assert!(is_in_palace(Square::new(7, 5), Color::RED));
        assert!(!is_in_palace(Square::new(6, 4), Color::RED));
        assert!(!is_in_palace(Square::new(1, 4), Color::RED));

        assert!(is_on_own_side(Square::new(5, 0), Color::RED));
        assert!(!is_on_own_side(Square::new(4, 0), Color::RED));
        assert!(is_on_own_side(Square::new(4, 0), Color::Black));
        assert!(has_crossed_river(Square::new(4, 8), Color::RED));
        assert!(has_crossed_river(Square::new(5, 8), Color::Black));
        assert!(!has_crossed_river(Square::new(9, 8), Color::RED));
    }

    #[test]
    fn test_lone_chariot() {
        let board = board_with(&[(5, 4, Role::Chariot.of(Color::RED))]);
        let moves = possible_moves(&board, Square::new(5, 4));
        assert_eq!(moves.len(), 17);
        assert!(moves.iter().all(|sq| sq.row == 5 || sq.col == 4));
        assert!(!moves.contains(&Square::new(5, 4)));
    }

    #[test]
    fn test_chariot_blocked() {
        let chariot = Role::Chariot.of(Color::RED);
        let mut board = board_with(&[(5, 4, chariot)]);
        assert!(is_valid_move(&board, chariot, Square::new(5, 4), Square::new(0, 4)));
        board.set_piece_at(Square::new(2, 4), Role::Horse.of(Color::Black));
        assert!(!is_valid_move(&board, chariot, Square::new(5, 4), Square::new(0, 4)));
        assert!(is_valid_move(&board, chariot, Square::new(5, 4), Square::new(2, 4)));
    }

    #[test]
    fn test_cannon_screen() {
        let cannon = Role::Cannon.of(Color::RED);
        let from = Square::new(5, 4);
        let target = Square::new(1, 4);
        let mut board = board_with(&[
            (5, 4, cannon),
            (3, 4, Role::Soldier.of(Color::RED)),
            (1, 4, Role::Soldier.of(Color::Black)),
        ]);
        assert!(is_valid_move(&board, cannon, from, target));
        assert!(is_valid_move(&board, cannon, from, Square::new(4, 4)));
        assert!(!is_valid_move(&board, cannon, from, Square::new(2, 4)));

        board.set_piece_at(Square::new(2, 4), Role::Horse.of(Color::Black));
        assert!(!is_valid_move(&board, cannon, from, target));

        board.remove_piece_at(Square::new(2, 4));
        board.remove_piece_at(Square::new(3, 4));
        assert!(!is_valid_move(&board, cannon, from, target));
        assert!(is_valid_move(&board, cannon, from, Square::new(2, 4)));
    }

    #[test]
    fn test_flying_general() {
        let mut board = board_with(&[(9, 4, RED_KING), (0, 4, BLACK_KING)]);
        let from = Square::new(9, 4);
        assert!(!is_valid_move(&board, RED_KING, from, Square::new(8, 4)));
        assert!(is_valid_move(&board, RED_KING, from, Square::new(9, 3)));

        board.set_piece_at(Square::new(5, 4), Role::Chariot.of(Color::Black));
        assert!(is_valid_move(&board, RED_KING, from, Square::new(8, 4)));
    }

    #[test]
    fn test_general_stepping_back_along_open_file() {
        let horse = Role::Horse.of(Color::RED);
        let board = board_with(&[(8, 4, RED_KING), (0, 4, BLACK_KING), (4, 4, horse)]);
        assert!(is_valid_move(&board, RED_KING, Square::new(8, 4), Square::new(9, 4)));

        let board = board_with(&[(8, 4, RED_KING), (0, 3, BLACK_KING)]);
        assert!(!is_valid_move(&board, RED_KING, Square::new(8, 4), Square::new(8, 3)));
        assert!(is_valid_move(&board, RED_KING, Square::new(8, 4), Square::new(9, 4)));
    }

    #[test]
    fn test_general_and_advisor_stay_in_palace() {
        let advisor = Role::Advisor.of(Color::RED);
        let board = board_with(&[(9, 3, advisor), (7, 3, RED_KING)]);
        assert!(is_valid_move(&board, advisor, Square::new(9, 3), Square::new(8, 4)));
        assert!(!is_valid_move(&board, advisor, Square::new(9, 3), Square::new(8, 2)));
        assert!(!is_valid_move(&board, advisor, Square::new(9, 3), Square::new(7, 5)));
        assert!(!is_valid_move(&board, RED_KING, Square::new(7, 3), Square::new(6, 3)));
        assert!(!is_valid_move(&board, RED_KING, Square::new(7, 3), Square::new(7, 2)));
        assert!(!is_valid_move(&board, RED_KING, Square::new(7, 3), Square::new(8, 4)));
        assert!(is_valid_move(&board, RED_KING, Square::new(7, 3), Square::new(8, 3)));
    }

    #[test]
    fn test_elephant_eye() {
        let elephant = Role::Elephant.of(Color::RED);
        let mut board = board_with(&[(9, 2, elephant), (5, 2, elephant)]);
        assert!(is_valid_move(&board, elephant, Square::new(9, 2), Square::new(7, 4)));
        assert!(!is_valid_move(&board, elephant, Square::new(9, 2), Square::new(8, 3)));
        // Elephants never cross the river.
        assert!(!is_valid_move(&board, elephant, Square::new(5, 2), Square::new(3, 4)));
        assert!(is_valid_move(&board, elephant, Square::new(5, 2), Square::new(7, 0)));

        board.set_piece_at(Square::new(8, 3), Role::Soldier.of(Color::Black));
        assert!(!is_valid_move(&board, elephant, Square::new(9, 2), Square::new(7, 4)));
        assert!(is_valid_move(&board, elephant, Square::new(9, 2), Square::new(7, 0)));

        // A piece of either color blocks the eye.
        board.set_piece_at(Square::new(8, 1), Role::Chariot.of(Color::RED));
        assert!(!is_valid_move(&board, elephant, Square::new(9, 2), Square::new(7, 0)));
        board.set_piece_at(Square::new(8, 3), Role::Advisor.of(Color::RED));
        assert!(!is_valid_move(&board, elephant, Square::new(9, 2), Square::new(7, 4)));
    }

    #[test]
    fn test_horse_leg() {
        let horse = Role::Horse.of(Color::RED);
        let from = Square::new(9, 1);
        let mut board = board_with(&[(9, 1, horse)]);
        for to in [Square::new(7, 0), Square::new(7, 2), Square::new(8, 3)] {
            assert!(is_valid_move(&board, horse, from, to), "{to}");
        }
        assert!(!is_valid_move(&board, horse, from, Square::new(7, 1)));

        board.set_piece_at(Square::new(8, 1), Role::Cannon.of(Color::Black));
        assert!(!is_valid_move(&board, horse, from, Square::new(7, 0)));
        assert!(!is_valid_move(&board, horse, from, Square::new(7, 2)));
        assert!(is_valid_move(&board, horse, from, Square::new(8, 3)));
    }

    #[test]
    fn test_soldier_river_asymmetry() {
        for color in Color::ALL {
            let soldier = Role::Soldier.of(color);
            let home = Square::new(color.fold_wb(6, 3), 2);
            let board = board_with(&[(home.row, home.col, soldier)]);
            let moves = possible_moves(&board, home);
            assert_eq!(moves.as_slice(), &[home.offset(color.forward(), 0).unwrap()]);

            let crossed = Square::new(color.fold_wb(4, 5), 2);
            let board = board_with(&[(crossed.row, crossed.col, soldier)]);
            let moves = possible_moves(&board, crossed);
            assert_eq!(moves.len(), 3);
            assert!(!moves.contains(&crossed.offset(-color.forward(), 0).unwrap()));
        }
    }

    #[test]
    fn test_soldier_flag_allows_sideways() {
        let soldier = Role::Soldier.of(Color::RED).with_flags(PieceFlags::CROSSED_RIVER);
        let board = board_with(&[(5, 4, soldier)]);
        assert!(is_valid_move(&board, soldier, Square::new(5, 4), Square::new(5, 3)));
        assert!(!is_valid_move(&board, soldier, Square::new(5, 4), Square::new(6, 4)));
    }

    #[test]
    fn test_no_self_capture() {
        let board = Board::xiangqi();
        for (from, piece) in board.pieces() {
            for to in possible_moves(&board, from) {
                assert_ne!(board.color_at(to), Some(piece.color));
            }
        }
    }

    #[test]
    fn test_kings_facing_is_check() {
        let board = board_with(&[(9, 4, RED_KING), (0, 4, BLACK_KING)]);
        assert!(kings_facing(&board));
        assert!(is_king_in_check(&board, Color::RED));
        assert!(is_king_in_check(&board, Color::Black));

        let board = board_with(&[(9, 4, RED_KING)]);
        assert!(!is_king_in_check(&board, Color::RED));
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn test_opening_the_file_is_illegal() {
        let horse = Role::Horse.of(Color::RED);
        let pos = setup(&[(9, 4, RED_KING), (0, 4, BLACK_KING), (5, 4, horse)], Color::RED);
        let m = pos.to_move(Square::new(5, 4), Square::new(3, 3), None).unwrap();
        assert!(pos.is_valid_move(horse, m.from, m.to));
        assert!(!pos.is_legal(m));
        assert_eq!(pos.possible_moves(Square::new(5, 4)).len(), 8);
        assert!(pos.legal_destinations(Square::new(5, 4)).is_empty());
    }

    #[test]
    fn test_starting_position() {
        let pos = Xiangqi::default();
        assert_eq!(pos.legal_moves().len(), 44);
        assert_eq!(pos.status(), Status::Playing);
        assert_eq!(pos.possible_moves(Square::new(7, 1)).len(), 12);
    }

    #[test]
    fn test_soldier_gets_flag() {
        let soldier = Role::Soldier.of(Color::RED);
        let mut pos = setup(&[(9, 4, RED_KING), (0, 3, BLACK_KING), (5, 0, soldier)], Color::RED);
        let m = pos.to_move(Square::new(5, 0), Square::new(4, 0), None).unwrap();
        pos.play_unchecked(m);
        let moved = pos.board().piece_at(Square::new(4, 0)).unwrap();
        assert!(moved.has_crossed_river());
        assert!(moved.has_moved());
        assert_eq!(pos.turn(), Color::Black);
    }

    #[test]
    fn test_checkmate() {
        let chariot = Role::Chariot.of(Color::RED);
        let pos = setup(
            &[(9, 3, RED_KING), (0, 4, BLACK_KING), (0, 0, chariot), (1, 0, chariot)],
            Color::Black,
        );
        assert!(pos.is_check());
        assert_eq!(pos.status(), Status::Checkmate);
        assert_eq!(
            pos.outcome(),
            Some(crate::Outcome::Decisive { winner: Color::RED })
        );
    }

    #[test]
    fn test_stalemate_loses() {
        let pos = setup(
            &[(9, 4, RED_KING), (0, 3, BLACK_KING), (1, 8, Role::Chariot.of(Color::RED))],
            Color::Black,
        );
        assert!(!pos.is_check());
        assert_eq!(pos.status(), Status::Stalemate);
        assert_eq!(
            pos.outcome(),
            Some(crate::Outcome::Decisive { winner: Color::RED })
        );
    }

    #[test]
    fn test_setup_errors() {
        let err = Xiangqi::from_setup(Setup::empty(Dimensions::XIANGQI)).unwrap_err();
        assert!(err.kinds().contains(PositionErrorKinds::EMPTY_BOARD));
        assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));

        let err = Xiangqi::from_setup(Setup {
            board: board_with(&[(9, 4, RED_KING), (0, 4, BLACK_KING)]),
            turn: Color::RED,
            ep_square: None,
        })
        .unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::OPPOSITE_CHECK);

        let err = Xiangqi::from_setup(Setup {
            board: board_with(&[(6, 4, RED_KING), (0, 3, BLACK_KING)]),
            turn: Color::RED,
            ep_square: None,
        })
        .unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::KING_OUTSIDE_PALACE);

        let err = Xiangqi::from_setup(Setup::new(Variant::Chess)).unwrap_err();
        assert!(err.kinds().contains(PositionErrorKinds::WRONG_DIMENSIONS));
        assert!(err.kinds().contains(PositionErrorKinds::FOREIGN_PIECE));
    }
}
