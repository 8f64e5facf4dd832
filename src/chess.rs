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

//! Orthodox chess movement rules.
//!
//! Black starts on rows 0 and 1, white on rows 6 and 7. Castling rights
//! are derived from [`PieceFlags::MOVED`] on kings and rooks.
//!
//! Functions in this module take a bare [`Board`]. En passant needs to
//! know the previous move and is only available through [`Chess`].

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

/// Roles a pawn may promote to.
pub const PROMOTION_ROLES: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

/// Row where the pieces of `color` start.
fn back_row(dims: Dimensions, color: Color) -> u8 {
    color.fold_wb(dims.rows.saturating_sub(1), 0)
}

/// Row where the pawns of `color` start.
fn pawn_row(dims: Dimensions, color: Color) -> u8 {
    color.fold_wb(dims.rows.saturating_sub(2), 1)
}

/// Single step straight ahead onto an empty square, two steps from the
/// starting row if both squares are empty and the pawn has not moved, or
/// one step diagonally forward to capture.
pub fn is_valid_pawn_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    let forward = piece.color.forward();
    if dcol == 0 {
        if board.is_occupied(to) {
            false
        } else if drow == forward {
            true
        } else {
            drow == 2 * forward
                && !piece.has_moved()
                && from.row == pawn_row(board.dimensions(), piece.color)
                && from
                    .offset(forward, 0)
                    .is_some_and(|mid| !board.is_occupied(mid))
        }
    } else {
        drow == forward
            && dcol.abs() == 1
            && board
                .color_at(to)
                .is_some_and(|color| color != piece.color)
    }
}

pub fn is_valid_knight_move(_board: &Board, _piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    matches!((drow.abs(), dcol.abs()), (1, 2) | (2, 1))
}

pub fn is_valid_bishop_move(board: &Board, _piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow != 0 && drow.abs() == dcol.abs() && board.is_path_clear(from, to)
}

pub fn is_valid_rook_move(board: &Board, _piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    (drow == 0) != (dcol == 0) && board.is_path_clear(from, to)
}

pub fn is_valid_queen_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    is_valid_rook_move(board, piece, from, to) || is_valid_bishop_move(board, piece, from, to)
}

/// One step in any direction, or castling.
pub fn is_valid_king_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (drow, dcol) = from.delta(to);
    drow.abs().max(dcol.abs()) == 1 || is_valid_castle(board, piece, from, to)
}

/// Finds the rook that castles with a king moving from `from` to `to`.
/// Both must be unmoved and the squares between them empty.
fn castling_rook(board: &Board, piece: Piece, from: Square, to: Square) -> Option<Square> {
    let dims = board.dimensions();
    let (drow, dcol) = from.delta(to);
    if drow != 0 || dcol.abs() != 2 || piece.has_moved() || from.row != back_row(dims, piece.color) {
        return None;
    }
    let rook_sq = Square::new(from.row, if dcol > 0 { dims.cols - 1 } else { 0 });
    let rook = board.piece_at(rook_sq)?;
    (rook.is_same_kind(Role::Rook.of(piece.color))
        && !rook.has_moved()
        && board.is_path_clear(from, rook_sq))
    .then_some(rook_sq)
}

/// The king may not castle out of, through or into check.
fn is_valid_castle(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let them = piece.color.other();
    castling_rook(board, piece, from, to).is_some()
        && from
            .offset(0, from.delta(to).1.signum())
            .is_some_and(|transit| !is_attacked(board, transit, them))
        && !is_attacked(board, from, them)
        && !is_attacked(board, to, them)
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
        Role::Pawn => is_valid_pawn_move(board, piece, from, to),
        Role::Knight => is_valid_knight_move(board, piece, from, to),
        Role::Bishop => is_valid_bishop_move(board, piece, from, to),
        Role::Rook => is_valid_rook_move(board, piece, from, to),
        Role::Queen => is_valid_queen_move(board, piece, from, to),
        Role::King => is_valid_king_move(board, piece, from, to),
        Role::Advisor
        | Role::Elephant
        | Role::Horse
        | Role::Chariot
        | Role::Cannon
        | Role::Soldier => false,
    }
}

/// All destinations of the piece on `from`, in row-major order. En passant
/// captures are not included.
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

/// Tests if `piece` on `from` attacks `to`, regardless of what stands on
/// `to`. Pawns attack diagonally forward only, kings do not castle.
pub fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let (drow, dcol) = from.delta(to);
    match piece.role {
        Role::Pawn => drow == piece.color.forward() && dcol.abs() == 1,
        Role::King => drow.abs().max(dcol.abs()) == 1,
        Role::Knight => is_valid_knight_move(board, piece, from, to),
        Role::Bishop => is_valid_bishop_move(board, piece, from, to),
        Role::Rook => is_valid_rook_move(board, piece, from, to),
        Role::Queen => is_valid_queen_move(board, piece, from, to),
        _ => false,
    }
}

/// Tests if any piece of color `by` attacks `sq`.
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| attacks(board, piece, from, sq))
}

/// Tests if the king of `color` is attacked. Returns `false` if there is no
/// king of that color.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_attacked(board, king, color.other()))
}

/// A standard chess position.
///
/// # Examples
///
/// ```
/// use ruleboard::{Chess, Position, Square};
///
/// let pos = Chess::default();
/// assert_eq!(pos.legal_moves().len(), 20);
/// assert_eq!(pos.legal_destinations(Square::new(7, 1)).len(), 2);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Chess {
    board: Board,
    turn: Color,
    ep_square: Option<Square>,
}

impl Default for Chess {
    fn default() -> Chess {
        Chess {
            board: Board::chess(),
            turn: Color::White,
            ep_square: None,
        }
    }
}

impl Chess {
    /// Tests if a move of `piece` from `from` to `to` is an en passant
    /// capture of the pawn that just made a double step.
    fn is_en_passant(&self, piece: Piece, from: Square, to: Square) -> bool {
        let (drow, dcol) = from.delta(to);
        piece.role == Role::Pawn
            && piece.color == self.turn
            && self.ep_square == Some(to)
            && self.board.is_valid(from)
            && drow == piece.color.forward()
            && dcol.abs() == 1
            && !self.board.is_occupied(to)
            && self
                .board
                .piece_at(Square::new(from.row, to.col))
                .is_some_and(|pawn| pawn.is_same_kind(Role::Pawn.of(piece.color.other())))
    }

    /// The en passant square must be directly behind a pawn of the side
    /// not to move, which could just have made a double step.
    fn validate_ep_square(&self, ep_square: Square) -> bool {
        let dims = self.board.dimensions();
        let them = self.turn.other();
        let forward = them.forward();
        let origin = Square::new(pawn_row(dims, them), ep_square.col);
        dims.offset(origin, forward, 0) == Some(ep_square)
            && !self.board.is_occupied(origin)
            && !self.board.is_occupied(ep_square)
            && dims
                .offset(ep_square, forward, 0)
                .and_then(|sq| self.board.piece_at(sq))
                .is_some_and(|pawn| pawn.is_same_kind(Role::Pawn.of(them)))
    }
}

impl FromSetup for Chess {
    fn from_setup(setup: Setup) -> Result<Chess, PositionError<Chess>> {
        let mut errors = PositionErrorKinds::empty();
        let mut pos = Chess {
            board: setup.board,
            turn: setup.turn,
            ep_square: None,
        };
        let dims = pos.board.dimensions();

        if dims != Dimensions::CHESS {
            errors |= PositionErrorKinds::WRONG_DIMENSIONS;
        }
        if pos.board.is_empty() {
            errors |= PositionErrorKinds::EMPTY_BOARD;
        }

        let mut kings = ByColor::<usize>::default();
        let mut material = ByColor::<usize>::default();
        for (sq, piece) in pos.board.pieces() {
            *material.get_mut(piece.color) += 1;
            if !Variant::Chess.roles().contains(&piece.role) {
                errors |= PositionErrorKinds::FOREIGN_PIECE;
            }
            if piece.role == Role::King {
                *kings.get_mut(piece.color) += 1;
            }
            if piece.role == Role::Pawn && (sq.row == 0 || sq.row + 1 == dims.rows) {
                errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
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

        if let Some(ep_square) = setup.ep_square {
            if pos.validate_ep_square(ep_square) {
                pos.ep_square = Some(ep_square);
            } else {
                errors |= PositionErrorKinds::INVALID_EP_SQUARE;
            }
        }

        if is_king_in_check(&pos.board, pos.turn.other()) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        PositionError::new(errors, pos)
    }
}

impl Position for Chess {
    fn variant(&self) -> Variant {
        Variant::Chess
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn turn(&self) -> Color {
        self.turn
    }

    fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    fn is_valid_move(&self, piece: Piece, from: Square, to: Square) -> bool {
        is_valid_move(&self.board, piece, from, to) || self.is_en_passant(piece, from, to)
    }

    fn is_king_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    fn promotion_roles(&self, piece: Piece, to: Square) -> &'static [Role] {
        if piece.role == Role::Pawn && to.row == back_row(self.board.dimensions(), piece.color.other()) {
            &PROMOTION_ROLES
        } else {
            &[]
        }
    }

    fn captured_piece(&self, piece: Piece, from: Square, to: Square) -> Option<Piece> {
        if self.is_en_passant(piece, from, to) {
            self.board.piece_at(Square::new(from.row, to.col))
        } else {
            self.board.piece_at(to)
        }
    }

    fn is_safe(&self, m: Move) -> bool {
        let mut after = self.clone();
        after.play_unchecked(m);
        !after.is_king_in_check(m.piece.color)
    }

    fn play_unchecked(&mut self, m: Move) {
        let dims = self.board.dimensions();
        let (drow, dcol) = m.from.delta(m.to);

        self.board.remove_piece_at(m.from);

        if m.piece.role == Role::Pawn && dcol != 0 && !self.board.is_occupied(m.to) {
            self.board.remove_piece_at(Square::new(m.from.row, m.to.col));
        }

        if m.is_castle() {
            let rook_from = Square::new(m.from.row, if dcol > 0 { dims.cols - 1 } else { 0 });
            let rook_to = Square::new(m.from.row, m.to.col.min(m.from.col) + 1);
            if let Some(rook) = self.board.remove_piece_at(rook_from) {
                self.board
                    .set_piece_at(rook_to, rook.with_flags(PieceFlags::MOVED));
            }
        }

        let piece = Piece {
            role: m.promotion.unwrap_or(m.piece.role),
            ..m.piece
        };
        self.board
            .set_piece_at(m.to, piece.with_flags(PieceFlags::MOVED));

        self.ep_square = (m.piece.role == Role::Pawn
            && drow.abs() == 2
            && [-1, 1].into_iter().any(|side| {
                dims.offset(m.to, 0, side)
                    .and_then(|sq| self.board.piece_at(sq))
                    .is_some_and(|p| p.is_same_kind(Role::Pawn.of(m.piece.color.other())))
            }))
        .then(|| Square::new(m.from.row.min(m.to.row) + 1, m.from.col));
        self.turn = self.turn.other();
    }
}
