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

//! Piece positions on a rectangular board.

use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{
    color::Color,
    role::Role,
    square::{Dimensions, Square},
    types::Piece,
};

/// Largest supported board, in squares.
pub const MAX_SQUARES: usize = 90;

/// A set of squares, in board scan order and without duplicates.
pub type SquareList = ArrayVec<Square, MAX_SQUARES>;

/// A grid of optional pieces.
///
/// The grid is stored inline, so `clone()` always yields an independent
/// board. Pieces are values and are copied along with it.
///
/// Lookups and updates with squares off the board are not errors: reads
/// return `None` and writes are ignored.
///
/// # Examples
///
/// ```
/// use ruleboard::{Board, Color, Role, Square};
///
/// let board = Board::xiangqi();
/// assert_eq!(board.piece_at(Square::new(9, 4)), Some(Color::RED.king()));
/// assert_eq!(board.piece_at(Square::new(4, 4)), None);
/// assert_eq!(board.piece_at(Square::new(10, 4)), None);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    dims: Dimensions,
    squares: [Option<Piece>; MAX_SQUARES],
}

impl Board {
    /// An empty board of the given size.
    pub const fn empty(dims: Dimensions) -> Board {
        Board {
            dims,
            squares: [None; MAX_SQUARES],
        }
    }

    /// The chess starting position. Black occupies rows 0 and 1.
    pub fn chess() -> Board {
        const BACK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty(Dimensions::CHESS);
        for (col, role) in (0..).zip(BACK) {
            board.set_piece_at(Square::new(0, col), role.of(Color::Black));
            board.set_piece_at(Square::new(1, col), Role::Pawn.of(Color::Black));
            board.set_piece_at(Square::new(6, col), Role::Pawn.of(Color::White));
            board.set_piece_at(Square::new(7, col), role.of(Color::White));
        }
        board
    }

    /// The xiangqi starting position. Black occupies rows 0 to 3, red
    /// rows 6 to 9.
    pub fn xiangqi() -> Board {
        const BACK: [Role; 9] = [
            Role::Chariot,
            Role::Horse,
            Role::Elephant,
            Role::Advisor,
            Role::King,
            Role::Advisor,
            Role::Elephant,
            Role::Horse,
            Role::Chariot,
        ];

        let dims = Dimensions::XIANGQI;
        let mut board = Board::empty(dims);
        for color in Color::ALL {
            let relative = |row: u8| color.fold_wb(dims.rows - 1 - row, row);
            for (col, role) in (0..).zip(BACK) {
                board.set_piece_at(Square::new(relative(0), col), role.of(color));
            }
            for col in [1, 7] {
                board.set_piece_at(Square::new(relative(2), col), Role::Cannon.of(color));
            }
            for col in (0..dims.cols).step_by(2) {
                board.set_piece_at(Square::new(relative(3), col), Role::Soldier.of(color));
            }
        }
        board
    }

    #[inline]
    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Tests if the square lies on this board.
    #[inline]
    pub const fn is_valid(&self, sq: Square) -> bool {
        self.dims.contains(sq)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.dims.index(sq).and_then(|i| self.squares[i])
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Puts a piece on a square, replacing any previous occupant. Does
    /// nothing if the square is off the board.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        if let Some(i) = self.dims.index(sq) {
            self.squares[i] = Some(piece);
        }
    }

    /// Clears a square and returns its previous occupant.
    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.dims.index(sq).and_then(|i| self.squares[i].take())
    }

    /// Iterates over all pieces, row by row from the top.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares[..self.dims.len()]
            .iter()
            .enumerate()
            .filter_map(move |(i, piece)| piece.map(|p| (self.dims.square_at(i), p)))
    }

    /// Iterates over the pieces of one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none()
    }

    /// Finds the king (or general) of the given color. If there is more
    /// than one, the first in scan order is returned.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.color == color && piece.role == Role::King)
            .map(|(sq, _)| sq)
    }

    /// Counts the pieces strictly between two squares on a common row,
    /// column or diagonal.
    ///
    /// Returns `None` if the squares are equal or not aligned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Board, Square};
    ///
    /// let board = Board::xiangqi();
    /// // Between the red chariot and the black chariot on file a.
    /// assert_eq!(board.count_between(Square::new(9, 0), Square::new(0, 0)), Some(2));
    /// assert_eq!(board.count_between(Square::new(9, 0), Square::new(7, 1)), None);
    /// ```
    pub fn count_between(&self, from: Square, to: Square) -> Option<usize> {
        let (drow, dcol) = from.delta(to);
        if (drow, dcol) == (0, 0) || (drow != 0 && dcol != 0 && drow.abs() != dcol.abs()) {
            return None;
        }
        let (step_row, step_col) = (drow.signum(), dcol.signum());
        let steps = drow.abs().max(dcol.abs());
        Some(
            (1..steps)
                .filter_map(|k| from.offset(k * step_row, k * step_col))
                .filter(|sq| self.is_occupied(*sq))
                .count(),
        )
    }

    /// Tests if two aligned squares have nothing between them.
    #[inline]
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        self.count_between(from, to) == Some(0)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            for col in 0..self.dims.cols {
                f.write_char(
                    self.piece_at(Square::new(row, col))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if col + 1 < self.dims.cols { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}
