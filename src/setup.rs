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

use crate::{
    board::Board,
    color::Color,
    square::{Dimensions, Square},
    variant::Variant,
};

/// A not necessarily legal position.
///
/// Castling rights are not stored separately. They follow from the
/// [`PieceFlags::MOVED`](crate::PieceFlags::MOVED) flags of kings and
/// rooks on the board.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Piece positions on the board.
    pub board: Board,

    /// Side to move.
    pub turn: Color,

    /// En passant target square. Only meaningful in chess, where valid
    /// target squares are on the third or sixth rank.
    ///
    /// ```
    /// use ruleboard::{Setup, Variant};
    ///
    /// assert_eq!(Setup::new(Variant::Chess).ep_square, None);
    /// ```
    pub ep_square: Option<Square>,
}

impl Setup {
    /// The starting position of a variant, white (red) to move.
    pub fn new(variant: Variant) -> Setup {
        Setup {
            board: variant.starting_board(),
            turn: Color::White,
            ep_square: None,
        }
    }

    pub fn empty(dims: Dimensions) -> Setup {
        Setup {
            board: Board::empty(dims),
            turn: Color::White,
            ep_square: None,
        }
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup::new(Variant::Chess)
    }
}
