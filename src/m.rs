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

use std::fmt::{self, Display};

use arrayvec::ArrayVec;

use crate::{role::Role, square::Square, types::Piece};

/// Information about a move.
///
/// `piece` is the moving piece as it stood on `from`, before any flag
/// updates. `capture` is the piece that was removed from the board, which
/// for en passant does not stand on `to`.
///
/// Castling is encoded as a two-column king move. The rook follows
/// implicitly.
///
/// # Display
///
/// `Move` implements [`Display`] using piece names and raw coordinates.
/// With board dimensions at hand, [`Uci`](crate::uci::Uci) is usually more
/// useful.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub capture: Option<Piece>,
    pub promotion: Option<Role>,
}

impl Move {
    /// Gets the role of the moved piece.
    #[inline]
    pub const fn role(self) -> Role {
        self.piece.role
    }

    /// Checks if the move is a capture.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.capture.is_some()
    }

    /// Checks if the move is a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Checks if the move is a castling move, i.e. a king moving two
    /// columns.
    pub fn is_castle(self) -> bool {
        let (drow, dcol) = self.from.delta(self.to);
        self.piece.role == Role::King && drow == 0 && dcol.abs() == 2
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.piece.role, self.from)?;
        f.write_str(if self.is_capture() { "x " } else { "-> " })?;
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, " = {promotion}")?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity covers any position with at most 16 pieces per side, which
/// [`FromSetup`](crate::FromSetup) enforces.
pub type MoveList = ArrayVec<Move, 512>;
