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

//! Supported games and a dynamically dispatched position.

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board,
    chess::Chess,
    color::Color,
    m::Move,
    position::{FromSetup, Outcome, Position, PositionError},
    role::Role,
    setup::Setup,
    square::{Dimensions, Square},
    types::Piece,
    xiangqi::Xiangqi,
};

/// Discriminant of [`VariantPosition`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// See [`Chess`].
    #[default]
    Chess,
    /// See [`Xiangqi`].
    Xiangqi,
}

impl Variant {
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Chess => "chess",
            Variant::Xiangqi => "xiangqi",
        }
    }

    pub fn from_name(s: &str) -> Option<Variant> {
        Some(match s {
            "chess" => Variant::Chess,
            "xiangqi" => Variant::Xiangqi,
            _ => return None,
        })
    }

    pub const fn dimensions(self) -> Dimensions {
        match self {
            Variant::Chess => Dimensions::CHESS,
            Variant::Xiangqi => Dimensions::XIANGQI,
        }
    }

    /// Selects the variant played on a board of the given size.
    pub fn from_dimensions(dims: Dimensions) -> Option<Variant> {
        Variant::ALL.into_iter().find(|v| v.dimensions() == dims)
    }

    /// Piece types used by the variant.
    pub const fn roles(self) -> &'static [Role] {
        match self {
            Variant::Chess => &[
                Role::Pawn,
                Role::Knight,
                Role::Bishop,
                Role::Rook,
                Role::Queen,
                Role::King,
            ],
            Variant::Xiangqi => &[
                Role::King,
                Role::Advisor,
                Role::Elephant,
                Role::Horse,
                Role::Chariot,
                Role::Cannon,
                Role::Soldier,
            ],
        }
    }

    pub fn starting_board(self) -> Board {
        match self {
            Variant::Chess => Board::chess(),
            Variant::Xiangqi => Board::xiangqi(),
        }
    }

    /// Result of a game where `stalemated` has no legal moves but is not in
    /// check. A draw in chess, a loss in xiangqi.
    pub const fn stalemate_outcome(self, stalemated: Color) -> Outcome {
        match self {
            Variant::Chess => Outcome::Draw,
            Variant::Xiangqi => Outcome::Decisive {
                winner: stalemated.other(),
            },
        }
    }

    pub const ALL: [Variant; 2] = [Variant::Chess, Variant::Xiangqi];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when parsing an unknown variant name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseVariantError;

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown variant")
    }
}

impl Error for ParseVariantError {}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Variant, ParseVariantError> {
        Variant::from_name(s).ok_or(ParseVariantError)
    }
}

/// Dynamically dispatched [`Position`] of any supported variant.
#[allow(missing_docs)]
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum VariantPosition {
    Chess(Chess),
    Xiangqi(Xiangqi),
}

impl From<Chess> for VariantPosition {
    fn from(pos: Chess) -> VariantPosition {
        VariantPosition::Chess(pos)
    }
}

impl From<Xiangqi> for VariantPosition {
    fn from(pos: Xiangqi) -> VariantPosition {
        VariantPosition::Xiangqi(pos)
    }
}

impl Default for VariantPosition {
    fn default() -> VariantPosition {
        VariantPosition::new(Variant::default())
    }
}

impl VariantPosition {
    /// The starting position of a variant.
    pub fn new(variant: Variant) -> VariantPosition {
        match variant {
            Variant::Chess => Chess::default().into(),
            Variant::Xiangqi => Xiangqi::default().into(),
        }
    }

    /// Validates a setup as a position of the given variant.
    ///
    /// # Errors
    ///
    /// See [`FromSetup::from_setup()`].
    pub fn from_setup(
        variant: Variant,
        setup: Setup,
    ) -> Result<VariantPosition, PositionError<VariantPosition>> {
        match variant {
            Variant::Chess => Chess::from_setup(setup)
                .map(VariantPosition::Chess)
                .map_err(|err| err.map(VariantPosition::Chess)),
            Variant::Xiangqi => Xiangqi::from_setup(setup)
                .map(VariantPosition::Xiangqi)
                .map_err(|err| err.map(VariantPosition::Xiangqi)),
        }
    }

    fn borrow(&self) -> &dyn Position {
        match *self {
            VariantPosition::Chess(ref pos) => pos,
            VariantPosition::Xiangqi(ref pos) => pos,
        }
    }

    fn borrow_mut(&mut self) -> &mut dyn Position {
        match *self {
            VariantPosition::Chess(ref mut pos) => pos,
            VariantPosition::Xiangqi(ref mut pos) => pos,
        }
    }
}

impl Position for VariantPosition {
    fn variant(&self) -> Variant {
        match self {
            VariantPosition::Chess(_) => Variant::Chess,
            VariantPosition::Xiangqi(_) => Variant::Xiangqi,
        }
    }

    fn board(&self) -> &Board {
        self.borrow().board()
    }

    fn turn(&self) -> Color {
        self.borrow().turn()
    }

    fn ep_square(&self) -> Option<Square> {
        self.borrow().ep_square()
    }

    fn is_valid_move(&self, piece: Piece, from: Square, to: Square) -> bool {
        self.borrow().is_valid_move(piece, from, to)
    }

    fn is_king_in_check(&self, color: Color) -> bool {
        self.borrow().is_king_in_check(color)
    }

    fn promotion_roles(&self, piece: Piece, to: Square) -> &'static [Role] {
        self.borrow().promotion_roles(piece, to)
    }

    fn captured_piece(&self, piece: Piece, from: Square, to: Square) -> Option<Piece> {
        self.borrow().captured_piece(piece, from, to)
    }

    fn is_safe(&self, m: Move) -> bool {
        self.borrow().is_safe(m)
    }

    fn play_unchecked(&mut self, m: Move) {
        self.borrow_mut().play_unchecked(m);
    }
}
