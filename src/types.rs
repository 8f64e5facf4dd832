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

use std::fmt;

use bitflags::bitflags;

use crate::{color::Color, role::Role, variant::Variant};

bitflags! {
    /// Per-piece history that movement rules depend on.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
    #[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PieceFlags: u8 {
        /// The piece has left its starting square at least once. Disables
        /// double pawn steps and castling in chess.
        const MOVED = 1;
        /// A xiangqi soldier has crossed the river and may step sideways.
        const CROSSED_RIVER = 2;
    }
}

/// A piece with [`Color`], [`Role`] and [`PieceFlags`].
///
/// Pieces are plain values. Updating a flag produces a new piece, so copies
/// held by other boards are never affected.
///
/// # Examples
///
/// ```
/// use ruleboard::{Color, PieceFlags, Role};
///
/// let rook = Role::Rook.of(Color::White);
/// let moved = rook.with_flags(PieceFlags::MOVED);
///
/// assert!(!rook.has_moved());
/// assert!(moved.has_moved());
/// assert!(rook.is_same_kind(moved));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub flags: PieceFlags,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, role: Role) -> Piece {
        Piece {
            color,
            role,
            flags: PieceFlags::empty(),
        }
    }

    /// Returns a copy with the given flags added.
    #[must_use]
    #[inline]
    pub const fn with_flags(self, flags: PieceFlags) -> Piece {
        Piece {
            flags: self.flags.union(flags),
            ..self
        }
    }

    #[must_use]
    #[inline]
    pub const fn without_flags(self, flags: PieceFlags) -> Piece {
        Piece {
            flags: self.flags.difference(flags),
            ..self
        }
    }

    #[inline]
    pub const fn has_moved(self) -> bool {
        self.flags.contains(PieceFlags::MOVED)
    }

    #[inline]
    pub const fn has_crossed_river(self) -> bool {
        self.flags.contains(PieceFlags::CROSSED_RIVER)
    }

    /// Same color and role, ignoring flags.
    #[inline]
    pub fn is_same_kind(self, other: Piece) -> bool {
        self.color == other.color && self.role == other.role
    }

    /// FEN letter: uppercase for white (red), lowercase for black.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    pub fn from_char(ch: char, variant: Variant) -> Option<Piece> {
        Role::from_char(ch, variant).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.role)
    }
}
