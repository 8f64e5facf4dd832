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

use crate::{color::Color, types::Piece, variant::Variant};

/// Piece types of all supported variants.
///
/// Chess uses `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen` and `King`.
/// Xiangqi uses `King` (the general), `Advisor`, `Elephant`, `Horse`,
/// `Chariot`, `Cannon` and `Soldier`.
///
/// # Examples
///
/// ```
/// use ruleboard::{Role, Variant};
///
/// assert!(Variant::Xiangqi.roles().contains(&Role::Cannon));
/// assert!(!Variant::Chess.roles().contains(&Role::Cannon));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
    Advisor = 7,
    Elephant = 8,
    Horse = 9,
    Chariot = 10,
    Cannon = 11,
    Soldier = 12,
}

impl Role {
    /// Gets the piece type from its FEN letter in the given variant.
    ///
    /// Letters are shared between variants (`n` is a knight in chess and a
    /// horse in xiangqi), so the variant decides.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Role, Variant};
    ///
    /// assert_eq!(Role::from_char('N', Variant::Chess), Some(Role::Knight));
    /// assert_eq!(Role::from_char('n', Variant::Xiangqi), Some(Role::Horse));
    /// assert_eq!(Role::from_char('q', Variant::Xiangqi), None);
    /// ```
    pub fn from_char(ch: char, variant: Variant) -> Option<Role> {
        let lower = ch.to_ascii_lowercase();
        variant
            .roles()
            .iter()
            .copied()
            .find(|role| role.char() == lower)
    }

    /// Gets a [`Piece`] of the given color, with no flags set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Color, Role};
    ///
    /// assert_eq!(Role::King.of(Color::Black), Color::Black.king());
    /// ```
    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece::new(color, self)
    }

    /// Gets the lowercase FEN letter for the piece type.
    pub const fn char(self) -> char {
        match self {
            Role::Pawn | Role::Soldier => 'p',
            Role::Knight | Role::Horse => 'n',
            Role::Bishop | Role::Elephant => 'b',
            Role::Rook | Role::Chariot => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
            Role::Advisor => 'a',
            Role::Cannon => 'c',
        }
    }

    /// Gets the uppercase FEN letter for the piece type.
    pub const fn upper_char(self) -> char {
        self.char().to_ascii_uppercase()
    }

    /// Moves along lines and may be blocked by intermediate pieces.
    pub const fn is_slider(self) -> bool {
        matches!(
            self,
            Role::Bishop | Role::Rook | Role::Queen | Role::Chariot | Role::Cannon
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Role::Pawn => "pawn",
            Role::Knight => "knight",
            Role::Bishop => "bishop",
            Role::Rook => "rook",
            Role::Queen => "queen",
            Role::King => "king",
            Role::Advisor => "advisor",
            Role::Elephant => "elephant",
            Role::Horse => "horse",
            Role::Chariot => "chariot",
            Role::Cannon => "cannon",
            Role::Soldier => "soldier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> Self {
                role as Self
            }
        })+
    }
}

int_from_role_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_are_unique_per_variant() {
        for variant in Variant::ALL {
            for role in variant.roles() {
                assert_eq!(Role::from_char(role.upper_char(), variant), Some(*role));
            }
        }
    }

    #[test]
    fn test_role_order() {
        assert!(Role::Pawn < Role::King);
        assert!(Role::King < Role::Advisor);
        assert_eq!(u8::from(Role::Soldier), 12);
    }
}
