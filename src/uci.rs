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

//! Parse and write moves in coordinate notation, as used by the Universal
//! Chess Interface and the Universal Chinese Chess Interface.
//!
//! Square names depend on the board size, so parsing and writing take
//! [`Dimensions`]. On the 10 rank xiangqi board, ranks are read greedily:
//! `a10a9` is a move from the top left corner.
//!
//! # Examples
//!
//! Parsing and converting to a legal move in the context of a position:
//!
//! ```
//! use ruleboard::{uci::Uci, Position, Role, Variant, VariantPosition};
//!
//! let pos = VariantPosition::new(Variant::Xiangqi);
//! let uci = Uci::from_ascii(b"b3e3", pos.board().dimensions())?;
//! let m = uci.to_move(&pos)?;
//! assert_eq!(m.role(), Role::Cannon);
//!
//! let pos = pos.play(m)?;
//! assert_eq!(pos.board().piece_at(uci.to).map(|p| p.role), Some(Role::Cannon));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Converting from a [`Move`]:
//!
//! ```
//! use ruleboard::{uci::Uci, Dimensions, Move, Color, Role, Square};
//!
//! let m = Move {
//!     piece: Role::Pawn.of(Color::White),
//!     from: Square::new(1, 6),
//!     to: Square::new(0, 6),
//!     capture: None,
//!     promotion: Some(Role::Queen),
//! };
//! assert_eq!(Uci::from_move(m).display(Dimensions::CHESS).to_string(), "g7g8q");
//! ```

use std::{error::Error, fmt};

use crate::{
    m::Move,
    position::Position,
    role::Role,
    square::{Dimensions, Square},
    variant::Variant,
};

/// Error when parsing an invalid UCI.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// Error when UCI is illegal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciMoveError;

impl fmt::Display for IllegalUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal uci")
    }
}

impl Error for IllegalUciMoveError {}

/// A move as represented in coordinate notation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    /// Parses coordinate notation like `e7e8q` or `h10h3`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if the input does not name two squares of
    /// the board, optionally followed by a chess promotion letter.
    pub fn from_ascii(uci: &[u8], dims: Dimensions) -> Result<Uci, ParseUciError> {
        let (from, rest) = dims.split_algebraic(uci).ok_or(ParseUciError)?;
        let (to, rest) = dims.split_algebraic(rest).ok_or(ParseUciError)?;
        let promotion = match *rest {
            [] => None,
            [ch] => Some(
                Role::from_char(char::from(ch), Variant::Chess)
                    .filter(|role| !matches!(role, Role::Pawn | Role::King))
                    .ok_or(ParseUciError)?,
            ),
            _ => return Err(ParseUciError),
        };
        Ok(Uci {
            from,
            to,
            promotion,
        })
    }

    /// Converts a move to coordinate notation.
    pub const fn from_move(m: Move) -> Uci {
        Uci {
            from: m.from,
            to: m.to,
            promotion: m.promotion,
        }
    }

    /// Writes the move with square names of the given board.
    ///
    /// A move with a square off that board is written as `0000`.
    pub const fn display(self, dims: Dimensions) -> UciDisplay {
        UciDisplay { uci: self, dims }
    }

    /// Tries to convert the `Uci` to a legal [`Move`] in the context of a
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if the move is not legal, including
    /// when a required promotion is missing.
    pub fn to_move<P: Position + ?Sized>(&self, pos: &P) -> Result<Move, IllegalUciMoveError> {
        let m = pos
            .to_move(self.from, self.to, self.promotion)
            .ok_or(IllegalUciMoveError)?;
        if pos.is_legal(m) {
            Ok(m)
        } else {
            Err(IllegalUciMoveError)
        }
    }
}

impl From<Move> for Uci {
    fn from(m: Move) -> Uci {
        Uci::from_move(m)
    }
}

/// Displays a [`Uci`] for a board of known size. See [`Uci::display()`].
#[derive(Debug, Clone)]
pub struct UciDisplay {
    uci: Uci,
    dims: Dimensions,
}

impl fmt::Display for UciDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.dims.contains(self.uci.from) || !self.dims.contains(self.uci.to) {
            return f.write_str("0000");
        }
        self.dims.write_algebraic(self.uci.from, f)?;
        self.dims.write_algebraic(self.uci.to, f)?;
        if let Some(promotion) = self.uci.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chess::Chess, fen::Fen, xiangqi::Xiangqi};

    #[test]
    fn test_display_on_other_board() {
        let uci = Uci::from_ascii(b"a1a2", Dimensions::XIANGQI).expect("valid uci");
        assert_eq!(uci.display(Dimensions::XIANGQI).to_string(), "a1a2");
        assert_eq!(uci.display(Dimensions::CHESS).to_string(), "0000");

        let uci = Uci::from_ascii(b"a8a7", Dimensions::CHESS).expect("valid uci");
        assert_eq!(uci.display(Dimensions::XIANGQI).to_string(), "a10a9");
    }

    #[test]
    fn test_parse_chess() {
        let dims = Dimensions::CHESS;
        assert_eq!(
            Uci::from_ascii(b"e2e4", dims),
            Ok(Uci {
                from: Square::new(6, 4),
                to: Square::new(4, 4),
                promotion: None,
            })
        );
        assert_eq!(
            Uci::from_ascii(b"a7a8n", dims).map(|uci| uci.promotion),
            Ok(Some(Role::Knight))
        );
        assert_eq!(Uci::from_ascii(b"a7a8k", dims), Err(ParseUciError));
        assert_eq!(Uci::from_ascii(b"e2e9", dims), Err(ParseUciError));
        assert_eq!(Uci::from_ascii(b"e2", dims), Err(ParseUciError));
        assert_eq!(Uci::from_ascii(b"e2e4qq", dims), Err(ParseUciError));
    }

    #[test]
    fn test_parse_xiangqi_greedy_ranks() {
        let dims = Dimensions::XIANGQI;
        let uci = Uci::from_ascii(b"h10h3", dims).expect("valid uci");
        assert_eq!(uci.from, Square::new(0, 7));
        assert_eq!(uci.to, Square::new(7, 7));

        let uci = Uci::from_ascii(b"h3h10", dims).expect("valid uci");
        assert_eq!(uci.from, Square::new(7, 7));
        assert_eq!(uci.to, Square::new(0, 7));
        assert_eq!(uci.display(dims).to_string(), "h3h10");

        assert_eq!(Uci::from_ascii(b"j1j2", dims), Err(ParseUciError));
    }

    #[test]
    fn test_to_move() {
        let pos = Chess::default();
        let dims = Dimensions::CHESS;
        let uci = Uci::from_ascii(b"g1f3", dims).expect("valid uci");
        let m = uci.to_move(&pos).expect("legal");
        assert_eq!(m.role(), Role::Knight);
        assert_eq!(Uci::from(m), uci);

        let uci = Uci::from_ascii(b"e2e5", dims).expect("valid uci");
        assert_eq!(uci.to_move(&pos), Err(IllegalUciMoveError));

        let uci = Uci::from_ascii(b"e3e4", dims).expect("valid uci");
        assert_eq!(uci.to_move(&pos), Err(IllegalUciMoveError));

        let pos = Xiangqi::default();
        let uci = Uci::from_ascii(b"h1g3", Dimensions::XIANGQI).expect("valid uci");
        assert_eq!(uci.to_move(&pos).map(|m| m.role()), Ok(Role::Horse));
    }

    #[test]
    fn test_promotion_required() {
        let pos: Chess = "4k3/P7/8/8/8/8/8/4K3 w - -"
            .parse::<Fen>()
            .expect("valid fen")
            .position()
            .expect("legal position");
        let dims = Dimensions::CHESS;
        assert_eq!(
            Uci::from_ascii(b"a7a8", dims).expect("valid uci").to_move(&pos),
            Err(IllegalUciMoveError)
        );
        let m = Uci::from_ascii(b"a7a8r", dims)
            .expect("valid uci")
            .to_move(&pos)
            .expect("legal promotion");
        assert_eq!(m.promotion, Some(Role::Rook));
        assert_eq!(Uci::from(m).display(dims).to_string(), "a7a8r");
    }
}
