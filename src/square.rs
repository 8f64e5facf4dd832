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

use std::{error::Error, fmt, hash::Hash, hash::Hasher};

use crate::board::MAX_SQUARES;

/// Error when parsing a malformed square name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidNotation {
    /// Square names are a file letter followed by one or two digits.
    Length,
    /// The file letter is not on the board.
    File,
    /// The rank is not a number on the board.
    Rank,
}

impl fmt::Display for InvalidNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            InvalidNotation::Length => "invalid square name: bad length",
            InvalidNotation::File => "invalid square name: unknown file",
            InvalidNotation::Rank => "invalid square name: rank out of range",
        })
    }
}

impl Error for InvalidNotation {}

/// A board coordinate. Row 0 is the top edge (black's side), column 0 is
/// file `a`.
///
/// A square may lie outside any particular board. Board lookups treat such
/// squares as empty rather than failing.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    /// Offsets by the given deltas, or `None` when a coordinate would
    /// become negative. The result is not checked against any board.
    #[inline]
    pub fn offset(self, drow: i32, dcol: i32) -> Option<Square> {
        let row = u8::try_from(i32::from(self.row) + drow).ok()?;
        let col = u8::try_from(i32::from(self.col) + dcol).ok()?;
        Some(Square { row, col })
    }

    /// Signed `(row, col)` distance from `self` to `other`.
    #[inline]
    pub fn delta(self, other: Square) -> (i32, i32) {
        (
            i32::from(other.row) - i32::from(self.row),
            i32::from(other.col) - i32::from(self.col),
        )
    }
}

impl Hash for Square {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u16(u16::from(self.row) << 8 | u16::from(self.col));
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board size in rows and columns.
///
/// Also fixes the algebraic names of squares: files are letters starting
/// at `a`, ranks count from the bottom row, which is rank 1.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Dimensions {
    pub rows: u8,
    pub cols: u8,
}

impl Dimensions {
    /// 8 × 8.
    pub const CHESS: Dimensions = Dimensions::new(8, 8);

    /// 10 rows × 9 columns.
    pub const XIANGQI: Dimensions = Dimensions::new(10, 9);

    /// # Panics
    ///
    /// Panics if the board would have more than [`MAX_SQUARES`] squares,
    /// more than 26 files or more than 99 ranks.
    pub const fn new(rows: u8, cols: u8) -> Dimensions {
        assert!(rows > 0 && cols > 0);
        assert!(cols <= 26 && rows <= 99);
        assert!(rows as usize * cols as usize <= MAX_SQUARES);
        Dimensions { rows, cols }
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Tests if the square is on the board.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        sq.row < self.rows && sq.col < self.cols
    }

    /// Row-major index of a square on the board.
    #[inline]
    pub const fn index(self, sq: Square) -> Option<usize> {
        if self.contains(sq) {
            Some(sq.row as usize * self.cols as usize + sq.col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub const fn square_at(self, index: usize) -> Square {
        Square::new(
            (index / self.cols as usize) as u8,
            (index % self.cols as usize) as u8,
        )
    }

    /// All squares, row by row from the top.
    pub fn squares(self) -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator + Clone {
        (0..self.len()).map(move |i| self.square_at(i))
    }

    /// Offsets a square, staying on the board.
    #[inline]
    pub fn offset(self, sq: Square, drow: i32, dcol: i32) -> Option<Square> {
        sq.offset(drow, dcol).filter(|s| self.contains(*s))
    }

    /// Gets the algebraic name of a square, like `e4` or `a10`.
    ///
    /// Returns `None` for squares off the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Dimensions, Square};
    ///
    /// assert_eq!(Dimensions::CHESS.algebraic(Square::new(6, 4)).as_deref(), Some("e2"));
    /// assert_eq!(Dimensions::XIANGQI.algebraic(Square::new(0, 0)).as_deref(), Some("a10"));
    /// assert_eq!(Dimensions::CHESS.algebraic(Square::new(8, 0)), None);
    /// ```
    pub fn algebraic(self, sq: Square) -> Option<String> {
        self.contains(sq).then(|| {
            let mut s = String::with_capacity(3);
            self.write_algebraic(sq, &mut s)
                .expect("writing to string never fails");
            s
        })
    }

    pub(crate) fn write_algebraic<W: fmt::Write>(self, sq: Square, f: &mut W) -> fmt::Result {
        if !self.contains(sq) {
            return Err(fmt::Error);
        }
        write!(f, "{}{}", char::from(b'a' + sq.col), self.rows - sq.row)
    }

    /// Parses an algebraic square name.
    ///
    /// The rank is read greedily, so on a board with ten ranks `a1` and
    /// `a10` are different squares.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNotation`] for anything that does not name a square
    /// of this board.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Dimensions, InvalidNotation, Square};
    ///
    /// let board = Dimensions::XIANGQI;
    /// assert_eq!(board.parse_algebraic("a1"), Ok(Square::new(9, 0)));
    /// assert_eq!(board.parse_algebraic("a10"), Ok(Square::new(0, 0)));
    /// assert_eq!(board.parse_algebraic("j1"), Err(InvalidNotation::File));
    /// assert_eq!(board.parse_algebraic("a11"), Err(InvalidNotation::Rank));
    /// ```
    pub fn parse_algebraic(self, s: &str) -> Result<Square, InvalidNotation> {
        self.parse_algebraic_ascii(s.as_bytes())
    }

    pub fn parse_algebraic_ascii(self, s: &[u8]) -> Result<Square, InvalidNotation> {
        let (&file, rank) = s.split_first().ok_or(InvalidNotation::Length)?;
        if rank.is_empty() || rank.len() > 2 {
            return Err(InvalidNotation::Length);
        }
        if !file.is_ascii_lowercase() || file - b'a' >= self.cols {
            return Err(InvalidNotation::File);
        }
        if rank[0] == b'0' {
            return Err(InvalidNotation::Rank);
        }
        let rank: u8 = btoi::btou(rank).map_err(|_| InvalidNotation::Rank)?;
        if rank == 0 || rank > self.rows {
            return Err(InvalidNotation::Rank);
        }
        Ok(Square::new(self.rows - rank, file - b'a'))
    }

    /// Splits the longest square name off the front of `s`: a file letter
    /// followed by as many digits as the board has rank digits.
    pub(crate) fn split_algebraic(self, s: &[u8]) -> Option<(Square, &[u8])> {
        let max_digits = if self.rows >= 10 { 2 } else { 1 };
        let digits = s
            .iter()
            .skip(1)
            .take(max_digits)
            .take_while(|b| b.is_ascii_digit())
            .count();
        (1..=digits).rev().find_map(|n| {
            self.parse_algebraic_ascii(&s[..1 + n])
                .ok()
                .map(|sq| (sq, &s[1 + n..]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_off_board() {
        let mut s = String::new();
        assert!(Dimensions::CHESS
            .write_algebraic(Square::new(9, 0), &mut s)
            .is_err());
        assert!(s.is_empty());
        assert_eq!(Dimensions::XIANGQI.algebraic(Square::new(9, 0)).as_deref(), Some("a1"));
    }

    #[test]
    fn test_algebraic_bijection() {
        for dims in [Dimensions::CHESS, Dimensions::XIANGQI] {
            for sq in dims.squares() {
                let name = dims.algebraic(sq).expect("on board");
                assert_eq!(dims.parse_algebraic(&name), Ok(sq), "{name}");
            }
        }
    }

    #[test]
    fn test_chess_names() {
        let dims = Dimensions::CHESS;
        assert_eq!(dims.parse_algebraic("a8"), Ok(Square::new(0, 0)));
        assert_eq!(dims.parse_algebraic("h1"), Ok(Square::new(7, 7)));
        assert_eq!(dims.parse_algebraic("i1"), Err(InvalidNotation::File));
        assert_eq!(dims.parse_algebraic("a9"), Err(InvalidNotation::Rank));
        assert_eq!(dims.parse_algebraic("a0"), Err(InvalidNotation::Rank));
        assert_eq!(dims.parse_algebraic("e"), Err(InvalidNotation::Length));
        assert_eq!(dims.parse_algebraic(""), Err(InvalidNotation::Length));
        assert_eq!(dims.parse_algebraic("e123"), Err(InvalidNotation::Length));
        assert_eq!(dims.parse_algebraic("E4"), Err(InvalidNotation::File));
    }

    #[test]
    fn test_leading_zero_is_rejected() {
        assert_eq!(
            Dimensions::XIANGQI.parse_algebraic("a01"),
            Err(InvalidNotation::Rank)
        );
    }

    #[test]
    fn test_split_is_greedy() {
        let dims = Dimensions::XIANGQI;
        assert_eq!(
            dims.split_algebraic(b"a10a9"),
            Some((Square::new(0, 0), &b"a9"[..]))
        );
        assert_eq!(
            dims.split_algebraic(b"a1b1"),
            Some((Square::new(9, 0), &b"b1"[..]))
        );
        assert_eq!(
            Dimensions::CHESS.split_algebraic(b"e2e4"),
            Some((Square::new(6, 4), &b"e4"[..]))
        );
    }

    #[test]
    fn test_offset() {
        let dims = Dimensions::XIANGQI;
        assert_eq!(dims.offset(Square::new(0, 0), -1, 0), None);
        assert_eq!(dims.offset(Square::new(9, 8), 0, 1), None);
        assert_eq!(dims.offset(Square::new(5, 4), 2, -1), Some(Square::new(7, 3)));
    }
}
