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

//! Parse and write Forsyth-Edwards-Notation for chess and xiangqi.
//!
//! The variant follows from the number of ranks: 8 for chess, 10 for
//! xiangqi. Xiangqi positions use the letters `KABNRCP`.
//!
//! Piece history is not part of FEN, so flags are derived:
//!
//! * chess pawns off their starting rank are [moved](PieceFlags::MOVED),
//! * chess kings and rooks are moved unless the castling field grants
//!   them a right,
//! * xiangqi soldiers beyond the river have
//!   [crossed it](PieceFlags::CROSSED_RIVER).
//!
//! # Examples
//!
//! ```
//! use ruleboard::{fen::Fen, Position, Status, Variant};
//!
//! let fen: Fen = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w".parse()?;
//! assert_eq!(fen.variant(), Variant::Xiangqi);
//!
//! let pos = fen.into_position()?;
//! assert_eq!(pos.status(), Status::Playing);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use crate::{
    board::Board,
    color::Color,
    position::{FromSetup, Position, PositionError},
    role::Role,
    setup::Setup,
    square::Square,
    types::{Piece, PieceFlags},
    variant::{Variant, VariantPosition},
    xiangqi,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A FEN like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fen {
    variant: Variant,
    setup: Setup,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen::new(Variant::default())
    }
}

impl Fen {
    /// The starting position of a variant.
    pub fn new(variant: Variant) -> Fen {
        Fen {
            variant,
            setup: Setup::new(variant),
        }
    }

    pub fn from_position<P: Position>(pos: &P) -> Fen {
        Fen {
            variant: pos.variant(),
            setup: pos.to_setup(),
        }
    }

    /// Parses a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the input is not syntactically valid.
    /// The position itself is checked only by [`Fen::into_position()`].
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        let (variant, mut board) = parse_board(board_part)?;

        let turn = match parts.next() {
            Some(b"w" | b"r") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        let mut ep_square = None;
        match variant {
            Variant::Chess => {
                derive_chess_flags(&mut board, parts.next().unwrap_or(b"-"))?;
                match parts.next() {
                    Some(b"-") | None => (),
                    Some(ep_part) => {
                        ep_square = Some(
                            board
                                .dimensions()
                                .parse_algebraic_ascii(ep_part)
                                .map_err(|_| ParseFenError::InvalidEpSquare)?,
                        );
                    }
                }
            }
            Variant::Xiangqi => derive_xiangqi_flags(&mut board),
        }

        Ok(Fen {
            variant,
            setup: Setup {
                board,
                turn,
                ep_square,
            },
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn as_setup(&self) -> &Setup {
        &self.setup
    }

    pub fn into_setup(self) -> Setup {
        self.setup
    }

    /// Validates the FEN as a position of its variant.
    ///
    /// # Errors
    ///
    /// See [`FromSetup::from_setup()`].
    pub fn into_position(self) -> Result<VariantPosition, PositionError<VariantPosition>> {
        VariantPosition::from_setup(self.variant, self.setup)
    }

    /// Validates the FEN as a specific position type.
    ///
    /// # Errors
    ///
    /// See [`FromSetup::from_setup()`].
    pub fn position<P: FromSetup>(self) -> Result<P, PositionError<P>> {
        P::from_setup(self.setup)
    }
}

fn parse_board(board_part: &[u8]) -> Result<(Variant, Board), ParseFenError> {
    let ranks = board_part.split(|ch| *ch == b'/').count();
    let variant = Variant::ALL
        .into_iter()
        .find(|v| usize::from(v.dimensions().rows) == ranks)
        .ok_or(ParseFenError::InvalidBoard)?;
    let dims = variant.dimensions();
    let mut board = Board::empty(dims);

    for (row, rank) in (0..).zip(board_part.split(|ch| *ch == b'/')) {
        let mut col = 0u8;
        for &ch in rank {
            if ch.is_ascii_digit() && ch != b'0' {
                col += ch - b'0';
            } else {
                let piece = Piece::from_char(char::from(ch), variant)
                    .ok_or(ParseFenError::InvalidBoard)?;
                if col >= dims.cols {
                    return Err(ParseFenError::InvalidBoard);
                }
                board.set_piece_at(Square::new(row, col), piece);
                col += 1;
            }
            if col > dims.cols {
                return Err(ParseFenError::InvalidBoard);
            }
        }
        if col != dims.cols {
            return Err(ParseFenError::InvalidBoard);
        }
    }

    Ok((variant, board))
}

/// Home squares of the king and the rooks of `color`, as
/// `(king, queen side rook, king side rook)`.
fn castling_squares(board: &Board, color: Color) -> (Square, Square, Square) {
    let dims = board.dimensions();
    let row = color.fold_wb(dims.rows - 1, 0);
    (
        Square::new(row, 4),
        Square::new(row, 0),
        Square::new(row, dims.cols - 1),
    )
}

fn derive_chess_flags(board: &mut Board, castling_part: &[u8]) -> Result<(), ParseFenError> {
    let dims = board.dimensions();
    let pieces: Vec<(Square, Piece)> = board.pieces().collect();
    for (sq, piece) in pieces {
        let moved = match piece.role {
            Role::Pawn => sq.row != piece.color.fold_wb(dims.rows - 2, 1),
            Role::King | Role::Rook => true,
            _ => false,
        };
        if moved {
            board.set_piece_at(sq, piece.with_flags(PieceFlags::MOVED));
        }
    }

    if castling_part == b"-" {
        return Ok(());
    }
    for &ch in castling_part {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let (king_sq, queen_side, king_side) = castling_squares(board, color);
        let rook_sq = match ch.to_ascii_lowercase() {
            b'k' => king_side,
            b'q' => queen_side,
            _ => return Err(ParseFenError::InvalidCastling),
        };
        let king = board
            .piece_at(king_sq)
            .filter(|p| p.is_same_kind(color.king()))
            .ok_or(ParseFenError::InvalidCastling)?;
        let rook = board
            .piece_at(rook_sq)
            .filter(|p| p.is_same_kind(Role::Rook.of(color)))
            .ok_or(ParseFenError::InvalidCastling)?;
        board.set_piece_at(king_sq, king.without_flags(PieceFlags::MOVED));
        board.set_piece_at(rook_sq, rook.without_flags(PieceFlags::MOVED));
    }
    Ok(())
}

fn derive_xiangqi_flags(board: &mut Board) {
    let pieces: Vec<(Square, Piece)> = board.pieces().collect();
    for (sq, piece) in pieces {
        if piece.role == Role::Soldier && xiangqi::has_crossed_river(sq, piece.color) {
            board.set_piece_at(
                sq,
                piece.with_flags(PieceFlags::MOVED | PieceFlags::CROSSED_RIVER),
            );
        }
    }
}

fn write_board_fen(board: &Board, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let dims = board.dimensions();
    for row in 0..dims.rows {
        let mut empty = 0;
        for col in 0..dims.cols {
            match board.piece_at(Square::new(row, col)) {
                Some(piece) => {
                    if empty > 0 {
                        write!(f, "{empty}")?;
                        empty = 0;
                    }
                    f.write_char(piece.char())?;
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            write!(f, "{empty}")?;
        }
        if row + 1 < dims.rows {
            f.write_char('/')?;
        }
    }
    Ok(())
}

fn write_castling(board: &Board, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut any = false;
    for color in Color::ALL {
        let (king_sq, queen_side, king_side) = castling_squares(board, color);
        let unmoved = |sq: Square, piece: Piece| {
            board
                .piece_at(sq)
                .is_some_and(|p| p.is_same_kind(piece) && !p.has_moved())
        };
        if !unmoved(king_sq, color.king()) {
            continue;
        }
        for (rook_sq, ch) in [(king_side, 'k'), (queen_side, 'q')] {
            if unmoved(rook_sq, Role::Rook.of(color)) {
                f.write_char(color.fold_wb(ch.to_ascii_uppercase(), ch))?;
                any = true;
            }
        }
    }
    if !any {
        f.write_char('-')?;
    }
    Ok(())
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = &self.setup.board;
        write_board_fen(board, f)?;
        write!(f, " {}", self.setup.turn.char())?;
        if self.variant == Variant::Chess {
            f.write_char(' ')?;
            write_castling(board, f)?;
            match self.setup.ep_square.and_then(|sq| board.dimensions().algebraic(sq)) {
                Some(ep) => write!(f, " {ep}")?,
                None => f.write_str(" -")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}
