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

//! Move legality, check detection and game sessions for chess and
//! xiangqi.
//!
//! Squares are `(row, col)` pairs with row 0 at the top of the board, on
//! black's side. White (red in xiangqi) starts at the bottom and moves
//! first.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use ruleboard::{Chess, Position, Xiangqi};
//!
//! assert_eq!(Chess::default().legal_moves().len(), 20);
//! assert_eq!(Xiangqi::default().legal_moves().len(), 44);
//! ```
//!
//! Ask what a piece can do:
//!
//! ```
//! use ruleboard::{Position, Square, Xiangqi};
//!
//! let pos = Xiangqi::default();
//! let cannon = Square::new(7, 1);
//! assert_eq!(pos.possible_moves(cannon).len(), 12);
//! ```
//!
//! Play moves:
//!
//! ```
//! use ruleboard::{Chess, Dimensions, Position};
//!
//! let pos = Chess::default();
//! let e2 = Dimensions::CHESS.parse_algebraic("e2")?;
//! let e4 = Dimensions::CHESS.parse_algebraic("e4")?;
//! let m = pos.to_move(e2, e4, None).expect("pawn on e2");
//! let pos = pos.play(m)?;
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use ruleboard::{Chess, Position, Status};
//! # let pos = Chess::default();
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert_eq!(pos.status(), Status::Playing);
//! assert_eq!(pos.outcome(), None); // no winner yet
//! ```
//!
//! Also supports [FEN](fen) for positions and [coordinate notation](uci)
//! for moves. A [`Game`](game::Game) ties everything together for
//! interactive play.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types, for fuzzing.

#![doc(html_root_url = "https://docs.rs/ruleboard/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod color;
mod m;
mod position;
mod role;
mod setup;
mod square;
mod types;

pub mod board;
pub mod chess;
pub mod fen;
pub mod game;
pub mod perft;
pub mod uci;
pub mod variant;
pub mod xiangqi;

pub use board::{Board, SquareList};
pub use chess::Chess;
pub use color::{ByColor, Color, ParseColorError};
pub use m::{Move, MoveList};
pub use position::{
    FromSetup, Outcome, ParseOutcomeError, ParseStatusError, PlayError, Position, PositionError,
    PositionErrorKinds, Status,
};
pub use role::Role;
pub use setup::Setup;
pub use square::{Dimensions, InvalidNotation, Square};
pub use types::{Piece, PieceFlags};
pub use variant::{ParseVariantError, Variant, VariantPosition};
pub use xiangqi::Xiangqi;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
