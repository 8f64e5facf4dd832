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

use std::{error::Error, fmt, str::FromStr};

use bitflags::bitflags;

use crate::{
    board::{Board, SquareList},
    color::Color,
    m::{Move, MoveList},
    role::Role,
    setup::Setup,
    square::Square,
    types::Piece,
    variant::Variant,
};

/// Classification of a position from the point of view of the side to
/// move.
///
/// `Checkmate`, `Stalemate` and `Draw` are terminal. `Draw` is never
/// produced by move generation. It is set from the outside, see
/// [`Game::declare_draw()`](crate::Game::declare_draw).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl Status {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate | Status::Draw)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
            Status::Draw => "draw",
        }
    }

    /// Gets the final result, if `turn` is to move with this status in the
    /// given variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Color, Outcome, Status, Variant};
    ///
    /// assert_eq!(
    ///     Status::Stalemate.outcome(Color::Black, Variant::Chess),
    ///     Some(Outcome::Draw)
    /// );
    /// assert_eq!(
    ///     Status::Stalemate.outcome(Color::Black, Variant::Xiangqi),
    ///     Some(Outcome::Decisive { winner: Color::RED })
    /// );
    /// assert_eq!(Status::Check.outcome(Color::Black, Variant::Chess), None);
    /// ```
    pub const fn outcome(self, turn: Color, variant: Variant) -> Option<Outcome> {
        match self {
            Status::Checkmate => Some(Outcome::Decisive {
                winner: turn.other(),
            }),
            Status::Stalemate => Some(variant.stalemate_outcome(turn)),
            Status::Draw => Some(Outcome::Draw),
            Status::Playing | Status::Check => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid status name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseStatusError;

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid status")
    }
}

impl Error for ParseStatusError {}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Status, ParseStatusError> {
        Ok(match s {
            "playing" => Status::Playing,
            "check" => Status::Check,
            "checkmate" => Status::Checkmate,
            "stalemate" => Status::Stalemate,
            "draw" => Status::Draw,
            _ => return Err(ParseStatusError),
        })
    }
}

/// Outcome of a game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing the outcome of a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        Ok(match s {
            "1-0" => Outcome::Decisive {
                winner: Color::White,
            },
            "0-1" => Outcome::Decisive {
                winner: Color::Black,
            },
            "1/2-1/2" => Outcome::Draw,
            _ => return Err(ParseOutcomeError),
        })
    }
}

/// Error when trying to play an illegal move.
pub struct PlayError<P> {
    pub(crate) m: Move,
    pub(crate) inner: P,
}

impl<P> PlayError<P> {
    /// Returns the move that was rejected.
    pub fn rejected_move(&self) -> Move {
        self.m
    }

    /// Returns the unchanged position.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P> fmt::Debug for PlayError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayError")
            .field("m", &self.m)
            .finish_non_exhaustive()
    }
}

impl<P> fmt::Display for PlayError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move: {}", self.m)
    }
}

impl<P> Error for PlayError<P> {}

bitflags! {
    /// Reasons for a [`Setup`] not being a legal [`Position`].
    ///
    /// A position error may have multiple reasons.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A king (or general) is required but missing.
        const MISSING_KING = 1 << 1;

        /// A player has more than one king.
        const TOO_MANY_KINGS = 1 << 2;

        /// The player not to move is in check, or the generals are facing
        /// each other.
        const OPPOSITE_CHECK = 1 << 3;

        /// There are chess pawns on the first or last rank.
        const PAWNS_ON_BACKRANK = 1 << 4;

        /// The en passant square is not behind a pawn that could just have
        /// made a double step. The square is discarded.
        const INVALID_EP_SQUARE = 1 << 5;

        /// A xiangqi general or advisor stands outside its palace, or an
        /// elephant beyond the river.
        const KING_OUTSIDE_PALACE = 1 << 6;

        /// A piece type that does not belong to the variant is on the
        /// board.
        const FOREIGN_PIECE = 1 << 7;

        /// The board does not have the size of the variant.
        const WRONG_DIMENSIONS = 1 << 8;

        /// A player has more than 16 pieces.
        const TOO_MUCH_MATERIAL = 1 << 9;
    }
}

/// Error when trying to create a [`Position`] from an illegal [`Setup`].
pub struct PositionError<P> {
    pub(crate) errors: PositionErrorKinds,
    pub(crate) pos: P,
}

impl<P> PositionError<P> {
    pub(crate) fn new(errors: PositionErrorKinds, pos: P) -> Result<P, PositionError<P>> {
        PositionError { errors, pos }.strict()
    }

    fn ignore(mut self, ignore: PositionErrorKinds) -> Result<P, Self> {
        self.errors.remove(ignore);
        self.strict()
    }

    fn strict(self) -> Result<P, Self> {
        if self.errors.is_empty() {
            Ok(self.pos)
        } else {
            Err(self)
        }
    }

    pub(crate) fn map<Q, F>(self, f: F) -> PositionError<Q>
    where
        F: FnOnce(P) -> Q,
    {
        PositionError {
            errors: self.errors,
            pos: f(self.pos),
        }
    }

    /// Get the position with the invalid en passant square removed, if
    /// that was the only problem.
    pub fn ignore_invalid_ep_square(self) -> Result<P, Self> {
        self.ignore(PositionErrorKinds::INVALID_EP_SQUARE)
    }

    /// Get the position even though the player not to move is in check.
    ///
    /// Such positions are not reachable by legal play.
    pub fn ignore_opposite_check(self) -> Result<P, Self> {
        self.ignore(PositionErrorKinds::OPPOSITE_CHECK)
    }

    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl<P> fmt::Debug for PositionError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionError")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl<P> fmt::Display for PositionError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut reasons = Vec::new();
        if self.errors.contains(PositionErrorKinds::EMPTY_BOARD) {
            reasons.push("empty board");
        }
        if self.errors.contains(PositionErrorKinds::MISSING_KING) {
            reasons.push("missing king");
        }
        if self.errors.contains(PositionErrorKinds::TOO_MANY_KINGS) {
            reasons.push("too many kings");
        }
        if self.errors.contains(PositionErrorKinds::OPPOSITE_CHECK) {
            reasons.push("player not to move is in check");
        }
        if self.errors.contains(PositionErrorKinds::PAWNS_ON_BACKRANK) {
            reasons.push("pawns on backrank");
        }
        if self.errors.contains(PositionErrorKinds::INVALID_EP_SQUARE) {
            reasons.push("invalid en passant square");
        }
        if self.errors.contains(PositionErrorKinds::KING_OUTSIDE_PALACE) {
            reasons.push("piece outside its zone");
        }
        if self.errors.contains(PositionErrorKinds::FOREIGN_PIECE) {
            reasons.push("piece from another variant");
        }
        if self.errors.contains(PositionErrorKinds::WRONG_DIMENSIONS) {
            reasons.push("wrong board size");
        }
        if self.errors.contains(PositionErrorKinds::TOO_MUCH_MATERIAL) {
            reasons.push("too much material");
        }

        if reasons.is_empty() {
            f.write_str("unknown reason")
        } else {
            f.write_str(&reasons.join(", "))
        }
    }
}

impl<P> Error for PositionError<P> {}

/// Validate and set up a playable [`Position`]. All provided positions
/// implement this.
pub trait FromSetup: Sized {
    /// Set up a playable [`Position`].
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if the setup does not meet basic validity
    /// requirements. Meeting the requirements does not imply that the
    /// position is actually reachable with a series of legal moves from
    /// the starting position.
    fn from_setup(setup: Setup) -> Result<Self, PositionError<Self>>;
}

/// A legal position of a variant.
///
/// Implementors provide the variant specific movement geometry, check
/// detection and move application. Everything else is derived: move
/// enumeration, the self-check filter, terminal state detection.
///
/// Geometric move tests ([`Position::is_valid_move()`],
/// [`Position::possible_moves()`]) are pseudo-legal. They do not consider
/// whether the mover's own king is left in check. The methods with
/// `legal` in their name, [`Position::play()`] and
/// [`Position::status()`] do.
pub trait Position {
    fn variant(&self) -> Variant;

    /// Piece positions on the board.
    fn board(&self) -> &Board;

    /// Side to move.
    fn turn(&self) -> Color;

    /// En passant target square, if any.
    fn ep_square(&self) -> Option<Square> {
        None
    }

    /// Tests if `piece`, standing on `from`, may move to `to` according to
    /// its movement geometry. Destinations off the board or occupied by an
    /// ally are always rejected.
    fn is_valid_move(&self, piece: Piece, from: Square, to: Square) -> bool;

    /// Tests if the king (or general) of the given color is attacked.
    /// Returns `false` if the color has no king.
    fn is_king_in_check(&self, color: Color) -> bool;

    /// Roles that `piece` may promote to when arriving on `to`. Empty if
    /// the move is not a promotion.
    fn promotion_roles(&self, _piece: Piece, _to: Square) -> &'static [Role] {
        &[]
    }

    /// The piece that a move of `piece` from `from` to `to` would remove
    /// from the board.
    fn captured_piece(&self, _piece: Piece, _from: Square, to: Square) -> Option<Piece> {
        self.board().piece_at(to)
    }

    /// Tests if playing the pseudo-legal move `m` keeps the mover's own
    /// king safe. Works on a private copy of the position.
    fn is_safe(&self, m: Move) -> bool;

    /// Plays a move. It is the callers responsibility to ensure the move is
    /// legal.
    ///
    /// # Panics
    ///
    /// Illegal moves can corrupt the state of the position and may
    /// (or may not) panic or cause panics on future calls.
    fn play_unchecked(&mut self, m: Move);

    /// Converts the position to the current [`Setup`].
    fn to_setup(&self) -> Setup {
        Setup {
            board: self.board().clone(),
            turn: self.turn(),
            ep_square: self.ep_square(),
        }
    }

    /// Builds the move record for the piece on `from` going to `to`, or
    /// `None` if `from` is empty. The move is not checked for legality.
    fn to_move(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
        let piece = self.board().piece_at(from)?;
        Some(Move {
            piece,
            from,
            to,
            capture: self.captured_piece(piece, from, to),
            promotion,
        })
    }

    /// Collects all squares that the piece on `from` may move to, scanning
    /// the whole board in row-major order. Moves that leave the mover in
    /// check are included.
    ///
    /// # Examples
    ///
    /// ```
    /// use ruleboard::{Color, Dimensions, Position, Role, Setup, Square, Variant, VariantPosition};
    ///
    /// let mut setup = Setup::empty(Dimensions::XIANGQI);
    /// setup.board.set_piece_at(Square::new(9, 3), Color::RED.king());
    /// setup.board.set_piece_at(Square::new(0, 5), Color::Black.king());
    /// setup.board.set_piece_at(Square::new(5, 4), Role::Chariot.of(Color::RED));
    ///
    /// let pos = VariantPosition::from_setup(Variant::Xiangqi, setup)?;
    /// assert_eq!(pos.possible_moves(Square::new(5, 4)).len(), 17);
    /// # Ok::<_, ruleboard::PositionError<_>>(())
    /// ```
    fn possible_moves(&self, from: Square) -> SquareList {
        let mut moves = SquareList::new();
        if let Some(piece) = self.board().piece_at(from) {
            moves.extend(
                self.board()
                    .dimensions()
                    .squares()
                    .filter(|&to| self.is_valid_move(piece, from, to)),
            );
        }
        moves
    }

    /// Tests if `piece` stands on `from` and may move to `to`. This is a
    /// pseudo-legal test, like [`Position::possible_moves()`].
    fn is_move_valid(&self, from: Square, to: Square, piece: Piece) -> bool {
        self.board().piece_at(from) == Some(piece) && self.is_valid_move(piece, from, to)
    }

    /// Tests a move for legality: it must be a move of the side to move,
    /// describe the board correctly, pass the geometry test, carry a
    /// promotion exactly when one is required and not leave the mover's
    /// king in check.
    fn is_legal(&self, m: Move) -> bool {
        if m.piece.color != self.turn()
            || self.board().piece_at(m.from) != Some(m.piece)
            || !self.is_valid_move(m.piece, m.from, m.to)
            || m.capture != self.captured_piece(m.piece, m.from, m.to)
        {
            return false;
        }
        let roles = self.promotion_roles(m.piece, m.to);
        let promotion_ok = match m.promotion {
            Some(role) => roles.contains(&role),
            None => roles.is_empty(),
        };
        promotion_ok && self.is_safe(m)
    }

    /// Like [`Position::possible_moves()`], but only for pieces of the side
    /// to move and without moves that leave the mover in check.
    fn legal_destinations(&self, from: Square) -> SquareList {
        let mut dests = self.possible_moves(from);
        dests.retain(|to| {
            self.to_move(from, *to, None)
                .is_some_and(|m| m.piece.color == self.turn() && self.is_safe(m))
        });
        dests
    }

    /// Generates all legal moves. Promotions appear once per promotion
    /// role.
    fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in self.board().pieces_of(self.turn()) {
            for to in self.possible_moves(from) {
                let m = Move {
                    piece,
                    from,
                    to,
                    capture: self.captured_piece(piece, from, to),
                    promotion: None,
                };
                if !self.is_safe(m) {
                    continue;
                }
                let roles = self.promotion_roles(piece, to);
                if roles.is_empty() {
                    moves.push(m);
                } else {
                    moves.extend(roles.iter().map(|&role| Move {
                        promotion: Some(role),
                        ..m
                    }));
                }
            }
        }
        moves
    }

    /// Tests if the side to move has at least one legal move. Stops at the
    /// first one found.
    fn has_any_legal_moves(&self) -> bool {
        let squares = self.board().dimensions().squares();
        self.board().pieces_of(self.turn()).any(|(from, piece)| {
            squares.clone().any(|to| {
                self.is_valid_move(piece, from, to)
                    && self.is_safe(Move {
                        piece,
                        from,
                        to,
                        capture: self.captured_piece(piece, from, to),
                        promotion: None,
                    })
            })
        })
    }

    /// Tests if the side to move is in check.
    fn is_check(&self) -> bool {
        self.is_king_in_check(self.turn())
    }

    /// Classifies the position for the side to move.
    fn status(&self) -> Status {
        match (self.is_check(), self.has_any_legal_moves()) {
            (true, false) => Status::Checkmate,
            (true, true) => Status::Check,
            (false, false) => Status::Stalemate,
            (false, true) => Status::Playing,
        }
    }

    fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_any_legal_moves()
    }

    fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_any_legal_moves()
    }

    /// Tests if the game is over.
    fn is_game_over(&self) -> bool {
        !self.has_any_legal_moves()
    }

    /// The outcome of the game, or `None` if the game is not over.
    fn outcome(&self) -> Option<Outcome> {
        self.status().outcome(self.turn(), self.variant())
    }

    /// Plays a move.
    ///
    /// # Errors
    ///
    /// Returns a [`PlayError`] if the move is not legal. The position can
    /// be recovered using [`PlayError::into_inner()`].
    fn play(mut self, m: Move) -> Result<Self, PlayError<Self>>
    where
        Self: Sized,
    {
        if self.is_legal(m) {
            self.play_unchecked(m);
            Ok(self)
        } else {
            Err(PlayError { m, inner: self })
        }
    }
}
