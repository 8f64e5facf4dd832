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

//! A game session: position, status, move history and the selection
//! state of a click driven user interface.
//!
//! A [`Game`] is a value. Accepting a move produces a new game and leaves
//! the old one untouched, so a caller can hold on to any previous state.
//!
//! # Examples
//!
//! ```
//! use ruleboard::{game::Game, Square, Status, Variant};
//!
//! let game = Game::new(Variant::Xiangqi);
//!
//! // Select the red cannon, then click its destination.
//! let game = game.click(Square::new(7, 1));
//! assert_eq!(game.selection(), Some(Square::new(7, 1)));
//! assert!(game.highlights().contains(&Square::new(7, 4)));
//!
//! let game = game.click(Square::new(7, 4));
//! assert_eq!(game.selection(), None);
//! assert_eq!(game.history().len(), 1);
//! assert_eq!(game.status(), Status::Playing);
//! ```

use std::{error::Error, fmt};

use tracing::{debug, info, trace};

use crate::{
    board::{Board, SquareList},
    color::Color,
    m::Move,
    position::{Outcome, Position, Status},
    role::Role,
    square::Square,
    variant::{Variant, VariantPosition},
};

/// Reason for rejecting a move in a [`Game`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RejectedMove {
    /// The game already reached a terminal status.
    GameOver(Status),
    /// There is no piece on the origin square.
    EmptySquare(Square),
    /// The piece on the origin square does not belong to the side to move.
    WrongTurn { turn: Color },
    /// The piece can not move there, or the move leaves its own king in
    /// check.
    Illegal,
}

impl fmt::Display for RejectedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RejectedMove::GameOver(status) => write!(f, "game is over ({status})"),
            RejectedMove::EmptySquare(sq) => write!(f, "no piece on {sq}"),
            RejectedMove::WrongTurn { turn } => write!(f, "not your turn, {turn} to move"),
            RejectedMove::Illegal => f.write_str("illegal move"),
        }
    }
}

impl Error for RejectedMove {}

/// State of a game in progress.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game<P = VariantPosition> {
    position: P,
    status: Status,
    history: Vec<Move>,
    selection: Option<Square>,
    highlights: SquareList,
}

impl Game<VariantPosition> {
    /// Starts a game of the given variant from its initial position.
    pub fn new(variant: Variant) -> Game<VariantPosition> {
        Game::from_position(VariantPosition::new(variant))
    }
}

impl<P: Position + Default + Clone> Default for Game<P> {
    fn default() -> Game<P> {
        Game::from_position(P::default())
    }
}

impl<P: Position + Clone> Game<P> {
    /// Starts a game from an arbitrary position, with an empty history.
    pub fn from_position(position: P) -> Game<P> {
        let status = position.status();
        Game {
            position,
            status,
            history: Vec::new(),
            selection: None,
            highlights: SquareList::new(),
        }
    }

    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn into_position(self) -> P {
        self.position
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The square of the selected piece, if any.
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    /// Legal destinations of the selected piece.
    pub fn highlights(&self) -> &[Square] {
        &self.highlights
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// The result of the game, or `None` while it is still going on.
    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome(self.turn(), self.position.variant())
    }

    /// Moves the piece on `from` to `to`. A pawn reaching the last rank is
    /// promoted to a queen.
    ///
    /// # Errors
    ///
    /// Returns [`RejectedMove`] if the game is over or the move is not
    /// legal. `self` is not modified either way.
    pub fn make_move(&self, from: Square, to: Square) -> Result<Game<P>, RejectedMove> {
        self.make_move_with_promotion(from, to, None)
    }

    /// Like [`Game::make_move()`], with an explicit promotion role.
    ///
    /// # Errors
    ///
    /// Returns [`RejectedMove`] if the game is over or the move is not
    /// legal.
    pub fn make_move_with_promotion(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Game<P>, RejectedMove> {
        let result = self.try_move(from, to, promotion);
        if let Err(ref err) = result {
            debug!(%from, %to, %err, "rejected move");
        }
        result
    }

    fn try_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Game<P>, RejectedMove> {
        if self.status.is_terminal() {
            return Err(RejectedMove::GameOver(self.status));
        }
        let piece = self
            .board()
            .piece_at(from)
            .ok_or(RejectedMove::EmptySquare(from))?;
        if piece.color != self.turn() {
            return Err(RejectedMove::WrongTurn { turn: self.turn() });
        }

        let roles = self.position.promotion_roles(piece, to);
        let promotion = promotion.or_else(|| {
            roles
                .iter()
                .copied()
                .find(|&role| role == Role::Queen)
                .or_else(|| roles.first().copied())
        });

        let m = self
            .position
            .to_move(from, to, promotion)
            .ok_or(RejectedMove::EmptySquare(from))?;
        if !self.position.is_legal(m) {
            return Err(RejectedMove::Illegal);
        }

        let mut position = self.position.clone();
        position.play_unchecked(m);
        let status = position.status();

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend_from_slice(&self.history);
        history.push(m);

        trace!(%m, %status, "accepted move");
        if status.is_terminal() {
            info!(%status, plies = history.len(), "game over");
        }

        Ok(Game {
            position,
            status,
            history,
            selection: None,
            highlights: SquareList::new(),
        })
    }

    /// Selects the piece on `sq` if it belongs to the side to move and
    /// highlights its legal destinations. Anything else clears the
    /// selection.
    #[must_use]
    pub fn select(&self, sq: Square) -> Game<P> {
        let own_piece = !self.status.is_terminal()
            && self
                .board()
                .piece_at(sq)
                .is_some_and(|piece| piece.color == self.turn());
        if !own_piece {
            return self.deselect();
        }

        let highlights = self.position.legal_destinations(sq);
        debug!(%sq, destinations = highlights.len(), "selected");
        Game {
            selection: Some(sq),
            highlights,
            ..self.clone()
        }
    }

    /// Clears the selection.
    #[must_use]
    pub fn deselect(&self) -> Game<P> {
        Game {
            selection: None,
            highlights: SquareList::new(),
            ..self.clone()
        }
    }

    /// Handles a click on `sq`.
    ///
    /// * Without a selection, behaves like [`Game::select()`].
    /// * Clicking the selected square again clears the selection.
    /// * Clicking another square tries to move the selected piece there.
    ///   If that fails, the click is treated as a fresh selection.
    #[must_use]
    pub fn click(&self, sq: Square) -> Game<P> {
        match self.selection {
            None => self.select(sq),
            Some(selected) if selected == sq => self.deselect(),
            Some(selected) => self
                .make_move(selected, sq)
                .unwrap_or_else(|_| self.select(sq)),
        }
    }

    /// Ends the game in a draw, for example by agreement or repetition
    /// detected by the caller. Has no effect on a finished game.
    #[must_use]
    pub fn declare_draw(self) -> Game<P> {
        if self.status.is_terminal() {
            return self;
        }
        info!(plies = self.history.len(), "draw declared");
        self.with_forced_status(Status::Draw)
    }

    /// Overrides the status, bypassing detection. Intended for tests and
    /// tooling that need to reach a particular end of game state directly.
    #[must_use]
    pub fn with_forced_status(self, status: Status) -> Game<P> {
        Game {
            status,
            selection: None,
            highlights: SquareList::new(),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chess::Chess, fen::Fen, xiangqi::Xiangqi};

    fn sq(name: &str) -> Square {
        crate::Dimensions::CHESS.parse_algebraic(name).expect("square")
    }

    fn chess(fen: &str) -> Game<Chess> {
        Game::from_position(
            fen.parse::<Fen>()
                .expect("valid fen")
                .position()
                .expect("legal position"),
        )
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(Variant::Chess);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), Status::Playing);
        assert!(game.history().is_empty());
        assert_eq!(game.selection(), None);
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_make_move() {
        let game = Game::<Chess>::default();
        let after = game.make_move(sq("e2"), sq("e4")).expect("legal");
        assert_eq!(after.turn(), Color::Black);
        assert_eq!(after.history().len(), 1);
        assert_eq!(after.history()[0].from, sq("e2"));
        assert!(after.board().piece_at(sq("e4")).is_some_and(|p| p.has_moved()));

        // The original game is unchanged.
        assert_eq!(game.turn(), Color::White);
        assert!(game.history().is_empty());
        assert!(game.board().piece_at(sq("e2")).is_some());
    }

    #[test]
    fn test_rejections() {
        let game = Game::<Chess>::default();
        assert_eq!(
            game.make_move(sq("e4"), sq("e5")),
            Err(RejectedMove::EmptySquare(sq("e4")))
        );
        assert_eq!(
            game.make_move(sq("e7"), sq("e5")),
            Err(RejectedMove::WrongTurn { turn: Color::White })
        );
        assert_eq!(
            game.make_move(sq("e2"), sq("e5")),
            Err(RejectedMove::Illegal)
        );
        assert_eq!(
            game.make_move(sq("a1"), sq("a2")),
            Err(RejectedMove::Illegal)
        );
    }

    #[test]
    fn test_self_check_is_rejected() {
        // The bishop on e2 is pinned by the rook on e8.
        let game = chess("4r1k1/8/8/8/8/8/4B3/4K3 w - -");
        assert_eq!(
            game.make_move(sq("e2"), sq("d3")),
            Err(RejectedMove::Illegal)
        );
        let game = game.select(sq("e2"));
        assert_eq!(game.selection(), Some(sq("e2")));
        assert!(game.highlights().is_empty());
    }

    #[test]
    fn test_auto_queen() {
        let game = chess("4k3/P7/8/8/8/8/8/4K3 w - -");
        let after = game.make_move(sq("a7"), sq("a8")).expect("promotion");
        assert_eq!(
            after.board().piece_at(sq("a8")).map(|p| p.role),
            Some(Role::Queen)
        );
        let after = game
            .make_move_with_promotion(sq("a7"), sq("a8"), Some(Role::Knight))
            .expect("underpromotion");
        assert_eq!(
            after.board().piece_at(sq("a8")).map(|p| p.role),
            Some(Role::Knight)
        );
    }

    #[test]
    fn test_click_state_machine() {
        let game = Game::<Chess>::default();

        // Idle: clicks on empty or enemy squares do nothing.
        assert_eq!(game.click(sq("e4")), game);
        assert_eq!(game.click(sq("e7")), game);

        // Select and deselect.
        let selected = game.click(sq("g1"));
        assert_eq!(selected.selection(), Some(sq("g1")));
        assert_eq!(selected.highlights(), &[sq("f3"), sq("h3")]);
        assert_eq!(selected.click(sq("g1")), game);

        // A failed move onto another own piece selects that piece.
        let reselected = selected.click(sq("b1"));
        assert_eq!(reselected.selection(), Some(sq("b1")));
        assert!(reselected.history().is_empty());

        // A failed move onto an empty square clears the selection.
        let cleared = selected.click(sq("g4"));
        assert_eq!(cleared.selection(), None);
        assert!(cleared.history().is_empty());

        // A successful move.
        let moved = selected.click(sq("f3"));
        assert_eq!(moved.selection(), None);
        assert!(moved.highlights().is_empty());
        assert_eq!(moved.turn(), Color::Black);
        assert_eq!(moved.history().len(), 1);
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::<Chess>::default();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game = game.make_move(sq(from), sq(to)).expect("legal");
        }
        assert_eq!(game.status(), Status::Checkmate);
        assert_eq!(game.outcome(), Some(Outcome::Decisive { winner: Color::Black }));
        assert_eq!(
            game.make_move(sq("e2"), sq("e4")),
            Err(RejectedMove::GameOver(Status::Checkmate))
        );
        assert_eq!(game.select(sq("e2")).selection(), None);
    }

    #[test]
    fn test_declare_draw() {
        let game = Game::new(Variant::Xiangqi).select(Square::new(9, 0)).declare_draw();
        assert_eq!(game.status(), Status::Draw);
        assert_eq!(game.selection(), None);
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert!(game.make_move(Square::new(9, 0), Square::new(8, 0)).is_err());
    }

    #[test]
    fn test_forced_status() {
        let game = Game::<Xiangqi>::default().with_forced_status(Status::Checkmate);
        assert!(game.is_game_over());
        assert_eq!(
            game.outcome(),
            Some(Outcome::Decisive { winner: Color::Black })
        );
        // A finished game can not be drawn anymore.
        assert_eq!(game.clone().declare_draw(), game);
    }
}
