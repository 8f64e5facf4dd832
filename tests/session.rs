use ruleboard::{
    fen::Fen,
    game::{Game, RejectedMove},
    uci::Uci,
    Color, Dimensions, Outcome, Position, Role, Square, Status, Variant, Xiangqi,
};

fn chess_square(name: &str) -> Square {
    Dimensions::CHESS.parse_algebraic(name).expect("valid square")
}

fn play_ucis(mut game: Game, ucis: &[&str]) -> Game {
    let dims = game.board().dimensions();
    for uci in ucis {
        let uci = Uci::from_ascii(uci.as_bytes(), dims).expect("valid uci");
        game = game
            .make_move_with_promotion(uci.from, uci.to, uci.promotion)
            .unwrap_or_else(|err| panic!("{}: {}", uci.display(dims), err));
    }
    game
}

#[test]
fn test_scholars_mate_by_clicks() {
    let mut game = Game::new(Variant::Chess);
    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
        ("h5", "f7"),
    ] {
        game = game.click(chess_square(from));
        assert_eq!(game.selection(), Some(chess_square(from)));
        assert!(game.highlights().contains(&chess_square(to)));
        game = game.click(chess_square(to));
        assert_eq!(game.selection(), None);
    }

    assert_eq!(game.status(), Status::Checkmate);
    assert_eq!(game.outcome(), Some(Outcome::Decisive { winner: Color::White }));
    assert_eq!(game.history().len(), 7);
    assert_eq!(
        game.history().last().and_then(|m| m.capture).map(|p| p.role),
        Some(Role::Pawn)
    );

    // Nothing can be selected anymore.
    assert_eq!(game.click(chess_square("e8")), game);
}

#[test]
fn test_rejected_move_leaves_game_untouched() {
    let game = play_ucis(Game::new(Variant::Chess), &["e2e4", "e7e5"]);
    let before = game.clone();

    assert_eq!(
        game.make_move(chess_square("e1"), chess_square("e3")),
        Err(RejectedMove::Illegal)
    );
    assert_eq!(
        game.make_move(chess_square("d7"), chess_square("d5")),
        Err(RejectedMove::WrongTurn { turn: Color::White })
    );
    assert_eq!(game, before);
    assert_eq!(game.history().len(), 2);
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_moves_do_not_alias_boards() {
    let start = Game::new(Variant::Xiangqi);
    let after = play_ucis(start.clone(), &["h3e3", "h10g8"]);
    assert_eq!(start, Game::new(Variant::Xiangqi));
    assert_ne!(start.board(), after.board());
}

#[test]
fn test_xiangqi_cannon_capture_is_recorded() {
    let game = play_ucis(Game::new(Variant::Xiangqi), &["b3b10"]);
    let m = game.history()[0];
    assert_eq!(m.role(), Role::Cannon);
    assert_eq!(m.capture.map(|p| p.role), Some(Role::Horse));
    assert_eq!(m.capture.map(|p| p.color), Some(Color::Black));
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.status(), Status::Playing);
}

#[test]
fn test_opening_the_file_between_generals_is_rejected() {
    let pos: Xiangqi = "4k4/9/9/9/4N4/9/9/9/9/4K4 w"
        .parse::<Fen>()
        .expect("valid fen")
        .position()
        .expect("legal position");
    let game = Game::from_position(pos);

    assert!(game.position().possible_moves(Square::new(4, 4)).contains(&Square::new(2, 3)));
    assert_eq!(
        game.make_move(Square::new(4, 4), Square::new(2, 3)),
        Err(RejectedMove::Illegal)
    );

    let selected = game.select(Square::new(4, 4));
    assert_eq!(selected.selection(), Some(Square::new(4, 4)));
    assert!(selected.highlights().is_empty());
}

#[test]
fn test_soldier_crosses_river() {
    let game = play_ucis(Game::new(Variant::Xiangqi), &["e4e5", "a7a6", "e5e6"]);
    let soldier = game.board().piece_at(Square::new(4, 4)).expect("soldier");
    assert_eq!(soldier.role, Role::Soldier);
    assert!(soldier.has_crossed_river());

    // Sideways steps are now available.
    let game = play_ucis(game, &["a6a5"]);
    let game = game.select(Square::new(4, 4));
    assert_eq!(
        game.highlights(),
        &[Square::new(3, 4), Square::new(4, 3), Square::new(4, 5)]
    );
}

#[test]
fn test_fen_of_session() {
    let game = play_ucis(Game::new(Variant::Chess), &["e2e4"]);
    assert_eq!(
        Fen::from_position(game.position()).to_string(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -"
    );

    let game = play_ucis(game, &["e7e5", "e1e2"]);
    assert_eq!(
        Fen::from_position(game.position()).to_string(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPPKPPP/RNBQ1BNR b kq -"
    );
}

#[test]
fn test_declared_draw_is_terminal() {
    let game = play_ucis(Game::new(Variant::Xiangqi), &["h3e3"]).declare_draw();
    assert_eq!(game.status(), Status::Draw);
    assert_eq!(game.outcome(), Some(Outcome::Draw));
    let dims = game.board().dimensions();
    let uci = Uci::from_ascii(b"h8e8", dims).expect("valid uci");
    assert_eq!(
        game.make_move(uci.from, uci.to),
        Err(RejectedMove::GameOver(Status::Draw))
    );
}
