//! Integration tests for the LexiGrid game engine.
//!
//! These tests drive complete games through the public move interface.

use lexigrid_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Standard tile set with `front` moved to the head of the pool, so seat 0
/// is dealt the first seven letters, seat 1 the next seven, and so on.
fn stacked_pool(config: &GameConfig, front: &str) -> TilePool {
    let mut rest: Vec<char> = Vec::new();
    for (&letter, &count) in &config.tile_distribution {
        rest.extend(std::iter::repeat(letter).take(count as usize));
    }
    let mut letters = Vec::new();
    for letter in front.chars() {
        let idx = rest
            .iter()
            .position(|&l| l == letter)
            .expect("letter not in the tile set");
        letters.push(rest.remove(idx));
    }
    letters.extend(rest);
    TilePool::from_letters(letters)
}

fn full_distribution(config: &GameConfig) -> LetterCounts {
    let mut counts = LetterCounts::new();
    for (&letter, &count) in &config.tile_distribution {
        counts.add(letter, count);
    }
    counts
}

fn names() -> Vec<String> {
    vec!["Nick".to_string(), "Bob".to_string()]
}

fn game_with<D: Dictionary>(front: &str, dictionary: D) -> Game<D> {
    let config = GameConfig::standard();
    let pool = stacked_pool(&config, front);
    Game::with_pool(config, names(), dictionary, pool).unwrap()
}

fn hello() -> Move {
    Move::play("HELLO", 7, 3, Direction::Horizontal)
}

#[test]
fn test_opening_scenario() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);

    let result = game.make_move(Move::play("HELLO", 0, 0, Direction::Horizontal));
    assert_eq!(result, MoveResult::Retry(MoveError::MissingOpeningCoverage));

    assert_eq!(game.make_move(hello()), MoveResult::Next);
    assert_eq!(game.board.get_letter(Position::new(7, 7)), Some('O'));
    assert_eq!(game.board.get_letter(Position::new(7, 3)), Some('H'));

    let score = game.last_turn_score.as_ref().unwrap();
    // H on a double letter, O on the centre square
    assert_eq!(score.total_score, 24);
    assert!(!score.is_bingo);
    assert_eq!(game.players[0].current_score, 24);
}

#[test]
fn test_subsequent_play_must_connect() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);
    game.make_move(hello());

    assert_eq!(
        game.make_move(Move::play("PA", 0, 0, Direction::Vertical)),
        MoveResult::Retry(MoveError::NotConnected)
    );

    // PAL down column 5 ends on the existing L of HELLO
    assert_eq!(
        game.make_move(Move::play("PAL", 5, 5, Direction::Vertical)),
        MoveResult::Next
    );
    let score = game.last_turn_score.as_ref().unwrap();
    let words: Vec<&str> = score.words().collect();
    assert_eq!(words, vec!["PAL"]);
    // P on a triple letter square
    assert_eq!(score.total_score, 11);
    assert_eq!(game.players[1].rack.len(), 7);
}

#[test]
fn test_boundary_rejection() {
    let mut config = GameConfig::standard();
    config.board_height = 5;
    config.board_width = 5;
    config.opening = Position::new(2, 2);
    config.bonus_layout.clear();
    let pool = stacked_pool(&config, "HELLOAB");
    let game = Game::with_pool(config, vec!["Solo".to_string()], AcceptAll, pool).unwrap();

    assert!(game
        .validate_play(0, "HELLO", Position::new(2, 0), Direction::Horizontal)
        .is_ok());
    assert_eq!(
        game.validate_play(0, "HELLO", Position::new(2, 1), Direction::Horizontal)
            .unwrap_err(),
        MoveError::OutOfBounds
    );
    assert!(game
        .validate_play(0, "HELLO", Position::new(0, 2), Direction::Vertical)
        .is_ok());
    assert_eq!(
        game.validate_play(0, "HELLO", Position::new(1, 2), Direction::Vertical)
            .unwrap_err(),
        MoveError::OutOfBounds
    );
}

#[test]
fn test_rejected_moves_leave_state_unchanged() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);
    game.make_move(hello());
    let before = game.export_snapshot();

    let rejected = vec![
        Move::play("PAX", 14, 14, Direction::Horizontal),
        Move::play("PAX", 7, 7, Direction::Vertical),
        Move::play("PA", 0, 0, Direction::Horizontal),
        Move::play("ZZZ", 8, 3, Direction::Horizontal),
        Move::play("", 8, 3, Direction::Horizontal),
        Move::exchange("EEEE"),
    ];
    for mv in rejected {
        assert!(matches!(game.make_move(mv), MoveResult::Retry(_)));
        assert_eq!(game.export_snapshot(), before);
    }

    game.make_move(Move::Pass);
    let before = game.export_snapshot();
    assert!(matches!(
        game.make_move(Move::challenge()),
        MoveResult::Retry(MoveError::InvalidChallengeTarget(_))
    ));
    assert_eq!(game.export_snapshot(), before);
}

#[test]
fn test_letter_conservation() {
    let config = GameConfig::standard();
    let expected = full_distribution(&config);
    let mut game = game_with("HELLOABPAXYZQR", WordList::from_words(["HELLO"]));
    assert_eq!(game.tile_totals(), expected);

    let moves = vec![
        hello(),
        Move::play("PAL", 5, 5, Direction::Vertical),
        Move::challenge(),
        Move::exchange("AB"),
        Move::Pass,
    ];
    for mv in moves {
        assert_eq!(game.make_move(mv), MoveResult::Next);
        assert_eq!(game.tile_totals(), expected);
    }
}

#[test]
fn test_bingo_bonus_once() {
    let mut game = game_with("RETAINSPAXYZQR", AcceptAll);
    assert_eq!(
        game.make_move(Move::play("RETAINS", 7, 1, Direction::Horizontal)),
        MoveResult::Next
    );
    let score = game.last_turn_score.as_ref().unwrap();
    assert!(score.is_bingo);
    // (1 + 1 + 1*2 + 1 + 1 + 1 + 1) * 2 + 50
    assert_eq!(score.total_score, 66);
    assert_eq!(game.players[0].rack.len(), 7);
}

#[test]
fn test_partial_rack_is_not_bingo() {
    let mut game = game_with("RETAINSPAXYZQR", AcceptAll);
    game.make_move(Move::play("RETAIN", 7, 2, Direction::Horizontal));
    let score = game.last_turn_score.as_ref().unwrap();
    assert!(!score.is_bingo);
}

#[test]
fn test_straddle_scores_only_new_bonuses() {
    let mut game = game_with("MENDXYZAMENTQU", AcceptAll);
    game.make_move(Move::play("MEND", 7, 7, Direction::Horizontal));
    assert_eq!(game.players[0].current_score, 14);

    assert_eq!(
        game.make_move(Move::play("AMENDMENT", 7, 6, Direction::Horizontal)),
        MoveResult::Next
    );
    // M on the double letter at column 11, T on the triple word at column 14;
    // the centre square under the old M does not count again
    assert_eq!(game.players[1].current_score, 51);
    for col in 7..=10 {
        assert_eq!(
            game.board.get_cell(Position::new(7, col)).unwrap().placed_by,
            Some(0)
        );
    }
}

#[test]
fn test_challenge_revert_round_trip() {
    let mut game = game_with("HELLOABPAXYZQR", WordList::from_words(["HELLO"]));
    game.make_move(hello());
    let bob_rack = game.players[1].rack.counts();
    game.make_move(Move::play("PAL", 5, 5, Direction::Vertical));
    let previous = game.players[1].current_score;
    let played = game.players[1].score_history[0].total_score;
    assert_eq!(played, 11);

    assert_eq!(game.make_move(Move::challenge()), MoveResult::Next);

    assert_eq!(game.board.get_letter(Position::new(5, 5)), None);
    assert_eq!(game.board.get_letter(Position::new(6, 5)), None);
    // The straddled L belongs to HELLO and stays
    assert_eq!(game.board.get_letter(Position::new(7, 5)), Some('L'));

    let bob = &game.players[1];
    assert_eq!(bob.current_score, previous - played);
    assert_eq!(bob.score_history[0].total_score, 0);
    assert!(bob.score_history[0].voided);
    assert_eq!(bob.rack.len(), 9);
    assert_eq!(bob.rack.counts().get('P'), bob_rack.get('P'));

    let nick = &game.players[0];
    assert_eq!(nick.current_score, 24 + 10);
    assert_eq!(nick.current_score, nick.history_total());
    assert_eq!(game.current_player, 0);
}

#[test]
fn test_failed_challenge_forces_skip() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);
    game.make_move(hello());
    assert_eq!(game.make_move(Move::challenge()), MoveResult::Next);
    assert_eq!(game.current_player, 1);
    assert_eq!(
        game.make_move(Move::Pass),
        MoveResult::Retry(MoveError::TurnForfeited)
    );
    assert_eq!(game.make_move(Move::Skip), MoveResult::Next);
    assert_eq!(game.current_player, 0);
    assert_eq!(game.players[0].current_score, 24);
}

#[test]
fn test_cannot_challenge_pass_or_exchange() {
    let mut game = game_with("HELLOABPAXYZQR", WordList::new());
    game.make_move(Move::Pass);
    assert!(matches!(
        game.make_move(Move::challenge()),
        MoveResult::Retry(MoveError::InvalidChallengeTarget(_))
    ));
    game.make_move(Move::exchange("PA"));
    assert!(matches!(
        game.make_move(Move::challenge()),
        MoveResult::Retry(MoveError::InvalidChallengeTarget(_))
    ));
}

#[test]
fn test_save_does_not_take_a_slot() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);
    game.make_move(hello());
    game.make_move(Move::Save { location: None });
    assert_eq!(game.move_history.len(), 1);
    assert_eq!(game.current_player, 1);

    // The previous play is still the challenge target
    assert_eq!(game.make_move(Move::challenge()), MoveResult::Next);
    assert!(game.players[1].skip_next_turn);
}

#[test]
fn test_end_stops_the_game() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);
    game.make_move(hello());
    assert_eq!(game.make_move(Move::End), MoveResult::End);
    assert!(game.is_finished());
    assert_eq!(game.leader(), Some(0));
    assert_eq!(game.make_move(hello()), MoveResult::End);
}

#[test]
fn test_snapshot_round_trip() {
    let mut game = game_with("HELLOABPAXYZQR", AcceptAll);
    game.make_move(hello());
    game.make_move(Move::play("PAL", 5, 5, Direction::Vertical));

    let json = serde_json::to_string(&game.export_snapshot()).unwrap();
    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
    let mut restored = Game::from_snapshot(GameConfig::standard(), snapshot, AcceptAll).unwrap();

    assert_eq!(restored.export_snapshot(), game.export_snapshot());
    assert_eq!(restored.board.export_snapshot('.'), game.board.export_snapshot('.'));

    // The restored history still supports a challenge
    assert_eq!(restored.make_move(Move::challenge()), MoveResult::Next);
    assert!(restored.players[0].skip_next_turn);
}

#[test]
fn test_board_import_then_play() {
    let mut game = game_with("CATSXYZQRABCDE", AcceptAll);
    let mut rows = vec![".".repeat(15); 15];
    rows[7] = ".......HAT.....".to_string();
    game.board
        .import_snapshot(&BoardSnapshot::Rows(rows), '.', None, None)
        .unwrap();

    // Opening coverage no longer applies once the board has letters
    assert_eq!(
        game.make_move(Move::play("CATS", 8, 9, Direction::Horizontal)),
        MoveResult::Next
    );
    let score = game.last_turn_score.as_ref().unwrap();
    let mut words: Vec<&str> = score.words().collect();
    words.sort();
    assert_eq!(words, vec!["CATS", "TC"]);
}

#[test]
fn test_seeded_game_plays_out() {
    let config = GameConfig::standard();
    let expected = full_distribution(&config);
    let mut game = Game::with_rng(config, names(), AcceptAll, StdRng::seed_from_u64(3)).unwrap();

    for _ in 0..40 {
        let letters: String = game.current_player().rack.tiles()[..2].iter().collect();
        assert_eq!(game.make_move(Move::exchange(&letters)), MoveResult::Next);
        assert_eq!(game.tile_totals(), expected);
    }
    assert_eq!(game.tile_pool.len(), 98 - 14);
    assert_eq!(game.turn, 20);
    assert_eq!(game.players.iter().map(|p| p.rack.len()).sum::<usize>(), 14);
}
