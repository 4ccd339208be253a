//! Game state machine tests through the public surface

use tetrion::core::Game;
use tetrion::types::EMPTY;

fn stamped_cells(game: &Game) -> usize {
    game.snapshot()
        .cells
        .iter()
        .filter(|&&tag| tag != EMPTY)
        .count()
}

/// Hard-drop until the spawn has no room; bounded so a broken game-over
/// rule fails the test instead of hanging it
fn play_to_top_out(game: &mut Game) {
    for _ in 0..200 {
        if game.is_game_over() {
            return;
        }
        game.hard_drop();
    }
    panic!("no top-out after 200 hard drops");
}

#[test]
fn test_fresh_game_state() {
    let game = Game::with_seed(20, 10, 1).unwrap();
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 0);
    assert_eq!(game.total_lines(), 0);
    assert!(!game.is_paused());
    assert!(!game.is_game_over());
    assert!(!game.is_quit());
    assert_eq!(game.size(), (20, 10));
    assert_eq!(game.seed(), 1);
    // The active piece is already on the board, the preview is not
    assert_eq!(stamped_cells(&game), 4);
}

#[test]
fn test_large_board_plays_normally() {
    let mut game = Game::with_seed(10_000, 10, 5).unwrap();

    game.step();
    game.step();

    assert!(!game.is_game_over());
    assert_eq!(game.active_piece().row, 2);
    assert_eq!(stamped_cells(&game), 4);
}

#[test]
fn test_board_beyond_coordinate_range_is_rejected() {
    assert!(Game::with_seed(40_000, 10, 5).is_err());
}

#[test]
fn test_same_seed_replays_the_same_game() {
    let mut a = Game::with_seed(20, 10, 99).unwrap();
    let mut b = Game::with_seed(20, 10, 99).unwrap();

    for turn in 0..30 {
        a.rotate();
        b.rotate();
        if turn % 3 == 0 {
            a.move_left();
            b.move_left();
        }
        a.hard_drop();
        b.hard_drop();
        assert_eq!(a.snapshot(), b.snapshot(), "turn {}", turn);
    }
}

#[test]
fn test_soft_drop_scores_gravity_does_not() {
    let mut game = Game::with_seed(20, 10, 1).unwrap();

    game.step();
    assert_eq!(game.score(), 0);

    assert!(game.move_down());
    assert_eq!(game.score(), 1);
}

#[test]
fn test_hard_drop_locks_and_respawns_at_the_top() {
    let mut game = Game::with_seed(20, 10, 1).unwrap();
    let first = game.active_piece().kind;
    let preview = game.next_piece().kind;

    assert!(game.hard_drop());

    // Locked footprint plus the already-falling promoted piece
    assert_eq!(stamped_cells(&game), 8);
    assert_eq!(game.active_piece().kind, preview);
    assert_eq!(game.active_piece().row, 0);
    // The locked piece rests somewhere in the bottom rows
    let snapshot = game.snapshot();
    let bottom: usize = (0..snapshot.cols)
        .filter(|&col| snapshot.cell(snapshot.rows - 1, col) == first.tag())
        .count();
    assert!(bottom > 0);
}

#[test]
fn test_preview_feeds_the_next_spawn() {
    let mut game = Game::with_seed(20, 10, 7).unwrap();
    for _ in 0..10 {
        let preview = game.next_piece().kind;
        game.hard_drop();
        assert_eq!(game.active_piece().kind, preview);
    }
}

#[test]
fn test_pause_freezes_the_simulation() {
    let mut game = Game::with_seed(20, 10, 1).unwrap();
    game.toggle_pause();
    let before = game.snapshot();

    game.step();
    assert!(!game.move_left());
    assert!(!game.move_down());
    assert!(!game.rotate());
    assert!(!game.hard_drop());
    assert_eq!(game.snapshot(), before);

    game.toggle_pause();
    assert!(game.move_down());
}

#[test]
fn test_top_out_sets_game_over_and_freezes() {
    let mut game = Game::with_seed(4, 4, 3).unwrap();
    play_to_top_out(&mut game);

    let before = game.snapshot();
    game.step();
    assert!(!game.move_down());
    assert!(!game.hard_drop());
    game.toggle_pause();
    assert!(!game.is_paused());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_reset_recovers_from_top_out() {
    let mut game = Game::with_seed(4, 4, 3).unwrap();
    play_to_top_out(&mut game);

    game.reset();

    assert!(!game.is_game_over());
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 0);
    assert_eq!(game.total_lines(), 0);
    assert_eq!(stamped_cells(&game), 4);
    assert!(game.move_down());
}

#[test]
fn test_counters_never_decrease_within_a_game() {
    let mut game = Game::with_seed(8, 8, 11).unwrap();
    let mut score = 0;
    let mut lines = 0;
    let mut level = 0;

    for _ in 0..100 {
        if game.is_game_over() {
            break;
        }
        game.rotate();
        game.move_down();
        game.hard_drop();

        assert!(game.score() >= score);
        assert!(game.total_lines() >= lines);
        assert!(game.level() >= level);
        score = game.score();
        lines = game.total_lines();
        level = game.level();
    }
}

#[test]
fn test_quit_is_terminal_even_for_reset() {
    let mut game = Game::with_seed(20, 10, 1).unwrap();
    game.move_down();
    game.request_quit();

    let before = game.snapshot();
    game.reset();
    game.step();
    game.toggle_pause();
    assert!(!game.move_down());
    assert_eq!(game.snapshot(), before);
    assert!(game.is_quit());
}

#[test]
fn test_rotation_near_the_wall_is_kicked_or_rejected_cleanly() {
    // Whatever the piece, pushing it into a wall and rotating must leave a
    // valid board: exactly one active footprint, fully inside
    for seed in [1, 2, 3, 4, 5] {
        let mut game = Game::with_seed(20, 10, seed).unwrap();
        for _ in 0..4 {
            while game.move_left() {}
            game.rotate();
            assert_eq!(stamped_cells(&game), 4, "seed {}", seed);
            while game.move_right() {}
            game.rotate();
            assert_eq!(stamped_cells(&game), 4, "seed {}", seed);
        }
    }
}
