//! Tetris integration tests: line clears, scoring, levels and game over.

use std::time::Duration;

use arcade_cores::core::{ArcadeConfig, ArcadeError, Command, GameId, GameRng, Pos, SessionState, TetrisConfig};
use arcade_cores::games::tetris::{Color, PieceKind, TetrisGame, LINE_SCORES};
use arcade_cores::rules::{Engine, Transition};
use arcade_cores::scores::{MemoryScoreStore, ScoreStore};

fn started(store: &MemoryScoreStore) -> TetrisGame {
    let mut game = TetrisGame::new(TetrisConfig::default(), GameRng::new(42), store).unwrap();
    game.start();
    game
}

/// Fill columns 0-8 of each row, leaving column 9 open.
fn fill_rows_but_last_column(game: &mut TetrisGame, rows: std::ops::RangeInclusive<i32>) {
    for y in rows {
        for x in 0..9 {
            game.set_cell(Pos::new(x, y), Some(Color::Blue)).unwrap();
        }
    }
}

/// Stand an I piece up and hard drop it down column 9.
fn drop_i_in_last_column(game: &mut TetrisGame, store: &mut MemoryScoreStore) -> Transition {
    game.set_active(PieceKind::I, Pos::new(6, 0)).unwrap();
    assert_eq!(game.rotate(), Transition::Applied);
    for _ in 0..3 {
        assert_eq!(game.shift(1), Transition::Applied);
    }
    assert_eq!(game.active().unwrap().origin, Pos::new(9, 0));
    game.apply_command(Command::HardDrop, store)
}

// =============================================================================
// Line Clears and Scoring
// =============================================================================

#[test]
fn test_bottom_row_completion_clears_one_line() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);
    fill_rows_but_last_column(&mut game, 19..=19);

    assert_eq!(drop_i_in_last_column(&mut game, &mut store), Transition::Applied);

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.board().width(), 10);
    assert_eq!(game.board().height(), 20);
    // Three cells of the I remain, shifted down one row
    let filled: Vec<_> = game
        .board()
        .iter()
        .filter(|(_, c)| c.is_some())
        .map(|(p, _)| p)
        .collect();
    assert_eq!(filled, vec![Pos::new(9, 17), Pos::new(9, 18), Pos::new(9, 19)]);
}

#[test]
fn test_four_lines_at_once() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);
    fill_rows_but_last_column(&mut game, 16..=19);

    drop_i_in_last_column(&mut game, &mut store);

    assert_eq!(game.lines(), 4);
    assert_eq!(game.score(), LINE_SCORES[4]);
    assert_eq!(game.last_lock().unwrap().lines_cleared, 4);
    assert!(game.board().iter().all(|(_, c)| c.is_none()));
}

#[test]
fn test_three_lines_at_once() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);
    fill_rows_but_last_column(&mut game, 17..=19);

    drop_i_in_last_column(&mut game, &mut store);

    assert_eq!(game.lines(), 3);
    assert_eq!(game.score(), LINE_SCORES[3]);
    assert_eq!(game.score(), 500);
    // The top cell of the I falls to the floor
    let filled: Vec<_> = game
        .board()
        .iter()
        .filter(|(_, c)| c.is_some())
        .map(|(p, _)| p)
        .collect();
    assert_eq!(filled, vec![Pos::new(9, 19)]);
}

#[test]
fn test_lock_without_clear_scores_nothing() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);
    game.set_active(PieceKind::T, Pos::new(0, 0)).unwrap();

    game.hard_drop(&mut store);

    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    let report = game.last_lock().unwrap();
    assert_eq!((report.lines_cleared, report.points), (0, 0));
}

// =============================================================================
// Levels
// =============================================================================

#[test]
fn test_level_up_after_ten_lines() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);

    for _ in 0..3 {
        fill_rows_but_last_column(&mut game, 16..=19);
        drop_i_in_last_column(&mut game, &mut store);
    }

    assert_eq!(game.lines(), 12);
    assert_eq!(game.level(), 2);
    assert_eq!(game.score(), 3 * 800);
    assert!(game.last_lock().unwrap().leveled_up);
    assert_eq!(game.timer_interval(), Some(Duration::from_millis(900)));

    // Points now scale by level 2
    fill_rows_but_last_column(&mut game, 18..=19);
    drop_i_in_last_column(&mut game, &mut store);

    assert_eq!(game.lines(), 14);
    assert_eq!(game.score(), 3 * 800 + 300 * 2);
    assert!(!game.last_lock().unwrap().leveled_up);
}

#[test]
fn test_zero_lines_per_level_rejected() {
    let store = MemoryScoreStore::new();
    let config = TetrisConfig { lines_per_level: 0, ..TetrisConfig::default() };

    assert!(matches!(config.validate(), Err(ArcadeError::InvalidConfig(_))));
    assert!(matches!(
        TetrisGame::new(config.clone(), GameRng::new(1), &store),
        Err(ArcadeError::InvalidConfig(_))
    ));

    let mut arcade = ArcadeConfig::default();
    arcade.tetris = config;
    assert!(TetrisGame::from_config(&arcade, &store).is_err());
}

// =============================================================================
// Game Over
// =============================================================================

#[test]
fn test_spawn_collision_ends_game_and_keeps_high_score() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);
    fill_rows_but_last_column(&mut game, 19..=19);
    drop_i_in_last_column(&mut game, &mut store);
    assert_eq!(store.get(GameId::Tetris), 100);

    // Park the falling piece away from the spawn area and block it
    game.set_active(PieceKind::O, Pos::new(0, 10)).unwrap();
    for x in 3..=6 {
        game.set_cell(Pos::new(x, 0), Some(Color::Red)).unwrap();
    }

    assert_eq!(game.hard_drop(&mut store), Transition::GameOver);

    assert_eq!(game.state(), SessionState::GameOver);
    assert!(game.active().is_none());
    assert_eq!(game.timer_interval(), None);
    assert_eq!(game.session().high_score(), 100);
    assert!(game.session().is_new_high_score());
    assert_eq!(store.get(GameId::Tetris), 100);
    assert_eq!(game.apply_command(Command::MoveLeft, &mut store), Transition::Rejected);
}

#[test]
fn test_restart_matches_first_launch() {
    let mut store = MemoryScoreStore::new();
    let mut game = started(&store);
    fill_rows_but_last_column(&mut game, 16..=19);
    drop_i_in_last_column(&mut game, &mut store);
    game.set_cell(Pos::new(0, 19), Some(Color::Green)).unwrap();

    game.apply_command(Command::Cancel, &mut store);
    assert_eq!(game.state(), SessionState::Menu);
    assert_eq!(game.apply_command(Command::Confirm, &mut store), Transition::Applied);

    assert_eq!(game.state(), SessionState::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 1);
    assert!(game.board().iter().all(|(_, c)| c.is_none()));
    assert_eq!(game.active().unwrap().origin, Pos::new(3, 0));
    assert_eq!(game.session().high_score(), 800);
}

// =============================================================================
// Snapshots and Determinism
// =============================================================================

#[test]
fn test_board_with_active_draws_piece() {
    let store = MemoryScoreStore::new();
    let mut game = started(&store);
    game.set_active(PieceKind::O, Pos::new(4, 4)).unwrap();

    let board = game.board_with_active();

    assert_eq!(board.get(Pos::new(4, 4)), Some(&Some(Color::Yellow)));
    assert_eq!(board.get(Pos::new(5, 5)), Some(&Some(Color::Yellow)));
    assert_eq!(board.iter().filter(|(_, c)| c.is_some()).count(), 4);
    assert!(game.board().iter().all(|(_, c)| c.is_none()));
}

#[test]
fn test_same_seed_same_pieces() {
    let config = ArcadeConfig::default().with_seed(9);
    let mut store = MemoryScoreStore::new();
    let mut a = TetrisGame::from_config(&config, &store).unwrap();
    let mut b = TetrisGame::from_config(&config, &store).unwrap();
    a.start();
    b.start();

    for _ in 0..10 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        assert_eq!(a.next(), b.next());
        a.hard_drop(&mut store);
        b.hard_drop(&mut store);
    }
}

#[test]
fn test_with_command_leaves_original() {
    let mut store = MemoryScoreStore::new();
    let game = started(&store);
    let origin = game.active().unwrap().origin;

    let (moved, transition) = game.with_command(Command::MoveLeft, &mut store);

    assert_eq!(transition, Transition::Applied);
    assert_eq!(moved.active().unwrap().origin, Pos::new(origin.x - 1, origin.y));
    assert_eq!(game.active().unwrap().origin, origin);
}
