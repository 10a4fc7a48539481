//! Property tests: invariants that must hold after any sequence of commands
//! and timer steps.

use proptest::prelude::*;

use arcade_cores::core::{CheckersConfig, Command, GameId, GameRng, Pos, SnakeConfig, TetrisConfig};
use arcade_cores::games::checkers::{
    count_pieces, piece_moves, CheckersGame, EndReason, Move, Side, Square,
};
use arcade_cores::games::snake::SnakeGame;
use arcade_cores::games::tetris::TetrisGame;
use arcade_cores::rules::{Engine, Transition};
use arcade_cores::scores::{MemoryScoreStore, ScoreStore};

#[derive(Clone, Copy, Debug)]
enum Op {
    Command(Command),
    Tick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Tick),
        4 => prop::sample::select(Command::ALL.to_vec()).prop_map(Op::Command),
    ]
}

fn apply<E: Engine>(engine: &mut E, op: Op, store: &mut MemoryScoreStore) -> Transition {
    match op {
        Op::Command(command) => engine.apply_command(command, store),
        Op::Tick => engine.on_timer(store),
    }
}

// =============================================================================
// Snake
// =============================================================================

fn assert_snake_invariants(game: &SnakeGame) -> Result<(), TestCaseError> {
    let body: Vec<Pos> = game.body().iter().copied().collect();
    for (i, segment) in body.iter().enumerate() {
        prop_assert!(!body[i + 1..].contains(segment), "duplicate segment {}", segment);
    }
    if let Some(food) = game.food() {
        prop_assert!(!body.contains(&food), "food on snake at {}", food);
    }
    prop_assert_eq!(body.len() as u64, 1 + game.meals());
    prop_assert_eq!(game.score(), 10 * game.meals());
    Ok(())
}

proptest! {
    #[test]
    fn snake_body_stays_consistent(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let mut store = MemoryScoreStore::new();
        // Small board so food is eaten often
        let config = SnakeConfig::default()
            .with_board_size(6)
            .with_start(2, 2)
            .with_initial_food(3, 2);
        let mut game = SnakeGame::new(config, GameRng::new(seed), &store).unwrap();
        let mut best = 0;

        for op in ops {
            let before = game.clone();
            let transition = apply(&mut game, op, &mut store);

            if transition == Transition::Rejected {
                prop_assert_eq!(game.body(), before.body());
                prop_assert_eq!(game.velocity(), before.velocity());
                prop_assert_eq!(game.state(), before.state());
            }
            assert_snake_invariants(&game)?;

            let stored = store.get(GameId::Snake);
            prop_assert!(stored >= best);
            prop_assert!(stored >= game.score());
            best = stored;
        }
    }
}

// =============================================================================
// Tetris
// =============================================================================

fn assert_tetris_invariants(game: &TetrisGame) -> Result<(), TestCaseError> {
    let board = game.board();
    for y in 0..board.height() {
        prop_assert!(!board.row(y).all(|c| c.is_some()), "full row {} left on board", y);
    }
    if let Some(piece) = game.active() {
        prop_assert!(!game.collides(piece), "active piece overlaps at {}", piece.origin);
    }
    if let Some(report) = game.last_lock() {
        prop_assert!(report.lines_cleared <= 4);
    }
    prop_assert_eq!(game.level(), 1 + game.lines() / 10);
    Ok(())
}

proptest! {
    #[test]
    fn tetris_board_stays_consistent(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..300),
    ) {
        let mut store = MemoryScoreStore::new();
        let mut game = TetrisGame::new(TetrisConfig::default(), GameRng::new(seed), &store).unwrap();

        for op in ops {
            let score_before = game.score();
            let lines_before = game.lines();
            let was_playing = game.session().is_playing();

            let transition = apply(&mut game, op, &mut store);

            assert_tetris_invariants(&game)?;
            if was_playing && transition != Transition::Exit && game.session().is_playing() {
                prop_assert!(game.score() >= score_before);
                prop_assert!(game.lines() >= lines_before);
            }
            prop_assert!(store.get(GameId::Tetris) >= game.score());
        }
    }
}

// =============================================================================
// Checkers
// =============================================================================

/// Every move any piece of the side on turn could make, ignoring mandatory
/// capture and chains.
fn unfiltered_moves(game: &CheckersGame) -> Vec<Move> {
    game.board()
        .iter()
        .filter(|(_, cell)| cell.is_some_and(|p| p.side == game.to_move()))
        .flat_map(|(pos, _)| piece_moves(game.board(), Square::new(pos.y, pos.x)))
        .collect()
}

fn assert_checkers_invariants(game: &CheckersGame) -> Result<(), TestCaseError> {
    for side in [Side::Red, Side::Black] {
        prop_assert_eq!(game.pieces(side), count_pieces(game.board(), side));
    }
    for (pos, cell) in game.board().iter() {
        let square = Square::new(pos.y, pos.x);
        if let Some(piece) = cell {
            prop_assert!(square.is_dark(), "piece on light square {}", square);
            if !piece.king {
                prop_assert!(square.row != piece.side.promotion_row(), "uncrowned man on {}", square);
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn checkers_accepts_only_captures_when_available(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..150),
    ) {
        let store = MemoryScoreStore::new();
        let config = CheckersConfig::default().without_ai();
        let mut game = CheckersGame::new(config, GameRng::new(seed), &store).unwrap();
        game.start();

        for pick in picks {
            if game.is_game_over() {
                break;
            }
            let candidates = unfiltered_moves(&game);
            if candidates.is_empty() {
                break;
            }
            let mv = *pick.get(&candidates);
            let capture_available = game.legal_moves().iter().any(Move::is_capture);
            let mover = game.to_move();
            let opponent_before = game.pieces(mover.opponent());

            let transition = game.play(mv);

            if transition.changed() {
                if capture_available {
                    prop_assert!(mv.is_capture(), "simple move {:?} accepted over a capture", mv);
                }
                let expected = opponent_before - u32::from(mv.is_capture());
                prop_assert_eq!(game.pieces(mover.opponent()), expected);
            } else {
                prop_assert_eq!(game.pieces(mover.opponent()), opponent_before);
            }
            assert_checkers_invariants(&game)?;
        }
    }

    #[test]
    fn checkers_ai_games_stay_consistent(seed in any::<u64>()) {
        let mut store = MemoryScoreStore::new();
        let config = CheckersConfig::default().with_ai(Side::Black);
        let mut game = CheckersGame::new(config, GameRng::new(seed), &store).unwrap();
        game.start();
        let mut human = GameRng::new(seed ^ 0x5eed);

        for _ in 0..400 {
            if game.is_game_over() {
                break;
            }
            if game.is_ai_turn() {
                prop_assert!(game.timer_interval().is_some());
                prop_assert!(game.on_timer(&mut store).changed());
            } else {
                prop_assert!(game.timer_interval().is_none());
                let moves = game.legal_moves();
                let mv = moves[human.gen_range_usize(0..moves.len())];
                prop_assert!(game.play(mv).changed());
            }
            assert_checkers_invariants(&game)?;
        }

        if let Some(result) = game.result() {
            prop_assert!(game.is_game_over());
            let loser = result.winner.opponent();
            match result.reason {
                EndReason::NoPieces => prop_assert_eq!(game.pieces(loser), 0),
                EndReason::NoMoves => {
                    prop_assert_eq!(game.to_move(), loser);
                    prop_assert!(game.legal_moves().is_empty());
                }
            }
        }
    }
}
