//! Engine integration tests: full sessions driven through the public API.

use tui_blocks::engine::Engine;
use tui_blocks::types::{Command, GameStatus};

fn running_engine(seed: u32) -> Engine {
    let mut engine = Engine::new(seed);
    engine.start();
    assert_eq!(engine.status(), GameStatus::Running);
    engine
}

/// Hard-drop until the stack tops out. Bounded so a regression cannot hang
/// the suite.
fn play_until_game_over(engine: &mut Engine) {
    for _ in 0..1000 {
        if engine.status().is_game_over() {
            return;
        }
        engine.apply(Command::HardDrop);
    }
    panic!("game did not top out after 1000 hard drops");
}

#[test]
fn session_lifecycle_start_pause_resume() {
    let mut engine = Engine::new(11);
    assert_eq!(engine.status(), GameStatus::Idle);

    engine.start();
    assert_eq!(engine.status(), GameStatus::Running);
    assert!(engine.active().is_some());

    assert!(engine.apply(Command::Pause));
    assert_eq!(engine.status(), GameStatus::Paused);

    assert!(engine.apply(Command::Resume));
    assert_eq!(engine.status(), GameStatus::Running);
}

#[test]
fn gameplay_commands_are_ignored_before_start() {
    let mut engine = Engine::new(11);
    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Hold,
    ] {
        assert!(!engine.apply(command));
    }
    assert_eq!(engine.status(), GameStatus::Idle);
    assert_eq!(engine.board().filled_cells(), 0);
}

#[test]
fn paused_game_ignores_gameplay_and_time() {
    let mut engine = running_engine(11);
    engine.apply(Command::Pause);

    let before = engine.snapshot();
    assert!(!engine.tick(10_000));
    engine.apply(Command::MoveLeft);
    engine.apply(Command::HardDrop);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn gravity_eventually_locks_a_piece() {
    let mut engine = running_engine(11);

    // A minute of game time far exceeds one trip down the board.
    for _ in 0..(60_000 / 16) {
        engine.tick(16);
    }
    assert!(
        engine.board().filled_cells() >= 4,
        "no piece locked under gravity"
    );
}

#[test]
fn hard_drops_fill_the_board_and_top_out() {
    let mut engine = running_engine(11);
    play_until_game_over(&mut engine);

    assert!(engine.status().is_game_over());
    assert!(engine.active().is_none());

    // The terminal state is frozen: neither time nor commands mutate it.
    let frozen = engine.snapshot();
    assert!(!engine.tick(60_000));
    for command in [
        Command::MoveLeft,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::Hold,
        Command::Pause,
        Command::Resume,
    ] {
        assert!(!engine.apply(command));
    }
    assert_eq!(engine.snapshot(), frozen);
}

#[test]
fn restart_leaves_game_over_and_starts_fresh() {
    let mut engine = running_engine(11);
    play_until_game_over(&mut engine);

    assert!(engine.apply(Command::Restart));
    assert_eq!(engine.status(), GameStatus::Running);
    assert_eq!(engine.progress().score(), 0);
    assert_eq!(engine.progress().lines(), 0);
    assert_eq!(engine.progress().level(), 1);
    assert_eq!(engine.board().filled_cells(), 0);
    assert!(engine.active().is_some());
}

#[test]
fn drop_commands_award_points() {
    let mut engine = running_engine(11);

    assert!(engine.apply(Command::SoftDrop));
    assert_eq!(engine.progress().score(), 1);

    let distance = engine
        .active()
        .unwrap()
        .drop_distance(engine.board()) as u32;
    engine.apply(Command::HardDrop);
    assert_eq!(engine.progress().score(), 1 + distance * 2);
}

#[test]
fn hold_stores_and_swaps_pieces() {
    let mut engine = running_engine(17);
    let first = engine.active().unwrap().kind;

    assert!(engine.apply(Command::Hold));
    assert_eq!(engine.hold_piece(), Some(first));
    assert!(!engine.apply(Command::Hold), "hold must be once per piece");

    engine.apply(Command::HardDrop);
    if engine.status().is_running() {
        assert!(engine.apply(Command::Hold));
        assert_eq!(engine.active().unwrap().kind, first);
    }
}

#[test]
fn identical_seeds_replay_identical_sessions() {
    let mut a = running_engine(99);
    let mut b = running_engine(99);

    for step in 0..300 {
        let command = match step % 5 {
            0 => Command::MoveLeft,
            1 => Command::RotateCw,
            2 => Command::MoveRight,
            3 => Command::SoftDrop,
            _ => Command::HardDrop,
        };
        a.apply(command);
        b.apply(command);
        a.tick(16);
        b.tick(16);
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at step {step}");
    }
}

#[test]
fn snapshot_exposes_the_display_surface() {
    let engine = running_engine(5);
    let snapshot = engine.snapshot();

    assert!(snapshot.playable());
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.lines, 0);
    assert_eq!(snapshot.seed, 5);
    assert!(snapshot.active.is_some());
    assert!(snapshot.ghost_y.is_some());
    assert!(snapshot.can_hold);
    assert!(!snapshot.topout_warning);
    assert_eq!(snapshot.drop_interval_ms, 1000);

    // The active piece is not part of the locked grid.
    let filled: usize = snapshot
        .board
        .iter()
        .flatten()
        .filter(|&&cell| cell != 0)
        .count();
    assert_eq!(filled, 0);
}
