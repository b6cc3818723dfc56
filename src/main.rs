//! Terminal Tetris runner (default binary).
//!
//! Fixed-cadence loop: render the latest engine snapshot, collect input
//! until the next tick, then advance game time. Logging goes through
//! env_logger and stays silent unless `RUST_LOG` is set, keeping the
//! alternate screen clean.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::core::GameSnapshot;
use tui_blocks::engine::Engine;
use tui_blocks::input::{map_key, should_quit, InputHandler};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blocks::types::TICK_MS;

fn main() -> Result<()> {
    env_logger::init();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u32)
        .unwrap_or(1);

    let mut engine = Engine::new(seed);
    engine.start();

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        engine.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        // Movement keys go through the DAS/ARR handler,
                        // everything else maps directly.
                        if let Some(command) = input.handle_key_press(key.code) {
                            engine.apply(command);
                        }
                        if let Some(command) = map_key(key, engine.status().is_paused()) {
                            engine.apply(command);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; DAS/ARR covers it.
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            for command in input.update(TICK_MS) {
                engine.apply(command);
            }
            engine.tick(TICK_MS);
        }
    }
}
