//! Input module - maps terminal key events to engine commands.
//!
//! Discrete presses (rotate, drop, hold, pause) are mapped here; held-key
//! auto-repeat for movement and soft drop lives in [`handler::InputHandler`].

pub mod handler;

pub use handler::InputHandler;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Command;

/// Map a discrete key press to a command.
///
/// `paused` decides whether the pause key requests Pause or Resume; the
/// engine enforces which of the two is actually legal.
pub fn map_key(key: KeyEvent, paused: bool) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(if paused {
            Command::Resume
        } else {
            Command::Pause
        }),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

/// Whether this key press ends the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
