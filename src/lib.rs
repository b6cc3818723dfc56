//! Terminal Tetris with a pure, deterministic game core.
//!
//! The crate is layered so that game rules never touch I/O:
//!
//! - [`core`] holds the board, pieces, randomizer, and scoring rules.
//! - [`engine`] is the single mutator: it drives gravity, applies player
//!   commands, and owns the run/pause/game-over lifecycle.
//! - [`input`] and [`term`] are host collaborators: they translate key
//!   events into commands and engine snapshots into terminal cells.

pub mod core;
pub mod engine;
pub mod input;
pub mod term;
pub mod types;
