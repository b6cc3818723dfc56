//! Core module - pure game logic with no external dependencies on UI or I/O.

pub mod board;
pub mod pieces;
pub mod progress;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use pieces::{shape, try_rotate, Tetromino};
pub use progress::GameState;
pub use rng::PieceQueue;
pub use snapshot::GameSnapshot;
