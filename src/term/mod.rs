//! Terminal module - framebuffer, diff renderer, and the game view.
//!
//! Everything except [`renderer::TerminalRenderer`] is pure and
//! unit-testable without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
