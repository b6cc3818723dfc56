//! Read-only view of the engine state for display and external observers.
//!
//! The snapshot is the only surface the render/input layers consume; they
//! never reach into the engine's internals. Serde derives let observers
//! consume the same data as JSON.

use serde::{Deserialize, Serialize};

use crate::core::pieces::Tetromino;
use crate::types::{GameStatus, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Color-id grid: 0 = empty, 1..=7 = piece kind.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would rest on if dropped now.
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next_queue: [PieceKind; NEXT_PREVIEW],
    pub can_hold: bool,
    pub status: GameStatus,
    /// Passive early warning: filled cells inside the spawn buffer.
    pub topout_warning: bool,
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status.is_running()
    }

    pub fn paused(&self) -> bool {
        self.status.is_paused()
    }

    pub fn game_over(&self) -> bool {
        self.status.is_game_over()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next_queue: [PieceKind::I; NEXT_PREVIEW],
            can_hold: true,
            status: GameStatus::Idle,
            topout_warning: false,
            seed: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
