//! Core types shared across the application.
//!
//! Plain data only: every layer (core, engine, input, term) speaks these
//! types without depending on each other.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Rows at the top of the board that count as the spawn buffer for the
/// passive topout warning. Spawn validity stays the authoritative rule.
pub const SPAWN_BUFFER_ROWS: u8 = 4;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const BASE_DROP_MS: u32 = 1000;
pub const MIN_DROP_MS: u32 = 100;
/// Per-level geometric speed-up factor for the gravity interval.
pub const DROP_RATE: f64 = 0.85;

/// DAS/ARR timing (milliseconds)
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;
pub const SOFT_DROP_DAS_MS: u32 = 0;
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Points per simultaneously cleared line count, indexed by count.
pub const CLEAR_SCORES: [u32; 5] = [0, 100, 300, 500, 800];
pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;
pub const LINES_PER_LEVEL: u32 = 10;

/// Length of the visible next-piece preview.
pub const NEXT_PREVIEW: usize = 5;

/// Errors from constructing pieces out of external tags.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error("unknown piece type `{0}`")]
    InvalidPieceType(String),
    #[error("color id {0} is outside 1..=7")]
    InvalidColorId(u8),
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in color-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// The non-zero color id this kind writes into board cells (1..=7).
    pub fn color_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`color_id`](Self::color_id). Id 0 is the empty cell and is
    /// rejected here along with anything above 7.
    pub fn from_color_id(id: u8) -> Result<Self, PieceError> {
        match id {
            1 => Ok(PieceKind::I),
            2 => Ok(PieceKind::O),
            3 => Ok(PieceKind::T),
            4 => Ok(PieceKind::S),
            5 => Ok(PieceKind::Z),
            6 => Ok(PieceKind::J),
            7 => Ok(PieceKind::L),
            other => Err(PieceError::InvalidColorId(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

impl std::str::FromStr for PieceKind {
    type Err = PieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" => Ok(PieceKind::I),
            "o" => Ok(PieceKind::O),
            "t" => Ok(PieceKind::T),
            "s" => Ok(PieceKind::S),
            "z" => Ok(PieceKind::Z),
            "j" => Ok(PieceKind::J),
            "l" => Ok(PieceKind::L),
            other => Err(PieceError::InvalidPieceType(other.to_string())),
        }
    }
}

/// Rotation states (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation index 0..=3, North first.
    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }
}

/// Player commands applied to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Resume,
    Restart,
}

/// Lifecycle of one game session.
///
/// The enum replaces the running/paused/game-over flag triple: game over
/// cannot coexist with running, and paused implies a started game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn is_running(self) -> bool {
        self == GameStatus::Running
    }

    pub fn is_paused(self) -> bool {
        self == GameStatus::Paused
    }

    pub fn is_game_over(self) -> bool {
        self == GameStatus::GameOver
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Ok(kind));
        }
    }

    #[test]
    fn color_id_zero_is_rejected() {
        assert_eq!(
            PieceKind::from_color_id(0),
            Err(PieceError::InvalidColorId(0))
        );
        assert_eq!(
            PieceKind::from_color_id(8),
            Err(PieceError::InvalidColorId(8))
        );
    }

    #[test]
    fn piece_kind_parses_known_tags() {
        assert_eq!("t".parse::<PieceKind>(), Ok(PieceKind::T));
        assert_eq!("Z".parse::<PieceKind>(), Ok(PieceKind::Z));
        assert_eq!(
            "q".parse::<PieceKind>(),
            Err(PieceError::InvalidPieceType("q".to_string()))
        );
    }

    #[test]
    fn rotation_cw_cycles_through_all_states() {
        let mut r = Rotation::North;
        for expected in [1, 2, 3, 0] {
            r = r.rotate_cw();
            assert_eq!(r.index(), expected);
        }
    }

    #[test]
    fn rotation_ccw_is_inverse_of_cw() {
        for r in [
            Rotation::North,
            Rotation::East,
            Rotation::South,
            Rotation::West,
        ] {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }
}
