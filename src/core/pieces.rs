//! Pieces module - tetromino shapes, rotation, and the kick fallback.
//!
//! Every kind has 4 precomputed rotation states of 4 mino offsets each, so a
//! piece's mass is rotation-invariant by construction. Rotation itself never
//! checks collisions; [`try_rotate`] layers the horizontal kick sequence on
//! top and reverts entirely when no offset fits.

use crate::core::board::Board;
use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece origin.
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece origin.
pub type PieceShape = [MinoOffset; 4];

/// Spawn position for new pieces (x, y): centered at the top of the board.
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Horizontal offsets tried, in order, to salvage a blocked rotation.
pub const KICK_SEQUENCE: [MinoOffset; 5] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)];

const I_SHAPES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

// O occupies the same cells in all four rotation states.
const O_SHAPES: [PieceShape; 4] = [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// The mino offsets for a piece kind in a given rotation state.
pub fn shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let table = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    };
    table[rotation.index() as usize]
}

/// An active falling piece: kind plus rotation state and board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// A new piece of `kind` at the spawn position, spawn orientation.
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Mino offsets for the current rotation state.
    pub fn shape(&self) -> PieceShape {
        shape(self.kind, self.rotation)
    }

    /// Copy shifted by (dx, dy). No collision checking.
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy advanced one rotation state clockwise. No collision checking.
    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    /// Copy advanced one rotation state counter-clockwise. No collision
    /// checking.
    pub fn rotated_ccw(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_ccw(),
            ..*self
        }
    }

    /// Whether every mino rests on an in-bounds empty cell of `board`.
    pub fn is_valid_on(&self, board: &Board) -> bool {
        board.is_valid_position(&self.shape(), self.x, self.y)
    }

    /// Whether something (floor or filled cell) is directly below any mino.
    pub fn is_grounded(&self, board: &Board) -> bool {
        !board.is_valid_position(&self.shape(), self.x, self.y + 1)
    }

    /// Rows this piece can still fall before resting.
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance: i8 = 0;
        while board.is_valid_position(&self.shape(), self.x, self.y + distance + 1) {
            distance += 1;
        }
        distance
    }
}

/// Rotate a piece, walking the kick sequence to salvage a blocked rotation.
///
/// Returns the rotated (and possibly shifted) piece, or None when every kick
/// offset collides; the caller keeps the original piece in that case.
pub fn try_rotate(
    piece: Tetromino,
    clockwise: bool,
    is_valid: impl Fn(i8, i8) -> bool,
) -> Option<Tetromino> {
    let rotated = if clockwise {
        piece.rotated_cw()
    } else {
        piece.rotated_ccw()
    };
    let shape = rotated.shape();

    for &(kick_dx, kick_dy) in KICK_SEQUENCE.iter() {
        let candidate = rotated.translated(kick_dx, kick_dy);
        let fits = shape
            .iter()
            .all(|&(mx, my)| is_valid(candidate.x + mx, candidate.y + my));
        if fits {
            return Some(candidate);
        }
    }

    None
}
