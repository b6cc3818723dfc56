//! Engine module - drives gravity, applies player commands, and owns the
//! run/pause/game-over lifecycle.
//!
//! The engine is the single mutator of the board, the progress counters,
//! and the active piece. It is fed by exactly two call paths: the host's
//! fixed-cadence [`tick`](Engine::tick) and synchronous
//! [`apply`](Engine::apply) calls for player commands. Gameplay commands
//! are silent no-ops outside the Running state; blocked moves and
//! rotations simply leave the piece where it was.

use log::{debug, warn};

use crate::core::board::Board;
use crate::core::pieces::{self, Tetromino};
use crate::core::progress::GameState;
use crate::core::rng::PieceQueue;
use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameStatus, PieceKind, NEXT_PREVIEW};

#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    progress: GameState,
    queue: PieceQueue,
    active: Option<Tetromino>,
    next_queue: [PieceKind; NEXT_PREVIEW],
    hold: Option<PieceKind>,
    can_hold: bool,
    /// Elapsed milliseconds accumulated toward the next gravity step.
    /// Cleared on spawn, pause, game over, and reset so no stale partial
    /// interval leaks across state changes.
    gravity_acc_ms: u32,
}

impl Engine {
    pub fn new(seed: u32) -> Self {
        let queue = PieceQueue::new(seed);
        let next_queue = queue.preview();
        Self {
            board: Board::new(),
            progress: GameState::new(),
            queue,
            active: None,
            next_queue,
            hold: None,
            can_hold: true,
            gravity_acc_ms: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn progress(&self) -> &GameState {
        &self.progress
    }

    pub fn status(&self) -> GameStatus {
        self.progress.status()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next_queue(&self) -> &[PieceKind; NEXT_PREVIEW] {
        &self.next_queue
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Begin a session: spawn the first piece and start gravity.
    ///
    /// Valid from Idle only. If the very first spawn position is already
    /// blocked the session goes straight to GameOver (block-out).
    pub fn start(&mut self) {
        if !self.progress.start() {
            return;
        }
        self.spawn_next();
    }

    /// Abandon the current session and start a fresh one. The new piece
    /// sequence is reseeded from the RNG state so repeated restarts do not
    /// replay the same game.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Return to Idle with an empty board and zeroed counters.
    pub fn reset(&mut self) {
        let reseed = self.queue.state();
        self.board.clear();
        self.progress.reset();
        self.queue = PieceQueue::new(reseed);
        self.next_queue = self.queue.preview();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.gravity_acc_ms = 0;
    }

    /// Advance game time. Fires one gravity step per elapsed drop interval;
    /// returns true when at least one step (descent or lock) happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.progress.is_running() || self.active.is_none() {
            return false;
        }

        self.gravity_acc_ms += elapsed_ms;

        let mut advanced = false;
        while self.progress.is_running() && self.active.is_some() {
            let interval = self.progress.drop_interval_ms();
            if self.gravity_acc_ms < interval {
                break;
            }
            self.gravity_acc_ms -= interval;
            self.advance_gravity();
            advanced = true;
        }
        advanced
    }

    /// One forced descent: move the active piece down a row, or lock it
    /// where it rests.
    fn advance_gravity(&mut self) {
        if !self.try_shift(0, 1) {
            self.lock_active();
        }
    }

    /// Apply a player command. Returns whether it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => {
                self.restart();
                true
            }
            _ if !self.progress.is_running() => false,
            Command::MoveLeft => self.try_shift(-1, 0),
            Command::MoveRight => self.try_shift(1, 0),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.try_rotate(true),
            Command::RotateCcw => self.try_rotate(false),
            Command::Hold => self.hold_active(),
        }
    }

    /// Running -> Paused. Also clears the gravity accumulator so pausing
    /// releases the pending partial interval.
    pub fn pause(&mut self) -> bool {
        if self.progress.pause() {
            self.gravity_acc_ms = 0;
            true
        } else {
            false
        }
    }

    /// Paused -> Running.
    pub fn resume(&mut self) -> bool {
        self.progress.resume()
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.translated(dx, dy);
        if moved.is_valid_on(&self.board) {
            self.active = Some(moved);
            true
        } else {
            false
        }
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let board = &self.board;
        match pieces::try_rotate(active, clockwise, |x, y| board.is_valid(x, y)) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Manual one-row descent worth one point. The gravity accumulator is
    /// cleared so the player-driven step replaces the next forced one.
    fn soft_drop(&mut self) -> bool {
        if self.try_shift(0, 1) {
            self.progress.add_drop_points(1, false);
            self.gravity_acc_ms = 0;
            true
        } else {
            false
        }
    }

    /// Descend until blocked (+2 points per row) and lock immediately.
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let distance = active.drop_distance(&self.board);
        if distance > 0 {
            self.active = Some(active.translated(0, distance));
            self.progress.add_drop_points(distance as u32, true);
        }
        self.lock_active();
        true
    }

    /// Swap the active piece with the hold slot, once per spawned piece.
    fn hold_active(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let swapped = match self.hold.replace(active.kind) {
            Some(kind) => Tetromino::new(kind),
            None => {
                let kind = self.queue.draw();
                self.next_queue = self.queue.preview();
                Tetromino::new(kind)
            }
        };

        if !swapped.is_valid_on(&self.board) {
            // Spawn position blocked: same terminal rule as a failed spawn.
            self.active = None;
            self.gravity_acc_ms = 0;
            self.progress.finish();
            return false;
        }

        self.active = Some(swapped);
        self.can_hold = false;
        self.gravity_acc_ms = 0;
        true
    }

    /// Write the active piece into the grid, clear completed rows, award
    /// score, and spawn the next piece.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        if !self.board.place(&active.shape(), active.x, active.y, active.kind) {
            // Locking from an invalid position is a precondition violation
            // upstream; keep the session alive and let spawn validity decide.
            warn!(
                "lock at invalid position ({}, {}) for {:?}",
                active.x, active.y, active.kind
            );
        }

        let rows = self.board.full_rows();
        if !rows.is_empty() {
            self.board.clear_rows(&rows);
            if self.progress.apply_clear(rows.len()) {
                debug!("level up to {}", self.progress.level());
            }
        }

        self.spawn_next();
    }

    /// Draw and place the next piece. A blocked spawn position is the
    /// authoritative game-over condition.
    fn spawn_next(&mut self) -> bool {
        let piece = Tetromino::new(self.queue.draw());
        self.next_queue = self.queue.preview();
        self.gravity_acc_ms = 0;

        if !piece.is_valid_on(&self.board) {
            self.active = None;
            self.progress.finish();
            debug!("spawn blocked; game over");
            return false;
        }

        self.active = Some(piece);
        self.can_hold = true;
        true
    }

    /// Row the active piece would rest on if hard-dropped now.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + active.drop_distance(&self.board))
    }

    /// Fill a caller-owned snapshot, avoiding per-frame allocation.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.next_queue = self.next_queue;
        out.can_hold = self.can_hold;
        out.status = self.progress.status();
        out.topout_warning = self.board.is_topout_state();
        out.seed = self.queue.seed();
        out.score = self.progress.score();
        out.level = self.progress.level();
        out.lines = self.progress.lines();
        out.drop_interval_ms = self.progress.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}
