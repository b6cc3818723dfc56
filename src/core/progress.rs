//! Progress module - score, level, and line bookkeeping plus the session
//! lifecycle state machine.
//!
//! This is pure bookkeeping: the engine decides *when* something happened,
//! this type records it and answers derived questions (current drop
//! interval, whether a transition is legal).

use log::debug;

use crate::core::scoring;
use crate::types::GameStatus;

/// Score/level/line counters and the session status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    score: u32,
    level: u32,
    lines: u32,
    status: GameStatus,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            status: GameStatus::Idle,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.status.is_paused()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Idle -> Running. Any other source state is ignored.
    pub fn start(&mut self) -> bool {
        self.transition(GameStatus::Idle, GameStatus::Running)
    }

    /// Running -> Paused.
    pub fn pause(&mut self) -> bool {
        self.transition(GameStatus::Running, GameStatus::Paused)
    }

    /// Paused -> Running.
    pub fn resume(&mut self) -> bool {
        self.transition(GameStatus::Paused, GameStatus::Running)
    }

    /// Running -> GameOver. Terminal: only [`reset`](Self::reset) leaves it.
    pub fn finish(&mut self) -> bool {
        self.transition(GameStatus::Running, GameStatus::GameOver)
    }

    fn transition(&mut self, from: GameStatus, to: GameStatus) -> bool {
        if self.status != from {
            return false;
        }
        debug!("game status {from:?} -> {to:?}");
        self.status = to;
        true
    }

    /// Zero the counters and return to Idle, from any state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Points a clear of `lines` rows is worth at the current level.
    pub fn score_for_clear(&self, lines: usize) -> u32 {
        scoring::clear_points(lines, self.level)
    }

    /// Record a clear: award points at the pre-clear level, then advance the
    /// line count and recompute the level. Returns true when the level rose.
    pub fn apply_clear(&mut self, lines: usize) -> bool {
        self.score += self.score_for_clear(lines);
        self.add_lines(lines as u32)
    }

    /// Advance the cumulative line count and recompute the level. Returns
    /// true when the level increased.
    pub fn add_lines(&mut self, lines: u32) -> bool {
        self.lines += lines;
        let level = scoring::level_for_lines(self.lines);
        let increased = level > self.level;
        self.level = level;
        increased
    }

    /// Award manual-descent points (+1/cell soft, +2/cell hard).
    pub fn add_drop_points(&mut self, cells: u32, hard: bool) {
        self.score += scoring::drop_points(cells, hard);
    }

    /// Gravity interval derived from the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        scoring::drop_interval_ms(self.level)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
