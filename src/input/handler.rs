//! DAS/ARR input handler for terminal environments.
//!
//! Holding left/right/down repeats the movement after a delayed-auto-shift
//! window, at the auto-repeat rate. Terminals that never emit key release
//! events are handled with a timeout that auto-releases stale keys.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{
    Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
    None,
}

// Without release events a single tap must not turn into a sustained hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks held movement keys and produces repeat commands per tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Horizontal,
    down_held: bool,
    last_key_time: std::time::Instant,
    horizontal_das_ms: u32,
    down_das_ms: u32,
    horizontal_arr_acc: u32,
    down_arr_acc: u32,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: Horizontal::None,
            down_held: false,
            last_key_time: std::time::Instant::now(),
            horizontal_das_ms: 0,
            down_das_ms: 0,
            horizontal_arr_acc: 0,
            down_arr_acc: 0,
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Register a key press. Returns the immediate command, if any; repeats
    /// come from [`update`](Self::update).
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == Horizontal::Left {
                    None
                } else {
                    self.horizontal = Horizontal::Left;
                    self.horizontal_das_ms = 0;
                    self.horizontal_arr_acc = 0;
                    Some(Command::MoveLeft)
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == Horizontal::Right {
                    None
                } else {
                    self.horizontal = Horizontal::Right;
                    self.horizontal_das_ms = 0;
                    self.horizontal_arr_acc = 0;
                    Some(Command::MoveRight)
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.last_key_time = std::time::Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_das_ms = 0;
                    self.down_arr_acc = 0;
                    Some(Command::SoftDrop)
                }
            }
            _ => None,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                if self.horizontal == Horizontal::Left {
                    self.release_horizontal();
                }
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.horizontal == Horizontal::Right {
                    self.release_horizontal();
                }
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.release_down();
            }
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = Horizontal::None;
        self.horizontal_das_ms = 0;
        self.horizontal_arr_acc = 0;
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_das_ms = 0;
        self.down_arr_acc = 0;
    }

    /// Advance the repeat timers by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 32> {
        let mut commands = ArrayVec::<Command, 32>::new();

        // Auto-release when the terminal never sent a release event.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            if self.horizontal != Horizontal::None {
                self.release_horizontal();
            }
            if self.down_held {
                self.release_down();
            }
        }

        match self.horizontal {
            Horizontal::Left | Horizontal::Right => {
                let prev_das = self.horizontal_das_ms;
                self.horizontal_das_ms += elapsed_ms;

                if self.horizontal_das_ms >= self.das_delay {
                    let excess = if prev_das < self.das_delay {
                        self.horizontal_das_ms - self.das_delay
                    } else {
                        elapsed_ms
                    };
                    self.horizontal_arr_acc += excess;

                    while self.horizontal_arr_acc >= self.arr_rate {
                        let command = match self.horizontal {
                            Horizontal::Left => Command::MoveLeft,
                            Horizontal::Right => Command::MoveRight,
                            Horizontal::None => unreachable!(),
                        };
                        let _ = commands.try_push(command);
                        self.horizontal_arr_acc -= self.arr_rate;
                    }
                }
            }
            Horizontal::None => {
                self.horizontal_das_ms = 0;
                self.horizontal_arr_acc = 0;
            }
        }

        if self.down_held {
            let prev_das = self.down_das_ms;
            self.down_das_ms += elapsed_ms;

            if self.down_das_ms >= SOFT_DROP_DAS_MS {
                let excess = if prev_das < SOFT_DROP_DAS_MS {
                    self.down_das_ms - SOFT_DROP_DAS_MS
                } else {
                    elapsed_ms
                };
                self.down_arr_acc += excess;
                while self.down_arr_acc >= SOFT_DROP_ARR_MS {
                    let _ = commands.try_push(Command::SoftDrop);
                    self.down_arr_acc -= SOFT_DROP_ARR_MS;
                }
            }
        } else {
            self.down_das_ms = 0;
            self.down_arr_acc = 0;
        }

        commands
    }

    pub fn reset(&mut self) {
        self.horizontal = Horizontal::None;
        self.down_held = false;
        self.last_key_time = std::time::Instant::now();
        self.horizontal_das_ms = 0;
        self.down_das_ms = 0;
        self.horizontal_arr_acc = 0;
        self.down_arr_acc = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_repeats_start_after_das() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));

        // Before and exactly at DAS: nothing yet.
        assert!(ih.update(99).is_empty());
        assert!(ih.update(1).is_empty());

        // Each ARR interval after DAS yields one repeat.
        assert_eq!(ih.update(25).as_slice(), &[Command::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[Command::MoveLeft]);
    }

    #[test]
    fn repeated_press_of_the_same_direction_is_ignored() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
    }

    #[test]
    fn release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(200).is_empty());

        ih.handle_key_release(KeyCode::Left);
        assert!(ih.update(200).is_empty());
    }

    #[test]
    fn stale_keys_auto_release_without_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Command::MoveLeft));
        // Simulate silence by moving the last key time into the past.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert!(ih.update(200).is_empty());
    }

    #[test]
    fn soft_drop_repeats_with_zero_das() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(Command::SoftDrop));

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[Command::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[Command::SoftDrop, Command::SoftDrop]
        );
    }

    #[test]
    fn reset_clears_held_state() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(200).is_empty());

        ih.reset();
        assert!(ih.update(200).is_empty());
    }
}
