//! RNG module - seeded 7-bag piece generation.
//!
//! Each bag holds one of every kind, shuffled; draws empty the bag before a
//! new one is generated. The LCG keeps games reproducible for a given seed,
//! which the tests rely on.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, NEXT_PREVIEW};

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would lock the low bits; nudge it.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: ArrayVec<PieceKind, 7>,
    bag_index: usize,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            bag: ArrayVec::new(),
            bag_index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        queue.refill_bag();
        queue
    }

    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Next piece without consuming it.
    pub fn peek(&self) -> PieceKind {
        self.bag[self.bag_index]
    }

    /// Draw the next piece, refilling the bag when it runs out.
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// The upcoming pieces, without consuming them.
    ///
    /// Walks a clone of the queue so previews crossing a bag boundary see
    /// exactly what `draw` will produce.
    pub fn preview(&self) -> [PieceKind; NEXT_PREVIEW] {
        let mut lookahead = self.clone();
        std::array::from_fn(|_| lookahead.draw())
    }

    /// The seed this queue was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current RNG state; restarting with this value yields a fresh
    /// sequence instead of replaying the session.
    pub fn state(&self) -> u32 {
        self.rng.state()
    }

    #[cfg(test)]
    fn remaining_in_bag(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_is_deterministic_per_seed() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }

        let mut c = SimpleRng::new(54321);
        assert_ne!(SimpleRng::new(12345).next_u32(), c.next_u32());
    }

    #[test]
    fn each_bag_contains_every_kind_once() {
        let mut queue = PieceQueue::new(7);
        for _bag in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| queue.draw()).collect();
            drawn.sort_by_key(|kind| kind.color_id());
            drawn.dedup();
            assert_eq!(drawn.len(), 7);
        }
    }

    #[test]
    fn peek_matches_next_draw() {
        let mut queue = PieceQueue::new(42);
        for _ in 0..6 {
            let peeked = queue.peek();
            assert_eq!(peeked, queue.draw());
        }
    }

    #[test]
    fn preview_matches_draws_across_bag_boundary() {
        let mut queue = PieceQueue::new(99);
        // Leave two pieces in the current bag so the preview spans bags.
        for _ in 0..5 {
            queue.draw();
        }
        assert_eq!(queue.remaining_in_bag().len(), 2);

        let preview = queue.preview();
        let drawn: Vec<PieceKind> = (0..NEXT_PREVIEW).map(|_| queue.draw()).collect();
        assert_eq!(preview.as_slice(), drawn.as_slice());
    }

    #[test]
    fn same_seed_replays_the_same_sequence() {
        let mut a = PieceQueue::new(2024);
        let mut b = PieceQueue::new(2024);
        for _ in 0..30 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
