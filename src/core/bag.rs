//! Bag module - 7-bag piece randomization
//!
//! A bag holds every kind exactly once in shuffled order and refills with a
//! fresh permutation the moment it runs dry, so any window of seven draws
//! from one bag contains each kind exactly once. Randomness comes from a
//! small LCG so a 32-bit seed reproduces a whole game.

use crate::types::PieceKind;

/// Linear congruential generator with the Numerical Recipes constants
///
/// Not statistically strong, but tiny, allocation-free and fully
/// deterministic from a 32-bit seed, which is all a replay needs.
#[derive(Debug, Clone)]
struct Lcg {
    state: u32,
}

impl Lcg {
    fn new(seed: u32) -> Self {
        // State 0 would start the sequence on a constant; nudge it off zero
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.state
    }

    /// Value in [0, max)
    fn below(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// 7-bag randomizer over the piece kinds
#[derive(Debug, Clone)]
pub struct Bag {
    /// Current permutation, consumed front to back
    kinds: [PieceKind; 7],
    /// Next position to draw; past the end means the bag is empty
    cursor: usize,
    rng: Lcg,
    /// Seed the generator started from, kept for replays
    seed: u32,
}

impl Bag {
    /// Create a bag with a reproducible draw sequence
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            kinds: PieceKind::ALL,
            cursor: 0,
            rng: Lcg::new(seed),
            seed,
        };
        bag.refill();
        bag
    }

    /// Shuffle a fresh permutation of all seven kinds (Fisher-Yates)
    fn refill(&mut self) {
        self.kinds = PieceKind::ALL;
        for i in (1..self.kinds.len()).rev() {
            let j = self.rng.below(i as u32 + 1) as usize;
            self.kinds.swap(i, j);
        }
        self.cursor = 0;
    }

    /// Draw the next kind, refilling with a new permutation when empty
    pub fn draw(&mut self) -> PieceKind {
        if self.cursor >= self.kinds.len() {
            self.refill();
        }
        let kind = self.kinds[self.cursor];
        self.cursor += 1;
        kind
    }

    /// Discard the rest of the current permutation so the next draw starts
    /// a fresh bag
    pub fn reset(&mut self) {
        self.cursor = self.kinds.len();
    }

    /// Seed this bag was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Kinds left in the current permutation
    #[cfg(test)]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.kinds[self.cursor..]
    }
}
