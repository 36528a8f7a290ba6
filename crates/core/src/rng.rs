//! RNG module - deterministic fruit generation
//!
//! Every board owns its own generator, so the same seed always deals the same
//! boards and refills. Fruit kinds are drawn uniformly from the first `n` kinds
//! the board is configured with.

use crate::types::FruitKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits: the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw a fruit kind uniformly from the first `kinds` kinds
    pub fn next_kind(&mut self, kinds: usize) -> FruitKind {
        debug_assert!(kinds > 0 && kinds <= FruitKind::ALL.len());
        FruitKind::ALL[self.next_range(kinds as u32) as usize]
    }

    /// Draw a fruit kind that is not `previous`
    ///
    /// With `previous == None` this is a plain [`SimpleRng::next_kind`].
    pub fn next_kind_except(&mut self, kinds: usize, previous: Option<FruitKind>) -> FruitKind {
        loop {
            let kind = self.next_kind(kinds);
            if Some(kind) != previous {
                return kind;
            }
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
