//! Scoring module - chain points
//!
//! A chain of `n` fruits is worth `CHAIN_BASE_SCORE * (n - 2)`:
//! 60 for three, 120 for four, 180 for five.
//! Overlapping horizontal and vertical chains are scored independently.

use crate::chain::Chain;
use crate::types::{CHAIN_BASE_SCORE, MIN_CHAIN_LENGTH};

/// Points for a chain of `length` fruits
///
/// Runs shorter than [`MIN_CHAIN_LENGTH`] are not chains and score 0.
pub fn chain_score(length: usize) -> u32 {
    if length < MIN_CHAIN_LENGTH {
        return 0;
    }
    CHAIN_BASE_SCORE.saturating_mul((length - 2) as u32)
}

/// Assign each chain its score in place and return the total
///
/// Must run before the chained fruits are removed from the board.
pub fn score_chains(chains: &mut [Chain]) -> u32 {
    chains.iter_mut().fold(0u32, |total, chain| {
        chain.score = chain_score(chain.len());
        total.saturating_add(chain.score)
    })
}
