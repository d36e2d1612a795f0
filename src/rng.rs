//! Seeded RNG for reproducible run layouts
//!
//! Every procedural draw in a run flows through this generator, so a
//! (level, run id) pair reproduces the same layout on any client. The mixer
//! keeps 32 bits of state: one wrapping-add step per draw, then an
//! avalanche-style scramble of the output word, so adjacent seeds still
//! produce uncorrelated sequences.

use serde::{Deserialize, Serialize};

/// Derive a 32-bit seed from an arbitrary string key
///
/// Rolling `h = h * 31 + byte` hash, wrapping. Stable across platforms;
/// used for `"<level>:<run>"` style keys.
pub fn seed_from_key(key: &str) -> u32 {
    let mut h: u32 = 0;
    for b in key.bytes() {
        h = h.wrapping_mul(31).wrapping_add(b as u32);
    }
    h
}

/// Deterministic pseudo-random generator with 32 bits of state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed directly from a string key
    pub fn from_key(key: &str) -> Self {
        Self::new(seed_from_key(key))
    }

    /// Next float in [0, 1)
    pub fn next(&mut self) -> f32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        // Top 24 bits only: exactly representable in f32, strictly < 1.0
        (((t ^ (t >> 14)) >> 8) as f32) * (1.0 / 16_777_216.0)
    }

    /// Uniform float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// Uniform integer in [min, max] inclusive
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        min + (self.next() * (max - min + 1) as f32).floor() as i32
    }

    /// Weighted coin flip: true with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.next() < p
    }

    /// Pick one element, or None on an empty slice
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.int(0, items.len() as i32 - 1) as usize;
        Some(&items[idx])
    }

    /// Fisher-Yates shuffle, scanned from the end of the slice
    ///
    /// Each element swaps with a uniformly chosen earlier-or-equal index.
    /// The scan order is part of the seed contract: changing it desyncs
    /// clients replaying the same run id.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.int(0, i as i32) as usize;
            items.swap(i, j);
        }
    }

    /// Sample up to `n` distinct elements in pseudo-random order
    ///
    /// Out-of-range `n` clamps silently: the result holds `min(n, len)`
    /// elements, never a duplicate.
    pub fn sample<T: Clone>(&mut self, items: &[T], n: usize) -> Vec<T> {
        let mut pool: Vec<T> = items.to_vec();
        self.shuffle(&mut pool);
        pool.truncate(n.min(items.len()));
        pool
    }
}
