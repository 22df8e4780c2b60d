//! RNG module - deterministic randomness for piece selection
//!
//! A small LCG drives every random choice so a seed reproduces a whole game.
//! On top of it sits [`ShapeBag`], the optional "7-bag" order where each bag
//! holds one of every kind, shuffled, and is refilled when empty.

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (usable as a seed to continue the stream)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag order: every kind exactly once per seven draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeBag {
    bag: [ShapeKind; 7],
    /// Index of the next kind to hand out; 7 means empty
    index: usize,
}

impl ShapeBag {
    /// An empty bag; the first draw fills it
    pub fn new() -> Self {
        Self {
            bag: ShapeKind::ALL,
            index: ShapeKind::ALL.len(),
        }
    }

    /// Draw the next kind, refilling from `rng` when the bag is empty
    pub fn draw(&mut self, rng: &mut SimpleRng) -> ShapeKind {
        if self.index >= self.bag.len() {
            self.bag = ShapeKind::ALL;
            rng.shuffle(&mut self.bag);
            self.index = 0;
        }
        let kind = self.bag[self.index];
        self.index += 1;
        kind
    }

    /// Kinds left before the next refill
    pub fn remaining(&self) -> &[ShapeKind] {
        &self.bag[self.index.min(self.bag.len())..]
    }
}

impl Default for ShapeBag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0), SimpleRng::new(1));
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_next_range_hits_every_value() {
        let mut rng = SimpleRng::new(3);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[rng.next_range(7) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut rng = SimpleRng::new(1);
        let mut bag = ShapeBag::new();

        let drawn: Vec<_> = (0..7).map(|_| bag.draw(&mut rng)).collect();
        for kind in ShapeKind::ALL {
            assert!(drawn.contains(&kind), "Missing kind: {:?}", kind);
        }
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_bag_refills() {
        let mut rng = SimpleRng::new(1);
        let mut bag = ShapeBag::new();
        for _ in 0..7 {
            bag.draw(&mut rng);
        }
        bag.draw(&mut rng);
        assert_eq!(bag.remaining().len(), 6);
    }
}
