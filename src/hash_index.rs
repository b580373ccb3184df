//! Multiplicative slot-index derivation.
//!
//! `index(h) = (h * multiplier) >> (32 - bits)`. An odd 32-bit multiplier
//! spreads the high bits of any hash code across `2^bits` slots, so the
//! table needs neither prime sizes nor a second probing pass.

use crate::config::HashingMode;
use rand::Rng;

/// Upper bound on `bits`; the slot count never exceeds `2^MAX_BITS`.
pub(crate) const MAX_BITS: u32 = 31;

/// Multiplier used in [`HashingMode::Deterministic`].
pub const DETERMINISTIC_MULTIPLIER: u32 = 1_529_784_657;

/// Odd mixing constant applied to randomly drawn multipliers (2^32 / phi).
const RANDOM_MIX: u32 = 0x9E37_79B9;

/// Picks the multiplier for a new table. Always odd.
pub(crate) fn choose_multiplier(mode: HashingMode) -> u32 {
    match mode {
        HashingMode::Deterministic => DETERMINISTIC_MULTIPLIER,
        HashingMode::Randomized => {
            let drawn: u32 = rand::rng().random();
            (drawn | 1).wrapping_mul(RANDOM_MIX)
        }
    }
}

/// Index function of a table with `2^bits` slots.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct HashIndex {
    multiplier: u32,
    bits: u32,
}

impl HashIndex {
    pub(crate) fn new(multiplier: u32, bits: u32) -> Self {
        debug_assert!(multiplier & 1 == 1, "multiplier must be odd");
        debug_assert!((1..=MAX_BITS).contains(&bits));
        Self { multiplier, bits }
    }

    #[inline]
    pub(crate) fn slot(&self, hash: u32) -> usize {
        (hash.wrapping_mul(self.multiplier) >> (32 - self.bits)) as usize
    }

    pub(crate) fn bits(&self) -> u32 {
        self.bits
    }

    pub(crate) fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub(crate) fn slot_count(&self) -> usize {
        1usize << self.bits
    }

    #[cfg(test)]
    pub(crate) fn mask(&self) -> usize {
        self.slot_count() - 1
    }

    /// Same multiplier, different width.
    pub(crate) fn with_bits(&self, bits: u32) -> Self {
        Self::new(self.multiplier, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_multipliers_are_odd() {
        for _ in 0..64 {
            assert_eq!(choose_multiplier(HashingMode::Randomized) & 1, 1);
        }
    }

    #[test]
    fn deterministic_multiplier_is_fixed() {
        assert_eq!(
            choose_multiplier(HashingMode::Deterministic),
            DETERMINISTIC_MULTIPLIER
        );
        assert_eq!(DETERMINISTIC_MULTIPLIER & 1, 1);
    }

    #[test]
    fn slots_stay_within_mask() {
        let idx = HashIndex::new(DETERMINISTIC_MULTIPLIER, 4);
        assert_eq!(idx.slot_count(), 16);
        assert_eq!(idx.mask(), 15);
        for h in [0u32, 1, 7, 0xFFFF_FFFF, 0x8000_0000, 123_456_789] {
            assert!(idx.slot(h) <= idx.mask());
        }
    }

    #[test]
    fn growing_by_one_bit_splits_each_slot_in_two() {
        let small = HashIndex::new(DETERMINISTIC_MULTIPLIER, 4);
        let large = small.with_bits(5);
        for h in 0u32..2000 {
            assert_eq!(large.slot(h) >> 1, small.slot(h));
        }
    }

    #[test]
    fn sequential_hashes_spread_across_slots() {
        let idx = HashIndex::new(DETERMINISTIC_MULTIPLIER, 4);
        let mut used = [false; 16];
        for h in 0u32..64 {
            used[idx.slot(h)] = true;
        }
        assert!(used.iter().filter(|u| **u).count() >= 12);
    }
}
