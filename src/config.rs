//! Construction-time configuration for [`LinearHashSet`](crate::LinearHashSet).

use crate::error::SetError;

/// Default requested capacity; also the minimum slot count.
pub const DEFAULT_CAPACITY: usize = 16;

/// Default fraction of the slot count at which the table grows.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.66;

pub(crate) const MIN_LOAD_FACTOR: f64 = 0.1;
pub(crate) const MAX_LOAD_FACTOR: f64 = 0.9;

/// How the per-table hash multiplier is chosen.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HashingMode {
    /// Draw a fresh odd multiplier per table from the thread-local generator.
    /// Defeats inputs crafted against a known index function.
    #[default]
    Randomized,
    /// Use one fixed multiplier so slot layout is reproducible across runs.
    Deterministic,
}

/// Builder-style configuration, validated when the set is constructed.
///
/// ```
/// use linear_hash_set::{HashingMode, LinearHashSet, SetConfig};
///
/// let config = SetConfig::new()
///     .with_capacity(100)
///     .with_load_factor(0.5)
///     .with_hashing(HashingMode::Deterministic);
/// let set: LinearHashSet<u32> = LinearHashSet::with_config(config).unwrap();
/// assert_eq!(set.capacity(), 128);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SetConfig {
    pub capacity: usize,
    pub load_factor: f64,
    pub hashing: HashingMode,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            hashing: HashingMode::Randomized,
        }
    }
}

impl SetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_hashing(mut self, hashing: HashingMode) -> Self {
        self.hashing = hashing;
        self
    }

    /// Rejects a zero capacity or a load factor outside `[0.1, 0.9]`.
    pub fn validate(&self) -> Result<(), SetError> {
        if !(MIN_LOAD_FACTOR..=MAX_LOAD_FACTOR).contains(&self.load_factor) {
            return Err(SetError::InvalidLoadFactor(self.load_factor));
        }
        if self.capacity == 0 {
            return Err(SetError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// log2 of the slot count: capacity rounded up to a power of two, at least 16.
    pub(crate) fn initial_bits(&self) -> u32 {
        let slots = self
            .capacity
            .max(DEFAULT_CAPACITY)
            .checked_next_power_of_two()
            .unwrap_or(1 << crate::hash_index::MAX_BITS);
        slots.trailing_zeros().min(crate::hash_index::MAX_BITS)
    }
}
