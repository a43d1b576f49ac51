//! Per-controller random source.
//!
//! Every controller owns one `RollRng`; nothing is shared between targets, so the
//! results for one weapon never depend on how many rolls another weapon made.

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sha3::{Digest, Sha3_256};

/// Seeded xoshiro stream used for every roll a controller makes.
#[derive(Debug, Clone)]
pub struct RollRng {
    inner: Xoshiro256PlusPlus,
    seed: u64,
}

impl RollRng {
    /// Seed 0 pulls from OS entropy; any other seed is reproducible.
    pub fn new(seed: u64) -> Self {
        let inner = if seed == 0 {
            Xoshiro256PlusPlus::from_entropy()
        } else {
            Xoshiro256PlusPlus::seed_from_u64(seed)
        };
        Self { inner, seed }
    }

    /// The seed this stream was created with (0 = entropy).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Uniform integer in `[min, max_exclusive)`. Returns `min` for an empty range.
    pub fn range(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.inner.gen_range(min..max_exclusive)
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.inner.gen_range(0..len.max(1))
    }

    /// Uniform float between `min` and `max` (order-insensitive).
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if (hi - lo).abs() <= f32::EPSILON {
            return lo;
        }
        lo + self.next_f32() * (hi - lo)
    }

    /// True with probability `odds`.
    pub fn chance(&mut self, odds: f32) -> bool {
        self.next_f32() < odds
    }
}

impl RngCore for RollRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Deterministic per-target seed from a world seed and a label (e.g. an entity id).
/// Never returns 0, so a derived seed is always reproducible.
pub fn derive_seed(world_seed: u64, label: &str) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(world_seed.to_le_bytes());
    hasher.update(label.as_bytes());
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[0..8]);
    u64::from_le_bytes(bytes).max(1)
}
