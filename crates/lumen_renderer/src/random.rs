//! Deterministic hash-based sampling.
//!
//! Each pixel gets its own seed derived from its linear index and the
//! accumulation frame, and the seed is advanced once per bounce. The same
//! (pixel, frame, bounce) triple therefore always yields the same sample,
//! no matter which thread shades the pixel.

use lumen_math::Vec3;

/// PCG-style integer hash.
#[inline]
pub fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    let word = ((state >> ((state >> 28) + 4)) ^ state).wrapping_mul(277_803_737);
    (word >> 22) ^ word
}

/// Per-pixel random number stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    seed: u32,
}

impl Sampler {
    /// Create a sampler from a raw seed.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Seed for a pixel in a given accumulation frame.
    #[inline]
    pub fn for_pixel(pixel_index: usize, frame_index: u32) -> Self {
        Self::new((pixel_index as u32).wrapping_mul(frame_index))
    }

    /// Move the seed forward before tracing bounce `bounce`.
    #[inline]
    pub fn advance(&mut self, bounce: u32) {
        self.seed = self.seed.wrapping_add(bounce);
    }

    /// Next raw hash value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.seed = pcg_hash(self.seed);
        self.seed
    }

    /// Next float in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly
        (self.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Random unit vector from three draws remapped to [-1, 1].
    #[inline]
    pub fn in_unit_sphere(&mut self) -> Vec3 {
        let v = Vec3::new(
            self.next_f32() * 2.0 - 1.0,
            self.next_f32() * 2.0 - 1.0,
            self.next_f32() * 2.0 - 1.0,
        );
        v.normalize_or_zero()
    }
}
