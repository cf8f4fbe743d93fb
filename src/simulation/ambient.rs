//! Coherent-noise baseline for the temperature field

use noise::{NoiseFn, Perlin};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

use crate::core::types::Vec2;

/// Seeded 2D Perlin source, owned by the run that created it
#[derive(Clone)]
pub struct AmbientNoise {
    seed: u32,
    perlin: Perlin,
}

impl AmbientNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    /// Seed a new generator from the engine RNG
    pub fn from_rng(rng: &mut ChaCha8Rng) -> Self {
        Self::new(rng.gen())
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Noise at `at`, normalized from `[-1, 1]` to `[0, 1]`
    pub fn sample(&self, at: Vec2) -> f64 {
        ((self.perlin.get([at.x, at.y]) + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

impl fmt::Debug for AmbientNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmbientNoise").field("seed", &self.seed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_normalized() {
        let noise = AmbientNoise::new(7);
        for i in 0..200 {
            let at = Vec2::new(i as f64 * 0.37, i as f64 * -0.21);
            let n = noise.sample(at);
            assert!((0.0..=1.0).contains(&n), "sample {n} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = AmbientNoise::new(99);
        let b = AmbientNoise::new(99);
        let at = Vec2::new(1.23, 4.56);
        assert_eq!(a.sample(at), b.sample(at));
    }

    #[test]
    fn test_noise_is_continuous() {
        let noise = AmbientNoise::new(3);
        let at = Vec2::new(2.3, 1.7);
        let near = at + Vec2::new(1e-4, 1e-4);
        assert!((noise.sample(at) - noise.sample(near)).abs() < 1e-2);
    }
}
