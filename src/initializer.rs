//! Weight initialization functions.
//!
//! An initializer is called once per weight entry with the fan-in of the
//! receiving layer, so scaling heuristics can adapt to layer width. Biases
//! always start at zero.

use crate::dtype::DType;
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// A weight-initialization function, called once per weight entry with the
/// fan-in of the receiving layer.
pub type WeightInit<T> = fn(&mut StdRng, usize) -> T;

/// Uniform draw from `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`, the default.
///
/// Inverse-square-root scaling keeps early activations away from the
/// saturated tails of the sigmoid.
pub fn inverse_sqrt<T: DType>(rng: &mut StdRng, fan_in: usize) -> T {
    let max = 1.0 / (fan_in as f64).sqrt();
    T::from_f64(rng.gen_range(-max..=max))
}

/// Draw from a normal distribution with variance `2/fan_in`.
pub fn he_normal<T: DType>(rng: &mut StdRng, fan_in: usize) -> T {
    let std = (2.0 / fan_in as f64).sqrt();
    let dist = Normal::new(0.0, std).unwrap();
    T::from_f64(dist.sample(rng))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_inverse_sqrt_bounds() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for fan_in in [1usize, 4, 100] {
            let bound = 1.0 / (fan_in as f64).sqrt();
            for _ in 0..200 {
                let w: f64 = inverse_sqrt(&mut rng, fan_in);
                assert!(w >= -bound && w <= bound, "{w} outside ±{bound}");
            }
        }
    }

    #[test]
    fn test_he_normal_is_finite() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let w: f32 = he_normal(&mut rng, 16);
            assert!(w.is_finite());
        }
    }
}
