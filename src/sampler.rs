// src/sampler.rs

use rand::Rng;
use rand_distr::StandardNormal;

use crate::geometry::clamp_lenient;

/// Density used when the caller passes a non-positive (or NaN) value.
pub const FALLBACK_DENSITY: f64 = 1.0;

/// Samples a coordinate in `[min, max]` from a normal distribution centered
/// on the middle of the range with a standard deviation of `(max - min) / density`.
///
/// Higher densities pull samples toward the center. Results outside the range
/// are clamped onto its edges.
pub fn sample_coordinate<R: Rng>(rng: &mut R, min: f64, max: f64, density: f64) -> f64 {
    let density = if density > 0.0 { density } else { FALLBACK_DENSITY };
    let center = (min + max) / 2.0;
    let spread = (max - min) / density;
    let offset: f64 = rng.sample::<f64, _>(StandardNormal) * spread;
    clamp_lenient(center + offset, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn std_dev(samples: &[f64]) -> f64 {
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        var.sqrt()
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for density in [0.5, 1.0, 15.0, 50.0] {
            for _ in 0..2_000 {
                let v = sample_coordinate(&mut rng, -40.0, 260.0, density);
                assert!((-40.0..=260.0).contains(&v), "{v} escaped for density {density}");
            }
        }
    }

    #[test]
    fn test_spread_shrinks_as_density_grows() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut previous = f64::INFINITY;
        for density in [1.0, 4.0, 15.0, 50.0] {
            let samples: Vec<f64> = (0..5_000)
                .map(|_| sample_coordinate(&mut rng, 0.0, 1000.0, density))
                .collect();
            let sd = std_dev(&samples);
            assert!(sd < previous, "std dev {sd} did not shrink at density {density}");
            previous = sd;
        }
    }

    #[test]
    fn test_non_positive_density_behaves_like_one() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        for density in [0.0, -5.0, f64::NAN] {
            let x = sample_coordinate(&mut a, 0.0, 100.0, density);
            let y = sample_coordinate(&mut b, 0.0, 100.0, 1.0);
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_collapsed_range_returns_the_point() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            assert_eq!(sample_coordinate(&mut rng, 42.0, 42.0, 15.0), 42.0);
        }
    }

    #[test]
    fn test_inverted_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(sample_coordinate(&mut rng, 100.0, 0.0, 15.0), 100.0);
    }
}
