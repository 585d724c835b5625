use rand::Rng;
use rand::distributions::{Distribution, Standard};

use super::error::{ModelError, ModelResult};

/// Triangular distribution on `[min, max]` peaking at `mode`.
///
/// Sampled by inverse transform. When `min == max` the distribution is a
/// point mass and every draw returns `mode`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangular {
    min: f64,
    mode: f64,
    max: f64,
}

impl Triangular {
    pub fn new(min: f64, mode: f64, max: f64) -> ModelResult<Self> {
        if !(min.is_finite() && mode.is_finite() && max.is_finite()) {
            return Err(ModelError::parameter(
                "triangular",
                format!("bounds must be finite, got ({min}, {mode}, {max})"),
            ));
        }
        if min > mode || mode > max {
            return Err(ModelError::parameter(
                "triangular",
                format!("expected min <= mode <= max, got ({min}, {mode}, {max})"),
            ));
        }
        Ok(Self { min, mode, max })
    }

    /// Symmetric band `[center * (1 - t), center * (1 + t)]` around `center`.
    pub fn symmetric(center: f64, tolerance: f64) -> ModelResult<Self> {
        let half = (center * tolerance).abs();
        Self::new(center - half, center, center + half)
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Inverse CDF evaluated at `u` in [0, 1].
    pub fn quantile(&self, u: f64) -> f64 {
        if self.is_degenerate() {
            return self.mode;
        }
        let width = self.max - self.min;
        let fc = (self.mode - self.min) / width;
        if u < fc {
            self.min + (u * width * (self.mode - self.min)).sqrt()
        } else {
            self.max - ((1.0 - u) * width * (self.max - self.mode)).sqrt()
        }
    }
}

impl Distribution<f64> for Triangular {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.is_degenerate() {
            return self.mode;
        }
        let u: f64 = Standard.sample(rng);
        self.quantile(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_unordered_bounds() {
        assert!(Triangular::new(2.0, 1.0, 3.0).is_err());
        assert!(Triangular::new(1.0, 4.0, 3.0).is_err());
        assert!(Triangular::new(f64::NAN, 1.0, 3.0).is_err());
    }

    #[test]
    fn test_quantile_endpoints() {
        let t = Triangular::new(90.0, 100.0, 110.0).unwrap();
        assert!((t.quantile(0.0) - 90.0).abs() < 1e-12);
        assert!((t.quantile(0.5) - 100.0).abs() < 1e-12);
        assert!((t.quantile(1.0) - 110.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_mass() {
        let t = Triangular::new(0.0, 0.0, 0.0).unwrap();
        assert!(t.is_degenerate());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(t.sample(&mut rng), 0.0);
        }
    }

    #[test]
    fn test_samples_stay_in_band() {
        let t = Triangular::symmetric(3000.0, 0.1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let samples: Vec<f64> = (0..10_000).map(|_| t.sample(&mut rng)).collect();
        assert!(samples.iter().all(|&x| (2700.0..=3300.0).contains(&x)));

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        // (2700 + 3000 + 3300) / 3
        assert!((mean - 3000.0).abs() < 5.0, "mean = {mean}");
    }

    #[test]
    fn test_mass_concentrates_near_mode() {
        // P(|x - mode| < half-width / 2) = 0.75 for a symmetric triangle
        let t = Triangular::symmetric(100.0, 0.1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let n = 20_000;
        let inner = (0..n)
            .map(|_| t.sample(&mut rng))
            .filter(|x| (x - 100.0).abs() < 5.0)
            .count();
        let frac = inner as f64 / n as f64;
        assert!((frac - 0.75).abs() < 0.02, "frac = {frac}");
    }
}
