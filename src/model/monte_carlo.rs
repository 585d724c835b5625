//! Monte Carlo propagation of active-power uncertainty.
//!
//! Each device's active power is drawn from a triangular distribution over
//! its power band, the draws are annualised like the mid-case estimate, and
//! the resulting household distribution is reduced to p5/p50/p95.
//!
//! A run uses a single `ChaCha8Rng` seeded from a `u64`. Devices consume
//! draws in table order, so device `k` takes draws `k * n .. (k + 1) * n`.
//! The national total of trial `i` sums trial `i` of every device.

use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::device::DeviceProfile;

use super::config::{ModelConfig, POWER_TOLERANCE};
use super::distribution::Triangular;
use super::error::{ModelError, ModelResult};
use super::estimate::household_kwh_at;
use super::percentile::summarize;
use super::result::{DeviceSimulation, NationalSimulation, SimulationOutcome};

fn check_sample_count(sample_count: usize) -> ModelResult<()> {
    if sample_count == 0 {
        return Err(ModelError::parameter(
            "sample_count",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Draws `sample_count` household kWh/yr values for one device.
pub fn sample_household_kwh<R: Rng + ?Sized>(
    profile: &DeviceProfile,
    tolerance: f64,
    sample_count: usize,
    rng: &mut R,
) -> ModelResult<Vec<f64>> {
    let power = Triangular::symmetric(profile.rated_power_w(), tolerance)?;
    Ok(power
        .sample_iter(rng)
        .take(sample_count)
        .map(|p| household_kwh_at(profile, p))
        .collect())
}

/// Simulates one device from a fresh generator seeded with `seed`.
pub fn simulate(
    profile: &DeviceProfile,
    sample_count: usize,
    seed: u64,
) -> ModelResult<DeviceSimulation> {
    check_sample_count(sample_count)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate_with_rng(profile, POWER_TOLERANCE, sample_count, &mut rng)
}

fn simulate_with_rng<R: Rng + ?Sized>(
    profile: &DeviceProfile,
    tolerance: f64,
    sample_count: usize,
    rng: &mut R,
) -> ModelResult<DeviceSimulation> {
    let samples = sample_household_kwh(profile, tolerance, sample_count, rng)?;
    let summary = summarize(&samples)?;
    debug!(
        device = profile.name(),
        p5 = summary.p5,
        p50 = summary.p50,
        p95 = summary.p95,
        "simulated household energy"
    );
    Ok(DeviceSimulation {
        device: profile.name().to_string(),
        samples,
        summary,
    })
}

/// Sums trial `i` of every device, weighted by its unit population (GWh).
pub fn national_totals(
    profiles: &[DeviceProfile],
    devices: &[DeviceSimulation],
    sample_count: usize,
) -> ModelResult<Vec<f64>> {
    if profiles.len() != devices.len() {
        return Err(ModelError::parameter(
            "devices",
            format!(
                "expected {} simulations, got {}",
                profiles.len(),
                devices.len()
            ),
        ));
    }

    let mut totals = vec![0.0; sample_count];
    for (profile, sim) in profiles.iter().zip(devices) {
        if sim.samples.len() != sample_count {
            return Err(ModelError::parameter(
                "samples",
                format!(
                    "`{}` has {} samples, expected {sample_count}",
                    sim.device,
                    sim.samples.len()
                ),
            ));
        }
        let units = profile.units_millions();
        for (total, kwh) in totals.iter_mut().zip(&sim.samples) {
            *total += kwh * units;
        }
    }
    Ok(totals)
}

/// Simulates every device of a table from one seeded generator and builds
/// the trial-aligned national total.
pub fn simulate_all(
    profiles: &[DeviceProfile],
    config: &ModelConfig,
) -> ModelResult<SimulationOutcome> {
    config.validate()?;
    if profiles.is_empty() {
        return Err(ModelError::parameter(
            "profiles",
            "at least one device is required",
        ));
    }

    let n = config.sample_count;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let devices = profiles
        .iter()
        .map(|p| simulate_with_rng(p, config.power_tolerance, n, &mut rng))
        .collect::<ModelResult<Vec<_>>>()?;

    let totals_gwh = national_totals(profiles, &devices, n)?;
    let summary = summarize(&totals_gwh)?;

    Ok(SimulationOutcome {
        seed: config.seed,
        sample_count: n,
        devices,
        national: NationalSimulation {
            totals_gwh,
            summary,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::estimate::estimate;

    fn kettle() -> DeviceProfile {
        DeviceProfile::new("Kettle", 3000.0, 12.0, 0.0, 27.0).unwrap()
    }

    fn fridge() -> DeviceProfile {
        DeviceProfile::new("Fridge/Freezer", 150.0, 480.0, 15.0, 21.03).unwrap()
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = simulate(&kettle(), 0, 42).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidParameter {
                name: "sample_count",
                ..
            }
        ));

        let config = ModelConfig::new().with_sample_count(0);
        assert!(simulate_all(&[kettle()], &config).is_err());
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let a = simulate(&fridge(), 2_000, 42).unwrap();
        let b = simulate(&fridge(), 2_000, 42).unwrap();
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_different_seed_differs() {
        let a = simulate(&fridge(), 2_000, 42).unwrap();
        let b = simulate(&fridge(), 2_000, 43).unwrap();
        assert_ne!(a.samples, b.samples);
    }

    #[test]
    fn test_samples_within_band() {
        let sim = simulate(&fridge(), 5_000, 42).unwrap();
        let est = estimate(&fridge(), &ModelConfig::default());
        let lo = est.household_energy_low_kwh() - 1e-9;
        let hi = est.household_energy_high_kwh() + 1e-9;
        assert!(sim.samples.iter().all(|&x| x >= lo && x <= hi));
        assert!(sim.summary.is_ordered());
    }

    #[test]
    fn test_samples_annualise_like_the_estimate() {
        let profile = fridge();
        let sim = simulate(&profile, 1_000, 9).unwrap();

        let power = Triangular::symmetric(profile.rated_power_w(), POWER_TOLERANCE).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for (kwh, p) in sim.samples.iter().zip(power.sample_iter(&mut rng)) {
            assert_eq!(*kwh, household_kwh_at(&profile, p));
        }

        let mid = estimate(&profile, &ModelConfig::default()).household_energy_kwh;
        assert!((household_kwh_at(&profile, profile.rated_power_w()) - mid).abs() < 1e-9);
    }

    #[test]
    fn test_p50_close_to_mid_case() {
        let sim = simulate(&kettle(), 100_000, 42).unwrap();
        let mid = estimate(&kettle(), &ModelConfig::default()).household_energy_kwh;
        assert!(((sim.summary.p50 - mid) / mid).abs() < 0.02);
    }

    #[test]
    fn test_batch_draws_devices_in_sequence() {
        let config = ModelConfig::new().with_sample_count(500);
        let outcome = simulate_all(&[kettle(), fridge()], &config).unwrap();

        // First device sees the fresh generator, so it matches a standalone run.
        let alone = simulate(&kettle(), 500, config.seed).unwrap();
        assert_eq!(outcome.devices[0].samples, alone.samples);

        // Second device continues the stream.
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let _ = sample_household_kwh(&kettle(), 0.1, 500, &mut rng).unwrap();
        let second = sample_household_kwh(&fridge(), 0.1, 500, &mut rng).unwrap();
        assert_eq!(outcome.devices[1].samples, second);
    }

    #[test]
    fn test_national_total_is_trial_aligned() {
        let profiles = [kettle(), fridge()];
        let config = ModelConfig::new().with_sample_count(200);
        let outcome = simulate_all(&profiles, &config).unwrap();
        for i in [0, 57, 199] {
            let expected = outcome.devices[0].samples[i] * 27.0
                + outcome.devices[1].samples[i] * 21.03;
            assert!((outcome.national.totals_gwh[i] - expected).abs() < 1e-9);
        }
        assert!(outcome.national.summary.is_ordered());
        assert_eq!(outcome.sample_count, 200);
    }

    #[test]
    fn test_zero_population_contributes_nothing() {
        let ghost = DeviceProfile::new("Heater", 2000.0, 600.0, 5.0, 0.0).unwrap();
        let config = ModelConfig::new().with_sample_count(100);
        let outcome = simulate_all(&[ghost], &config).unwrap();
        assert!(outcome.national.totals_gwh.iter().all(|&t| t == 0.0));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(simulate_all(&[], &ModelConfig::default()).is_err());
    }

    #[test]
    fn test_national_totals_length_mismatch() {
        let sim = simulate(&kettle(), 10, 1).unwrap();
        assert!(national_totals(&[kettle()], &[sim], 11).is_err());
    }
}
