use serde::Serialize;

use super::error::{ModelError, ModelResult};

/// Grid emissions factor in kg CO2e per kWh.
pub const CARBON_INTENSITY_KG_PER_KWH: f64 = 0.22535;

/// Relative tolerance of a device's nameplate active power (±10%).
pub const POWER_TOLERANCE: f64 = 0.10;

/// Default number of Monte Carlo trials per device.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Default seed for the Monte Carlo generator.
pub const DEFAULT_SEED: u64 = 42;

pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Configuration shared by the estimator and the uncertainty propagator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelConfig {
    /// Emissions factor applied uniformly to household and national energy
    /// (kg CO2e per kWh, equivalently kt per GWh).
    pub carbon_intensity_kg_per_kwh: f64,
    /// Half-width of the active power band as a fraction of rated power.
    ///
    /// Standby power is not subject to this band.
    pub power_tolerance: f64,
    /// Number of Monte Carlo trials drawn for each device.
    pub sample_count: usize,
    /// Seed for the Monte Carlo generator.
    ///
    /// Each run reseeds from scratch, so two runs with the same seed, sample
    /// count and device order produce bit-identical samples.
    pub seed: u64,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self {
            carbon_intensity_kg_per_kwh: CARBON_INTENSITY_KG_PER_KWH,
            power_tolerance: POWER_TOLERANCE,
            sample_count: DEFAULT_SAMPLE_COUNT,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_carbon_intensity(mut self, kg_per_kwh: f64) -> Self {
        self.carbon_intensity_kg_per_kwh = kg_per_kwh;
        self
    }

    /// Checks that every field is usable by the model.
    pub fn validate(&self) -> ModelResult<()> {
        if !self.carbon_intensity_kg_per_kwh.is_finite() || self.carbon_intensity_kg_per_kwh < 0.0
        {
            return Err(ModelError::parameter(
                "carbon_intensity_kg_per_kwh",
                format!(
                    "must be finite and non-negative, got {}",
                    self.carbon_intensity_kg_per_kwh
                ),
            ));
        }
        if !(0.0..1.0).contains(&self.power_tolerance) {
            return Err(ModelError::parameter(
                "power_tolerance",
                format!("must be in [0, 1), got {}", self.power_tolerance),
            ));
        }
        if self.sample_count == 0 {
            return Err(ModelError::parameter(
                "sample_count",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new()
    }
}
