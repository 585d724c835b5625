use serde::Serialize;

/// Mid-case annual estimate for one device.
///
/// Household figures are per household (kWh, kg). National figures scale
/// by the unit population in millions, which turns kWh into GWh and kg
/// into kt without any further conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateResult {
    pub device: String,
    /// Active-mode energy at rated power in kWh/yr.
    pub household_active_kwh: f64,
    /// Standby energy in kWh/yr.
    pub household_standby_kwh: f64,
    /// Total household energy in kWh/yr.
    pub household_energy_kwh: f64,
    /// Active-mode energy at the low end of the power band in kWh/yr.
    pub household_active_low_kwh: f64,
    /// Active-mode energy at the high end of the power band in kWh/yr.
    pub household_active_high_kwh: f64,
    pub household_emissions_kg: f64,
    pub national_active_gwh: f64,
    pub national_standby_gwh: f64,
    /// Total national energy in GWh/yr.
    pub national_energy_gwh: f64,
    pub national_emissions_kt: f64,
    pub national_active_emissions_kt: f64,
    pub national_standby_emissions_kt: f64,
    pub units_millions: f64,
}

impl EstimateResult {
    /// Household total with active power at the low end of the band.
    pub fn household_energy_low_kwh(&self) -> f64 {
        self.household_active_low_kwh + self.household_standby_kwh
    }

    /// Household total with active power at the high end of the band.
    pub fn household_energy_high_kwh(&self) -> f64 {
        self.household_active_high_kwh + self.household_standby_kwh
    }

    pub fn national_energy_low_gwh(&self) -> f64 {
        self.household_energy_low_kwh() * self.units_millions
    }

    pub fn national_energy_high_gwh(&self) -> f64 {
        self.household_energy_high_kwh() * self.units_millions
    }
}

/// 5th, 50th and 95th percentiles of a simulated distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonteCarloSummary {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

impl MonteCarloSummary {
    pub fn is_ordered(&self) -> bool {
        self.p5 <= self.p50 && self.p50 <= self.p95
    }

    /// Same summary with every percentile multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            p5: self.p5 * factor,
            p50: self.p50 * factor,
            p95: self.p95 * factor,
        }
    }
}

/// Simulated household energy distribution of one device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSimulation {
    pub device: String,
    /// Household energy in kWh/yr, one value per trial.
    #[serde(skip)]
    pub samples: Vec<f64>,
    pub summary: MonteCarloSummary,
}

/// Trial-aligned national total across all simulated devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalSimulation {
    /// National energy in GWh/yr, one value per trial.
    #[serde(skip)]
    pub totals_gwh: Vec<f64>,
    /// Percentiles in GWh/yr.
    pub summary: MonteCarloSummary,
}

impl NationalSimulation {
    pub fn summary_twh(&self) -> MonteCarloSummary {
        self.summary.scaled(1e-3)
    }
}

/// Per-device simulations plus the national aggregate of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub seed: u64,
    pub sample_count: usize,
    pub devices: Vec<DeviceSimulation>,
    pub national: NationalSimulation,
}
