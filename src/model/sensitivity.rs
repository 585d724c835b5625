//! One-at-a-time sensitivity of the national total.
//!
//! Every input of every device is scaled by `1 + step` and `1 - step` in
//! turn. The larger of the two swings in that device's national energy is
//! kept for each (device, parameter) pair.

use rayon::prelude::*;
use serde::Serialize;

use crate::device::{Category, DeviceProfile};

use super::config::{MINUTES_PER_DAY, ModelConfig};
use super::estimate::annual_kwh;

/// Relative perturbation applied to each input.
pub const DEFAULT_STEP: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Parameter {
    RatedPower,
    ActiveMinutes,
    StandbyPower,
    Units,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::RatedPower,
        Parameter::ActiveMinutes,
        Parameter::StandbyPower,
        Parameter::Units,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::RatedPower => "rated power",
            Parameter::ActiveMinutes => "active time",
            Parameter::StandbyPower => "standby power",
            Parameter::Units => "units",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityRow {
    pub device: String,
    pub category: Category,
    pub parameter: Parameter,
    /// Largest absolute change of national energy in GWh/yr.
    pub delta_energy_gwh: f64,
    /// `delta_energy_gwh` as a percentage of the baseline total.
    pub delta_energy_pct: f64,
    /// Largest absolute change of national emissions in kt CO2e/yr.
    pub delta_emissions_kt: f64,
    pub delta_emissions_pct: f64,
}

#[derive(Debug, Clone, Copy)]
struct Inputs {
    rated_power_w: f64,
    active_minutes: f64,
    standby_power_w: f64,
    units_millions: f64,
}

impl Inputs {
    fn from_profile(p: &DeviceProfile) -> Self {
        Self {
            rated_power_w: p.rated_power_w(),
            active_minutes: p.active_minutes_per_day(),
            standby_power_w: p.standby_power_w(),
            units_millions: p.units_millions(),
        }
    }

    fn scaled(mut self, parameter: Parameter, factor: f64) -> Self {
        match parameter {
            Parameter::RatedPower => self.rated_power_w *= factor,
            // Standby time follows; the day cannot exceed 1440 minutes.
            Parameter::ActiveMinutes => {
                self.active_minutes = (self.active_minutes * factor).min(MINUTES_PER_DAY)
            }
            Parameter::StandbyPower => self.standby_power_w *= factor,
            Parameter::Units => self.units_millions *= factor,
        }
        self
    }

    fn national_gwh(&self) -> f64 {
        let active = annual_kwh(self.rated_power_w, self.active_minutes);
        let standby = annual_kwh(self.standby_power_w, MINUTES_PER_DAY - self.active_minutes);
        (active + standby) * self.units_millions
    }
}

/// Largest swing per (device, parameter), sorted by energy swing descending.
pub fn sensitivity(
    devices: &[(Category, &DeviceProfile)],
    step: f64,
    config: &ModelConfig,
) -> Vec<SensitivityRow> {
    let carbon = config.carbon_intensity_kg_per_kwh;
    let base_energy: f64 = devices
        .iter()
        .map(|(_, p)| Inputs::from_profile(p).national_gwh())
        .sum();
    let base_emissions = base_energy * carbon;
    let pct = |value: f64, base: f64| if base > 0.0 { value / base * 100.0 } else { 0.0 };

    let per_device: Vec<Vec<SensitivityRow>> = devices
        .par_iter()
        .map(|(category, profile)| {
            let inputs = Inputs::from_profile(profile);
            let e0 = inputs.national_gwh();
            Parameter::ALL
                .iter()
                .map(|&parameter| {
                    let delta = [1.0 + step, 1.0 - step]
                        .iter()
                        .map(|&f| (inputs.scaled(parameter, f).national_gwh() - e0).abs())
                        .fold(0.0_f64, f64::max);
                    let delta_c = delta * carbon;
                    SensitivityRow {
                        device: profile.name().to_string(),
                        category: *category,
                        parameter,
                        delta_energy_gwh: delta,
                        delta_energy_pct: pct(delta, base_energy),
                        delta_emissions_kt: delta_c,
                        delta_emissions_pct: pct(delta_c, base_emissions),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let mut rows: Vec<SensitivityRow> = per_device.into_iter().flatten().collect();
    rows.sort_by(|a, b| {
        b.delta_energy_gwh
            .total_cmp(&a.delta_energy_gwh)
            .then_with(|| a.device.cmp(&b.device))
            .then_with(|| a.parameter.cmp(&b.parameter))
    });
    rows
}

/// First `n` rows ordered by emissions swing.
pub fn top_by_emissions(rows: &[SensitivityRow], n: usize) -> Vec<SensitivityRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        b.delta_emissions_kt
            .total_cmp(&a.delta_emissions_kt)
            .then_with(|| a.device.cmp(&b.device))
    });
    sorted.truncate(n);
    sorted
}
