use crate::device::DeviceProfile;

use super::config::{DAYS_PER_YEAR, ModelConfig};
use super::result::EstimateResult;

/// Annual energy in kWh of a load of `power_w` running `minutes_per_day`.
pub fn annual_kwh(power_w: f64, minutes_per_day: f64) -> f64 {
    (power_w / 1000.0) * (minutes_per_day / 60.0) * DAYS_PER_YEAR
}

/// Annual standby energy in kWh. Not subject to the power band.
pub fn standby_kwh(profile: &DeviceProfile) -> f64 {
    annual_kwh(profile.standby_power_w(), profile.standby_minutes_per_day())
}

/// Household kWh/yr when the device draws `active_power_w` while active.
pub fn household_kwh_at(profile: &DeviceProfile, active_power_w: f64) -> f64 {
    annual_kwh(active_power_w, profile.active_minutes_per_day()) + standby_kwh(profile)
}

/// Deterministic mid-case estimate at rated power, with the low/high
/// active-energy bounds of the configured power band.
pub fn estimate(profile: &DeviceProfile, config: &ModelConfig) -> EstimateResult {
    let carbon = config.carbon_intensity_kg_per_kwh;
    let units = profile.units_millions();
    let t_active = profile.active_minutes_per_day();
    let (p_low, p_high) = profile.power_band(config.power_tolerance);

    let active = annual_kwh(profile.rated_power_w(), t_active);
    let standby = standby_kwh(profile);
    let household = active + standby;

    let national_active = active * units;
    let national_standby = standby * units;
    let national = household * units;

    EstimateResult {
        device: profile.name().to_string(),
        household_active_kwh: active,
        household_standby_kwh: standby,
        household_energy_kwh: household,
        household_active_low_kwh: annual_kwh(p_low, t_active),
        household_active_high_kwh: annual_kwh(p_high, t_active),
        household_emissions_kg: household * carbon,
        national_active_gwh: national_active,
        national_standby_gwh: national_standby,
        national_energy_gwh: national,
        national_emissions_kt: national * carbon,
        national_active_emissions_kt: national_active * carbon,
        national_standby_emissions_kt: national_standby * carbon,
        units_millions: units,
    }
}

/// Estimates every profile, preserving table order.
pub fn estimate_all(profiles: &[DeviceProfile], config: &ModelConfig) -> Vec<EstimateResult> {
    profiles.iter().map(|p| estimate(p, config)).collect()
}
