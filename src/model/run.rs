use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, reference_gwh};
use crate::device::{Category, DeviceProfile};

use super::breakdown::{CategoryTotal, Share, category_totals, device_shares};
use super::config::ModelConfig;
use super::error::ModelResult;
use super::estimate::estimate_all;
use super::monte_carlo::simulate_all;
use super::result::{EstimateResult, SimulationOutcome};
use super::sensitivity::{DEFAULT_STEP, SensitivityRow, sensitivity};
use super::validation::{ValidationRow, validate};

/// Devices shown individually in a category's share breakdown.
pub const MAX_DEVICE_SLICES: usize = 5;

/// Estimate, simulation and validation of one device category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRun {
    pub category: Category,
    pub estimates: Vec<EstimateResult>,
    pub simulation: SimulationOutcome,
    /// `None` when no reference data covers the category.
    pub validation: Option<Vec<ValidationRow>>,
    pub total_energy_gwh: f64,
    pub total_emissions_kt: f64,
}

/// Runs one category from a freshly seeded generator.
pub fn run_category(
    category: Category,
    profiles: &[DeviceProfile],
    reference: Option<&[(&str, f64)]>,
    config: &ModelConfig,
) -> ModelResult<CategoryRun> {
    config.validate()?;
    debug!(%category, devices = profiles.len(), seed = config.seed, "running category");

    let estimates = estimate_all(profiles, config);
    let simulation = simulate_all(profiles, config)?;
    let validation = reference.map(|r| validate(&estimates, r)).transpose()?;

    let total_energy_gwh: f64 = estimates.iter().map(|e| e.national_energy_gwh).sum();
    let total_emissions_kt: f64 = estimates.iter().map(|e| e.national_emissions_kt).sum();

    info!(
        %category,
        total_gwh = total_energy_gwh,
        p5_gwh = simulation.national.summary.p5,
        p95_gwh = simulation.national.summary.p95,
        "category run complete"
    );

    Ok(CategoryRun {
        category,
        estimates,
        simulation,
        validation,
        total_energy_gwh,
        total_emissions_kt,
    })
}

/// Runs every catalog category independently, each from a freshly seeded
/// generator and validated against ECUK where figures exist.
pub fn run_catalog(catalog: &Catalog, config: &ModelConfig) -> ModelResult<Vec<CategoryRun>> {
    catalog
        .categories
        .iter()
        .map(|(category, profiles)| {
            run_category(*category, profiles, reference_gwh(*category), config)
        })
        .collect()
}

/// Device shares of one category within the combined run.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDevices {
    pub category: Category,
    pub shares: Vec<Share>,
}

/// Deterministic analysis of every category together.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedRun {
    pub estimates: Vec<(Category, EstimateResult)>,
    pub categories: Vec<CategoryTotal>,
    pub devices_by_category: Vec<CategoryDevices>,
    pub total_energy_gwh: f64,
    pub total_emissions_kt: f64,
    /// Largest swing per (device, parameter), energy swing descending.
    pub sensitivity: Vec<SensitivityRow>,
}

pub fn run_combined(catalog: &Catalog, config: &ModelConfig) -> ModelResult<CombinedRun> {
    config.validate()?;
    debug!(devices = catalog.num_devices(), "running combined analysis");

    let mut estimates = Vec::with_capacity(catalog.num_devices());
    let mut devices_by_category = Vec::with_capacity(catalog.categories.len());
    for (category, profiles) in &catalog.categories {
        let results = estimate_all(profiles, config);
        devices_by_category.push(CategoryDevices {
            category: *category,
            shares: device_shares(&results, MAX_DEVICE_SLICES),
        });
        estimates.extend(results.into_iter().map(|r| (*category, r)));
    }

    let categories = category_totals(&estimates);
    let total_energy_gwh: f64 = estimates.iter().map(|(_, e)| e.national_energy_gwh).sum();
    let total_emissions_kt = total_energy_gwh * config.carbon_intensity_kg_per_kwh;

    let devices: Vec<(Category, &DeviceProfile)> = catalog.devices().collect();
    let sensitivity = sensitivity(&devices, DEFAULT_STEP, config);

    info!(
        total_gwh = total_energy_gwh,
        total_kt = total_emissions_kt,
        "combined analysis complete"
    );

    Ok(CombinedRun {
        estimates,
        categories,
        devices_by_category,
        total_energy_gwh,
        total_emissions_kt,
        sensitivity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn small_config() -> ModelConfig {
        ModelConfig::new().with_sample_count(1_000)
    }

    #[test]
    fn test_kitchen_run_has_validation() {
        let c = Category::Kitchen;
        let profiles = catalog::profiles(c).unwrap();
        let run = run_category(c, &profiles, catalog::reference_gwh(c), &small_config()).unwrap();
        assert_eq!(run.estimates.len(), 11);
        assert_eq!(run.simulation.devices.len(), 11);
        assert_eq!(run.validation.as_ref().unwrap().len(), 7);
    }

    #[test]
    fn test_personal_run_skips_validation() {
        let c = Category::Personal;
        let profiles = catalog::profiles(c).unwrap();
        let run = run_category(c, &profiles, catalog::reference_gwh(c), &small_config()).unwrap();
        assert!(run.validation.is_none());
    }

    #[test]
    fn test_category_runs_reseed_independently() {
        let config = small_config();
        let kitchen = catalog::profiles(Category::Kitchen).unwrap();
        let a = run_category(Category::Kitchen, &kitchen, None, &config).unwrap();
        let office = catalog::profiles(Category::Office).unwrap();
        let _ = run_category(Category::Office, &office, None, &config).unwrap();
        let b = run_category(Category::Kitchen, &kitchen, None, &config).unwrap();
        assert_eq!(a.simulation, b.simulation);
    }

    #[test]
    fn test_catalog_run_covers_every_category() {
        let catalog = Catalog::builtin().unwrap();
        let runs = run_catalog(&catalog, &ModelConfig::new().with_sample_count(200)).unwrap();
        let order: Vec<Category> = runs.iter().map(|r| r.category).collect();
        assert_eq!(order, Category::ALL);
        for r in &runs {
            assert_eq!(r.validation.is_some(), catalog::reference_gwh(r.category).is_some());
        }
    }

    #[test]
    fn test_combined_totals() {
        let catalog = Catalog::builtin().unwrap();
        let run = run_combined(&catalog, &ModelConfig::default()).unwrap();
        assert_eq!(run.estimates.len(), 26);
        assert_eq!(run.categories.len(), 4);
        assert_eq!(run.sensitivity.len(), 26 * 4);
        let sum: f64 = run.categories.iter().map(|c| c.energy_gwh).sum();
        assert!((sum - run.total_energy_gwh).abs() < 1e-6);
        assert!(
            (run.total_emissions_kt - run.total_energy_gwh * 0.22535).abs() < 1e-6
        );
    }
}
