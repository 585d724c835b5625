//! Text and JSON rendering of model runs.
//!
//! Every category is rendered by the same functions; only the titles
//! change with the category.

pub mod format;
pub mod table;

use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::breakdown::Share;
use crate::model::result::{DeviceSimulation, EstimateResult, SimulationOutcome};
use crate::model::run::{CategoryRun, CombinedRun};
use crate::model::sensitivity::{SensitivityRow, top_by_emissions};
use crate::model::validation::ValidationRow;

use format::{signed_percent, thousands};
use table::{Align, Table};

/// Number of sensitivity rows listed in the overview.
pub const TOP_SENSITIVITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Per-device energy and emissions table, largest national energy first.
pub fn summary_table(title: &str, estimates: &[EstimateResult]) -> String {
    let mut ranked: Vec<&EstimateResult> = estimates.iter().collect();
    ranked.sort_by(|a, b| b.national_energy_gwh.total_cmp(&a.national_energy_gwh));

    let mut t = Table::new(title)
        .column("Device", Align::Left)
        .column("kWh/house/yr", Align::Right)
        .column("Low-High kWh", Align::Right)
        .column("GWh/UK/yr", Align::Right)
        .column("kt CO2e/yr", Align::Right)
        .column("kg CO2e/house/yr", Align::Right);
    for e in ranked {
        t.push_row(vec![
            e.device.clone(),
            format!("{:.1}", e.household_energy_kwh),
            format!(
                "{:.1}-{:.1}",
                e.household_energy_low_kwh(),
                e.household_energy_high_kwh()
            ),
            format!("{:.1}", e.national_energy_gwh),
            format!("{:.1}", e.national_emissions_kt),
            format!("{:.1}", e.household_emissions_kg),
        ]);
    }
    t.render()
}

/// Per-device percentiles, largest median first, followed by the national
/// total.
pub fn monte_carlo_table(title: &str, outcome: &SimulationOutcome) -> String {
    let mut ranked: Vec<&DeviceSimulation> = outcome.devices.iter().collect();
    ranked.sort_by(|a, b| b.summary.p50.total_cmp(&a.summary.p50));

    let mut t = Table::new(title)
        .column("Device", Align::Left)
        .column("P5 kWh/yr", Align::Right)
        .column("P50 kWh/yr", Align::Right)
        .column("P95 kWh/yr", Align::Right);
    for d in ranked {
        t.push_row(vec![
            d.device.clone(),
            format!("{:.1}", d.summary.p5),
            format!("{:.1}", d.summary.p50),
            format!("{:.1}", d.summary.p95),
        ]);
    }

    let mut out = t.render();
    let twh = outcome.national.summary_twh();
    let _ = writeln!(
        out,
        "National total (TWh/yr, {} trials, seed {}): P5 {:.3}  P50 {:.3}  P95 {:.3}",
        outcome.sample_count, outcome.seed, twh.p5, twh.p50, twh.p95
    );
    out
}

pub fn validation_table(title: &str, rows: &[ValidationRow]) -> String {
    let mut t = Table::new(title)
        .column("Device", Align::Left)
        .column("Model GWh", Align::Right)
        .column("ECUK GWh", Align::Right)
        .column("Diff", Align::Right)
        .column("Agreement", Align::Left);
    for r in rows {
        t.push_row(vec![
            r.device.clone(),
            thousands(r.modelled_gwh, 0),
            thousands(r.reference_gwh, 0),
            signed_percent(r.percent_difference),
            r.agreement.label().to_string(),
        ]);
    }
    t.render()
}

fn shares_table(title: &str, unit: &str, shares: &[Share]) -> String {
    let mut t = Table::new(title)
        .column("", Align::Left)
        .column(unit, Align::Right)
        .column("Share", Align::Right);
    for s in shares {
        t.push_row(vec![
            s.label.clone(),
            thousands(s.value, 0),
            format!("{:.1}%", s.percent),
        ]);
    }
    t.render()
}

fn sensitivity_table(
    title: &str,
    rows: &[SensitivityRow],
    value: impl Fn(&SensitivityRow) -> (f64, f64),
    unit: &str,
) -> String {
    let mut t = Table::new(title)
        .column("Device", Align::Left)
        .column("Category", Align::Left)
        .column("Parameter", Align::Left)
        .column(unit, Align::Right)
        .column("%", Align::Right);
    for r in rows {
        let (v, pct) = value(r);
        t.push_row(vec![
            r.device.clone(),
            r.category.to_string(),
            r.parameter.label().to_string(),
            thousands(v, 1),
            format!("{pct:.2}"),
        ]);
    }
    t.render()
}

/// Full text report of one category run.
pub fn render_category(run: &CategoryRun) -> String {
    let noun = run.category.noun();
    let mut out = String::new();

    out.push_str(&summary_table(
        &format!("UK {noun} energy and emissions"),
        &run.estimates,
    ));
    let _ = writeln!(
        out,
        "Total: {} GWh/yr, {} kt CO2e/yr\n",
        thousands(run.total_energy_gwh, 1),
        thousands(run.total_emissions_kt, 1)
    );

    out.push_str(&monte_carlo_table(
        &format!("Monte Carlo: {noun} energy ranges (±10% active power)"),
        &run.simulation,
    ));
    out.push('\n');

    match &run.validation {
        Some(rows) => out.push_str(&validation_table(
            &format!("Validation against ECUK: {} devices (GWh/yr)", run.category),
            rows,
        )),
        None => {
            let _ = writeln!(
                out,
                "ECUK publishes no figures for {} devices; validation skipped.",
                run.category
            );
        }
    }
    out
}

/// Combined report: totals, category and device shares, sensitivity.
pub fn render_combined(run: &CombinedRun, top_n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "UK TOTAL ENERGY CONSUMPTION: {} GWh\nUK TOTAL EMISSIONS:          {} kt CO2e\n",
        thousands(run.total_energy_gwh, 1),
        thousands(run.total_emissions_kt, 1)
    );

    let energy: Vec<Share> = run
        .categories
        .iter()
        .map(|c| Share {
            label: c.category.to_string(),
            value: c.energy_gwh,
            percent: c.energy_percent,
        })
        .collect();
    let emissions: Vec<Share> = run
        .categories
        .iter()
        .map(|c| Share {
            label: c.category.to_string(),
            value: c.emissions_kt,
            percent: c.emissions_percent,
        })
        .collect();
    out.push_str(&shares_table("Energy by category", "GWh/yr", &energy));
    out.push('\n');
    out.push_str(&shares_table("Emissions by category", "kt CO2e/yr", &emissions));
    out.push('\n');

    for group in &run.devices_by_category {
        out.push_str(&shares_table(
            &format!("{} devices", group.category),
            "GWh/yr",
            &group.shares,
        ));
        out.push('\n');
    }

    let top_energy: Vec<SensitivityRow> = run.sensitivity.iter().take(top_n).cloned().collect();
    out.push_str(&sensitivity_table(
        &format!("Top {top_n} most sensitive parameters: energy (±10%)"),
        &top_energy,
        |r| (r.delta_energy_gwh, r.delta_energy_pct),
        "dE GWh",
    ));
    out.push('\n');
    out.push_str(&sensitivity_table(
        &format!("Top {top_n} most sensitive parameters: CO2 (±10%)"),
        &top_by_emissions(&run.sensitivity, top_n),
        |r| (r.delta_emissions_kt, r.delta_emissions_pct),
        "dC kt",
    ));
    out
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Catalog};
    use crate::device::Category;
    use crate::model::config::ModelConfig;
    use crate::model::run::{run_catalog, run_category, run_combined};

    fn kitchen_run() -> CategoryRun {
        let c = Category::Kitchen;
        let profiles = catalog::profiles(c).unwrap();
        let config = ModelConfig::new().with_sample_count(500);
        run_category(c, &profiles, catalog::reference_gwh(c), &config).unwrap()
    }

    #[test]
    fn test_category_report_lists_every_device() {
        let run = kitchen_run();
        let text = render_category(&run);
        for e in &run.estimates {
            assert!(text.contains(&e.device), "missing {}", e.device);
        }
        assert!(text.contains("Validation against ECUK"));
        assert!(text.contains("5913.0"), "kettle national GWh");
    }

    fn device_column(table: &str) -> Vec<String> {
        table
            .lines()
            .skip(4)
            .take_while(|l| !l.starts_with('='))
            .filter_map(|l| l.split("  ").next())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_tables_rank_devices_by_value() {
        let run = kitchen_run();

        let mut by_energy = run.estimates.clone();
        by_energy.sort_by(|a, b| b.national_energy_gwh.total_cmp(&a.national_energy_gwh));
        let expected: Vec<String> = by_energy.iter().map(|e| e.device.clone()).collect();
        let rows = device_column(&summary_table("Kitchen", &run.estimates));
        assert_eq!(rows, expected);
        assert_eq!(rows[0], "Fridge/Freezer");

        let mut by_p50 = run.simulation.devices.clone();
        by_p50.sort_by(|a, b| b.summary.p50.total_cmp(&a.summary.p50));
        let expected: Vec<String> = by_p50.iter().map(|d| d.device.clone()).collect();
        assert_eq!(device_column(&monte_carlo_table("Kitchen", &run.simulation)), expected);
    }

    #[test]
    fn test_personal_report_skips_validation() {
        let c = Category::Personal;
        let profiles = catalog::profiles(c).unwrap();
        let config = ModelConfig::new().with_sample_count(200);
        let run = run_category(c, &profiles, None, &config).unwrap();
        assert!(render_category(&run).contains("validation skipped"));
    }

    #[test]
    fn test_combined_report() {
        let catalog = Catalog::builtin().unwrap();
        let run = run_combined(&catalog, &ModelConfig::default()).unwrap();
        let text = render_combined(&run, TOP_SENSITIVITY);
        assert!(text.contains("UK TOTAL ENERGY CONSUMPTION"));
        assert!(text.contains("Kitchen devices"));
        assert!(text.contains("Others"));
        assert!(text.contains("Top 10 most sensitive parameters: energy"));
    }

    #[test]
    fn test_catalog_json_is_one_document() {
        let catalog = Catalog::builtin().unwrap();
        let runs = run_catalog(&catalog, &ModelConfig::new().with_sample_count(100)).unwrap();
        let json = to_json(&runs).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        let runs = v.as_array().unwrap();
        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0]["category"], "Kitchen");
        assert!(runs[3]["validation"].is_array());
        assert!(runs[2]["validation"].is_null());
    }

    #[test]
    fn test_json_skips_raw_samples() {
        let run = kitchen_run();
        let json = to_json(&run).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["category"], "Kitchen");
        assert!(v["simulation"]["devices"][0].get("samples").is_none());
        assert!(v["simulation"]["national"]["summary"]["p50"].is_number());
    }
}
