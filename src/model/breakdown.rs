use serde::Serialize;

use crate::device::Category;

use super::result::EstimateResult;

/// Label of the bucket that collects the smallest devices of a category.
pub const OTHERS: &str = "Others";

/// Share of a total held by one labelled slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub value: f64,
    /// Percentage of the sum of all slices.
    pub percent: f64,
}

/// National energy and emissions of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub energy_gwh: f64,
    pub emissions_kt: f64,
    pub energy_percent: f64,
    pub emissions_percent: f64,
}

/// Converts `(label, value)` pairs into percentage shares.
pub fn shares(slices: &[(String, f64)]) -> Vec<Share> {
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    slices
        .iter()
        .map(|(label, value)| Share {
            label: label.clone(),
            value: *value,
            percent: if total > 0.0 { value / total * 100.0 } else { 0.0 },
        })
        .collect()
}

/// Totals per category, ordered alphabetically by category label.
pub fn category_totals(estimates: &[(Category, EstimateResult)]) -> Vec<CategoryTotal> {
    let mut order: Vec<Category> = Vec::new();
    for (c, _) in estimates {
        if !order.contains(c) {
            order.push(*c);
        }
    }
    order.sort_by_key(|c| c.label());

    let energy_total: f64 = estimates.iter().map(|(_, e)| e.national_energy_gwh).sum();
    let emissions_total: f64 = estimates.iter().map(|(_, e)| e.national_emissions_kt).sum();

    order
        .into_iter()
        .map(|category| {
            let (energy, emissions) = estimates
                .iter()
                .filter(|(c, _)| *c == category)
                .fold((0.0, 0.0), |(e, k), (_, r)| {
                    (e + r.national_energy_gwh, k + r.national_emissions_kt)
                });
            CategoryTotal {
                category,
                energy_gwh: energy,
                emissions_kt: emissions,
                energy_percent: if energy_total > 0.0 {
                    energy / energy_total * 100.0
                } else {
                    0.0
                },
                emissions_percent: if emissions_total > 0.0 {
                    emissions / emissions_total * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Device energy shares of one category, largest first.
///
/// With more than `max_slices` devices the top `max_slices - 1` are kept and
/// the rest are folded into [`OTHERS`].
pub fn device_shares(estimates: &[EstimateResult], max_slices: usize) -> Vec<Share> {
    let mut sorted: Vec<(String, f64)> = estimates
        .iter()
        .map(|e| (e.device.clone(), e.national_energy_gwh))
        .collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    if max_slices > 0 && sorted.len() > max_slices {
        let keep = max_slices - 1;
        let rest: f64 = sorted[keep..].iter().map(|(_, v)| v).sum();
        sorted.truncate(keep);
        sorted.push((OTHERS.to_string(), rest));
    }
    shares(&sorted)
}
