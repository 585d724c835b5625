use serde::Serialize;

use super::error::{ModelError, ModelResult};
use super::result::EstimateResult;

/// How closely a modelled total matches the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Agreement {
    /// Within ±10%.
    Good,
    /// Within ±25%.
    Fair,
    Poor,
}

impl Agreement {
    pub fn from_percent_difference(pct: f64) -> Self {
        let abs = pct.abs();
        if abs < 10.0 {
            Agreement::Good
        } else if abs < 25.0 {
            Agreement::Fair
        } else {
            Agreement::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Agreement::Good => "good",
            Agreement::Fair => "fair",
            Agreement::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRow {
    pub device: String,
    pub modelled_gwh: f64,
    pub reference_gwh: f64,
    /// `100 * (modelled - reference) / reference`.
    pub percent_difference: f64,
    pub agreement: Agreement,
}

/// Signed percent difference of `modelled` relative to `reference`.
pub fn percent_difference(modelled: f64, reference: f64) -> f64 {
    100.0 * (modelled - reference) / reference
}

/// Compares national totals against a reference mapping.
///
/// Only devices present in both are compared, in estimate order.
pub fn validate(
    estimates: &[EstimateResult],
    reference: &[(&str, f64)],
) -> ModelResult<Vec<ValidationRow>> {
    if let Some((name, value)) = reference
        .iter()
        .find(|(_, v)| !v.is_finite() || *v <= 0.0)
    {
        return Err(ModelError::parameter(
            "reference",
            format!("`{name}` must be a positive total, got {value}"),
        ));
    }

    let rows = estimates
        .iter()
        .filter_map(|e| {
            let (_, reference_gwh) = reference.iter().find(|(n, _)| *n == e.device)?;
            let pct = percent_difference(e.national_energy_gwh, *reference_gwh);
            Some(ValidationRow {
                device: e.device.clone(),
                modelled_gwh: e.national_energy_gwh,
                reference_gwh: *reference_gwh,
                percent_difference: pct,
                agreement: Agreement::from_percent_difference(pct),
            })
        })
        .collect();
    Ok(rows)
}
