use super::error::{ModelError, ModelResult};
use super::result::MonteCarloSummary;

/// `q`-th percentile (0..=100) of an ascending slice.
///
/// Linear interpolation between the two closest order statistics at rank
/// `q / 100 * (n - 1)`.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> ModelResult<f64> {
    if sorted.is_empty() {
        return Err(ModelError::parameter(
            "samples",
            "percentile of an empty sample set is undefined",
        ));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(ModelError::parameter(
            "percentile",
            format!("must be in [0, 100], got {q}"),
        ));
    }

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// p5/p50/p95 of an unordered sample set (sorted once).
pub fn summarize(samples: &[f64]) -> ModelResult<MonteCarloSummary> {
    let sorted = sorted_copy(samples);
    Ok(MonteCarloSummary {
        p5: percentile_sorted(&sorted, 5.0)?,
        p50: percentile_sorted(&sorted, 50.0)?,
        p95: percentile_sorted(&sorted, 95.0)?,
    })
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
