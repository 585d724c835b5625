//! Energy and emissions model.
//!
//! The deterministic estimator annualises rated and standby power into
//! household and national energy. The Monte Carlo propagator turns the ±10%
//! active power tolerance into percentile bands per device and for the
//! national total. Validation, sensitivity and category breakdowns are
//! built on top of the deterministic estimates.

pub mod breakdown;
pub mod config;
pub mod distribution;
pub mod error;
pub mod estimate;
pub mod monte_carlo;
pub mod percentile;
pub mod result;
pub mod run;
pub mod sensitivity;
pub mod validation;

pub use config::ModelConfig;
pub use error::{ModelError, ModelResult};
pub use estimate::{estimate, estimate_all};
pub use monte_carlo::{simulate, simulate_all};
pub use result::{
    DeviceSimulation, EstimateResult, MonteCarloSummary, NationalSimulation, SimulationOutcome,
};
pub use run::{CategoryRun, CombinedRun, run_catalog, run_category, run_combined};
