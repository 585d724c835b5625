pub mod catalog;
pub mod device;
pub mod model;
pub mod report;

// Prelude
pub use catalog::Catalog;
pub use device::{Category, DeviceProfile};
pub use model::{
    EstimateResult, ModelConfig, ModelError, MonteCarloSummary, estimate, run_catalog,
    run_category, run_combined, simulate, simulate_all,
};
