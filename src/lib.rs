pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{FuelError, Result};
pub use models::{BundleInput, FuelConfig, PlannerInput, Sku};
pub use planner::{recompute, PlannerOutputs};
pub use state::PlannerSession;
