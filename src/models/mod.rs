pub mod bundle;
pub mod config;
pub mod input;
pub mod plan;
pub mod schedule;
pub mod sku;

pub use bundle::{Bundle, PackLine, SkuCoverage};
pub use config::{FuelConfig, KeyCategory, Meta, Pack, PackRef, PlanStyle, Product, Rules};
pub use input::{BundleInput, PlannerInput};
pub use plan::{
    DurationBand, EventSummary, PlanBreakdown, PlanDiagnostic, ProductPlan, Targets, Totals,
};
pub use schedule::{BottlePlan, ConcentrationWarning, Schedule, ScheduleItem, ScheduleSlot};
pub use sku::{PackFamily, Sku, SkuMap};
