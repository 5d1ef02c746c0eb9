pub mod bundler;
pub mod constants;
pub mod pipeline;
pub mod product_plan;
pub mod schedule;
pub mod targets;
pub mod totals;

pub use bundler::bundle_packs;
pub use constants::*;
pub use pipeline::{event_summary, project_period, recompute, PeriodProjection, PlannerOutputs};
pub use product_plan::{bar_weight, compute_plan};
pub use schedule::{
    build_schedule, concentration_warnings, distribute_weighted, format_hh_mm, plan_bottles,
    plan_bottles_and_schedule,
};
pub use targets::{compute_targets, fluid_target};
pub use totals::project_totals;
