use serde::Serialize;
use tracing::debug;

use crate::models::{
    BottlePlan, Bundle, BundleInput, EventSummary, FuelConfig, PlannerInput, ProductPlan, Schedule,
    Targets, Totals,
};
use crate::planner::bundler::bundle_packs;
use crate::planner::product_plan::compute_plan;
use crate::planner::schedule::{build_schedule, plan_bottles};
use crate::planner::targets::compute_targets;
use crate::planner::totals::project_totals;

/// Totals and bundle for the 30-day usage profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodProjection {
    pub fuelled_hours: f64,
    pub adjusted_hours: f64,
    pub totals: Totals,
    pub bundle: Bundle,
}

/// Everything derived from one input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerOutputs {
    /// The input after clamping.
    pub input: PlannerInput,
    pub targets: Targets,
    pub plan: ProductPlan,
    pub event_totals: Totals,
    pub event_bundle: Bundle,
    pub summary: EventSummary,
    pub bottles: BottlePlan,
    pub schedule: Schedule,
    pub period: PeriodProjection,
}

fn discount_rate(apply: bool, config: &FuelConfig) -> f64 {
    if apply { config.meta.discount_rate() } else { 0.0 }
}

/// Headline totals for an event of `duration_hours`.
pub fn event_summary(targets: &Targets, plan: &ProductPlan, bottle_size_ml: u32, duration_hours: f64) -> EventSummary {
    EventSummary {
        total_carbs_g: targets.carb_target_gph * duration_hours,
        total_fluid_l: targets.fluid_target_mlph * duration_hours / 1000.0,
        total_sodium_mg: targets.sodium_target_mgph * duration_hours,
        total_caffeine_mg: (plan.caffeine_mg_per_hour * duration_hours).round(),
        bottles_per_hour: targets.fluid_target_mlph / bottle_size_ml as f64,
    }
}

/// Project the hourly plan over the fuelled hours of a 30-day period.
pub fn project_period(plan: &ProductPlan, bundle_input: &BundleInput, config: &FuelConfig) -> PeriodProjection {
    let bundle_input = bundle_input.sanitized();
    let fuelled_hours = bundle_input.fuelled_hours();
    let adjusted_hours = bundle_input.adjusted_hours();
    let totals = project_totals(&plan.per_hour, adjusted_hours);
    let bundle = bundle_packs(&totals, discount_rate(bundle_input.apply_discount, config), config);

    PeriodProjection {
        fuelled_hours,
        adjusted_hours,
        totals,
        bundle,
    }
}

/// Run the whole pipeline for one input snapshot.
///
/// Pure: identical inputs and configuration give identical outputs.
pub fn recompute(input: &PlannerInput, bundle_input: &BundleInput, config: &FuelConfig) -> PlannerOutputs {
    let input = input.sanitized();
    let duration = input.duration_hours;

    let targets = compute_targets(&input, config);
    let plan = compute_plan(&targets, &input.plan_style, config);

    let event_totals = project_totals(&plan.per_hour, duration);
    let event_bundle = bundle_packs(&event_totals, discount_rate(input.apply_discount, config), config);

    let summary = event_summary(&targets, &plan, input.bottle_size_ml, duration);
    let bottles = plan_bottles(&targets, &plan, duration, input.bottle_size_ml, config);
    let schedule = build_schedule(&targets, &event_totals, duration);

    let period = project_period(&plan, bundle_input, config);

    debug!(
        carbs = targets.carb_target_gph,
        fluid = targets.fluid_target_mlph,
        sodium = targets.sodium_target_mgph,
        event_lines = event_bundle.lines.len(),
        period_lines = period.bundle.lines.len(),
        "pipeline recomputed"
    );

    PlannerOutputs {
        input,
        targets,
        plan,
        event_totals,
        event_bundle,
        summary,
        bottles,
        schedule,
        period,
    }
}
