use tracing::{debug, warn};

use crate::models::{FuelConfig, PlanBreakdown, PlanDiagnostic, ProductPlan, Sku, SkuMap, Targets};
use crate::planner::constants::*;

/// Bar allowance by duration: none under 2h, half under 3h, full otherwise.
pub fn bar_weight(duration_hours: f64) -> f64 {
    if duration_hours < BAR_EXCLUDED_BELOW_HOURS {
        0.0
    } else if duration_hours < BAR_HALVED_BELOW_HOURS {
        0.5
    } else {
        1.0
    }
}

/// Servings needed to deliver `amount` at `per_serving` each; 0 when either is not positive.
#[inline]
fn servings(amount: f64, per_serving: f64) -> f64 {
    if amount > 0.0 && per_serving > 0.0 {
        amount / per_serving
    } else {
        0.0
    }
}

/// Drink products covering `drink_carbs` g/h. Exactly one tier is active.
fn drink_rates(per_hour: &mut SkuMap<f64>, drink_carbs: f64, caff: f64, config: &FuelConfig) {
    if drink_carbs <= DRINK_TIER_LOW_MAX_GPH {
        per_hour[Sku::MixPlus] = servings(drink_carbs, config.product(Sku::MixPlus).carbs_g);
    } else if drink_carbs <= DRINK_TIER_MID_MAX_GPH {
        per_hour[Sku::Mix60] = servings(drink_carbs, config.product(Sku::Mix60).carbs_g);
    } else {
        per_hour[Sku::Mix90] =
            servings(drink_carbs * (1.0 - caff), config.product(Sku::Mix90).carbs_g);
        per_hour[Sku::Mix90Caff] =
            servings(drink_carbs * caff, config.product(Sku::Mix90Caff).carbs_g);
    }
}

/// Electrolyte tier covering the sodium still missing after drinks and bars.
fn electrolyte_rates(per_hour: &mut SkuMap<f64>, sodium_remaining: f64, config: &FuelConfig) {
    if sodium_remaining <= 0.0 {
        return;
    }
    let sku = if sodium_remaining <= ELECTROLYTE_TIER_LOW_MAX_MGPH {
        Sku::Slt500
    } else if sodium_remaining <= ELECTROLYTE_TIER_MID_MAX_MGPH {
        Sku::Slt1000
    } else {
        Sku::SltPlus
    };
    per_hour[sku] = servings(sodium_remaining, config.product(sku).sodium_mg);
}

/// Map hourly targets onto per-hour product rates for a plan style.
///
/// Unknown plan styles produce an all-zero plan with a diagnostic instead of failing.
pub fn compute_plan(targets: &Targets, plan_style: &str, config: &FuelConfig) -> ProductPlan {
    let Some(style) = config.rules.plan_style(plan_style) else {
        warn!(plan_style, "unknown plan style, returning empty plan");
        return ProductPlan::empty(PlanDiagnostic::UnknownPlanStyle(plan_style.to_string()));
    };

    // Shift whatever bar share the duration excludes onto gels
    let w = bar_weight(targets.duration_hours);
    let drink_share = style.drink_share;
    let bar_share = style.bar_share * w;
    let gel_share = style.gel_share + (style.bar_share - bar_share);

    let carbs = targets.carb_target_gph;
    let drink_carbs = carbs * drink_share;
    let gel_carbs = carbs * gel_share;
    let bar_carbs = carbs * bar_share;
    let caff = targets.caffeine_fraction;

    let mut per_hour: SkuMap<f64> = SkuMap::default();

    drink_rates(&mut per_hour, drink_carbs, caff, config);

    // Gels
    let plain_gel_carbs = gel_carbs * (1.0 - caff);
    per_hour[Sku::Gel30Caff] = servings(gel_carbs * caff, config.product(Sku::Gel30Caff).carbs_g);
    per_hour[Sku::Gel50] = servings(
        plain_gel_carbs * style.gel50_share,
        config.product(Sku::Gel50).carbs_g,
    );
    per_hour[Sku::Gel30] = servings(
        plain_gel_carbs * (1.0 - style.gel50_share),
        config.product(Sku::Gel30).carbs_g,
    );

    // Bars
    if bar_carbs > 0.0 {
        per_hour[Sku::Bar50] = servings(bar_carbs * style.bar50_share, config.product(Sku::Bar50).carbs_g);
        per_hour[Sku::Bar30] = servings(
            bar_carbs * (1.0 - style.bar50_share),
            config.product(Sku::Bar30).carbs_g,
        );
    }

    // Gels carry no sodium in this model
    let sodium_from_products: f64 = Sku::DRINKS
        .iter()
        .chain([Sku::Bar30, Sku::Bar50].iter())
        .map(|&sku| per_hour[sku] * config.product(sku).sodium_mg)
        .sum();
    let sodium_remaining = (targets.sodium_target_mgph - sodium_from_products).max(0.0);

    electrolyte_rates(&mut per_hour, sodium_remaining, config);

    let drink_ml_per_hour = DRINK_SERVING_ML * Sku::DRINKS.iter().map(|&s| per_hour[s]).sum::<f64>();
    let caffeine_mg_per_hour = per_hour[Sku::Mix90Caff] * config.product(Sku::Mix90Caff).caffeine_mg
        + per_hour[Sku::Gel30Caff] * config.product(Sku::Gel30Caff).caffeine_mg;

    let breakdown = PlanBreakdown {
        bar_weight: w,
        drink_share,
        gel_share,
        bar_share,
        drink_carbs_gph: drink_carbs,
        gel_carbs_gph: gel_carbs,
        bar_carbs_gph: bar_carbs,
        sodium_from_products_mgph: sodium_from_products,
        sodium_remaining_mgph: sodium_remaining,
    };
    debug!(?breakdown, "product plan computed");

    ProductPlan {
        per_hour,
        drink_ml_per_hour,
        caffeine_mg_per_hour,
        breakdown,
        diagnostic: None,
    }
}
