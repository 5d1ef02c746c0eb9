#[macro_use]
extern crate assert_float_eq;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fuel_planner_rs::models::{BundleInput, FuelConfig, KeyCategory, PlannerInput, Sku, SkuMap};
use fuel_planner_rs::planner::{
    compute_plan, compute_targets, project_totals, recompute, CUSTOM_CAFFEINE_PROTOCOL,
};

fn config() -> FuelConfig {
    FuelConfig::bundled().unwrap()
}

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

fn random_input(rng: &mut StdRng, config: &FuelConfig) -> PlannerInput {
    let rules = &config.rules;
    PlannerInput {
        activity: pick(rng, &rules.keys(KeyCategory::Activity)).to_string(),
        duration_hours: rng.gen_range(0.25..12.0),
        rpe: rng.gen_range(1.0..10.0),
        conditions: pick(rng, &rules.keys(KeyCategory::Conditions)).to_string(),
        bottle_size_ml: rng.gen_range(200..2000),
        sweat_rate: pick(rng, &rules.keys(KeyCategory::SweatRate)).to_string(),
        sweat_salt: pick(rng, &rules.keys(KeyCategory::SweatSalt)).to_string(),
        carb_mode: pick(rng, &rules.keys(KeyCategory::CarbMode)).to_string(),
        caffeine_protocol: pick(rng, &rules.keys(KeyCategory::CaffeineProtocol)).to_string(),
        caffeine_custom_fraction: rng.gen_range(0.0..0.75),
        plan_style: pick(rng, &rules.keys(KeyCategory::PlanStyle)).to_string(),
        sodium_replacement: rng.gen_range(0.0..1.0),
        apply_discount: rng.gen_range(0..2) == 1,
    }
}

#[test]
fn test_hot_hard_session_fluid() {
    let input = PlannerInput {
        conditions: "Warm".to_string(),
        rpe: 8.0,
        sweat_rate: "Moderate".to_string(),
        ..Default::default()
    };
    let targets = compute_targets(&input, &config());
    assert_float_absolute_eq!(targets.fluid_target_mlph, 975.0, 1e-9);
}

#[test]
fn test_carb_target_two_to_three_hour_band() {
    let config = config();
    for rpe in 1..=10 {
        let input = PlannerInput {
            duration_hours: 2.5,
            rpe: rpe as f64,
            ..Default::default()
        };
        let targets = compute_targets(&input, &config);
        let expected = (60.0 * targets.rpe_factor).round().min(targets.carb_cap_gph);
        assert_eq!(targets.carb_target_gph, expected, "rpe {}", rpe);
    }
}

#[test]
fn test_recompute_idempotent() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let input = random_input(&mut rng, &config);
        let bundle_input = BundleInput {
            sessions_30d: rng.gen_range(0..60),
            avg_session_hours: rng.gen_range(0.25..12.0),
            fuelled_fraction: rng.gen_range(0.0..1.0),
            apply_discount: true,
        };
        let first = recompute(&input, &bundle_input, &config);
        let second = recompute(&input, &bundle_input, &config);
        assert_eq!(first, second);
    }
}

#[test]
fn test_totals_monotonic_in_duration() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let per_hour: SkuMap<f64> = SkuMap::from_fn(|_| rng.gen_range(0.0..3.0));
        let d1 = rng.gen_range(0.25..24.0);
        let d2 = d1 + rng.gen_range(0.0..24.0);
        let short = project_totals(&per_hour, d1);
        let long = project_totals(&per_hour, d2);
        for sku in Sku::ALL {
            assert!(long[sku] >= short[sku], "{} {} -> {}", sku, d1, d2);
        }
    }
}

#[test]
fn test_totals_cover_hourly_rate() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let per_hour: SkuMap<f64> = SkuMap::from_fn(|_| rng.gen_range(0.0..3.0));
        let hours = rng.gen_range(0.25..24.0);
        let totals = project_totals(&per_hour, hours);
        for sku in Sku::ALL {
            let exact = per_hour[sku] * hours;
            assert!(totals[sku] as f64 + 1e-6 >= exact);
            assert!((totals[sku] as f64) < exact + 1.0);
        }
    }
}

#[test]
fn test_rates_non_negative_and_sodium_remainder_clamped() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let input = random_input(&mut rng, &config);
        let targets = compute_targets(&input, &config);
        let plan = compute_plan(&targets, &input.plan_style, &config);
        assert!(plan.breakdown.sodium_remaining_mgph >= 0.0);
        for sku in Sku::ALL {
            let rate = plan.rate(sku);
            assert!(rate.is_finite() && rate >= 0.0, "{} = {}", sku, rate);
        }
    }
}

#[test]
fn test_products_deliver_carb_target() {
    let config = config();
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..100 {
        let input = random_input(&mut rng, &config);
        let targets = compute_targets(&input, &config);
        let plan = compute_plan(&targets, &input.plan_style, &config);
        let carbs: f64 = Sku::ALL
            .iter()
            .map(|&sku| plan.rate(sku) * config.product(sku).carbs_g)
            .sum();
        assert_float_absolute_eq!(carbs, targets.carb_target_gph, 1e-6);
    }
}

#[test]
fn test_event_summary() {
    let config = config();
    let input = PlannerInput {
        duration_hours: 4.0,
        caffeine_protocol: CUSTOM_CAFFEINE_PROTOCOL.to_string(),
        caffeine_custom_fraction: 0.5,
        ..Default::default()
    };
    let out = recompute(&input, &BundleInput::default(), &config);
    let t = &out.targets;

    assert_float_absolute_eq!(out.summary.total_carbs_g, t.carb_target_gph * 4.0, 1e-9);
    assert_float_absolute_eq!(out.summary.total_fluid_l, t.fluid_target_mlph * 4.0 / 1000.0, 1e-9);
    assert_float_absolute_eq!(out.summary.total_sodium_mg, t.sodium_target_mgph * 4.0, 1e-9);
    assert_float_absolute_eq!(
        out.summary.total_caffeine_mg,
        (out.plan.caffeine_mg_per_hour * 4.0).round(),
        1e-9
    );
    assert!(out.summary.total_caffeine_mg > 0.0);
    assert_float_absolute_eq!(out.summary.bottles_per_hour, t.fluid_target_mlph / 750.0, 1e-9);
}

#[test]
fn test_out_of_range_inputs_clamped() {
    let config = config();
    let input = PlannerInput {
        duration_hours: -3.0,
        rpe: 42.0,
        bottle_size_ml: 0,
        sodium_replacement: 9.0,
        ..Default::default()
    };
    let out = recompute(&input, &BundleInput::default(), &config);
    assert_eq!(out.input.duration_hours, 0.25);
    assert_eq!(out.input.rpe, 10.0);
    assert_eq!(out.input.bottle_size_ml, 200);
    assert_eq!(out.input.sodium_replacement, 1.0);
    assert_eq!(out.targets.duration_hours, 0.25);
}

#[test]
fn test_unknown_plan_style_empty_everything() {
    let config = config();
    let input = PlannerInput {
        plan_style: "Sprint".to_string(),
        ..Default::default()
    };
    let out = recompute(&input, &BundleInput::default(), &config);
    assert!(out.plan.diagnostic.is_some());
    assert!(out.event_bundle.is_empty());
    assert!(out.period.bundle.is_empty());
    assert!(out.schedule.slots.iter().all(|s| s.items.is_empty()));
    // Targets are still computed
    assert_eq!(out.targets.carb_target_gph, 75.0);
}
