use crate::models::{
    BottlePlan, ConcentrationWarning, FuelConfig, ProductPlan, Schedule, ScheduleItem, ScheduleSlot,
    Sku, SkuMap, Targets, Totals,
};
use crate::planner::constants::*;
use crate::planner::totals::project_totals;

/// Format minutes from the start as `HH:MM`.
pub fn format_hh_mm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Spread `total` units over segments in proportion to their length.
///
/// Uses cumulative floors: the allocation up to segment `i` is
/// `floor(total * elapsed_i / total_length)`, so the parts always sum to `total`.
pub fn distribute_weighted(total: u32, segment_lengths: &[u32]) -> Vec<u32> {
    let total_len: u64 = segment_lengths.iter().map(|&l| l as u64).sum();
    if total_len == 0 {
        return vec![0; segment_lengths.len()];
    }

    let total = total as u64;
    let mut elapsed = 0u64;
    segment_lengths
        .iter()
        .map(|&len| {
            let before = total * elapsed / total_len;
            elapsed += len as u64;
            let after = total * elapsed / total_len;
            (after - before) as u32
        })
        .collect()
}

/// Advisory warnings for a drink of the given strength.
pub fn concentration_warnings(carbs_per_l: f64, carbs_per_bottle: f64) -> Vec<ConcentrationWarning> {
    let mut warnings = Vec::new();
    if carbs_per_l > VERY_CONCENTRATED_G_PER_L {
        warnings.push(ConcentrationWarning::VeryConcentrated);
    } else if carbs_per_l > HIGH_CONCENTRATION_G_PER_L {
        warnings.push(ConcentrationWarning::HighConcentration);
    }
    if carbs_per_l < VERY_DILUTE_G_PER_L && carbs_per_bottle > 0.0 {
        warnings.push(ConcentrationWarning::VeryDilute);
    }
    warnings
}

/// Bottle count and per-bottle mix.
///
/// Concentrations use exact (fractional) servings, not the whole units bought.
pub fn plan_bottles(
    targets: &Targets,
    plan: &ProductPlan,
    duration_hours: f64,
    bottle_size_ml: u32,
    config: &FuelConfig,
) -> BottlePlan {
    let bottle_size_ml = bottle_size_ml.clamp(BOTTLE_SIZE_ML_MIN, BOTTLE_SIZE_ML_MAX);
    let bottle_ml = bottle_size_ml as f64;
    let duration_hours = clamp_event_hours(duration_hours);
    let fluid_mlph = targets.fluid_target_mlph;
    let total_fluid_ml = fluid_mlph * duration_hours;
    let bottle_count = ceil_units(total_fluid_ml / bottle_ml).max(1);

    let mut servings_total: SkuMap<f64> = SkuMap::default();
    let mut servings_per_bottle: SkuMap<f64> = SkuMap::default();
    let mut carbs_per_bottle_g = 0.0;
    let mut sodium_per_bottle_mg = 0.0;
    let mut caffeine_per_bottle_mg = 0.0;

    for sku in Sku::DRINKS {
        let units = plan.rate(sku) * duration_hours;
        if units <= 0.0 {
            continue;
        }
        let product = config.product(sku);
        let per_bottle = units / bottle_count as f64;
        servings_total[sku] = units;
        servings_per_bottle[sku] = per_bottle;
        carbs_per_bottle_g += per_bottle * product.carbs_g;
        sodium_per_bottle_mg += per_bottle * product.sodium_mg;
        caffeine_per_bottle_mg += per_bottle * product.caffeine_mg;
    }

    let litres = bottle_ml / 1000.0;
    let carbs_per_l = carbs_per_bottle_g / litres;
    let sodium_per_l = sodium_per_bottle_mg / litres;

    BottlePlan {
        bottle_size_ml,
        bottle_count,
        bottles_per_hour: fluid_mlph / bottle_ml,
        fluid_mlph,
        total_fluid_ml,
        servings_total,
        servings_per_bottle,
        carbs_per_bottle_g,
        sodium_per_bottle_mg,
        caffeine_per_bottle_mg,
        carbs_per_l,
        sodium_per_l,
        warnings: concentration_warnings(carbs_per_l, carbs_per_bottle_g),
    }
}

/// 30-minute intake schedule. Non-drink totals are spread by elapsed time; drink volume is
/// continuous. The duration is clamped to the accepted event range.
pub fn build_schedule(targets: &Targets, totals: &Totals, duration_hours: f64) -> Schedule {
    let interval = SCHEDULE_INTERVAL_MIN;
    let duration_min = (clamp_event_hours(duration_hours) * 60.0).round() as u32;
    let n_slots = duration_min.div_ceil(interval).max(1);

    let segment_lengths: Vec<u32> = (0..n_slots)
        .map(|i| duration_min.saturating_sub(i * interval).min(interval))
        .collect();

    let allocations: Vec<(Sku, Vec<u32>)> = Sku::SOLIDS
        .iter()
        .map(|&sku| (sku, distribute_weighted(totals[sku], &segment_lengths)))
        .collect();

    let slots = segment_lengths
        .iter()
        .enumerate()
        .map(|(i, &segment_min)| {
            let start_min = i as u32 * interval;
            let items = allocations
                .iter()
                .filter(|(_, alloc)| alloc[i] > 0)
                .map(|(sku, alloc)| ScheduleItem {
                    sku: *sku,
                    quantity: alloc[i],
                })
                .collect();
            ScheduleSlot {
                index: i,
                start_min,
                segment_min,
                time: format_hh_mm(start_min),
                drink_ml: targets.fluid_target_mlph * segment_min as f64 / 60.0,
                items,
            }
        })
        .collect();

    Schedule {
        interval_min: interval,
        duration_min,
        slots,
    }
}

/// Bottles and schedule for one event, from the plan's own whole-unit totals.
pub fn plan_bottles_and_schedule(
    targets: &Targets,
    plan: &ProductPlan,
    duration_hours: f64,
    bottle_size_ml: u32,
    config: &FuelConfig,
) -> (BottlePlan, Schedule) {
    let duration_hours = clamp_event_hours(duration_hours);
    let totals = project_totals(&plan.per_hour, duration_hours);
    let bottles = plan_bottles(targets, plan, duration_hours, bottle_size_ml, config);
    let schedule = build_schedule(targets, &totals, duration_hours);
    (bottles, schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlannerInput;
    use crate::planner::product_plan::compute_plan;
    use crate::planner::targets::compute_targets;

    fn pipeline(input: &PlannerInput) -> (FuelConfig, Targets, ProductPlan) {
        let config = FuelConfig::bundled().unwrap();
        let targets = compute_targets(input, &config);
        let plan = compute_plan(&targets, &input.plan_style, &config);
        (config, targets, plan)
    }

    #[test]
    fn test_format_hh_mm() {
        assert_eq!(format_hh_mm(0), "00:00");
        assert_eq!(format_hh_mm(90), "01:30");
        assert_eq!(format_hh_mm(605), "10:05");
    }

    #[test]
    fn test_distribute_weighted_even() {
        assert_eq!(distribute_weighted(6, &[30, 30, 30]), vec![2, 2, 2]);
        assert_eq!(distribute_weighted(4, &[30, 30, 30]), vec![1, 1, 2]);
    }

    #[test]
    fn test_distribute_weighted_short_last_segment() {
        // 75 minutes: 30 + 30 + 15
        let parts = distribute_weighted(5, &[30, 30, 15]);
        assert_eq!(parts.iter().sum::<u32>(), 5);
        assert_eq!(parts, vec![2, 2, 1]);
    }

    #[test]
    fn test_distribute_weighted_zero_length() {
        assert_eq!(distribute_weighted(3, &[0, 0]), vec![0, 0]);
        assert_eq!(distribute_weighted(0, &[30]), vec![0]);
    }

    #[test]
    fn test_concentration_warnings() {
        assert_eq!(concentration_warnings(200.0, 150.0), vec![ConcentrationWarning::VeryConcentrated]);
        assert_eq!(concentration_warnings(180.0, 135.0), vec![ConcentrationWarning::HighConcentration]);
        assert!(concentration_warnings(120.0, 90.0).is_empty());
        assert_eq!(concentration_warnings(20.0, 15.0), vec![ConcentrationWarning::VeryDilute]);
        assert!(concentration_warnings(0.0, 0.0).is_empty());
    }

    #[test]
    fn test_bottle_count_minimum_one() {
        let input = PlannerInput {
            duration_hours: 0.25,
            ..Default::default()
        };
        let (config, targets, plan) = pipeline(&input);
        let bottles = plan_bottles(&targets, &plan, 0.25, 1000, &config);
        assert_eq!(bottles.bottle_count, 1);
    }

    #[test]
    fn test_bottle_count_and_servings() {
        let input = PlannerInput::default();
        let (config, targets, plan) = pipeline(&input);
        let bottles = plan_bottles(&targets, &plan, 3.0, 750, &config);
        // 825 ml/h * 3h = 2475 ml → 4 bottles of 750
        assert_eq!(bottles.bottle_count, 4);
        let per_bottle_sum: f64 = bottles.servings_per_bottle.iter().map(|(_, v)| *v).sum();
        let total_sum: f64 = bottles.servings_total.iter().map(|(_, v)| *v).sum();
        assert!((per_bottle_sum * 4.0 - total_sum).abs() < 1e-9);
        assert!(bottles.servings_total[Sku::Gel30] == 0.0);
    }

    #[test]
    fn test_schedule_segments() {
        let input = PlannerInput {
            duration_hours: 2.25,
            ..Default::default()
        };
        let (_, targets, plan) = pipeline(&input);
        let totals = project_totals(&plan.per_hour, 2.25);
        let schedule = build_schedule(&targets, &totals, 2.25);
        assert_eq!(schedule.duration_min, 135);
        assert_eq!(schedule.slots.len(), 5);
        assert_eq!(schedule.slots[4].segment_min, 15);
        assert_eq!(schedule.slots[4].time, "02:00");
        let drink_total: f64 = schedule.slots.iter().map(|s| s.drink_ml).sum();
        assert!((drink_total - targets.fluid_target_mlph * 2.25).abs() < 1e-6);
        for sku in Sku::SOLIDS {
            assert_eq!(schedule.total_for(sku), totals[sku]);
        }
    }

    #[test]
    fn test_out_of_range_duration_clamped() {
        let (config, targets, plan) = pipeline(&PlannerInput::default());
        let (bottles, schedule) =
            plan_bottles_and_schedule(&targets, &plan, f64::INFINITY, 750, &config);
        assert_eq!(schedule.duration_min, 48 * 60);
        assert_eq!(schedule.slots.len(), 96);
        assert!((bottles.total_fluid_ml - targets.fluid_target_mlph * 48.0).abs() < 1e-6);

        let schedule = build_schedule(&targets, &SkuMap::default(), f64::NAN);
        assert_eq!(schedule.duration_min, 15);
        assert_eq!(schedule.slots.len(), 1);
    }

    #[test]
    fn test_schedule_excludes_drinks() {
        let (_, targets, plan) = pipeline(&PlannerInput::default());
        let totals = project_totals(&plan.per_hour, 3.0);
        let schedule = build_schedule(&targets, &totals, 3.0);
        for sku in Sku::DRINKS {
            assert_eq!(schedule.total_for(sku), 0);
        }
    }
}
