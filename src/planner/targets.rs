use crate::models::{DurationBand, FuelConfig, PlannerInput, Targets};
use crate::planner::constants::*;

/// Fluid target (ml/h) from sweat rate, conditions and intensity.
///
/// The intensity term is linear in RPE and zero at RPE 5.
pub fn fluid_target(base_fluid: f64, conditions_adj: f64, rpe: f64) -> f64 {
    let intensity_adj = (rpe - INTENSITY_RPE_CENTER) * INTENSITY_FLUID_PER_RPE_MLPH;
    (base_fluid + conditions_adj + intensity_adj).clamp(FLUID_TARGET_MIN_MLPH, FLUID_TARGET_MAX_MLPH)
}

/// Caffeine fraction: the clamped custom value for "Custom", else the configured protocol.
pub fn caffeine_fraction(input: &PlannerInput, config: &FuelConfig) -> f64 {
    if input.caffeine_protocol == CUSTOM_CAFFEINE_PROTOCOL {
        input.caffeine_custom_fraction.clamp(0.0, CAFFEINE_CUSTOM_MAX)
    } else {
        config.rules.caffeine_fraction(&input.caffeine_protocol)
    }
}

/// Compute hourly carb, fluid and sodium targets.
///
/// Total over any input: unknown keys resolve to defaults, numeric inputs are clamped.
pub fn compute_targets(input: &PlannerInput, config: &FuelConfig) -> Targets {
    let input = input.sanitized();
    let rules = &config.rules;

    // Carbs
    let activity_mult = rules.activity_multiplier(&input.activity);
    let rpe_factor = rules.rpe_factor(input.rpe);
    let band = DurationBand::classify(input.duration_hours);
    let base_carb_gph = rules.band_mid(band) * rpe_factor;
    let carb_cap_gph = rules.carb_cap(&input.carb_mode);
    let carb_target_gph = carb_cap_gph.min((base_carb_gph * activity_mult).round());

    // Fluid
    let base_fluid_mlph = rules.sweat_rate(&input.sweat_rate);
    let conditions_adj_mlph = rules.conditions_adjustment(&input.conditions);
    let intensity_adj_mlph = (input.rpe - INTENSITY_RPE_CENTER) * INTENSITY_FLUID_PER_RPE_MLPH;
    let fluid_target_mlph = fluid_target(base_fluid_mlph, conditions_adj_mlph, input.rpe);

    // Sodium
    let sweat_sodium_mg_l = rules.sweat_sodium(&input.sweat_salt);
    let sodium_target_mgph =
        ((fluid_target_mlph / 1000.0) * sweat_sodium_mg_l * input.sodium_replacement).round();

    Targets {
        duration_hours: input.duration_hours,
        band,
        activity_mult,
        rpe_factor,
        base_carb_gph,
        carb_cap_gph,
        carb_target_gph,
        base_fluid_mlph,
        conditions_adj_mlph,
        intensity_adj_mlph,
        fluid_target_mlph,
        sweat_sodium_mg_l,
        sodium_replacement: input.sodium_replacement,
        sodium_target_mgph,
        caffeine_fraction: caffeine_fraction(&input, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FuelConfig {
        FuelConfig::bundled().unwrap()
    }

    #[test]
    fn test_fluid_target_scenario() {
        // 800 base + 100 warm + (8 - 5) * 25
        assert_eq!(fluid_target(800.0, 100.0, 8.0), 975.0);
    }

    #[test]
    fn test_fluid_target_clamped() {
        assert_eq!(fluid_target(1200.0, 300.0, 10.0), FLUID_TARGET_MAX_MLPH);
        assert_eq!(fluid_target(400.0, -100.0, 1.0), FLUID_TARGET_MIN_MLPH);
    }

    #[test]
    fn test_default_input_targets() {
        // 3h → 3–5h band, mid 75; rpe 6 → factor 1.0; cycling 1.0
        let targets = compute_targets(&PlannerInput::default(), &config());
        assert_eq!(targets.band, DurationBand::ThreeToFive);
        assert_eq!(targets.rpe_factor, 1.0);
        assert_eq!(targets.carb_target_gph, 75.0);
        // 800 + 0 + 25
        assert_eq!(targets.fluid_target_mlph, 825.0);
        // 0.825 L * 900 mg/L * 0.5
        assert_eq!(targets.sodium_target_mgph, 371.0);
        assert_eq!(targets.caffeine_fraction, 0.0);
    }

    #[test]
    fn test_carb_target_capped_by_mode() {
        let input = PlannerInput {
            duration_hours: 10.0,
            rpe: 9.0,
            carb_mode: "Low".to_string(),
            ..Default::default()
        };
        // 85 * 1.1 = 93.5 → 94, capped at 60
        let targets = compute_targets(&input, &config());
        assert_eq!(targets.carb_target_gph, 60.0);
    }

    #[test]
    fn test_carb_target_rounded_before_cap() {
        let input = PlannerInput {
            duration_hours: 2.5,
            rpe: 4.0,
            activity: "Running".to_string(),
            ..Default::default()
        };
        // 60 * 0.85 * 0.9 = 45.9 → 46
        let targets = compute_targets(&input, &config());
        assert_eq!(targets.carb_target_gph, 46.0);
    }

    #[test]
    fn test_unknown_keys_use_defaults() {
        let input = PlannerInput {
            activity: "Rowing".to_string(),
            sweat_rate: "Torrential".to_string(),
            sweat_salt: "Briny".to_string(),
            conditions: "Martian".to_string(),
            carb_mode: "Infinite".to_string(),
            caffeine_protocol: "Espresso".to_string(),
            ..Default::default()
        };
        let targets = compute_targets(&input, &config());
        assert_eq!(targets.activity_mult, DEFAULT_ACTIVITY_MULTIPLIER);
        assert_eq!(targets.base_fluid_mlph, DEFAULT_SWEAT_RATE_MLPH);
        assert_eq!(targets.sweat_sodium_mg_l, DEFAULT_SWEAT_SODIUM_MG_L);
        assert_eq!(targets.conditions_adj_mlph, DEFAULT_CONDITIONS_ADJ_MLPH);
        assert_eq!(targets.carb_cap_gph, DEFAULT_CARB_CAP_GPH);
        assert_eq!(targets.caffeine_fraction, DEFAULT_CAFFEINE_FRACTION);
    }

    #[test]
    fn test_custom_caffeine_clamped() {
        let input = PlannerInput {
            caffeine_protocol: CUSTOM_CAFFEINE_PROTOCOL.to_string(),
            caffeine_custom_fraction: 0.9,
            ..Default::default()
        };
        assert_eq!(compute_targets(&input, &config()).caffeine_fraction, 0.75);
    }

    #[test]
    fn test_named_caffeine_protocol() {
        let input = PlannerInput {
            caffeine_protocol: "Medium".to_string(),
            ..Default::default()
        };
        assert_eq!(compute_targets(&input, &config()).caffeine_fraction, 0.5);
    }
}
