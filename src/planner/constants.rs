// ─────────────────────────────────────────────────────────────────────────────
// Configuration fallbacks (used when a key is missing from the table)
// ─────────────────────────────────────────────────────────────────────────────

/// Activity multiplier for an unknown activity.
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.0;

/// RPE factor when the threshold table is empty.
pub const DEFAULT_RPE_FACTOR: f64 = 1.0;

/// Carb reference (g/h) for a duration band missing from the table.
pub const DEFAULT_BAND_MID_GPH: f64 = 0.0;

/// Carb ceiling (g/h) for an unknown carb mode.
pub const DEFAULT_CARB_CAP_GPH: f64 = 90.0;

/// Sweat rate (ml/h) for an unknown sweat-rate key.
pub const DEFAULT_SWEAT_RATE_MLPH: f64 = 800.0;

/// Fluid adjustment (ml/h) for unknown conditions.
pub const DEFAULT_CONDITIONS_ADJ_MLPH: f64 = 0.0;

/// Sweat sodium concentration (mg/L) for an unknown sweat-salt key.
pub const DEFAULT_SWEAT_SODIUM_MG_L: f64 = 900.0;

/// Caffeine fraction for an unknown caffeine protocol.
pub const DEFAULT_CAFFEINE_FRACTION: f64 = 0.0;

/// Protocol name that switches to the user-supplied caffeine fraction.
pub const CUSTOM_CAFFEINE_PROTOCOL: &str = "Custom";

// ─────────────────────────────────────────────────────────────────────────────
// Input ranges
// ─────────────────────────────────────────────────────────────────────────────

pub const DURATION_HOURS_MIN: f64 = 0.25;
pub const DURATION_HOURS_MAX: f64 = 48.0;

pub const RPE_MIN: f64 = 1.0;
pub const RPE_MAX: f64 = 10.0;

pub const BOTTLE_SIZE_ML_MIN: u32 = 200;
pub const BOTTLE_SIZE_ML_MAX: u32 = 2000;

pub const CAFFEINE_CUSTOM_MAX: f64 = 0.75;

pub const SODIUM_REPLACEMENT_MIN: f64 = 0.0;
pub const SODIUM_REPLACEMENT_MAX: f64 = 1.0;

pub const SESSIONS_30D_MAX: u32 = 60;

pub const AVG_SESSION_HOURS_MIN: f64 = 0.25;
pub const AVG_SESSION_HOURS_MAX: f64 = 12.0;

/// Longest span a projection covers: every session of a full 30-day block at maximum length.
pub const PROJECTION_HOURS_MAX: f64 = SESSIONS_30D_MAX as f64 * AVG_SESSION_HOURS_MAX;

/// Bottle sizes offered by the interactive prompt.
pub const BOTTLE_SIZE_OPTIONS_ML: [u32; 6] = [250, 330, 500, 600, 750, 1000];

// ─────────────────────────────────────────────────────────────────────────────
// Targets
// ─────────────────────────────────────────────────────────────────────────────

/// Fluid target clamp (ml/h).
pub const FLUID_TARGET_MIN_MLPH: f64 = 300.0;
pub const FLUID_TARGET_MAX_MLPH: f64 = 1200.0;

/// RPE at which the intensity fluid adjustment is zero.
pub const INTENSITY_RPE_CENTER: f64 = 5.0;

/// Extra fluid per RPE point above the center (ml/h).
pub const INTENSITY_FLUID_PER_RPE_MLPH: f64 = 25.0;

// ─────────────────────────────────────────────────────────────────────────────
// Product plan
// ─────────────────────────────────────────────────────────────────────────────

/// Below this duration bars are excluded entirely.
pub const BAR_EXCLUDED_BELOW_HOURS: f64 = 2.0;

/// Below this duration only half the configured bar share is kept.
pub const BAR_HALVED_BELOW_HOURS: f64 = 3.0;

/// Upper bound (inclusive) of drink carbs covered by MIX+ (g/h).
pub const DRINK_TIER_LOW_MAX_GPH: f64 = 35.0;

/// Upper bound (inclusive) of drink carbs covered by MIX60 (g/h).
pub const DRINK_TIER_MID_MAX_GPH: f64 = 70.0;

/// Upper bound (inclusive) of sodium remainder covered by SLT07 500 (mg/h).
pub const ELECTROLYTE_TIER_LOW_MAX_MGPH: f64 = 500.0;

/// Upper bound (inclusive) of sodium remainder covered by SLT07 1000 (mg/h).
pub const ELECTROLYTE_TIER_MID_MAX_MGPH: f64 = 1000.0;

/// Water volume of one drink serving (ml).
pub const DRINK_SERVING_ML: f64 = 500.0;

/// Mixed drink volume within this distance of the fluid target needs no top-up note (ml/h).
pub const DRINK_VOLUME_TOLERANCE_MLPH: f64 = 150.0;

// ─────────────────────────────────────────────────────────────────────────────
// Totals, bottles, schedule
// ─────────────────────────────────────────────────────────────────────────────

/// Guard against floating-point noise just above an integer before ceiling.
pub const CEIL_EPSILON: f64 = 1e-9;

/// Schedule segment length (minutes).
pub const SCHEDULE_INTERVAL_MIN: u32 = 30;

/// Drink concentration warning thresholds (g carbs per litre).
pub const VERY_CONCENTRATED_G_PER_L: f64 = 180.0;
pub const HIGH_CONCENTRATION_G_PER_L: f64 = 120.0;
pub const VERY_DILUTE_G_PER_L: f64 = 30.0;

/// Event duration clamped into the accepted range; NaN maps to the minimum.
pub fn clamp_event_hours(hours: f64) -> f64 {
    if hours.is_nan() {
        DURATION_HOURS_MIN
    } else {
        hours.clamp(DURATION_HOURS_MIN, DURATION_HOURS_MAX)
    }
}

/// Ceiling that never rounds down and ignores noise like `3.0000000001`.
///
/// Values past `u32::MAX` saturate; callers bound their hours so real rates stay far below it.
#[inline]
pub fn ceil_units(value: f64) -> u32 {
    if value > 0.0 {
        (value - CEIL_EPSILON).ceil().max(0.0) as u32
    } else {
        0
    }
}
