use serde::{Deserialize, Serialize};

use crate::planner::constants::*;

/// Everything the user tells the planner about one session.
///
/// Numeric fields may hold anything; calculators read them through [`PlannerInput::sanitized`],
/// which clamps each one into its valid range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerInput {
    pub activity: String,
    pub duration_hours: f64,
    pub rpe: f64,
    pub conditions: String,
    pub bottle_size_ml: u32,
    pub sweat_rate: String,
    pub sweat_salt: String,
    pub carb_mode: String,
    pub caffeine_protocol: String,
    pub caffeine_custom_fraction: f64,
    pub plan_style: String,
    pub sodium_replacement: f64,
    pub apply_discount: bool,
}

impl Default for PlannerInput {
    fn default() -> Self {
        Self {
            activity: "Cycling".to_string(),
            duration_hours: 3.0,
            rpe: 6.0,
            conditions: "Temperate".to_string(),
            bottle_size_ml: 750,
            sweat_rate: "Moderate".to_string(),
            sweat_salt: "Medium".to_string(),
            carb_mode: "Standard".to_string(),
            caffeine_protocol: "None".to_string(),
            caffeine_custom_fraction: 0.25,
            plan_style: "Balanced".to_string(),
            sodium_replacement: 0.5,
            apply_discount: true,
        }
    }
}

/// Clamp that maps NaN to the lower bound.
pub(crate) fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() { lo } else { value.clamp(lo, hi) }
}

impl PlannerInput {
    /// Copy with every numeric field clamped into range.
    pub fn sanitized(&self) -> Self {
        Self {
            duration_hours: clamp_finite(self.duration_hours, DURATION_HOURS_MIN, DURATION_HOURS_MAX),
            rpe: clamp_finite(self.rpe, RPE_MIN, RPE_MAX),
            bottle_size_ml: self.bottle_size_ml.clamp(BOTTLE_SIZE_ML_MIN, BOTTLE_SIZE_ML_MAX),
            caffeine_custom_fraction: clamp_finite(self.caffeine_custom_fraction, 0.0, CAFFEINE_CUSTOM_MAX),
            sodium_replacement: clamp_finite(
                self.sodium_replacement,
                SODIUM_REPLACEMENT_MIN,
                SODIUM_REPLACEMENT_MAX,
            ),
            ..self.clone()
        }
    }
}

/// Monthly usage profile for the 30-day bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleInput {
    pub sessions_30d: u32,
    pub avg_session_hours: f64,
    /// Fraction of sessions that are fuelled with product (0..1).
    pub fuelled_fraction: f64,
    pub apply_discount: bool,
}

impl Default for BundleInput {
    fn default() -> Self {
        Self {
            sessions_30d: 8,
            avg_session_hours: 1.5,
            fuelled_fraction: 0.75,
            apply_discount: true,
        }
    }
}

impl BundleInput {
    pub fn sanitized(&self) -> Self {
        Self {
            sessions_30d: self.sessions_30d.min(SESSIONS_30D_MAX),
            avg_session_hours: clamp_finite(
                self.avg_session_hours,
                AVG_SESSION_HOURS_MIN,
                AVG_SESSION_HOURS_MAX,
            ),
            fuelled_fraction: clamp_finite(self.fuelled_fraction, 0.0, 1.0),
            apply_discount: self.apply_discount,
        }
    }

    /// Training hours over 30 days.
    pub fn fuelled_hours(&self) -> f64 {
        let input = self.sanitized();
        input.sessions_30d as f64 * input.avg_session_hours
    }

    /// Training hours scaled by the fuelled fraction.
    pub fn adjusted_hours(&self) -> f64 {
        self.fuelled_hours() * self.sanitized().fuelled_fraction
    }
}
