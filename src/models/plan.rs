use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::sku::{Sku, SkuMap};

/// Duration classes used to pick the carb reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationBand {
    #[serde(rename = "<1h")]
    UnderOne,
    #[serde(rename = "1–2h")]
    OneToTwo,
    #[serde(rename = "2–3h")]
    TwoToThree,
    #[serde(rename = "3–5h")]
    ThreeToFive,
    #[serde(rename = "5–8h")]
    FiveToEight,
    #[serde(rename = "8h+")]
    EightPlus,
}

impl DurationBand {
    pub const ALL: [DurationBand; 6] = [
        DurationBand::UnderOne,
        DurationBand::OneToTwo,
        DurationBand::TwoToThree,
        DurationBand::ThreeToFive,
        DurationBand::FiveToEight,
        DurationBand::EightPlus,
    ];

    /// Band for a duration. Intervals are half-open, lower bound inclusive.
    pub fn classify(duration_hours: f64) -> Self {
        if duration_hours < 1.0 {
            DurationBand::UnderOne
        } else if duration_hours < 2.0 {
            DurationBand::OneToTwo
        } else if duration_hours < 3.0 {
            DurationBand::TwoToThree
        } else if duration_hours < 5.0 {
            DurationBand::ThreeToFive
        } else if duration_hours < 8.0 {
            DurationBand::FiveToEight
        } else {
            DurationBand::EightPlus
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationBand::UnderOne => "<1h",
            DurationBand::OneToTwo => "1–2h",
            DurationBand::TwoToThree => "2–3h",
            DurationBand::ThreeToFive => "3–5h",
            DurationBand::FiveToEight => "5–8h",
            DurationBand::EightPlus => "8h+",
        }
    }
}

impl fmt::Display for DurationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hourly physiological targets plus the intermediate values that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Targets {
    pub duration_hours: f64,
    pub band: DurationBand,
    pub activity_mult: f64,
    pub rpe_factor: f64,
    pub base_carb_gph: f64,
    pub carb_cap_gph: f64,
    pub carb_target_gph: f64,

    pub base_fluid_mlph: f64,
    pub conditions_adj_mlph: f64,
    pub intensity_adj_mlph: f64,
    pub fluid_target_mlph: f64,

    pub sweat_sodium_mg_l: f64,
    pub sodium_replacement: f64,
    pub sodium_target_mgph: f64,

    pub caffeine_fraction: f64,
}

/// Why a plan came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlanDiagnostic {
    UnknownPlanStyle(String),
}

impl fmt::Display for PlanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanDiagnostic::UnknownPlanStyle(name) => write!(f, "Unknown plan style '{}'", name),
        }
    }
}

/// How the hourly carb target was split.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanBreakdown {
    /// Bar allowance weight (0, 0.5 or 1).
    pub bar_weight: f64,
    pub drink_share: f64,
    pub gel_share: f64,
    pub bar_share: f64,
    pub drink_carbs_gph: f64,
    pub gel_carbs_gph: f64,
    pub bar_carbs_gph: f64,
    /// Sodium already delivered by drinks and bars (mg/h).
    pub sodium_from_products_mgph: f64,
    /// Sodium left for the electrolyte tier (mg/h), never negative.
    pub sodium_remaining_mgph: f64,
}

/// Per-hour consumption rate for every product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPlan {
    pub per_hour: SkuMap<f64>,
    pub drink_ml_per_hour: f64,
    pub caffeine_mg_per_hour: f64,
    pub breakdown: PlanBreakdown,
    pub diagnostic: Option<PlanDiagnostic>,
}

impl ProductPlan {
    /// All-zero plan carrying a diagnostic.
    pub fn empty(diagnostic: PlanDiagnostic) -> Self {
        Self {
            per_hour: SkuMap::default(),
            drink_ml_per_hour: 0.0,
            caffeine_mg_per_hour: 0.0,
            breakdown: PlanBreakdown::default(),
            diagnostic: Some(diagnostic),
        }
    }

    #[inline]
    pub fn rate(&self, sku: Sku) -> f64 {
        self.per_hour[sku]
    }
}

/// Whole units per SKU for one period.
pub type Totals = SkuMap<u32>;

/// Headline numbers for the event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub total_carbs_g: f64,
    pub total_fluid_l: f64,
    pub total_sodium_mg: f64,
    pub total_caffeine_mg: f64,
    pub bottles_per_hour: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_lower_inclusive() {
        assert_eq!(DurationBand::classify(0.5), DurationBand::UnderOne);
        assert_eq!(DurationBand::classify(1.0), DurationBand::OneToTwo);
        assert_eq!(DurationBand::classify(1.99), DurationBand::OneToTwo);
        assert_eq!(DurationBand::classify(2.0), DurationBand::TwoToThree);
        assert_eq!(DurationBand::classify(3.0), DurationBand::ThreeToFive);
        assert_eq!(DurationBand::classify(5.0), DurationBand::FiveToEight);
        assert_eq!(DurationBand::classify(8.0), DurationBand::EightPlus);
        assert_eq!(DurationBand::classify(30.0), DurationBand::EightPlus);
    }

    #[test]
    fn test_band_serde_labels() {
        for band in DurationBand::ALL {
            let json = serde_json::to_string(&band).unwrap();
            assert_eq!(json, format!("\"{}\"", band.label()));
        }
    }

    #[test]
    fn test_empty_plan() {
        let plan = ProductPlan::empty(PlanDiagnostic::UnknownPlanStyle("Nope".to_string()));
        assert!(Sku::ALL.iter().all(|&s| plan.rate(s) == 0.0));
        assert_eq!(
            plan.diagnostic.unwrap().to_string(),
            "Unknown plan style 'Nope'"
        );
    }
}
