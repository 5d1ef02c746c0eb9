use std::fmt;

use serde::Serialize;

use crate::models::sku::{Sku, SkuMap};

/// Advisory note about the drink mix strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConcentrationWarning {
    /// Above 180 g/L.
    VeryConcentrated,
    /// Above 120 g/L, up to 180 g/L.
    HighConcentration,
    /// Below 30 g/L while still carrying carbs.
    VeryDilute,
}

impl fmt::Display for ConcentrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConcentrationWarning::VeryConcentrated => {
                "Very concentrated drink (>180 g/L). Consider more fluid or shifting carbs to gels/bars."
            }
            ConcentrationWarning::HighConcentration => {
                "High concentration (>120 g/L). Practise in training and sip steadily."
            }
            ConcentrationWarning::VeryDilute => {
                "Very dilute drink (<30 g/L). That's fine, most carbs come from gels/bars."
            }
        };
        f.write_str(msg)
    }
}

/// Bottle count and per-bottle mix for the event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottlePlan {
    pub bottle_size_ml: u32,
    pub bottle_count: u32,
    pub bottles_per_hour: f64,
    pub fluid_mlph: f64,
    pub total_fluid_ml: f64,
    /// Exact (fractional) servings over the event.
    pub servings_total: SkuMap<f64>,
    pub servings_per_bottle: SkuMap<f64>,
    pub carbs_per_bottle_g: f64,
    pub sodium_per_bottle_mg: f64,
    pub caffeine_per_bottle_mg: f64,
    pub carbs_per_l: f64,
    pub sodium_per_l: f64,
    pub warnings: Vec<ConcentrationWarning>,
}

/// Units of one product taken in a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleItem {
    pub sku: Sku,
    pub quantity: u32,
}

/// One schedule segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSlot {
    pub index: usize,
    pub start_min: u32,
    pub segment_min: u32,
    /// Start time as `HH:MM`.
    pub time: String,
    pub drink_ml: f64,
    pub items: Vec<ScheduleItem>,
}

/// Time-sliced intake plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub interval_min: u32,
    pub duration_min: u32,
    pub slots: Vec<ScheduleSlot>,
}

impl Schedule {
    /// Units of a SKU across all slots.
    pub fn total_for(&self, sku: Sku) -> u32 {
        self.slots
            .iter()
            .flat_map(|slot| slot.items.iter())
            .filter(|item| item.sku == sku)
            .map(|item| item.quantity)
            .sum()
    }
}
