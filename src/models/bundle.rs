use serde::Serialize;

use crate::models::sku::Sku;

/// One pack type and quantity chosen to cover part of a SKU's need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackLine {
    pub pack_key: String,
    pub sku: Sku,
    pub pack_option: String,
    pub quantity: u32,
    /// quantity × units per pack.
    pub units_included: u32,
    /// Share of the SKU's need this line covers.
    pub units_needed: u32,
    pub overshoot: u32,
    pub price: f64,
    pub discounted_price: f64,
    pub url: String,
}

/// How well the selected packs cover one SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkuCoverage {
    pub sku: Sku,
    pub units_needed: u32,
    pub units_included: u32,
    pub overshoot: u32,
}

/// Selected packs plus pricing and the minimum-variety rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    pub lines: Vec<PackLine>,
    pub coverage: Vec<SkuCoverage>,
    /// SKUs with at least one pack line.
    pub distinct_items: u32,
    /// Pack types with a nonzero quantity.
    pub distinct_pack_types: u32,
    pub total_price: f64,
    pub total_discounted: f64,
    pub min_distinct_items: u32,
    pub meets_minimum: bool,
}

impl Bundle {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Amount saved by the discount.
    pub fn savings(&self) -> f64 {
        self.total_price - self.total_discounted
    }

    /// Lines belonging to one SKU.
    pub fn lines_for(&self, sku: Sku) -> impl Iterator<Item = &PackLine> {
        self.lines.iter().filter(move |line| line.sku == sku)
    }
}
