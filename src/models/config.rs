use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::models::plan::DurationBand;
use crate::models::sku::Sku;
use crate::planner::constants::*;

/// Bundled configuration table, embedded at compile time.
const BUNDLED_CONFIG_JSON: &str = include_str!("../../data/fuel_config.json");

/// The full configuration table: physiology rules, product facts, packs and business constants.
///
/// Treated as trusted static data. Lookups never fail: a missing key resolves to the
/// documented default in [`crate::planner::constants`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelConfig {
    #[serde(default)]
    pub meta: Meta,

    pub rules: Rules,

    #[serde(default)]
    pub products: BTreeMap<Sku, Product>,

    #[serde(default)]
    pub packs: BTreeMap<String, Pack>,
}

/// Business constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default = "default_currency")]
    pub currency: String,

    /// First-order discount as a fraction (0.15 = 15% off).
    #[serde(default)]
    pub discount_first_order: f64,

    /// Minimum distinct items for the build-your-own-bundle offer.
    #[serde(default)]
    pub bundle_min_distinct_items: u32,

    /// Storefront page the prefill link points at.
    #[serde(default)]
    pub bundle_base_url: String,
}

fn default_currency() -> String {
    "GBP".to_string()
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            discount_first_order: 0.0,
            bundle_min_distinct_items: 0,
            bundle_base_url: String::new(),
        }
    }
}

impl Meta {
    /// Discount rate clamped to [0, 1].
    pub fn discount_rate(&self) -> f64 {
        self.discount_first_order.clamp(0.0, 1.0)
    }
}

/// One row of the RPE threshold table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RpeThreshold {
    pub min_rpe: f64,
    pub factor: f64,
}

/// Carb reference values for one duration band (g/h).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandRow {
    pub band: DurationBand,
    #[serde(default)]
    pub low: f64,
    pub mid: f64,
    #[serde(default)]
    pub high: f64,
}

/// Carb split between drinks, gels and bars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStyle {
    #[serde(default)]
    pub description: String,
    pub drink_share: f64,
    pub gel_share: f64,
    pub bar_share: f64,
    /// Share of non-caffeinated gel carbs taken as GEL50.
    pub gel50_share: f64,
    /// Share of bar carbs taken as BAR50.
    pub bar50_share: f64,
}

/// Physiology and plan rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub activity_multiplier: BTreeMap<String, f64>,

    #[serde(default)]
    pub rpe_factor_thresholds: Vec<RpeThreshold>,

    #[serde(default)]
    pub duration_bands: Vec<BandRow>,

    #[serde(default)]
    pub carb_mode_caps: BTreeMap<String, f64>,

    #[serde(default)]
    pub sweat_rate_mlph: BTreeMap<String, f64>,

    #[serde(default, rename = "sweat_sodium_mgL")]
    pub sweat_sodium_mg_l: BTreeMap<String, f64>,

    #[serde(default)]
    pub conditions_fluid_adj_mlph: BTreeMap<String, f64>,

    #[serde(default)]
    pub caffeine_fraction: BTreeMap<String, f64>,

    #[serde(default)]
    pub plan_styles: BTreeMap<String, PlanStyle>,
}

/// A category of named configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCategory {
    Activity,
    Conditions,
    SweatRate,
    SweatSalt,
    CarbMode,
    CaffeineProtocol,
    PlanStyle,
}

impl KeyCategory {
    pub const ALL: [KeyCategory; 7] = [
        KeyCategory::Activity,
        KeyCategory::Conditions,
        KeyCategory::SweatRate,
        KeyCategory::SweatSalt,
        KeyCategory::CarbMode,
        KeyCategory::CaffeineProtocol,
        KeyCategory::PlanStyle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KeyCategory::Activity => "activity",
            KeyCategory::Conditions => "conditions",
            KeyCategory::SweatRate => "sweat rate",
            KeyCategory::SweatSalt => "sweat salt",
            KeyCategory::CarbMode => "carb mode",
            KeyCategory::CaffeineProtocol => "caffeine protocol",
            KeyCategory::PlanStyle => "plan style",
        }
    }
}

fn lookup_or(table: &BTreeMap<String, f64>, key: &str, default: f64, category: KeyCategory) -> f64 {
    match table.get(key) {
        Some(value) => *value,
        None => {
            warn!(category = category.label(), key, default, "unknown key, using default");
            default
        }
    }
}

impl Rules {
    /// Activity multiplier, default [`DEFAULT_ACTIVITY_MULTIPLIER`].
    pub fn activity_multiplier(&self, activity: &str) -> f64 {
        lookup_or(
            &self.activity_multiplier,
            activity,
            DEFAULT_ACTIVITY_MULTIPLIER,
            KeyCategory::Activity,
        )
    }

    /// RPE factor from the threshold table.
    ///
    /// Thresholds are scanned in ascending `min_rpe` order; the last one at or below `rpe`
    /// wins. Below every threshold the lowest threshold's factor applies. An empty table
    /// gives [`DEFAULT_RPE_FACTOR`].
    pub fn rpe_factor(&self, rpe: f64) -> f64 {
        let mut thresholds = self.rpe_factor_thresholds.clone();
        thresholds.sort_by(|a, b| a.min_rpe.total_cmp(&b.min_rpe));

        let mut factor = thresholds.first().map_or(DEFAULT_RPE_FACTOR, |t| t.factor);
        for threshold in &thresholds {
            if rpe >= threshold.min_rpe {
                factor = threshold.factor;
            } else {
                break;
            }
        }
        factor
    }

    /// Mid carb reference for a band, default [`DEFAULT_BAND_MID_GPH`].
    pub fn band_mid(&self, band: DurationBand) -> f64 {
        match self.duration_bands.iter().find(|row| row.band == band) {
            Some(row) => row.mid,
            None => {
                warn!(band = band.label(), "duration band missing, using default");
                DEFAULT_BAND_MID_GPH
            }
        }
    }

    /// Carb ceiling, default [`DEFAULT_CARB_CAP_GPH`].
    pub fn carb_cap(&self, carb_mode: &str) -> f64 {
        lookup_or(
            &self.carb_mode_caps,
            carb_mode,
            DEFAULT_CARB_CAP_GPH,
            KeyCategory::CarbMode,
        )
    }

    /// Base sweat rate, default [`DEFAULT_SWEAT_RATE_MLPH`].
    pub fn sweat_rate(&self, sweat_rate: &str) -> f64 {
        lookup_or(
            &self.sweat_rate_mlph,
            sweat_rate,
            DEFAULT_SWEAT_RATE_MLPH,
            KeyCategory::SweatRate,
        )
    }

    /// Sweat sodium concentration, default [`DEFAULT_SWEAT_SODIUM_MG_L`].
    pub fn sweat_sodium(&self, sweat_salt: &str) -> f64 {
        lookup_or(
            &self.sweat_sodium_mg_l,
            sweat_salt,
            DEFAULT_SWEAT_SODIUM_MG_L,
            KeyCategory::SweatSalt,
        )
    }

    /// Conditions fluid adjustment, default [`DEFAULT_CONDITIONS_ADJ_MLPH`].
    pub fn conditions_adjustment(&self, conditions: &str) -> f64 {
        lookup_or(
            &self.conditions_fluid_adj_mlph,
            conditions,
            DEFAULT_CONDITIONS_ADJ_MLPH,
            KeyCategory::Conditions,
        )
    }

    /// Fraction for a named protocol, default [`DEFAULT_CAFFEINE_FRACTION`].
    pub fn caffeine_fraction(&self, protocol: &str) -> f64 {
        lookup_or(
            &self.caffeine_fraction,
            protocol,
            DEFAULT_CAFFEINE_FRACTION,
            KeyCategory::CaffeineProtocol,
        )
    }

    /// Plan style by name. No default: an unknown style is reported by the plan calculator.
    pub fn plan_style(&self, name: &str) -> Option<&PlanStyle> {
        self.plan_styles.get(name)
    }

    /// Keys accepted for a category, for menus and suggestions.
    pub fn keys(&self, category: KeyCategory) -> Vec<&str> {
        match category {
            KeyCategory::Activity => self.activity_multiplier.keys().map(String::as_str).collect(),
            KeyCategory::Conditions => self
                .conditions_fluid_adj_mlph
                .keys()
                .map(String::as_str)
                .collect(),
            KeyCategory::SweatRate => self.sweat_rate_mlph.keys().map(String::as_str).collect(),
            KeyCategory::SweatSalt => self.sweat_sodium_mg_l.keys().map(String::as_str).collect(),
            KeyCategory::CarbMode => self.carb_mode_caps.keys().map(String::as_str).collect(),
            KeyCategory::CaffeineProtocol => self
                .caffeine_fraction
                .keys()
                .map(String::as_str)
                .chain(std::iter::once(CUSTOM_CAFFEINE_PROTOCOL))
                .collect(),
            KeyCategory::PlanStyle => self.plan_styles.keys().map(String::as_str).collect(),
        }
    }
}

/// Nutrition facts for one serving/unit of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub sodium_mg: f64,
    #[serde(default)]
    pub caffeine_mg: f64,
}

/// Stand-in for a product missing from the catalog: contributes nothing.
pub static EMPTY_PRODUCT: Product = Product {
    name: String::new(),
    carbs_g: 0.0,
    sodium_mg: 0.0,
    caffeine_mg: 0.0,
};

/// A purchasable pack of one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub sku: Sku,
    #[serde(default)]
    pub pack_option: String,
    pub units_per_pack: u32,
    #[serde(default)]
    pub rrp_gbp: f64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub rc_product_id: Option<String>,
    #[serde(default)]
    pub rc_variant_id: Option<String>,
}

/// A pack together with its catalog key.
#[derive(Debug, Clone, Copy)]
pub struct PackRef<'a> {
    pub key: &'a str,
    pub pack: &'a Pack,
}

impl FuelConfig {
    /// Parse the configuration table shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Ok(serde_json::from_str(BUNDLED_CONFIG_JSON)?)
    }

    /// Nutrition facts for a SKU; [`EMPTY_PRODUCT`] if it is not in the catalog.
    pub fn product(&self, sku: Sku) -> &Product {
        match self.products.get(&sku) {
            Some(product) => product,
            None => {
                warn!(sku = sku.code(), "product missing from catalog, treating as empty");
                &EMPTY_PRODUCT
            }
        }
    }

    pub fn pack(&self, key: &str) -> Option<&Pack> {
        self.packs.get(key)
    }

    /// All packs for a SKU, smallest first.
    pub fn packs_for(&self, sku: Sku) -> Vec<PackRef<'_>> {
        let mut packs: Vec<PackRef<'_>> = self
            .packs
            .iter()
            .filter(|(_, pack)| pack.sku == sku && pack.units_per_pack > 0)
            .map(|(key, pack)| PackRef { key, pack })
            .collect();
        packs.sort_by(|a, b| {
            a.pack
                .units_per_pack
                .cmp(&b.pack.units_per_pack)
                .then_with(|| a.key.cmp(b.key))
        });
        packs
    }

    /// The pack of a SKU holding exactly `units`.
    pub fn pack_with_units(&self, sku: Sku, units: u32) -> Option<PackRef<'_>> {
        self.packs_for(sku)
            .into_iter()
            .find(|p| p.pack.units_per_pack == units)
    }
}
