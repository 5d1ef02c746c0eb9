use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::FuelError;

/// One of the twelve catalog products.
///
/// Declaration order is the catalog order used for every table, report and bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sku {
    #[serde(rename = "MIXPLUS")]
    MixPlus,
    #[serde(rename = "MIX60")]
    Mix60,
    #[serde(rename = "MIX90")]
    Mix90,
    #[serde(rename = "MIX90_CAFF")]
    Mix90Caff,
    #[serde(rename = "GEL30")]
    Gel30,
    #[serde(rename = "GEL30_CAFF")]
    Gel30Caff,
    #[serde(rename = "GEL50")]
    Gel50,
    #[serde(rename = "BAR30")]
    Bar30,
    #[serde(rename = "BAR50")]
    Bar50,
    #[serde(rename = "SLT07_500")]
    Slt500,
    #[serde(rename = "SLT07_1000")]
    Slt1000,
    #[serde(rename = "SLTPLUS")]
    SltPlus,
}

/// Packing heuristic used to turn a unit total into pack lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackFamily {
    /// 6- and 12-unit packs, remainder above 6 rounds up to another 12.
    SixTwelve,
    /// 15- and 25-unit packs, remainder above 15 rounds up to another 25.
    FifteenTwentyFive,
    /// 12/36/72-unit electrolyte tubs, largest first.
    ElectrolyteStandard,
    /// 30-unit packs only.
    ElectrolytePlus,
    /// 12-unit pack if stocked, otherwise the largest pack available.
    SingleTier,
}

impl Sku {
    pub const COUNT: usize = 12;

    pub const ALL: [Sku; Sku::COUNT] = [
        Sku::MixPlus,
        Sku::Mix60,
        Sku::Mix90,
        Sku::Mix90Caff,
        Sku::Gel30,
        Sku::Gel30Caff,
        Sku::Gel50,
        Sku::Bar30,
        Sku::Bar50,
        Sku::Slt500,
        Sku::Slt1000,
        Sku::SltPlus,
    ];

    /// Products mixed into bottles.
    pub const DRINKS: [Sku; 4] = [Sku::MixPlus, Sku::Mix60, Sku::Mix90, Sku::Mix90Caff];

    /// Everything taken outside the bottle, in schedule order.
    pub const SOLIDS: [Sku; 8] = [
        Sku::Gel30,
        Sku::Gel30Caff,
        Sku::Gel50,
        Sku::Bar30,
        Sku::Bar50,
        Sku::Slt500,
        Sku::Slt1000,
        Sku::SltPlus,
    ];

    /// Catalog code, as used in configuration files.
    pub fn code(self) -> &'static str {
        match self {
            Sku::MixPlus => "MIXPLUS",
            Sku::Mix60 => "MIX60",
            Sku::Mix90 => "MIX90",
            Sku::Mix90Caff => "MIX90_CAFF",
            Sku::Gel30 => "GEL30",
            Sku::Gel30Caff => "GEL30_CAFF",
            Sku::Gel50 => "GEL50",
            Sku::Bar30 => "BAR30",
            Sku::Bar50 => "BAR50",
            Sku::Slt500 => "SLT07_500",
            Sku::Slt1000 => "SLT07_1000",
            Sku::SltPlus => "SLTPLUS",
        }
    }

    /// Compact label for schedules and cards.
    pub fn short_label(self) -> &'static str {
        match self {
            Sku::MixPlus => "MIX+",
            Sku::Mix60 => "MIX60",
            Sku::Mix90 => "MIX90",
            Sku::Mix90Caff => "MIX90+C",
            Sku::Gel30 => "GEL30",
            Sku::Gel30Caff => "GEL30+C",
            Sku::Gel50 => "GEL50",
            Sku::Bar30 => "BAR30",
            Sku::Bar50 => "BAR50",
            Sku::Slt500 => "SLT500",
            Sku::Slt1000 => "SLT1000",
            Sku::SltPlus => "SLT+",
        }
    }

    pub fn pack_family(self) -> PackFamily {
        match self {
            Sku::Mix60 | Sku::Mix90 | Sku::Mix90Caff | Sku::Gel30 | Sku::Gel30Caff | Sku::Bar50 => {
                PackFamily::SixTwelve
            }
            Sku::MixPlus => PackFamily::FifteenTwentyFive,
            Sku::Slt500 | Sku::Slt1000 => PackFamily::ElectrolyteStandard,
            Sku::SltPlus => PackFamily::ElectrolytePlus,
            Sku::Gel50 | Sku::Bar30 => PackFamily::SingleTier,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sku {
    type Err = FuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sku::ALL
            .into_iter()
            .find(|sku| sku.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FuelError::InvalidInput(format!("unknown SKU '{}'", s)))
    }
}

/// Fixed-size table with one slot per SKU.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkuMap<T>([T; Sku::COUNT]);

impl<T> SkuMap<T> {
    pub fn from_fn(mut f: impl FnMut(Sku) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Sku::ALL[i])))
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Sku, &T)> {
        Sku::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Sku, &T) -> U) -> SkuMap<U> {
        SkuMap::from_fn(|sku| f(sku, &self[sku]))
    }
}

impl<T> Index<Sku> for SkuMap<T> {
    type Output = T;

    fn index(&self, sku: Sku) -> &T {
        &self.0[sku.index()]
    }
}

impl<T> IndexMut<Sku> for SkuMap<T> {
    fn index_mut(&mut self, sku: Sku) -> &mut T {
        &mut self.0[sku.index()]
    }
}

impl<T: Serialize> Serialize for SkuMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Sku::COUNT))?;
        for (sku, value) in self.iter() {
            map.serialize_entry(sku.code(), value)?;
        }
        map.end()
    }
}
