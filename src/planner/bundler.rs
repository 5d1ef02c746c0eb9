use tracing::{debug, warn};

use crate::models::{Bundle, FuelConfig, PackFamily, PackLine, PackRef, Sku, SkuCoverage, Totals};

/// A pack type and how many of it to buy, before pricing.
#[derive(Debug, Clone, Copy)]
struct Selection<'a> {
    pack: PackRef<'a>,
    quantity: u32,
}

fn push<'a>(out: &mut Vec<Selection<'a>>, pack: PackRef<'a>, quantity: u32) {
    if quantity > 0 {
        out.push(Selection { pack, quantity });
    }
}

/// Large packs for whole multiples; a remainder above the small size rounds up to one more
/// large pack, otherwise one small pack covers it.
fn two_tier<'a>(config: &'a FuelConfig, sku: Sku, units: u32, small: u32, large: u32) -> Vec<Selection<'a>> {
    let Some(large_pack) = config.pack_with_units(sku, large) else {
        warn!(sku = sku.code(), large, "anchor pack missing, no packs selected");
        return Vec::new();
    };
    let small_pack = config.pack_with_units(sku, small);

    let rem = units % large;
    let mut qty_large = units / large + u32::from(rem > small);
    let mut qty_small = u32::from(rem > 0 && rem <= small);

    // Without the small pack the remainder still needs covering
    if qty_small > 0 && small_pack.is_none() {
        qty_large += 1;
        qty_small = 0;
    }

    let mut out = Vec::new();
    push(&mut out, large_pack, qty_large);
    if let Some(pack) = small_pack {
        push(&mut out, pack, qty_small);
    }
    out
}

/// 72s, then 36s, then 12s rounded up.
fn electrolyte_standard(config: &FuelConfig, sku: Sku, units: u32) -> Vec<Selection<'_>> {
    let Some(pack12) = config.pack_with_units(sku, 12) else {
        warn!(sku = sku.code(), "12-unit pack missing, no packs selected");
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut remaining = units;
    for size in [72, 36] {
        if let Some(pack) = config.pack_with_units(sku, size) {
            let qty = remaining / size;
            push(&mut out, pack, qty);
            remaining -= qty * size;
        }
    }
    push(&mut out, pack12, remaining.div_ceil(12));
    out
}

fn ceil_packs(pack: PackRef<'_>, units: u32) -> Vec<Selection<'_>> {
    let mut out = Vec::new();
    push(&mut out, pack, units.div_ceil(pack.pack.units_per_pack));
    out
}

/// Pack selections covering `units` of `sku`, largest pack first.
fn select_packs(config: &FuelConfig, sku: Sku, units: u32) -> Vec<Selection<'_>> {
    if units == 0 {
        return Vec::new();
    }

    match sku.pack_family() {
        PackFamily::SixTwelve => two_tier(config, sku, units, 6, 12),
        PackFamily::FifteenTwentyFive => two_tier(config, sku, units, 15, 25),
        PackFamily::ElectrolyteStandard => electrolyte_standard(config, sku, units),
        PackFamily::ElectrolytePlus => match config.pack_with_units(sku, 30) {
            Some(pack) => ceil_packs(pack, units),
            None => {
                warn!(sku = sku.code(), "30-unit pack missing, no packs selected");
                Vec::new()
            }
        },
        PackFamily::SingleTier => {
            let pack = config
                .pack_with_units(sku, 12)
                .or_else(|| config.packs_for(sku).pop());
            match pack {
                Some(pack) => ceil_packs(pack, units),
                None => {
                    warn!(sku = sku.code(), "no packs listed, no packs selected");
                    Vec::new()
                }
            }
        }
    }
}

/// Turn unit totals into priced pack lines.
///
/// `discount_rate` is clamped to [0, 1]; pass 0 for full price. Lines follow catalog order
/// and, within a SKU, largest pack first. Each line's `units_needed` is the part of the
/// SKU's need it covers, so `units_included >= units_needed` holds per line.
pub fn bundle_packs(totals: &Totals, discount_rate: f64, config: &FuelConfig) -> Bundle {
    let rate = discount_rate.clamp(0.0, 1.0);
    let mut lines = Vec::new();
    let mut coverage = Vec::new();

    for (sku, &needed) in totals.iter() {
        let selections = select_packs(config, sku, needed);
        if selections.is_empty() {
            continue;
        }

        let mut need_left = needed;
        let mut included_total: u32 = 0;
        for Selection { pack, quantity } in selections {
            // Saturate rather than wrap near u32::MAX
            let units_included = quantity.saturating_mul(pack.pack.units_per_pack);
            let units_needed = need_left.min(units_included);
            need_left -= units_needed;
            included_total = included_total.saturating_add(units_included);

            let price = quantity as f64 * pack.pack.rrp_gbp;
            lines.push(PackLine {
                pack_key: pack.key.to_string(),
                sku,
                pack_option: pack.pack.pack_option.clone(),
                quantity,
                units_included,
                units_needed,
                overshoot: units_included - units_needed,
                price,
                discounted_price: price * (1.0 - rate),
                url: pack.pack.url.clone(),
            });
        }

        coverage.push(SkuCoverage {
            sku,
            units_needed: needed,
            units_included: included_total,
            overshoot: included_total.saturating_sub(needed),
        });
    }

    let distinct_items = coverage.len() as u32;
    let distinct_pack_types = lines.len() as u32;
    let total_price: f64 = lines.iter().map(|l| l.price).sum();
    let total_discounted: f64 = lines.iter().map(|l| l.discounted_price).sum();
    let min_distinct_items = config.meta.bundle_min_distinct_items;

    debug!(distinct_items, distinct_pack_types, total_price, "bundle assembled");

    Bundle {
        lines,
        coverage,
        distinct_items,
        distinct_pack_types,
        total_price,
        total_discounted,
        min_distinct_items,
        meets_minimum: distinct_items >= min_distinct_items,
    }
}
