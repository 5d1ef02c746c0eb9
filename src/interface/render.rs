use serde::Serialize;

use crate::models::{BottlePlan, Bundle, FuelConfig, KeyCategory, ProductPlan, Schedule, Sku, Totals};
use crate::planner::constants::{CUSTOM_CAFFEINE_PROTOCOL, DRINK_VOLUME_TOLERANCE_MLPH};
use crate::planner::pipeline::{PeriodProjection, PlannerOutputs};

/// One product in the per-hour plan, with what it contributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub sku: Sku,
    pub name: String,
    pub rate_per_hour: f64,
    pub event_total: u32,
    pub carbs_gph: f64,
    pub sodium_mgph: f64,
    pub caffeine_mgph: f64,
}

/// Rows for every SKU with a nonzero rate or event total, in catalog order.
pub fn plan_rows(plan: &ProductPlan, totals: &Totals, config: &FuelConfig) -> Vec<PlanRow> {
    Sku::ALL
        .into_iter()
        .filter(|&sku| plan.rate(sku) > 0.0 || totals[sku] > 0)
        .map(|sku| {
            let rate = plan.rate(sku);
            let product = config.product(sku);
            PlanRow {
                sku,
                name: if product.name.is_empty() {
                    sku.code().to_string()
                } else {
                    product.name.clone()
                },
                rate_per_hour: rate,
                event_total: totals[sku],
                carbs_gph: rate * product.carbs_g,
                sodium_mgph: rate * product.sodium_mg,
                caffeine_mgph: rate * product.caffeine_mg,
            }
        })
        .collect()
}

fn currency_symbol(code: &str) -> String {
    match code {
        "GBP" => "£".to_string(),
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        other => format!("{} ", other),
    }
}

/// Note comparing mixed drink volume with the fluid target.
pub fn drink_volume_note(drink_ml_per_hour: f64, fluid_target_mlph: f64) -> String {
    let extra_water = fluid_target_mlph - drink_ml_per_hour;
    if extra_water > DRINK_VOLUME_TOLERANCE_MLPH {
        format!("Top up with ~{:.0} ml/h plain water (or dilute / sip more).", extra_water)
    } else if extra_water < -DRINK_VOLUME_TOLERANCE_MLPH {
        format!(
            "Mix volume exceeds the fluid target by ~{:.0} ml/h. Consider concentrating mixes or shifting carbs to gels/bars.",
            extra_water.abs()
        )
    } else {
        format!("Drink volume is close to target (±{:.0} ml/h).", DRINK_VOLUME_TOLERANCE_MLPH)
    }
}

/// Join lines into a block ending in a newline.
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Headline targets and event totals.
pub fn format_summary(outputs: &PlannerOutputs) -> String {
    let t = &outputs.targets;
    let s = &outputs.summary;
    let input = &outputs.input;

    let custom = if input.caffeine_protocol == CUSTOM_CAFFEINE_PROTOCOL {
        format!(" ({:.2})", t.caffeine_fraction)
    } else {
        String::new()
    };

    block(vec![
        "=== Targets ===".to_string(),
        format!(
            "Carbs:    {:>5.0} g/h   Total: {:.0} g · Mode cap: {:.0} g/h",
            t.carb_target_gph, s.total_carbs_g, t.carb_cap_gph
        ),
        format!(
            "Fluids:   {:>5.0} ml/h  Total: {:.1} L · Bottles/h: {:.2} · Band: {}",
            t.fluid_target_mlph, s.total_fluid_l, s.bottles_per_hour, t.band
        ),
        format!(
            "Sodium:   {:>5.0} mg/h  Sweat: {:.0} mg/L · Replace: {:.2}",
            t.sodium_target_mgph, t.sweat_sodium_mg_l, t.sodium_replacement
        ),
        format!(
            "Caffeine: {:>5.0} mg    Protocol: {}{}",
            s.total_caffeine_mg, input.caffeine_protocol, custom
        ),
    ])
}

/// Per-hour product plan with contribution totals.
pub fn format_product_plan(outputs: &PlannerOutputs, config: &FuelConfig) -> String {
    let mut lines = vec![format!("=== Product plan ({}) ===", outputs.input.plan_style)];

    if let Some(diagnostic) = &outputs.plan.diagnostic {
        lines.push(diagnostic.to_string());
        return block(lines);
    }

    let rows = plan_rows(&outputs.plan, &outputs.event_totals, config);
    if rows.is_empty() {
        lines.push("No products needed.".to_string());
        return block(lines);
    }

    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(10);
    lines.extend(rows.iter().map(|row| {
        format!(
            "  {:<width$}  {:>5.2}/h  total {:>3}  | {:>3.0} g  {:>4.0} mg Na  {:>3.0} mg caf",
            row.name,
            row.rate_per_hour,
            row.event_total,
            row.carbs_gph,
            row.sodium_mgph,
            row.caffeine_mgph,
            width = width
        )
    }));

    let carbs: f64 = rows.iter().map(|r| r.carbs_gph).sum();
    let sodium: f64 = rows.iter().map(|r| r.sodium_mgph).sum();
    let caffeine: f64 = rows.iter().map(|r| r.caffeine_mgph).sum();
    let dur = outputs.input.duration_hours;

    lines.push(String::new());
    lines.push(format!(
        "From products: ~{:.0} g/h carbs · {:.0} mg/h sodium · {:.0} mg/h caffeine",
        carbs, sodium, caffeine
    ));
    lines.push(format!(
        "Over {:.2} h: ~{:.0} g carbs · {:.0} mg sodium · {:.0} mg caffeine",
        dur,
        carbs * dur,
        sodium * dur,
        caffeine * dur
    ));
    lines.push(drink_volume_note(
        outputs.plan.drink_ml_per_hour,
        outputs.targets.fluid_target_mlph,
    ));
    block(lines)
}

/// Pack table with totals and the minimum-items rule.
pub fn format_bundle(bundle: &Bundle, title: &str, config: &FuelConfig, apply_discount: bool) -> String {
    let mut lines = vec![format!("=== {} ===", title)];

    if bundle.is_empty() {
        lines.push("No packs required for the current settings.".to_string());
        return block(lines);
    }

    let symbol = currency_symbol(&config.meta.currency);
    let money = |amount: f64| format!("{}{:.2}", symbol, amount);
    let width = bundle.lines.iter().map(|l| l.pack_key.len()).max().unwrap_or(10);

    lines.push(format!(
        "  {:<width$}  {:>3}  {:>5}  {:>9}  {:>9}",
        "Pack",
        "Qty",
        "Units",
        "RRP",
        "Sub",
        width = width
    ));
    for line in &bundle.lines {
        let sub = if apply_discount { money(line.discounted_price) } else { "-".to_string() };
        lines.push(format!(
            "  {:<width$}  {:>3}  {:>5}  {:>9}  {:>9}   {} · {}",
            line.pack_key,
            line.quantity,
            line.units_included,
            money(line.price),
            sub,
            line.pack_option,
            line.sku,
            width = width
        ));
    }

    let total_sub = if apply_discount { money(bundle.total_discounted) } else { "-".to_string() };
    lines.push(format!(
        "  {:<width$}  {:>3}  {:>5}  {:>9}  {:>9}",
        "Total",
        bundle.distinct_items,
        "",
        money(bundle.total_price),
        total_sub,
        width = width
    ));
    lines.push(String::new());

    if apply_discount {
        lines.push(format!(
            "Discount: {:.0}% off (first order), saving {}.",
            config.meta.discount_rate() * 100.0,
            money(bundle.savings())
        ));
    } else {
        lines.push("Discount: off.".to_string());
    }

    if bundle.meets_minimum {
        lines.push(format!("Bundle rule: meets the {} item minimum.", bundle.min_distinct_items));
    } else {
        lines.push(format!(
            "Bundle rule: this list has {} item types. Minimum is {}.",
            bundle.distinct_items, bundle.min_distinct_items
        ));
        lines.push("Try a more varied plan style to increase the item count.".to_string());
    }
    block(lines)
}

/// Header lines for the 30-day projection.
pub fn format_period(period: &PeriodProjection, outputs: &PlannerOutputs) -> String {
    let fraction = if period.fuelled_hours > 0.0 {
        period.adjusted_hours / period.fuelled_hours
    } else {
        0.0
    };
    block(vec![
        format!("Fuelled hours: {:.2} h / 30d", period.fuelled_hours),
        format!("Adjusted (×{:.2}): {:.2} h", fraction, period.adjusted_hours),
        format!(
            "Targets used: {:.0} g/h carbs · {:.0} mg/h sodium · {}",
            outputs.targets.carb_target_gph, outputs.targets.sodium_target_mgph, outputs.input.plan_style
        ),
    ])
}

/// Bottle count, per-bottle mix and concentration warnings.
pub fn format_bottle_plan(bottles: &BottlePlan) -> String {
    let mut per_bottle = format!(
        "Per bottle (avg): {:.1} g carbs · {:.0} mg sodium",
        bottles.carbs_per_bottle_g, bottles.sodium_per_bottle_mg
    );
    if bottles.caffeine_per_bottle_mg > 0.0 {
        per_bottle.push_str(&format!(" · {:.0} mg caffeine", bottles.caffeine_per_bottle_mg));
    }

    let mut lines = vec![
        "=== Bottles ===".to_string(),
        format!("Bottle size: {} ml", bottles.bottle_size_ml),
        format!(
            "Fluid target: {:.0} ml/h · Total: {:.2} L",
            bottles.fluid_mlph,
            bottles.total_fluid_ml / 1000.0
        ),
        format!("Estimated bottles: {}", bottles.bottle_count),
        per_bottle,
        format!(
            "Concentration: {:.0} g/L carbs · {:.0} mg/L sodium",
            bottles.carbs_per_l, bottles.sodium_per_l
        ),
    ];

    lines.extend(
        bottles
            .servings_total
            .iter()
            .filter(|(_, v)| **v > 0.0)
            .map(|(sku, &total)| {
                format!(
                    "  {:<8} {:.2} servings total · {:.2} per bottle",
                    sku.short_label(),
                    total,
                    bottles.servings_per_bottle[sku]
                )
            }),
    );
    lines.extend(bottles.warnings.iter().map(|w| format!("Warning: {}", w)));
    block(lines)
}

/// Plain-text schedule, one line per slot.
pub fn schedule_to_text(schedule: &Schedule, bottles: &BottlePlan) -> String {
    let mut lines = Vec::with_capacity(schedule.slots.len() + 3);
    lines.push(format!("Fuel schedule (every {} min)", schedule.interval_min));
    lines.push(format!(
        "Bottle: {}ml · Drink: {:.0}ml/h",
        bottles.bottle_size_ml, bottles.fluid_mlph
    ));
    lines.push(String::new());

    for slot in &schedule.slots {
        let mut parts = vec![format!("Drink {:.0}ml", slot.drink_ml)];
        parts.extend(
            slot.items
                .iter()
                .map(|item| format!("{} ×{}", item.sku.short_label(), item.quantity)),
        );
        lines.push(format!("{}  {}", slot.time, parts.join(" · ")));
    }

    lines.join("\n")
}

/// Accepted keys for every configuration category.
pub fn format_options(config: &FuelConfig) -> String {
    block(
        KeyCategory::ALL
            .into_iter()
            .map(|category| format!("{}: {}", category.label(), config.rules.keys(category).join(", ")))
            .collect(),
    )
}

pub fn display_outputs(outputs: &PlannerOutputs, config: &FuelConfig) {
    println!();
    print!("{}", format_summary(outputs));
    println!();
    print!("{}", format_product_plan(outputs, config));
    println!();
    print!(
        "{}",
        format_bundle(&outputs.event_bundle, "Event bundle", config, outputs.input.apply_discount)
    );
}

pub fn display_period(outputs: &PlannerOutputs, config: &FuelConfig, apply_discount: bool) {
    println!();
    print!("{}", format_period(&outputs.period, outputs));
    println!();
    print!("{}", format_bundle(&outputs.period.bundle, "30-day bundle", config, apply_discount));
}

pub fn display_schedule(outputs: &PlannerOutputs) {
    println!();
    print!("{}", format_bottle_plan(&outputs.bottles));
    println!();
    println!("{}", schedule_to_text(&outputs.schedule, &outputs.bottles));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BundleInput, PlannerInput};
    use crate::planner::pipeline::recompute;

    fn outputs(input: &PlannerInput) -> (FuelConfig, PlannerOutputs) {
        let config = FuelConfig::bundled().unwrap();
        let outputs = recompute(input, &BundleInput::default(), &config);
        (config, outputs)
    }

    #[test]
    fn test_plan_rows_only_active() {
        let (config, out) = outputs(&PlannerInput::default());
        let rows = plan_rows(&out.plan, &out.event_totals, &config);
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(row.rate_per_hour > 0.0 || row.event_total > 0);
        }
        let carbs: f64 = rows.iter().map(|r| r.carbs_gph).sum();
        assert!((carbs - out.targets.carb_target_gph).abs() < 1e-6);
    }

    #[test]
    fn test_drink_volume_note() {
        assert!(drink_volume_note(300.0, 800.0).starts_with("Top up with ~500"));
        assert!(drink_volume_note(1000.0, 800.0).starts_with("Mix volume exceeds"));
        assert!(drink_volume_note(700.0, 800.0).starts_with("Drink volume is close"));
    }

    #[test]
    fn test_schedule_text_format() {
        let input = PlannerInput {
            duration_hours: 1.0,
            plan_style: "Gel-led".to_string(),
            ..Default::default()
        };
        let (_, out) = outputs(&input);
        let text = schedule_to_text(&out.schedule, &out.bottles);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Fuel schedule (every 30 min)");
        assert!(lines[1].starts_with("Bottle: 750ml · Drink: "));
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("00:00  Drink "));
        assert!(lines[4].starts_with("00:30  Drink "));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_bundle_table_minimum_note() {
        let (config, out) = outputs(&PlannerInput::default());
        let text = format_bundle(&out.event_bundle, "Event bundle", &config, true);
        assert!(text.contains("Total"));
        assert!(text.contains("£"));
        if out.event_bundle.meets_minimum {
            assert!(text.contains("meets the 4 item minimum"));
        } else {
            assert!(text.contains("Minimum is 4"));
        }
    }

    #[test]
    fn test_unknown_style_rendered() {
        let input = PlannerInput {
            plan_style: "Sprint".to_string(),
            ..Default::default()
        };
        let (config, out) = outputs(&input);
        let text = format_product_plan(&out, &config);
        assert!(text.contains("Unknown plan style 'Sprint'"));
        let bundle = format_bundle(&out.event_bundle, "Event bundle", &config, true);
        assert!(bundle.contains("No packs required"));
    }

    #[test]
    fn test_options_lists_all_categories() {
        let config = FuelConfig::bundled().unwrap();
        let text = format_options(&config);
        assert_eq!(text.lines().count(), KeyCategory::ALL.len());
        assert!(text.contains("plan style: "));
        assert!(text.contains("Custom"));
    }
}
