use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::interface::prefill::build_prefill_url;
use crate::interface::render::plan_rows;
use crate::models::{Bundle, FuelConfig, Schedule, Sku};
use crate::planner::pipeline::PlannerOutputs;

/// Write pack lines to a CSV file.
pub fn write_bundle_csv(bundle: &Bundle, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "pack_key",
        "sku",
        "pack_option",
        "quantity",
        "units_included",
        "units_needed",
        "overshoot",
        "price",
        "discounted_price",
        "url",
    ])?;

    for line in &bundle.lines {
        wtr.write_record([
            line.pack_key.clone(),
            line.sku.code().to_string(),
            line.pack_option.clone(),
            line.quantity.to_string(),
            line.units_included.to_string(),
            line.units_needed.to_string(),
            line.overshoot.to_string(),
            format!("{:.2}", line.price),
            format!("{:.2}", line.discounted_price),
            line.url.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the schedule to a CSV file: one row per slot, one column per scheduled product.
pub fn write_schedule_csv(schedule: &Schedule, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["time".to_string(), "minutes".to_string(), "drink_ml".to_string()];
    header.extend(Sku::SOLIDS.iter().map(|sku| sku.code().to_string()));
    wtr.write_record(&header)?;

    for slot in &schedule.slots {
        let mut record = vec![
            slot.time.clone(),
            slot.segment_min.to_string(),
            format!("{:.0}", slot.drink_ml),
        ];
        record.extend(Sku::SOLIDS.iter().map(|&sku| {
            slot.items
                .iter()
                .find(|item| item.sku == sku)
                .map(|item| item.quantity)
                .unwrap_or(0)
                .to_string()
        }));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the full outputs, plan rows and prefill link as pretty JSON.
pub fn write_outputs_json(outputs: &PlannerOutputs, config: &FuelConfig, path: &Path) -> Result<()> {
    let json = outputs_json(outputs, config);
    let mut file = File::create(path)?;
    writeln!(file, "{}", serde_json::to_string_pretty(&json)?)?;
    Ok(())
}

/// The JSON document written by [`write_outputs_json`].
pub fn outputs_json(outputs: &PlannerOutputs, config: &FuelConfig) -> serde_json::Value {
    serde_json::json!({
        "outputs": outputs,
        "plan_rows": plan_rows(&outputs.plan, &outputs.event_totals, config),
        "prefill_url": build_prefill_url(&outputs.event_bundle, config),
        "period_prefill_url": build_prefill_url(&outputs.period.bundle, config),
    })
}
