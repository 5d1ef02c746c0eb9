use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{FuelError, Result};
use crate::models::{BundleInput, FuelConfig, KeyCategory, PlannerInput};
use crate::planner::constants::*;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Closest option to `input`, if any is similar enough.
pub fn suggest_key<'a>(input: &str, options: &[&'a str]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    options
        .iter()
        .map(|opt| (*opt, jaro_winkler(&opt.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(opt, _)| opt)
}

/// Resolve a user-typed key against the configured keys (case-insensitive).
///
/// Unknown keys are an error carrying the closest suggestion.
pub fn resolve_key(input: &str, category: KeyCategory, config: &FuelConfig) -> Result<String> {
    let options = config.rules.keys(category);

    if let Some(exact) = options.iter().find(|opt| opt.eq_ignore_ascii_case(input)) {
        return Ok(exact.to_string());
    }

    let hint = match suggest_key(input, &options) {
        Some(suggestion) => format!(" Did you mean '{}'?", suggestion),
        None => format!(" Options: {}", options.join(", ")),
    };
    Err(FuelError::InvalidInput(format!(
        "Unknown {} '{}'.{}",
        category.label(),
        input,
        hint
    )))
}

/// Select one key of a category, starting on `current`.
pub fn prompt_key(category: KeyCategory, current: &str, config: &FuelConfig) -> Result<String> {
    let options = config.rules.keys(category);
    if options.is_empty() {
        return Ok(current.to_string());
    }
    let default = options.iter().position(|opt| *opt == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(format!("Choose {}", category.label()))
        .items(&options)
        .default(default)
        .interact()?;

    Ok(options[selection].to_string())
}

fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    Ok(Input::<f64>::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()?)
}

fn prompt_bottle_size(current: u32) -> Result<u32> {
    let labels: Vec<String> = BOTTLE_SIZE_OPTIONS_ML.iter().map(|ml| format!("{} ml", ml)).collect();
    let default = BOTTLE_SIZE_OPTIONS_ML
        .iter()
        .position(|&ml| ml == current)
        .unwrap_or(BOTTLE_SIZE_OPTIONS_ML.len() - 2);

    let selection = Select::new()
        .with_prompt("Bottle size")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(BOTTLE_SIZE_OPTIONS_ML[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Walk through every planner input, starting from `defaults`.
pub fn collect_planner_input(config: &FuelConfig, defaults: &PlannerInput) -> Result<PlannerInput> {
    let activity = prompt_key(KeyCategory::Activity, &defaults.activity, config)?;
    let duration_hours = prompt_number("Session duration (hours)", defaults.duration_hours)?;
    let rpe = prompt_number("Intensity (RPE 1-10)", defaults.rpe)?;
    let conditions = prompt_key(KeyCategory::Conditions, &defaults.conditions, config)?;
    let bottle_size_ml = prompt_bottle_size(defaults.bottle_size_ml)?;
    let sweat_rate = prompt_key(KeyCategory::SweatRate, &defaults.sweat_rate, config)?;
    let sweat_salt = prompt_key(KeyCategory::SweatSalt, &defaults.sweat_salt, config)?;
    let sodium_replacement =
        prompt_number("Sodium replacement fraction (0-1)", defaults.sodium_replacement)?;
    let carb_mode = prompt_key(KeyCategory::CarbMode, &defaults.carb_mode, config)?;
    let caffeine_protocol =
        prompt_key(KeyCategory::CaffeineProtocol, &defaults.caffeine_protocol, config)?;

    let caffeine_custom_fraction = if caffeine_protocol == CUSTOM_CAFFEINE_PROTOCOL {
        prompt_number(
            "Caffeinated share of carbs (0-0.75)",
            defaults.caffeine_custom_fraction,
        )?
    } else {
        defaults.caffeine_custom_fraction
    };

    let plan_style = prompt_key(KeyCategory::PlanStyle, &defaults.plan_style, config)?;
    let apply_discount = prompt_yes_no("Apply first-order discount?", defaults.apply_discount)?;

    let input = PlannerInput {
        activity,
        duration_hours,
        rpe,
        conditions,
        bottle_size_ml,
        sweat_rate,
        sweat_salt,
        carb_mode,
        caffeine_protocol,
        caffeine_custom_fraction,
        plan_style,
        sodium_replacement,
        apply_discount,
    };
    Ok(input.sanitized())
}

/// Walk through the 30-day usage profile.
pub fn collect_bundle_input(defaults: &BundleInput) -> Result<BundleInput> {
    let sessions_30d = Input::<u32>::new()
        .with_prompt("Sessions in the next 30 days")
        .default(defaults.sessions_30d)
        .interact_text()?;
    let avg_session_hours = prompt_number("Average session length (hours)", defaults.avg_session_hours)?;
    let fuelled_fraction = prompt_number("Fraction of sessions fuelled (0-1)", defaults.fuelled_fraction)?;
    let apply_discount = prompt_yes_no("Apply first-order discount?", defaults.apply_discount)?;

    let input = BundleInput {
        sessions_30d,
        avg_session_hours,
        fuelled_fraction,
        apply_discount,
    };
    Ok(input.sanitized())
}
