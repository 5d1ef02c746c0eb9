use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use fuel_planner_rs::cli::{Cli, Command, PeriodArgs, PlannerArgs};
use fuel_planner_rs::error::Result;
use fuel_planner_rs::interface::{
    build_prefill_url, collect_bundle_input, collect_planner_input, display_outputs, display_period,
    display_schedule, format_options, outputs_json, prompt_yes_no, write_bundle_csv,
    write_schedule_csv,
};
use fuel_planner_rs::models::{BundleInput, FuelConfig, PlannerInput};
use fuel_planner_rs::planner::{recompute, PlannerOutputs};
use fuel_planner_rs::state::{load_or_bundled, save_config};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `--verbose` forces debug; otherwise `RUST_LOG`, defaulting to warn.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan { planner, csv } => {
            cmd_plan(&load_or_bundled(config_path)?, &planner, csv.as_deref())
        }
        Command::Bundle {
            planner,
            period,
            csv,
        } => cmd_bundle(&load_or_bundled(config_path)?, &planner, &period, csv.as_deref()),
        Command::Schedule { planner, csv } => {
            cmd_schedule(&load_or_bundled(config_path)?, &planner, csv.as_deref())
        }
        Command::Options => {
            print!("{}", format_options(&load_or_bundled(config_path)?));
            Ok(())
        }
        Command::InitConfig { path, force } => {
            cmd_init_config(&load_or_bundled(config_path)?, &path, force)
        }
    }
}

/// Build the planner input from defaults, flags and (optionally) prompts.
fn planner_input(config: &FuelConfig, args: &PlannerArgs) -> Result<PlannerInput> {
    let mut input = PlannerInput::default();
    args.apply_to(&mut input, config)?;
    if args.interactive {
        input = collect_planner_input(config, &input)?;
    }
    Ok(input)
}

fn print_json(outputs: &PlannerOutputs, config: &FuelConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&outputs_json(outputs, config))?);
    Ok(())
}

/// Targets, product plan and event bundle.
fn cmd_plan(config: &FuelConfig, args: &PlannerArgs, csv: Option<&Path>) -> Result<()> {
    let input = planner_input(config, args)?;
    let outputs = recompute(&input, &BundleInput::default(), config);

    if args.json {
        print_json(&outputs, config)?;
    } else {
        display_outputs(&outputs, config);
        if !outputs.event_bundle.is_empty() {
            println!();
            println!("Prefill link: {}", build_prefill_url(&outputs.event_bundle, config));
        }
    }

    if let Some(path) = csv {
        write_bundle_csv(&outputs.event_bundle, path)?;
        eprintln!("Event bundle written to {}", path.display());
    }
    Ok(())
}

/// Packs for a 30-day training block.
fn cmd_bundle(
    config: &FuelConfig,
    args: &PlannerArgs,
    period: &PeriodArgs,
    csv: Option<&Path>,
) -> Result<()> {
    let input = planner_input(config, args)?;

    let mut bundle_input = BundleInput {
        apply_discount: input.apply_discount,
        ..Default::default()
    };
    period.apply_to(&mut bundle_input);
    if args.interactive {
        bundle_input = collect_bundle_input(&bundle_input)?;
    }

    let outputs = recompute(&input, &bundle_input, config);

    if args.json {
        print_json(&outputs, config)?;
    } else {
        display_period(&outputs, config, bundle_input.apply_discount);
        if !outputs.period.bundle.is_empty() {
            println!();
            println!("Prefill link: {}", build_prefill_url(&outputs.period.bundle, config));
        }
    }

    if let Some(path) = csv {
        write_bundle_csv(&outputs.period.bundle, path)?;
        eprintln!("30-day bundle written to {}", path.display());
    }
    Ok(())
}

/// Bottle plan and intake schedule.
fn cmd_schedule(config: &FuelConfig, args: &PlannerArgs, csv: Option<&Path>) -> Result<()> {
    let input = planner_input(config, args)?;
    let outputs = recompute(&input, &BundleInput::default(), config);

    if args.json {
        print_json(&outputs, config)?;
    } else {
        display_schedule(&outputs);
    }

    if let Some(path) = csv {
        write_schedule_csv(&outputs.schedule, path)?;
        eprintln!("Schedule written to {}", path.display());
    }
    Ok(())
}

/// Write the active configuration table (bundled, or the `--config` file) for editing.
fn cmd_init_config(config: &FuelConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        let overwrite = prompt_yes_no(&format!("{} exists. Overwrite?", path.display()), false)?;
        if !overwrite {
            println!("Left {} unchanged.", path.display());
            return Ok(());
        }
    }

    save_config(path, config)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}
