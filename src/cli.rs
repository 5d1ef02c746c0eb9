use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::interface::resolve_key;
use crate::models::{BundleInput, FuelConfig, KeyCategory, PlannerInput};

/// Fuel planner: carbohydrate, fluid and sodium plans for endurance sessions.
#[derive(Parser, Debug)]
#[command(name = "fuel_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration JSON file to use instead of the bundled table.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Targets, product plan and event bundle for one session.
    Plan {
        #[command(flatten)]
        planner: PlannerArgs,

        /// Write the event bundle to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Packs for 30 days of training.
    Bundle {
        #[command(flatten)]
        planner: PlannerArgs,

        #[command(flatten)]
        period: PeriodArgs,

        /// Write the 30-day bundle to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Bottle plan and 30-minute intake schedule.
    Schedule {
        #[command(flatten)]
        planner: PlannerArgs,

        /// Write the schedule to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List the accepted keys for every option.
    Options,

    /// Write the active configuration table to a file for editing.
    InitConfig {
        /// Destination path.
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            planner: PlannerArgs::default(),
            csv: None,
        }
    }
}

/// Planner inputs shared by every planning command. Unset flags keep their defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct PlannerArgs {
    /// Activity (e.g. Cycling, Running).
    #[arg(short, long)]
    pub activity: Option<String>,

    /// Session duration in hours.
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Intensity, RPE 1-10.
    #[arg(long)]
    pub rpe: Option<f64>,

    /// Weather conditions (e.g. Temperate, Hot).
    #[arg(long)]
    pub conditions: Option<String>,

    /// Bottle size in ml.
    #[arg(long)]
    pub bottle_ml: Option<u32>,

    /// Sweat rate (e.g. Moderate, High).
    #[arg(long)]
    pub sweat_rate: Option<String>,

    /// Sweat saltiness (e.g. Medium, High).
    #[arg(long)]
    pub sweat_salt: Option<String>,

    /// Fraction of sweat sodium to replace, 0-1.
    #[arg(long)]
    pub sodium_replacement: Option<f64>,

    /// Carb mode (e.g. Standard, Gut-trained).
    #[arg(long)]
    pub carb_mode: Option<String>,

    /// Caffeine protocol (None, Low, Medium, High, Custom).
    #[arg(long)]
    pub caffeine: Option<String>,

    /// Caffeinated share of carbs when the protocol is Custom, 0-0.75.
    #[arg(long)]
    pub caffeine_custom: Option<f64>,

    /// Plan style (e.g. Balanced, Drink-led).
    #[arg(short, long)]
    pub style: Option<String>,

    /// Show full prices without the first-order discount.
    #[arg(long)]
    pub no_discount: bool,

    /// Prompt for every input.
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the full outputs as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl PlannerArgs {
    /// Overlay the given flags onto `input`. Key flags are checked against the configuration.
    pub fn apply_to(&self, input: &mut PlannerInput, config: &FuelConfig) -> Result<()> {
        let keyed = [
            (&self.activity, KeyCategory::Activity, &mut input.activity),
            (&self.conditions, KeyCategory::Conditions, &mut input.conditions),
            (&self.sweat_rate, KeyCategory::SweatRate, &mut input.sweat_rate),
            (&self.sweat_salt, KeyCategory::SweatSalt, &mut input.sweat_salt),
            (&self.carb_mode, KeyCategory::CarbMode, &mut input.carb_mode),
            (&self.caffeine, KeyCategory::CaffeineProtocol, &mut input.caffeine_protocol),
            (&self.style, KeyCategory::PlanStyle, &mut input.plan_style),
        ];
        for (flag, category, field) in keyed {
            if let Some(value) = flag {
                *field = resolve_key(value, category, config)?;
            }
        }

        if let Some(hours) = self.duration {
            input.duration_hours = hours;
        }
        if let Some(rpe) = self.rpe {
            input.rpe = rpe;
        }
        if let Some(ml) = self.bottle_ml {
            input.bottle_size_ml = ml;
        }
        if let Some(fraction) = self.sodium_replacement {
            input.sodium_replacement = fraction;
        }
        if let Some(fraction) = self.caffeine_custom {
            input.caffeine_custom_fraction = fraction;
        }
        if self.no_discount {
            input.apply_discount = false;
        }
        Ok(())
    }
}

/// 30-day usage profile flags.
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Training sessions in the next 30 days.
    #[arg(long)]
    pub sessions: Option<u32>,

    /// Average session length in hours.
    #[arg(long)]
    pub avg_hours: Option<f64>,

    /// Fraction of sessions fuelled with product, 0-1.
    #[arg(long)]
    pub fuelled: Option<f64>,
}

impl PeriodArgs {
    pub fn apply_to(&self, input: &mut BundleInput) {
        if let Some(sessions) = self.sessions {
            input.sessions_30d = sessions;
        }
        if let Some(hours) = self.avg_hours {
            input.avg_session_hours = hours;
        }
        if let Some(fraction) = self.fuelled {
            input.fuelled_fraction = fraction;
        }
    }
}
