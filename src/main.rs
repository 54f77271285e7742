mod dsc_config;
mod dsc_controllers;
mod dsc_estimator;
mod dsc_gui;
mod dsc_models;
mod dsc_views;

use anyhow::Context;
use chrono::Weekday;
use clap::{Parser, Subcommand};
use dsc_config::{AppContext, DSCConfig};
use dsc_controllers::DSCControllers;
use dsc_models::{parse_weekday, DSCModels, TextEncoding};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsc", version, about = "대전 지하철 혼잡도 예측 (Daejeon subway crowding estimator)")]
struct Cli {
    /// Crowding statistics table (CSV)
    #[arg(long, env = "DSC_DATA_FILE", default_value = DSCModels::DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Text encoding of the table
    #[arg(long, env = "DSC_ENCODING", value_enum, default_value_t = TextEncoding::Auto)]
    encoding: TextEncoding,

    /// Seed for reproducible sampling
    #[arg(long, env = "DSC_SEED")]
    seed: Option<u64>,

    /// Earliest hour offered by the hour selector
    #[arg(long, env = "DSC_MIN_HOUR", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=23))]
    min_hour: u8,

    /// Font file with Hangul glyphs for the window
    #[arg(long, env = "DSC_FONT")]
    font: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the desktop window (default)
    Gui,
    /// Menu-driven terminal session
    Interactive,
    /// Estimate crowding for one station, weekday and hour
    Estimate {
        station: String,
        #[arg(value_parser = parse_weekday_arg)]
        weekday: Weekday,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=23))]
        hour: u8,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Busiest and quietest hour band for a station and weekday
    Peaks {
        station: String,
        #[arg(value_parser = parse_weekday_arg)]
        weekday: Weekday,
        #[arg(long)]
        json: bool,
    },
    /// Mean crowding for every hour band of a station and weekday
    Profile {
        station: String,
        #[arg(value_parser = parse_weekday_arg)]
        weekday: Weekday,
    },
    /// List every station in the table
    Stations,
    /// Report skipped rows and duplicate keys
    Validate,
}

fn parse_weekday_arg(input: &str) -> Result<Weekday, String> {
    parse_weekday(input).ok_or_else(|| format!("unknown weekday '{}', try 월요일 or monday", input))
}

fn main() -> anyhow::Result<()> {
    // Set up panic hook for better error messages
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("\n{}", "═".repeat(70));
        eprintln!("❌ APPLICATION PANIC");
        eprintln!("{}", "═".repeat(70));
        eprintln!("\nThe application encountered an unexpected error:");
        eprintln!("{}", panic_info);
        eprintln!("\n💡 Troubleshooting:");
        eprintln!("  • Check that the statistics CSV is readable");
        eprintln!("  • Run with RUST_LOG=debug for row-level details");
        eprintln!("\n{}", "═".repeat(70));
    }));

    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = DSCConfig {
        data_file: cli.data,
        encoding: cli.encoding,
        seed: cli.seed,
        min_hour: cli.min_hour,
        font: cli.font,
    };

    let load = |config: DSCConfig| {
        AppContext::load(config).context("Cannot answer queries without the crowding statistics table")
    };

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => {
            dsc_gui::run_gui(config).map_err(|e| anyhow::anyhow!("Window closed with an error: {}", e))
        }
        Command::Interactive => Ok(DSCControllers::run(config)?),
        Command::Estimate {
            station,
            weekday,
            hour,
            json,
        } => DSCControllers::run_estimate(&mut load(config)?, &station, weekday, hour, json),
        Command::Peaks {
            station,
            weekday,
            json,
        } => DSCControllers::run_peaks(&load(config)?, &station, weekday, json),
        Command::Profile { station, weekday } => {
            DSCControllers::run_profile(&load(config)?, &station, weekday);
            Ok(())
        }
        Command::Stations => {
            DSCControllers::run_stations(&load(config)?);
            Ok(())
        }
        Command::Validate => {
            DSCControllers::run_validate(&load(config)?);
            Ok(())
        }
    }
}
