use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use solar_core::CityTable;
use solar_ui::headless::{self, EstimateRequest, OutputFormat};
use solar_ui::{AppConfig, logging, run_interactive};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Residential solar estimator.
///
/// Without a subcommand, opens the interactive form. `calc` runs a single
/// estimate and prints it; `cities` lists the irradiance table.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to `solar-estimator.toml` if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `solar_core=trace`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate one estimate and print it.
    Calc(CalcArgs),
    /// List the configured cities and their irradiance.
    Cities,
}

#[derive(Debug, Args)]
struct CalcArgs {
    /// Yearly consumption in kWh.
    #[arg(long, conflicts_with = "monthly_energy")]
    annual_energy: Option<String>,

    /// Monthly consumption in kWh; multiplied by 12.
    #[arg(long)]
    monthly_energy: Option<String>,

    /// City to use; defaults to the first configured city.
    #[arg(long)]
    city: Option<String>,

    /// Usable roof area in m².
    #[arg(long)]
    roof_area: Option<String>,

    /// Area of one panel in m².
    #[arg(long)]
    panel_area: Option<String>,

    /// Rated power of one panel in W.
    #[arg(long)]
    panel_wattage: Option<String>,

    /// How many panels to install.
    #[arg(long)]
    number_of_panels: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl From<CalcArgs> for EstimateRequest {
    fn from(args: CalcArgs) -> Self {
        Self {
            annual_energy: args.annual_energy,
            monthly_energy: args.monthly_energy,
            city: args.city,
            roof_area: args.roof_area,
            panel_area: args.panel_area,
            panel_wattage: args.panel_wattage,
            number_of_panels: args.number_of_panels,
        }
    }
}

// ─── logging ─────────────────────────────────────────────────────────────────

/// Applies level and log file, command line first, then configuration.
fn configure_logging(
    cli: &Cli,
    config: &AppConfig,
) -> anyhow::Result<()> {
    if !logging::env_filter_present() {
        if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
            logging::set_log_level(level)?;
        }
    }

    let log_file: Option<&Path> = cli.log_file.as_deref().or(config.logging.file.as_deref());
    if let Some(path) = log_file {
        logging::enable_file_logging(path)?;
        debug!(path = %path.display(), "file logging enabled");
    }
    Ok(())
}

// ─── subcommands ─────────────────────────────────────────────────────────────

fn calc(
    cities: CityTable,
    args: CalcArgs,
) -> anyhow::Result<()> {
    let format = args.format;
    match headless::estimate(cities, &args.into()) {
        Ok(result) => {
            let output = headless::render(&result, format).context("cannot render result")?;
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            for error in &e.errors {
                eprintln!("{error}");
            }
            Err(e.into())
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    configure_logging(&cli, &config)?;

    let cities = config.city_table()?;
    info!(cities = cities.len(), "city table ready");

    match cli.command {
        None => run_interactive(cities),
        Some(Command::Calc(args)) => calc(cities, args),
        Some(Command::Cities) => {
            println!("{}", headless::render_cities(&cities));
            Ok(())
        }
    }
}
