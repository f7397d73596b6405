mod actuation;
mod config;
mod error;
mod extract;
mod format;
mod manager;
mod plot;
mod series;
mod spectrum;
mod stats;

use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// OpenFOAM case directory, holding the optional `afc.toml`.
    #[arg(long, default_value = ".")]
    case_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the actuation velocity tables of every jet.
    Actuate,

    /// Write the time and coefficient columns of `forceCoeffs.dat`.
    Extract,

    /// Plot the power spectrum of a two-column time series.
    Spectrum {
        /// Two-column (time, value) text file.
        file: PathBuf,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.case_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Actuate => mgr.generate_actuation()?,
        Command::Extract => mgr.extract_coefficient()?,
        Command::Spectrum { file } => mgr.analyze_spectrum(file)?,
    }

    Ok(())
}
