//! CORD-19 Explorer - metadata cleaning, aggregation & interactive charts
//!
//! Runs the console report or the interactive explorer over a trimmed
//! CORD-19 metadata CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cord19_explorer::config::ExplorerConfig;
use cord19_explorer::data::{LoadedData, LoaderError};
use cord19_explorer::gui::ExplorerApp;
use cord19_explorer::report;
use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CORD-19 Explorer - explore publication trends in CORD-19 metadata
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Metadata CSV to load (default: trimmed_metadata.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive explorer (default)
    Explore,

    /// Print the console report and write the charts
    Report {
        /// Directory the chart PNGs are written to
        #[arg(long)]
        out: Option<PathBuf>,

        /// Do not open the charts after writing them
        #[arg(long)]
        no_open: bool,

        /// Print the aggregates as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Number of journals to list
        #[arg(long)]
        top_journals: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    if let Some(csv) = args.csv {
        config.csv_path = csv;
    }

    let data = match LoadedData::load(&config.csv_path) {
        Ok(data) => data,
        Err(e @ LoaderError::SourceNotFound(_)) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", missing_file_hint(&config.csv_path));
            std::process::exit(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load {}", config.csv_path.display()));
        }
    };

    match args.command.unwrap_or(Command::Explore) {
        Command::Report {
            out,
            no_open,
            json,
            top_journals,
        } => {
            let mut settings = config.report;
            if let Some(out) = out {
                settings.output_dir = out;
            }
            if let Some(n) = top_journals {
                settings.top_journals = n;
            }
            settings.open_charts &= !no_open;
            report::run(&data, &settings, json)
        }
        Command::Explore => run_explorer(data, config),
    }
}

fn run_explorer(data: LoadedData, config: ExplorerConfig) -> Result<()> {
    info!(records = data.records.len(), "starting explorer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title("CORD-19 Data Explorer"),
        ..Default::default()
    };

    let settings = config.explorer;
    eframe::run_native(
        "CORD-19 Data Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, data, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Explorer window failed: {}", e))
}

fn missing_file_hint(csv_path: &Path) -> String {
    format!("Please ensure '{}' is in the working directory.", csv_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_names_the_requested_file() {
        let hint = missing_file_hint(Path::new("data/other.csv"));
        assert_eq!(hint, "Please ensure 'data/other.csv' is in the working directory.");
    }

    #[test]
    fn test_csv_flag_parses_before_subcommand() {
        let args = Args::try_parse_from(["cord19_explorer", "--csv", "x.csv", "report", "--json"])
            .unwrap();
        assert_eq!(args.csv, Some(PathBuf::from("x.csv")));
        assert!(matches!(args.command, Some(Command::Report { json: true, .. })));
    }
}
