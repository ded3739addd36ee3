//! L10n Dashboard - Localization Project Ledger Dashboard
//!
//! Loads a localization project ledger CSV and shows word-count and workload charts.

mod bootstrap;
mod charts;
mod config;
mod data;
mod gui;
mod stats;

use clap::Parser;
use config::{DashboardConfig, Settings};
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    let config = DashboardConfig::resolve(&settings)?;
    info!(report_year = config.report_year, csv = %settings.csv.display(), "starting dashboard");

    let initial = DataLoader::load_snapshot(&settings.csv, config.report_year);
    if let Err(e) = &initial {
        warn!(error = %e, "could not load ledger, starting empty");
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("L10n Dashboard"),
        ..Default::default()
    };

    let csv_path = settings.csv.clone();
    eframe::run_native(
        "L10n Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, csv_path, initial)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
