//! Dashboard Main Application
//! Main window with the overview panel and the chart viewer.

use crate::config::DashboardConfig;
use crate::data::{DataLoader, FilterState, LedgerSnapshot, LoaderError};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ViewerAction};
use crate::stats::{DashboardFrame, FilterChange};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete(LedgerSnapshot),
    Error(String),
}

/// Main application window. Owns this session's snapshot and filter state.
pub struct DashboardApp {
    config: DashboardConfig,
    snapshot: Arc<LedgerSnapshot>,
    filters: FilterState,
    frame: DashboardFrame,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
}

/// Status line after a successful load.
fn loaded_status(snapshot: &LedgerSnapshot) -> String {
    let source = snapshot.source().unwrap_or("ledger");
    if snapshot.is_empty() {
        format!("No projects in {}", source)
    } else {
        format!("Loaded {} projects from {}", snapshot.len(), source)
    }
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        csv_path: PathBuf,
        initial: Result<LedgerSnapshot, LoaderError>,
    ) -> Self {
        let mut control_panel = ControlPanel::new(Some(csv_path));
        let snapshot = match initial {
            Ok(snapshot) => {
                control_panel.set_status(&loaded_status(&snapshot));
                snapshot
            }
            Err(e) => {
                control_panel.set_status(&format!("Error: {}", e));
                LedgerSnapshot::default()
            }
        };

        let filters = FilterState::default();
        let frame = DashboardFrame::compute(&snapshot, &filters, &config);
        let chart_viewer = ChartViewer::new(config.report_year);
        Self {
            config,
            snapshot: Arc::new(snapshot),
            filters,
            frame,
            control_panel,
            chart_viewer,
            load_rx: None,
        }
    }

    /// Replace the snapshot and start over from unfiltered views.
    fn set_snapshot(&mut self, snapshot: LedgerSnapshot) {
        self.snapshot = Arc::new(snapshot);
        self.filters = FilterState::default();
        self.frame = DashboardFrame::compute(&self.snapshot, &self.filters, &self.config);
    }

    fn refresh(&mut self, change: FilterChange) {
        self.frame
            .refresh(&self.snapshot, &self.filters, &self.config, change);
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.load_rx.is_some() {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.csv_path = Some(path.clone());
            self.control_panel.set_status("Loading CSV file...");
            self.control_panel.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);
            let report_year = self.config.report_year;

            // Load CSV in background thread
            thread::spawn(move || {
                let result = match DataLoader::load_snapshot(&path, report_year) {
                    Ok(snapshot) => LoadResult::Complete(snapshot),
                    Err(e) => LoadResult::Error(e.to_string()),
                };
                let _ = tx.send(result);
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(snapshot)) => {
                info!(projects = snapshot.len(), "ledger reloaded");
                self.control_panel.set_status(&loaded_status(&snapshot));
                self.control_panel.is_loading = false;
                self.set_snapshot(snapshot);
            }
            Ok(LoadResult::Error(error)) => {
                warn!(%error, "ledger reload failed");
                self.control_panel.set_status(&format!("Error: {}", error));
                self.control_panel.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel.set_status("Error: loader stopped");
                self.control_panel.is_loading = false;
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.load_rx.is_some() {
            ctx.request_repaint();
        }

        // Left panel - Overview
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action =
                        self.control_panel
                            .show(ui, &self.frame, &mut self.filters.project_type);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ProjectTypeChanged => {
                            self.refresh(FilterChange::ProjectType)
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Charts
        egui::CentralPanel::default().show(ctx, |ui| {
            let action = self.chart_viewer.show(ui, &self.frame, &mut self.filters);
            match action {
                ViewerAction::GamesChanged => self.refresh(FilterChange::Games),
                ViewerAction::WorkloadChanged => self.refresh(FilterChange::Workload),
                ViewerAction::None => {}
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProjectRecord;

    #[test]
    fn test_loaded_status_names_source() {
        let snapshot = LedgerSnapshot::new(
            vec![ProjectRecord::default(), ProjectRecord::default()],
            Some("ledger.csv".to_string()),
        );
        assert_eq!(loaded_status(&snapshot), "Loaded 2 projects from ledger.csv");

        let empty = LedgerSnapshot::new(Vec::new(), Some("blank.csv".to_string()));
        assert_eq!(loaded_status(&empty), "No projects in blank.csv");
        assert_eq!(loaded_status(&LedgerSnapshot::default()), "No projects in ledger");
    }
}
