//! Control Panel Widget
//! Left side panel with the overview metrics, project-type selector and data source.

use crate::data::ProjectTypeFilter;
use crate::stats::{format_thousands, DashboardFrame};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new(csv_path: Option<PathBuf>) -> Self {
        Self {
            csv_path,
            ..Self::default()
        }
    }

    fn metric(ui: &mut egui::Ui, value: String) {
        ui.label(RichText::new(value).size(28.0).strong());
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        frame: &DashboardFrame,
        project_type: &mut ProjectTypeFilter,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(
            RichText::new("📊 OVERVIEW")
                .size(22.0)
                .color(Color32::from_rgb(220, 53, 69)),
        );
        ui.add_space(5.0);
        ui.separator();

        // ===== Total Word Count =====
        ui.label(RichText::new("Total Word Count").size(14.0).strong());
        Self::metric(ui, format_thousands(frame.overall.total_wc));
        ui.add_space(5.0);
        ui.separator();

        // ===== Total Projects =====
        ui.label(RichText::new("Total Projects").size(14.0).strong());
        ui.add_space(4.0);
        ComboBox::from_id_salt("project_type")
            .width(200.0)
            .selected_text(project_type.label())
            .show_ui(ui, |ui| {
                for option in &frame.project_type_options {
                    if ui
                        .selectable_label(project_type.label() == option.as_str(), option)
                        .clicked()
                        && project_type.label() != option.as_str()
                    {
                        *project_type = ProjectTypeFilter::from_choice(option);
                        action = ControlPanelAction::ProjectTypeChanged;
                    }
                }
            });
        Self::metric(ui, format_thousands(frame.filtered_project_count as f64));
        ui.add_space(5.0);
        ui.separator();

        // ===== Games Covered =====
        ui.label(RichText::new("Games Covered").size(14.0).strong());
        Self::metric(ui, frame.overall.games_covered.to_string());
        ui.add_space(5.0);
        ui.separator();

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    let path_color = if self.csv_path.is_some() {
                        ui.visuals().text_color()
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(&path_text).size(12.0).color(path_color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_loading, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(5.0);
        if self.is_loading {
            ui.add(egui::ProgressBar::new(0.0).animate(true));
        }
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(10.0);
        ui.separator();
        ui.label(
            RichText::new("Built with Rust & egui")
                .size(11.0)
                .color(Color32::GRAY),
        );

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ProjectTypeChanged,
}
