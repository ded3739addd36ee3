//! Chart Viewer Widget
//! Scrollable central panel laying out every dashboard chart as a card.

use crate::charts::{ChartPlotter, PieSlice};
use crate::data::{FilterState, GameSelection, WorkloadView, ALL};
use crate::stats::{DashboardFrame, WorkloadBreakdown};
use egui::{Color32, ComboBox, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 420.0;
const HEATMAP_HEIGHT: f32 = 360.0;

/// Actions triggered by the chart viewer's own controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerAction {
    None,
    GamesChanged,
    WorkloadChanged,
}

/// Scrollable chart display area.
pub struct ChartViewer {
    report_year: i32,
}

impl ChartViewer {
    pub fn new(report_year: i32) -> Self {
        Self { report_year }
    }

    fn banner_title(&self) -> String {
        format!("{} Localization Project Dashboard", self.report_year)
    }

    fn period_title(&self) -> String {
        format!("Total Word Count ({})", self.report_year)
    }

    /// Draw the chart viewer
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        frame: &DashboardFrame,
        filters: &mut FilterState,
    ) -> ViewerAction {
        let mut action = ViewerAction::None;
        let banner_title = self.banner_title();
        let period_title = self.period_title();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_banner(ui, &banner_title);
                ui.label("Hover over charts for detailed insights per game.");
                ui.add_space(CHART_SPACING);

                Self::card(ui, &period_title, |ui| {
                    ChartPlotter::draw_period_chart(
                        ui,
                        &frame.monthly,
                        &frame.quarterly,
                        CHART_HEIGHT,
                    );
                });

                Self::card(ui, "Monthly Word Count by Game", |ui| {
                    ChartPlotter::draw_heatmap(ui, &frame.game_month, HEATMAP_HEIGHT);
                });

                ui.columns(2, |columns| {
                    Self::card(
                        &mut columns[0],
                        "Number of Translation and LQA Projects by Game",
                        |ui| {
                            ChartPlotter::draw_type_comparison(
                                ui,
                                &frame.type_comparison,
                                CHART_HEIGHT,
                            );
                        },
                    );
                    Self::card(&mut columns[1], "Total Word Count by Game", |ui| {
                        ChartPlotter::draw_game_totals(ui, &frame.game_totals, CHART_HEIGHT);
                    });
                });

                Self::card(ui, "Average Word Count per Trans Project by Game", |ui| {
                    if Self::game_selector(ui, &frame.game_options, &mut filters.games) {
                        action = ViewerAction::GamesChanged;
                    }
                    ui.add_space(6.0);
                    ChartPlotter::draw_game_bubbles(ui, &frame.game_metrics, CHART_HEIGHT);
                });

                ui.columns(2, |columns| {
                    Self::card(
                        &mut columns[0],
                        "Monthly vs Yearly Avg Trans WC per In-house Translator",
                        |ui| {
                            ChartPlotter::draw_translator_averages(
                                ui,
                                &frame.translator_averages,
                                CHART_HEIGHT,
                            );
                        },
                    );
                    Self::card(&mut columns[1], "Workload Distribution", |ui| {
                        let mut by_work_type = filters.workload.is_by_work_type();
                        if ui
                            .toggle_value(&mut by_work_type, "Show by In-House / Vendor")
                            .changed()
                        {
                            filters.workload = WorkloadView::from_toggle(by_work_type);
                            action = ViewerAction::WorkloadChanged;
                        }
                        ui.add_space(6.0);
                        Self::draw_workload(ui, frame.workload.as_ref());
                    });
                });
            });

        action
    }

    fn draw_banner(ui: &mut egui::Ui, title: &str) {
        egui::Frame::none()
            .fill(Color32::from_rgb(26, 58, 92))
            .rounding(10.0)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(title)
                            .size(28.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            });
        ui.add_space(8.0);
    }

    /// Draw one chart card with a title
    fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(16.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
        ui.add_space(CHART_SPACING);
    }

    /// Multi-select dropdown over "All" and every game. Returns true on change.
    fn game_selector(ui: &mut egui::Ui, options: &[String], games: &mut GameSelection) -> bool {
        let mut changed = false;
        let selected: Vec<&str> = games.choices().collect();
        let summary = if games.is_all() {
            ALL.to_string()
        } else if selected.is_empty() {
            "None".to_string()
        } else {
            selected.join(", ")
        };

        ui.horizontal(|ui| {
            ui.label("Select Games:");
            ComboBox::from_id_salt("game_select")
                .width(320.0)
                .selected_text(summary)
                .show_ui(ui, |ui| {
                    for option in options {
                        let mut checked = games.contains(option);
                        if ui.checkbox(&mut checked, option).changed() {
                            games.toggle(option);
                            changed = true;
                        }
                    }
                });
        });

        changed
    }

    fn draw_workload(ui: &mut egui::Ui, workload: Option<&WorkloadBreakdown>) {
        match workload {
            Some(WorkloadBreakdown::Linguists(shares)) => {
                ui.label(
                    RichText::new("In-House Linguist Distribution (by Project Count)")
                        .size(13.0),
                );
                let slices: Vec<PieSlice> = shares
                    .iter()
                    .map(|s| PieSlice {
                        label: s.assignee.clone(),
                        value: s.project_count as f64,
                    })
                    .collect();
                ChartPlotter::draw_donut(ui, &slices, CHART_HEIGHT);
            }
            Some(WorkloadBreakdown::InHouseVsVendor(split)) => {
                ui.label(
                    RichText::new("In-House vs Vendor Distribution (by Word Count)").size(13.0),
                );
                let slices = vec![
                    PieSlice {
                        label: "Outsourced".to_string(),
                        value: split.outsourced_wc,
                    },
                    PieSlice {
                        label: "In-House".to_string(),
                        value: split.in_house_wc,
                    },
                ];
                ChartPlotter::draw_donut(ui, &slices, CHART_HEIGHT);
            }
            None => ChartPlotter::draw_donut(ui, &[], CHART_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_carry_report_year() {
        let viewer = ChartViewer::new(2026);
        assert_eq!(viewer.banner_title(), "2026 Localization Project Dashboard");
        assert_eq!(viewer.period_title(), "Total Word Count (2026)");
    }
}
