//! Chart Plotter Module
//! Draws the dashboard charts using egui_plot and the egui painter.

use crate::stats::{
    format_percent, format_si, format_thousands, GameMonthMatrix, GameProjectMetrics, GameTotal,
    PeriodTotal, TranslatorAverages, TypeComparison,
};
use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Shape, Stroke};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text,
};
use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

pub const TRANSLATION_COLOR: Color32 = Color32::from_rgb(70, 130, 180); // Steel blue
pub const LQA_COLOR: Color32 = Color32::from_rgb(255, 127, 80); // Coral
pub const MONTHLY_COLOR: Color32 = Color32::from_rgb(220, 20, 60); // Crimson
pub const QUARTERLY_COLOR: Color32 = Color32::from_rgba_premultiplied(35, 52, 83, 89);
pub const AVERAGE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const YEARLY_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
    Color32::from_rgb(255, 102, 146),
    Color32::from_rgb(182, 232, 128),
    Color32::from_rgb(255, 151, 255),
    Color32::from_rgb(254, 203, 82),
];

/// Sequential "Blues" stops, light to dark
const BLUES: [(u8, u8, u8); 5] = [
    (247, 251, 255),
    (198, 219, 239),
    (107, 174, 214),
    (33, 113, 181),
    (8, 48, 107),
];

const BUBBLE_MAX_RADIUS: f32 = 30.0;
const BUBBLE_MIN_RADIUS: f32 = 4.0;

/// One slice of a donut chart.
#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Creates the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn palette_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Map `t` in [0, 1] onto the Blues scale.
    pub fn blues(t: f64) -> Color32 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (BLUES.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(BLUES.len() - 1);
        let upper = (lower + 1).min(BLUES.len() - 1);
        let frac = scaled - lower as f64;

        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (r0, g0, b0) = BLUES[lower];
        let (r1, g1, b1) = BLUES[upper];
        Color32::from_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
    }

    fn empty_state(ui: &mut egui::Ui, height: f32) {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(16.0).color(Color32::GRAY));
            });
        });
    }

    /// Grid marks at every integer position, for categorical axes.
    fn category_marks(count: usize) -> Vec<GridMark> {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }

    fn category_label(labels: &[String], value: f64) -> String {
        if (value - value.round()).abs() > 1e-6 || value < 0.0 {
            return String::new();
        }
        labels.get(value.round() as usize).cloned().unwrap_or_default()
    }

    fn month_index(date: NaiveDate) -> i64 {
        date.year() as i64 * 12 + date.month0() as i64
    }

    fn month_from_index(index: i64) -> Option<NaiveDate> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month0 = index.rem_euclid(12) as u32;
        NaiveDate::from_ymd_opt(year, month0 + 1, 1)
    }

    /// Month name at an integer offset from `base`; blank between months or
    /// off the calendar.
    fn month_label(base: i64, value: f64) -> String {
        if !value.is_finite() || (value - value.round()).abs() > 1e-6 {
            return String::new();
        }
        let offset = value.round();
        if offset.abs() > i64::MAX as f64 / 2.0 {
            return String::new();
        }
        base.checked_add(offset as i64)
            .and_then(Self::month_from_index)
            .map(|d| d.format("%b").to_string())
            .unwrap_or_default()
    }

    /// First month index and the number of month marks the data covers.
    /// Quarter bars reach two months past their start.
    fn period_span(monthly: &[PeriodTotal], quarterly: &[PeriodTotal]) -> Option<(i64, usize)> {
        let indices = monthly
            .iter()
            .chain(quarterly.iter())
            .map(|p| Self::month_index(p.start));
        let base = indices.clone().min()?;
        let last = indices.max()?;
        Some((base, (last - base + 3) as usize))
    }

    /// Quarterly bars spanning their three months, overlaid with the monthly line.
    pub fn draw_period_chart(
        ui: &mut egui::Ui,
        monthly: &[PeriodTotal],
        quarterly: &[PeriodTotal],
        height: f32,
    ) {
        let Some((base, span)) = Self::period_span(monthly, quarterly) else {
            Self::empty_state(ui, height);
            return;
        };
        let x_of = |date: NaiveDate| (Self::month_index(date) - base) as f64;

        let bars: Vec<Bar> = quarterly
            .iter()
            .map(|q| {
                Bar::new(x_of(q.start) + 1.0, q.total_wc)
                    .width(2.9)
                    .name(&q.label)
                    .fill(QUARTERLY_COLOR)
            })
            .collect();
        let quarter_counts: HashMap<String, usize> = quarterly
            .iter()
            .map(|q| (q.label.clone(), q.project_count))
            .collect();
        let month_tips: HashMap<i64, (String, usize)> = monthly
            .iter()
            .map(|m| {
                (
                    Self::month_index(m.start) - base,
                    (m.label.clone(), m.project_count),
                )
            })
            .collect();
        let line_points: Vec<[f64; 2]> =
            monthly.iter().map(|m| [x_of(m.start), m.total_wc]).collect();

        Plot::new("period_totals")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .allow_drag(false)
            .include_y(0.0)
            .y_axis_label("Total Word Count")
            .x_grid_spacer(move |_input| Self::category_marks(span))
            .x_axis_formatter(move |mark, _range| Self::month_label(base, mark.value))
            .y_axis_formatter(|mark, _range| format_si(mark.value))
            .label_formatter(move |name, value| {
                if name.is_empty() || !value.x.is_finite() {
                    return String::new();
                }
                match month_tips.get(&(value.x.round() as i64)) {
                    Some((label, count)) => format!(
                        "{}\n{}\n{} projects",
                        label,
                        format_thousands(value.y),
                        count
                    ),
                    None => format!("{}\n{}", name, format_thousands(value.y)),
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(QUARTERLY_COLOR)
                        .name("Quarterly Total WC")
                        .element_formatter(Box::new(move |bar, _chart| {
                            let count = quarter_counts.get(&bar.name).copied().unwrap_or(0);
                            format!(
                                "{}\n{}\n{} projects",
                                bar.name,
                                format_thousands(bar.value),
                                count
                            )
                        })),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(line_points.clone()))
                        .color(MONTHLY_COLOR)
                        .width(3.0)
                        .name("Monthly Total WC"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(line_points))
                        .color(MONTHLY_COLOR)
                        .radius(4.0)
                        .name("Monthly Total WC"),
                );
            });
    }

    /// Game x month word-count heatmap with a colour bar.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &GameMonthMatrix, height: f32) {
        if matrix.is_empty() {
            Self::empty_state(ui, height);
            return;
        }

        let label_width = 120.0;
        let axis_height = 22.0;
        let colorbar_width = 70.0;

        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::hover());
        let area = response.rect;
        let text_color = ui.visuals().text_color();
        let empty_color = ui.visuals().extreme_bg_color;

        let cols = matrix.months.len().max(1);
        let rows = matrix.games.len();
        let grid = Rect::from_min_max(
            Pos2::new(area.left() + label_width, area.top()),
            Pos2::new(area.right() - colorbar_width, area.bottom() - axis_height),
        );
        let cell_w = grid.width() / cols as f32;
        let cell_h = grid.height() / rows as f32;
        let max = matrix.max_value();

        let mut hovered: Option<String> = None;
        let hover_pos = response.hover_pos();

        for (row, game) in matrix.games.iter().enumerate() {
            let y = grid.top() + row as f32 * cell_h;
            painter.text(
                Pos2::new(grid.left() - 6.0, y + cell_h / 2.0),
                Align2::RIGHT_CENTER,
                game,
                FontId::proportional(11.0),
                text_color,
            );

            for col in 0..matrix.months.len() {
                let cell = Rect::from_min_size(
                    Pos2::new(grid.left() + col as f32 * cell_w, y),
                    egui::vec2(cell_w, cell_h),
                );
                let value = matrix.cell(row, col);
                let fill = match value {
                    Some(v) if max > 0.0 => Self::blues(v / max),
                    Some(_) => Self::blues(0.0),
                    None => empty_color,
                };
                painter.rect_filled(cell, 0.0, fill);
                painter.rect_stroke(cell, 0.0, Stroke::new(0.5, Color32::WHITE));

                if hover_pos.is_some_and(|p| cell.contains(p)) {
                    let value_text = value.map(format_thousands).unwrap_or_else(|| "-".into());
                    hovered = Some(format!(
                        "{} · {}\nTotal WC: {}",
                        game, matrix.month_labels[col], value_text
                    ));
                }
            }
        }

        for (col, label) in matrix.month_labels.iter().enumerate() {
            painter.text(
                Pos2::new(
                    grid.left() + (col as f32 + 0.5) * cell_w,
                    grid.bottom() + axis_height / 2.0,
                ),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(11.0),
                text_color,
            );
        }

        // Colour bar
        let bar = Rect::from_min_max(
            Pos2::new(grid.right() + 12.0, grid.top()),
            Pos2::new(grid.right() + 26.0, grid.bottom()),
        );
        let steps = 24;
        for step in 0..steps {
            let t = step as f32 / steps as f32;
            let slice = Rect::from_min_max(
                Pos2::new(bar.left(), bar.bottom() - (t + 1.0 / steps as f32) * bar.height()),
                Pos2::new(bar.right(), bar.bottom() - t * bar.height()),
            );
            painter.rect_filled(slice, 0.0, Self::blues(t as f64));
        }
        painter.text(
            Pos2::new(bar.right() + 4.0, bar.top()),
            Align2::LEFT_TOP,
            format_si(max),
            FontId::proportional(10.0),
            text_color,
        );
        painter.text(
            Pos2::new(bar.right() + 4.0, bar.bottom()),
            Align2::LEFT_BOTTOM,
            "0",
            FontId::proportional(10.0),
            text_color,
        );

        if let Some(text) = hovered {
            response.on_hover_text_at_pointer(text);
        }
    }

    /// Stacked Translation/LQA bars per game, LQA share printed above each stack.
    pub fn draw_type_comparison(ui: &mut egui::Ui, rows: &[TypeComparison], height: f32) {
        if rows.is_empty() {
            Self::empty_state(ui, height);
            return;
        }

        let labels: Vec<String> = rows.iter().map(|r| r.game.clone()).collect();
        let count = labels.len();

        let trans = BarChart::new(
            rows.iter()
                .enumerate()
                .map(|(i, r)| Bar::new(i as f64, r.trans as f64).name(&r.game).width(0.7))
                .collect(),
        )
        .color(TRANSLATION_COLOR)
        .name("Translation");
        let lqa = BarChart::new(
            rows.iter()
                .enumerate()
                .map(|(i, r)| Bar::new(i as f64, r.lqa as f64).name(&r.game).width(0.7))
                .collect(),
        )
        .color(LQA_COLOR)
        .name("LQA")
        .stack_on(&[&trans]);

        Plot::new("type_comparison")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Game")
            .y_axis_label("Number of Projects")
            .x_grid_spacer(move |_input| Self::category_marks(count))
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(trans);
                plot_ui.bar_chart(lqa);
                for (i, row) in rows.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, row.total() as f64),
                            RichText::new(format_percent(row.lqa_pct)).size(12.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }

    /// Per-game word-count totals, shaded by value.
    pub fn draw_game_totals(ui: &mut egui::Ui, totals: &[GameTotal], height: f32) {
        if totals.is_empty() {
            Self::empty_state(ui, height);
            return;
        }

        let labels: Vec<String> = totals.iter().map(|t| t.game.clone()).collect();
        let count = labels.len();
        let max = totals.iter().map(|t| t.total_wc).fold(0.0, f64::max);

        let bars: Vec<Bar> = totals
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let shade = if max > 0.0 { 0.25 + 0.75 * t.total_wc / max } else { 0.25 };
                Bar::new(i as f64, t.total_wc)
                    .name(&t.game)
                    .width(0.7)
                    .fill(Self::blues(shade))
            })
            .collect();

        Plot::new("game_totals")
            .height(height)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Game")
            .y_axis_label("Total Word Count")
            .x_grid_spacer(move |_input| Self::category_marks(count))
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| format_si(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name("Total WC")
                        .element_formatter(Box::new(|bar, _chart| {
                            format!("{}\nTotal WC: {}", bar.name, format_thousands(bar.value))
                        })),
                );
                for (i, t) in totals.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, t.total_wc),
                            RichText::new(format_si(t.total_wc)).size(11.0),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }

    /// Bubble per game: Trans projects vs total word count, sized by the
    /// average word count per Trans project.
    pub fn draw_game_bubbles(ui: &mut egui::Ui, metrics: &[GameProjectMetrics], height: f32) {
        if metrics.is_empty() {
            Self::empty_state(ui, height);
            return;
        }

        let max_avg = metrics
            .iter()
            .filter_map(|m| m.avg_wc_per_project)
            .fold(0.0, f64::max);
        let details: Vec<(String, f64, f64)> = metrics
            .iter()
            .map(|m| (m.game.clone(), m.trans_wc, m.avg_wc_per_project.unwrap_or(0.0)))
            .collect();

        Plot::new("game_bubbles")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_x(0.0)
            .include_y(0.0)
            .x_axis_label("Number of Trans Projects")
            .y_axis_label("Total Word Count")
            .y_axis_formatter(|mark, _range| format_si(mark.value))
            .label_formatter(move |name, value| {
                let (trans_wc, avg) = details
                    .iter()
                    .find(|(game, _, _)| game == name)
                    .map(|(_, wc, avg)| (format_thousands(*wc), format_thousands(*avg)))
                    .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
                if name.is_empty() {
                    String::new()
                } else {
                    format!(
                        "{}\nTrans Projects: {:.0}\nTotal WC: {}\nTrans WC: {}\nAvg WC / Project: {}",
                        name,
                        value.x,
                        format_thousands(value.y),
                        trans_wc,
                        avg
                    )
                }
            })
            .show(ui, |plot_ui| {
                for (i, m) in metrics.iter().enumerate() {
                    let radius = match m.avg_wc_per_project {
                        Some(avg) if max_avg > 0.0 => {
                            BUBBLE_MAX_RADIUS * (avg / max_avg).sqrt() as f32
                        }
                        _ => BUBBLE_MIN_RADIUS,
                    };
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[
                            m.trans_projects as f64,
                            m.total_wc,
                        ]]))
                        .radius(radius.max(BUBBLE_MIN_RADIUS))
                        .color(Self::palette_color(i).gamma_multiply(0.7))
                        .filled(true)
                        .name(&m.game),
                    );
                }
            });
    }

    /// Monthly average per in-house translator against the yearly average.
    pub fn draw_translator_averages(
        ui: &mut egui::Ui,
        averages: &TranslatorAverages,
        height: f32,
    ) {
        if averages.yearly_avg.is_none() || averages.monthly.is_empty() {
            Self::empty_state(ui, height);
            return;
        }

        ui.label(
            RichText::new(format!(
                "{} in-house translators, {} Trans words this year",
                averages.translator_count,
                format_thousands(averages.yearly_total_wc)
            ))
            .size(12.0)
            .color(Color32::GRAY),
        );

        let labels: Vec<String> = averages.monthly.iter().map(|m| m.label.clone()).collect();
        let count = labels.len();
        let monthly: Vec<[f64; 2]> = averages
            .monthly
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.avg_per_translator.map(|avg| [i as f64, avg]))
            .collect();
        let yearly: Vec<[f64; 2]> = averages
            .yearly_series()
            .iter()
            .enumerate()
            .map(|(i, (_, avg))| [i as f64, *avg])
            .collect();

        Plot::new("translator_averages")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Month")
            .y_axis_label("Avg WC per Translator")
            .x_grid_spacer(move |_input| Self::category_marks(count))
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .y_axis_formatter(|mark, _range| format_thousands(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(monthly.clone()))
                        .color(AVERAGE_COLOR)
                        .width(2.0)
                        .name("Monthly Avg WC per Translator"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(monthly))
                        .color(AVERAGE_COLOR)
                        .radius(3.5)
                        .name("Monthly Avg WC per Translator"),
                );
                plot_ui.line(
                    Line::new(PlotPoints::from(yearly))
                        .color(YEARLY_COLOR)
                        .width(2.0)
                        .style(LineStyle::dashed_loose())
                        .name("Yearly Avg WC per Translator"),
                );
            });
    }

    /// Donut chart with a legend on the right.
    pub fn draw_donut(ui: &mut egui::Ui, slices: &[PieSlice], height: f32) {
        let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
        if total <= 0.0 {
            Self::empty_state(ui, height);
            return;
        }

        let width = ui.available_width();
        let (response, painter) = ui.allocate_painter(egui::vec2(width, height), Sense::hover());
        let area = response.rect;
        let text_color = ui.visuals().text_color();

        let legend_width = (area.width() * 0.4).min(220.0);
        let center = Pos2::new(
            area.left() + (area.width() - legend_width) / 2.0,
            area.center().y,
        );
        let outer = ((area.width() - legend_width).min(area.height()) / 2.0 - 10.0).max(10.0);
        let inner = outer * 0.4;

        let mut start = 0.0_f32;
        let mut hovered: Option<String> = None;
        let hover = response.hover_pos().and_then(|p| {
            let d = p - center;
            let dist = d.length();
            (dist >= inner && dist <= outer).then(|| (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU))
        });

        for (i, slice) in slices.iter().enumerate() {
            let fraction = (slice.value.max(0.0) / total) as f32;
            if fraction <= 0.0 {
                continue;
            }
            let sweep = fraction * TAU;
            let color = Self::palette_color(i);

            let segments = ((sweep / (TAU / 180.0)).ceil() as usize).max(1);
            for s in 0..segments {
                let a0 = start + sweep * s as f32 / segments as f32 - FRAC_PI_2;
                let a1 = start + sweep * (s + 1) as f32 / segments as f32 - FRAC_PI_2;
                let at = |angle: f32, r: f32| center + egui::vec2(angle.cos(), angle.sin()) * r;
                painter.add(Shape::convex_polygon(
                    vec![at(a0, outer), at(a1, outer), at(a1, inner), at(a0, inner)],
                    color,
                    Stroke::new(0.5, color),
                ));
            }

            let pct = fraction as f64 * 100.0;
            if fraction >= 0.04 {
                let mid = start + sweep / 2.0 - FRAC_PI_2;
                let pos = center + egui::vec2(mid.cos(), mid.sin()) * (inner + outer) / 2.0;
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", pct),
                    FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }

            if hover.is_some_and(|angle| angle >= start && angle < start + sweep) {
                hovered = Some(format!(
                    "{}\n{} ({:.1}%)",
                    slice.label,
                    format_thousands(slice.value),
                    pct
                ));
            }

            // Legend entry
            let row_y = area.top() + 12.0 + i as f32 * 18.0;
            if row_y < area.bottom() - 8.0 {
                let swatch = Rect::from_min_size(
                    Pos2::new(area.right() - legend_width, row_y - 6.0),
                    egui::vec2(12.0, 12.0),
                );
                painter.rect_filled(swatch, 2.0, color);
                painter.text(
                    Pos2::new(swatch.right() + 6.0, row_y),
                    Align2::LEFT_CENTER,
                    &slice.label,
                    FontId::proportional(11.0),
                    text_color,
                );
            }

            start += sweep;
        }

        if let Some(text) = hovered {
            response.on_hover_text_at_pointer(text);
        }
    }
}
