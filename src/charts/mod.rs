//! Charts module - interactive dashboard charts

mod plotter;

pub use plotter::{ChartPlotter, PieSlice};
