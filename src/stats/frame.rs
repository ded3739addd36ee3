//! Dashboard Frame
//! Every derived table for one render cycle, recomputed from the snapshot.

use crate::config::DashboardConfig;
use crate::data::{FilterState, LedgerSnapshot, WorkloadView};
use crate::stats::{
    AssigneeShare, GameMonthMatrix, GameProjectMetrics, GameTotal, LedgerAggregator,
    OverallTotals, PeriodTotal, TranslatorAverages, TypeComparison, WorkloadSplit,
};
use tracing::debug;

/// Which filter dimension the viewer just changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    ProjectType,
    Games,
    Workload,
}

/// Pie chart content behind the work-type toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkloadBreakdown {
    Linguists(Vec<AssigneeShare>),
    InHouseVsVendor(WorkloadSplit),
}

/// Chart-ready tables for one snapshot and one filter state.
#[derive(Debug, Clone, Default)]
pub struct DashboardFrame {
    pub overall: OverallTotals,
    pub project_type_options: Vec<String>,
    pub game_options: Vec<String>,
    /// Project count under the project-type selector
    pub filtered_project_count: usize,
    pub monthly: Vec<PeriodTotal>,
    pub quarterly: Vec<PeriodTotal>,
    pub game_month: GameMonthMatrix,
    pub type_comparison: Vec<TypeComparison>,
    pub game_totals: Vec<GameTotal>,
    /// Bubble chart rows under the game selector
    pub game_metrics: Vec<GameProjectMetrics>,
    pub translator_averages: TranslatorAverages,
    pub workload: Option<WorkloadBreakdown>,
}

impl DashboardFrame {
    /// Compute every table from scratch.
    pub fn compute(
        snapshot: &LedgerSnapshot,
        filters: &FilterState,
        config: &DashboardConfig,
    ) -> Self {
        let records = snapshot.records();
        let mut frame = Self {
            overall: LedgerAggregator::overall_totals(records),
            project_type_options: LedgerAggregator::project_type_options(records),
            game_options: LedgerAggregator::game_options(records, config),
            monthly: LedgerAggregator::monthly_totals(records),
            quarterly: LedgerAggregator::quarterly_totals(records),
            game_month: LedgerAggregator::game_month_matrix(records),
            type_comparison: LedgerAggregator::type_comparison(records, config),
            game_totals: LedgerAggregator::game_totals(records),
            translator_averages: LedgerAggregator::translator_averages(records, config),
            ..Self::default()
        };
        for change in [
            FilterChange::ProjectType,
            FilterChange::Games,
            FilterChange::Workload,
        ] {
            frame.refresh(snapshot, filters, config, change);
        }
        frame
    }

    /// Recompute only the tables that depend on `change`, starting from the
    /// unfiltered snapshot.
    pub fn refresh(
        &mut self,
        snapshot: &LedgerSnapshot,
        filters: &FilterState,
        config: &DashboardConfig,
        change: FilterChange,
    ) {
        let records = snapshot.records();
        match change {
            FilterChange::ProjectType => {
                let view = filters.project_type.apply(records);
                self.filtered_project_count = LedgerAggregator::overall_totals(&view).project_count;
            }
            FilterChange::Games => {
                let view = filters.games.apply(records);
                self.game_metrics = LedgerAggregator::game_project_metrics(&view, config);
            }
            FilterChange::Workload => {
                self.workload = Some(match filters.workload {
                    WorkloadView::LinguistProjects => WorkloadBreakdown::Linguists(
                        LedgerAggregator::linguist_distribution(records, config),
                    ),
                    WorkloadView::InHouseVsVendor => WorkloadBreakdown::InHouseVsVendor(
                        LedgerAggregator::workload_split(records, config),
                    ),
                });
            }
        }
        debug!(?change, rows = records.len(), "refreshed dashboard frame");
    }
}
