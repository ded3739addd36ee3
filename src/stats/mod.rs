//! Stats module - ledger aggregation

mod aggregator;
mod format;
mod frame;

pub use aggregator::{
    AssigneeShare, GameMonthMatrix, GameProjectMetrics, GameTotal, LedgerAggregator,
    OverallTotals, PeriodTotal, TranslatorAverages, TypeComparison, WorkloadSplit,
};
pub use format::{format_percent, format_si, format_thousands};
pub use frame::{DashboardFrame, FilterChange, WorkloadBreakdown};
