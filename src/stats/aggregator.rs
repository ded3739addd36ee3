//! Ledger Aggregator Module
//! Pure functions from cleaned records to chart-ready tables.
//!
//! Every function accepts either the snapshot's records or a filtered view of
//! them (`&[ProjectRecord]` or `&[&ProjectRecord]`). Word-count tables only
//! see records whose word count parsed; time-bucketed tables only see records
//! whose received date parsed. Empty input always yields empty or zero tables.

use crate::config::DashboardConfig;
use crate::data::{ProjectRecord, ALL};
use chrono::{Datelike, NaiveDate};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sidebar metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverallTotals {
    pub total_wc: f64,
    pub project_count: usize,
    pub games_covered: usize,
}

/// Summed word count for one calendar month or quarter.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotal {
    pub start: NaiveDate,
    pub label: String,
    pub total_wc: f64,
    /// Every dated record in the bucket, including those without a word count
    pub project_count: usize,
}

/// Game x month word-count matrix. `cells[game][month]` is `None` when no
/// record fed that cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameMonthMatrix {
    pub games: Vec<String>,
    pub months: Vec<NaiveDate>,
    pub month_labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl GameMonthMatrix {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn cell(&self, game: usize, month: usize) -> Option<f64> {
        self.cells.get(game).and_then(|row| row.get(month)).copied().flatten()
    }

    pub fn max_value(&self) -> f64 {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

/// Translation vs LQA project counts for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeComparison {
    pub game: String,
    pub trans: usize,
    pub lqa: usize,
    /// LQA share of the two counts, 0 when both are zero
    pub lqa_pct: f64,
}

impl TypeComparison {
    pub fn total(&self) -> usize {
        self.trans + self.lqa
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameTotal {
    pub game: String,
    pub total_wc: f64,
}

/// Bubble chart row: Trans projects of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameProjectMetrics {
    pub game: String,
    pub trans_projects: usize,
    pub trans_wc: f64,
    /// All request types
    pub total_wc: f64,
    pub avg_wc_per_project: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverage {
    pub start: NaiveDate,
    pub label: String,
    pub total_wc: f64,
    pub avg_per_translator: Option<f64>,
}

/// In-house translator workload. Averages are `None` when no in-house
/// translator appears in the data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatorAverages {
    pub translator_count: usize,
    pub monthly: Vec<MonthlyAverage>,
    pub yearly_total_wc: f64,
    pub yearly_avg: Option<f64>,
}

impl TranslatorAverages {
    /// The yearly average repeated over every month, for comparison against
    /// the monthly curve.
    pub fn yearly_series(&self) -> Vec<(NaiveDate, f64)> {
        match self.yearly_avg {
            Some(avg) => self.monthly.iter().map(|m| (m.start, avg)).collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorkloadSplit {
    pub outsourced_wc: f64,
    pub in_house_wc: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeShare {
    pub assignee: String,
    pub project_count: usize,
}

fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

fn quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    let first_month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), first_month, 1)
}

fn quarter_label(start: NaiveDate) -> String {
    format!("Q{} {}", start.month0() / 3 + 1, start.year())
}

fn records_of<R: Borrow<ProjectRecord>>(records: &[R]) -> impl Iterator<Item = &ProjectRecord> {
    records.iter().map(|r| r.borrow())
}

fn by_total_desc(a: &GameTotal, b: &GameTotal) -> std::cmp::Ordering {
    b.total_wc
        .total_cmp(&a.total_wc)
        .then_with(|| a.game.cmp(&b.game))
}

/// Derives every dashboard table from cleaned records.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Records with a parsed word count, paired with it.
    fn with_word_count<R: Borrow<ProjectRecord>>(
        records: &[R],
    ) -> impl Iterator<Item = (&ProjectRecord, f64)> {
        records_of(records).filter_map(|r| r.total_wc.map(|wc| (r, wc)))
    }

    /// Bucket start -> (summed word count, project count). Only a record with
    /// a word count opens a bucket.
    fn sum_by_period<R, F>(records: &[R], bucket: F) -> BTreeMap<NaiveDate, (f64, usize)>
    where
        R: Borrow<ProjectRecord>,
        F: Fn(NaiveDate) -> Option<NaiveDate>,
    {
        let mut totals: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for (record, wc) in Self::with_word_count(records) {
            if let Some(start) = record.date_received.and_then(&bucket) {
                totals.entry(start).or_default().0 += wc;
            }
        }
        for record in records_of(records) {
            if let Some(start) = record.date_received.and_then(&bucket) {
                if let Some(entry) = totals.get_mut(&start) {
                    entry.1 += 1;
                }
            }
        }
        totals
    }

    pub fn overall_totals<R: Borrow<ProjectRecord>>(records: &[R]) -> OverallTotals {
        let games: BTreeSet<&str> = records_of(records)
            .filter_map(|r| r.game.as_deref())
            .collect();
        OverallTotals {
            total_wc: Self::with_word_count(records).map(|(_, wc)| wc).sum(),
            project_count: records.len(),
            games_covered: games.len(),
        }
    }

    pub fn monthly_totals<R: Borrow<ProjectRecord>>(records: &[R]) -> Vec<PeriodTotal> {
        Self::sum_by_period(records, month_start)
            .into_iter()
            .map(|(start, (total_wc, project_count))| PeriodTotal {
                start,
                label: start.format("%b %Y").to_string(),
                total_wc,
                project_count,
            })
            .collect()
    }

    pub fn quarterly_totals<R: Borrow<ProjectRecord>>(records: &[R]) -> Vec<PeriodTotal> {
        Self::sum_by_period(records, quarter_start)
            .into_iter()
            .map(|(start, (total_wc, project_count))| PeriodTotal {
                start,
                label: quarter_label(start),
                total_wc,
                project_count,
            })
            .collect()
    }

    pub fn game_month_matrix<R: Borrow<ProjectRecord>>(records: &[R]) -> GameMonthMatrix {
        let mut sums: HashMap<(&str, NaiveDate), f64> = HashMap::new();
        let mut games = BTreeSet::new();
        let mut months = BTreeSet::new();

        for (record, wc) in Self::with_word_count(records) {
            let (Some(game), Some(month)) = (
                record.game.as_deref(),
                record.date_received.and_then(month_start),
            ) else {
                continue;
            };
            games.insert(game);
            months.insert(month);
            *sums.entry((game, month)).or_insert(0.0) += wc;
        }

        let months: Vec<NaiveDate> = months.into_iter().collect();
        let cells = games
            .iter()
            .map(|game| {
                months
                    .iter()
                    .map(|month| sums.get(&(*game, *month)).copied())
                    .collect()
            })
            .collect();

        GameMonthMatrix {
            games: games.into_iter().map(str::to_string).collect(),
            month_labels: months.iter().map(|m| m.format("%b").to_string()).collect(),
            months,
            cells,
        }
    }

    pub fn type_comparison<R: Borrow<ProjectRecord>>(
        records: &[R],
        config: &DashboardConfig,
    ) -> Vec<TypeComparison> {
        let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for record in records_of(records) {
            let Some(game) = record.game.as_deref() else {
                continue;
            };
            if record.is_request_type(&config.translation_type) {
                counts.entry(game).or_default().0 += 1;
            } else if record.is_request_type(&config.lqa_type) {
                counts.entry(game).or_default().1 += 1;
            }
        }

        let mut rows: Vec<TypeComparison> = counts
            .into_iter()
            .map(|(game, (trans, lqa))| {
                let total = trans + lqa;
                let lqa_pct = if total == 0 {
                    0.0
                } else {
                    lqa as f64 / total as f64 * 100.0
                };
                TypeComparison {
                    game: game.to_string(),
                    trans,
                    lqa,
                    lqa_pct,
                }
            })
            .collect();
        // BTreeMap order already breaks ties by game name; the sort is stable
        rows.sort_by(|a, b| b.total().cmp(&a.total()));
        rows
    }

    pub fn game_totals<R: Borrow<ProjectRecord>>(records: &[R]) -> Vec<GameTotal> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        for (record, wc) in Self::with_word_count(records) {
            if let Some(game) = record.game.as_deref() {
                *totals.entry(game).or_insert(0.0) += wc;
            }
        }

        let mut rows: Vec<GameTotal> = totals
            .into_iter()
            .map(|(game, total_wc)| GameTotal {
                game: game.to_string(),
                total_wc,
            })
            .collect();
        rows.sort_by(by_total_desc);
        rows
    }

    pub fn game_project_metrics<R: Borrow<ProjectRecord>>(
        records: &[R],
        config: &DashboardConfig,
    ) -> Vec<GameProjectMetrics> {
        let totals: HashMap<String, f64> = Self::game_totals(records)
            .into_iter()
            .map(|t| (t.game, t.total_wc))
            .collect();

        let mut trans: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for record in records_of(records) {
            if !record.is_request_type(&config.translation_type) {
                continue;
            }
            if let Some(game) = record.game.as_deref() {
                let entry = trans.entry(game).or_default();
                entry.0 += 1;
                entry.1 += record.total_wc.unwrap_or(0.0);
            }
        }

        trans
            .into_iter()
            .map(|(game, (trans_projects, trans_wc))| GameProjectMetrics {
                game: game.to_string(),
                trans_projects,
                trans_wc,
                total_wc: totals.get(game).copied().unwrap_or(0.0),
                avg_wc_per_project: (trans_projects > 0)
                    .then(|| trans_wc / trans_projects as f64),
            })
            .collect()
    }

    pub fn translator_averages<R: Borrow<ProjectRecord>>(
        records: &[R],
        config: &DashboardConfig,
    ) -> TranslatorAverages {
        let in_house: Vec<&ProjectRecord> = records_of(records)
            .filter(|r| {
                r.is_request_type(&config.translation_type)
                    && r.assignee.as_deref().is_some_and(|a| config.is_in_house(a))
            })
            .collect();

        let translator_count = in_house
            .iter()
            .filter_map(|r| r.assignee.as_deref())
            .collect::<BTreeSet<_>>()
            .len();
        let per_translator = |wc: f64| (translator_count > 0).then(|| wc / translator_count as f64);

        let monthly = Self::sum_by_period(&in_house, month_start)
            .into_iter()
            .map(|(start, (total_wc, _))| MonthlyAverage {
                start,
                label: start.format("%b").to_string(),
                total_wc,
                avg_per_translator: per_translator(total_wc),
            })
            .collect();
        let yearly_total_wc: f64 = Self::with_word_count(&in_house).map(|(_, wc)| wc).sum();

        TranslatorAverages {
            translator_count,
            monthly,
            yearly_total_wc,
            yearly_avg: per_translator(yearly_total_wc),
        }
    }

    pub fn workload_split<R: Borrow<ProjectRecord>>(
        records: &[R],
        config: &DashboardConfig,
    ) -> WorkloadSplit {
        let total_wc = Self::overall_totals(records).total_wc;
        let outsourced_wc: f64 = Self::with_word_count(records)
            .filter(|(r, _)| r.assignee.as_deref().is_some_and(|a| config.is_vendor(a)))
            .map(|(_, wc)| wc)
            .sum();
        WorkloadSplit {
            outsourced_wc,
            in_house_wc: total_wc - outsourced_wc,
        }
    }

    pub fn linguist_distribution<R: Borrow<ProjectRecord>>(
        records: &[R],
        config: &DashboardConfig,
    ) -> Vec<AssigneeShare> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records_of(records) {
            if !record.is_request_type(&config.translation_type) {
                continue;
            }
            if let Some(assignee) = record.assignee.as_deref() {
                *counts.entry(assignee).or_insert(0) += 1;
            }
        }

        let mut rows: Vec<AssigneeShare> = counts
            .into_iter()
            .map(|(assignee, project_count)| AssigneeShare {
                assignee: assignee.to_string(),
                project_count,
            })
            .collect();
        rows.sort_by(|a, b| b.project_count.cmp(&a.project_count));
        rows
    }

    /// "All" followed by the sorted distinct request types.
    pub fn project_type_options<R: Borrow<ProjectRecord>>(records: &[R]) -> Vec<String> {
        Self::options(records, |r| r.request_type.as_deref())
    }

    /// "All" followed by the sorted games that have at least one Trans
    /// project, the only games the bubble chart can show.
    pub fn game_options<R: Borrow<ProjectRecord>>(
        records: &[R],
        config: &DashboardConfig,
    ) -> Vec<String> {
        std::iter::once(ALL.to_string())
            .chain(
                Self::game_project_metrics(records, config)
                    .into_iter()
                    .map(|m| m.game),
            )
            .collect()
    }

    fn options<R, F>(records: &[R], key: F) -> Vec<String>
    where
        R: Borrow<ProjectRecord>,
        F: Fn(&ProjectRecord) -> Option<&str>,
    {
        let distinct: BTreeSet<&str> = records_of(records).filter_map(key).collect();
        std::iter::once(ALL)
            .chain(distinct)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GameSelection, ProjectTypeFilter};

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn record(
        game: &str,
        request_type: &str,
        assignee: &str,
        wc: Option<f64>,
        rcvd: Option<NaiveDate>,
    ) -> ProjectRecord {
        ProjectRecord {
            game: Some(game.to_string()),
            request_type: Some(request_type.to_string()),
            assignee: Some(assignee.to_string()),
            total_wc: wc,
            due_date: None,
            date_received: rcvd,
        }
    }

    fn ledger() -> Vec<ProjectRecord> {
        vec![
            record("Alpha", "Trans", "Trans_1", Some(1000.0), Some(ymd(1, 10))),
            record("Alpha", "Trans", "Trans_2", Some(500.0), Some(ymd(2, 3))),
            record("Alpha", "LQA", "Vendor_M", Some(300.0), Some(ymd(2, 20))),
            record("Beta", "Trans", "Vendor_E", Some(2000.0), Some(ymd(4, 1))),
            record("Beta", "Trans", "Trans_1", None, Some(ymd(4, 2))),
            record("Gamma", "Proofread", "Trans_3", Some(50.0), None),
        ]
    }

    #[test]
    fn test_single_row_scenario() {
        let config = DashboardConfig::default();
        let records = vec![record("Alpha", "Trans", "Trans_1", Some(1200.0), Some(ymd(3, 14)))];

        assert_eq!(LedgerAggregator::overall_totals(&records).total_wc, 1200.0);
        assert_eq!(
            LedgerAggregator::game_totals(&records),
            vec![GameTotal {
                game: "Alpha".to_string(),
                total_wc: 1200.0
            }]
        );

        let monthly = LedgerAggregator::monthly_totals(&records);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].start, ymd(3, 1));
        assert_eq!(monthly[0].label, "Mar 2025");
        assert_eq!(monthly[0].total_wc, 1200.0);

        let comparison = LedgerAggregator::type_comparison(&records, &config);
        assert_eq!(
            comparison,
            vec![TypeComparison {
                game: "Alpha".to_string(),
                trans: 1,
                lqa: 0,
                lqa_pct: 0.0
            }]
        );
    }

    #[test]
    fn test_overall_totals() {
        let totals = LedgerAggregator::overall_totals(&ledger());
        assert_eq!(totals.total_wc, 3850.0);
        assert_eq!(totals.project_count, 6);
        assert_eq!(totals.games_covered, 3);
    }

    #[test]
    fn test_empty_input_degrades_to_zero() {
        let config = DashboardConfig::default();
        let empty: Vec<ProjectRecord> = Vec::new();

        assert_eq!(LedgerAggregator::overall_totals(&empty), OverallTotals::default());
        assert!(LedgerAggregator::monthly_totals(&empty).is_empty());
        assert!(LedgerAggregator::quarterly_totals(&empty).is_empty());
        assert!(LedgerAggregator::game_month_matrix(&empty).is_empty());
        assert!(LedgerAggregator::type_comparison(&empty, &config).is_empty());
        assert!(LedgerAggregator::game_totals(&empty).is_empty());
        assert!(LedgerAggregator::game_project_metrics(&empty, &config).is_empty());
        assert!(LedgerAggregator::linguist_distribution(&empty, &config).is_empty());
        assert_eq!(
            LedgerAggregator::workload_split(&empty, &config),
            WorkloadSplit::default()
        );

        let averages = LedgerAggregator::translator_averages(&empty, &config);
        assert_eq!(averages.translator_count, 0);
        assert_eq!(averages.yearly_avg, None);
        assert!(averages.yearly_series().is_empty());
    }

    #[test]
    fn test_missing_word_count_still_counts_projects() {
        let records = vec![
            record("Alpha", "Trans", "Trans_1", None, Some(ymd(1, 1))),
            record("Alpha", "Trans", "Trans_1", Some(10.0), Some(ymd(1, 2))),
        ];
        let totals = LedgerAggregator::overall_totals(&records);
        assert_eq!(totals.total_wc, 10.0);
        assert_eq!(totals.project_count, 2);

        let metrics =
            LedgerAggregator::game_project_metrics(&records, &DashboardConfig::default());
        assert_eq!(metrics[0].trans_projects, 2);
        assert_eq!(metrics[0].avg_wc_per_project, Some(5.0));
    }

    #[test]
    fn test_missing_word_count_forms_no_group() {
        let records = vec![record("Ghost", "Trans", "Trans_1", None, Some(ymd(5, 5)))];
        assert!(LedgerAggregator::game_totals(&records).is_empty());
        assert!(LedgerAggregator::monthly_totals(&records).is_empty());
        assert!(LedgerAggregator::game_month_matrix(&records).is_empty());
        assert_eq!(LedgerAggregator::overall_totals(&records).project_count, 1);
    }

    #[test]
    fn test_game_totals_sum_to_overall() {
        let records = ledger();
        let per_game: f64 = LedgerAggregator::game_totals(&records)
            .iter()
            .map(|g| g.total_wc)
            .sum();
        assert_eq!(per_game, LedgerAggregator::overall_totals(&records).total_wc);
    }

    #[test]
    fn test_game_totals_sorted_desc() {
        let totals = LedgerAggregator::game_totals(&ledger());
        let games: Vec<&str> = totals.iter().map(|g| g.game.as_str()).collect();
        assert_eq!(games, vec!["Beta", "Alpha", "Gamma"]);
        assert_eq!(totals[0].total_wc, 2000.0);
        assert_eq!(totals[1].total_wc, 1800.0);
    }

    #[test]
    fn test_monthly_excludes_undated_rows() {
        let monthly = LedgerAggregator::monthly_totals(&ledger());
        let summary: Vec<(&str, f64)> = monthly
            .iter()
            .map(|m| (m.label.as_str(), m.total_wc))
            .collect();
        assert_eq!(
            summary,
            vec![("Jan 2025", 1000.0), ("Feb 2025", 800.0), ("Apr 2025", 2000.0)]
        );
        // Gamma's 50 words have no received date
        let dated: f64 = monthly.iter().map(|m| m.total_wc).sum();
        assert_eq!(dated, 3800.0);
    }

    #[test]
    fn test_quarterly_totals() {
        let quarterly = LedgerAggregator::quarterly_totals(&ledger());
        assert_eq!(quarterly.len(), 2);
        assert_eq!(quarterly[0].start, ymd(1, 1));
        assert_eq!(quarterly[0].label, "Q1 2025");
        assert_eq!(quarterly[0].total_wc, 1800.0);
        assert_eq!(quarterly[1].start, ymd(4, 1));
        assert_eq!(quarterly[1].label, "Q2 2025");
        assert_eq!(quarterly[1].total_wc, 2000.0);
    }

    #[test]
    fn test_period_project_counts_include_missing_word_count() {
        let monthly = LedgerAggregator::monthly_totals(&ledger());
        let counts: Vec<(&str, usize)> = monthly
            .iter()
            .map(|m| (m.label.as_str(), m.project_count))
            .collect();
        // Beta's Apr 2 row has no word count but still counts; Gamma has no date
        assert_eq!(counts, vec![("Jan 2025", 1), ("Feb 2025", 2), ("Apr 2025", 2)]);

        let quarterly = LedgerAggregator::quarterly_totals(&ledger());
        assert_eq!(quarterly[0].project_count, 3);
        assert_eq!(quarterly[1].project_count, 2);
    }

    #[test]
    fn test_game_month_matrix_is_chronological_and_filled() {
        let mut records = ledger();
        records.push(record("Beta", "LQA", "Trans_1", Some(70.0), Some(ymd(12, 1))));
        records.push(record("Alpha", "LQA", "Trans_1", Some(30.0), Some(ymd(8, 9))));

        let matrix = LedgerAggregator::game_month_matrix(&records);
        assert_eq!(matrix.games, vec!["Alpha", "Beta"]);
        assert_eq!(matrix.month_labels, vec!["Jan", "Feb", "Apr", "Aug", "Dec"]);
        assert_eq!(matrix.cells.len(), 2);
        assert!(matrix.cells.iter().all(|row| row.len() == 5));

        assert_eq!(matrix.cell(0, 0), Some(1000.0));
        assert_eq!(matrix.cell(0, 1), Some(800.0));
        assert_eq!(matrix.cell(0, 2), None);
        assert_eq!(matrix.cell(1, 2), Some(2000.0));
        assert_eq!(matrix.cell(1, 4), Some(70.0));
        assert_eq!(matrix.max_value(), 2000.0);
    }

    #[test]
    fn test_type_comparison_excludes_other_types() {
        let config = DashboardConfig::default();
        let comparison = LedgerAggregator::type_comparison(&ledger(), &config);
        let games: Vec<&str> = comparison.iter().map(|c| c.game.as_str()).collect();
        // Gamma only has Proofread projects
        assert_eq!(games, vec!["Alpha", "Beta"]);

        let alpha = &comparison[0];
        assert_eq!((alpha.trans, alpha.lqa), (2, 1));
        assert!((alpha.lqa_pct - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(comparison[1].lqa_pct, 0.0);
    }

    #[test]
    fn test_type_comparison_sorted_by_total() {
        let config = DashboardConfig::default();
        let records = vec![
            record("Alpha", "LQA", "Trans_1", None, None),
            record("Zeta", "Trans", "Trans_1", None, None),
            record("Zeta", "LQA", "Trans_1", None, None),
            record("Beta", "LQA", "Trans_1", None, None),
        ];
        let comparison = LedgerAggregator::type_comparison(&records, &config);
        let games: Vec<&str> = comparison.iter().map(|c| c.game.as_str()).collect();
        assert_eq!(games, vec!["Zeta", "Alpha", "Beta"]);
        assert_eq!(comparison[1].lqa_pct, 100.0);
    }

    #[test]
    fn test_game_project_metrics() {
        let config = DashboardConfig::default();
        let metrics = LedgerAggregator::game_project_metrics(&ledger(), &config);
        assert_eq!(metrics.len(), 2);

        let alpha = &metrics[0];
        assert_eq!(alpha.game, "Alpha");
        assert_eq!(alpha.trans_projects, 2);
        assert_eq!(alpha.trans_wc, 1500.0);
        assert_eq!(alpha.total_wc, 1800.0);
        assert_eq!(alpha.avg_wc_per_project, Some(750.0));

        let beta = &metrics[1];
        assert_eq!(beta.trans_projects, 2);
        assert_eq!(beta.avg_wc_per_project, Some(1000.0));
    }

    #[test]
    fn test_game_project_metrics_respects_game_filter() {
        let config = DashboardConfig::default();
        let records = ledger();
        let view = GameSelection::from_choices(["Beta"]).apply(&records);
        let metrics = LedgerAggregator::game_project_metrics(&view, &config);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].game, "Beta");
    }

    #[test]
    fn test_translator_averages() {
        let config = DashboardConfig::default();
        let averages = LedgerAggregator::translator_averages(&ledger(), &config);

        // Trans_1 and Trans_2 on Trans projects; Trans_3 only did Proofread
        assert_eq!(averages.translator_count, 2);
        assert_eq!(averages.yearly_total_wc, 1500.0);
        assert_eq!(averages.yearly_avg, Some(750.0));

        let monthly: Vec<(&str, Option<f64>)> = averages
            .monthly
            .iter()
            .map(|m| (m.label.as_str(), m.avg_per_translator))
            .collect();
        assert_eq!(monthly, vec![("Jan", Some(500.0)), ("Feb", Some(250.0))]);

        let yearly = averages.yearly_series();
        assert_eq!(yearly, vec![(ymd(1, 1), 750.0), (ymd(2, 1), 750.0)]);
    }

    #[test]
    fn test_translator_averages_without_translators() {
        let config = DashboardConfig::default();
        let records = vec![record("Alpha", "Trans", "Vendor_M", Some(400.0), Some(ymd(1, 1)))];
        let averages = LedgerAggregator::translator_averages(&records, &config);
        assert_eq!(averages.translator_count, 0);
        assert_eq!(averages.yearly_avg, None);
        assert!(averages.monthly.is_empty());
    }

    #[test]
    fn test_workload_split() {
        let config = DashboardConfig::default();
        let split = LedgerAggregator::workload_split(&ledger(), &config);
        assert_eq!(split.outsourced_wc, 2300.0);
        assert_eq!(split.in_house_wc, 1550.0);
    }

    #[test]
    fn test_workload_split_absent_vendor_is_zero() {
        let config = DashboardConfig::default();
        let records = vec![
            record("Alpha", "Trans", "Trans_1", Some(100.0), None),
            record("Alpha", "Trans", "Vendor_M", Some(40.0), None),
        ];
        let split = LedgerAggregator::workload_split(&records, &config);
        assert_eq!(split.outsourced_wc, 40.0);
        assert_eq!(split.in_house_wc, 100.0);
    }

    #[test]
    fn test_linguist_distribution() {
        let config = DashboardConfig::default();
        let shares = LedgerAggregator::linguist_distribution(&ledger(), &config);
        let summary: Vec<(&str, usize)> = shares
            .iter()
            .map(|s| (s.assignee.as_str(), s.project_count))
            .collect();
        assert_eq!(
            summary,
            vec![("Trans_1", 2), ("Trans_2", 1), ("Vendor_E", 1)]
        );
    }

    #[test]
    fn test_options_start_with_all() {
        let records = ledger();
        assert_eq!(
            LedgerAggregator::project_type_options(&records),
            vec!["All", "LQA", "Proofread", "Trans"]
        );
        // Gamma has no Trans project, so the bubble chart could never show it
        assert_eq!(
            LedgerAggregator::game_options(&records, &DashboardConfig::default()),
            vec!["All", "Alpha", "Beta"]
        );
    }

    #[test]
    fn test_project_type_filter_count() {
        let records = ledger();
        let view = ProjectTypeFilter::from_choice("Trans").apply(&records);
        assert_eq!(LedgerAggregator::overall_totals(&view).project_count, 4);
    }
}
