//! Ledger Cleaner Module
//! Coerces the noisy word-count and date cells into typed values.

use super::record::{ProjectRecord, RawRecord};
use chrono::NaiveDate;
use tracing::debug;

/// Cleans raw ledger rows. Unparseable cells become `None`; rows are never dropped.
pub struct LedgerCleaner {
    report_year: i32,
}

impl LedgerCleaner {
    pub fn new(report_year: i32) -> Self {
        Self { report_year }
    }

    /// Parse a word-count cell: drop every `,` and `-`, trim, parse.
    pub fn parse_word_count(raw: &str) -> Option<f64> {
        let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '-').collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Parse a date cell. `M/D` gets the report year appended; a cell that
    /// already carries a year is parsed as-is.
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.contains('-') {
            if !raw.split('-').next().is_some_and(is_full_year) {
                return None;
            }
            return NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
        }
        let with_year = match raw.matches('/').count() {
            1 => format!("{}/{}", raw, self.report_year),
            2 if raw.rsplit('/').next().is_some_and(is_full_year) => raw.to_string(),
            _ => return None,
        };
        NaiveDate::parse_from_str(&with_year, "%m/%d/%Y").ok()
    }

    pub fn clean_record(&self, raw: &RawRecord) -> ProjectRecord {
        ProjectRecord {
            game: raw.game.clone(),
            request_type: raw.request_type.clone(),
            assignee: raw.assignee.clone(),
            total_wc: raw.total_wc.as_deref().and_then(Self::parse_word_count),
            due_date: raw.due_date.as_deref().and_then(|d| self.parse_date(d)),
            date_received: raw
                .date_received
                .as_deref()
                .and_then(|d| self.parse_date(d)),
        }
    }

    /// Clean every row, preserving row count and order.
    pub fn clean(&self, raw: &[RawRecord]) -> Vec<ProjectRecord> {
        let records: Vec<ProjectRecord> = raw.iter().map(|r| self.clean_record(r)).collect();

        let invalid = |present: fn(&RawRecord) -> bool, parsed: fn(&ProjectRecord) -> bool| {
            raw.iter()
                .zip(records.iter())
                .filter(|(r, p)| present(r) && !parsed(p))
                .count()
        };
        debug!(
            rows = records.len(),
            invalid_wc = invalid(|r| r.total_wc.is_some(), |p| p.total_wc.is_some()),
            invalid_due = invalid(|r| r.due_date.is_some(), |p| p.due_date.is_some()),
            invalid_rcvd = invalid(
                |r| r.date_received.is_some(),
                |p| p.date_received.is_some()
            ),
            "cleaned ledger"
        );

        records
    }
}

/// `%Y` accepts any digit count; only a four-digit year counts as present.
fn is_full_year(segment: &str) -> bool {
    segment.len() == 4 && segment.bytes().all(|b| b.is_ascii_digit())
}
