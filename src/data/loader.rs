//! CSV Data Loader Module
//! Reads the ledger file with Polars and extracts the named columns as text.

use super::cleaner::LedgerCleaner;
use super::record::{
    LedgerSnapshot, RawRecord, COL_ASSIGNEE, COL_DATE_RECEIVED, COL_DUE_DATE, COL_GAME,
    COL_REQUEST_TYPE, COL_TOTAL_WC, REQUIRED_COLUMNS,
};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Handles ledger loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with every column read as text.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        let path_str = file_path.to_string_lossy().to_string();

        // Schema inference off: noisy numeric and date cells stay text for the cleaner
        let df = LazyCsvReader::new(&path_str)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(path = %path_str, rows = df.height(), "loaded ledger csv");
        Ok(df)
    }

    /// Extract one column as optional strings.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let series = column.as_materialized_series().cast(&DataType::String)?;
        let values = series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    /// Convert a loaded frame into raw ledger rows.
    pub fn extract_records(df: &DataFrame) -> Result<Vec<RawRecord>, LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|n| n == *required))
        {
            return Err(LoaderError::MissingColumn(missing.to_string()));
        }

        let games = Self::text_column(df, COL_GAME)?;
        let request_types = Self::text_column(df, COL_REQUEST_TYPE)?;
        let assignees = Self::text_column(df, COL_ASSIGNEE)?;
        let word_counts = Self::text_column(df, COL_TOTAL_WC)?;
        let due_dates = Self::text_column(df, COL_DUE_DATE)?;
        let received = Self::text_column(df, COL_DATE_RECEIVED)?;

        let records = (0..df.height())
            .map(|i| RawRecord {
                game: games[i].clone(),
                request_type: request_types[i].clone(),
                assignee: assignees[i].clone(),
                total_wc: word_counts[i].clone(),
                due_date: due_dates[i].clone(),
                date_received: received[i].clone(),
            })
            .collect();
        Ok(records)
    }

    /// Load, extract and clean in one step.
    pub fn load_snapshot(file_path: &Path, report_year: i32) -> Result<LedgerSnapshot, LoaderError> {
        let df = Self::load_csv(file_path)?;
        let raw = Self::extract_records(&df)?;
        let records = LedgerCleaner::new(report_year).clean(&raw);

        let source = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string());
        Ok(LedgerSnapshot::new(records, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_snapshot_cleans_cells() {
        let file = write_csv(
            "Game,Request Type,Assignee,Total WC,Due Date,Date Rcvd\n\
             Alpha,Trans,Trans_1,\"1,200\",3/20,3/14\n\
             Beta,LQA,Vendor_M,-,4/2,\n",
        );

        let snapshot = DataLoader::load_snapshot(file.path(), 2025).unwrap();
        assert_eq!(snapshot.len(), 2);

        let first = &snapshot.records()[0];
        assert_eq!(first.game.as_deref(), Some("Alpha"));
        assert_eq!(first.total_wc, Some(1200.0));
        assert_eq!(
            first.date_received,
            chrono::NaiveDate::from_ymd_opt(2025, 3, 14)
        );

        let second = &snapshot.records()[1];
        assert_eq!(second.assignee.as_deref(), Some("Vendor_M"));
        assert_eq!(second.total_wc, None);
        assert_eq!(second.date_received, None);
    }

    #[test]
    fn test_numeric_looking_column_stays_text() {
        let file = write_csv(
            "Game,Request Type,Assignee,Total WC,Due Date,Date Rcvd,Notes\n\
             Alpha,Trans,Trans_1,500,1/2,1/1,x\n\
             Alpha,Trans,Trans_2,700,1/3,1/2,y\n",
        );

        let df = DataLoader::load_csv(file.path()).unwrap();
        let raw = DataLoader::extract_records(&df).unwrap();
        assert_eq!(raw[0].total_wc.as_deref(), Some("500"));
        assert_eq!(raw[1].date_received.as_deref(), Some("1/2"));
    }

    #[test]
    fn test_missing_column_is_error() {
        let file = write_csv("Game,Request Type,Assignee,Total WC,Due Date\nAlpha,Trans,T,1,1/1\n");

        let err = DataLoader::load_snapshot(file.path(), 2025).unwrap_err();
        match err {
            LoaderError::MissingColumn(name) => assert_eq!(name, "Date Rcvd"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = DataLoader::load_snapshot(Path::new("/no/such/ledger.csv"), 2025);
        assert!(result.is_err());
    }
}
