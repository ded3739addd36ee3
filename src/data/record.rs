//! Ledger Record Types
//! Raw and cleaned project rows, plus the shared snapshot.

use chrono::NaiveDate;

/// Source column names, accessed by exact name.
pub const COL_GAME: &str = "Game";
pub const COL_REQUEST_TYPE: &str = "Request Type";
pub const COL_ASSIGNEE: &str = "Assignee";
pub const COL_TOTAL_WC: &str = "Total WC";
pub const COL_DUE_DATE: &str = "Due Date";
pub const COL_DATE_RECEIVED: &str = "Date Rcvd";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_GAME,
    COL_REQUEST_TYPE,
    COL_ASSIGNEE,
    COL_TOTAL_WC,
    COL_DUE_DATE,
    COL_DATE_RECEIVED,
];

/// One row as read from the file, every cell still text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub game: Option<String>,
    pub request_type: Option<String>,
    pub assignee: Option<String>,
    pub total_wc: Option<String>,
    pub due_date: Option<String>,
    pub date_received: Option<String>,
}

/// One cleaned ledger row. `None` means the cell was missing or unparseable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectRecord {
    pub game: Option<String>,
    pub request_type: Option<String>,
    pub assignee: Option<String>,
    pub total_wc: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub date_received: Option<NaiveDate>,
}

impl ProjectRecord {
    /// Render the cleaned values back to text, in a form the cleaner accepts.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord {
            game: self.game.clone(),
            request_type: self.request_type.clone(),
            assignee: self.assignee.clone(),
            total_wc: self.total_wc.map(|wc| wc.to_string()),
            due_date: self.due_date.map(|d| d.format("%m/%d/%Y").to_string()),
            date_received: self
                .date_received
                .map(|d| d.format("%m/%d/%Y").to_string()),
        }
    }

    pub fn is_request_type(&self, request_type: &str) -> bool {
        self.request_type.as_deref() == Some(request_type)
    }
}

/// The cleaned table for one session. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    records: Vec<ProjectRecord>,
    source: Option<String>,
}

impl LedgerSnapshot {
    pub fn new(records: Vec<ProjectRecord>, source: Option<String>) -> Self {
        Self { records, source }
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Display name of the file the snapshot was loaded from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
