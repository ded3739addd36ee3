//! Data module - ledger loading, cleaning and filtering

mod cleaner;
mod filter;
mod loader;
mod record;

pub use filter::{FilterState, GameSelection, ProjectTypeFilter, WorkloadView, ALL};
pub use loader::{DataLoader, LoaderError};
pub use record::{LedgerSnapshot, ProjectRecord};
