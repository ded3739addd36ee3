//! Filter Layer
//! Viewer-selected predicates over the cleaned ledger.

use super::record::ProjectRecord;
use std::collections::BTreeSet;

/// Label of the catch-all choice in both selectors.
pub const ALL: &str = "All";

/// Single-choice project-type selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectTypeFilter {
    #[default]
    All,
    Only(String),
}

impl ProjectTypeFilter {
    /// Build from a dropdown label; "All" is the no-op choice.
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL {
            Self::All
        } else {
            Self::Only(choice.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(request_type) => request_type,
        }
    }

    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(request_type) => record.is_request_type(request_type),
        }
    }

    pub fn apply<'a>(&self, records: &'a [ProjectRecord]) -> Vec<&'a ProjectRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Multi-choice game selector. "All" anywhere in the set disables filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSelection {
    choices: BTreeSet<String>,
}

impl Default for GameSelection {
    fn default() -> Self {
        Self::from_choices([ALL])
    }
}

impl GameSelection {
    pub fn from_choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.choices.contains(ALL)
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.choices.contains(choice)
    }

    pub fn toggle(&mut self, choice: &str) {
        if !self.choices.remove(choice) {
            self.choices.insert(choice.to_string());
        }
    }

    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(String::as_str)
    }

    pub fn matches_game(&self, game: &str) -> bool {
        self.is_all() || self.choices.contains(game)
    }

    /// Under "All" every record passes, including those without a game.
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.is_all() || record.game.as_deref().is_some_and(|g| self.matches_game(g))
    }

    pub fn apply<'a>(&self, records: &'a [ProjectRecord]) -> Vec<&'a ProjectRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Work-type toggle. Switches between two pie views; never narrows data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkloadView {
    /// Project count per Trans assignee
    #[default]
    LinguistProjects,
    /// Word count split between in-house and vendors
    InHouseVsVendor,
}

impl WorkloadView {
    pub fn from_toggle(by_work_type: bool) -> Self {
        if by_work_type {
            Self::InHouseVsVendor
        } else {
            Self::LinguistProjects
        }
    }

    pub fn is_by_work_type(self) -> bool {
        self == Self::InHouseVsVendor
    }
}

/// The full filter state of one viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub project_type: ProjectTypeFilter,
    pub games: GameSelection,
    pub workload: WorkloadView,
}
