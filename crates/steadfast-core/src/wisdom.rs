//! Daily wisdom: quotes, financial principles and parables.
//!
//! Today's entries are one of each type, picked with the shuffle strategy of
//! [`crate::selection::select_for_date`]. Nothing is cached; the selection is
//! recomputed from the date on every call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::selection::select_for_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WisdomType {
    Quote,
    Financial,
    Parable,
}

impl WisdomType {
    /// Display order of the daily entries.
    pub const ALL: [WisdomType; 3] = [WisdomType::Quote, WisdomType::Financial, WisdomType::Parable];

    pub fn as_str(&self) -> &'static str {
        match self {
            WisdomType::Quote => "quote",
            WisdomType::Financial => "financial",
            WisdomType::Parable => "parable",
        }
    }
}

impl fmt::Display for WisdomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WisdomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("unknown wisdom type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WisdomEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WisdomType,
    pub content: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Read-only pool of wisdom entries.
#[derive(Debug, Clone, Default)]
pub struct WisdomLibrary {
    entries: Vec<WisdomEntry>,
}

impl WisdomLibrary {
    pub fn new(entries: Vec<WisdomEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WisdomEntry] {
        &self.entries
    }

    /// Entries of one type, in pool order.
    pub fn entries_by_type(&self, kind: WisdomType) -> Vec<WisdomEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// One entry per type for `date`, in [`WisdomType::ALL`] order.
    /// Types with no entries are skipped.
    pub fn today_entries(&self, date: NaiveDate) -> Vec<WisdomEntry> {
        WisdomType::ALL
            .into_iter()
            .filter_map(|kind| {
                select_for_date(&self.entries_by_type(kind), date, 1)
                    .into_iter()
                    .next()
            })
            .collect()
    }
}
