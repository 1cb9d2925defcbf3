// ABOUTME: Filename-encoded workout identity (owner, base plan name, date, tracked flag)
// ABOUTME: Parses a store filename once and provides the date orderings used by listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! Workout file identity
//!
//! A workout's filename is the only source of truth for who owns it, which
//! plan it belongs to and which day it is for:
//!
//! ```text
//! alex_push_2024-05-01.csv          plan
//! alex_push_2024-05-01_tracked.csv  in-progress or finished record
//! ```
//!
//! The owner is everything before the first underscore, the date is
//! everything after the last underscore of the stem. A date that does not
//! parse is kept as `None`; it never fails the parse.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Extension shared by every workout file
pub const CSV_EXTENSION: &str = ".csv";

/// Suffix marking in-progress and finished records
pub const TRACKED_SUFFIX: &str = "_tracked.csv";

/// Date format encoded in filenames
pub const FILENAME_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parsed identity of one workout file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkoutFileName {
    /// Filename exactly as stored
    pub raw: String,
    /// Owner username (text before the first underscore, empty when absent)
    pub owner: String,
    /// Plan filename this record belongs to (the join key between stores)
    pub base: String,
    /// Decoded date suffix
    pub date: Option<NaiveDate>,
    /// Whether the name carries the `_tracked` suffix
    pub tracked: bool,
}

/// Direction for date-aware listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// Soonest first
    Ascending,
    /// Most recent first
    Descending,
}

impl WorkoutFileName {
    /// Parse a filename; returns `None` when it is not a `.csv` file
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (stem, tracked) = if let Some(stem) = raw.strip_suffix(TRACKED_SUFFIX) {
            (stem, true)
        } else {
            (raw.strip_suffix(CSV_EXTENSION)?, false)
        };

        let owner = raw
            .split_once('_')
            .map(|(owner, _)| owner.to_owned())
            .unwrap_or_default();

        let date = stem
            .rsplit_once('_')
            .and_then(|(_, suffix)| NaiveDate::parse_from_str(suffix, FILENAME_DATE_FORMAT).ok());

        Some(Self {
            raw: raw.to_owned(),
            owner,
            base: format!("{stem}{CSV_EXTENSION}"),
            date,
            tracked,
        })
    }

    /// Name of the tracked counterpart of this workout
    #[must_use]
    pub fn tracked_name(&self) -> String {
        if self.tracked {
            return self.raw.clone();
        }
        let stem = self
            .base
            .strip_suffix(CSV_EXTENSION)
            .unwrap_or(self.base.as_str());
        format!("{stem}{TRACKED_SUFFIX}")
    }

    /// Case-insensitive owner comparison
    #[must_use]
    pub fn is_owned_by(&self, username: &str) -> bool {
        !self.owner.is_empty() && self.owner.to_lowercase() == username.to_lowercase()
    }

    /// Date formatted as `YYYY-MM-DD`, if it parsed
    #[must_use]
    pub fn date_string(&self) -> Option<String> {
        self.date
            .map(|d| d.format(FILENAME_DATE_FORMAT).to_string())
    }

    /// Compare two files by date; undated files trail in both directions
    #[must_use]
    pub fn cmp_by_date(&self, other: &Self, order: DateOrder) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => {
                let by_date = match order {
                    DateOrder::Ascending => a.cmp(&b),
                    DateOrder::Descending => b.cmp(&a),
                };
                by_date.then_with(|| self.cmp_raw(other, order))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.cmp_raw(other, order),
        }
    }

    fn cmp_raw(&self, other: &Self, order: DateOrder) -> Ordering {
        match order {
            DateOrder::Ascending => self.raw.cmp(&other.raw),
            DateOrder::Descending => other.raw.cmp(&self.raw),
        }
    }
}

impl fmt::Display for WorkoutFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Sort files by decoded date in place
pub fn sort_by_date(files: &mut [WorkoutFileName], order: DateOrder) {
    files.sort_by(|a, b| a.cmp_by_date(b, order));
}

/// Sort files by raw filename, most recent-looking first
pub fn sort_by_name_desc(files: &mut [WorkoutFileName]) {
    files.sort_by(|a, b| b.raw.cmp(&a.raw));
}
