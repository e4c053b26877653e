//! Date Index - ordered report dates with record lookup
//!
//! Dates are kept newest first. Position 0 is the newest report and the last
//! position is the oldest one, so "older" moves toward the end of the list.

use crate::model::SummaryRecord;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Ordered report dates plus a date → record mapping
#[derive(Debug, Clone, Default)]
pub struct DateIndex {
    dates: Vec<NaiveDate>,
    records: HashMap<NaiveDate, SummaryRecord>,
}

impl DateIndex {
    /// Build the index from fetched records.
    ///
    /// Records are expected newest first. Out-of-order input is re-sorted and
    /// for duplicate dates the first record wins.
    pub fn build(records: Vec<SummaryRecord>) -> Self {
        let mut dates = Vec::with_capacity(records.len());
        let mut map = HashMap::with_capacity(records.len());
        let mut duplicates = 0usize;

        for record in records {
            if map.contains_key(&record.date) {
                duplicates += 1;
                continue;
            }
            dates.push(record.date);
            map.insert(record.date, record);
        }

        if duplicates > 0 {
            tracing::warn!(duplicates, "Dropped summary records with duplicate dates");
        }

        if !dates.windows(2).all(|pair| pair[0] > pair[1]) {
            tracing::warn!("Summary records were not newest-first, re-sorting");
            dates.sort_unstable_by(|a, b| b.cmp(a));
        }

        Self {
            dates,
            records: map,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// All dates, newest first
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn newest(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn oldest(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&SummaryRecord> {
        self.records.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.records.contains_key(&date)
    }

    pub fn date_at(&self, position: usize) -> Option<NaiveDate> {
        self.dates.get(position).copied()
    }

    /// Position of a date in the sequence
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| *d == date)
    }

    /// Most recent available date not after `target`.
    ///
    /// Falls back to the oldest date when `target` precedes every report.
    pub fn nearest(&self, target: NaiveDate) -> Option<NaiveDate> {
        self.dates
            .iter()
            .copied()
            .find(|d| *d <= target)
            .or_else(|| self.oldest())
    }

    /// Date one step older than `position`, `None` at the oldest
    pub fn older(&self, position: usize) -> Option<NaiveDate> {
        self.date_at(position.checked_add(1)?)
    }

    /// Date one step newer than `position`, `None` at the newest
    pub fn newer(&self, position: usize) -> Option<NaiveDate> {
        self.date_at(position.checked_sub(1)?)
    }

    /// Cursor for a date present in the index
    pub fn cursor_at(&self, date: NaiveDate) -> Option<NavigationCursor> {
        self.position_of(date)
            .map(|position| NavigationCursor { date, position })
    }
}

/// Current date and its position in a [`DateIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    pub date: NaiveDate,
    pub position: usize,
}

impl NavigationCursor {
    pub fn is_newest(&self) -> bool {
        self.position == 0
    }

    pub fn is_oldest(&self, index: &DateIndex) -> bool {
        self.position + 1 >= index.len()
    }
}
