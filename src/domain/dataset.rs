//! The in-memory forecast table.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::ForecastRecord;

/// Immutable forecast table plus the lookups used to populate filter controls.
///
/// Built once at startup and shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ForecastRecord>,
    locations: Vec<String>,
    dates: Vec<NaiveDate>,
    source: String,
}

impl Dataset {
    /// Wrap `records`, deriving distinct locations and dates in order of first appearance.
    pub fn new(records: Vec<ForecastRecord>, source: impl Into<String>) -> Self {
        let mut seen_locations = HashSet::new();
        let mut seen_dates = HashSet::new();
        let mut locations = Vec::new();
        let mut dates = Vec::new();

        for r in &records {
            if seen_locations.insert(r.location.as_str()) {
                locations.push(r.location.clone());
            }
            if seen_dates.insert(r.date) {
                dates.push(r.date);
            }
        }

        Self {
            records,
            locations,
            dates,
            source: source.into(),
        }
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Distinct dates in table order (not necessarily chronological).
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Where the table was loaded from (file path or a caller-supplied label).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
