//! Dashboard session: filter-control values and the last submitted charts.
//!
//! Editing a control never re-queries; only `submit_map` / `submit_trend` do.
//! This keeps the "pick values, then press submit" flow of the dashboard and lets
//! the TUI and tests drive the same state.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::DashConfig;
use crate::domain::{Dataset, MapSpec, TrendOrder, TrendSpec};
use crate::query::{map_query, trend_query};

#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    map_date: usize,
    location: usize,
    start: usize,
    end: usize,
    order: TrendOrder,
    map: Option<MapSpec>,
    trend: Option<TrendSpec>,
}

impl Session {
    /// Pick initial control values from `config`, falling back to the first
    /// date/location and (for the range end) the last date.
    pub fn new(dataset: Arc<Dataset>, config: &DashConfig) -> Self {
        let dates = dataset.dates();
        let date_index = |d: Option<NaiveDate>| d.and_then(|d| dates.iter().position(|&x| x == d));

        let map_date = date_index(config.map_date).unwrap_or(0);
        let start = date_index(config.start).unwrap_or(0);
        let end = date_index(config.end).unwrap_or(dates.len().saturating_sub(1));
        let location = config
            .location
            .as_deref()
            .and_then(|l| dataset.locations().iter().position(|x| x == l))
            .unwrap_or(0);

        Self {
            dataset,
            map_date,
            location,
            start,
            end,
            order: config.order,
            map: None,
            trend: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn map_date(&self) -> Option<NaiveDate> {
        self.dataset.dates().get(self.map_date).copied()
    }

    pub fn location(&self) -> Option<&str> {
        self.dataset.locations().get(self.location).map(String::as_str)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.dataset.dates().get(self.start).copied()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.dataset.dates().get(self.end).copied()
    }

    pub fn order(&self) -> TrendOrder {
        self.order
    }

    /// Last submitted map, if any.
    pub fn map(&self) -> Option<&MapSpec> {
        self.map.as_ref()
    }

    /// Last submitted trend, if any.
    pub fn trend(&self) -> Option<&TrendSpec> {
        self.trend.as_ref()
    }

    pub fn cycle_map_date(&mut self, delta: isize) {
        self.map_date = cycle(self.map_date, self.dataset.dates().len(), delta);
    }

    pub fn cycle_location(&mut self, delta: isize) {
        self.location = cycle(self.location, self.dataset.locations().len(), delta);
    }

    pub fn cycle_start(&mut self, delta: isize) {
        self.start = cycle(self.start, self.dataset.dates().len(), delta);
    }

    pub fn cycle_end(&mut self, delta: isize) {
        self.end = cycle(self.end, self.dataset.dates().len(), delta);
    }

    pub fn toggle_order(&mut self) {
        self.order = self.order.toggle();
    }

    /// Re-query the map with the current date control.
    pub fn submit_map(&mut self) -> Option<&MapSpec> {
        let date = self.map_date()?;
        self.map = Some(map_query(&self.dataset, date));
        self.map.as_ref()
    }

    /// Re-query the trend with the current location/range controls.
    pub fn submit_trend(&mut self) -> Option<&TrendSpec> {
        let (Some(location), Some(start), Some(end)) = (self.location(), self.start(), self.end()) else {
            return None;
        };
        let spec = trend_query(&self.dataset, location, start, end, self.order);
        self.trend = Some(spec);
        self.trend.as_ref()
    }
}

/// Step `idx` by `delta` within `0..len`, wrapping at both ends.
fn cycle(idx: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (idx as isize + delta).rem_euclid(len) as usize
}
