//! Trend query: one location's forecast over an inclusive date range.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{Dataset, LABEL_COLOR, TrendOrder, TrendPoint, TrendSpec};

/// Build the trend line for `location` between `start` and `end` (both inclusive).
///
/// An unknown location, a range with no rows, or `start > end` all yield an
/// empty line rather than an error.
pub fn trend_query(
    dataset: &Dataset,
    location: &str,
    start: NaiveDate,
    end: NaiveDate,
    order: TrendOrder,
) -> TrendSpec {
    let mut points: Vec<TrendPoint> = dataset
        .records()
        .iter()
        .filter(|r| r.location == location)
        .filter(|r| r.date >= start && r.date <= end)
        .map(|r| TrendPoint {
            date: r.date,
            temperature: r.predicted_temp,
        })
        .collect();

    if order == TrendOrder::Chronological {
        points.sort_by_key(|p| p.date);
    }

    debug!(location, %start, %end, points = points.len(), "trend query");

    TrendSpec {
        location: location.to_string(),
        start,
        end,
        order,
        points,
        label_color: LABEL_COLOR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastRecord;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn rec(location: &str, date: NaiveDate, temp: f64) -> ForecastRecord {
        ForecastRecord {
            location: location.to_string(),
            coordinates: "(0, 0)".to_string(),
            date,
            predicted_temp: temp,
        }
    }

    fn pairs(spec: &TrendSpec) -> Vec<(NaiveDate, f64)> {
        spec.points.iter().map(|p| (p.date, p.temperature)).collect()
    }

    fn scenario() -> Dataset {
        Dataset::new(
            vec![
                rec("CityA", day(1), 10.0),
                rec("CityA", day(2), 12.0),
                rec("CityB", day(1), 5.0),
            ],
            "test",
        )
    }

    #[test]
    fn filters_by_location_and_range() {
        let ds = scenario();
        let a = trend_query(&ds, "CityA", day(1), day(2), TrendOrder::Source);
        assert_eq!(pairs(&a), vec![(day(1), 10.0), (day(2), 12.0)]);
        assert_eq!(a.label_color, "#191970");

        let b = trend_query(&ds, "CityB", day(1), day(2), TrendOrder::Source);
        assert_eq!(pairs(&b), vec![(day(1), 5.0)]);
    }

    #[test]
    fn range_is_inclusive() {
        let ds = scenario();
        let only_second = trend_query(&ds, "CityA", day(2), day(2), TrendOrder::Source);
        assert_eq!(pairs(&only_second), vec![(day(2), 12.0)]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = scenario();
        let spec = trend_query(&ds, "CityA", day(2), day(1), TrendOrder::Source);
        assert!(spec.is_empty());
    }

    #[test]
    fn unknown_location_is_empty() {
        let ds = scenario();
        assert!(trend_query(&ds, "Atlantis", day(1), day(2), TrendOrder::Source).is_empty());
    }

    #[test]
    fn identical_calls_are_identical() {
        let ds = scenario();
        let first = trend_query(&ds, "CityA", day(1), day(2), TrendOrder::Source);
        let second = trend_query(&ds, "CityA", day(1), day(2), TrendOrder::Source);
        assert_eq!(first, second);
    }

    #[test]
    fn source_order_is_preserved_unless_sorting_requested() {
        let ds = Dataset::new(
            vec![
                rec("CityA", day(3), 13.0),
                rec("CityA", day(1), 11.0),
                rec("CityA", day(2), 12.0),
            ],
            "test",
        );

        let source = trend_query(&ds, "CityA", day(1), day(3), TrendOrder::Source);
        assert_eq!(pairs(&source), vec![(day(3), 13.0), (day(1), 11.0), (day(2), 12.0)]);

        let sorted = trend_query(&ds, "CityA", day(1), day(3), TrendOrder::Chronological);
        assert_eq!(pairs(&sorted), vec![(day(1), 11.0), (day(2), 12.0), (day(3), 13.0)]);
    }
}
