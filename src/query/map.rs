//! Map query: forecast points for a single date.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::colorscale::ColorScale;
use crate::domain::{DEFAULT_MAP_ZOOM, Dataset, LABEL_COLOR, MapPoint, MapSpec};
use crate::error::CoordinateParseError;

/// Build the map for `date`.
///
/// Rows whose coordinates cannot be parsed are skipped (and logged); a date
/// absent from the table yields an empty map.
pub fn map_query(dataset: &Dataset, date: NaiveDate) -> MapSpec {
    map_query_with_scale(dataset, date, &ColorScale::default())
}

pub fn map_query_with_scale(dataset: &Dataset, date: NaiveDate, scale: &ColorScale) -> MapSpec {
    let mut located = Vec::new();
    let mut skipped = 0usize;

    for r in dataset.records().iter().filter(|r| r.date == date) {
        match parse_coordinates(&r.coordinates) {
            Ok((lat, lon)) => located.push((lat, lon, r, round_temperature(r.predicted_temp))),
            Err(e) => {
                skipped += 1;
                warn!(location = %r.location, %date, coordinates = %r.coordinates, "skipping row: {e}");
            }
        }
    }

    let temp_range = located.iter().fold(None, |acc: Option<(f64, f64)>, &(_, _, _, t)| {
        Some(match acc {
            Some((lo, hi)) => (lo.min(t), hi.max(t)),
            None => (t, t),
        })
    });

    let points: Vec<MapPoint> = located
        .into_iter()
        .map(|(lat, lon, r, temperature)| {
            let color = match temp_range {
                Some((lo, hi)) => scale.sample_range(temperature, lo, hi),
                None => scale.sample(0.5),
            };
            MapPoint {
                lat,
                lon,
                location: r.location.clone(),
                temperature,
                color,
            }
        })
        .collect();

    debug!(%date, points = points.len(), skipped, "map query");

    MapSpec {
        date,
        points,
        zoom: DEFAULT_MAP_ZOOM,
        label_color: LABEL_COLOR.to_string(),
        temp_range,
        skipped,
    }
}

/// Split a `"(lat, lon)"` string into its two components.
///
/// Splits on the first comma; surrounding whitespace, a leading `(` on the
/// latitude and a trailing `)` on the longitude are ignored. Besides a wrong
/// token count or a non-numeric token, a latitude outside `[-90, 90]` or a
/// longitude outside `[-180, 180]` is rejected as `OutOfRange`, so such rows
/// are skipped by the map query.
pub fn parse_coordinates(text: &str) -> Result<(f64, f64), CoordinateParseError> {
    let (lat_raw, lon_raw) = text
        .split_once(',')
        .ok_or_else(|| CoordinateParseError::MissingComma(text.to_string()))?;

    if lon_raw.contains(',') {
        return Err(CoordinateParseError::TooManyComponents(text.to_string()));
    }

    let lat = parse_component(lat_raw.trim().trim_start_matches('(').trim(), "latitude")?;
    let lon = parse_component(lon_raw.trim().trim_end_matches(')').trim(), "longitude")?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(CoordinateParseError::OutOfRange { lat, lon });
    }
    Ok((lat, lon))
}

fn parse_component(token: &str, axis: &'static str) -> Result<f64, CoordinateParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateParseError::InvalidNumber {
            axis,
            token: token.to_string(),
        })
}

/// Round to a whole degree, ties to even (2.5 -> 2, 3.5 -> 4).
///
/// Negative zero is normalized so `-0.4` reads as `0`, not `-0`.
pub fn round_temperature(t: f64) -> f64 {
    t.round_ties_even() + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastRecord;

    fn rec(location: &str, coordinates: &str, date: &str, temp: f64) -> ForecastRecord {
        ForecastRecord {
            location: location.to_string(),
            coordinates: coordinates.to_string(),
            date: crate::domain::parse_date(date).unwrap(),
            predicted_temp: temp,
        }
    }

    fn day(s: &str) -> NaiveDate {
        crate::domain::parse_date(s).unwrap()
    }

    #[test]
    fn two_city_scenario() {
        let ds = Dataset::new(
            vec![
                rec("CityA", "(10.0, 20.0)", "2020-01-01", 5.4),
                rec("CityB", "(11.0,21.0)", "2020-01-01", 5.6),
            ],
            "test",
        );

        let spec = map_query(&ds, day("2020-01-01"));
        let got: Vec<_> = spec
            .points
            .iter()
            .map(|p| (p.lat, p.lon, p.location.as_str(), p.temperature))
            .collect();
        assert_eq!(got, vec![(10.0, 20.0, "CityA", 5.0), (11.0, 21.0, "CityB", 6.0)]);
        assert_eq!(spec.zoom, 2);
        assert_eq!(spec.label_color, "#191970");
        assert_eq!(spec.temp_range, Some((5.0, 6.0)));
    }

    #[test]
    fn only_selected_date_is_returned() {
        let ds = Dataset::new(
            vec![
                rec("A", "(1, 1)", "2020-01-01", 1.0),
                rec("B", "(2, 2)", "2020-01-02", 2.0),
                rec("C", "(3, 3)", "2020-01-01", 3.0),
            ],
            "test",
        );

        for &d in ds.dates() {
            let spec = map_query(&ds, d);
            for p in &spec.points {
                let source = ds.records().iter().find(|r| r.location == p.location).unwrap();
                assert_eq!(source.date, d);
            }
        }
        let names: Vec<_> = map_query(&ds, day("2020-01-01"))
            .points
            .into_iter()
            .map(|p| p.location)
            .collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn unknown_date_is_empty() {
        let ds = Dataset::new(vec![rec("A", "(1, 1)", "2020-01-01", 1.0)], "test");
        let spec = map_query(&ds, day("1999-12-31"));
        assert!(spec.is_empty());
        assert_eq!(spec.temp_range, None);
        assert_eq!(spec.skipped, 0);
    }

    #[test]
    fn malformed_coordinates_are_skipped() {
        let ds = Dataset::new(
            vec![
                rec("Good", "(40.71, -74.00)", "2020-01-01", 1.0),
                rec("Bad", "(40.71 -74.00)", "2020-01-01", 2.0),
                rec("Worse", "(north, west)", "2020-01-01", 3.0),
            ],
            "test",
        );

        let spec = map_query(&ds, day("2020-01-01"));
        assert_eq!(spec.points.len(), 1);
        assert_eq!(spec.points[0].location, "Good");
        assert_eq!(spec.skipped, 2);
    }

    #[test]
    fn colors_span_the_scale() {
        let ds = Dataset::new(
            vec![
                rec("Cold", "(1, 1)", "2020-01-01", -10.2),
                rec("Mild", "(2, 2)", "2020-01-01", 5.0),
                rec("Hot", "(3, 3)", "2020-01-01", 20.4),
            ],
            "test",
        );
        let scale = ColorScale::plasma();
        let spec = map_query_with_scale(&ds, day("2020-01-01"), &scale);
        assert_eq!(spec.points[0].color, scale.sample(0.0));
        assert_eq!(spec.points[2].color, scale.sample(1.0));
        assert_eq!(spec.points[1].color, scale.sample(0.5));
    }

    #[test]
    fn repeated_queries_round_identically() {
        let ds = Dataset::new(
            vec![
                rec("A", "(1, 1)", "2020-01-01", 2.5),
                rec("B", "(2, 2)", "2020-01-01", 3.5),
                rec("C", "(3, 3)", "2020-01-01", -0.5),
            ],
            "test",
        );
        let first = map_query(&ds, day("2020-01-01"));
        let second = map_query(&ds, day("2020-01-01"));
        assert_eq!(first, second);
        let temps: Vec<f64> = first.points.iter().map(|p| p.temperature).collect();
        assert_eq!(temps, [2.0, 4.0, 0.0]);
        assert!(temps[2].is_sign_positive());
    }

    #[test]
    fn small_negative_temperatures_round_to_plain_zero() {
        for t in [-0.4, -0.5, -0.0] {
            let r = round_temperature(t);
            assert!(r.is_sign_positive(), "{t} rounded to {r}");
            assert_eq!(format!("{r:.0}"), "0");
        }
    }

    #[test]
    fn parse_coordinate_shapes() {
        assert_eq!(parse_coordinates("(40.71, -74.00)").unwrap(), (40.71, -74.0));
        assert_eq!(parse_coordinates("40.71,-74.00").unwrap(), (40.71, -74.0));
        assert_eq!(parse_coordinates("  ( 1.5 ,  2.5 )  ").unwrap(), (1.5, 2.5));

        assert!(matches!(parse_coordinates("(1.0)"), Err(CoordinateParseError::MissingComma(_))));
        assert!(matches!(
            parse_coordinates("(1, 2, 3)"),
            Err(CoordinateParseError::TooManyComponents(_))
        ));
        assert!(matches!(
            parse_coordinates("(a, 2)"),
            Err(CoordinateParseError::InvalidNumber { axis: "latitude", .. })
        ));
        assert!(matches!(
            parse_coordinates("(1, )"),
            Err(CoordinateParseError::InvalidNumber { axis: "longitude", .. })
        ));
        assert!(matches!(
            parse_coordinates("(91, 0)"),
            Err(CoordinateParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn formatted_coordinates_reparse() {
        for &(lat, lon) in &[(40.7128, -74.006), (-33.8688, 151.2093), (0.0, 0.0), (64.2008, -149.4937)] {
            let text = format!("({lat}, {lon})");
            let (plat, plon) = parse_coordinates(&text).unwrap();
            assert!((plat - lat).abs() < 1e-9);
            assert!((plon - lon).abs() < 1e-9);
        }
    }
}
