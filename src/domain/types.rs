//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - shared read-only between the TUI and CLI front-ends
//! - exported to JSON figure documents
//! - compared directly in tests

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Initial map zoom (continental scale).
pub const DEFAULT_MAP_ZOOM: u8 = 2;

/// Font / label color hint shared by both charts.
pub const LABEL_COLOR: &str = "#191970";

/// Date formats accepted in the CSV and on the command line, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// One row of the forecast table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub location: String,
    /// Raw `"(lat, lon)"` text; parsed per map query.
    pub coordinates: String,
    pub date: NaiveDate,
    pub predicted_temp: f64,
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// One plotted location on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub location: String,
    /// Predicted temperature rounded to a whole degree.
    pub temperature: f64,
    pub color: Rgb,
}

/// Map visualization for a single forecast date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub date: NaiveDate,
    /// Points in dataset row order.
    pub points: Vec<MapPoint>,
    pub zoom: u8,
    pub label_color: String,
    /// Min/max rounded temperature across `points`, used for the color legend.
    pub temp_range: Option<(f64, f64)>,
    /// Rows dropped because their coordinates could not be parsed.
    pub skipped: usize,
}

impl MapSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One `(date, temperature)` sample of a trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Line chart of a location's predicted temperature over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSpec {
    pub location: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub order: TrendOrder,
    pub points: Vec<TrendPoint>,
    pub label_color: String,
}

impl TrendSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Ordering applied to trend points after range filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrendOrder {
    /// Keep the forecast table's row order.
    #[default]
    Source,
    /// Stable sort by date.
    Chronological,
}

impl TrendOrder {
    pub fn toggle(self) -> Self {
        match self {
            TrendOrder::Source => TrendOrder::Chronological,
            TrendOrder::Chronological => TrendOrder::Source,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TrendOrder::Source => "source",
            TrendOrder::Chronological => "chronological",
        }
    }
}

/// Parse a date in any of the accepted formats.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD-MM-YYYY."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
        for s in ["2022-03-14", "2022/03/14", "03/14/2022", "14-03-2022", " 2022-03-14 "] {
            assert_eq!(parse_date(s).unwrap(), expected, "{s}");
        }
        assert!(parse_date("14.03.2022").is_err());
    }

    #[test]
    fn rgb_hex() {
        assert_eq!(Rgb(13, 8, 135).to_hex(), "#0d0887");
        assert_eq!(Rgb::from_hex("#191970"), Some(Rgb(0x19, 0x19, 0x70)));
        assert_eq!(Rgb::from_hex("191970"), None);
        assert_eq!(Rgb::from_hex("#19197g"), None);
    }

    #[test]
    fn trend_order_toggles() {
        assert_eq!(TrendOrder::default().toggle(), TrendOrder::Chronological);
        assert_eq!(TrendOrder::Chronological.toggle(), TrendOrder::Source);
    }
}
