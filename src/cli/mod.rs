//! Command-line parsing for the forecast dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the query code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::TrendOrder;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fdash", version, about = "Temperature forecast dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard (map + trend panels).
    Tui(TuiArgs),
    /// Print the map points for one forecast date.
    Map(MapArgs),
    /// Print a location's forecast over a date range.
    Trend(TrendArgs),
    /// List the locations and dates available in the forecast table.
    Lists(DataArgs),
}

/// Where to read the forecast table from.
#[derive(Debug, Args, Clone, Default)]
pub struct DataArgs {
    /// Forecast CSV (defaults to `$FORECAST_CSV`, then `Resources/forecast_data.csv`).
    #[arg(short = 'f', long = "file", value_name = "CSV")]
    pub file: Option<PathBuf>,
}

/// Initial control values for the dashboard.
#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Initial map date.
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Initial trend location.
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// Initial trend start date.
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Initial trend end date.
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Ordering of trend points.
    #[arg(long, value_enum)]
    pub order: Option<TrendOrder>,
}

#[derive(Debug, Args, Clone)]
pub struct MapArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Forecast date to map.
    #[arg(long, value_parser = parse_date_arg)]
    pub date: NaiveDate,

    /// Write the map as a JSON figure document.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Location to chart.
    #[arg(short = 'l', long)]
    pub location: String,

    /// First date of the range (inclusive).
    #[arg(long, value_parser = parse_date_arg)]
    pub start: NaiveDate,

    /// Last date of the range (inclusive).
    #[arg(long, value_parser = parse_date_arg)]
    pub end: NaiveDate,

    /// Ordering of trend points.
    #[arg(long, value_enum)]
    pub order: Option<TrendOrder>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write the trend as a JSON figure document.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::domain::parse_date(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trend_command() {
        let cli = Cli::try_parse_from([
            "fdash", "trend", "-l", "Boston", "--start", "2022-01-01", "--end", "2022/01/31", "--order",
            "chronological",
        ])
        .unwrap();

        let Command::Trend(args) = cli.command else {
            panic!("expected trend command");
        };
        assert_eq!(args.location, "Boston");
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2022, 1, 31).unwrap());
        assert_eq!(args.order, Some(TrendOrder::Chronological));
        assert_eq!(args.width, 80);
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(Cli::try_parse_from(["fdash", "map", "--date", "yesterday"]).is_err());
    }
}
