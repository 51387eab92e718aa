//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then the environment (a `.env` file is
//! honored), then command-line flags.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::{DataArgs, TuiArgs};
use crate::domain::TrendOrder;

/// Forecast table used when neither `--file` nor `FORECAST_CSV` is given.
pub const DEFAULT_CSV_PATH: &str = "Resources/forecast_data.csv";
/// Log file used by the TUI when `FDASH_LOG_FILE` is unset.
pub const DEFAULT_LOG_FILE: &str = "fdash.log";

const ENV_CSV: &str = "FORECAST_CSV";
const ENV_MAPBOX_TOKEN: &str = "MAPBOX_TOKEN";
const ENV_LOG_FILE: &str = "FDASH_LOG_FILE";

#[derive(Clone, Default)]
pub struct DashConfig {
    pub csv_path: PathBuf,
    /// Access token for external map renderers; only written into map exports.
    pub mapbox_token: Option<String>,
    pub log_file: PathBuf,

    pub map_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub order: TrendOrder,
}

impl DashConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            csv_path: non_empty(ENV_CSV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH)),
            mapbox_token: non_empty(ENV_MAPBOX_TOKEN),
            log_file: non_empty(ENV_LOG_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            ..Self::default()
        }
    }

    pub fn with_data_args(mut self, args: &DataArgs) -> Self {
        if let Some(file) = &args.file {
            self.csv_path = file.clone();
        }
        self
    }

    pub fn with_tui_args(self, args: &TuiArgs) -> Self {
        let mut cfg = self.with_data_args(&args.data);
        cfg.map_date = args.date.or(cfg.map_date);
        cfg.location = args.location.clone().or(cfg.location);
        cfg.start = args.start.or(cfg.start);
        cfg.end = args.end.or(cfg.end);
        if let Some(order) = args.order {
            cfg.order = order;
        }
        cfg
    }
}

// The token is a credential; keep it out of debug output and logs.
impl std::fmt::Debug for DashConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashConfig")
            .field("csv_path", &self.csv_path)
            .field("mapbox_token", &self.mapbox_token.as_ref().map(|_| "<redacted>"))
            .field("log_file", &self.log_file)
            .field("map_date", &self.map_date)
            .field("location", &self.location)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = DashConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
        assert_eq!(cfg.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(cfg.mapbox_token.is_none());
        assert_eq!(cfg.order, TrendOrder::Source);
    }

    #[test]
    fn environment_then_flags() {
        let cfg = DashConfig::from_lookup(lookup(&[
            ("FORECAST_CSV", "/data/env.csv"),
            ("MAPBOX_TOKEN", "pk.secret"),
            ("FDASH_LOG_FILE", " "),
        ]));
        assert_eq!(cfg.csv_path, PathBuf::from("/data/env.csv"));
        assert_eq!(cfg.mapbox_token.as_deref(), Some("pk.secret"));
        assert_eq!(cfg.log_file, PathBuf::from(DEFAULT_LOG_FILE));

        let args = TuiArgs {
            data: DataArgs {
                file: Some(PathBuf::from("cli.csv")),
            },
            location: Some("Reno".to_string()),
            order: Some(TrendOrder::Chronological),
            ..TuiArgs::default()
        };
        let cfg = cfg.with_tui_args(&args);
        assert_eq!(cfg.csv_path, PathBuf::from("cli.csv"));
        assert_eq!(cfg.location.as_deref(), Some("Reno"));
        assert_eq!(cfg.order, TrendOrder::Chronological);
        assert_eq!(cfg.map_date, None);
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = DashConfig::from_lookup(lookup(&[("MAPBOX_TOKEN", "pk.secret")]));
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("pk.secret"));
        assert!(shown.contains("<redacted>"));
    }
}
