//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and layers them over the environment config
//! - sets up logging
//! - loads the forecast table once
//! - dispatches to the TUI or a one-shot query command

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, DataArgs, MapArgs, TrendArgs, TuiArgs};
use crate::config::DashConfig;
use crate::domain::Dataset;
use crate::error::AppError;
use crate::logging::LogTarget;

pub mod session;

/// Entry point for the `fdash` binary.
pub fn run() -> Result<(), AppError> {
    // `fdash` and `fdash --date ...` behave like `fdash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let config = DashConfig::from_env();

    match cli.command {
        Command::Tui(args) => handle_tui(config, &args),
        Command::Map(args) => handle_map(config, &args),
        Command::Trend(args) => handle_trend(config, &args),
        Command::Lists(args) => handle_lists(config, &args),
    }
}

fn load(config: &DashConfig) -> Result<Dataset, AppError> {
    Ok(crate::io::load_dataset(&config.csv_path)?)
}

fn handle_tui(config: DashConfig, args: &TuiArgs) -> Result<(), AppError> {
    let config = config.with_tui_args(args);
    crate::logging::init(LogTarget::File(config.log_file.clone()))?;
    info!(?config, "starting dashboard");

    let dataset = Arc::new(load(&config)?);
    let session = session::Session::new(dataset, &config);
    crate::tui::run(session, config.mapbox_token)
}

fn handle_map(config: DashConfig, args: &MapArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    let config = config.with_data_args(&args.data);
    let dataset = load(&config)?;

    let spec = crate::query::map_query(&dataset, args.date);
    println!("{}", crate::report::format_map(&spec));

    if let Some(path) = &args.export {
        crate::io::write_map_json(path, &spec, config.mapbox_token.as_deref())?;
        info!(path = %path.display(), "wrote map figure");
    }
    Ok(())
}

fn handle_trend(config: DashConfig, args: &TrendArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    let config = config.with_data_args(&args.data);
    let dataset = load(&config)?;

    let order = args.order.unwrap_or(config.order);
    let spec = crate::query::trend_query(&dataset, &args.location, args.start, args.end, order);
    println!("{}", crate::report::format_trend(&spec));

    if !args.no_plot && !spec.is_empty() {
        println!("{}", crate::plot::render_trend_plot(&spec, args.width, args.height));
    }

    if let Some(path) = &args.export {
        crate::io::write_trend_json(path, &spec)?;
        info!(path = %path.display(), "wrote trend figure");
    }
    Ok(())
}

fn handle_lists(config: DashConfig, args: &DataArgs) -> Result<(), AppError> {
    crate::logging::init(LogTarget::Stderr)?;
    let config = config.with_data_args(args);
    let dataset = load(&config)?;
    println!("{}", crate::report::format_lists(&dataset));
    Ok(())
}

/// Rewrite argv so `fdash` defaults to `fdash tui`.
///
/// Rules:
/// - `fdash`                       -> `fdash tui`
/// - `fdash --date D ...`          -> `fdash tui --date D ...`
/// - `fdash --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "map" | "trend" | "lists");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(rewrite_args(args(&["fdash"])), args(&["fdash", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(args(&["fdash", "-f", "x.csv"])),
            args(&["fdash", "tui", "-f", "x.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_untouched() {
        for v in [&["fdash", "map", "--date", "2020-01-01"][..], &["fdash", "--help"][..]] {
            assert_eq!(rewrite_args(args(v)), args(v));
        }
    }
}
