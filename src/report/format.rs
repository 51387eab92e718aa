//! Formatted terminal output for query results.
//!
//! We keep formatting code in one place so:
//! - the query code stays free of presentation concerns
//! - output changes are localized (and easy to snapshot test)

use crate::domain::{Dataset, MapSpec, TrendSpec};

/// Header line + point table for a map query.
pub fn format_map(spec: &MapSpec) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Forecasted temperatures for {} ===\n", spec.date));

    let range = spec
        .temp_range
        .map(|(lo, hi)| format!("{lo:.0}..{hi:.0}"))
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "Points: n={} | temp=[{range}] | skipped={} | zoom={}\n\n",
        spec.points.len(),
        spec.skipped,
        spec.zoom
    ));

    if spec.is_empty() {
        out.push_str("(no forecast rows for this date)\n");
        return out;
    }

    push_row(&mut out, format!("{:<24} {:>9} {:>10} {:>6} {:<7}", "location", "lat", "lon", "temp", "color"));
    push_row(&mut out, format!("{:-<24} {:-<9} {:-<10} {:-<6} {:-<7}", "", "", "", "", ""));
    for p in &spec.points {
        push_row(
            &mut out,
            format!(
                "{:<24} {:>9.4} {:>10.4} {:>6.0} {:<7}",
                truncate(&p.location, 24),
                p.lat,
                p.lon,
                p.temperature,
                p.color.to_hex()
            ),
        );
    }
    out
}

/// Header line + `(date, temperature)` table for a trend query.
pub fn format_trend(spec: &TrendSpec) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Forecast for {} ===\n", spec.location));
    out.push_str(&format!(
        "Dates: {} to {} | order={} | n={}\n\n",
        spec.start,
        spec.end,
        spec.order.display_name(),
        spec.points.len()
    ));

    if spec.is_empty() {
        out.push_str("(no forecast rows for this location and range)\n");
        return out;
    }

    push_row(&mut out, format!("{:<10} {:>10}", "date", "temp"));
    push_row(&mut out, format!("{:-<10} {:-<10}", "", ""));
    for p in &spec.points {
        push_row(&mut out, format!("{:<10} {:>10.2}", p.date, p.temperature));
    }
    out
}

/// The location and date lookups offered by the filter controls.
pub fn format_lists(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str(&format!("Source: {} ({} rows)\n", dataset.source(), dataset.len()));

    out.push_str(&format!("\nLocations ({}):\n", dataset.locations().len()));
    for l in dataset.locations() {
        out.push_str(&format!("  {l}\n"));
    }

    out.push_str(&format!("\nDates ({}):\n", dataset.dates().len()));
    for d in dataset.dates() {
        out.push_str(&format!("  {d}\n"));
    }
    out
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
