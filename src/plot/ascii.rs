//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - forecast samples: `o`
//! - line between consecutive samples: `-`

use chrono::{Datelike, NaiveDate};

use crate::domain::TrendSpec;

/// Render a trend line as a `width` x `height` character grid with a one-line header.
///
/// Samples are connected in the order they appear in `spec.points`.
pub fn render_trend_plot(spec: &TrendSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let series: Vec<(f64, f64)> = spec
        .points
        .iter()
        .map(|p| (p.date.num_days_from_ce() as f64, p.temperature))
        .collect();

    let (Some((x_min, x_max)), Some((y_min, y_max))) = (
        value_range(series.iter().map(|&(x, _)| x)),
        value_range(series.iter().map(|&(_, y)| y)),
    ) else {
        return "Plot: no data\n".to_string();
    };

    let (x_min, x_max) = widen(x_min, x_max);
    let (y_min, y_max) = pad_range(widen(y_min, y_max), 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let cells: Vec<(usize, usize)> = series
        .iter()
        .map(|&(x, y)| (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height)))
        .collect();

    // Lines first so samples overlay them.
    for pair in cells.windows(2) {
        draw_line(&mut grid, pair[0], pair[1], '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    let first = spec.points.iter().map(|p| p.date).min();
    let last = spec.points.iter().map(|p| p.date).max();
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: date=[{}, {}] | temp=[{y_min:.2}, {y_max:.2}]\n",
        fmt_date(first),
        fmt_date(last)
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn fmt_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Give a zero-width range some extent so it can be mapped onto the grid.
fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 1.0, max + 1.0) }
}

fn pad_range((min, max): (f64, f64), frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
