//! World-map canvas with forecast points.
//!
//! The viewport is derived from the `MapSpec` zoom level and centered on the
//! points, so a continental zoom shows roughly a quarter of the globe.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};

use crate::domain::{MapSpec, Rgb};

/// Above this many points, per-point `location temp°` labels are omitted.
const MAX_LABELED_POINTS: usize = 30;

pub fn render(frame: &mut Frame<'_>, area: Rect, block: Block<'_>, spec: &MapSpec) {
    let (x_bounds, y_bounds) = viewport(spec);
    let label_color = Rgb::from_hex(&spec.label_color)
        .map(|c| Color::Rgb(c.0, c.1, c.2))
        .unwrap_or(Color::Gray);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for p in &spec.points {
                ctx.draw(&Points {
                    coords: &[(p.lon, p.lat)],
                    color: Color::Rgb(p.color.0, p.color.1, p.color.2),
                });
            }

            if spec.points.len() <= MAX_LABELED_POINTS {
                for p in &spec.points {
                    ctx.print(
                        p.lon,
                        p.lat,
                        Span::styled(
                            format!(" {} {:.0}°", p.location, p.temperature),
                            Style::default().fg(label_color),
                        ),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

/// `(x_bounds, y_bounds)` in (lon, lat) degrees for the `MapSpec` zoom level.
pub fn viewport(spec: &MapSpec) -> ([f64; 2], [f64; 2]) {
    // Zoom 1 shows the whole world; each level halves the extent.
    let scale = 2f64.powi(i32::from(spec.zoom.max(1)) - 1);
    let lon_span = 360.0 / scale;
    let lat_span = 180.0 / scale;

    let center = if spec.points.is_empty() {
        (0.0, 0.0)
    } else {
        let (mut lon_lo, mut lon_hi) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut lat_lo, mut lat_hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &spec.points {
            lon_lo = lon_lo.min(p.lon);
            lon_hi = lon_hi.max(p.lon);
            lat_lo = lat_lo.min(p.lat);
            lat_hi = lat_hi.max(p.lat);
        }
        ((lon_lo + lon_hi) / 2.0, (lat_lo + lat_hi) / 2.0)
    };

    (
        clamp_window(center.0, lon_span, -180.0, 180.0),
        clamp_window(center.1, lat_span, -90.0, 90.0),
    )
}

/// A window of width `span` around `center`, shifted to stay within `[lo, hi]`.
fn clamp_window(center: f64, span: f64, lo: f64, hi: f64) -> [f64; 2] {
    let span = span.min(hi - lo);
    let start = (center - span / 2.0).clamp(lo, hi - span);
    [start, start + span]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::MapPoint;

    fn spec(points: &[(f64, f64)]) -> MapSpec {
        MapSpec {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            points: points
                .iter()
                .map(|&(lat, lon)| MapPoint {
                    lat,
                    lon,
                    location: "P".to_string(),
                    temperature: 0.0,
                    color: Rgb(0, 0, 0),
                })
                .collect(),
            zoom: 2,
            label_color: "#191970".to_string(),
            temp_range: None,
            skipped: 0,
        }
    }

    #[test]
    fn continental_viewport_centers_on_points() {
        let (x, y) = viewport(&spec(&[(30.0, -100.0), (50.0, -60.0)]));
        assert_eq!(x, [-170.0, 10.0]);
        assert_eq!(y, [-5.0, 85.0]);
    }

    #[test]
    fn viewport_stays_on_the_globe() {
        let (x, y) = viewport(&spec(&[(80.0, 170.0)]));
        assert_eq!(x, [0.0, 180.0]);
        assert_eq!(y, [0.0, 90.0]);
    }
}
