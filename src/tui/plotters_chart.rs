//! Plotters-powered trend chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Dates are plotted as day numbers (`num_days_from_ce`) and formatted back to
//! dates for the tick labels.

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{Rgb, TrendSpec};

/// A render-only chart description; series and bounds are computed up front.
pub struct TrendPlottersChart<'a> {
    /// Line series, in the order the points should be connected.
    pub series: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub line_color: RGBColor,
    /// Tick labels and axis titles.
    pub label_color: RGBColor,
}

impl<'a> TrendPlottersChart<'a> {
    pub fn new(series: &'a [(f64, f64)], x_bounds: [f64; 2], y_bounds: [f64; 2]) -> Self {
        Self {
            series,
            x_bounds,
            y_bounds,
            line_color: RGBColor(0, 255, 255),
            label_color: WHITE,
        }
    }

    /// Use the trend's `#rrggbb` label color; unparseable values keep the default.
    pub fn with_label_hex(mut self, hex: &str) -> Self {
        if let Some(Rgb(r, g, b)) = Rgb::from_hex(hex) {
            self.label_color = RGBColor(r, g, b);
        }
        self
    }
}

impl<'a> Widget for TrendPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("Date")
                .y_desc("Predicted_Temp")
                .x_labels(4)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_day_number(*v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&self.label_color))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(LineSeries::new(self.series.iter().copied(), &self.line_color))?;
            chart.draw_series(self.series.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Convert a trend into plot coordinates plus padded, non-degenerate bounds.
///
/// Returns `None` for an empty trend.
pub fn trend_series(spec: &TrendSpec) -> Option<(Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
    let series: Vec<(f64, f64)> = spec
        .points
        .iter()
        .map(|p| (p.date.num_days_from_ce() as f64, p.temperature))
        .collect();
    if series.is_empty() {
        return None;
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in &series {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if y_max <= y_min {
        y_min -= 1.0;
        y_max += 1.0;
    }
    let pad = (y_max - y_min) * 0.05;

    Some((series, [x_min, x_max], [y_min - pad, y_max + pad]))
}

fn fmt_day_number(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_default()
}
