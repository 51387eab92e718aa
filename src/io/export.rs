//! JSON figure documents for external renderers.
//!
//! Each document carries the data arrays plus layout hints (zoom, label color),
//! so a web front-end can draw the same map/line the dashboard shows.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{MapSpec, TrendSpec};
use crate::error::{AppError, EXIT_INPUT};

#[derive(Debug, Serialize)]
pub struct MapFigure<'a> {
    pub kind: &'static str,
    pub date: NaiveDate,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub hover_name: Vec<&'a str>,
    pub temperature: Vec<f64>,
    pub color: Vec<String>,
    pub layout: MapLayout<'a>,
}

#[derive(Debug, Serialize)]
pub struct MapLayout<'a> {
    pub zoom: u8,
    pub font_color: &'a str,
    pub color_range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TrendFigure<'a> {
    pub kind: &'static str,
    pub location: &'a str,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub layout: TrendLayout<'a>,
}

#[derive(Debug, Serialize)]
pub struct TrendLayout<'a> {
    pub font_color: &'a str,
    pub x_title: &'static str,
    pub y_title: &'static str,
}

pub fn map_figure<'a>(spec: &'a MapSpec, access_token: Option<&'a str>) -> MapFigure<'a> {
    MapFigure {
        kind: "scatter_map",
        date: spec.date,
        lat: spec.points.iter().map(|p| p.lat).collect(),
        lon: spec.points.iter().map(|p| p.lon).collect(),
        hover_name: spec.points.iter().map(|p| p.location.as_str()).collect(),
        temperature: spec.points.iter().map(|p| p.temperature).collect(),
        color: spec.points.iter().map(|p| p.color.to_hex()).collect(),
        layout: MapLayout {
            zoom: spec.zoom,
            font_color: &spec.label_color,
            color_range: spec.temp_range,
            access_token,
        },
    }
}

pub fn trend_figure(spec: &TrendSpec) -> TrendFigure<'_> {
    TrendFigure {
        kind: "line",
        location: &spec.location,
        x: spec.points.iter().map(|p| p.date).collect(),
        y: spec.points.iter().map(|p| p.temperature).collect(),
        layout: TrendLayout {
            font_color: &spec.label_color,
            x_title: "Date",
            y_title: "Predicted_Temp",
        },
    }
}

/// Write a map figure JSON file.
pub fn write_map_json(path: &Path, spec: &MapSpec, access_token: Option<&str>) -> Result<(), AppError> {
    write_json(path, &map_figure(spec, access_token))
}

/// Write a trend figure JSON file.
pub fn write_trend_json(path: &Path, spec: &TrendSpec) -> Result<(), AppError> {
    write_json(path, &trend_figure(spec))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write '{}': {e}", path.display())))
}
