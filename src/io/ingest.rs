//! CSV ingest for the forecast table.
//!
//! Turns a `Location, Coordinates, Date, Predicted_Temp` CSV into a `Dataset`.
//!
//! Design goals:
//! - **Strict schema**: a missing required column is fatal
//! - **Strict rows**: an unreadable date or temperature is fatal, with the line number
//! - **Lazy coordinates**: the coordinate text is kept verbatim; map queries parse it
//!   and drop bad rows individually

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::info;

use crate::domain::{Dataset, ForecastRecord, parse_date};
use crate::error::DataLoadError;

const COL_LOCATION: &str = "Location";
const COL_COORDINATES: &str = "Coordinates";
const COL_DATE: &str = "Date";
const COL_TEMP: &str = "Predicted_Temp";

/// Resolved column positions for the required fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    location: usize,
    coordinates: usize,
    date: usize,
    temp: usize,
}

/// Load the forecast table from a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_dataset_from_reader(file, path.display().to_string())
}

/// Load the forecast table from any reader. `label` is recorded as the dataset source.
pub fn load_dataset_from_reader<R: Read>(reader: R, label: impl Into<String>) -> Result<Dataset, DataLoadError> {
    let label = label.into();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&build_header_map(&headers))?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        let record = result?;
        records.push(parse_row(&record, columns).map_err(|message| DataLoadError::MalformedRow { line, message })?);
    }

    if records.is_empty() {
        return Err(DataLoadError::Empty);
    }

    let dataset = Dataset::new(records, label);
    info!(
        source = dataset.source(),
        rows = dataset.len(),
        locations = dataset.locations().len(),
        dates = dataset.dates().len(),
        "loaded forecast table"
    );
    Ok(dataset)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    // First occurrence wins if a header is repeated.
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, DataLoadError> {
    let find = |name: &'static str| {
        header_map
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or(DataLoadError::MissingColumn(name))
    };

    Ok(Columns {
        location: find(COL_LOCATION)?,
        coordinates: find(COL_COORDINATES)?,
        date: find(COL_DATE)?,
        temp: find(COL_TEMP)?,
    })
}

fn parse_row(record: &StringRecord, columns: Columns) -> Result<ForecastRecord, String> {
    let location = get_required(record, columns.location, COL_LOCATION)?.to_string();
    let coordinates = get_required(record, columns.coordinates, COL_COORDINATES)?.to_string();
    let date = parse_date(get_required(record, columns.date, COL_DATE)?)?;

    let raw_temp = get_required(record, columns.temp, COL_TEMP)?;
    let predicted_temp = raw_temp
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid `{COL_TEMP}` value '{raw_temp}'."))?;

    Ok(ForecastRecord {
        location,
        coordinates,
        date,
        predicted_temp,
    })
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}
