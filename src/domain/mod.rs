//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the forecast table row (`ForecastRecord`)
//! - query outputs (`MapSpec`, `TrendSpec`) and their points
//! - small shared enums/constants (`TrendOrder`, `LABEL_COLOR`)

pub mod dataset;
pub mod types;

pub use dataset::*;
pub use types::*;
