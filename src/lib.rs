//! `forecast-dash` library crate.
//!
//! The binary (`fdash`) is a thin wrapper around this library so that:
//!
//! - the dataset loader and queries are testable without a terminal
//! - the queries can be reused by other front-ends (web, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod colorscale;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod query;
pub mod report;
pub mod tui;
