//! Plain-text plots for non-interactive output.

pub mod ascii;

pub use ascii::render_trend_plot;
