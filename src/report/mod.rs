//! Terminal reporting for the CLI subcommands.

pub mod format;

pub use format::*;
