//! Input/output helpers.
//!
//! - forecast CSV ingest (`ingest`)
//! - JSON figure exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
