//! Read-only queries over the forecast table.
//!
//! Both queries are pure functions of `(&Dataset, arguments)`: no state is kept
//! between calls and the dataset is never modified.

pub mod map;
pub mod trend;

pub use map::{map_query, map_query_with_scale, parse_coordinates, round_temperature};
pub use trend::trend_query;
