//! Read-side graph walks: path finding and statistics.

mod path_finder;
mod stats;

pub use path_finder::PathFinder;
pub use stats::statistics;
