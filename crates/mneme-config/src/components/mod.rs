//! Per-component configuration sections

mod extraction;
mod inference;
mod traversal;

pub use extraction::ExtractionConfig;
pub use inference::InferenceConfig;
pub use traversal::TraversalConfig;
