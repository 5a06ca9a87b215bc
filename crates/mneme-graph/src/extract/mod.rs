//! Entity extraction: a declarative pattern table plus a scoring pass.

mod extractor;
mod patterns;

pub use extractor::{EntityCandidate, EntityExtractor};
pub use patterns::{CleaningRule, EntityPattern, ValidationRule};
