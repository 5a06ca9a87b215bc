//! Relationship inference: archetype triggers plus type-compatibility priors.

mod inferrer;
pub mod rules;

pub use inferrer::RelationshipInferrer;
