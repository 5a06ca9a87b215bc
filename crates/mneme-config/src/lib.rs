//! # Mneme Configuration Library
//!
//! Type-safe configuration for the Mneme knowledge graph engine. Every
//! tunable the engine reads lives here: extraction confidence weights,
//! per-type acceptance thresholds, inference strengths, and traversal bounds.
//!
//! ## Features
//!
//! - Serde-backed structs with sensible defaults for every field
//! - TOML loading (behind the default `toml` feature)
//! - Range validation before a config reaches the engine
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mneme_config::GraphConfig;
//!
//! fn main() -> Result<(), mneme_config::ConfigError> {
//!     let config = GraphConfig::load_from_path("mneme.toml")?;
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;

pub mod components;

pub use components::{ExtractionConfig, InferenceConfig, TraversalConfig};
pub use config::GraphConfig;
pub use error::ConfigError;
