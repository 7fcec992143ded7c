//! # quarry-pipeline
//!
//! Turns a natural-language business question into an executed query and a
//! summarized answer.
//!
//! ## Stages
//!
//! - [`vault`]: curated questions with pre-validated queries; a hit skips
//!   generation entirely
//! - [`normalizer`]: typo correction and table selection
//! - [`synthesizer`]: query generation with a keyword heuristic fallback
//! - [`sanitize`]: strips fences, tags and terminators from generated text
//! - [`executor`]: read-only execution against the analytical store
//! - [`metrics`]: headline indicator, narrative and the memory write
//! - [`controller`]: runs the stages in order; only execution errors escape

#![deny(unsafe_code)]

pub mod controller;
pub mod decode;
pub mod executor;
pub mod metrics;
pub mod normalizer;
pub mod prompts;
pub mod sanitize;
pub mod schema;
pub mod similarity;
pub mod synthesizer;
pub mod vault;

pub use controller::{Pipeline, PipelineBuilder, PipelineConfig};
pub use executor::{ExecutorConfig, QueryExecutor, SqliteExecutor};
pub use metrics::{Headline, extract_headline};
pub use normalizer::{Normalized, Normalizer};
pub use sanitize::sanitize;
pub use synthesizer::{SynthesisRequest, Synthesizer};
pub use vault::{Vault, VaultEntry};
