//! # quarry-agent
//!
//! Wiring behind the `quarry-agent` binary: path resolution, provider
//! construction from settings and pipeline assembly.

#![deny(unsafe_code)]

pub mod paths;
pub mod provider_factory;
pub mod wiring;

pub use provider_factory::build_provider;
pub use wiring::{build_memory, build_pipeline};
