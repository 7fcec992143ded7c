//! # quarry-memory
//!
//! Long-term memory of past question/answer interactions.
//!
//! ## Fail-Silent
//!
//! Stores return `Result`s, but the pipeline only talks to them through
//! [`MemoryClient`], which logs failures at `warn` and carries on. A broken
//! memory store never changes whether a question gets answered.
//!
//! ## Architecture
//!
//! - [`MemoryStore`]: capability trait (`record` / `recall`).
//! - [`NoopMemory`]: stands in when memory is disabled.
//! - [`SqliteMemory`]: persistent store with keyword-overlap recall.
//! - [`MemoryClient`]: the fail-silent handle injected into the pipeline.

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod sqlite;
pub mod store;

pub use client::MemoryClient;
pub use errors::MemoryError;
pub use sqlite::SqliteMemory;
pub use store::{MemoryRecord, MemoryStore, NoopMemory};
