//! # quarry-core
//!
//! Shared vocabulary for the Quarry question-answering pipeline.
//!
//! Every other crate depends on the types defined here:
//!
//! - **Records**: [`Record`], an ordered column → scalar mapping produced by query execution
//! - **State**: [`PipelineState`], the single mutable value threaded through every stage
//! - **Responses**: [`Response`] for answered questions, [`FailureResponse`] for failed ones
//! - **Errors**: [`ExecutionError`] and [`AnswerError`], the only errors a caller can observe
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` bootstrap

#![deny(unsafe_code)]

pub mod errors;
pub mod logging;
pub mod records;
pub mod state;

pub use errors::{AnswerError, ExecutionError, ExecutionStage};
pub use records::Record;
pub use state::{AnswerReply, AnswerRequest, FailureResponse, PipelineState, Response};
