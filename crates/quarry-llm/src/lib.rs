//! # quarry-llm
//!
//! Generative backend abstraction for the Quarry pipeline.
//!
//! - [`Provider`]: the trait the normalizer and synthesizer call through
//! - [`OpenAiCompatProvider`]: chat completions over any OpenAI-compatible
//!   endpoint (Groq by default)
//! - [`resolve_api_key`]: credential validation; without a valid key no
//!   provider is built and the pipeline runs on its deterministic fallbacks

#![deny(unsafe_code)]

pub mod auth;
pub mod error_parsing;
pub mod openai_compat;
pub mod provider;

pub use auth::resolve_api_key;
pub use openai_compat::{OpenAiCompatConfig, OpenAiCompatProvider};
pub use provider::{
    ChatMessage, ChatRole, CompletionRequest, Provider, ProviderError, ProviderResult,
};
