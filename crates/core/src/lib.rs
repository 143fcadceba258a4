//! # CivicLens Core
//!
//! Domain types, traits, and error definitions for the CivicLens policy
//! explainer. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The LLM transport is defined as a trait here. Implementations live in the
//! providers crate. This enables:
//! - Swapping providers via configuration
//! - Easy testing with stub transports
//! - Clean dependency graph (all crates depend inward on core)

pub mod answer;
pub mod error;
pub mod provider;
pub mod query;

// Re-export key types at crate root for ergonomics
pub use answer::StructuredAnswer;
pub use error::{Error, ErrorKind, ProviderError, Result};
pub use provider::{ChatProvider, ChatRequest};
pub use query::{DetailLevel, PromptContext, Query};
