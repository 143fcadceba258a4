//! Prompt construction, answer parsing, and LLM transports for CivicLens.
//!
//! The pipeline lives here: [`PromptBuilder`] turns a query into a
//! system/user prompt pair with a token budget, a [`ChatProvider`] transport
//! carries it over the wire, and [`SectionParser`] structures the raw answer.
//! [`AnswerProvider`] composes the three.
//!
//! [`ChatProvider`]: civiclens_core::ChatProvider

pub mod answer;
pub mod openai_compat;
pub mod parser;
pub mod prompt;

pub use answer::AnswerProvider;
pub use openai_compat::OpenAiCompatChat;
pub use parser::SectionParser;
pub use prompt::{BuiltPrompt, PromptBuilder};
