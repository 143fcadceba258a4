//! Inbound query types.
//!
//! A `Query` is created once per request and discarded when the pipeline
//! completes. The detail level is an exhaustive enum — an unrecognized value
//! fails at deserialization instead of falling through a lookup table.

use serde::{Deserialize, Serialize};

/// How much depth the caller wants in the answer.
///
/// Controls both the tone instruction appended to the prompt and the token
/// budget of the provider call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Simplified,
    #[default]
    Balanced,
    Detailed,
}

impl DetailLevel {
    /// Stable lowercase name, used in cache keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Simplified => "simplified",
            DetailLevel::Balanced => "balanced",
            DetailLevel::Detailed => "detailed",
        }
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "simplified" => Ok(DetailLevel::Simplified),
            "balanced" => Ok(DetailLevel::Balanced),
            "detailed" => Ok(DetailLevel::Detailed),
            other => Err(format!(
                "unknown detail level '{other}' (expected simplified, balanced, or detailed)"
            )),
        }
    }
}

/// A civic/political question as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// The question text. Must be non-empty.
    pub text: String,

    /// Desired depth of the answer.
    #[serde(default)]
    pub detail_level: DetailLevel,

    /// Optional category hint ("policy", "constitution", "governance", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_category: Option<String>,
}

/// Context material attached to a prompt, derived from the topic category.
///
/// Ephemeral — built per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    /// Relevant constitutional sections, if the topic calls for them.
    pub constitution_sections: Option<String>,

    /// Relevant policy information, if the topic calls for it.
    pub policy_data: Option<String>,
}

impl PromptContext {
    /// True when no context material is attached.
    pub fn is_empty(&self) -> bool {
        self.constitution_sections.is_none() && self.policy_data.is_none()
    }
}
