//! The structured answer returned to callers.

use serde::{Deserialize, Serialize};

/// The fixed five-field decomposition of a provider's free-text answer.
///
/// Invariants:
/// - `full_response` always equals the raw provider text, unmodified.
/// - `summary` is never empty — the parser falls back to the first paragraph
///   of `full_response` when no summary lines were identified.
///
/// `constitutional_references` (and the other middle sections) may be empty
/// when the answer never touched those topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    /// A clear summary of the policy, bill, or question.
    pub summary: String,

    /// The potential impact on citizens.
    pub impact: String,

    /// Historical background.
    pub historical_context: String,

    /// Related constitutional articles.
    #[serde(default)]
    pub constitutional_references: String,

    /// The complete raw response.
    pub full_response: String,
}
