//! Prompt construction.
//!
//! A pure function of configuration and the inbound query: no I/O, no
//! truncation or sanitization of the user's text.

use civiclens_core::{ChatRequest, DetailLevel, PromptContext};

/// The fixed system instruction establishing the assistant's role.
const SYSTEM_PROMPT: &str = "\
You are CivicLens, an educational assistant that explains political policies, \
laws, and governance in a clear, factual, and unbiased manner. Your goal is to \
enhance political literacy.

When explaining political topics:
1. Focus on facts and avoid partisan language
2. Provide historical context when relevant
3. Explain potential impacts on ordinary citizens
4. Reference constitutional articles when applicable
5. Use simple language that is accessible to all education levels
6. Structure your response clearly with relevant sections

Your role is to EDUCATE, not persuade or take political positions.";

/// A fully assembled prompt ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub system_prompt: String,
    pub user_message: String,
    pub max_tokens: u32,
}

impl BuiltPrompt {
    /// Convert into a wire request with the given sampling temperature.
    pub fn into_request(self, temperature: f32) -> ChatRequest {
        ChatRequest {
            system_prompt: self.system_prompt,
            user_message: self.user_message,
            max_tokens: self.max_tokens,
            temperature,
        }
    }
}

/// Builds the system/user message pair and resolves the token budget.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    simplified_tokens: u32,
    detailed_tokens: u32,
}

impl PromptBuilder {
    /// Create a builder from the configured low/high token budgets.
    pub fn new(simplified_tokens: u32, detailed_tokens: u32) -> Self {
        Self {
            simplified_tokens,
            detailed_tokens,
        }
    }

    /// Map a detail level to its token budget.
    ///
    /// Balanced is the integer floor mean of the two configured budgets.
    /// The match is exhaustive — there is deliberately no default arm.
    pub fn resolve_token_budget(&self, detail_level: DetailLevel) -> u32 {
        match detail_level {
            DetailLevel::Simplified => self.simplified_tokens,
            DetailLevel::Detailed => self.detailed_tokens,
            DetailLevel::Balanced => (self.simplified_tokens + self.detailed_tokens) / 2,
        }
    }

    /// The tone instruction appended after the query and context.
    fn level_instruction(detail_level: DetailLevel) -> &'static str {
        match detail_level {
            DetailLevel::Simplified => {
                "Explain this like I'm 12 years old, using very simple language and basic concepts."
            }
            DetailLevel::Balanced => {
                "Provide a balanced explanation suitable for an average adult citizen."
            }
            DetailLevel::Detailed => {
                "Provide a comprehensive explanation with nuanced details and specific references."
            }
        }
    }

    /// Assemble the prompt for a query.
    ///
    /// The user message is the raw query, any available context blocks, and
    /// the detail-level instruction.
    pub fn build(
        &self,
        query_text: &str,
        detail_level: DetailLevel,
        context: &PromptContext,
    ) -> BuiltPrompt {
        let mut context_text = String::new();
        if let Some(sections) = &context.constitution_sections {
            context_text.push_str(&format!("\nRelevant constitutional sections: {sections}\n"));
        }
        if let Some(policy) = &context.policy_data {
            context_text.push_str(&format!("\nRelevant policy information: {policy}\n"));
        }

        let instruction = Self::level_instruction(detail_level);
        let user_message = format!("{query_text}\n\n{context_text}\n\n{instruction}");

        BuiltPrompt {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_message,
            max_tokens: self.resolve_token_budget(detail_level),
        }
    }
}
