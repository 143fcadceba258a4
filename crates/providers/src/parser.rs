//! Heuristic section parser.
//!
//! Turns an unstructured provider answer into the fixed five-field
//! [`StructuredAnswer`]. This is a best-effort keyword heuristic, not
//! natural-language understanding: deterministic for a given input and rule
//! table, with no guarantee the boundaries are semantically right.

use civiclens_core::StructuredAnswer;

/// The section a line is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Impact,
    HistoricalContext,
    ConstitutionalReferences,
}

/// Ordered keyword rules. The first rule whose keyword appears in a line
/// wins, so a line mentioning both "impact" and "history" lands in Impact.
/// The order here is part of the contract — do not reorder casually.
const SECTION_RULES: &[(&[&str], Section)] = &[
    (&["impact", "effect"], Section::Impact),
    (&["history", "background", "context"], Section::HistoricalContext),
    (&["constitution", "article"], Section::ConstitutionalReferences),
];

/// Single-pass state machine over the answer lines.
///
/// State starts at `Summary` and is sticky: a keyword line switches the
/// target section for itself and every following line until the next match.
pub struct SectionParser;

impl SectionParser {
    /// Parse raw provider text into named sections.
    ///
    /// Blank lines are skipped. `full_response` is always the original text
    /// verbatim; an empty summary falls back to the first paragraph.
    pub fn parse(raw: &str) -> StructuredAnswer {
        let mut summary = String::new();
        let mut impact = String::new();
        let mut historical_context = String::new();
        let mut constitutional_references = String::new();

        let mut current = Section::Summary;

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(section) = Self::match_section(line) {
                current = section;
            }

            let buffer = match current {
                Section::Summary => &mut summary,
                Section::Impact => &mut impact,
                Section::HistoricalContext => &mut historical_context,
                Section::ConstitutionalReferences => &mut constitutional_references,
            };
            if !buffer.is_empty() {
                buffer.push('\n');
            }
            buffer.push_str(line);
        }

        if summary.is_empty() {
            summary = raw.split("\n\n").next().unwrap_or_default().to_string();
        }

        StructuredAnswer {
            summary,
            impact,
            historical_context,
            constitutional_references,
            full_response: raw.to_string(),
        }
    }

    /// Apply the rule table to one line, case-insensitively.
    fn match_section(line: &str) -> Option<Section> {
        let lower = line.to_lowercase();
        SECTION_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(_, section)| *section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_paragraphs_to_sections() {
        let raw = "Summary line\n\nThis affects citizens broadly.\n\nHistorical background here.\n\nArticle 10 applies.";
        let answer = SectionParser::parse(raw);

        assert_eq!(answer.summary, "Summary line");
        assert!(answer.impact.contains("affects citizens broadly"));
        assert!(answer.historical_context.contains("Historical background"));
        assert!(answer.constitutional_references.contains("Article 10"));
        assert_eq!(answer.full_response, raw);
    }

    #[test]
    fn full_response_is_verbatim() {
        let raw = "  Odd   spacing \n\n\nand blank lines\n";
        let answer = SectionParser::parse(raw);
        assert_eq!(answer.full_response, raw);
    }

    #[test]
    fn state_is_sticky_until_next_keyword() {
        let raw = "Impact on farmers:\nPrices rise.\nSubsidies shrink.\nHistorical note: it happened before.";
        let answer = SectionParser::parse(raw);

        assert!(answer.impact.contains("Prices rise."));
        assert!(answer.impact.contains("Subsidies shrink."));
        assert!(answer.historical_context.contains("it happened before"));
    }

    #[test]
    fn first_matching_rule_wins() {
        // Contains both an impact keyword and a history keyword — the rule
        // table checks impact first.
        let answer = SectionParser::parse("The historical impact of the bill.");
        assert!(answer.impact.contains("historical impact"));
        assert!(answer.historical_context.is_empty());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let answer = SectionParser::parse("Intro.\nIMPACT ON CITIZENS:\nHigher taxes.");
        assert!(answer.impact.contains("Higher taxes."));
    }

    #[test]
    fn empty_summary_falls_back_to_first_paragraph() {
        // Every line hits a trigger keyword, so nothing lands in summary.
        let raw = "Impact: sweeping.\nEffect: immediate.\n\nArticle 201 applies.";
        let answer = SectionParser::parse(raw);
        assert_eq!(answer.summary, "Impact: sweeping.\nEffect: immediate.");
    }

    #[test]
    fn blank_lines_are_skipped_not_buffered() {
        let answer = SectionParser::parse("First.\n\n\nSecond.");
        assert_eq!(answer.summary, "First.\nSecond.");
    }

    #[test]
    fn parse_is_deterministic() {
        let raw = "Summary.\n\nThe effect is broad.\n\nBackground follows.";
        assert_eq!(SectionParser::parse(raw), SectionParser::parse(raw));
    }
}
