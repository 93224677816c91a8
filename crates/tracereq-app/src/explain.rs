//! The `explain` use case: look up priority level and requirement kind documentation.

use tracereq_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes available levels and kinds.
    NotFound {
        identifier: String,
        available_levels: &'static [&'static str],
        available_kinds: &'static [&'static str],
    },
}

/// Look up an explanation for a priority level or requirement kind.
///
/// Level spellings accepted in definitions (`AT_LEAST_ONE`, `at-least-one`) resolve too.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let normalized = identifier.trim().to_ascii_lowercase().replace('-', "_");
    match explain::lookup_explanation(&normalized) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_levels: explain::all_levels(),
            available_kinds: explain::all_kinds(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("When to use\n");
    out.push_str("-----------\n");
    out.push_str(exp.guidance);
    out.push_str("\n\n");
    out.push_str("Example\n");
    out.push_str("-------\n\n");
    out.push_str("```toml\n");
    out.push_str(exp.example);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, levels: &[&str], kinds: &[&str]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Unknown priority level or requirement kind: {}\n\n",
        identifier
    ));
    out.push_str("Available priority levels:\n");
    for level in levels {
        out.push_str(&format!("  - {}\n", level));
    }
    out.push_str("\nAvailable requirement kinds:\n");
    for kind in kinds {
        out.push_str(&format!("  - {}\n", kind));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_found(output: ExplainOutput) -> Explanation {
        match output {
            ExplainOutput::Found(exp) => exp,
            _ => panic!("expected Found"),
        }
    }

    #[test]
    fn explain_known_level() {
        let output = run_explain("all_or_nothing");
        assert_eq!(unwrap_found(output).title, "All Or Nothing");
    }

    #[test]
    fn explain_accepts_definition_spellings() {
        assert!(matches!(run_explain("AT-LEAST-ONE"), ExplainOutput::Found(_)));
        assert!(matches!(run_explain("Mandatory"), ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_known_kind() {
        let output = run_explain("event_fields");
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_unknown() {
        match run_explain("Sometimes") {
            ExplainOutput::NotFound {
                identifier,
                available_levels,
                available_kinds,
            } => {
                assert_eq!(identifier, "Sometimes");
                assert_eq!(available_levels.len(), 4);
                assert_eq!(available_kinds.len(), 3);
            }
            ExplainOutput::Found(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let exp = unwrap_found(run_explain("optional"));
        let formatted = format_explanation(&exp);
        assert!(formatted.starts_with("Optional\n========\n"));
        assert!(formatted.contains("When to use"));
        assert!(formatted.contains("```toml\n[requirements.extras]"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["mandatory", "optional"], &["events"]);
        assert!(formatted.contains("Unknown priority level or requirement kind: missing"));
        assert!(formatted.contains("Available priority levels:\n  - mandatory\n  - optional\n"));
        assert!(formatted.contains("Available requirement kinds:\n  - events\n"));
    }
}
