//! Prompt Builder
//!
//! Renders the summarization prompt by substituting the serialized context
//! snapshot and the canonical one-shot example into a fixed template. Pure
//! substitution: no conditionals, no truncation.

/// The summarization prompt.
///
/// The instruction wording (negative-feedback drivers, action-taker ranking,
/// JSON-only output with no schema echoing) is a product decision; change it
/// deliberately, not mechanically.
pub const PROMPT_TEMPLATE: &str = "You are analyzing the Close Loop Analytics Dashboard. The data is organized by 'Sentiment' (Positive, Neutral, Negative) and 'Category' (Analytics, Reasons, Action Takers). Identify the main drivers for negative feedback and highlight who is taking the most action.

OUTPUT FORMAT:
You must strictly follow this structure.
Do not return the schema definition. Return an actual instance.

EXAMPLE OUTPUT:
{example_json}

YOUR TASK:
Context: {context_data}

Return ONLY the JSON.
";

/// Canonical one-shot example shown to the model
pub const EXAMPLE_JSON: &str = r#"{
  "project_name": "Project Alpha",
  "executive_summary": "The project is on track with key milestones met. The development team has resolved initial database connectivity issues and is currently focusing on API implementation.",
  "activity_log": [
    {
      "date": "2023-10-01",
      "description": "Initial Setup and Environment Configuration",
      "category": "Planning"
    },
    {
      "date": "2023-10-02",
      "description": "Resolved Database Connectivity Issues",
      "category": "Development"
    }
  ],
  "pending_action_items": [
    "Complete API Endpoints",
    "Finalize Documentation"
  ]
}"#;

/// Substitute context and example into the template.
///
/// Deterministic: the output contains both inputs verbatim and no unresolved
/// placeholder tokens.
pub fn build_prompt(context_json: &str, example_json: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{example_json}", example_json)
        .replace("{context_data}", context_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DashboardContext;

    #[test]
    fn test_build_prompt_substitutes_both_placeholders() {
        let context_json = DashboardContext::mock().to_json_string();
        let prompt = build_prompt(&context_json, EXAMPLE_JSON);

        assert!(prompt.contains(&context_json));
        assert!(prompt.contains(EXAMPLE_JSON));
        assert!(!prompt.contains("{context_data}"));
        assert!(!prompt.contains("{example_json}"));
    }

    #[test]
    fn test_build_prompt_keeps_instruction_text() {
        let prompt = build_prompt("{}", "{}");
        assert!(prompt.contains("Close Loop Analytics Dashboard"));
        assert!(prompt.contains("Return ONLY the JSON."));
        assert!(prompt.contains("Do not return the schema definition."));
    }

    #[test]
    fn test_example_json_is_valid_and_matches_report_shape() {
        let report = crate::report::parse_report(EXAMPLE_JSON).expect("example must parse");
        assert_eq!(report.project_name, "Project Alpha");
        assert_eq!(report.activity_log.len(), 2);
        assert_eq!(
            report.pending_action_items,
            vec!["Complete API Endpoints", "Finalize Documentation"]
        );
    }
}
