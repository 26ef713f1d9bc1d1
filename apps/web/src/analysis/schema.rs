//! Declared response schema and the validator that checks model output
//! against it.
//!
//! The schema uses the OpenAPI subset accepted by Gemini's `responseSchema`
//! (`OBJECT`, `ARRAY`, `STRING`, `NUMBER`, `INTEGER`, `BOOLEAN`, plus
//! `properties`, `required`, `items`, `nullable`). The same document is sent
//! to the model and used here, so the two cannot drift apart.

use std::fmt;
use std::sync::OnceLock;

use serde_json::{json, Value};

/// The declared output shape of a survey analysis.
pub fn response_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        json!({
            "type": "OBJECT",
            "properties": {
                "overallSummary": {
                    "type": "STRING",
                    "description": "A short, high-level summary of the survey results."
                },
                "keyStrengths": {
                    "type": "ARRAY",
                    "description": "The top 3-5 positive themes or comments. What participants liked most.",
                    "items": { "type": "STRING" }
                },
                "areasForImprovement": {
                    "type": "ARRAY",
                    "description": "The top 3-5 areas for improvement based on the feedback. Common complaints or lowest-rated aspects.",
                    "items": { "type": "STRING" }
                },
                "actionableSuggestions": {
                    "type": "ARRAY",
                    "description": "At least 2 concrete, actionable suggestions for next year's plan.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "suggestion": { "type": "STRING" },
                            "reasoning": { "type": "STRING" }
                        },
                        "required": ["suggestion", "reasoning"]
                    }
                },
                "quantitativeAnalysis": {
                    "type": "OBJECT",
                    "description": "Quantitative analysis when numeric ratings exist. Omit when there is no numeric data.",
                    "properties": {
                        "averageScore": {
                            "type": "NUMBER",
                            "description": "Average satisfaction score (1-5 scale assumed)."
                        },
                        "scoreDistribution": {
                            "type": "ARRAY",
                            "description": "Score distribution (e.g. the count of 1s, 2s, 3s).",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING", "description": "e.g. '1', '2'" },
                                    "value": { "type": "NUMBER", "description": "The count for this score" }
                                },
                                "required": ["name", "value"]
                            }
                        }
                    },
                    "required": ["averageScore", "scoreDistribution"],
                    "nullable": true
                }
            },
            "required": ["overallSummary", "keyStrengths", "areasForImprovement", "actionableSuggestions"]
        })
    })
}

/// A single place where a document departs from the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON-pointer-like path, `$` for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validates `value` against `schema`, collecting every violation.
pub fn validate(value: &Value, schema: &Value) -> Result<(), Vec<SchemaViolation>> {
    let mut violations = Vec::new();
    validate_node(value, schema, "$", &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn validate_node(value: &Value, schema: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    if value.is_null() {
        if !schema.get("nullable").and_then(Value::as_bool).unwrap_or(false) {
            out.push(violation(path, "null is not allowed"));
        }
        return;
    }

    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return;
    };

    let type_ok = match expected {
        "OBJECT" => value.is_object(),
        "ARRAY" => value.is_array(),
        "STRING" => value.is_string(),
        "NUMBER" => value.is_number(),
        "INTEGER" => value.is_i64() || value.is_u64(),
        "BOOLEAN" => value.is_boolean(),
        _ => true,
    };
    if !type_ok {
        out.push(violation(
            path,
            &format!("expected {expected}, found {}", json_type_name(value)),
        ));
        return;
    }

    match value {
        Value::Object(map) => {
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for key in required.iter().filter_map(Value::as_str) {
                    if !map.contains_key(key) {
                        out.push(violation(
                            &format!("{path}.{key}"),
                            "required property is missing",
                        ));
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, property_schema) in properties {
                    if let Some(child) = map.get(key) {
                        validate_node(child, property_schema, &format!("{path}.{key}"), out);
                    }
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    validate_node(item, item_schema, &format!("{path}[{i}]"), out);
                }
            }
        }
        _ => {}
    }
}

fn violation(path: &str, message: &str) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        message: message.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> Value {
        json!({
            "overallSummary": "Positive feedback overall",
            "keyStrengths": ["Engaging content"],
            "areasForImprovement": ["Pacing"],
            "actionableSuggestions": [{"suggestion": "Add breaks", "reasoning": "Pacing feedback"}],
            "quantitativeAnalysis": {
                "averageScore": 4.33,
                "scoreDistribution": [{"name": "3", "value": 1}, {"name": "5", "value": 2}]
            }
        })
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate(&valid_document(), response_schema()).is_ok());
    }

    #[test]
    fn test_quantitative_analysis_may_be_null_or_absent() {
        let mut doc = valid_document();
        doc["quantitativeAnalysis"] = Value::Null;
        assert!(validate(&doc, response_schema()).is_ok());

        doc.as_object_mut().unwrap().remove("quantitativeAnalysis");
        assert!(validate(&doc, response_schema()).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let mut doc = valid_document();
        doc.as_object_mut().unwrap().remove("keyStrengths");
        let violations = validate(&doc, response_schema()).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$.keyStrengths");
    }

    #[test]
    fn test_wrong_types_are_reported_with_paths() {
        let mut doc = valid_document();
        doc["overallSummary"] = json!(42);
        doc["keyStrengths"] = json!(["fine", 7]);
        let violations = validate(&doc, response_schema()).unwrap_err();
        let mut paths: Vec<_> = violations.iter().map(|v| v.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["$.keyStrengths[1]", "$.overallSummary"]);
        let summary = violations
            .iter()
            .find(|v| v.path == "$.overallSummary")
            .unwrap();
        assert_eq!(summary.message, "expected STRING, found number");
    }

    #[test]
    fn test_nested_suggestion_missing_reasoning() {
        let mut doc = valid_document();
        doc["actionableSuggestions"] = json!([{"suggestion": "Add breaks"}]);
        let violations = validate(&doc, response_schema()).unwrap_err();
        assert_eq!(violations[0].path, "$.actionableSuggestions[0].reasoning");
    }

    #[test]
    fn test_non_nullable_null_rejected() {
        let mut doc = valid_document();
        doc["overallSummary"] = Value::Null;
        let violations = validate(&doc, response_schema()).unwrap_err();
        assert_eq!(violations[0].message, "null is not allowed");
    }

    #[test]
    fn test_root_must_be_object() {
        let violations = validate(&json!([1, 2]), response_schema()).unwrap_err();
        assert_eq!(violations[0].path, "$");
    }

    #[test]
    fn test_extra_properties_are_tolerated() {
        let mut doc = valid_document();
        doc["confidence"] = json!("high");
        assert!(validate(&doc, response_schema()).is_ok());
    }
}
