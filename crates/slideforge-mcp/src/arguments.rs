//! Strict argument parsing for tool calls.
//!
//! Arguments are checked against the tool's `inputSchema` before typed
//! deserialization. Every violation is reported, not just the first.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use jsonschema::{Draft, Validator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use slideforge_core::{Error, Result};

use crate::protocol::ToolDefinition;

/// Validate `arguments` against `tool`'s schema and deserialize them.
///
/// Missing arguments are treated as an empty object.
pub fn parse<T: DeserializeOwned>(tool: &ToolDefinition, arguments: Option<Value>) -> Result<T> {
    let arguments = arguments.unwrap_or_else(|| Value::Object(Map::new()));

    if !arguments.is_object() {
        return Err(Error::invalid_argument(
            &tool.name,
            format!("arguments must be an object, got {}", type_name(&arguments)),
        ));
    }

    let violations = violations(tool, &arguments)?;
    if !violations.is_empty() {
        tracing::debug!(tool = %tool.name, count = violations.len(), "Rejected tool arguments");
        return Err(Error::InvalidArguments {
            tool: tool.name.clone(),
            violations,
        });
    }

    serde_json::from_value(arguments).map_err(|e| Error::invalid_argument(&tool.name, e.to_string()))
}

/// Every schema violation in `arguments`, in the order the validator reports them.
fn violations(tool: &ToolDefinition, arguments: &Value) -> Result<Vec<String>> {
    let validator = compiled_validator(tool)?;

    Ok(validator
        .iter_errors(arguments)
        .map(|err| {
            let path = err.instance_path.to_string();
            if path.is_empty() {
                err.to_string()
            } else {
                format!("at {}: {}", path, err)
            }
        })
        .collect())
}

/// Compiled validator for `tool`, built once per distinct schema.
fn compiled_validator(tool: &ToolDefinition) -> Result<Arc<Validator>> {
    static VALIDATORS: OnceLock<Mutex<HashMap<String, Arc<Validator>>>> = OnceLock::new();

    let key = tool.input_schema.to_string();
    let mut cache = VALIDATORS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .map_err(|_| Error::Other(anyhow::anyhow!("schema validator cache is poisoned")))?;

    if let Some(existing) = cache.get(&key) {
        return Ok(Arc::clone(existing));
    }

    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&tool.input_schema)
        .map_err(|e| Error::Other(anyhow::anyhow!("invalid schema for '{}': {}", tool.name, e)))?;
    let compiled = Arc::new(compiled);
    cache.insert(key, Arc::clone(&compiled));
    Ok(compiled)
}

/// Deserialize an optional integer argument, saturating at the `i64` bounds.
///
/// The schema accepts any JSON integer, including ones written as floats
/// (`30.0`) or too large for `i64` (`1e20`).
pub fn saturating_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Number>::deserialize(deserializer)?.map(|n| saturate(&n)))
}

fn saturate(number: &Number) -> i64 {
    if let Some(n) = number.as_i64() {
        n
    } else if number.as_u64().is_some() {
        i64::MAX
    } else {
        // Float to int casts saturate and map NaN to zero.
        number.as_f64().map(|f| f as i64).unwrap_or_default()
    }
}

fn type_name(value: &Value) -> &'static str {
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
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    struct OutlineArgs {
        topic: String,
        duration_minutes: Option<i64>,
    }

    fn outline_tool() -> ToolDefinition {
        ToolDefinition {
            name: "generate-outline".to_string(),
            description: "test".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": { "type": "string" },
                    "durationMinutes": { "type": "integer" }
                },
                "required": ["topic"],
                "additionalProperties": false
            }),
        }
    }

    fn violations_of(err: Error) -> Vec<String> {
        match err {
            Error::InvalidArguments { violations, .. } => violations,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_valid_arguments() {
        let args: OutlineArgs = parse(
            &outline_tool(),
            Some(json!({"topic": "Rust", "durationMinutes": 20})),
        )
        .unwrap();
        assert_eq!(args.topic, "Rust");
        assert_eq!(args.duration_minutes, Some(20));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let err = parse::<OutlineArgs>(
            &outline_tool(),
            Some(json!({"durationMinutes": "ten", "extra": true})),
        )
        .unwrap_err();

        let violations = violations_of(err);
        assert_eq!(violations.len(), 3, "{violations:?}");
        assert!(violations.iter().any(|v| v.contains("topic")));
        assert!(violations.iter().any(|v| v.contains("/durationMinutes")));
        assert!(violations.iter().any(|v| v.contains("extra")));
    }

    #[test]
    fn test_missing_arguments_are_an_empty_object() {
        let err = parse::<OutlineArgs>(&outline_tool(), None).unwrap_err();
        let violations = violations_of(err);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("topic"));
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DurationArgs {
        #[serde(default, deserialize_with = "saturating_integer")]
        duration_minutes: Option<i64>,
    }

    fn duration_of(value: Value) -> Option<i64> {
        serde_json::from_value::<DurationArgs>(value)
            .unwrap()
            .duration_minutes
    }

    #[test]
    fn test_integer_arguments_saturate() {
        assert_eq!(duration_of(json!({})), None);
        assert_eq!(duration_of(json!({"durationMinutes": null})), None);
        assert_eq!(duration_of(json!({"durationMinutes": 30})), Some(30));
        assert_eq!(duration_of(json!({"durationMinutes": 30.0})), Some(30));
        assert_eq!(duration_of(json!({"durationMinutes": -5})), Some(-5));
        assert_eq!(duration_of(json!({"durationMinutes": u64::MAX})), Some(i64::MAX));
        assert_eq!(duration_of(json!({"durationMinutes": 1e20})), Some(i64::MAX));
        assert_eq!(duration_of(json!({"durationMinutes": -1e20})), Some(i64::MIN));
    }

    #[test]
    fn test_validator_is_reused_for_the_same_schema() {
        let tool = outline_tool();
        let first = compiled_validator(&tool).unwrap();
        let second = compiled_validator(&tool).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = parse::<OutlineArgs>(&outline_tool(), Some(json!(["Rust"]))).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid arguments for 'generate-outline'"));
        assert!(message.contains("got array"));
    }
}
