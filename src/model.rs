//! Document model builder
//!
//! Normalizes raw parsed YAML into [`ReusableWorkflow`] records: fills
//! defaults for absent optional fields, drops nameless interface entries
//! with a warning, and derives the workflow name from the declared
//! `name:` or the file stem.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::warn;

use crate::workflow::{InputSpec, OutputSpec, ReusableWorkflow, SecretSpec};

#[derive(Debug, Default, Deserialize)]
struct RawInput {
    #[serde(default)]
    description: String,
    #[serde(default, rename = "type")]
    input_type: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    default: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutput {
    #[serde(default)]
    description: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawSecret {
    #[serde(default)]
    description: String,
    #[serde(default)]
    required: bool,
}

/// Build a [`ReusableWorkflow`] from a parsed workflow document.
///
/// Returns `None` when the file declares no `workflow_call` trigger;
/// that is an exclusion, not an error.
pub fn build_workflow(source_path: &str, doc: &Value) -> Option<ReusableWorkflow> {
    let call = workflow_call_trigger(doc)?;

    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| file_stem(source_path));

    let description = doc
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(ReusableWorkflow {
        name,
        source_path: source_path.to_string(),
        description,
        inputs: build_entries(source_path, call.get("inputs"), build_input),
        outputs: build_entries(source_path, call.get("outputs"), build_output),
        secrets: build_entries(source_path, call.get("secrets"), build_secret),
    })
}

/// Locate the `workflow_call` trigger block.
///
/// YAML 1.1 parsers resolve a bare `on:` key to boolean `true`, so both
/// keys are probed. A bare `workflow_call:` (null body) still counts as
/// a trigger with an empty interface.
fn workflow_call_trigger(doc: &Value) -> Option<&Value> {
    static NULL_TRIGGER: Value = Value::Null;

    let mapping = doc.as_mapping()?;
    let on = mapping
        .get(&Value::String("on".to_string()))
        .or_else(|| mapping.get(&Value::Bool(true)))?;

    match on {
        Value::Mapping(triggers) => {
            triggers.get(&Value::String("workflow_call".to_string()))
        }
        // `on: workflow_call` shorthand
        Value::String(s) if s == "workflow_call" => Some(&NULL_TRIGGER),
        // `on: [push, workflow_call]` list form
        Value::Sequence(items) => items
            .iter()
            .find(|v| v.as_str() == Some("workflow_call"))
            .map(|_| &NULL_TRIGGER),
        _ => None,
    }
}

fn build_entries<T>(
    source_path: &str,
    section: Option<&Value>,
    build: fn(&str, &Value) -> Option<T>,
) -> Vec<T> {
    let Some(Value::Mapping(entries)) = section else {
        return Vec::new();
    };

    // serde_yaml mappings are insertion-ordered, so declaration order
    // survives into the rendered tables.
    entries
        .iter()
        .filter_map(|(key, value)| match key.as_str() {
            Some(name) if !name.is_empty() => build(name, value),
            _ => {
                warn!(file = source_path, "Dropping interface entry without a name");
                None
            }
        })
        .collect()
}

fn build_input(name: &str, value: &Value) -> Option<InputSpec> {
    let raw: RawInput = deserialize_entry(name, value)?;
    Some(InputSpec {
        name: name.to_string(),
        description: raw.description,
        input_type: raw.input_type.unwrap_or_else(|| "string".to_string()),
        required: raw.required,
        default: raw.default.as_ref().and_then(scalar_to_string),
    })
}

fn build_output(name: &str, value: &Value) -> Option<OutputSpec> {
    let raw: RawOutput = deserialize_entry(name, value)?;
    Some(OutputSpec {
        name: name.to_string(),
        description: raw.description,
        value: raw.value,
    })
}

fn build_secret(name: &str, value: &Value) -> Option<SecretSpec> {
    let raw: RawSecret = deserialize_entry(name, value)?;
    Some(SecretSpec {
        name: name.to_string(),
        description: raw.description,
        required: raw.required,
    })
}

fn deserialize_entry<T: Default + for<'de> Deserialize<'de>>(
    name: &str,
    value: &Value,
) -> Option<T> {
    // `env:` with no body is a valid declaration with all defaults
    if value.is_null() {
        return Some(T::default());
    }
    match serde_yaml::from_value(value.clone()) {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!(entry = name, error = %err, "Dropping malformed interface entry");
            None
        }
    }
}

/// Render a YAML scalar default as display text. Null means no default.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => serde_json::to_string(other).ok(),
    }
}

fn file_stem(source_path: &str) -> String {
    Path::new(source_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source_path)
        .to_string()
}
