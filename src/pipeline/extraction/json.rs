use std::path::Path;

use serde_json::Value;

use super::types::ExtractedText;
use super::ExtractionError;
use crate::models::ExtractionMethod;

/// Extract the textual content of a JSON document by collecting every
/// string leaf, joined by newlines. Object keys are walked in sorted order
/// and array elements in index order, so the result is deterministic for a
/// given file.
pub fn extract_json(path: &Path) -> Result<ExtractedText, ExtractionError> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value =
        serde_json::from_str(&raw).map_err(|e| ExtractionError::MalformedJson(e.to_string()))?;

    let mut leaves = Vec::new();
    collect_string_leaves(&value, &mut leaves);

    if leaves.is_empty() {
        return Err(ExtractionError::NoStringContent);
    }

    Ok(ExtractedText {
        text: leaves.join("\n"),
        method: ExtractionMethod::JsonFlatten,
        confidence: None,
    })
}

fn collect_string_leaves(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_string_leaves(item, out);
            }
        }
        Value::Object(map) => {
            for (_key, item) in map {
                collect_string_leaves(item, out);
            }
        }
        // Numbers, booleans, and nulls carry no narrative text
        _ => {}
    }
}
