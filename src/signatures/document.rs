//! Conversion between raw text and the nested signatures document
//! (`breed -> version -> attributes`).

use serde_json::{Map, Value};

use super::SignaturesError;

/// How a document is turned back into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    Compact,
    #[default]
    Pretty,
}

/// Parse raw JSON text into a document value.
pub fn parse(raw: &str) -> Result<Value, SignaturesError> {
    serde_json::from_str(raw).map_err(|e| SignaturesError::MalformedDocument(e.to_string()))
}

/// Render a document value as JSON text.
pub fn render(document: &Value, style: RenderStyle) -> Result<String, SignaturesError> {
    let rendered = match style {
        RenderStyle::Compact => serde_json::to_string(document),
        RenderStyle::Pretty => serde_json::to_string_pretty(document),
    };
    rendered.map_err(|e| SignaturesError::MalformedDocument(e.to_string()))
}

/// Borrow the top level as `breed-name -> versions`.
pub fn breeds(document: &Value) -> Result<&Map<String, Value>, SignaturesError> {
    document
        .as_object()
        .ok_or_else(|| SignaturesError::MalformedDocument(format!("top level must be an object, got {}", type_name(document))))
}

/// Borrow a breed entry as `version-name -> fragment`.
pub fn versions<'a>(breed: &str, value: &'a Value) -> Result<&'a Map<String, Value>, SignaturesError> {
    value.as_object().ok_or_else(|| {
        SignaturesError::MalformedDocument(format!("breed '{breed}' must be an object, got {}", type_name(value)))
    })
}

/// Borrow a single version fragment.
pub fn fragment<'a>(breed: &str, version: &str, value: &'a Value) -> Result<&'a Map<String, Value>, SignaturesError> {
    value.as_object().ok_or_else(|| {
        SignaturesError::MalformedDocument(format!(
            "version '{breed}/{version}' must be an object, got {}",
            type_name(value)
        ))
    })
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
