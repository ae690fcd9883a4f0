use std::fmt;

/// Semantic type of a version attribute as it appears in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
    TextList,
    Mapping,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Flag => "boolean",
            FieldKind::TextList => "list of strings",
            FieldKind::Mapping => "mapping",
        }
    }

    /// The documented default for every field of this kind.
    pub fn default_value(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Flag => Value::Bool(false),
            FieldKind::TextList => Value::Array(Vec::new()),
            FieldKind::Mapping => Value::Object(serde_json::Map::new()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value of the wrong type was offered to a version attribute.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}' expects a {expected}")]
pub struct ValidationError {
    field: &'static str,
    expected: FieldKind,
}

impl ValidationError {
    pub fn new(field: &'static str, expected: FieldKind) -> Self {
        Self { field, expected }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn expected(&self) -> FieldKind {
        self.expected
    }
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum SignaturesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("breed index {index} is out of range ({len} breeds)")]
    BreedIndex { index: usize, len: usize },
    #[error("entry index {index} of '{field}' is out of range ({len} entries)")]
    EntryIndex {
        field: &'static str,
        index: usize,
        len: usize,
    },
    #[error("version '{version}' not found in breed '{breed}'")]
    VersionNotFound { breed: String, version: String },
    #[error("source '{locator}' unavailable: {reason}")]
    SourceUnavailable { locator: String, reason: String },
    #[error("destination '{target}' unavailable: {reason}")]
    DestinationUnavailable { target: String, reason: String },
    #[error("malformed signatures document: {0}")]
    MalformedDocument(String),
}

impl SignaturesError {
    pub(crate) fn source_unavailable(locator: &str, reason: impl fmt::Display) -> Self {
        SignaturesError::SourceUnavailable {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn destination_unavailable(target: &str, reason: impl fmt::Display) -> Self {
        SignaturesError::DestinationUnavailable {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }
}
