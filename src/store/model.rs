//! Serde types for one verse file.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Metadata key whose integer value, when present on every record of a
/// language, orders that language's verses.
pub const ORDER_FIELD: &str = "number";

/// Opaque pass-through keys of a verse file (everything except `id`/`text`).
pub type Metadata = BTreeMap<String, Value>;

/// Language directory name, unique within a store root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(pub String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        Language(value.to_string())
    }
}

/// Verse body as written in the file: one string or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerseText {
    Single(String),
    Lines(Vec<String>),
}

impl VerseText {
    /// Lines of the body; a single string is split on newlines.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            VerseText::Single(text) => text.lines().collect(),
            VerseText::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }

    /// Body with lines joined by `\n` and surrounding whitespace trimmed.
    pub fn joined(&self) -> String {
        match self {
            VerseText::Single(text) => text.trim().to_string(),
            VerseText::Lines(lines) => lines.join("\n").trim().to_string(),
        }
    }
}

/// One parsed verse file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub id: String,
    pub text: VerseText,
    #[serde(flatten)]
    pub metadata: Metadata,
}

impl VerseRecord {
    /// Explicit ordering value, if the record carries one.
    ///
    /// Integral floats such as `10.0` count, matching what the schema accepts
    /// as an integer.
    pub fn number(&self) -> Option<u64> {
        let value = self.metadata.get(ORDER_FIELD)?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u64::MAX as f64)
                .map(|n| n as u64)
        })
    }

    /// A metadata value as trimmed text, when it is a non-empty string.
    pub fn layer(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Coarse JSON type of a metadata value, used to keep field types consistent
/// across the files of one language. `None` for `null`.
pub(crate) fn value_kind(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some("boolean"),
        Value::Number(_) => Some("number"),
        Value::String(_) => Some("string"),
        Value::Array(_) => Some("array"),
        Value::Object(_) => Some("object"),
    }
}
