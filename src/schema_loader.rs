//! Bundled JSON Schema for a single verse file.
//!
//! The schema ships inside the binary so a packaged executable validates the
//! same contract as a source checkout. Callers compile it once per load pass
//! and check each parsed document before it is converted into a record.

use anyhow::{Result, anyhow, bail};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// Raw text of `schema/verse_record.schema.json`.
pub const VERSE_RECORD_SCHEMA: &str = include_str!("../schema/verse_record.schema.json");

/// Schema version the loader was written against.
pub const VERSE_RECORD_SCHEMA_VERSION: &str = "verse_record_v1";

/// Compiled verse-record validator.
pub(crate) struct VerseSchema {
    compiled: JSONSchema,
}

impl VerseSchema {
    /// Compile the bundled schema and confirm its version marker.
    pub(crate) fn bundled() -> Result<Self> {
        let raw: Value = serde_json::from_str(VERSE_RECORD_SCHEMA)
            .map_err(|err| anyhow!("parsing bundled verse schema: {err}"))?;
        Self::compile(&raw)
    }

    pub(crate) fn compile(raw: &Value) -> Result<Self> {
        let schema_version = extract_schema_version(raw, "/schema_version")
            .ok_or_else(|| anyhow!("schema missing schema_version marker"))?;
        if schema_version != VERSE_RECORD_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' does not match expected {}",
                schema_version,
                VERSE_RECORD_SCHEMA_VERSION
            );
        }

        // ValidationError borrows the schema, so flatten it before it escapes.
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(raw)
            .map_err(|err| anyhow!("compiling verse schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Validate one document, returning every violation as a readable line.
    pub(crate) fn check(&self, document: &Value) -> Result<(), Vec<String>> {
        match self.compiled.validate(document) {
            Ok(()) => Ok(()),
            Err(errors) => Err(errors
                .map(|err| {
                    let path = err.instance_path.to_string();
                    if path.is_empty() {
                        err.to_string()
                    } else {
                        format!("{path}: {err}")
                    }
                })
                .collect()),
        }
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
