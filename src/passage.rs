//! Paste-ready text for a reference.
//!
//! Each verse contributes the selected layers (the verse body and/or string
//! metadata such as a second script), one per line. Verses are separated by a
//! blank line and the whole passage ends with a citation suffix.

use crate::error::QueryError;
use crate::reference::Reference;
use crate::store::VerseStore;
use thiserror::Error;

/// Layer name that selects the verse `text` itself.
pub const TEXT_LAYER: &str = "text";

/// Layers selected out of the box: the Arabic script above the verse body.
pub const DEFAULT_LAYERS: &[&str] = &["arabic", TEXT_LAYER];

/// Citation label used when none is configured.
pub const DEFAULT_CITATION_LABEL: &str = "அல்குர்ஆன்";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassageError {
    #[error("select at least one layer to include")]
    NothingSelected,
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageOptions {
    /// Layers in output order; `text` is the verse body, anything else is a
    /// metadata key.
    pub layers: Vec<String>,
    pub citation_label: String,
}

impl Default for PassageOptions {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            citation_label: DEFAULT_CITATION_LABEL.to_string(),
        }
    }
}

pub fn default_layers() -> Vec<String> {
    DEFAULT_LAYERS.iter().map(|layer| layer.to_string()).collect()
}

/// Compose the passage for `reference` from `language`.
///
/// Fails on the first verse of the range that the language does not define.
pub fn compose(
    store: &VerseStore,
    language: &str,
    reference: &Reference,
    options: &PassageOptions,
) -> Result<String, PassageError> {
    if options.layers.is_empty() {
        return Err(PassageError::NothingSelected);
    }

    let mut segments = Vec::new();
    for verse in reference.verses() {
        let record = store.verse(language, &reference.verse_id(verse))?;
        let mut lines: Vec<String> = Vec::new();
        for layer in &options.layers {
            if layer == TEXT_LAYER {
                let body = record.text.joined();
                if !body.is_empty() {
                    lines.push(body);
                }
            } else if let Some(value) = record.layer(layer) {
                lines.push(value.to_string());
            }
        }
        let body = lines.join("\n");
        let body = body.trim();
        if !body.is_empty() {
            segments.push(body.to_string());
        }
    }

    let content = segments.join("\n\n");
    let suffix = format!(" ({}: {})", options.citation_label, reference);
    Ok(format!("{}{}", content.trim(), suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, VerseStore) {
        let temp = TempDir::new().unwrap();
        let write = |rel: &str, contents: &str| {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        };
        write(
            "tamil/1-1.json",
            r#"{"id":"1:1","text":"tamil one","arabic":"arabic one","number":1}"#,
        );
        write(
            "tamil/1-2.json",
            r#"{"id":"1:2","text":["tamil", "two"],"arabic":"arabic two","number":2}"#,
        );
        write(
            "tamil/1-3.json",
            r#"{"id":"1:3","text":"","arabic":"","number":3}"#,
        );
        let store = VerseStore::load(Path::new(temp.path())).unwrap().store;
        (temp, store)
    }

    #[test]
    fn single_verse_gets_citation_suffix() {
        let (_temp, store) = fixture();
        let text = compose(
            &store,
            "tamil",
            &Reference::single(1, 1),
            &PassageOptions::default(),
        )
        .unwrap();
        assert_eq!(text, "arabic one\ntamil one (அல்குர்ஆன்: 1:1)");
    }

    #[test]
    fn default_layers_skip_a_missing_script() {
        let (temp, _) = fixture();
        fs::write(
            temp.path().join("tamil/1-4.json"),
            r#"{"id":"1:4","text":"tamil four","number":4}"#,
        )
        .unwrap();
        let store = VerseStore::load(temp.path()).unwrap().store;
        let text = compose(
            &store,
            "tamil",
            &Reference::single(1, 4),
            &PassageOptions::default(),
        )
        .unwrap();
        assert_eq!(text, "tamil four (அல்குர்ஆன்: 1:4)");
    }

    #[test]
    fn range_joins_layers_in_order() {
        let (_temp, store) = fixture();
        let options = PassageOptions {
            layers: vec!["arabic".into(), TEXT_LAYER.into()],
            citation_label: "Quran".into(),
        };
        let text = compose(&store, "tamil", &Reference::parse("1:1-3").unwrap(), &options).unwrap();
        assert_eq!(
            text,
            "arabic one\ntamil one\n\narabic two\ntamil\ntwo (Quran: 1:1-3)"
        );
    }

    #[test]
    fn empty_bodies_leave_only_the_suffix() {
        let (_temp, store) = fixture();
        let text = compose(
            &store,
            "tamil",
            &Reference::single(1, 3),
            &PassageOptions::default(),
        )
        .unwrap();
        assert_eq!(text, " (அல்குர்ஆன்: 1:3)");
    }

    #[test]
    fn missing_verse_and_empty_selection_fail() {
        let (_temp, store) = fixture();
        let err = compose(
            &store,
            "tamil",
            &Reference::parse("1:2-5").unwrap(),
            &PassageOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PassageError::Query(QueryError::UnknownVerse {
                language: "tamil".into(),
                id: "1:4".into()
            })
        );

        let none = PassageOptions {
            layers: Vec::new(),
            ..PassageOptions::default()
        };
        assert_eq!(
            compose(&store, "tamil", &Reference::single(1, 1), &none),
            Err(PassageError::NothingSelected)
        );
    }
}
