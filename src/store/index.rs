//! In-memory verse store built from `<root>/<language>/<file>.json`.
//!
//! Loading is partial-success: every file is parsed on its own and anything
//! wrong with it lands in the [`LoadReport`] while the rest of the tree still
//! loads. Duplicate ids are resolved first-wins in sorted filename order. Once
//! built, the store has no mutation path.

use crate::error::{QueryError, StoreError};
use crate::schema_loader::VerseSchema;
use crate::store::model::{Language, VerseRecord, value_kind};
use crate::store::report::{IssueKind, LoadReport};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File extension recognized as verse data (compared case-insensitively).
pub const DATA_EXTENSION: &str = "json";

const UTF8_BOM: char = '\u{feff}';

/// Read-only collection of verse records keyed by language.
#[derive(Debug)]
pub struct VerseStore {
    root: PathBuf,
    languages: BTreeMap<Language, LanguageDir>,
}

/// Store plus the issues collected while building it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub store: VerseStore,
    pub report: LoadReport,
}

#[derive(Debug, Default)]
struct LanguageDir {
    by_id: BTreeMap<String, Entry>,
    order: Vec<String>,
}

#[derive(Debug)]
struct Entry {
    record: VerseRecord,
    source: PathBuf,
}

impl VerseStore {
    /// Scan `root` and parse every verse file beneath its language directories.
    ///
    /// Only an unreadable root (or an unusable bundled schema) fails the call;
    /// everything else is reported per file.
    pub fn load(root: &Path) -> Result<LoadOutcome, StoreError> {
        let schema =
            VerseSchema::bundled().map_err(|err| StoreError::Schema(format!("{err:#}")))?;
        let mut report = LoadReport::default();
        let entries =
            sorted_entries(root, &mut report).map_err(|source| StoreError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            })?;

        let mut languages = BTreeMap::new();

        for (name, path) in entries {
            if is_hidden(&name) {
                continue;
            }
            if !path.is_dir() {
                report.record(&path, IssueKind::Ignored, "not a language directory");
                continue;
            }
            let Some(name) = name.to_str() else {
                report.record(&path, IssueKind::Ignored, "directory name is not valid UTF-8");
                continue;
            };
            let Some(dir) = load_language(&path, &schema, &mut report) else {
                continue;
            };
            debug!(
                language = name,
                verses = dir.order.len(),
                "loaded language directory"
            );
            languages.insert(Language::from(name), dir);
        }

        Ok(LoadOutcome {
            store: VerseStore {
                root: root.to_path_buf(),
                languages,
            },
            report,
        })
    }

    /// Root directory the store was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Language names in lexicographic order.
    pub fn languages(&self) -> Vec<&str> {
        self.languages.keys().map(Language::as_str).collect()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(&Language::from(language))
    }

    /// Verse ids of `language`, by `number` when every record has one and by
    /// id otherwise.
    pub fn verses(&self, language: &str) -> Result<Vec<&str>, QueryError> {
        let dir = self.language(language)?;
        Ok(dir.order.iter().map(String::as_str).collect())
    }

    pub fn verse(&self, language: &str, id: &str) -> Result<&VerseRecord, QueryError> {
        let dir = self.language(language)?;
        dir.by_id
            .get(id)
            .map(|entry| &entry.record)
            .ok_or_else(|| QueryError::UnknownVerse {
                language: language.to_string(),
                id: id.to_string(),
            })
    }

    /// File the record for `(language, id)` was parsed from.
    pub fn source_of(&self, language: &str, id: &str) -> Option<&Path> {
        self.languages
            .get(&Language::from(language))?
            .by_id
            .get(id)
            .map(|entry| entry.source.as_path())
    }

    /// Total number of records across all languages.
    pub fn len(&self) -> usize {
        self.languages.values().map(|dir| dir.by_id.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn language(&self, language: &str) -> Result<&LanguageDir, QueryError> {
        self.languages
            .get(&Language::from(language))
            .ok_or_else(|| QueryError::UnknownLanguage(language.to_string()))
    }
}

fn load_language(dir: &Path, schema: &VerseSchema, report: &mut LoadReport) -> Option<LanguageDir> {
    let entries = match sorted_entries(dir, report) {
        Ok(entries) => entries,
        Err(err) => {
            report.record(dir, IssueKind::Unreadable, format!("listing directory: {err}"));
            return None;
        }
    };

    let mut language = LanguageDir::default();
    let mut field_kinds: BTreeMap<String, &'static str> = BTreeMap::new();

    for (name, path) in entries {
        if is_hidden(&name) {
            continue;
        }
        if path.is_dir() {
            report.record(&path, IssueKind::Ignored, "nested directories are not scanned");
            continue;
        }
        if !has_data_extension(&path) {
            report.record(
                &path,
                IssueKind::Ignored,
                format!("not a .{DATA_EXTENSION} file"),
            );
            continue;
        }

        let record = match parse_file(&path, schema) {
            Ok(record) => record,
            Err((kind, reason)) => {
                trace!(path = %path.display(), reason = %reason, "skipping verse file");
                report.record(&path, kind, reason);
                continue;
            }
        };

        if let Some(existing) = language.by_id.get(&record.id) {
            report.record(
                &path,
                IssueKind::DuplicateId,
                format!(
                    "id '{}' already defined by {}",
                    record.id,
                    existing.source.display()
                ),
            );
            continue;
        }

        if let Err(reason) = check_field_kinds(&record, &field_kinds) {
            report.record(&path, IssueKind::Schema, reason);
            continue;
        }
        for (key, value) in &record.metadata {
            if let Some(kind) = value_kind(value) {
                field_kinds.entry(key.clone()).or_insert(kind);
            }
        }

        language.by_id.insert(
            record.id.clone(),
            Entry {
                record,
                source: path,
            },
        );
    }

    language.order = ordered_ids(&language.by_id);
    Some(language)
}

fn parse_file(path: &Path, schema: &VerseSchema) -> Result<VerseRecord, (IssueKind, String)> {
    let bytes = fs::read(path).map_err(|err| (IssueKind::Unreadable, format!("reading: {err}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|err| (IssueKind::Unreadable, format!("invalid UTF-8: {err}")))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&text);

    let document: Value = serde_json::from_str(text)
        .map_err(|err| (IssueKind::Parse, format!("malformed JSON: {err}")))?;
    schema
        .check(&document)
        .map_err(|violations| (IssueKind::Schema, violations.join("; ")))?;
    serde_json::from_value(document).map_err(|err| (IssueKind::Schema, err.to_string()))
}

fn check_field_kinds(
    record: &VerseRecord,
    field_kinds: &BTreeMap<String, &'static str>,
) -> Result<(), String> {
    for (key, value) in &record.metadata {
        let (Some(kind), Some(expected)) = (value_kind(value), field_kinds.get(key)) else {
            continue;
        };
        if kind != *expected {
            return Err(format!(
                "field '{key}' is {kind} here but {expected} in earlier files"
            ));
        }
    }
    Ok(())
}

fn ordered_ids(by_id: &BTreeMap<String, Entry>) -> Vec<String> {
    let numbered: Option<Vec<(u64, &String)>> = by_id
        .iter()
        .map(|(id, entry)| entry.record.number().map(|n| (n, id)))
        .collect();
    match numbered {
        Some(mut numbered) if !numbered.is_empty() => {
            numbered.sort();
            numbered.into_iter().map(|(_, id)| id.clone()).collect()
        }
        _ => by_id.keys().cloned().collect(),
    }
}

/// Lists `dir` sorted by file name. Only failing to open the directory is an
/// error; an entry that cannot be read is reported and skipped.
fn sorted_entries(
    dir: &Path,
    report: &mut LoadReport,
) -> io::Result<Vec<(OsString, PathBuf)>> {
    let listing = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| (entry.file_name(), entry.path())));
    Ok(collect_entries(dir, listing, report))
}

fn collect_entries(
    dir: &Path,
    listing: impl Iterator<Item = io::Result<(OsString, PathBuf)>>,
    report: &mut LoadReport,
) -> Vec<(OsString, PathBuf)> {
    let mut entries = Vec::new();
    for entry in listing {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => report.record(
                dir,
                IssueKind::Unreadable,
                format!("reading directory entry: {err}"),
            ),
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn has_data_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DATA_EXTENSION))
}
