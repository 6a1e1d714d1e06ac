//! Non-fatal problems collected during a load pass.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The file or entry was expected to be data and was dropped.
    Error,
    /// The entry was not data at all and was passed over.
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// I/O failure or invalid UTF-8 while reading the file.
    Unreadable,
    /// Malformed JSON.
    Parse,
    /// JSON that does not match the verse-record contract.
    Schema,
    /// A second file reused an id already taken in the same language.
    DuplicateId,
    /// Entry outside the `<root>/<language>/<file>.json` layout.
    Ignored,
}

impl IssueKind {
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::Ignored => Severity::Warning,
            IssueKind::Unreadable | IssueKind::Parse | IssueKind::Schema | IssueKind::DuplicateId => {
                Severity::Error
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::Unreadable => "unreadable",
            IssueKind::Parse => "parse",
            IssueKind::Schema => "schema",
            IssueKind::DuplicateId => "duplicate_id",
            IssueKind::Ignored => "ignored",
        }
    }
}

/// One entry of a [`LoadReport`], tagged with the offending path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadIssue {
    pub path: PathBuf,
    pub kind: IssueKind,
    pub severity: Severity,
    pub reason: String,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {}",
            self.path.display(),
            self.kind.as_str(),
            self.reason
        )
    }
}

/// Issues in the order they were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LoadReport {
    issues: Vec<LoadIssue>,
}

impl LoadReport {
    pub(crate) fn record(&mut self, path: &Path, kind: IssueKind, reason: impl Into<String>) {
        self.issues.push(LoadIssue {
            path: path.to_path_buf(),
            kind,
            severity: kind.severity(),
            reason: reason.into(),
        });
    }

    pub fn issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &LoadIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LoadIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
