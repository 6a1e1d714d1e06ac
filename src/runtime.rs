//! Process-level entry point over a loaded store.
//!
//! `Runtime::start` is the only way to build one: it loads the tree, logs the
//! load report once, and refuses to come up when nothing usable was found.
//! The handle is passed down explicitly; nothing here is global.

use crate::error::{QueryError, RuntimeError};
use crate::passage::{self, PassageError, PassageOptions};
use crate::reference::Reference;
use crate::store::{LoadReport, Severity, VerseRecord, VerseStore};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Runtime {
    store: VerseStore,
    report: LoadReport,
}

impl Runtime {
    /// Load `root` and come up with whatever subset of it is valid.
    ///
    /// Fails with [`RuntimeError::EmptyStore`] when no language yielded a
    /// single record.
    pub fn start(root: &Path) -> Result<Self, RuntimeError> {
        let outcome = VerseStore::load(root)?;
        for issue in outcome.report.issues() {
            match issue.severity {
                Severity::Error => warn!("skipped {issue}"),
                Severity::Warning => debug!("ignored {issue}"),
            }
        }

        if outcome.store.is_empty() {
            return Err(RuntimeError::EmptyStore {
                root: root.to_path_buf(),
                issues: outcome.report.len(),
            });
        }

        info!(
            root = %root.display(),
            languages = outcome.store.languages().len(),
            verses = outcome.store.len(),
            issues = outcome.report.len(),
            "verse store ready"
        );
        Ok(Self {
            store: outcome.store,
            report: outcome.report,
        })
    }

    pub fn store(&self) -> &VerseStore {
        &self.store
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn languages(&self) -> Vec<&str> {
        self.store.languages()
    }

    pub fn verses(&self, language: &str) -> Result<Vec<&str>, QueryError> {
        self.store.verses(language)
    }

    pub fn verse(&self, language: &str, id: &str) -> Result<&VerseRecord, QueryError> {
        self.store.verse(language, id)
    }

    pub fn passage(
        &self,
        language: &str,
        reference: &Reference,
        options: &PassageOptions,
    ) -> Result<String, PassageError> {
        passage::compose(&self.store, language, reference, options)
    }
}
