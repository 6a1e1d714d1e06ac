//! Typed failures surfaced by the store, the runtime and the passage helpers.
//!
//! Per-file problems during a load are never errors here; they are collected
//! into a [`crate::LoadReport`] instead. These types cover what a caller has
//! to react to.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a store at all.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The root directory is missing or cannot be listed.
    #[error("verses root {} is not readable: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundled verse schema could not be compiled.
    #[error("verse schema unavailable: {0}")]
    Schema(String),
}

/// Query against a loaded store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The language was not discovered at load time.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    /// The language exists but holds no verse with this id.
    #[error("unknown verse '{id}' in language '{language}'")]
    UnknownVerse { language: String, id: String },
}

/// Startup failure of the runtime loader.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No language directory produced a single valid record.
    #[error("no verses loaded from {} ({issues} load issue(s))", .root.display())]
    EmptyStore { root: PathBuf, issues: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}
