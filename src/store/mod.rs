//! Verse store wiring.
//!
//! This module wraps the verse tree on disk (for example
//! `public/verses/tamil/1.json`) so callers can load a validated snapshot and
//! query it by language and id. `VerseStore` owns the records; `LoadReport`
//! carries whatever was skipped along the way.

pub mod index;
pub mod model;
pub mod report;

pub use index::{DATA_EXTENSION, LoadOutcome, VerseStore};
pub use model::{Language, Metadata, ORDER_FIELD, VerseRecord, VerseText};
pub use report::{IssueKind, LoadIssue, LoadReport, Severity};

/// Default location of the verse tree relative to a resource directory.
pub const DEFAULT_VERSES_DIR: &str = "public/verses";
