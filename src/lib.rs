pub mod error;
pub mod passage;
pub mod reference;
pub mod runtime;
mod schema_loader;
pub mod settings;
pub mod store;

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub use error::{QueryError, RuntimeError, StoreError};
pub use passage::{PassageError, PassageOptions, compose};
pub use reference::{Reference, ReferenceError};
pub use runtime::Runtime;
pub use schema_loader::{VERSE_RECORD_SCHEMA, VERSE_RECORD_SCHEMA_VERSION};
pub use settings::Settings;
pub use store::{
    DEFAULT_VERSES_DIR, IssueKind, Language, LoadIssue, LoadOutcome, LoadReport, Severity,
    VerseRecord, VerseStore, VerseText,
};

/// Environment variable naming the verse tree to load.
pub const ENV_VERSES_ROOT: &str = "GETVERSE_ROOT";

/// Where the verse root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    Explicit,
    Environment,
    Settings,
    /// `public/verses` next to or above the running executable.
    Bundle,
    BuildHint,
    WorkingDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    pub path: PathBuf,
    pub source: RootSource,
}

/// Inputs for root resolution, gathered from the process by
/// [`resolve_verses_root`] or built directly.
#[derive(Debug, Default, Clone)]
pub struct RootCandidates {
    pub explicit: Option<PathBuf>,
    pub environment: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub exe_dir: Option<PathBuf>,
    pub build_hint: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl RootCandidates {
    pub fn from_process(explicit: Option<&Path>, settings: &Settings) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            environment: env::var_os(ENV_VERSES_ROOT)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            settings: settings.verses_root.clone(),
            exe_dir: env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            build_hint: option_env!("GETVERSE_ROOT_HINT").map(PathBuf::from),
            working_dir: env::current_dir().ok(),
        }
    }

    /// Pick the first usable root. An explicit path is always taken as given;
    /// every other source must name an existing directory.
    pub fn resolve(&self) -> Result<ResolvedRoot> {
        if let Some(path) = &self.explicit {
            return Ok(ResolvedRoot {
                path: path.clone(),
                source: RootSource::Explicit,
            });
        }

        let sourced = [
            (self.environment.clone(), RootSource::Environment),
            (self.settings.clone(), RootSource::Settings),
            (
                self.exe_dir.as_deref().and_then(search_upwards),
                RootSource::Bundle,
            ),
            (
                self.build_hint.as_deref().map(hinted_root),
                RootSource::BuildHint,
            ),
            (
                self.working_dir
                    .as_ref()
                    .map(|dir| dir.join(DEFAULT_VERSES_DIR)),
                RootSource::WorkingDir,
            ),
        ];

        for (candidate, source) in sourced {
            let Some(candidate) = candidate else {
                continue;
            };
            if let Some(path) = existing_dir(&candidate) {
                debug!(root = %path.display(), ?source, "resolved verses root");
                return Ok(ResolvedRoot { path, source });
            }
            if matches!(source, RootSource::Environment | RootSource::Settings) {
                warn!(
                    root = %candidate.display(),
                    ?source,
                    "configured verses root is not a directory; ignoring"
                );
            }
        }

        bail!(
            "Unable to locate the verses directory. Pass --root or set {ENV_VERSES_ROOT} to a directory laid out as <root>/<language>/<verse>.json."
        );
    }
}

/// Resolve the verse root for this process.
pub fn resolve_verses_root(explicit: Option<&Path>, settings: &Settings) -> Result<ResolvedRoot> {
    RootCandidates::from_process(explicit, settings).resolve()
}

fn existing_dir(candidate: &Path) -> Option<PathBuf> {
    if !candidate.is_dir() {
        return None;
    }
    fs::canonicalize(candidate).ok()
}

/// A build hint names either a checkout holding `public/verses` or the verses
/// directory itself.
fn hinted_root(hint: &Path) -> PathBuf {
    let bundled = hint.join(DEFAULT_VERSES_DIR);
    if bundled.is_dir() {
        bundled
    } else {
        hint.to_path_buf()
    }
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        let candidate = dir.join(DEFAULT_VERSES_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
