//! Bakes an optional `GETVERSE_ROOT_HINT` into the binary as the last-resort
//! verses root. The hint may name a checkout holding `public/verses` or the
//! verses directory itself.

use std::env;
use std::path::{Path, PathBuf};

const HINT_VAR: &str = "GETVERSE_ROOT_HINT";
const BUNDLED_VERSES: &str = "public/verses";

fn main() {
    println!("cargo:rerun-if-env-changed={HINT_VAR}");
    println!("cargo:rerun-if-changed=build.rs");

    let Some(raw) = env::var_os(HINT_VAR) else {
        return;
    };
    let raw = PathBuf::from(raw.to_string_lossy().trim());
    if raw.as_os_str().is_empty() {
        return;
    }

    match verses_dir(&raw) {
        Some(dir) => println!("cargo:rustc-env={HINT_VAR}={}", dir.display()),
        None => println!(
            "cargo:warning={HINT_VAR}={} is not a verses directory or a checkout containing {BUNDLED_VERSES}; ignoring",
            raw.display()
        ),
    }
}

fn verses_dir(hint: &Path) -> Option<PathBuf> {
    let hint = hint.canonicalize().ok()?;
    let bundled = hint.join(BUNDLED_VERSES);
    if bundled.is_dir() {
        return Some(bundled);
    }
    hint.is_dir().then_some(hint)
}
