#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// Temporary verses root plus an isolated config directory, removed on drop.
pub struct VerseTree {
    dir: TempDir,
}

impl VerseTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp verses tree");
        fs::create_dir_all(dir.path().join("verses")).expect("failed to create verses root");
        fs::create_dir_all(dir.path().join("config")).expect("failed to create config dir");
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("verses")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    pub fn verse(&self, language: &str, file: &str, id: &str, text: &str) -> PathBuf {
        let body = serde_json::json!({"id": id, "text": text});
        self.write(&format!("{language}/{file}"), &body.to_string())
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).expect("failed to create fixture directory");
        path
    }
}

// The getverse binary with settings isolated to the tree's config dir.
pub fn getverse(tree: &VerseTree) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_getverse"));
    cmd.env("GETVERSE_CONFIG_DIR", tree.config_dir())
        .env_remove("GETVERSE_ROOT")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_command(cmd: Command) -> Result<Output> {
    let mut cmd = cmd;
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
