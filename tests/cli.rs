// End-to-end behavior of the getverse binary.
mod support;

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use support::{VerseTree, getverse, run_command, stdout_lines};

fn sample_tree() -> VerseTree {
    let tree = VerseTree::new();
    tree.write(
        "tamil/1.json",
        r#"{"id":"1:1","text":"tamil one","arabic":"arabic one","number":1}"#,
    );
    tree.write(
        "tamil/2.json",
        r#"{"id":"1:2","text":"tamil two","arabic":"arabic two","number":2}"#,
    );
    tree.verse("english", "1.json", "1:1", "english one");
    tree
}

#[test]
fn lists_languages_and_verses() -> Result<()> {
    let tree = sample_tree();

    let mut cmd = getverse(&tree);
    cmd.arg("--root").arg(tree.root()).arg("languages");
    let output = run_command(cmd)?;
    assert_eq!(stdout_lines(&output), vec!["english", "tamil"]);

    let mut cmd = getverse(&tree);
    cmd.arg("verses").arg("tamil").env("GETVERSE_ROOT", tree.root());
    let output = run_command(cmd)?;
    assert_eq!(stdout_lines(&output), vec!["1:1", "1:2"]);
    Ok(())
}

#[test]
fn show_prints_the_record_as_json() -> Result<()> {
    let tree = sample_tree();
    let mut cmd = getverse(&tree);
    cmd.arg("--root")
        .arg(tree.root())
        .args(["show", "tamil", "1:2"]);
    let output = run_command(cmd)?;
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["id"], "1:2");
    assert_eq!(value["arabic"], "arabic two");
    assert_eq!(value["number"], 2);
    Ok(())
}

#[test]
fn unknown_language_exits_non_zero() -> Result<()> {
    let tree = sample_tree();
    let output = getverse(&tree)
        .arg("--root")
        .arg(tree.root())
        .args(["verses", "sanskrit"])
        .output()
        .context("failed to run getverse")?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown language 'sanskrit'"), "{stderr}");
    Ok(())
}

#[test]
fn empty_root_exits_non_zero() -> Result<()> {
    let tree = VerseTree::new();
    let output = getverse(&tree)
        .arg("--root")
        .arg(tree.root())
        .arg("languages")
        .output()
        .context("failed to run getverse")?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no verses loaded"), "{stderr}");
    Ok(())
}

#[test]
fn passage_uses_flags_over_defaults() -> Result<()> {
    let tree = sample_tree();

    let mut cmd = getverse(&tree);
    cmd.arg("--root").arg(tree.root()).args(["passage", "1:1"]);
    let output = run_command(cmd)?;
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "arabic one\ntamil one (அல்குர்ஆன்: 1:1)\n"
    );

    let mut cmd = getverse(&tree);
    cmd.arg("--root").arg(tree.root()).args(["passage", "1:1", "--no-text"]);
    let output = run_command(cmd)?;
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "arabic one (அல்குர்ஆன்: 1:1)\n"
    );

    let mut cmd = getverse(&tree);
    cmd.arg("--root").arg(tree.root()).args([
        "passage", "1.1-2", "--layer", "arabic", "--layer", "text", "--label", "Quran",
    ]);
    let output = run_command(cmd)?;
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "arabic one\ntamil one\n\narabic two\ntamil two (Quran: 1:1-2)\n"
    );
    Ok(())
}

#[test]
fn passage_rejects_bad_references() -> Result<()> {
    let tree = sample_tree();
    let output = getverse(&tree)
        .arg("--root")
        .arg(tree.root())
        .args(["passage", "1:2-2:3"])
        .output()
        .context("failed to run getverse")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cross-chapter"));
    Ok(())
}

#[test]
fn check_reports_issues_and_strict_fails() -> Result<()> {
    let tree = sample_tree();
    tree.write("tamil/3.json", "{ broken");

    let mut cmd = getverse(&tree);
    cmd.arg("--root").arg(tree.root()).arg("check");
    let output = run_command(cmd)?;
    let report: Value = serde_json::from_slice(&output.stdout)?;
    let entries = report.as_array().context("report should be an array")?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["kind"], "parse");

    let output = getverse(&tree)
        .arg("--root")
        .arg(tree.root())
        .args(["check", "--strict"])
        .output()
        .context("failed to run getverse check --strict")?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn settings_persist_between_runs() -> Result<()> {
    let tree = sample_tree();

    let mut cmd = getverse(&tree);
    cmd.args(["settings", "set", "--verses-root"])
        .arg(tree.root())
        .args(["--language", "english", "--label", "Ref"]);
    run_command(cmd)?;

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(tree.config_dir().join("settings.json"))?)?;
    assert_eq!(saved["default_language"], "english");

    let mut cmd = getverse(&tree);
    cmd.args(["passage", "1:1"]);
    let output = run_command(cmd)?;
    assert_eq!(String::from_utf8(output.stdout)?, "english one (Ref: 1:1)\n");
    Ok(())
}
