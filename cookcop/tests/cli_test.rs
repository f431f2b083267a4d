use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RULE: &str = "Chef/Modernize/IncludingMixinShelloutInResources";

fn cookbook() -> Result<TempDir> {
    let temp = TempDir::new()?;
    let root = temp.path();
    fs::create_dir_all(root.join("resources"))?;
    fs::create_dir_all(root.join("recipes"))?;
    fs::write(
        root.join("resources/site.rb"),
        "require 'chef/mixin/shell_out'\nproperty :name, String\n",
    )?;
    fs::write(
        root.join("recipes/default.rb"),
        "include Chef::Mixin::ShellOut\n",
    )?;
    Ok(temp)
}

fn cookcop(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("cookcop")?;
    cmd.current_dir(dir).arg("--no-color");
    Ok(cmd)
}

#[test]
fn test_reports_offense_and_fails() -> Result<()> {
    let temp = cookbook()?;
    cookcop(temp.path())?
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!(
            "resources/site.rb:1:1: R: [Correctable] {RULE}"
        )))
        .stdout(predicate::str::contains("recipes/default.rb").not());
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let temp = cookbook()?;
    let output = cookcop(temp.path())?.arg("--json").output()?;
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["analysis_summary"]["total_files"], 2);
    assert_eq!(value["analysis_summary"]["findings_count"], 1);
    assert_eq!(value["findings"][0]["line"], 1);
    Ok(())
}

#[test]
fn test_fix_rewrites_file_and_succeeds() -> Result<()> {
    let temp = cookbook()?;
    cookcop(temp.path())?
        .arg("--fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed:"));

    assert_eq!(
        fs::read_to_string(temp.path().join("resources/site.rb"))?,
        "property :name, String\n"
    );
    cookcop(temp.path())?.assert().success();
    Ok(())
}

#[test]
fn test_dry_run_does_not_write() -> Result<()> {
    let temp = cookbook()?;
    cookcop(temp.path())?
        .args(["--fix", "--dry-run"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[DRY-RUN]"));

    assert!(fs::read_to_string(temp.path().join("resources/site.rb"))?
        .starts_with("require 'chef/mixin/shell_out'"));
    Ok(())
}

#[test]
fn test_config_ignore_silences_rule() -> Result<()> {
    let temp = cookbook()?;
    fs::write(
        temp.path().join(".cookcop.toml"),
        "[cookcop]\nignore = [\"Chef/Modernize\"]\n",
    )?;
    cookcop(temp.path())?.arg("--quiet").assert().success();
    Ok(())
}

#[test]
fn test_exclude_folder_flag() -> Result<()> {
    let temp = cookbook()?;
    cookcop(temp.path())?
        .args(["--exclude-folder", "resources"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_missing_path_is_usage_error() -> Result<()> {
    let temp = TempDir::new()?;
    cookcop(temp.path())?
        .arg("does-not-exist")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn test_parse_errors_are_reported_not_fatal() -> Result<()> {
    let temp = cookbook()?;
    fs::write(temp.path().join("resources/broken.rb"), "class Broken\n")?;
    cookcop(temp.path())?
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Skipped Files"))
        .stdout(predicate::str::contains("broken.rb"));
    Ok(())
}
