//! CLI surface tests: arguments, emit stages, exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::{fixtures_dir, pixc_bin};

#[test]
fn test_missing_input_argument() {
    Command::new(pixc_bin())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_nonexistent_input_file() {
    Command::new(pixc_bin())
        .arg("no_such_file.pix")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_version_flag() {
    Command::new(pixc_bin())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pixc"));
}

#[test]
fn test_emit_tokens_prints_to_stdout() {
    Command::new(pixc_bin())
        .arg(fixtures_dir().join("print.pix"))
        .arg("--emit")
        .arg("tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("IntLiteral"))
        .stdout(predicate::str::contains("Eof"));
}

#[test]
fn test_emit_ast_prints_to_stdout() {
    Command::new(pixc_bin())
        .arg(fixtures_dir().join("function.pix"))
        .arg("--emit")
        .arg("ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program"))
        .stdout(predicate::str::contains("Fun"));
}

#[test]
fn test_default_output_path_derives_from_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("scene.pix");
    fs::copy(fixtures_dir().join("print.pix"), &input_path).unwrap();

    Command::new(pixc_bin()).arg(&input_path).assert().success();

    assert!(temp_dir.path().join("scene.pixir").exists());
}

#[test]
fn test_explicit_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("custom.out");

    Command::new(pixc_bin())
        .arg(fixtures_dir().join("print.pix"))
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.exists());
}
