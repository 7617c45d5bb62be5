//! Compilation pipeline tests: source file in, PixIR text out, with the
//! documented opcode sequences and failure modes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::{fixtures_dir, pixc_bin};

fn compile_fixture(name: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().expect("temp dir");
    let output_path = temp_dir.path().join("out.pixir");
    let input_path = fixtures_dir().join(name);

    Command::new(pixc_bin())
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let asm = fs::read_to_string(&output_path).expect("output exists");
    (temp_dir, asm)
}

#[test]
fn test_print_program() {
    let (_dir, asm) = compile_fixture("print.pix");
    assert!(asm.starts_with(".main\npush 4\njmp\nhalt\n"));
    assert!(asm.contains("push 42\nprint\n"));
    assert!(asm.ends_with("cframe\nhalt\n"));
}

#[test]
fn test_arithmetic_is_right_operand_first() {
    let (_dir, asm) = compile_fixture("arithmetic.pix");
    assert!(asm.contains("push 3\npush 2\nmul\npush 1\nadd\nprint\n"));
}

#[test]
fn test_variable_program() {
    let (_dir, asm) = compile_fixture("variables.pix");
    assert!(asm.contains("push 5\npush 0\npush 0\nst\n"));
    assert!(asm.contains("push [0:0]\nprint\n"));
}

#[test]
fn test_function_program() {
    let (_dir, asm) = compile_fixture("function.pix");
    assert!(asm.contains(".f\n"));
    assert!(asm.contains("cframe\nret\n"));
    assert!(asm.contains("push 5\npush .f\ncall\nprint\n"));
}

#[test]
fn test_animation_program_compiles() {
    let (_dir, asm) = compile_fixture("animation.pix");
    assert!(asm.contains("writebox\n"));
    assert!(asm.contains("delay\n"));
    assert!(asm.contains("cjmp\n"));

    // Every PC-relative jump must land inside the program.
    let lines: Vec<&str> = asm.lines().collect();
    for (pc, line) in lines.iter().enumerate() {
        if let Some(offset) = line.strip_prefix("push #PC") {
            let offset: i64 = offset.parse().expect("well-formed offset");
            let target = pc as i64 + offset;
            assert!(target >= 0 && (target as usize) < lines.len());
        }
    }
}

#[test]
fn test_missing_return_is_a_semantic_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.pixir");

    Command::new(pixc_bin())
        .arg(fixtures_dir().join("missing_return.pix"))
        .arg("-o")
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("semantic error"))
        .stderr(predicate::str::contains("line 1"));

    // A failed compile never leaves a partial output behind.
    assert!(!output_path.exists());
}

#[test]
fn test_type_mismatch_is_a_semantic_error() {
    Command::new(pixc_bin())
        .arg(fixtures_dir().join("type_mismatch.pix"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("semantic error"))
        .stderr(predicate::str::contains("type mismatch"));
}

#[test]
fn test_bad_lexeme_is_a_lex_error() {
    Command::new(pixc_bin())
        .arg(fixtures_dir().join("bad_lexeme.pix"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("lex error"))
        .stderr(predicate::str::contains("invalid lexeme"));
}

#[test]
fn test_syntax_error_is_a_parse_error() {
    Command::new(pixc_bin())
        .arg(fixtures_dir().join("syntax_error.pix"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error"))
        .stderr(predicate::str::contains("expected"));
}
