//! pixc-drv - Compiler driver.
//!
//! Orchestrates the pipeline: read the source once, run lex -> parse ->
//! analyse -> generate, and write the PixIR stream in a single pass at the
//! end. Every phase fails fast; on error nothing is written, so a partial
//! output file never exists.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use pixc_gen::CodeGenerator;
use pixc_lex::{Lexer, Token};
use pixc_par::{Parser, Program};
use pixc_sem::SemanticAnalyzer;
use pixc_util::{CompileError, CompileResult};

/// Which stage of the pipeline to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitKind {
    /// The token stream, one token per line on stdout.
    Tokens,
    /// The abstract syntax tree, pretty-printed on stdout.
    Ast,
    /// PixIR assembly, written to the output file.
    Asm,
}

/// One compiler invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file to compile.
    pub input: PathBuf,

    /// Output path; defaults to the input with extension `.pixir`.
    pub output: Option<PathBuf>,

    /// Stage to emit.
    pub emit: EmitKind,
}

impl Config {
    /// The effective output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("pixir"))
    }
}

/// Tokenizes a source string.
pub fn tokenize_source(source: &str) -> CompileResult<Vec<Token>> {
    let tokens = Lexer::new(source).tokenize()?;
    debug!(tokens = tokens.len(), "lexed");
    Ok(tokens)
}

/// Tokenizes and parses a source string.
pub fn parse_source(source: &str) -> CompileResult<Program> {
    let tokens = tokenize_source(source)?;
    let program = Parser::new(tokens).parse_program()?;
    debug!(statements = program.statements.len(), "parsed");
    Ok(program)
}

/// Runs the whole pipeline, returning the PixIR text.
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    let program = parse_source(source)?;

    SemanticAnalyzer::new().analyze(&program)?;
    debug!("semantic analysis passed");

    let asm = CodeGenerator::new().generate(&program)?;
    debug!(instructions = asm.lines().count(), "generated");
    Ok(asm)
}

/// Executes one invocation: read, compile, emit.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let source = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;

    match config.emit {
        EmitKind::Tokens => {
            for token in tokenize_source(&source)? {
                println!("{token:?}");
            }
        }
        EmitKind::Ast => {
            let program = parse_source(&source)?;
            println!("{program:#?}");
        }
        EmitKind::Asm => {
            let asm = compile_source(&source)?;
            let output = config.output_path();
            fs::write(&output, asm)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(output = %output.display(), "compiled");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_source_end_to_end() {
        let asm = compile_source("__print 42;").unwrap();
        assert!(asm.starts_with(".main\n"));
        assert!(asm.contains("push 42\nprint\n"));
    }

    #[test]
    fn test_each_phase_maps_to_its_error() {
        assert!(matches!(
            compile_source("let x: int = #12;"),
            Err(CompileError::Lex(_))
        ));
        assert!(matches!(
            compile_source("let x int = 1;"),
            Err(CompileError::Parse(_))
        ));
        assert!(matches!(
            compile_source("let x: int = true;"),
            Err(CompileError::Semantic(_))
        ));
    }

    #[test]
    fn test_default_output_path() {
        let config = Config {
            input: PathBuf::from("scene.pix"),
            output: None,
            emit: EmitKind::Asm,
        };
        assert_eq!(config.output_path(), PathBuf::from("scene.pixir"));
    }
}
