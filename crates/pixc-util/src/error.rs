//! Core error types for the compilation pipeline.
//!
//! Each phase owns exactly one error kind and never downgrades it to a
//! warning. Diagnostics carry the 1-based source line they refer to; the
//! code generator's errors are internal invariant violations, since the
//! semantic analyser has already accepted the program by the time it runs.

use thiserror::Error;

/// Error produced by the lexer for an unrecognisable lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid lexeme `{lexeme}` on line {line}")]
pub struct LexError {
    /// Line on which the offending lexeme starts.
    pub line: u32,

    /// The text that could not be tokenized.
    pub lexeme: String,
}

/// Error produced by the parser when the token stream violates the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, got {found} on line {line}")]
pub struct ParseError {
    /// Line of the offending token.
    pub line: u32,

    /// What the grammar required at this point.
    pub expected: String,

    /// The token that was actually seen.
    pub found: String,
}

/// Error produced by the semantic analyser.
///
/// Covers type mismatches, undeclared names, duplicate declarations,
/// incomplete return paths, nested function declarations and argument
/// arity/type mismatches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} on line {line}")]
pub struct SemanticError {
    /// Line of the offending construct.
    pub line: u32,

    /// Human-readable description of the violation.
    pub message: String,
}

/// Error produced during code generation.
///
/// The generator re-resolves names and re-checks types with the same
/// symbol-table contract as the analyser, so any failure here indicates a
/// broken invariant rather than a user mistake. Partial output is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A name could not be resolved during emission.
    #[error("unresolved name `{name}` on line {line}")]
    UnresolvedName { line: u32, name: String },

    /// A type contract was violated during emission.
    #[error("{message} on line {line}")]
    Type { line: u32, message: String },

    /// An emission invariant does not hold.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Umbrella error covering every compiler phase.
///
/// The driver maps any of these to a non-zero exit code and a diagnostic on
/// stderr.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

/// Result type alias for lexing operations
pub type LexResult<T> = std::result::Result<T, LexError>;

/// Result type alias for parsing operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type alias for semantic analysis
pub type SemResult<T> = std::result::Result<T, SemanticError>;

/// Result type alias for the whole pipeline
pub type CompileResult<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let err = LexError {
            line: 3,
            lexeme: "#ab".to_string(),
        };
        assert_eq!(err.to_string(), "invalid lexeme `#ab` on line 3");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError {
            line: 7,
            expected: "';'".to_string(),
            found: "`}`".to_string(),
        };
        assert_eq!(err.to_string(), "expected ';', got `}` on line 7");
    }

    #[test]
    fn test_compile_error_wraps_phase_errors() {
        let err: CompileError = SemanticError {
            line: 1,
            message: "type mismatch in declaration".to_string(),
        }
        .into();
        assert!(matches!(err, CompileError::Semantic(_)));
        assert!(err.to_string().starts_with("semantic error:"));
    }
}
