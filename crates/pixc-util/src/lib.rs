//! pixc-util - Foundation types shared by every compiler phase.
//!
//! The compiler is a strict pipeline (lex -> parse -> sem -> gen) and every
//! phase fails fast on its first error. This crate holds the typed error
//! values those phases produce, plus the `CompileError` umbrella the driver
//! reports to the user.

pub mod error;

pub use error::{
    CodegenError, CompileError, CompileResult, LexError, LexResult, ParseError, ParseResult,
    SemResult, SemanticError,
};
