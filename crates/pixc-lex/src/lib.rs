//! pixc-lex - Lexical analysis for PixIR-source.
//!
//! The lexer is driven by an explicit DFA over character categories and
//! produces a stream of line-annotated tokens ending in a single EOF.
//! Whitespace and comments are consumed but never surfaced.
//!
//! # Example
//!
//! ```
//! use pixc_lex::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("__print 42;").tokenize().unwrap();
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Print,
//!         TokenKind::IntLiteral,
//!         TokenKind::Semicolon,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

pub mod category;
pub mod cursor;
pub mod dfa;
pub mod lexer;
pub mod token;

pub use category::{categorize, Category};
pub use dfa::{Dfa, State};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
