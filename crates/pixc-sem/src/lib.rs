//! pixc-sem - Semantic analysis for PixIR-source.
//!
//! Two pieces: the scope-stack symbol table with its function barrier, and
//! the type-checking tree walk. The code generator shares the same symbol
//! table contract when it re-resolves names during emission.
//!
//! # Example
//!
//! ```
//! use pixc_lex::Lexer;
//! use pixc_par::Parser;
//! use pixc_sem::SemanticAnalyzer;
//!
//! let tokens = Lexer::new("let x: int = 5; __print x;").tokenize().unwrap();
//! let program = Parser::new(tokens).parse_program().unwrap();
//! assert!(SemanticAnalyzer::new().analyze(&program).is_ok());
//! ```

pub mod analysis;
pub mod scope;

pub use analysis::{block_guarantees_return, SemanticAnalyzer};
pub use scope::{Param, ScopeKind, Symbol, SymbolKind, SymbolTable};
