//! # oxide-obsql-core
//!
//! Reduces concrete parse trees of the OceanBase MySQL/Oracle SQL grammar into
//! a typed abstract syntax tree.
//!
//! This crate provides:
//! - A concrete tree model tagged with the grammar's rule kinds
//! - A table-driven, iterative tree walker with one reduction per rule kind
//! - Expression, query, DML, DDL, partition, administration, access control
//!   and session reducers
//! - Collect-all diagnostics that never abort a walk
//! - A reference lexer and parser that emit grammar-shaped trees
//!
//! ## Building an AST
//!
//! ```rust
//! use oxide_obsql_core::{parse_and_build, ast::Statement, MySqlDialect};
//!
//! let forest = parse_and_build("SELECT a FROM t WHERE b = 1", &MySqlDialect).unwrap();
//! assert!(matches!(forest.statements[0], Statement::Query(_)));
//! assert!(!forest.has_errors());
//! ```
//!
//! ## Diagnostics
//!
//! Recoverable problems are reported alongside a best-effort tree:
//!
//! ```rust
//! use oxide_obsql_core::{parse_and_build, DiagnosticKind, MySqlDialect};
//!
//! let forest = parse_and_build("CREATE TABLE t (a INT) CHARSET a CHARSET b", &MySqlDialect)
//!     .unwrap();
//! assert_eq!(forest.diagnostics[0].kind, DiagnosticKind::AmbiguousOption);
//! ```

pub mod ast;
pub mod cst;
pub mod diagnostics;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod reduce;

mod driver;

pub use ast::{Expr, Statement};
pub use cst::{ParseNode, RuleKind};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use dialect::{Dialect, MySqlDialect, OracleDialect};
pub use driver::{
    build_ast, parse_and_build, AstBuilder, AstForest, BuildError, CancellationToken,
};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use reduce::ReductionTable;
