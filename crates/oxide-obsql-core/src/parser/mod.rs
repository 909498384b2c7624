//! Reference SQL front end.
//!
//! A hand-written recursive descent parser that emits grammar-shaped
//! concrete trees: every node is tagged with the [`RuleKind`] the OceanBase
//! grammar would have produced for it, with left-recursive productions
//! expanded into left-nested nodes through binding-power tables.
//!
//! The parser is deliberately permissive in places where the reducers own the
//! check (for example a window-only function without `OVER`), so that those
//! problems surface as diagnostics rather than parse errors.
//!
//! [`RuleKind`]: crate::cst::RuleKind

mod access;
mod admin;
mod ddl;
mod dml;
mod error;
mod expr;
mod option;
mod parser;
mod partition;
mod pratt;
mod query;
mod session;

pub(crate) use expr::WINDOW_ONLY_FUNCTIONS;
pub use error::ParseError;
pub use parser::Parser;
