//! Concrete tree in, AST forest and diagnostics out.
//!
//! The driver splits a script into its top-level statements and reduces each
//! one with its own walker and diagnostics collector, optionally in parallel.
//! Results are always returned in input order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::ast::Statement;
use crate::cst::{ParseNode, RuleKind};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::dialect::Dialect;
use crate::parser::{ParseError, Parser};
use crate::reduce::{FromFragment, ReduceCtx, ReductionTable, UnknownRule, Walker};

/// A shared flag that stops a build at the next statement boundary.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Errors from [`AstBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("build cancelled after {completed} statement(s)")]
    Cancelled {
        /// Statements fully reduced before the cancellation was seen.
        completed: usize,
    },
}

/// The statements of a script with the diagnostics raised while reducing
/// them, both in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstForest {
    pub statements: Vec<Statement>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AstForest {
    /// Returns true if any diagnostic is an error or fatal.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Returns true if the tree could not be reduced at all.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Fatal)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<Statement>, Vec<Diagnostic>) {
        (self.statements, self.diagnostics)
    }

    fn fatal(unknown: UnknownRule) -> Self {
        let mut diagnostic = Diagnostic::new(
            DiagnosticKind::UnknownRuleKind,
            format!("no reduction for rule index {}", unknown.index),
            unknown.span,
        );
        if let Some(kind) = RuleKind::from_index(unknown.index) {
            diagnostic = diagnostic.with_rule(kind);
        }
        warn!(index = unknown.index, span = %unknown.span, "unknown rule kind");
        Self {
            statements: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Configures and runs a reduction.
///
/// ```
/// use oxide_obsql_core::{AstBuilder, MySqlDialect, Parser};
///
/// let root = Parser::with_dialect("SELECT 1; COMMIT", &MySqlDialect).parse().unwrap();
/// let forest = AstBuilder::new().parallel(true).build(&root).unwrap();
/// assert_eq!(forest.statements.len(), 2);
/// assert!(forest.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AstBuilder {
    table: ReductionTable,
    parallel: bool,
    cancellation: Option<CancellationToken>,
}

impl AstBuilder {
    /// A sequential builder over the standard reduction table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reduction table.
    #[must_use]
    pub fn table(mut self, table: ReductionTable) -> Self {
        self.table = table;
        self
    }

    /// Reduces top-level statements on the rayon thread pool.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks `token` before each top-level statement.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    #[must_use]
    pub const fn reduction_table(&self) -> &ReductionTable {
        &self.table
    }

    /// Reduces `root` into an AST forest.
    ///
    /// A tree holding a rule the table cannot reduce yields an empty forest
    /// with a single fatal diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Cancelled`] if the cancellation token fires.
    pub fn build(&self, root: &ParseNode) -> Result<AstForest, BuildError> {
        if let Some(unknown) = self.table.first_unknown(root) {
            return Ok(AstForest::fatal(unknown));
        }
        let units = top_level_units(root);
        debug!(units = units.len(), parallel = self.parallel, "building AST forest");

        let results: Vec<Option<Result<Reduced, UnknownRule>>> = if self.parallel {
            units
                .par_iter()
                .map(|unit| (!self.is_cancelled()).then(|| self.reduce_unit(unit)))
                .collect()
        } else {
            let mut results = Vec::with_capacity(units.len());
            for unit in &units {
                if self.is_cancelled() {
                    break;
                }
                results.push(Some(self.reduce_unit(unit)));
            }
            results
        };

        let completed = results.iter().filter(|r| r.is_some()).count();
        if completed < units.len() {
            debug!(completed, "build cancelled");
            return Err(BuildError::Cancelled { completed });
        }

        let mut forest = AstForest::default();
        for result in results.into_iter().flatten() {
            match result {
                Ok((statement, diagnostics)) => {
                    forest.statements.push(statement);
                    forest.diagnostics.extend(diagnostics);
                }
                Err(unknown) => return Ok(AstForest::fatal(unknown)),
            }
        }
        debug!(
            statements = forest.statements.len(),
            diagnostics = forest.diagnostics.len(),
            "AST forest built"
        );
        Ok(forest)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    fn reduce_unit(&self, unit: &ParseNode) -> Result<Reduced, UnknownRule> {
        let mut ctx = ReduceCtx::new();
        let fragments = Walker::new(&self.table).reduce(unit, &mut ctx)?;
        let statement = fragments
            .into_iter()
            .find_map(|fragment| Statement::from_fragment(fragment).ok());
        let statement = statement.unwrap_or_else(|| {
            let mut diagnostic = Diagnostic::new(
                DiagnosticKind::StructuralMismatch,
                "top-level unit did not reduce to a statement",
                unit.span(),
            );
            if let Some(kind) = unit.kind() {
                diagnostic = diagnostic.with_rule(kind);
            }
            ctx.record(diagnostic);
            Statement::Error { span: unit.span() }
        });
        trace!(span = %statement.span(), "statement reduced");
        Ok((statement, ctx.into_diagnostics()))
    }
}

type Reduced = (Statement, Vec<Diagnostic>);

/// The `stmt` children of `sql_stmt` / `stmt_list`; any other root is one
/// unit on its own.
fn top_level_units(root: &ParseNode) -> Vec<&ParseNode> {
    match root.kind() {
        Some(RuleKind::SqlStmt | RuleKind::StmtList) => {
            let mut units = Vec::new();
            let mut pending = vec![root];
            while let Some(node) = pending.pop() {
                let Some(rule) = node.as_rule() else {
                    continue;
                };
                for child in rule.children.iter().rev() {
                    match child.kind() {
                        Some(RuleKind::SqlStmt | RuleKind::StmtList) => pending.push(child),
                        Some(_) => units.push(child),
                        None => {}
                    }
                }
            }
            units.reverse();
            units
        }
        _ => vec![root],
    }
}

/// Reduces `root` with the standard table.
///
/// Returns an empty forest and one fatal diagnostic when the tree carries a
/// rule kind the table does not know.
#[must_use]
pub fn build_ast(root: &ParseNode) -> (Vec<Statement>, Vec<Diagnostic>) {
    AstBuilder::new()
        .build(root)
        .unwrap_or_default()
        .into_parts()
}

/// Parses `sql` with the reference front end, then reduces it.
///
/// # Errors
///
/// Returns the parser's error when `sql` does not parse.
pub fn parse_and_build(sql: &str, dialect: &dyn Dialect) -> Result<AstForest, ParseError> {
    let root = Parser::with_dialect(sql, dialect).parse()?;
    let (statements, diagnostics) = build_ast(&root);
    Ok(AstForest {
        statements,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;
    use crate::lexer::{Span, TokenKind};

    fn parse(sql: &str) -> ParseNode {
        Parser::new(sql).parse().unwrap()
    }

    #[test]
    fn test_units_in_input_order() {
        let root = parse("SELECT 1; INSERT INTO t VALUES (1); COMMIT");
        let (statements, diagnostics) = build_ast(&root);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[0], Statement::Query(_)));
        assert!(matches!(statements[1], Statement::Insert(_)));
        assert!(matches!(statements[2], Statement::Commit(_)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sql = "SELECT a FROM t; CREATE TABLE t (a INT) CHARSET a CHARSET b; \
                   UPDATE t SET a = 1; DELETE FROM t; SET @x = 1";
        let root = parse(sql);
        let sequential = AstBuilder::new().build(&root).unwrap();
        let parallel = AstBuilder::new().parallel(true).build(&root).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.statements.len(), 5);
        assert_eq!(parallel.diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_script() {
        let (statements, diagnostics) = build_ast(&parse(";;"));
        assert!(statements.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_rule_is_fatal() {
        let leaf = ParseNode::terminal(TokenKind::IntNum, "1", Span::new(0, 1));
        let bad = ParseNode::raw(u16::MAX, vec![leaf], Span::new(0, 1));
        let stmt = ParseNode::rule(RuleKind::Stmt, vec![bad]);
        let root = ParseNode::rule(RuleKind::StmtList, vec![stmt]);

        let forest = AstBuilder::new().build(&root).unwrap();
        assert!(forest.statements.is_empty());
        assert_eq!(forest.diagnostics.len(), 1);
        assert_eq!(forest.diagnostics[0].kind, DiagnosticKind::UnknownRuleKind);
        assert!(forest.is_fatal());
        assert!(forest.has_errors());
    }

    #[test]
    fn test_strict_table_rejects_identity_rules() {
        let root = parse("SELECT 1");
        let forest = AstBuilder::new()
            .table(ReductionTable::strict())
            .build(&root)
            .unwrap();
        assert!(forest.is_fatal());
        assert!(forest.diagnostics[0].rule.is_some());
    }

    #[test]
    fn test_unit_without_statement() {
        let leaf = ParseNode::terminal(TokenKind::IntNum, "7", Span::new(0, 1));
        let stmt = ParseNode::rule(RuleKind::Stmt, vec![leaf]);
        let (statements, diagnostics) = build_ast(&stmt);
        assert_eq!(statements, vec![Statement::Error { span: Span::new(0, 1) }]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralMismatch);
    }

    #[test]
    fn test_cancellation() {
        let root = parse("SELECT 1; SELECT 2");
        let token = CancellationToken::new();
        token.cancel();
        let result = AstBuilder::new().cancellation(token.clone()).build(&root);
        assert_eq!(result, Err(BuildError::Cancelled { completed: 0 }));
        let result = AstBuilder::new().parallel(true).cancellation(token).build(&root);
        assert_eq!(result, Err(BuildError::Cancelled { completed: 0 }));
    }

    #[test]
    fn test_parse_and_build() {
        let forest = parse_and_build("SELECT 1", &MySqlDialect).unwrap();
        assert_eq!(forest.statements.len(), 1);
        let error = parse_and_build("SELEC 1", &MySqlDialect).unwrap_err();
        assert!(error.to_string().contains("at position"));
    }
}
