//! Helpers shared by the reducer unit tests.

use super::context::ReduceCtx;
use super::fragment::FromFragment;
use super::table::ReductionTable;
use super::walker::Walker;
use crate::ast::{Expr, SelectItem, Statement};
use crate::diagnostics::Diagnostic;
use crate::dialect::{Dialect, MySqlDialect};
use crate::parser::Parser;

/// Parses and reduces one statement.
pub fn reduce_in(sql: &str, dialect: &dyn Dialect) -> (Statement, Vec<Diagnostic>) {
    let node = Parser::with_dialect(sql, dialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("parse failed for {sql}: {e}"));
    let table = ReductionTable::standard();
    let mut ctx = ReduceCtx::new();
    let mut out = Walker::new(&table).reduce(&node, &mut ctx).unwrap();
    assert_eq!(out.len(), 1, "expected one fragment for {sql}: {out:?}");
    let statement = Statement::from_fragment(out.remove(0))
        .unwrap_or_else(|f| panic!("not a statement: {f:?}"));
    (statement, ctx.into_diagnostics())
}

pub fn reduce(sql: &str) -> (Statement, Vec<Diagnostic>) {
    reduce_in(sql, &MySqlDialect)
}

/// Reduces a statement that must not produce diagnostics.
pub fn statement(sql: &str) -> Statement {
    let (statement, diagnostics) = reduce(sql);
    assert!(diagnostics.is_empty(), "unexpected diagnostics for {sql}: {diagnostics:?}");
    statement
}

/// Reduces `SELECT <expr>` and returns the projected expression.
pub fn select_item(expr: &str) -> Expr {
    let sql = format!("SELECT {expr}");
    let Statement::Query(query) = statement(&sql) else {
        panic!("not a query: {sql}");
    };
    let select = query.as_select().cloned().unwrap_or_else(|| panic!("not a select: {sql}"));
    match select.projection.into_iter().next() {
        Some(SelectItem::Expr { expr, .. }) => expr,
        other => panic!("unexpected projection {other:?}"),
    }
}
