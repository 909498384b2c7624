#![allow(dead_code)]

use oxide_obsql_core::ast::{CreateTable, Expr, Query, Select, SelectItem, Statement};
use oxide_obsql_core::{
    parse_and_build, AstForest, Diagnostic, Dialect, MySqlDialect, OracleDialect, ParseNode,
    Parser,
};

pub fn build_in(sql: &str, dialect: &dyn Dialect) -> AstForest {
    parse_and_build(sql, dialect).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn build(sql: &str) -> AstForest {
    build_in(sql, &MySqlDialect)
}

pub fn build_oracle(sql: &str) -> AstForest {
    build_in(sql, &OracleDialect)
}

pub fn tree(sql: &str) -> ParseNode {
    Parser::new(sql)
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

/// Reduces a single statement and returns it with its diagnostics.
pub fn reduce(sql: &str) -> (Statement, Vec<Diagnostic>) {
    let (mut statements, diagnostics) = build(sql).into_parts();
    assert_eq!(statements.len(), 1, "Expected one statement for: {sql}");
    (statements.remove(0), diagnostics)
}

/// Reduces a single statement that must not produce diagnostics.
pub fn statement(sql: &str) -> Statement {
    let (statement, diagnostics) = reduce(sql);
    assert!(diagnostics.is_empty(), "Unexpected diagnostics for {sql}: {diagnostics:?}");
    statement
}

/// Oracle-mode counterpart of [`statement`].
pub fn oracle_statement(sql: &str) -> Statement {
    let (mut statements, diagnostics) = build_oracle(sql).into_parts();
    assert!(diagnostics.is_empty(), "Unexpected diagnostics for {sql}: {diagnostics:?}");
    assert_eq!(statements.len(), 1, "Expected one statement for: {sql}");
    statements.remove(0)
}

pub fn oracle_query(sql: &str) -> Query {
    match oracle_statement(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn query(sql: &str) -> Query {
    match statement(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn select(sql: &str) -> Select {
    query(sql)
        .as_select()
        .cloned()
        .unwrap_or_else(|| panic!("Expected a plain SELECT: {sql}"))
}

/// The first projected expression of `SELECT <expr>`.
pub fn projected(expr: &str) -> Expr {
    match select(&format!("SELECT {expr}")).projection.into_iter().next() {
        Some(SelectItem::Expr { expr, .. }) => expr,
        other => panic!("Expected an expression, got {other:?}"),
    }
}

pub fn create_table(sql: &str) -> (CreateTable, Vec<Diagnostic>) {
    match reduce(sql) {
        (Statement::CreateTable(c), diagnostics) => (*c, diagnostics),
        (other, _) => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

/// Returns the name of a column reference.
pub fn column(expr: &Expr) -> &str {
    match expr {
        Expr::Column { name, .. } => &name.value,
        other => panic!("Expected column, got {other:?}"),
    }
}
