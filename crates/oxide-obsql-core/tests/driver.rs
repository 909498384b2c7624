//! Tests for the reduction driver: statement order, parallel reduction,
//! table completeness, identity splicing and span coverage.

mod common;
use common::*;

use oxide_obsql_core::cst::Terminal;
use oxide_obsql_core::reduce::{Fragment, ReduceCtx, Resolution, Walker};
use oxide_obsql_core::{
    AstBuilder, AstForest, BuildError, CancellationToken, DiagnosticKind, Lexer, ParseNode,
    ReductionTable, RuleKind, Span, Statement, TokenKind,
};

const SCRIPT: &str = "\
CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(20)) CHARSET a CHARSET b;
INSERT INTO t (id, name) VALUES (1, 'a'), (2, 'b');
SELECT id, COUNT(*) FROM t WHERE name LIKE 'a%' GROUP BY id;
UPDATE t SET name = 'c' WHERE id = ?;
DELETE FROM t WHERE id = ?;
SET TRANSACTION READ ONLY, READ WRITE;
COMMIT";

// ===================================================================
// Order and parallelism
// ===================================================================

#[test]
fn statements_come_back_in_input_order() {
    let forest = build(SCRIPT);
    let kinds: Vec<&str> = forest
        .statements
        .iter()
        .map(|s| match s {
            Statement::CreateTable(_) => "create",
            Statement::Insert(_) => "insert",
            Statement::Query(_) => "query",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
            Statement::SetTransaction(_) => "set",
            Statement::Commit(_) => "commit",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        ["create", "insert", "query", "update", "delete", "set", "commit"]
    );
}

#[test]
fn diagnostics_are_in_document_order() {
    let forest = build(SCRIPT);
    assert_eq!(forest.diagnostics.len(), 2, "{:?}", forest.diagnostics);
    assert!(forest
        .diagnostics
        .iter()
        .all(|d| d.kind == DiagnosticKind::AmbiguousOption));
    assert!(forest.diagnostics[0].span.start < forest.diagnostics[1].span.start);
    assert!(!forest.has_errors());
}

#[test]
fn parallel_build_matches_sequential() {
    let root = tree(SCRIPT);
    let sequential = AstBuilder::new().build(&root).unwrap();
    for _ in 0..4 {
        let parallel = AstBuilder::new().parallel(true).build(&root).unwrap();
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn parameters_are_numbered_per_statement() {
    let forest = build(SCRIPT);
    let positions: Vec<usize> = forest
        .statements
        .iter()
        .filter_map(|s| match s {
            Statement::Update(u) => u.selection.as_ref(),
            Statement::Delete(d) => d.selection.as_ref(),
            _ => None,
        })
        .filter_map(|selection| match selection {
            oxide_obsql_core::Expr::Binary { right, .. } => match right.as_ref() {
                oxide_obsql_core::Expr::Parameter { position, .. } => Some(*position),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(positions, [0, 0]);
}

// ===================================================================
// Reduction table
// ===================================================================

#[test]
fn standard_table_resolves_every_rule() {
    let table = ReductionTable::standard();
    for kind in RuleKind::ALL {
        assert!(table.resolve(kind.index()).is_some(), "{kind} does not resolve");
    }
    let past_end = u16::try_from(RuleKind::COUNT).unwrap();
    assert!(table.resolve(past_end).is_none());
    assert!(table.custom_rules().count() < RuleKind::COUNT);
}

#[test]
fn identity_rules_splice_their_children() {
    let table = ReductionTable::standard();
    assert!(matches!(
        table.resolve(RuleKind::StmtList.index()),
        Some(Resolution::Identity)
    ));

    let a = ParseNode::terminal(TokenKind::Identifier, "a", Span::new(0, 1));
    let b = ParseNode::terminal(TokenKind::Identifier, "b", Span::new(2, 3));
    let root = ParseNode::rule(RuleKind::StmtList, vec![a, b]);
    let fragments = Walker::new(&table)
        .reduce(&root, &mut ReduceCtx::new())
        .unwrap();
    assert_eq!(
        fragments,
        vec![
            Fragment::Token(Terminal::new(TokenKind::Identifier, "a", Span::new(0, 1))),
            Fragment::Token(Terminal::new(TokenKind::Identifier, "b", Span::new(2, 3))),
        ]
    );
}

#[test]
fn empty_table_without_identity_rejects_everything() {
    let root = tree("COMMIT");
    let table = ReductionTable::empty(false);
    assert!(table.first_unknown(&root).is_some());
    let forest = AstBuilder::new().table(table).build(&root).unwrap();
    assert!(forest.is_fatal());
    assert!(forest.statements.is_empty());
}

#[test]
fn unknown_rule_index_gives_one_fatal_diagnostic() {
    let leaf = ParseNode::terminal(TokenKind::IntNum, "1", Span::new(7, 8));
    let bad = ParseNode::raw(u16::MAX, vec![leaf], Span::new(7, 8));
    let select = tree("SELECT 1");
    let stmt = ParseNode::rule(RuleKind::Stmt, vec![bad]);
    let root = ParseNode::rule(RuleKind::StmtList, vec![select, stmt]);

    let forest = AstBuilder::new().parallel(true).build(&root).unwrap();
    assert!(forest.statements.is_empty());
    assert_eq!(forest.diagnostics.len(), 1);
    let diagnostic = &forest.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::UnknownRuleKind);
    assert_eq!(diagnostic.span, Span::new(7, 8));
    assert!(diagnostic.to_string().starts_with("fatal[UnknownRuleKind]"), "{diagnostic}");
}

#[test]
fn cancelled_builds_report_progress() {
    let root = tree(SCRIPT);
    let token = CancellationToken::new();
    assert_eq!(
        AstBuilder::new().cancellation(token.clone()).build(&root).map(|f| f.statements.len()),
        Ok(7)
    );
    token.cancel();
    assert_eq!(
        AstBuilder::new().cancellation(token).build(&root),
        Err(BuildError::Cancelled { completed: 0 })
    );
}

// ===================================================================
// Spans
// ===================================================================

#[test]
fn statement_spans_start_at_their_first_token() {
    let root = tree(SCRIPT);
    let mut units = Vec::new();
    root.visit(&mut |node| {
        if node.kind() == Some(RuleKind::Stmt) {
            units.push(node.clone());
        }
    });
    let forest = AstBuilder::new().build(&root).unwrap();
    assert_eq!(units.len(), forest.statements.len());

    for (unit, statement) in units.iter().zip(&forest.statements) {
        let first = unit.first_terminal().unwrap();
        let span = statement.span();
        assert_eq!(span.start, first.span.start);

        let text = span.slice(SCRIPT).unwrap();
        let token = Lexer::new(text).next_token();
        assert_eq!(token.span.start, 0);
        assert_eq!(
            token.span.slice(text).map(str::to_ascii_uppercase),
            Some(first.text.to_ascii_uppercase())
        );
        assert!(span.end <= unit.span().end);
    }
}

#[test]
fn diagnostic_spans_fall_inside_their_statement() {
    let forest = build(SCRIPT);
    for diagnostic in &forest.diagnostics {
        assert!(forest.statements.iter().any(|s| {
            let span = s.span();
            span.start <= diagnostic.span.start && diagnostic.span.end <= span.end
        }));
    }
}

// ===================================================================
// Serialization
// ===================================================================

#[test]
fn forest_survives_json() {
    let forest = build(SCRIPT);
    let json = serde_json::to_string(&forest).unwrap();
    let back: AstForest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, forest);
}

#[test]
fn oracle_scripts_build_in_parallel() {
    let sql = "SELECT a || b FROM t; SELECT a FROM t MINUS SELECT a FROM u";
    let forest = build_oracle(sql);
    let root = oxide_obsql_core::Parser::with_dialect(sql, &oxide_obsql_core::OracleDialect)
        .parse()
        .unwrap();
    let parallel = AstBuilder::new().parallel(true).build(&root).unwrap();
    assert_eq!(parallel, forest);
    assert!(!forest.has_errors());
}
