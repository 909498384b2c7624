//! Tests for operator reduction, operator precedence, predicates and
//! primaries.

mod common;
use common::*;

use oxide_obsql_core::ast::{BinaryOp, Expr, IsTarget, Literal, Statement, UnaryOp};
use oxide_obsql_core::DiagnosticKind;

fn binary(expr: &Expr) -> (&Expr, BinaryOp, &Expr) {
    match expr {
        Expr::Binary {
            left, op, right, ..
        } => (left, *op, right),
        other => panic!("Expected binary expression, got {other:?}"),
    }
}

// ===================================================================
// Precedence
// ===================================================================

#[test]
fn and_binds_tighter_than_or() {
    let e = projected("a OR b AND c");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Or);
    assert_eq!(column(left), "a");
    let (b, inner, c) = binary(right);
    assert_eq!(inner, BinaryOp::And);
    assert_eq!(column(b), "b");
    assert_eq!(column(c), "c");
}

#[test]
fn and_binds_tighter_than_or_on_the_left() {
    let e = projected("a AND b OR c");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Or);
    assert_eq!(binary(left).1, BinaryOp::And);
    assert_eq!(column(right), "c");
}

#[test]
fn logical_operators_are_left_associative() {
    let e = projected("a OR b OR c");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Or);
    assert_eq!(binary(left).1, BinaryOp::Or);
    assert_eq!(column(right), "c");
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let e = projected("1 + 2 * 3");
    let (_, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(binary(right).1, BinaryOp::Mul);
}

#[test]
fn parentheses_override_precedence() {
    let e = projected("(1 + 2) * 3");
    let (left, op, _) = binary(&e);
    assert_eq!(op, BinaryOp::Mul);
    let Expr::Nested { expr, .. } = left else {
        panic!("Expected nested expression, got {left:?}");
    };
    assert_eq!(binary(expr).1, BinaryOp::Add);
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    let e = projected("a + 1 = b * 2");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Eq);
    assert_eq!(binary(left).1, BinaryOp::Add);
    assert_eq!(binary(right).1, BinaryOp::Mul);
}

#[test]
fn not_applies_to_the_whole_comparison() {
    let e = projected("NOT a = 1");
    let Expr::Unary { op, operand, .. } = &e else {
        panic!("Expected unary expression, got {e:?}");
    };
    assert_eq!(*op, UnaryOp::Not);
    assert_eq!(binary(operand).1, BinaryOp::Eq);
}

// ===================================================================
// Operators
// ===================================================================

#[test]
fn comparison_operators() {
    for (sql, expected) in [
        ("a = 1", BinaryOp::Eq),
        ("a <=> 1", BinaryOp::NullSafeEq),
        ("a <> 1", BinaryOp::NotEq),
        ("a != 1", BinaryOp::NotEq),
        ("a < 1", BinaryOp::Lt),
        ("a <= 1", BinaryOp::LtEq),
        ("a > 1", BinaryOp::Gt),
        ("a >= 1", BinaryOp::GtEq),
    ] {
        assert_eq!(binary(&projected(sql)).1, expected, "{sql}");
    }
}

#[test]
fn arithmetic_and_bitwise_operators() {
    for (sql, expected) in [
        ("a - 1", BinaryOp::Sub),
        ("a / 2", BinaryOp::Div),
        ("a DIV 2", BinaryOp::IntDiv),
        ("a % 2", BinaryOp::Mod),
        ("a MOD 2", BinaryOp::Mod),
        ("a | 1", BinaryOp::BitOr),
        ("a & 1", BinaryOp::BitAnd),
        ("a ^ 1", BinaryOp::BitXor),
        ("a << 1", BinaryOp::LeftShift),
        ("a >> 1", BinaryOp::RightShift),
        ("a XOR b", BinaryOp::Xor),
        ("a && b", BinaryOp::And),
    ] {
        assert_eq!(binary(&projected(sql)).1, expected, "{sql}");
    }
}

#[test]
fn pipes_are_or_in_mysql_and_concat_in_oracle() {
    assert_eq!(binary(&projected("a || b")).1, BinaryOp::Or);

    let forest = build_oracle("SELECT a || b FROM t");
    assert!(!forest.has_errors(), "{:?}", forest.diagnostics);
    let Statement::Query(query) = &forest.statements[0] else {
        panic!("Expected query");
    };
    let select = query.as_select().unwrap();
    let oxide_obsql_core::ast::SelectItem::Expr { expr, .. } = &select.projection[0] else {
        panic!("Expected expression item");
    };
    assert_eq!(binary(expr).1, BinaryOp::Concat);
}

#[test]
fn unary_operators() {
    for (sql, expected) in [
        ("-a", UnaryOp::Neg),
        ("~a", UnaryOp::BitNot),
        ("!a", UnaryOp::Not),
        ("BINARY a", UnaryOp::Binary),
    ] {
        let e = projected(sql);
        assert!(
            matches!(&e, Expr::Unary { op, .. } if *op == expected),
            "{sql}: {e:?}"
        );
    }
}

#[test]
fn interval_arithmetic() {
    let e = projected("d + INTERVAL 1 DAY");
    let (left, op, right) = binary(&e);
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(column(left), "d");
    assert!(matches!(right, Expr::Interval { unit, .. } if unit == "DAY"));
}

// ===================================================================
// Predicates
// ===================================================================

#[test]
fn is_null_and_truth_tests() {
    assert!(matches!(
        projected("a IS NULL"),
        Expr::Is {
            negated: false,
            target: IsTarget::Null,
            ..
        }
    ));
    assert!(matches!(
        projected("a IS NOT NULL"),
        Expr::Is {
            negated: true,
            target: IsTarget::Null,
            ..
        }
    ));
    assert!(matches!(
        projected("a IS NOT TRUE"),
        Expr::Is {
            negated: true,
            target: IsTarget::True,
            ..
        }
    ));
    assert!(matches!(
        projected("a IS UNKNOWN"),
        Expr::Is {
            target: IsTarget::Unknown,
            ..
        }
    ));
}

#[test]
fn between() {
    let e = projected("a NOT BETWEEN 1 AND 10");
    let Expr::Between {
        expr,
        low,
        high,
        negated,
        ..
    } = &e
    else {
        panic!("Expected BETWEEN, got {e:?}");
    };
    assert!(*negated);
    assert_eq!(column(expr), "a");
    assert!(matches!(&**low, Expr::Literal { value: Literal::Integer(n), .. } if n == "1"));
    assert!(matches!(&**high, Expr::Literal { value: Literal::Integer(n), .. } if n == "10"));
}

#[test]
fn in_list_and_subquery() {
    assert!(matches!(
        projected("a IN (1, 2, 3)"),
        Expr::InList { ref list, negated: false, .. } if list.len() == 3
    ));
    assert!(matches!(
        projected("a NOT IN (1)"),
        Expr::InList { negated: true, .. }
    ));
    assert!(matches!(
        projected("a IN (SELECT b FROM t)"),
        Expr::InSubquery { negated: false, .. }
    ));
}

#[test]
fn like_with_escape() {
    let e = projected("a LIKE 'x!%' ESCAPE '!'");
    assert!(matches!(
        e,
        Expr::Like {
            escape: Some(_),
            negated: false,
            ..
        }
    ));
    assert!(matches!(
        projected("a NOT LIKE 'x%'"),
        Expr::Like {
            escape: None,
            negated: true,
            ..
        }
    ));
}

#[test]
fn regexp() {
    assert!(matches!(
        projected("a REGEXP '^x'"),
        Expr::Regexp { negated: false, .. }
    ));
    assert!(matches!(
        projected("a NOT RLIKE '^x'"),
        Expr::Regexp { negated: true, .. }
    ));
}

#[test]
fn quantified_comparison() {
    assert!(matches!(
        projected("a > ALL (SELECT b FROM t)"),
        Expr::QuantifiedComparison {
            op: BinaryOp::Gt,
            ..
        }
    ));
}

#[test]
fn exists_and_scalar_subquery() {
    assert!(matches!(projected("EXISTS (SELECT 1)"), Expr::Exists { .. }));
    assert!(matches!(projected("(SELECT 1)"), Expr::Subquery { .. }));
}

// ===================================================================
// Primaries
// ===================================================================

#[test]
fn qualified_columns_and_wildcards() {
    let e = projected("db.t.c");
    let Expr::Column {
        qualifier, name, ..
    } = &e
    else {
        panic!("Expected column, got {e:?}");
    };
    assert_eq!(name.value, "c");
    let qualifier: Vec<_> = qualifier.iter().map(|q| q.value.as_str()).collect();
    assert_eq!(qualifier, ["db", "t"]);

    assert!(matches!(
        projected("t.*"),
        Expr::Wildcard { ref qualifier, .. } if qualifier.len() == 1
    ));
}

#[test]
fn quoted_identifier_is_unquoted() {
    let e = projected("`my``col`");
    let Expr::Column { name, .. } = &e else {
        panic!("Expected column, got {e:?}");
    };
    assert_eq!(name.value, "my`col");
    assert!(name.quoted);
}

#[test]
fn literals() {
    assert!(matches!(projected("1.5"), Expr::Literal { value: Literal::Decimal(_), .. }));
    assert!(matches!(projected("NULL"), Expr::Literal { value: Literal::Null, .. }));
    assert!(matches!(
        projected("TRUE"),
        Expr::Literal {
            value: Literal::Boolean(true),
            ..
        }
    ));
    let e = projected("'a' 'b'");
    assert!(matches!(
        e,
        Expr::Literal { value: Literal::String { ref parts, .. }, .. } if parts.len() == 2
    ));
    let e = projected("_utf8mb4'x'");
    assert!(matches!(
        e,
        Expr::Literal { value: Literal::String { charset: Some(ref c), .. }, .. } if c == "utf8mb4"
    ));
}

#[test]
fn variables_and_placeholders() {
    assert!(matches!(projected("@v"), Expr::UserVariable { ref name, .. } if name == "v"));
    assert!(matches!(
        projected("@@session.sql_mode"),
        Expr::SystemVariable { .. }
    ));

    let s = select("SELECT ?, ?");
    let positions: Vec<_> = s
        .projection
        .iter()
        .filter_map(|item| match item {
            oxide_obsql_core::ast::SelectItem::Expr {
                expr: Expr::Parameter { position, .. },
                ..
            } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(positions, [0, 1]);
}

#[test]
fn placeholders_restart_per_statement() {
    let forest = build("SELECT ?; SELECT ?");
    for statement in &forest.statements {
        let Statement::Query(query) = statement else {
            panic!("Expected query");
        };
        let select = query.as_select().unwrap();
        assert!(matches!(
            select.projection[0],
            oxide_obsql_core::ast::SelectItem::Expr {
                expr: Expr::Parameter { position: 0, .. },
                ..
            }
        ));
    }
}

#[test]
fn row_constructor() {
    assert!(matches!(
        projected("ROW(1, 2)"),
        Expr::Row { ref items, .. } if items.len() == 2
    ));
    assert!(matches!(
        projected("(1, 2, 3)"),
        Expr::Row { ref items, .. } if items.len() == 3
    ));
}

#[test]
fn case_expression() {
    let e = projected("CASE a WHEN 1 THEN 'one' WHEN 2 THEN 'two' ELSE 'many' END");
    let Expr::Case {
        operand,
        branches,
        else_result,
        ..
    } = &e
    else {
        panic!("Expected CASE, got {e:?}");
    };
    assert!(operand.is_some());
    assert_eq!(branches.len(), 2);
    assert!(else_result.is_some());

    let e = projected("CASE WHEN a > 1 THEN 1 END");
    assert!(matches!(
        e,
        Expr::Case {
            operand: None,
            else_result: None,
            ..
        }
    ));
}

#[test]
fn collate_and_json_extract() {
    assert!(matches!(
        projected("a COLLATE utf8mb4_bin"),
        Expr::Collate { ref collation, .. } if collation.value == "utf8mb4_bin"
    ));
    assert!(matches!(
        projected("doc ->> '$.name'"),
        Expr::JsonExtract { unquote: true, .. }
    ));
    assert!(matches!(
        projected("doc -> '$.name'"),
        Expr::JsonExtract { unquote: false, .. }
    ));
}

#[test]
fn variable_assignment_expression() {
    assert!(matches!(
        projected("@n := @n + 1"),
        Expr::Assign { ref variable, .. } if variable == "n"
    ));
}

#[test]
fn expressions_reduce_without_diagnostics() {
    let forest = build("SELECT a + 1, b IS NULL, c IN (1, 2) FROM t WHERE a > 1 AND b < 2");
    assert!(forest.diagnostics.is_empty(), "{:?}", forest.diagnostics);
    assert!(!forest.diagnostics.iter().any(|d| d.kind == DiagnosticKind::StructuralMismatch));
}
