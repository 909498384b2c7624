//! Tests for function calls, window functions and the functions with
//! special argument syntax.

mod common;
use common::*;

use oxide_obsql_core::ast::{
    ConvertTarget, Expr, FrameBound, FrameDirection, FrameUnits, FromFirstLast, JsonQueryResponse,
    JsonValueResponse, Literal, SetQuantifier, TrimSide, TypeFamily,
};
use oxide_obsql_core::{DiagnosticKind, Severity};

// ===================================================================
// Plain calls
// ===================================================================

#[test]
fn count_star_and_distinct() {
    let Expr::Function(call) = projected("COUNT(*)") else {
        panic!("Expected function call");
    };
    assert!(call.name.eq_ignore_case("count"));
    assert!(call.star);
    assert!(call.args.is_empty());

    let Expr::Function(call) = projected("COUNT(DISTINCT a, b)") else {
        panic!("Expected function call");
    };
    assert_eq!(call.quantifier, Some(SetQuantifier::Distinct));
    assert_eq!(call.args.len(), 2);
    assert!(!call.star);
}

#[test]
fn call_without_arguments() {
    let Expr::Function(call) = projected("UUID()") else {
        panic!("Expected function call");
    };
    assert_eq!(call.name.value, "UUID");
    assert!(call.args.is_empty());
}

#[test]
fn nested_calls() {
    let Expr::Function(call) = projected("COALESCE(NULLIF(a, 0), ABS(b), 1)") else {
        panic!("Expected function call");
    };
    assert_eq!(call.args.len(), 3);
    assert!(matches!(&call.args[0], Expr::Function(inner) if inner.name.value == "NULLIF"));
}

// ===================================================================
// Current time functions
// ===================================================================

#[test]
fn current_time_functions() {
    assert!(matches!(
        projected("NOW()"),
        Expr::CurrentTime { ref function, precision: None, .. } if function.value == "NOW"
    ));
    assert!(matches!(
        projected("CURRENT_TIMESTAMP(6)"),
        Expr::CurrentTime { precision: Some(ref p), .. } if p == "6"
    ));
    assert!(matches!(
        projected("CURRENT_DATE"),
        Expr::CurrentTime { ref function, .. } if function.value == "CURRENT_DATE"
    ));
}

// ===================================================================
// Special syntax
// ===================================================================

#[test]
fn cast_and_convert() {
    let Expr::Cast { data_type, .. } = projected("CAST(a AS SIGNED)") else {
        panic!("Expected CAST");
    };
    assert_eq!(data_type.family, TypeFamily::Cast);

    let Expr::Convert { target, .. } = projected("CONVERT(a USING utf8mb4)") else {
        panic!("Expected CONVERT");
    };
    assert!(matches!(target, ConvertTarget::Charset(c) if c.value == "utf8mb4"));

    let Expr::Convert { target, .. } = projected("CONVERT(a, CHAR(10))") else {
        panic!("Expected CONVERT");
    };
    assert!(matches!(target, ConvertTarget::Type(t) if t.family == TypeFamily::Character));
}

#[test]
fn position_and_substring() {
    let Expr::Position {
        needle, haystack, ..
    } = projected("POSITION('a' IN s)")
    else {
        panic!("Expected POSITION");
    };
    assert!(matches!(*needle, Expr::Literal { .. }));
    assert_eq!(column(&haystack), "s");

    let Expr::Substring { length, .. } = projected("SUBSTRING(s FROM 2 FOR 3)") else {
        panic!("Expected SUBSTRING");
    };
    assert!(length.is_some());

    let Expr::Substring { length, .. } = projected("SUBSTR(s, 2)") else {
        panic!("Expected SUBSTR");
    };
    assert!(length.is_none());
}

#[test]
fn trim_forms() {
    let Expr::Trim {
        side, remove, expr, ..
    } = projected("TRIM(LEADING 'x' FROM s)")
    else {
        panic!("Expected TRIM");
    };
    assert_eq!(side, Some(TrimSide::Leading));
    assert!(remove.is_some());
    assert_eq!(column(&expr), "s");

    let Expr::Trim {
        side, remove, expr, ..
    } = projected("TRIM(s)")
    else {
        panic!("Expected TRIM");
    };
    assert_eq!(side, None);
    assert!(remove.is_none());
    assert_eq!(column(&expr), "s");
}

#[test]
fn date_arithmetic() {
    let Expr::DateArithmetic {
        function, amount, ..
    } = projected("DATE_ADD(d, INTERVAL 1 DAY)")
    else {
        panic!("Expected DATE_ADD");
    };
    assert_eq!(function.value, "DATE_ADD");
    assert!(matches!(*amount, Expr::Interval { ref unit, .. } if unit == "DAY"));

    let Expr::DateArithmetic { amount, .. } = projected("ADDDATE(d, 7)") else {
        panic!("Expected ADDDATE");
    };
    assert!(matches!(*amount, Expr::Literal { .. }));

    let Expr::TimestampArithmetic { function, unit, .. } = projected("TIMESTAMPDIFF(DAY, a, b)")
    else {
        panic!("Expected TIMESTAMPDIFF");
    };
    assert_eq!(function.value, "TIMESTAMPDIFF");
    assert_eq!(unit, "DAY");
}

#[test]
fn extract() {
    let Expr::Extract { unit, expr, .. } = projected("EXTRACT(YEAR FROM d)") else {
        panic!("Expected EXTRACT");
    };
    assert_eq!(unit, "YEAR");
    assert_eq!(column(&expr), "d");
}

#[test]
fn group_concat() {
    let Expr::GroupConcat {
        distinct,
        args,
        order_by,
        separator,
        ..
    } = projected("GROUP_CONCAT(DISTINCT a ORDER BY a DESC SEPARATOR ';')")
    else {
        panic!("Expected GROUP_CONCAT");
    };
    assert!(distinct);
    assert_eq!(args.len(), 1);
    assert_eq!(order_by.len(), 1);
    assert!(matches!(separator, Some(Literal::String { .. })));
}

#[test]
fn char_and_values() {
    assert!(matches!(
        projected("CHAR(77, 121 USING utf8mb4)"),
        Expr::Char { ref args, charset: Some(_), .. } if args.len() == 2
    ));
    let (statement, diagnostics) =
        reduce("INSERT INTO t (a) VALUES (1) ON DUPLICATE KEY UPDATE a = VALUES(a)");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let oxide_obsql_core::ast::Statement::Insert(insert) = statement else {
        panic!("Expected INSERT");
    };
    assert!(matches!(insert.on_duplicate[0].value, Expr::Values { .. }));
}

// ===================================================================
// Window functions
// ===================================================================

#[test]
fn window_with_partition_and_order() {
    let Expr::Window(window) = projected("ROW_NUMBER() OVER (PARTITION BY a ORDER BY b)") else {
        panic!("Expected window function");
    };
    let over = window.over.unwrap();
    assert!(over.name.is_none());
    assert_eq!(over.partition_by.len(), 1);
    assert_eq!(over.order_by.len(), 1);
    assert!(over.frame.is_none());
}

#[test]
fn window_frame() {
    let Expr::Window(window) =
        projected("SUM(a) OVER (ORDER BY b ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)")
    else {
        panic!("Expected window function");
    };
    let frame = window.over.unwrap().frame.unwrap();
    assert_eq!(frame.units, FrameUnits::Rows);
    assert!(matches!(
        frame.start,
        FrameBound::Unbounded {
            direction: FrameDirection::Preceding,
            ..
        }
    ));
    assert!(matches!(frame.end, Some(FrameBound::CurrentRow { .. })));

    let Expr::Window(window) = projected("AVG(a) OVER (ORDER BY b RANGE 2 FOLLOWING)") else {
        panic!("Expected window function");
    };
    let frame = window.over.unwrap().frame.unwrap();
    assert_eq!(frame.units, FrameUnits::Range);
    assert!(matches!(
        frame.start,
        FrameBound::Offset {
            direction: FrameDirection::Following,
            ..
        }
    ));
    assert!(frame.end.is_none());
}

#[test]
fn named_window_reference() {
    let s = select("SELECT RANK() OVER w FROM t WINDOW w AS (ORDER BY a)");
    assert_eq!(s.windows.len(), 1);
    assert_eq!(s.windows[0].name.value, "w");
    let oxide_obsql_core::ast::SelectItem::Expr {
        expr: Expr::Window(window),
        ..
    } = &s.projection[0]
    else {
        panic!("Expected window function");
    };
    assert_eq!(
        window.over.as_ref().and_then(|o| o.name.as_ref()).map(|n| n.value.as_str()),
        Some("w")
    );
}

#[test]
fn nth_value_modifiers() {
    let Expr::Window(window) =
        projected("NTH_VALUE(a, 2) FROM LAST IGNORE NULLS OVER (ORDER BY b)")
    else {
        panic!("Expected window function");
    };
    assert_eq!(window.from, Some(FromFirstLast::Last));
    assert!(window.nulls.is_some());
    assert_eq!(window.function.args.len(), 2);
}

#[test]
fn window_only_function_without_over() {
    let (_, diagnostics) = reduce("SELECT RANK() FROM t");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    assert!(diagnostics[0].message.contains("RANK"));

    for sql in ["SELECT LEAD(a) FROM t", "SELECT NTH_VALUE(a, 2) FROM t WHERE b = 1"] {
        let (_, diagnostics) = reduce(sql);
        assert_eq!(diagnostics.len(), 1, "{sql}: {diagnostics:?}");
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    }
}

// ===================================================================
// JSON_VALUE and JSON_QUERY
// ===================================================================

#[test]
fn json_value_clauses() {
    let Expr::JsonValue(value) =
        projected("JSON_VALUE(doc, '$.a' RETURNING SIGNED DEFAULT 0 ON EMPTY ERROR ON ERROR)")
    else {
        panic!("Expected JSON_VALUE");
    };
    assert!(matches!(value.path, Literal::String { .. }));
    assert!(value.returning.is_some());
    assert!(matches!(value.on_empty, Some(JsonValueResponse::Default(_))));
    assert_eq!(value.on_error, Some(JsonValueResponse::Error));
}

#[test]
fn json_value_repeated_clause_keeps_the_last() {
    let (statement, diagnostics) =
        reduce("SELECT JSON_VALUE(doc, '$.a' NULL ON ERROR ERROR ON ERROR)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::AmbiguousOption);
    assert_eq!(diagnostics[0].severity, Severity::Warning);

    let oxide_obsql_core::ast::Statement::Query(query) = statement else {
        panic!("Expected query");
    };
    let select = query.as_select().unwrap();
    let oxide_obsql_core::ast::SelectItem::Expr {
        expr: Expr::JsonValue(value),
        ..
    } = &select.projection[0]
    else {
        panic!("Expected JSON_VALUE");
    };
    assert_eq!(value.on_error, Some(JsonValueResponse::Error));
}

#[test]
fn json_query_clauses() {
    let Expr::JsonQuery(query) = projected(
        "JSON_QUERY(doc, '$.a' PRETTY ALLOW SCALARS WITH CONDITIONAL ARRAY WRAPPER \
         EMPTY ARRAY ON EMPTY NULL ON ERROR)",
    ) else {
        panic!("Expected JSON_QUERY");
    };
    assert!(query.pretty);
    assert_eq!(query.scalars, Some(true));
    let wrapper = query.wrapper.unwrap();
    assert!(wrapper.with);
    assert_eq!(wrapper.conditional, Some(true));
    assert!(wrapper.array);
    assert_eq!(query.on_empty, Some(JsonQueryResponse::EmptyArray));
    assert_eq!(query.on_error, Some(JsonQueryResponse::Null));
}
