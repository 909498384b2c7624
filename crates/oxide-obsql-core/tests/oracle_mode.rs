//! Tests for the clauses, types and options only Oracle mode accepts.

mod common;
use common::*;

use oxide_obsql_core::ast::{
    AlterTableAction, Expr, FetchDirection, LengthUnit, OptionValue, Statement, TableOptionKey,
    TableRef, TimeZone, TypeFamily, UnaryOp,
};
use oxide_obsql_core::{parse_and_build, MySqlDialect, OracleDialect};

// ===================================================================
// Row limiting
// ===================================================================

#[test]
fn fetch_first_rows_only() {
    let query = oracle_query("SELECT a FROM t ORDER BY a FETCH FIRST 10 ROWS ONLY");
    assert_eq!(query.order_by.len(), 1);
    let fetch = query.fetch.expect("fetch clause");
    assert_eq!(fetch.direction, Some(FetchDirection::First));
    assert!(fetch.offset.is_none());
    assert!(matches!(fetch.count, Some(Expr::Literal { .. })));
    assert!(!fetch.percent);
    assert!(!fetch.with_ties);
}

#[test]
fn offset_then_fetch_next_percent_with_ties() {
    let query = oracle_query(
        "SELECT a FROM t ORDER BY a OFFSET 5 ROWS FETCH NEXT 20 PERCENT ROWS WITH TIES",
    );
    let fetch = query.fetch.expect("fetch clause");
    assert!(matches!(fetch.offset, Some(Expr::Literal { .. })));
    assert_eq!(fetch.direction, Some(FetchDirection::Next));
    assert!(fetch.percent);
    assert!(fetch.with_ties);
}

#[test]
fn offset_alone_after_a_table() {
    let query = oracle_query("SELECT a FROM t OFFSET 3 ROWS");
    let select = query.as_select().expect("plain select");
    let TableRef::Table { alias, .. } = &select.from[0] else {
        panic!("Expected a table");
    };
    assert!(alias.is_none());
    let fetch = query.fetch.expect("fetch clause");
    assert!(fetch.offset.is_some());
    assert!(fetch.direction.is_none());
    assert!(fetch.count.is_none());
}

#[test]
fn fetch_is_an_alias_in_mysql_mode() {
    let select = select("SELECT a FROM t fetch");
    let TableRef::Table { alias, .. } = &select.from[0] else {
        panic!("Expected a table");
    };
    assert_eq!(alias.as_ref().map(|a| a.value.as_str()), Some("fetch"));
}

// ===================================================================
// Hierarchical queries
// ===================================================================

#[test]
fn start_with_connect_by_prior() {
    let query = oracle_query(
        "SELECT id FROM emp e WHERE dept = 1 START WITH mgr IS NULL \
         CONNECT BY NOCYCLE PRIOR id = mgr ORDER BY id",
    );
    let select = query.as_select().expect("plain select");
    assert!(select.selection.is_some());
    let TableRef::Table { alias, .. } = &select.from[0] else {
        panic!("Expected a table");
    };
    assert_eq!(alias.as_ref().map(|a| a.value.as_str()), Some("e"));

    let hierarchy = select.hierarchy.as_ref().expect("hierarchical clause");
    assert!(hierarchy.nocycle);
    assert!(matches!(hierarchy.start_with, Some(Expr::Is { .. })), "{hierarchy:?}");
    let Expr::Binary { left, .. } = &hierarchy.connect_by else {
        panic!("Expected a comparison, got {:?}", hierarchy.connect_by);
    };
    let Expr::Unary { op, operand, .. } = left.as_ref() else {
        panic!("Expected PRIOR, got {left:?}");
    };
    assert_eq!(*op, UnaryOp::Prior);
    assert_eq!(column(operand), "id");
}

#[test]
fn connect_by_may_come_first() {
    let query = oracle_query("SELECT id FROM emp CONNECT BY PRIOR id = mgr START WITH id = 1");
    let hierarchy = query.as_select().and_then(|s| s.hierarchy.clone()).expect("hierarchy");
    assert!(!hierarchy.nocycle);
    assert!(matches!(hierarchy.start_with, Some(Expr::Binary { .. })));
    assert!(matches!(hierarchy.connect_by, Expr::Binary { .. }));
}

#[test]
fn start_with_alone_is_a_parse_error() {
    assert!(parse_and_build("SELECT id FROM emp START WITH id = 1", &OracleDialect).is_err());
}

// ===================================================================
// Outer join marker
// ===================================================================

#[test]
fn outer_join_marker_wraps_the_column() {
    let select = oracle_query("SELECT a.x FROM a, b WHERE a.id = b.id(+)")
        .as_select()
        .cloned()
        .expect("plain select");
    let Some(Expr::Binary { right, .. }) = &select.selection else {
        panic!("Expected a comparison");
    };
    let Expr::OuterJoin { expr, .. } = right.as_ref() else {
        panic!("Expected an outer join marker, got {right:?}");
    };
    assert_eq!(column(expr), "id");
}

#[test]
fn outer_join_marker_is_rejected_in_mysql_mode() {
    assert!(parse_and_build("SELECT a FROM a, b WHERE a.id = b.id(+)", &MySqlDialect).is_err());
}

// ===================================================================
// Types and table options
// ===================================================================

#[test]
fn oracle_column_types() {
    let Statement::CreateTable(create) = oracle_statement(
        "CREATE TABLE t (name VARCHAR2(30 BYTE), amount NUMBER(12, 2), \
         created TIMESTAMP WITH TIME ZONE, span INTERVAL DAY(2) TO SECOND(6))",
    ) else {
        panic!("Expected CREATE TABLE");
    };
    let types: Vec<_> = create.columns.iter().map(|c| &c.data_type).collect();
    assert_eq!(types[0].length_unit, Some(LengthUnit::Byte));
    assert_eq!(types[1].scale.as_deref(), Some("2"));
    assert_eq!(types[2].time_zone, Some(TimeZone::With));
    assert_eq!(types[3].family, TypeFamily::Interval);
    assert_eq!(types[3].to_string(), "INTERVAL DAY(2) TO SECOND(6)");
}

#[test]
fn physical_attributes_are_table_options() {
    let Statement::CreateTable(create) = oracle_statement(
        "CREATE TABLE t (a INT) PCTFREE 10 PCTUSED 40 INITRANS 2 NOCOMPRESS DISABLE ROW MOVEMENT",
    ) else {
        panic!("Expected CREATE TABLE");
    };
    let options = &create.options;
    assert_eq!(options.text(TableOptionKey::Pctfree).as_deref(), Some("10"));
    assert_eq!(options.text(TableOptionKey::Pctused).as_deref(), Some("40"));
    assert_eq!(options.text(TableOptionKey::Initrans).as_deref(), Some("2"));
    assert_eq!(options.value(TableOptionKey::Compress), Some(&OptionValue::Switch(false)));
    assert_eq!(options.value(TableOptionKey::RowMovement), Some(&OptionValue::Switch(false)));
}

#[test]
fn initrans_is_not_a_mysql_table_option() {
    assert!(parse_and_build("CREATE TABLE t (a INT) INITRANS 2", &MySqlDialect).is_err());
}

// ===================================================================
// ALTER TABLE column lists
// ===================================================================

#[test]
fn modify_and_drop_column_lists() {
    let Statement::AlterTable(alter) =
        oracle_statement("ALTER TABLE t MODIFY (a NUMBER(5), b VARCHAR2(10)), DROP (c, d)")
    else {
        panic!("Expected ALTER TABLE");
    };
    let actions: Vec<_> = alter.actions.iter().map(|a| &a.action).collect();
    let AlterTableAction::ModifyColumns(columns) = actions[0] else {
        panic!("Expected MODIFY list, got {:?}", actions[0]);
    };
    assert_eq!(columns.len(), 2);
    let AlterTableAction::DropColumns(names) = actions[1] else {
        panic!("Expected DROP list, got {:?}", actions[1]);
    };
    let names: Vec<_> = names.iter().map(|n| n.value.as_str()).collect();
    assert_eq!(names, ["c", "d"]);
}
