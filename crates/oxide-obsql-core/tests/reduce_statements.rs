//! Tests for statement reduction across the statement families, option
//! repetition and partition validation.

mod common;
use common::*;

use oxide_obsql_core::ast::{
    InsertSource, IsolationLevel, PartitionMethod, SetExpr, SetOperator, Statement,
    TableOptionKey,
};
use oxide_obsql_core::{DiagnosticKind, Severity};

/// Name of the statement variant, from its debug rendering.
fn variant(statement: &Statement) -> String {
    let debug = format!("{statement:?}");
    debug
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_owned()
}

// ===================================================================
// Statement families
// ===================================================================

#[test]
fn every_family_reduces_to_its_statement() {
    let cases = [
        ("SELECT a FROM t", "Query"),
        ("INSERT INTO t (a) VALUES (1)", "Insert"),
        ("REPLACE INTO t SET a = 1", "Insert"),
        ("UPDATE t SET a = 1 WHERE b = 2", "Update"),
        ("DELETE FROM t WHERE a = 1", "Delete"),
        ("CREATE TABLE t (a INT PRIMARY KEY)", "CreateTable"),
        ("CREATE TABLE t2 (LIKE db.t1)", "CreateTableLike"),
        ("ALTER TABLE t ADD COLUMN b INT", "AlterTable"),
        ("DROP TABLE IF EXISTS a, b", "DropTable"),
        ("TRUNCATE TABLE t", "TruncateTable"),
        ("RENAME TABLE a TO b", "RenameTable"),
        ("CREATE INDEX i ON t (a)", "CreateIndex"),
        ("CREATE VIEW v AS SELECT 1", "CreateView"),
        ("DROP PROCEDURE IF EXISTS db.p", "DropRoutine"),
        ("CREATE DATABASE IF NOT EXISTS d", "CreateDatabase"),
        ("DROP DATABASE IF EXISTS d", "DropDatabase"),
        ("USE d", "UseDatabase"),
        ("ALTER SEQUENCE db.s INCREMENT BY 5 NOCYCLE", "AlterSequence"),
        ("CREATE RESOURCE UNIT u1 MAX_CPU = 4, MEMORY_SIZE = '8G'", "CreateResource"),
        ("DROP TENANT IF EXISTS t1 PURGE", "DropTenant"),
        ("ALTER SYSTEM FLUSH PLAN CACHE GLOBAL", "AlterSystem"),
        ("FLASHBACK TABLE t TO BEFORE DROP RENAME TO t2", "Flashback"),
        ("PURGE RECYCLEBIN", "Purge"),
        ("KILL QUERY 42", "Kill"),
        ("HELP 'contents'", "Help"),
        ("CREATE USER u IDENTIFIED BY 'p'", "CreateUser"),
        ("DROP USER u1", "DropUser"),
        ("RENAME USER a TO b", "RenameUser"),
        ("SET PASSWORD = 'y'", "SetPassword"),
        ("ALTER USER u1 ACCOUNT UNLOCK", "LockUser"),
        ("CREATE ROLE r1", "CreateRole"),
        ("SET ROLE NONE", "SetRole"),
        ("GRANT SELECT ON db.* TO u1", "Grant"),
        ("REVOKE r1 FROM u", "Revoke"),
        ("BEGIN WORK", "Begin"),
        ("COMMIT WORK", "Commit"),
        ("ROLLBACK", "Rollback"),
        ("SAVEPOINT sp", "Savepoint"),
        ("ROLLBACK WORK TO SAVEPOINT sp", "RollbackToSavepoint"),
        ("RELEASE SAVEPOINT sp", "ReleaseSavepoint"),
        ("SET TRANSACTION READ ONLY", "SetTransaction"),
        ("XA START 'x1'", "Xa"),
        ("SET @a = 1", "SetVariables"),
        ("SET NAMES utf8mb4", "SetCharset"),
        ("PREPARE s FROM 'SELECT ?'", "Prepare"),
        ("EXECUTE s USING @a", "Execute"),
        ("DEALLOCATE PREPARE s", "Deallocate"),
        ("EXPLAIN SELECT 1", "Explain"),
        ("SHOW CREATE TABLE db.t", "Show"),
        ("LOCK TABLES t1 READ", "LockTables"),
        ("UNLOCK TABLES", "UnlockTables"),
    ];
    for (sql, expected) in cases {
        let forest = build(sql);
        assert!(forest.diagnostics.is_empty(), "{sql}: {:?}", forest.diagnostics);
        assert_eq!(forest.statements.len(), 1, "{sql}");
        assert_eq!(variant(&forest.statements[0]), expected, "{sql}");
    }
}

#[test]
fn insert_rows_keep_their_shape() {
    let Statement::Insert(insert) =
        statement("INSERT IGNORE INTO db.t (a, b) VALUES (1, 2), (3, DEFAULT)")
    else {
        panic!("Expected INSERT");
    };
    assert!(insert.ignore);
    assert_eq!(insert.columns.len(), 2);
    let InsertSource::Values(rows) = &insert.source else {
        panic!("Expected VALUES");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.len() == 2));
}

#[test]
fn insert_from_query() {
    let Statement::Insert(insert) = statement("INSERT INTO t SELECT a FROM u") else {
        panic!("Expected INSERT");
    };
    assert!(matches!(insert.source, InsertSource::Query(_)));
}

#[test]
fn oracle_minus_is_except() {
    let forest = build_oracle("SELECT a FROM t MINUS SELECT a FROM u");
    assert!(!forest.has_errors(), "{:?}", forest.diagnostics);
    let Statement::Query(query) = &forest.statements[0] else {
        panic!("Expected query");
    };
    assert!(matches!(
        query.body,
        SetExpr::SetOperation {
            op: SetOperator::Except,
            ..
        }
    ));
}

// ===================================================================
// Option repetition
// ===================================================================

#[test]
fn repeated_charset_keeps_the_last() {
    let (create, diagnostics) =
        create_table("CREATE TABLE t (a INT) CHARACTER SET a CHARACTER SET b");
    assert_eq!(create.options.text(TableOptionKey::Charset).as_deref(), Some("b"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::AmbiguousOption);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn repeated_option_with_the_same_value_is_quiet() {
    let (create, diagnostics) = create_table("CREATE TABLE t (a INT) COMMENT 'x' COMMENT 'x'");
    assert_eq!(create.options.len(), 1);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn repeated_transaction_characteristic_is_reported() {
    let (statement, diagnostics) =
        reduce("SET TRANSACTION ISOLATION LEVEL READ COMMITTED, ISOLATION LEVEL SERIALIZABLE");
    let Statement::SetTransaction(set) = statement else {
        panic!("Expected SET TRANSACTION");
    };
    assert_eq!(set.isolation, Some(IsolationLevel::Serializable));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::AmbiguousOption);
}

// ===================================================================
// Partitions
// ===================================================================

#[test]
fn partition_value_count_must_match_columns() {
    let sql = "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE COLUMNS(a, b) (\
               PARTITION p0 VALUES LESS THAN (1, 2, 3), \
               PARTITION p1 VALUES LESS THAN (MAXVALUE, MAXVALUE))";
    let forest = build(sql);
    assert_eq!(forest.statements.len(), 1);
    let Statement::CreateTable(create) = &forest.statements[0] else {
        panic!("Expected CREATE TABLE, got {:?}", forest.statements[0]);
    };
    let partition = create.partition.as_ref().unwrap();
    assert_eq!(partition.method, PartitionMethod::RangeColumns);
    assert_eq!(partition.partitions.len(), 2);

    assert_eq!(forest.diagnostics.len(), 1);
    let diagnostic = &forest.diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::MissingClause);
    assert_eq!(diagnostic.span, partition.partitions[0].span);
    assert!(diagnostic.message.contains("p0"), "{}", diagnostic.message);
    assert_eq!(diagnostic.span.slice(sql).map(|s| s.starts_with("PARTITION p0")), Some(true));
}

#[test]
fn well_formed_partitions_are_quiet() {
    let (create, diagnostics) = create_table(
        "CREATE TABLE t (a INT) PARTITION BY LIST(a) (\
         PARTITION p0 VALUES IN (1, 2), PARTITION p1 VALUES IN (3))",
    );
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(create.partition.unwrap().method, PartitionMethod::List);
}

// ===================================================================
// Recovery
// ===================================================================

#[test]
fn problems_in_one_statement_leave_the_others_alone() {
    let forest = build("SELECT 1; CREATE TABLE t; SELECT 2");
    assert_eq!(forest.statements.len(), 3);
    assert!(matches!(forest.statements[1], Statement::CreateTable(_)));
    assert_eq!(forest.diagnostics.len(), 1);
    assert_eq!(forest.diagnostics[0].kind, DiagnosticKind::MissingClause);
    assert!(forest.has_errors());
    assert!(!forest.is_fatal());
}
