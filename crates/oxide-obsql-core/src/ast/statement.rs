//! The top-level statement sum type.

use serde::{Deserialize, Serialize};

use super::access::{
    CreateUser, DropUser, Grant, LockUser, RenameUser, Revoke, RoleStatement, SetPassword,
    SetRole,
};
use super::admin::{
    AlterDatabase, AlterSystem, AlterTablegroup, AlterTenant, Analyze, CreateDatabase,
    CreateTablegroup, CreateTenant, DropObject, DropResource, DropTenant, Flashback, Help, Kill,
    Optimize, Purge, RecoverTenant, ResourceDef, SequenceDef, SwitchoverTenant, TablespaceDef,
    TenantSnapshot, UseDatabase,
};
use super::ddl::{
    AlterTable, CreateIndex, CreateTable, CreateTableLike, CreateView, DropIndex, DropRoutine,
    DropTable, DropView, RenameTable, TruncateTable,
};
use super::dml::{Delete, Insert, Update};
use super::query::Query;
use super::session::{
    Begin, Deallocate, Execute, Explain, LockTables, Prepare, Savepoint, SetCharset,
    SetTransaction, SetVariables, Show, TransactionEnd, Xa,
};
use crate::lexer::Span;

/// A reduced statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    // Queries and DML
    Query(Box<Query>),
    Insert(Box<Insert>),
    Update(Box<Update>),
    Delete(Box<Delete>),

    // Tables, indexes, views
    CreateTable(Box<CreateTable>),
    CreateTableLike(Box<CreateTableLike>),
    AlterTable(Box<AlterTable>),
    DropTable(DropTable),
    TruncateTable(TruncateTable),
    RenameTable(RenameTable),
    CreateIndex(Box<CreateIndex>),
    DropIndex(DropIndex),
    CreateView(Box<CreateView>),
    DropView(DropView),
    DropRoutine(DropRoutine),

    // Databases and storage objects
    CreateDatabase(CreateDatabase),
    AlterDatabase(AlterDatabase),
    DropDatabase(DropObject),
    UseDatabase(UseDatabase),
    CreateTablegroup(CreateTablegroup),
    AlterTablegroup(AlterTablegroup),
    DropTablegroup(DropObject),
    CreateTablespace(TablespaceDef),
    AlterTablespace(TablespaceDef),
    DropTablespace(DropObject),
    CreateSequence(SequenceDef),
    AlterSequence(SequenceDef),
    DropSequence(DropObject),

    // Resources and tenants
    CreateResource(ResourceDef),
    AlterResource(ResourceDef),
    DropResource(DropResource),
    CreateTenant(Box<CreateTenant>),
    AlterTenant(Box<AlterTenant>),
    DropTenant(DropTenant),
    CreateTenantSnapshot(TenantSnapshot),
    DropTenantSnapshot(TenantSnapshot),
    CreateRestorePoint(DropObject),
    DropRestorePoint(DropObject),

    // Cluster maintenance
    AlterSystem(Box<AlterSystem>),
    SwitchoverTenant(SwitchoverTenant),
    RecoverTenant(RecoverTenant),
    Flashback(Flashback),
    Purge(Purge),
    Optimize(Optimize),
    Analyze(Analyze),
    Kill(Kill),
    Help(Help),

    // Access control
    CreateUser(Box<CreateUser>),
    DropUser(DropUser),
    RenameUser(RenameUser),
    SetPassword(SetPassword),
    LockUser(LockUser),
    CreateRole(RoleStatement),
    DropRole(RoleStatement),
    SetRole(SetRole),
    Grant(Box<Grant>),
    Revoke(Box<Revoke>),

    // Transactions
    Begin(Begin),
    Commit(TransactionEnd),
    Rollback(TransactionEnd),
    Savepoint(Savepoint),
    RollbackToSavepoint(Savepoint),
    ReleaseSavepoint(Savepoint),
    SetTransaction(SetTransaction),
    Xa(Xa),

    // Session
    SetVariables(SetVariables),
    SetCharset(SetCharset),
    Prepare(Prepare),
    Execute(Execute),
    Deallocate(Deallocate),
    Explain(Box<Explain>),
    Show(Box<Show>),
    LockTables(LockTables),
    UnlockTables { span: Span },

    /// A statement that could not be reduced.
    Error { span: Span },
}

impl Statement {
    /// Returns the source span of the statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Query(s) => s.span,
            Self::Insert(s) => s.span,
            Self::Update(s) => s.span,
            Self::Delete(s) => s.span,
            Self::CreateTable(s) => s.span,
            Self::CreateTableLike(s) => s.span,
            Self::AlterTable(s) => s.span,
            Self::DropTable(s) => s.span,
            Self::TruncateTable(s) => s.span,
            Self::RenameTable(s) => s.span,
            Self::CreateIndex(s) => s.span,
            Self::DropIndex(s) => s.span,
            Self::CreateView(s) => s.span,
            Self::DropView(s) => s.span,
            Self::DropRoutine(s) => s.span,
            Self::CreateDatabase(s) => s.span,
            Self::AlterDatabase(s) => s.span,
            Self::UseDatabase(s) => s.span,
            Self::CreateTablegroup(s) => s.span,
            Self::AlterTablegroup(s) => s.span,
            Self::CreateTablespace(s) | Self::AlterTablespace(s) => s.span,
            Self::CreateSequence(s) | Self::AlterSequence(s) => s.span,
            Self::DropDatabase(s)
            | Self::DropTablegroup(s)
            | Self::DropTablespace(s)
            | Self::DropSequence(s)
            | Self::CreateRestorePoint(s)
            | Self::DropRestorePoint(s) => s.span,
            Self::CreateResource(s) | Self::AlterResource(s) => s.span,
            Self::DropResource(s) => s.span,
            Self::CreateTenant(s) => s.span,
            Self::AlterTenant(s) => s.span,
            Self::DropTenant(s) => s.span,
            Self::CreateTenantSnapshot(s) | Self::DropTenantSnapshot(s) => s.span,
            Self::AlterSystem(s) => s.span,
            Self::SwitchoverTenant(s) => s.span,
            Self::RecoverTenant(s) => s.span,
            Self::Flashback(s) => s.span,
            Self::Purge(s) => s.span,
            Self::Optimize(s) => s.span,
            Self::Analyze(s) => s.span,
            Self::Kill(s) => s.span,
            Self::Help(s) => s.span,
            Self::CreateUser(s) => s.span,
            Self::DropUser(s) => s.span,
            Self::RenameUser(s) => s.span,
            Self::SetPassword(s) => s.span,
            Self::LockUser(s) => s.span,
            Self::CreateRole(s) | Self::DropRole(s) => s.span,
            Self::SetRole(s) => s.span,
            Self::Grant(s) => s.span,
            Self::Revoke(s) => s.span,
            Self::Begin(s) => s.span,
            Self::Commit(s) | Self::Rollback(s) => s.span,
            Self::Savepoint(s) | Self::RollbackToSavepoint(s) | Self::ReleaseSavepoint(s) => s.span,
            Self::SetTransaction(s) => s.span,
            Self::Xa(s) => s.span,
            Self::SetVariables(s) => s.span,
            Self::SetCharset(s) => s.span,
            Self::Prepare(s) => s.span,
            Self::Execute(s) => s.span,
            Self::Deallocate(s) => s.span,
            Self::Explain(s) => s.span,
            Self::Show(s) => s.span,
            Self::LockTables(s) => s.span,
            Self::UnlockTables { span } | Self::Error { span } => *span,
        }
    }

    /// Returns true for the placeholder of an unreducible statement.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the statement name used in logs, in upper case.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Query(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::CreateTable(_) | Self::CreateTableLike(_) => "CREATE TABLE",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::DropTable(_) => "DROP TABLE",
            Self::TruncateTable(_) => "TRUNCATE TABLE",
            Self::RenameTable(_) => "RENAME TABLE",
            Self::CreateIndex(_) => "CREATE INDEX",
            Self::DropIndex(_) => "DROP INDEX",
            Self::CreateView(_) => "CREATE VIEW",
            Self::DropView(_) => "DROP VIEW",
            Self::DropRoutine(_) => "DROP ROUTINE",
            Self::CreateDatabase(_) => "CREATE DATABASE",
            Self::AlterDatabase(_) => "ALTER DATABASE",
            Self::DropDatabase(_) => "DROP DATABASE",
            Self::UseDatabase(_) => "USE",
            Self::CreateTablegroup(_) => "CREATE TABLEGROUP",
            Self::AlterTablegroup(_) => "ALTER TABLEGROUP",
            Self::DropTablegroup(_) => "DROP TABLEGROUP",
            Self::CreateTablespace(_) => "CREATE TABLESPACE",
            Self::AlterTablespace(_) => "ALTER TABLESPACE",
            Self::DropTablespace(_) => "DROP TABLESPACE",
            Self::CreateSequence(_) => "CREATE SEQUENCE",
            Self::AlterSequence(_) => "ALTER SEQUENCE",
            Self::DropSequence(_) => "DROP SEQUENCE",
            Self::CreateResource(_) => "CREATE RESOURCE",
            Self::AlterResource(_) => "ALTER RESOURCE",
            Self::DropResource(_) => "DROP RESOURCE",
            Self::CreateTenant(_) => "CREATE TENANT",
            Self::AlterTenant(_) => "ALTER TENANT",
            Self::DropTenant(_) => "DROP TENANT",
            Self::CreateTenantSnapshot(_) => "CREATE SNAPSHOT",
            Self::DropTenantSnapshot(_) => "DROP SNAPSHOT",
            Self::CreateRestorePoint(_) => "CREATE RESTORE POINT",
            Self::DropRestorePoint(_) => "DROP RESTORE POINT",
            Self::AlterSystem(_) | Self::SwitchoverTenant(_) | Self::RecoverTenant(_) => {
                "ALTER SYSTEM"
            }
            Self::Flashback(_) => "FLASHBACK",
            Self::Purge(_) => "PURGE",
            Self::Optimize(_) => "OPTIMIZE",
            Self::Analyze(_) => "ANALYZE",
            Self::Kill(_) => "KILL",
            Self::Help(_) => "HELP",
            Self::CreateUser(_) => "CREATE USER",
            Self::DropUser(_) => "DROP USER",
            Self::RenameUser(_) => "RENAME USER",
            Self::SetPassword(_) => "SET PASSWORD",
            Self::LockUser(_) => "ALTER USER",
            Self::CreateRole(_) => "CREATE ROLE",
            Self::DropRole(_) => "DROP ROLE",
            Self::SetRole(_) => "SET ROLE",
            Self::Grant(_) => "GRANT",
            Self::Revoke(_) => "REVOKE",
            Self::Begin(_) => "BEGIN",
            Self::Commit(_) => "COMMIT",
            Self::Rollback(_) | Self::RollbackToSavepoint(_) => "ROLLBACK",
            Self::Savepoint(_) => "SAVEPOINT",
            Self::ReleaseSavepoint(_) => "RELEASE SAVEPOINT",
            Self::SetTransaction(_) => "SET TRANSACTION",
            Self::Xa(_) => "XA",
            Self::SetVariables(_) => "SET",
            Self::SetCharset(_) => "SET NAMES",
            Self::Prepare(_) => "PREPARE",
            Self::Execute(_) => "EXECUTE",
            Self::Deallocate(_) => "DEALLOCATE PREPARE",
            Self::Explain(_) => "EXPLAIN",
            Self::Show(_) => "SHOW",
            Self::LockTables(_) => "LOCK TABLES",
            Self::UnlockTables { .. } => "UNLOCK TABLES",
            Self::Error { .. } => "ERROR",
        }
    }
}
