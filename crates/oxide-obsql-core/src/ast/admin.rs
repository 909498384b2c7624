//! Databases, tablegroups, tablespaces, sequences, resources, tenants and
//! the cluster maintenance statements.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, Literal};
use super::name::{Ident, ObjectName};
use super::options::{
    DatabaseOptions, ResourceOptions, SequenceOptions, TablegroupOptions, TablespaceOptions,
    TenantOptions,
};
use super::session::VariableAssignment;
use crate::lexer::Span;

/// `CREATE DATABASE | SCHEMA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDatabase {
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Database name.
    pub name: Ident,
    /// Database options.
    pub options: DatabaseOptions,
    /// Source span.
    pub span: Span,
}

/// `ALTER DATABASE [name] [SET] options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterDatabase {
    /// Database name; the current database when absent.
    pub name: Option<Ident>,
    /// Database options.
    pub options: DatabaseOptions,
    /// Source span.
    pub span: Span,
}

/// `DROP` of a named object that has no further clauses: databases,
/// tablegroups, tablespaces, sequences, restore points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropObject {
    /// IF EXISTS.
    pub if_exists: bool,
    /// Object name.
    pub name: ObjectName,
    /// Source span.
    pub span: Span,
}

/// `USE db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseDatabase {
    /// Database name.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

/// `CREATE TABLEGROUP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTablegroup {
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Tablegroup name.
    pub name: Ident,
    /// Tablegroup options.
    pub options: TablegroupOptions,
    /// Source span.
    pub span: Span,
}

/// What ALTER TABLEGROUP does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterTablegroupAction {
    /// `ADD [TABLE] t, ..`
    AddTables(Vec<ObjectName>),
    /// `[SET] options`
    SetOptions(TablegroupOptions),
}

/// `ALTER TABLEGROUP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterTablegroup {
    /// Tablegroup name.
    pub name: Ident,
    /// The change.
    pub action: AlterTablegroupAction,
    /// Source span.
    pub span: Span,
}

/// `CREATE TABLESPACE` and `ALTER TABLESPACE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablespaceDef {
    /// Tablespace name.
    pub name: Ident,
    /// Tablespace options.
    pub options: TablespaceOptions,
    /// Source span.
    pub span: Span,
}

/// `CREATE SEQUENCE` and `ALTER SEQUENCE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceDef {
    /// IF NOT EXISTS (create only).
    pub if_not_exists: bool,
    /// Sequence name.
    pub name: ObjectName,
    /// Sequence options.
    pub options: SequenceOptions,
    /// Source span.
    pub span: Span,
}

/// RESOURCE UNIT or RESOURCE POOL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Unit,
    Pool,
}

/// `CREATE | ALTER RESOURCE UNIT | POOL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Unit or pool.
    pub kind: ResourceKind,
    /// IF NOT EXISTS (create only).
    pub if_not_exists: bool,
    /// Resource name.
    pub name: Ident,
    /// Resource options.
    pub options: ResourceOptions,
    /// Source span.
    pub span: Span,
}

/// `DROP RESOURCE UNIT | POOL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropResource {
    /// Unit or pool.
    pub kind: ResourceKind,
    /// IF EXISTS.
    pub if_exists: bool,
    /// Resource name.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

/// `CREATE TENANT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTenant {
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Tenant name.
    pub name: Ident,
    /// Tenant options.
    pub options: TenantOptions,
    /// `SET [VARIABLES] ..` assignments.
    pub variables: Vec<VariableAssignment>,
    /// Source span.
    pub span: Span,
}

/// What ALTER TENANT does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterTenantAction {
    /// `[SET] options [VARIABLES ..]`
    Set {
        /// Tenant options.
        options: TenantOptions,
        /// Variable assignments.
        variables: Vec<VariableAssignment>,
    },
    /// `RENAME GLOBAL_NAME TO name`
    Rename(Ident),
    /// `ACCOUNT LOCK` (true) or `ACCOUNT UNLOCK` (false)
    Lock(bool),
}

/// `ALTER TENANT name | ALL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterTenant {
    /// Tenant name; every tenant when absent (`ALL`).
    pub name: Option<Ident>,
    /// The change.
    pub action: AlterTenantAction,
    /// Source span.
    pub span: Span,
}

/// `DROP TENANT [IF EXISTS] name [FORCE | PURGE]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTenant {
    /// IF EXISTS.
    pub if_exists: bool,
    /// Tenant name.
    pub name: Ident,
    /// FORCE.
    pub force: bool,
    /// PURGE.
    pub purge: bool,
    /// Source span.
    pub span: Span,
}

/// `CREATE | DROP SNAPSHOT [name] [FOR TENANT t]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSnapshot {
    /// Snapshot name.
    pub name: Option<Ident>,
    /// Tenant.
    pub tenant: Option<Ident>,
    /// Source span.
    pub span: Span,
}

/// Switchover operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchoverAction {
    ActivateStandby,
    SwitchoverToPrimary,
    SwitchoverToStandby,
    FailoverToPrimary,
}

/// `ALTER SYSTEM ACTIVATE STANDBY | SWITCHOVER TO .. | FAILOVER TO ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchoverTenant {
    /// Operation.
    pub action: SwitchoverAction,
    /// Target tenant.
    pub tenant: Option<Ident>,
    /// VERIFY.
    pub verify: bool,
    /// Source span.
    pub span: Span,
}

/// How far RECOVER STANDBY replays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoverPoint {
    /// `CANCEL`
    Cancel,
    /// `UNTIL TIME = '..'`
    Time(Literal),
    /// `UNTIL SCN = n`, as written.
    Scn(String),
    /// `UNTIL UNLIMITED`
    Unlimited,
}

/// `ALTER SYSTEM RECOVER STANDBY [TENANT = t] [UNTIL .. | CANCEL]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverTenant {
    /// Target tenant.
    pub tenant: Option<Ident>,
    /// Recovery point.
    pub until: Option<RecoverPoint>,
    /// Source span.
    pub span: Span,
}

/// `name = value [COMMENT '..'] [SCOPE = ..] [TENANT = t]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemParameter {
    /// Parameter name.
    pub name: Ident,
    /// New value.
    pub value: Expr,
    /// COMMENT.
    pub comment: Option<Literal>,
    /// SCOPE, upper case.
    pub scope: Option<String>,
    /// Target tenant.
    pub tenant: Option<Ident>,
    /// Source span.
    pub span: Span,
}

/// What plain ALTER SYSTEM does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemAction {
    /// `MAJOR | MINOR FREEZE [TENANT = t]`
    Freeze {
        /// MAJOR (true) or MINOR (false).
        major: bool,
        /// Target tenant.
        tenant: Option<Ident>,
    },
    /// `FLUSH kind CACHE [TENANT = t] [GLOBAL]`
    FlushCache {
        /// Cache kind, upper case.
        cache: String,
        /// Target tenant.
        tenant: Option<Ident>,
        /// GLOBAL.
        global: bool,
    },
    /// `[SET] name = value, ..`
    SetParameters(Vec<SystemParameter>),
}

/// `ALTER SYSTEM ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterSystem {
    /// The operation.
    pub action: SystemAction,
    /// Source span.
    pub span: Span,
}

/// What FLASHBACK restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashbackTarget {
    Table(ObjectName),
    Database(Ident),
    Tenant(Ident),
}

/// `FLASHBACK .. TO BEFORE DROP [RENAME TO ..]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashback {
    /// Restored object.
    pub target: FlashbackTarget,
    /// New name.
    pub rename: Option<ObjectName>,
    /// Source span.
    pub span: Span,
}

/// What PURGE removes from the recycle bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurgeTarget {
    Table(ObjectName),
    Index(ObjectName),
    Database(Ident),
    Tenant(Ident),
    Recyclebin,
}

/// `PURGE ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purge {
    /// Purged object.
    pub target: PurgeTarget,
    /// Source span.
    pub span: Span,
}

/// What OPTIMIZE compacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizeTarget {
    AllTenants,
    Tenant(Ident),
    Tables(Vec<ObjectName>),
}

/// `OPTIMIZE ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimize {
    /// Optimized objects.
    pub target: OptimizeTarget,
    /// Source span.
    pub span: Span,
}

/// `UPDATE | DROP HISTOGRAM ON cols [WITH n BUCKETS]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramAction {
    /// UPDATE (true) or DROP (false).
    pub update: bool,
    /// Columns.
    pub columns: Vec<Ident>,
    /// Bucket count, as written.
    pub buckets: Option<String>,
    /// Source span.
    pub span: Span,
}

/// `ANALYZE TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analyze {
    /// Analyzed table.
    pub table: ObjectName,
    /// PARTITION (..) selection.
    pub partitions: Vec<Ident>,
    /// Histogram maintenance.
    pub histogram: Option<HistogramAction>,
    /// Source span.
    pub span: Span,
}

/// `KILL [CONNECTION | QUERY] id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kill {
    /// QUERY (true) kills only the running statement.
    pub query_only: bool,
    /// Session id.
    pub id: Expr,
    /// Source span.
    pub span: Span,
}

/// `HELP topic`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Help {
    /// Topic.
    pub topic: Ident,
    /// Source span.
    pub span: Span,
}
