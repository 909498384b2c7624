//! Abstract Syntax Tree (AST) types produced by the reducers.
//!
//! Every node carries the span of the concrete subtree it was reduced from.
//! Nodes that could not be reduced are kept as explicit error variants
//! (`Expr::Error`, `SetExpr::Error`, `Statement::Error`) rather than dropped.

mod access;
mod admin;
mod ddl;
mod dml;
mod expression;
mod function;
mod name;
mod options;
mod partition;
mod query;
mod session;
mod statement;
mod types;

pub use access::{
    CreateUser, DropUser, Grant, GrantObjectKind, GrantOption, GrantTarget, LockUser, Privilege,
    PrivilegeLevel, RenameUser, Revoke, RoleSelection, RoleStatement, SetPassword, SetRole,
    TlsOption, TlsRequirement, UserAuth, UserRename, UserSpec,
};
pub use admin::{
    AlterDatabase, AlterSystem, AlterTablegroup, AlterTablegroupAction, AlterTenant,
    AlterTenantAction, Analyze, CreateDatabase, CreateTablegroup, CreateTenant, DropObject,
    DropResource, DropTenant, Flashback, FlashbackTarget, Help, HistogramAction, Kill, Optimize,
    OptimizeTarget, Purge, PurgeTarget, RecoverPoint, RecoverTenant, ResourceDef, ResourceKind,
    SequenceDef, SwitchoverAction, SwitchoverTenant, SystemAction, SystemParameter,
    TablespaceDef, TenantSnapshot, UseDatabase,
};
pub use ddl::{
    AlterTable, AlterTableAction, AlterTableItem, CheckConstraint, ColumnDef, ColumnPosition,
    CreateIndex, CreateTable, CreateTableLike, CreateView, DropBehavior, DropIndex, DropRoutine,
    DropTable, DropView, DuplicateHandling, ForeignKey, ForeignKeyReference, GeneratedColumn,
    GeneratedStorage, IndexAlgorithm, IndexDef, IndexKey, IndexKind, MatchType, ReferenceAction,
    RenameTable, RoutineKind, SortColumn, TableConstraint, TableElement, TableRename,
    TruncateTable, ViewCheckOption, ViewSecurity,
};
pub use dml::{Assignment, Delete, Insert, InsertSource, Priority, Update};
pub use expression::{
    unescape, BinaryOp, ConvertTarget, Expr, IsTarget, Literal, Quantifier, TemporalKind,
    TrimSide, UnaryOp, WhenBranch,
};
pub use function::{
    FrameBound, FrameDirection, FrameUnits, FromFirstLast, FunctionCall, JsonQuery,
    JsonQueryResponse, JsonValue, JsonValueResponse, JsonWrapper, NullTreatment, SetQuantifier,
    WindowFrame, WindowFunction, WindowSpec,
};
pub use name::{Ident, ObjectName, UserName};
pub use options::{
    DatabaseOptionKey, DatabaseOptions, IndexOptionKey, IndexOptions, OptionEntry, OptionKey,
    OptionSet, OptionValue, PartitionAttrKey, PartitionAttributes, ResourceOptionKey,
    ResourceOptions, SequenceOptionKey, SequenceOptions, TableOptionKey, TableOptions,
    TablegroupOptionKey, TablegroupOptions, TablespaceOptionKey, TablespaceOptions,
    TenantOptionKey, TenantOptions, UserResourceKey, UserResources,
};
pub use partition::{
    AlterPartition, ElementKind, PartitionBound, PartitionElement, PartitionMethod, PartitionSpec,
    RangeValue, SubpartitionSpec,
};
pub use query::{
    Cte, ExportTerm, Fetch, FetchDirection, GroupBy, Hierarchy, IndexHint, IndexHintAction,
    IndexHintScope, IntoTarget, Join, JoinConstraint, JoinKind, Limit, LockClause, LockWait,
    NamedWindow, OrderDirection, OrderItem, Query, Select, SelectItem, SetExpr, SetOperator,
    TableRef, With,
};
pub use session::{
    Begin, Deallocate, Execute, Explain, ExplainTarget, IsolationLevel, LockTable, LockTables,
    Prepare, PrepareSource, Savepoint, SetCharset, SetTransaction, SetVariables, Show, ShowFilter,
    TableLockKind, TransactionEnd, TransactionMode, VariableAssignment, VariableScope,
    VariableTarget, VariableValue, Xa, XaAction,
};
pub use statement::Statement;
pub use types::{DataType, LengthUnit, TimeZone, TypeFamily};
