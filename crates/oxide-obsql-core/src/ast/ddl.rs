//! Table, index and view definitions.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, Literal};
use super::name::{Ident, ObjectName, UserName};
use super::options::{IndexOptions, TableOptions};
use super::partition::{AlterPartition, PartitionSpec};
use super::query::{OrderDirection, Query};
use super::types::DataType;
use crate::lexer::Span;

/// What CREATE TABLE .. AS SELECT does with duplicate keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateHandling {
    Ignore,
    Replace,
}

/// `CREATE [TEMPORARY | EXTERNAL] TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTable {
    /// TEMPORARY.
    pub temporary: bool,
    /// EXTERNAL.
    pub external: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
    /// Out-of-line constraints and indexes.
    pub constraints: Vec<TableConstraint>,
    /// Table options.
    pub options: TableOptions,
    /// Partitioning.
    pub partition: Option<PartitionSpec>,
    /// IGNORE / REPLACE before AS SELECT.
    pub duplicates: Option<DuplicateHandling>,
    /// AS SELECT.
    pub query: Option<Box<Query>>,
    /// Source span.
    pub span: Span,
}

/// `CREATE TABLE t LIKE s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTableLike {
    /// TEMPORARY.
    pub temporary: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// New table.
    pub name: ObjectName,
    /// Template table.
    pub source: ObjectName,
    /// Source span.
    pub span: Span,
}

/// One element of a CREATE TABLE body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

/// VIRTUAL or STORED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedStorage {
    Virtual,
    Stored,
}

/// `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedColumn {
    /// Generating expression.
    pub expr: Expr,
    /// Storage, when written.
    pub storage: Option<GeneratedStorage>,
    /// Source span.
    pub span: Span,
}

/// Placement of an added or modified column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnPosition {
    First,
    Before(Ident),
    After(Ident),
}

/// `[CONSTRAINT name] CHECK (expr) [[NOT] ENFORCED]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConstraint {
    /// Constraint name.
    pub name: Option<Ident>,
    /// Checked condition.
    pub expr: Expr,
    /// ENFORCED (true) or NOT ENFORCED (false).
    pub enforced: Option<bool>,
    /// Source span.
    pub span: Span,
}

/// A column definition.
///
/// Attributes are folded in source order; a repeated attribute keeps its
/// last value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Table qualifier (`t.c`).
    pub table: Option<Ident>,
    /// Column name.
    pub name: Ident,
    /// Data type.
    pub data_type: DataType,
    /// Generated column expression.
    pub generated: Option<GeneratedColumn>,
    /// NULL (true) or NOT NULL (false).
    pub nullable: Option<bool>,
    /// DEFAULT value.
    pub default: Option<Expr>,
    /// AUTO_INCREMENT.
    pub auto_increment: bool,
    /// PRIMARY KEY (or bare KEY).
    pub primary_key: bool,
    /// UNIQUE [KEY].
    pub unique: bool,
    /// COMMENT.
    pub comment: Option<Literal>,
    /// ON UPDATE.
    pub on_update: Option<Expr>,
    /// COLLATE.
    pub collation: Option<Ident>,
    /// CHECK constraints.
    pub checks: Vec<CheckConstraint>,
    /// SRID, as written.
    pub srid: Option<String>,
    /// Column ID, as written.
    pub id: Option<String>,
    /// VISIBLE (true) or INVISIBLE (false).
    pub visible: Option<bool>,
    /// Inline REFERENCES.
    pub references: Option<ForeignKeyReference>,
    /// FIRST / BEFORE / AFTER.
    pub position: Option<ColumnPosition>,
    /// Source span.
    pub span: Span,
}

impl ColumnDef {
    /// Creates a column with no attributes.
    #[must_use]
    pub const fn new(name: Ident, data_type: DataType, span: Span) -> Self {
        Self {
            table: None,
            name,
            data_type,
            generated: None,
            nullable: None,
            default: None,
            auto_increment: false,
            primary_key: false,
            unique: false,
            comment: None,
            on_update: None,
            collation: None,
            checks: Vec::new(),
            srid: None,
            id: None,
            visible: None,
            references: None,
            position: None,
            span,
        }
    }
}

/// `MATCH FULL | PARTIAL | SIMPLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Full,
    Partial,
    Simple,
}

/// Referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceAction {
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
    NoAction,
}

/// `REFERENCES t (cols) [MATCH ..] [ON DELETE ..] [ON UPDATE ..]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyReference {
    /// Referenced table.
    pub table: ObjectName,
    /// Referenced columns.
    pub columns: Vec<Ident>,
    /// MATCH type.
    pub match_type: Option<MatchType>,
    /// ON DELETE.
    pub on_delete: Option<ReferenceAction>,
    /// ON UPDATE.
    pub on_update: Option<ReferenceAction>,
    /// Source span.
    pub span: Span,
}

/// Index flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    Plain,
    Unique,
    Primary,
    Fulltext,
    Spatial,
}

/// `USING BTREE | HASH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexAlgorithm {
    BTree,
    Hash,
}

/// The key of an index column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKey {
    /// `col [(prefix)]`
    Column {
        /// Column name.
        name: Ident,
        /// Prefix length, as written.
        length: Option<String>,
    },
    /// `(expr)`
    Expr(Expr),
}

/// An index column with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn {
    /// Column or expression.
    pub key: IndexKey,
    /// ASC / DESC.
    pub direction: Option<OrderDirection>,
    /// Source span.
    pub span: Span,
}

/// An index: out-of-line key definitions, PRIMARY KEY and UNIQUE
/// constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index flavour.
    pub kind: IndexKind,
    /// `CONSTRAINT name`.
    pub constraint_name: Option<Ident>,
    /// Index name.
    pub name: Option<Ident>,
    /// USING algorithm.
    pub algorithm: Option<IndexAlgorithm>,
    /// Indexed columns.
    pub columns: Vec<SortColumn>,
    /// Index options.
    pub options: IndexOptions,
    /// Index-level partitioning.
    pub partition: Option<PartitionSpec>,
    /// Source span.
    pub span: Span,
}

/// `[CONSTRAINT name] FOREIGN KEY [idx] (cols) REFERENCES ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub constraint_name: Option<Ident>,
    /// Index name.
    pub index_name: Option<Ident>,
    /// Referencing columns.
    pub columns: Vec<Ident>,
    /// Referenced table and columns.
    pub references: ForeignKeyReference,
    /// Source span.
    pub span: Span,
}

/// An out-of-line constraint or index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableConstraint {
    Index(IndexDef),
    ForeignKey(ForeignKey),
    Check(CheckConstraint),
}

impl TableConstraint {
    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Index(index) => index.span,
            Self::ForeignKey(fk) => fk.span,
            Self::Check(check) => check.span,
        }
    }
}

/// CASCADE or RESTRICT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropBehavior {
    Cascade,
    Restrict,
}

/// An ALTER TABLE action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterTableAction {
    /// Table options.
    Options(TableOptions),
    /// `CONVERT TO CHARACTER SET cs [COLLATE c]`
    ConvertCharset {
        /// Target charset.
        charset: Ident,
        /// Target collation.
        collation: Option<Ident>,
    },
    /// `ADD [COLUMN] def` or `ADD [COLUMN] (def, ..)`
    AddColumns(Vec<ColumnDef>),
    /// `ADD constraint-or-index`
    AddConstraint(TableConstraint),
    /// `DROP [COLUMN] c [CASCADE | RESTRICT]`
    DropColumn {
        /// Dropped column.
        name: Ident,
        /// CASCADE / RESTRICT.
        behavior: Option<DropBehavior>,
    },
    /// Oracle `DROP (a, b)`
    DropColumns(Vec<Ident>),
    /// `ALTER [COLUMN] c SET DEFAULT v` (`Some`) or `DROP DEFAULT` (`None`)
    AlterColumnDefault {
        /// Altered column.
        column: Ident,
        /// New default.
        default: Option<Expr>,
    },
    /// `CHANGE [COLUMN] old def`
    ChangeColumn {
        /// Current name.
        old: Ident,
        /// New definition.
        column: ColumnDef,
    },
    /// `MODIFY [COLUMN] def`
    ModifyColumn(ColumnDef),
    /// Oracle `MODIFY (def, ..)`
    ModifyColumns(Vec<ColumnDef>),
    /// `RENAME COLUMN a TO b`
    RenameColumn {
        /// Current name.
        old: Ident,
        /// New name.
        new: Ident,
    },
    /// `DROP INDEX | KEY name`
    DropIndex(Ident),
    /// `DROP PRIMARY KEY`
    DropPrimaryKey,
    /// `DROP CONSTRAINT | CHECK name`
    DropConstraint(Ident),
    /// `DROP FOREIGN KEY name`
    DropForeignKey(Ident),
    /// `RENAME INDEX | KEY a TO b`
    RenameIndex {
        /// Current name.
        old: Ident,
        /// New name.
        new: Ident,
    },
    /// `ALTER INDEX name VISIBLE | INVISIBLE`
    IndexVisibility {
        /// Index name.
        name: Ident,
        /// VISIBLE.
        visible: bool,
    },
    /// `ALTER CHECK | CONSTRAINT name [NOT] ENFORCED`
    CheckEnforcement {
        /// Constraint name.
        name: Ident,
        /// ENFORCED.
        enforced: bool,
    },
    /// Partition maintenance.
    Partition(AlterPartition),
    /// `RENAME [TO | AS] name`
    Rename(ObjectName),
    /// `DROP TABLEGROUP`
    DropTablegroup,
}

/// One ALTER TABLE action with its span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterTableItem {
    /// The action.
    pub action: AlterTableAction,
    /// Source span.
    pub span: Span,
}

/// `ALTER [EXTERNAL] TABLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterTable {
    /// EXTERNAL.
    pub external: bool,
    /// Altered table.
    pub name: ObjectName,
    /// Actions in source order.
    pub actions: Vec<AlterTableItem>,
    /// Source span.
    pub span: Span,
}

/// `DROP [TEMPORARY] TABLE | TABLES`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTable {
    /// TEMPORARY.
    pub temporary: bool,
    /// IF EXISTS.
    pub if_exists: bool,
    /// Dropped tables.
    pub names: Vec<ObjectName>,
    /// CASCADE / RESTRICT.
    pub behavior: Option<DropBehavior>,
    /// Source span.
    pub span: Span,
}

/// `TRUNCATE [TABLE] t`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncateTable {
    /// Truncated table.
    pub name: ObjectName,
    /// Source span.
    pub span: Span,
}

/// `a TO b` of RENAME TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRename {
    /// Current name.
    pub from: ObjectName,
    /// New name.
    pub to: ObjectName,
    /// Source span.
    pub span: Span,
}

/// `RENAME TABLE a TO b, ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTable {
    /// Renames in source order.
    pub renames: Vec<TableRename>,
    /// Source span.
    pub span: Span,
}

/// `CREATE [UNIQUE | FULLTEXT | SPATIAL] INDEX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndex {
    /// Index flavour.
    pub kind: IndexKind,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Index name.
    pub name: Ident,
    /// USING algorithm.
    pub algorithm: Option<IndexAlgorithm>,
    /// Indexed table.
    pub table: ObjectName,
    /// Indexed columns. Empty only when the reducer reported them missing.
    pub columns: Vec<SortColumn>,
    /// Index options.
    pub options: IndexOptions,
    /// Index partitioning.
    pub partition: Option<PartitionSpec>,
    /// Source span.
    pub span: Span,
}

/// `DROP INDEX name ON t`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndex {
    /// Index name.
    pub name: Ident,
    /// Table.
    pub table: ObjectName,
    /// Source span.
    pub span: Span,
}

/// `SQL SECURITY DEFINER | INVOKER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewSecurity {
    Definer,
    Invoker,
}

/// `WITH [CASCADED | LOCAL] CHECK OPTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCheckOption {
    /// No qualifier.
    Default,
    Cascaded,
    Local,
}

/// `CREATE [OR REPLACE] VIEW`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateView {
    /// OR REPLACE.
    pub or_replace: bool,
    /// ALGORITHM.
    pub algorithm: Option<Ident>,
    /// DEFINER.
    pub definer: Option<UserName>,
    /// SQL SECURITY.
    pub security: Option<ViewSecurity>,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// View name.
    pub name: ObjectName,
    /// Column names.
    pub columns: Vec<Ident>,
    /// Defining query. Absent only when the reducer reported it missing.
    pub query: Option<Box<Query>>,
    /// WITH CHECK OPTION.
    pub check_option: Option<ViewCheckOption>,
    /// Source span.
    pub span: Span,
}

/// `DROP VIEW`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropView {
    /// IF EXISTS.
    pub if_exists: bool,
    /// Dropped views.
    pub names: Vec<ObjectName>,
    /// CASCADE / RESTRICT.
    pub behavior: Option<DropBehavior>,
    /// Source span.
    pub span: Span,
}

/// Stored routine kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineKind {
    Function,
    Procedure,
    Trigger,
}

/// `DROP FUNCTION | PROCEDURE | TRIGGER [IF EXISTS] name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRoutine {
    /// Routine kind.
    pub kind: RoutineKind,
    /// IF EXISTS.
    pub if_exists: bool,
    /// Routine name.
    pub name: ObjectName,
    /// Source span.
    pub span: Span,
}
