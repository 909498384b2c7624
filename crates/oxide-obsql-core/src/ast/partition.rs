//! Partitioning clauses.

use serde::{Deserialize, Serialize};

use super::expression::Expr;
use super::name::{Ident, ObjectName};
use super::options::PartitionAttributes;
use crate::lexer::Span;

/// Partitioning method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionMethod {
    Hash,
    Key,
    Range,
    RangeColumns,
    List,
    ListColumns,
}

impl PartitionMethod {
    /// Returns true for methods partitioned by a column list.
    #[must_use]
    pub const fn uses_columns(&self) -> bool {
        matches!(self, Self::Key | Self::RangeColumns | Self::ListColumns)
    }

    /// Returns the element bound this method expects.
    #[must_use]
    pub const fn element_kind(&self) -> ElementKind {
        match self {
            Self::Hash | Self::Key => ElementKind::Hash,
            Self::Range | Self::RangeColumns => ElementKind::Range,
            Self::List | Self::ListColumns => ElementKind::List,
        }
    }

    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Key => "KEY",
            Self::Range => "RANGE",
            Self::RangeColumns => "RANGE COLUMNS",
            Self::List => "LIST",
            Self::ListColumns => "LIST COLUMNS",
        }
    }
}

/// The shape of a partition element, given by its bound clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// No bound.
    Hash,
    /// `VALUES LESS THAN`.
    Range,
    /// `VALUES IN`.
    List,
}

/// One value of a `VALUES LESS THAN` bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeValue {
    MaxValue,
    Expr(Expr),
}

/// A partition bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionBound {
    /// `VALUES LESS THAN (v, ..)` or `VALUES LESS THAN MAXVALUE`.
    LessThan(Vec<RangeValue>),
    /// `VALUES IN (v, ..)`; tuples are [`Expr::Row`].
    In(Vec<Expr>),
    /// `VALUES IN (DEFAULT)`.
    InDefault,
}

/// A partition or subpartition definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionElement {
    /// Partition name.
    pub name: ObjectName,
    /// Whether this is a SUBPARTITION element.
    pub sub: bool,
    /// Shape of the element.
    pub kind: ElementKind,
    /// Bound clause.
    pub bound: Option<PartitionBound>,
    /// ID, ENGINE, COMMENT, TABLESPACE.
    pub attributes: PartitionAttributes,
    /// Per-partition subpartitions.
    pub subpartitions: Vec<PartitionElement>,
    /// Source span.
    pub span: Span,
}

/// `SUBPARTITION BY ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubpartitionSpec {
    /// Subpartitioning method.
    pub method: PartitionMethod,
    /// Partitioning expression.
    pub expr: Option<Expr>,
    /// Partitioning columns.
    pub columns: Vec<Ident>,
    /// `SUBPARTITION TEMPLATE (..)` elements.
    pub template: Vec<PartitionElement>,
    /// `SUBPARTITIONS n`, as written.
    pub count: Option<String>,
    /// Source span.
    pub span: Span,
}

/// `PARTITION BY ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
    /// Partitioning method.
    pub method: PartitionMethod,
    /// Partitioning expression (HASH, RANGE, LIST).
    pub expr: Option<Expr>,
    /// Partitioning columns (KEY, RANGE COLUMNS, LIST COLUMNS).
    pub columns: Vec<Ident>,
    /// `PARTITIONS n`, as written.
    pub count: Option<String>,
    /// Subpartitioning.
    pub subpartition: Option<SubpartitionSpec>,
    /// Partition elements.
    pub partitions: Vec<PartitionElement>,
    /// Source span.
    pub span: Span,
}

/// A partition maintenance action of ALTER TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterPartition {
    /// `ADD PARTITION (..)`
    Add(Vec<PartitionElement>),
    /// `DROP PARTITION | SUBPARTITION names`
    Drop {
        /// Whether SUBPARTITION was written.
        sub: bool,
        /// Dropped names.
        names: Vec<Ident>,
    },
    /// `TRUNCATE PARTITION | SUBPARTITION names`
    Truncate {
        /// Whether SUBPARTITION was written.
        sub: bool,
        /// Truncated names.
        names: Vec<Ident>,
    },
    /// `REORGANIZE PARTITION names INTO (..)`
    Reorganize {
        /// Source partitions.
        names: Vec<Ident>,
        /// New partitions.
        into: Vec<PartitionElement>,
    },
    /// `REMOVE PARTITIONING`
    Remove,
    /// `PARTITION BY ..` on an existing table.
    Repartition(PartitionSpec),
}
