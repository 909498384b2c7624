//! INSERT, REPLACE, UPDATE and DELETE.

use serde::{Deserialize, Serialize};

use super::expression::Expr;
use super::name::{Ident, ObjectName};
use super::query::{Limit, OrderItem, Query, TableRef};
use crate::lexer::Span;

/// `LOW_PRIORITY`, `DELAYED` or `HIGH_PRIORITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Delayed,
    High,
}

/// `column = value` in SET lists and ON DUPLICATE KEY UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Target column reference.
    pub column: Expr,
    /// Assigned value; [`Expr::Default`] for `DEFAULT`.
    pub value: Expr,
    /// Source span.
    pub span: Span,
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertSource {
    /// `VALUES (..), (..)`
    Values(Vec<Vec<Expr>>),
    /// `INSERT .. SELECT`
    Query(Box<Query>),
    /// `INSERT .. SET a = 1`
    Set(Vec<Assignment>),
}

/// INSERT or REPLACE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insert {
    /// REPLACE instead of INSERT.
    pub replace: bool,
    /// Optimizer hint text.
    pub hint: Option<String>,
    /// Priority modifier.
    pub priority: Option<Priority>,
    /// IGNORE.
    pub ignore: bool,
    /// Target table.
    pub table: ObjectName,
    /// PARTITION (..) selection.
    pub partitions: Vec<Ident>,
    /// Column list.
    pub columns: Vec<Ident>,
    /// Row source.
    pub source: InsertSource,
    /// ON DUPLICATE KEY UPDATE assignments.
    pub on_duplicate: Vec<Assignment>,
    /// Source span.
    pub span: Span,
}

/// UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Optimizer hint text.
    pub hint: Option<String>,
    /// LOW_PRIORITY.
    pub low_priority: bool,
    /// IGNORE.
    pub ignore: bool,
    /// Updated table references.
    pub tables: Vec<TableRef>,
    /// SET list.
    pub assignments: Vec<Assignment>,
    /// WHERE condition.
    pub selection: Option<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderItem>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Source span.
    pub span: Span,
}

/// DELETE.
///
/// The single-table form has no `targets`; the multi-table forms list the
/// tables rows are deleted from and join `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    /// Optimizer hint text.
    pub hint: Option<String>,
    /// LOW_PRIORITY / QUICK / IGNORE, upper case.
    pub options: Vec<String>,
    /// Multi-table targets.
    pub targets: Vec<ObjectName>,
    /// Table references.
    pub from: Vec<TableRef>,
    /// WHERE condition.
    pub selection: Option<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderItem>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Source span.
    pub span: Span,
}
