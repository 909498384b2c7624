//! Query AST types: SELECT, set operations and their clauses.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, Literal};
use super::function::WindowSpec;
use super::name::{Ident, ObjectName};
use crate::lexer::Span;

/// A complete query expression with its trailing clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// WITH clause.
    pub with: Option<With>,
    /// Query body.
    pub body: SetExpr,
    /// ORDER BY items.
    pub order_by: Vec<OrderItem>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Oracle OFFSET / FETCH clause.
    pub fetch: Option<Fetch>,
    /// FOR UPDATE / LOCK IN SHARE MODE.
    pub lock: Option<LockClause>,
    /// Trailing INTO clause.
    pub into: Option<IntoTarget>,
    /// Source span.
    pub span: Span,
}

impl Query {
    /// Wraps a single SELECT with no trailing clauses.
    #[must_use]
    pub fn from_select(select: Select) -> Self {
        let span = select.span;
        Self {
            with: None,
            body: SetExpr::Select(Box::new(select)),
            order_by: Vec::new(),
            limit: None,
            fetch: None,
            lock: None,
            into: None,
            span,
        }
    }

    /// Returns the SELECT when the body is a single one.
    #[must_use]
    pub fn as_select(&self) -> Option<&Select> {
        match &self.body {
            SetExpr::Select(select) => Some(select),
            SetExpr::Query(query) => query.as_select(),
            SetExpr::SetOperation { .. } | SetExpr::Error { .. } => None,
        }
    }
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    Intersect,
    /// `EXCEPT` or the Oracle spelling `MINUS`.
    Except,
}

/// The body of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetExpr {
    /// A single SELECT.
    Select(Box<Select>),
    /// A parenthesised query.
    Query(Box<Query>),
    /// `left op [ALL|DISTINCT] right`, left-associative.
    SetOperation {
        /// Operator.
        op: SetOperator,
        /// ALL (true), DISTINCT (false) or neither.
        all: Option<bool>,
        /// Left operand.
        left: Box<SetExpr>,
        /// Right operand.
        right: Box<SetExpr>,
        /// Source span.
        span: Span,
    },
    /// A query body that could not be reduced.
    Error { span: Span },
}

impl SetExpr {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Select(select) => select.span,
            Self::Query(query) => query.span,
            Self::SetOperation { span, .. } | Self::Error { span } => *span,
        }
    }
}

/// A SELECT block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    /// Optimizer hint text.
    pub hint: Option<String>,
    /// Query options (`DISTINCT`, `SQL_CALC_FOUND_ROWS`, ...), upper case.
    pub options: Vec<String>,
    /// Projection.
    pub projection: Vec<SelectItem>,
    /// INTO before FROM.
    pub into: Option<IntoTarget>,
    /// FROM references.
    pub from: Vec<TableRef>,
    /// WHERE condition.
    pub selection: Option<Expr>,
    /// Oracle START WITH / CONNECT BY.
    pub hierarchy: Option<Hierarchy>,
    /// GROUP BY clause.
    pub group_by: Option<GroupBy>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// WINDOW definitions.
    pub windows: Vec<NamedWindow>,
    /// Source span.
    pub span: Span,
}

impl Select {
    /// Returns true when DISTINCT (or its synonyms) was given.
    #[must_use]
    pub fn is_distinct(&self) -> bool {
        self.options
            .iter()
            .any(|o| o == "DISTINCT" || o == "DISTINCTROW" || o == "UNIQUE")
    }
}

/// A projection item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectItem {
    /// `*`
    Wildcard {
        /// Source span.
        span: Span,
    },
    /// `expr [[AS] alias]`
    Expr {
        /// The expression.
        expr: Expr,
        /// Alias.
        alias: Option<Ident>,
        /// Source span.
        span: Span,
    },
}

/// Join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Cross,
    StraightJoin,
    Left,
    Right,
    Full,
    Natural,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
}

impl JoinKind {
    /// Returns true for the outer joins that need a join condition.
    #[must_use]
    pub const fn needs_condition(&self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Full)
    }
}

/// ON or USING.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinConstraint {
    /// `ON expr`
    On(Expr),
    /// `USING (cols)`
    Using(Vec<Ident>),
}

/// USE, FORCE or IGNORE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexHintAction {
    Use,
    Force,
    Ignore,
}

/// The scope of an index hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexHintScope {
    Join,
    OrderBy,
    GroupBy,
}

/// `USE | FORCE | IGNORE INDEX [FOR ..] (names)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHint {
    /// Hint action.
    pub action: IndexHintAction,
    /// FOR JOIN / ORDER BY / GROUP BY.
    pub scope: Option<IndexHintScope>,
    /// Index names (`PRIMARY` included as written).
    pub indexes: Vec<Ident>,
    /// Source span.
    pub span: Span,
}

/// A FROM item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableRef {
    /// A named table.
    Table {
        /// Table name.
        name: ObjectName,
        /// PARTITION (..) selection.
        partitions: Vec<Ident>,
        /// Alias.
        alias: Option<Ident>,
        /// Index hints.
        index_hints: Vec<IndexHint>,
        /// Source span.
        span: Span,
    },
    /// A derived table.
    Derived {
        /// The subquery.
        query: Box<Query>,
        /// Alias. Absent only when the reducer reported it missing.
        alias: Option<Ident>,
        /// Column aliases.
        columns: Vec<Ident>,
        /// Source span.
        span: Span,
    },
    /// `( table_references )`
    Nested {
        /// Inner references.
        tables: Vec<TableRef>,
        /// Source span.
        span: Span,
    },
    /// A join.
    Join(Box<Join>),
    /// `DUAL`
    Dual {
        /// Source span.
        span: Span,
    },
}

impl TableRef {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Join(join) => join.span,
            Self::Table { span, .. }
            | Self::Derived { span, .. }
            | Self::Nested { span, .. }
            | Self::Dual { span } => *span,
        }
    }
}

/// `left join right [condition]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    /// Left side.
    pub left: TableRef,
    /// Join type.
    pub kind: JoinKind,
    /// Right side.
    pub right: TableRef,
    /// ON / USING.
    pub constraint: Option<JoinConstraint>,
    /// Source span.
    pub span: Span,
}

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// An ORDER BY or GROUP BY item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The expression.
    pub expr: Expr,
    /// ASC / DESC, when written.
    pub direction: Option<OrderDirection>,
    /// Source span.
    pub span: Span,
}

/// GROUP BY clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBy {
    /// Grouping items.
    pub items: Vec<OrderItem>,
    /// WITH ROLLUP.
    pub with_rollup: bool,
    /// Source span.
    pub span: Span,
}

/// LIMIT clause, normalised to count and offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    /// Row count.
    pub count: Expr,
    /// Rows skipped.
    pub offset: Option<Expr>,
    /// Source span.
    pub span: Span,
}

/// Oracle row limiting:
/// `[OFFSET n ROWS] [FETCH FIRST|NEXT [n [PERCENT]] ROWS ONLY|WITH TIES]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fetch {
    /// Rows skipped.
    pub offset: Option<Expr>,
    /// FIRST or NEXT; absent without a FETCH part.
    pub direction: Option<FetchDirection>,
    /// Row count or percentage. Absent means one row.
    pub count: Option<Expr>,
    /// The count is a percentage.
    pub percent: bool,
    /// WITH TIES rather than ONLY.
    pub with_ties: bool,
    /// Source span.
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchDirection {
    First,
    Next,
}

/// Oracle hierarchical query clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    /// START WITH condition.
    pub start_with: Option<Expr>,
    /// CONNECT BY condition.
    pub connect_by: Expr,
    /// NOCYCLE.
    pub nocycle: bool,
    /// Source span.
    pub span: Span,
}

/// How FOR UPDATE waits for locks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockWait {
    /// `WAIT n`, seconds as written.
    Wait(String),
    NoWait,
    SkipLocked,
}

/// Row locking clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockClause {
    /// `FOR UPDATE [WAIT n | NOWAIT | SKIP LOCKED]`
    ForUpdate {
        /// Wait policy.
        wait: Option<LockWait>,
        /// Source span.
        span: Span,
    },
    /// `LOCK IN SHARE MODE`
    ShareMode {
        /// Source span.
        span: Span,
    },
}

/// A FIELDS / LINES sub-option of INTO OUTFILE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTerm {
    /// Option words, upper case (`TERMINATED BY`, `OPTIONALLY ENCLOSED BY`).
    pub option: String,
    /// The literal.
    pub value: Literal,
    /// Source span.
    pub span: Span,
}

/// INTO target of a SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntoTarget {
    /// `INTO OUTFILE 'f' [FIELDS ..] [LINES ..]`
    Outfile {
        /// File name literal, raw text.
        file: String,
        /// FIELDS / COLUMNS options.
        fields: Vec<ExportTerm>,
        /// LINES options.
        lines: Vec<ExportTerm>,
        /// Source span.
        span: Span,
    },
    /// `INTO DUMPFILE 'f'`
    Dumpfile {
        /// File name literal, raw text.
        file: String,
        /// Source span.
        span: Span,
    },
    /// `INTO @a, b`
    Variables {
        /// Targets: user variables or local names.
        targets: Vec<Expr>,
        /// Source span.
        span: Span,
    },
}

/// WITH clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct With {
    /// WITH RECURSIVE.
    pub recursive: bool,
    /// Common table expressions.
    pub ctes: Vec<Cte>,
    /// Source span.
    pub span: Span,
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cte {
    /// Name.
    pub name: Ident,
    /// Column aliases.
    pub columns: Vec<Ident>,
    /// Defining query.
    pub query: Query,
    /// Source span.
    pub span: Span,
}

/// `WINDOW name AS (spec)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedWindow {
    /// Window name.
    pub name: Ident,
    /// Specification.
    pub spec: WindowSpec,
    /// Source span.
    pub span: Span,
}
