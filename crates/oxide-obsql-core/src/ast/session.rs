//! Transactions, session variables, prepared statements, EXPLAIN, SHOW and
//! table locks.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, Literal};
use super::name::{Ident, ObjectName, UserName};
use super::query::Limit;
use super::statement::Statement;
use crate::lexer::Span;

/// Transaction characteristic from START TRANSACTION.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionMode {
    ConsistentSnapshot,
    ReadOnly,
    ReadWrite,
}

/// `BEGIN [WORK]` and `START TRANSACTION [modes]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Begin {
    /// Written as START TRANSACTION.
    pub start: bool,
    /// Characteristics.
    pub modes: Vec<TransactionMode>,
    /// Source span.
    pub span: Span,
}

/// `COMMIT` and `ROLLBACK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnd {
    /// WORK.
    pub work: bool,
    /// Source span.
    pub span: Span,
}

/// `SAVEPOINT sp`, `RELEASE SAVEPOINT sp` and `ROLLBACK TO sp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savepoint {
    /// Savepoint name.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

/// Variable scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableScope {
    Global,
    Session,
    Persist,
    PersistOnly,
}

impl VariableScope {
    /// Classifies a scope word. LOCAL is SESSION.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "GLOBAL" => Some(Self::Global),
            "SESSION" | "LOCAL" => Some(Self::Session),
            "PERSIST" => Some(Self::Persist),
            "PERSIST_ONLY" => Some(Self::PersistOnly),
            _ => None,
        }
    }
}

/// Transaction isolation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// `SET [scope] TRANSACTION ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTransaction {
    /// Scope; next transaction only when absent.
    pub scope: Option<VariableScope>,
    /// Isolation level; the last one written wins.
    pub isolation: Option<IsolationLevel>,
    /// READ ONLY (true) or READ WRITE (false); the last one written wins.
    pub read_only: Option<bool>,
    /// Source span.
    pub span: Span,
}

/// XA verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XaAction {
    Start,
    End,
    Prepare,
    Commit,
    Rollback,
}

/// `XA verb xid [ONE PHASE]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xa {
    /// Verb.
    pub action: XaAction,
    /// Transaction id parts.
    pub xid: Vec<Expr>,
    /// ONE PHASE (commit only).
    pub one_phase: bool,
    /// Source span.
    pub span: Span,
}

/// Left side of a SET assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableTarget {
    /// `@name`
    User(String),
    /// `[scope] name`, `@@[scope.]name`
    System {
        /// Scope, session when absent.
        scope: Option<VariableScope>,
        /// Variable name, possibly dotted.
        name: String,
    },
}

/// Right side of a SET assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableValue {
    Expr(Expr),
    /// A bare keyword value such as DEFAULT, ON, ALL or BINARY.
    Keyword(String),
}

/// `target = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAssignment {
    /// Assigned variable.
    pub target: VariableTarget,
    /// New value.
    pub value: VariableValue,
    /// Source span.
    pub span: Span,
}

/// `SET a = 1, ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVariables {
    /// Assignments in order.
    pub assignments: Vec<VariableAssignment>,
    /// Source span.
    pub span: Span,
}

/// `SET NAMES cs [COLLATE co] | DEFAULT` and `SET CHARACTER SET cs | DEFAULT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCharset {
    /// SET NAMES (true) or SET CHARACTER SET (false).
    pub names: bool,
    /// Charset; DEFAULT when absent.
    pub charset: Option<Ident>,
    /// Collation.
    pub collation: Option<Ident>,
    /// Source span.
    pub span: Span,
}

/// Text of a prepared statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepareSource {
    Text(Literal),
    Variable(String),
}

/// `PREPARE name FROM ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prepare {
    /// Statement name.
    pub name: Ident,
    /// Statement text.
    pub source: PrepareSource,
    /// Source span.
    pub span: Span,
}

/// `EXECUTE name [USING @a, ..]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execute {
    /// Statement name.
    pub name: Ident,
    /// User variable arguments.
    pub arguments: Vec<String>,
    /// Source span.
    pub span: Span,
}

/// `DEALLOCATE | DROP PREPARE name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deallocate {
    /// Statement name.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

/// What EXPLAIN describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplainTarget {
    /// `EXPLAIN [option] stmt`
    Statement(Box<Statement>),
    /// `DESC table [column | 'pattern']`
    Table {
        /// Described table.
        table: ObjectName,
        /// Column name or pattern.
        column: Option<Ident>,
    },
}

/// `EXPLAIN` and `DESCRIBE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explain {
    /// Option word such as EXTENDED, upper case.
    pub option: Option<String>,
    /// `FORMAT = name`.
    pub format: Option<Ident>,
    /// Described object.
    pub target: ExplainTarget,
    /// Source span.
    pub span: Span,
}

/// SHOW filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowFilter {
    Like(Literal),
    Where(Expr),
    Limit(Limit),
}

/// `SHOW ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Object words, upper case and space separated.
    pub target: String,
    /// Object named after `SHOW CREATE kind`.
    pub object: Option<ObjectName>,
    /// FROM | IN scopes in order.
    pub from: Vec<ObjectName>,
    /// `FOR user`.
    pub for_user: Option<UserName>,
    /// Filter.
    pub filter: Option<ShowFilter>,
    /// Source span.
    pub span: Span,
}

/// Lock mode of LOCK TABLES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableLockKind {
    Read,
    ReadLocal,
    Write,
    LowPriorityWrite,
}

/// `t [[AS] alias] lock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTable {
    /// Locked table.
    pub table: ObjectName,
    /// Alias.
    pub alias: Option<Ident>,
    /// Mode.
    pub lock: TableLockKind,
    /// Source span.
    pub span: Span,
}

/// `LOCK TABLES ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTables {
    /// Locked tables.
    pub tables: Vec<LockTable>,
    /// Source span.
    pub span: Span,
}
