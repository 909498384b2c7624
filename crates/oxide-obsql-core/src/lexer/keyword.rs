//! SQL keywords.
//!
//! Only the words the parser dispatches on are keywords; every other word
//! lexes as an identifier and is matched by spelling. Reserved keywords can
//! not be used as bare names.

use oxide_obsql_derive::Keywords;
use serde::{Deserialize, Serialize};

/// SQL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Keywords)]
pub enum Keyword {
    // Data Query Language (DQL)
    #[keyword(reserved)]
    Select,
    #[keyword(reserved)]
    From,
    #[keyword(reserved)]
    Where,
    #[keyword(reserved)]
    Order,
    #[keyword(reserved)]
    By,
    #[keyword(reserved)]
    Group,
    #[keyword(reserved)]
    Having,
    #[keyword(reserved)]
    Limit,
    Offset,
    #[keyword(reserved)]
    Distinct,
    #[keyword(reserved)]
    All,
    #[keyword(reserved)]
    As,
    #[keyword(reserved)]
    Asc,
    #[keyword(reserved)]
    Desc,
    #[keyword(reserved)]
    With,
    #[keyword(reserved)]
    Recursive,
    Rollup,
    #[keyword(reserved)]
    Into,
    #[keyword(reserved)]
    Dual,
    #[keyword(reserved)]
    For,
    #[keyword(reserved)]
    Of,
    Share,
    Mode,
    Locked,
    Nulls,
    First,
    Last,

    // Select options
    #[keyword(reserved)]
    HighPriority,
    #[keyword(reserved)]
    LowPriority,
    #[keyword(reserved)]
    Delayed,
    #[keyword(reserved)]
    StraightJoin,
    #[keyword(reserved)]
    SqlCalcFoundRows,
    #[keyword(reserved)]
    SqlBigResult,
    #[keyword(reserved)]
    SqlSmallResult,
    SqlBufferResult,
    SqlCache,
    SqlNoCache,
    Quick,

    // Joins
    #[keyword(reserved)]
    Join,
    #[keyword(reserved)]
    Inner,
    #[keyword(reserved)]
    Left,
    #[keyword(reserved)]
    Right,
    #[keyword(reserved)]
    Full,
    #[keyword(reserved)]
    Outer,
    #[keyword(reserved)]
    Cross,
    #[keyword(reserved)]
    Natural,
    #[keyword(reserved)]
    On,
    #[keyword(reserved)]
    Using,
    #[keyword(reserved)]
    Use,
    #[keyword(reserved)]
    Force,
    #[keyword(reserved)]
    Ignore,

    // Set operators
    #[keyword(reserved)]
    Union,
    #[keyword(reserved)]
    Intersect,
    #[keyword(reserved)]
    Except,
    #[keyword(reserved)]
    Minus,

    // Windows
    #[keyword(reserved)]
    Window,
    #[keyword(reserved)]
    Over,
    #[keyword(reserved)]
    Partition,
    #[keyword(reserved)]
    Range,
    Rows,
    Row,
    Unbounded,
    Preceding,
    Following,
    Current,
    Respect,

    // Expressions
    #[keyword(reserved)]
    And,
    #[keyword(reserved)]
    Or,
    #[keyword(reserved)]
    Xor,
    #[keyword(reserved)]
    Not,
    #[keyword(reserved)]
    Is,
    #[keyword(reserved)]
    In,
    #[keyword(reserved)]
    Between,
    #[keyword(reserved)]
    Like,
    #[keyword(reserved)]
    Regexp,
    #[keyword(reserved)]
    Rlike,
    Escape,
    #[keyword(reserved)]
    Null,
    #[keyword(reserved)]
    True,
    #[keyword(reserved)]
    False,
    Unknown,
    #[keyword(reserved)]
    Exists,
    Any,
    Some,
    #[keyword(reserved)]
    Case,
    #[keyword(reserved)]
    When,
    #[keyword(reserved)]
    Then,
    #[keyword(reserved)]
    Else,
    #[keyword(reserved)]
    End,
    #[keyword(reserved)]
    Div,
    #[keyword(reserved)]
    Mod,
    #[keyword(reserved)]
    Interval,
    #[keyword(reserved)]
    Binary,
    #[keyword(reserved)]
    Collate,
    #[keyword(reserved)]
    Separator,
    #[keyword(reserved)]
    Both,
    #[keyword(reserved)]
    Leading,
    #[keyword(reserved)]
    Trailing,
    #[keyword(reserved)]
    Match,
    Against,
    Member,
    Array,
    Date,
    Time,
    Timestamp,
    #[keyword(reserved)]
    Char,
    #[keyword(reserved)]
    Character,
    Charset,

    // JSON clauses
    Object,
    Pretty,
    Ascii,
    Asis,
    Scalars,
    Wrapper,
    Conditional,
    Unconditional,
    Without,
    Empty,
    Error,
    Allow,
    Disallow,

    // Data Manipulation Language (DML)
    #[keyword(reserved)]
    Insert,
    #[keyword(reserved)]
    Replace,
    #[keyword(reserved)]
    Update,
    #[keyword(reserved)]
    Delete,
    #[keyword(reserved)]
    Values,
    Value,
    #[keyword(reserved)]
    Set,
    #[keyword(reserved)]
    Default,
    Duplicate,
    Returning,

    // Export files
    Fields,
    #[keyword(reserved)]
    Lines,
    #[keyword(reserved)]
    Terminated,
    #[keyword(reserved)]
    Optionally,
    #[keyword(reserved)]
    Enclosed,
    #[keyword(reserved)]
    Escaped,
    #[keyword(reserved)]
    Starting,

    // Data Definition Language (DDL)
    #[keyword(reserved)]
    Create,
    #[keyword(reserved)]
    Alter,
    #[keyword(reserved)]
    Drop,
    Truncate,
    #[keyword(reserved)]
    Rename,
    #[keyword(reserved)]
    Table,
    Tables,
    Temporary,
    External,
    #[keyword(reserved)]
    Column,
    Columns,
    #[keyword(reserved)]
    Add,
    #[keyword(reserved)]
    To,
    #[keyword(reserved)]
    Index,
    #[keyword(reserved)]
    Key,
    #[keyword(reserved)]
    Primary,
    #[keyword(reserved)]
    Foreign,
    #[keyword(reserved)]
    Unique,
    #[keyword(reserved)]
    Fulltext,
    #[keyword(reserved)]
    Spatial,
    #[keyword(reserved)]
    Constraint,
    #[keyword(reserved)]
    Check,
    #[keyword(reserved)]
    References,
    #[keyword(reserved)]
    If,
    View,
    Algorithm,
    Definer,
    #[keyword(reserved)]
    Sql,
    #[keyword(reserved)]
    Database,
    #[keyword(reserved)]
    Schema,
    Tablegroup,
    Tablespace,
    Sequence,
    Function,
    #[keyword(reserved)]
    Procedure,
    #[keyword(reserved)]
    Trigger,

    // Administration
    Resource,
    Tenant,
    Snapshot,
    Restore,
    System,
    Flashback,
    #[keyword(reserved)]
    Purge,
    #[keyword(reserved)]
    Optimize,
    #[keyword(reserved)]
    Analyze,
    #[keyword(reserved)]
    Kill,
    Help,
    Status,

    // Access control
    User,
    Role,
    #[keyword(reserved)]
    Grant,
    #[keyword(reserved)]
    Revoke,

    // Transactions and sessions
    Begin,
    Start,
    Commit,
    Rollback,
    Savepoint,
    #[keyword(reserved)]
    Release,
    Xa,
    Prepare,
    Execute,
    Deallocate,
    #[keyword(reserved)]
    Explain,
    #[keyword(reserved)]
    Describe,
    #[keyword(reserved)]
    Show,
    #[keyword(reserved)]
    Lock,
    #[keyword(reserved)]
    Unlock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("Straight_Join"), Some(Keyword::StraightJoin));
        assert_eq!(Keyword::from_str("SQL_CALC_FOUND_ROWS"), Some(Keyword::SqlCalcFoundRows));
        assert_eq!(Keyword::from_str("users"), None);
    }

    #[test]
    fn test_spelling() {
        assert_eq!(Keyword::HighPriority.as_str(), "HIGH_PRIORITY");
        assert_eq!(Keyword::Xa.as_str(), "XA");
    }

    #[test]
    fn test_reserved_words() {
        assert!(Keyword::Select.is_reserved());
        assert!(Keyword::Primary.is_reserved());
        assert!(!Keyword::Status.is_reserved());
        assert!(!Keyword::Date.is_reserved());
        assert!(!Keyword::Tenant.is_reserved());
    }

    #[test]
    fn test_every_spelling_round_trips() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(*kw));
        }
    }
}
