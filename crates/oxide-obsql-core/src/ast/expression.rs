//! Expression AST types.

use serde::{Deserialize, Serialize};

use super::function::{FunctionCall, JsonQuery, JsonValue, WindowFunction};
use super::name::Ident;
use super::query::{OrderItem, Query};
use super::types::DataType;
use crate::lexer::Span;

/// A literal value.
///
/// Numeric literals keep their exact source text so that DECIMAL values and
/// large integers survive without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    /// Integer literal.
    Integer(String),
    /// Fixed-point literal.
    Decimal(String),
    /// Approximate (exponent) literal.
    Approximate(String),
    /// String literal, possibly split into adjacent parts.
    String {
        /// Raw source text of every part, quotes included.
        parts: Vec<String>,
        /// Charset introducer (`_utf8mb4'..'`).
        charset: Option<String>,
        /// Whether this is a national string (`N'..'`).
        national: bool,
    },
    /// Hexadecimal literal, raw text.
    Hex(String),
    /// Bit literal, raw text.
    Bit(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
    /// `DATE '..'`, `TIME '..'` or `TIMESTAMP '..'`.
    Temporal {
        /// Which temporal type.
        kind: TemporalKind,
        /// Raw text of the string part.
        text: String,
    },
}

impl Literal {
    /// Returns the unescaped value of a string literal, joining adjacent
    /// parts.
    #[must_use]
    pub fn string_value(&self) -> Option<String> {
        match self {
            Self::String { parts, .. } => Some(parts.iter().map(|p| unescape(p)).collect()),
            Self::Temporal { text, .. } => Some(unescape(text)),
            _ => None,
        }
    }
}

/// Temporal literal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalKind {
    /// `DATE '..'`
    Date,
    /// `TIME '..'`
    Time,
    /// `TIMESTAMP '..'`
    Timestamp,
}

/// Removes the quotes of a string literal and resolves its escapes.
#[must_use]
pub fn unescape(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let body = raw
        .get(quote.len_utf8()..raw.len().saturating_sub(quote.len_utf8()))
        .unwrap_or_default();
    let mut out = String::with_capacity(body.len());
    let mut it = body.chars().peekable();
    while let Some(c) = it.next() {
        if c == '\\' {
            match it.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some('b') => out.push('\u{8}'),
                Some('Z') => out.push('\u{1a}'),
                Some(e @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(e);
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else if c == quote && it.peek() == Some(&quote) {
            it.next();
            out.push(quote);
        } else {
            out.push(c);
        }
    }
    out
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Logical
    Or,
    Xor,
    And,

    // Comparison
    Eq,
    NullSafeEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Bitwise
    BitOr,
    BitAnd,
    BitXor,
    LeftShift,
    RightShift,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,

    // String
    Concat,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NullSafeEq => "<=>",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "%",
            Self::Concat => "||",
        }
    }

    /// Returns true for the comparison operators.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::NullSafeEq
                | Self::NotEq
                | Self::Lt
                | Self::LtEq
                | Self::Gt
                | Self::GtEq
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical NOT (`NOT`, `!`)
    Not,
    /// Negation (-)
    Neg,
    /// Unary plus (+)
    Plus,
    /// Bitwise NOT (~)
    BitNot,
    /// `BINARY x`
    Binary,
    /// Oracle `PRIOR x` in a CONNECT BY condition.
    Prior,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
            Self::Binary => "BINARY",
            Self::Prior => "PRIOR",
        }
    }
}

/// `ANY`, `SOME` or `ALL` in a quantified comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantifier {
    Any,
    Some,
    All,
}

/// The right-hand side of an `IS [NOT]` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsTarget {
    True,
    False,
    Unknown,
    Null,
}

/// Side removed by TRIM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimSide {
    Both,
    Leading,
    Trailing,
}

/// The target of a CONVERT call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvertTarget {
    /// `CONVERT(x, type)`
    Type(DataType),
    /// `CONVERT(x USING charset)`
    Charset(Ident),
}

/// One `WHEN .. THEN ..` branch of a CASE expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhenBranch {
    /// The WHEN operand.
    pub condition: Expr,
    /// The THEN result.
    pub result: Expr,
    /// Source span.
    pub span: Span,
}

/// An SQL expression. Every variant carries its source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A column reference (`c`, `t.c`, `db.t.c`).
    Column {
        /// Qualifiers, outermost first.
        qualifier: Vec<Ident>,
        /// Column name.
        name: Ident,
        /// Source span.
        span: Span,
    },
    /// `*` or `t.*`.
    Wildcard {
        /// Qualifiers, outermost first.
        qualifier: Vec<Ident>,
        /// Source span.
        span: Span,
    },
    /// A literal value.
    Literal {
        /// The value.
        value: Literal,
        /// Source span.
        span: Span,
    },
    /// `?` placeholder.
    Parameter {
        /// Zero-based position among the placeholders of the statement.
        position: usize,
        /// Source span.
        span: Span,
    },
    /// `@name`.
    UserVariable {
        /// Variable name without the sigil.
        name: String,
        /// Source span.
        span: Span,
    },
    /// `@@[scope.]name`.
    SystemVariable {
        /// Variable name without the sigil.
        name: String,
        /// Source span.
        span: Span,
    },
    /// `DEFAULT` in a value position.
    Default {
        /// Source span.
        span: Span,
    },
    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `@var := expr`.
    Assign {
        /// Target variable name.
        variable: String,
        /// Assigned value.
        value: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `expr IS [NOT] TRUE | FALSE | UNKNOWN | NULL`.
    Is {
        /// Tested expression.
        expr: Box<Expr>,
        /// Whether this is IS NOT.
        negated: bool,
        /// What is tested for.
        target: IsTarget,
        /// Source span.
        span: Span,
    },
    /// `expr op ANY | SOME | ALL (subquery)`.
    QuantifiedComparison {
        /// Left operand.
        left: Box<Expr>,
        /// Comparison operator.
        op: BinaryOp,
        /// Quantifier.
        quantifier: Quantifier,
        /// The subquery.
        query: Box<Query>,
        /// Source span.
        span: Span,
    },
    /// `expr [NOT] IN (list)`.
    InList {
        /// Tested expression.
        expr: Box<Expr>,
        /// Candidate values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
        /// Source span.
        span: Span,
    },
    /// `expr [NOT] IN (subquery)`.
    InSubquery {
        /// Tested expression.
        expr: Box<Expr>,
        /// The subquery.
        query: Box<Query>,
        /// Whether this is NOT IN.
        negated: bool,
        /// Source span.
        span: Span,
    },
    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        /// Tested expression.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
        /// Source span.
        span: Span,
    },
    /// `expr [NOT] LIKE pattern [ESCAPE e]`.
    Like {
        /// Tested expression.
        expr: Box<Expr>,
        /// Pattern.
        pattern: Box<Expr>,
        /// Escape character.
        escape: Option<Box<Expr>>,
        /// Whether this is NOT LIKE.
        negated: bool,
        /// Source span.
        span: Span,
    },
    /// `expr [NOT] REGEXP | RLIKE pattern`.
    Regexp {
        /// Tested expression.
        expr: Box<Expr>,
        /// Pattern.
        pattern: Box<Expr>,
        /// Whether this is NOT REGEXP.
        negated: bool,
        /// Source span.
        span: Span,
    },
    /// `value MEMBER OF (array)`.
    MemberOf {
        /// The value.
        value: Box<Expr>,
        /// The JSON array.
        array: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `INTERVAL value unit`.
    Interval {
        /// Interval amount.
        value: Box<Expr>,
        /// Unit keyword, upper case.
        unit: String,
        /// Source span.
        span: Span,
    },
    /// Oracle outer join marker, `t.a(+)`.
    OuterJoin {
        /// Marked column.
        expr: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `expr COLLATE collation`.
    Collate {
        /// Operand.
        expr: Box<Expr>,
        /// Collation name.
        collation: Ident,
        /// Source span.
        span: Span,
    },
    /// `(expr)`.
    Nested {
        /// The inner expression.
        expr: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `(a, b)` or `ROW(a, b)`.
    Row {
        /// Row items.
        items: Vec<Expr>,
        /// Source span.
        span: Span,
    },
    /// A scalar subquery.
    Subquery {
        /// The subquery.
        query: Box<Query>,
        /// Source span.
        span: Span,
    },
    /// `EXISTS (subquery)`.
    Exists {
        /// The subquery.
        query: Box<Query>,
        /// Source span.
        span: Span,
    },
    /// `MATCH (cols) AGAINST (expr [mode])`.
    Match {
        /// Searched columns.
        columns: Vec<Expr>,
        /// Search expression.
        against: Box<Expr>,
        /// Search modifier words, upper case.
        mode: Option<String>,
        /// Source span.
        span: Span,
    },
    /// `col -> path` or `col ->> path`.
    JsonExtract {
        /// The JSON column.
        expr: Box<Expr>,
        /// The path literal.
        path: Literal,
        /// Whether the result is unquoted (`->>`).
        unquote: bool,
        /// Source span.
        span: Span,
    },
    /// CASE expression (simple when `operand` is set, searched otherwise).
    Case {
        /// The operand.
        operand: Option<Box<Expr>>,
        /// WHEN/THEN branches.
        branches: Vec<WhenBranch>,
        /// ELSE result.
        else_result: Option<Box<Expr>>,
        /// Source span.
        span: Span,
    },
    /// A function call.
    Function(FunctionCall),
    /// A function call with an OVER clause or first/last parameters.
    Window(WindowFunction),
    /// `CAST(expr AS type)`.
    Cast {
        /// Operand.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
        /// Source span.
        span: Span,
    },
    /// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
    Convert {
        /// Operand.
        expr: Box<Expr>,
        /// Conversion target.
        target: ConvertTarget,
        /// Source span.
        span: Span,
    },
    /// `POSITION(needle IN haystack)`.
    Position {
        /// Searched value.
        needle: Box<Expr>,
        /// Searched string.
        haystack: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `SUBSTR(expr, start[, len])` and the FROM/FOR form.
    Substring {
        /// Operand.
        expr: Box<Expr>,
        /// Start position.
        start: Box<Expr>,
        /// Length.
        length: Option<Box<Expr>>,
        /// Source span.
        span: Span,
    },
    /// `TRIM([side] [remove] FROM expr)`.
    Trim {
        /// Trimmed side.
        side: Option<TrimSide>,
        /// Characters to remove.
        remove: Option<Box<Expr>>,
        /// Operand.
        expr: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `DATE_ADD`, `DATE_SUB`, `ADDDATE` or `SUBDATE`.
    DateArithmetic {
        /// Function name.
        function: Ident,
        /// Base date.
        date: Box<Expr>,
        /// Interval or day count.
        amount: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `TIMESTAMPADD` or `TIMESTAMPDIFF`.
    TimestampArithmetic {
        /// Function name.
        function: Ident,
        /// Unit keyword, upper case.
        unit: String,
        /// First operand.
        first: Box<Expr>,
        /// Second operand.
        second: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `EXTRACT(unit FROM expr)`.
    Extract {
        /// Unit keyword, upper case.
        unit: String,
        /// Operand.
        expr: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `GROUP_CONCAT([DISTINCT] args [ORDER BY ..] [SEPARATOR s])`.
    GroupConcat {
        /// Whether DISTINCT was given.
        distinct: bool,
        /// Concatenated values.
        args: Vec<Expr>,
        /// Ordering inside the group.
        order_by: Vec<OrderItem>,
        /// Separator literal.
        separator: Option<Literal>,
        /// Source span.
        span: Span,
    },
    /// `CHAR(args [USING charset])`.
    Char {
        /// Code points.
        args: Vec<Expr>,
        /// Result charset.
        charset: Option<Ident>,
        /// Source span.
        span: Span,
    },
    /// `VALUES(col)` in ON DUPLICATE KEY UPDATE.
    Values {
        /// Referenced column.
        column: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// `CURRENT_TIMESTAMP`, `NOW()`, `CURDATE`, `SYSDATE`, `UTC_*`, ...
    CurrentTime {
        /// Function name as written.
        function: Ident,
        /// Fractional seconds precision.
        precision: Option<String>,
        /// Source span.
        span: Span,
    },
    /// `JSON_VALUE(..)`.
    JsonValue(Box<JsonValue>),
    /// `JSON_QUERY(..)`.
    JsonQuery(Box<JsonQuery>),
    /// Placeholder for a subtree that could not be reduced.
    Error {
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// Returns the source span of the expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Function(call) => call.span,
            Self::Window(window) => window.span,
            Self::JsonValue(json) => json.span,
            Self::JsonQuery(json) => json.span,
            Self::Column { span, .. }
            | Self::Wildcard { span, .. }
            | Self::Literal { span, .. }
            | Self::Parameter { span, .. }
            | Self::UserVariable { span, .. }
            | Self::SystemVariable { span, .. }
            | Self::Default { span }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Assign { span, .. }
            | Self::Is { span, .. }
            | Self::QuantifiedComparison { span, .. }
            | Self::InList { span, .. }
            | Self::InSubquery { span, .. }
            | Self::Between { span, .. }
            | Self::Like { span, .. }
            | Self::Regexp { span, .. }
            | Self::MemberOf { span, .. }
            | Self::Interval { span, .. }
            | Self::Collate { span, .. }
            | Self::OuterJoin { span, .. }
            | Self::Nested { span, .. }
            | Self::Row { span, .. }
            | Self::Subquery { span, .. }
            | Self::Exists { span, .. }
            | Self::Match { span, .. }
            | Self::JsonExtract { span, .. }
            | Self::Case { span, .. }
            | Self::Cast { span, .. }
            | Self::Convert { span, .. }
            | Self::Position { span, .. }
            | Self::Substring { span, .. }
            | Self::Trim { span, .. }
            | Self::DateArithmetic { span, .. }
            | Self::TimestampArithmetic { span, .. }
            | Self::Extract { span, .. }
            | Self::GroupConcat { span, .. }
            | Self::Char { span, .. }
            | Self::Values { span, .. }
            | Self::CurrentTime { span, .. }
            | Self::Error { span } => *span,
        }
    }

    /// Returns true for the error placeholder.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Builds a binary expression spanning both operands.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        let span = self.span().merge(right.span());
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
            span,
        }
    }

    /// Returns the literal value, if this is a literal.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the column name, if this is an unqualified or qualified
    /// column reference.
    #[must_use]
    pub const fn as_column(&self) -> Option<&Ident> {
        match self {
            Self::Column { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str, start: usize) -> Expr {
        Expr::Literal {
            value: Literal::Integer(text.into()),
            span: Span::new(start, start + text.len()),
        }
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let expr = int("1", 0).binary(BinaryOp::Add, int("22", 4));
        assert_eq!(expr.span(), Span::new(0, 6));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("'it''s'"), "it's");
        assert_eq!(unescape(r"'a\nb'"), "a\nb");
        assert_eq!(unescape(r"'50\%'"), r"50\%");
        assert_eq!(unescape("\"q\"\"q\""), "q\"q");
        assert_eq!(unescape(""), "");
    }

    #[test]
    fn test_string_value_joins_parts() {
        let literal = Literal::String {
            parts: vec!["'ab'".into(), "'cd'".into()],
            charset: None,
            national: false,
        };
        assert_eq!(literal.string_value().as_deref(), Some("abcd"));
        assert_eq!(Literal::Null.string_value(), None);
    }

    #[test]
    fn test_operator_spelling() {
        assert_eq!(BinaryOp::NullSafeEq.as_str(), "<=>");
        assert!(BinaryOp::GtEq.is_comparison());
        assert!(!BinaryOp::And.is_comparison());
        assert_eq!(UnaryOp::BitNot.as_str(), "~");
    }
}
