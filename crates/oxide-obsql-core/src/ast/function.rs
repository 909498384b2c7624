//! Function calls, window functions and the JSON functions.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, Literal};
use super::name::Ident;
use super::query::OrderItem;
use super::types::DataType;
use crate::lexer::Span;

/// Argument quantifier of an aggregate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetQuantifier {
    All,
    Distinct,
    /// `UNIQUE`, a synonym of DISTINCT.
    Unique,
}

/// A generic function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name as written.
    pub name: Ident,
    /// ALL / DISTINCT / UNIQUE.
    pub quantifier: Option<SetQuantifier>,
    /// Arguments.
    pub args: Vec<Expr>,
    /// Whether the argument list was `*`.
    pub star: bool,
    /// Source span.
    pub span: Span,
}

/// `FROM FIRST` / `FROM LAST` of NTH_VALUE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FromFirstLast {
    First,
    Last,
}

/// `RESPECT NULLS` / `IGNORE NULLS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullTreatment {
    Respect,
    Ignore,
}

/// A function evaluated over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFunction {
    /// The underlying call.
    pub function: FunctionCall,
    /// FROM FIRST / FROM LAST.
    pub from: Option<FromFirstLast>,
    /// RESPECT / IGNORE NULLS.
    pub nulls: Option<NullTreatment>,
    /// The OVER clause. Absent only when the reducer reported it missing.
    pub over: Option<WindowSpec>,
    /// Source span.
    pub span: Span,
}

/// A window specification: `OVER w` or `OVER ([w] [PARTITION BY ..]
/// [ORDER BY ..] [frame])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Referenced named window.
    pub name: Option<Ident>,
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderItem>,
    /// Frame clause.
    pub frame: Option<WindowFrame>,
    /// Source span.
    pub span: Span,
}

/// ROWS or RANGE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameUnits {
    Rows,
    Range,
}

/// A window frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFrame {
    /// ROWS or RANGE.
    pub units: FrameUnits,
    /// Start bound (the only bound without BETWEEN).
    pub start: FrameBound,
    /// End bound of `BETWEEN .. AND ..`.
    pub end: Option<FrameBound>,
    /// Source span.
    pub span: Span,
}

/// PRECEDING or FOLLOWING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameDirection {
    Preceding,
    Following,
}

/// A frame bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameBound {
    /// `CURRENT ROW`
    CurrentRow {
        /// Source span.
        span: Span,
    },
    /// `UNBOUNDED PRECEDING|FOLLOWING`
    Unbounded {
        /// Direction.
        direction: FrameDirection,
        /// Source span.
        span: Span,
    },
    /// `n PRECEDING|FOLLOWING` or `INTERVAL n unit PRECEDING|FOLLOWING`
    Offset {
        /// Offset value; an interval expression for INTERVAL bounds.
        value: Box<Expr>,
        /// Direction.
        direction: FrameDirection,
        /// Source span.
        span: Span,
    },
}

/// Response of JSON_VALUE to an empty result or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonValueResponse {
    Error,
    Null,
    /// `DEFAULT literal`
    Default(Expr),
}

/// Response of JSON_QUERY to an empty result or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonQueryResponse {
    Error,
    Null,
    Empty,
    EmptyArray,
    EmptyObject,
}

/// `JSON_VALUE(expr, path ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValue {
    /// JSON document.
    pub expr: Expr,
    /// Path literal.
    pub path: Literal,
    /// RETURNING type.
    pub returning: Option<DataType>,
    /// TRUNCATE.
    pub truncate: bool,
    /// ASCII.
    pub ascii: bool,
    /// ON EMPTY response.
    pub on_empty: Option<JsonValueResponse>,
    /// ON ERROR response.
    pub on_error: Option<JsonValueResponse>,
    /// Source span.
    pub span: Span,
}

/// `WITH | WITHOUT [CONDITIONAL | UNCONDITIONAL] [ARRAY] WRAPPER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWrapper {
    /// WITH (true) or WITHOUT (false).
    pub with: bool,
    /// CONDITIONAL (true) or UNCONDITIONAL (false).
    pub conditional: Option<bool>,
    /// Whether ARRAY was written.
    pub array: bool,
}

/// `JSON_QUERY(expr, path ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonQuery {
    /// JSON document.
    pub expr: Expr,
    /// Path literal.
    pub path: Literal,
    /// RETURNING type.
    pub returning: Option<DataType>,
    /// TRUNCATE.
    pub truncate: bool,
    /// PRETTY.
    pub pretty: bool,
    /// ASCII.
    pub ascii: bool,
    /// ASIS.
    pub asis: bool,
    /// ALLOW SCALARS (true) or DISALLOW SCALARS (false).
    pub scalars: Option<bool>,
    /// Wrapper clause.
    pub wrapper: Option<JsonWrapper>,
    /// ON EMPTY response.
    pub on_empty: Option<JsonQueryResponse>,
    /// ON ERROR response.
    pub on_error: Option<JsonQueryResponse>,
    /// Source span.
    pub span: Span,
}
