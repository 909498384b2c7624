//! Function calls, window clauses and the special-syntax functions.

use super::children::Children;
use super::fragment::{Fragment, JsonClause};
use super::table::ReductionTable;
use crate::ast::{
    ConvertTarget, DataType, Expr, FrameBound, FrameDirection, FrameUnits, FromFirstLast,
    FunctionCall, Ident, JsonQuery, JsonQueryResponse, JsonValue, JsonValueResponse, JsonWrapper,
    Literal, NamedWindow, NullTreatment, OrderItem, SetQuantifier, TrimSide, WindowFrame,
    WindowFunction, WindowSpec,
};
use crate::cst::RuleKind;
use crate::lexer::{Keyword, Span, TokenKind};
use crate::parser::WINDOW_ONLY_FUNCTIONS;

pub(super) fn register(table: &mut ReductionTable) {
    table.register(RuleKind::SimpleFuncExpr, simple_func_expr);
    table.register(RuleKind::WindowFunction, window_function);
    table.register(RuleKind::NewGeneralizedWindowClause, window_spec);
    table.register(RuleKind::WinWindow, window_frame);
    table.register(RuleKind::WinBounding, frame_bound);
    table.register(RuleKind::WinInterval, win_interval);
    table.register(RuleKind::NamedWindow, named_window);
    table.register(RuleKind::ComplexFuncExpr, complex_func_expr);
    for kind in [
        RuleKind::CurTimestampFunc,
        RuleKind::CurTimeFunc,
        RuleKind::CurDateFunc,
        RuleKind::SysdateFunc,
        RuleKind::UtcTimestampFunc,
        RuleKind::UtcTimeFunc,
        RuleKind::UtcDateFunc,
    ] {
        table.register(kind, current_time);
    }
    table.register(RuleKind::OnEmpty, json_value_on);
    table.register(RuleKind::OnError, json_value_on);
    table.register(RuleKind::OnEmptyQuery, json_query_on);
    table.register(RuleKind::OnErrorQuery, json_query_on);
    table.register(RuleKind::ScalarsOpt, scalars);
    table.register(RuleKind::WrapperOpts, wrapper);
    table.register(RuleKind::JsonValueExpr, json_value);
    table.register(RuleKind::JsonQueryExpr, json_query);
}

fn boxed(children: &mut Children<'_>, what: &str) -> Box<Expr> {
    Box::new(children.require(what))
}

fn simple_func_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let name: Ident = children.require("a function name");
    let quantifier = children.tokens().find_map(|(_, t)| match t.keyword() {
        Some(Keyword::Distinct) => Some(SetQuantifier::Distinct),
        Some(Keyword::All) => Some(SetQuantifier::All),
        Some(Keyword::Unique) => Some(SetQuantifier::Unique),
        _ => None,
    });
    let star = children.has_token(&TokenKind::Star);
    let args = children.take::<Vec<Expr>>().unwrap_or_default();
    let call = FunctionCall {
        name,
        quantifier,
        args,
        star,
        span: children.span(),
    };
    Some(Expr::Function(call).into())
}

fn window_function(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let function = match children.take::<Expr>() {
        Some(Expr::Function(call)) => call,
        _ => {
            children.mismatch("expected a function call");
            return Some(Expr::Error { span }.into());
        }
    };
    let from = if children.has_keyword(Keyword::First) {
        Some(FromFirstLast::First)
    } else if children.has_keyword(Keyword::Last) {
        Some(FromFirstLast::Last)
    } else {
        None
    };
    let nulls = if children.has_keyword(Keyword::Respect) {
        Some(NullTreatment::Respect)
    } else if children.has_keyword(Keyword::Ignore) {
        Some(NullTreatment::Ignore)
    } else {
        None
    };
    let over = children.take::<WindowSpec>();
    if over.is_none()
        && WINDOW_ONLY_FUNCTIONS
            .iter()
            .any(|w| function.name.eq_ignore_case(w))
    {
        children.missing_clause(
            format!("{} requires an OVER clause", function.name.value.to_ascii_uppercase()),
            span,
        );
    }
    Some(
        Expr::Window(WindowFunction {
            function,
            from,
            nulls,
            over,
            span,
        })
        .into(),
    )
}

fn window_spec(children: &mut Children<'_>) -> Option<Fragment> {
    let name = children.take::<Ident>();
    let partition_by = children
        .take_after::<Vec<Expr>>(Keyword::Partition)
        .unwrap_or_default();
    let order_by = children.take::<Vec<OrderItem>>().unwrap_or_default();
    let frame = children.take::<WindowFrame>();
    Some(
        WindowSpec {
            name,
            partition_by,
            order_by,
            frame,
            span: children.span(),
        }
        .into(),
    )
}

fn window_frame(children: &mut Children<'_>) -> Option<Fragment> {
    let units = if children.first_token().is_some_and(|t| t.is_keyword(Keyword::Range)) {
        FrameUnits::Range
    } else {
        FrameUnits::Rows
    };
    let mut bounds = children.take_all::<FrameBound>().into_iter();
    let Some(start) = bounds.next() else {
        children.mismatch("expected a frame bound");
        return None;
    };
    Some(
        WindowFrame {
            units,
            start,
            end: bounds.next(),
            span: children.span(),
        }
        .into(),
    )
}

fn frame_bound(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    if children.has_keyword(Keyword::Current) {
        return Some(FrameBound::CurrentRow { span }.into());
    }
    let direction = if children.has_keyword(Keyword::Following) {
        FrameDirection::Following
    } else {
        FrameDirection::Preceding
    };
    if children.has_keyword(Keyword::Unbounded) {
        return Some(FrameBound::Unbounded { direction, span }.into());
    }
    let value = boxed(children, "a frame offset");
    Some(
        FrameBound::Offset {
            value,
            direction,
            span,
        }
        .into(),
    )
}

fn win_interval(children: &mut Children<'_>) -> Option<Fragment> {
    let value = boxed(children, "an interval value");
    let unit: Ident = children.require("an interval unit");
    Some(
        Expr::Interval {
            value,
            unit: unit.value,
            span: children.span(),
        }
        .into(),
    )
}

fn named_window(children: &mut Children<'_>) -> Option<Fragment> {
    let name: Ident = children.require("a window name");
    let Some(spec) = children.take::<WindowSpec>() else {
        children.mismatch("expected a window specification");
        return None;
    };
    Some(
        NamedWindow {
            name,
            spec,
            span: children.span(),
        }
        .into(),
    )
}

fn current_time(children: &mut Children<'_>) -> Option<Fragment> {
    let name = children.first_token()?;
    let function = Ident::new(name.text.to_ascii_uppercase(), name.span);
    let precision = children
        .tokens()
        .find(|(_, t)| t.kind == TokenKind::IntNum)
        .map(|(_, t)| t.text.clone());
    Some(
        Expr::CurrentTime {
            function,
            precision,
            span: children.span(),
        }
        .into(),
    )
}

fn literal_of(expr: Option<Expr>) -> Literal {
    expr.and_then(|e| e.as_literal().cloned())
        .unwrap_or(Literal::Null)
}

fn complex_func_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let Some(head) = children.first_token().cloned() else {
        // Time and JSON functions reduce on their own.
        return children.take::<Expr>().map(Fragment::from);
    };
    let name = head.text.to_ascii_uppercase();
    let expr = match name.as_str() {
        "CAST" => {
            let expr = boxed(children, "a cast operand");
            let Some(data_type) = children.take::<DataType>() else {
                children.mismatch("expected a target type");
                return Some(Expr::Error { span }.into());
            };
            Expr::Cast {
                expr,
                data_type,
                span,
            }
        }
        "CONVERT" => {
            let expr = boxed(children, "a converted operand");
            let target = if let Some(charset) = children.take_after::<Ident>(Keyword::Using) {
                ConvertTarget::Charset(charset)
            } else if let Some(data_type) = children.take::<DataType>() {
                ConvertTarget::Type(data_type)
            } else {
                children.mismatch("expected a target type or charset");
                return Some(Expr::Error { span }.into());
            };
            Expr::Convert { expr, target, span }
        }
        "POSITION" => Expr::Position {
            needle: boxed(children, "a substring"),
            haystack: boxed(children, "a string"),
            span,
        },
        "SUBSTR" | "SUBSTRING" => Expr::Substring {
            expr: boxed(children, "a string"),
            start: boxed(children, "a start position"),
            length: children.take::<Expr>().map(Box::new),
            span,
        },
        "TRIM" => trim(children),
        "DATE_ADD" | "DATE_SUB" | "ADDDATE" | "SUBDATE" => {
            let date = boxed(children, "a date");
            let interval = children.find_keyword(Keyword::Interval);
            let amount = match interval {
                Some(at) => {
                    let value = boxed(children, "an interval value");
                    let unit: Ident = children.require("an interval unit");
                    let start = children.token_at(at).map_or(span, |t| t.span);
                    Box::new(Expr::Interval {
                        value,
                        span: start.merge(unit.span),
                        unit: unit.value,
                    })
                }
                None => boxed(children, "a day count"),
            };
            Expr::DateArithmetic {
                function: Ident::new(name, head.span),
                date,
                amount,
                span,
            }
        }
        "TIMESTAMPADD" | "TIMESTAMPDIFF" => {
            let unit: Ident = children.require("a unit");
            Expr::TimestampArithmetic {
                function: Ident::new(name, head.span),
                unit: unit.value,
                first: boxed(children, "an operand"),
                second: boxed(children, "an operand"),
                span,
            }
        }
        "EXTRACT" => {
            let unit: Ident = children.require("a unit");
            Expr::Extract {
                unit: unit.value,
                expr: boxed(children, "an operand"),
                span,
            }
        }
        "GROUP_CONCAT" => {
            let distinct = children.has_keyword(Keyword::Distinct);
            let args = children.take::<Vec<Expr>>().unwrap_or_default();
            let order_by = children.take::<Vec<OrderItem>>().unwrap_or_default();
            let separator = children
                .take_after::<Expr>(Keyword::Separator)
                .and_then(|e| e.as_literal().cloned());
            Expr::GroupConcat {
                distinct,
                args,
                order_by,
                separator,
                span,
            }
        }
        "CHAR" => Expr::Char {
            args: children.take::<Vec<Expr>>().unwrap_or_default(),
            charset: children.take_after::<Ident>(Keyword::Using),
            span,
        },
        "VALUES" => Expr::Values {
            column: boxed(children, "a column"),
            span,
        },
        _ => {
            children.mismatch(format!("unknown function form `{name}`"));
            Expr::Error { span }
        }
    };
    Some(expr.into())
}

fn trim(children: &mut Children<'_>) -> Expr {
    let span = children.span();
    let side = children.tokens().find_map(|(_, t)| match t.keyword() {
        Some(Keyword::Both) => Some(TrimSide::Both),
        Some(Keyword::Leading) => Some(TrimSide::Leading),
        Some(Keyword::Trailing) => Some(TrimSide::Trailing),
        _ => None,
    });
    match children.find_keyword(Keyword::From) {
        Some(from) => {
            let remove = children.take_range::<Expr>(0, from).map(Box::new);
            let expr = Box::new(children.take_from::<Expr>(from).unwrap_or(Expr::Error { span }));
            Expr::Trim {
                side,
                remove,
                expr,
                span,
            }
        }
        None => Expr::Trim {
            side,
            remove: None,
            expr: boxed(children, "a trimmed string"),
            span,
        },
    }
}

fn value_response(children: &mut Children<'_>) -> JsonValueResponse {
    match children.first_token().and_then(crate::cst::Terminal::keyword) {
        Some(Keyword::Null) => JsonValueResponse::Null,
        Some(Keyword::Default) => {
            JsonValueResponse::Default(children.require("a default value"))
        }
        _ => JsonValueResponse::Error,
    }
}

fn json_value_on(children: &mut Children<'_>) -> Option<Fragment> {
    let empty = children.rule() == RuleKind::OnEmpty;
    let response = value_response(children);
    Some(Fragment::JsonClause(JsonClause::ValueOn {
        empty,
        response,
        span: children.span(),
    }))
}

fn json_query_on(children: &mut Children<'_>) -> Option<Fragment> {
    let empty = children.rule() == RuleKind::OnEmptyQuery;
    let words = children.words();
    let response = match (words.first().map(String::as_str), words.get(1).map(String::as_str)) {
        (Some("NULL"), _) => JsonQueryResponse::Null,
        (Some("EMPTY"), Some("ARRAY")) => JsonQueryResponse::EmptyArray,
        (Some("EMPTY"), Some("OBJECT")) => JsonQueryResponse::EmptyObject,
        (Some("EMPTY"), _) => JsonQueryResponse::Empty,
        _ => JsonQueryResponse::Error,
    };
    Some(Fragment::JsonClause(JsonClause::QueryOn {
        empty,
        response,
        span: children.span(),
    }))
}

fn scalars(children: &mut Children<'_>) -> Option<Fragment> {
    let allow = children.has_keyword(Keyword::Allow);
    Some(Fragment::JsonClause(JsonClause::Scalars(allow)))
}

fn wrapper(children: &mut Children<'_>) -> Option<Fragment> {
    let conditional = if children.has_keyword(Keyword::Conditional) {
        Some(true)
    } else if children.has_keyword(Keyword::Unconditional) {
        Some(false)
    } else {
        None
    };
    Some(Fragment::JsonClause(JsonClause::Wrapper(JsonWrapper {
        with: children.has_keyword(Keyword::With),
        conditional,
        array: children.has_keyword(Keyword::Array),
    })))
}

/// Keeps the last of a repeated ON EMPTY or ON ERROR clause.
fn set_once<T>(
    children: &mut Children<'_>,
    slot: &mut Option<T>,
    value: T,
    what: &str,
    span: Span,
) {
    if slot.is_some() {
        children.ambiguous(format!("{what} given more than once; the last one is used"), span);
    }
    *slot = Some(value);
}

fn json_value(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let expr = children.require("a JSON document");
    let path = literal_of(children.take::<Expr>());
    let returning = children.take::<DataType>();
    let truncate = children.has_keyword(Keyword::Truncate);
    let ascii = children.has_keyword(Keyword::Ascii);
    let mut on_empty = None;
    let mut on_error = None;
    for clause in children.take_all::<JsonClause>() {
        if let JsonClause::ValueOn {
            empty,
            response,
            span,
        } = clause
        {
            if empty {
                set_once(children, &mut on_empty, response, "ON EMPTY", span);
            } else {
                set_once(children, &mut on_error, response, "ON ERROR", span);
            }
        }
    }
    Some(
        Expr::JsonValue(Box::new(JsonValue {
            expr,
            path,
            returning,
            truncate,
            ascii,
            on_empty,
            on_error,
            span,
        }))
        .into(),
    )
}

fn json_query(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let expr = children.require("a JSON document");
    let path = literal_of(children.take::<Expr>());
    let mut query = JsonQuery {
        expr,
        path,
        returning: children.take::<DataType>(),
        truncate: children.has_keyword(Keyword::Truncate),
        pretty: children.has_keyword(Keyword::Pretty),
        ascii: children.has_keyword(Keyword::Ascii),
        asis: children.has_keyword(Keyword::Asis),
        scalars: None,
        wrapper: None,
        on_empty: None,
        on_error: None,
        span,
    };
    for clause in children.take_all::<JsonClause>() {
        match clause {
            JsonClause::Scalars(allow) => query.scalars = Some(allow),
            JsonClause::Wrapper(wrapper) => query.wrapper = Some(wrapper),
            JsonClause::QueryOn {
                empty: true,
                response,
                span,
            } => set_once(children, &mut query.on_empty, response, "ON EMPTY", span),
            JsonClause::QueryOn {
                empty: false,
                response,
                span,
            } => set_once(children, &mut query.on_error, response, "ON ERROR", span),
            JsonClause::ValueOn { .. } => {}
        }
    }
    Some(Expr::JsonQuery(Box::new(query)).into())
}
