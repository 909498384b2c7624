//! Operators, predicates, primaries and literals.

use super::children::Children;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{
    BinaryOp, Expr, Ident, IsTarget, Literal, Quantifier, Query, TemporalKind, UnaryOp,
    WhenBranch,
};
use crate::cst::{RuleKind, Terminal};
use crate::lexer::{Keyword, TokenKind};

pub(super) fn register(table: &mut ReductionTable) {
    table.register_exhaustive(RuleKind::Expr, expr);
    table.register_exhaustive(RuleKind::BoolPri, bool_pri);
    table.register_exhaustive(RuleKind::Predicate, predicate);
    table.register_exhaustive(RuleKind::BitExpr, bit_expr);
    table.register_exhaustive(RuleKind::SimpleExpr, simple_expr);
    table.register(RuleKind::ColumnRef, column_ref);
    table.register(RuleKind::ExprList, expr_list);
    table.register(RuleKind::ExprOrDefault, expr_or_default);
    table.register(RuleKind::Literal, literal);
    table.register(RuleKind::ComplexStringLiteral, complex_string_literal);
    table.register(RuleKind::SignedLiteral, signed_literal);
    table.register(RuleKind::CaseExpr, case_expr);
    table.register(RuleKind::WhenClause, when_clause);
}

/// Maps an infix operator token. `||` is OR at the boolean level and
/// concatenation at the arithmetic level.
fn binary_op(token: &Terminal, arithmetic: bool) -> Option<BinaryOp> {
    Some(match &token.kind {
        TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
        TokenKind::Keyword(Keyword::Xor) => BinaryOp::Xor,
        TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => BinaryOp::And,
        TokenKind::Concat if arithmetic => BinaryOp::Concat,
        TokenKind::Concat => BinaryOp::Or,
        TokenKind::Eq => BinaryOp::Eq,
        TokenKind::NullSafeEq => BinaryOp::NullSafeEq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::BitOr => BinaryOp::BitOr,
        TokenKind::BitAnd => BinaryOp::BitAnd,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::LeftShift => BinaryOp::LeftShift,
        TokenKind::RightShift => BinaryOp::RightShift,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Keyword(Keyword::Div) => BinaryOp::IntDiv,
        TokenKind::Percent | TokenKind::Keyword(Keyword::Mod) => BinaryOp::Mod,
        _ => return None,
    })
}

fn boxed(children: &mut Children<'_>, what: &str) -> Box<Expr> {
    Box::new(children.require(what))
}

/// Builds `[left op right]` when the token at slot 1 is an infix operator.
fn infix(children: &mut Children<'_>, arithmetic: bool) -> Option<Expr> {
    let op = children.token_at(1).and_then(|t| binary_op(t, arithmetic))?;
    let left = children.take_range::<Expr>(0, 1)?;
    let right = boxed(children, "a right operand");
    Some(Expr::Binary {
        left: Box::new(left),
        op,
        right,
        span: children.span(),
    })
}

/// Hands the single reduced operand up unchanged.
fn pass_through(children: &mut Children<'_>) -> Option<Fragment> {
    if let Some(expr) = children.take::<Expr>() {
        return Some(expr.into());
    }
    children.mismatch("expected an expression");
    Some(Expr::Error { span: children.span() }.into())
}

fn is_target(children: &Children<'_>) -> IsTarget {
    match children.words().last().map(String::as_str) {
        Some("TRUE") => IsTarget::True,
        Some("FALSE") => IsTarget::False,
        Some("UNKNOWN") => IsTarget::Unknown,
        _ => IsTarget::Null,
    }
}

fn is_test(children: &mut Children<'_>) -> Fragment {
    let expr = boxed(children, "a tested expression");
    Expr::Is {
        expr,
        negated: children.has_keyword(Keyword::Not),
        target: is_target(children),
        span: children.span(),
    }
    .into()
}

fn expr(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let first = children.token_at(0).cloned();
    if first.as_ref().is_some_and(|t| t.is_keyword(Keyword::Not)) {
        let operand = boxed(children, "an operand of NOT");
        return Some(
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
                span,
            }
            .into(),
        );
    }
    if let Some(var) = first.filter(|t| t.kind == TokenKind::UserVariable) {
        let value = boxed(children, "an assigned value");
        return Some(
            Expr::Assign {
                variable: var.text.trim_start_matches('@').to_owned(),
                value,
                span,
            }
            .into(),
        );
    }
    if children.token_at(1).is_some_and(|t| t.is_keyword(Keyword::Is)) {
        return Some(is_test(children));
    }
    if let Some(binary) = infix(children, false) {
        return Some(binary.into());
    }
    pass_through(children)
}

fn bool_pri(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(op) = children.token_at(1).cloned() else {
        return pass_through(children);
    };
    if op.is_keyword(Keyword::Is) {
        return Some(is_test(children));
    }
    let quantifier = children.token_at(2).and_then(|t| match t.keyword() {
        Some(Keyword::Any) => Some(Quantifier::Any),
        Some(Keyword::Some) => Some(Quantifier::Some),
        Some(Keyword::All) => Some(Quantifier::All),
        _ => None,
    });
    if let (Some(quantifier), Some(op)) = (quantifier, binary_op(&op, false)) {
        let left = boxed(children, "a compared expression");
        let query: Query = children.require("a subquery");
        return Some(
            Expr::QuantifiedComparison {
                left,
                op,
                quantifier,
                query: Box::new(query),
                span: children.span(),
            }
            .into(),
        );
    }
    match infix(children, false) {
        Some(binary) => Some(binary.into()),
        None => pass_through(children),
    }
}

fn predicate(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let negated = children.token_at(1).is_some_and(|t| t.is_keyword(Keyword::Not));
    let op_at = if negated { 2 } else { 1 };
    let Some(keyword) = children.token_at(op_at).and_then(Terminal::keyword) else {
        return pass_through(children);
    };
    let expr = boxed(children, "a tested expression");
    let result = match keyword {
        Keyword::In => {
            if let Some(query) = children.take::<Query>() {
                Expr::InSubquery {
                    expr,
                    query: Box::new(query),
                    negated,
                    span,
                }
            } else {
                let list = children.take::<Vec<Expr>>().unwrap_or_default();
                Expr::InList {
                    expr,
                    list,
                    negated,
                    span,
                }
            }
        }
        Keyword::Between => Expr::Between {
            expr,
            low: boxed(children, "a lower bound"),
            high: boxed(children, "an upper bound"),
            negated,
            span,
        },
        Keyword::Like => {
            let pattern = boxed(children, "a pattern");
            let escape = children.take_after::<Expr>(Keyword::Escape).map(Box::new);
            Expr::Like {
                expr,
                pattern,
                escape,
                negated,
                span,
            }
        }
        Keyword::Regexp | Keyword::Rlike => Expr::Regexp {
            expr,
            pattern: boxed(children, "a pattern"),
            negated,
            span,
        },
        Keyword::Member => Expr::MemberOf {
            value: expr,
            array: boxed(children, "a JSON array"),
            span,
        },
        _ => {
            children.mismatch("unexpected predicate operator");
            *expr
        }
    };
    Some(result.into())
}

fn bit_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let interval = children.token_at(2).filter(|t| t.is_keyword(Keyword::Interval)).cloned();
    if let Some(interval) = interval {
        let op = children
            .token_at(1)
            .and_then(|t| binary_op(t, true))
            .unwrap_or(BinaryOp::Add);
        let left = boxed(children, "a date operand");
        let value = boxed(children, "an interval value");
        let unit: Ident = children.require("an interval unit");
        let right = Expr::Interval {
            value,
            span: interval.span.merge(unit.span),
            unit: unit.value,
        };
        return Some(
            Expr::Binary {
                left,
                op,
                right: Box::new(right),
                span: children.span(),
            }
            .into(),
        );
    }
    match infix(children, true) {
        Some(binary) => Some(binary.into()),
        None => pass_through(children),
    }
}

fn prefix_op(token: &Terminal) -> Option<UnaryOp> {
    match token.kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Tilde => Some(UnaryOp::BitNot),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Keyword(Keyword::Binary) => Some(UnaryOp::Binary),
        TokenKind::Identifier if token.is_word("PRIOR") => Some(UnaryOp::Prior),
        _ => None,
    }
}

fn paren_list(items: Vec<Expr>, span: crate::lexer::Span) -> Expr {
    if items.len() == 1 {
        if let Some(expr) = items.into_iter().next() {
            return Expr::Nested {
                expr: Box::new(expr),
                span,
            };
        }
        return Expr::Error { span };
    }
    Expr::Row { items, span }
}

fn simple_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    if let Some(arrow) = children.token_at(1).cloned() {
        if arrow.kind == TokenKind::LeftParen && children.token_at(0).is_none() {
            let expr = boxed(children, "an outer-joined column");
            return Some(Expr::OuterJoin { expr, span }.into());
        }
        if arrow.is_keyword(Keyword::Collate) {
            let expr = boxed(children, "a collated expression");
            let collation: Ident = children.require("a collation name");
            return Some(Expr::Collate { expr, collation, span }.into());
        }
        if matches!(arrow.kind, TokenKind::Arrow | TokenKind::LongArrow) {
            let expr = boxed(children, "a JSON column");
            let path = children
                .take::<Expr>()
                .and_then(|p| p.as_literal().cloned())
                .unwrap_or(Literal::Null);
            return Some(
                Expr::JsonExtract {
                    expr,
                    path,
                    unquote: arrow.kind == TokenKind::LongArrow,
                    span,
                }
                .into(),
            );
        }
    }
    let Some(first) = children.token_at(0).cloned() else {
        if let Some(query) = children.take::<Query>() {
            return Some(
                Expr::Subquery {
                    query: Box::new(query),
                    span,
                }
                .into(),
            );
        }
        return pass_through(children);
    };
    let result = if let Some(op) = prefix_op(&first) {
        Expr::Unary {
            op,
            operand: boxed(children, "an operand"),
            span,
        }
    } else {
        match &first.kind {
            TokenKind::Question => Expr::Parameter {
                position: children.ctx().next_parameter(),
                span,
            },
            TokenKind::UserVariable => Expr::UserVariable {
                name: first.text.trim_start_matches('@').to_owned(),
                span,
            },
            TokenKind::SystemVariable => Expr::SystemVariable {
                name: first.text.trim_start_matches('@').to_owned(),
                span,
            },
            TokenKind::LeftParen => paren_list(children.take().unwrap_or_default(), span),
            TokenKind::Keyword(Keyword::Row) => Expr::Row {
                items: children.take().unwrap_or_default(),
                span,
            },
            TokenKind::Keyword(Keyword::Exists) => Expr::Exists {
                query: Box::new(children.require("a subquery")),
                span,
            },
            TokenKind::Keyword(Keyword::Match) => match_against(children),
            _ => {
                children.mismatch(format!("unexpected `{}`", first.text));
                Expr::Error { span }
            }
        }
    };
    Some(result.into())
}

fn match_against(children: &mut Children<'_>) -> Expr {
    let columns: Vec<Expr> = children.take().unwrap_or_default();
    let against = boxed(children, "a search string");
    let mode: Vec<String> = children
        .words()
        .into_iter()
        .filter(|w| w != "MATCH" && w != "AGAINST")
        .collect();
    Expr::Match {
        columns,
        against,
        mode: (!mode.is_empty()).then(|| mode.join(" ")),
        span: children.span(),
    }
}

fn column_ref(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let mut parts: Vec<Ident> = children.take_all();
    if children.has_token(&TokenKind::Star) {
        return Some(
            Expr::Wildcard {
                qualifier: parts,
                span,
            }
            .into(),
        );
    }
    let Some(name) = parts.pop() else {
        children.mismatch("expected a column name");
        return Some(Expr::Error { span }.into());
    };
    Some(
        Expr::Column {
            qualifier: parts,
            name,
            span,
        }
        .into(),
    )
}

fn expr_list(children: &mut Children<'_>) -> Option<Fragment> {
    Some(Fragment::Exprs(children.take_all()))
}

fn expr_or_default(children: &mut Children<'_>) -> Option<Fragment> {
    if children.first_token().is_some_and(|t| t.is_keyword(Keyword::Default)) {
        return Some(Expr::Default { span: children.span() }.into());
    }
    pass_through(children)
}

fn literal(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let Some(first) = children.token_at(0).cloned() else {
        return pass_through(children);
    };
    let text = first.text.clone();
    let value = match &first.kind {
        TokenKind::IntNum => Literal::Integer(text),
        TokenKind::DecimalNum => Literal::Decimal(text),
        TokenKind::ApproxNum => Literal::Approximate(text),
        TokenKind::HexString => Literal::Hex(text),
        TokenKind::BitString => Literal::Bit(text),
        TokenKind::Keyword(Keyword::Null) => Literal::Null,
        TokenKind::Keyword(Keyword::True) => Literal::Boolean(true),
        TokenKind::Keyword(Keyword::False) => Literal::Boolean(false),
        TokenKind::Keyword(kw @ (Keyword::Date | Keyword::Time | Keyword::Timestamp)) => {
            let kind = match kw {
                Keyword::Date => TemporalKind::Date,
                Keyword::Time => TemporalKind::Time,
                _ => TemporalKind::Timestamp,
            };
            let text = children.token_at(1).map(|t| t.text.clone()).unwrap_or_default();
            Literal::Temporal { kind, text }
        }
        _ => {
            children.mismatch(format!("unexpected literal `{text}`"));
            return Some(Expr::Error { span }.into());
        }
    };
    Some(Expr::Literal { value, span }.into())
}

fn complex_string_literal(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let mut parts = Vec::new();
    let mut charset = None;
    let mut national = false;
    for (_, token) in children.tokens() {
        match token.kind {
            TokenKind::NationalString => {
                national = true;
                parts.push(token.text.get(1..).unwrap_or_default().to_owned());
            }
            TokenKind::String => parts.push(token.text.clone()),
            TokenKind::Identifier => {
                charset = Some(token.text.trim_start_matches('_').to_owned());
            }
            _ => {}
        }
    }
    let value = Literal::String {
        parts,
        charset,
        national,
    };
    Some(Expr::Literal { value, span }.into())
}

fn signed_literal(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let negative = children.token_at(0).is_some_and(|t| t.kind == TokenKind::Minus);
    let value: Expr = children.require("a literal");
    if !negative {
        return Some(value.into());
    }
    let folded = match value {
        Expr::Literal { value, .. } => match value {
            Literal::Integer(n) => Ok(Literal::Integer(format!("-{n}"))),
            Literal::Decimal(n) => Ok(Literal::Decimal(format!("-{n}"))),
            Literal::Approximate(n) => Ok(Literal::Approximate(format!("-{n}"))),
            other => Err(Expr::Literal { value: other, span }),
        },
        other => Err(other),
    };
    let expr = match folded {
        Ok(value) => Expr::Literal { value, span },
        Err(operand) => Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
            span,
        },
    };
    Some(expr.into())
}

fn case_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let first_branch = children
        .position::<WhenBranch>(0, children.len())
        .unwrap_or(0);
    let operand = children.take_range::<Expr>(0, first_branch).map(Box::new);
    let branches: Vec<WhenBranch> = children.take_all();
    let else_result = children.take_after::<Expr>(Keyword::Else).map(Box::new);
    Some(
        Expr::Case {
            operand,
            branches,
            else_result,
            span: children.span(),
        }
        .into(),
    )
}

fn when_clause(children: &mut Children<'_>) -> Option<Fragment> {
    let condition = children.require("a WHEN condition");
    let result = children.require("a THEN result");
    Some(
        WhenBranch {
            condition,
            result,
            span: children.span(),
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    fn op(kind: TokenKind) -> Terminal {
        Terminal::new(kind, "||", Span::new(0, 2))
    }

    #[test]
    fn test_pipes_depend_on_level() {
        assert_eq!(binary_op(&op(TokenKind::Concat), false), Some(BinaryOp::Or));
        assert_eq!(binary_op(&op(TokenKind::Concat), true), Some(BinaryOp::Concat));
        assert_eq!(binary_op(&op(TokenKind::Comma), true), None);
    }

    #[test]
    fn test_single_item_parens_nest() {
        let one = Expr::Default { span: Span::new(1, 8) };
        let nested = paren_list(vec![one.clone()], Span::new(0, 9));
        assert!(matches!(nested, Expr::Nested { .. }));
        let row = paren_list(vec![one.clone(), one], Span::new(0, 18));
        assert!(matches!(row, Expr::Row { ref items, .. } if items.len() == 2));
    }
}
