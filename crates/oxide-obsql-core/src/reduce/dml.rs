//! INSERT, REPLACE, UPDATE and DELETE.

use super::children::Children;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{
    Assignment, Delete, Expr, Ident, Insert, InsertSource, ObjectName, OrderItem, Priority,
    Query, Statement, TableRef, Update,
};
use crate::cst::{RuleKind, Terminal};
use crate::lexer::{Keyword, TokenKind};

pub(super) fn register(table: &mut ReductionTable) {
    table.statement(RuleKind::InsertStmt, insert_stmt);
    table.statement(RuleKind::UpdateStmt, update_stmt);
    table.statement(RuleKind::DeleteStmt, delete_stmt);
    table.register(RuleKind::InsertVals, insert_vals);
    table.register(RuleKind::UpdateAsgnFactor, assignment);
}

/// Hint text of a statement head (`/*+ ... */` without the delimiters).
pub(super) fn hint(children: &Children<'_>) -> Option<String> {
    children
        .find_token(&TokenKind::Hint)
        .and_then(|i| children.token_at(i))
        .map(|t: &Terminal| {
            t.text
                .trim_start_matches("/*+")
                .trim_end_matches("*/")
                .trim()
                .to_owned()
        })
}

/// Takes a nested SELECT statement as a query.
pub(super) fn take_query(children: &mut Children<'_>) -> Option<Query> {
    match children.take::<Statement>()? {
        Statement::Query(query) => Some(*query),
        _ => None,
    }
}

fn insert_stmt(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let replace = children
        .first_token()
        .is_some_and(|t| t.is_keyword(Keyword::Replace));
    let priority = children.tokens().find_map(|(_, t)| match t.keyword() {
        Some(Keyword::LowPriority) => Some(Priority::Low),
        Some(Keyword::Delayed) => Some(Priority::Delayed),
        Some(Keyword::HighPriority) => Some(Priority::High),
        _ => None,
    });
    let ignore = children.has_keyword(Keyword::Ignore);
    let table: ObjectName = children.require("a target table");
    let partitions = children
        .take_after::<Vec<Ident>>(Keyword::Partition)
        .unwrap_or_default();
    let columns = children.take::<Vec<Ident>>().unwrap_or_default();
    let on_duplicate = match children.find_keyword(Keyword::Duplicate) {
        Some(at) => children.take_all_range::<Assignment>(at, children.len()),
        None => Vec::new(),
    };
    let source = if children.has_keyword(Keyword::Values) || children.has_keyword(Keyword::Value) {
        InsertSource::Values(children.take_all::<Vec<Expr>>())
    } else if children.has_keyword(Keyword::Set) {
        InsertSource::Set(children.take_all())
    } else if let Some(query) = take_query(children) {
        InsertSource::Query(Box::new(query))
    } else {
        children.mismatch("expected VALUES, SET or a query");
        InsertSource::Values(Vec::new())
    };
    Some(
        Statement::Insert(Box::new(Insert {
            replace,
            hint: hint(children),
            priority,
            ignore,
            table,
            partitions,
            columns,
            source,
            on_duplicate,
            span,
        }))
        .into(),
    )
}

fn insert_vals(children: &mut Children<'_>) -> Option<Fragment> {
    Some(Fragment::Exprs(children.take_all()))
}

fn assignment(children: &mut Children<'_>) -> Option<Fragment> {
    let column: Expr = children.require("an assigned column");
    let value: Expr = children.require("an assigned value");
    Some(
        Assignment {
            column,
            value,
            span: children.span(),
        }
        .into(),
    )
}

fn update_stmt(children: &mut Children<'_>) -> Option<Fragment> {
    let tables = children.take_all::<TableRef>();
    let assignments = children.take_all::<Assignment>();
    let update = Update {
        hint: hint(children),
        low_priority: children.has_keyword(Keyword::LowPriority),
        ignore: children.has_keyword(Keyword::Ignore),
        tables,
        assignments,
        selection: children.take_after::<Expr>(Keyword::Where),
        order_by: children.take::<Vec<OrderItem>>().unwrap_or_default(),
        limit: children.take(),
        span: children.span(),
    };
    Some(Statement::Update(Box::new(update)).into())
}

fn delete_stmt(children: &mut Children<'_>) -> Option<Fragment> {
    let options = children
        .tokens()
        .filter(|(_, t)| {
            matches!(
                t.keyword(),
                Some(Keyword::LowPriority | Keyword::Quick | Keyword::Ignore)
            )
        })
        .map(|(_, t)| t.text.to_ascii_uppercase())
        .collect();
    let delete = Delete {
        hint: hint(children),
        options,
        targets: children.take_all::<ObjectName>(),
        from: children.take_all::<TableRef>(),
        selection: children.take_after::<Expr>(Keyword::Where),
        order_by: children.take::<Vec<OrderItem>>().unwrap_or_default(),
        limit: children.take(),
        span: children.span(),
    };
    Some(Statement::Delete(Box::new(delete)).into())
}
