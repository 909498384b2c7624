//! SELECT, set operations and their clauses.

use super::children::Children;
use super::dml::hint;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{
    Cte, ExportTerm, Expr, Fetch, FetchDirection, GroupBy, Hierarchy, Ident, IndexHint,
    IndexHintAction, IndexHintScope, IntoTarget, Join, JoinConstraint, JoinKind, Limit,
    LockClause, LockWait, NamedWindow, ObjectName, OrderDirection, OrderItem, Query, Select,
    SelectItem, SetExpr, SetOperator, Statement, TableRef, With,
};
use crate::cst::{RuleKind, Terminal};
use crate::lexer::{Keyword, TokenKind};

pub(super) fn register(table: &mut ReductionTable) {
    table.statement(RuleKind::SelectStmt, select_stmt);
    table.register(RuleKind::SelectNoParens, select_no_parens);
    table.register(RuleKind::SelectWithParens, select_with_parens);
    table.register(RuleKind::SelectClauseSet, select_clause_set);
    table.register(RuleKind::SimpleSelect, simple_select);
    table.register(RuleKind::QueryExpressionOptionList, query_options);
    table.register(RuleKind::Projection, projection);
    table.register(RuleKind::TableFactor, table_factor);
    table.register(RuleKind::TblName, tbl_name);
    table.register(RuleKind::TableSubquery, table_subquery);
    table.register(RuleKind::IndexHintDefinition, index_hint);
    table.register(RuleKind::InnerJoinType, join_kind);
    table.register(RuleKind::OuterJoinType, join_kind);
    table.register(RuleKind::NaturalJoinType, join_kind);
    table.register(RuleKind::JoinCondition, join_condition);
    table.register(RuleKind::JoinedTable, joined_table);
    table.register(RuleKind::SortKey, sort_key);
    table.register(RuleKind::SortKeyForGroupBy, sort_key);
    table.register(RuleKind::OrderBy, order_by);
    table.register(RuleKind::GroupbyClause, group_by);
    table.register(RuleKind::LimitClause, limit_clause);
    table.register(RuleKind::FetchNextClause, fetch_clause);
    table.register(RuleKind::HierarchicalQueryClause, hierarchical_clause);
    table.register(RuleKind::ForUpdateClause, for_update);
    table.register(RuleKind::OptLockInShareMode, share_mode);
    table.register(RuleKind::IntoClause, into_clause);
    table.register(RuleKind::FieldTerm, export_term);
    table.register(RuleKind::LineTerm, export_term);
    table.register(RuleKind::IntoVar, into_var);
    table.register(RuleKind::WithClause, with_clause);
    table.register(RuleKind::CommonTableExpr, common_table_expr);
}

fn select_stmt(children: &mut Children<'_>) -> Option<Fragment> {
    let query: Query = children.require("a query");
    Some(Statement::Query(Box::new(query)).into())
}

fn select_no_parens(children: &mut Children<'_>) -> Option<Fragment> {
    let with = children.take::<With>();
    let body: SetExpr = children.require("a query body");
    let order_by = children.take::<Vec<OrderItem>>().unwrap_or_default();
    let limit = children.take::<Limit>();
    let fetch = children.take::<Fetch>();
    let lock = children.take::<LockClause>();
    let into = children.take::<IntoTarget>();
    let bare = with.is_none()
        && order_by.is_empty()
        && limit.is_none()
        && fetch.is_none()
        && lock.is_none()
        && into.is_none();
    let body = match body {
        SetExpr::Query(inner) if bare => return Some(Fragment::Query(inner)),
        body => body,
    };
    Some(
        Query {
            with,
            body,
            order_by,
            limit,
            fetch,
            lock,
            into,
            span: children.span(),
        }
        .into(),
    )
}

fn select_with_parens(children: &mut Children<'_>) -> Option<Fragment> {
    let mut query: Query = children.require("a query");
    query.span = children.span();
    Some(query.into())
}

fn select_clause_set(children: &mut Children<'_>) -> Option<Fragment> {
    let left: SetExpr = children.require("a left operand");
    let (op, all) = {
        let mut words = children.tokens().map(|(_, t)| t.keyword());
        let op = match words.next().flatten() {
            Some(Keyword::Intersect) => SetOperator::Intersect,
            Some(Keyword::Except | Keyword::Minus) => SetOperator::Except,
            _ => SetOperator::Union,
        };
        let all = match words.next().flatten() {
            Some(Keyword::All) => Some(true),
            Some(Keyword::Distinct) => Some(false),
            _ => None,
        };
        (op, all)
    };
    let right: SetExpr = children.require("a right operand");
    Some(
        SetExpr::SetOperation {
            op,
            all,
            left: Box::new(left),
            right: Box::new(right),
            span: children.span(),
        }
        .into(),
    )
}

fn simple_select(children: &mut Children<'_>) -> Option<Fragment> {
    let hint = hint(children);
    let options = children
        .take::<Vec<Ident>>()
        .unwrap_or_default()
        .into_iter()
        .map(|o| o.value)
        .collect();
    let projection = children.take_all::<SelectItem>();
    let into = children.take::<IntoTarget>();
    let from = children.take_all::<TableRef>();
    let selection = children.take_after::<Expr>(Keyword::Where);
    let hierarchy = children.take::<Hierarchy>();
    let group_by = children.take::<GroupBy>();
    let having = children.take_after::<Expr>(Keyword::Having);
    let windows = children.take_all::<NamedWindow>();
    Some(
        Select {
            hint,
            options,
            projection,
            into,
            from,
            selection,
            hierarchy,
            group_by,
            having,
            windows,
            span: children.span(),
        }
        .into(),
    )
}

fn query_options(children: &mut Children<'_>) -> Option<Fragment> {
    let options = children
        .tokens()
        .map(|(_, t)| Ident::new(t.text.to_ascii_uppercase(), t.span))
        .collect();
    Some(Fragment::Names(options))
}

fn projection(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    if children.has_token(&TokenKind::Star) {
        return Some(SelectItem::Wildcard { span }.into());
    }
    let expr: Expr = children.require("a projected expression");
    let alias = children.take::<Ident>().or_else(|| {
        children.take::<Expr>().and_then(|quoted| {
            let text = quoted.as_literal()?.string_value()?;
            Some(Ident::quoted(text, quoted.span()))
        })
    });
    Some(SelectItem::Expr { expr, alias, span }.into())
}

fn table_factor(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    if children.has_keyword(Keyword::Dual) {
        return Some(TableRef::Dual { span }.into());
    }
    if children.has_token(&TokenKind::LeftParen) {
        let tables = children.take_all::<TableRef>();
        return Some(TableRef::Nested { tables, span }.into());
    }
    children.take::<TableRef>().map(Fragment::from)
}

fn tbl_name(children: &mut Children<'_>) -> Option<Fragment> {
    let name: ObjectName = children.require("a table name");
    let partitions = children.take::<Vec<Ident>>().unwrap_or_default();
    let alias = children.take::<Ident>();
    let index_hints = children.take_all::<IndexHint>();
    Some(
        TableRef::Table {
            name,
            partitions,
            alias,
            index_hints,
            span: children.span(),
        }
        .into(),
    )
}

fn table_subquery(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let query: Query = children.require("a derived table query");
    let alias = children.take::<Ident>();
    if alias.is_none() {
        children.missing_clause("every derived table must have an alias", span);
    }
    let columns = children.take::<Vec<Ident>>().unwrap_or_default();
    Some(
        TableRef::Derived {
            query: Box::new(query),
            alias,
            columns,
            span,
        }
        .into(),
    )
}

fn index_hint(children: &mut Children<'_>) -> Option<Fragment> {
    let action = match children.first_token().and_then(Terminal::keyword) {
        Some(Keyword::Force) => IndexHintAction::Force,
        Some(Keyword::Ignore) => IndexHintAction::Ignore,
        _ => IndexHintAction::Use,
    };
    let scope = if children.has_keyword(Keyword::Order) {
        Some(IndexHintScope::OrderBy)
    } else if children.has_keyword(Keyword::Group) {
        Some(IndexHintScope::GroupBy)
    } else if children.has_keyword(Keyword::Join) {
        Some(IndexHintScope::Join)
    } else {
        None
    };
    Some(
        IndexHint {
            action,
            scope,
            indexes: children.take::<Vec<Ident>>().unwrap_or_default(),
            span: children.span(),
        }
        .into(),
    )
}

fn join_kind(children: &mut Children<'_>) -> Option<Fragment> {
    let side = children.tokens().find_map(|(_, t)| match t.keyword() {
        Some(Keyword::Left) => Some(JoinKind::Left),
        Some(Keyword::Right) => Some(JoinKind::Right),
        Some(Keyword::Full) => Some(JoinKind::Full),
        _ => None,
    });
    let kind = match children.rule() {
        RuleKind::NaturalJoinType => match side {
            Some(JoinKind::Left) => JoinKind::NaturalLeft,
            Some(JoinKind::Right) => JoinKind::NaturalRight,
            Some(JoinKind::Full) => JoinKind::NaturalFull,
            _ => JoinKind::Natural,
        },
        RuleKind::OuterJoinType => side.unwrap_or(JoinKind::Left),
        _ if children.has_keyword(Keyword::Cross) => JoinKind::Cross,
        _ if children.has_keyword(Keyword::StraightJoin) => JoinKind::StraightJoin,
        _ => JoinKind::Inner,
    };
    Some(kind.into())
}

fn join_condition(children: &mut Children<'_>) -> Option<Fragment> {
    if children.has_keyword(Keyword::Using) {
        let columns = children.take::<Vec<Ident>>().unwrap_or_default();
        return Some(JoinConstraint::Using(columns).into());
    }
    let condition: Expr = children.require("a join condition");
    Some(JoinConstraint::On(condition).into())
}

fn joined_table(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let Some(left) = children.take::<TableRef>() else {
        children.mismatch("expected the left side of a join");
        return None;
    };
    let kind = children.take::<JoinKind>().unwrap_or(JoinKind::Inner);
    let Some(right) = children.take::<TableRef>() else {
        children.mismatch("expected the right side of a join");
        return Some(left.into());
    };
    let constraint = children.take::<JoinConstraint>();
    if constraint.is_none() && kind.needs_condition() {
        children.missing_clause("outer join requires an ON or USING condition", span);
    }
    Some(
        TableRef::Join(Box::new(Join {
            left,
            kind,
            right,
            constraint,
            span,
        }))
        .into(),
    )
}

fn sort_key(children: &mut Children<'_>) -> Option<Fragment> {
    let expr: Expr = children.require("a sort key");
    let direction = if children.has_keyword(Keyword::Desc) {
        Some(OrderDirection::Desc)
    } else if children.has_keyword(Keyword::Asc) {
        Some(OrderDirection::Asc)
    } else {
        None
    };
    Some(
        OrderItem {
            expr,
            direction,
            span: children.span(),
        }
        .into(),
    )
}

fn order_by(children: &mut Children<'_>) -> Option<Fragment> {
    Some(Fragment::OrderBy(children.take_all()))
}

fn group_by(children: &mut Children<'_>) -> Option<Fragment> {
    Some(
        GroupBy {
            items: children.take_all(),
            with_rollup: children.has_keyword(Keyword::Rollup),
            span: children.span(),
        }
        .into(),
    )
}

fn limit_clause(children: &mut Children<'_>) -> Option<Fragment> {
    let first: Expr = children.require("a row count");
    let second = children.take::<Expr>();
    let (count, offset) = match second {
        // LIMIT offset, count
        Some(count) if children.has_token(&TokenKind::Comma) => (count, Some(first)),
        offset => (first, offset),
    };
    Some(
        Limit {
            count,
            offset,
            span: children.span(),
        }
        .into(),
    )
}

fn fetch_clause(children: &mut Children<'_>) -> Option<Fragment> {
    let fetch_at = children.find_word("FETCH");
    let offset = if children.has_keyword(Keyword::Offset) {
        children.take_range::<Expr>(0, fetch_at.unwrap_or(usize::MAX))
    } else {
        None
    };
    let direction = fetch_at.map(|_| {
        if children.has_word("NEXT") {
            FetchDirection::Next
        } else {
            FetchDirection::First
        }
    });
    let count = fetch_at.and_then(|at| children.take_from::<Expr>(at));
    Some(
        Fetch {
            offset,
            direction,
            count,
            percent: children.has_word("PERCENT"),
            with_ties: children.has_word("TIES"),
            span: children.span(),
        }
        .into(),
    )
}

/// START WITH and CONNECT BY may come in either order.
fn hierarchical_clause(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let start = children.find_word("START");
    let connect = children.find_word("CONNECT");
    let start_end = connect.filter(|&c| start.is_some_and(|s| c > s));
    let connect_end = start.filter(|&s| connect.is_some_and(|c| s > c));
    let start_with =
        start.and_then(|s| children.take_range::<Expr>(s, start_end.unwrap_or(usize::MAX)));
    let connect_by = connect
        .and_then(|c| children.take_range::<Expr>(c, connect_end.unwrap_or(usize::MAX)))
        .unwrap_or_else(|| {
            children.missing_clause("START WITH needs a CONNECT BY condition", span);
            Expr::Error { span }
        });
    Some(
        Hierarchy {
            start_with,
            connect_by,
            nocycle: children.has_word("NOCYCLE"),
            span,
        }
        .into(),
    )
}

fn for_update(children: &mut Children<'_>) -> Option<Fragment> {
    let wait = if children.has_word("NOWAIT") {
        Some(LockWait::NoWait)
    } else if children.has_word("SKIP") {
        Some(LockWait::SkipLocked)
    } else if children.has_word("WAIT") {
        children
            .tokens()
            .find(|(_, t)| matches!(t.kind, TokenKind::IntNum | TokenKind::DecimalNum))
            .map(|(_, t)| LockWait::Wait(t.text.clone()))
    } else {
        None
    };
    Some(
        LockClause::ForUpdate {
            wait,
            span: children.span(),
        }
        .into(),
    )
}

fn share_mode(children: &mut Children<'_>) -> Option<Fragment> {
    Some(
        LockClause::ShareMode {
            span: children.span(),
        }
        .into(),
    )
}

fn into_clause(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let file = children
        .find_token(&TokenKind::String)
        .and_then(|i| children.token_at(i))
        .map(|t| t.text.clone());
    let target = if children.has_word("OUTFILE") {
        let lines_at = children.find_keyword(Keyword::Lines).unwrap_or(children.len());
        let fields = children.take_all_range::<ExportTerm>(0, lines_at);
        let lines = children.take_all_range::<ExportTerm>(lines_at, children.len());
        IntoTarget::Outfile {
            file: file.unwrap_or_default(),
            fields,
            lines,
            span,
        }
    } else if children.has_word("DUMPFILE") {
        IntoTarget::Dumpfile {
            file: file.unwrap_or_default(),
            span,
        }
    } else {
        IntoTarget::Variables {
            targets: children.take_all(),
            span,
        }
    };
    Some(target.into())
}

fn export_term(children: &mut Children<'_>) -> Option<Fragment> {
    let option = children.words().join(" ");
    let value = children
        .take::<Expr>()
        .and_then(|e| e.as_literal().cloned());
    let Some(value) = value else {
        children.mismatch("expected a string literal");
        return None;
    };
    Some(
        ExportTerm {
            option,
            value,
            span: children.span(),
        }
        .into(),
    )
}

fn into_var(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    if let Some(name) = children.take::<Ident>() {
        return Some(
            Expr::Column {
                qualifier: Vec::new(),
                name,
                span,
            }
            .into(),
        );
    }
    let token = children.first_token()?;
    Some(
        Expr::UserVariable {
            name: token.text.trim_start_matches('@').to_owned(),
            span,
        }
        .into(),
    )
}

fn with_clause(children: &mut Children<'_>) -> Option<Fragment> {
    Some(
        With {
            recursive: children.has_keyword(Keyword::Recursive),
            ctes: children.take_all(),
            span: children.span(),
        }
        .into(),
    )
}

fn common_table_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let name: Ident = children.require("a CTE name");
    let columns = children.take::<Vec<Ident>>().unwrap_or_default();
    let query: Query = children.require("a CTE query");
    Some(
        Cte {
            name,
            columns,
            query,
            span: children.span(),
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::super::testing::{reduce, statement};
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn query(sql: &str) -> Query {
        match statement(sql) {
            Statement::Query(query) => *query,
            other => panic!("not a query: {other:?}"),
        }
    }

    fn select(sql: &str) -> Select {
        query(sql).as_select().cloned().unwrap()
    }

    #[test]
    fn test_full_select() {
        let q = query(
            "SELECT /*+ parallel(4) */ DISTINCT a AS x, b y, t.* FROM t1 AS t \
             WHERE a > 1 GROUP BY a WITH ROLLUP HAVING COUNT(*) > 1 \
             ORDER BY a DESC LIMIT 10 OFFSET 5 FOR UPDATE NOWAIT",
        );
        let select = q.as_select().unwrap();
        assert_eq!(select.hint.as_deref(), Some("parallel(4)"));
        assert!(select.is_distinct());
        assert_eq!(select.projection.len(), 3);
        assert!(matches!(
            &select.projection[1],
            SelectItem::Expr { alias: Some(a), .. } if a.value == "y"
        ));
        assert!(select.selection.is_some());
        assert!(select.group_by.as_ref().unwrap().with_rollup);
        assert!(select.having.is_some());
        assert_eq!(q.order_by[0].direction, Some(OrderDirection::Desc));
        let limit = q.limit.unwrap();
        assert!(matches!(
            limit.count.as_literal(),
            Some(crate::ast::Literal::Integer(n)) if n == "10"
        ));
        assert!(limit.offset.is_some());
        assert!(matches!(
            q.lock,
            Some(LockClause::ForUpdate {
                wait: Some(LockWait::NoWait),
                ..
            })
        ));
    }

    #[test]
    fn test_limit_comma_form_swaps() {
        let q = query("SELECT a FROM t LIMIT 5, 10");
        let limit = q.limit.unwrap();
        assert!(matches!(
            limit.count.as_literal(),
            Some(crate::ast::Literal::Integer(n)) if n == "10"
        ));
        assert!(matches!(
            limit.offset.as_ref().and_then(Expr::as_literal),
            Some(crate::ast::Literal::Integer(n)) if n == "5"
        ));
    }

    #[test]
    fn test_set_operations_nest_left() {
        let q = query("SELECT 1 UNION ALL SELECT 2 EXCEPT SELECT 3");
        let SetExpr::SetOperation { op, left, all, .. } = q.body else {
            panic!("expected a set operation");
        };
        assert_eq!(op, SetOperator::Except);
        assert_eq!(all, None);
        assert!(matches!(
            *left,
            SetExpr::SetOperation {
                op: SetOperator::Union,
                all: Some(true),
                ..
            }
        ));
    }

    #[test]
    fn test_joins() {
        let s = select(
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT OUTER JOIN c USING (id) NATURAL JOIN d",
        );
        let TableRef::Join(outer) = &s.from[0] else {
            panic!("expected a join");
        };
        assert_eq!(outer.kind, JoinKind::Natural);
        let TableRef::Join(middle) = &outer.left else {
            panic!("expected a nested join");
        };
        assert_eq!(middle.kind, JoinKind::Left);
        assert!(matches!(&middle.constraint, Some(JoinConstraint::Using(c)) if c.len() == 1));
    }

    #[test]
    fn test_outer_join_without_condition() {
        let (_, diagnostics) = reduce("SELECT * FROM a LEFT JOIN b");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    }

    #[test]
    fn test_derived_table_alias() {
        let s = select(
            "SELECT * FROM (SELECT 1) AS d (x), t PARTITION (p0) USE INDEX FOR JOIN (i1, PRIMARY)",
        );
        assert!(matches!(
            &s.from[0],
            TableRef::Derived { alias: Some(a), columns, .. }
                if a.value == "d" && columns.len() == 1
        ));
        let TableRef::Table { partitions, index_hints, .. } = &s.from[1] else {
            panic!("expected a table");
        };
        assert_eq!(partitions.len(), 1);
        assert_eq!(index_hints[0].scope, Some(IndexHintScope::Join));
        assert_eq!(index_hints[0].indexes[1].value, "PRIMARY");

        let (statement, diagnostics) = reduce("SELECT * FROM (SELECT 1)");
        assert!(matches!(statement, Statement::Query(_)));
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    }

    #[test]
    fn test_with_clause() {
        let q = query("WITH RECURSIVE r (n) AS (SELECT 1) SELECT n FROM r");
        let with = q.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.ctes[0].name.value, "r");
        assert_eq!(with.ctes[0].columns.len(), 1);
    }

    #[test]
    fn test_into_outfile() {
        let q = query(
            "SELECT a FROM t INTO OUTFILE '/tmp/x' FIELDS TERMINATED BY ',' \
             OPTIONALLY ENCLOSED BY '\"' LINES TERMINATED BY '\\n'",
        );
        let Some(IntoTarget::Outfile { file, fields, lines, .. }) = q.into else {
            panic!("expected OUTFILE");
        };
        assert_eq!(file, "'/tmp/x'");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].option, "OPTIONALLY ENCLOSED BY");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_parenthesized_query_unwraps() {
        let q = query("(SELECT 1)");
        assert!(q.as_select().is_some());
        let q = query("(SELECT 1) UNION (SELECT 2) ORDER BY 1");
        assert!(matches!(q.body, SetExpr::SetOperation { .. }));
        assert_eq!(q.order_by.len(), 1);
    }
}
