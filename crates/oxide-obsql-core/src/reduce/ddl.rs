//! Tables, columns, constraints, indexes and views.

use super::children::Children;
use super::dml::take_query;
use super::fragment::{ColumnAttr, ColumnAttrKind, Fragment};
use super::name::ident_from;
use super::table::ReductionTable;
use crate::ast::{
    AlterTable, AlterTableAction, AlterTableItem, CheckConstraint, ColumnDef, ColumnPosition,
    CreateIndex, CreateTable, CreateTableLike, CreateView, DataType, DropBehavior, DropIndex,
    DropRoutine, DropTable, DropView, DuplicateHandling, Expr, ForeignKey, ForeignKeyReference,
    GeneratedColumn, GeneratedStorage, Ident, IndexAlgorithm, IndexDef, IndexKey, IndexKind,
    IndexOptions, MatchType, ObjectName, OrderDirection, PartitionSpec, ReferenceAction,
    RenameTable, RoutineKind, SortColumn, Statement, TableConstraint, TableOptions, TableRename,
    TruncateTable, UserName, ViewCheckOption, ViewSecurity,
};
use crate::cst::RuleKind;
use crate::lexer::{Keyword, TokenKind};

pub(super) fn register(table: &mut ReductionTable) {
    table.statement(RuleKind::CreateTableStmt, create_table);
    table.statement(RuleKind::CreateTableLikeStmt, create_table_like);
    table.statement(RuleKind::AlterTableStmt, alter_table);
    table.statement(RuleKind::DropTableStmt, drop_table);
    table.statement(RuleKind::TruncateTableStmt, truncate_table);
    table.statement(RuleKind::RenameTableStmt, rename_table);
    table.statement(RuleKind::CreateIndexStmt, create_index);
    table.statement(RuleKind::DropIndexStmt, drop_index);
    table.statement(RuleKind::CreateViewStmt, create_view);
    table.statement(RuleKind::DropViewStmt, drop_view);
    for kind in [
        RuleKind::DropFunctionStmt,
        RuleKind::DropProcedureStmt,
        RuleKind::DropTriggerStmt,
    ] {
        table.statement(kind, drop_routine);
    }
    table.register(RuleKind::ColumnDefinition, column_definition);
    table.register(RuleKind::ColumnAttribute, column_attribute);
    table.register(RuleKind::ReferencesClause, references_clause);
    table.register(RuleKind::OutOfLineConstraint, out_of_line_constraint);
    table.register(RuleKind::OutOfLineIndex, out_of_line_index);
    table.register(RuleKind::OutOfLineUniqueIndex, out_of_line_index);
    table.register(RuleKind::IndexUsingAlgorithm, index_using_algorithm);
    table.register(RuleKind::SortColumnKey, sort_column_key);
    table.register(RuleKind::AlterTableAction, alter_table_action);
    table.register(RuleKind::RenameTableAction, rename_table_action);
}

/// CASCADE or RESTRICT among the remaining words.
fn drop_behavior(children: &Children<'_>) -> Option<DropBehavior> {
    if children.has_word("CASCADE") {
        Some(DropBehavior::Cascade)
    } else if children.has_word("RESTRICT") {
        Some(DropBehavior::Restrict)
    } else {
        None
    }
}

/// The name right after `CONSTRAINT`, if one was written.
fn constraint_name(children: &mut Children<'_>) -> Option<Ident> {
    let at = children.find_keyword(Keyword::Constraint)?;
    children.take_range(at + 1, at + 2)
}

fn check_constraint(children: &mut Children<'_>) -> CheckConstraint {
    let name = constraint_name(children);
    let expr: Expr = children.require("a check condition");
    let enforced = children
        .has_word("ENFORCED")
        .then(|| !children.has_keyword(Keyword::Not));
    CheckConstraint {
        name,
        expr,
        enforced,
        span: children.span(),
    }
}

fn create_table(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let duplicates = if children.has_keyword(Keyword::Ignore) {
        Some(DuplicateHandling::Ignore)
    } else if children.has_keyword(Keyword::Replace) {
        Some(DuplicateHandling::Replace)
    } else {
        None
    };
    let create = CreateTable {
        temporary: children.has_keyword(Keyword::Temporary),
        external: children.has_keyword(Keyword::External),
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a table name"),
        columns: children.take_all(),
        constraints: children.take_all(),
        options: children.take::<TableOptions>().unwrap_or_default(),
        partition: children.take(),
        duplicates,
        query: take_query(children).map(Box::new),
        span,
    };
    if create.columns.is_empty() && create.constraints.is_empty() && create.query.is_none() {
        children.missing_clause(
            format!(
                "CREATE TABLE {} needs column definitions or AS SELECT",
                create.name.name
            ),
            span,
        );
    }
    Some(Statement::CreateTable(Box::new(create)).into())
}

fn create_table_like(children: &mut Children<'_>) -> Option<Fragment> {
    let like = CreateTableLike {
        temporary: children.has_keyword(Keyword::Temporary),
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a table name"),
        source: children.require("a template table"),
        span: children.span(),
    };
    Some(Statement::CreateTableLike(Box::new(like)).into())
}

fn column_definition(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let Some(type_at) = children.position::<DataType>(0, children.len()) else {
        children.mismatch("expected a data type");
        return None;
    };
    let mut names = Vec::new();
    while let Some(name) = children.take_range::<Ident>(0, type_at) {
        names.push(name);
    }
    let name = names.pop().unwrap_or_else(|| Ident::new("", span));
    let data_type: DataType = children.take()?;
    let mut column = ColumnDef::new(name, data_type, span);
    column.table = names.pop();

    if children.has_keyword(Keyword::As) {
        let start = children
            .find_word("GENERATED")
            .or_else(|| children.find_keyword(Keyword::As))
            .and_then(|i| children.token_at(i))
            .map(|t| t.span);
        let expr: Expr = children.require("a generating expression");
        let storage = if children.has_word("STORED") {
            Some(GeneratedStorage::Stored)
        } else if children.has_word("VIRTUAL") {
            Some(GeneratedStorage::Virtual)
        } else {
            None
        };
        let expr_span = expr.span();
        column.generated = Some(GeneratedColumn {
            expr,
            storage,
            span: start.map_or(expr_span, |s| s.merge(expr_span)),
        });
    }

    let attributes = children.take_all::<ColumnAttr>();
    fold_attributes(children, &mut column, attributes);
    column.references = children.take();
    column.position = if children.has_keyword(Keyword::First) {
        Some(ColumnPosition::First)
    } else if let Some(after) = children.take_after_word::<Ident>("AFTER") {
        Some(ColumnPosition::After(after))
    } else {
        children
            .take_after_word::<Ident>("BEFORE")
            .map(ColumnPosition::Before)
    };
    Some(column.into())
}

/// Compares attribute values that may legitimately be written twice.
fn same_value(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (
            Expr::CurrentTime {
                function: f1,
                precision: p1,
                ..
            },
            Expr::CurrentTime {
                function: f2,
                precision: p2,
                ..
            },
        ) => f1.eq_ignore_case(&f2.value) && p1 == p2,
        _ => a.as_literal().is_some() && a.as_literal() == b.as_literal(),
    }
}

/// Applies attributes in source order. A repeated attribute keeps its last
/// value and is reported when the value changed.
fn fold_attributes(
    children: &mut Children<'_>,
    column: &mut ColumnDef,
    attributes: Vec<ColumnAttr>,
) {
    for attribute in attributes {
        let conflict = match attribute.kind {
            ColumnAttrKind::Nullable(nullable) => {
                let conflict = column.nullable.is_some_and(|old| old != nullable);
                column.nullable = Some(nullable);
                conflict.then_some("NULL")
            }
            ColumnAttrKind::Default(expr) => {
                let conflict = column.default.as_ref().is_some_and(|old| !same_value(old, &expr));
                column.default = Some(expr);
                conflict.then_some("DEFAULT")
            }
            ColumnAttrKind::AutoIncrement => {
                column.auto_increment = true;
                None
            }
            ColumnAttrKind::PrimaryKey => {
                column.primary_key = true;
                None
            }
            ColumnAttrKind::Unique => {
                column.unique = true;
                None
            }
            ColumnAttrKind::Comment(comment) => {
                let conflict = column
                    .comment
                    .as_ref()
                    .is_some_and(|old| old.string_value() != comment.string_value());
                column.comment = Some(comment);
                conflict.then_some("COMMENT")
            }
            ColumnAttrKind::OnUpdate(expr) => {
                let conflict = column.on_update.as_ref().is_some_and(|old| !same_value(old, &expr));
                column.on_update = Some(expr);
                conflict.then_some("ON UPDATE")
            }
            ColumnAttrKind::Collate(collation) => {
                let conflict = column
                    .collation
                    .as_ref()
                    .is_some_and(|old| !old.eq_ignore_case(&collation.value));
                column.collation = Some(collation);
                conflict.then_some("COLLATE")
            }
            ColumnAttrKind::Check(check) => {
                column.checks.push(check);
                None
            }
            ColumnAttrKind::Srid(srid) => {
                let conflict = column.srid.as_ref().is_some_and(|old| *old != srid);
                column.srid = Some(srid);
                conflict.then_some("SRID")
            }
            ColumnAttrKind::Id(id) => {
                let conflict = column.id.as_ref().is_some_and(|old| *old != id);
                column.id = Some(id);
                conflict.then_some("ID")
            }
            ColumnAttrKind::Visible(visible) => {
                let conflict = column.visible.is_some_and(|old| old != visible);
                column.visible = Some(visible);
                conflict.then_some("VISIBLE")
            }
        };
        if let Some(what) = conflict {
            children.ambiguous(
                format!("column {} repeats {what} with a different value", column.name),
                attribute.span,
            );
        }
    }
}

fn column_attribute(children: &mut Children<'_>) -> Option<Fragment> {
    let head = children.first_token()?;
    let keyword = head.keyword();
    let word = head.text.to_ascii_uppercase();
    let kind = match keyword {
        Some(Keyword::Not) => ColumnAttrKind::Nullable(false),
        Some(Keyword::Null) => ColumnAttrKind::Nullable(true),
        Some(Keyword::Default) => ColumnAttrKind::Default(children.require("a default value")),
        Some(Keyword::Primary | Keyword::Key) => ColumnAttrKind::PrimaryKey,
        Some(Keyword::Unique) => ColumnAttrKind::Unique,
        Some(Keyword::On) => ColumnAttrKind::OnUpdate(children.require("an ON UPDATE value")),
        Some(Keyword::Collate) => ColumnAttrKind::Collate(children.require("a collation")),
        Some(Keyword::Constraint | Keyword::Check) => {
            ColumnAttrKind::Check(check_constraint(children))
        }
        _ => match word.as_str() {
            "AUTO_INCREMENT" => ColumnAttrKind::AutoIncrement,
            "COMMENT" => match children.take::<Expr>() {
                Some(Expr::Literal { value, .. }) => ColumnAttrKind::Comment(value),
                _ => {
                    children.mismatch("expected a comment string");
                    return None;
                }
            },
            "SRID" | "ID" => {
                let value = children
                    .tokens()
                    .find(|(_, t)| t.kind == TokenKind::IntNum)
                    .map(|(_, t)| t.text.clone())?;
                if word == "SRID" {
                    ColumnAttrKind::Srid(value)
                } else {
                    ColumnAttrKind::Id(value)
                }
            }
            "VISIBLE" => ColumnAttrKind::Visible(true),
            "INVISIBLE" => ColumnAttrKind::Visible(false),
            _ => {
                children.mismatch(format!("unknown column attribute {word}"));
                return None;
            }
        },
    };
    Some(
        ColumnAttr {
            kind,
            span: children.span(),
        }
        .into(),
    )
}

fn reference_action(words: &[String]) -> Option<ReferenceAction> {
    let first = words.first()?.as_str();
    let second = words.get(1).map(String::as_str);
    match (first, second) {
        ("RESTRICT", _) => Some(ReferenceAction::Restrict),
        ("CASCADE", _) => Some(ReferenceAction::Cascade),
        ("SET", Some("NULL")) => Some(ReferenceAction::SetNull),
        ("SET", Some("DEFAULT")) => Some(ReferenceAction::SetDefault),
        ("NO", Some("ACTION")) => Some(ReferenceAction::NoAction),
        _ => None,
    }
}

fn references_clause(children: &mut Children<'_>) -> Option<Fragment> {
    let words = children.words();
    let match_type = words
        .iter()
        .position(|w| w == "MATCH")
        .and_then(|i| words.get(i + 1))
        .and_then(|w| match w.as_str() {
            "FULL" => Some(MatchType::Full),
            "PARTIAL" => Some(MatchType::Partial),
            "SIMPLE" => Some(MatchType::Simple),
            _ => None,
        });
    let mut on_delete = None;
    let mut on_update = None;
    for (i, pair) in words.windows(2).enumerate() {
        if pair[0] != "ON" {
            continue;
        }
        let action = reference_action(&words[i + 2..]);
        match pair[1].as_str() {
            "DELETE" => on_delete = action,
            "UPDATE" => on_update = action,
            _ => {}
        }
    }
    Some(
        ForeignKeyReference {
            table: children.require("a referenced table"),
            columns: children.take::<Vec<Ident>>().unwrap_or_default(),
            match_type,
            on_delete,
            on_update,
            span: children.span(),
        }
        .into(),
    )
}

fn index_def(children: &mut Children<'_>, kind: IndexKind) -> IndexDef {
    let constraint_name = constraint_name(children);
    IndexDef {
        kind,
        constraint_name,
        name: children.take(),
        algorithm: children.take(),
        columns: children.take_all(),
        options: children.take::<IndexOptions>().unwrap_or_default(),
        partition: children.take::<PartitionSpec>(),
        span: children.span(),
    }
}

fn out_of_line_constraint(children: &mut Children<'_>) -> Option<Fragment> {
    let constraint = if children.has_keyword(Keyword::Foreign) {
        let constraint_name = constraint_name(children);
        let index_name = children.take();
        let columns = children.take::<Vec<Ident>>().unwrap_or_default();
        let Some(references) = children.take::<ForeignKeyReference>() else {
            children.mismatch("expected a REFERENCES clause");
            return None;
        };
        TableConstraint::ForeignKey(ForeignKey {
            constraint_name,
            index_name,
            columns,
            references,
            span: children.span(),
        })
    } else if children.has_keyword(Keyword::Primary) {
        TableConstraint::Index(index_def(children, IndexKind::Primary))
    } else {
        TableConstraint::Check(check_constraint(children))
    };
    Some(constraint.into())
}

fn out_of_line_index(children: &mut Children<'_>) -> Option<Fragment> {
    let kind = if children.rule() == RuleKind::OutOfLineUniqueIndex {
        IndexKind::Unique
    } else if children.has_keyword(Keyword::Fulltext) {
        IndexKind::Fulltext
    } else if children.has_keyword(Keyword::Spatial) {
        IndexKind::Spatial
    } else {
        IndexKind::Plain
    };
    Some(TableConstraint::Index(index_def(children, kind)).into())
}

fn index_using_algorithm(children: &mut Children<'_>) -> Option<Fragment> {
    let algorithm = children.tokens().nth(1).map(|(_, t)| t.text.to_ascii_uppercase());
    match algorithm.as_deref() {
        Some("BTREE") => Some(IndexAlgorithm::BTree.into()),
        Some("HASH") => Some(IndexAlgorithm::Hash.into()),
        other => {
            children.mismatch(format!("unknown index algorithm {}", other.unwrap_or("")));
            None
        }
    }
}

fn sort_column_key(children: &mut Children<'_>) -> Option<Fragment> {
    let direction = if children.has_keyword(Keyword::Desc) {
        Some(OrderDirection::Desc)
    } else if children.has_keyword(Keyword::Asc) {
        Some(OrderDirection::Asc)
    } else {
        None
    };
    let key = if let Some(name) = children.take::<Ident>() {
        let length = children
            .tokens()
            .find(|(_, t)| t.kind == TokenKind::IntNum)
            .map(|(_, t)| t.text.clone());
        IndexKey::Column { name, length }
    } else {
        IndexKey::Expr(children.require("an index expression"))
    };
    Some(
        SortColumn {
            key,
            direction,
            span: children.span(),
        }
        .into(),
    )
}

fn alter_table(children: &mut Children<'_>) -> Option<Fragment> {
    let alter = AlterTable {
        external: children.has_keyword(Keyword::External),
        name: children.require("a table name"),
        actions: children.take_all(),
        span: children.span(),
    };
    Some(Statement::AlterTable(Box::new(alter)).into())
}

fn alter_drop(children: &mut Children<'_>) -> AlterTableAction {
    let second = children.tokens().nth(1).and_then(|(_, t)| t.keyword());
    match second {
        Some(Keyword::Index | Keyword::Key) => {
            AlterTableAction::DropIndex(children.require("an index name"))
        }
        Some(Keyword::Primary) => AlterTableAction::DropPrimaryKey,
        Some(Keyword::Constraint | Keyword::Check) => {
            AlterTableAction::DropConstraint(children.require("a constraint name"))
        }
        Some(Keyword::Foreign) => {
            AlterTableAction::DropForeignKey(children.require("a foreign key name"))
        }
        Some(Keyword::Tablegroup) => AlterTableAction::DropTablegroup,
        _ if children.has_token(&TokenKind::LeftParen) => {
            AlterTableAction::DropColumns(children.take_all())
        }
        _ => AlterTableAction::DropColumn {
            name: children.require("a column name"),
            behavior: drop_behavior(children),
        },
    }
}

fn alter_alter(children: &mut Children<'_>) -> AlterTableAction {
    if children.has_keyword(Keyword::Index) {
        AlterTableAction::IndexVisibility {
            name: children.require("an index name"),
            visible: children.has_word("VISIBLE"),
        }
    } else if children.has_keyword(Keyword::Check) || children.has_keyword(Keyword::Constraint) {
        AlterTableAction::CheckEnforcement {
            name: children.require("a constraint name"),
            enforced: !children.has_keyword(Keyword::Not),
        }
    } else {
        let column = children.require("a column name");
        let default = if children.has_keyword(Keyword::Set) {
            Some(children.require("a default value"))
        } else {
            None
        };
        AlterTableAction::AlterColumnDefault { column, default }
    }
}

fn alter_rename(children: &mut Children<'_>) -> AlterTableAction {
    if children.has_keyword(Keyword::Column) {
        AlterTableAction::RenameColumn {
            old: children.require("a column name"),
            new: children.require("a new column name"),
        }
    } else if children.has_keyword(Keyword::Index) || children.has_keyword(Keyword::Key) {
        AlterTableAction::RenameIndex {
            old: children.require("an index name"),
            new: children.require("a new index name"),
        }
    } else {
        AlterTableAction::Rename(children.require("a new table name"))
    }
}

fn alter_table_action(children: &mut Children<'_>) -> Option<Fragment> {
    let action = if let Some(options) = children.take::<TableOptions>() {
        AlterTableAction::Options(options)
    } else if let Some(partition) = children.take() {
        AlterTableAction::Partition(partition)
    } else {
        let head = children.first_token().map(|t| t.text.to_ascii_uppercase());
        match head.as_deref() {
            Some("CONVERT") => AlterTableAction::ConvertCharset {
                charset: children.require("a character set"),
                collation: children.take_after(Keyword::Collate),
            },
            Some("ADD") => {
                let columns = children.take_all::<ColumnDef>();
                if columns.is_empty() {
                    let Some(constraint) = children.take() else {
                        children.mismatch("expected a column, constraint or index");
                        return None;
                    };
                    AlterTableAction::AddConstraint(constraint)
                } else {
                    AlterTableAction::AddColumns(columns)
                }
            }
            Some("DROP") => alter_drop(children),
            Some("ALTER") => alter_alter(children),
            Some("CHANGE") => {
                let old = children.require("a column name");
                let Some(column) = children.take() else {
                    children.mismatch("expected a column definition");
                    return None;
                };
                AlterTableAction::ChangeColumn { old, column }
            }
            Some("MODIFY") if children.has_token(&TokenKind::LeftParen) => {
                AlterTableAction::ModifyColumns(children.take_all())
            }
            Some("MODIFY") => AlterTableAction::ModifyColumn(children.take()?),
            Some("RENAME") => alter_rename(children),
            _ => {
                children.mismatch("unknown ALTER TABLE action");
                return None;
            }
        }
    };
    Some(
        AlterTableItem {
            action,
            span: children.span(),
        }
        .into(),
    )
}

fn drop_table(children: &mut Children<'_>) -> Option<Fragment> {
    let drop = DropTable {
        temporary: children.has_keyword(Keyword::Temporary),
        if_exists: children.has_keyword(Keyword::Exists),
        names: children.take_all(),
        behavior: drop_behavior(children),
        span: children.span(),
    };
    Some(Statement::DropTable(drop).into())
}

fn truncate_table(children: &mut Children<'_>) -> Option<Fragment> {
    let truncate = TruncateTable {
        name: children.require("a table name"),
        span: children.span(),
    };
    Some(Statement::TruncateTable(truncate).into())
}

fn rename_table_action(children: &mut Children<'_>) -> Option<Fragment> {
    Some(
        TableRename {
            from: children.require("a table name"),
            to: children.require("a new table name"),
            span: children.span(),
        }
        .into(),
    )
}

fn rename_table(children: &mut Children<'_>) -> Option<Fragment> {
    let rename = RenameTable {
        renames: children.take_all(),
        span: children.span(),
    };
    Some(Statement::RenameTable(rename).into())
}

fn create_index(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let kind = if children.has_keyword(Keyword::Unique) {
        IndexKind::Unique
    } else if children.has_keyword(Keyword::Fulltext) {
        IndexKind::Fulltext
    } else if children.has_keyword(Keyword::Spatial) {
        IndexKind::Spatial
    } else {
        IndexKind::Plain
    };
    let create = CreateIndex {
        kind,
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("an index name"),
        algorithm: children.take(),
        table: children.require("a table name"),
        columns: children.take_all(),
        options: children.take::<IndexOptions>().unwrap_or_default(),
        partition: children.take(),
        span,
    };
    if create.columns.is_empty() {
        children.missing_clause(
            format!("CREATE INDEX {} needs a column list", create.name),
            span,
        );
    }
    Some(Statement::CreateIndex(Box::new(create)).into())
}

fn drop_index(children: &mut Children<'_>) -> Option<Fragment> {
    let drop = DropIndex {
        name: children.require("an index name"),
        table: children.require("a table name"),
        span: children.span(),
    };
    Some(Statement::DropIndex(drop).into())
}

fn create_view(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    // ALGORITHM = name
    let algorithm = children
        .find_keyword(Keyword::Algorithm)
        .and_then(|i| children.token_at(i + 2))
        .map(ident_from);
    let security = children.token_after("SECURITY").map(|t| {
        if t.is_word("INVOKER") {
            ViewSecurity::Invoker
        } else {
            ViewSecurity::Definer
        }
    });
    let check_option = children.has_word("OPTION").then(|| {
        if children.has_word("CASCADED") {
            ViewCheckOption::Cascaded
        } else if children.has_word("LOCAL") {
            ViewCheckOption::Local
        } else {
            ViewCheckOption::Default
        }
    });
    let view = CreateView {
        or_replace: children.has_keyword(Keyword::Or),
        algorithm,
        definer: children.take::<UserName>(),
        security,
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require::<ObjectName>("a view name"),
        columns: children.take::<Vec<Ident>>().unwrap_or_default(),
        query: take_query(children).map(Box::new),
        check_option,
        span,
    };
    if view.query.is_none() {
        children.missing_clause(
            format!("CREATE VIEW {} needs AS SELECT", view.name.name),
            span,
        );
    }
    Some(Statement::CreateView(Box::new(view)).into())
}

fn drop_view(children: &mut Children<'_>) -> Option<Fragment> {
    let drop = DropView {
        if_exists: children.has_keyword(Keyword::Exists),
        names: children.take_all(),
        behavior: drop_behavior(children),
        span: children.span(),
    };
    Some(Statement::DropView(drop).into())
}

fn drop_routine(children: &mut Children<'_>) -> Option<Fragment> {
    let kind = match children.rule() {
        RuleKind::DropProcedureStmt => RoutineKind::Procedure,
        RuleKind::DropTriggerStmt => RoutineKind::Trigger,
        _ => RoutineKind::Function,
    };
    let drop = DropRoutine {
        kind,
        if_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a routine name"),
        span: children.span(),
    };
    Some(Statement::DropRoutine(drop).into())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{reduce, reduce_in, statement};
    use super::*;
    use crate::ast::{IndexOptionKey, OptionValue, TableOptionKey, TypeFamily};
    use crate::diagnostics::DiagnosticKind;
    use crate::dialect::OracleDialect;

    fn create_table(sql: &str) -> CreateTable {
        match statement(sql) {
            Statement::CreateTable(create) => *create,
            other => panic!("not a create table: {other:?}"),
        }
    }

    #[test]
    fn test_create_table_elements() {
        let create = create_table(
            "CREATE TABLE IF NOT EXISTS db.t (
                id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
                name VARCHAR(64) DEFAULT 'x' COMMENT 'name',
                ts TIMESTAMP(6) DEFAULT CURRENT_TIMESTAMP(6) ON UPDATE CURRENT_TIMESTAMP(6),
                PRIMARY KEY (id),
                UNIQUE KEY uk_name (name(10) DESC),
                KEY idx_ts USING BTREE (ts) LOCAL,
                CONSTRAINT fk FOREIGN KEY (id) REFERENCES p (pid) MATCH FULL
                    ON DELETE SET NULL ON UPDATE CASCADE,
                CHECK (id > 0) NOT ENFORCED
            ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4",
        );
        assert!(create.if_not_exists);
        assert_eq!(create.name.schema.as_ref().map(|s| s.value.as_str()), Some("db"));
        assert_eq!(create.columns.len(), 3);
        let id = &create.columns[0];
        assert_eq!(id.data_type.family, TypeFamily::Integer);
        assert!(id.data_type.unsigned);
        assert_eq!(id.nullable, Some(false));
        assert!(id.auto_increment);
        assert!(matches!(create.columns[2].on_update, Some(Expr::CurrentTime { .. })));

        assert_eq!(create.constraints.len(), 5);
        let TableConstraint::Index(unique) = &create.constraints[1] else {
            panic!("expected an index");
        };
        assert_eq!(unique.kind, IndexKind::Unique);
        assert_eq!(unique.name.as_ref().map(|n| n.value.as_str()), Some("uk_name"));
        assert_eq!(unique.columns[0].direction, Some(OrderDirection::Desc));
        assert!(matches!(
            &unique.columns[0].key,
            IndexKey::Column { length: Some(l), .. } if l == "10"
        ));
        let TableConstraint::Index(plain) = &create.constraints[2] else {
            panic!("expected an index");
        };
        assert_eq!(plain.algorithm, Some(IndexAlgorithm::BTree));
        assert_eq!(
            plain.options.value(IndexOptionKey::Global),
            Some(&OptionValue::Switch(false))
        );
        let TableConstraint::ForeignKey(fk) = &create.constraints[3] else {
            panic!("expected a foreign key");
        };
        assert_eq!(fk.constraint_name.as_ref().map(|n| n.value.as_str()), Some("fk"));
        assert_eq!(fk.references.match_type, Some(MatchType::Full));
        assert_eq!(fk.references.on_delete, Some(ReferenceAction::SetNull));
        assert_eq!(fk.references.on_update, Some(ReferenceAction::Cascade));
        let TableConstraint::Check(check) = &create.constraints[4] else {
            panic!("expected a check");
        };
        assert_eq!(check.enforced, Some(false));
        assert_eq!(create.options.text(TableOptionKey::Charset).as_deref(), Some("utf8mb4"));
    }

    #[test]
    fn test_generated_column_and_position() {
        let Statement::AlterTable(alter) = statement(
            "ALTER TABLE t ADD COLUMN b INT GENERATED ALWAYS AS (a + 1) STORED AFTER a",
        ) else {
            panic!("not an alter table");
        };
        let AlterTableAction::AddColumns(columns) = &alter.actions[0].action else {
            panic!("expected ADD COLUMN");
        };
        let generated = columns[0].generated.as_ref().unwrap();
        assert_eq!(generated.storage, Some(GeneratedStorage::Stored));
        assert!(matches!(&columns[0].position, Some(ColumnPosition::After(a)) if a.value == "a"));
    }

    #[test]
    fn test_conflicting_column_attributes() {
        let (statement, diagnostics) =
            reduce(
                "CREATE TABLE t (a INT NULL NOT NULL DEFAULT 1 DEFAULT 1 \
                 COMMENT 'x' COMMENT 'y')",
            );
        let Statement::CreateTable(create) = statement else {
            panic!("not a create table");
        };
        let a = &create.columns[0];
        assert_eq!(a.nullable, Some(false));
        assert_eq!(a.comment.as_ref().and_then(|c| c.string_value()).as_deref(), Some("y"));
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::AmbiguousOption; 2]);
    }

    #[test]
    fn test_create_table_without_body() {
        let (statement, diagnostics) = reduce("CREATE TABLE t");
        assert!(matches!(statement, Statement::CreateTable(_)));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);

        let create = create_table("CREATE TABLE t2 IGNORE AS SELECT * FROM t1");
        assert_eq!(create.duplicates, Some(DuplicateHandling::Ignore));
        assert!(create.query.is_some());
    }

    #[test]
    fn test_create_table_like() {
        let Statement::CreateTableLike(like) = statement("CREATE TABLE t2 (LIKE db.t1)") else {
            panic!("not a create table like");
        };
        assert_eq!(like.source.name.value, "t1");
    }

    #[test]
    fn test_alter_table_actions() {
        let Statement::AlterTable(alter) = statement(
            "ALTER TABLE t DROP COLUMN d CASCADE, MODIFY e BIGINT, CHANGE f g TEXT,
             RENAME COLUMN h TO i, ALTER COLUMN j SET DEFAULT 1, ALTER COLUMN k DROP DEFAULT,
             DROP INDEX idx, DROP PRIMARY KEY, ADD INDEX idx2 (c), ALTER INDEX idx2 INVISIBLE,
             ALTER CHECK ck NOT ENFORCED, RENAME TO t2, COMMENT = 'x',
             CONVERT TO CHARACTER SET utf8mb4 COLLATE utf8mb4_bin",
        ) else {
            panic!("not an alter table");
        };
        let actions: Vec<_> = alter.actions.iter().map(|a| &a.action).collect();
        assert_eq!(actions.len(), 14);
        assert!(matches!(
            actions[0],
            AlterTableAction::DropColumn { behavior: Some(DropBehavior::Cascade), .. }
        ));
        assert!(matches!(actions[1], AlterTableAction::ModifyColumn(_)));
        assert!(matches!(
            actions[2],
            AlterTableAction::ChangeColumn { old, .. } if old.value == "f"
        ));
        assert!(matches!(actions[3], AlterTableAction::RenameColumn { .. }));
        assert!(matches!(
            actions[4],
            AlterTableAction::AlterColumnDefault { default: Some(_), .. }
        ));
        assert!(matches!(actions[5], AlterTableAction::AlterColumnDefault { default: None, .. }));
        assert!(matches!(actions[6], AlterTableAction::DropIndex(_)));
        assert_eq!(actions[7], &AlterTableAction::DropPrimaryKey);
        assert!(matches!(actions[8], AlterTableAction::AddConstraint(TableConstraint::Index(_))));
        assert!(matches!(actions[9], AlterTableAction::IndexVisibility { visible: false, .. }));
        assert!(matches!(actions[10], AlterTableAction::CheckEnforcement { enforced: false, .. }));
        assert!(matches!(actions[11], AlterTableAction::Rename(_)));
        assert!(matches!(actions[12], AlterTableAction::Options(_)));
        assert!(matches!(
            actions[13],
            AlterTableAction::ConvertCharset { collation: Some(_), .. }
        ));
    }

    #[test]
    fn test_oracle_column_lists() {
        let (statement, diagnostics) =
            reduce_in("ALTER TABLE t MODIFY (a NUMBER(5) NOT NULL), DROP (b, c)", &OracleDialect);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let Statement::AlterTable(alter) = statement else {
            panic!("not an alter table");
        };
        let actions: Vec<_> = alter.actions.iter().map(|a| &a.action).collect();
        let AlterTableAction::ModifyColumns(columns) = actions[0] else {
            panic!("not a column list: {:?}", actions[0]);
        };
        assert_eq!(columns[0].name.value, "a");
        assert_eq!(columns[0].data_type.family, TypeFamily::Decimal);
        assert!(matches!(
            actions[1],
            AlterTableAction::DropColumns(names) if names.len() == 2
        ));
    }

    #[test]
    fn test_drop_truncate_rename() {
        let Statement::DropTable(drop) = statement("DROP TEMPORARY TABLE IF EXISTS a, b RESTRICT")
        else {
            panic!("not a drop table");
        };
        assert!(drop.temporary && drop.if_exists);
        assert_eq!(drop.names.len(), 2);
        assert_eq!(drop.behavior, Some(DropBehavior::Restrict));

        assert!(matches!(statement("TRUNCATE TABLE t"), Statement::TruncateTable(_)));
        let Statement::RenameTable(rename) = statement("RENAME TABLE a TO b, c TO d") else {
            panic!("not a rename");
        };
        assert_eq!(rename.renames.len(), 2);
        assert_eq!(rename.renames[1].to.name.value, "d");
    }

    #[test]
    fn test_create_index() {
        let Statement::CreateIndex(index) =
            statement("CREATE UNIQUE INDEX IF NOT EXISTS idx ON t (a, (b + 1)) GLOBAL")
        else {
            panic!("not a create index");
        };
        assert_eq!(index.kind, IndexKind::Unique);
        assert!(index.if_not_exists);
        assert_eq!(index.columns.len(), 2);
        assert!(matches!(index.columns[1].key, IndexKey::Expr(_)));

        let (_, diagnostics) = reduce("CREATE INDEX idx ON t");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    }

    #[test]
    fn test_views() {
        let Statement::CreateView(view) = statement(
            "CREATE OR REPLACE ALGORITHM = MERGE DEFINER = 'root'@'%' SQL SECURITY INVOKER \
             VIEW v (a, b) AS SELECT 1, 2 WITH LOCAL CHECK OPTION",
        ) else {
            panic!("not a create view");
        };
        assert!(view.or_replace);
        assert_eq!(view.algorithm.as_ref().map(|a| a.value.as_str()), Some("MERGE"));
        assert_eq!(view.definer.as_ref().map(|d| d.user.as_str()), Some("root"));
        assert_eq!(view.security, Some(ViewSecurity::Invoker));
        assert_eq!(view.columns.len(), 2);
        assert!(view.query.is_some());
        assert_eq!(view.check_option, Some(ViewCheckOption::Local));

        let (_, diagnostics) = reduce("CREATE VIEW v");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    }

    #[test]
    fn test_drop_routine() {
        let Statement::DropRoutine(drop) = statement("DROP PROCEDURE IF EXISTS db.p") else {
            panic!("not a drop routine");
        };
        assert_eq!(drop.kind, RoutineKind::Procedure);
        assert!(drop.if_exists);
    }
}
