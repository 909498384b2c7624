//! PARTITION BY clauses, partition elements and ALTER TABLE partition
//! actions.
//!
//! Element productions follow what each element contains, not the method,
//! so the shape checks run here once the whole clause is reduced. They
//! report `MissingClause` on the offending element and never drop it.

use super::children::Children;
use super::fragment::{Fragment, RawOption};
use super::table::ReductionTable;
use crate::ast::{
    AlterPartition, ElementKind, Expr, Ident, ObjectName, PartitionAttrKey, PartitionBound,
    PartitionElement, PartitionMethod, PartitionSpec, RangeValue, SubpartitionSpec,
};
use crate::cst::RuleKind;
use crate::lexer::{Keyword, Span};

pub(super) fn register(table: &mut ReductionTable) {
    for kind in [
        RuleKind::HashPartitionOption,
        RuleKind::KeyPartitionOption,
        RuleKind::RangePartitionOption,
        RuleKind::ListPartitionOption,
    ] {
        table.register(kind, partition_option);
    }
    table.register(RuleKind::SubpartitionTemplateOption, subpartition_option);
    table.register(RuleKind::SubpartitionIndividualOption, subpartition_option);
    for kind in [
        RuleKind::HashPartitionElement,
        RuleKind::RangePartitionElement,
        RuleKind::ListPartitionElement,
        RuleKind::HashSubpartitionElement,
        RuleKind::RangeSubpartitionElement,
        RuleKind::ListSubpartitionElement,
    ] {
        table.register(kind, partition_element);
    }
    table.register(RuleKind::RangePartitionExpr, range_partition_expr);
    table.register(RuleKind::RangeExpr, range_expr);
    table.register(RuleKind::ListPartitionExpr, list_partition_expr);
    table.register(RuleKind::AlterPartitionOption, alter_partition_option);
}

/// Reads the method words (`RANGE COLUMNS`, `HASH`, ...) left in a clause.
fn method(children: &Children<'_>) -> Option<PartitionMethod> {
    let words = children.words();
    let columns = words.iter().any(|w| w == "COLUMNS");
    words.iter().find_map(|w| match w.as_str() {
        "HASH" => Some(PartitionMethod::Hash),
        "KEY" => Some(PartitionMethod::Key),
        "RANGE" if columns => Some(PartitionMethod::RangeColumns),
        "RANGE" => Some(PartitionMethod::Range),
        "LIST" if columns => Some(PartitionMethod::ListColumns),
        "LIST" => Some(PartitionMethod::List),
        _ => None,
    })
}

fn partition_option(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(method) = method(children) else {
        children.mismatch("expected a partitioning method");
        return None;
    };
    let columns = children.take::<Vec<Ident>>().unwrap_or_default();
    let expr = children.take::<Expr>();
    let subpartition = children.take::<SubpartitionSpec>();
    let count = children.value_after("PARTITIONS");
    let partitions = children.take_all::<PartitionElement>();
    let spec = PartitionSpec {
        method,
        expr,
        columns,
        count,
        subpartition,
        partitions,
        span: children.span(),
    };
    validate(children, &spec);
    Some(spec.into())
}

fn subpartition_option(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(method) = method(children) else {
        children.mismatch("expected a subpartitioning method");
        return None;
    };
    Some(
        SubpartitionSpec {
            method,
            columns: children.take::<Vec<Ident>>().unwrap_or_default(),
            expr: children.take::<Expr>(),
            template: children.take_all::<PartitionElement>(),
            count: children.value_after("SUBPARTITIONS"),
            span: children.span(),
        }
        .into(),
    )
}

fn element_kind(rule: RuleKind) -> ElementKind {
    match rule {
        RuleKind::RangePartitionElement | RuleKind::RangeSubpartitionElement => {
            ElementKind::Range
        }
        RuleKind::ListPartitionElement | RuleKind::ListSubpartitionElement => ElementKind::List,
        _ => ElementKind::Hash,
    }
}

fn partition_element(children: &mut Children<'_>) -> Option<Fragment> {
    let rule = children.rule();
    let name: ObjectName = children.require("a partition name");
    let bound = children.take::<PartitionBound>();
    let raw = children.take_all::<RawOption>();
    let attributes = super::option::fold::<PartitionAttrKey>(children, raw);
    Some(
        PartitionElement {
            name,
            sub: matches!(
                rule,
                RuleKind::HashSubpartitionElement
                    | RuleKind::RangeSubpartitionElement
                    | RuleKind::ListSubpartitionElement
            ),
            kind: element_kind(rule),
            bound,
            attributes,
            subpartitions: children.take_all::<PartitionElement>(),
            span: children.span(),
        }
        .into(),
    )
}

fn range_partition_expr(children: &mut Children<'_>) -> Option<Fragment> {
    let mut values = children.take_all::<RangeValue>();
    if values.is_empty() && children.has_word("MAXVALUE") {
        values.push(RangeValue::MaxValue);
    }
    Some(PartitionBound::LessThan(values).into())
}

fn range_expr(children: &mut Children<'_>) -> Option<Fragment> {
    if let Some(expr) = children.take::<Expr>() {
        return Some(RangeValue::Expr(expr).into());
    }
    Some(RangeValue::MaxValue.into())
}

fn list_partition_expr(children: &mut Children<'_>) -> Option<Fragment> {
    if children.has_keyword(Keyword::Default) {
        return Some(PartitionBound::InDefault.into());
    }
    Some(PartitionBound::In(children.take_all()).into())
}

fn alter_partition_option(children: &mut Children<'_>) -> Option<Fragment> {
    let head = children.first_token().map(|t| t.text.to_ascii_uppercase());
    let action = match head.as_deref() {
        Some("ADD") => AlterPartition::Add(children.take_all()),
        Some("DROP") => AlterPartition::Drop {
            sub: children.has_word("SUBPARTITION"),
            names: children.take::<Vec<Ident>>().unwrap_or_default(),
        },
        Some("TRUNCATE") => AlterPartition::Truncate {
            sub: children.has_word("SUBPARTITION"),
            names: children.take::<Vec<Ident>>().unwrap_or_default(),
        },
        Some("REORGANIZE") => AlterPartition::Reorganize {
            names: children.take::<Vec<Ident>>().unwrap_or_default(),
            into: children.take_all(),
        },
        Some("REMOVE") => AlterPartition::Remove,
        _ => AlterPartition::Repartition(children.take::<PartitionSpec>()?),
    };
    Some(action.into())
}

/// Number of values a tuple bound holds.
fn tuple_arity(expr: &Expr) -> usize {
    match expr {
        Expr::Row { items, .. } => items.len(),
        _ => 1,
    }
}

/// Checks one element's bound against the method and its column count.
fn check_bound(
    children: &mut Children<'_>,
    method: PartitionMethod,
    columns: usize,
    element: &PartitionElement,
) {
    let name = &element.name.name.value;
    let expected = method.element_kind();
    if element.kind != expected {
        let found = match element.kind {
            ElementKind::Hash => "no bound",
            ElementKind::Range => "a VALUES LESS THAN bound",
            ElementKind::List => "a VALUES IN bound",
        };
        children.missing_clause(
            format!(
                "partition {name} has {found} but the method is {}",
                method.as_str()
            ),
            element.span,
        );
        return;
    }
    match (&element.bound, method) {
        (Some(PartitionBound::LessThan(values)), PartitionMethod::Range) if values.len() != 1 => {
            children.missing_clause(
                format!("partition {name} of RANGE must have exactly one value"),
                element.span,
            );
        }
        (Some(PartitionBound::LessThan(values)), PartitionMethod::RangeColumns)
            if values.len() != columns =>
        {
            children.missing_clause(
                format!(
                    "partition {name} has {} values for {columns} RANGE COLUMNS",
                    values.len()
                ),
                element.span,
            );
        }
        (Some(PartitionBound::In(values)), PartitionMethod::ListColumns) => {
            if let Some(bad) = values.iter().find(|v| tuple_arity(v) != columns) {
                children.missing_clause(
                    format!(
                        "partition {name} has a {}-value tuple for {columns} LIST COLUMNS",
                        tuple_arity(bad)
                    ),
                    element.span,
                );
            }
        }
        _ => {}
    }
}

fn validate(children: &mut Children<'_>, spec: &PartitionSpec) {
    let columns = spec.columns.len();
    for element in &spec.partitions {
        check_bound(children, spec.method, columns, element);
        if element.subpartitions.is_empty() {
            continue;
        }
        let Some(sub) = &spec.subpartition else {
            children.missing_clause(
                format!(
                    "partition {} has subpartitions but no SUBPARTITION BY clause",
                    element.name.name.value
                ),
                element.span,
            );
            continue;
        };
        if !sub.template.is_empty() {
            children.missing_clause(
                format!(
                    "partition {} lists subpartitions that replace the template",
                    element.name.name.value
                ),
                element.span,
            );
        }
        for child in &element.subpartitions {
            check_bound(children, sub.method, sub.columns.len(), child);
        }
    }
    if let Some(sub) = &spec.subpartition {
        for child in &sub.template {
            check_bound(children, sub.method, sub.columns.len(), child);
        }
    }
    if let Some(count) = spec.count.as_deref().and_then(|n| n.parse::<usize>().ok()) {
        if !spec.partitions.is_empty() && count != spec.partitions.len() {
            let span = spec
                .partitions
                .iter()
                .map(|p| p.span)
                .reduce(Span::merge)
                .unwrap_or(spec.span);
            children.missing_clause(
                format!(
                    "PARTITIONS {count} does not match the {} listed partitions",
                    spec.partitions.len()
                ),
                span,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{reduce, statement};
    use super::*;
    use crate::ast::{AlterTableAction, Statement};
    use crate::diagnostics::{Diagnostic, DiagnosticKind};

    fn partition(sql: &str) -> (PartitionSpec, Vec<Diagnostic>) {
        match reduce(sql) {
            (Statement::CreateTable(create), diagnostics) => (
                create.partition.unwrap_or_else(|| panic!("no partitioning: {sql}")),
                diagnostics,
            ),
            (other, _) => panic!("not a create table: {other:?}"),
        }
    }

    #[test]
    fn test_hash_partitions_count() {
        let (spec, diagnostics) =
            partition("CREATE TABLE t (a INT) PARTITION BY HASH(a) PARTITIONS 4");
        assert!(diagnostics.is_empty());
        assert_eq!(spec.method, PartitionMethod::Hash);
        assert!(spec.expr.is_some());
        assert_eq!(spec.count.as_deref(), Some("4"));
        assert!(spec.partitions.is_empty());
    }

    #[test]
    fn test_range_columns_with_maxvalue_and_attributes() {
        let (spec, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE COLUMNS(a, b) (
                PARTITION p0 VALUES LESS THAN (10, 20) ID 5 COMMENT 'first',
                PARTITION p1 VALUES LESS THAN (MAXVALUE, MAXVALUE)
            )",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(spec.method, PartitionMethod::RangeColumns);
        assert_eq!(spec.columns.len(), 2);
        let p0 = &spec.partitions[0];
        assert_eq!(p0.attributes.text(PartitionAttrKey::Id).as_deref(), Some("5"));
        assert_eq!(p0.attributes.text(PartitionAttrKey::Comment).as_deref(), Some("first"));
        assert_eq!(
            spec.partitions[1].bound,
            Some(PartitionBound::LessThan(vec![RangeValue::MaxValue, RangeValue::MaxValue]))
        );
    }

    #[test]
    fn test_element_kind_mismatch() {
        let (spec, diagnostics) = partition(
            "CREATE TABLE t (a INT) PARTITION BY RANGE(a) (PARTITION p0 VALUES IN (1, 2))",
        );
        assert_eq!(spec.partitions.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
        assert_eq!(diagnostics[0].span, spec.partitions[0].span);
    }

    #[test]
    fn test_arity_checks() {
        let (_, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE COLUMNS(a, b) \
             (PARTITION p0 VALUES LESS THAN (1))",
        );
        assert_eq!(diagnostics.len(), 1);

        let (_, diagnostics) = partition(
            "CREATE TABLE t (a INT) PARTITION BY RANGE(a) (PARTITION p0 VALUES LESS THAN (1, 2))",
        );
        assert_eq!(diagnostics.len(), 1);

        let (_, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY LIST COLUMNS(a, b) (
                PARTITION p0 VALUES IN ((1, 2), (3, 4)),
                PARTITION p1 VALUES IN ((5, 6, 7))
            )",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("p1"));
    }

    #[test]
    fn test_partition_count_mismatch() {
        let (_, diagnostics) = partition(
            "CREATE TABLE t (a INT) PARTITION BY HASH(a) PARTITIONS 3 (PARTITION p0, PARTITION p1)",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingClause);
    }

    #[test]
    fn test_subpartitions() {
        let (spec, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE(a) SUBPARTITION BY HASH(b)
             SUBPARTITION TEMPLATE (SUBPARTITION s0, SUBPARTITION s1)
             (PARTITION p0 VALUES LESS THAN (100))",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let sub = spec.subpartition.unwrap();
        assert_eq!(sub.method, PartitionMethod::Hash);
        assert_eq!(sub.template.len(), 2);
        assert!(sub.template.iter().all(|e| e.sub));

        let (spec, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY LIST(a) SUBPARTITION BY RANGE(b)
             (PARTITION p0 VALUES IN (1) (SUBPARTITION s0 VALUES LESS THAN (5)))",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(spec.partitions[0].subpartitions.len(), 1);
    }

    #[test]
    fn test_subpartition_problems() {
        let (_, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY LIST(a)
             (PARTITION p0 VALUES IN (1) (SUBPARTITION s0))",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("SUBPARTITION BY"));

        let (spec, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE(a) SUBPARTITION BY HASH(b)
             SUBPARTITION TEMPLATE (SUBPARTITION s0)
             (PARTITION p0 VALUES LESS THAN (10) (SUBPARTITION x0, SUBPARTITION x1))",
        );
        assert_eq!(spec.partitions[0].subpartitions.len(), 2);
        assert_eq!(diagnostics.len(), 1);

        let (_, diagnostics) = partition(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE(a) SUBPARTITION BY HASH(b)
             (PARTITION p0 VALUES LESS THAN (10) (SUBPARTITION x0 VALUES IN (1)))",
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_alter_partition_actions() {
        let Statement::AlterTable(alter) =
            statement(
                "ALTER TABLE t DROP PARTITION p0, p1, \
                 ADD PARTITION (PARTITION p3 VALUES LESS THAN (30))",
            )
        else {
            panic!("not an alter table");
        };
        assert_eq!(alter.actions.len(), 2);
        assert!(matches!(
            &alter.actions[0].action,
            AlterTableAction::Partition(AlterPartition::Drop { sub: false, names })
                if names.len() == 2
        ));
        assert!(matches!(
            &alter.actions[1].action,
            AlterTableAction::Partition(AlterPartition::Add(elements)) if elements.len() == 1
        ));

        let Statement::AlterTable(alter) = statement("ALTER TABLE t REMOVE PARTITIONING") else {
            panic!("not an alter table");
        };
        assert_eq!(
            alter.actions[0].action,
            AlterTableAction::Partition(AlterPartition::Remove)
        );
    }
}
