//! Databases, tablegroups, tablespaces, sequences, resources, tenants and
//! cluster maintenance.

use super::children::Children;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{
    AlterDatabase, AlterSystem, AlterTablegroup, AlterTablegroupAction, AlterTenant,
    AlterTenantAction, Analyze, CreateDatabase, CreateTablegroup, CreateTenant, DatabaseOptions,
    DropObject, DropResource, DropTenant, Expr, Flashback, FlashbackTarget, Help,
    HistogramAction, Ident, Kill, Literal, ObjectName, Optimize, OptimizeTarget, OptionKey, Purge,
    PurgeTarget, RecoverPoint, RecoverTenant, ResourceDef, ResourceKind, ResourceOptionKey,
    ResourceOptions, SequenceDef, SequenceOptions, Statement, SwitchoverAction, SwitchoverTenant,
    SystemAction, SystemParameter, TablegroupOptions, TablespaceDef, TablespaceOptions,
    TenantOptionKey, TenantOptions, TenantSnapshot, UseDatabase,
};
use crate::cst::RuleKind;
use crate::lexer::{Keyword, Span, TokenKind};

pub(super) fn register(table: &mut ReductionTable) {
    table.statement(RuleKind::CreateDatabaseStmt, create_database);
    table.statement(RuleKind::AlterDatabaseStmt, alter_database);
    table.statement(RuleKind::DropDatabaseStmt, |c| {
        Some(Statement::DropDatabase(drop_object(c)).into())
    });
    table.statement(RuleKind::UseDatabaseStmt, use_database);
    table.statement(RuleKind::CreateTablegroupStmt, create_tablegroup);
    table.statement(RuleKind::AlterTablegroupStmt, alter_tablegroup);
    table.statement(RuleKind::DropTablegroupStmt, |c| {
        Some(Statement::DropTablegroup(drop_object(c)).into())
    });
    table.statement(RuleKind::CreateTablespaceStmt, |c| {
        Some(Statement::CreateTablespace(tablespace(c)).into())
    });
    table.statement(RuleKind::AlterTablespaceStmt, |c| {
        Some(Statement::AlterTablespace(tablespace(c)).into())
    });
    table.statement(RuleKind::DropTablespaceStmt, |c| {
        Some(Statement::DropTablespace(drop_object(c)).into())
    });
    table.statement(RuleKind::CreateSequenceStmt, |c| {
        Some(Statement::CreateSequence(sequence(c)).into())
    });
    table.statement(RuleKind::AlterSequenceStmt, |c| {
        Some(Statement::AlterSequence(sequence(c)).into())
    });
    table.statement(RuleKind::DropSequenceStmt, |c| {
        Some(Statement::DropSequence(drop_object(c)).into())
    });
    table.statement(RuleKind::CreateResourceStmt, create_resource);
    table.statement(RuleKind::AlterResourceStmt, |c| {
        Some(Statement::AlterResource(resource(c)).into())
    });
    table.statement(RuleKind::DropResourceStmt, drop_resource);
    table.statement(RuleKind::CreateTenantStmt, create_tenant);
    table.statement(RuleKind::AlterTenantStmt, alter_tenant);
    table.statement(RuleKind::DropTenantStmt, drop_tenant);
    table.statement(RuleKind::CreateTenantSnapshotStmt, |c| {
        Some(Statement::CreateTenantSnapshot(snapshot(c)).into())
    });
    table.statement(RuleKind::DropTenantSnapshotStmt, |c| {
        Some(Statement::DropTenantSnapshot(snapshot(c)).into())
    });
    table.statement(RuleKind::CreateRestorePointStmt, |c| {
        Some(Statement::CreateRestorePoint(drop_object(c)).into())
    });
    table.statement(RuleKind::DropRestorePointStmt, |c| {
        Some(Statement::DropRestorePoint(drop_object(c)).into())
    });
    table.statement(RuleKind::AlterSystemStmt, alter_system);
    table.statement(RuleKind::SwitchoverTenantStmt, switchover);
    table.statement(RuleKind::RecoverTenantStmt, recover);
    table.statement(RuleKind::FlashbackStmt, flashback);
    table.statement(RuleKind::PurgeStmt, purge);
    table.statement(RuleKind::OptimizeStmt, optimize);
    table.statement(RuleKind::AnalyzeStmt, analyze);
    table.statement(RuleKind::KillStmt, kill);
    table.statement(RuleKind::HelpStmt, help);
    table.register(RuleKind::AlterSystemSetParameterAction, system_parameter);
}

/// Takes an object name written either as `[schema.]name` or as a bare name.
fn object_name(children: &mut Children<'_>, what: &str) -> ObjectName {
    if let Some(name) = children.take::<ObjectName>() {
        return name;
    }
    ObjectName::bare(children.require(what))
}

fn drop_object(children: &mut Children<'_>) -> DropObject {
    DropObject {
        if_exists: children.has_keyword(Keyword::Exists),
        name: object_name(children, "an object name"),
        span: children.span(),
    }
}

fn string_literal(expr: Option<Expr>) -> Option<Literal> {
    match expr? {
        Expr::Literal { value, .. } => Some(value),
        _ => None,
    }
}

fn create_database(children: &mut Children<'_>) -> Option<Fragment> {
    let create = CreateDatabase {
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a database name"),
        options: children.take::<DatabaseOptions>().unwrap_or_default(),
        span: children.span(),
    };
    Some(Statement::CreateDatabase(create).into())
}

fn alter_database(children: &mut Children<'_>) -> Option<Fragment> {
    let alter = AlterDatabase {
        name: children.take(),
        options: children.take::<DatabaseOptions>().unwrap_or_default(),
        span: children.span(),
    };
    Some(Statement::AlterDatabase(alter).into())
}

fn use_database(children: &mut Children<'_>) -> Option<Fragment> {
    let use_db = UseDatabase {
        name: children.require("a database name"),
        span: children.span(),
    };
    Some(Statement::UseDatabase(use_db).into())
}

fn create_tablegroup(children: &mut Children<'_>) -> Option<Fragment> {
    let create = CreateTablegroup {
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a tablegroup name"),
        options: children.take::<TablegroupOptions>().unwrap_or_default(),
        span: children.span(),
    };
    Some(Statement::CreateTablegroup(create).into())
}

fn alter_tablegroup(children: &mut Children<'_>) -> Option<Fragment> {
    let name = children.require("a tablegroup name");
    let action = if children.has_keyword(Keyword::Add) {
        AlterTablegroupAction::AddTables(children.take_all())
    } else {
        AlterTablegroupAction::SetOptions(children.take::<TablegroupOptions>().unwrap_or_default())
    };
    let alter = AlterTablegroup {
        name,
        action,
        span: children.span(),
    };
    Some(Statement::AlterTablegroup(alter).into())
}

fn tablespace(children: &mut Children<'_>) -> TablespaceDef {
    TablespaceDef {
        name: children.require("a tablespace name"),
        options: children.take::<TablespaceOptions>().unwrap_or_default(),
        span: children.span(),
    }
}

fn sequence(children: &mut Children<'_>) -> SequenceDef {
    SequenceDef {
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a sequence name"),
        options: children.take::<SequenceOptions>().unwrap_or_default(),
        span: children.span(),
    }
}

fn resource_kind(children: &Children<'_>) -> ResourceKind {
    if children.has_word("POOL") {
        ResourceKind::Pool
    } else {
        ResourceKind::Unit
    }
}

fn resource(children: &mut Children<'_>) -> ResourceDef {
    ResourceDef {
        kind: resource_kind(children),
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a resource name"),
        options: children.take::<ResourceOptions>().unwrap_or_default(),
        span: children.span(),
    }
}

fn create_resource(children: &mut Children<'_>) -> Option<Fragment> {
    let def = resource(children);
    let (noun, required): (&str, &[ResourceOptionKey]) = match def.kind {
        ResourceKind::Unit => (
            "UNIT",
            &[ResourceOptionKey::MaxCpu, ResourceOptionKey::MemorySize],
        ),
        ResourceKind::Pool => ("POOL", &[ResourceOptionKey::Unit]),
    };
    for key in required {
        if !def.options.contains(*key) {
            children.missing_clause(
                format!(
                    "CREATE RESOURCE {noun} {} requires {}",
                    def.name,
                    key.as_str()
                ),
                def.span,
            );
        }
    }
    Some(Statement::CreateResource(def).into())
}

fn drop_resource(children: &mut Children<'_>) -> Option<Fragment> {
    let drop = DropResource {
        kind: resource_kind(children),
        if_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a resource name"),
        span: children.span(),
    };
    Some(Statement::DropResource(drop).into())
}

fn create_tenant(children: &mut Children<'_>) -> Option<Fragment> {
    let create = CreateTenant {
        if_not_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a tenant name"),
        options: children.take::<TenantOptions>().unwrap_or_default(),
        variables: children.take_all(),
        span: children.span(),
    };
    if !create.options.contains(TenantOptionKey::ResourcePoolList) {
        children.missing_clause(
            format!("CREATE TENANT {} requires RESOURCE_POOL_LIST", create.name),
            create.span,
        );
    }
    Some(Statement::CreateTenant(Box::new(create)).into())
}

fn alter_tenant(children: &mut Children<'_>) -> Option<Fragment> {
    let name = if children.has_keyword(Keyword::All) {
        None
    } else {
        Some(children.require::<Ident>("a tenant name"))
    };
    let action = if children.has_keyword(Keyword::Rename) {
        AlterTenantAction::Rename(children.require("a new tenant name"))
    } else if children.has_word("ACCOUNT") {
        AlterTenantAction::Lock(children.has_keyword(Keyword::Lock))
    } else {
        AlterTenantAction::Set {
            options: children.take::<TenantOptions>().unwrap_or_default(),
            variables: children.take_all(),
        }
    };
    let alter = AlterTenant {
        name,
        action,
        span: children.span(),
    };
    Some(Statement::AlterTenant(Box::new(alter)).into())
}

fn drop_tenant(children: &mut Children<'_>) -> Option<Fragment> {
    let drop = DropTenant {
        if_exists: children.has_keyword(Keyword::Exists),
        name: children.require("a tenant name"),
        force: children.has_word("FORCE"),
        purge: children.has_keyword(Keyword::Purge),
        span: children.span(),
    };
    Some(Statement::DropTenant(drop).into())
}

fn snapshot(children: &mut Children<'_>) -> TenantSnapshot {
    let end = children.find_keyword(Keyword::For).unwrap_or(children.len());
    TenantSnapshot {
        name: children.take_range(0, end),
        tenant: children.take_after(Keyword::For),
        span: children.span(),
    }
}

/// The text of the first integer terminal.
fn int_text(children: &Children<'_>) -> Option<String> {
    children
        .tokens()
        .find(|(_, t)| t.kind == TokenKind::IntNum)
        .map(|(_, t)| t.text.clone())
}

fn alter_system(children: &mut Children<'_>) -> Option<Fragment> {
    let action = if children.has_word("FREEZE") {
        SystemAction::Freeze {
            major: children.has_word("MAJOR"),
            tenant: children.take(),
        }
    } else if children.has_word("FLUSH") {
        let cache = children
            .token_after("FLUSH")
            .map(|t| t.text.to_ascii_uppercase())
            .unwrap_or_default();
        SystemAction::FlushCache {
            cache,
            tenant: children.take(),
            global: children.has_word("GLOBAL"),
        }
    } else {
        SystemAction::SetParameters(children.take_all())
    };
    let alter = AlterSystem {
        action,
        span: children.span(),
    };
    Some(Statement::AlterSystem(Box::new(alter)).into())
}

fn system_parameter(children: &mut Children<'_>) -> Option<Fragment> {
    let name = children.require("a parameter name");
    let value = children.require("a parameter value");
    let comment = string_literal(children.take_after_word("COMMENT"));
    let scope = children
        .value_after("SCOPE")
        .map(|s| s.to_ascii_uppercase());
    Some(
        SystemParameter {
            name,
            value,
            comment,
            scope,
            tenant: children.take_after(Keyword::Tenant),
            span: children.span(),
        }
        .into(),
    )
}

fn switchover(children: &mut Children<'_>) -> Option<Fragment> {
    let action = if children.has_word("ACTIVATE") {
        SwitchoverAction::ActivateStandby
    } else if children.has_word("FAILOVER") {
        SwitchoverAction::FailoverToPrimary
    } else if children.has_keyword(Keyword::Primary) {
        SwitchoverAction::SwitchoverToPrimary
    } else {
        SwitchoverAction::SwitchoverToStandby
    };
    let switchover = SwitchoverTenant {
        action,
        tenant: children.take(),
        verify: children.has_word("VERIFY"),
        span: children.span(),
    };
    Some(Statement::SwitchoverTenant(switchover).into())
}

fn recover(children: &mut Children<'_>) -> Option<Fragment> {
    let tenant = children.take();
    let until = if children.has_word("CANCEL") {
        Some(RecoverPoint::Cancel)
    } else if children.has_word("UNLIMITED") {
        Some(RecoverPoint::Unlimited)
    } else if children.has_word("SCN") {
        int_text(children).map(RecoverPoint::Scn)
    } else if children.has_keyword(Keyword::Time) {
        string_literal(children.take()).map(RecoverPoint::Time)
    } else {
        None
    };
    let recover = RecoverTenant {
        tenant,
        until,
        span: children.span(),
    };
    Some(Statement::RecoverTenant(recover).into())
}

fn flashback(children: &mut Children<'_>) -> Option<Fragment> {
    let target = if children.has_keyword(Keyword::Table) {
        FlashbackTarget::Table(children.require("a table name"))
    } else if children.has_keyword(Keyword::Tenant) {
        FlashbackTarget::Tenant(children.require("a tenant name"))
    } else {
        FlashbackTarget::Database(children.require("a database name"))
    };
    let rename = if children.has_keyword(Keyword::Rename) {
        Some(object_name(children, "a new name"))
    } else {
        None
    };
    let flashback = Flashback {
        target,
        rename,
        span: children.span(),
    };
    Some(Statement::Flashback(flashback).into())
}

fn purge(children: &mut Children<'_>) -> Option<Fragment> {
    let head = children
        .tokens()
        .nth(1)
        .map(|(_, t)| (t.keyword(), t.text.to_ascii_uppercase()));
    let target = match head {
        Some((Some(Keyword::Table), _)) => PurgeTarget::Table(children.require("a table name")),
        Some((Some(Keyword::Index), _)) => PurgeTarget::Index(children.require("an index name")),
        Some((Some(Keyword::Tenant), _)) => PurgeTarget::Tenant(children.require("a tenant name")),
        Some((Some(Keyword::Database | Keyword::Schema), _)) => {
            PurgeTarget::Database(children.require("a database name"))
        }
        Some((_, word)) if word == "RECYCLEBIN" => PurgeTarget::Recyclebin,
        _ => {
            children.mismatch("expected a PURGE target");
            PurgeTarget::Recyclebin
        }
    };
    let purge = Purge {
        target,
        span: children.span(),
    };
    Some(Statement::Purge(purge).into())
}

fn optimize(children: &mut Children<'_>) -> Option<Fragment> {
    let target = if children.has_keyword(Keyword::Tenant) {
        if children.has_keyword(Keyword::All) {
            OptimizeTarget::AllTenants
        } else {
            OptimizeTarget::Tenant(children.require("a tenant name"))
        }
    } else {
        OptimizeTarget::Tables(children.take_all())
    };
    let optimize = Optimize {
        target,
        span: children.span(),
    };
    Some(Statement::Optimize(optimize).into())
}

fn analyze(children: &mut Children<'_>) -> Option<Fragment> {
    let table = children.require("a table name");
    let partitions = if children.has_keyword(Keyword::Partition) {
        children.take::<Vec<Ident>>().unwrap_or_default()
    } else {
        Vec::new()
    };
    let histogram = children.find_word("HISTOGRAM").map(|at| {
        let head = at.checked_sub(1).and_then(|i| children.token_at(i));
        let update = head.is_some_and(|t| t.is_keyword(Keyword::Update));
        let start = head.map_or(children.span().start, |t| t.span.start);
        let buckets = int_text(children);
        HistogramAction {
            update,
            columns: children.take::<Vec<Ident>>().unwrap_or_default(),
            buckets,
            span: Span::new(start, children.span().end),
        }
    });
    let analyze = Analyze {
        table,
        partitions,
        histogram,
        span: children.span(),
    };
    Some(Statement::Analyze(analyze).into())
}

fn kill(children: &mut Children<'_>) -> Option<Fragment> {
    let kill = Kill {
        query_only: children.has_word("QUERY"),
        id: children.require("a session id"),
        span: children.span(),
    };
    Some(Statement::Kill(kill).into())
}

fn help(children: &mut Children<'_>) -> Option<Fragment> {
    let help = Help {
        topic: children.require("a help topic"),
        span: children.span(),
    };
    Some(Statement::Help(help).into())
}
