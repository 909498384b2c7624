//! Transactions, session variables, prepared statements, EXPLAIN, SHOW and
//! table locks.

use super::children::Children;
use super::fragment::Fragment;
use super::name::ident_from;
use super::table::ReductionTable;
use crate::ast::{
    Begin, Deallocate, Execute, Explain, ExplainTarget, Expr, Ident, IsolationLevel, Limit,
    LockTable, LockTables, ObjectName, Prepare, PrepareSource, Savepoint, SetCharset,
    SetTransaction, SetVariables, Show, ShowFilter, Statement, TableLockKind, TransactionEnd,
    TransactionMode, UserName, VariableAssignment, VariableScope, VariableTarget, VariableValue,
    Xa, XaAction,
};
use crate::cst::{RuleKind, Terminal};
use crate::lexer::{Keyword, TokenKind};

/// Words that may follow EXPLAIN before the explained statement.
const EXPLAIN_OPTIONS: &[&str] = &["EXTENDED", "EXTENDED_NOADDR", "BASIC", "PARTITIONS", "OUTLINE"];

pub(super) fn register(table: &mut ReductionTable) {
    table.statement(RuleKind::BeginStmt, begin);
    table.statement(RuleKind::CommitStmt, |c| {
        Some(Statement::Commit(transaction_end(c)).into())
    });
    table.statement(RuleKind::RollbackStmt, |c| {
        Some(Statement::Rollback(transaction_end(c)).into())
    });
    table.statement(RuleKind::CreateSavepointStmt, |c| {
        Some(Statement::Savepoint(savepoint(c)).into())
    });
    table.statement(RuleKind::RollbackSavepointStmt, |c| {
        Some(Statement::RollbackToSavepoint(savepoint(c)).into())
    });
    table.statement(RuleKind::ReleaseSavepointStmt, |c| {
        Some(Statement::ReleaseSavepoint(savepoint(c)).into())
    });
    for kind in [
        RuleKind::XaBeginStmt,
        RuleKind::XaEndStmt,
        RuleKind::XaPrepareStmt,
        RuleKind::XaCommitStmt,
        RuleKind::XaRollbackStmt,
    ] {
        table.statement(kind, xa);
    }
    table.statement(RuleKind::SetTransactionStmt, set_transaction);
    table.statement(RuleKind::VariableSetStmt, set_variables);
    table.statement(RuleKind::SetNamesStmt, |c| set_charset(c, true));
    table.statement(RuleKind::SetCharsetStmt, |c| set_charset(c, false));
    table.register(RuleKind::VarAndVal, variable_assignment);
    table.register(RuleKind::SysVarAndVal, variable_assignment);
    table.statement(RuleKind::PrepareStmt, prepare);
    table.statement(RuleKind::ExecuteStmt, execute);
    table.statement(RuleKind::DeallocatePrepareStmt, deallocate);
    table.statement(RuleKind::ExplainStmt, explain);
    table.statement(RuleKind::ShowStmt, show);
    table.register(RuleKind::LockTable, lock_table);
    table.statement(RuleKind::LockTablesStmt, lock_tables);
    table.statement(RuleKind::UnlockTablesStmt, |c| {
        Some(Statement::UnlockTables { span: c.span() }.into())
    });
}

fn begin(children: &mut Children<'_>) -> Option<Fragment> {
    let modes = children
        .words()
        .iter()
        .filter_map(|word| match word.as_str() {
            "SNAPSHOT" => Some(TransactionMode::ConsistentSnapshot),
            "ONLY" => Some(TransactionMode::ReadOnly),
            "WRITE" => Some(TransactionMode::ReadWrite),
            _ => None,
        })
        .collect();
    let begin = Begin {
        start: children.has_keyword(Keyword::Start),
        modes,
        span: children.span(),
    };
    Some(Statement::Begin(begin).into())
}

fn transaction_end(children: &Children<'_>) -> TransactionEnd {
    TransactionEnd {
        work: children.has_word("WORK"),
        span: children.span(),
    }
}

fn savepoint(children: &mut Children<'_>) -> Savepoint {
    Savepoint {
        name: children.require("a savepoint name"),
        span: children.span(),
    }
}

fn xa(children: &mut Children<'_>) -> Option<Fragment> {
    let action = match children.rule() {
        RuleKind::XaEndStmt => XaAction::End,
        RuleKind::XaPrepareStmt => XaAction::Prepare,
        RuleKind::XaCommitStmt => XaAction::Commit,
        RuleKind::XaRollbackStmt => XaAction::Rollback,
        _ => XaAction::Start,
    };
    let xid = children.take::<Vec<Expr>>().unwrap_or_default();
    if xid.is_empty() {
        children.mismatch("expected a transaction id");
    }
    let xa = Xa {
        action,
        xid,
        one_phase: children.has_word("PHASE"),
        span: children.span(),
    };
    Some(Statement::Xa(xa).into())
}

fn isolation_level(first: Option<&str>, second: Option<&str>) -> Option<IsolationLevel> {
    match (first, second) {
        (Some("READ"), Some("UNCOMMITTED")) => Some(IsolationLevel::ReadUncommitted),
        (Some("READ"), Some("COMMITTED")) => Some(IsolationLevel::ReadCommitted),
        (Some("REPEATABLE"), _) => Some(IsolationLevel::RepeatableRead),
        (Some("SERIALIZABLE"), _) => Some(IsolationLevel::Serializable),
        _ => None,
    }
}

/// Reads the characteristics after TRANSACTION. Each characteristic is kept
/// at its last value; writing one twice is reported.
fn set_transaction(children: &mut Children<'_>) -> Option<Fragment> {
    let words = children.words();
    let scope = words.get(1).and_then(|w| VariableScope::from_word(w));
    let mut isolation = None;
    let mut read_only = None;
    let mut repeated = Vec::new();
    let start = words.iter().position(|w| w == "TRANSACTION").map_or(words.len(), |i| i + 1);
    let mut i = start;
    while i < words.len() {
        match words[i].as_str() {
            "ISOLATION" => {
                let first = words.get(i + 2).map(String::as_str);
                let second = words.get(i + 3).map(String::as_str);
                if let Some(level) = isolation_level(first, second) {
                    if isolation.replace(level).is_some() {
                        repeated.push("isolation level");
                    }
                }
                i += if first == Some("SERIALIZABLE") { 3 } else { 4 };
            }
            "READ" => {
                let only = words.get(i + 1).is_some_and(|w| w == "ONLY");
                if read_only.replace(only).is_some() {
                    repeated.push("access mode");
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    let span = children.span();
    for what in repeated {
        children.ambiguous(format!("transaction {what} given more than once"), span);
    }
    let set = SetTransaction {
        scope,
        isolation,
        read_only,
        span,
    };
    Some(Statement::SetTransaction(set).into())
}

/// Splits `@@[scope.]name` into its scope and name.
fn system_variable(text: &str) -> VariableTarget {
    let bare = text.trim_start_matches('@');
    if let Some((prefix, name)) = bare.split_once('.') {
        if let Some(scope) = VariableScope::from_word(prefix) {
            return VariableTarget::System {
                scope: Some(scope),
                name: name.to_owned(),
            };
        }
    }
    VariableTarget::System {
        scope: None,
        name: bare.to_owned(),
    }
}

fn variable_target(tokens: &[&Terminal]) -> Option<VariableTarget> {
    let mut scope = None;
    let mut name = String::new();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::UserVariable => {
                return Some(VariableTarget::User(token.text.trim_start_matches('@').to_owned()));
            }
            TokenKind::SystemVariable => return Some(system_variable(&token.text)),
            TokenKind::Dot => name.push('.'),
            _ => {
                let dotted = tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Dot);
                match VariableScope::from_word(&token.text) {
                    Some(word)
                        if name.is_empty() && scope.is_none() && !dotted && i + 1 < tokens.len() =>
                    {
                        scope = Some(word);
                    }
                    _ => name.push_str(&ident_from(token).value),
                }
            }
        }
    }
    if name.is_empty() {
        None
    } else {
        Some(VariableTarget::System { scope, name })
    }
}

fn variable_assignment(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(op) = children
        .tokens()
        .find(|(_, t)| matches!(t.kind, TokenKind::Eq | TokenKind::Assign))
        .map(|(i, _)| i)
    else {
        children.mismatch("expected '=' or ':='");
        return None;
    };
    let left: Vec<&Terminal> = children
        .tokens()
        .take_while(|(i, _)| *i < op)
        .map(|(_, t)| t)
        .collect();
    let Some(target) = variable_target(&left) else {
        children.mismatch("expected a variable name");
        return None;
    };
    let value = if let Some(expr) = children.take_from::<Expr>(op + 1) {
        VariableValue::Expr(expr)
    } else {
        let word = children
            .tokens()
            .find(|(i, _)| *i > op)
            .map(|(_, t)| t.text.to_ascii_uppercase());
        match word {
            Some(word) => VariableValue::Keyword(word),
            None => {
                children.mismatch("expected a value");
                VariableValue::Expr(Expr::Error {
                    span: children.span(),
                })
            }
        }
    };
    Some(
        VariableAssignment {
            target,
            value,
            span: children.span(),
        }
        .into(),
    )
}

fn set_variables(children: &mut Children<'_>) -> Option<Fragment> {
    let assignments: Vec<VariableAssignment> = children.take_all();
    if assignments.is_empty() {
        children.mismatch("expected a variable assignment");
    }
    let set = SetVariables {
        assignments,
        span: children.span(),
    };
    Some(Statement::SetVariables(set).into())
}

fn set_charset(children: &mut Children<'_>, names: bool) -> Option<Fragment> {
    let set = SetCharset {
        names,
        charset: children.take(),
        collation: children.take_after(Keyword::Collate),
        span: children.span(),
    };
    Some(Statement::SetCharset(set).into())
}

fn prepare(children: &mut Children<'_>) -> Option<Fragment> {
    let name: Ident = children.require("a statement name");
    let source = match children.take::<Expr>() {
        Some(Expr::Literal { value, .. }) => PrepareSource::Text(value),
        _ => {
            let variable = children
                .tokens()
                .find(|(_, t)| t.kind == TokenKind::UserVariable)
                .map(|(_, t)| t.text.trim_start_matches('@').to_owned());
            let Some(variable) = variable else {
                children.mismatch("expected statement text or a user variable");
                return Some(Statement::Error { span: children.span() }.into());
            };
            PrepareSource::Variable(variable)
        }
    };
    let prepare = Prepare {
        name,
        source,
        span: children.span(),
    };
    Some(Statement::Prepare(prepare).into())
}

fn execute(children: &mut Children<'_>) -> Option<Fragment> {
    let execute = Execute {
        name: children.require("a statement name"),
        arguments: children
            .tokens()
            .filter(|(_, t)| t.kind == TokenKind::UserVariable)
            .map(|(_, t)| t.text.trim_start_matches('@').to_owned())
            .collect(),
        span: children.span(),
    };
    Some(Statement::Execute(execute).into())
}

fn deallocate(children: &mut Children<'_>) -> Option<Fragment> {
    let deallocate = Deallocate {
        name: children.require("a statement name"),
        span: children.span(),
    };
    Some(Statement::Deallocate(deallocate).into())
}

fn explain(children: &mut Children<'_>) -> Option<Fragment> {
    let span = children.span();
    let explain = if let Some(statement) = children.take::<Statement>() {
        let option = children
            .tokens()
            .nth(1)
            .map(|(_, t)| t.text.to_ascii_uppercase())
            .filter(|w| EXPLAIN_OPTIONS.contains(&w.as_str()));
        Explain {
            option,
            format: children.take(),
            target: ExplainTarget::Statement(Box::new(statement)),
            span,
        }
    } else {
        let table: ObjectName = children.require("a table name");
        let column = children.take::<Ident>().or_else(|| {
            children
                .tokens()
                .find(|(_, t)| t.kind == TokenKind::String)
                .map(|(_, t)| ident_from(t))
        });
        Explain {
            option: None,
            format: None,
            target: ExplainTarget::Table { table, column },
            span,
        }
    };
    Some(Statement::Explain(Box::new(explain)).into())
}

/// Words that end the object part of SHOW.
fn ends_show_target(token: &Terminal) -> bool {
    [Keyword::From, Keyword::In, Keyword::For, Keyword::Like, Keyword::Where]
        .into_iter()
        .any(|kw| token.is_keyword(kw))
}

fn show(children: &mut Children<'_>) -> Option<Fragment> {
    let target = children
        .tokens()
        .skip(1)
        .take_while(|(_, t)| !ends_show_target(t))
        .map(|(_, t)| t.text.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(" ");
    let object = if target.starts_with("CREATE") {
        children.take::<ObjectName>()
    } else {
        None
    };
    let filter = if children.has_keyword(Keyword::Like) {
        match children.take_after::<Expr>(Keyword::Like) {
            Some(Expr::Literal { value, .. }) => Some(ShowFilter::Like(value)),
            _ => {
                children.mismatch("expected a LIKE pattern");
                None
            }
        }
    } else if children.has_keyword(Keyword::Where) {
        children.take_after::<Expr>(Keyword::Where).map(ShowFilter::Where)
    } else {
        children.take::<Limit>().map(ShowFilter::Limit)
    };
    let show = Show {
        target,
        object,
        from: children.take_all(),
        for_user: children.take::<UserName>(),
        filter,
        span: children.span(),
    };
    Some(Statement::Show(Box::new(show)).into())
}

fn lock_table(children: &mut Children<'_>) -> Option<Fragment> {
    let words = children.words();
    let has = |word: &str| words.iter().any(|w| w == word);
    let lock = if has("READ") {
        if has("LOCAL") {
            TableLockKind::ReadLocal
        } else {
            TableLockKind::Read
        }
    } else if has("LOW_PRIORITY") {
        TableLockKind::LowPriorityWrite
    } else {
        TableLockKind::Write
    };
    Some(
        LockTable {
            table: children.require("a table name"),
            alias: children.take(),
            lock,
            span: children.span(),
        }
        .into(),
    )
}

fn lock_tables(children: &mut Children<'_>) -> Option<Fragment> {
    let lock = LockTables {
        tables: children.take_all(),
        span: children.span(),
    };
    Some(Statement::LockTables(lock).into())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{reduce, statement};
    use super::*;
    use crate::ast::Literal;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn test_transactions() {
        let Statement::Begin(begin) =
            statement("START TRANSACTION WITH CONSISTENT SNAPSHOT, READ ONLY")
        else {
            panic!("not a begin");
        };
        assert!(begin.start);
        assert_eq!(
            begin.modes,
            vec![TransactionMode::ConsistentSnapshot, TransactionMode::ReadOnly]
        );

        let Statement::Begin(begin) = statement("BEGIN WORK") else {
            panic!("not a begin");
        };
        assert!(!begin.start);
        assert!(begin.modes.is_empty());

        assert!(matches!(
            statement("COMMIT WORK"),
            Statement::Commit(TransactionEnd { work: true, .. })
        ));
        assert!(matches!(
            statement("ROLLBACK"),
            Statement::Rollback(TransactionEnd { work: false, .. })
        ));

        let Statement::RollbackToSavepoint(sp) = statement("ROLLBACK WORK TO SAVEPOINT sp1") else {
            panic!("not a rollback to savepoint");
        };
        assert_eq!(sp.name.value, "sp1");
        assert!(matches!(statement("SAVEPOINT sp2"), Statement::Savepoint(_)));
        assert!(matches!(statement("RELEASE SAVEPOINT sp2"), Statement::ReleaseSavepoint(_)));
    }

    #[test]
    fn test_set_transaction() {
        let Statement::SetTransaction(set) =
            statement("SET GLOBAL TRANSACTION ISOLATION LEVEL READ COMMITTED, READ WRITE")
        else {
            panic!("not a set transaction");
        };
        assert_eq!(set.scope, Some(VariableScope::Global));
        assert_eq!(set.isolation, Some(IsolationLevel::ReadCommitted));
        assert_eq!(set.read_only, Some(false));

        let (statement, diagnostics) = reduce(
            "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE, \
             ISOLATION LEVEL REPEATABLE READ, READ ONLY",
        );
        let Statement::SetTransaction(set) = statement else {
            panic!("not a set transaction");
        };
        assert_eq!(set.scope, None);
        assert_eq!(set.isolation, Some(IsolationLevel::RepeatableRead));
        assert_eq!(set.read_only, Some(true));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::AmbiguousOption);
    }

    #[test]
    fn test_xa() {
        let Statement::Xa(xa) = statement("XA COMMIT 'x1' ONE PHASE") else {
            panic!("not xa");
        };
        assert_eq!(xa.action, XaAction::Commit);
        assert_eq!(xa.xid.len(), 1);
        assert!(xa.one_phase);

        let Statement::Xa(xa) = statement("XA START 'x1', 'b'") else {
            panic!("not xa");
        };
        assert_eq!(xa.action, XaAction::Start);
        assert_eq!(xa.xid.len(), 2);
        assert!(!xa.one_phase);
    }

    #[test]
    fn test_variable_assignments() {
        let Statement::SetVariables(set) = statement(
            "SET @a := 1, @@session.autocommit = ON, \
             GLOBAL max_connections = DEFAULT, sql_mode = 'x'",
        ) else {
            panic!("not a set");
        };
        let targets: Vec<_> = set.assignments.iter().map(|a| a.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                VariableTarget::User("a".into()),
                VariableTarget::System {
                    scope: Some(VariableScope::Session),
                    name: "autocommit".into()
                },
                VariableTarget::System {
                    scope: Some(VariableScope::Global),
                    name: "max_connections".into()
                },
                VariableTarget::System {
                    scope: None,
                    name: "sql_mode".into()
                },
            ]
        );
        assert!(matches!(set.assignments[0].value, VariableValue::Expr(_)));
        assert_eq!(set.assignments[1].value, VariableValue::Keyword("ON".into()));
        assert_eq!(set.assignments[2].value, VariableValue::Keyword("DEFAULT".into()));
        assert!(matches!(
            &set.assignments[3].value,
            VariableValue::Expr(Expr::Literal { value: Literal::String { .. }, .. })
        ));
    }

    #[test]
    fn test_system_variable_without_scope() {
        assert_eq!(
            system_variable("@@max_connections"),
            VariableTarget::System {
                scope: None,
                name: "max_connections".into()
            }
        );
        assert_eq!(
            system_variable("@@persist_only.x"),
            VariableTarget::System {
                scope: Some(VariableScope::PersistOnly),
                name: "x".into()
            }
        );
    }

    #[test]
    fn test_set_charset() {
        let Statement::SetCharset(set) = statement("SET NAMES utf8mb4 COLLATE utf8mb4_bin") else {
            panic!("not set names");
        };
        assert!(set.names);
        assert_eq!(set.charset.map(|c| c.value).as_deref(), Some("utf8mb4"));
        assert_eq!(set.collation.map(|c| c.value).as_deref(), Some("utf8mb4_bin"));

        let Statement::SetCharset(set) = statement("SET CHARACTER SET DEFAULT") else {
            panic!("not set charset");
        };
        assert!(!set.names);
        assert!(set.charset.is_none());
    }

    #[test]
    fn test_prepared_statements() {
        let Statement::Prepare(prepare) = statement("PREPARE s FROM 'SELECT ?'") else {
            panic!("not prepare");
        };
        assert_eq!(prepare.name.value, "s");
        assert!(matches!(
            &prepare.source,
            PrepareSource::Text(text) if text.string_value().as_deref() == Some("SELECT ?")
        ));

        let Statement::Prepare(prepare) = statement("PREPARE s FROM @q") else {
            panic!("not prepare");
        };
        assert_eq!(prepare.source, PrepareSource::Variable("q".into()));

        let Statement::Execute(execute) = statement("EXECUTE s USING @a, @b") else {
            panic!("not execute");
        };
        assert_eq!(execute.arguments, vec!["a".to_owned(), "b".to_owned()]);

        assert!(matches!(statement("DEALLOCATE PREPARE s"), Statement::Deallocate(_)));
        assert!(matches!(statement("DROP PREPARE s"), Statement::Deallocate(_)));
    }

    #[test]
    fn test_explain() {
        let Statement::Explain(explain) = statement("EXPLAIN EXTENDED SELECT 1") else {
            panic!("not explain");
        };
        assert_eq!(explain.option.as_deref(), Some("EXTENDED"));
        assert!(matches!(
            &explain.target,
            ExplainTarget::Statement(s) if matches!(**s, Statement::Query(_))
        ));

        let Statement::Explain(explain) = statement("EXPLAIN FORMAT = JSON DELETE FROM t") else {
            panic!("not explain");
        };
        assert_eq!(explain.format.map(|f| f.value).as_deref(), Some("JSON"));
        assert!(explain.option.is_none());

        let Statement::Explain(explain) = statement("DESC db.t a") else {
            panic!("not describe");
        };
        let ExplainTarget::Table { table, column } = explain.target else {
            panic!("not a table description");
        };
        assert_eq!(table.to_string(), "db.t");
        assert_eq!(column.map(|c| c.value).as_deref(), Some("a"));
    }

    #[test]
    fn test_show() {
        let Statement::Show(show) = statement("SHOW FULL TABLES FROM db LIKE 't%'") else {
            panic!("not show");
        };
        assert_eq!(show.target, "FULL TABLES");
        assert_eq!(show.from.len(), 1);
        assert!(matches!(&show.filter, Some(ShowFilter::Like(_))));

        let Statement::Show(show) = statement("SHOW CREATE TABLE db.t") else {
            panic!("not show");
        };
        assert_eq!(show.target, "CREATE TABLE");
        assert_eq!(show.object.map(|o| o.to_string()).as_deref(), Some("db.t"));

        let Statement::Show(show) = statement("SHOW GRANTS FOR u") else {
            panic!("not show");
        };
        assert_eq!(show.for_user.map(|u| u.user).as_deref(), Some("u"));

        let Statement::Show(show) = statement("SHOW PARAMETERS WHERE name = 'x'") else {
            panic!("not show");
        };
        assert!(matches!(show.filter, Some(ShowFilter::Where(_))));
    }

    #[test]
    fn test_table_locks() {
        let Statement::LockTables(lock) =
            statement("LOCK TABLES t1 READ LOCAL, t2 AS x LOW_PRIORITY WRITE, t3 WRITE")
        else {
            panic!("not lock tables");
        };
        let kinds: Vec<_> = lock.tables.iter().map(|t| t.lock).collect();
        assert_eq!(
            kinds,
            vec![
                TableLockKind::ReadLocal,
                TableLockKind::LowPriorityWrite,
                TableLockKind::Write
            ]
        );
        assert_eq!(lock.tables[1].alias.as_ref().map(|a| a.value.as_str()), Some("x"));
        assert!(matches!(statement("UNLOCK TABLES"), Statement::UnlockTables { .. }));
    }
}
