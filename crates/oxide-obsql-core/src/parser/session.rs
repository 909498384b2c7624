//! Transactions, session variables, prepared statements, EXPLAIN, SHOW and
//! table locks.

use super::error::ParseError;
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

const SCOPE_WORDS: &[&str] = &["GLOBAL", "SESSION", "LOCAL", "PERSIST", "PERSIST_ONLY"];

const EXPLAIN_OPTIONS: &[&str] = &["EXTENDED", "EXTENDED_NOADDR", "BASIC", "PARTITIONS", "OUTLINE"];

impl Parser<'_> {
    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    pub(super) fn parse_begin_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat_keyword(Keyword::Begin, &mut c) {
            self.eat_word("WORK", &mut c);
            return Ok(self.node(RuleKind::BeginStmt, c));
        }
        c.push(self.expect_keyword(Keyword::Start)?);
        c.push(self.expect_word("TRANSACTION")?);
        loop {
            if self.eat_keyword(Keyword::With, &mut c) {
                c.push(self.expect_word("CONSISTENT")?);
                c.push(self.expect_keyword(Keyword::Snapshot)?);
            } else if self.eat_word("READ", &mut c) {
                if !self.eat_word("ONLY", &mut c) && !self.eat_word("WRITE", &mut c) {
                    return Err(self.error_here("ONLY or WRITE"));
                }
            } else {
                break;
            }
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        Ok(self.node(RuleKind::BeginStmt, c))
    }

    pub(super) fn parse_commit_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Commit)?];
        self.eat_word("WORK", &mut c);
        Ok(self.node(RuleKind::CommitStmt, c))
    }

    /// Parses `ROLLBACK [WORK]` or `ROLLBACK [WORK] TO [SAVEPOINT] name`.
    pub(super) fn parse_rollback(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Rollback)?];
        self.eat_word("WORK", &mut c);
        if self.eat_keyword(Keyword::To, &mut c) {
            self.eat_keyword(Keyword::Savepoint, &mut c);
            c.push(self.parse_name(RuleKind::RelationName)?);
            return Ok(self.node(RuleKind::RollbackSavepointStmt, c));
        }
        Ok(self.node(RuleKind::RollbackStmt, c))
    }

    pub(super) fn parse_create_savepoint_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![
            self.expect_keyword(Keyword::Savepoint)?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        Ok(self.node(RuleKind::CreateSavepointStmt, c))
    }

    pub(super) fn parse_release_savepoint_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![
            self.expect_keyword(Keyword::Release)?,
            self.expect_keyword(Keyword::Savepoint)?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        Ok(self.node(RuleKind::ReleaseSavepointStmt, c))
    }

    /// Parses the `XA START | END | PREPARE | COMMIT | ROLLBACK xid` family.
    pub(super) fn parse_xa_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Xa)?];
        let kind = if self.check_keyword(Keyword::Start) || self.check_keyword(Keyword::Begin) {
            RuleKind::XaBeginStmt
        } else if self.check_word("END") {
            RuleKind::XaEndStmt
        } else if self.check_keyword(Keyword::Prepare) {
            RuleKind::XaPrepareStmt
        } else if self.check_keyword(Keyword::Commit) {
            RuleKind::XaCommitStmt
        } else if self.check_keyword(Keyword::Rollback) {
            RuleKind::XaRollbackStmt
        } else {
            return Err(self.error_here("START, END, PREPARE, COMMIT or ROLLBACK"));
        };
        c.push(self.advance());
        c.push(self.parse_expr_list()?);
        if kind == RuleKind::XaCommitStmt && self.eat_word("ONE", &mut c) {
            c.push(self.expect_word("PHASE")?);
        }
        Ok(self.node(kind, c))
    }

    // ------------------------------------------------------------------
    // SET
    // ------------------------------------------------------------------

    pub(super) fn parse_set(&mut self) -> Result<ParseNode, ParseError> {
        if self.check_word_at(1, "PASSWORD")
            && matches!(self.peek_kind(2), TokenKind::Eq | TokenKind::Keyword(Keyword::For))
        {
            return self.parse_set_password_stmt();
        }
        if self.check_keyword_at(1, Keyword::Role)
            || (self.check_keyword_at(1, Keyword::Default)
                && self.check_keyword_at(2, Keyword::Role))
        {
            return self.parse_set_role_stmt();
        }
        if self.check_word_at(1, "NAMES") {
            return self.parse_set_names_stmt();
        }
        if self.check_keyword_at(1, Keyword::Charset)
            || (matches!(self.peek_keyword(1), Some(Keyword::Character | Keyword::Char))
                && self.check_keyword_at(2, Keyword::Set))
        {
            return self.parse_set_charset_stmt();
        }
        let scoped = SCOPE_WORDS.iter().any(|w| self.check_word_at(1, w));
        if self.check_word_at(if scoped { 2 } else { 1 }, "TRANSACTION") {
            return self.parse_set_transaction_stmt();
        }
        self.parse_variable_set_stmt()
    }

    fn parse_set_names_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Set)?, self.expect_word("NAMES")?];
        if !self.eat_keyword(Keyword::Default, &mut c) {
            c.push(self.parse_name_or_string(RuleKind::CharsetName)?);
            if self.eat_keyword(Keyword::Collate, &mut c) {
                c.push(self.parse_name_or_string(RuleKind::CollationName)?);
            }
        }
        Ok(self.node(RuleKind::SetNamesStmt, c))
    }

    fn parse_set_charset_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Set)?, self.parse_charset_key()?];
        if !self.eat_keyword(Keyword::Default, &mut c) {
            c.push(self.parse_name_or_string(RuleKind::CharsetName)?);
        }
        Ok(self.node(RuleKind::SetCharsetStmt, c))
    }

    fn parse_set_transaction_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Set)?];
        if let Some(scope) = self.parse_scope()? {
            c.push(scope);
        }
        c.push(self.expect_word("TRANSACTION")?);
        let mut chars = vec![];
        loop {
            if self.check_word("ISOLATION") {
                let mut i = vec![self.advance(), self.expect_word("LEVEL")?];
                if self.check_word("READ") {
                    i.push(self.advance());
                    if !self.eat_word("UNCOMMITTED", &mut i)
                        && !self.eat_word("COMMITTED", &mut i)
                    {
                        return Err(self.error_here("UNCOMMITTED or COMMITTED"));
                    }
                } else if self.check_word("REPEATABLE") {
                    i.push(self.advance());
                    i.push(self.expect_word("READ")?);
                } else {
                    i.push(self.expect_word("SERIALIZABLE")?);
                }
                chars.push(self.node(RuleKind::IsolationLevel, i));
            } else if self.check_word("READ") {
                let mut a = vec![self.advance()];
                if !self.eat_word("ONLY", &mut a) && !self.eat_word("WRITE", &mut a) {
                    return Err(self.error_here("ONLY or WRITE"));
                }
                chars.push(self.node(RuleKind::TransactionAccessMode, a));
            } else {
                return Err(self.error_here("ISOLATION LEVEL or READ"));
            }
            if !self.eat(&TokenKind::Comma, &mut chars) {
                break;
            }
        }
        c.push(self.node(RuleKind::TransactionCharacteristics, chars));
        Ok(self.node(RuleKind::SetTransactionStmt, c))
    }

    fn parse_scope(&mut self) -> Result<Option<ParseNode>, ParseError> {
        if SCOPE_WORDS.iter().any(|w| self.check_word(w)) {
            let word = self.advance();
            return Ok(Some(self.node(RuleKind::ScopeOrScopeAlias, vec![word])));
        }
        Ok(None)
    }

    fn parse_variable_set_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Set)?];
        let mut list = vec![];
        loop {
            list.push(self.parse_var_and_val()?);
            if !self.eat(&TokenKind::Comma, &mut list) {
                break;
            }
        }
        c.push(self.node(RuleKind::VarAndValList, list));
        Ok(self.node(RuleKind::VariableSetStmt, c))
    }

    fn parse_var_and_val(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat(&TokenKind::UserVariable, &mut c) {
            c.push(self.expect_set_operator()?);
            c.push(self.parse_expr()?);
            return Ok(self.node(RuleKind::VarAndVal, c));
        }
        if !self.eat(&TokenKind::SystemVariable, &mut c) {
            if let Some(scope) = self.parse_scope()? {
                c.push(scope);
            }
            c.push(self.parse_var_name()?);
        }
        c.push(self.expect_set_operator()?);
        c.push(self.parse_set_expr_or_default()?);
        Ok(self.node(RuleKind::VarAndVal, c))
    }

    fn parse_var_name(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name_terminal()?];
        if self.check(&TokenKind::Dot) && self.peek_kind(1).is_name() {
            c.push(self.advance());
            c.push(self.advance());
        }
        Ok(self.node(RuleKind::VarName, c))
    }

    fn expect_set_operator(&mut self) -> Result<ParseNode, ParseError> {
        if self.check(&TokenKind::Eq) || self.check(&TokenKind::Assign) {
            Ok(self.advance())
        } else {
            Err(self.error_here("'=' or ':='"))
        }
    }

    fn parse_set_expr_or_default(&mut self) -> Result<ParseNode, ParseError> {
        let terminal = self.check_keyword(Keyword::Default)
            || self.check_keyword(Keyword::On)
            || self.check_keyword(Keyword::All)
            || self.check_keyword(Keyword::Binary);
        let ends = matches!(
            self.peek_kind(1),
            TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
        );
        let value = if terminal && ends {
            self.advance()
        } else {
            self.parse_expr()?
        };
        Ok(self.node(RuleKind::SetExprOrDefault, vec![value]))
    }

    /// Parses `name = value (, name = value)*` as used for tenant variables.
    pub(super) fn parse_sys_var_and_val_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        loop {
            let mut v = vec![self.parse_var_name()?];
            v.push(self.expect_set_operator()?);
            v.push(self.parse_set_expr_or_default()?);
            c.push(self.node(RuleKind::SysVarAndVal, v));
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        Ok(self.node(RuleKind::SysVarAndValList, c))
    }

    // ------------------------------------------------------------------
    // Prepared statements
    // ------------------------------------------------------------------

    pub(super) fn parse_prepare_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Prepare)?,
            self.parse_name(RuleKind::StmtName)?,
            self.expect_keyword(Keyword::From)?,
        ];
        let source = if self.check(&TokenKind::UserVariable) {
            self.advance()
        } else {
            self.parse_complex_string_literal()?
        };
        c.push(self.node(RuleKind::PreparableStmt, vec![source]));
        Ok(self.node(RuleKind::PrepareStmt, c))
    }

    pub(super) fn parse_execute_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Execute)?,
            self.parse_name(RuleKind::StmtName)?,
        ];
        if self.eat_keyword(Keyword::Using, &mut c) {
            let mut args = vec![];
            loop {
                let var = self.expect(&TokenKind::UserVariable)?;
                args.push(self.node(RuleKind::Argument, vec![var]));
                if !self.eat(&TokenKind::Comma, &mut args) {
                    break;
                }
            }
            c.push(self.node(RuleKind::ArgumentList, args));
        }
        Ok(self.node(RuleKind::ExecuteStmt, c))
    }

    /// Parses `DEALLOCATE PREPARE name` or `DROP PREPARE name`.
    pub(super) fn parse_deallocate_prepare_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let word = self.expect_any_keyword(&[Keyword::Deallocate, Keyword::Drop])?;
        let c = vec![
            self.node(RuleKind::DeallocateOrDrop, vec![word]),
            self.expect_keyword(Keyword::Prepare)?,
            self.parse_name(RuleKind::StmtName)?,
        ];
        Ok(self.node(RuleKind::DeallocatePrepareStmt, c))
    }

    // ------------------------------------------------------------------
    // EXPLAIN / DESCRIBE
    // ------------------------------------------------------------------

    fn starts_explainable(&self) -> bool {
        self.starts_query_at(0)
            || self.check_any_keyword(&[
                Keyword::Insert,
                Keyword::Replace,
                Keyword::Update,
                Keyword::Delete,
            ])
    }

    pub(super) fn parse_explain_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let word = self.expect_any_keyword(&[Keyword::Explain, Keyword::Describe, Keyword::Desc])?;
        let mut c = vec![self.node(RuleKind::ExplainOrDesc, vec![word])];
        let option = EXPLAIN_OPTIONS.iter().any(|w| self.check_word(w))
            || (self.check_word("FORMAT") && self.peek_kind(1) == &TokenKind::Eq);
        if !option && !self.starts_explainable() {
            c.push(self.parse_relation_factor()?);
            if self.check(&TokenKind::String) {
                c.push(self.advance());
            } else if self.check_name() {
                c.push(self.parse_name(RuleKind::ColumnName)?);
            }
            return Ok(self.node(RuleKind::ExplainStmt, c));
        }
        if self.check_word("FORMAT") {
            c.push(self.advance());
            c.push(self.expect(&TokenKind::Eq)?);
            c.push(self.parse_name_or_string(RuleKind::FormatName)?);
        } else if option {
            c.push(self.advance());
        }
        let stmt = match self.current().as_keyword() {
            Some(Keyword::Insert | Keyword::Replace) => self.parse_insert_stmt()?,
            Some(Keyword::Update) => self.parse_update_stmt()?,
            Some(Keyword::Delete) => self.parse_delete_stmt()?,
            _ => self.parse_select_stmt()?,
        };
        c.push(self.node(RuleKind::ExplainableStmt, vec![stmt]));
        Ok(self.node(RuleKind::ExplainStmt, c))
    }

    // ------------------------------------------------------------------
    // SHOW
    // ------------------------------------------------------------------

    /// Parses a `SHOW` statement. The object words stay as bare terminals;
    /// names, user targets and filters become child nodes.
    pub(super) fn parse_show_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Show)?];
        let mut words = 0usize;
        let create = self.check_keyword(Keyword::Create);
        loop {
            if self.at_eof() || self.check(&TokenKind::Semicolon) {
                break;
            }
            if self.eat_keyword(Keyword::Like, &mut c) {
                c.push(self.parse_complex_string_literal()?);
                break;
            }
            if self.eat_keyword(Keyword::Where, &mut c) {
                c.push(self.parse_expr()?);
                break;
            }
            if self.check_keyword(Keyword::Limit) {
                c.push(self.parse_limit_clause()?);
                break;
            }
            if self.check_any_keyword(&[Keyword::From, Keyword::In]) {
                let word = self.advance();
                c.push(self.node(RuleKind::FromOrIn, vec![word]));
                c.push(self.parse_relation_factor()?);
                continue;
            }
            if self.check_keyword(Keyword::For) {
                let f = vec![self.advance(), self.parse_user_with_host_name()?];
                c.push(self.node(RuleKind::OptForGrantUser, f));
                continue;
            }
            if create && words == 2 {
                c.push(self.parse_relation_factor()?);
                words += 1;
                continue;
            }
            if !matches!(self.current().kind, TokenKind::Identifier | TokenKind::Keyword(_)) {
                return Err(self.error_here("SHOW object"));
            }
            c.push(self.advance());
            words += 1;
        }
        if words == 0 {
            return Err(self.error_here("SHOW object"));
        }
        Ok(self.node(RuleKind::ShowStmt, c))
    }

    // ------------------------------------------------------------------
    // LOCK / UNLOCK TABLES
    // ------------------------------------------------------------------

    pub(super) fn parse_lock_tables_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Lock)?,
            self.expect_any_keyword(&[Keyword::Table, Keyword::Tables])?,
        ];
        let mut list = vec![];
        loop {
            let mut t = vec![self.parse_relation_factor()?];
            let lock_word =
                ["READ", "WRITE", "LOW_PRIORITY"].iter().any(|w| self.check_word(w));
            if self.eat_keyword(Keyword::As, &mut t) || (self.check_name() && !lock_word) {
                t.push(self.parse_name(RuleKind::RelationName)?);
            }
            let mut l = vec![];
            if self.eat_word("READ", &mut l) {
                self.eat_word("LOCAL", &mut l);
            } else {
                self.eat_word("LOW_PRIORITY", &mut l);
                l.push(self.expect_word("WRITE")?);
            }
            t.push(self.node(RuleKind::LockType, l));
            list.push(self.node(RuleKind::LockTable, t));
            if !self.eat(&TokenKind::Comma, &mut list) {
                break;
            }
        }
        c.push(self.node(RuleKind::LockTableList, list));
        Ok(self.node(RuleKind::LockTablesStmt, c))
    }

    pub(super) fn parse_unlock_tables_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![
            self.expect_keyword(Keyword::Unlock)?,
            self.expect_any_keyword(&[Keyword::Tables, Keyword::Table])?,
        ];
        Ok(self.node(RuleKind::UnlockTablesStmt, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(sql: &str) -> Vec<&'static str> {
        let node = Parser::new(sql).parse_statement().unwrap();
        let mut out = Vec::new();
        node.visit(&mut |n| {
            if let Some(kind) = n.kind() {
                out.push(kind.name());
            }
        });
        out
    }

    fn statement(sql: &str) -> &'static str {
        rules(sql)[1]
    }

    #[test]
    fn test_transactions() {
        assert_eq!(statement("BEGIN"), "begin_stmt");
        assert_eq!(
            statement("START TRANSACTION WITH CONSISTENT SNAPSHOT, READ ONLY"),
            "begin_stmt"
        );
        assert_eq!(statement("COMMIT WORK"), "commit_stmt");
        assert_eq!(statement("ROLLBACK"), "rollback_stmt");
        assert_eq!(statement("ROLLBACK TO SAVEPOINT sp1"), "rollback_savepoint_stmt");
        assert_eq!(statement("SAVEPOINT sp1"), "create_savepoint_stmt");
        assert_eq!(statement("RELEASE SAVEPOINT sp1"), "release_savepoint_stmt");
        assert_eq!(statement("XA COMMIT 'x1' ONE PHASE"), "xa_commit_stmt");
        assert_eq!(statement("XA START 'x1'"), "xa_begin_stmt");
    }

    #[test]
    fn test_set_dispatch() {
        assert_eq!(statement("SET NAMES utf8mb4 COLLATE utf8mb4_bin"), "set_names_stmt");
        assert_eq!(statement("SET CHARACTER SET DEFAULT"), "set_charset_stmt");
        assert_eq!(
            statement("SET GLOBAL TRANSACTION ISOLATION LEVEL READ COMMITTED, READ WRITE"),
            "set_transaction_stmt"
        );
        assert_eq!(statement("SET PASSWORD = 'x'"), "set_password_stmt");
        assert_eq!(statement("SET ROLE NONE"), "set_role_stmt");
        assert_eq!(
            statement("SET @a = 1, @@session.autocommit = ON, GLOBAL x = DEFAULT"),
            "variable_set_stmt"
        );
    }

    #[test]
    fn test_variable_forms() {
        let names = rules("SET @a := 1, sql_mode = 'x', SESSION ob_query_timeout = 10");
        assert_eq!(names.iter().filter(|n| **n == "var_and_val").count(), 3);
        assert!(names.contains(&"scope_or_scope_alias"));
        assert!(names.contains(&"var_name"));
    }

    #[test]
    fn test_prepared_statements() {
        assert_eq!(statement("PREPARE s FROM 'SELECT ?'"), "prepare_stmt");
        assert!(rules("EXECUTE s USING @a, @b").contains(&"argument_list"));
        assert_eq!(statement("DEALLOCATE PREPARE s"), "deallocate_prepare_stmt");
        assert_eq!(statement("DROP PREPARE s"), "deallocate_prepare_stmt");
    }

    #[test]
    fn test_explain_and_describe() {
        assert!(rules("EXPLAIN SELECT 1").contains(&"explainable_stmt"));
        assert!(rules("EXPLAIN FORMAT = JSON DELETE FROM t").contains(&"format_name"));
        let names = rules("DESC t a");
        assert!(!names.contains(&"explainable_stmt"));
        assert!(names.contains(&"column_name"));
    }

    #[test]
    fn test_show() {
        assert_eq!(statement("SHOW FULL TABLES FROM db LIKE 't%'"), "show_stmt");
        assert!(rules("SHOW CREATE TABLE db.t").contains(&"relation_factor"));
        assert!(rules("SHOW GRANTS FOR u").contains(&"opt_for_grant_user"));
        assert!(Parser::new("SHOW").parse_statement().is_err());
    }

    #[test]
    fn test_table_locks() {
        let names = rules("LOCK TABLES t1 READ LOCAL, t2 AS x LOW_PRIORITY WRITE");
        assert_eq!(names.iter().filter(|n| **n == "lock_table").count(), 2);
        assert_eq!(statement("UNLOCK TABLES"), "unlock_tables_stmt");
    }
}
