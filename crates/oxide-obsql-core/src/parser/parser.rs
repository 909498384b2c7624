//! SQL Parser implementation.
//!
//! The grammar is split over several files, each adding an `impl Parser`
//! block; this file holds the token cursor, the node-building helpers and
//! statement dispatch.

use super::error::ParseError;
use crate::cst::{ParseNode, RuleKind};
use crate::dialect::{Dialect, MySqlDialect};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// SQL Parser producing concrete parse trees.
pub struct Parser<'a> {
    input: &'a str,
    dialect: &'a dyn Dialect,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input using MySQL mode.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &MySqlDialect)
    }

    /// Creates a new parser for the given input and dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        let tokens = Lexer::with_dialect(input, dialect).tokenize();
        Self {
            input,
            dialect,
            tokens,
            pos: 0,
        }
    }

    /// Parses a script of `;`-separated statements.
    ///
    /// The result is a `sql_stmt` node wrapping a `stmt_list`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` at the first token that does not fit the
    /// grammar.
    pub fn parse(&mut self) -> Result<ParseNode, ParseError> {
        let mut list = vec![];
        loop {
            while self.check(&TokenKind::Semicolon) {
                list.push(self.advance());
            }
            if self.at_eof() {
                break;
            }
            list.push(self.parse_statement()?);
            if !self.at_eof() && !self.check(&TokenKind::Semicolon) {
                return Err(self.error_here("';' or end of input"));
            }
        }
        let stmt_list = self.node(RuleKind::StmtList, list);
        Ok(self.node(RuleKind::SqlStmt, vec![stmt_list]))
    }

    /// Parses a single statement into a `stmt` node.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a supported statement.
    pub fn parse_statement(&mut self) -> Result<ParseNode, ParseError> {
        let body = self.parse_stmt_body()?;
        Ok(self.node(RuleKind::Stmt, vec![body]))
    }

    fn parse_stmt_body(&mut self) -> Result<ParseNode, ParseError> {
        let Some(keyword) = self.current().as_keyword() else {
            if self.check(&TokenKind::LeftParen) {
                return self.parse_select_stmt();
            }
            return Err(self.error_here("statement"));
        };
        match keyword {
            Keyword::Select | Keyword::With => self.parse_select_stmt(),
            Keyword::Insert | Keyword::Replace => self.parse_insert_stmt(),
            Keyword::Update => self.parse_update_stmt(),
            Keyword::Delete => self.parse_delete_stmt(),
            Keyword::Create => self.parse_create(),
            Keyword::Alter => self.parse_alter(),
            Keyword::Drop => self.parse_drop(),
            Keyword::Truncate => self.parse_truncate_table_stmt(),
            Keyword::Rename => {
                if self.check_keyword_at(1, Keyword::User) {
                    self.parse_rename_user_stmt()
                } else {
                    self.parse_rename_table_stmt()
                }
            }
            Keyword::Use => self.parse_use_database_stmt(),
            Keyword::Begin | Keyword::Start => self.parse_begin_stmt(),
            Keyword::Commit => self.parse_commit_stmt(),
            Keyword::Rollback => self.parse_rollback(),
            Keyword::Savepoint => self.parse_create_savepoint_stmt(),
            Keyword::Release => self.parse_release_savepoint_stmt(),
            Keyword::Xa => self.parse_xa_stmt(),
            Keyword::Set => self.parse_set(),
            Keyword::Prepare => self.parse_prepare_stmt(),
            Keyword::Execute => self.parse_execute_stmt(),
            Keyword::Deallocate => self.parse_deallocate_prepare_stmt(),
            Keyword::Explain | Keyword::Describe | Keyword::Desc => self.parse_explain_stmt(),
            Keyword::Show => self.parse_show_stmt(),
            Keyword::Lock => self.parse_lock_tables_stmt(),
            Keyword::Unlock => self.parse_unlock_tables_stmt(),
            Keyword::Grant => self.parse_grant_stmt(),
            Keyword::Revoke => self.parse_revoke_stmt(),
            Keyword::Kill => self.parse_kill_stmt(),
            Keyword::Flashback => self.parse_flashback_stmt(),
            Keyword::Purge => self.parse_purge_stmt(),
            Keyword::Optimize => self.parse_optimize_stmt(),
            Keyword::Analyze => self.parse_analyze_stmt(),
            Keyword::Help => self.parse_help_stmt(),
            _ => Err(self.error_here("statement")),
        }
    }

    fn parse_create(&mut self) -> Result<ParseNode, ParseError> {
        match self.peek_keyword(1) {
            Some(
                Keyword::Or
                | Keyword::View
                | Keyword::Algorithm
                | Keyword::Definer
                | Keyword::Sql,
            ) => self.parse_create_view_stmt(),
            Some(Keyword::Temporary | Keyword::External | Keyword::Table) => {
                self.parse_create_table_stmt()
            }
            Some(Keyword::Unique | Keyword::Fulltext | Keyword::Spatial | Keyword::Index) => {
                self.parse_create_index_stmt()
            }
            Some(Keyword::Database | Keyword::Schema) => self.parse_create_database_stmt(),
            Some(Keyword::Tablegroup) => self.parse_create_tablegroup_stmt(),
            Some(Keyword::Tablespace) => self.parse_create_tablespace_stmt(),
            Some(Keyword::Sequence) => self.parse_create_sequence_stmt(),
            Some(Keyword::Resource) => self.parse_create_resource_stmt(),
            Some(Keyword::Tenant) => self.parse_create_tenant_stmt(),
            Some(Keyword::Snapshot) => self.parse_create_tenant_snapshot_stmt(),
            Some(Keyword::Restore) => self.parse_create_restore_point_stmt(),
            Some(Keyword::User) => self.parse_create_user_stmt(),
            Some(Keyword::Role) => self.parse_create_role_stmt(),
            _ => {
                self.advance();
                Err(self.error_here("object type after CREATE"))
            }
        }
    }

    fn parse_alter(&mut self) -> Result<ParseNode, ParseError> {
        match self.peek_keyword(1) {
            Some(Keyword::Table | Keyword::External) => self.parse_alter_table_stmt(),
            Some(Keyword::Database | Keyword::Schema) => self.parse_alter_database_stmt(),
            Some(Keyword::Tablegroup) => self.parse_alter_tablegroup_stmt(),
            Some(Keyword::Tablespace) => self.parse_alter_tablespace_stmt(),
            Some(Keyword::Sequence) => self.parse_alter_sequence_stmt(),
            Some(Keyword::Resource) => self.parse_alter_resource_stmt(),
            Some(Keyword::Tenant) => self.parse_alter_tenant_stmt(),
            Some(Keyword::System) => self.parse_alter_system(),
            Some(Keyword::User) => self.parse_lock_user_stmt(),
            _ => {
                self.advance();
                Err(self.error_here("object type after ALTER"))
            }
        }
    }

    fn parse_drop(&mut self) -> Result<ParseNode, ParseError> {
        match self.peek_keyword(1) {
            Some(Keyword::Table | Keyword::Tables | Keyword::Temporary) => {
                self.parse_drop_table_stmt()
            }
            Some(Keyword::Index) => self.parse_drop_index_stmt(),
            Some(Keyword::View) => self.parse_drop_view_stmt(),
            Some(Keyword::Database | Keyword::Schema) => self.parse_drop_database_stmt(),
            Some(Keyword::Tablegroup) => self.parse_drop_tablegroup_stmt(),
            Some(Keyword::Tablespace) => self.parse_drop_tablespace_stmt(),
            Some(Keyword::Sequence) => self.parse_drop_sequence_stmt(),
            Some(Keyword::Resource) => self.parse_drop_resource_stmt(),
            Some(Keyword::Tenant) => self.parse_drop_tenant_stmt(),
            Some(Keyword::Snapshot) => self.parse_drop_tenant_snapshot_stmt(),
            Some(Keyword::Restore) => self.parse_drop_restore_point_stmt(),
            Some(Keyword::User) => self.parse_drop_user_stmt(),
            Some(Keyword::Role) => self.parse_drop_role_stmt(),
            Some(Keyword::Function) => self.parse_drop_routine(RuleKind::DropFunctionStmt),
            Some(Keyword::Procedure) => self.parse_drop_routine(RuleKind::DropProcedureStmt),
            Some(Keyword::Trigger) => self.parse_drop_routine(RuleKind::DropTriggerStmt),
            Some(Keyword::Prepare) => self.parse_deallocate_prepare_stmt(),
            _ => {
                self.advance();
                Err(self.error_here("object type after DROP"))
            }
        }
    }

    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    /// Returns the current token.
    pub(super) fn current(&self) -> &Token {
        self.token_at(0)
    }

    /// Returns the token `n` positions ahead (the EOF token past the end).
    pub(super) fn token_at(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(super) fn peek_kind(&self, n: usize) -> &TokenKind {
        &self.token_at(n).kind
    }

    pub(super) fn peek_keyword(&self, n: usize) -> Option<Keyword> {
        self.token_at(n).as_keyword()
    }

    pub(super) fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Returns the source text of the token `n` positions ahead.
    pub(super) fn text_at(&self, n: usize) -> &'a str {
        let span = self.token_at(n).span;
        &self.input[span.start..span.end]
    }

    pub(super) fn pipes_as_concat(&self) -> bool {
        self.dialect.pipes_as_concat()
    }

    pub(super) fn oracle(&self) -> bool {
        self.dialect.oracle_syntax()
    }

    /// Consumes the current token and returns it as a terminal node.
    pub(super) fn advance(&mut self) -> ParseNode {
        let token = self.current().clone();
        let text = &self.input[token.span.start..token.span.end];
        if !token.is_eof() {
            self.pos += 1;
        }
        ParseNode::terminal(token.kind, text, token.span)
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check_keyword_at(0, keyword)
    }

    pub(super) fn check_keyword_at(&self, n: usize, keyword: Keyword) -> bool {
        self.peek_keyword(n) == Some(keyword)
    }

    pub(super) fn check_any_keyword(&self, keywords: &[Keyword]) -> bool {
        self.current()
            .as_keyword()
            .is_some_and(|kw| keywords.contains(&kw))
    }

    /// Checks if the token `n` ahead is a bare word spelled `word`.
    pub(super) fn check_word_at(&self, n: usize, word: &str) -> bool {
        matches!(self.peek_kind(n), TokenKind::Identifier | TokenKind::Keyword(_))
            && self.text_at(n).eq_ignore_ascii_case(word)
    }

    pub(super) fn check_word(&self, word: &str) -> bool {
        self.check_word_at(0, word)
    }

    pub(super) fn eat_word(&mut self, word: &str, out: &mut Vec<ParseNode>) -> bool {
        if self.check_word(word) {
            out.push(self.advance());
            true
        } else {
            false
        }
    }

    /// Checks if the current token can be used as a name.
    pub(super) fn check_name(&self) -> bool {
        self.current().kind.is_name()
    }

    /// Consumes the current token into `out` if it has the given kind.
    pub(super) fn eat(&mut self, kind: &TokenKind, out: &mut Vec<ParseNode>) -> bool {
        if self.check(kind) {
            out.push(self.advance());
            true
        } else {
            false
        }
    }

    /// Consumes the current token into `out` if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword, out: &mut Vec<ParseNode>) -> bool {
        if self.check_keyword(keyword) {
            out.push(self.advance());
            true
        } else {
            false
        }
    }

    /// Consumes the current token into `out` if it is one of `keywords`.
    pub(super) fn eat_any_keyword(
        &mut self,
        keywords: &[Keyword],
        out: &mut Vec<ParseNode>,
    ) -> bool {
        if self.check_any_keyword(keywords) {
            out.push(self.advance());
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<ParseNode, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(&format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<ParseNode, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error_here(keyword.as_str()))
        }
    }

    /// Expects one of `keywords`.
    pub(super) fn expect_any_keyword(
        &mut self,
        keywords: &[Keyword],
    ) -> Result<ParseNode, ParseError> {
        if self.check_any_keyword(keywords) {
            Ok(self.advance())
        } else {
            let expected: Vec<&str> = keywords.iter().map(|kw| kw.as_str()).collect();
            Err(self.error_here(&expected.join(" or ")))
        }
    }

    /// Pushes `IF NOT EXISTS` or `IF EXISTS` terminals when present.
    pub(super) fn eat_if_exists(
        &mut self,
        not: bool,
        out: &mut Vec<ParseNode>,
    ) -> Result<(), ParseError> {
        if self.eat_keyword(Keyword::If, out) {
            if not {
                out.push(self.expect_keyword(Keyword::Not)?);
            }
            out.push(self.expect_keyword(Keyword::Exists)?);
        }
        Ok(())
    }

    /// Builds an error describing the current token.
    pub(super) fn error_here(&self, expected: &str) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected, token.span),
            TokenKind::Error(message) => ParseError::new(message.clone(), token.span),
            other => ParseError::unexpected(expected, other.clone(), token.span),
        }
    }

    // ------------------------------------------------------------------
    // Node building
    // ------------------------------------------------------------------

    /// Builds a rule node. A childless node is placed at the current token.
    pub(super) fn node(&self, kind: RuleKind, children: Vec<ParseNode>) -> ParseNode {
        if children.is_empty() {
            let at = self.current().span.start;
            ParseNode::raw(kind.index(), children, Span::new(at, at))
        } else {
            ParseNode::rule(kind, children)
        }
    }

    /// Consumes a name token (identifier or non-reserved keyword).
    pub(super) fn parse_name_terminal(&mut self) -> Result<ParseNode, ParseError> {
        if self.check_name() {
            Ok(self.advance())
        } else {
            Err(self.error_here("identifier"))
        }
    }

    /// Parses a single-name rule such as `column_name` or `relation_name`.
    pub(super) fn parse_name(&mut self, kind: RuleKind) -> Result<ParseNode, ParseError> {
        let name = self.parse_name_terminal()?;
        Ok(self.node(kind, vec![name]))
    }

    /// Parses a single-name rule that also accepts a string literal.
    pub(super) fn parse_name_or_string(&mut self, kind: RuleKind) -> Result<ParseNode, ParseError> {
        if self.check(&TokenKind::String) {
            let text = self.advance();
            Ok(self.node(kind, vec![text]))
        } else {
            self.parse_name(kind)
        }
    }

    /// Parses `relation_name [. relation_name]` into a `relation_factor`.
    pub(super) fn parse_relation_factor(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::RelationName)?];
        if self.check(&TokenKind::Dot) && self.peek_kind(1).is_name() {
            c.push(self.advance());
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        Ok(self.node(RuleKind::RelationFactor, c))
    }

    /// Parses `relation_factor (, relation_factor)*` into a `table_list`.
    pub(super) fn parse_table_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_relation_factor()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_relation_factor()?);
        }
        Ok(self.node(RuleKind::TableList, c))
    }

    /// Parses `( name, ... )` into a `column_list`, parentheses included.
    pub(super) fn parse_paren_column_list(
        &mut self,
        out: &mut Vec<ParseNode>,
    ) -> Result<(), ParseError> {
        out.push(self.expect(&TokenKind::LeftParen)?);
        out.push(self.parse_column_list()?);
        out.push(self.expect(&TokenKind::RightParen)?);
        Ok(())
    }

    /// Parses `column_name (, column_name)*` into a `column_list`.
    pub(super) fn parse_column_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::ColumnName)?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_name(RuleKind::ColumnName)?);
        }
        Ok(self.node(RuleKind::ColumnList, c))
    }

    /// Parses a (possibly charset-introduced, possibly concatenated) string
    /// into a `complex_string_literal`.
    pub(super) fn parse_complex_string_literal(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check(&TokenKind::NationalString) {
            c.push(self.advance());
            return Ok(self.node(RuleKind::ComplexStringLiteral, c));
        }
        if self.is_charset_introducer() {
            let introducer = self.advance();
            c.push(self.node(RuleKind::CharsetIntroducer, vec![introducer]));
        }
        c.push(self.expect(&TokenKind::String)?);
        while self.check(&TokenKind::String) {
            c.push(self.advance());
        }
        Ok(self.node(RuleKind::ComplexStringLiteral, c))
    }

    /// Returns true at `_charset 'string'`.
    pub(super) fn is_charset_introducer(&self) -> bool {
        matches!(self.peek_kind(0), TokenKind::Identifier)
            && self.text_at(0).starts_with('_')
            && self.text_at(0).len() > 1
            && matches!(self.peek_kind(1), TokenKind::String)
    }

    /// Parses an integer, pushing an optional leading sign.
    pub(super) fn eat_signed_int(&mut self, out: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        if !self.eat(&TokenKind::Minus, out) {
            self.eat(&TokenKind::Plus, out);
        }
        if self.check(&TokenKind::IntNum) || self.check(&TokenKind::DecimalNum) {
            out.push(self.advance());
            Ok(())
        } else {
            Err(self.error_here("number"))
        }
    }

    /// Parses a parenthesised integer such as `(10)`.
    pub(super) fn eat_paren_int(&mut self, out: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        out.push(self.expect(&TokenKind::LeftParen)?);
        out.push(self.expect(&TokenKind::IntNum)?);
        out.push(self.expect(&TokenKind::RightParen)?);
        Ok(())
    }

    pub(super) fn parse_charset_key(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat_keyword(Keyword::Character, &mut c) {
            c.push(self.expect_keyword(Keyword::Set)?);
        } else {
            c.push(self.expect_any_keyword(&[Keyword::Charset, Keyword::Char])?);
            if self.check_keyword(Keyword::Set) {
                c.push(self.advance());
            }
        }
        Ok(self.node(RuleKind::CharsetKey, c))
    }

    pub(super) fn check_charset_key(&self) -> bool {
        self.check_keyword(Keyword::Charset)
            || (self.check_any_keyword(&[Keyword::Character, Keyword::Char])
                && self.check_keyword_at(1, Keyword::Set))
    }

    pub(super) fn parse_drop_routine(&mut self, kind: RuleKind) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?];
        let kinds = [Keyword::Function, Keyword::Procedure, Keyword::Trigger];
        c.push(self.expect_any_keyword(&kinds)?);
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_relation_factor()?);
        Ok(self.node(kind, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(node: &ParseNode) -> Vec<&'static str> {
        let mut out = Vec::new();
        node.visit(&mut |n| {
            if let Some(kind) = n.kind() {
                out.push(kind.name());
            }
        });
        out
    }

    #[test]
    fn test_script_shape() {
        let root = Parser::new("SELECT 1; SELECT 2;").parse().unwrap();
        assert_eq!(root.kind(), Some(RuleKind::SqlStmt));
        let list = root.as_rule().unwrap().children[0].as_rule().unwrap();
        assert_eq!(list.kind(), Some(RuleKind::StmtList));
        let stmts: Vec<_> = list
            .children
            .iter()
            .filter(|c| c.kind() == Some(RuleKind::Stmt))
            .collect();
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_empty_script() {
        let root = Parser::new("  ;; ").parse().unwrap();
        assert_eq!(root.kind(), Some(RuleKind::SqlStmt));
    }

    #[test]
    fn test_missing_separator() {
        let err = Parser::new("SELECT 1 SELECT 2").parse().unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("';' or end of input"));
    }

    #[test]
    fn test_unknown_statement() {
        let err = Parser::new("FROB x").parse().unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("statement"));
        assert_eq!(err.span, Span::new(0, 4));
    }

    #[test]
    fn test_lexer_error_surfaces() {
        let err = Parser::new("SELECT 'abc").parse().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_expression_levels_nest() {
        let root = Parser::new("SELECT 1").parse().unwrap();
        let names = kinds(&root);
        let expected = [
            "select_stmt",
            "select_no_parens",
            "simple_select",
            "projection",
            "expr",
            "bool_pri",
            "predicate",
            "bit_expr",
            "simple_expr",
            "expr_const",
            "literal",
            "number_literal",
        ];
        let mut it = names.iter();
        for name in expected {
            assert!(it.any(|n| *n == name), "missing {name} in {names:?}");
        }
    }
}
