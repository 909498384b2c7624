//! Table, index and view definitions.

use super::error::ParseError;
use super::option::{INDEX_OPTIONS, TABLE_OPTIONS};
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

/// Current timestamp spellings accepted by `DEFAULT` and `ON UPDATE`.
const NOW_FUNCTIONS: &[&str] = &["CURRENT_TIMESTAMP", "LOCALTIMESTAMP", "LOCALTIME", "NOW"];

impl Parser<'_> {
    // ------------------------------------------------------------------
    // CREATE TABLE
    // ------------------------------------------------------------------

    pub(super) fn parse_create_table_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Create)?];
        if self.check_any_keyword(&[Keyword::Temporary, Keyword::External]) {
            let special = self.advance();
            c.push(self.node(RuleKind::SpecialTableType, vec![special]));
        }
        c.push(self.expect_keyword(Keyword::Table)?);
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_relation_factor()?);

        if self.eat_keyword(Keyword::Like, &mut c) {
            c.push(self.parse_relation_factor()?);
            return Ok(self.node(RuleKind::CreateTableLikeStmt, c));
        }
        if self.check(&TokenKind::LeftParen) && self.check_keyword_at(1, Keyword::Like) {
            c.push(self.advance());
            c.push(self.advance());
            c.push(self.parse_relation_factor()?);
            c.push(self.expect(&TokenKind::RightParen)?);
            return Ok(self.node(RuleKind::CreateTableLikeStmt, c));
        }

        if self.check(&TokenKind::LeftParen) && !self.starts_query_at(1) {
            c.push(self.advance());
            c.push(self.parse_table_element_list()?);
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        if let Some(options) = self.parse_option_list(&TABLE_OPTIONS)? {
            c.push(options);
        }
        if self.check_keyword(Keyword::Partition) {
            c.push(self.parse_partition_option()?);
        }
        if self.check_any_keyword(&[Keyword::Ignore, Keyword::Replace]) {
            let word = self.advance();
            c.push(self.node(RuleKind::IgnoreOrReplace, vec![word]));
        }
        let explicit = self.eat_keyword(Keyword::As, &mut c);
        if explicit
            || self.check_any_keyword(&[Keyword::Select, Keyword::With])
            || self.check(&TokenKind::LeftParen)
        {
            c.push(self.parse_select_stmt()?);
        }
        Ok(self.node(RuleKind::CreateTableStmt, c))
    }

    fn parse_table_element_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_table_element()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_table_element()?);
        }
        Ok(self.node(RuleKind::TableElementList, c))
    }

    fn parse_table_element(&mut self) -> Result<ParseNode, ParseError> {
        let element = self.parse_table_element_body()?;
        Ok(self.node(RuleKind::TableElement, vec![element]))
    }

    /// Parses a column definition or an out-of-line constraint or index.
    fn parse_table_element_body(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_keyword(Keyword::Constraint) {
            c.push(self.parse_opt_constraint_name()?);
        }
        match self.peek_keyword(0) {
            Some(Keyword::Primary) => self.parse_primary_key(c),
            Some(Keyword::Foreign) => self.parse_foreign_key(c),
            Some(Keyword::Check) => {
                self.parse_check_body(&mut c)?;
                Ok(self.node(RuleKind::OutOfLineConstraint, c))
            }
            Some(Keyword::Unique) => {
                self.parse_out_of_line_index(c, RuleKind::OutOfLineUniqueIndex)
            }
            _ if !c.is_empty() => Err(self.error_here("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK")),
            Some(Keyword::Key | Keyword::Index | Keyword::Fulltext | Keyword::Spatial) => {
                self.parse_out_of_line_index(c, RuleKind::OutOfLineIndex)
            }
            _ => self.parse_column_definition(),
        }
    }

    fn starts_table_constraint(&self) -> bool {
        self.check_any_keyword(&[
            Keyword::Constraint,
            Keyword::Primary,
            Keyword::Foreign,
            Keyword::Check,
            Keyword::Unique,
            Keyword::Key,
            Keyword::Index,
            Keyword::Fulltext,
            Keyword::Spatial,
        ])
    }

    /// Parses `CONSTRAINT [name]`.
    fn parse_opt_constraint_name(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Constraint)?];
        if self.check_name() {
            c.push(self.parse_name(RuleKind::ConstraintName)?);
        }
        Ok(self.node(RuleKind::OptConstraintName, c))
    }

    fn parse_primary_key(&mut self, mut c: Vec<ParseNode>) -> Result<ParseNode, ParseError> {
        c.push(self.expect_keyword(Keyword::Primary)?);
        c.push(self.expect_keyword(Keyword::Key)?);
        if self.check_name() {
            c.push(self.parse_index_name()?);
        }
        if self.check_keyword(Keyword::Using) {
            c.push(self.parse_index_using_algorithm()?);
        }
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_sort_column_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        if let Some(options) = self.parse_option_list(&INDEX_OPTIONS)? {
            c.push(options);
        }
        Ok(self.node(RuleKind::OutOfLineConstraint, c))
    }

    fn parse_foreign_key(&mut self, mut c: Vec<ParseNode>) -> Result<ParseNode, ParseError> {
        c.push(self.expect_keyword(Keyword::Foreign)?);
        c.push(self.expect_keyword(Keyword::Key)?);
        if self.check_name() {
            c.push(self.parse_index_name()?);
        }
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_column_name_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        c.push(self.parse_references_clause()?);
        Ok(self.node(RuleKind::OutOfLineConstraint, c))
    }

    /// Parses `CHECK ( expr ) [[NOT] ENFORCED]` into `c`.
    fn parse_check_body(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        c.push(self.expect_keyword(Keyword::Check)?);
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_expr()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        if self.check_word("ENFORCED")
            || (self.check_keyword(Keyword::Not) && self.check_word_at(1, "ENFORCED"))
        {
            c.push(self.parse_check_state()?);
        }
        Ok(())
    }

    fn parse_check_state(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        self.eat_keyword(Keyword::Not, &mut c);
        c.push(self.expect_word("ENFORCED")?);
        Ok(self.node(RuleKind::CheckState, c))
    }

    fn parse_out_of_line_index(
        &mut self,
        mut c: Vec<ParseNode>,
        kind: RuleKind,
    ) -> Result<ParseNode, ParseError> {
        let head = self.advance();
        c.push(head);
        if kind == RuleKind::OutOfLineUniqueIndex || !self.check(&TokenKind::LeftParen) {
            self.eat_any_keyword(&[Keyword::Key, Keyword::Index], &mut c);
        }
        if self.check_name() {
            c.push(self.parse_index_name()?);
        }
        if self.check_keyword(Keyword::Using) {
            c.push(self.parse_index_using_algorithm()?);
        }
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_sort_column_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        if let Some(options) = self.parse_option_list(&INDEX_OPTIONS)? {
            c.push(options);
        }
        if self.check_keyword(Keyword::Partition) {
            c.push(self.parse_partition_option()?);
        }
        Ok(self.node(kind, c))
    }

    pub(super) fn parse_index_name(&mut self) -> Result<ParseNode, ParseError> {
        let name = self.parse_name(RuleKind::RelationName)?;
        Ok(self.node(RuleKind::IndexName, vec![name]))
    }

    fn parse_index_using_algorithm(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Using)?];
        c.push(self.parse_name_terminal()?);
        Ok(self.node(RuleKind::IndexUsingAlgorithm, c))
    }

    fn parse_sort_column_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_sort_column_key()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_sort_column_key()?);
        }
        Ok(self.node(RuleKind::SortColumnList, c))
    }

    fn parse_sort_column_key(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat(&TokenKind::LeftParen, &mut c) {
            c.push(self.parse_expr()?);
            c.push(self.expect(&TokenKind::RightParen)?);
        } else {
            c.push(self.parse_name(RuleKind::ColumnName)?);
            if self.check(&TokenKind::LeftParen) {
                self.eat_paren_int(&mut c)?;
            }
        }
        self.eat_any_keyword(&[Keyword::Asc, Keyword::Desc], &mut c);
        Ok(self.node(RuleKind::SortColumnKey, c))
    }

    fn parse_column_name_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::ColumnName)?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_name(RuleKind::ColumnName)?);
        }
        Ok(self.node(RuleKind::ColumnNameList, c))
    }

    fn parse_references_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::References)?];
        c.push(self.parse_relation_factor()?);
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_column_name_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        if self.check_keyword(Keyword::Match) {
            let mut m = vec![self.advance()];
            if self.check_word("FULL") || self.check_word("PARTIAL") || self.check_word("SIMPLE") {
                m.push(self.advance());
            } else {
                return Err(self.error_here("FULL, PARTIAL or SIMPLE"));
            }
            c.push(self.node(RuleKind::MatchAction, m));
        }
        let mut options = vec![];
        while self.check_keyword(Keyword::On)
            && self.check_any_keyword_at(1, &[Keyword::Delete, Keyword::Update])
        {
            let mut o = vec![self.advance(), self.advance()];
            o.push(self.parse_reference_action()?);
            options.push(self.node(RuleKind::ReferenceOption, o));
        }
        if !options.is_empty() {
            c.push(self.node(RuleKind::OptReferenceOptionList, options));
        }
        Ok(self.node(RuleKind::ReferencesClause, c))
    }

    fn parse_reference_action(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_word("RESTRICT") || self.check_word("CASCADE") {
            c.push(self.advance());
        } else if self.check_keyword(Keyword::Set) {
            c.push(self.advance());
            c.push(self.expect_any_keyword(&[Keyword::Null, Keyword::Default])?);
        } else if self.check_word("NO") && self.check_word_at(1, "ACTION") {
            c.push(self.advance());
            c.push(self.advance());
        } else {
            return Err(self.error_here("reference action"));
        }
        Ok(self.node(RuleKind::ReferenceAction, c))
    }

    // ------------------------------------------------------------------
    // Column definitions
    // ------------------------------------------------------------------

    fn parse_column_definition(&mut self) -> Result<ParseNode, ParseError> {
        let mut r = vec![];
        if self.peek_kind(1) == &TokenKind::Dot {
            r.push(self.parse_name(RuleKind::RelationName)?);
            r.push(self.advance());
        }
        r.push(self.parse_name(RuleKind::ColumnName)?);
        let mut c = vec![self.node(RuleKind::ColumnDefinitionRef, r)];
        c.push(self.parse_data_type()?);

        if self.check_word("GENERATED") {
            c.push(self.advance());
            c.push(self.expect_word("ALWAYS")?);
        }
        if self.eat_keyword(Keyword::As, &mut c) {
            c.push(self.expect(&TokenKind::LeftParen)?);
            c.push(self.parse_expr()?);
            c.push(self.expect(&TokenKind::RightParen)?);
            if self.check_word("VIRTUAL") || self.check_word("STORED") {
                c.push(self.advance());
            }
        }

        let mut attributes = vec![];
        while let Some(attribute) = self.parse_column_attribute()? {
            attributes.push(attribute);
        }
        if !attributes.is_empty() {
            c.push(self.node(RuleKind::OptColumnAttributeList, attributes));
        }
        if self.check_keyword(Keyword::References) {
            c.push(self.parse_references_clause()?);
        }

        if self.check_keyword(Keyword::First) {
            c.push(self.advance());
        } else if self.check_word("BEFORE") || self.check_word("AFTER") {
            c.push(self.advance());
            c.push(self.parse_name(RuleKind::ColumnName)?);
        }
        Ok(self.node(RuleKind::ColumnDefinition, c))
    }

    fn parse_column_attribute(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let mut c = vec![];
        if self.check_keyword(Keyword::Not) && self.check_keyword_at(1, Keyword::Null) {
            c.push(self.advance());
            c.push(self.advance());
        } else if self.check_keyword(Keyword::Null) {
            c.push(self.advance());
        } else if self.check_keyword(Keyword::Default) {
            c.push(self.advance());
            if self.eat(&TokenKind::LeftParen, &mut c) {
                c.push(self.parse_expr()?);
                c.push(self.expect(&TokenKind::RightParen)?);
            } else {
                c.push(self.parse_now_or_signed_literal()?);
            }
        } else if self.check_word("AUTO_INCREMENT") {
            c.push(self.advance());
        } else if self.check_keyword(Keyword::Primary) {
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::Key)?);
        } else if self.check_keyword(Keyword::Key) {
            c.push(self.advance());
        } else if self.check_keyword(Keyword::Unique) {
            c.push(self.advance());
            self.eat_keyword(Keyword::Key, &mut c);
        } else if self.check_word("COMMENT") {
            c.push(self.advance());
            c.push(self.parse_complex_string_literal()?);
        } else if self.check_keyword(Keyword::On) && self.check_keyword_at(1, Keyword::Update) {
            c.push(self.advance());
            c.push(self.advance());
            c.push(self.parse_cur_timestamp_func()?);
        } else if self.check_keyword(Keyword::Collate) {
            c.push(self.advance());
            c.push(self.parse_name_or_string(RuleKind::CollationName)?);
        } else if self.check_keyword(Keyword::Constraint) || self.check_keyword(Keyword::Check) {
            if self.check_keyword(Keyword::Constraint) {
                c.push(self.parse_opt_constraint_name()?);
            }
            self.parse_check_body(&mut c)?;
        } else if self.check_word("SRID") || self.check_word("ID") {
            c.push(self.advance());
            c.push(self.expect(&TokenKind::IntNum)?);
        } else if self.check_word("VISIBLE") || self.check_word("INVISIBLE") {
            c.push(self.advance());
        } else {
            return Ok(None);
        }
        Ok(Some(self.node(RuleKind::ColumnAttribute, c)))
    }

    fn parse_now_or_signed_literal(&mut self) -> Result<ParseNode, ParseError> {
        let value = if NOW_FUNCTIONS.iter().any(|f| self.check_word(f)) {
            self.parse_cur_timestamp_func()?
        } else {
            self.parse_signed_literal()?
        };
        Ok(self.node(RuleKind::NowOrSignedLiteral, vec![value]))
    }

    fn parse_cur_timestamp_func(&mut self) -> Result<ParseNode, ParseError> {
        if !NOW_FUNCTIONS.iter().any(|f| self.check_word(f)) {
            return Err(self.error_here("CURRENT_TIMESTAMP"));
        }
        let mut c = vec![self.advance()];
        if self.eat(&TokenKind::LeftParen, &mut c) {
            self.eat(&TokenKind::IntNum, &mut c);
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        Ok(self.node(RuleKind::CurTimestampFunc, c))
    }

    /// Consumes a word (identifier or keyword) by spelling.
    pub(super) fn expect_word(&mut self, word: &str) -> Result<ParseNode, ParseError> {
        if self.check_word(word) {
            Ok(self.advance())
        } else {
            Err(self.error_here(word))
        }
    }

    // ------------------------------------------------------------------
    // ALTER TABLE
    // ------------------------------------------------------------------

    pub(super) fn parse_alter_table_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Alter)?];
        self.eat_keyword(Keyword::External, &mut c);
        c.push(self.expect_keyword(Keyword::Table)?);
        c.push(self.parse_relation_factor()?);
        if !self.at_eof() && !self.check(&TokenKind::Semicolon) {
            let mut actions = vec![self.parse_alter_table_action()?];
            while self.eat(&TokenKind::Comma, &mut actions) {
                actions.push(self.parse_alter_table_action()?);
            }
            c.push(self.node(RuleKind::AlterTableActions, actions));
        }
        Ok(self.node(RuleKind::AlterTableStmt, c))
    }

    fn parse_alter_table_action(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if let Some(options) = self.parse_option_list(&TABLE_OPTIONS)? {
            c.push(options);
        } else if self.check_word("CONVERT") {
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::To)?);
            c.push(self.parse_charset_key()?);
            c.push(self.parse_name_or_string(RuleKind::CharsetName)?);
            if self.eat_keyword(Keyword::Collate, &mut c) {
                c.push(self.parse_name_or_string(RuleKind::CollationName)?);
            }
        } else if self.check_keyword(Keyword::Add) {
            if self.check_keyword_at(1, Keyword::Partition) {
                c.push(self.parse_alter_partition_option()?);
            } else {
                self.parse_alter_add(&mut c)?;
            }
        } else if self.check_keyword(Keyword::Drop) {
            if self.check_word_at(1, "PARTITION") || self.check_word_at(1, "SUBPARTITION") {
                c.push(self.parse_alter_partition_option()?);
            } else {
                self.parse_alter_drop(&mut c)?;
            }
        } else if self.check_keyword(Keyword::Alter) {
            self.parse_alter_alter(&mut c)?;
        } else if self.check_word("CHANGE") {
            c.push(self.advance());
            self.eat_keyword(Keyword::Column, &mut c);
            c.push(self.parse_name(RuleKind::ColumnName)?);
            c.push(self.parse_column_definition()?);
        } else if self.check_word("MODIFY") {
            c.push(self.advance());
            if self.oracle() && self.eat(&TokenKind::LeftParen, &mut c) {
                c.push(self.parse_column_definition()?);
                while self.eat(&TokenKind::Comma, &mut c) {
                    c.push(self.parse_column_definition()?);
                }
                c.push(self.expect(&TokenKind::RightParen)?);
            } else {
                self.eat_keyword(Keyword::Column, &mut c);
                c.push(self.parse_column_definition()?);
            }
        } else if self.check_keyword(Keyword::Rename) {
            self.parse_alter_rename(&mut c)?;
        } else if self.check_keyword(Keyword::Truncate)
            || self.check_word("REORGANIZE")
            || self.check_word("REMOVE")
            || self.check_keyword(Keyword::Partition)
        {
            c.push(self.parse_alter_partition_option()?);
        } else {
            return Err(self.error_here("ALTER TABLE action"));
        }
        Ok(self.node(RuleKind::AlterTableAction, c))
    }

    fn parse_alter_add(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        c.push(self.expect_keyword(Keyword::Add)?);
        let column = self.eat_keyword(Keyword::Column, c);
        if self.eat(&TokenKind::LeftParen, c) {
            c.push(self.parse_column_definition()?);
            while self.eat(&TokenKind::Comma, c) {
                c.push(self.parse_column_definition()?);
            }
            c.push(self.expect(&TokenKind::RightParen)?);
        } else if !column && self.starts_table_constraint() {
            c.push(self.parse_table_element_body()?);
        } else {
            c.push(self.parse_column_definition()?);
        }
        Ok(())
    }

    fn parse_alter_drop(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        c.push(self.expect_keyword(Keyword::Drop)?);
        match self.peek_keyword(0) {
            Some(Keyword::Index | Keyword::Key) => {
                c.push(self.advance());
                c.push(self.parse_index_name()?);
            }
            Some(Keyword::Primary) => {
                c.push(self.advance());
                c.push(self.expect_keyword(Keyword::Key)?);
            }
            Some(Keyword::Constraint | Keyword::Check) => {
                c.push(self.advance());
                c.push(self.parse_name(RuleKind::ConstraintName)?);
            }
            Some(Keyword::Foreign) => {
                c.push(self.advance());
                c.push(self.expect_keyword(Keyword::Key)?);
                c.push(self.parse_index_name()?);
            }
            Some(Keyword::Tablegroup) => c.push(self.advance()),
            _ if self.oracle() && self.check(&TokenKind::LeftParen) => {
                c.push(self.advance());
                c.push(self.parse_name(RuleKind::ColumnName)?);
                while self.eat(&TokenKind::Comma, c) {
                    c.push(self.parse_name(RuleKind::ColumnName)?);
                }
                c.push(self.expect(&TokenKind::RightParen)?);
            }
            _ => {
                self.eat_keyword(Keyword::Column, c);
                c.push(self.parse_name(RuleKind::ColumnName)?);
                if self.check_word("CASCADE") || self.check_word("RESTRICT") {
                    c.push(self.advance());
                }
            }
        }
        Ok(())
    }

    fn parse_alter_alter(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        c.push(self.expect_keyword(Keyword::Alter)?);
        match self.peek_keyword(0) {
            Some(Keyword::Index) => {
                c.push(self.advance());
                c.push(self.parse_index_name()?);
                if self.check_word("VISIBLE") || self.check_word("INVISIBLE") {
                    let visibility = self.advance();
                    c.push(self.node(RuleKind::VisibilityOption, vec![visibility]));
                } else {
                    return Err(self.error_here("VISIBLE or INVISIBLE"));
                }
            }
            Some(Keyword::Check | Keyword::Constraint) => {
                c.push(self.advance());
                c.push(self.parse_name(RuleKind::ConstraintName)?);
                c.push(self.parse_check_state()?);
            }
            _ => {
                self.eat_keyword(Keyword::Column, c);
                c.push(self.parse_name(RuleKind::ColumnName)?);
                let mut b = vec![];
                if self.eat_keyword(Keyword::Set, &mut b) {
                    b.push(self.expect_keyword(Keyword::Default)?);
                    b.push(self.parse_signed_literal()?);
                } else {
                    b.push(self.expect_keyword(Keyword::Drop)?);
                    b.push(self.expect_keyword(Keyword::Default)?);
                }
                c.push(self.node(RuleKind::AlterColumnBehavior, b));
            }
        }
        Ok(())
    }

    fn parse_alter_rename(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        c.push(self.expect_keyword(Keyword::Rename)?);
        if self.eat_keyword(Keyword::Column, c) {
            c.push(self.parse_name(RuleKind::ColumnName)?);
            c.push(self.expect_keyword(Keyword::To)?);
            c.push(self.parse_name(RuleKind::ColumnName)?);
        } else if self.eat_any_keyword(&[Keyword::Index, Keyword::Key], c) {
            c.push(self.parse_index_name()?);
            c.push(self.expect_keyword(Keyword::To)?);
            c.push(self.parse_index_name()?);
        } else {
            self.eat_any_keyword(&[Keyword::To, Keyword::As], c);
            c.push(self.parse_relation_factor()?);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // DROP / TRUNCATE / RENAME TABLE
    // ------------------------------------------------------------------

    pub(super) fn parse_drop_table_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?];
        self.eat_keyword(Keyword::Temporary, &mut c);
        let word = self.expect_any_keyword(&[Keyword::Table, Keyword::Tables])?;
        c.push(self.node(RuleKind::TableOrTables, vec![word]));
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_table_list()?);
        self.eat_cascade_or_restrict(&mut c);
        Ok(self.node(RuleKind::DropTableStmt, c))
    }

    fn eat_cascade_or_restrict(&mut self, c: &mut Vec<ParseNode>) {
        if self.check_word("CASCADE") || self.check_word("RESTRICT") {
            c.push(self.advance());
        }
    }

    pub(super) fn parse_truncate_table_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Truncate)?];
        self.eat_keyword(Keyword::Table, &mut c);
        c.push(self.parse_relation_factor()?);
        Ok(self.node(RuleKind::TruncateTableStmt, c))
    }

    pub(super) fn parse_rename_table_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Rename)?];
        c.push(self.expect_keyword(Keyword::Table)?);
        let mut actions = vec![];
        loop {
            let mut a = vec![self.parse_relation_factor()?];
            a.push(self.expect_keyword(Keyword::To)?);
            a.push(self.parse_relation_factor()?);
            actions.push(self.node(RuleKind::RenameTableAction, a));
            if !self.eat(&TokenKind::Comma, &mut actions) {
                break;
            }
        }
        c.push(self.node(RuleKind::RenameTableActions, actions));
        Ok(self.node(RuleKind::RenameTableStmt, c))
    }

    // ------------------------------------------------------------------
    // Indexes
    // ------------------------------------------------------------------

    pub(super) fn parse_create_index_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Create)?];
        self.eat_any_keyword(&[Keyword::Unique, Keyword::Fulltext, Keyword::Spatial], &mut c);
        c.push(self.expect_keyword(Keyword::Index)?);
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_index_name()?);
        if self.check_keyword(Keyword::Using) {
            c.push(self.parse_index_using_algorithm()?);
        }
        c.push(self.expect_keyword(Keyword::On)?);
        c.push(self.parse_relation_factor()?);
        if self.eat(&TokenKind::LeftParen, &mut c) {
            c.push(self.parse_sort_column_list()?);
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        if let Some(options) = self.parse_option_list(&INDEX_OPTIONS)? {
            c.push(options);
        }
        if self.check_keyword(Keyword::Partition) {
            c.push(self.parse_partition_option()?);
        }
        Ok(self.node(RuleKind::CreateIndexStmt, c))
    }

    pub(super) fn parse_drop_index_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?];
        c.push(self.expect_keyword(Keyword::Index)?);
        c.push(self.parse_index_name()?);
        c.push(self.expect_keyword(Keyword::On)?);
        c.push(self.parse_relation_factor()?);
        Ok(self.node(RuleKind::DropIndexStmt, c))
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub(super) fn parse_create_view_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Create)?];
        if self.eat_keyword(Keyword::Or, &mut c) {
            c.push(self.expect_keyword(Keyword::Replace)?);
        }
        loop {
            let mut a = vec![];
            if self.eat_keyword(Keyword::Algorithm, &mut a) {
                a.push(self.expect(&TokenKind::Eq)?);
                a.push(self.parse_name_terminal()?);
            } else if self.eat_keyword(Keyword::Definer, &mut a) {
                a.push(self.expect(&TokenKind::Eq)?);
                a.push(self.parse_user_with_host_name()?);
            } else if self.eat_keyword(Keyword::Sql, &mut a) {
                a.push(self.expect_word("SECURITY")?);
                if self.check_keyword(Keyword::Definer) || self.check_word("INVOKER") {
                    a.push(self.advance());
                } else {
                    return Err(self.error_here("DEFINER or INVOKER"));
                }
            } else {
                break;
            }
            c.push(self.node(RuleKind::ViewAttribute, a));
        }
        c.push(self.expect_keyword(Keyword::View)?);
        self.eat_if_exists(true, &mut c)?;
        let name = self.parse_relation_factor()?;
        c.push(self.node(RuleKind::ViewName, vec![name]));
        if self.eat(&TokenKind::LeftParen, &mut c) {
            c.push(self.parse_alias_name_list()?);
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        if self.eat_keyword(Keyword::As, &mut c) {
            let select = self.parse_select_stmt()?;
            c.push(self.node(RuleKind::ViewSelectStmt, vec![select]));
        }
        if self.check_keyword(Keyword::With) {
            let mut o = vec![self.advance()];
            if self.check_word("CASCADED") || self.check_word("LOCAL") {
                o.push(self.advance());
            }
            o.push(self.expect_keyword(Keyword::Check)?);
            o.push(self.expect_word("OPTION")?);
            c.push(self.node(RuleKind::ViewCheckOption, o));
        }
        Ok(self.node(RuleKind::CreateViewStmt, c))
    }

    pub(super) fn parse_drop_view_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?];
        c.push(self.expect_keyword(Keyword::View)?);
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_table_list()?);
        self.eat_cascade_or_restrict(&mut c);
        Ok(self.node(RuleKind::DropViewStmt, c))
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

    fn count(names: &[&str], rule: &str) -> usize {
        names.iter().filter(|n| **n == rule).count()
    }

    #[test]
    fn test_create_table_elements() {
        let names = rules(
            "CREATE TABLE IF NOT EXISTS db.t (
                id BIGINT NOT NULL AUTO_INCREMENT,
                name VARCHAR(64) DEFAULT 'x' COMMENT 'name',
                ts TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                PRIMARY KEY (id),
                UNIQUE KEY uk_name (name(10) DESC),
                KEY idx_ts (ts) LOCAL,
                CONSTRAINT fk FOREIGN KEY (id) REFERENCES p (pid) ON DELETE CASCADE,
                CHECK (id > 0) NOT ENFORCED
            ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4",
        );
        assert_eq!(count(&names, "column_definition"), 3);
        assert_eq!(count(&names, "out_of_line_constraint"), 3);
        assert_eq!(count(&names, "out_of_line_unique_index"), 1);
        assert_eq!(count(&names, "out_of_line_index"), 1);
        assert_eq!(count(&names, "table_option"), 2);
        assert!(names.contains(&"check_state"));
        assert!(names.contains(&"reference_option"));
        assert!(names.contains(&"cur_timestamp_func"));
    }

    #[test]
    fn test_create_table_like_and_as_select() {
        assert!(rules("CREATE TABLE t2 LIKE t1").contains(&"create_table_like_stmt"));
        assert!(rules("CREATE TABLE t2 (LIKE t1)").contains(&"create_table_like_stmt"));
        let names = rules("CREATE TABLE t2 IGNORE AS SELECT * FROM t1");
        assert!(names.contains(&"ignore_or_replace"));
        assert!(names.contains(&"select_stmt"));
    }

    #[test]
    fn test_generated_column() {
        let names = rules("CREATE TABLE t (a INT, b INT GENERATED ALWAYS AS (a + 1) STORED)");
        assert_eq!(count(&names, "column_definition"), 2);
    }

    #[test]
    fn test_alter_table_actions() {
        let names = rules(
            "ALTER TABLE t ADD COLUMN c INT AFTER b, DROP COLUMN d, MODIFY e BIGINT,
             CHANGE f g TEXT, RENAME COLUMN h TO i, ALTER COLUMN j SET DEFAULT 1,
             DROP INDEX k, ADD INDEX idx (c), ALTER INDEX idx INVISIBLE,
             RENAME TO t2, COMMENT = 'x'",
        );
        assert_eq!(count(&names, "alter_table_action"), 11);
        assert!(names.contains(&"alter_column_behavior"));
        assert!(names.contains(&"visibility_option"));
        assert!(names.contains(&"out_of_line_index"));
    }

    #[test]
    fn test_alter_table_partition_actions() {
        let names = rules("ALTER TABLE t DROP PARTITION p0, p1");
        assert!(names.contains(&"alter_partition_option"));
        let names = rules("ALTER TABLE t ADD PARTITION (PARTITION p3 VALUES LESS THAN (30))");
        assert!(names.contains(&"range_partition_element"));
        assert!(rules("ALTER TABLE t REMOVE PARTITIONING").contains(&"alter_partition_option"));
    }

    #[test]
    fn test_create_index_without_columns_still_parses() {
        let names = rules("CREATE UNIQUE INDEX idx ON t (a, b) GLOBAL");
        assert!(names.contains(&"sort_column_list"));
        assert!(names.contains(&"index_option"));
        assert!(!rules("CREATE INDEX idx ON t").contains(&"sort_column_list"));
    }

    #[test]
    fn test_views() {
        let names = rules(
            "CREATE OR REPLACE ALGORITHM = MERGE SQL SECURITY INVOKER VIEW v (a, b) \
             AS SELECT 1, 2 WITH CHECK OPTION",
        );
        assert_eq!(count(&names, "view_attribute"), 2);
        assert!(names.contains(&"view_check_option"));
        assert!(!rules("CREATE VIEW v").contains(&"view_select_stmt"));
        assert!(rules("DROP VIEW IF EXISTS v1, v2").contains(&"table_list"));
    }

    #[test]
    fn test_drop_truncate_rename() {
        assert!(rules("DROP TABLE IF EXISTS a, b CASCADE").contains(&"table_or_tables"));
        assert!(rules("TRUNCATE t").contains(&"truncate_table_stmt"));
        let names = rules("RENAME TABLE a TO b, c TO d");
        assert_eq!(count(&names, "rename_table_action"), 2);
    }
}
