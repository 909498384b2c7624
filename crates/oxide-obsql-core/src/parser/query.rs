//! Query grammar: `select_stmt` and its clauses.

use super::error::ParseError;
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

const QUERY_OPTIONS: &[Keyword] = &[
    Keyword::All,
    Keyword::Distinct,
    Keyword::Unique,
    Keyword::SqlCalcFoundRows,
    Keyword::SqlNoCache,
    Keyword::SqlCache,
    Keyword::HighPriority,
    Keyword::StraightJoin,
    Keyword::SqlSmallResult,
    Keyword::SqlBigResult,
    Keyword::SqlBufferResult,
];

const SET_OPERATORS: &[Keyword] = &[
    Keyword::Union,
    Keyword::Intersect,
    Keyword::Except,
    Keyword::Minus,
];

/// Words that open an Oracle clause after a table rather than alias it.
const ORACLE_CLAUSE_WORDS: &[&str] = &["START", "CONNECT", "OFFSET", "FETCH"];

impl Parser<'_> {
    /// Parses a `select_stmt`.
    pub(super) fn parse_select_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let query = self.parse_select_no_parens()?;
        Ok(self.node(RuleKind::SelectStmt, vec![query]))
    }

    /// Parses `( query )`, nesting for repeated parentheses.
    pub(super) fn parse_select_with_parens(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect(&TokenKind::LeftParen)?];
        if self.check(&TokenKind::LeftParen) && !self.has_set_operator_after_parens() {
            c.push(self.parse_select_with_parens()?);
        } else {
            c.push(self.parse_select_no_parens()?);
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::SelectWithParens, c))
    }

    /// Returns true when the parenthesised query at the cursor is followed by
    /// a set operator or a trailing clause, so it is the left operand of a
    /// larger query rather than a redundant wrapper.
    fn has_set_operator_after_parens(&self) -> bool {
        let mut depth = 0usize;
        let mut n = 0;
        loop {
            match self.peek_kind(n) {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        let next = self.peek_keyword(n + 1);
                        return next.is_some_and(|kw| {
                            SET_OPERATORS.contains(&kw)
                                || matches!(kw, Keyword::Order | Keyword::Limit)
                        });
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            n += 1;
        }
    }

    /// Parses a query with its trailing clauses into `select_no_parens`.
    pub(super) fn parse_select_no_parens(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_keyword(Keyword::With) {
            c.push(self.parse_with_clause()?);
        }
        c.push(self.parse_select_body()?);
        if self.check_keyword(Keyword::Order) {
            c.push(self.parse_order_by()?);
        }
        if self.check_keyword(Keyword::Limit) {
            c.push(self.parse_limit_clause()?);
        }
        if self.oracle() && (self.check_keyword(Keyword::Offset) || self.check_word("FETCH")) {
            c.push(self.parse_fetch_clause()?);
        }
        if self.check_keyword(Keyword::For) && self.check_keyword_at(1, Keyword::Update) {
            let mut f = vec![self.advance(), self.advance()];
            if self.check_word("WAIT") {
                let mut w = vec![self.advance()];
                if self.check(&TokenKind::IntNum) || self.check(&TokenKind::DecimalNum) {
                    w.push(self.advance());
                } else {
                    return Err(self.error_here("wait time"));
                }
                f.push(self.node(RuleKind::OptForUpdateWait, w));
            } else if self.check_word("NOWAIT") {
                let w = vec![self.advance()];
                f.push(self.node(RuleKind::OptForUpdateWait, w));
            } else if self.check_word("SKIP") {
                let w = vec![self.advance(), self.expect_keyword(Keyword::Locked)?];
                f.push(self.node(RuleKind::OptForUpdateWait, w));
            }
            c.push(self.node(RuleKind::ForUpdateClause, f));
        } else if self.check_keyword(Keyword::Lock) && self.check_keyword_at(1, Keyword::In) {
            let mut l = vec![self.advance(), self.advance()];
            l.push(self.expect_keyword(Keyword::Share)?);
            l.push(self.expect_keyword(Keyword::Mode)?);
            c.push(self.node(RuleKind::OptLockInShareMode, l));
        }
        if self.check_keyword(Keyword::Into) {
            c.push(self.parse_into_clause()?);
        }
        Ok(self.node(RuleKind::SelectNoParens, c))
    }

    /// Set operations are left-associative.
    fn parse_select_body(&mut self) -> Result<ParseNode, ParseError> {
        let mut lhs = self.parse_select_term()?;
        while self.check_any_keyword(SET_OPERATORS) {
            let mut s = vec![self.advance()];
            self.eat_any_keyword(&[Keyword::All, Keyword::Distinct], &mut s);
            let set_type = self.node(RuleKind::SetType, s);
            let rhs = self.parse_select_term()?;
            lhs = self.node(RuleKind::SelectClauseSet, vec![lhs, set_type, rhs]);
        }
        Ok(lhs)
    }

    fn parse_select_term(&mut self) -> Result<ParseNode, ParseError> {
        if self.check(&TokenKind::LeftParen) {
            self.parse_select_with_parens()
        } else {
            self.parse_simple_select()
        }
    }

    fn parse_simple_select(&mut self) -> Result<ParseNode, ParseError> {
        let mut h = vec![self.expect_keyword(Keyword::Select)?];
        self.eat(&TokenKind::Hint, &mut h);
        let mut c = vec![self.node(RuleKind::SelectWithOptHint, h)];

        let mut options = vec![];
        while self.check_any_keyword(QUERY_OPTIONS) {
            let option = self.advance();
            options.push(self.node(RuleKind::QueryExpressionOption, vec![option]));
        }
        if !options.is_empty() {
            c.push(self.node(RuleKind::QueryExpressionOptionList, options));
        }

        let mut items = vec![self.parse_projection()?];
        while self.eat(&TokenKind::Comma, &mut items) {
            items.push(self.parse_projection()?);
        }
        c.push(self.node(RuleKind::SelectExprList, items));

        if self.check_keyword(Keyword::Into) {
            c.push(self.parse_into_clause()?);
        }
        if self.eat_keyword(Keyword::From, &mut c) {
            let refs = self.parse_table_references()?;
            c.push(self.node(RuleKind::FromList, vec![refs]));
        }
        if self.eat_keyword(Keyword::Where, &mut c) {
            c.push(self.parse_expr()?);
        }
        if self.starts_hierarchical_clause() {
            c.push(self.parse_hierarchical_clause()?);
        }
        if self.check_keyword(Keyword::Group) {
            c.push(self.parse_groupby_clause()?);
        }
        if self.eat_keyword(Keyword::Having, &mut c) {
            c.push(self.parse_expr()?);
        }
        if self.check_keyword(Keyword::Window) {
            c.push(self.parse_named_windows()?);
        }
        Ok(self.node(RuleKind::SimpleSelect, c))
    }

    fn starts_hierarchical_clause(&self) -> bool {
        self.oracle()
            && ((self.check_word("START") && self.check_keyword_at(1, Keyword::With))
                || (self.check_word("CONNECT") && self.check_keyword_at(1, Keyword::By)))
    }

    /// Parses `START WITH cond` and `CONNECT BY [NOCYCLE] cond`, in either
    /// order.
    fn parse_hierarchical_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        let mut seen_start = false;
        let mut seen_connect = false;
        while self.starts_hierarchical_clause() {
            let start = self.check_word("START");
            if (start && seen_start) || (!start && seen_connect) {
                return Err(self.error_here("a single START WITH and CONNECT BY"));
            }
            c.push(self.advance());
            c.push(self.advance());
            if start {
                seen_start = true;
            } else {
                seen_connect = true;
                self.eat_word("NOCYCLE", &mut c);
            }
            c.push(self.parse_expr()?);
        }
        if !seen_connect {
            return Err(self.error_here("CONNECT BY"));
        }
        Ok(self.node(RuleKind::HierarchicalQueryClause, c))
    }

    /// Parses `[OFFSET n ROW|ROWS] [FETCH FIRST|NEXT [n [PERCENT]] ROW|ROWS
    /// ONLY|WITH TIES]`.
    fn parse_fetch_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat_keyword(Keyword::Offset, &mut c) {
            c.push(self.parse_expr()?);
            c.push(self.expect_any_keyword(&[Keyword::Row, Keyword::Rows])?);
        }
        if self.eat_word("FETCH", &mut c) {
            if !self.eat_keyword(Keyword::First, &mut c) && !self.eat_word("NEXT", &mut c) {
                return Err(self.error_here("FIRST or NEXT"));
            }
            if !self.check_any_keyword(&[Keyword::Row, Keyword::Rows]) {
                c.push(self.parse_expr()?);
                self.eat_word("PERCENT", &mut c);
            }
            c.push(self.expect_any_keyword(&[Keyword::Row, Keyword::Rows])?);
            if !self.eat_word("ONLY", &mut c) {
                c.push(self.expect_keyword(Keyword::With)?);
                if !self.eat_word("TIES", &mut c) {
                    return Err(self.error_here("TIES"));
                }
            }
        }
        Ok(self.node(RuleKind::FetchNextClause, c))
    }

    /// True when the name at the cursor can be an implicit table alias.
    fn check_implicit_alias(&self) -> bool {
        self.check_name()
            && !(self.oracle() && ORACLE_CLAUSE_WORDS.iter().any(|w| self.check_word(w)))
    }

    fn parse_projection(&mut self) -> Result<ParseNode, ParseError> {
        if self.check(&TokenKind::Star) {
            let star = self.advance();
            return Ok(self.node(RuleKind::Projection, vec![star]));
        }
        let mut c = vec![self.parse_expr()?];
        let explicit = self.eat_keyword(Keyword::As, &mut c);
        if self.check(&TokenKind::String) {
            c.push(self.parse_complex_string_literal()?);
        } else if self.check_name() {
            c.push(self.parse_name(RuleKind::ColumnLabel)?);
        } else if explicit {
            return Err(self.error_here("alias"));
        }
        Ok(self.node(RuleKind::Projection, c))
    }

    // ------------------------------------------------------------------
    // FROM
    // ------------------------------------------------------------------

    /// Parses `table_reference (, table_reference)*`.
    pub(super) fn parse_table_references(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_table_reference()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_table_reference()?);
        }
        Ok(self.node(RuleKind::TableReferences, c))
    }

    fn parse_table_reference(&mut self) -> Result<ParseNode, ParseError> {
        let factor = self.parse_table_factor()?;
        let mut lhs = self.node(RuleKind::TableReference, vec![factor]);
        while let Some(join_type) = self.parse_join_type()? {
            let mut c = vec![lhs, join_type, self.parse_table_factor()?];
            if self.check_keyword(Keyword::On) {
                let cond = vec![self.advance(), self.parse_expr()?];
                c.push(self.node(RuleKind::JoinCondition, cond));
            } else if self.check_keyword(Keyword::Using) {
                let mut cond = vec![self.advance()];
                self.parse_paren_column_list(&mut cond)?;
                c.push(self.node(RuleKind::JoinCondition, cond));
            }
            let joined = self.node(RuleKind::JoinedTable, c);
            lhs = self.node(RuleKind::TableReference, vec![joined]);
        }
        Ok(lhs)
    }

    fn parse_join_type(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let mut c = vec![];
        let kind = match self.current().as_keyword() {
            Some(Keyword::Join | Keyword::StraightJoin) => {
                c.push(self.advance());
                RuleKind::InnerJoinType
            }
            Some(Keyword::Inner | Keyword::Cross) => {
                c.push(self.advance());
                c.push(self.expect_keyword(Keyword::Join)?);
                RuleKind::InnerJoinType
            }
            Some(Keyword::Left | Keyword::Right | Keyword::Full) => {
                c.push(self.advance());
                self.eat_keyword(Keyword::Outer, &mut c);
                c.push(self.expect_keyword(Keyword::Join)?);
                RuleKind::OuterJoinType
            }
            Some(Keyword::Natural) => {
                c.push(self.advance());
                let sides = [Keyword::Left, Keyword::Right, Keyword::Full, Keyword::Inner];
                self.eat_any_keyword(&sides, &mut c);
                self.eat_keyword(Keyword::Outer, &mut c);
                c.push(self.expect_keyword(Keyword::Join)?);
                RuleKind::NaturalJoinType
            }
            _ => return Ok(None),
        };
        Ok(Some(self.node(kind, c)))
    }

    fn parse_table_factor(&mut self) -> Result<ParseNode, ParseError> {
        let c = if self.check_keyword(Keyword::Dual) {
            vec![self.advance()]
        } else if self.check(&TokenKind::LeftParen) && self.starts_query_at(1) {
            vec![self.parse_table_subquery()?]
        } else if self.check(&TokenKind::LeftParen) {
            let open = self.advance();
            let refs = self.parse_table_references()?;
            vec![open, refs, self.expect(&TokenKind::RightParen)?]
        } else {
            vec![self.parse_tbl_name()?]
        };
        Ok(self.node(RuleKind::TableFactor, c))
    }

    fn parse_table_subquery(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_select_with_parens()?];
        let explicit = self.eat_keyword(Keyword::As, &mut c);
        if (explicit && self.check_name()) || self.check_implicit_alias() {
            c.push(self.parse_name(RuleKind::RelationName)?);
            if self.eat(&TokenKind::LeftParen, &mut c) {
                c.push(self.parse_alias_name_list()?);
                c.push(self.expect(&TokenKind::RightParen)?);
            }
        } else if explicit {
            return Err(self.error_here("alias"));
        }
        Ok(self.node(RuleKind::TableSubquery, c))
    }

    /// Parses a table name with partition selection, alias and index hints.
    pub(super) fn parse_tbl_name(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_relation_factor()?];
        if self.check_keyword(Keyword::Partition) {
            c.push(self.parse_use_partition()?);
        }
        let explicit = self.eat_keyword(Keyword::As, &mut c);
        if (explicit && self.check_name()) || self.check_implicit_alias() {
            c.push(self.parse_name(RuleKind::RelationName)?);
        } else if explicit {
            return Err(self.error_here("alias"));
        }
        let mut hints = vec![];
        while self.check_any_keyword(&[Keyword::Use, Keyword::Force, Keyword::Ignore])
            && self.check_any_keyword_at(1, &[Keyword::Index, Keyword::Key])
        {
            hints.push(self.parse_index_hint()?);
        }
        if !hints.is_empty() {
            c.push(self.node(RuleKind::IndexHintList, hints));
        }
        Ok(self.node(RuleKind::TblName, c))
    }

    /// Parses `PARTITION (p0, p1)`.
    pub(super) fn parse_use_partition(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Partition)?];
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_name_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::UsePartition, c))
    }

    /// Parses `name (, name)*` into a `name_list` of `relation_name`s.
    pub(super) fn parse_name_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::RelationName)?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        Ok(self.node(RuleKind::NameList, c))
    }

    fn parse_index_hint(&mut self) -> Result<ParseNode, ParseError> {
        let hint_type = self.advance();
        let key = self.advance();
        let mut c = vec![
            self.node(RuleKind::IndexHintType, vec![hint_type]),
            self.node(RuleKind::KeyOrIndex, vec![key]),
        ];
        if self.check_keyword(Keyword::For) {
            let mut s = vec![self.advance()];
            if self.eat_any_keyword(&[Keyword::Order, Keyword::Group], &mut s) {
                s.push(self.expect_keyword(Keyword::By)?);
            } else {
                s.push(self.expect_keyword(Keyword::Join)?);
            }
            c.push(self.node(RuleKind::IndexHintScope, s));
        }
        c.push(self.expect(&TokenKind::LeftParen)?);
        if !self.check(&TokenKind::RightParen) {
            let mut list = vec![self.parse_index_element()?];
            while self.eat(&TokenKind::Comma, &mut list) {
                list.push(self.parse_index_element()?);
            }
            c.push(self.node(RuleKind::IndexList, list));
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::IndexHintDefinition, c))
    }

    fn parse_index_element(&mut self) -> Result<ParseNode, ParseError> {
        let c = if self.check_keyword(Keyword::Primary) {
            vec![self.advance()]
        } else {
            vec![self.parse_name(RuleKind::RelationName)?]
        };
        Ok(self.node(RuleKind::IndexElement, c))
    }

    /// Parses `name (, name)*` into an `alias_name_list`.
    pub(super) fn parse_alias_name_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::ColumnAliasName)?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_name(RuleKind::ColumnAliasName)?);
        }
        Ok(self.node(RuleKind::AliasNameList, c))
    }

    // ------------------------------------------------------------------
    // Clauses
    // ------------------------------------------------------------------

    fn parse_groupby_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.advance(), self.expect_keyword(Keyword::By)?];
        let mut keys = vec![self.parse_sort_key(RuleKind::SortKeyForGroupBy)?];
        while self.eat(&TokenKind::Comma, &mut keys) {
            keys.push(self.parse_sort_key(RuleKind::SortKeyForGroupBy)?);
        }
        c.push(self.node(RuleKind::SortListForGroupBy, keys));
        if self.check_keyword(Keyword::With) && self.check_keyword_at(1, Keyword::Rollup) {
            c.push(self.advance());
            c.push(self.advance());
        }
        Ok(self.node(RuleKind::GroupbyClause, c))
    }

    /// Parses `ORDER BY sort_list`.
    pub(super) fn parse_order_by(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Order)?, self.expect_keyword(Keyword::By)?];
        let mut keys = vec![self.parse_sort_key(RuleKind::SortKey)?];
        while self.eat(&TokenKind::Comma, &mut keys) {
            keys.push(self.parse_sort_key(RuleKind::SortKey)?);
        }
        c.push(self.node(RuleKind::SortList, keys));
        Ok(self.node(RuleKind::OrderBy, c))
    }

    fn parse_sort_key(&mut self, kind: RuleKind) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_expr()?];
        self.eat_any_keyword(&[Keyword::Asc, Keyword::Desc], &mut c);
        Ok(self.node(kind, c))
    }

    /// Parses `LIMIT n`, `LIMIT m, n` or `LIMIT n OFFSET m`.
    pub(super) fn parse_limit_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Limit)?, self.parse_expr()?];
        if self.eat(&TokenKind::Comma, &mut c) || self.eat_keyword(Keyword::Offset, &mut c) {
            c.push(self.parse_expr()?);
        }
        Ok(self.node(RuleKind::LimitClause, c))
    }

    fn parse_into_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Into)?];
        let mut o = vec![];
        if self.check_word("OUTFILE") {
            o.push(self.advance());
            o.push(self.expect(&TokenKind::String)?);
            if self.check_any_keyword(&[Keyword::Fields, Keyword::Columns]) {
                let mut f = vec![self.advance()];
                let field_words = [
                    Keyword::Terminated,
                    Keyword::Optionally,
                    Keyword::Enclosed,
                    Keyword::Escaped,
                ];
                while self.check_any_keyword(&field_words) {
                    f.push(self.parse_file_term(RuleKind::FieldTerm)?);
                }
                o.push(self.node(RuleKind::FieldOpt, f));
            }
            if self.check_keyword(Keyword::Lines) {
                let mut l = vec![self.advance()];
                while self.check_any_keyword(&[Keyword::Starting, Keyword::Terminated]) {
                    l.push(self.parse_file_term(RuleKind::LineTerm)?);
                }
                o.push(self.node(RuleKind::LineOpt, l));
            }
        } else if self.check_word("DUMPFILE") {
            o.push(self.advance());
            o.push(self.expect(&TokenKind::String)?);
        } else {
            let mut vars = vec![self.parse_into_var()?];
            while self.eat(&TokenKind::Comma, &mut vars) {
                vars.push(self.parse_into_var()?);
            }
            o.push(self.node(RuleKind::IntoVarList, vars));
        }
        c.push(self.node(RuleKind::IntoOpt, o));
        Ok(self.node(RuleKind::IntoClause, c))
    }

    fn parse_file_term(&mut self, kind: RuleKind) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        self.eat_keyword(Keyword::Optionally, &mut c);
        c.push(self.advance());
        c.push(self.expect_keyword(Keyword::By)?);
        c.push(self.parse_complex_string_literal()?);
        Ok(self.node(kind, c))
    }

    fn parse_into_var(&mut self) -> Result<ParseNode, ParseError> {
        let c = if self.check(&TokenKind::UserVariable) {
            vec![self.advance()]
        } else {
            vec![self.parse_name(RuleKind::ColumnName)?]
        };
        Ok(self.node(RuleKind::IntoVar, c))
    }

    fn parse_with_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::With)?];
        self.eat_keyword(Keyword::Recursive, &mut c);
        let mut list = vec![self.parse_common_table_expr()?];
        while self.eat(&TokenKind::Comma, &mut list) {
            list.push(self.parse_common_table_expr()?);
        }
        c.push(self.node(RuleKind::WithList, list));
        Ok(self.node(RuleKind::WithClause, c))
    }

    fn parse_common_table_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::RelationName)?];
        if self.eat(&TokenKind::LeftParen, &mut c) {
            c.push(self.parse_alias_name_list()?);
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        c.push(self.expect_keyword(Keyword::As)?);
        c.push(self.parse_select_with_parens()?);
        Ok(self.node(RuleKind::CommonTableExpr, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::OracleDialect;

    fn rules(sql: &str) -> Vec<&'static str> {
        rules_of(&Parser::new(sql).parse_statement().unwrap())
    }

    fn oracle_rules(sql: &str) -> Vec<&'static str> {
        rules_of(&Parser::with_dialect(sql, &OracleDialect).parse_statement().unwrap())
    }

    fn rules_of(node: &ParseNode) -> Vec<&'static str> {
        let mut out = Vec::new();
        node.visit(&mut |n| {
            if let Some(kind) = n.kind() {
                out.push(kind.name());
            }
        });
        out
    }

    #[test]
    fn test_full_select() {
        let names = rules(
            "SELECT /*+ parallel(4) */ DISTINCT a AS x, b y, t.* FROM t1 AS t \
             WHERE a > 1 GROUP BY a WITH ROLLUP HAVING COUNT(*) > 1 \
             ORDER BY a DESC LIMIT 10 OFFSET 5 FOR UPDATE NOWAIT",
        );
        for name in [
            "select_with_opt_hint",
            "query_expression_option_list",
            "projection",
            "column_label",
            "from_list",
            "tbl_name",
            "groupby_clause",
            "order_by",
            "limit_clause",
            "for_update_clause",
            "opt_for_update_wait",
        ] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_set_operations_nest_left() {
        let node = Parser::new("SELECT 1 UNION ALL SELECT 2 EXCEPT SELECT 3")
            .parse_statement()
            .unwrap();
        let mut sets = 0;
        node.visit(&mut |n| {
            if n.kind() == Some(RuleKind::SelectClauseSet) {
                sets += 1;
            }
        });
        assert_eq!(sets, 2);
    }

    #[test]
    fn test_joins() {
        let names = rules(
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT OUTER JOIN c USING (id) NATURAL JOIN d",
        );
        assert_eq!(names.iter().filter(|n| **n == "joined_table").count(), 3);
        assert!(names.contains(&"inner_join_type"));
        assert!(names.contains(&"outer_join_type"));
        assert!(names.contains(&"natural_join_type"));
        assert_eq!(names.iter().filter(|n| **n == "join_condition").count(), 2);
    }

    #[test]
    fn test_derived_table_and_hints() {
        let names = rules(
            "SELECT * FROM (SELECT 1) AS d (x), t PARTITION (p0) USE INDEX FOR JOIN (i1, PRIMARY)",
        );
        assert!(names.contains(&"table_subquery"));
        assert!(names.contains(&"alias_name_list"));
        assert!(names.contains(&"use_partition"));
        assert!(names.contains(&"index_hint_scope"));
        assert!(names.contains(&"index_element"));
    }

    #[test]
    fn test_with_clause() {
        let names = rules("WITH RECURSIVE r (n) AS (SELECT 1) SELECT n FROM r");
        assert!(names.contains(&"with_clause"));
        assert!(names.contains(&"common_table_expr"));
    }

    #[test]
    fn test_into_outfile() {
        let names = rules(
            "SELECT a FROM t INTO OUTFILE '/tmp/x' FIELDS TERMINATED BY ',' \
             OPTIONALLY ENCLOSED BY '\"' LINES TERMINATED BY '\\n'",
        );
        assert_eq!(names.iter().filter(|n| **n == "field_term").count(), 2);
        assert!(names.contains(&"line_term"));
    }

    #[test]
    fn test_parenthesized_union_operand() {
        let names = rules("(SELECT 1) UNION (SELECT 2) ORDER BY 1");
        assert!(names.contains(&"select_clause_set"));
        assert!(names.contains(&"order_by"));
    }

    #[test]
    fn test_oracle_fetch_clause() {
        let names =
            oracle_rules("SELECT a FROM t ORDER BY a OFFSET 2 ROWS FETCH FIRST 5 ROWS ONLY");
        assert_eq!(names.iter().filter(|n| **n == "fetch_next_clause").count(), 1);
        assert!(!names.contains(&"limit_clause"));

        let names = oracle_rules("SELECT a FROM t FETCH NEXT ROW WITH TIES");
        assert!(names.contains(&"fetch_next_clause"));
    }

    #[test]
    fn test_oracle_fetch_clause_needs_an_ending() {
        let err = Parser::with_dialect("SELECT a FROM t FETCH FIRST 5 ROWS", &OracleDialect)
            .parse_statement();
        assert!(err.is_err());
    }

    #[test]
    fn test_hierarchical_clause_keeps_table_alias_free() {
        let names = oracle_rules("SELECT a FROM t START WITH a = 1 CONNECT BY PRIOR a = b");
        assert!(names.contains(&"hierarchical_query_clause"));
        assert_eq!(names.iter().filter(|n| **n == "relation_name").count(), 1);
    }

    #[test]
    fn test_repeated_connect_by_is_rejected() {
        let sql = "SELECT a FROM t CONNECT BY a = b CONNECT BY a = c";
        assert!(Parser::with_dialect(sql, &OracleDialect).parse_statement().is_err());
    }

    #[test]
    fn test_oracle_clause_words_are_aliases_in_mysql_mode() {
        let names = rules("SELECT a FROM t start");
        assert!(!names.contains(&"hierarchical_query_clause"));
        assert_eq!(names.iter().filter(|n| **n == "relation_name").count(), 2);
    }
}
