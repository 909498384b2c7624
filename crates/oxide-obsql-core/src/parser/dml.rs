//! INSERT, REPLACE, UPDATE and DELETE.

use super::error::ParseError;
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    pub(super) fn parse_insert_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let head_kind = if self.check_keyword(Keyword::Replace) {
            RuleKind::ReplaceWithOptHint
        } else {
            RuleKind::InsertWithOptHint
        };
        let mut h = vec![self.advance()];
        self.eat(&TokenKind::Hint, &mut h);
        let mut c = vec![self.node(head_kind, h)];
        self.eat_any_keyword(
            &[Keyword::LowPriority, Keyword::Delayed, Keyword::HighPriority],
            &mut c,
        );
        self.eat_keyword(Keyword::Ignore, &mut c);
        self.eat_keyword(Keyword::Into, &mut c);
        c.push(self.parse_single_table_insert()?);
        if self.check_keyword(Keyword::On) {
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::Duplicate)?);
            c.push(self.expect_keyword(Keyword::Key)?);
            c.push(self.expect_keyword(Keyword::Update)?);
            c.push(self.parse_update_asgn_list()?);
        }
        Ok(self.node(RuleKind::InsertStmt, c))
    }

    fn parse_single_table_insert(&mut self) -> Result<ParseNode, ParseError> {
        let mut t = vec![self.parse_relation_factor()?];
        if self.check_keyword(Keyword::Partition) {
            t.push(self.parse_use_partition()?);
        }
        let mut c = vec![self.node(RuleKind::DmlTableName, t)];
        if self.check(&TokenKind::LeftParen) && !self.starts_query_at(1) {
            c.push(self.advance());
            if !self.check(&TokenKind::RightParen) {
                c.push(self.parse_column_list()?);
            }
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        if self.eat_keyword(Keyword::Set, &mut c) {
            c.push(self.parse_update_asgn_list()?);
        } else if self.check_any_keyword(&[Keyword::Value, Keyword::Values]) {
            let keyword = self.advance();
            let mut v = vec![self.node(RuleKind::ValueOrValues, vec![keyword])];
            let mut rows = vec![];
            loop {
                rows.push(self.expect(&TokenKind::LeftParen)?);
                let mut vals = vec![];
                if !self.check(&TokenKind::RightParen) {
                    vals.push(self.parse_expr_or_default()?);
                    while self.eat(&TokenKind::Comma, &mut vals) {
                        vals.push(self.parse_expr_or_default()?);
                    }
                }
                rows.push(self.node(RuleKind::InsertVals, vals));
                rows.push(self.expect(&TokenKind::RightParen)?);
                if !self.eat(&TokenKind::Comma, &mut rows) {
                    break;
                }
            }
            v.push(self.node(RuleKind::InsertValsList, rows));
            c.push(self.node(RuleKind::ValuesClause, v));
        } else if self.check_keyword(Keyword::Select)
            || self.check_keyword(Keyword::With)
            || self.check(&TokenKind::LeftParen)
        {
            let select = self.parse_select_stmt()?;
            c.push(self.node(RuleKind::ValuesClause, vec![select]));
        } else {
            return Err(self.error_here("VALUES, SET or SELECT"));
        }
        Ok(self.node(RuleKind::SingleTableInsert, c))
    }

    /// Parses `expr` or `DEFAULT`.
    pub(super) fn parse_expr_or_default(&mut self) -> Result<ParseNode, ParseError> {
        let c = if self.check_keyword(Keyword::Default) {
            vec![self.advance()]
        } else {
            vec![self.parse_expr()?]
        };
        Ok(self.node(RuleKind::ExprOrDefault, c))
    }

    /// Parses `col = value (, col = value)*`.
    pub(super) fn parse_update_asgn_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        loop {
            let mut a = vec![self.parse_column_ref()?];
            a.push(self.expect(&TokenKind::Eq)?);
            a.push(self.parse_expr_or_default()?);
            c.push(self.node(RuleKind::UpdateAsgnFactor, a));
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        Ok(self.node(RuleKind::UpdateAsgnList, c))
    }

    pub(super) fn parse_update_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut h = vec![self.expect_keyword(Keyword::Update)?];
        self.eat(&TokenKind::Hint, &mut h);
        let mut c = vec![self.node(RuleKind::UpdateWithOptHint, h)];
        self.eat_keyword(Keyword::LowPriority, &mut c);
        self.eat_keyword(Keyword::Ignore, &mut c);
        c.push(self.parse_table_references()?);
        c.push(self.expect_keyword(Keyword::Set)?);
        c.push(self.parse_update_asgn_list()?);
        if self.eat_keyword(Keyword::Where, &mut c) {
            c.push(self.parse_expr()?);
        }
        if self.check_keyword(Keyword::Order) {
            c.push(self.parse_order_by()?);
        }
        if self.check_keyword(Keyword::Limit) {
            c.push(self.parse_limit_clause()?);
        }
        Ok(self.node(RuleKind::UpdateStmt, c))
    }

    pub(super) fn parse_delete_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut h = vec![self.expect_keyword(Keyword::Delete)?];
        self.eat(&TokenKind::Hint, &mut h);
        let mut c = vec![self.node(RuleKind::DeleteWithOptHint, h)];
        let mut options = vec![];
        while self.check_any_keyword(&[Keyword::LowPriority, Keyword::Quick, Keyword::Ignore]) {
            let option = self.advance();
            options.push(self.node(RuleKind::DeleteOption, vec![option]));
        }
        if !options.is_empty() {
            c.push(self.node(RuleKind::DeleteOptionList, options));
        }

        if self.check_keyword(Keyword::From) && !self.delete_uses_using() {
            c.push(self.advance());
            c.push(self.parse_tbl_name()?);
            if self.eat_keyword(Keyword::Where, &mut c) {
                c.push(self.parse_expr()?);
            }
            if self.check_keyword(Keyword::Order) {
                c.push(self.parse_order_by()?);
            }
            if self.check_keyword(Keyword::Limit) {
                c.push(self.parse_limit_clause()?);
            }
            return Ok(self.node(RuleKind::DeleteStmt, c));
        }

        let mut m = vec![];
        if self.eat_keyword(Keyword::From, &mut m) {
            m.push(self.parse_relation_with_star_list()?);
            m.push(self.expect_keyword(Keyword::Using)?);
        } else {
            m.push(self.parse_relation_with_star_list()?);
            m.push(self.expect_keyword(Keyword::From)?);
        }
        m.push(self.parse_table_references()?);
        c.push(self.node(RuleKind::MultiDeleteTable, m));
        if self.eat_keyword(Keyword::Where, &mut c) {
            c.push(self.parse_expr()?);
        }
        Ok(self.node(RuleKind::DeleteStmt, c))
    }

    /// Looks past `FROM t1[.*], t2...` for `USING`.
    fn delete_uses_using(&self) -> bool {
        let mut n = 1;
        loop {
            match self.peek_kind(n) {
                TokenKind::Dot | TokenKind::Star | TokenKind::Comma => n += 1,
                kind if kind.is_name() => n += 1,
                TokenKind::Keyword(Keyword::Using) => return true,
                _ => return false,
            }
        }
    }

    fn parse_relation_with_star_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        loop {
            let mut r = vec![self.parse_relation_factor()?];
            if self.check(&TokenKind::Dot) && self.peek_kind(1) == &TokenKind::Star {
                r.push(self.advance());
                r.push(self.advance());
            }
            c.push(self.node(RuleKind::RelationFactorWithStar, r));
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        Ok(self.node(RuleKind::RelationWithStarList, c))
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

    #[test]
    fn test_insert_values() {
        let names = rules(
            "INSERT IGNORE INTO t (a, b) VALUES (1, DEFAULT), () ON DUPLICATE KEY UPDATE a = 2",
        );
        assert_eq!(names.iter().filter(|n| **n == "insert_vals").count(), 2);
        assert!(names.contains(&"update_asgn_factor"));
        assert!(names.contains(&"column_list"));
    }

    #[test]
    fn test_insert_select_and_set() {
        assert!(rules("INSERT INTO t SELECT * FROM u").contains(&"select_stmt"));
        assert!(rules("REPLACE t SET a = 1").contains(&"replace_with_opt_hint"));
        assert!(rules("INSERT INTO t (SELECT 1)").contains(&"values_clause"));
    }

    #[test]
    fn test_update() {
        let names = rules("UPDATE t1, t2 SET t1.a = t2.b WHERE t1.id = t2.id");
        assert!(names.contains(&"table_references"));
        assert!(names.contains(&"update_asgn_list"));
    }

    #[test]
    fn test_delete_forms() {
        let single = rules("DELETE FROM t WHERE a = 1 ORDER BY a LIMIT 1");
        assert!(!single.contains(&"multi_delete_table"));
        let multi = rules("DELETE t1.*, t2 FROM t1 JOIN t2 ON t1.a = t2.a");
        assert!(multi.contains(&"multi_delete_table"));
        assert!(rules("DELETE FROM t1, t2 USING t1 JOIN t2").contains(&"relation_with_star_list"));
    }
}
