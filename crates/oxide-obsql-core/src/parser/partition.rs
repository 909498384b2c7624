//! Partitioning: `partition_option`, partition and subpartition element
//! lists, and the partition actions of ALTER TABLE.
//!
//! The list production is chosen by the partitioning method, while each
//! element production is chosen by what the element actually contains
//! (`VALUES LESS THAN`, `VALUES IN` or neither), so a mismatch between
//! the two survives into the tree.

use super::error::ParseError;
use super::option::PARTITION_ATTRIBUTES;
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Hash,
    Key,
    Range,
    List,
}

impl Method {
    const fn option_kind(self) -> RuleKind {
        match self {
            Self::Hash => RuleKind::HashPartitionOption,
            Self::Key => RuleKind::KeyPartitionOption,
            Self::Range => RuleKind::RangePartitionOption,
            Self::List => RuleKind::ListPartitionOption,
        }
    }

    /// The (`opt_*`, inner list) productions for this method's partitions.
    const fn list_kinds(self) -> (RuleKind, RuleKind) {
        match self {
            Self::Hash | Self::Key => (RuleKind::OptHashPartitionList, RuleKind::HashPartitionList),
            Self::Range => (RuleKind::OptRangePartitionList, RuleKind::RangePartitionList),
            Self::List => (RuleKind::OptListPartitionList, RuleKind::ListPartitionList),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    None,
    LessThan,
    In,
}

const fn element_kind(bound: Bound, sub: bool) -> RuleKind {
    match (bound, sub) {
        (Bound::None, false) => RuleKind::HashPartitionElement,
        (Bound::LessThan, false) => RuleKind::RangePartitionElement,
        (Bound::In, false) => RuleKind::ListPartitionElement,
        (Bound::None, true) => RuleKind::HashSubpartitionElement,
        (Bound::LessThan, true) => RuleKind::RangeSubpartitionElement,
        (Bound::In, true) => RuleKind::ListSubpartitionElement,
    }
}

impl Parser<'_> {
    /// Parses `PARTITION BY method (...) [SUBPARTITION BY ...]
    /// [PARTITIONS n] [(partition, ...)]`.
    pub(super) fn parse_partition_option(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Partition)?,
            self.expect_keyword(Keyword::By)?,
        ];
        let method = self.parse_partition_method(&mut c)?;
        let mut seen_sub = false;
        let mut seen_num = false;
        loop {
            if !seen_sub && self.check_word("SUBPARTITION") && self.check_word_at(1, "BY") {
                c.push(self.parse_subpartition_option()?);
                seen_sub = true;
            } else if !seen_num && self.check_word("PARTITIONS") {
                let mut n = vec![self.advance()];
                n.push(self.expect(&TokenKind::IntNum)?);
                c.push(self.node(RuleKind::PartitionNum, n));
                seen_num = true;
            } else {
                break;
            }
        }
        if self.check(&TokenKind::LeftParen) && self.check_word_at(1, "PARTITION") {
            let (opt, list) = method.list_kinds();
            let mut l = vec![self.advance()];
            l.push(self.parse_element_list(list, false)?);
            l.push(self.expect(&TokenKind::RightParen)?);
            c.push(self.node(opt, l));
        }
        let option = self.node(method.option_kind(), c);
        Ok(self.node(RuleKind::PartitionOption, vec![option]))
    }

    /// Parses `HASH ( expr )`, `KEY ( [columns] )`, `RANGE [COLUMNS] (...)`
    /// or `LIST [COLUMNS] (...)` into `c`.
    fn parse_partition_method(&mut self, c: &mut Vec<ParseNode>) -> Result<Method, ParseError> {
        let method = if self.check_word("HASH") {
            Method::Hash
        } else if self.check_keyword(Keyword::Key) {
            Method::Key
        } else if self.check_word("RANGE") {
            Method::Range
        } else if self.check_word("LIST") {
            Method::List
        } else {
            return Err(self.error_here("HASH, KEY, RANGE or LIST"));
        };
        c.push(self.advance());
        let columns = matches!(method, Method::Range | Method::List) && self.check_word("COLUMNS");
        if columns {
            c.push(self.advance());
        }
        c.push(self.expect(&TokenKind::LeftParen)?);
        if method == Method::Key || columns {
            if !self.check(&TokenKind::RightParen) {
                c.push(self.parse_column_list()?);
            }
        } else {
            c.push(self.parse_expr()?);
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(method)
    }

    fn parse_subpartition_option(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.advance(), self.expect_keyword(Keyword::By)?];
        self.parse_partition_method(&mut c)?;
        let kind = if self.check_word("SUBPARTITION") && self.check_word_at(1, "TEMPLATE") {
            c.push(self.advance());
            c.push(self.advance());
            c.push(self.parse_subpartition_list()?);
            RuleKind::SubpartitionTemplateOption
        } else {
            if self.check_word("SUBPARTITIONS") {
                c.push(self.advance());
                c.push(self.expect(&TokenKind::IntNum)?);
            }
            RuleKind::SubpartitionIndividualOption
        };
        let option = self.node(kind, c);
        Ok(self.node(RuleKind::SubpartitionOption, vec![option]))
    }

    /// Parses `( SUBPARTITION ..., ... )`, choosing the list production from
    /// the first element.
    fn parse_subpartition_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect(&TokenKind::LeftParen)?];
        let first = self.subpartition_bound();
        let (opt, list) = match first {
            Bound::None => (RuleKind::OptHashSubpartitionList, RuleKind::HashSubpartitionList),
            Bound::LessThan => {
                (RuleKind::OptRangeSubpartitionList, RuleKind::RangeSubpartitionList)
            }
            Bound::In => (RuleKind::OptListSubpartitionList, RuleKind::ListSubpartitionList),
        };
        c.push(self.parse_element_list(list, true)?);
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(opt, c))
    }

    /// Looks at `SUBPARTITION name VALUES ...` under the cursor.
    fn subpartition_bound(&self) -> Bound {
        if !self.check_keyword_at(2, Keyword::Values) {
            Bound::None
        } else if self.check_keyword_at(3, Keyword::In) {
            Bound::In
        } else {
            Bound::LessThan
        }
    }

    fn parse_element_list(&mut self, list: RuleKind, sub: bool) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_partition_element(sub)?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_partition_element(sub)?);
        }
        Ok(self.node(list, c))
    }

    fn parse_partition_element(&mut self, sub: bool) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_word(if sub { "SUBPARTITION" } else { "PARTITION" })?];
        c.push(self.parse_relation_factor()?);
        let bound = if self.check_keyword(Keyword::Values) && self.check_word_at(1, "LESS") {
            c.push(self.advance());
            c.push(self.advance());
            c.push(self.expect_word("THAN")?);
            c.push(self.parse_range_partition_expr()?);
            Bound::LessThan
        } else if self.check_keyword(Keyword::Values) && self.check_keyword_at(1, Keyword::In) {
            c.push(self.advance());
            c.push(self.advance());
            c.push(self.parse_list_partition_expr()?);
            Bound::In
        } else {
            Bound::None
        };
        while let Some(attribute) = self.parse_option(&PARTITION_ATTRIBUTES)? {
            c.push(attribute);
        }
        if !sub && self.check(&TokenKind::LeftParen) && self.check_word_at(1, "SUBPARTITION") {
            c.push(self.parse_subpartition_list()?);
        }
        Ok(self.node(element_kind(bound, sub), c))
    }

    fn parse_range_partition_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_word("MAXVALUE") {
            c.push(self.advance());
            return Ok(self.node(RuleKind::RangePartitionExpr, c));
        }
        c.push(self.expect(&TokenKind::LeftParen)?);
        let mut values = vec![self.parse_range_expr()?];
        while self.eat(&TokenKind::Comma, &mut values) {
            values.push(self.parse_range_expr()?);
        }
        c.push(self.node(RuleKind::RangeExprList, values));
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::RangePartitionExpr, c))
    }

    fn parse_range_expr(&mut self) -> Result<ParseNode, ParseError> {
        let value = if self.check_word("MAXVALUE") {
            self.advance()
        } else {
            self.parse_expr()?
        };
        Ok(self.node(RuleKind::RangeExpr, vec![value]))
    }

    fn parse_list_partition_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect(&TokenKind::LeftParen)?];
        if self.check_keyword(Keyword::Default) {
            c.push(self.advance());
        } else {
            let mut values = vec![self.parse_expr()?];
            while self.eat(&TokenKind::Comma, &mut values) {
                values.push(self.parse_expr()?);
            }
            c.push(self.node(RuleKind::ListExpr, values));
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::ListPartitionExpr, c))
    }

    // ------------------------------------------------------------------
    // ALTER TABLE partition actions
    // ------------------------------------------------------------------

    pub(super) fn parse_alter_partition_option(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_keyword(Keyword::Add) {
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::Partition)?);
            c.push(self.parse_partition_range_or_list()?);
        } else if self.check_keyword(Keyword::Drop) || self.check_keyword(Keyword::Truncate) {
            c.push(self.advance());
            if self.check_keyword(Keyword::Partition) || self.check_word("SUBPARTITION") {
                c.push(self.advance());
            } else {
                return Err(self.error_here("PARTITION or SUBPARTITION"));
            }
            c.push(self.parse_drop_partition_name_list()?);
        } else if self.check_word("REORGANIZE") {
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::Partition)?);
            c.push(self.parse_name_list()?);
            c.push(self.expect_keyword(Keyword::Into)?);
            c.push(self.parse_partition_range_or_list()?);
        } else if self.check_word("REMOVE") {
            c.push(self.advance());
            c.push(self.expect_word("PARTITIONING")?);
        } else {
            c.push(self.parse_partition_option()?);
        }
        Ok(self.node(RuleKind::AlterPartitionOption, c))
    }

    /// Parses `( PARTITION ..., ... )` for ADD and REORGANIZE.
    fn parse_partition_range_or_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect(&TokenKind::LeftParen)?];
        c.push(self.parse_partition_element(false)?);
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_partition_element(false)?);
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::OptPartitionRangeOrList, c))
    }

    /// Parses partition names, leaving a `,` that starts the next ALTER
    /// action in place.
    fn parse_drop_partition_name_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::RelationName)?];
        while self.check(&TokenKind::Comma)
            && self.peek_kind(1).is_name()
            && matches!(
                self.peek_kind(2),
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::Eof
            )
        {
            c.push(self.advance());
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        Ok(self.node(RuleKind::DropPartitionNameList, c))
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
    fn test_hash_partitions() {
        let names = rules("CREATE TABLE t (a INT) PARTITION BY HASH(a) PARTITIONS 4");
        assert!(names.contains(&"hash_partition_option"));
        assert!(names.contains(&"partition_num"));
        assert!(!names.contains(&"opt_hash_partition_list"));
    }

    #[test]
    fn test_range_columns_elements() {
        let names = rules(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE COLUMNS(a, b) (
                PARTITION p0 VALUES LESS THAN (10, 20) COMMENT 'first',
                PARTITION p1 VALUES LESS THAN (MAXVALUE, MAXVALUE)
            )",
        );
        assert_eq!(names.iter().filter(|n| **n == "range_partition_element").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "range_expr").count(), 4);
        assert!(names.contains(&"partition_attributes_option"));
        assert!(names.contains(&"column_list"));
    }

    #[test]
    fn test_element_kind_follows_content() {
        let names =
            rules("CREATE TABLE t (a INT) PARTITION BY RANGE(a) (PARTITION p0 VALUES IN (1, 2))");
        assert!(names.contains(&"opt_range_partition_list"));
        assert!(names.contains(&"list_partition_element"));
    }

    #[test]
    fn test_list_default() {
        let names = rules(
            "CREATE TABLE t (a INT) PARTITION BY LIST(a) \
             (PARTITION p0 VALUES IN (1), PARTITION p1 VALUES IN (DEFAULT))",
        );
        assert_eq!(names.iter().filter(|n| **n == "list_partition_expr").count(), 2);
        assert_eq!(names.iter().filter(|n| **n == "list_expr").count(), 1);
    }

    #[test]
    fn test_subpartition_template_and_individual() {
        let names = rules(
            "CREATE TABLE t (a INT, b INT) PARTITION BY RANGE(a) SUBPARTITION BY HASH(b)
             SUBPARTITION TEMPLATE (SUBPARTITION s0, SUBPARTITION s1)
             (PARTITION p0 VALUES LESS THAN (100))",
        );
        assert!(names.contains(&"subpartition_template_option"));
        assert!(names.contains(&"opt_hash_subpartition_list"));

        let names = rules(
            "CREATE TABLE t (a INT, b INT) PARTITION BY LIST(a) SUBPARTITION BY RANGE(b)
             (PARTITION p0 VALUES IN (1) (SUBPARTITION s0 VALUES LESS THAN (5)))",
        );
        assert!(names.contains(&"subpartition_individual_option"));
        assert!(names.contains(&"range_subpartition_element"));
    }

    #[test]
    fn test_key_partition_without_columns() {
        let names = rules("CREATE TABLE t (a INT PRIMARY KEY) PARTITION BY KEY() PARTITIONS 2");
        assert!(names.contains(&"key_partition_option"));
        assert!(!names.contains(&"column_list"));
    }
}
