//! Expression grammar: `expr`, `bool_pri`, `predicate`, `bit_expr`,
//! `simple_expr` and the function, window and data type productions.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    NOT_BINDING_POWER, bit_binding_power, is_comparison, is_simple_prefix, logical_binding_power,
};
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

/// Interval and extraction units accepted by `date_unit`.
pub(crate) const DATE_UNITS: &[&str] = &[
    "MICROSECOND",
    "SECOND",
    "MINUTE",
    "HOUR",
    "DAY",
    "WEEK",
    "MONTH",
    "QUARTER",
    "YEAR",
    "SECOND_MICROSECOND",
    "MINUTE_MICROSECOND",
    "MINUTE_SECOND",
    "HOUR_MICROSECOND",
    "HOUR_SECOND",
    "HOUR_MINUTE",
    "DAY_MICROSECOND",
    "DAY_SECOND",
    "DAY_MINUTE",
    "DAY_HOUR",
    "YEAR_MONTH",
];

/// Functions that are only meaningful with an `OVER` clause.
pub(crate) const WINDOW_ONLY_FUNCTIONS: &[&str] = &[
    "ROW_NUMBER",
    "RANK",
    "DENSE_RANK",
    "PERCENT_RANK",
    "CUME_DIST",
    "NTILE",
    "LEAD",
    "LAG",
    "FIRST_VALUE",
    "LAST_VALUE",
    "NTH_VALUE",
];

const DATE_FUNCTIONS: &[&str] = &["DATE_ADD", "DATE_SUB", "ADDDATE", "SUBDATE"];
const TIMESTAMP_FUNCTIONS: &[&str] = &["TIMESTAMPADD", "TIMESTAMPDIFF"];

/// Time functions: (spelling, production, callable without parentheses).
const TIME_FUNCTIONS: &[(&str, RuleKind, bool)] = &[
    ("CURRENT_TIMESTAMP", RuleKind::CurTimestampFunc, true),
    ("LOCALTIMESTAMP", RuleKind::CurTimestampFunc, true),
    ("LOCALTIME", RuleKind::CurTimestampFunc, true),
    ("NOW", RuleKind::CurTimestampFunc, false),
    ("CURRENT_TIME", RuleKind::CurTimeFunc, true),
    ("CURTIME", RuleKind::CurTimeFunc, false),
    ("CURRENT_DATE", RuleKind::CurDateFunc, true),
    ("CURDATE", RuleKind::CurDateFunc, false),
    ("SYSDATE", RuleKind::SysdateFunc, false),
    ("UTC_TIMESTAMP", RuleKind::UtcTimestampFunc, true),
    ("UTC_TIME", RuleKind::UtcTimeFunc, true),
    ("UTC_DATE", RuleKind::UtcDateFunc, true),
];

/// Data type words and the `*_type_i` production each belongs to.
const TYPE_WORDS: &[(&str, RuleKind)] = &[
    ("TINYINT", RuleKind::IntTypeI),
    ("SMALLINT", RuleKind::IntTypeI),
    ("MEDIUMINT", RuleKind::IntTypeI),
    ("INT", RuleKind::IntTypeI),
    ("INTEGER", RuleKind::IntTypeI),
    ("BIGINT", RuleKind::IntTypeI),
    ("FLOAT", RuleKind::FloatTypeI),
    ("DOUBLE", RuleKind::FloatTypeI),
    ("REAL", RuleKind::FloatTypeI),
    ("DECIMAL", RuleKind::NumberTypeI),
    ("DEC", RuleKind::NumberTypeI),
    ("NUMERIC", RuleKind::NumberTypeI),
    ("NUMBER", RuleKind::NumberTypeI),
    ("FIXED", RuleKind::NumberTypeI),
    ("BOOL", RuleKind::BoolTypeI),
    ("BOOLEAN", RuleKind::BoolTypeI),
    ("DATETIME", RuleKind::DatetimeTypeI),
    ("TIMESTAMP", RuleKind::DatetimeTypeI),
    ("TIME", RuleKind::DatetimeTypeI),
    ("DATE", RuleKind::DateYearTypeI),
    ("YEAR", RuleKind::DateYearTypeI),
    ("TINYTEXT", RuleKind::TextTypeI),
    ("TEXT", RuleKind::TextTypeI),
    ("MEDIUMTEXT", RuleKind::TextTypeI),
    ("LONGTEXT", RuleKind::TextTypeI),
    ("CHAR", RuleKind::CharacterTypeI),
    ("CHARACTER", RuleKind::CharacterTypeI),
    ("NCHAR", RuleKind::CharacterTypeI),
    ("VARCHAR", RuleKind::CharacterTypeI),
    ("NVARCHAR", RuleKind::CharacterTypeI),
    ("TINYBLOB", RuleKind::BlobTypeI),
    ("BLOB", RuleKind::BlobTypeI),
    ("MEDIUMBLOB", RuleKind::BlobTypeI),
    ("LONGBLOB", RuleKind::BlobTypeI),
    ("BINARY", RuleKind::BinaryTypeI),
    ("VARBINARY", RuleKind::BinaryTypeI),
    ("BIT", RuleKind::BitTypeI),
    ("JSON", RuleKind::JsonTypeI),
    ("GEOMETRY", RuleKind::GeoTypeI),
    ("POINT", RuleKind::GeoTypeI),
    ("LINESTRING", RuleKind::GeoTypeI),
    ("POLYGON", RuleKind::GeoTypeI),
    ("MULTIPOINT", RuleKind::GeoTypeI),
    ("MULTILINESTRING", RuleKind::GeoTypeI),
    ("MULTIPOLYGON", RuleKind::GeoTypeI),
    ("GEOMETRYCOLLECTION", RuleKind::GeoTypeI),
    ("ENUM", RuleKind::CollectionTypeI),
    ("SET", RuleKind::CollectionTypeI),
    ("VECTOR", RuleKind::VectorTypeI),
    ("ROARINGBITMAP", RuleKind::RoaringbitmapTypeI),
];

/// Type words only Oracle mode knows.
const ORACLE_TYPE_WORDS: &[(&str, RuleKind)] = &[
    ("VARCHAR2", RuleKind::CharacterTypeI),
    ("NVARCHAR2", RuleKind::CharacterTypeI),
    ("CLOB", RuleKind::TextTypeI),
    ("NCLOB", RuleKind::TextTypeI),
    ("RAW", RuleKind::BinaryTypeI),
    ("BINARY_FLOAT", RuleKind::FloatTypeI),
    ("BINARY_DOUBLE", RuleKind::FloatTypeI),
    ("ROWID", RuleKind::RowidTypeI),
    ("UROWID", RuleKind::RowidTypeI),
];

const CAST_TYPE_WORDS: &[&str] = &[
    "BINARY", "CHAR", "CHARACTER", "NCHAR", "DATE", "DATETIME", "TIME", "TIMESTAMP", "DECIMAL",
    "NUMBER", "SIGNED", "UNSIGNED", "JSON", "DOUBLE", "FLOAT", "YEAR", "INT", "INTEGER",
];

impl Parser<'_> {
    // ------------------------------------------------------------------
    // expr
    // ------------------------------------------------------------------

    /// Parses a full boolean expression.
    pub(super) fn parse_expr(&mut self) -> Result<ParseNode, ParseError> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<ParseNode, ParseError> {
        let mut lhs = if self.check_keyword(Keyword::Not) {
            let not = self.advance();
            let operand = self.parse_expr_bp(NOT_BINDING_POWER)?;
            self.node(RuleKind::Expr, vec![not, operand])
        } else if self.check(&TokenKind::UserVariable) && self.peek_kind(1) == &TokenKind::Assign {
            let var = self.advance();
            let assign = self.advance();
            let value = self.parse_expr()?;
            return Ok(self.node(RuleKind::Expr, vec![var, assign, value]));
        } else {
            self.parse_truth_test()?
        };

        loop {
            let Some((l_bp, r_bp)) =
                logical_binding_power(&self.current().kind, self.pipes_as_concat())
            else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let op = self.advance();
            let rhs = self.parse_expr_bp(r_bp)?;
            lhs = self.node(RuleKind::Expr, vec![lhs, op, rhs]);
        }
        Ok(lhs)
    }

    /// `bool_pri [IS [NOT] TRUE|FALSE|UNKNOWN]`, wrapped in `expr`.
    fn parse_truth_test(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_bool_pri()?];
        let truth_at = if self.check_keyword_at(1, Keyword::Not) { 2 } else { 1 };
        if self.check_keyword(Keyword::Is)
            && matches!(
                self.peek_keyword(truth_at),
                Some(Keyword::True | Keyword::False | Keyword::Unknown)
            )
        {
            for _ in 0..=truth_at {
                c.push(self.advance());
            }
        }
        Ok(self.node(RuleKind::Expr, c))
    }

    fn parse_bool_pri(&mut self) -> Result<ParseNode, ParseError> {
        let first = self.parse_predicate()?;
        let mut lhs = self.node(RuleKind::BoolPri, vec![first]);
        loop {
            if self.check_keyword(Keyword::Is) {
                let null_at = if self.check_keyword_at(1, Keyword::Not) { 2 } else { 1 };
                if !self.check_keyword_at(null_at, Keyword::Null) {
                    break;
                }
                let mut c = vec![lhs];
                for _ in 0..=null_at {
                    c.push(self.advance());
                }
                lhs = self.node(RuleKind::BoolPri, c);
            } else if is_comparison(&self.current().kind) {
                let mut c = vec![lhs, self.advance()];
                if self.check_any_keyword(&[Keyword::Any, Keyword::Some, Keyword::All])
                    && self.peek_kind(1) == &TokenKind::LeftParen
                    && self.starts_query_at(2)
                {
                    c.push(self.advance());
                    c.push(self.parse_select_with_parens()?);
                } else {
                    c.push(self.parse_predicate()?);
                }
                lhs = self.node(RuleKind::BoolPri, c);
            } else {
                break;
            }
        }
        Ok(lhs)
    }

    fn parse_predicate(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_bit_expr()?];
        let negated = self.check_keyword(Keyword::Not)
            && matches!(
                self.peek_keyword(1),
                Some(
                    Keyword::In
                        | Keyword::Between
                        | Keyword::Like
                        | Keyword::Regexp
                        | Keyword::Rlike
                )
            );
        if negated {
            c.push(self.advance());
        }
        match self.current().as_keyword() {
            Some(Keyword::In) => {
                c.push(self.advance());
                c.push(self.parse_in_expr()?);
            }
            Some(Keyword::Between) => {
                c.push(self.advance());
                c.push(self.parse_bit_expr()?);
                c.push(self.expect_keyword(Keyword::And)?);
                c.push(self.parse_predicate()?);
            }
            Some(Keyword::Like) => {
                c.push(self.advance());
                c.push(self.parse_simple_expr()?);
                if self.eat_keyword(Keyword::Escape, &mut c) {
                    c.push(self.parse_simple_expr()?);
                }
            }
            Some(Keyword::Regexp | Keyword::Rlike) => {
                c.push(self.advance());
                c.push(self.parse_bit_expr()?);
            }
            Some(Keyword::Member) if !negated => {
                c.push(self.advance());
                self.eat_keyword(Keyword::Of, &mut c);
                c.push(self.expect(&TokenKind::LeftParen)?);
                c.push(self.parse_simple_expr()?);
                c.push(self.expect(&TokenKind::RightParen)?);
            }
            _ => {}
        }
        Ok(self.node(RuleKind::Predicate, c))
    }

    fn parse_in_expr(&mut self) -> Result<ParseNode, ParseError> {
        if self.check(&TokenKind::LeftParen) && self.starts_query_at(1) {
            let query = self.parse_select_with_parens()?;
            return Ok(self.node(RuleKind::InExpr, vec![query]));
        }
        let mut c = vec![self.expect(&TokenKind::LeftParen)?];
        c.push(self.parse_expr_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::InExpr, c))
    }

    /// Parses `expr (, expr)*` into an `expr_list`.
    pub(super) fn parse_expr_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_expr()?);
        }
        Ok(self.node(RuleKind::ExprList, c))
    }

    /// Returns true if a query starts `n` tokens ahead.
    pub(super) fn starts_query_at(&self, n: usize) -> bool {
        match self.peek_kind(n) {
            TokenKind::Keyword(Keyword::Select | Keyword::With) => true,
            TokenKind::LeftParen => self.starts_query_at(n + 1),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // bit_expr
    // ------------------------------------------------------------------

    pub(super) fn parse_bit_expr(&mut self) -> Result<ParseNode, ParseError> {
        self.parse_bit_expr_bp(0)
    }

    fn parse_bit_expr_bp(&mut self, min_bp: u8) -> Result<ParseNode, ParseError> {
        let first = self.parse_simple_expr()?;
        let mut lhs = self.node(RuleKind::BitExpr, vec![first]);
        loop {
            let kind = self.current().kind.clone();
            if matches!(kind, TokenKind::Plus | TokenKind::Minus)
                && self.check_keyword_at(1, Keyword::Interval)
            {
                if 7 < min_bp {
                    break;
                }
                let op = self.advance();
                let interval = self.advance();
                let value = self.parse_expr()?;
                let unit = self.parse_date_unit()?;
                lhs = self.node(RuleKind::BitExpr, vec![lhs, op, interval, value, unit]);
                continue;
            }
            let Some((l_bp, r_bp)) = bit_binding_power(&kind, self.pipes_as_concat()) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let op = self.advance();
            let rhs = self.parse_bit_expr_bp(r_bp)?;
            lhs = self.node(RuleKind::BitExpr, vec![lhs, op, rhs]);
        }
        Ok(lhs)
    }

    /// Parses an interval unit such as `DAY` or `HOUR_MINUTE`.
    pub(super) fn parse_date_unit(&mut self) -> Result<ParseNode, ParseError> {
        if self.check_date_unit() {
            let unit = self.advance();
            Ok(self.node(RuleKind::DateUnit, vec![unit]))
        } else {
            Err(self.error_here("date unit"))
        }
    }

    fn check_date_unit(&self) -> bool {
        DATE_UNITS.iter().any(|unit| self.check_word(unit))
    }

    // ------------------------------------------------------------------
    // simple_expr
    // ------------------------------------------------------------------

    pub(super) fn parse_simple_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut node = self.parse_simple_primary()?;
        while self.check_keyword(Keyword::Collate) {
            let collate = self.advance();
            let name = self.parse_name_or_string(RuleKind::CollationName)?;
            node = self.node(RuleKind::SimpleExpr, vec![node, collate, name]);
        }
        Ok(node)
    }

    fn parse_simple_primary(&mut self) -> Result<ParseNode, ParseError> {
        let kind = self.current().kind.clone();
        let c = match kind {
            k if is_simple_prefix(&k) => {
                let op = self.advance();
                vec![op, self.parse_simple_expr()?]
            }
            TokenKind::Question | TokenKind::UserVariable | TokenKind::SystemVariable => {
                vec![self.advance()]
            }
            TokenKind::LeftParen if self.starts_query_at(1) => {
                vec![self.parse_select_with_parens()?]
            }
            TokenKind::LeftParen => {
                let open = self.advance();
                let list = self.parse_expr_list()?;
                vec![open, list, self.expect(&TokenKind::RightParen)?]
            }
            TokenKind::Keyword(Keyword::Row) if self.peek_kind(1) == &TokenKind::LeftParen => {
                let row = self.advance();
                let open = self.advance();
                let list = self.parse_expr_list()?;
                vec![row, open, list, self.expect(&TokenKind::RightParen)?]
            }
            TokenKind::Keyword(Keyword::Exists) => {
                let exists = self.advance();
                vec![exists, self.parse_select_with_parens()?]
            }
            TokenKind::Keyword(Keyword::Match) if self.peek_kind(1) == &TokenKind::LeftParen => {
                self.parse_match_against()?
            }
            TokenKind::Keyword(Keyword::Case) => vec![self.parse_case_expr()?],
            TokenKind::Identifier if self.starts_prior() => {
                let prior = self.advance();
                vec![prior, self.parse_simple_expr()?]
            }
            _ if self.starts_literal() => {
                let literal = self.parse_literal()?;
                vec![self.node(RuleKind::ExprConst, vec![literal])]
            }
            _ => return self.parse_named_primary(),
        };
        Ok(self.node(RuleKind::SimpleExpr, c))
    }

    fn parse_match_against(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        let mut c = vec![self.advance(), self.advance()];
        c.push(self.parse_expr_list()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        c.push(self.expect_keyword(Keyword::Against)?);
        c.push(self.expect(&TokenKind::LeftParen)?);
        c.push(self.parse_simple_expr()?);
        while !self.check(&TokenKind::RightParen) && !self.at_eof() {
            c.push(self.advance());
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(c)
    }

    /// Function calls, window functions and column references.
    fn parse_named_primary(&mut self) -> Result<ParseNode, ParseError> {
        if let Some(func) = self.try_parse_complex_func()? {
            return Ok(self.node(RuleKind::SimpleExpr, vec![func]));
        }
        let is_word = matches!(
            self.current().kind,
            TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::Keyword(_)
        );
        if is_word && self.peek_kind(1) == &TokenKind::LeftParen {
            let call = self.parse_function_call()?;
            return Ok(self.node(RuleKind::SimpleExpr, vec![call]));
        }
        if !self.check_name() {
            return Err(self.error_here("expression"));
        }
        let column = self.parse_column_ref()?;
        if matches!(self.current().kind, TokenKind::Arrow | TokenKind::LongArrow) {
            let arrow = self.advance();
            let path = self.parse_complex_string_literal()?;
            return Ok(self.node(RuleKind::SimpleExpr, vec![column, arrow, path]));
        }
        if self.oracle()
            && self.check(&TokenKind::LeftParen)
            && self.peek_kind(1) == &TokenKind::Plus
            && self.peek_kind(2) == &TokenKind::RightParen
        {
            let marker = vec![self.advance(), self.advance(), self.advance()];
            let mut c = vec![column];
            c.extend(marker);
            return Ok(self.node(RuleKind::SimpleExpr, c));
        }
        Ok(self.node(RuleKind::SimpleExpr, vec![column]))
    }

    /// Oracle `PRIOR` applied to a column or parenthesised expression.
    fn starts_prior(&self) -> bool {
        self.oracle()
            && self.check_word("PRIOR")
            && (self.peek_kind(1) == &TokenKind::LeftParen || self.peek_kind(1).is_name())
    }

    /// Parses `name`, `t.name`, `db.t.name`, `t.*` or `db.t.*`.
    pub(super) fn parse_column_ref(&mut self) -> Result<ParseNode, ParseError> {
        let mut parts = vec![self.parse_name_terminal()?];
        let mut dots = vec![];
        let mut star = None;
        while self.check(&TokenKind::Dot) && parts.len() < 3 {
            let after = self.peek_kind(1).clone();
            match after {
                TokenKind::Star => {
                    dots.push(self.advance());
                    star = Some(self.advance());
                    break;
                }
                TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::Keyword(_) => {
                    dots.push(self.advance());
                    parts.push(self.advance());
                }
                _ => break,
            }
        }
        let last = if star.is_some() { parts.len() } else { parts.len() - 1 };
        let mut c = vec![];
        let mut dots = dots.into_iter();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                c.extend(dots.next());
            }
            let kind = if i == last {
                RuleKind::ColumnName
            } else {
                RuleKind::RelationName
            };
            c.push(self.node(kind, vec![part]));
        }
        c.extend(dots);
        c.extend(star);
        Ok(self.node(RuleKind::ColumnRef, c))
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    pub(super) fn starts_literal(&self) -> bool {
        match &self.current().kind {
            TokenKind::String
            | TokenKind::NationalString
            | TokenKind::IntNum
            | TokenKind::DecimalNum
            | TokenKind::ApproxNum
            | TokenKind::HexString
            | TokenKind::BitString
            | TokenKind::Keyword(Keyword::Null | Keyword::True | Keyword::False) => true,
            TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp) => {
                self.peek_kind(1) == &TokenKind::String
            }
            _ => self.is_charset_introducer(),
        }
    }

    /// Parses a `literal`.
    pub(super) fn parse_literal(&mut self) -> Result<ParseNode, ParseError> {
        let c = match &self.current().kind {
            TokenKind::IntNum | TokenKind::DecimalNum | TokenKind::ApproxNum => {
                let num = self.advance();
                vec![self.node(RuleKind::NumberLiteral, vec![num])]
            }
            TokenKind::HexString
            | TokenKind::BitString
            | TokenKind::Keyword(Keyword::Null | Keyword::True | Keyword::False) => {
                vec![self.advance()]
            }
            TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp)
                if self.peek_kind(1) == &TokenKind::String =>
            {
                vec![self.advance(), self.advance()]
            }
            _ => vec![self.parse_complex_string_literal()?],
        };
        Ok(self.node(RuleKind::Literal, c))
    }

    /// Parses `[+|-] literal`.
    pub(super) fn parse_signed_literal(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if !self.eat(&TokenKind::Minus, &mut c) {
            self.eat(&TokenKind::Plus, &mut c);
        }
        if !self.starts_literal() {
            return Err(self.error_here("literal"));
        }
        c.push(self.parse_literal()?);
        Ok(self.node(RuleKind::SignedLiteral, c))
    }

    // ------------------------------------------------------------------
    // CASE
    // ------------------------------------------------------------------

    fn parse_case_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Case)?];
        if !self.check_keyword(Keyword::When) {
            c.push(self.parse_expr()?);
        }
        let mut whens = vec![];
        while self.check_keyword(Keyword::When) {
            let mut w = vec![self.advance(), self.parse_expr()?];
            w.push(self.expect_keyword(Keyword::Then)?);
            w.push(self.parse_expr()?);
            whens.push(self.node(RuleKind::WhenClause, w));
        }
        if whens.is_empty() {
            return Err(self.error_here("WHEN"));
        }
        c.push(self.node(RuleKind::WhenClauseList, whens));
        if self.check_keyword(Keyword::Else) {
            let d = vec![self.advance(), self.parse_expr()?];
            c.push(self.node(RuleKind::CaseDefault, d));
        }
        c.push(self.expect_keyword(Keyword::End)?);
        Ok(self.node(RuleKind::CaseExpr, c))
    }

    // ------------------------------------------------------------------
    // Function calls and windows
    // ------------------------------------------------------------------

    /// Parses `name(...)`, wrapping it in `window_function` when an `OVER`
    /// clause follows or the function is window-only.
    fn parse_function_call(&mut self) -> Result<ParseNode, ParseError> {
        let name_token = self.advance();
        let window_only = name_token
            .first_terminal()
            .is_some_and(|t| WINDOW_ONLY_FUNCTIONS.iter().any(|w| t.is_word(w)));
        let mut c = vec![self.node(RuleKind::FunctionName, vec![name_token])];
        c.push(self.expect(&TokenKind::LeftParen)?);
        self.eat_any_keyword(&[Keyword::Distinct, Keyword::All, Keyword::Unique], &mut c);
        if !self.eat(&TokenKind::Star, &mut c) && !self.check(&TokenKind::RightParen) {
            c.push(self.parse_expr_list()?);
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        let call = self.node(RuleKind::SimpleFuncExpr, c);

        let first_last = self.check_any_keyword(&[Keyword::Respect, Keyword::Ignore])
            || (self.check_keyword(Keyword::From)
                && self.check_any_keyword_at(1, &[Keyword::First, Keyword::Last]));
        if !window_only && !first_last && !self.check_keyword(Keyword::Over) {
            return Ok(call);
        }
        let mut w = vec![call];
        let mut params = vec![];
        loop {
            if self.check_keyword(Keyword::From)
                && self.check_any_keyword_at(1, &[Keyword::First, Keyword::Last])
            {
                params.push(self.advance());
                params.push(self.expect_any_keyword(&[Keyword::First, Keyword::Last])?);
            } else if self.check_any_keyword(&[Keyword::Respect, Keyword::Ignore]) {
                params.push(self.advance());
                params.push(self.expect_keyword(Keyword::Nulls)?);
            } else {
                break;
            }
        }
        if !params.is_empty() {
            w.push(self.node(RuleKind::WinFunFirstLastParams, params));
        }
        if self.eat_keyword(Keyword::Over, &mut w) {
            w.push(self.parse_new_window_clause()?);
        }
        Ok(self.node(RuleKind::WindowFunction, w))
    }

    pub(super) fn check_any_keyword_at(&self, n: usize, keywords: &[Keyword]) -> bool {
        self.peek_keyword(n).is_some_and(|kw| keywords.contains(&kw))
    }

    /// `OVER w` or `OVER ([w] [PARTITION BY ...] [ORDER BY ...] [frame])`.
    fn parse_new_window_clause(&mut self) -> Result<ParseNode, ParseError> {
        if !self.check(&TokenKind::LeftParen) {
            let name = self.parse_name(RuleKind::RelationName)?;
            return Ok(self.node(RuleKind::NewGeneralizedWindowClause, vec![name]));
        }
        let mut c = vec![self.advance()];
        if self.check_name()
            && !self.check_any_keyword(&[
                Keyword::Partition,
                Keyword::Order,
                Keyword::Rows,
                Keyword::Range,
            ])
        {
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        c.push(self.parse_generalized_window_clause()?);
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::NewGeneralizedWindowClause, c))
    }

    fn parse_generalized_window_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat_keyword(Keyword::Partition, &mut c) {
            c.push(self.expect_keyword(Keyword::By)?);
            c.push(self.parse_expr_list()?);
        }
        if self.check_keyword(Keyword::Order) {
            c.push(self.parse_order_by()?);
        }
        if self.check_any_keyword(&[Keyword::Rows, Keyword::Range]) {
            c.push(self.parse_win_window()?);
        }
        Ok(self.node(RuleKind::GeneralizedWindowClause, c))
    }

    fn parse_win_window(&mut self) -> Result<ParseNode, ParseError> {
        let unit = self.advance();
        let mut c = vec![self.node(RuleKind::WinRowsOrRange, vec![unit])];
        if self.eat_keyword(Keyword::Between, &mut c) {
            c.push(self.parse_win_bounding()?);
            c.push(self.expect_keyword(Keyword::And)?);
        }
        c.push(self.parse_win_bounding()?);
        Ok(self.node(RuleKind::WinWindow, c))
    }

    fn parse_win_bounding(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.eat_keyword(Keyword::Current, &mut c) {
            c.push(self.expect_keyword(Keyword::Row)?);
            return Ok(self.node(RuleKind::WinBounding, c));
        }
        if !self.eat_keyword(Keyword::Unbounded, &mut c) {
            if self.check_keyword(Keyword::Interval) {
                let mut i = vec![self.advance(), self.parse_expr()?];
                i.push(self.parse_date_unit()?);
                c.push(self.node(RuleKind::WinInterval, i));
            } else {
                c.push(self.parse_expr()?);
            }
        }
        let direction = self.expect_any_keyword(&[Keyword::Preceding, Keyword::Following])?;
        c.push(self.node(RuleKind::WinPrecedingOrFollowing, vec![direction]));
        Ok(self.node(RuleKind::WinBounding, c))
    }

    /// Parses `WINDOW w AS (...) [, ...]`.
    pub(super) fn parse_named_windows(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Window)?];
        loop {
            let mut w = vec![self.parse_name(RuleKind::RelationName)?];
            w.push(self.expect_keyword(Keyword::As)?);
            w.push(self.parse_new_window_clause()?);
            c.push(self.node(RuleKind::NamedWindow, w));
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        Ok(self.node(RuleKind::NamedWindows, c))
    }

    // ------------------------------------------------------------------
    // complex_func_expr
    // ------------------------------------------------------------------

    fn try_parse_complex_func(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let paren = self.peek_kind(1) == &TokenKind::LeftParen;
        if let Some((_, rule, bare)) = TIME_FUNCTIONS
            .iter()
            .find(|(name, _, _)| self.check_word(name))
            .copied()
        {
            if !paren && !bare {
                return Ok(None);
            }
            let mut c = vec![self.advance()];
            if self.eat(&TokenKind::LeftParen, &mut c) {
                self.eat(&TokenKind::IntNum, &mut c);
                c.push(self.expect(&TokenKind::RightParen)?);
            }
            let func = self.node(rule, c);
            return Ok(Some(self.node(RuleKind::ComplexFuncExpr, vec![func])));
        }
        if !paren {
            return Ok(None);
        }
        let c = if self.check_word("CAST") {
            let mut c = vec![self.advance(), self.advance(), self.parse_expr()?];
            c.push(self.expect_keyword(Keyword::As)?);
            c.push(self.parse_cast_data_type()?);
            c
        } else if self.check_word("CONVERT") {
            let mut c = vec![self.advance(), self.advance(), self.parse_expr()?];
            if self.eat_keyword(Keyword::Using, &mut c) {
                c.push(self.parse_name_or_string(RuleKind::CharsetName)?);
            } else {
                c.push(self.expect(&TokenKind::Comma)?);
                c.push(self.parse_cast_data_type()?);
            }
            c
        } else if self.check_word("POSITION") {
            let mut c = vec![self.advance(), self.advance(), self.parse_bit_expr()?];
            c.push(self.expect_keyword(Keyword::In)?);
            c.push(self.parse_expr()?);
            c
        } else if self.check_word("SUBSTR") || self.check_word("SUBSTRING") {
            let name = self.advance();
            let mut c = vec![self.node(RuleKind::SubstrOrSubstring, vec![name]), self.advance()];
            c.push(self.parse_substr_params()?);
            c
        } else if self.check_word("TRIM") {
            let mut c = vec![self.advance(), self.advance()];
            c.push(self.parse_trim_params()?);
            c
        } else if DATE_FUNCTIONS.iter().any(|f| self.check_word(f)) {
            let mut c = vec![self.advance(), self.advance()];
            let mut p = vec![self.parse_expr()?, self.expect(&TokenKind::Comma)?];
            if self.check_keyword(Keyword::Interval) {
                p.push(self.advance());
                p.push(self.parse_expr()?);
                p.push(self.parse_date_unit()?);
            } else {
                p.push(self.parse_expr()?);
            }
            c.push(self.node(RuleKind::DateParams, p));
            c
        } else if TIMESTAMP_FUNCTIONS.iter().any(|f| self.check_word(f)) {
            let mut c = vec![self.advance(), self.advance()];
            let mut p = vec![self.parse_date_unit()?, self.expect(&TokenKind::Comma)?];
            p.push(self.parse_expr()?);
            p.push(self.expect(&TokenKind::Comma)?);
            p.push(self.parse_expr()?);
            c.push(self.node(RuleKind::TimestampParams, p));
            c
        } else if self.check_word("EXTRACT") {
            let mut c = vec![self.advance(), self.advance(), self.parse_date_unit()?];
            c.push(self.expect_keyword(Keyword::From)?);
            c.push(self.parse_expr()?);
            c
        } else if self.check_word("GROUP_CONCAT") {
            let mut c = vec![self.advance(), self.advance()];
            self.eat_keyword(Keyword::Distinct, &mut c);
            c.push(self.parse_expr_list()?);
            if self.check_keyword(Keyword::Order) {
                c.push(self.parse_order_by()?);
            }
            if self.eat_keyword(Keyword::Separator, &mut c) {
                c.push(self.parse_complex_string_literal()?);
            }
            c
        } else if self.check_keyword(Keyword::Char) {
            let mut c = vec![self.advance(), self.advance(), self.parse_expr_list()?];
            if self.eat_keyword(Keyword::Using, &mut c) {
                c.push(self.parse_name_or_string(RuleKind::CharsetName)?);
            }
            c
        } else if self.check_keyword(Keyword::Values) {
            vec![self.advance(), self.advance(), self.parse_column_ref()?]
        } else if self.check_word("JSON_VALUE") {
            let json = self.parse_json_value_expr()?;
            return Ok(Some(self.node(RuleKind::ComplexFuncExpr, vec![json])));
        } else if self.check_word("JSON_QUERY") {
            let json = self.parse_json_query_expr()?;
            return Ok(Some(self.node(RuleKind::ComplexFuncExpr, vec![json])));
        } else {
            return Ok(None);
        };
        let mut c = c;
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(Some(self.node(RuleKind::ComplexFuncExpr, c)))
    }

    /// `str, pos [, len]` or `str FROM pos [FOR len]`.
    fn parse_substr_params(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_expr()?];
        if self.eat_keyword(Keyword::From, &mut c) {
            c.push(self.parse_expr()?);
            if self.eat_keyword(Keyword::For, &mut c) {
                c.push(self.parse_expr()?);
            }
        } else {
            while self.eat(&TokenKind::Comma, &mut c) {
                c.push(self.parse_expr()?);
            }
        }
        Ok(self.node(RuleKind::SubstrParams, c))
    }

    /// `[BOTH|LEADING|TRAILING] [remstr] FROM str` or `str`.
    fn parse_trim_params(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        let has_side =
            self.eat_any_keyword(&[Keyword::Both, Keyword::Leading, Keyword::Trailing], &mut c);
        if !self.check_keyword(Keyword::From) {
            c.push(self.parse_expr()?);
        }
        if self.eat_keyword(Keyword::From, &mut c) {
            c.push(self.parse_expr()?);
        } else if has_side {
            return Err(self.error_here("FROM"));
        }
        Ok(self.node(RuleKind::ParameterizedTrim, c))
    }

    // ------------------------------------------------------------------
    // JSON_VALUE and JSON_QUERY
    // ------------------------------------------------------------------

    fn parse_json_value_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = self.parse_json_head()?;
        self.eat_keyword(Keyword::Truncate, &mut c);
        self.eat_keyword(Keyword::Ascii, &mut c);
        let mut on = vec![];
        while self.check_any_keyword(&[Keyword::Error, Keyword::Null, Keyword::Default]) {
            let mut r = vec![self.advance()];
            if r[0].first_terminal().is_some_and(|t| t.is_keyword(Keyword::Default)) {
                r.push(self.parse_signed_literal()?);
            }
            let response = self.node(RuleKind::JsonOnResponse, r);
            on.push(self.parse_on_clause(response, RuleKind::OnEmpty, RuleKind::OnError)?);
        }
        if !on.is_empty() {
            c.push(self.node(RuleKind::JsonValueOnOpt, on));
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::JsonValueExpr, c))
    }

    fn parse_json_query_expr(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = self.parse_json_head()?;
        loop {
            let words = [Keyword::Truncate, Keyword::Pretty, Keyword::Ascii, Keyword::Asis];
            if self.check_any_keyword(&words) {
                c.push(self.advance());
            } else if self.check_any_keyword(&[Keyword::Allow, Keyword::Disallow]) {
                let s = vec![self.advance(), self.expect_keyword(Keyword::Scalars)?];
                c.push(self.node(RuleKind::ScalarsOpt, s));
            } else if self.check_any_keyword(&[Keyword::With, Keyword::Without]) {
                let mut w = vec![self.advance()];
                self.eat_any_keyword(&[Keyword::Conditional, Keyword::Unconditional], &mut w);
                self.eat_keyword(Keyword::Array, &mut w);
                w.push(self.expect_keyword(Keyword::Wrapper)?);
                c.push(self.node(RuleKind::WrapperOpts, w));
            } else {
                break;
            }
        }
        let mut on = vec![];
        while self.check_any_keyword(&[Keyword::Error, Keyword::Null, Keyword::Empty]) {
            let mut r = vec![self.advance()];
            if r[0].first_terminal().is_some_and(|t| t.is_keyword(Keyword::Empty)) {
                self.eat_any_keyword(&[Keyword::Array, Keyword::Object], &mut r);
            }
            let response = self.node(RuleKind::OptResponseQuery, r);
            let (empty, error) = (RuleKind::OnEmptyQuery, RuleKind::OnErrorQuery);
            on.push(self.parse_on_clause(response, empty, error)?);
        }
        if !on.is_empty() {
            c.push(self.node(RuleKind::JsonQueryOnOpt, on));
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::JsonQueryExpr, c))
    }

    /// `JSON_X ( doc , path [RETURNING type]`, shared by both functions.
    fn parse_json_head(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        let mut c = vec![self.advance(), self.expect(&TokenKind::LeftParen)?];
        c.push(self.parse_simple_expr()?);
        c.push(self.expect(&TokenKind::Comma)?);
        c.push(self.parse_complex_string_literal()?);
        if self.eat_keyword(Keyword::Returning, &mut c) {
            c.push(self.parse_cast_data_type()?);
        }
        Ok(c)
    }

    fn parse_on_clause(
        &mut self,
        response: ParseNode,
        on_empty: RuleKind,
        on_error: RuleKind,
    ) -> Result<ParseNode, ParseError> {
        let mut c = vec![response, self.expect_keyword(Keyword::On)?];
        let kind = if self.check_keyword(Keyword::Empty) {
            on_empty
        } else {
            on_error
        };
        c.push(self.expect_any_keyword(&[Keyword::Empty, Keyword::Error])?);
        Ok(self.node(kind, c))
    }

    // ------------------------------------------------------------------
    // Data types
    // ------------------------------------------------------------------

    /// Parses a column `data_type`.
    pub(super) fn parse_data_type(&mut self) -> Result<ParseNode, ParseError> {
        if self.oracle() && self.check_keyword(Keyword::Interval) {
            let interval = self.parse_interval_type()?;
            return Ok(self.node(RuleKind::DataType, vec![interval]));
        }
        let mut words = vec![];
        if self.check_word("NATIONAL") || self.check_word("LONG") {
            words.push(self.advance());
        }
        let Some(rule) = self.type_word_rule() else {
            return Err(self.error_here("data type"));
        };
        words.push(self.advance());
        if self.check_word("PRECISION") || self.check_word("VARYING") {
            words.push(self.advance());
        }
        let mut c = vec![self.node(rule, words)];
        if rule == RuleKind::CollectionTypeI {
            let mut s = vec![self.expect(&TokenKind::LeftParen)?];
            loop {
                s.push(self.parse_complex_string_literal()?);
                if !self.eat(&TokenKind::Comma, &mut s) {
                    break;
                }
            }
            s.push(self.expect(&TokenKind::RightParen)?);
            c.push(self.node(RuleKind::StringList, s));
        } else {
            self.eat_precision(&mut c)?;
        }
        if rule == RuleKind::DatetimeTypeI && self.oracle() {
            self.eat_time_zone(&mut c);
        }
        self.eat_type_modifiers(&mut c)?;
        Ok(self.node(RuleKind::DataType, c))
    }

    fn type_word_rule(&self) -> Option<RuleKind> {
        let oracle: &[(&str, RuleKind)] = if self.oracle() { ORACLE_TYPE_WORDS } else { &[] };
        oracle
            .iter()
            .chain(TYPE_WORDS)
            .find(|(word, _)| self.check_word(word))
            .map(|(_, rule)| *rule)
    }

    /// Parses `INTERVAL YEAR [(p)] TO MONTH` or
    /// `INTERVAL DAY [(p)] TO SECOND [(s)]`.
    fn parse_interval_type(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Interval)?];
        let trailing = if self.check_word("YEAR") {
            "MONTH"
        } else if self.check_word("DAY") {
            "SECOND"
        } else {
            return Err(self.error_here("YEAR or DAY"));
        };
        c.push(self.advance());
        if self.check(&TokenKind::LeftParen) {
            self.eat_paren_int(&mut c)?;
        }
        c.push(self.expect_keyword(Keyword::To)?);
        if !self.eat_word(trailing, &mut c) {
            return Err(self.error_here(trailing));
        }
        if trailing == "SECOND" && self.check(&TokenKind::LeftParen) {
            self.eat_paren_int(&mut c)?;
        }
        Ok(self.node(RuleKind::IntervalTypeI, c))
    }

    /// `WITH [LOCAL] TIME ZONE` after a timestamp.
    fn eat_time_zone(&mut self, c: &mut Vec<ParseNode>) {
        let local = usize::from(self.check_word_at(1, "LOCAL"));
        if self.check_keyword(Keyword::With)
            && self.check_word_at(1 + local, "TIME")
            && self.check_word_at(2 + local, "ZONE")
        {
            for _ in 0..3 + local {
                c.push(self.advance());
            }
        }
    }

    /// Parses the target type of `CAST`, `CONVERT` or `RETURNING`.
    pub(super) fn parse_cast_data_type(&mut self) -> Result<ParseNode, ParseError> {
        if !CAST_TYPE_WORDS.iter().any(|w| self.check_word(w)) {
            return Err(self.error_here("cast type"));
        }
        let signed = self.check_word("SIGNED") || self.check_word("UNSIGNED");
        let mut c = vec![self.advance()];
        if signed && (self.check_word("INT") || self.check_word("INTEGER")) {
            c.push(self.advance());
        }
        self.eat_precision(&mut c)?;
        self.eat_type_modifiers(&mut c)?;
        Ok(self.node(RuleKind::CastDataType, c))
    }

    /// Parses `( n [, m] )` when present. Oracle mode also takes
    /// `NUMBER(*, s)` and a BYTE or CHAR unit after the length.
    fn eat_precision(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        if self.eat(&TokenKind::LeftParen, c) {
            if !(self.oracle() && self.eat(&TokenKind::Star, c)) {
                c.push(self.expect(&TokenKind::IntNum)?);
            }
            if self.oracle() && (self.check_word("BYTE") || self.check_keyword(Keyword::Char)) {
                c.push(self.advance());
            }
            if self.eat(&TokenKind::Comma, c) {
                c.push(self.expect(&TokenKind::IntNum)?);
            }
            c.push(self.expect(&TokenKind::RightParen)?);
        }
        Ok(())
    }

    fn eat_type_modifiers(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        loop {
            let attribute = ["UNSIGNED", "SIGNED", "ZEROFILL"];
            if attribute.iter().any(|w| self.check_word(w)) {
                c.push(self.advance());
            } else if self.check_keyword(Keyword::Binary) {
                c.push(self.advance());
            } else if self.check_charset_key() {
                c.push(self.parse_charset_key()?);
                c.push(self.parse_name_or_string(RuleKind::CharsetName)?);
            } else if self.check_keyword(Keyword::Collate) {
                c.push(self.advance());
                c.push(self.parse_name_or_string(RuleKind::CollationName)?);
            } else {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::OracleDialect;

    fn expr(sql: &str) -> ParseNode {
        let mut parser = Parser::new(sql);
        let node = parser.parse_expr().unwrap();
        assert!(parser.at_eof(), "trailing input in {sql}");
        node
    }

    fn rules(node: &ParseNode) -> Vec<&'static str> {
        let mut out = Vec::new();
        node.visit(&mut |n| {
            if let Some(kind) = n.kind() {
                out.push(kind.name());
            }
        });
        out
    }

    fn children(node: &ParseNode) -> &[ParseNode] {
        &node.as_rule().unwrap().children
    }

    #[test]
    fn test_or_and_nesting() {
        let node = expr("a OR b AND c");
        let top = children(&node);
        assert_eq!(top.len(), 3);
        assert!(top[1].first_terminal().unwrap().is_keyword(Keyword::Or));
        let right = children(&top[2]);
        assert_eq!(right.len(), 3);
        assert!(right[1].first_terminal().unwrap().is_keyword(Keyword::And));
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        let node = expr("NOT a AND b");
        let top = children(&node);
        assert!(top[1].first_terminal().unwrap().is_keyword(Keyword::And));
        assert!(top[0].first_terminal().unwrap().is_keyword(Keyword::Not));
    }

    #[test]
    fn test_arithmetic_left_assoc() {
        let node = expr("1 - 2 - 3");
        let bit = &children(&children(&children(&node)[0])[0])[0];
        let top = children(bit);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].kind(), Some(RuleKind::BitExpr));
        assert_eq!(children(&top[0]).len(), 3);
    }

    #[test]
    fn test_predicates() {
        assert!(rules(&expr("a NOT IN (1, 2)")).contains(&"in_expr"));
        assert!(rules(&expr("a BETWEEN 1 AND 2 AND b")).contains(&"predicate"));
        assert!(rules(&expr("a LIKE 'x%' ESCAPE '!'")).contains(&"complex_string_literal"));
        assert!(rules(&expr("a IS NOT NULL")).contains(&"bool_pri"));
        assert!(rules(&expr("a IN (SELECT 1)")).contains(&"select_with_parens"));
    }

    #[test]
    fn test_interval_arithmetic() {
        assert!(rules(&expr("d + INTERVAL 1 DAY")).contains(&"date_unit"));
    }

    #[test]
    fn test_column_ref_shapes() {
        let node = Parser::new("db.t.c").parse_column_ref().unwrap();
        assert_eq!(
            rules(&node),
            vec!["column_ref", "relation_name", "relation_name", "column_name"]
        );
        let node = Parser::new("t.*").parse_column_ref().unwrap();
        assert_eq!(rules(&node), vec!["column_ref", "relation_name"]);
    }

    #[test]
    fn test_window_function() {
        let names = rules(&expr(
            "ROW_NUMBER() OVER (PARTITION BY a ORDER BY b \
             ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
        ));
        assert!(names.contains(&"window_function"));
        assert!(names.contains(&"generalized_window_clause"));
        assert!(names.contains(&"win_window"));
    }

    #[test]
    fn test_window_only_function_without_over() {
        assert!(rules(&expr("RANK()")).contains(&"window_function"));
        assert!(!rules(&expr("COUNT(*)")).contains(&"window_function"));
    }

    #[test]
    fn test_window_only_function_before_from_clause() {
        for sql in [
            "SELECT RANK() FROM t",
            "SELECT LEAD(a) FROM t",
            "SELECT NTH_VALUE(a, 2) FROM t",
        ] {
            let root = Parser::new(sql).parse().unwrap();
            let names = rules(&root);
            assert!(names.contains(&"window_function"), "{sql}");
            assert!(!names.contains(&"win_fun_first_last_params"), "{sql}");
            assert!(names.contains(&"from_list"), "{sql}");
        }
    }

    #[test]
    fn test_complex_functions() {
        assert!(rules(&expr("CAST(a AS UNSIGNED INTEGER)")).contains(&"cast_data_type"));
        assert!(rules(&expr("DATE_ADD(d, INTERVAL 1 DAY)")).contains(&"date_params"));
        assert!(rules(&expr("TIMESTAMPDIFF(DAY, a, b)")).contains(&"timestamp_params"));
        assert!(rules(&expr("TRIM(LEADING 'x' FROM y)")).contains(&"parameterized_trim"));
        assert!(rules(&expr("SUBSTRING(a FROM 2 FOR 3)")).contains(&"substr_params"));
        assert!(rules(&expr("CURRENT_TIMESTAMP")).contains(&"cur_timestamp_func"));
        assert!(rules(&expr("NOW(6)")).contains(&"cur_timestamp_func"));
    }

    #[test]
    fn test_json_value() {
        let names = rules(&expr(
            "JSON_VALUE(doc, '$.a' RETURNING CHAR(10) DEFAULT 'x' ON EMPTY ERROR ON ERROR)",
        ));
        assert!(names.contains(&"json_value_expr"));
        assert!(names.contains(&"on_empty"));
        assert!(names.contains(&"on_error"));
    }

    #[test]
    fn test_json_query() {
        let names = rules(&expr(
            "JSON_QUERY(doc, '$' WITH CONDITIONAL ARRAY WRAPPER EMPTY ARRAY ON EMPTY)",
        ));
        assert!(names.contains(&"wrapper_opts"));
        assert!(names.contains(&"on_empty_query"));
    }

    #[test]
    fn test_data_types() {
        let node = Parser::new("DECIMAL(10, 2) UNSIGNED ZEROFILL")
            .parse_data_type()
            .unwrap();
        assert_eq!(rules(&node), vec!["data_type", "number_type_i"]);
        let node = Parser::new("ENUM('a', 'b') CHARACTER SET utf8mb4")
            .parse_data_type()
            .unwrap();
        assert!(rules(&node).contains(&"string_list"));
        assert!(rules(&node).contains(&"charset_name"));
    }

    #[test]
    fn test_oracle_concat() {
        let mut parser = Parser::with_dialect("a || b", &OracleDialect);
        let node = parser.parse_expr().unwrap();
        assert!(rules(&node).iter().filter(|n| **n == "bit_expr").count() >= 3);
        let node = expr("a || b");
        assert_eq!(children(&node).len(), 3);
    }
}
