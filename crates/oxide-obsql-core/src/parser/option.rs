//! Keyword-led option lists (`table_option_list`, `opt_index_options`,
//! `sequence_option_list`, ...).
//!
//! Every list shares one shape: an option is a keyword sequence, an optional
//! `=`, and a value. The keyword sequences each list accepts are data, so a
//! new option is one table entry.

use super::error::ParseError;
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::TokenKind;

/// What follows an option's keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    /// No value (`READ ONLY`, `NOPARALLEL`).
    Flag,
    /// A number, string, name or parenthesised list.
    Value,
    /// A value optionally followed by `FORCE` (`LOCALITY`).
    Locality,
    /// A signed integer wrapped in `simple_num` (sequence options).
    Num,
    /// A parenthesised run of storage parameters (`STORAGE (INITIAL 64K)`).
    Group,
    /// An optional compression level (`COMPRESS FOR OLTP`).
    Compress,
}

/// One accepted option spelling.
#[derive(Debug, Clone, Copy)]
pub(super) struct OptionSpec {
    pub words: &'static [&'static str],
    pub shape: Shape,
}

/// The productions and spellings of one option list.
#[derive(Debug, Clone, Copy)]
pub(super) struct OptionGrammar {
    pub specs: &'static [OptionSpec],
    /// Spellings only Oracle mode accepts.
    pub oracle: &'static [OptionSpec],
    pub item: RuleKind,
    pub list: RuleKind,
    pub comma: bool,
}

const fn value(words: &'static [&'static str]) -> OptionSpec {
    OptionSpec {
        words,
        shape: Shape::Value,
    }
}

const fn flag(words: &'static [&'static str]) -> OptionSpec {
    OptionSpec {
        words,
        shape: Shape::Flag,
    }
}

const fn num(words: &'static [&'static str]) -> OptionSpec {
    OptionSpec {
        words,
        shape: Shape::Num,
    }
}

const LOCALITY: OptionSpec = OptionSpec {
    words: &["LOCALITY"],
    shape: Shape::Locality,
};

const TABLE_SPECS: &[OptionSpec] = &[
    value(&["CHARSET"]),
    value(&["CHARACTER", "SET"]),
    value(&["CHAR", "SET"]),
    value(&["DEFAULT", "CHARSET"]),
    value(&["DEFAULT", "CHARACTER", "SET"]),
    value(&["COLLATE"]),
    value(&["DEFAULT", "COLLATE"]),
    value(&["COMMENT"]),
    value(&["COMPRESSION"]),
    value(&["ENGINE"]),
    value(&["AUTO_INCREMENT"]),
    value(&["TABLEGROUP"]),
    value(&["PRIMARY_ZONE"]),
    LOCALITY,
    value(&["ROW_FORMAT"]),
    value(&["BLOCK_SIZE"]),
    value(&["REPLICA_NUM"]),
    value(&["TABLET_SIZE"]),
    value(&["PCTFREE"]),
    value(&["USE_BLOOM_FILTER"]),
    value(&["PROGRESSIVE_MERGE_NUM"]),
    flag(&["READ", "ONLY"]),
    flag(&["READ", "WRITE"]),
    value(&["TABLESPACE"]),
    value(&["KEY_BLOCK_SIZE"]),
    value(&["AUTO_INCREMENT_MODE"]),
    value(&["ENABLE_EXTENDED_ROWID"]),
    value(&["PARALLEL"]),
    flag(&["NOPARALLEL"]),
    value(&["DUPLICATE_SCOPE"]),
    value(&["TTL"]),
    value(&["KV_ATTRIBUTES"]),
    value(&["LOB_INROW_THRESHOLD"]),
    value(&["DEFAULT_LOB_INROW_THRESHOLD"]),
    value(&["SORTKEY"]),
    value(&["STORAGE_FORMAT_VERSION"]),
    value(&["TABLE_MODE"]),
    value(&["TABLET_ID"]),
    value(&["ORGANIZATION"]),
    value(&["EXPIRE_INFO"]),
];

const ORACLE_TABLE_SPECS: &[OptionSpec] = &[
    value(&["PCTUSED"]),
    value(&["INITRANS"]),
    value(&["MAXTRANS"]),
    OptionSpec {
        words: &["STORAGE"],
        shape: Shape::Group,
    },
    OptionSpec {
        words: &["COMPRESS"],
        shape: Shape::Compress,
    },
    flag(&["NOCOMPRESS"]),
    flag(&["LOGGING"]),
    flag(&["NOLOGGING"]),
    flag(&["ENABLE", "ROW", "MOVEMENT"]),
    flag(&["DISABLE", "ROW", "MOVEMENT"]),
];

pub(super) const TABLE_OPTIONS: OptionGrammar = OptionGrammar {
    specs: TABLE_SPECS,
    item: RuleKind::TableOption,
    list: RuleKind::TableOptionList,
    comma: true,
    oracle: ORACLE_TABLE_SPECS,
};

const INDEX_SPECS: &[OptionSpec] = &[
    flag(&["GLOBAL"]),
    flag(&["LOCAL"]),
    value(&["BLOCK_SIZE"]),
    value(&["COMMENT"]),
    value(&["STORING"]),
    flag(&["WITH", "ROWID"]),
    value(&["WITH", "PARSER"]),
    flag(&["VISIBLE"]),
    flag(&["INVISIBLE"]),
    value(&["KEY_BLOCK_SIZE"]),
    value(&["PARALLEL"]),
    flag(&["NOPARALLEL"]),
    value(&["USING"]),
];

pub(super) const INDEX_OPTIONS: OptionGrammar = OptionGrammar {
    specs: INDEX_SPECS,
    item: RuleKind::IndexOption,
    list: RuleKind::OptIndexOptions,
    comma: false,
    oracle: &[],
};

/// Partition attributes are collected by the element, so `list` is unused.
pub(super) const PARTITION_ATTRIBUTES: OptionGrammar = OptionGrammar {
    specs: &[
        value(&["ID"]),
        value(&["ENGINE"]),
        value(&["STORAGE", "ENGINE"]),
        value(&["COMMENT"]),
        value(&["TABLESPACE"]),
    ],
    item: RuleKind::PartitionAttributesOption,
    list: RuleKind::PartitionAttributesOption,
    comma: false,
    oracle: &[],
};

const CHARSET_SPECS: [OptionSpec; 7] = [
    value(&["CHARSET"]),
    value(&["CHARACTER", "SET"]),
    value(&["DEFAULT", "CHARSET"]),
    value(&["DEFAULT", "CHARACTER", "SET"]),
    value(&["COLLATE"]),
    value(&["DEFAULT", "COLLATE"]),
    value(&["COMMENT"]),
];

pub(super) const DATABASE_OPTIONS: OptionGrammar = OptionGrammar {
    specs: &[
        CHARSET_SPECS[0],
        CHARSET_SPECS[1],
        CHARSET_SPECS[2],
        CHARSET_SPECS[3],
        CHARSET_SPECS[4],
        CHARSET_SPECS[5],
        CHARSET_SPECS[6],
        value(&["REPLICA_NUM"]),
        value(&["PRIMARY_ZONE"]),
        flag(&["READ", "ONLY"]),
        flag(&["READ", "WRITE"]),
        value(&["DEFAULT", "TABLEGROUP"]),
        value(&["TABLEGROUP"]),
        value(&["DATABASE_ID"]),
    ],
    item: RuleKind::DatabaseOption,
    list: RuleKind::DatabaseOptionList,
    comma: true,
    oracle: &[],
};

pub(super) const TABLEGROUP_OPTIONS: OptionGrammar = OptionGrammar {
    specs: &[
        LOCALITY,
        value(&["PRIMARY_ZONE"]),
        value(&["TABLEGROUP_ID"]),
        value(&["BINDING"]),
        value(&["MAX_USED_PART_ID"]),
        value(&["SHARDING"]),
    ],
    item: RuleKind::TablegroupOption,
    list: RuleKind::TablegroupOptionList,
    comma: true,
    oracle: &[],
};

pub(super) const TABLESPACE_OPTIONS: OptionGrammar = OptionGrammar {
    specs: &[value(&["ENCRYPTION"]), value(&["ENGINE"])],
    item: RuleKind::PermanentTablespaceOption,
    list: RuleKind::PermanentTablespaceOptions,
    comma: true,
    oracle: &[],
};

pub(super) const SEQUENCE_OPTIONS: OptionGrammar = OptionGrammar {
    specs: &[
        num(&["INCREMENT", "BY"]),
        num(&["START", "WITH"]),
        num(&["MAXVALUE"]),
        flag(&["NOMAXVALUE"]),
        num(&["MINVALUE"]),
        flag(&["NOMINVALUE"]),
        flag(&["CYCLE"]),
        flag(&["NOCYCLE"]),
        num(&["CACHE"]),
        flag(&["NOCACHE"]),
        flag(&["ORDER"]),
        flag(&["NOORDER"]),
        flag(&["RESTART"]),
    ],
    item: RuleKind::SequenceOption,
    list: RuleKind::SequenceOptionList,
    comma: false,
    oracle: &[],
};

const RESOURCE_SPECS: &[OptionSpec] = &[
    value(&["MIN_CPU"]),
    value(&["MAX_CPU"]),
    value(&["MEMORY_SIZE"]),
    value(&["MIN_IOPS"]),
    value(&["MAX_IOPS"]),
    value(&["IOPS_WEIGHT"]),
    value(&["LOG_DISK_SIZE"]),
    value(&["MAX_NET_BANDWIDTH"]),
    value(&["NET_BANDWIDTH_WEIGHT"]),
    value(&["UNIT"]),
    value(&["UNIT_NUM"]),
    value(&["ZONE_LIST"]),
    value(&["REPLICA_TYPE"]),
];

pub(super) const RESOURCE_UNIT_OPTIONS: OptionGrammar = OptionGrammar {
    specs: RESOURCE_SPECS,
    item: RuleKind::ResourceUnitOption,
    list: RuleKind::OptResourceUnitOptionList,
    comma: true,
    oracle: &[],
};

pub(super) const CREATE_POOL_OPTIONS: OptionGrammar = OptionGrammar {
    specs: RESOURCE_SPECS,
    item: RuleKind::CreateResourcePoolOption,
    list: RuleKind::OptCreateResourcePoolOptionList,
    comma: true,
    oracle: &[],
};

pub(super) const ALTER_POOL_OPTIONS: OptionGrammar = OptionGrammar {
    specs: RESOURCE_SPECS,
    item: RuleKind::AlterResourcePoolOption,
    list: RuleKind::AlterResourcePoolOptionList,
    comma: true,
    oracle: &[],
};

pub(super) const TENANT_OPTIONS: OptionGrammar = OptionGrammar {
    specs: &[
        value(&["LOGONLY_REPLICA_NUM"]),
        LOCALITY,
        value(&["REPLICA_NUM"]),
        value(&["REWRITE_MERGE_VERSION"]),
        value(&["STORAGE_FORMAT_VERSION"]),
        value(&["STORAGE_FORMAT_WORK_VERSION"]),
        value(&["PRIMARY_ZONE"]),
        value(&["RESOURCE_POOL_LIST"]),
        value(&["ZONE_LIST"]),
        CHARSET_SPECS[0],
        CHARSET_SPECS[1],
        CHARSET_SPECS[2],
        CHARSET_SPECS[3],
        CHARSET_SPECS[4],
        CHARSET_SPECS[5],
        CHARSET_SPECS[6],
        flag(&["READ", "ONLY"]),
        flag(&["READ", "WRITE"]),
        value(&["DEFAULT", "TABLEGROUP"]),
        value(&["PROGRESSIVE_MERGE_NUM"]),
        value(&["ENABLE_ARBITRATION_SERVICE"]),
    ],
    item: RuleKind::TenantOption,
    list: RuleKind::OptTenantOptionList,
    comma: true,
    oracle: &[],
};

pub(super) const USER_RESOURCE_OPTIONS: OptionGrammar = OptionGrammar {
    specs: &[
        value(&["MAX_CONNECTIONS_PER_HOUR"]),
        value(&["MAX_USER_CONNECTIONS"]),
        value(&["MAX_QUERIES_PER_HOUR"]),
        value(&["MAX_UPDATES_PER_HOUR"]),
    ],
    item: RuleKind::ResourceOption,
    list: RuleKind::ResourceOptionList,
    comma: false,
    oracle: &[],
};

impl Parser<'_> {
    /// Parses an option list, returning `None` when no option starts here.
    pub(super) fn parse_option_list(
        &mut self,
        grammar: &OptionGrammar,
    ) -> Result<Option<ParseNode>, ParseError> {
        let mut c = vec![];
        while let Some(item) = self.parse_option(grammar)? {
            c.push(item);
            if grammar.comma
                && self.check(&TokenKind::Comma)
                && self.matching_spec_at(grammar, 1).is_some()
            {
                c.push(self.advance());
            }
        }
        if c.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.node(grammar.list, c)))
    }

    /// Parses one option of `grammar` when one starts at the cursor.
    pub(super) fn parse_option(
        &mut self,
        grammar: &OptionGrammar,
    ) -> Result<Option<ParseNode>, ParseError> {
        let Some(spec) = self.matching_spec_at(grammar, 0) else {
            return Ok(None);
        };
        let mut c = vec![];
        for _ in spec.words {
            c.push(self.advance());
        }
        match spec.shape {
            Shape::Flag => {}
            Shape::Value => {
                self.eat(&TokenKind::Eq, &mut c);
                self.parse_option_value(&mut c)?;
            }
            Shape::Locality => {
                self.eat(&TokenKind::Eq, &mut c);
                self.parse_option_value(&mut c)?;
                if self.check_word("FORCE") {
                    c.push(self.advance());
                }
            }
            Shape::Num => {
                self.eat(&TokenKind::Eq, &mut c);
                c.push(self.parse_simple_num()?);
            }
            Shape::Group => c.push(self.parse_storage_options()?),
            Shape::Compress => {
                let mut level = vec![];
                if !self.eat_word("BASIC", &mut level) && self.eat_word("FOR", &mut level) {
                    let workloads = ["OLTP", "QUERY", "ARCHIVE"];
                    if !workloads.iter().any(|w| self.eat_word(w, &mut level)) {
                        return Err(self.error_here("OLTP, QUERY or ARCHIVE"));
                    }
                    if !self.eat_word("LOW", &mut level) {
                        self.eat_word("HIGH", &mut level);
                    }
                }
                if !level.is_empty() {
                    c.push(self.node(RuleKind::CompressOption, level));
                }
            }
        }
        Ok(Some(self.node(grammar.item, c)))
    }

    /// Returns true when an option of `grammar` starts at the cursor.
    pub(super) fn starts_option(&self, grammar: &OptionGrammar) -> bool {
        self.matching_spec_at(grammar, 0).is_some()
    }

    /// Longest keyword sequence of `grammar` starting `n` tokens ahead.
    fn matching_spec_at(&self, grammar: &OptionGrammar, n: usize) -> Option<OptionSpec> {
        let oracle = if self.oracle() { grammar.oracle } else { &[] };
        grammar
            .specs
            .iter()
            .chain(oracle)
            .filter(|spec| {
                spec.words
                    .iter()
                    .enumerate()
                    .all(|(i, word)| self.check_word_at(n + i, word))
            })
            .max_by_key(|spec| spec.words.len())
            .copied()
    }

    /// Parses an option value: a signed number (left as terminals), a string
    /// (`complex_string_literal`), a parenthesised `expr_list`, or a word
    /// wrapped in `relation_name`.
    pub(super) fn parse_option_value(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        match self.current().kind {
            TokenKind::Minus | TokenKind::Plus => {
                c.push(self.advance());
                match self.current().kind {
                    TokenKind::IntNum | TokenKind::DecimalNum | TokenKind::ApproxNum => {
                        c.push(self.advance());
                        Ok(())
                    }
                    _ => Err(self.error_here("number")),
                }
            }
            TokenKind::IntNum | TokenKind::DecimalNum | TokenKind::ApproxNum => {
                c.push(self.advance());
                Ok(())
            }
            TokenKind::String | TokenKind::NationalString => {
                c.push(self.parse_complex_string_literal()?);
                Ok(())
            }
            TokenKind::LeftParen => {
                c.push(self.advance());
                c.push(self.parse_expr_list()?);
                c.push(self.expect(&TokenKind::RightParen)?);
                Ok(())
            }
            TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::Keyword(_) => {
                if self.is_charset_introducer() {
                    c.push(self.parse_complex_string_literal()?);
                } else {
                    let word = self.advance();
                    c.push(self.node(RuleKind::RelationName, vec![word]));
                }
                Ok(())
            }
            _ => Err(self.error_here("option value")),
        }
    }

    /// Parses `( word value ... )`, keeping the parameters as terminals.
    fn parse_storage_options(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect(&TokenKind::LeftParen)?];
        while !self.check(&TokenKind::RightParen) {
            if self.at_eof() || self.check(&TokenKind::LeftParen) {
                return Err(self.error_here("storage parameter"));
            }
            c.push(self.advance());
        }
        c.push(self.expect(&TokenKind::RightParen)?);
        Ok(self.node(RuleKind::StorageOptions, c))
    }

    /// Parses `[-]n` into `simple_num`.
    pub(super) fn parse_simple_num(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        self.eat_signed_int(&mut c)?;
        Ok(self.node(RuleKind::SimpleNum, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::OracleDialect;

    fn first_terminals(node: &ParseNode) -> Vec<String> {
        let mut out = Vec::new();
        node.visit(&mut |n| {
            if let ParseNode::Terminal(t) = n {
                out.push(t.text.clone());
            }
        });
        out
    }

    #[test]
    fn test_table_options_space_and_comma_separated() {
        let mut parser =
            Parser::new("ENGINE = InnoDB, CHARACTER SET utf8mb4 COMMENT 'x' READ ONLY");
        let list = parser.parse_option_list(&TABLE_OPTIONS).unwrap().unwrap();
        let items: Vec<_> = list
            .as_rule()
            .unwrap()
            .children
            .iter()
            .filter(|c| c.kind() == Some(RuleKind::TableOption))
            .collect();
        assert_eq!(items.len(), 4);
        assert!(parser.at_eof());
    }

    #[test]
    fn test_longest_spelling_wins() {
        let mut parser = Parser::new("DEFAULT CHARSET = gbk");
        let item = parser.parse_option(&TABLE_OPTIONS).unwrap().unwrap();
        assert_eq!(first_terminals(&item), vec!["DEFAULT", "CHARSET", "=", "gbk"]);
    }

    #[test]
    fn test_locality_force() {
        let mut parser = Parser::new("LOCALITY = 'F@z1' FORCE");
        let item = parser.parse_option(&TABLE_OPTIONS).unwrap().unwrap();
        assert_eq!(first_terminals(&item).last().map(String::as_str), Some("FORCE"));
    }

    #[test]
    fn test_sequence_numbers() {
        let mut parser = Parser::new("START WITH -5 INCREMENT BY 2 NOCYCLE");
        let list = parser.parse_option_list(&SEQUENCE_OPTIONS).unwrap().unwrap();
        let mut nums = 0;
        list.visit(&mut |n| {
            if n.kind() == Some(RuleKind::SimpleNum) {
                nums += 1;
            }
        });
        assert_eq!(nums, 2);
    }

    #[test]
    fn test_oracle_only_spellings() {
        let sql = "INITRANS 2 STORAGE (INITIAL 64K NEXT 1M) COMPRESS FOR OLTP NOLOGGING";
        let mut parser = Parser::with_dialect(sql, &OracleDialect);
        let list = parser.parse_option_list(&TABLE_OPTIONS).unwrap().unwrap();
        assert!(parser.at_eof());
        let mut kinds = Vec::new();
        list.visit(&mut |n| kinds.extend(n.kind()));
        assert_eq!(kinds.iter().filter(|k| **k == RuleKind::TableOption).count(), 4);
        assert!(kinds.contains(&RuleKind::StorageOptions));
        assert!(kinds.contains(&RuleKind::CompressOption));

        let mut parser = Parser::new("INITRANS 2");
        assert!(parser.parse_option_list(&TABLE_OPTIONS).unwrap().is_none());
    }

    #[test]
    fn test_no_option_here() {
        let mut parser = Parser::new("PARTITION BY HASH(a)");
        assert!(parser.parse_option_list(&TABLE_OPTIONS).unwrap().is_none());
    }
}
