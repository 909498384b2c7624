//! Column data types and CAST targets.

use super::children::Children;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{DataType, Expr, Ident, LengthUnit, TimeZone, TypeFamily};
use crate::cst::RuleKind;
use crate::lexer::{Keyword, TokenKind};

const TYPE_FAMILIES: &[(RuleKind, TypeFamily)] = &[
    (RuleKind::IntTypeI, TypeFamily::Integer),
    (RuleKind::FloatTypeI, TypeFamily::Float),
    (RuleKind::NumberTypeI, TypeFamily::Decimal),
    (RuleKind::BoolTypeI, TypeFamily::Boolean),
    (RuleKind::DatetimeTypeI, TypeFamily::Temporal),
    (RuleKind::DateYearTypeI, TypeFamily::Temporal),
    (RuleKind::TextTypeI, TypeFamily::Text),
    (RuleKind::CharacterTypeI, TypeFamily::Character),
    (RuleKind::BlobTypeI, TypeFamily::Blob),
    (RuleKind::BinaryTypeI, TypeFamily::Binary),
    (RuleKind::BitTypeI, TypeFamily::Bit),
    (RuleKind::JsonTypeI, TypeFamily::Json),
    (RuleKind::GeoTypeI, TypeFamily::Spatial),
    (RuleKind::CollectionTypeI, TypeFamily::Collection),
    (RuleKind::VectorTypeI, TypeFamily::Vector),
    (RuleKind::RoaringbitmapTypeI, TypeFamily::Roaringbitmap),
    (RuleKind::RowidTypeI, TypeFamily::Rowid),
];

pub(super) fn register(table: &mut ReductionTable) {
    for (kind, _) in TYPE_FAMILIES {
        table.register(*kind, type_name);
    }
    table.register(RuleKind::IntervalTypeI, interval_type);
    table.register(RuleKind::DataType, data_type);
    table.register(RuleKind::CastDataType, cast_data_type);
}

fn family_of(kind: RuleKind) -> TypeFamily {
    TYPE_FAMILIES
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(TypeFamily::Text, |(_, family)| *family)
}

fn cast_family(word: &str) -> TypeFamily {
    match word {
        "BINARY" => TypeFamily::Binary,
        "CHAR" | "CHARACTER" | "NCHAR" => TypeFamily::Character,
        "DATE" | "DATETIME" | "TIME" | "TIMESTAMP" | "YEAR" => TypeFamily::Temporal,
        "DECIMAL" | "NUMBER" => TypeFamily::Decimal,
        "JSON" => TypeFamily::Json,
        "DOUBLE" | "FLOAT" => TypeFamily::Float,
        "INT" | "INTEGER" => TypeFamily::Integer,
        _ => TypeFamily::Cast,
    }
}

fn type_name(children: &mut Children<'_>) -> Option<Fragment> {
    let name = children.words().join(" ");
    Some(DataType::new(name, family_of(children.rule()), children.span()).into())
}

/// `INTERVAL YEAR TO MONTH` or `INTERVAL DAY TO SECOND`. A precision before
/// TO is the length, one after it the scale.
fn interval_type(children: &mut Children<'_>) -> Option<Fragment> {
    let mut ty = DataType::new(
        children.words().join(" "),
        TypeFamily::Interval,
        children.span(),
    );
    let to = children.find_keyword(Keyword::To).unwrap_or(usize::MAX);
    for (index, token) in children.tokens() {
        if token.kind != TokenKind::IntNum {
            continue;
        }
        if index < to {
            ty.length = Some(token.text.clone());
        } else {
            ty.scale = Some(token.text.clone());
        }
    }
    Some(ty.into())
}

/// Applies the length, scale and attribute tokens left after the type name.
fn apply_modifiers(children: &mut Children<'_>, ty: &mut DataType) {
    let tokens: Vec<_> = children.tokens().map(|(_, t)| t.clone()).collect();
    let mut numbers = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::IntNum | TokenKind::Star))
        .map(|t| t.text.clone());
    if let Some(length) = numbers.next() {
        ty.length = Some(length);
    }
    if let Some(scale) = numbers.next() {
        ty.scale = Some(scale);
    }
    ty.length_unit = tokens.windows(2).find_map(|pair| {
        if !matches!(pair[0].kind, TokenKind::IntNum | TokenKind::Star) {
            None
        } else if pair[1].is_word("BYTE") {
            Some(LengthUnit::Byte)
        } else if pair[1].is_keyword(Keyword::Char) {
            Some(LengthUnit::Char)
        } else {
            None
        }
    });
    if children.has_word("ZONE") {
        ty.time_zone = Some(if children.has_word("LOCAL") {
            TimeZone::Local
        } else {
            TimeZone::With
        });
    }
    ty.unsigned |= children.has_word("UNSIGNED");
    ty.zerofill = children.has_word("ZEROFILL");
    ty.collation = children.take_after::<Ident>(Keyword::Collate);
    ty.charset = children.take::<Ident>();
}

fn data_type(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(mut ty) = children.take::<DataType>() else {
        children.mismatch("expected a type name");
        return None;
    };
    ty.values = children
        .take_all::<Expr>()
        .iter()
        .filter_map(|e| e.as_literal().and_then(crate::ast::Literal::string_value))
        .collect();
    ty.binary = children.has_keyword(Keyword::Binary);
    apply_modifiers(children, &mut ty);
    ty.span = children.span();
    Some(ty.into())
}

fn cast_data_type(children: &mut Children<'_>) -> Option<Fragment> {
    let head = children.first_token()?.text.to_ascii_uppercase();
    let mut name = head.clone();
    let signed = head == "SIGNED" || head == "UNSIGNED";
    if let Some((_, t)) = children
        .tokens()
        .nth(1)
        .filter(|(_, t)| signed && (t.is_word("INT") || t.is_word("INTEGER")))
    {
        name = format!("{head} {}", t.text.to_ascii_uppercase());
    }
    let mut ty = DataType::new(name, cast_family(&head), children.span());
    ty.unsigned = head == "UNSIGNED";
    // The head word is never the BINARY attribute.
    ty.binary = children
        .tokens()
        .skip(1)
        .any(|(_, t)| t.is_keyword(Keyword::Binary));
    apply_modifiers(children, &mut ty);
    Some(ty.into())
}

#[cfg(test)]
mod tests {
    use super::super::testing::{reduce_in, select_item, statement};
    use super::*;
    use crate::ast::Statement;
    use crate::dialect::{MySqlDialect, OracleDialect};

    fn cast_type(sql: &str) -> DataType {
        match select_item(sql) {
            Expr::Cast { data_type, .. } => data_type,
            other => panic!("not a cast: {other:?}"),
        }
    }

    #[test]
    fn test_cast_targets() {
        let ty = cast_type("CAST(a AS UNSIGNED INTEGER)");
        assert_eq!(ty.name, "UNSIGNED INTEGER");
        assert_eq!(ty.family, TypeFamily::Cast);
        assert!(ty.unsigned);

        let ty = cast_type("CAST(a AS DECIMAL(10, 2))");
        assert_eq!(ty.family, TypeFamily::Decimal);
        assert_eq!(ty.length.as_deref(), Some("10"));
        assert_eq!(ty.scale.as_deref(), Some("2"));

        let ty = cast_type("CAST(a AS BINARY(4))");
        assert_eq!(ty.family, TypeFamily::Binary);
        assert!(!ty.binary);
    }

    #[test]
    fn test_cast_char_with_charset() {
        let ty = cast_type("CAST(a AS CHAR(10) CHARACTER SET utf8mb4)");
        assert_eq!(ty.length.as_deref(), Some("10"));
        assert_eq!(ty.charset.map(|c| c.value).as_deref(), Some("utf8mb4"));
    }

    #[test]
    fn test_column_type_with_length_and_collation() {
        let Statement::CreateTable(create) = statement(
            "CREATE TABLE t (a VARCHAR(20) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin, \
             b DECIMAL(10, 2) UNSIGNED ZEROFILL)",
        ) else {
            panic!("not a CREATE TABLE");
        };
        let a = &create.columns[0].data_type;
        assert_eq!(a.length.as_deref(), Some("20"));
        assert!(a.scale.is_none());
        assert_eq!(a.charset.as_ref().map(|c| c.value.as_str()), Some("utf8mb4"));
        assert_eq!(a.collation.as_ref().map(|c| c.value.as_str()), Some("utf8mb4_bin"));

        let b = &create.columns[1].data_type;
        assert_eq!(b.length.as_deref(), Some("10"));
        assert_eq!(b.scale.as_deref(), Some("2"));
        assert!(b.unsigned);
        assert!(b.zerofill);
    }

    fn oracle_column_types(sql: &str) -> Vec<DataType> {
        let (statement, diagnostics) = reduce_in(sql, &OracleDialect);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let Statement::CreateTable(create) = statement else {
            panic!("not a CREATE TABLE");
        };
        create.columns.into_iter().map(|c| c.data_type).collect()
    }

    #[test]
    fn test_oracle_character_and_number_types() {
        let types = oracle_column_types(
            "CREATE TABLE t (a VARCHAR2(10 CHAR), b NVARCHAR2(20), c NUMBER(*, 2), \
             d RAW(16), e CLOB, f BINARY_DOUBLE, g ROWID)",
        );
        assert_eq!(types[0].name, "VARCHAR2");
        assert_eq!(types[0].family, TypeFamily::Character);
        assert_eq!(types[0].length.as_deref(), Some("10"));
        assert_eq!(types[0].length_unit, Some(LengthUnit::Char));
        assert_eq!(types[1].length_unit, None);
        assert_eq!(types[2].length.as_deref(), Some("*"));
        assert_eq!(types[2].scale.as_deref(), Some("2"));
        assert_eq!(types[3].family, TypeFamily::Binary);
        assert_eq!(types[4].family, TypeFamily::Text);
        assert_eq!(types[5].family, TypeFamily::Float);
        assert_eq!(types[6].family, TypeFamily::Rowid);
    }

    #[test]
    fn test_oracle_timestamp_and_interval_types() {
        let types = oracle_column_types(
            "CREATE TABLE t (a TIMESTAMP(6) WITH LOCAL TIME ZONE, b TIMESTAMP WITH TIME ZONE, \
             c INTERVAL YEAR(2) TO MONTH, d INTERVAL DAY TO SECOND(3))",
        );
        assert_eq!(types[0].length.as_deref(), Some("6"));
        assert_eq!(types[0].time_zone, Some(TimeZone::Local));
        assert_eq!(types[1].time_zone, Some(TimeZone::With));
        assert_eq!(types[2].family, TypeFamily::Interval);
        assert_eq!(types[2].name, "INTERVAL YEAR TO MONTH");
        assert_eq!(types[2].length.as_deref(), Some("2"));
        assert_eq!(types[3].name, "INTERVAL DAY TO SECOND");
        assert!(types[3].length.is_none());
        assert_eq!(types[3].scale.as_deref(), Some("3"));
    }

    #[test]
    fn test_oracle_type_words_are_names_in_mysql_mode() {
        let (statement, diagnostics) = reduce_in("SELECT varchar2 FROM t", &MySqlDialect);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert!(matches!(statement, Statement::Query(_)));
    }

    #[test]
    fn test_cast_family_fallback() {
        assert_eq!(cast_family("SIGNED"), TypeFamily::Cast);
        assert_eq!(cast_family("YEAR"), TypeFamily::Temporal);
    }
}
