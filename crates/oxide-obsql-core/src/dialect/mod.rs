//! SQL Dialect support.
//!
//! OceanBase runs tenants in MySQL mode or Oracle mode. The two modes share
//! most of the lexical grammar; this trait captures the places where they
//! differ.

mod mysql;
mod oracle;

pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;

/// Trait for dialect-specific lexical and operator behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char;

    /// Returns whether `"..."` denotes an identifier rather than a string.
    fn double_quote_is_identifier(&self) -> bool {
        self.identifier_quote() == '"'
    }

    /// Returns whether `||` is string concatenation rather than logical OR.
    fn pipes_as_concat(&self) -> bool {
        false
    }

    /// Returns whether Oracle-only clauses, types and table options are
    /// accepted: `FETCH FIRST`, `CONNECT BY`, `(+)`, `VARCHAR2` and the like.
    fn oracle_syntax(&self) -> bool {
        false
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }
}

/// Looks a dialect up by name (`mysql` or `oracle`, case-insensitive).
#[must_use]
pub fn dialect_for(name: &str) -> Option<&'static dyn Dialect> {
    if name.eq_ignore_ascii_case("mysql") {
        Some(&MySqlDialect)
    } else if name.eq_ignore_ascii_case("oracle") {
        Some(&OracleDialect)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_for() {
        assert_eq!(dialect_for("MySQL").map(Dialect::name), Some("mysql"));
        assert_eq!(dialect_for("oracle").map(Dialect::name), Some("oracle"));
        assert!(dialect_for("sqlite").is_none());
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(MySqlDialect.quote_identifier("a`b"), "`a``b`");
        assert_eq!(OracleDialect.quote_identifier("name"), "\"name\"");
    }

    #[test]
    fn test_oracle_syntax() {
        assert!(OracleDialect.oracle_syntax());
        assert!(!MySqlDialect.oracle_syntax());
    }
}
