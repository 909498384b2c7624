//! Oracle-mode dialect.

use super::Dialect;

/// Oracle compatibility mode: `"..."` identifiers and `||` as string
/// concatenation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    fn pipes_as_concat(&self) -> bool {
        true
    }

    fn oracle_syntax(&self) -> bool {
        true
    }
}
