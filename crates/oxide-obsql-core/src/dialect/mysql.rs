//! MySQL-mode dialect.

use super::Dialect;

/// MySQL compatibility mode: backtick identifiers, `"..."` strings and `||`
/// as logical OR.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}
