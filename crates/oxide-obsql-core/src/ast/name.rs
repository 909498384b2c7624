//! Identifiers and qualified names.

use serde::{Deserialize, Serialize};

use crate::lexer::Span;

/// An identifier with quotes removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    /// The identifier text, unquoted and unescaped.
    pub value: String,
    /// Whether the identifier was quoted in the source.
    pub quoted: bool,
    /// Source span.
    pub span: Span,
}

impl Ident {
    /// Creates an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            quoted: false,
            span,
        }
    }

    /// Creates a quoted identifier.
    #[must_use]
    pub fn quoted(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            quoted: true,
            span,
        }
    }

    /// Compares the identifier with `other`, ignoring ASCII case.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }
}

impl core::fmt::Display for Ident {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.value)
    }
}

/// A possibly schema-qualified object name (`t`, `db.t`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectName {
    /// Schema (database) qualifier.
    pub schema: Option<Ident>,
    /// Object name.
    pub name: Ident,
    /// Source span.
    pub span: Span,
}

impl ObjectName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn bare(name: Ident) -> Self {
        let span = name.span;
        Self {
            schema: None,
            name,
            span,
        }
    }
}

impl core::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        write!(f, "{}", self.name)
    }
}

/// An account name: `user[@host]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName {
    /// User part.
    pub user: String,
    /// Host part.
    pub host: Option<String>,
    /// Source span.
    pub span: Span,
}

impl core::fmt::Display for UserName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.host {
            Some(host) => write!(f, "'{}'@'{host}'", self.user),
            None => write!(f, "'{}'", self.user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_display() {
        let name = ObjectName {
            schema: Some(Ident::new("db", Span::new(0, 2))),
            name: Ident::quoted("t", Span::new(3, 6)),
            span: Span::new(0, 6),
        };
        assert_eq!(name.to_string(), "db.t");
        assert_eq!(ObjectName::bare(Ident::new("t", Span::new(0, 1))).span, Span::new(0, 1));
    }

    #[test]
    fn test_user_display() {
        let user = UserName {
            user: "alice".into(),
            host: Some("%".into()),
            span: Span::default(),
        };
        assert_eq!(user.to_string(), "'alice'@'%'");
    }
}
