//! Column and CAST data types.

use serde::{Deserialize, Serialize};

use super::name::Ident;
use crate::lexer::Span;

/// Broad family of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFamily {
    Integer,
    Float,
    Decimal,
    Boolean,
    Bit,
    Character,
    Text,
    Blob,
    Binary,
    Temporal,
    Json,
    Spatial,
    /// ENUM and SET.
    Collection,
    Vector,
    Roaringbitmap,
    /// A CAST target that only exists there (`SIGNED`, `UNSIGNED`).
    Cast,
    /// Oracle `INTERVAL YEAR TO MONTH` and `INTERVAL DAY TO SECOND`.
    Interval,
    /// Oracle `ROWID` and `UROWID`.
    Rowid,
}

/// Unit of an Oracle character length (`VARCHAR2(10 CHAR)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Byte,
    Char,
}

impl LengthUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Byte => "BYTE",
            Self::Char => "CHAR",
        }
    }
}

/// Time zone attribute of an Oracle `TIMESTAMP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeZone {
    /// WITH TIME ZONE
    With,
    /// WITH LOCAL TIME ZONE
    Local,
}

/// A data type with its modifiers.
///
/// Lengths and scales keep their source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    /// Type name, upper case, words joined by a space (`DOUBLE PRECISION`).
    pub name: String,
    /// Type family.
    pub family: TypeFamily,
    /// Length, display width or precision. `*` for `NUMBER(*, s)`.
    pub length: Option<String>,
    /// Scale of fixed-point types, or the fractional second precision of
    /// `INTERVAL DAY TO SECOND`.
    pub scale: Option<String>,
    /// BYTE or CHAR after a character length.
    pub length_unit: Option<LengthUnit>,
    /// Time zone attribute of a timestamp.
    pub time_zone: Option<TimeZone>,
    /// ENUM / SET members, unescaped.
    pub values: Vec<String>,
    /// UNSIGNED.
    pub unsigned: bool,
    /// ZEROFILL.
    pub zerofill: bool,
    /// BINARY attribute of character types.
    pub binary: bool,
    /// CHARACTER SET.
    pub charset: Option<Ident>,
    /// COLLATE.
    pub collation: Option<Ident>,
    /// Source span.
    pub span: Span,
}

impl DataType {
    /// Creates a bare type of the given family.
    #[must_use]
    pub fn new(name: impl Into<String>, family: TypeFamily, span: Span) -> Self {
        Self {
            name: name.into(),
            family,
            length: None,
            scale: None,
            length_unit: None,
            time_zone: None,
            values: Vec::new(),
            unsigned: false,
            zerofill: false,
            binary: false,
            charset: None,
            collation: None,
            span,
        }
    }

    /// Returns true for the numeric families.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self.family,
            TypeFamily::Integer | TypeFamily::Float | TypeFamily::Decimal | TypeFamily::Bit
        )
    }

    /// Writes `INTERVAL DAY(p) TO SECOND(s)`, precisions next to their field.
    fn fmt_interval(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (leading, trailing) = self.name.split_once(" TO ").unwrap_or((&self.name, ""));
        f.write_str(leading)?;
        if let Some(length) = &self.length {
            write!(f, "({length})")?;
        }
        if !trailing.is_empty() {
            write!(f, " TO {trailing}")?;
        }
        if let Some(scale) = &self.scale {
            write!(f, "({scale})")?;
        }
        Ok(())
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.family == TypeFamily::Interval {
            return self.fmt_interval(f);
        }
        f.write_str(&self.name)?;
        if !self.values.is_empty() {
            let quoted: Vec<_> = self.values.iter().map(|v| format!("'{v}'")).collect();
            write!(f, "({})", quoted.join(", "))?;
        } else if let Some(length) = &self.length {
            let unit = self.length_unit.map_or("", |u| u.as_str());
            let sep = if unit.is_empty() { "" } else { " " };
            match &self.scale {
                Some(scale) => write!(f, "({length}{sep}{unit}, {scale})")?,
                None => write!(f, "({length}{sep}{unit})")?,
            }
        }
        match self.time_zone {
            Some(TimeZone::With) => f.write_str(" WITH TIME ZONE")?,
            Some(TimeZone::Local) => f.write_str(" WITH LOCAL TIME ZONE")?,
            None => {}
        }
        if self.unsigned {
            f.write_str(" UNSIGNED")?;
        }
        if self.zerofill {
            f.write_str(" ZEROFILL")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut ty = DataType::new("DECIMAL", TypeFamily::Decimal, Span::default());
        ty.length = Some("10".into());
        ty.scale = Some("2".into());
        ty.unsigned = true;
        assert_eq!(ty.to_string(), "DECIMAL(10, 2) UNSIGNED");

        let mut set = DataType::new("ENUM", TypeFamily::Collection, Span::default());
        set.values = vec!["a".into(), "b".into()];
        assert_eq!(set.to_string(), "ENUM('a', 'b')");
        assert!(!set.is_numeric());
    }

    #[test]
    fn test_display_oracle_types() {
        let mut ty = DataType::new("VARCHAR2", TypeFamily::Character, Span::default());
        ty.length = Some("10".into());
        ty.length_unit = Some(LengthUnit::Char);
        assert_eq!(ty.to_string(), "VARCHAR2(10 CHAR)");

        let mut ty = DataType::new("TIMESTAMP", TypeFamily::Temporal, Span::default());
        ty.length = Some("6".into());
        ty.time_zone = Some(TimeZone::Local);
        assert_eq!(ty.to_string(), "TIMESTAMP(6) WITH LOCAL TIME ZONE");

        let mut ty = DataType::new("INTERVAL DAY TO SECOND", TypeFamily::Interval, Span::default());
        ty.length = Some("2".into());
        ty.scale = Some("6".into());
        assert_eq!(ty.to_string(), "INTERVAL DAY(2) TO SECOND(6)");
    }
}
