//! Binding powers for the two operator levels of the grammar.
//!
//! `expr` joins boolean terms (`OR`, `XOR`, `AND`, `NOT`); `bit_expr` joins
//! arithmetic and bitwise terms. Comparison and predicate operators sit
//! between the two and are handled by fixed-shape productions.

use crate::lexer::{Keyword, TokenKind};

/// Prefix binding power of `NOT` at the `expr` level.
pub const NOT_BINDING_POWER: u8 = 7;

/// Returns the infix binding power of a logical operator.
///
/// `||` is a logical OR unless the dialect treats it as concatenation.
#[must_use]
pub const fn logical_binding_power(kind: &TokenKind, pipes_as_concat: bool) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Concat if !pipes_as_concat => Some((1, 2)),
        TokenKind::Keyword(Keyword::Xor) => Some((3, 4)),
        TokenKind::Keyword(Keyword::And) | TokenKind::AndAnd => Some((5, 6)),
        _ => None,
    }
}

/// Returns the infix binding power of an arithmetic or bitwise operator.
///
/// Every operator is left associative.
#[must_use]
pub const fn bit_binding_power(kind: &TokenKind, pipes_as_concat: bool) -> Option<(u8, u8)> {
    match kind {
        TokenKind::BitOr => Some((1, 2)),
        TokenKind::BitAnd => Some((3, 4)),
        TokenKind::LeftShift | TokenKind::RightShift => Some((5, 6)),
        TokenKind::Plus | TokenKind::Minus => Some((7, 8)),
        TokenKind::Concat if pipes_as_concat => Some((7, 8)),
        TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Keyword(Keyword::Div | Keyword::Mod) => Some((9, 10)),
        TokenKind::Caret => Some((11, 12)),
        _ => None,
    }
}

/// Returns true for the comparison operators of `bool_pri`.
#[must_use]
pub const fn is_comparison(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::NullSafeEq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
    )
}

/// Returns true for the prefix operators of `simple_expr`.
#[must_use]
pub const fn is_simple_prefix(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Tilde
            | TokenKind::Bang
            | TokenKind::Keyword(Keyword::Binary)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_binds_tighter_than_or() {
        let or = logical_binding_power(&TokenKind::Keyword(Keyword::Or), false).unwrap();
        let and = logical_binding_power(&TokenKind::Keyword(Keyword::And), false).unwrap();
        let xor = logical_binding_power(&TokenKind::Keyword(Keyword::Xor), false).unwrap();
        assert!(and.0 > xor.0);
        assert!(xor.0 > or.0);
        assert!(NOT_BINDING_POWER > and.1);
    }

    #[test]
    fn test_pipes_depend_on_dialect() {
        assert_eq!(logical_binding_power(&TokenKind::Concat, false), Some((1, 2)));
        assert_eq!(logical_binding_power(&TokenKind::Concat, true), None);
        assert_eq!(bit_binding_power(&TokenKind::Concat, true), Some((7, 8)));
        assert_eq!(bit_binding_power(&TokenKind::Concat, false), None);
    }

    #[test]
    fn test_arithmetic_precedence() {
        let add = bit_binding_power(&TokenKind::Plus, false).unwrap();
        let mul = bit_binding_power(&TokenKind::Star, false).unwrap();
        let xor = bit_binding_power(&TokenKind::Caret, false).unwrap();
        let or = bit_binding_power(&TokenKind::BitOr, false).unwrap();
        assert!(mul.0 > add.0);
        assert!(xor.0 > mul.0);
        assert!(add.0 > or.0);
        assert_eq!(
            bit_binding_power(&TokenKind::Keyword(Keyword::Div), false),
            Some((9, 10))
        );
    }

    #[test]
    fn test_comparison_operators() {
        assert!(is_comparison(&TokenKind::NullSafeEq));
        assert!(is_comparison(&TokenKind::NotEq));
        assert!(!is_comparison(&TokenKind::Plus));
    }
}
