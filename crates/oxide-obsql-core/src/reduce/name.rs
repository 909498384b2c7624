//! Identifiers, qualified names and name lists.

use super::children::Children;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{unescape, Ident, ObjectName, UserName};
use crate::cst::{RuleKind, Terminal};
use crate::lexer::TokenKind;

pub(super) fn register(table: &mut ReductionTable) {
    for kind in [
        RuleKind::RelationName,
        RuleKind::ColumnName,
        RuleKind::ColumnLabel,
        RuleKind::FunctionName,
        RuleKind::ConstraintName,
        RuleKind::CollationName,
        RuleKind::CharsetName,
        RuleKind::StmtName,
        RuleKind::FormatName,
        RuleKind::ColumnAliasName,
        RuleKind::Role,
        RuleKind::User,
    ] {
        table.register(kind, single_name);
    }
    table.register(RuleKind::RelationFactor, relation_factor);
    for kind in [
        RuleKind::NameList,
        RuleKind::ColumnList,
        RuleKind::AliasNameList,
        RuleKind::ColumnNameList,
        RuleKind::DropPartitionNameList,
        RuleKind::IndexList,
    ] {
        table.register(kind, name_list);
    }
    table.register(RuleKind::IndexElement, index_element);
    table.register(RuleKind::DateUnit, date_unit);
    table.register(RuleKind::UserWithHostName, user_with_host_name);
    table.register(RuleKind::RoleWithHost, user_with_host_name);
}

/// Strips backticks or double quotes and collapses doubled quote characters.
fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && matches!(open, '`' | '"') => {
            let doubled: String = [open, open].iter().collect();
            chars.as_str().replace(&doubled, &open.to_string())
        }
        _ => text.to_owned(),
    }
}

/// Builds an identifier from a name, quoted name or string token.
pub(super) fn ident_from(token: &Terminal) -> Ident {
    match token.kind {
        TokenKind::QuotedIdentifier => Ident::quoted(unquote(&token.text), token.span),
        TokenKind::String => Ident::quoted(unescape(&token.text), token.span),
        _ => Ident::new(token.text.clone(), token.span),
    }
}

fn single_name(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(token) = children.first_token().cloned() else {
        children.mismatch("expected a name");
        return None;
    };
    Some(ident_from(&token).into())
}

fn relation_factor(children: &mut Children<'_>) -> Option<Fragment> {
    let mut parts: Vec<Ident> = children.take_all();
    let name = match parts.pop() {
        Some(name) => name,
        None => {
            children.mismatch("expected a relation name");
            return None;
        }
    };
    Some(
        ObjectName {
            schema: parts.pop(),
            name,
            span: children.span(),
        }
        .into(),
    )
}

fn name_list(children: &mut Children<'_>) -> Option<Fragment> {
    Some(Fragment::Names(children.take_all()))
}

fn index_element(children: &mut Children<'_>) -> Option<Fragment> {
    if let Some(name) = children.take::<Ident>() {
        return Some(name.into());
    }
    let token = children.first_token()?;
    Some(Ident::new(token.text.to_ascii_uppercase(), token.span).into())
}

fn date_unit(children: &mut Children<'_>) -> Option<Fragment> {
    let token = children.first_token()?;
    Some(Ident::new(token.text.to_ascii_uppercase(), token.span).into())
}

fn host_from(token: &Terminal) -> String {
    match token.kind {
        TokenKind::UserVariable => {
            let bare = token.text.trim_start_matches('@');
            match bare.chars().next() {
                Some('\'' | '"') => unescape(bare),
                Some('`') => unquote(bare),
                _ => bare.to_owned(),
            }
        }
        _ => ident_from(token).value,
    }
}

fn user_with_host_name(children: &mut Children<'_>) -> Option<Fragment> {
    let user: Ident = children.require("a user name");
    let host = children
        .tokens()
        .filter(|(_, t)| t.kind != TokenKind::At)
        .last()
        .map(|(_, t)| host_from(t));
    Some(
        UserName {
            user: user.value,
            host,
            span: children.span(),
        }
        .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("`a``b`"), "a`b");
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("`"), "`");
    }

    #[test]
    fn test_host_from_user_variable() {
        let t = Terminal::new(TokenKind::UserVariable, "@'%'", crate::lexer::Span::new(0, 4));
        assert_eq!(host_from(&t), "%");
        let span = crate::lexer::Span::new(0, 10);
        let t = Terminal::new(TokenKind::UserVariable, "@localhost", span);
        assert_eq!(host_from(&t), "localhost");
    }
}
