//! Keyword-led option lists.
//!
//! Each option item reduces to a [`RawOption`]. Its list then classifies the
//! spelling with the list's [`OptionKey`] and folds the items into an
//! [`OptionSet`]; a repeated option keeps the last value and is reported when
//! the value changed.

use super::children::Children;
use super::fragment::{Fragment, RawOption};
use super::table::ReductionTable;
use crate::ast::{
    DatabaseOptionKey, Expr, Ident, IndexOptionKey, OptionEntry, OptionKey, OptionSet,
    OptionValue, ResourceOptionKey, SequenceOptionKey, TableOptionKey, TablegroupOptionKey,
    TablespaceOptionKey, TenantOptionKey, UserResourceKey,
};
use crate::cst::RuleKind;
use crate::lexer::TokenKind;

pub(super) fn register(table: &mut ReductionTable) {
    for kind in [
        RuleKind::TableOption,
        RuleKind::IndexOption,
        RuleKind::PartitionAttributesOption,
        RuleKind::DatabaseOption,
        RuleKind::TablegroupOption,
        RuleKind::PermanentTablespaceOption,
        RuleKind::SequenceOption,
        RuleKind::ResourceUnitOption,
        RuleKind::CreateResourcePoolOption,
        RuleKind::AlterResourcePoolOption,
        RuleKind::TenantOption,
        RuleKind::ResourceOption,
    ] {
        table.register(kind, raw_option);
    }
    table.register(RuleKind::StorageOptions, storage_options);
    table.register(RuleKind::CompressOption, |c| {
        Some(Ident::new(c.words().join(" "), c.span()).into())
    });
    table.register(RuleKind::TableOptionList, |c| {
        Some(Fragment::TableOptions(fold_list::<TableOptionKey>(c)))
    });
    table.register(RuleKind::OptIndexOptions, |c| {
        Some(Fragment::IndexOptions(fold_list::<IndexOptionKey>(c)))
    });
    table.register(RuleKind::DatabaseOptionList, |c| {
        Some(Fragment::DatabaseOptions(fold_list::<DatabaseOptionKey>(c)))
    });
    table.register(RuleKind::TablegroupOptionList, |c| {
        Some(Fragment::TablegroupOptions(fold_list::<TablegroupOptionKey>(c)))
    });
    table.register(RuleKind::PermanentTablespaceOptions, |c| {
        Some(Fragment::TablespaceOptions(fold_list::<TablespaceOptionKey>(c)))
    });
    table.register(RuleKind::SequenceOptionList, |c| {
        Some(Fragment::SequenceOptions(fold_list::<SequenceOptionKey>(c)))
    });
    for kind in [
        RuleKind::OptResourceUnitOptionList,
        RuleKind::OptCreateResourcePoolOptionList,
        RuleKind::AlterResourcePoolOptionList,
    ] {
        table.register(kind, |c| {
            Some(Fragment::ResourceOptions(fold_list::<ResourceOptionKey>(c)))
        });
    }
    table.register(RuleKind::OptTenantOptionList, |c| {
        Some(Fragment::TenantOptions(fold_list::<TenantOptionKey>(c)))
    });
    table.register(RuleKind::ResourceOptionList, |c| {
        Some(Fragment::UserResources(fold_list::<UserResourceKey>(c)))
    });
}

/// Reads a signed number left as terminals (`-`, `5`).
fn number(children: &Children<'_>) -> Option<String> {
    let mut negative = false;
    for (_, token) in children.tokens() {
        match token.kind {
            TokenKind::Minus => negative = true,
            TokenKind::Plus => negative = false,
            TokenKind::IntNum | TokenKind::DecimalNum | TokenKind::ApproxNum => {
                return Some(if negative {
                    format!("-{}", token.text)
                } else {
                    token.text.clone()
                });
            }
            _ => {}
        }
    }
    None
}

/// Parameter names that open a new entry of a STORAGE clause.
const STORAGE_PARAMETERS: &[&str] = &[
    "INITIAL",
    "NEXT",
    "MINEXTENTS",
    "MAXEXTENTS",
    "PCTINCREASE",
    "FREELISTS",
    "FREELIST",
    "OPTIMAL",
    "BUFFER_POOL",
    "FLASH_CACHE",
    "CELL_FLASH_CACHE",
    "MAXSIZE",
    "ENCRYPT",
];

/// Splits `( INITIAL 64K NEXT 1M )` into one text per parameter. Tokens
/// written without a gap (`64` `K`) are joined without a space.
fn storage_options(children: &mut Children<'_>) -> Option<Fragment> {
    let mut entries: Vec<Ident> = Vec::new();
    let mut previous_end = None;
    for (_, token) in children.tokens() {
        if matches!(token.kind, TokenKind::LeftParen | TokenKind::RightParen) {
            continue;
        }
        let opens = STORAGE_PARAMETERS.iter().any(|p| token.is_word(p));
        match entries.last_mut() {
            Some(entry) if !opens => {
                if previous_end != Some(token.span.start) {
                    entry.value.push(' ');
                }
                entry.value.push_str(&token.text);
                entry.span = entry.span.merge(token.span);
            }
            _ => entries.push(Ident::new(token.text.to_ascii_uppercase(), token.span)),
        }
        previous_end = Some(token.span.end);
    }
    Some(Fragment::Names(entries))
}

fn raw_option(children: &mut Children<'_>) -> Option<Fragment> {
    let words = children.leading_words();
    let force = children
        .tokens()
        .skip(1)
        .any(|(_, t)| t.is_word("FORCE"));
    let value = if let Some(list) = children.take::<Vec<Expr>>() {
        Some(OptionValue::List(list))
    } else if let Some(expr) = children.take::<Expr>() {
        match expr {
            Expr::Literal { value, .. } => Some(OptionValue::String(value)),
            other => Some(OptionValue::List(vec![other])),
        }
    } else if let Some(word) = children.take::<Ident>() {
        Some(OptionValue::Word(word))
    } else if let Some(group) = children.take::<Vec<Ident>>() {
        Some(OptionValue::Group(group.into_iter().map(|i| i.value).collect()))
    } else {
        number(children).map(OptionValue::Number)
    };
    Some(
        RawOption {
            words,
            value,
            force,
            span: children.span(),
        }
        .into(),
    )
}

fn fold_list<K: OptionKey>(children: &mut Children<'_>) -> OptionSet<K> {
    let raw = children.take_all::<RawOption>();
    fold(children, raw)
}

/// Classifies raw options into a set. A repeated option keeps the last value;
/// a changed value is reported as ambiguous.
pub(super) fn fold<K: OptionKey>(
    children: &mut Children<'_>,
    raw: Vec<RawOption>,
) -> OptionSet<K> {
    let mut set = OptionSet::new();
    for option in raw {
        let Some((key, switch)) = K::classify(&option.words) else {
            children.mismatch(format!("unknown option {}", option.words));
            continue;
        };
        let value = match (switch, option.value) {
            (Some(on), _) => OptionValue::Switch(on),
            (None, Some(value)) => value,
            (None, None) => OptionValue::Switch(true),
        };
        let span = option.span;
        let entry = OptionEntry {
            key,
            value,
            force: option.force,
            span,
        };
        let changed = set
            .get(key)
            .is_some_and(|previous| !previous.value.same_as(&entry.value));
        set.insert(entry);
        if changed {
            children.ambiguous(
                format!("option {} repeated with a different value", key.as_str()),
                span,
            );
        }
    }
    set
}
