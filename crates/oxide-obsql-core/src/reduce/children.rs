//! Access to the reduced children of one rule.

use super::context::ReduceCtx;
use super::fragment::{Fragment, FromFragment, Placeholder};
use crate::cst::{RuleKind, Terminal};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::{Keyword, Span, TokenKind};

/// Keywords, reserved or not, and bare identifiers.
const fn is_word(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Identifier | TokenKind::Keyword(_))
}

/// The reduced children of one rule, in document order.
///
/// Taking a child removes it, so a hook can pull each piece exactly once and
/// later lookups skip what was already consumed.
pub struct Children<'a> {
    rule: RuleKind,
    span: Span,
    items: Vec<Option<Fragment>>,
    ctx: &'a mut ReduceCtx,
}

impl<'a> Children<'a> {
    pub(crate) fn new(
        rule: RuleKind,
        span: Span,
        items: Vec<Fragment>,
        ctx: &'a mut ReduceCtx,
    ) -> Self {
        Self {
            rule,
            span,
            items: items.into_iter().map(Some).collect(),
            ctx,
        }
    }

    #[must_use]
    pub const fn rule(&self) -> RuleKind {
        self.rule
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    pub fn ctx(&mut self) -> &mut ReduceCtx {
        &mut *self.ctx
    }

    /// Number of child slots, taken ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Option::is_none)
    }

    /// Returns the child at `index` unless it was taken.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Returns the index of the first remaining `T` in `start..end`.
    #[must_use]
    pub fn position<T: FromFragment>(&self, start: usize, end: usize) -> Option<usize> {
        let end = end.min(self.items.len());
        (start..end).find(|&i| self.get(i).is_some_and(T::accepts))
    }

    /// Takes the first remaining `T` in `start..end`.
    pub fn take_range<T: FromFragment>(&mut self, start: usize, end: usize) -> Option<T> {
        let index = self.position::<T>(start, end)?;
        let fragment = self.items[index].take()?;
        match T::from_fragment(fragment) {
            Ok(value) => Some(value),
            Err(fragment) => {
                self.items[index] = Some(fragment);
                None
            }
        }
    }

    /// Takes the first remaining `T`.
    pub fn take<T: FromFragment>(&mut self) -> Option<T> {
        self.take_range(0, self.items.len())
    }

    /// Takes the first remaining `T` at or after `start`.
    pub fn take_from<T: FromFragment>(&mut self, start: usize) -> Option<T> {
        self.take_range(start, self.items.len())
    }

    /// Takes every remaining `T`, in order.
    pub fn take_all<T: FromFragment>(&mut self) -> Vec<T> {
        self.take_all_range(0, self.items.len())
    }

    /// Takes every remaining `T` in `start..end`, in order.
    pub fn take_all_range<T: FromFragment>(&mut self, start: usize, end: usize) -> Vec<T> {
        let mut values = Vec::new();
        let mut from = start;
        while let Some(index) = self.position::<T>(from, end) {
            if let Some(value) = self.take_range(index, index + 1) {
                values.push(value);
            }
            from = index + 1;
        }
        values
    }

    /// Takes the first `T` after the given keyword token.
    pub fn take_after<T: FromFragment>(&mut self, keyword: Keyword) -> Option<T> {
        let start = self.find_keyword(keyword)?;
        self.take_from(start + 1)
    }

    /// Takes the first `T` after the token spelled `word`.
    pub fn take_after_word<T: FromFragment>(&mut self, word: &str) -> Option<T> {
        let start = self.find_word(word)?;
        self.take_from(start + 1)
    }

    /// Iterates over the remaining terminals with their slot index.
    pub fn tokens(&self) -> impl Iterator<Item = (usize, &Terminal)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| item.as_ref().and_then(Fragment::as_token).map(|t| (i, t)))
    }

    #[must_use]
    pub fn first_token(&self) -> Option<&Terminal> {
        self.tokens().next().map(|(_, t)| t)
    }

    /// Returns the terminal at `index`.
    #[must_use]
    pub fn token_at(&self, index: usize) -> Option<&Terminal> {
        self.get(index).and_then(Fragment::as_token)
    }

    #[must_use]
    pub fn find_keyword(&self, keyword: Keyword) -> Option<usize> {
        self.tokens()
            .find(|(_, t)| t.is_keyword(keyword))
            .map(|(i, _)| i)
    }

    /// Finds a terminal by spelling, keyword or identifier alike.
    #[must_use]
    pub fn find_word(&self, word: &str) -> Option<usize> {
        self.tokens()
            .find(|(_, t)| is_word(&t.kind) && t.is_word(word))
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn find_token(&self, kind: &TokenKind) -> Option<usize> {
        self.tokens().find(|(_, t)| t.kind == *kind).map(|(i, _)| i)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.find_keyword(keyword).is_some()
    }

    #[must_use]
    pub fn has_word(&self, word: &str) -> bool {
        self.find_word(word).is_some()
    }

    #[must_use]
    pub fn has_token(&self, kind: &TokenKind) -> bool {
        self.find_token(kind).is_some()
    }

    /// Returns the terminal right after the token spelled `word`.
    #[must_use]
    pub fn token_after(&self, word: &str) -> Option<&Terminal> {
        let index = self.find_word(word)?;
        self.token_at(index + 1)
    }

    /// Returns the text of the value token after `word`, skipping `=`.
    #[must_use]
    pub fn value_after(&self, word: &str) -> Option<String> {
        let index = self.find_word(word)?;
        let next = match self.token_at(index + 1) {
            Some(t) if t.kind == TokenKind::Eq => index + 2,
            _ => index + 1,
        };
        self.token_at(next).map(|t| t.text.clone())
    }

    /// Upper-cased leading word tokens joined by single spaces.
    #[must_use]
    pub fn leading_words(&self) -> String {
        let mut words = Vec::new();
        for item in &self.items {
            match item {
                Some(Fragment::Token(t)) if is_word(&t.kind) => {
                    words.push(t.text.to_ascii_uppercase());
                }
                None => {}
                Some(_) => break,
            }
        }
        words.join(" ")
    }

    /// Upper-cased spellings of every remaining word token, in order.
    #[must_use]
    pub fn words(&self) -> Vec<String> {
        self.tokens()
            .filter(|(_, t)| is_word(&t.kind))
            .map(|(_, t)| t.text.to_ascii_uppercase())
            .collect()
    }

    /// Names the kinds of the non-terminal children nobody took.
    #[must_use]
    pub fn leftover_kinds(&self) -> Vec<&'static str> {
        self.items
            .iter()
            .flatten()
            .filter(|f| f.as_token().is_none())
            .map(Fragment::kind_name)
            .collect()
    }

    /// Takes a `T`, recording a structural mismatch and substituting a
    /// placeholder when none is left.
    pub fn require<T: FromFragment + Placeholder>(&mut self, what: &str) -> T {
        if let Some(value) = self.take() {
            return value;
        }
        self.mismatch(format!("expected {what}"));
        T::placeholder(self.span)
    }

    pub fn missing_clause(&mut self, message: impl Into<String>, span: Span) {
        let diagnostic =
            Diagnostic::new(DiagnosticKind::MissingClause, message, span).with_rule(self.rule);
        self.ctx.record(diagnostic);
    }

    pub fn ambiguous(&mut self, message: impl Into<String>, span: Span) {
        let diagnostic =
            Diagnostic::new(DiagnosticKind::AmbiguousOption, message, span).with_rule(self.rule);
        self.ctx.record(diagnostic);
    }

    /// Records a structural mismatch over the whole rule.
    pub fn mismatch(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(DiagnosticKind::StructuralMismatch, message, self.span)
            .with_rule(self.rule);
        self.ctx.record(diagnostic);
    }
}
