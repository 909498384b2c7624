//! The rule-kind indexed reduction table.

use super::children::Children;
use super::context::ReduceCtx;
use super::fragment::Fragment;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::Span;

/// Builds a rule's fragment from its reduced children. `None` means the rule
/// contributes nothing to its parent.
pub type ExitHook = fn(&mut Children<'_>) -> Option<Fragment>;

/// Runs before a rule's children are reduced.
pub type EnterHook = fn(&mut ReduceCtx, RuleKind);

/// The hooks registered for one rule kind.
#[derive(Debug, Clone, Copy)]
pub struct Hooks {
    pub enter: Option<EnterHook>,
    pub exit: ExitHook,
    /// Every reduced child must be taken by the exit hook; anything left
    /// over is reported as a structural mismatch.
    pub exhaustive: bool,
}

/// How a rule kind is reduced.
#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    /// A registered reduction.
    Custom(Hooks),
    /// Children are spliced into the parent unchanged.
    Identity,
}

/// A rule that neither has a reduction nor falls back to identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRule {
    /// The raw production index.
    pub index: u16,
    /// Where the rule application starts.
    pub span: Span,
}

/// Maps each [`RuleKind`] to its reduction.
///
/// The table is immutable once built and is shared by reference across
/// traversals, including parallel ones.
#[derive(Debug, Clone)]
pub struct ReductionTable {
    entries: Vec<Option<Hooks>>,
    identity_default: bool,
}

fn enter_statement(ctx: &mut ReduceCtx, kind: RuleKind) {
    ctx.enter_statement(kind);
}

impl ReductionTable {
    /// Creates a table with no registered reductions.
    #[must_use]
    pub fn empty(identity_default: bool) -> Self {
        Self {
            entries: vec![None; RuleKind::COUNT],
            identity_default,
        }
    }

    /// The full reduction table for both modes. Kinds without a reduction are
    /// reduced by identity.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty(true);
        super::register_all(&mut table);
        table
    }

    /// Like [`ReductionTable::standard`], but a kind without a reduction is
    /// an unknown rule.
    #[must_use]
    pub fn strict() -> Self {
        let mut table = Self::empty(false);
        super::register_all(&mut table);
        table
    }

    /// Registers an exit hook for `kind`, replacing any earlier one.
    pub fn register(&mut self, kind: RuleKind, exit: ExitHook) {
        self.entries[usize::from(kind.index())] = Some(Hooks {
            enter: None,
            exit,
            exhaustive: false,
        });
    }

    /// Registers an exit hook that must consume every non-terminal child.
    pub fn register_exhaustive(&mut self, kind: RuleKind, exit: ExitHook) {
        self.entries[usize::from(kind.index())] = Some(Hooks {
            enter: None,
            exit,
            exhaustive: true,
        });
    }

    /// Registers a statement reduction: the rule opens a statement scope for
    /// the duration of its subtree.
    pub fn statement(&mut self, kind: RuleKind, exit: ExitHook) {
        self.entries[usize::from(kind.index())] = Some(Hooks {
            enter: Some(enter_statement),
            exit,
            exhaustive: false,
        });
    }

    /// Resolves a raw production index.
    #[must_use]
    pub fn resolve(&self, index: u16) -> Option<Resolution> {
        match self.entries.get(usize::from(index)) {
            Some(Some(hooks)) => Some(Resolution::Custom(*hooks)),
            Some(None) if self.identity_default => Some(Resolution::Identity),
            _ => None,
        }
    }

    /// Returns true if `kind` has a registered reduction.
    #[must_use]
    pub fn is_custom(&self, kind: RuleKind) -> bool {
        matches!(self.entries.get(usize::from(kind.index())), Some(Some(_)))
    }

    /// Returns true if `kind` must consume all of its reduced children.
    #[must_use]
    pub fn is_exhaustive(&self, kind: RuleKind) -> bool {
        matches!(
            self.entries.get(usize::from(kind.index())),
            Some(Some(Hooks { exhaustive: true, .. }))
        )
    }

    /// Iterates over the kinds with a registered reduction, in grammar order.
    pub fn custom_rules(&self) -> impl Iterator<Item = RuleKind> + '_ {
        RuleKind::ALL.iter().copied().filter(|kind| self.is_custom(*kind))
    }

    /// Returns the first rule in document order the table cannot reduce.
    #[must_use]
    pub fn first_unknown(&self, root: &ParseNode) -> Option<UnknownRule> {
        let mut unknown = None;
        root.visit(&mut |node| {
            if unknown.is_some() {
                return;
            }
            if let ParseNode::Rule(rule) = node {
                if self.resolve(rule.rule).is_none() {
                    unknown = Some(UnknownRule {
                        index: rule.rule,
                        span: rule.span,
                    });
                }
            }
        });
        unknown
    }
}

impl Default for ReductionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn nothing(_: &mut Children<'_>) -> Option<Fragment> {
        None
    }

    #[test]
    fn test_identity_default() {
        let table = ReductionTable::empty(true);
        assert!(matches!(
            table.resolve(RuleKind::StmtList.index()),
            Some(Resolution::Identity)
        ));
        assert!(table.resolve(u16::MAX).is_none());
    }

    #[test]
    fn test_strict_table_rejects_unregistered() {
        let mut table = ReductionTable::empty(false);
        table.register(RuleKind::Expr, nothing);
        assert!(table.resolve(RuleKind::StmtList.index()).is_none());
        assert!(matches!(
            table.resolve(RuleKind::Expr.index()),
            Some(Resolution::Custom(_))
        ));
        assert_eq!(table.custom_rules().collect::<Vec<_>>(), vec![RuleKind::Expr]);
    }

    #[test]
    fn test_statement_hooks_open_a_scope() {
        let mut table = ReductionTable::empty(true);
        table.statement(RuleKind::SelectStmt, nothing);
        let Some(Resolution::Custom(hooks)) = table.resolve(RuleKind::SelectStmt.index()) else {
            panic!("expected a custom reduction");
        };
        assert!(hooks.enter.is_some());
        assert!(!hooks.exhaustive);
    }

    #[test]
    fn test_exhaustive_registration() {
        let mut table = ReductionTable::empty(true);
        table.register_exhaustive(RuleKind::BitExpr, nothing);
        let Some(Resolution::Custom(hooks)) = table.resolve(RuleKind::BitExpr.index()) else {
            panic!("expected a custom reduction");
        };
        assert!(hooks.exhaustive);
        assert!(ReductionTable::standard().is_exhaustive(RuleKind::BitExpr));
        assert!(!ReductionTable::standard().is_exhaustive(RuleKind::TableOption));
    }

    #[test]
    fn test_first_unknown_in_document_order() {
        let table = ReductionTable::standard();
        let leaf = ParseNode::terminal(TokenKind::IntNum, "1", Span::new(7, 8));
        let bad = ParseNode::raw(u16::MAX, vec![leaf], Span::new(7, 8));
        let root = ParseNode::rule(RuleKind::StmtList, vec![bad]);
        let unknown = table.first_unknown(&root).unwrap();
        assert_eq!(unknown.index, u16::MAX);
        assert_eq!(unknown.span, Span::new(7, 8));
    }
}
