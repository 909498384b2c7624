//! Iterative post-order traversal of a concrete tree.

use tracing::trace;

use super::children::Children;
use super::context::ReduceCtx;
use super::fragment::Fragment;
use super::table::{Hooks, ReductionTable, Resolution, UnknownRule};
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::Span;

enum Work<'t> {
    Enter(&'t ParseNode),
    Exit,
}

struct Frame {
    resolution: Resolution,
    /// Length of the fragment stack when the rule was entered.
    base: usize,
    span: Span,
    kind: RuleKind,
    scoped: bool,
}

/// Drives a [`ReductionTable`] over a tree.
///
/// The walk uses explicit stacks, so nesting depth is bounded by memory
/// rather than by the call stack.
pub struct Walker<'t> {
    table: &'t ReductionTable,
}

impl<'t> Walker<'t> {
    #[must_use]
    pub const fn new(table: &'t ReductionTable) -> Self {
        Self { table }
    }

    /// Reduces `root` and returns the fragments it yields to its parent.
    ///
    /// # Errors
    ///
    /// Returns the first rule the table cannot resolve. Fragments built
    /// before it are discarded.
    ///
    /// Children left over by an exhaustive rule are dropped and recorded as
    /// a structural mismatch, unless the hook already reported a problem.
    pub fn reduce(
        &self,
        root: &ParseNode,
        ctx: &mut ReduceCtx,
    ) -> Result<Vec<Fragment>, UnknownRule> {
        let mut work = vec![Work::Enter(root)];
        let mut frames: Vec<Frame> = Vec::new();
        let mut out: Vec<Fragment> = Vec::new();

        while let Some(item) = work.pop() {
            match item {
                Work::Enter(ParseNode::Terminal(terminal)) => {
                    out.push(Fragment::Token(terminal.clone()));
                }
                Work::Enter(ParseNode::Rule(rule)) => {
                    let unknown = UnknownRule {
                        index: rule.rule,
                        span: rule.span,
                    };
                    let (Some(resolution), Some(kind)) =
                        (self.table.resolve(rule.rule), rule.kind())
                    else {
                        return Err(unknown);
                    };
                    trace!(rule = %kind, start = rule.span.start, "enter");
                    let scoped = match resolution {
                        Resolution::Custom(Hooks {
                            enter: Some(enter), ..
                        }) => {
                            enter(ctx, kind);
                            true
                        }
                        _ => false,
                    };
                    frames.push(Frame {
                        resolution,
                        base: out.len(),
                        span: rule.span,
                        kind,
                        scoped,
                    });
                    work.push(Work::Exit);
                    work.extend(rule.children.iter().rev().map(Work::Enter));
                }
                Work::Exit => {
                    let Some(frame) = frames.pop() else {
                        continue;
                    };
                    if let Resolution::Custom(hooks) = frame.resolution {
                        let items = out.split_off(frame.base);
                        let recorded = ctx.diagnostics().len();
                        let mut children = Children::new(frame.kind, frame.span, items, ctx);
                        let result = (hooks.exit)(&mut children);
                        if hooks.exhaustive && children.ctx().diagnostics().len() == recorded {
                            let leftover = children.leftover_kinds();
                            if !leftover.is_empty() {
                                children.mismatch(format!(
                                    "unexpected {} in {}",
                                    leftover.join(", "),
                                    frame.kind
                                ));
                            }
                        }
                        if frame.scoped {
                            ctx.close_scope();
                        }
                        trace!(
                            rule = %frame.kind,
                            produced = result.as_ref().map_or("nothing", Fragment::kind_name),
                            "exit"
                        );
                        out.extend(result);
                    } else {
                        trace!(rule = %frame.kind, "exit");
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Ident};
    use crate::diagnostics::DiagnosticKind;
    use crate::lexer::TokenKind;

    fn count_tokens(children: &mut Children<'_>) -> Option<Fragment> {
        let n = children.tokens().count();
        Some(Fragment::from(Ident::new(n.to_string(), children.span())))
    }

    fn int(text: &str, at: usize) -> ParseNode {
        ParseNode::terminal(TokenKind::IntNum, text, Span::new(at, at + text.len()))
    }

    fn literal(text: &str, at: usize) -> ParseNode {
        ParseNode::rule(RuleKind::Literal, vec![int(text, at)])
    }

    #[test]
    fn test_identity_splices_children() {
        let table = ReductionTable::empty(true);
        let inner = ParseNode::rule(RuleKind::ExprList, vec![int("1", 0), int("2", 2)]);
        let root = ParseNode::rule(RuleKind::StmtList, vec![inner, int("3", 4)]);
        let mut ctx = ReduceCtx::new();
        let out = Walker::new(&table).reduce(&root, &mut ctx).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|f| f.as_token().is_some()));
    }

    #[test]
    fn test_custom_hook_sees_spliced_tokens() {
        let mut table = ReductionTable::empty(true);
        table.register(RuleKind::StmtList, count_tokens);
        let inner = ParseNode::rule(RuleKind::ExprList, vec![int("1", 0), int("2", 2)]);
        let root = ParseNode::rule(RuleKind::StmtList, vec![inner, int("3", 4)]);
        let mut ctx = ReduceCtx::new();
        let out = Walker::new(&table).reduce(&root, &mut ctx).unwrap();
        assert_eq!(out, vec![Fragment::from(Ident::new("3", Span::new(0, 5)))]);
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let table = ReductionTable::empty(true);
        let mut node = int("1", 0);
        for _ in 0..100_000 {
            node = ParseNode::rule(RuleKind::Expr, vec![node]);
        }
        let mut ctx = ReduceCtx::new();
        let out = Walker::new(&table).reduce(&node, &mut ctx).unwrap();
        assert_eq!(out.len(), 1);
        // Dropping the tree is recursive; leak it to keep the test stack small.
        std::mem::forget(node);
    }

    fn plus(at: usize) -> ParseNode {
        ParseNode::terminal(TokenKind::Plus, "+", Span::new(at, at + 1))
    }

    #[test]
    fn test_extra_operand_is_reported() {
        let table = ReductionTable::standard();
        let root = ParseNode::rule(
            RuleKind::BitExpr,
            vec![literal("1", 0), plus(2), literal("2", 4), literal("3", 6)],
        );
        let mut ctx = ReduceCtx::new();
        let out = Walker::new(&table).reduce(&root, &mut ctx).unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Fragment::Expr(Expr::Binary { .. })));
        let diagnostics: Vec<_> = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(diagnostics[0].kind, DiagnosticKind::StructuralMismatch);
        assert_eq!(diagnostics[0].span, Span::new(0, 7));
        assert!(diagnostics[0].message.contains("Expr"), "{}", diagnostics[0].message);
    }

    #[test]
    fn test_well_formed_operator_is_quiet() {
        let table = ReductionTable::standard();
        let root = ParseNode::rule(
            RuleKind::BitExpr,
            vec![literal("1", 0), plus(2), literal("2", 4)],
        );
        let mut ctx = ReduceCtx::new();
        Walker::new(&table).reduce(&root, &mut ctx).unwrap();
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_unknown_rule_stops_the_walk() {
        let table = ReductionTable::empty(false);
        let root = ParseNode::rule(RuleKind::StmtList, vec![int("1", 0)]);
        let mut ctx = ReduceCtx::new();
        let err = Walker::new(&table).reduce(&root, &mut ctx).unwrap_err();
        assert_eq!(err.index, RuleKind::StmtList.index());
    }
}
