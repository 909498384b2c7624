//! Concrete parse tree nodes.

use super::RuleKind;
use crate::lexer::{Keyword, Span, TokenKind};

/// A token in the concrete tree, with its exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    /// The token kind.
    pub kind: TokenKind,
    /// The source text of the token, quotes and escapes included.
    pub text: String,
    /// The location of the token.
    pub span: Span,
}

impl Terminal {
    /// Creates a new terminal.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns the keyword if this terminal is a keyword.
    #[must_use]
    pub const fn keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this terminal is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    /// Returns true if the terminal text equals `word`, ignoring ASCII case.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.text.eq_ignore_ascii_case(word)
    }
}

/// An application of a grammar rule.
///
/// The rule is stored as its raw index so that a tree produced by a newer
/// grammar can still be represented; [`RuleNode::kind`] resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleNode {
    /// Index of the production in [`RuleKind`].
    pub rule: u16,
    /// Ordered children.
    pub children: Vec<ParseNode>,
    /// The location covered by the rule application.
    pub span: Span,
}

impl RuleNode {
    /// Resolves the production, if the index is known.
    #[must_use]
    pub const fn kind(&self) -> Option<RuleKind> {
        RuleKind::from_index(self.rule)
    }

    /// Returns the first terminal in document order.
    #[must_use]
    pub fn first_terminal(&self) -> Option<&Terminal> {
        self.children.iter().find_map(ParseNode::first_terminal)
    }
}

/// A node of the concrete parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// A rule application.
    Rule(RuleNode),
    /// A token.
    Terminal(Terminal),
}

impl ParseNode {
    /// Creates a rule node whose span covers its children.
    ///
    /// A childless node gets an empty span at offset zero; use
    /// [`ParseNode::raw`] to place it.
    #[must_use]
    pub fn rule(kind: RuleKind, children: Vec<Self>) -> Self {
        let span = children
            .iter()
            .map(Self::span)
            .reduce(Span::merge)
            .unwrap_or_default();
        Self::raw(kind.index(), children, span)
    }

    /// Creates a rule node from a raw production index and an explicit span.
    #[must_use]
    pub const fn raw(rule: u16, children: Vec<Self>, span: Span) -> Self {
        Self::Rule(RuleNode {
            rule,
            children,
            span,
        })
    }

    /// Creates a terminal node.
    #[must_use]
    pub fn terminal(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self::Terminal(Terminal::new(kind, text, span))
    }

    /// Returns the span of the node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Rule(node) => node.span,
            Self::Terminal(terminal) => terminal.span,
        }
    }

    /// Returns the production of a rule node.
    #[must_use]
    pub const fn kind(&self) -> Option<RuleKind> {
        match self {
            Self::Rule(node) => node.kind(),
            Self::Terminal(_) => None,
        }
    }

    /// Returns the rule node, if this is one.
    #[must_use]
    pub const fn as_rule(&self) -> Option<&RuleNode> {
        match self {
            Self::Rule(node) => Some(node),
            Self::Terminal(_) => None,
        }
    }

    /// Returns the first terminal in document order.
    #[must_use]
    pub fn first_terminal(&self) -> Option<&Terminal> {
        match self {
            Self::Rule(node) => node.first_terminal(),
            Self::Terminal(terminal) => Some(terminal),
        }
    }

    /// Calls `f` on every node in depth-first, left-to-right order.
    pub fn visit(&self, f: &mut impl FnMut(&Self)) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            f(node);
            if let Self::Rule(rule) = node {
                stack.extend(rule.children.iter().rev());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str, start: usize) -> ParseNode {
        ParseNode::terminal(TokenKind::IntNum, text, Span::new(start, start + text.len()))
    }

    #[test]
    fn test_rule_span_covers_children() {
        let node = ParseNode::rule(
            RuleKind::ExprList,
            vec![
                int("1", 7),
                ParseNode::terminal(TokenKind::Comma, ",", Span::new(8, 9)),
                int("22", 10),
            ],
        );
        assert_eq!(node.span(), Span::new(7, 12));
        assert_eq!(node.kind(), Some(RuleKind::ExprList));
    }

    #[test]
    fn test_unknown_rule_index() {
        let node = ParseNode::raw(u16::MAX, vec![], Span::new(0, 0));
        assert_eq!(node.kind(), None);
        assert!(node.as_rule().is_some());
    }

    #[test]
    fn test_first_terminal_and_visit_order() {
        let inner = ParseNode::rule(RuleKind::Literal, vec![int("5", 2)]);
        let outer = ParseNode::rule(RuleKind::ExprConst, vec![inner, int("6", 4)]);
        assert_eq!(
            outer.first_terminal().map(|t| t.text.as_str()),
            Some("5")
        );

        let mut seen = Vec::new();
        outer.visit(&mut |node| seen.push(node.kind().map_or("token", RuleKind::name)));
        assert_eq!(seen, vec!["expr_const", "literal", "token", "token"]);
    }
}
