//! Read-only handles for navigating a finished [`SyntaxTree`].

use text_size::TextRange;

use crate::tree::{NodeData, NodeId, NodeVariant};
use crate::{SyntaxKind, SyntaxTree, Token};

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    pub(crate) fn new(tree: &'a SyntaxTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn data(self) -> &'a NodeData {
        self.tree.data(self.id)
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.data().kind()
    }

    #[inline]
    pub fn variant(self) -> NodeVariant {
        self.data().variant()
    }

    /// Returns the node range, or an empty range at the known endpoint when
    /// the node was never closed.
    pub fn text_range(self) -> TextRange {
        let data = self.data();
        match (data.from(), data.to()) {
            (Some(from), Some(to)) => TextRange::new(from, to),
            (Some(offset), None) | (None, Some(offset)) => TextRange::empty(offset),
            (None, None) => TextRange::default(),
        }
    }

    pub fn text(self) -> &'a str {
        &self.tree.text()[self.text_range()]
    }

    pub fn token(self) -> Option<&'a Token> {
        self.data().token()
    }

    pub fn hidden_tokens(self) -> &'a [Token] {
        self.data().hidden_tokens()
    }

    pub fn parent(self) -> Option<Self> {
        self.data().parent().map(|id| self.tree.node(id))
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = SyntaxNode<'a>> + 'a {
        let tree = self.tree;
        self.data().children().iter().map(move |&id| tree.node(id))
    }

    pub fn first_child(self) -> Option<Self> {
        self.children().next()
    }

    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Preorder traversal starting with this node.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.descendants_with_depth().map(|(node, _)| node)
    }

    pub(crate) fn descendants_with_depth(self) -> impl Iterator<Item = (SyntaxNode<'a>, usize)> {
        let mut stack = vec![(self, 0)];
        std::iter::from_fn(move || {
            let (node, depth) = stack.pop()?;
            stack.extend(node.children().rev().map(|child| (child, depth + 1)));
            Some((node, depth))
        })
    }

    /// All token leaves below this node, in source order.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.descendants().filter(|node| node.variant() == NodeVariant::Token)
    }

    /// The name this node answers to in [`SyntaxNode::query`]: the text for
    /// tokens, the rule name otherwise.
    pub fn name(self) -> &'a str {
        match self.variant() {
            NodeVariant::Token => self.text(),
            NodeVariant::Error => SyntaxKind::ERROR.name(),
            _ => self.kind().name(),
        }
    }

    /// Follows a `/`-separated path of child names below this node.
    ///
    /// A segment may pick the n-th child of that name with `name|n`, e.g.
    /// `styleSheet/body/bodyItem|1/rule`. A segment whose text after the last
    /// `|` is not a number is a plain name, so `|` and `||1` address pipe
    /// tokens. The `/` token can not be addressed.
    pub fn query(self, path: &str) -> Option<Self> {
        path.split('/').filter(|segment| !segment.is_empty()).try_fold(self, |node, segment| {
            let (name, index) = segment
                .rsplit_once('|')
                .and_then(|(name, index)| Some((name, index.parse().ok()?)))
                .unwrap_or((segment, 0));
            node.children().filter(|child| child.name() == name).nth(index)
        })
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl std::fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use crate::SyntaxKind::*;
    use crate::{SyntaxTree, Token};

    fn tree() -> SyntaxTree {
        // a,b
        let mut tree = SyntaxTree::new("a,b");
        let root = tree.root_id();
        let group = tree.alloc_rule(SELECTORS_GROUP);
        tree.append_child(root, group);
        for (index, (kind, start)) in [(IDENT, 0u32), (COMMA, 1), (IDENT, 2)].into_iter().enumerate()
        {
            let selector = tree.alloc_rule(SELECTOR);
            let token = Token::new(kind, index as u32, TextRange::at(start.into(), 1.into()));
            let leaf = tree.alloc_token(token, Vec::new());
            tree.append_child(group, selector);
            tree.append_child(selector, leaf);
        }
        tree
    }

    #[test]
    fn query_by_name_and_index() {
        let tree = tree();
        let root = tree.root();

        let b = root.query("selectorsGroup/selector|2/b").unwrap();
        assert_eq!(b.kind(), IDENT);
        assert_eq!(b.text_range(), TextRange::new(2.into(), 3.into()));

        assert!(root.query("selectorsGroup/selector|3").is_none());
        assert!(root.query("selectorsGroup/rule").is_none());
    }

    #[test]
    fn query_pipe_tokens() {
        // a|b|c
        let mut tree = SyntaxTree::new("a|b|c");
        let root = tree.root_id();
        let selector = tree.alloc_rule(SELECTOR);
        tree.append_child(root, selector);
        for (index, kind) in [IDENT, PIPE, IDENT, PIPE, IDENT].into_iter().enumerate() {
            let start = index as u32;
            let token = Token::new(kind, start, TextRange::at(start.into(), 1.into()));
            let leaf = tree.alloc_token(token, Vec::new());
            tree.append_child(selector, leaf);
        }

        let first = tree.root().query("selector/|").unwrap();
        assert_eq!(first.text_range(), TextRange::new(1.into(), 2.into()));
        let second = tree.root().query("selector/||1").unwrap();
        assert_eq!(second.text_range(), TextRange::new(3.into(), 4.into()));
        assert!(tree.root().query("selector/||2").is_none());
    }

    #[test]
    fn preorder_visits_in_source_order() {
        let tree = tree();
        let texts: Vec<_> = tree.root().tokens().map(|token| token.text()).collect();
        assert_eq!(texts, ["a", ",", "b"]);

        let leaf = tree.root().query("selectorsGroup/selector|1/,").unwrap();
        let ancestors: Vec<_> = leaf.ancestors().map(|node| node.kind()).collect();
        assert_eq!(ancestors, [SELECTOR, SELECTORS_GROUP, ROOT]);
    }
}
