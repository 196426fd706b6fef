//! Arena-backed storage for the concrete syntax tree.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`]: a
//! parent owns the ids in its child list, the parent link is a plain id. A
//! detached node stays in the arena but is unreachable from the root.

use la_arena::{Arena, Idx};
use text_size::{TextRange, TextSize};

use crate::{SyntaxKind, SyntaxNode, Token};

pub type NodeId = Idx<NodeData>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeVariant {
    Root,
    Rule,
    Token,
    Error,
    Recovery,
}

#[derive(Clone, Debug)]
pub struct NodeData {
    variant: NodeVariant,
    kind: SyntaxKind,
    from: Option<TextSize>,
    to: Option<TextSize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    token: Option<Token>,
    hidden: Vec<Token>,
}

impl NodeData {
    fn new(variant: NodeVariant, kind: SyntaxKind) -> Self {
        Self {
            variant,
            kind,
            from: None,
            to: None,
            parent: None,
            children: Vec::new(),
            token: None,
            hidden: Vec::new(),
        }
    }

    fn with_range(mut self, range: TextRange) -> Self {
        self.from = Some(range.start());
        self.to = Some(range.end());
        self
    }

    pub fn variant(&self) -> NodeVariant {
        self.variant
    }

    /// The token kind for token nodes, the grammar rule otherwise.
    ///
    /// Error nodes carry the rule that was active when the error was raised.
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn from(&self) -> Option<TextSize> {
        self.from
    }

    pub fn to(&self) -> Option<TextSize> {
        self.to
    }

    /// Returns the range once both endpoints are known.
    pub fn range(&self) -> Option<TextRange> {
        Some(TextRange::new(self.from?, self.to?))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Whitespace and comments that preceded this token.
    pub fn hidden_tokens(&self) -> &[Token] {
        &self.hidden
    }
}

/// Owned syntax tree for a single source text.
#[derive(Clone)]
pub struct SyntaxTree {
    text: Box<str>,
    nodes: Arena<NodeData>,
    root: NodeId,
    trailing_hidden: Vec<Token>,
}

impl SyntaxTree {
    /// Creates a tree holding only a root that spans all of `text`.
    ///
    /// # Panics
    ///
    /// If `text` is 4 GiB or longer.
    pub fn new(text: &str) -> Self {
        let mut nodes = Arena::new();
        let len = TextSize::of(text);
        let root = nodes.alloc(
            NodeData::new(NodeVariant::Root, SyntaxKind::ROOT)
                .with_range(TextRange::up_to(len)),
        );
        Self { text: text.into(), nodes, root, trailing_hidden: Vec::new() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        SyntaxNode::new(self, id)
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id]
    }

    /// Hidden tokens after the last significant token of the source.
    pub fn trailing_hidden(&self) -> &[Token] {
        &self.trailing_hidden
    }

    pub fn set_trailing_hidden(&mut self, hidden: Vec<Token>) {
        self.trailing_hidden = hidden;
    }

    pub fn alloc_rule(&mut self, kind: SyntaxKind) -> NodeId {
        self.nodes.alloc(NodeData::new(NodeVariant::Rule, kind))
    }

    pub fn alloc_token(&mut self, token: Token, hidden: Vec<Token>) -> NodeId {
        let mut data = NodeData::new(NodeVariant::Token, token.kind).with_range(token.range());
        data.token = Some(token);
        data.hidden = hidden;
        self.nodes.alloc(data)
    }

    /// Removes and returns the hidden tokens in front of a token leaf.
    pub fn take_hidden(&mut self, node: NodeId) -> Vec<Token> {
        std::mem::take(&mut self.nodes[node].hidden)
    }

    pub fn alloc_error(&mut self, rule: SyntaxKind, range: TextRange) -> NodeId {
        self.nodes.alloc(NodeData::new(NodeVariant::Error, rule).with_range(range))
    }

    pub fn alloc_recovery(&mut self, range: TextRange) -> NodeId {
        self.nodes
            .alloc(NodeData::new(NodeVariant::Recovery, SyntaxKind::RECOVERY).with_range(range))
    }

    /// Appends `child` as the last child of `parent`.
    #[track_caller]
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.attach(child, parent);
        self.nodes[parent].children.push(child);
    }

    /// Inserts `child` before the first child of `parent` starting after it.
    #[track_caller]
    pub fn insert_child_ordered(&mut self, parent: NodeId, child: NodeId) {
        self.attach(child, parent);
        let start = self.start_of(child);
        let position = self.nodes[parent]
            .children
            .iter()
            .position(|&sibling| match (start, self.start_of(sibling)) {
                (Some(start), Some(sibling_start)) => sibling_start > start,
                _ => false,
            })
            .unwrap_or(self.nodes[parent].children.len());
        self.nodes[parent].children.insert(position, child);
    }

    /// The start of `node`, or of its first descendant with a known start.
    fn start_of(&self, node: NodeId) -> Option<TextSize> {
        let data = &self.nodes[node];
        data.from.or_else(|| data.children.iter().find_map(|&child| self.start_of(child)))
    }

    #[track_caller]
    fn attach(&mut self, child: NodeId, parent: NodeId) {
        assert!(child != self.root, "the root can not be attached");
        let slot = &mut self.nodes[child].parent;
        assert!(slot.is_none(), "node is already attached");
        *slot = Some(parent);
    }

    /// Unlinks `node` from its parent and returns the former parent.
    pub fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node].parent.take()?;
        self.nodes[parent].children.retain(|&child| child != node);
        Some(parent)
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        node == self.root || self.nodes[node].parent.is_some()
    }

    /// Sets the start offset unless one is already known; returns whether it changed.
    pub fn set_from_if_unset(&mut self, node: NodeId, offset: TextSize) -> bool {
        let from = &mut self.nodes[node].from;
        if from.is_some() {
            return false;
        }
        *from = Some(offset);
        true
    }

    pub fn set_to(&mut self, node: NodeId, offset: TextSize) {
        self.nodes[node].to = Some(offset);
    }

    /// Grows the range of `node` so that it covers `range`.
    pub fn widen(&mut self, node: NodeId, range: TextRange) {
        let data = &mut self.nodes[node];
        data.from = Some(data.from.map_or(range.start(), |from| from.min(range.start())));
        data.to = Some(data.to.map_or(range.end(), |to| to.max(range.end())));
    }

    /// Widens `node` and every ancestor of it to cover `range`.
    pub fn widen_ancestors(&mut self, node: NodeId, range: TextRange) {
        let mut current = Some(node);
        while let Some(node) = current {
            self.widen(node, range);
            current = self.nodes[node].parent;
        }
    }

    /// Renders the reachable tree, one node per line.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        for (node, depth) in self.root().descendants_with_depth() {
            let data = node.data();
            let range = match (data.from, data.to) {
                (Some(from), Some(to)) => format!("{}..{}", u32::from(from), u32::from(to)),
                (from, to) => format!(
                    "{}..{}",
                    from.map_or("?".to_owned(), |it| u32::from(it).to_string()),
                    to.map_or("?".to_owned(), |it| u32::from(it).to_string())
                ),
            };
            let indent = "  ".repeat(depth);
            let line = match data.variant {
                NodeVariant::Token => {
                    format!("{indent}{}@{range} {:?}\n", data.kind.name(), node.text())
                }
                NodeVariant::Error => format!("{indent}error[{}]@{range}\n", data.kind.name()),
                _ => format!("{indent}{}@{range}\n", data.kind.name()),
            };
            out.push_str(&line);
        }
        out
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.text.len()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    fn token(kind: SyntaxKind, index: u32, start: u32, end: u32) -> Token {
        Token::new(kind, index, TextRange::new(start.into(), end.into()))
    }

    #[test]
    fn root_spans_the_whole_text() {
        let tree = SyntaxTree::new("a{}");
        assert_eq!(tree.data(tree.root_id()).range(), Some(TextRange::new(0.into(), 3.into())));
        assert_eq!(tree.root().variant(), NodeVariant::Root);
    }

    #[test]
    fn attach_and_detach() {
        let mut tree = SyntaxTree::new("a{}");
        let root = tree.root_id();
        let rule = tree.alloc_rule(RULE);
        tree.append_child(root, rule);
        let leaf = tree.alloc_token(token(IDENT, 0, 0, 1), Vec::new());
        tree.append_child(rule, leaf);

        assert_eq!(tree.data(leaf).parent(), Some(rule));
        assert_eq!(tree.data(rule).children(), &[leaf]);

        assert_eq!(tree.detach(leaf), Some(rule));
        assert!(tree.data(rule).children().is_empty());
        assert!(!tree.is_attached(leaf));
        assert_eq!(tree.detach(leaf), None);
    }

    #[test]
    #[should_panic(expected = "already attached")]
    fn parent_is_set_once() {
        let mut tree = SyntaxTree::new("a");
        let root = tree.root_id();
        let first = tree.alloc_rule(RULE);
        let second = tree.alloc_rule(RULE);
        tree.append_child(root, first);
        tree.append_child(root, second);
        let leaf = tree.alloc_token(token(IDENT, 0, 0, 1), Vec::new());
        tree.append_child(first, leaf);
        tree.append_child(second, leaf);
    }

    #[test]
    fn ordered_insertion_keeps_source_order() {
        let mut tree = SyntaxTree::new("a b c");
        let root = tree.root_id();
        let a = tree.alloc_token(token(IDENT, 0, 0, 1), Vec::new());
        let c = tree.alloc_token(token(IDENT, 4, 4, 5), Vec::new());
        tree.append_child(root, a);
        tree.append_child(root, c);

        let error = tree.alloc_error(BODY, TextRange::new(2.into(), 3.into()));
        tree.insert_child_ordered(root, error);

        assert_eq!(tree.data(root).children(), &[a, error, c]);
    }

    #[test]
    fn ordered_insertion_looks_into_siblings_without_a_start() {
        let mut tree = SyntaxTree::new("a % |");
        let root = tree.root_id();
        let a = tree.alloc_token(token(IDENT, 0, 0, 1), Vec::new());
        tree.append_child(root, a);
        let declaration = tree.alloc_rule(DECLARATION);
        tree.append_child(root, declaration);
        let hard = tree.alloc_error(PROPERTY, TextRange::new(4.into(), 5.into()));
        tree.append_child(declaration, hard);
        assert_eq!(tree.data(declaration).range(), None);

        let deferred = tree.alloc_error(DECLARATIONS, TextRange::new(2.into(), 3.into()));
        tree.insert_child_ordered(root, deferred);

        assert_eq!(tree.data(root).children(), &[a, deferred, declaration]);
    }

    #[test]
    fn widening_fills_unset_endpoints() {
        let mut tree = SyntaxTree::new("a{color:red");
        let root = tree.root_id();
        let outer = tree.alloc_rule(RULE);
        let inner = tree.alloc_rule(DECLARATIONS);
        tree.append_child(root, outer);
        tree.append_child(outer, inner);
        tree.set_from_if_unset(outer, 0.into());
        tree.set_from_if_unset(inner, 1.into());
        assert!(!tree.set_from_if_unset(inner, 5.into()));

        tree.widen_ancestors(inner, TextRange::empty(11.into()));

        assert_eq!(tree.data(inner).range(), Some(TextRange::new(1.into(), 11.into())));
        assert_eq!(tree.data(outer).range(), Some(TextRange::new(0.into(), 11.into())));
    }
}
