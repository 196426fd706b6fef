//! Builds a [`SyntaxTree`] from recognizer events.

use std::mem;

use cascade_errors::{ProblemDescription, ProblemSet};
use cascade_syntax::SyntaxKind::*;
use cascade_syntax::{
    NodeId, NodeVariant, SyntaxKind, SyntaxSet, SyntaxTree, TextRange, Token,
};
use rustc_hash::FxHashMap;

use crate::event::{Listener, RecognitionError, RecognitionErrorKind};

/// A [`Listener`] that assembles the syntax tree and collects problems.
///
/// Recognition errors become error nodes. Errors raised when no alternative
/// matched are held back until the end of the parse, because the token they
/// blame may still be consumed successfully later on; in that case the error
/// node is dropped and only the problem is kept.
pub struct TreeBuilder {
    tree: SyntaxTree,
    problems: ProblemSet,
    ignored_rules: SyntaxSet,
    call_stack: Vec<Frame>,
    hidden: Vec<Token>,
    /// Error nodes that recovery nodes attach to, innermost last.
    error_stack: Vec<NodeId>,
    /// Every error node that is still part of the result.
    errors: Vec<NodeId>,
    deferred: FxHashMap<u32, Deferred>,
    unexpected: Option<Unexpected>,
    backtracking: u32,
    resyncing: bool,
    consumed: u32,
    last_consumed: Option<TextRange>,
    /// Rules that were exited without children.
    emptied: Vec<NodeId>,
}

struct Frame {
    node: NodeId,
    consumed: u32,
}

struct Deferred {
    rule: NodeId,
    error: NodeId,
}

/// The token blamed by the most recent recognition error.
struct Unexpected {
    index: u32,
    leaf: Option<NodeId>,
}

impl TreeBuilder {
    pub fn new(
        text: &str,
        ignored_rules: SyntaxSet,
        problems: impl IntoIterator<Item = ProblemDescription>,
    ) -> Self {
        let mut set = ProblemSet::default();
        set.extend(problems);
        Self {
            tree: SyntaxTree::new(text),
            problems: set,
            ignored_rules,
            call_stack: Vec::new(),
            hidden: Vec::new(),
            error_stack: Vec::new(),
            errors: Vec::new(),
            deferred: FxHashMap::default(),
            unexpected: None,
            backtracking: 0,
            resyncing: false,
            consumed: 0,
            last_consumed: None,
            emptied: Vec::new(),
        }
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn finish(self) -> (SyntaxTree, Vec<ProblemDescription>) {
        (self.tree, self.problems.into_vec())
    }

    fn current(&self) -> NodeId {
        self.call_stack.last().map_or(self.tree.root_id(), |frame| frame.node)
    }

    fn is_recording(&self) -> bool {
        self.backtracking == 0
    }

    fn leaf(&mut self, token: Token) -> NodeId {
        let hidden = mem::take(&mut self.hidden);
        self.tree.alloc_token(token, hidden)
    }

    fn mark_consumed(&mut self, range: TextRange) {
        self.last_consumed = Some(range);
        self.consumed += 1;
    }

    /// Every open rule without a start begins at `range`.
    fn start_open_rules(&mut self, range: TextRange) {
        for frame in self.call_stack.iter().rev() {
            self.tree.set_from_if_unset(frame.node, range.start());
        }
    }

    /// Drops what an earlier error recorded for a token that is now consumed.
    fn settle_unexpected(&mut self, token: &Token) {
        if let Some(Deferred { error, .. }) = self.deferred.remove(&token.index) {
            tracing::trace!(index = token.index, "deferred error superseded");
            self.error_stack.retain(|&it| it != error);
            self.errors.retain(|&it| it != error);
        }

        if let Some(unexpected) = self.unexpected.take_if(|it| it.index == token.index)
            && let Some(leaf) = unexpected.leaf
        {
            self.tree.detach(leaf);
            let mut hidden = self.tree.take_hidden(leaf);
            hidden.append(&mut self.hidden);
            self.hidden = hidden;
        }
    }

    fn invalid_token(&mut self, token: &Token) {
        let range = token.range();
        let parent = self.current();
        let error = self.tree.alloc_error(self.tree.data(parent).kind(), range);
        let leaf = self.leaf(*token);
        self.tree.append_child(error, leaf);
        self.tree.append_child(parent, error);
        self.errors.push(error);
        self.mark_consumed(range);
        self.start_open_rules(range);
    }

    fn close(&mut self, node: NodeId, consumed_at_entry: u32) {
        if self.tree.data(node).children().is_empty() {
            self.emptied.push(node);
            return;
        }

        if self.consumed > consumed_at_entry
            && let Some(last) = self.last_consumed
        {
            self.tree.set_to(node, last.end());
        }

        if self.tree.data(node).kind() == RECOVERY {
            self.report_skipped(node);
        }
    }

    fn report_skipped(&mut self, recovery: NodeId) {
        let node = self.tree.node(recovery);
        let texts: Vec<&str> = node.children().map(|child| child.text()).collect();
        if texts.concat().trim().is_empty() {
            return;
        }

        let quoted: Vec<String> = texts.iter().map(|text| format!("'{text}'")).collect();
        let message = format!("unexpected input {}", quoted.join(" "));
        let range = node.text_range();
        self.problems.insert(ProblemDescription::parsing(range, message));
    }

    fn attach_deferred_errors(&mut self) {
        let mut deferred: Vec<(u32, Deferred)> = self.deferred.drain().collect();
        deferred.sort_unstable_by_key(|&(index, _)| index);
        for (_, Deferred { rule, error }) in deferred {
            self.tree.insert_child_ordered(rule, error);
        }
    }

    fn widen_around_errors(&mut self) {
        for &error in &self.errors {
            if let (Some(parent), Some(range)) =
                (self.tree.data(error).parent(), self.tree.data(error).range())
            {
                self.tree.widen_ancestors(parent, range);
            }
        }
    }

    fn remove_empty_rules(&mut self) {
        let root = self.tree.root_id();
        for mut node in mem::take(&mut self.emptied) {
            while node != root {
                let data = self.tree.data(node);
                if data.variant() != NodeVariant::Rule || !data.children().is_empty() {
                    break;
                }
                match self.tree.detach(node) {
                    Some(parent) => node = parent,
                    None => break,
                }
            }
        }
    }

    /// Derives a range for every node that never received one from its children.
    fn fill_missing_ranges(&mut self) {
        let order: Vec<NodeId> = self.tree.root().descendants().map(|node| node.id()).collect();
        for &node in order.iter().rev() {
            let data = self.tree.data(node);
            if data.range().is_some() {
                continue;
            }
            let span = data
                .children()
                .iter()
                .filter_map(|&child| self.tree.data(child).range())
                .reduce(|acc, range| acc.cover(range));
            if let Some(span) = span {
                self.tree.widen(node, span);
            }
        }
    }
}

impl Listener for TreeBuilder {
    fn enter_rule(&mut self, rule: SyntaxKind) {
        if !self.is_recording() || self.ignored_rules.contains(rule) {
            return;
        }

        let node = self.tree.alloc_rule(rule);
        self.tree.append_child(self.current(), node);
        self.call_stack.push(Frame { node, consumed: self.consumed });
    }

    fn exit_rule(&mut self, rule: SyntaxKind) {
        if !self.is_recording() || self.ignored_rules.contains(rule) {
            return;
        }

        let Some(frame) = self.call_stack.pop() else {
            panic!("exit_rule({rule}) without a matching enter_rule");
        };
        let entered = self.tree.data(frame.node).kind();
        assert_eq!(entered, rule, "exit_rule({rule}) does not match enter_rule({entered})");
        self.close(frame.node, frame.consumed);
    }

    fn enter_decision(&mut self, _decision: u32) {
        self.backtracking += 1;
    }

    fn exit_decision(&mut self, decision: u32) {
        assert!(self.backtracking > 0, "exit_decision({decision}) without enter_decision");
        self.backtracking -= 1;
    }

    fn consume_token(&mut self, token: &Token) {
        if !self.is_recording() || self.resyncing || token.kind == EOF {
            return;
        }

        self.settle_unexpected(token);
        if token.kind == INVALID {
            self.invalid_token(token);
            return;
        }

        let range = token.range();
        let leaf = self.leaf(*token);
        self.tree.append_child(self.current(), leaf);
        self.mark_consumed(range);
        self.start_open_rules(range);
    }

    fn consume_hidden_token(&mut self, token: &Token) {
        if !self.is_recording() || self.resyncing {
            return;
        }
        self.hidden.push(*token);
    }

    fn recognition_error(&mut self, error: &RecognitionError) {
        if !self.is_recording() {
            return;
        }

        let token = error.token;
        let at_eof = token.kind == EOF;
        let range = token.range();
        let message = if at_eof {
            "premature end of input".to_owned()
        } else {
            format!("unexpected token `{}`", token.kind)
        };
        tracing::debug!(%message, rule = %error.rule, "parse problem");
        self.problems.insert(ProblemDescription::parsing(range, message));

        let hard = matches!(error.kind, RecognitionErrorKind::Mismatch { .. });
        if self.unexpected.as_ref().is_some_and(|it| it.index == token.index) {
            if hard {
                self.mark_consumed(range);
            }
            return;
        }

        let rule = self.current();
        let error_node = self.tree.alloc_error(self.tree.data(rule).kind(), range);
        let leaf = (!at_eof).then(|| {
            let leaf = self.leaf(token);
            self.tree.append_child(error_node, leaf);
            leaf
        });
        self.unexpected = Some(Unexpected { index: token.index, leaf });
        self.error_stack.push(error_node);
        self.errors.push(error_node);

        if hard {
            self.tree.append_child(rule, error_node);
            self.mark_consumed(range);
            self.start_open_rules(range);
        } else {
            self.deferred.insert(token.index, Deferred { rule, error: error_node });
        }
    }

    fn begin_resync(&mut self) {
        self.resyncing = true;
    }

    fn end_resync(&mut self) {
        self.resyncing = false;
    }

    fn consume_skipped_tokens(&mut self, tokens: &[Token]) {
        if !self.is_recording() {
            return;
        }

        let significant: Vec<&Token> = tokens.iter().filter(|token| !token.is_hidden()).collect();
        let repeats_unexpected = significant
            .first()
            .is_some_and(|first| self.unexpected.as_ref().is_some_and(|it| it.index == first.index));
        let first = if repeats_unexpected { significant.get(1) } else { significant.first() };
        let (Some(first), Some(last)) = (first, significant.last()) else {
            self.hidden.extend(tokens.iter().filter(|token| token.is_hidden()));
            return;
        };

        let range = TextRange::new(first.range().start(), last.range().end());
        let parent = self.error_stack.last().copied().unwrap_or_else(|| self.current());
        let recovery = self.tree.alloc_recovery(range);
        self.tree.append_child(parent, recovery);
        self.tree.widen_ancestors(parent, range);

        let consumed_at_entry = self.consumed;
        let mut skip = repeats_unexpected;
        for token in tokens {
            if token.is_hidden() {
                self.hidden.push(*token);
            } else if !mem::take(&mut skip) {
                let leaf = self.leaf(*token);
                self.tree.append_child(recovery, leaf);
            }
        }
        self.mark_consumed(range);
        self.close(recovery, consumed_at_entry);
    }

    fn terminate(&mut self) {
        if !self.is_recording() {
            return;
        }

        let trailing = mem::take(&mut self.hidden);
        self.tree.set_trailing_hidden(trailing);
        self.attach_deferred_errors();
        self.widen_around_errors();
        self.remove_empty_rules();
        self.fill_missing_ranges();
    }
}
