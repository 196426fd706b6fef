use cascade_syntax::SyntaxKind::{self, *};
use cascade_syntax::{Dialect, SyntaxSet, TextRange, TextSize, Token};
use drop_bomb::DropBomb;

use crate::event::{Listener, RecognitionError, RecognitionErrorKind};

/// Drives a [`Listener`] while the grammar walks the token stream.
///
/// Hidden and invalid tokens are handed to the listener as soon as the
/// grammar looks past them, so the grammar itself only ever sees
/// significant tokens.
pub(crate) struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    eof: Token,
    pos: usize,
    dialect: Dialect,
    listener: &'a mut dyn Listener,
    rules: Vec<SyntaxKind>,
    speculation: u32,
    failed: bool,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        text: &'a str,
        tokens: Vec<Token>,
        dialect: Dialect,
        listener: &'a mut dyn Listener,
    ) -> Self {
        let eof = match tokens.last() {
            Some(token) if token.kind == EOF => *token,
            _ => {
                let len = TextSize::of(text);
                Token::new(EOF, tokens.len() as u32, TextRange::empty(len))
            }
        };
        Self {
            text,
            tokens,
            eof,
            pos: 0,
            dialect,
            listener,
            rules: Vec::new(),
            speculation: 0,
            failed: false,
        }
    }

    pub(crate) fn is_less_source(&self) -> bool {
        self.dialect.is_less()
    }

    pub(crate) fn is_scss_source(&self) -> bool {
        self.dialect.is_scss()
    }

    /// Whether nested rules may appear among declarations.
    pub(crate) fn allows_nesting(&self) -> bool {
        self.is_less_source() || self.is_scss_source()
    }

    fn is_significant(token: &Token) -> bool {
        !token.is_hidden() && token.kind != INVALID
    }

    /// Reports the hidden and invalid tokens in front of the current position.
    fn flush_trivia(&mut self) {
        while let Some(&token) = self.tokens.get(self.pos) {
            if token.is_hidden() {
                self.listener.consume_hidden_token(&token);
            } else if token.kind == INVALID {
                self.listener.consume_token(&token);
            } else {
                break;
            }
            self.pos += 1;
        }
    }

    fn nth_token(&mut self, n: usize) -> Token {
        self.flush_trivia();
        self.tokens[self.pos..]
            .iter()
            .filter(|token| Self::is_significant(token))
            .nth(n)
            .copied()
            .unwrap_or(self.eof)
    }

    pub(crate) fn peek_kind(&mut self) -> SyntaxKind {
        self.nth_kind(0)
    }

    pub(crate) fn nth_kind(&mut self, n: usize) -> SyntaxKind {
        if self.failed {
            return EOF;
        }
        self.nth_token(n).kind
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn nth_at(&mut self, n: usize, kind: SyntaxKind) -> bool {
        self.nth_kind(n) == kind
    }

    pub(crate) fn at_set(&mut self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn current_text(&mut self) -> &'a str {
        let token = self.nth_token(0);
        token.text(self.text)
    }

    /// Whether hidden tokens separate the current token from the previous one.
    pub(crate) fn has_whitespace_before(&mut self) -> bool {
        self.flush_trivia();
        self.pos > 0 && self.tokens[self.pos - 1].is_hidden()
    }

    pub(crate) fn advance(&mut self) {
        if self.failed {
            return;
        }
        let token = self.nth_token(0);
        if token.kind == EOF {
            return;
        }
        self.listener.consume_token(&token);
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(RecognitionErrorKind::Mismatch { expected: kind });
        false
    }

    pub(crate) fn no_viable_alternative(&mut self) {
        self.error(RecognitionErrorKind::NoViableAlternative);
    }

    fn error(&mut self, kind: RecognitionErrorKind) {
        if self.speculation > 0 {
            self.failed = true;
            return;
        }

        let token = self.nth_token(0);
        let rule = self.rules.last().copied().unwrap_or(ROOT);
        tracing::debug!(?kind, token = %token.kind, index = token.index, %rule, "recognition error");
        self.listener.recognition_error(&RecognitionError { kind, token, rule });
    }

    /// Skips tokens until the current one belongs to `recovery` (or the input
    /// ends), inside a synchronization rule.
    pub(crate) fn recover(&mut self, recovery: &SyntaxSet) {
        if self.speculation > 0 {
            return;
        }

        let m = self.start(SYNC);
        self.consume_until(recovery);
        m.complete(self);
    }

    /// Pulls tokens up to the next significant token in `sync_set` and hands
    /// them to the listener as one batch, hidden tokens included.
    fn consume_until(&mut self, sync_set: &SyntaxSet) {
        self.flush_trivia();
        self.listener.begin_resync();
        let mut skipped = Vec::new();
        while let Some(&token) = self.tokens.get(self.pos) {
            if token.kind == EOF || (Self::is_significant(&token) && sync_set.contains(token.kind))
            {
                break;
            }
            skipped.push(token);
            self.pos += 1;
        }
        self.listener.end_resync();
        tracing::debug!(count = skipped.len(), "skipped tokens while resynchronizing");
        self.listener.consume_skipped_tokens(&skipped);
    }

    pub(crate) fn start(&mut self, kind: SyntaxKind) -> Marker {
        self.rules.push(kind);
        self.listener.enter_rule(kind);
        Marker::new(kind)
    }

    /// Runs `trial` as a trial parse and reports whether it matched.
    ///
    /// The position is restored afterwards and no error escapes the trial.
    pub(crate) fn speculate(&mut self, decision: u32, trial: impl FnOnce(&mut Self)) -> bool {
        let (pos, failed, depth) = (self.pos, self.failed, self.rules.len());
        self.listener.enter_decision(decision);
        self.speculation += 1;

        trial(self);
        let matched = !self.failed;

        self.speculation -= 1;
        self.failed = failed;
        self.pos = pos;
        self.rules.truncate(depth);
        self.listener.exit_decision(decision);
        matched
    }

    /// Flushes the trivia at the end of the input and signals the end of the parse.
    pub(crate) fn finish(mut self) {
        self.flush_trivia();
        self.listener.terminate();
    }
}

pub(crate) struct Marker {
    kind: SyntaxKind,
    bomb: DropBomb,
}

impl Marker {
    fn new(kind: SyntaxKind) -> Self {
        Self { kind, bomb: DropBomb::new("Marker must be completed") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();
        let kind = p.rules.pop();
        debug_assert_eq!(kind, Some(self.kind));
        p.listener.exit_rule(self.kind);
    }
}
