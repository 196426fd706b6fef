//! The event interface between a recognizer and the tree builder.

use cascade_syntax::{SyntaxKind, Token};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecognitionErrorKind {
    /// A committed point required one specific token.
    Mismatch { expected: SyntaxKind },
    /// None of the alternatives of a decision starts with the current token.
    NoViableAlternative,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecognitionError {
    pub kind: RecognitionErrorKind,
    /// The token the recognizer could not use.
    pub token: Token,
    /// The innermost rule active when the error was raised.
    pub rule: SyntaxKind,
}

/// Receives recognizer events in the order they happen.
///
/// `enter_decision`/`exit_decision` and `enter_rule`/`exit_rule` nest
/// properly; tokens are only consumed between a rule's enter and exit; a
/// recognition error is followed by more tokens or by `terminate`.
pub trait Listener {
    fn enter_rule(&mut self, rule: SyntaxKind);

    fn exit_rule(&mut self, rule: SyntaxKind);

    /// Start of a speculative trial parse; everything until the matching
    /// `exit_decision` is rewound afterwards.
    fn enter_decision(&mut self, decision: u32);

    fn exit_decision(&mut self, decision: u32);

    fn consume_token(&mut self, token: &Token);

    fn consume_hidden_token(&mut self, token: &Token);

    fn recognition_error(&mut self, error: &RecognitionError);

    fn begin_resync(&mut self);

    fn end_resync(&mut self);

    /// Tokens discarded by one resynchronization, in source order.
    fn consume_skipped_tokens(&mut self, tokens: &[Token]);

    fn terminate(&mut self);
}
