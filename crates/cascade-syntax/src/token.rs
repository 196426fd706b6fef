//! Lexical tokens and the mapping from matched tokens to text ranges.

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// A matched token.
///
/// `stop` is the offset of the last byte of the token, so a zero-width token
/// (such as `EOF`) has `stop == start - 1`. Use [`token_range`] to get the
/// half-open range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Position in the token stream, hidden tokens included.
    pub index: u32,
    pub start: i32,
    pub stop: i32,
}

impl Token {
    /// # Panics
    ///
    /// If `range` ends past `i32::MAX`, which limits sources to 2 GiB.
    pub fn new(kind: SyntaxKind, index: u32, range: TextRange) -> Self {
        let start = offset(range.start());
        let stop = offset(range.end()) - 1;
        Self { kind, index, start, stop }
    }

    pub fn range(&self) -> TextRange {
        token_range(self)
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }

    pub fn is_hidden(&self) -> bool {
        self.kind.is_hidden()
    }
}

/// Converts the inclusive `[start, stop]` span of `token` into `[start, stop + 1)`.
pub fn token_range(token: &Token) -> TextRange {
    let start = u32::try_from(token.start).unwrap_or(0);
    let end = u32::try_from(token.stop.saturating_add(1)).unwrap_or(0).max(start);
    TextRange::new(TextSize::new(start), TextSize::new(end))
}

fn offset(size: TextSize) -> i32 {
    i32::try_from(u32::from(size))
        .unwrap_or_else(|_| panic!("offset {size:?} is out of range for a token"))
}
