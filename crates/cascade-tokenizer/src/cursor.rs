use std::str::Chars;

use text_size::{TextRange, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

/// Character cursor over the source.
///
/// Lookahead through [`Cursor::la`] is upper-cased so rules can match
/// case-insensitively; the original text is only ever read back through
/// ranges.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    chars: Chars<'a>,
    token_start: TextSize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars(), token_start: TextSize::new(0) }
    }

    pub(crate) fn offset(&self) -> TextSize {
        TextSize::new((self.text.len() - self.chars.as_str().len()) as u32)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn token_range(&self) -> TextRange {
        TextRange::new(self.token_start, self.offset())
    }

    pub(crate) fn reset_token_start(&mut self) {
        self.token_start = self.offset();
    }

    /// The original, unmodified text of the current token.
    pub(crate) fn token_text(&self) -> &'a str {
        &self.text[self.token_range()]
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        let mut chars = self.chars.clone();
        chars.next();
        chars.next().unwrap_or(EOF_CHAR)
    }

    /// Upper-cased lookahead; `la(1)` is the next character.
    pub(crate) fn la(&self, i: usize) -> char {
        debug_assert!(i > 0);
        let c = self.chars.clone().nth(i - 1).unwrap_or(EOF_CHAR);
        c.to_uppercase().next().unwrap_or(c)
    }

    /// Whether the upper-cased lookahead starting at `la(i)` spells `word`.
    pub(crate) fn la_matches(&self, i: usize, word: &str) -> bool {
        word.chars().enumerate().all(|(offset, expected)| self.la(i + offset) == expected)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }
}
