mod cursor;

use cascade_errors::ProblemDescription;
use cascade_syntax::SyntaxKind::*;
pub use cascade_syntax::{Dialect, SyntaxKind, Token};
use cursor::{Cursor, EOF_CHAR};

/// Splits CSS-family source into tokens, hidden ones included.
///
/// Characters the grammar has no token for are never skipped silently: each
/// one becomes an `INVALID` token and a lexing problem.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    dialect: Dialect,
    index: u32,
    problems: Vec<ProblemDescription>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str, dialect: Dialect) -> Self {
        Self { cursor: Cursor::new(text), dialect, index: 0, problems: Vec::new() }
    }

    pub fn is_less_source(&self) -> bool {
        self.dialect.is_less()
    }

    pub fn is_scss_source(&self) -> bool {
        self.dialect.is_scss()
    }

    /// Lexing problems recorded since the last call.
    pub fn take_problems(&mut self) -> Vec<ProblemDescription> {
        std::mem::take(&mut self.problems)
    }

    /// Returns the next token; once the input is exhausted, returns `EOF` forever.
    pub fn next_token(&mut self) -> Token {
        self.cursor.reset_token_start();
        let kind = self.syntax_kind();
        let token = Token::new(kind, self.index, self.cursor.token_range());
        if kind != EOF {
            self.index += 1;
        }
        token
    }

    fn syntax_kind(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() {
            return EOF;
        }

        match self.cursor.advance() {
            c if is_whitespace(c) => {
                self.cursor.advance_while(is_whitespace);
                WHITESPACE
            }
            '/' if self.cursor.peek() == '*' => self.block_comment(),
            '/' if self.cursor.peek() == '/' && !matches!(self.dialect, Dialect::Css) => {
                self.cursor.advance_while(|c| c != '\n' && c != '\r');
                LINE_COMMENT
            }
            '/' => SOLIDUS,
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ':' => COLON,
            ';' => SEMICOLON,
            ',' => COMMA,
            '>' => GREATER,
            '<' => LESS,
            '+' => PLUS,
            '%' => PERCENT,
            '&' => AMPERSAND,
            '=' => EQ,
            '~' => self.with_eq(TILDE, INCLUDES),
            '|' => self.with_eq(PIPE, DASHMATCH),
            '*' => self.with_eq(STAR, CONTAINS),
            '^' if self.cursor.peek() == '=' => {
                self.cursor.advance();
                BEGINS
            }
            '$' if self.cursor.peek() == '=' => {
                self.cursor.advance();
                ENDS
            }
            '$' if self.is_scss_source() && is_name_start(self.cursor.peek()) => {
                self.name();
                SASS_VAR
            }
            '!' => self.important(),
            '@' if is_name_start(self.cursor.peek()) || self.cursor.peek() == '-' => {
                self.name();
                AT_IDENT
            }
            '#' if is_name_char(self.cursor.peek()) => {
                self.name();
                HASH
            }
            quote @ ('"' | '\'') => self.string(quote),
            '0'..='9' => self.number(),
            '.' if self.cursor.peek().is_ascii_digit() => self.number(),
            '.' => DOT,
            '-' if self.cursor.peek().is_ascii_digit()
                || (self.cursor.peek() == '.' && self.cursor.second().is_ascii_digit()) =>
            {
                MINUS
            }
            '-' if is_name_start(self.cursor.peek()) || self.cursor.peek() == '-' => self.ident(),
            '-' => MINUS,
            '\\' if !matches!(self.cursor.peek(), '\n' | '\r' | EOF_CHAR) => {
                self.cursor.advance();
                self.ident()
            }
            c if is_name_start(c) => self.ident(),
            c => self.invalid(format!("unexpected character `{}`", c.escape_debug())),
        }
    }

    fn with_eq(&mut self, single: SyntaxKind, with_eq: SyntaxKind) -> SyntaxKind {
        if self.cursor.peek() == '=' {
            self.cursor.advance();
            with_eq
        } else {
            single
        }
    }

    /// Records a lexing problem for the current token and classifies it as `INVALID`.
    fn invalid(&mut self, message: String) -> SyntaxKind {
        self.problems.push(ProblemDescription::lexing(self.cursor.token_range(), message));
        INVALID
    }

    fn block_comment(&mut self) -> SyntaxKind {
        self.cursor.advance();
        loop {
            match self.cursor.advance() {
                '*' if self.cursor.peek() == '/' => {
                    self.cursor.advance();
                    return COMMENT;
                }
                _ if self.cursor.is_eof() => {
                    return self.invalid("unterminated comment".to_owned());
                }
                _ => {}
            }
        }
    }

    fn important(&mut self) -> SyntaxKind {
        let mut lookahead = 1;
        while is_whitespace(self.cursor.la(lookahead)) {
            lookahead += 1;
        }
        let end = lookahead + "IMPORTANT".len();
        if self.cursor.la_matches(lookahead, "IMPORTANT") && !is_name_char(self.cursor.la(end)) {
            self.cursor.advance_n(lookahead - 1 + "IMPORTANT".len());
            IMPORTANT_SYM
        } else {
            EXCLAMATION
        }
    }

    fn name(&mut self) {
        loop {
            match self.cursor.peek() {
                '\\' if !matches!(self.cursor.second(), '\n' | '\r' | EOF_CHAR) => {
                    self.cursor.advance_n(2);
                }
                c if is_name_char(c) => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn ident(&mut self) -> SyntaxKind {
        self.name();
        if self.cursor.token_text().eq_ignore_ascii_case("url") && self.cursor.peek() == '(' {
            return self.uri();
        }
        IDENT
    }

    /// `url(` followed by an unquoted address; quoted forms stay a function call.
    fn uri(&mut self) -> SyntaxKind {
        let mut lookahead = 2;
        while is_whitespace(self.cursor.la(lookahead)) {
            lookahead += 1;
        }
        if matches!(self.cursor.la(lookahead), '"' | '\'' | ')' | EOF_CHAR) {
            return IDENT;
        }

        loop {
            match self.cursor.la(lookahead) {
                ')' => {
                    self.cursor.advance_n(lookahead);
                    return URI;
                }
                '\n' | '\r' | '"' | '\'' | '(' | EOF_CHAR => return IDENT,
                _ => lookahead += 1,
            }
        }
    }

    fn string(&mut self, quote: char) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                c if c == quote => {
                    self.cursor.advance();
                    return STRING;
                }
                '\\' if !self.cursor.is_eof() => {
                    self.cursor.advance_n(2);
                }
                '\n' | '\r' => return self.invalid("unterminated string".to_owned()),
                _ if self.cursor.is_eof() => {
                    return self.invalid("unterminated string".to_owned());
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn number(&mut self) -> SyntaxKind {
        self.cursor.advance_while(|c| c.is_ascii_digit());
        if self.cursor.peek() == '.' && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        match self.cursor.peek() {
            '%' => {
                self.cursor.advance();
                PERCENTAGE
            }
            c if is_name_start(c) => {
                self.name();
                DIMENSION
            }
            '-' if is_name_start(self.cursor.second()) => {
                self.name();
                DIMENSION
            }
            _ => NUMBER,
        }
    }
}

/// Collects all tokens of `text` up to and including `EOF`, with the lexing
/// problems found along the way.
pub fn tokenize(text: &str, dialect: Dialect) -> (Vec<Token>, Vec<ProblemDescription>) {
    let mut tokenizer = Tokenizer::new(text, dialect);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        tokens.push(token);
        if token.kind == EOF {
            break;
        }
    }
    (tokens, tokenizer.take_problems())
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && c.is_alphabetic())
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

#[cfg(test)]
mod tests;
