use cascade_errors::ProblemCategory;
use cascade_syntax::TextRange;

use super::*;

fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
    token.text(text)
}

fn kinds(text: &str, dialect: Dialect) -> Vec<(SyntaxKind, &str)> {
    let (tokens, _) = tokenize(text, dialect);
    tokens
        .iter()
        .filter(|token| !token.is_hidden())
        .map(|token| (token.kind, token_text(token, text)))
        .collect()
}

#[test]
fn simple_rule() {
    let text = "a{color:red}";
    assert_eq!(
        kinds(text, Dialect::Css),
        [
            (IDENT, "a"),
            (LEFT_BRACE, "{"),
            (IDENT, "color"),
            (COLON, ":"),
            (IDENT, "red"),
            (RIGHT_BRACE, "}"),
            (EOF, ""),
        ]
    );
}

#[test]
fn eof_is_zero_width_and_repeats() {
    let text = "a";
    let mut tokenizer = Tokenizer::new(text, Dialect::Css);

    let token = tokenizer.next_token();
    assert_eq!(token.kind, IDENT);
    assert_eq!(token.index, 0);

    let eof = tokenizer.next_token();
    assert_eq!(eof.kind, EOF);
    assert_eq!(eof.range(), TextRange::empty(1.into()));
    assert_eq!(eof.stop, 0);

    let eof = tokenizer.next_token();
    assert_eq!(eof.kind, EOF);
    assert_eq!(eof.index, 1);
}

#[test]
fn hidden_tokens_are_kept() {
    let text = "/* c */ a\t{ }";
    let (tokens, problems) = tokenize(text, Dialect::Css);
    assert!(problems.is_empty());

    let hidden: Vec<_> = tokens
        .iter()
        .filter(|token| token.is_hidden())
        .map(|token| (token.kind, token_text(token, text)))
        .collect();
    assert_eq!(
        hidden,
        [(COMMENT, "/* c */"), (WHITESPACE, " "), (WHITESPACE, "\t"), (WHITESPACE, " ")]
    );
}

#[test]
fn tokens_tile_the_source() {
    let text = "@media screen { a > b.c[href^='x'] { margin: -1.5em 10% url(x.png) !important } }";
    let (tokens, problems) = tokenize(text, Dialect::Css);
    assert!(problems.is_empty());

    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.start as usize, offset, "gap before {token:?}");
        offset = token.range().end().into();
    }
    assert_eq!(offset, text.len());
}

#[test]
fn case_insensitive_matching_keeps_original_text() {
    let text = "x: URL(a.png) ! ImPortant";
    assert_eq!(
        kinds(text, Dialect::Css),
        [
            (IDENT, "x"),
            (COLON, ":"),
            (URI, "URL(a.png)"),
            (IMPORTANT_SYM, "! ImPortant"),
            (EOF, ""),
        ]
    );
}

#[test]
fn quoted_url_is_a_function_call() {
    let text = "url('a.png')";
    assert_eq!(
        kinds(text, Dialect::Css),
        [
            (IDENT, "url"),
            (LEFT_PAREN, "("),
            (STRING, "'a.png'"),
            (RIGHT_PAREN, ")"),
            (EOF, ""),
        ]
    );
}

#[test]
fn numbers_and_units() {
    let text = "10 1.5em 50% .5 -2px -moz-box --custom";
    assert_eq!(
        kinds(text, Dialect::Css),
        [
            (NUMBER, "10"),
            (DIMENSION, "1.5em"),
            (PERCENTAGE, "50%"),
            (NUMBER, ".5"),
            (MINUS, "-"),
            (DIMENSION, "2px"),
            (IDENT, "-moz-box"),
            (IDENT, "--custom"),
            (EOF, ""),
        ]
    );
}

#[test]
fn selector_punctuation() {
    let text = "ns|a#id.cls[x~=y][z|=w]*=$=^=~+>&";
    assert_eq!(
        kinds(text, Dialect::Css),
        [
            (IDENT, "ns"),
            (PIPE, "|"),
            (IDENT, "a"),
            (HASH, "#id"),
            (DOT, "."),
            (IDENT, "cls"),
            (LEFT_BRACKET, "["),
            (IDENT, "x"),
            (INCLUDES, "~="),
            (IDENT, "y"),
            (RIGHT_BRACKET, "]"),
            (LEFT_BRACKET, "["),
            (IDENT, "z"),
            (DASHMATCH, "|="),
            (IDENT, "w"),
            (RIGHT_BRACKET, "]"),
            (CONTAINS, "*="),
            (ENDS, "$="),
            (BEGINS, "^="),
            (TILDE, "~"),
            (PLUS, "+"),
            (GREATER, ">"),
            (AMPERSAND, "&"),
            (EOF, ""),
        ]
    );
}

#[test]
fn illegal_character_becomes_invalid_token() {
    let text = "a{color:€red}";
    let (tokens, problems) = tokenize(text, Dialect::Css);

    let invalid = tokens.iter().find(|token| token.kind == INVALID).unwrap();
    assert_eq!(invalid.range(), TextRange::new(8.into(), 11.into()));
    assert_eq!(token_text(invalid, text), "€");

    let red = tokens.iter().find(|token| token_text(token, text) == "red").unwrap();
    assert_eq!(red.range(), TextRange::new(11.into(), 14.into()));

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].category(), ProblemCategory::Lexing);
    assert_eq!((problems[0].from(), problems[0].to()), (8, 11));
    assert_eq!(problems[0].message(), "unexpected character `€`");
}

#[test]
fn ascii_garbage_is_invalid() {
    let text = "a ? b";
    let (tokens, problems) = tokenize(text, Dialect::Css);
    assert_eq!(tokens.iter().filter(|token| token.kind == INVALID).count(), 1);
    assert_eq!((problems[0].from(), problems[0].to()), (2, 3));
}

#[test]
fn unterminated_string_and_comment() {
    let text = "a { content: 'abc\n}";
    let (tokens, problems) = tokenize(text, Dialect::Css);
    let invalid = tokens.iter().find(|token| token.kind == INVALID).unwrap();
    assert_eq!(token_text(invalid, text), "'abc");
    assert_eq!(problems[0].message(), "unterminated string");

    let text = "a /* never closed";
    let (tokens, problems) = tokenize(text, Dialect::Css);
    let invalid = tokens.iter().find(|token| token.kind == INVALID).unwrap();
    assert_eq!(token_text(invalid, text), "/* never closed");
    assert_eq!(problems[0].message(), "unterminated comment");
}

#[test]
fn dialect_specific_tokens() {
    let text = "$x: 1; // note";
    assert_eq!(
        kinds(text, Dialect::Scss),
        [(SASS_VAR, "$x"), (COLON, ":"), (NUMBER, "1"), (SEMICOLON, ";"), (EOF, "")]
    );

    let (tokens, problems) = tokenize(text, Dialect::Css);
    assert_eq!(tokens[0].kind, INVALID);
    assert!(tokens.iter().any(|token| token.kind == SOLIDUS));
    assert_eq!(problems.len(), 1);

    let text = "@color: red; // note";
    let less = kinds(text, Dialect::Less);
    assert_eq!(less[0], (AT_IDENT, "@color"));
    assert_eq!(less.len(), 5);
}

#[test]
fn dialect_queries() {
    let tokenizer = Tokenizer::new("", Dialect::Less);
    assert!(tokenizer.is_less_source());
    assert!(!tokenizer.is_scss_source());

    let tokenizer = Tokenizer::new("", Dialect::Scss);
    assert!(!tokenizer.is_less_source());
    assert!(tokenizer.is_scss_source());
}
