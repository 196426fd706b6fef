use cascade_syntax::SyntaxKind::*;
use cascade_syntax::SyntaxSet;

use crate::parser::Parser;

pub(super) const SELECTOR_FIRST: SyntaxSet =
    SyntaxSet::new([IDENT, STAR, PIPE, HASH, DOT, COLON, LEFT_BRACKET, AMPERSAND]);

const COMBINATORS: SyntaxSet = SyntaxSet::new([GREATER, PLUS, TILDE]);

const ATTRIBUTE_OPERATORS: SyntaxSet =
    SyntaxSet::new([EQ, INCLUDES, DASHMATCH, BEGINS, ENDS, CONTAINS]);

/// Tokens a pseudo-class argument list never runs past.
const PSEUDO_ARGUMENTS_END: SyntaxSet =
    SyntaxSet::new([RIGHT_PAREN, LEFT_BRACE, RIGHT_BRACE, SEMICOLON, EOF]);

pub(super) fn selectors_group(p: &mut Parser<'_>) {
    let m = p.start(SELECTORS_GROUP);
    selector(p);
    while p.eat(COMMA) {
        selector(p);
    }
    m.complete(p);
}

fn selector(p: &mut Parser<'_>) {
    let m = p.start(SELECTOR);
    simple_selector_sequence(p);
    loop {
        if p.at_set(&COMBINATORS) {
            let combinator = p.start(COMBINATOR);
            p.advance();
            combinator.complete(p);
            simple_selector_sequence(p);
        } else if p.at_set(&SELECTOR_FIRST) && p.has_whitespace_before() {
            simple_selector_sequence(p);
        } else {
            break;
        }
    }
    m.complete(p);
}

fn simple_selector_sequence(p: &mut Parser<'_>) {
    let m = p.start(SIMPLE_SELECTOR_SEQUENCE);
    let mut matched = match p.peek_kind() {
        IDENT | STAR | PIPE => {
            type_selector(p);
            true
        }
        AMPERSAND => {
            parent_selector(p);
            true
        }
        _ => false,
    };

    loop {
        let kind = p.peek_kind();
        if !matches!(kind, HASH | DOT | LEFT_BRACKET | COLON) || (matched && p.has_whitespace_before())
        {
            break;
        }
        match kind {
            HASH => {
                let id = p.start(CSS_ID);
                p.advance();
                id.complete(p);
            }
            DOT => {
                let class = p.start(CSS_CLASS);
                p.advance();
                p.expect(IDENT);
                class.complete(p);
            }
            LEFT_BRACKET => attribute(p),
            _ => pseudo(p),
        }
        matched = true;
    }

    if !matched {
        p.no_viable_alternative();
    }
    m.complete(p);
}

/// `ns|name`, `*|name`, `|name`, `name` or `*`.
fn type_selector(p: &mut Parser<'_>) {
    let m = p.start(TYPE_SELECTOR);
    if p.at(PIPE) || p.nth_at(1, PIPE) {
        let prefix = p.start(NAMESPACE_PREFIX);
        if !p.eat(IDENT) {
            p.eat(STAR);
        }
        p.expect(PIPE);
        prefix.complete(p);
    }

    let name = p.start(ELEMENT_NAME);
    if !p.eat(STAR) {
        p.expect(IDENT);
    }
    name.complete(p);
    m.complete(p);
}

/// `&`, optionally followed by a suffix such as `&-item`.
fn parent_selector(p: &mut Parser<'_>) {
    let m = p.start(PARENT_SELECTOR);
    p.advance();
    if p.at(IDENT) && !p.has_whitespace_before() {
        p.advance();
    }
    m.complete(p);
}

fn attribute(p: &mut Parser<'_>) {
    let m = p.start(ATTRIBUTE);
    p.advance();
    p.expect(IDENT);
    if p.at_set(&ATTRIBUTE_OPERATORS) {
        p.advance();
        if !p.eat(IDENT) {
            p.expect(STRING);
        }
        // case-sensitivity flag: `[type="a" i]`
        p.eat(IDENT);
    }
    p.expect(RIGHT_BRACKET);
    m.complete(p);
}

fn pseudo(p: &mut Parser<'_>) {
    let m = p.start(PSEUDO);
    p.advance();
    p.eat(COLON);
    if p.at(IDENT) && p.nth_at(1, LEFT_PAREN) {
        p.advance();
        p.advance();
        let mut depth = 0u32;
        while !p.at_set(&PSEUDO_ARGUMENTS_END) || (depth > 0 && p.at(RIGHT_PAREN)) {
            match p.peek_kind() {
                LEFT_PAREN => depth += 1,
                RIGHT_PAREN => depth -= 1,
                _ => {}
            }
            p.advance();
        }
        p.expect(RIGHT_PAREN);
    } else {
        p.expect(IDENT);
    }
    m.complete(p);
}
