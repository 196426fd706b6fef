use cascade_syntax::SyntaxKind::*;
use cascade_syntax::SyntaxSet;

use super::NESTED_RULE_DECISION;
use super::items::{self, is_less_variable};
use super::selectors::{self, SELECTOR_FIRST};
use crate::parser::Parser;

const DECLARATION_FIRST: SyntaxSet = SyntaxSet::new([IDENT, STAR, AT_IDENT, SASS_VAR]);

const DECLARATION_END: SyntaxSet = SyntaxSet::new([SEMICOLON, RIGHT_BRACE]);

const TERM_FIRST: SyntaxSet = SyntaxSet::new([
    NUMBER, PERCENTAGE, DIMENSION, STRING, URI, HASH, IDENT, SASS_VAR, AT_IDENT, MINUS, PLUS,
    LEFT_PAREN,
]);

const OPERATORS: SyntaxSet = SyntaxSet::new([SOLIDUS, COMMA, EQ, PLUS, STAR, PERCENT]);

/// `{ declaration ; ... }`
///
/// A `;` may only follow a declaration; anything else that can not start
/// one is skipped up to the next thing that can.
pub(super) fn declarations(p: &mut Parser<'_>) {
    let m = p.start(DECLARATIONS);
    p.expect(LEFT_BRACE);

    let nesting = p.allows_nesting();
    let recovery = if nesting {
        DECLARATION_FIRST.union(&SELECTOR_FIRST).with(RIGHT_BRACE)
    } else {
        DECLARATION_FIRST.with(RIGHT_BRACE)
    };

    let mut after_item = false;
    loop {
        match p.peek_kind() {
            RIGHT_BRACE | EOF => break,
            SEMICOLON if after_item => p.advance(),
            kind if DECLARATION_FIRST.contains(kind)
                || (nesting && SELECTOR_FIRST.contains(kind)) =>
            {
                block_item(p);
                after_item = true;
            }
            _ => {
                p.no_viable_alternative();
                p.recover(&recovery);
                after_item = false;
            }
        }
    }

    p.expect(RIGHT_BRACE);
    m.complete(p);
}

fn block_item(p: &mut Parser<'_>) {
    match p.peek_kind() {
        SASS_VAR => items::variable_declaration(p, true),
        AT_IDENT if is_less_variable(p) => items::variable_declaration(p, true),
        AT_IDENT => items::at_rule(p, true),
        _ if p.allows_nesting() && is_nested_rule(p) => items::rule(p),
        _ => declaration(p),
    }
}

fn is_nested_rule(p: &mut Parser<'_>) -> bool {
    p.speculate(NESTED_RULE_DECISION, |p| {
        selectors::selectors_group(p);
        p.expect(LEFT_BRACE);
    })
}

fn declaration(p: &mut Parser<'_>) {
    let m = p.start(DECLARATION);
    if property(p) && p.expect(COLON) && expression(p) {
        prio(p);
    } else {
        p.recover(&DECLARATION_END);
    }
    m.complete(p);
}

fn property(p: &mut Parser<'_>) -> bool {
    let m = p.start(PROPERTY);
    // `*zoom: 1`
    p.eat(STAR);
    let matched = p.expect(IDENT);
    m.complete(p);
    matched
}

pub(super) fn expression(p: &mut Parser<'_>) -> bool {
    let m = p.start(EXPRESSION);
    let mut matched = term(p);
    while matched {
        if p.at_set(&OPERATORS) {
            let op = p.start(OPERATOR);
            p.advance();
            op.complete(p);
            matched = term(p);
        } else if p.at_set(&TERM_FIRST) {
            matched = term(p);
        } else {
            break;
        }
    }
    m.complete(p);
    matched
}

fn term(p: &mut Parser<'_>) -> bool {
    let m = p.start(TERM);
    if p.at(MINUS) || p.at(PLUS) {
        let op = p.start(OPERATOR);
        p.advance();
        op.complete(p);
    }

    let matched = match p.peek_kind() {
        IDENT if p.nth_at(1, LEFT_PAREN) => function(p),
        LEFT_PAREN => {
            p.advance();
            expression(p) && p.expect(RIGHT_PAREN)
        }
        NUMBER | PERCENTAGE | DIMENSION | STRING | URI | HASH | IDENT | SASS_VAR | AT_IDENT => {
            p.advance();
            true
        }
        _ => {
            p.no_viable_alternative();
            false
        }
    };
    m.complete(p);
    matched
}

fn function(p: &mut Parser<'_>) -> bool {
    let m = p.start(FUNCTION);
    p.advance();
    p.advance();
    let matched = (p.at(RIGHT_PAREN) || expression(p)) && p.expect(RIGHT_PAREN);
    m.complete(p);
    matched
}

/// `!important`, or a flag such as SCSS `!default`.
pub(super) fn prio(p: &mut Parser<'_>) {
    if p.at(IMPORTANT_SYM) {
        let m = p.start(PRIO);
        p.advance();
        m.complete(p);
        return;
    }

    while p.allows_nesting() && p.at(EXCLAMATION) && p.nth_at(1, IDENT) {
        let m = p.start(PRIO);
        p.advance();
        p.advance();
        m.complete(p);
    }
}
