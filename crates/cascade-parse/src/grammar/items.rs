use cascade_syntax::SyntaxKind::*;
use cascade_syntax::SyntaxSet;

use super::declarations::{self, expression, prio};
use super::selectors::{self, SELECTOR_FIRST};
use crate::parser::Parser;

const BODY_ITEM_FIRST: SyntaxSet = SELECTOR_FIRST.union(&SyntaxSet::new([AT_IDENT, SASS_VAR]));

const PRELUDE_END: SyntaxSet = SyntaxSet::new([LEFT_BRACE, RIGHT_BRACE, SEMICOLON, EOF]);

const STATEMENT_END: SyntaxSet = SyntaxSet::new([SEMICOLON, RIGHT_BRACE]);

/// At-rules whose block holds rules rather than declarations.
const GROUPING_AT_RULES: &[&str] =
    &["media", "supports", "document", "-moz-document", "layer", "container", "scope"];

pub(super) fn body(p: &mut Parser<'_>, nested: bool) {
    let m = p.start(BODY);
    loop {
        match p.peek_kind() {
            EOF => break,
            RIGHT_BRACE if nested => break,
            _ => body_item(p, nested),
        }
    }
    m.complete(p);
}

fn body_item(p: &mut Parser<'_>, nested: bool) {
    let m = p.start(BODY_ITEM);
    match p.peek_kind() {
        AT_IDENT if is_less_variable(p) => variable_declaration(p, false),
        AT_IDENT => at_rule(p, false),
        SASS_VAR => variable_declaration(p, false),
        kind if SELECTOR_FIRST.contains(kind) => rule(p),
        _ => {
            p.no_viable_alternative();
            let recovery = if nested { BODY_ITEM_FIRST.with(RIGHT_BRACE) } else { BODY_ITEM_FIRST };
            p.recover(&recovery);
        }
    }
    m.complete(p);
}

pub(super) fn is_less_variable(p: &mut Parser<'_>) -> bool {
    p.is_less_source() && p.at(AT_IDENT) && p.nth_at(1, COLON)
}

pub(super) fn rule(p: &mut Parser<'_>) {
    let m = p.start(RULE);
    selectors::selectors_group(p);
    if p.at(LEFT_BRACE) {
        declarations::declarations(p);
    } else {
        p.expect(LEFT_BRACE);
        p.recover(&SyntaxSet::new([RIGHT_BRACE]));
        p.eat(RIGHT_BRACE);
    }
    m.complete(p);
}

/// Inside a declaration block every at-rule block holds declarations again.
pub(super) fn at_rule(p: &mut Parser<'_>, in_block: bool) {
    let m = p.start(AT_RULE);
    let name = p.current_text().trim_start_matches('@').to_ascii_lowercase();
    p.advance();

    let prelude = p.start(AT_RULE_PRELUDE);
    while !p.at_set(&PRELUDE_END) {
        p.advance();
    }
    prelude.complete(p);

    match p.peek_kind() {
        SEMICOLON => p.advance(),
        LEFT_BRACE if !in_block && GROUPING_AT_RULES.contains(&name.as_str()) => {
            p.advance();
            body(p, true);
            p.expect(RIGHT_BRACE);
        }
        LEFT_BRACE => declarations::declarations(p),
        _ => {
            p.expect(SEMICOLON);
        }
    }
    m.complete(p);
}

/// `$name: value` in SCSS, `@name: value` in LESS.
///
/// Inside a block the separating `;` belongs to the enclosing declarations.
pub(super) fn variable_declaration(p: &mut Parser<'_>, in_block: bool) {
    let m = p.start(VARIABLE_DECLARATION);
    p.advance();
    if p.expect(COLON) && expression(p) {
        prio(p);
    } else {
        p.recover(&STATEMENT_END);
    }
    if !in_block && !p.at(RIGHT_BRACE) {
        p.expect(SEMICOLON);
    }
    m.complete(p);
}
