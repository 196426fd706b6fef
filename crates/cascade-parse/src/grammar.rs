use cascade_syntax::SyntaxKind::*;
use cascade_syntax::SyntaxSet;

use crate::parser::Parser;

mod declarations;
mod items;
mod selectors;

/// Rules that drive recovery but never get a node of their own.
pub const IGNORED_RULES: SyntaxSet = SyntaxSet::new([SYNC]);

/// Trial parse deciding between a nested rule and a declaration.
const NESTED_RULE_DECISION: u32 = 1;

pub(crate) fn style_sheet(p: &mut Parser<'_>) {
    let m = p.start(STYLE_SHEET);
    items::body(p, false);
    m.complete(p);
}
