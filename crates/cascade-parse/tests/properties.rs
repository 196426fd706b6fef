use cascade_parse::{Parse, parse};
use cascade_syntax::{Dialect, NodeVariant, SyntaxNode, TextRange, TextSize, Token};

const SOURCES: &[(&str, Dialect)] = &[
    ("", Dialect::Css),
    ("a{color:red}", Dialect::Css),
    ("a{color:red", Dialect::Css),
    ("a{color:€red}", Dialect::Css),
    ("a{ ;;; color:red}", Dialect::Css),
    ("a {\n s  red; \n background: red; \n}", Dialect::Css),
    ("a {\n % color: red; \n background: red; \n}", Dialect::Css),
    ("myns|h1  color: red; } h2 { color: blue; }", Dialect::Css),
    ("} } a, { b: ; c: (d; } @media { x { y: z } @", Dialect::Css),
    ("/* unterminated", Dialect::Css),
    ("a[href^='http' i] > b ~ c + d::before:not(.e, #f) { content: \"x", Dialect::Css),
    ("@import url(foo.css) screen;\n@font-face { src: url('x.woff') format(\"woff\") }", Dialect::Css),
    ("a { width: calc(100% - (2px * 3)) !important; *zoom: 1; }", Dialect::Css),
    ("@c: red; // line\n.a { .b; color: @c; &-x:hover { d: e } }", Dialect::Less),
    ("@media screen { .a { @d: 1 } } .b { ~ ; }", Dialect::Less),
    ("$w: 1px !default;\n%p { a: b }\n.a { &:hover { c: $w } @include m; d: e !global }", Dialect::Scss),
    ("a { b { c { d", Dialect::Scss),
    ("a{ % | }", Dialect::Scss),
    ("@m({url(})|})|", Dialect::Less),
    ("\u{1F600} a { b: c \u{00E9} }", Dialect::Scss),
];

fn collect_tokens(parse: &Parse) -> Vec<Token> {
    let mut tokens = Vec::new();
    for leaf in parse.root().tokens() {
        tokens.extend_from_slice(leaf.hidden_tokens());
        tokens.extend(leaf.token());
    }
    tokens.extend_from_slice(parse.tree().trailing_hidden());
    tokens
}

#[test]
fn tokens_tile_the_source() {
    for &(text, dialect) in SOURCES {
        let parse = parse(text, dialect);
        let mut offset = TextSize::new(0);
        for token in collect_tokens(&parse) {
            let range = token.range();
            assert_eq!(range.start(), offset, "gap or overlap before {token:?} in {text:?}");
            offset = range.end();
        }
        assert_eq!(usize::from(offset), text.len(), "uncovered tail in {text:?}");
    }
}

fn check_containment(node: SyntaxNode<'_>, text: &str) {
    let range = node.data().range().unwrap_or_else(|| panic!("{node:?} has no range in {text:?}"));
    for child in node.children() {
        assert_eq!(child.parent(), Some(node));
        let child_range = child.data().range().unwrap_or_else(|| panic!("{child:?} in {text:?}"));
        assert!(
            range.contains_range(child_range),
            "{node:?} does not contain {child:?} in {text:?}"
        );
        check_containment(child, text);
    }
}

#[test]
fn children_lie_within_their_parents() {
    for &(text, dialect) in SOURCES {
        let parse = parse(text, dialect);
        let root = parse.root();
        assert_eq!(root.text_range(), TextRange::up_to(TextSize::of(text)));
        check_containment(root, text);
    }
}

#[test]
fn rules_are_never_empty() {
    for &(text, dialect) in SOURCES {
        let parse = parse(text, dialect);
        for node in parse.root().descendants() {
            if node.variant() == NodeVariant::Rule {
                assert!(node.first_child().is_some(), "empty {node:?} in {text:?}");
            }
        }
    }
}

#[test]
fn recovery_nodes_live_inside_errors_or_rules() {
    for &(text, dialect) in SOURCES {
        let parse = parse(text, dialect);
        for node in parse.root().descendants() {
            if node.variant() == NodeVariant::Recovery {
                let parent = node.parent().unwrap();
                assert!(matches!(parent.variant(), NodeVariant::Error | NodeVariant::Rule));
                assert!(node.first_child().is_some());
            }
        }
    }
}

#[test]
fn problems_lie_within_the_source() {
    for &(text, dialect) in SOURCES {
        let parse = parse(text, dialect);
        for problem in parse.problems() {
            assert!(problem.from() <= problem.to());
            assert!(problem.to() as usize <= text.len(), "{problem:?} in {text:?}");
        }
    }
}

#[test]
fn well_formed_sources_have_no_problems() {
    let sources = [
        ("a{color:red}", Dialect::Css),
        ("@import url(foo.css) screen;\n@font-face { src: url('x.woff') format(\"woff\") }", Dialect::Css),
        ("a { width: calc(100% - (2px * 3)) !important; *zoom: 1; }", Dialect::Css),
        ("@c: red; // line\n.a { color: @c; &-x:hover { d: e } }", Dialect::Less),
    ];
    for (text, dialect) in sources {
        let parse = parse(text, dialect);
        assert!(parse.problems().is_empty(), "{text:?}: {:?}", parse.problems());
    }
}

#[test]
fn parsing_twice_gives_the_same_result() {
    for &(text, dialect) in SOURCES {
        assert_eq!(parse(text, dialect).debug_dump(), parse(text, dialect).debug_dump());
    }
}
