#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    COLON,
    SEMICOLON,
    COMMA,
    DOT,
    GREATER,
    LESS,
    PLUS,
    MINUS,
    TILDE,
    STAR,
    PIPE,
    SOLIDUS,
    PERCENT,
    AMPERSAND,
    EXCLAMATION,
    EQ,
    INCLUDES,
    DASHMATCH,
    BEGINS,
    ENDS,
    CONTAINS,

    IDENT,
    AT_IDENT,
    SASS_VAR,
    HASH,
    STRING,
    NUMBER,
    PERCENTAGE,
    DIMENSION,
    URI,
    IMPORTANT_SYM,

    WHITESPACE,
    COMMENT,
    LINE_COMMENT,

    INVALID,
    EOF,

    ROOT,
    STYLE_SHEET,
    BODY,
    BODY_ITEM,
    RULE,
    SELECTORS_GROUP,
    SELECTOR,
    SIMPLE_SELECTOR_SEQUENCE,
    TYPE_SELECTOR,
    NAMESPACE_PREFIX,
    ELEMENT_NAME,
    CSS_ID,
    CSS_CLASS,
    ATTRIBUTE,
    PSEUDO,
    PARENT_SELECTOR,
    COMBINATOR,
    DECLARATIONS,
    DECLARATION,
    PROPERTY,
    EXPRESSION,
    TERM,
    FUNCTION,
    OPERATOR,
    PRIO,
    AT_RULE,
    AT_RULE_PRELUDE,
    VARIABLE_DECLARATION,
    SYNC,
    RECOVERY,
    ERROR,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Whitespace and comments: kept for lossless text, never seen by the grammar.
    pub const fn is_hidden(self) -> bool {
        matches!(self, WHITESPACE | COMMENT | LINE_COMMENT)
    }

    pub const fn is_token(self) -> bool {
        (self as u8) <= (EOF as u8)
    }

    pub const fn is_rule(self) -> bool {
        !self.is_token()
    }

    /// The name used for this kind in tree paths and dumps.
    ///
    /// Rules use the camel-cased grammar name (`bodyItem`), tokens their
    /// upper-cased kind (`IDENT`).
    pub const fn name(self) -> &'static str {
        match self {
            LEFT_PAREN => "LEFT_PAREN",
            RIGHT_PAREN => "RIGHT_PAREN",
            LEFT_BRACKET => "LEFT_BRACKET",
            RIGHT_BRACKET => "RIGHT_BRACKET",
            LEFT_BRACE => "LEFT_BRACE",
            RIGHT_BRACE => "RIGHT_BRACE",
            COLON => "COLON",
            SEMICOLON => "SEMICOLON",
            COMMA => "COMMA",
            DOT => "DOT",
            GREATER => "GREATER",
            LESS => "LESS",
            PLUS => "PLUS",
            MINUS => "MINUS",
            TILDE => "TILDE",
            STAR => "STAR",
            PIPE => "PIPE",
            SOLIDUS => "SOLIDUS",
            PERCENT => "PERCENT",
            AMPERSAND => "AMPERSAND",
            EXCLAMATION => "EXCLAMATION",
            EQ => "EQ",
            INCLUDES => "INCLUDES",
            DASHMATCH => "DASHMATCH",
            BEGINS => "BEGINS",
            ENDS => "ENDS",
            CONTAINS => "CONTAINS",
            IDENT => "IDENT",
            AT_IDENT => "AT_IDENT",
            SASS_VAR => "SASS_VAR",
            HASH => "HASH",
            STRING => "STRING",
            NUMBER => "NUMBER",
            PERCENTAGE => "PERCENTAGE",
            DIMENSION => "DIMENSION",
            URI => "URI",
            IMPORTANT_SYM => "IMPORTANT_SYM",
            WHITESPACE => "WHITESPACE",
            COMMENT => "COMMENT",
            LINE_COMMENT => "LINE_COMMENT",
            INVALID => "INVALID",
            EOF => "EOF",
            ROOT => "root",
            STYLE_SHEET => "styleSheet",
            BODY => "body",
            BODY_ITEM => "bodyItem",
            RULE => "rule",
            SELECTORS_GROUP => "selectorsGroup",
            SELECTOR => "selector",
            SIMPLE_SELECTOR_SEQUENCE => "simpleSelectorSequence",
            TYPE_SELECTOR => "typeSelector",
            NAMESPACE_PREFIX => "namespacePrefix",
            ELEMENT_NAME => "elementName",
            CSS_ID => "cssId",
            CSS_CLASS => "cssClass",
            ATTRIBUTE => "attribute",
            PSEUDO => "pseudo",
            PARENT_SELECTOR => "parentSelector",
            COMBINATOR => "combinator",
            DECLARATIONS => "declarations",
            DECLARATION => "declaration",
            PROPERTY => "property",
            EXPRESSION => "expression",
            TERM => "term",
            FUNCTION => "function",
            OPERATOR => "operator",
            PRIO => "prio",
            AT_RULE => "atRule",
            AT_RULE_PRELUDE => "atRulePrelude",
            VARIABLE_DECLARATION => "variableDeclaration",
            SYNC => "sync",
            RECOVERY => "recovery",
            ERROR => "error",
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
