use cascade_syntax::{Dialect, SyntaxSet};

use crate::grammar;

/// Configuration of a single parse.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    dialect: Dialect,
    ignored_rules: SyntaxSet,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { dialect: Dialect::default(), ignored_rules: grammar::IGNORED_RULES }
    }
}

impl ParseOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self::default().with_dialect(dialect)
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Replaces the rules that never get a node of their own.
    pub fn with_ignored_rules(mut self, ignored_rules: SyntaxSet) -> Self {
        self.ignored_rules = ignored_rules;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn ignored_rules(&self) -> &SyntaxSet {
        &self.ignored_rules
    }
}
