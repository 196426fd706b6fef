use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
use indexmap::IndexSet;
pub use text_size::TextRange;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ProblemCategory {
    Lexing,
    Parsing,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in the source, located by byte offsets.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProblemDescription {
    from: u32,
    to: u32,
    message: String,
    category: ProblemCategory,
    severity: Severity,
}

impl ProblemDescription {
    pub fn new(
        range: TextRange,
        message: impl Into<String>,
        category: ProblemCategory,
        severity: Severity,
    ) -> Self {
        Self {
            from: range.start().into(),
            to: range.end().into(),
            message: message.into(),
            category,
            severity,
        }
    }

    pub fn lexing(range: TextRange, message: impl Into<String>) -> Self {
        Self::new(range, message, ProblemCategory::Lexing, Severity::Error)
    }

    pub fn parsing(range: TextRange, message: impl Into<String>) -> Self {
        Self::new(range, message, ProblemCategory::Parsing, Severity::Error)
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.from.into(), self.to.into())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> ProblemCategory {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = match self.severity {
            Severity::Error => Level::Error,
            Severity::Warning => Level::Warning,
        };
        let message = level.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.from as usize..self.to as usize).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

/// Insertion-ordered problems without duplicates.
#[derive(Clone, Debug, Default)]
pub struct ProblemSet {
    problems: IndexSet<ProblemDescription>,
}

impl ProblemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `problem` unless an equal one was already recorded.
    pub fn insert(&mut self, problem: ProblemDescription) -> bool {
        self.problems.insert(problem)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProblemDescription> {
        self.problems.iter()
    }

    pub fn into_vec(self) -> Vec<ProblemDescription> {
        self.problems.into_iter().collect()
    }
}

impl Extend<ProblemDescription> for ProblemSet {
    fn extend<T: IntoIterator<Item = ProblemDescription>>(&mut self, iter: T) {
        self.problems.extend(iter);
    }
}
