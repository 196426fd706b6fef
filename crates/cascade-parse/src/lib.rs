//! Error-tolerant parsing of CSS, LESS and SCSS into a [`SyntaxTree`].

use cascade_errors::ProblemDescription;
use cascade_syntax::{Dialect, SyntaxNode, SyntaxTree};

mod builder;
mod event;
mod grammar;
mod options;
mod parser;

pub use builder::TreeBuilder;
pub use event::{Listener, RecognitionError, RecognitionErrorKind};
pub use grammar::IGNORED_RULES;
pub use options::ParseOptions;

/// The result of parsing one source: always a tree, plus every problem found.
#[derive(Debug)]
pub struct Parse {
    tree: SyntaxTree,
    problems: Vec<ProblemDescription>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    pub fn problems(&self) -> &[ProblemDescription] {
        &self.problems
    }

    pub fn into_parts(self) -> (SyntaxTree, Vec<ProblemDescription>) {
        (self.tree, self.problems)
    }

    /// The tree dump followed by one line per problem.
    pub fn debug_dump(&self) -> String {
        let mut out = self.tree.debug_dump();
        out.push_str("Problems:\n");
        for problem in &self.problems {
            let line = format!("  {}..{} {}\n", problem.from(), problem.to(), problem.message());
            out.push_str(&line);
        }
        out
    }
}

pub fn parse(text: &str, dialect: Dialect) -> Parse {
    parse_with_options(text, &ParseOptions::new(dialect))
}

/// # Panics
///
/// If `text` is 2 GiB or longer; token offsets are stored as `i32`.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Parse {
    let (tokens, lexing_problems) = cascade_tokenizer::tokenize(text, options.dialect());
    let mut builder = TreeBuilder::new(text, options.ignored_rules().clone(), lexing_problems);

    let mut parser = parser::Parser::new(text, tokens, options.dialect(), &mut builder);
    grammar::style_sheet(&mut parser);
    parser.finish();

    let (tree, problems) = builder.finish();
    Parse { tree, problems }
}
