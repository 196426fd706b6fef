use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use cascade_errors::Renderer;
use cascade_parse::Parse;
use cascade_syntax::Dialect;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
enum Options {
    /// Reports every problem found in a stylesheet.
    Check {
        path: Utf8PathBuf,
        #[arg(long, value_enum)]
        dialect: Option<DialectArg>,
    },
    /// Prints the syntax tree of a stylesheet.
    Tree {
        path: Utf8PathBuf,
        #[arg(long, value_enum)]
        dialect: Option<DialectArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Css,
    Less,
    Scss,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Css => Self::Css,
            DialectArg::Less => Self::Less,
            DialectArg::Scss => Self::Scss,
        }
    }
}

fn parse_file(path: &Utf8Path, dialect: Option<DialectArg>) -> anyhow::Result<(String, Parse)> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    let dialect = dialect.map_or_else(
        || Dialect::from_extension(path.extension().unwrap_or_default()),
        Dialect::from,
    );
    tracing::info!(%path, ?dialect, "parsing");

    let parse = cascade_parse::parse(&text, dialect);
    Ok((text, parse))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Options::parse() {
        Options::Check { path, dialect } => {
            let (text, parse) = parse_file(&path, dialect)?;
            let renderer = Renderer::styled();
            for problem in parse.problems() {
                eprintln!("{}", problem.render(&renderer, path.as_str(), &text));
            }

            if !parse.problems().is_empty() {
                bail!("found {} problem(s) in `{path}`", parse.problems().len());
            }
            Ok(())
        }
        Options::Tree { path, dialect } => {
            let (_, parse) = parse_file(&path, dialect)?;
            print!("{}", parse.debug_dump());
            Ok(())
        }
    }
}
