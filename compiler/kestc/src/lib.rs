//! Host side of the Kest interpreter.
//!
//! Ties the phases together for the `kest` binary and for embedders: read a
//! source file, tokenize or parse it, and evaluate it against a root scope
//! pre-populated with the built-ins in [`builtins`]. Every failure surfaces
//! as an [`Error`] that renders as `<file>:line <L>:column <C>: <message>`.

pub mod builtins;

use std::path::{Path, PathBuf};

use kest_diagnostic::IntoDiagnostic;
use kest_eval::{EvalError, Interpreter, InterpreterBuilder, SharedPrintHandler, Value};
use kest_ir::{Program, Token};
use kest_lexer::{collect_tokens, ChannelTokens, LexError};
use kest_parse::ParseError;
use tracing::debug;

pub use builtins::register_builtins;

/// Any failure while running a script.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Render for the terminal, prefixing located errors with
    /// `source_name` and their position.
    pub fn render(&self, source_name: &str) -> String {
        match self {
            Error::Io { .. } => self.to_string(),
            Error::Lex(err) => err.to_diagnostic().render(source_name),
            Error::Parse(err) => err.to_diagnostic().render(source_name),
            Error::Eval(err) => err.to_diagnostic().render(source_name),
        }
    }
}

/// Settings shared by the driver commands.
#[derive(Clone, Debug)]
pub struct Options {
    /// Scan on a dedicated producer thread instead of lazily.
    pub threaded_lexer: bool,
    pub max_call_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            threaded_lexer: false,
            max_call_depth: kest_eval::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Result of [`run_source`].
#[derive(Debug)]
pub struct RunOutput {
    /// Value of the last statement executed, or of a top-level `return`.
    pub value: Value,
    /// Top-level bindings after the run, sorted by name.
    pub globals: Vec<(String, Value)>,
}

pub fn read_source(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Tokenize `source` through the configured producer, up to and
/// including the end-of-file token.
pub fn lex_source(source: &str, options: &Options) -> Result<Vec<Token>, Error> {
    let tokens = if options.threaded_lexer {
        collect_tokens(ChannelTokens::spawn(source))?
    } else {
        kest_lexer::lex(source)?
    };
    Ok(tokens)
}

pub fn parse_source(source: &str, options: &Options) -> Result<Program, Error> {
    let program = if options.threaded_lexer {
        kest_parse::parse_threaded(source)?
    } else {
        kest_parse::parse(source)?
    };
    Ok(program)
}

/// Build an interpreter whose root scope holds the built-ins, writing
/// through `handler`.
pub fn interpreter(options: &Options, handler: SharedPrintHandler) -> Interpreter {
    let interp = InterpreterBuilder::new()
        .max_call_depth(options.max_call_depth)
        .print_handler(handler)
        .build();
    register_builtins(interp.global_env(), interp.print_handler());
    interp
}

/// Parse and evaluate `source`.
pub fn run_source(
    source: &str,
    options: &Options,
    handler: SharedPrintHandler,
) -> Result<RunOutput, Error> {
    let program = parse_source(source, options)?;
    debug!(statements = program.len(), "evaluating");
    let mut interp = interpreter(options, handler);
    let value = interp.evaluate(&program)?;
    Ok(RunOutput {
        value,
        globals: interp.global_env().bindings(),
    })
}
