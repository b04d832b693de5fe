//! Shared test utilities for phase tests.

use kest_eval::{buffer_handler, Value};
use kest_ir::{Program, Token};
use kestc::{Error, Options, RunOutput};

/// Both producer configurations, for tests that must hold under either.
pub fn all_options() -> [Options; 2] {
    [
        Options::default(),
        Options {
            threaded_lexer: true,
            ..Options::default()
        },
    ]
}

pub fn lex(source: &str) -> Vec<Token> {
    kestc::lex_source(source, &Options::default()).expect("lexing failed")
}

pub fn parse(source: &str) -> Program {
    kestc::parse_source(source, &Options::default()).expect("parsing failed")
}

/// Run `source` and return its value together with captured output.
pub fn run(source: &str) -> (Value, String) {
    let handler = buffer_handler();
    match kestc::run_source(source, &Options::default(), handler.clone()) {
        Ok(RunOutput { value, .. }) => (value, handler.get_output()),
        Err(err) => panic!("run failed: {}", err.render("test.kest")),
    }
}

/// Output printed by `source`.
pub fn output(source: &str) -> String {
    run(source).1
}

/// Rendered error for a script expected to fail.
pub fn run_err(source: &str) -> String {
    match kestc::run_source(source, &Options::default(), buffer_handler()) {
        Ok(output) => panic!("expected failure, got {:?}", output.value),
        Err(err) => render(&err),
    }
}

pub fn render(err: &Error) -> String {
    err.render("test.kest")
}
