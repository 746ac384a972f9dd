#![allow(clippy::module_inception)]

use std::{
    fmt::Display,
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

use crate::{
    ast::ast::{Expr, ExprWrapper},
    errors::errors::{Error, ErrorImpl, ErrorTip},
    interpreter::{environment::Environment, value::Value},
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into the expression source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub u32);

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A parsed expression, ready to be evaluated against any number of
/// environments.
///
/// The tree is immutable after parsing, so a `Program` can be shared between
/// threads and evaluated concurrently.
#[derive(Debug, Clone)]
pub struct Program {
    root: ExprWrapper,
    source: String,
}

impl Program {
    pub fn new(root: ExprWrapper, source: String) -> Self {
        Program { root, source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the expression against `env`.
    ///
    /// Unbound names evaluate to [`Value::Nil`]. A panic raised anywhere below
    /// this call is reported as [`ErrorImpl::InternalError`] instead of
    /// unwinding into the host.
    #[tracing::instrument(level = "trace", skip(self, env), fields(source = %self.source))]
    pub fn eval(&self, env: &dyn Environment) -> Result<Value, Error> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.root.eval(env))) {
            Ok(result) => result,
            Err(payload) => {
                let message = if let Some(message) = payload.downcast_ref::<&str>() {
                    String::from(*message)
                } else if let Some(message) = payload.downcast_ref::<String>() {
                    message.clone()
                } else {
                    String::from("unknown panic")
                };

                tracing::warn!(%message, "evaluation panicked");

                Err(Error::new(
                    ErrorImpl::InternalError { message },
                    self.root.get_span().start,
                ))
            }
        }
    }
}

/// Tokenizes and parses `source` into a [`Program`].
///
/// Returns the first lexical or syntactic error encountered.
pub fn parse(source: &str) -> Result<Program, Error> {
    let tokens = lexer::lexer::tokenize(source)?;
    let root = parser::parser::parse(tokens)?;

    Ok(Program::new(root, String::from(source)))
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber for command line use.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=exprs=debug`.
/// Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Finds the line containing byte `position` of `source`.
///
/// Returns the 1-based line number, the line text and the offset of
/// `position` within that line. Positions past the end resolve to the end of
/// the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last_line = String::new();

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        last_line = line.to_string();
        start = end;
        line_number += 1;
    }

    let line_number = (line_number - 1).max(1);
    let line_pos = last_line.trim_end_matches('\n').len();
    (line_number, last_line, line_pos)
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: message
        -> <expression>
          |
        1 | a + #
          | ----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> <expression>");
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
