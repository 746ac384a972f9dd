use std::{collections::HashMap, env, process::ExitCode, time::Instant};

use exprs::{display_error, init_tracing, interpreter::value::Value, parse};

const USAGE: &str = "usage: exprs <expression> [name=value ...]";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let Some((source, bindings)) = args.split_first() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    // Each binding value is an expression evaluated without variables.
    let empty: HashMap<String, Value> = HashMap::new();
    let mut variables: HashMap<String, Value> = HashMap::new();

    for binding in bindings {
        let Some((name, text)) = binding.split_once('=') else {
            eprintln!("invalid binding {:?}, expected name=value\n{}", binding, USAGE);
            return ExitCode::from(2);
        };

        match parse(text).and_then(|program| program.eval(&empty)) {
            Ok(value) => {
                variables.insert(String::from(name.trim()), value);
            }
            Err(error) => {
                display_error(&error, text);
                return ExitCode::FAILURE;
            }
        }
    }

    let start = Instant::now();

    let program = match parse(source) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, source);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(elapsed = ?start.elapsed(), "parsed");

    match program.eval(&variables) {
        Ok(value) => {
            tracing::debug!(elapsed = ?start.elapsed(), "evaluated");
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, source);
            ExitCode::FAILURE
        }
    }
}
