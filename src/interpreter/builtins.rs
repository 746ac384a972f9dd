use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::errors::ErrorImpl;

use super::value::Value;

pub type BuiltinHandler = fn(&str, &[Value]) -> Result<Value, ErrorImpl>;

/// A builtin function: a fixed arity and the body run once the arguments
/// have been evaluated.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub arity: usize,
    pub handler: BuiltinHandler,
}

impl Builtin {
    pub fn check_arity(&self, name: &str, received: usize) -> Result<(), ErrorImpl> {
        if received < self.arity {
            return Err(ErrorImpl::MissingArguments {
                function: String::from(name),
                expected: self.arity,
                received,
            });
        }
        if received > self.arity {
            return Err(ErrorImpl::UnexpectedArguments {
                function: String::from(name),
                expected: self.arity,
                received,
            });
        }
        Ok(())
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
        self.check_arity(name, args.len())?;
        (self.handler)(name, args)
    }
}

lazy_static! {
    pub static ref BUILTIN_LOOKUP: HashMap<&'static str, Builtin> = {
        let mut map: HashMap<&'static str, Builtin> = HashMap::new();
        map.insert("pow", Builtin { arity: 2, handler: pow });
        map.insert("sin", Builtin { arity: 1, handler: sin });
        map.insert("sqrt", Builtin { arity: 1, handler: sqrt });
        map.insert("len", Builtin { arity: 1, handler: len });
        map.insert("lower", Builtin { arity: 1, handler: lower });
        map.insert("str_index", Builtin { arity: 2, handler: str_index });
        map.insert("contains", Builtin { arity: 2, handler: contains });
        map.insert("has_prefix", Builtin { arity: 2, handler: has_prefix });
        map.insert("has_suffix", Builtin { arity: 2, handler: has_suffix });
        map
    };
}

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTIN_LOOKUP.get(name)
}

fn argument_mismatch(name: &str, expected: &str, args: &[Value]) -> ErrorImpl {
    ErrorImpl::ArgumentTypeMatchError {
        function: String::from(name),
        expected: String::from(expected),
        received: args
            .iter()
            .map(Value::kind_name)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn numbers(name: &str, expected: &str, args: &[Value]) -> Result<Vec<f64>, ErrorImpl> {
    args.iter()
        .map(Value::as_f64)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| argument_mismatch(name, expected, args))
}

fn strings<'a>(name: &str, expected: &str, args: &'a [Value]) -> Result<Vec<&'a str>, ErrorImpl> {
    args.iter()
        .map(Value::as_str)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| argument_mismatch(name, expected, args))
}

fn arity_mismatch(name: &str, args: &[Value]) -> ErrorImpl {
    ErrorImpl::InternalError {
        message: format!("{} reached with {} arguments", name, args.len()),
    }
}

fn unary_number(name: &str, args: &[Value], f: fn(f64) -> f64) -> Result<Value, ErrorImpl> {
    let [x] = numbers(name, "number", args)?[..] else {
        return Err(arity_mismatch(name, args));
    };
    Ok(Value::F64(f(x)))
}

fn string_pair(
    name: &str,
    args: &[Value],
    f: fn(&str, &str) -> Value,
) -> Result<Value, ErrorImpl> {
    let [a, b] = strings(name, "string, string", args)?[..] else {
        return Err(arity_mismatch(name, args));
    };
    Ok(f(a, b))
}

fn pow(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    let [x, y] = numbers(name, "number, number", args)?[..] else {
        return Err(arity_mismatch(name, args));
    };
    Ok(Value::F64(x.powf(y)))
}

fn sin(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    unary_number(name, args, f64::sin)
}

fn sqrt(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    unary_number(name, args, f64::sqrt)
}

fn len(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    let [s] = strings(name, "string", args)?[..] else {
        return Err(arity_mismatch(name, args));
    };
    Ok(Value::I64(s.len() as i64))
}

// Per character, so a word-final `Σ` lowers to `σ` rather than `ς`.
fn lower(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    let [s] = strings(name, "string", args)?[..] else {
        return Err(arity_mismatch(name, args));
    };
    Ok(Value::String(s.chars().flat_map(char::to_lowercase).collect()))
}

fn str_index(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    string_pair(name, args, |haystack, needle| {
        Value::I64(haystack.find(needle).map_or(-1, |offset| offset as i64))
    })
}

fn contains(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    string_pair(name, args, |haystack, needle| Value::Bool(haystack.contains(needle)))
}

fn has_prefix(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    string_pair(name, args, |s, prefix| Value::Bool(s.starts_with(prefix)))
}

fn has_suffix(name: &str, args: &[Value]) -> Result<Value, ErrorImpl> {
    string_pair(name, args, |s, suffix| Value::Bool(s.ends_with(suffix)))
}
