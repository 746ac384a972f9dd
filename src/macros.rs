//! Utility macros for the expression engine.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler that emits the matched text
//! - `MK_ENV!` - Builds an environment map from `name => value` pairs

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler that pushes the matched text as a token of the
/// given kind and advances past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new(r"^[{}\[\]()]").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Bracket),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer, matched: &str| -> Result<(), Error> {
            let span = lexer.span_of(matched.len());
            lexer.push(MK_TOKEN!($kind, String::from(matched), span));
            lexer.advance_n(matched.len());
            Ok(())
        }
    };
}

/// Builds a `HashMap<String, Value>` environment.
///
/// Each value goes through `Value::from`, so plain Rust literals work.
///
/// # Example
///
/// ```
/// use exprs::{interpreter::value::Value, MK_ENV};
///
/// let env = MK_ENV! { "x" => 8, "lang" => "golang" };
/// assert_eq!(env.get("x"), Some(&Value::I32(8)));
/// ```
#[macro_export]
macro_rules! MK_ENV {
    () => {
        ::std::collections::HashMap::<String, $crate::interpreter::value::Value>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut env = ::std::collections::HashMap::<String, $crate::interpreter::value::Value>::new();
        $(
            env.insert(String::from($name), $crate::interpreter::value::Value::from($value));
        )+
        env
    }};
}
