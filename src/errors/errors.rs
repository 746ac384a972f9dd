use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} (at byte {position})")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_category(&self) -> ErrorCategory {
        self.internal_error.category()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::EmptyExpression => "EmptyExpression",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::UnsupportedFunction { .. } => "UnsupportedFunction",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidOperation { .. } => "InvalidOperation",
            ErrorImpl::DivisionByZero { .. } => "DivisionByZero",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedLiteral { quote } => {
                ErrorTip::Suggestion(format!("Missing closing `{}`", quote))
            }
            ErrorImpl::EmptyExpression => {
                ErrorTip::Suggestion(String::from("The expression has nothing to evaluate"))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected {}", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected {}, {}", token, message))
            }
            ErrorImpl::TrailingInput { token } => ErrorTip::Suggestion(format!(
                "Unexpected {} after a complete expression, is an operator missing?",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions may nest at most {} levels deep",
                limit
            )),
            ErrorImpl::UnsupportedOperator { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` is not supported", operator))
            }
            ErrorImpl::UnsupportedFunction { function } => {
                ErrorTip::Suggestion(format!("Function `{}` is not a builtin", function))
            }
            ErrorImpl::UnexpectedArguments {
                function,
                expected,
                received,
            }
            | ErrorImpl::MissingArguments {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects ({}), received ({})",
                function, expected, received
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidOperation {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "`{}` is not defined between `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::DivisionByZero { .. } => {
                ErrorTip::Suggestion(String::from("The right operand evaluated to zero"))
            }
            ErrorImpl::InternalError { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// The pipeline stage an error comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lex,
    Parse,
    Eval,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated literal, missing closing {quote}")]
    UnterminatedLiteral { quote: char },
    #[error("expression is empty")]
    EmptyExpression,
    #[error("unexpected {token}")]
    UnexpectedToken { token: String },
    #[error("unexpected {token}: {message}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected {token} after end of expression")]
    TrailingInput { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unsupported operator: {operator:?}")]
    UnsupportedOperator { operator: String },
    #[error("unsupported function call: {function}")]
    UnsupportedFunction { function: String },
    #[error("too many arguments in call to {function}: expected {expected}, received {received}")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("not enough arguments in call to {function}: expected {expected}, received {received}")]
    MissingArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("invalid arguments: {function}({received}), expected {function}({expected})")]
    ArgumentTypeMatchError {
        function: String,
        expected: String,
        received: String,
    },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("invalid operation: {left} {operator} {right}")]
    InvalidOperation {
        operator: String,
        left: String,
        right: String,
    },
    #[error("integer {operator} by zero")]
    DivisionByZero { operator: String },
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl ErrorImpl {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::UnterminatedLiteral { .. } => {
                ErrorCategory::Lex
            }
            ErrorImpl::EmptyExpression
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::TrailingInput { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorCategory::Parse,
            ErrorImpl::UnsupportedOperator { .. }
            | ErrorImpl::UnsupportedFunction { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::InvalidOperation { .. }
            | ErrorImpl::DivisionByZero { .. }
            | ErrorImpl::InternalError { .. } => ErrorCategory::Eval,
        }
    }

    /// Attaches a source position, producing a reportable [`Error`].
    pub fn at(self, position: Position) -> Error {
        Error::new(self, position)
    }
}
