use crate::errors::errors::ErrorImpl;

use super::{
    coercion::{arithmetic, compare, equals, invalid_operation, ArithmeticOp, ComparisonOp},
    value::Value,
};

/// Applies a binary operator to two already evaluated operands.
///
/// Both operands are always evaluated by the caller, `&&` and `||` included.
pub fn apply_binary(operator: &str, left: &Value, right: &Value) -> Result<Value, ErrorImpl> {
    match operator {
        "+" => arithmetic(ArithmeticOp::Add, left, right),
        "-" => arithmetic(ArithmeticOp::Sub, left, right),
        "*" => arithmetic(ArithmeticOp::Mul, left, right),
        "/" => arithmetic(ArithmeticOp::Div, left, right),
        "%" => arithmetic(ArithmeticOp::Rem, left, right),

        "<" => compare(ComparisonOp::Lt, left, right).map(Value::Bool),
        "<=" => compare(ComparisonOp::Le, left, right).map(Value::Bool),
        ">" => compare(ComparisonOp::Gt, left, right).map(Value::Bool),
        ">=" => compare(ComparisonOp::Ge, left, right).map(Value::Bool),

        "==" => Ok(Value::Bool(equals(left, right))),
        "!=" => Ok(Value::Bool(!equals(left, right))),

        "&&" => logical(operator, left, right).map(|(a, b)| Value::Bool(a && b)),
        "||" => logical(operator, left, right).map(|(a, b)| Value::Bool(a || b)),

        "in" => Ok(Value::Bool(is_member(left, right))),
        "not_in" => Ok(Value::Bool(!is_member(left, right))),

        _ => Err(ErrorImpl::UnsupportedOperator {
            operator: String::from(operator),
        }),
    }
}

/// Applies a prefix operator. `+x` and `-x` are `0 + x` and `0 - x` with an
/// `isize` zero, so they follow the usual promotion rules.
pub fn apply_prefix(operator: &str, value: &Value) -> Result<Value, ErrorImpl> {
    match operator {
        "+" => arithmetic(ArithmeticOp::Add, &Value::Isize(0), value),
        "-" => arithmetic(ArithmeticOp::Sub, &Value::Isize(0), value),
        "!" => value.as_bool().map(|b| Value::Bool(!b)).ok_or_else(|| {
            ErrorImpl::TypeMatchError {
                expected: String::from("bool"),
                received: String::from(value.kind_name()),
            }
        }),
        _ => Err(ErrorImpl::UnsupportedOperator {
            operator: String::from(operator),
        }),
    }
}

fn logical(operator: &str, left: &Value, right: &Value) -> Result<(bool, bool), ErrorImpl> {
    match (left.as_bool(), right.as_bool()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(invalid_operation(operator, left, right)),
    }
}

// Membership is kind-strict: `1 in [1.0]` is false.
fn is_member(needle: &Value, haystack: &Value) -> bool {
    haystack
        .as_array()
        .is_some_and(|values| values.iter().any(|value| value == needle))
}
