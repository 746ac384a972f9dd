use std::any::Any;

use crate::{
    errors::errors::{Error, ErrorImpl},
    interpreter::{
        builtins,
        environment::Environment,
        operators::{apply_binary, apply_prefix},
        value::Value,
    },
    lexer::tokens::Token,
    Span,
};

use super::ast::{Expr, ExprType, ExprWrapper};

// LITERALS

/// Integer Expression
/// Represents an integer literal in the AST. Always evaluates to an `i64`.
#[derive(Debug, Clone)]
pub struct IntegerExpr {
    pub value: i64,
    pub span: Span,
}

impl Expr for IntegerExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Integer
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, _env: &dyn Environment) -> Result<Value, Error> {
        Ok(Value::I64(self.value))
    }
}

/// Float Expression
/// Represents a floating point literal in the AST. Always evaluates to an `f64`.
#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

impl Expr for FloatExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Float
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, _env: &dyn Environment) -> Result<Value, Error> {
        Ok(Value::F64(self.value))
    }
}

#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

impl Expr for BooleanExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Boolean
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, _env: &dyn Environment) -> Result<Value, Error> {
        Ok(Value::Bool(self.value))
    }
}

/// String Expression
/// Represents a string or char literal in the AST, quotes removed.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for StringExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::String
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, _env: &dyn Environment) -> Result<Value, Error> {
        Ok(Value::String(self.value.clone()))
    }
}

/// Symbol Expression
/// Represents a variable reference in the AST.
///
/// A name missing from the environment evaluates to [`Value::Nil`].
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for SymbolExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Symbol
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, env: &dyn Environment) -> Result<Value, Error> {
        match env.lookup(&self.value) {
            Some(value) => Ok(value.clone()),
            None => {
                tracing::trace!(name = %self.value, "unbound name evaluates to nil");
                Ok(Value::Nil)
            }
        }
    }
}

// COMPLEX

/// Prefix Expression
/// Represents a unary operator applied to an operand (`-a`, `!ok`).
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: ExprWrapper,
    pub span: Span,
}

impl Expr for PrefixExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Prefix
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, env: &dyn Environment) -> Result<Value, Error> {
        let value = self.right_expr.eval(env)?;

        apply_prefix(&self.operator.value, &value).map_err(|e| e.at(self.operator.span.start))
    }
}

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
///
/// Both sides are always evaluated, left first; `&&` and `||` do not
/// short-circuit.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: Token,
    pub right: ExprWrapper,
    pub span: Span,
}

impl Expr for BinaryExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Binary
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, env: &dyn Environment) -> Result<Value, Error> {
        let left = self.left.eval(env)?;
        let right = self.right.eval(env)?;

        apply_binary(&self.operator.value, &left, &right)
            .map_err(|e| e.at(self.operator.span.start))
    }
}

/// Array Expression
/// Represents an array literal (`[a, "php", 3]`).
#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub elements: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for ArrayExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Array
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, env: &dyn Environment) -> Result<Value, Error> {
        let values = self
            .elements
            .iter()
            .map(|element| element.eval(env))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Value::Array(values))
    }
}

/// Call Expression
/// Represents a call to one of the builtin functions.
///
/// The name and the argument count are checked before any argument is
/// evaluated.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for CallExpr {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_expr_type(&self) -> ExprType {
        ExprType::Call
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        ExprWrapper::new(self.clone())
    }
    fn get_span(&self) -> &crate::Span {
        &self.span
    }
    fn eval(&self, env: &dyn Environment) -> Result<Value, Error> {
        let position = self.span.start;

        let builtin = builtins::lookup(&self.name).ok_or_else(|| {
            ErrorImpl::UnsupportedFunction {
                function: self.name.clone(),
            }
            .at(position)
        })?;

        builtin
            .check_arity(&self.name, self.arguments.len())
            .map_err(|e| e.at(position))?;

        let args = self
            .arguments
            .iter()
            .map(|argument| argument.eval(env))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(function = %self.name, args = args.len(), "calling builtin");

        builtin.call(&self.name, &args).map_err(|e| e.at(position))
    }
}
