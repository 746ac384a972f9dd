//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a single expression tree. It uses precedence climbing for binary
//! operators and handles:
//!
//! - Prefix operators, including chains like `- -x` and `!!ok`
//! - Literals, variables, grouping and array literals
//! - Builtin function calls
//! - Error reporting with the position of the offending token
//!
//! Operands are parsed by NUD (null denotation) handlers looked up by token
//! kind; binary operators are ranked by a pure precedence function.

pub mod expr;
pub mod lookups;
pub mod parser;
