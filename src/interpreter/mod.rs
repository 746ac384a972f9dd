//! Evaluation support for parsed expressions.
//!
//! The tree walk itself lives on the AST nodes; this module provides what
//! they evaluate with:
//!
//! - The runtime [`value::Value`] model
//! - The [`environment::Environment`] lookup trait
//! - Numeric promotion and the arithmetic/comparison kernels
//! - Operator dispatch and the builtin function table

pub mod builtins;
pub mod coercion;
pub mod environment;
pub mod operators;
pub mod value;
