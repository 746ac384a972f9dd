//! Lexical analysis for expressions.
//!
//! This module contains the lexer (tokenizer) that converts expression text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of boolean literals and word-form operators
//! - Token position tracking for error reporting
//! - Comments, raw strings and whitespace handling

pub mod lexer;
pub mod tokens;
