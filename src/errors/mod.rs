//! Error types and error handling for the expression engine.
//!
//! This module defines the single error type returned by tokenizing,
//! parsing and evaluation. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants grouped by pipeline stage
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
