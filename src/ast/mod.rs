/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core AST definitions and traits
/// - expressions: The expression node kinds and how each evaluates
pub mod ast;
pub mod expressions;
