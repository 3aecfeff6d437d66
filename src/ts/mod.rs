//! Tree-sitter integration for TypeScript fragments.
//!
//! This module owns everything that touches the parser: the thread-pooled
//! [`TypeScriptParser`], lowering of tree-sitter trees into shared
//! [`SyntaxNode`]s, and the [`ParseContext`] embedding rules that make bare
//! types and class members parseable.

pub mod context;
pub mod errors;
pub mod parser;
pub mod syntax;
pub mod validator;

pub use context::ParseContext;
pub use errors::TreeSitterError;
pub use parser::{ErrorNode, ParsedSource, TypeScriptParser};
pub use syntax::{Shape, SyntaxNode, MAX_DEPTH};
pub use validator::{validate_snippet, validate_syntax};
