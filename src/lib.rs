//! ts-explorer: structural assertions over TypeScript snippets
//!
//! Answers questions like "does this file declare a function `foo` returning
//! `number`?" or "does this type have an optional member `y: string`?"
//! without comparing text, so graders stay indifferent to whitespace,
//! optional semicolons and comments.
//!
//! # Architecture
//!
//! - [`ts`] parses fragments with tree-sitter and lowers the result into
//!   shared [`SyntaxNode`]s, embedding bare types and class members in a
//!   synthetic host when a [`ParseContext`] asks for it.
//! - [`equiv`] decides structural equivalence of two trees.
//! - [`Explorer`] is the chainable query handle: scoped declaration lookups,
//!   parameters, annotations and type-literal members.
//! - [`rubric`] runs TOML-described checks against files on disk.
//!
//! # Example
//!
//! ```
//! use ts_explorer::Explorer;
//!
//! let source = Explorer::new("function foo(a: number): number { return a * 2; }");
//! let foo = source.find_function("foo", false);
//!
//! assert!(foo.has_return_annotation("number"));
//! assert!(foo.find_parameters()[0].has_annotation("number"));
//! assert!(source.matches("function foo(a:number):number{return a*2}"));
//! ```

pub mod equiv;
pub mod explorer;
pub mod pool;
pub mod rubric;
pub mod ts;

// Re-exports
pub use equiv::equivalent;
pub use explorer::{Comparand, Explorer, TypeProp, EMPTY_MARKER};
pub use rubric::{
    load_from_path, load_from_str, run_checks, CheckOutcome, CheckReport, RubricConfig,
    RubricError,
};
pub use ts::{ParseContext, Shape, SyntaxNode, TreeSitterError, TypeScriptParser};
