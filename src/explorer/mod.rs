//! Chainable query handles over TypeScript fragments.
//!
//! An [`Explorer`] wraps zero or one syntax node. Lookups never fail: a
//! missing declaration, or a query that does not apply to the wrapped kind,
//! yields an empty handle, an empty `Vec` or `false`.
//!
//! # Example
//!
//! ```
//! use ts_explorer::Explorer;
//!
//! let source = Explorer::new("type Foo = { x?: number; y: string; };");
//! let foo = source.find_type("Foo");
//!
//! assert!(foo.has_type_prop("x", Some("number"), Some(true)));
//! assert!(!foo.has_type_prop("y", Some("number"), None));
//! assert!(source.find_type("Bar").is_empty());
//! ```

mod annotation;
mod branch;
pub(crate) mod decl;
mod lookup;

pub use annotation::TypeProp;

use crate::equiv::equivalent;
use crate::ts::{ParseContext, Shape, SyntaxNode};
use decl::{ClassView, FunctionLike, VariableView};
use std::fmt;
use std::rc::Rc;

/// Text shown for an empty handle.
pub const EMPTY_MARKER: &str = "no ast";

/// Immutable handle over an optional syntax node.
///
/// The handle remembers the [`ParseContext`] comparison text should be
/// parsed with, so a method handle can be matched against `"m() {}"` and a
/// type handle against `"string[]"`.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    node: Option<Rc<SyntaxNode>>,
    context: ParseContext,
    /// Declarator selected by name inside the wrapped variable statement.
    binding: Option<Rc<SyntaxNode>>,
}

/// Right-hand side of [`Explorer::matches`].
pub enum Comparand<'a> {
    Text(&'a str),
    Explorer(&'a Explorer),
}

impl<'a> From<&'a str> for Comparand<'a> {
    fn from(text: &'a str) -> Self {
        Comparand::Text(text)
    }
}

impl<'a> From<&'a String> for Comparand<'a> {
    fn from(text: &'a String) -> Self {
        Comparand::Text(text)
    }
}

impl<'a> From<&'a Explorer> for Comparand<'a> {
    fn from(explorer: &'a Explorer) -> Self {
        Comparand::Explorer(explorer)
    }
}

impl Explorer {
    /// Parse `source` as a program fragment.
    ///
    /// A fragment with exactly one top-level statement is unwrapped to that
    /// statement. Blank fragments give an empty handle. Fragments with zero
    /// or several statements keep the whole program, so comparing two
    /// multi-statement fragments compares every statement in order.
    pub fn new(source: &str) -> Self {
        Self::with_context(source, ParseContext::Generic)
    }

    /// Parse `source` under an explicit [`ParseContext`].
    pub fn with_context(source: &str, context: ParseContext) -> Self {
        Self {
            node: context.parse(source),
            context,
            binding: None,
        }
    }

    /// An empty handle.
    pub fn empty() -> Self {
        Self::default()
    }

    fn empty_in(context: ParseContext) -> Self {
        Self {
            node: None,
            context,
            binding: None,
        }
    }

    pub(crate) fn wrap(node: &Rc<SyntaxNode>, context: ParseContext) -> Self {
        Self {
            node: Some(Rc::clone(node)),
            context,
            binding: None,
        }
    }

    /// Narrow a variable-statement handle to one of its declarators.
    ///
    /// The handle still displays and compares as the whole statement, but
    /// name, value, annotation, parameter and body queries read the
    /// declarator.
    pub(crate) fn with_binding(mut self, declarator: &Rc<SyntaxNode>) -> Self {
        self.binding = Some(Rc::clone(declarator));
        self
    }

    /// Node that declaration-level queries resolve against.
    pub(crate) fn focus(&self) -> Option<&Rc<SyntaxNode>> {
        self.binding.as_ref().or(self.node.as_ref())
    }

    /// Wrap a node found by a lookup, picking the context from its shape.
    pub(crate) fn wrap_found(node: &Rc<SyntaxNode>) -> Self {
        let context = match node.shape() {
            Shape::Method => ParseContext::Method,
            Shape::ClassProperty => ParseContext::Property,
            Shape::Parameter => ParseContext::Parameter,
            _ => ParseContext::Generic,
        };
        Self::wrap(node, context)
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The wrapped node, if any.
    pub fn node(&self) -> Option<&SyntaxNode> {
        self.node.as_deref()
    }

    pub fn context(&self) -> ParseContext {
        self.context
    }

    /// Structural equivalence with text (parsed in this handle's context) or
    /// another handle. Two empty handles match.
    ///
    /// When this handle wraps a bare expression (an initializer, say), text
    /// that parses as an expression statement is compared by its expression.
    pub fn matches<'a>(&self, other: impl Into<Comparand<'a>>) -> bool {
        match other.into() {
            Comparand::Text(text) => {
                let other = Explorer::with_context(text, self.context);
                equivalent(self.node(), align(self.node(), other.node()))
            }
            Comparand::Explorer(other) => equivalent(self.node(), other.node()),
        }
    }

    /// Identifier declared by the wrapped node. For a variable statement
    /// this is the first declarator's name.
    pub fn name(&self) -> Option<&str> {
        self.focus().and_then(|node| decl::declared_name(node))
    }

    /// Initializer of a variable (first declarator) or class property.
    pub fn value(&self) -> Explorer {
        let Some(node) = self.focus() else {
            return Explorer::empty();
        };
        let value = match node.shape() {
            Shape::Variable => VariableView::new(node).and_then(VariableView::value),
            Shape::Declarator | Shape::ClassProperty => node.child_by_field("value"),
            _ => None,
        };
        value.map_or_else(Explorer::empty, Explorer::wrap_found)
    }

    /// True if the initializer is a call to `callee`, e.g. `Number(input)`.
    pub fn value_is_call(&self, callee: &str) -> bool {
        self.value().node().is_some_and(|value| {
            value.kind() == "call_expression"
                && value
                    .child_by_field("function")
                    .is_some_and(|function| function.text() == callee)
        })
    }

    /// True if the initializer is an integer literal: `5`, `-3`, `0xff`,
    /// `1_000` or `10n`. `1.0` and `1e3` are not.
    pub fn is_integer(&self) -> bool {
        self.value().node().is_some_and(integer_literal)
    }

    /// Every entry of this handle's scope, in source order.
    pub fn statements(&self) -> Vec<Explorer> {
        match &self.node {
            Some(node) => decl::scope_entries(node)
                .into_iter()
                .map(Explorer::wrap_found)
                .collect(),
            None => Vec::new(),
        }
    }

    /// The inner scope of a function or class, where nested declarations
    /// live. Lookups on the outer handle never see them.
    pub fn body(&self) -> Explorer {
        let Some(node) = self.focus() else {
            return Explorer::empty();
        };
        let body = match ClassView::new(node) {
            Some(class) => class.body(),
            None => FunctionLike::from_node(node).and_then(FunctionLike::body),
        };
        body.map_or_else(Explorer::empty, |body| {
            Explorer::wrap(body, ParseContext::Generic)
        })
    }
}

fn integer_literal(node: &SyntaxNode) -> bool {
    match node.kind() {
        "number" => integer_text(node.text()),
        "unary_expression" => {
            node.child_by_field("operator")
                .is_some_and(|operator| matches!(operator.text(), "-" | "+"))
                && node
                    .child_by_field("argument")
                    .is_some_and(|argument| integer_literal(argument))
        }
        _ => false,
    }
}

fn integer_text(text: &str) -> bool {
    let normalized = text.replace('_', "").to_ascii_lowercase();
    let literal = normalized.strip_suffix('n').unwrap_or(normalized.as_str());
    let (digits, radix) = if let Some(hex) = literal.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(octal) = literal.strip_prefix("0o") {
        (octal, 8)
    } else if let Some(binary) = literal.strip_prefix("0b") {
        (binary, 2)
    } else {
        (literal, 10)
    };
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}

fn align<'a>(target: Option<&SyntaxNode>, parsed: Option<&'a SyntaxNode>) -> Option<&'a SyntaxNode> {
    match (target, parsed) {
        (Some(target), Some(parsed))
            if parsed.kind() == "expression_statement"
                && target.kind() != "expression_statement" =>
        {
            parsed.first_named_child().map(|expression| &**expression)
        }
        _ => parsed,
    }
}

impl fmt::Display for Explorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Some(node) => f.write_str(node.text()),
            None => f.write_str(EMPTY_MARKER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_source_is_empty() {
        let explorer = Explorer::new("   ");
        assert!(explorer.is_empty());
        assert_eq!(explorer.to_string(), EMPTY_MARKER);
        assert!(explorer.node().is_none());
    }

    #[test]
    fn single_statement_round_trips() {
        let source = "function foo(a: number): string { return `${a}`; }";
        assert_eq!(Explorer::new(source).to_string(), source);
    }

    #[test]
    fn matches_text_and_handles() {
        let explorer = Explorer::new("const a = 1;");
        assert!(explorer.matches("const   a=1"));
        assert!(explorer.matches(&Explorer::new("const a = 1")));
        assert!(!explorer.matches("const a = 2;"));

        let owned = String::from("const a = 1;");
        assert!(explorer.matches(&owned));
    }

    #[test]
    fn empty_handles_match_each_other_only() {
        assert!(Explorer::empty().matches(""));
        assert!(!Explorer::empty().matches("let a;"));
        assert!(!Explorer::new("let a;").matches(&Explorer::empty()));
    }

    #[test]
    fn value_and_calls() {
        let explorer = Explorer::new("const n = Number(input);");
        assert!(explorer.value().matches("Number(input)"));
        assert!(explorer.value_is_call("Number"));
        assert!(!explorer.value_is_call("parseInt"));

        let literal = Explorer::new("let x = 5;");
        assert!(!literal.value_is_call("Number"));
        assert_eq!(literal.value().to_string(), "5");
    }

    #[test]
    fn integer_initializers() {
        for source in ["let a = 5;", "let a = -3;", "let a = 0xFF;", "let a = 1_000;"] {
            assert!(Explorer::new(source).is_integer(), "{source}");
        }
        for source in ["let a = 1.5;", "let a = 1e3;", "let a = '5';", "let a = b;", "let a;"] {
            assert!(!Explorer::new(source).is_integer(), "{source}");
        }

        let scope = Explorer::new("const count = 3;
const ratio = 0.5;");
        assert!(scope.find_variable("count").is_integer());
        assert!(!scope.find_variable("ratio").is_integer());
        assert!(!Explorer::empty().is_integer());
    }

    #[test]
    fn name_of_declarations() {
        assert_eq!(Explorer::new("let x = 5;").name(), Some("x"));
        assert_eq!(Explorer::new("class Shape {}").name(), Some("Shape"));
        assert_eq!(Explorer::new("x + 1;").name(), None);
        assert_eq!(Explorer::empty().name(), None);
    }

    #[test]
    fn statements_lists_scope() {
        let explorer = Explorer::new("let a = 1;\nfunction f() {}\nclass C {}");
        let rendered: Vec<_> = explorer
            .statements()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, vec!["let a = 1;", "function f() {}", "class C {}"]);
    }

    #[test]
    fn body_of_function_and_class() {
        let function = Explorer::new("function f() { let inner = 1; }");
        assert!(function.body().has_variable("inner"));

        let class = Explorer::new("class C { m() {} }");
        assert!(class.body().has_function("m", false));

        assert!(Explorer::new("let a = 1;").body().is_empty());
    }

    fn nested_arrays(depth: usize) -> String {
        format!("let x = {}1{};", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn over_deep_source_is_empty() {
        let deep = Explorer::new(&nested_arrays(3000));
        assert!(deep.is_empty());
        assert!(!deep.has_variable("x"));

        let shallow = Explorer::new(&nested_arrays(600));
        assert!(!shallow.is_empty());
        assert!(shallow.matches(&nested_arrays(600)));
        assert!(!shallow.matches(&nested_arrays(599)));
    }
}
