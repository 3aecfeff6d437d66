//! Owned syntax trees lowered from tree-sitter.
//!
//! A tree-sitter [`Node`](tree_sitter::Node) borrows its `Tree`, which makes it
//! awkward to hand out from long-lived query handles. The lowering pass copies
//! the tree once into reference-counted [`SyntaxNode`]s that share a single
//! copy of the source text, and classifies every node into a [`Shape`] so the
//! query layer can pattern-match instead of re-testing kind strings.

use crate::ts::errors::TreeSitterError;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;
use tree_sitter::TreeCursor;

/// Deepest nesting accepted when lowering or comparing trees.
pub const MAX_DEPTH: usize = 1024;

/// Declaration-level classification of a syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Program,
    Block,
    /// `let` / `const` / `var` statement.
    Variable,
    Declarator,
    /// Function declaration or overload signature.
    Function,
    Method,
    Arrow,
    FunctionExpression,
    TypeAlias,
    Interface,
    Class,
    ClassBody,
    ClassProperty,
    Parameter,
    /// Inline object type (`{ x: number }`) or interface body.
    TypeLiteral,
    PropertySignature,
    TypeAnnotation,
    /// `if` statement; `else if` links are nested `if` statements.
    If,
    Export,
    Other,
}

impl Shape {
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "program" => Shape::Program,
            "statement_block" => Shape::Block,
            "lexical_declaration" | "variable_declaration" => Shape::Variable,
            "variable_declarator" => Shape::Declarator,
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                Shape::Function
            }
            "method_definition" | "method_signature" | "abstract_method_signature" => {
                Shape::Method
            }
            "arrow_function" => Shape::Arrow,
            "function_expression" | "function" | "generator_function" => {
                Shape::FunctionExpression
            }
            "type_alias_declaration" => Shape::TypeAlias,
            "interface_declaration" => Shape::Interface,
            "class_declaration" | "abstract_class_declaration" => Shape::Class,
            "class_body" => Shape::ClassBody,
            "public_field_definition" => Shape::ClassProperty,
            "required_parameter" | "optional_parameter" => Shape::Parameter,
            "object_type" | "interface_body" => Shape::TypeLiteral,
            "property_signature" => Shape::PropertySignature,
            "type_annotation" => Shape::TypeAnnotation,
            "if_statement" => Shape::If,
            "export_statement" => Shape::Export,
            _ => Shape::Other,
        }
    }

    /// Human readable label used by the outline command.
    pub fn label(self) -> &'static str {
        match self {
            Shape::Program => "program",
            Shape::Block => "block",
            Shape::Variable => "variable",
            Shape::Declarator => "declarator",
            Shape::Function => "function",
            Shape::Method => "method",
            Shape::Arrow => "arrow function",
            Shape::FunctionExpression => "function expression",
            Shape::TypeAlias => "type",
            Shape::Interface => "interface",
            Shape::Class => "class",
            Shape::ClassBody => "class body",
            Shape::ClassProperty => "property",
            Shape::Parameter => "parameter",
            Shape::TypeLiteral => "type literal",
            Shape::PropertySignature => "property signature",
            Shape::TypeAnnotation => "type annotation",
            Shape::If => "if",
            Shape::Export => "export",
            Shape::Other => "statement",
        }
    }
}

/// One node of a lowered syntax tree.
pub struct SyntaxNode {
    kind: &'static str,
    shape: Shape,
    field: Option<&'static str>,
    named: bool,
    error: bool,
    span: Range<usize>,
    source: Rc<str>,
    children: Vec<Rc<SyntaxNode>>,
}

impl SyntaxNode {
    /// Grammar kind tag (`"function_declaration"`, `";"`, ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Field name this node occupies in its parent, if any.
    pub fn field(&self) -> Option<&'static str> {
        self.field
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    /// True for ERROR and MISSING nodes produced by error recovery.
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// True if this node or any descendant is an error node.
    pub fn has_error(&self) -> bool {
        self.error || self.children.iter().any(|child| child.has_error())
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Raw source text covered by this node.
    pub fn text(&self) -> &str {
        &self.source[self.span.clone()]
    }

    pub fn children(&self) -> &[Rc<SyntaxNode>] {
        &self.children
    }

    pub fn named_children(&self) -> impl Iterator<Item = &Rc<SyntaxNode>> + '_ {
        self.children.iter().filter(|child| child.named)
    }

    pub fn first_named_child(&self) -> Option<&Rc<SyntaxNode>> {
        self.named_children().next()
    }

    pub fn child_by_field(&self, field: &str) -> Option<&Rc<SyntaxNode>> {
        self.children
            .iter()
            .find(|child| child.field == Some(field))
    }

    pub fn children_by_field<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a Rc<SyntaxNode>> + 'a {
        self.children
            .iter()
            .filter(move |child| child.field == Some(field))
    }

    pub fn children_with_shape(&self, shape: Shape) -> impl Iterator<Item = &Rc<SyntaxNode>> + '_ {
        self.children.iter().filter(move |child| child.shape == shape)
    }

    /// True if an anonymous token such as `?` or `async` is a direct child.
    pub fn has_token(&self, token: &str) -> bool {
        self.children
            .iter()
            .any(|child| !child.named && child.kind == token)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("kind", &self.kind)
            .field("span", &self.span)
            .field("text", &self.text())
            .finish()
    }
}

/// Copy the node under `cursor` and its subtree into a [`SyntaxNode`].
///
/// On success the cursor is left on the node it started on.
pub(crate) fn lower(
    cursor: &mut TreeCursor<'_>,
    source: &Rc<str>,
    depth: usize,
) -> Result<Rc<SyntaxNode>, TreeSitterError> {
    if depth > MAX_DEPTH {
        return Err(TreeSitterError::TooDeep { limit: MAX_DEPTH });
    }

    let node = cursor.node();
    let field = cursor.field_name();

    let mut children = Vec::with_capacity(node.child_count());
    if cursor.goto_first_child() {
        loop {
            children.push(lower(cursor, source, depth + 1)?);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }

    Ok(Rc::new(SyntaxNode {
        kind: node.kind(),
        shape: Shape::from_kind(node.kind()),
        field,
        named: node.is_named(),
        error: node.is_error() || node.is_missing(),
        span: node.byte_range(),
        source: Rc::clone(source),
        children,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::parser::TypeScriptParser;

    fn syntax(source: &str) -> Rc<SyntaxNode> {
        let mut parser = TypeScriptParser::new().unwrap();
        parser.parse_with_source(source).unwrap().to_syntax().unwrap()
    }

    #[test]
    fn shapes_are_assigned_at_lowering() {
        let root = syntax("function foo(a: number): string { return ''; }");
        assert_eq!(root.shape(), Shape::Program);

        let function = root.first_named_child().unwrap();
        assert_eq!(function.shape(), Shape::Function);

        let params = function.child_by_field("parameters").unwrap();
        let first = params.first_named_child().unwrap();
        assert_eq!(first.shape(), Shape::Parameter);
        assert_eq!(first.text(), "a: number");
    }

    #[test]
    fn fields_are_recorded() {
        let root = syntax("interface Point { x?: number }");
        let interface = root.first_named_child().unwrap();

        assert_eq!(interface.child_by_field("name").unwrap().text(), "Point");
        let body = interface.child_by_field("body").unwrap();
        assert_eq!(body.shape(), Shape::TypeLiteral);

        let member = body.first_named_child().unwrap();
        assert_eq!(member.shape(), Shape::PropertySignature);
        assert!(member.has_token("?"));
    }

    #[test]
    fn error_flags_propagate() {
        let root = syntax("let x = ;");
        assert!(root.has_error());

        let clean = syntax("let x = 1;");
        assert!(!clean.has_error());
    }

    #[test]
    fn lowering_stops_past_max_depth() {
        let deep = format!("let x = {}1{};", "[".repeat(3000), "]".repeat(3000));
        let mut parser = TypeScriptParser::new().unwrap();
        let parsed = parser.parse_with_source(&deep).unwrap();

        assert!(matches!(
            parsed.to_syntax(),
            Err(TreeSitterError::TooDeep { limit: MAX_DEPTH })
        ));
    }
}
