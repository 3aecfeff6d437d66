//! Typed views over declaration nodes.
//!
//! Each view is a thin borrow of a [`SyntaxNode`] whose [`Shape`] was checked
//! on construction, exposing only the fields that shape carries.

use crate::ts::{Shape, SyntaxNode};
use std::rc::Rc;

type Node = Rc<SyntaxNode>;

/// Entries of the scope rooted at `node`, in source order.
///
/// Programs, blocks and class bodies contribute their children; any other
/// node is a scope holding only itself. Export wrappers are transparent.
pub(crate) fn scope_entries(node: &Node) -> Vec<&Node> {
    match node.shape() {
        Shape::Program | Shape::Block | Shape::ClassBody => node
            .named_children()
            .filter(|child| child.kind() != "comment")
            .map(unexport)
            .collect(),
        _ => vec![unexport(node)],
    }
}

fn unexport(node: &Node) -> &Node {
    if node.shape() == Shape::Export {
        if let Some(declaration) = node.child_by_field("declaration") {
            return declaration;
        }
    }
    node
}

/// The type node inside a `: T` annotation field.
pub(crate) fn annotation_type(node: &SyntaxNode) -> Option<&Node> {
    let annotation = node.child_by_field("type")?;
    match annotation.shape() {
        Shape::TypeAnnotation => annotation.first_named_child(),
        _ => Some(annotation),
    }
}

/// Identifier introduced by a declaration, if the node declares one.
pub(crate) fn declared_name(node: &SyntaxNode) -> Option<&str> {
    match node.shape() {
        Shape::Variable => VariableView::new(node)?
            .declarators()
            .next()
            .and_then(|declarator| declarator.child_by_field("name"))
            .map(|name| name.text()),
        Shape::Parameter => node.child_by_field("pattern").map(|pattern| pattern.text()),
        _ => node.child_by_field("name").map(|name| name.text()),
    }
}

/// True if `node` introduces `name`. Variable statements match on any of
/// their declarators.
pub(crate) fn declares(node: &SyntaxNode, name: &str) -> bool {
    match VariableView::new(node) {
        Some(variable) => variable.names().any(|declared| declared == name),
        None => declared_name(node) == Some(name),
    }
}

/// Declarator of `variable` binding `name` to a function value.
pub(crate) fn function_declarator<'a>(variable: &'a SyntaxNode, name: &str) -> Option<&'a Node> {
    VariableView::new(variable)?.declarators().find(|declarator| {
        FunctionLike::from_node(declarator).is_some_and(|function| function.name() == Some(name))
    })
}

/// A `let` / `const` / `var` statement.
#[derive(Clone, Copy)]
pub(crate) struct VariableView<'a>(&'a SyntaxNode);

impl<'a> VariableView<'a> {
    pub(crate) fn new(node: &'a SyntaxNode) -> Option<Self> {
        (node.shape() == Shape::Variable).then_some(Self(node))
    }

    pub(crate) fn declarators(self) -> impl Iterator<Item = &'a Node> {
        self.0.children_with_shape(Shape::Declarator)
    }

    pub(crate) fn names(self) -> impl Iterator<Item = &'a str> {
        self.declarators()
            .filter_map(|declarator| declarator.child_by_field("name"))
            .map(|name| name.text())
    }

    /// Declared type of the first declarator.
    pub(crate) fn annotation(self) -> Option<&'a Node> {
        self.declarators().next().and_then(|d| annotation_type(d))
    }

    /// Initializer of the first declarator.
    pub(crate) fn value(self) -> Option<&'a Node> {
        self.declarators()
            .next()
            .and_then(|declarator| declarator.child_by_field("value"))
    }
}

/// Anything with parameters and a return type.
#[derive(Clone, Copy)]
pub(crate) enum FunctionLike<'a> {
    Declaration(&'a Node),
    Method(&'a Node),
    Arrow {
        binding: Option<&'a Node>,
        function: &'a Node,
    },
    Expression {
        binding: Option<&'a Node>,
        function: &'a Node,
    },
}

impl<'a> FunctionLike<'a> {
    /// View `node` as a function. Variable statements qualify through their
    /// first declarator initialized with a function value.
    pub(crate) fn from_node(node: &'a Node) -> Option<Self> {
        match node.shape() {
            Shape::Function => Some(FunctionLike::Declaration(node)),
            Shape::Method => Some(FunctionLike::Method(node)),
            Shape::Arrow => Some(FunctionLike::Arrow {
                binding: None,
                function: node,
            }),
            Shape::FunctionExpression => Some(FunctionLike::Expression {
                binding: None,
                function: node,
            }),
            Shape::Declarator => Self::bound(node),
            Shape::Variable => Self::bindings(node).next(),
            _ => None,
        }
    }

    /// Function values bound by the declarators of a variable statement.
    pub(crate) fn bindings(node: &'a SyntaxNode) -> impl Iterator<Item = FunctionLike<'a>> {
        VariableView::new(node)
            .into_iter()
            .flat_map(|variable| variable.declarators())
            .filter_map(Self::bound)
    }

    fn bound(declarator: &'a Node) -> Option<Self> {
        let binding = declarator.child_by_field("name");
        let function = declarator.child_by_field("value")?;
        match function.shape() {
            Shape::Arrow => Some(FunctionLike::Arrow { binding, function }),
            Shape::FunctionExpression => Some(FunctionLike::Expression { binding, function }),
            _ => None,
        }
    }

    fn function(self) -> &'a Node {
        match self {
            FunctionLike::Declaration(node) | FunctionLike::Method(node) => node,
            FunctionLike::Arrow { function, .. } | FunctionLike::Expression { function, .. } => {
                function
            }
        }
    }

    pub(crate) fn name(self) -> Option<&'a str> {
        match self {
            FunctionLike::Arrow {
                binding: Some(binding),
                ..
            }
            | FunctionLike::Expression {
                binding: Some(binding),
                ..
            } => Some(binding.text()),
            other => other.function().child_by_field("name").map(|n| n.text()),
        }
    }

    pub(crate) fn parameters(self) -> Vec<&'a Node> {
        let function = self.function();
        if let Some(list) = function.child_by_field("parameters") {
            return list.children_with_shape(Shape::Parameter).collect();
        }
        // `x => x` carries its only parameter as a bare identifier.
        function.child_by_field("parameter").into_iter().collect()
    }

    pub(crate) fn return_type(self) -> Option<&'a Node> {
        self.function()
            .child_by_field("return_type")?
            .first_named_child()
    }

    pub(crate) fn body(self) -> Option<&'a Node> {
        self.function().child_by_field("body")
    }
}

/// A class declaration.
#[derive(Clone, Copy)]
pub(crate) struct ClassView<'a>(&'a SyntaxNode);

impl<'a> ClassView<'a> {
    pub(crate) fn new(node: &'a SyntaxNode) -> Option<Self> {
        (node.shape() == Shape::Class).then_some(Self(node))
    }

    pub(crate) fn body(self) -> Option<&'a Node> {
        self.0.child_by_field("body")
    }

    pub(crate) fn members(self, shape: Shape) -> impl Iterator<Item = &'a Node> {
        self.body()
            .into_iter()
            .flat_map(move |body| body.children_with_shape(shape))
    }
}

/// An `if` statement with its `else if` links flattened.
pub(crate) struct IfChain<'a> {
    links: Vec<&'a Node>,
    otherwise: Option<&'a Node>,
}

impl<'a> IfChain<'a> {
    pub(crate) fn new(node: &'a Node) -> Option<Self> {
        if node.shape() != Shape::If {
            return None;
        }
        let mut links = vec![node];
        let mut otherwise = None;
        let mut current = node;
        while let Some(next) = else_branch(current) {
            if next.shape() == Shape::If {
                links.push(next);
                current = next;
            } else {
                otherwise = Some(next);
                break;
            }
        }
        Some(Self { links, otherwise })
    }

    /// Tested expressions, without their parentheses.
    pub(crate) fn conditions(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.links.iter().copied().filter_map(|link| {
            link.child_by_field("condition")?
                .named_children()
                .find(|child| child.kind() != "comment")
        })
    }

    pub(crate) fn consequences(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.links
            .iter()
            .copied()
            .filter_map(|link| link.child_by_field("consequence"))
    }

    /// Statement of the final plain `else`, if there is one.
    pub(crate) fn otherwise(&self) -> Option<&'a Node> {
        self.otherwise
    }
}

fn else_branch(node: &Node) -> Option<&Node> {
    node.child_by_field("alternative")?
        .named_children()
        .find(|child| child.kind() != "comment")
}

/// Something that can carry an object-shaped type description.
#[derive(Clone, Copy)]
pub(crate) enum TypeContainer<'a> {
    Variable(VariableView<'a>),
    Interface(&'a SyntaxNode),
    TypeAlias(&'a SyntaxNode),
    /// Parameter or single declarator carrying a `type` field.
    Annotated(&'a SyntaxNode),
    Literal(&'a SyntaxNode),
}

impl<'a> TypeContainer<'a> {
    pub(crate) fn from_node(node: &'a SyntaxNode) -> Option<Self> {
        match node.shape() {
            Shape::Variable => VariableView::new(node).map(TypeContainer::Variable),
            Shape::Interface => Some(TypeContainer::Interface(node)),
            Shape::TypeAlias => Some(TypeContainer::TypeAlias(node)),
            Shape::Parameter | Shape::Declarator => Some(TypeContainer::Annotated(node)),
            Shape::TypeLiteral => Some(TypeContainer::Literal(node)),
            _ => None,
        }
    }

    fn literal(self) -> Option<&'a SyntaxNode> {
        let candidate: &SyntaxNode = match self {
            TypeContainer::Variable(variable) => variable.annotation()?,
            TypeContainer::Interface(node) => node.child_by_field("body")?,
            TypeContainer::TypeAlias(node) => node.child_by_field("value")?,
            TypeContainer::Annotated(node) => annotation_type(node)?,
            TypeContainer::Literal(node) => node,
        };
        (candidate.shape() == Shape::TypeLiteral).then_some(candidate)
    }

    /// Named members of the described object type, or `None` when the
    /// container does not describe one.
    pub(crate) fn members(self) -> Option<Vec<&'a Node>> {
        let literal = self.literal()?;
        Some(
            literal
                .named_children()
                .filter(|member| member.child_by_field("name").is_some())
                .collect(),
        )
    }
}
