//! Scoped declaration lookups.
//!
//! Every `find_*s` call lists the matching entries directly inside the
//! wrapped scope without descending into nested bodies. `find_*` returns the
//! first entry declaring the name, `has_*` reports whether there is one.

use super::decl::{self, ClassView, FunctionLike};
use super::Explorer;
use crate::ts::{Shape, SyntaxNode};

impl Explorer {
    pub(super) fn scope_with(&self, keep: impl Fn(&SyntaxNode) -> bool) -> Vec<Explorer> {
        match &self.node {
            Some(node) => decl::scope_entries(node)
                .into_iter()
                .filter(|entry| keep(entry))
                .map(Explorer::wrap_found)
                .collect(),
            None => Vec::new(),
        }
    }

    fn class_members(&self, shape: Shape) -> Vec<Explorer> {
        self.node()
            .and_then(ClassView::new)
            .map(|class| class.members(shape).map(Explorer::wrap_found).collect())
            .unwrap_or_default()
    }

    pub fn find_variables(&self) -> Vec<Explorer> {
        self.scope_with(|node| node.shape() == Shape::Variable)
    }

    pub fn find_variable(&self, name: &str) -> Explorer {
        first_declaring(self.find_variables(), name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        !self.find_variable(name).is_empty()
    }

    /// Function declarations and methods in scope.
    ///
    /// With `include_variables`, variable statements binding an arrow
    /// function or function expression are listed too; without it a
    /// `const f = () => {}` is not a function for lookup purposes.
    pub fn find_functions(&self, include_variables: bool) -> Vec<Explorer> {
        self.scope_with(|node| match node.shape() {
            Shape::Function | Shape::Method => true,
            Shape::Variable => {
                include_variables && FunctionLike::bindings(node).next().is_some()
            }
            _ => false,
        })
    }

    /// First function in scope named `name`.
    ///
    /// A variable statement found through one of several declarators is
    /// narrowed to that declarator, so `const a = () => 1, b = (x) => x`
    /// reports `b`'s parameters for `find_function("b", true)`.
    pub fn find_function(&self, name: &str, include_variables: bool) -> Explorer {
        for function in self.find_functions(include_variables) {
            let Some(node) = function.node.clone() else {
                continue;
            };
            match node.shape() {
                Shape::Variable => {
                    if let Some(declarator) = decl::function_declarator(&node, name) {
                        return function.with_binding(declarator);
                    }
                }
                _ if decl::declared_name(&node) == Some(name) => return function,
                _ => {}
            }
        }
        Explorer::empty()
    }

    pub fn has_function(&self, name: &str, include_variables: bool) -> bool {
        !self.find_function(name, include_variables).is_empty()
    }

    /// Type alias declarations in scope.
    pub fn find_types(&self) -> Vec<Explorer> {
        self.scope_with(|node| node.shape() == Shape::TypeAlias)
    }

    pub fn find_type(&self, name: &str) -> Explorer {
        first_declaring(self.find_types(), name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        !self.find_type(name).is_empty()
    }

    pub fn find_interfaces(&self) -> Vec<Explorer> {
        self.scope_with(|node| node.shape() == Shape::Interface)
    }

    pub fn find_interface(&self, name: &str) -> Explorer {
        first_declaring(self.find_interfaces(), name)
    }

    pub fn has_interface(&self, name: &str) -> bool {
        !self.find_interface(name).is_empty()
    }

    pub fn find_classes(&self) -> Vec<Explorer> {
        self.scope_with(|node| node.shape() == Shape::Class)
    }

    pub fn find_class(&self, name: &str) -> Explorer {
        first_declaring(self.find_classes(), name)
    }

    pub fn has_class(&self, name: &str) -> bool {
        !self.find_class(name).is_empty()
    }

    /// Methods of the wrapped class. Empty unless this handle wraps a class
    /// declaration, so member lookups never span sibling classes.
    pub fn find_methods(&self) -> Vec<Explorer> {
        self.class_members(Shape::Method)
    }

    pub fn find_method(&self, name: &str) -> Explorer {
        first_declaring(self.find_methods(), name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        !self.find_method(name).is_empty()
    }

    /// Field definitions of the wrapped class.
    ///
    /// Properties introduced through constructor parameter shorthand
    /// (`constructor(private x: number)`) are not field definitions and are
    /// not listed.
    pub fn find_class_props(&self) -> Vec<Explorer> {
        self.class_members(Shape::ClassProperty)
    }

    pub fn find_class_prop(&self, name: &str) -> Explorer {
        first_declaring(self.find_class_props(), name)
    }

    pub fn has_class_prop(&self, name: &str) -> bool {
        !self.find_class_prop(name).is_empty()
    }

    /// Parameters of the wrapped function, method, or function-valued
    /// variable, in declaration order.
    pub fn find_parameters(&self) -> Vec<Explorer> {
        match self.focus() {
            Some(node) => FunctionLike::from_node(node)
                .map(|function| {
                    function
                        .parameters()
                        .into_iter()
                        .map(Explorer::wrap_found)
                        .collect()
                })
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

fn first_declaring(candidates: Vec<Explorer>, name: &str) -> Explorer {
    candidates
        .into_iter()
        .find(|candidate| candidate.node().is_some_and(|node| decl::declares(node, name)))
        .unwrap_or_default()
}
