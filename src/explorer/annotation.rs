use super::decl::{self, FunctionLike, TypeContainer, VariableView};
use super::Explorer;
use crate::ts::{ParseContext, Shape};
use serde::Deserialize;

/// Expected member of an object-shaped type.
///
/// `ty` and `optional` left as `None` are not checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeProp {
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub optional: Option<bool>,
}

impl TypeProp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }
}

impl Explorer {
    /// Declared type of the wrapped node.
    ///
    /// Variables report their first declarator's type, type aliases the
    /// aliased type, and function-likes their return type.
    pub fn annotation(&self) -> Explorer {
        let Some(node) = self.focus() else {
            return Explorer::empty_in(ParseContext::TypeReference);
        };
        let ty = match node.shape() {
            Shape::Variable => VariableView::new(node).and_then(VariableView::annotation),
            Shape::Declarator
            | Shape::Parameter
            | Shape::ClassProperty
            | Shape::PropertySignature => decl::annotation_type(node),
            Shape::TypeAlias => node.child_by_field("value"),
            _ => FunctionLike::from_node(node).and_then(FunctionLike::return_type),
        };
        match ty {
            Some(ty) => Explorer::wrap(ty, ParseContext::TypeReference),
            None => Explorer::empty_in(ParseContext::TypeReference),
        }
    }

    /// True if the declared type is structurally `annotation`, e.g.
    /// `has_annotation("Array<string>")`. Always false without a type.
    pub fn has_annotation(&self, annotation: &str) -> bool {
        let own = self.annotation();
        !own.is_empty() && own.matches(annotation)
    }

    /// Return type of the wrapped function-like.
    pub fn return_annotation(&self) -> Explorer {
        let ty = self
            .focus()
            .and_then(|node| FunctionLike::from_node(node))
            .and_then(FunctionLike::return_type);
        match ty {
            Some(ty) => Explorer::wrap(ty, ParseContext::TypeReference),
            None => Explorer::empty_in(ParseContext::TypeReference),
        }
    }

    pub fn has_return_annotation(&self, annotation: &str) -> bool {
        let own = self.return_annotation();
        !own.is_empty() && own.matches(annotation)
    }

    /// Look for member `name` in the object type described by the wrapped
    /// variable annotation, interface, type alias, parameter or type literal.
    ///
    /// `ty` must be structurally equal to the member's type when given (the
    /// return type for a method signature); `optional` must equal the
    /// presence of `?` when given.
    pub fn has_type_prop(&self, name: &str, ty: Option<&str>, optional: Option<bool>) -> bool {
        let Some(members) = self
            .focus()
            .and_then(|node| TypeContainer::from_node(node))
            .and_then(TypeContainer::members)
        else {
            return false;
        };
        let Some(member) = members
            .into_iter()
            .find(|member| decl::declared_name(member) == Some(name))
        else {
            return false;
        };

        if let Some(expected) = ty {
            // Method signatures (`f(): void`) carry a return type instead.
            let actual = decl::annotation_type(member).or_else(|| {
                FunctionLike::from_node(member).and_then(FunctionLike::return_type)
            });
            let matched = actual.is_some_and(|actual| {
                Explorer::wrap(actual, ParseContext::TypeReference).matches(expected)
            });
            if !matched {
                return false;
            }
        }

        match optional {
            Some(optional) => member.has_token("?") == optional,
            None => true,
        }
    }

    /// True if every entry is satisfied by [`Explorer::has_type_prop`].
    pub fn has_type_props(&self, props: &[TypeProp]) -> bool {
        props.iter().all(|prop| {
            self.has_type_prop(&prop.name, prop.ty.as_deref(), prop.optional)
        })
    }
}
