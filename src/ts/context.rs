use crate::pool::with_parser;
use crate::ts::syntax::{Shape, SyntaxNode};
use serde::Deserialize;
use std::rc::Rc;
use tracing::{debug, warn};

/// How a text fragment is embedded before parsing.
///
/// Some fragments (a bare type, a class member) are not valid programs on
/// their own, so they are wrapped in a synthetic host and the interesting
/// subtree is extracted afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseContext {
    /// Parse the fragment as a program.
    #[default]
    Generic,
    /// `let _ : <fragment>;`, keeping only the declared type.
    TypeReference,
    /// `class _ { <fragment> }`, keeping the first method.
    Method,
    /// `class _ { <fragment> }`, keeping the first field definition.
    Property,
    /// `function _(<fragment>) {}`, keeping the first parameter.
    Parameter,
}

impl ParseContext {
    /// Wrap a fragment in this context's host text.
    pub fn embed(self, fragment: &str) -> String {
        match self {
            ParseContext::Generic => fragment.to_string(),
            ParseContext::TypeReference => format!("let _ : {fragment};"),
            ParseContext::Method | ParseContext::Property => format!("class _ {{ {fragment} }}"),
            ParseContext::Parameter => format!("function _({fragment}) {{}}"),
        }
    }

    /// Parse `fragment` under this context.
    ///
    /// Returns `None` for blank input, when the host does not yield the
    /// expected subtree, and when the parser itself fails. For the generic
    /// context a single top-level statement is unwrapped; zero or several
    /// statements keep the program node so they stay queryable as a scope.
    pub fn parse(self, fragment: &str) -> Option<Rc<SyntaxNode>> {
        if fragment.trim().is_empty() {
            return None;
        }

        let embedded = self.embed(fragment);
        let lowered = with_parser(|parser| {
            parser
                .parse_with_source(&embedded)
                .and_then(|parsed| parsed.to_syntax())
        })
        .and_then(|result| result);

        let root = match lowered {
            Ok(root) => root,
            Err(error) => {
                warn!(context = ?self, %error, "parser failed to produce a tree");
                return None;
            }
        };

        let extracted = self.extract(&root);
        if extracted.is_none() {
            debug!(context = ?self, fragment, "fragment did not yield the expected shape");
        }
        extracted
    }

    fn extract(self, root: &Rc<SyntaxNode>) -> Option<Rc<SyntaxNode>> {
        match self {
            ParseContext::Generic => {
                let statements: Vec<_> = statements(root).collect();
                match statements.as_slice() {
                    [single] => Some(Rc::clone(single)),
                    _ => Some(Rc::clone(root)),
                }
            }
            ParseContext::TypeReference => {
                let declarator = host(root)?
                    .children_with_shape(Shape::Declarator)
                    .next()?;
                declarator
                    .child_by_field("type")?
                    .first_named_child()
                    .cloned()
            }
            ParseContext::Method => first_member(host(root)?, Shape::Method),
            ParseContext::Property => first_member(host(root)?, Shape::ClassProperty),
            ParseContext::Parameter => host(root)?
                .child_by_field("parameters")?
                .children_with_shape(Shape::Parameter)
                .next()
                .cloned(),
        }
    }
}

fn statements(root: &SyntaxNode) -> impl Iterator<Item = &Rc<SyntaxNode>> + '_ {
    root.named_children().filter(|child| child.kind() != "comment")
}

/// The synthetic host statement. Host text is fixed, so any error recovery
/// means the fragment itself was malformed.
fn host(root: &SyntaxNode) -> Option<&Rc<SyntaxNode>> {
    if root.has_error() {
        return None;
    }
    single_statement(root)
}

fn single_statement(root: &SyntaxNode) -> Option<&Rc<SyntaxNode>> {
    let mut iter = statements(root);
    let first = iter.next()?;
    iter.next().is_none().then_some(first)
}

fn first_member(class: &SyntaxNode, shape: Shape) -> Option<Rc<SyntaxNode>> {
    class
        .child_by_field("body")?
        .children_with_shape(shape)
        .next()
        .cloned()
}
