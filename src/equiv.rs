//! Formatting-insensitive structural comparison of syntax trees.
//!
//! Two trees are equivalent when they have the same kinds in the same order
//! and their leaves spell the same text. Whitespace never appears in the tree,
//! and semicolon tokens and comments are skipped, so `const a = 1;` and
//! `const   a=1` compare equal while `a; b;` and `b; a;` do not.

use crate::ts::{SyntaxNode, MAX_DEPTH};

/// Compare two optional nodes. Two absent nodes are equivalent.
pub fn equivalent(left: Option<&SyntaxNode>, right: Option<&SyntaxNode>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => nodes_equivalent(left, right, 0),
        _ => false,
    }
}

fn nodes_equivalent(left: &SyntaxNode, right: &SyntaxNode, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    if left.kind() != right.kind() {
        return false;
    }

    let left_children: Vec<&SyntaxNode> = structural_children(left).collect();
    let right_children: Vec<&SyntaxNode> = structural_children(right).collect();

    if left_children.is_empty() && right_children.is_empty() {
        return left.text() == right.text();
    }

    left_children.len() == right_children.len()
        && left_children
            .iter()
            .zip(&right_children)
            .all(|(l, r)| nodes_equivalent(l, r, depth + 1))
}

/// Children that carry meaning: everything except `;` tokens and comments.
fn structural_children(node: &SyntaxNode) -> impl Iterator<Item = &SyntaxNode> + '_ {
    node.children()
        .iter()
        .map(|child| child.as_ref())
        .filter(|child| child.kind() != ";" && child.kind() != "comment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::ParseContext;

    fn same(a: &str, b: &str) -> bool {
        let a = ParseContext::Generic.parse(a);
        let b = ParseContext::Generic.parse(b);
        equivalent(a.as_deref(), b.as_deref())
    }

    #[test]
    fn absent_nodes() {
        assert!(equivalent(None, None));
        let node = ParseContext::Generic.parse("let a = 1;");
        assert!(!equivalent(node.as_deref(), None));
        assert!(!equivalent(None, node.as_deref()));
    }

    #[test]
    fn ignores_whitespace() {
        assert!(same("const a = 1;", "const   a=1 ;"));
        assert!(same(
            "function foo(a: number) { return a; }",
            "function foo( a : number )\n{\n    return a;\n}"
        ));
    }

    #[test]
    fn ignores_semicolons() {
        assert!(same("const a = 1;", "const a = 1"));
        assert!(same(
            "function foo() { return 42; }",
            "function foo() { return 42 }"
        ));
    }

    #[test]
    fn ignores_comments() {
        assert!(same(
            "function foo() { /* answer */ return 42; }",
            "function foo() { return 42; }"
        ));
    }

    #[test]
    fn statement_order_matters() {
        assert!(!same("let a = 1; let b = 2;", "let b = 2; let a = 1;"));
    }

    #[test]
    fn identifiers_and_literals_are_exact() {
        assert!(!same("const a = 1;", "const b = 1;"));
        assert!(!same("const a = 1;", "const a = 2;"));
        assert!(!same("const a = 1;", "let a = 1;"));
    }

    #[test]
    fn no_semantic_folding() {
        assert!(!same("const a = 1 + 1;", "const a = 2;"));
    }

    #[test]
    fn comparison_gives_up_past_max_depth() {
        let node = ParseContext::Generic.parse("total + 1;").unwrap();

        assert!(nodes_equivalent(&node, &node, 0));
        assert!(!nodes_equivalent(&node, &node, MAX_DEPTH + 1));
        // Children sit one level below the limit.
        assert!(!nodes_equivalent(&node, &node, MAX_DEPTH));
    }
}
