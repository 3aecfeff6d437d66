//! Behavioural properties of the query handle
//!
//! Covers the empty-handle contract, equivalence rules, scoping, round
//! trips and type-literal inspection across declaration forms.

use proptest::prelude::*;
use ts_explorer::{Explorer, TypeProp, EMPTY_MARKER};

#[test]
fn failed_lookups_are_empty_and_chain() {
    let source = Explorer::new("const a = 1;\nfunction f() {}");

    let missing = source.find_class("Nope");
    assert!(missing.is_empty());
    assert_eq!(missing.to_string(), EMPTY_MARKER);

    // Lookups on an empty handle stay empty instead of failing.
    let chained = missing.find_method("m").annotation();
    assert!(chained.is_empty());
    assert!(missing.find_parameters().is_empty());
    assert!(!missing.has_type_prop("x", None, None));
    assert!(!missing.has_return_annotation("void"));
}

#[test]
fn whitespace_and_semicolons_are_ignored() {
    let explorer = Explorer::new("const total = price * quantity;");
    assert!(explorer.matches("const total=price*quantity"));
    assert!(explorer.matches("const   total =\n    price * quantity ;"));
    assert!(explorer.matches("// total\nconst total = price * quantity;"));
}

#[test]
fn order_and_identifiers_matter() {
    let explorer = Explorer::new("let a = 1;\nlet b = 2;");
    assert!(explorer.matches("let a = 1; let b = 2;"));
    assert!(!explorer.matches("let b = 2; let a = 1;"));
    assert!(!explorer.matches("let a = 1; let c = 2;"));
    assert!(!Explorer::new("a + b;").matches("b + a;"));
}

#[test]
fn single_statement_round_trip() {
    for source in [
        "const a = 1;",
        "function add(a: number, b: number): number { return a + b; }",
        "interface Point { x: number; y?: number; }",
        "class Foo { method1() {} method2() {} }",
    ] {
        assert_eq!(Explorer::new(source).to_string(), source);
    }
}

#[test]
fn nested_declarations_need_the_inner_scope() {
    let source = Explorer::new(
        r#"
function outer() {
    const hidden = 1;
    function inner(): string { return "x"; }
}
"#,
    );

    assert!(!source.has_variable("hidden"));
    assert!(!source.has_function("inner", false));

    let outer = source.find_function("outer", false);
    assert!(outer.body().has_variable("hidden"));
    assert!(outer.body().find_function("inner", false).has_return_annotation("string"));

    // Re-parsing the inner text yields the same scope.
    let reparsed = Explorer::new(&outer.to_string());
    assert!(reparsed.body().has_variable("hidden"));
}

#[test]
fn type_literals_look_the_same_everywhere() {
    let source = Explorer::new(
        r#"
const origin: { x: number; y?: number } = { x: 0 };
interface Point { x: number; y?: number }
type Alias = { x: number; y?: number };
function place(at: { x: number; y?: number }) {}
"#,
    );

    let param = source
        .find_function("place", false)
        .find_parameters()
        .into_iter()
        .next()
        .unwrap_or_default();
    let containers = [
        source.find_variable("origin"),
        source.find_interface("Point"),
        source.find_type("Alias"),
        param,
    ];

    for container in &containers {
        assert!(container.has_type_prop("x", Some("number"), Some(false)), "{container}");
        assert!(container.has_type_prop("y", Some("number"), Some(true)), "{container}");
        assert!(!container.has_type_prop("z", None, None), "{container}");
    }
}

#[test]
fn optionality_and_type_are_checked_independently() {
    let foo = Explorer::new("type Foo = { x?: number; y: string; };").find_type("Foo");

    assert!(foo.has_type_prop("x", None, None));
    assert!(foo.has_type_prop("x", None, Some(true)));
    assert!(!foo.has_type_prop("x", None, Some(false)));
    assert!(foo.has_type_prop("x", Some("number"), None));
    assert!(!foo.has_type_prop("x", Some("string"), Some(true)));

    assert!(foo.has_type_prop("y", Some("string"), Some(false)));
    assert!(!foo.has_type_prop("y", Some("number"), None));

    assert!(foo.has_type_props(&[
        TypeProp::new("x").with_optional(true),
        TypeProp::new("y").with_type("string"),
    ]));
    assert!(!foo.has_type_props(&[
        TypeProp::new("x"),
        TypeProp::new("z"),
    ]));
}

#[test]
fn class_members_scenario() {
    let foo = Explorer::new("class Foo { method1() {} method2() {} }").find_class("Foo");
    let methods = foo.find_methods();

    assert_eq!(methods.len(), 2);
    assert!(methods[0].matches("method1() {}"));
    assert!(methods[1].matches("method2() {}"));
    assert!(foo.has_method("method2"));
    assert!(!foo.has_method("method3"));
    assert!(foo.find_class_props().is_empty());
}

#[test]
fn arrow_functions_need_opt_in() {
    let source = Explorer::new("const double = (n: number): number => n * 2;");

    assert!(!source.has_function("double", false));
    let double = source.find_function("double", true);
    assert!(double.has_return_annotation("number"));
    assert_eq!(double.find_parameters().len(), 1);
    assert!(double.find_parameters()[0].has_annotation("number"));
}

proptest! {
    #[test]
    fn spacing_never_changes_equivalence(
        pads in proptest::collection::vec(prop_oneof![Just(""), Just(" "), Just("\n"), Just("\t  ")], 6),
    ) {
        let spaced = format!(
            "const{}a{}={}b{}+{}1{};",
            // `const` needs at least one separator before the name.
            if pads[0].is_empty() { " " } else { pads[0] },
            pads[1],
            pads[2],
            pads[3],
            pads[4],
            pads[5],
        );
        prop_assert!(Explorer::new("const a = b + 1;").matches(spaced.as_str()));
    }
}
