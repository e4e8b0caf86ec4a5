//! Integration tests for the declaration classifier on parsed sources

use chainable_expand::{AnnotatedDeclaration, DiagnosticKind, classify};
use chainable_syntax::parse;

fn classify_member(source: &str, name: &str) -> Result<AnnotatedDeclaration, DiagnosticKind> {
    let tree = parse(source).unwrap();
    let id = tree.find_named(name).unwrap();
    classify(&tree.node(id).unwrap().decl)
}

fn classify_first_annotated(source: &str) -> Result<AnnotatedDeclaration, DiagnosticKind> {
    let tree = parse(source).unwrap();
    let id = tree
        .descendants(tree.root())
        .into_iter()
        .find(|&id| tree.node(id).unwrap().decl.has_attribute("Chainable"))
        .unwrap();
    classify(&tree.node(id).unwrap().decl)
}

// =============================================================================
// Closure properties
// =============================================================================

#[test]
fn optional_closure_property() {
    let result = classify_member("struct S { @Chainable var onTap: (() -> Void)? }", "onTap");
    let Ok(AnnotatedDeclaration::ClosureProperty(property)) = result else {
        panic!("expected closure property, got {result:?}");
    };
    assert_eq!(property.closure_type, "() -> Void");
}

#[test]
fn implicitly_unwrapped_and_plain_closures() {
    assert!(classify_member("struct S { @Chainable var f: ((Int) -> Void)! }", "f").is_ok());
    assert!(classify_member("struct S { @Chainable var f: (Int) -> Void = { _ in } }", "f").is_ok());
}

#[test]
fn property_rules_in_order() {
    assert_eq!(
        classify_member("struct S { @Chainable let f: (() -> Void)? }", "f"),
        Err(DiagnosticKind::NotMutableBinding)
    );
    assert_eq!(
        classify_first_annotated("struct S { @Chainable var a: (() -> Void)?, b: (() -> Void)? }"),
        Err(DiagnosticKind::MultipleBindings)
    );
    assert_eq!(
        classify_first_annotated("struct S { @Chainable var (a, b): (Int, Int) }"),
        Err(DiagnosticKind::MissingIdentifierPattern)
    );
    assert_eq!(
        classify_member("struct S { @Chainable var f = { } }", "f"),
        Err(DiagnosticKind::MissingTypeAnnotation)
    );
    assert_eq!(
        classify_member("struct S { @Chainable var f: [() -> Void] }", "f"),
        Err(DiagnosticKind::NotClosureType)
    );
}

// =============================================================================
// Procedures
// =============================================================================

#[test]
fn void_procedures() {
    for signature in ["func f()", "func f() -> Void", "func f() -> ()", "func f() -> Swift.Void"] {
        let source = format!("class C {{ @Chainable {signature} {{}} }}");
        assert!(
            matches!(
                classify_member(&source, "f"),
                Ok(AnnotatedDeclaration::EffectfulProcedure(_))
            ),
            "{signature}"
        );
    }
}

#[test]
fn procedure_rules() {
    assert_eq!(
        classify_member("protocol P { @Chainable func f() }", "f"),
        Err(DiagnosticKind::MissingBody)
    );
    assert_eq!(
        classify_member("class C { @Chainable func f() -> Int { 1 } }", "f"),
        Err(DiagnosticKind::NonVoidReturn)
    );
}

#[test]
fn other_declarations() {
    assert_eq!(
        classify_first_annotated("struct S { @Chainable init() {} }"),
        Err(DiagnosticKind::WrongDeclarationKind)
    );
    assert_eq!(
        classify_member("@Chainable enum E {}", "E"),
        Err(DiagnosticKind::WrongDeclarationKind)
    );
}
