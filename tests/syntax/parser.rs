//! Integration tests for the parser
//!
//! Tests parsing of host sources into declaration trees.

use chainable_syntax::{Decl, ErrorKind, SyntaxTree, TypeKind, Visibility, parse};

fn type_kind(tree: &SyntaxTree, name: &str) -> TypeKind {
    let id = tree.find_named(name).unwrap();
    match &tree.node(id).unwrap().decl {
        Decl::Type(decl) => decl.kind,
        other => panic!("expected type, got {other:?}"),
    }
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn parse_every_type_kind() {
    let tree = parse(
        "struct S {}\nenum E {}\nclass C {}\nactor A {}\nprotocol P {}\nextension S {}",
    )
    .unwrap();
    assert_eq!(type_kind(&tree, "S"), TypeKind::Struct);
    assert_eq!(type_kind(&tree, "E"), TypeKind::Enum);
    assert_eq!(type_kind(&tree, "C"), TypeKind::Class);
    assert_eq!(type_kind(&tree, "A"), TypeKind::Actor);
    assert_eq!(type_kind(&tree, "P"), TypeKind::Protocol);
    assert_eq!(tree.children(tree.root()).len(), 6);
}

#[test]
fn parse_generic_type_with_inheritance() {
    let tree = parse("public final class Box<T: Equatable>: NSObject, Sendable where T: Hashable {}")
        .unwrap();
    let id = tree.find_named("Box").unwrap();
    let Decl::Type(decl) = &tree.node(id).unwrap().decl else {
        panic!("expected type");
    };
    assert_eq!(decl.generic_params.as_deref(), Some("<T: Equatable>"));
    assert_eq!(decl.inheritance.as_deref(), Some("NSObject, Sendable"));
    assert_eq!(decl.where_clause.as_deref(), Some("T: Hashable"));
    assert_eq!(decl.modifiers[0].visibility(), Some(Visibility::Public));
}

// =============================================================================
// Ancestry
// =============================================================================

#[test]
fn ancestors_reach_the_root() {
    let tree = parse("struct A {\n  class B {\n    extension C {\n      func f() {}\n    }\n  }\n}")
        .unwrap();
    let f = tree.find_named("f").unwrap();
    let names: Vec<Option<&str>> = tree.ancestors(f).map(|(_, node)| node.decl.name()).collect();
    assert_eq!(names, vec![Some("C"), Some("B"), Some("A"), None]);
}

#[test]
fn members_keep_source_order() {
    let tree = parse("struct A {\n  var x = 1\n  func y() {}\n  var z = 2\n}").unwrap();
    let a = tree.find_named("A").unwrap();
    let names: Vec<Option<&str>> = tree
        .children(a)
        .iter()
        .map(|&id| tree.node(id).unwrap().decl.name())
        .collect();
    assert_eq!(names, vec![Some("x"), Some("y"), Some("z")]);
}

// =============================================================================
// Realistic sources
// =============================================================================

#[test]
fn parse_view_like_source() {
    let source = r#"
import SwiftUI

/// A button.
public struct FancyButton: View {
    @Chainable public var onTap: (() -> Void)?
    @Chainable var onHover: ((Bool) -> Void)? = nil
    private var title: String = "Tap \(1 + 2)"

    public init(title: String) {
        self.title = title
    }

    public var body: some View {
        Button(title) { onTap?() }
            .padding()
    }

    @Chainable
    mutating func setTitle(_ title: String) {
        self.title = title
    }
}
"#;
    let tree = parse(source).unwrap();
    assert!(tree.find_named("onTap").is_some());
    assert!(tree.find_named("onHover").is_some());
    assert!(tree.find_named("body").is_some());
    let set_title = tree.find_named("setTitle").unwrap();
    assert!(tree.node(set_title).unwrap().decl.has_attribute("Chainable"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn parse_error_reports_line_and_context() {
    let err = parse("struct A {\n    func broken\n}").unwrap_err();
    match err.kind {
        ErrorKind::Parse { line, context, .. } => {
            assert_eq!(line, 3);
            assert_eq!(context, "}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn parse_error_for_unterminated_parameters() {
    assert!(parse("func f(a: Int").is_err());
}
