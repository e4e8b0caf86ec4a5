//! Integration tests for header and body synthesis

use chainable_expand::{Expander, ExpansionConfig, StaticEnvironment, SynthesizedMethod};
use chainable_syntax::parse;

fn expand(source: &str, name: &str) -> SynthesizedMethod {
    let tree = parse(source).unwrap();
    let id = tree.find_named(name).unwrap();
    Expander::with_environment(ExpansionConfig::default(), StaticEnvironment::new())
        .expand(&tree, id)
        .unwrap()
}

// =============================================================================
// Visibility
// =============================================================================

#[test]
fn visibility_comes_from_enclosing_type() {
    let method = expand("open class Base {\n    @Chainable var f: (() -> Void)?\n}", "f");
    assert!(method.header.to_string().starts_with("@discardableResult open func f("));
}

#[test]
fn member_visibility_is_replaced() {
    let method = expand(
        "struct S {\n    @Chainable private mutating func reset() {}\n}",
        "reset",
    );
    assert_eq!(
        method.header.to_string(),
        "@discardableResult func reset() -> Self"
    );
}

#[test]
fn extension_visibility() {
    let method = expand(
        "public extension Store {\n    @Chainable func refresh() async {}\n}",
        "refresh",
    );
    assert_eq!(
        method.header.to_string(),
        "@discardableResult public func refresh() async -> Self"
    );
    assert_eq!(method.body[0].to_string(), "let copy = self");
}

// =============================================================================
// Forwarding
// =============================================================================

#[test]
fn generic_procedure_keeps_clauses() {
    let method = expand(
        "actor Cache {\n    @Chainable func store<Key: Hashable, Value>(_ value: Value, for key: Key) throws where Value: Sendable {\n        try insert(value, key)\n    }\n}",
        "store",
    );
    assert_eq!(
        method.to_string(),
        "@discardableResult func store<Key: Hashable, Value>(_ value: Value, for key: Key) throws -> Self where Value: Sendable {\n    let copy = self\n    let _: Void = try copy.store(value, for: key)\n    return copy\n}"
    );
}

#[test]
fn inout_parameters_forward_by_reference() {
    let method = expand(
        "struct Log {\n    @Chainable mutating func drain(into buffer: inout [String], limit: Int = 10) {}\n}",
        "drain",
    );
    assert_eq!(
        method.body[1].to_string(),
        "let _: Void = copy.drain(into: &buffer, limit: limit)"
    );
    assert!(method.header.parameter_clause.contains("inout [String]"));
    assert_eq!(method.body[0].to_string(), "var copy = self");
}

#[test]
fn other_attributes_survive() {
    let method = expand(
        "final class Model {\n    @MainActor @Chainable @discardableResult func sync() {}\n}",
        "sync",
    );
    assert_eq!(
        method.header.to_string(),
        "@MainActor @discardableResult func sync() -> Self"
    );
}

#[test]
fn comparison_in_default_value_keeps_later_parameters() {
    let method = expand(
        "struct Gate {\n    @Chainable func f(x: Bool = a<b, y: Int) {}\n}",
        "f",
    );
    assert_eq!(
        method.body[1].to_string(),
        "let _: Void = copy.f(x: x, y: y)"
    );
    assert_eq!(method.header.parameter_clause, "(x: Bool = a<b, y: Int)");
}

#[test]
fn unnamed_parameters_are_named_for_forwarding() {
    let method = expand(
        "final class Sink {\n    @Chainable func push(_: Int, into _: String) {}\n}",
        "push",
    );
    assert_eq!(
        method.header.to_string(),
        "@discardableResult func push(_ arg0: Int, into arg1: String) -> Self"
    );
    assert_eq!(
        method.body[1].to_string(),
        "let _: Void = copy.push(arg0, into: arg1)"
    );
}
