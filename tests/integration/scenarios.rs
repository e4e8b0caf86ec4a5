//! End-to-end expansion scenarios

use std::collections::BTreeMap;

use chainable::expand::{
    DiagnosticKind, Expander, ExpansionConfig, Locale, Statement, StaticEnvironment,
    SynthesizedMethod,
};
use chainable::syntax::parse;

fn expander() -> Expander<StaticEnvironment> {
    Expander::with_environment(ExpansionConfig::default(), StaticEnvironment::new())
}

fn expand_member(source: &str, name: &str) -> String {
    let tree = parse(source).unwrap();
    let id = tree.find_named(name).unwrap();
    expander().expand(&tree, id).unwrap().to_string()
}

// =============================================================================
// Closure properties
// =============================================================================

#[test]
fn struct_button_on_tap() {
    let source = r"
public struct Button {
    var title: String
    @Chainable var onTap: (() -> Void)?
}
";
    assert_eq!(
        expand_member(source, "onTap"),
        "@discardableResult public func onTap(_ onTap: @escaping () -> Void) -> Self {\n    var copy = self\n    copy.onTap = onTap\n    return copy\n}"
    );
}

#[test]
fn class_handler_assigns_through_self() {
    let source = r"
final class Downloader {
    @Chainable var onProgress: ((Double) -> Void)?
}
";
    assert_eq!(
        expand_member(source, "onProgress"),
        "@discardableResult func onProgress(_ onProgress: @escaping (Double) -> Void) -> Self {\n    self.onProgress = onProgress\n    return self\n}"
    );
}

#[test]
fn each_builder_only_touches_its_own_property() {
    let source = r"
struct Form {
    @Chainable var onSubmit: (() -> Void)?
    @Chainable var onCancel: (() -> Void)?
}
";
    let tree = parse(source).unwrap();
    let methods: Vec<_> = expander()
        .expand_tree(&tree)
        .into_iter()
        .map(|e| e.result.unwrap())
        .collect();
    assert_eq!(methods.len(), 2);
    for method in &methods {
        let name = method.name();
        let other = if name == "onSubmit" { "onCancel" } else { "onSubmit" };
        let rendered = method.to_string();
        assert!(rendered.contains(&format!("copy.{name} = {name}")));
        assert!(!rendered.contains(other));
    }
}

/// Runs a value-owner setter body against `receiver`, binding the single
/// parameter to `argument`.
fn call_setter(
    method: &SynthesizedMethod,
    receiver: &BTreeMap<String, String>,
    argument: &str,
) -> BTreeMap<String, String> {
    let parameter = method.name();
    let mut locals: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for statement in &method.body {
        match statement {
            Statement::BindSelf { name, .. } => {
                locals.insert(name.clone(), receiver.clone());
            }
            Statement::Assign {
                target,
                property,
                value,
            } => {
                assert_eq!(value, parameter);
                locals
                    .get_mut(target)
                    .unwrap()
                    .insert(property.clone(), argument.to_string());
            }
            Statement::Return(name) => return locals.remove(name).unwrap(),
            Statement::Forward { .. } => panic!("setter forwards a call"),
        }
    }
    panic!("setter body has no return");
}

#[test]
fn chained_setter_keeps_last_closure() {
    let source = r"
struct Button {
    var title: String
    @Chainable var onTap: (() -> Void)?
}
";
    let tree = parse(source).unwrap();
    let id = tree.find_named("onTap").unwrap();
    let method = expander().expand(&tree, id).unwrap();

    let original = BTreeMap::from([
        ("title".to_string(), "OK".to_string()),
        ("onTap".to_string(), "nil".to_string()),
    ]);
    let once = call_setter(&method, &original, "c1");
    let twice = call_setter(&method, &once, "c2");

    assert_eq!(twice["onTap"], "c2");
    assert_eq!(twice["title"], "OK");
    assert_eq!(once["onTap"], "c1");
    assert_eq!(original["onTap"], "nil");
}

// =============================================================================
// Procedures
// =============================================================================

#[test]
fn class_set_count_forwards() {
    let source = r"
final class Counter {
    var count = 0
    @Chainable func setCount(_ n: Int) {
        count = n
    }
}
";
    assert_eq!(
        expand_member(source, "setCount"),
        "@discardableResult func setCount(_ n: Int) -> Self {\n    let copy = self\n    let _: Void = copy.setCount(n)\n    return copy\n}"
    );
}

#[test]
fn async_throwing_mutating_procedure() {
    let source = r"
public struct Session {
    @Chainable mutating func connect(to host: String, port: Int) async throws {
        try await open(host, port)
    }
}
";
    assert_eq!(
        expand_member(source, "connect"),
        "@discardableResult public func connect(to host: String, port: Int) async throws -> Self {\n    var copy = self\n    let _: Void = try await copy.connect(to: host, port: port)\n    return copy\n}"
    );
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn non_void_method_generates_nothing() {
    let source = r"
struct Math {
    @Chainable func double(_ x: Int) -> Int { x * 2 }
}
";
    let tree = parse(source).unwrap();
    let id = tree.find_named("double").unwrap();
    let diagnostic = expander().expand(&tree, id).unwrap_err();
    assert_eq!(diagnostic.kind, DiagnosticKind::NonVoidReturn);
    assert_eq!(diagnostic.locale, Locale::English);
    assert_eq!(diagnostic.span.line, 3);
}

#[test]
fn rejection_in_chinese() {
    let source = "struct S {\n    @Chainable var count: Int\n}";
    let tree = parse(source).unwrap();
    let id = tree.find_named("count").unwrap();
    let expander = Expander::with_environment(
        ExpansionConfig::default(),
        StaticEnvironment::new().with_language("zh_TW.UTF-8"),
    );
    let diagnostic = expander.expand(&tree, id).unwrap_err();
    assert_eq!(diagnostic.kind, DiagnosticKind::NotClosureType);
    assert_eq!(diagnostic.to_string(), "属性类型必须是闭包类型，例如 '(() -> Void)?'");
    assert_eq!(
        diagnostic.alternate_message(),
        "property type must be a closure type, such as '(() -> Void)?'"
    );
}
