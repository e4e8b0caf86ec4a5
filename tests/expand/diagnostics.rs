//! Integration tests for localized diagnostics

use chainable_expand::{
    DiagnosticKind, Expander, ExpansionConfig, Locale, StaticEnvironment,
};
use chainable_syntax::parse;

const SOURCE: &str = "struct S {\n    @Chainable func total() -> Int { 0 }\n}";

fn diagnose(env: StaticEnvironment) -> chainable_expand::Diagnostic {
    let tree = parse(SOURCE).unwrap();
    let id = tree.find_named("total").unwrap();
    Expander::with_environment(ExpansionConfig::default(), env)
        .expand(&tree, id)
        .unwrap_err()
}

#[test]
fn chinese_when_first_preference_is_chinese() {
    let diagnostic = diagnose(StaticEnvironment::new().with_preferred(["zh-Hans", "en"]));
    assert_eq!(diagnostic.locale, Locale::Chinese);
    assert_eq!(diagnostic.to_string(), DiagnosticKind::NonVoidReturn.chinese());
}

#[test]
fn chinese_from_language_variable() {
    let diagnostic = diagnose(StaticEnvironment::new().with_language("zh_CN.UTF-8"));
    assert_eq!(diagnostic.locale, Locale::Chinese);
}

#[test]
fn english_otherwise() {
    let diagnostic = diagnose(
        StaticEnvironment::new()
            .with_preferred(["en-GB", "zh"])
            .with_language("en_GB.UTF-8"),
    );
    assert_eq!(diagnostic.locale, Locale::English);
    assert_eq!(diagnostic.to_string(), "method must not return a value");
}

#[test]
fn diagnostic_is_anchored_at_the_declaration() {
    let diagnostic = diagnose(StaticEnvironment::new());
    assert_eq!(diagnostic.span.line, 2);
    assert_eq!(diagnostic.span.column, 5);
    assert_eq!(diagnostic.span.text(SOURCE), "@Chainable func total() -> Int { 0 }");
}
