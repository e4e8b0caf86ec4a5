//! Whole-file splicing through the facade crate

use chainable::expand::{DiagnosticKind, Expander, ExpansionConfig, StaticEnvironment, expand_source};

fn expander() -> Expander<StaticEnvironment> {
    Expander::with_environment(ExpansionConfig::default(), StaticEnvironment::new())
}

#[test]
fn splices_every_annotated_member() {
    let source = "\
public struct Card {
    @Chainable var onOpen: (() -> Void)?
    @Chainable var onClose: (() -> Void)?
}
";
    let expanded = expand_source(source, &expander()).unwrap();
    assert!(expanded.is_clean());
    assert_eq!(expanded.generated, 2);
    assert_eq!(
        expanded.source,
        "\
public struct Card {
    @Chainable var onOpen: (() -> Void)?

    @discardableResult public func onOpen(_ onOpen: @escaping () -> Void) -> Self {
        var copy = self
        copy.onOpen = onOpen
        return copy
    }
    @Chainable var onClose: (() -> Void)?

    @discardableResult public func onClose(_ onClose: @escaping () -> Void) -> Self {
        var copy = self
        copy.onClose = onClose
        return copy
    }
}
"
    );
}

#[test]
fn nested_types_use_their_own_indent() {
    let source = "\
enum Theme {
    struct Palette {
        @Chainable var onChange: (() -> Void)?
    }
}
";
    let expanded = expand_source(source, &expander()).unwrap();
    assert!(expanded.source.contains("\n        @discardableResult func onChange("));
    assert!(expanded.source.contains("\n            var copy = self\n"));
}

#[test]
fn custom_indent_and_mixed_results() {
    let source = "\
class Player {
\t@Chainable func play() async {}
\t@Chainable func volume() -> Float { 1 }
}
";
    let expander = Expander::with_environment(
        ExpansionConfig::new().with_indent("\t"),
        StaticEnvironment::new(),
    );
    let expanded = expand_source(source, &expander).unwrap();
    assert_eq!(expanded.generated, 1);
    assert_eq!(expanded.diagnostics.len(), 1);
    assert_eq!(expanded.diagnostics[0].kind, DiagnosticKind::NonVoidReturn);
    assert!(expanded.source.contains(
        "\n\t@discardableResult func play() async -> Self {\n\t\tlet copy = self\n\t\tlet _: Void = await copy.play()\n\t\treturn copy\n\t}\n"
    ));
}

#[test]
fn source_without_annotations_is_unchanged() {
    let source = "struct Plain {\n    var value = 1\n}\n";
    let expanded = expand_source(source, &expander()).unwrap();
    assert_eq!(expanded.source, source);
    assert_eq!(expanded.generated, 0);
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn splicing_preserves_original_text(
            names in prop::collection::btree_set("on[A-Z][a-z]{1,6}", 1..5),
            owner in prop::sample::select(vec!["struct", "class", "enum", "actor"]),
        ) {
            let members: Vec<String> = names
                .iter()
                .map(|name| format!("    @Chainable var {name}: (() -> Void)?"))
                .collect();
            let source = format!("{owner} Widget {{\n{}\n}}\n", members.join("\n"));

            let expanded = expand_source(&source, &expander()).unwrap();
            prop_assert!(expanded.is_clean());
            prop_assert_eq!(expanded.generated, names.len());

            let kept: Vec<&str> = expanded
                .source
                .lines()
                .filter(|line| !line.starts_with("        ") && !line.is_empty())
                .filter(|line| !line.starts_with("    @discardableResult") && *line != "    }")
                .collect();
            let original: Vec<&str> = source.lines().collect();
            prop_assert_eq!(kept, original);
        }
    }
}
