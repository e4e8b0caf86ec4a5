//! Source splicing.
//!
//! Expands every annotated member of a source file and inserts each
//! generated method right after its member, indented to match.

use chainable_syntax::{Result, parse};
use log::debug;

use crate::diagnostic::Diagnostic;
use crate::expander::Expander;
use crate::locale::LocaleEnvironment;

/// A source file with its builder methods spliced in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedSource {
    /// The rewritten source text.
    pub source: String,
    /// Number of methods inserted.
    pub generated: usize,
    /// Failures, in source order; their members got no generated code.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExpandedSource {
    /// Returns true if every annotated member was expanded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parses `source`, expands every annotated member and splices the results.
///
/// # Errors
/// Returns an error if `source` cannot be parsed.
pub fn expand_source<E: LocaleEnvironment>(
    source: &str,
    expander: &Expander<E>,
) -> Result<ExpandedSource> {
    let tree = parse(source)?;

    let mut insertions = Vec::new();
    let mut diagnostics = Vec::new();
    for expansion in expander.expand_tree(&tree) {
        let span = tree.node(expansion.node)?.span;
        match expansion.result {
            Ok(method) => {
                let indent = line_indent(source, span.start);
                let rendered = method.render(&expander.config().indent);
                let block: Vec<String> = rendered
                    .lines()
                    .map(|line| format!("{indent}{line}"))
                    .collect();
                insertions.push((insertion_point(source, span.end), block.join("\n")));
            }
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    let generated = insertions.len();
    debug!(
        "spliced {generated} method(s), {} diagnostic(s)",
        diagnostics.len()
    );

    let mut output = source.to_string();
    insertions.sort_by_key(|(at, _)| *at);
    for (at, block) in insertions.into_iter().rev() {
        output.insert_str(at, &format!("\n\n{block}"));
    }

    Ok(ExpandedSource {
        source: output,
        generated,
        diagnostics,
    })
}

/// Returns the leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source
        .get(..offset)
        .and_then(|before| before.rfind('\n'))
        .map_or(0, |i| i + 1);
    let line = source.get(line_start..).unwrap_or("");
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Returns where to insert after a member ending at `end`.
///
/// That is the end of the member's last line when only whitespace or a line
/// comment follows, and `end` itself otherwise.
fn insertion_point(source: &str, end: usize) -> usize {
    let rest = source.get(end..).unwrap_or("");
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let tail = rest[..line_len].trim();
    if tail.is_empty() || tail.starts_with("//") {
        end + line_len
    } else {
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpansionConfig;
    use crate::locale::StaticEnvironment;

    fn expander() -> Expander<StaticEnvironment> {
        Expander::with_environment(ExpansionConfig::default(), StaticEnvironment::new())
    }

    #[test]
    fn splices_after_member_with_matching_indent() {
        let source = "struct Button {\n    @Chainable var onTap: (() -> Void)? // tap\n    var title = \"\"\n}\n";
        let expanded = expand_source(source, &expander()).unwrap();
        assert!(expanded.is_clean());
        assert_eq!(expanded.generated, 1);
        assert_eq!(
            expanded.source,
            "struct Button {\n    @Chainable var onTap: (() -> Void)? // tap\n\n    @discardableResult func onTap(_ onTap: @escaping () -> Void) -> Self {\n        var copy = self\n        copy.onTap = onTap\n        return copy\n    }\n    var title = \"\"\n}\n"
        );
    }

    #[test]
    fn splices_inside_single_line_type() {
        let source = "class A { @Chainable var f: (() -> Void)? }";
        let expanded = expand_source(source, &expander()).unwrap();
        let method_at = expanded.source.find("func f").unwrap();
        let close_at = expanded.source.rfind('}').unwrap();
        assert!(method_at < close_at);
        assert!(expanded.source.ends_with("return self\n} }"));
    }

    #[test]
    fn failed_members_are_left_alone() {
        let source = "struct S {\n    @Chainable let f: (() -> Void)?\n}";
        let expanded = expand_source(source, &expander()).unwrap();
        assert_eq!(expanded.source, source);
        assert_eq!(expanded.generated, 0);
        assert_eq!(expanded.diagnostics.len(), 1);
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(expand_source("struct S {", &expander()).is_err());
    }

    #[test]
    fn indent_helpers() {
        assert_eq!(line_indent("a\n\t  b", 5), "\t  ");
        assert_eq!(line_indent("x", 0), "");
        assert_eq!(insertion_point("a; b\nc", 1), 1);
        assert_eq!(insertion_point("a  \nc", 1), 3);
    }
}
