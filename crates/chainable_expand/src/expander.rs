//! Expansion driver.
//!
//! Runs the stages for one annotated node, in order:
//!
//! 1. classify the declaration
//! 2. scan its ancestors for owner kind and visibility
//! 3. rebuild the header
//! 4. synthesize the body
//!
//! Any classification failure becomes a localized [`Diagnostic`] and nothing
//! is generated for that node.

use chainable_syntax::{NodeId, Span, SyntaxTree};
use log::debug;

use crate::body::synthesize;
use crate::classify::classify;
use crate::config::ExpansionConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::locale::{LocaleEnvironment, ProcessEnvironment};
use crate::method::SynthesizedMethod;
use crate::scope::scan;
use crate::signature::reconstruct;

/// The outcome of expanding one annotated node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// The annotated node.
    pub node: NodeId,
    /// Generated method, or why there is none.
    pub result: Result<SynthesizedMethod, Diagnostic>,
}

/// Synthesizes builder methods for annotated declarations.
///
/// The environment type decides where diagnostic locale hints come from.
#[derive(Clone, Debug, Default)]
pub struct Expander<E = ProcessEnvironment> {
    config: ExpansionConfig,
    env: E,
}

impl Expander {
    /// Creates an expander with the default configuration that reads locale
    /// hints from the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: LocaleEnvironment> Expander<E> {
    /// Creates an expander with an explicit configuration and environment.
    #[must_use]
    pub fn with_environment(config: ExpansionConfig, env: E) -> Self {
        Self { config, env }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExpansionConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Expands the annotated declaration `id`.
    ///
    /// An id that does not name a node yields a `WrongDeclarationKind`
    /// diagnostic.
    ///
    /// # Errors
    /// Returns a diagnostic if the declaration cannot be expanded.
    pub fn expand(&self, tree: &SyntaxTree, id: NodeId) -> Result<SynthesizedMethod, Diagnostic> {
        let Some(node) = tree.get(id) else {
            return Err(self.diagnose(DiagnosticKind::WrongDeclarationKind, Span::default()));
        };

        let decl = classify(&node.decl).map_err(|kind| {
            debug!(
                "rejected {} at {}:{}: {kind:?}",
                node.decl.kind_name(),
                node.span.line,
                node.span.column
            );
            self.diagnose(kind, node.span)
        })?;

        let context = scan(tree, id);
        debug!(
            "expanding {} `{}`: {:?} owner, visibility {}",
            decl.shape(),
            decl.name(),
            context.owner,
            context.visibility.map_or("unspecified", |v| v.keyword())
        );

        let header = reconstruct(&decl, &context, &self.config.annotation);
        let body = synthesize(&decl, &context);
        Ok(SynthesizedMethod::new(header, body))
    }

    /// Returns every node carrying the trigger attribute, in source order.
    #[must_use]
    pub fn annotated_nodes(&self, tree: &SyntaxTree) -> Vec<NodeId> {
        tree.descendants(tree.root())
            .into_iter()
            .filter(|&id| {
                tree.get(id)
                    .is_some_and(|node| node.decl.has_attribute(&self.config.annotation))
            })
            .collect()
    }

    /// Expands every annotated node of `tree`.
    ///
    /// A failure only affects its own node.
    #[must_use]
    pub fn expand_tree(&self, tree: &SyntaxTree) -> Vec<Expansion> {
        self.annotated_nodes(tree)
            .into_iter()
            .map(|node| Expansion {
                node,
                result: self.expand(tree, node),
            })
            .collect()
    }

    /// Creates a diagnostic in the configured or resolved locale.
    fn diagnose(&self, kind: DiagnosticKind, span: Span) -> Diagnostic {
        match self.config.locale {
            Some(locale) => Diagnostic::with_locale(kind, span, locale),
            None => Diagnostic::report(kind, span, &self.env),
        }
    }
}
