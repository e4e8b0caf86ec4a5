//! Configuration for expansion.

use crate::locale::Locale;

/// Default trigger attribute name.
pub const DEFAULT_ANNOTATION: &str = "Chainable";

/// Default indentation unit for generated bodies.
pub const DEFAULT_INDENT: &str = "    ";

/// Configuration for an [`Expander`](crate::Expander).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionConfig {
    /// Attribute that marks members for expansion, without the `@`.
    pub annotation: String,

    /// One level of indentation in rendered bodies.
    pub indent: String,

    /// Forces the diagnostic locale instead of reading the environment.
    pub locale: Option<Locale>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            annotation: DEFAULT_ANNOTATION.to_string(),
            indent: DEFAULT_INDENT.to_string(),
            locale: None,
        }
    }
}

impl ExpansionConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the trigger attribute.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// Builder method to set the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Builder method to force a diagnostic locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }
}
