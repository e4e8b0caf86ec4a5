//! Synthesized builder methods.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::body::Statement;
use crate::config::DEFAULT_INDENT;
use crate::signature::MethodHeader;

/// A generated builder method: header plus body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SynthesizedMethod {
    /// Method header.
    pub header: MethodHeader,
    /// Body statements, ending in a `return`.
    pub body: Vec<Statement>,
}

impl SynthesizedMethod {
    /// Creates a method.
    #[must_use]
    pub fn new(header: MethodHeader, body: Vec<Statement>) -> Self {
        Self { header, body }
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.header.name
    }

    /// Renders the declaration, indenting body statements by `indent`.
    #[must_use]
    pub fn render(&self, indent: &str) -> String {
        let mut out = format!("{} {{\n", self.header);
        for statement in &self.body {
            out.push_str(indent);
            out.push_str(&statement.to_string());
            out.push('\n');
        }
        out.push('}');
        out
    }
}

impl fmt::Display for SynthesizedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_INDENT))
    }
}
