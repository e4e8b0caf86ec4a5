//! Signature reconstructor.
//!
//! Builds the header of the synthesized builder method so that it can be
//! called exactly like the member it was generated from.

use std::fmt;

use chainable_syntax::{Attribute, EffectSpecifiers, Modifier};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::classify::{AnnotatedDeclaration, ClosureProperty, EffectfulProcedure};
use crate::scope::EnclosingContext;

/// Attribute that lets callers ignore the returned value.
pub const DISCARDABLE_RESULT: &str = "discardableResult";

/// Return type of every builder method.
pub const SELF_TYPE: &str = "Self";

/// The header of a synthesized method.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodHeader {
    /// Attributes, `@discardableResult` included.
    pub attributes: Vec<Attribute>,
    /// Modifiers, visibility first.
    pub modifiers: Vec<Modifier>,
    /// Method name.
    pub name: String,
    /// Generic parameter clause, brackets included.
    pub generic_params: Option<String>,
    /// Parameter clause, parentheses included.
    pub parameter_clause: String,
    /// `async`/`throws` specifiers.
    pub effects: EffectSpecifiers,
    /// Return type.
    pub return_type: String,
    /// Where-clause requirements.
    pub where_clause: Option<String>,
}

impl MethodHeader {
    /// Returns true if the header carries `@discardableResult`.
    #[must_use]
    pub fn is_discardable(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| a.base_name() == DISCARDABLE_RESULT)
    }
}

impl fmt::Display for MethodHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in &self.attributes {
            write!(f, "{attribute} ")?;
        }
        for modifier in &self.modifiers {
            write!(f, "{modifier} ")?;
        }
        write!(f, "func {}", self.name)?;
        if let Some(generics) = &self.generic_params {
            f.write_str(generics)?;
        }
        f.write_str(&self.parameter_clause)?;
        if !self.effects.is_empty() {
            write!(f, " {}", self.effects)?;
        }
        write!(f, " -> {}", self.return_type)?;
        if let Some(requirements) = &self.where_clause {
            write!(f, " where {requirements}")?;
        }
        Ok(())
    }
}

/// Builds the builder header for a classified declaration.
///
/// `annotation` is the trigger attribute, which is never copied.
#[must_use]
pub fn reconstruct(
    decl: &AnnotatedDeclaration,
    context: &EnclosingContext,
    annotation: &str,
) -> MethodHeader {
    match decl {
        AnnotatedDeclaration::ClosureProperty(property) => property_header(property, context),
        AnnotatedDeclaration::EffectfulProcedure(procedure) => {
            procedure_header(procedure, context, annotation)
        }
    }
}

fn property_header(property: &ClosureProperty, context: &EnclosingContext) -> MethodHeader {
    let escaping = if is_escaping(&property.closure_type) {
        ""
    } else {
        "@escaping "
    };
    MethodHeader {
        attributes: vec![Attribute::new(DISCARDABLE_RESULT)],
        modifiers: visibility_modifier(context).into_iter().collect(),
        name: property.name.clone(),
        generic_params: None,
        parameter_clause: format!(
            "(_ {}: {escaping}{})",
            property.name, property.closure_type
        ),
        effects: EffectSpecifiers::default(),
        return_type: SELF_TYPE.to_string(),
        where_clause: None,
    }
}

fn procedure_header(
    procedure: &EffectfulProcedure,
    context: &EnclosingContext,
    annotation: &str,
) -> MethodHeader {
    let mut attributes: Vec<Attribute> = procedure
        .attributes
        .iter()
        .filter(|a| a.base_name() != annotation)
        .cloned()
        .collect();
    if !attributes.iter().any(|a| a.base_name() == DISCARDABLE_RESULT) {
        attributes.insert(0, Attribute::new(DISCARDABLE_RESULT));
    }

    let modifiers = visibility_modifier(context)
        .into_iter()
        .chain(
            procedure
                .modifiers
                .iter()
                .filter(|m| !m.is_visibility() && !m.is_mutation_marker())
                .cloned(),
        )
        .collect();

    MethodHeader {
        attributes,
        modifiers,
        name: procedure.name.clone(),
        generic_params: procedure.generic_params.clone(),
        parameter_clause: procedure.parameter_clause.clone(),
        effects: procedure.effects.clone(),
        return_type: SELF_TYPE.to_string(),
        where_clause: procedure.where_clause.clone(),
    }
}

fn visibility_modifier(context: &EnclosingContext) -> Option<Modifier> {
    context.visibility.map(|v| Modifier::new(v.keyword()))
}

/// Returns true if the leading type attributes already include `@escaping`.
fn is_escaping(closure_type: &str) -> bool {
    closure_type
        .split_whitespace()
        .take_while(|word| word.starts_with('@'))
        .any(|word| word == "@escaping")
}
