//! Body synthesizer.
//!
//! Produces the statements of a builder method. Value-type owners work on a
//! copy of `self`; reference-type owners assign through `self` directly.

use std::fmt;

use chainable_syntax::{BindingKind, Parameter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::classify::{AnnotatedDeclaration, ClosureProperty, EffectfulProcedure};
use crate::scope::{EnclosingContext, OwnerKind};

/// Preferred name of the local copy of `self`.
const LOCAL_NAME: &str = "copy";

/// One argument of a forwarded call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Argument {
    /// External label; `None` for unlabelled parameters.
    pub label: Option<String>,
    /// Argument expression.
    pub value: String,
}

impl Argument {
    /// Builds the argument that forwards `parameter` unchanged.
    #[must_use]
    pub fn forwarding(parameter: &Parameter) -> Self {
        let name = parameter.internal_name();
        let value = if parameter.is_inout {
            format!("&{name}")
        } else if parameter.is_autoclosure {
            format!("{name}()")
        } else {
            name.to_string()
        };
        Self {
            label: parameter.label().map(str::to_string),
            value,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// A statement of a synthesized body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Statement {
    /// `let name = self` or `var name = self`.
    BindSelf {
        /// `let` or `var`.
        binding: BindingKind,
        /// Local name.
        name: String,
    },
    /// `target.property = value`.
    Assign {
        /// Receiver expression.
        target: String,
        /// Assigned property.
        property: String,
        /// Assigned value.
        value: String,
    },
    /// `let _: Void = try await receiver.method(arguments)`.
    Forward {
        /// Receiver expression.
        receiver: String,
        /// Called method.
        method: String,
        /// Forwarded arguments.
        arguments: Vec<Argument>,
        /// Prefix with `try`.
        is_throwing: bool,
        /// Prefix with `await`.
        is_async: bool,
    },
    /// `return value`.
    Return(String),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindSelf { binding, name } => {
                let keyword = match binding {
                    BindingKind::Let => "let",
                    BindingKind::Var => "var",
                };
                write!(f, "{keyword} {name} = self")
            }
            Self::Assign {
                target,
                property,
                value,
            } => write!(f, "{target}.{property} = {value}"),
            Self::Forward {
                receiver,
                method,
                arguments,
                is_throwing,
                is_async,
            } => {
                f.write_str("let _: Void = ")?;
                if *is_throwing {
                    f.write_str("try ")?;
                }
                if *is_async {
                    f.write_str("await ")?;
                }
                write!(f, "{receiver}.{method}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            }
            Self::Return(value) => write!(f, "return {value}"),
        }
    }
}

/// Builds the body of the builder method for `decl`.
#[must_use]
pub fn synthesize(decl: &AnnotatedDeclaration, context: &EnclosingContext) -> Vec<Statement> {
    match decl {
        AnnotatedDeclaration::ClosureProperty(property) => property_body(property, context.owner),
        AnnotatedDeclaration::EffectfulProcedure(procedure) => procedure_body(procedure),
    }
}

fn property_body(property: &ClosureProperty, owner: OwnerKind) -> Vec<Statement> {
    let name = &property.name;
    match owner {
        OwnerKind::Reference => vec![
            Statement::Assign {
                target: "self".into(),
                property: name.clone(),
                value: name.clone(),
            },
            Statement::Return("self".into()),
        ],
        OwnerKind::Value => {
            let local = local_name([name.as_str()]);
            vec![
                Statement::BindSelf {
                    binding: BindingKind::Var,
                    name: local.clone(),
                },
                Statement::Assign {
                    target: local.clone(),
                    property: name.clone(),
                    value: name.clone(),
                },
                Statement::Return(local),
            ]
        }
    }
}

fn procedure_body(procedure: &EffectfulProcedure) -> Vec<Statement> {
    let local = local_name(procedure.parameters.iter().map(Parameter::internal_name));
    let binding = if procedure.mutates_receiver() {
        BindingKind::Var
    } else {
        BindingKind::Let
    };
    vec![
        Statement::BindSelf {
            binding,
            name: local.clone(),
        },
        Statement::Forward {
            receiver: local.clone(),
            method: procedure.name.clone(),
            arguments: procedure.parameters.iter().map(Argument::forwarding).collect(),
            is_throwing: procedure.effects.is_throwing(),
            is_async: procedure.effects.is_async(),
        },
        Statement::Return(local),
    ]
}

/// Picks `copy`, or `copy1`, `copy2`, ... if a name in `taken` already uses it.
fn local_name<'a>(taken: impl IntoIterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = taken.into_iter().collect();
    let mut candidate = LOCAL_NAME.to_string();
    let mut suffix = 0usize;
    while taken.contains(&candidate.as_str()) {
        suffix += 1;
        candidate = format!("{LOCAL_NAME}{suffix}");
    }
    candidate
}
