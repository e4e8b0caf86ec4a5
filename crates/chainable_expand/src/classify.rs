//! Declaration classifier.
//!
//! Decides whether an annotated declaration is a closure property or a
//! side-effect-only method, and extracts what the later stages need.
//! Classification either yields a complete [`AnnotatedDeclaration`] or a
//! [`DiagnosticKind`]; there is no partial result.

use chainable_syntax::{
    Attribute, BindingKind, Decl, EffectSpecifiers, FunctionDecl, Lexer, Modifier, Parameter,
    Pattern, Token, TokenKind, VariableDecl, render_parameter_clause,
};
use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diagnostic::DiagnosticKind;

// =============================================================================
// Classified shapes
// =============================================================================

/// A stored `var` holding an (optionally optional) closure.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosureProperty {
    /// Property name.
    pub name: String,
    /// Declared type as written, e.g. `(() -> Void)?`.
    pub declared_type: String,
    /// The function type with optional layers and outer parentheses removed.
    pub closure_type: String,
}

/// A method with a body and no return value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectfulProcedure {
    /// Method name.
    pub name: String,
    /// Parsed parameters, in order.
    pub parameters: Vec<Parameter>,
    /// Parameter clause exactly as written.
    pub parameter_clause: String,
    /// Generic parameter clause, brackets included.
    pub generic_params: Option<String>,
    /// Where-clause requirements.
    pub where_clause: Option<String>,
    /// `async`/`throws` specifiers.
    pub effects: EffectSpecifiers,
    /// Declared modifiers.
    pub modifiers: Vec<Modifier>,
    /// Declared attributes, the trigger included.
    pub attributes: Vec<Attribute>,
}

impl EffectfulProcedure {
    /// Returns true if the method may mutate or consume its receiver.
    #[must_use]
    pub fn mutates_receiver(&self) -> bool {
        self.modifiers
            .iter()
            .any(|m| matches!(m.name.as_str(), "mutating" | "consuming" | "borrowing"))
    }
}

/// A declaration that passed classification.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnnotatedDeclaration {
    /// A closure-typed stored property.
    ClosureProperty(ClosureProperty),
    /// A method without a return value.
    EffectfulProcedure(EffectfulProcedure),
}

impl AnnotatedDeclaration {
    /// Returns the member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ClosureProperty(property) => &property.name,
            Self::EffectfulProcedure(procedure) => &procedure.name,
        }
    }

    /// Returns a short description of the shape, for logging.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::ClosureProperty(_) => "closure property",
            Self::EffectfulProcedure(_) => "procedure",
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classifies an annotated declaration.
///
/// # Errors
/// Returns the first rule the declaration breaks.
pub fn classify(decl: &Decl) -> Result<AnnotatedDeclaration, DiagnosticKind> {
    match decl {
        Decl::Variable(variable) => {
            classify_property(variable).map(AnnotatedDeclaration::ClosureProperty)
        }
        Decl::Function(function) => {
            classify_procedure(function).map(AnnotatedDeclaration::EffectfulProcedure)
        }
        Decl::SourceFile | Decl::Type(_) | Decl::Other(_) => {
            Err(DiagnosticKind::WrongDeclarationKind)
        }
    }
}

fn classify_property(variable: &VariableDecl) -> Result<ClosureProperty, DiagnosticKind> {
    if variable.binding != BindingKind::Var {
        return Err(DiagnosticKind::NotMutableBinding);
    }
    let [binding] = variable.bindings.as_slice() else {
        return Err(DiagnosticKind::MultipleBindings);
    };
    let Pattern::Identifier(name) = &binding.pattern else {
        return Err(DiagnosticKind::MissingIdentifierPattern);
    };
    let declared_type = binding
        .type_annotation
        .as_deref()
        .ok_or(DiagnosticKind::MissingTypeAnnotation)?;
    let closure_type = unwrap_closure_type(declared_type).ok_or(DiagnosticKind::NotClosureType)?;
    if name.is_empty() {
        return Err(DiagnosticKind::EmptyIdentifierName);
    }
    if is_type_member(&variable.modifiers) {
        warn!("`{name}` is a type property; the generated setter assigns an instance member");
    }
    if binding.accessors.as_deref().is_some_and(is_read_only) {
        warn!("`{name}` is read-only; the generated setter cannot assign it");
    }

    Ok(ClosureProperty {
        name: name.clone(),
        declared_type: declared_type.to_string(),
        closure_type,
    })
}

fn classify_procedure(function: &FunctionDecl) -> Result<EffectfulProcedure, DiagnosticKind> {
    if !function.has_body() {
        return Err(DiagnosticKind::MissingBody);
    }
    if let Some(return_type) = &function.return_type {
        if !is_void_type(return_type) {
            return Err(DiagnosticKind::NonVoidReturn);
        }
    }
    if is_type_member(&function.modifiers) {
        warn!(
            "`{}` is a type method; the generated builder forwards through `self`, which is the type",
            function.name
        );
    }
    if let Some(variadic) = function.parameters.iter().find(|p| p.is_variadic) {
        warn!(
            "`{}` has variadic parameter `{}`; forwarding it passes a single array",
            function.name,
            variadic.internal_name()
        );
    }

    let (parameters, parameter_clause) = match name_unnamed_parameters(&function.parameters) {
        Some(named) => {
            debug!("`{}` has unnamed parameters; naming them for forwarding", function.name);
            let clause = render_parameter_clause(&named);
            (named, clause)
        }
        None => (
            function.parameters.clone(),
            function.parameter_clause.clone(),
        ),
    };

    Ok(EffectfulProcedure {
        name: function.name.clone(),
        parameters,
        parameter_clause,
        generic_params: function.generic_params.clone(),
        where_clause: function.where_clause.clone(),
        effects: function.effects.clone(),
        modifiers: function.modifiers.clone(),
        attributes: function.attributes.clone(),
    })
}

/// Returns true for `static` and `class` members.
fn is_type_member(modifiers: &[Modifier]) -> bool {
    modifiers
        .iter()
        .any(|m| matches!(m.name.as_str(), "static" | "class"))
}

/// Returns true if an accessor block has no setter or observer.
///
/// Only keywords directly inside the outer braces count, so a `set` used in a
/// getter body does not make the property writable.
fn is_read_only(accessors: &str) -> bool {
    let mut depth = 0usize;
    for token in Lexer::tokenize_all(accessors) {
        match &token.kind {
            _ if token.opens_group() => depth += 1,
            _ if token.closes_group() => depth = depth.saturating_sub(1),
            TokenKind::Ident(word)
                if depth == 1 && matches!(word.as_str(), "set" | "willSet" | "didSet" | "_modify") =>
            {
                return false;
            }
            _ => {}
        }
    }
    true
}

/// Gives every parameter bound to `_` a fresh internal name.
///
/// Returns `None` when all parameters are already named. Labels are kept,
/// so call sites of the builder are unchanged.
fn name_unnamed_parameters(parameters: &[Parameter]) -> Option<Vec<Parameter>> {
    if !parameters.iter().any(|p| p.internal_name() == "_") {
        return None;
    }
    let taken: Vec<&str> = parameters.iter().map(Parameter::internal_name).collect();
    let mut named = parameters.to_vec();
    for (index, parameter) in named.iter_mut().enumerate() {
        if parameter.internal_name() != "_" {
            continue;
        }
        let mut candidate = format!("arg{index}");
        while taken.contains(&candidate.as_str()) {
            candidate.push('_');
        }
        parameter.second_name = Some(candidate);
    }
    Some(named)
}

// =============================================================================
// Type inspection
// =============================================================================

/// Returns true for the spellings of the unit type.
#[must_use]
pub fn is_void_type(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    matches!(compact.as_str(), "Void" | "Swift.Void" | "()")
}

/// Strips optional layers and redundant parentheses from a closure type.
///
/// Returns `None` if what remains has no top-level `->`.
#[must_use]
pub fn unwrap_closure_type(text: &str) -> Option<String> {
    let tokens: Vec<Token> = Lexer::tokenize_all(text)
        .into_iter()
        .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
        .collect();

    let mut run = tokens.as_slice();
    loop {
        if has_top_level_arrow(run) {
            break;
        }
        if let [rest @ .., last] = run {
            if matches!(last.kind, TokenKind::Question | TokenKind::Bang) {
                run = rest;
                continue;
            }
        }
        if let Some(inner) = optional_argument(run) {
            run = inner;
            continue;
        }
        if let Some(inner) = redundant_parens(run) {
            run = inner;
            continue;
        }
        break;
    }

    if !has_top_level_arrow(run) {
        return None;
    }
    let (first, last) = (run.first()?, run.last()?);
    Some(first.span.until(last.span.end).text(text).to_string())
}

/// Returns the argument of `Optional<T>` or `Swift.Optional<T>`.
fn optional_argument(run: &[Token]) -> Option<&[Token]> {
    let after_name = match run {
        [name, rest @ ..] if name.is_ident("Optional") => rest,
        [module, dot, name, rest @ ..]
            if module.is_ident("Swift") && dot.kind == TokenKind::Dot && name.is_ident("Optional") =>
        {
            rest
        }
        _ => return None,
    };
    let open = run.len() - after_name.len();
    if after_name.first()?.kind != TokenKind::LAngle {
        return None;
    }
    (matching_close(run, open)? == run.len() - 1).then(|| &run[open + 1..run.len() - 1])
}

/// Returns the contents of parentheses wrapping the whole run.
///
/// Tuple types keep their parentheses.
fn redundant_parens(run: &[Token]) -> Option<&[Token]> {
    if run.first()?.kind != TokenKind::LParen || matching_close(run, 0)? != run.len() - 1 {
        return None;
    }
    let inner = &run[1..run.len() - 1];
    let mut depth = 0usize;
    for token in inner {
        match token.kind {
            TokenKind::Comma if depth == 0 => return None,
            _ if is_opener(&token.kind) => depth += 1,
            _ if is_closer(&token.kind) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    (!inner.is_empty()).then_some(inner)
}

/// Finds the index of the delimiter closing the one at `open`.
fn matching_close(run: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in run.iter().enumerate().skip(open) {
        if is_opener(&token.kind) {
            depth += 1;
        } else if is_closer(&token.kind) {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

fn has_top_level_arrow(run: &[Token]) -> bool {
    let mut depth = 0usize;
    for token in run {
        match token.kind {
            TokenKind::Arrow if depth == 0 => return true,
            _ if is_opener(&token.kind) => depth += 1,
            _ if is_closer(&token.kind) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

fn is_opener(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace | TokenKind::LAngle
    )
}

fn is_closer(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace | TokenKind::RAngle
    )
}
