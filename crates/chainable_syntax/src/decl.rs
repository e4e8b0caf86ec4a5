//! Declaration payloads stored in the syntax tree.
//!
//! Sub-trees the expansion never needs to inspect (types, default values,
//! bodies, clauses) are kept as their trimmed source text.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keywords accepted as declaration modifiers.
pub const MODIFIER_KEYWORDS: &[&str] = &[
    "open",
    "public",
    "package",
    "internal",
    "fileprivate",
    "private",
    "static",
    "class",
    "final",
    "override",
    "required",
    "convenience",
    "mutating",
    "nonmutating",
    "consuming",
    "borrowing",
    "lazy",
    "weak",
    "unowned",
    "dynamic",
    "optional",
    "indirect",
    "nonisolated",
    "distributed",
    "prefix",
    "postfix",
    "infix",
];

/// Modifiers that change how a method may mutate its receiver.
pub const MUTATION_MARKERS: &[&str] = &["mutating", "nonmutating", "consuming", "borrowing"];

/// Returns true if `word` is a declaration modifier keyword.
#[must_use]
pub fn is_modifier_keyword(word: &str) -> bool {
    MODIFIER_KEYWORDS.contains(&word)
}

// =============================================================================
// Visibility
// =============================================================================

/// Access level keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Visibility {
    /// `open`
    Open,
    /// `public`
    Public,
    /// `package`
    Package,
    /// `internal`
    Internal,
    /// `fileprivate`
    FilePrivate,
    /// `private`
    Private,
}

impl Visibility {
    /// Parses a visibility keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "open" => Some(Self::Open),
            "public" => Some(Self::Public),
            "package" => Some(Self::Package),
            "internal" => Some(Self::Internal),
            "fileprivate" => Some(Self::FilePrivate),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    /// Returns the keyword spelling.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Public => "public",
            Self::Package => "package",
            Self::Internal => "internal",
            Self::FilePrivate => "fileprivate",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// =============================================================================
// Attributes and modifiers
// =============================================================================

/// An `@attribute`, with optional parenthesized arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// Attribute name without the `@`, possibly module-qualified.
    pub name: String,
    /// Argument text between the parentheses.
    pub arguments: Option<String>,
}

impl Attribute {
    /// Creates an attribute without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }

    /// Sets the argument text.
    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    /// Returns the last path segment of the name (`Chainable` for `Kit.Chainable`).
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if let Some(arguments) = &self.arguments {
            write!(f, "({arguments})")?;
        }
        Ok(())
    }
}

/// A declaration modifier such as `public`, `mutating` or `private(set)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modifier {
    /// Modifier keyword.
    pub name: String,
    /// Parenthesized detail, as in `private(set)`.
    pub detail: Option<String>,
}

impl Modifier {
    /// Creates a modifier without detail.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: None,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the access level this modifier grants the declaration itself.
    ///
    /// Setter-only forms like `private(set)` grant none.
    #[must_use]
    pub fn visibility(&self) -> Option<Visibility> {
        if self.detail.is_some() {
            return None;
        }
        Visibility::from_keyword(&self.name)
    }

    /// Returns true for any access-level modifier, setter-only forms included.
    #[must_use]
    pub fn is_visibility(&self) -> bool {
        Visibility::from_keyword(&self.name).is_some()
    }

    /// Returns true for `mutating`, `nonmutating`, `consuming` and `borrowing`.
    #[must_use]
    pub fn is_mutation_marker(&self) -> bool {
        MUTATION_MARKERS.contains(&self.name.as_str())
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(detail) = &self.detail {
            write!(f, "({detail})")?;
        }
        Ok(())
    }
}

// =============================================================================
// Type declarations
// =============================================================================

/// The keyword introducing a type-like declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    /// `struct`
    Struct,
    /// `enum`
    Enum,
    /// `class`
    Class,
    /// `actor`
    Actor,
    /// `protocol`
    Protocol,
    /// `extension`
    Extension,
}

impl TypeKind {
    /// Parses a type declaration keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            "class" => Some(Self::Class),
            "actor" => Some(Self::Actor),
            "protocol" => Some(Self::Protocol),
            "extension" => Some(Self::Extension),
            _ => None,
        }
    }

    /// Returns the keyword spelling.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Class => "class",
            Self::Actor => "actor",
            Self::Protocol => "protocol",
            Self::Extension => "extension",
        }
    }
}

/// A `struct`, `enum`, `class`, `actor`, `protocol` or `extension`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDecl {
    /// Declaration keyword.
    pub kind: TypeKind,
    /// Declared name, or the extended type for extensions.
    pub name: String,
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Generic parameter clause, brackets included.
    pub generic_params: Option<String>,
    /// Inheritance clause text after the `:`.
    pub inheritance: Option<String>,
    /// Where-clause requirements, without the `where` keyword.
    pub where_clause: Option<String>,
}

impl TypeDecl {
    /// Creates a type declaration with no attributes or clauses.
    #[must_use]
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            attributes: Vec::new(),
            modifiers: Vec::new(),
            generic_params: None,
            inheritance: None,
            where_clause: None,
        }
    }

    /// Adds a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

// =============================================================================
// Variable declarations
// =============================================================================

/// `let` or `var`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BindingKind {
    /// Immutable binding.
    Let,
    /// Mutable binding.
    Var,
}

/// The pattern of one binding.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// A simple name.
    Identifier(String),
    /// A tuple pattern, kept as text.
    Tuple(String),
    /// `_`
    Wildcard,
}

/// One `pattern: Type = initializer` entry of a variable declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternBinding {
    /// Bound pattern.
    pub pattern: Pattern,
    /// Declared type text.
    pub type_annotation: Option<String>,
    /// Initializer expression text.
    pub initializer: Option<String>,
    /// Accessor or observer block text, braces included.
    pub accessors: Option<String>,
}

impl PatternBinding {
    /// Creates a binding for `name` with an optional type.
    #[must_use]
    pub fn named(name: impl Into<String>, type_annotation: Option<&str>) -> Self {
        Self {
            pattern: Pattern::Identifier(name.into()),
            type_annotation: type_annotation.map(str::to_string),
            initializer: None,
            accessors: None,
        }
    }
}

/// A `var` or `let` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDecl {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// `let` or `var`.
    pub binding: BindingKind,
    /// Bindings in declaration order.
    pub bindings: Vec<PatternBinding>,
}

impl VariableDecl {
    /// Creates a declaration with a single binding.
    #[must_use]
    pub fn new(binding: BindingKind, entry: PatternBinding) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            binding,
            bindings: vec![entry],
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

// =============================================================================
// Function declarations
// =============================================================================

/// One parameter of a function declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    /// First name: the argument label, or `_` for none.
    pub first_name: String,
    /// Second name: the internal name, when it differs from the label.
    pub second_name: Option<String>,
    /// Type text, without a leading `inout`.
    pub type_annotation: String,
    /// Default value text.
    pub default_value: Option<String>,
    /// Passed by reference (`inout`).
    pub is_inout: bool,
    /// Declared with a trailing `...`.
    pub is_variadic: bool,
    /// Type carries `@autoclosure`.
    pub is_autoclosure: bool,
}

impl Parameter {
    /// Creates a parameter whose label and internal name are both `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, type_annotation: impl Into<String>) -> Self {
        Self {
            first_name: name.into(),
            second_name: None,
            type_annotation: type_annotation.into(),
            default_value: None,
            is_inout: false,
            is_variadic: false,
            is_autoclosure: false,
        }
    }

    /// Creates a parameter with a distinct label (`_` for none) and internal name.
    #[must_use]
    pub fn labelled(
        label: impl Into<String>,
        name: impl Into<String>,
        type_annotation: impl Into<String>,
    ) -> Self {
        Self {
            second_name: Some(name.into()),
            ..Self::new(label, type_annotation)
        }
    }

    /// Marks the parameter `inout`.
    #[must_use]
    pub fn inout(mut self) -> Self {
        self.is_inout = true;
        self
    }

    /// Returns the argument label, or `None` for `_`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        (self.first_name != "_").then_some(self.first_name.as_str())
    }

    /// Returns the name the parameter is bound to inside the body.
    #[must_use]
    pub fn internal_name(&self) -> &str {
        self.second_name.as_deref().unwrap_or(&self.first_name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.first_name)?;
        if let Some(second) = &self.second_name {
            write!(f, " {second}")?;
        }
        f.write_str(": ")?;
        if self.is_inout {
            f.write_str("inout ")?;
        }
        f.write_str(&self.type_annotation)?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// Renders a parenthesized parameter clause.
#[must_use]
pub fn render_parameter_clause(parameters: &[Parameter]) -> String {
    let rendered: Vec<String> = parameters.iter().map(ToString::to_string).collect();
    format!("({})", rendered.join(", "))
}

/// The `async`/`throws` part of a signature.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectSpecifiers {
    /// `async` or `reasync`.
    pub async_keyword: Option<String>,
    /// `throws`, `rethrows` or a typed `throws(E)`.
    pub throws_clause: Option<String>,
}

impl EffectSpecifiers {
    /// Specifiers for an `async throws` function.
    #[must_use]
    pub fn async_throwing() -> Self {
        Self {
            async_keyword: Some("async".into()),
            throws_clause: Some("throws".into()),
        }
    }

    /// Returns true if calls must be awaited.
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.async_keyword.is_some()
    }

    /// Returns true if calls must be marked `try`.
    #[must_use]
    pub fn is_throwing(&self) -> bool {
        self.throws_clause.is_some()
    }

    /// Returns true if there are no effects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.is_async() && !self.is_throwing()
    }
}

impl fmt::Display for EffectSpecifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.async_keyword, &self.throws_clause) {
            (Some(a), Some(t)) => write!(f, "{a} {t}"),
            (Some(a), None) => f.write_str(a),
            (None, Some(t)) => f.write_str(t),
            (None, None) => Ok(()),
        }
    }
}

/// A `func` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDecl {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Function name (an identifier or operator).
    pub name: String,
    /// Generic parameter clause, brackets included.
    pub generic_params: Option<String>,
    /// Parameter clause exactly as written, parentheses included.
    pub parameter_clause: String,
    /// Parsed parameters.
    pub parameters: Vec<Parameter>,
    /// Effect specifiers.
    pub effects: EffectSpecifiers,
    /// Declared return type.
    pub return_type: Option<String>,
    /// Where-clause requirements, without the `where` keyword.
    pub where_clause: Option<String>,
    /// Body text between the braces; `None` for requirements.
    pub body: Option<String>,
}

impl FunctionDecl {
    /// Creates a function with an empty body and no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            name: name.into(),
            generic_params: None,
            parameter_clause: "()".into(),
            parameters: Vec::new(),
            effects: EffectSpecifiers::default(),
            return_type: None,
            where_clause: None,
            body: Some(String::new()),
        }
    }

    /// Sets the parameters and re-renders the parameter clause from them.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameter_clause = render_parameter_clause(&parameters);
        self.parameters = parameters;
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Sets the effect specifiers.
    #[must_use]
    pub fn with_effects(mut self, effects: EffectSpecifiers) -> Self {
        self.effects = effects;
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Sets the body text; `None` removes the body.
    #[must_use]
    pub fn with_body(mut self, body: Option<&str>) -> Self {
        self.body = body.map(str::to_string);
        self
    }

    /// Returns true if the function declares a body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

// =============================================================================
// Everything else
// =============================================================================

/// A declaration the expansion never inspects (`init`, `case`, `typealias`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OtherDecl {
    /// Introducing keyword or first token.
    pub keyword: String,
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
}

/// The payload of a tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Decl {
    /// The root of a parsed file.
    SourceFile,
    /// A type-like declaration.
    Type(TypeDecl),
    /// A `var`/`let` declaration.
    Variable(VariableDecl),
    /// A `func` declaration.
    Function(FunctionDecl),
    /// Any other declaration.
    Other(OtherDecl),
}

impl Decl {
    /// Returns the attributes of this declaration.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::SourceFile => &[],
            Self::Type(decl) => &decl.attributes,
            Self::Variable(decl) => &decl.attributes,
            Self::Function(decl) => &decl.attributes,
            Self::Other(decl) => &decl.attributes,
        }
    }

    /// Returns the modifiers of this declaration.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            Self::SourceFile => &[],
            Self::Type(decl) => &decl.modifiers,
            Self::Variable(decl) => &decl.modifiers,
            Self::Function(decl) => &decl.modifiers,
            Self::Other(decl) => &decl.modifiers,
        }
    }

    /// Returns true if an attribute with base name `name` is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.base_name() == name)
    }

    /// Returns the declared name, if the declaration has a single one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Type(decl) => Some(&decl.name),
            Self::Function(decl) => Some(&decl.name),
            Self::Variable(decl) => match decl.bindings.as_slice() {
                [PatternBinding {
                    pattern: Pattern::Identifier(name),
                    ..
                }] => Some(name),
                _ => None,
            },
            Self::SourceFile | Self::Other(_) => None,
        }
    }

    /// Returns a short description of the declaration kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::SourceFile => "source file",
            Self::Type(decl) => decl.kind.keyword(),
            Self::Variable(decl) => match decl.binding {
                BindingKind::Let => "let",
                BindingKind::Var => "var",
            },
            Self::Function(_) => "func",
            Self::Other(_) => "declaration",
        }
    }
}
