//! Localized diagnostics for failed expansions.
//!
//! Every failure the classifier can raise is a [`DiagnosticKind`] carrying an
//! English and a Chinese message. A [`Diagnostic`] pins one of them, chosen
//! when the diagnostic is created.

use chainable_syntax::Span;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::locale::{Locale, LocaleEnvironment, resolve_locale};

/// Reasons an annotated declaration cannot be expanded.
///
/// `Display` gives the English message from [`DiagnosticKind::english`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticKind {
    /// Neither a closure property nor a method.
    #[error("{}", self.english())]
    WrongDeclarationKind,
    /// More than one binding in one property declaration.
    #[error("{}", self.english())]
    MultipleBindings,
    /// The binding is a tuple or wildcard pattern.
    #[error("{}", self.english())]
    MissingIdentifierPattern,
    /// Declared with `let`.
    #[error("{}", self.english())]
    NotMutableBinding,
    /// No declared type.
    #[error("{}", self.english())]
    MissingTypeAnnotation,
    /// The declared type is not a function type.
    #[error("{}", self.english())]
    NotClosureType,
    /// The property name is empty.
    #[error("{}", self.english())]
    EmptyIdentifierName,
    /// A method requirement without a body.
    #[error("{}", self.english())]
    MissingBody,
    /// A method that returns something other than `Void`.
    #[error("{}", self.english())]
    NonVoidReturn,
}

impl DiagnosticKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::WrongDeclarationKind,
        Self::MultipleBindings,
        Self::MissingIdentifierPattern,
        Self::NotMutableBinding,
        Self::MissingTypeAnnotation,
        Self::NotClosureType,
        Self::EmptyIdentifierName,
        Self::MissingBody,
        Self::NonVoidReturn,
    ];

    /// Returns the English message.
    #[must_use]
    pub const fn english(self) -> &'static str {
        match self {
            Self::WrongDeclarationKind => {
                "can only be attached to a closure property or a method without a return value"
            }
            Self::MultipleBindings => "property must declare exactly one binding",
            Self::MissingIdentifierPattern => "property must be bound to a single name",
            Self::NotMutableBinding => "property must be declared with 'var'",
            Self::MissingTypeAnnotation => "property must have an explicit type annotation",
            Self::NotClosureType => {
                "property type must be a closure type, such as '(() -> Void)?'"
            }
            Self::EmptyIdentifierName => "property name must not be empty",
            Self::MissingBody => "method must have a body",
            Self::NonVoidReturn => "method must not return a value",
        }
    }

    /// Returns the Chinese message.
    #[must_use]
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::WrongDeclarationKind => "只能用于闭包属性或没有返回值的方法",
            Self::MultipleBindings => "属性声明只能包含一个绑定",
            Self::MissingIdentifierPattern => "属性必须绑定到单个名称",
            Self::NotMutableBinding => "属性必须使用 'var' 声明",
            Self::MissingTypeAnnotation => "属性必须显式标注类型",
            Self::NotClosureType => "属性类型必须是闭包类型，例如 '(() -> Void)?'",
            Self::EmptyIdentifierName => "属性名称不能为空",
            Self::MissingBody => "方法必须有实现体",
            Self::NonVoidReturn => "方法不能有返回值",
        }
    }

    /// Returns the message for `locale`.
    #[must_use]
    pub const fn message(self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.english(),
            Locale::Chinese => self.chinese(),
        }
    }
}

/// A failed expansion, anchored at the annotated declaration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[error("{message}")]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Span of the annotated declaration.
    pub span: Span,
    /// Locale of `message`.
    pub locale: Locale,
    message: &'static str,
}

impl Diagnostic {
    /// Creates a diagnostic, resolving its locale from `env` now.
    #[must_use]
    pub fn report(kind: DiagnosticKind, span: Span, env: &impl LocaleEnvironment) -> Self {
        Self::with_locale(kind, span, resolve_locale(env, Locale::Chinese))
    }

    /// Creates a diagnostic in a fixed locale.
    #[must_use]
    pub const fn with_locale(kind: DiagnosticKind, span: Span, locale: Locale) -> Self {
        Self {
            kind,
            span,
            locale,
            message: kind.message(locale),
        }
    }

    /// Returns the selected message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// Returns the message in the other locale.
    #[must_use]
    pub const fn alternate_message(&self) -> &'static str {
        match self.locale {
            Locale::English => self.kind.chinese(),
            Locale::Chinese => self.kind.english(),
        }
    }
}
