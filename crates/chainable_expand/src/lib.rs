//! Builder-method synthesis for annotated declarations.
//!
//! Given a member marked `@Chainable` (a `var` holding an optional closure, or
//! a method with no return value), this crate generates a method of the same
//! name that assigns the closure or re-invokes the method, then returns the
//! owning value so calls can be chained.
//!
//! This crate provides:
//! - [`classify`] - Declaration Classifier
//! - [`scan`] - Ancestor Scanner (owner kind and visibility)
//! - [`reconstruct`] - Signature Reconstructor
//! - [`synthesize`] - Body Synthesizer
//! - [`Diagnostic`] - Localized failures
//! - [`resolve_locale`] - Locale Resolver
//! - [`Expander`] - Expansion Driver
//! - [`expand_source`] - Splicing generated methods back into source text
//!
//! # Example
//!
//! ```
//! use chainable_expand::Expander;
//! use chainable_syntax::parse;
//!
//! let tree = parse("struct Button {\n    @Chainable var onTap: (() -> Void)?\n}").unwrap();
//! let id = tree.find_named("onTap").unwrap();
//! let method = Expander::new().expand(&tree, id).unwrap();
//! assert!(method.to_string().contains("func onTap(_ onTap: @escaping () -> Void) -> Self"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod body;
pub mod classify;
pub mod config;
pub mod diagnostic;
pub mod expander;
pub mod locale;
pub mod method;
pub mod scope;
pub mod signature;
pub mod splice;


pub use body::{Argument, Statement, synthesize};
pub use classify::{AnnotatedDeclaration, ClosureProperty, EffectfulProcedure, classify};
pub use config::ExpansionConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use expander::{Expander, Expansion};
pub use locale::{Locale, LocaleEnvironment, ProcessEnvironment, StaticEnvironment, resolve_locale};
pub use method::SynthesizedMethod;
pub use scope::{EnclosingContext, OwnerKind, scan};
pub use signature::{MethodHeader, reconstruct};
pub use splice::{ExpandedSource, expand_source};
