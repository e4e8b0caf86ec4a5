//! Lexer, parser, and declaration tree for Chainable host sources.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of host source text
//! - [`Parser`] - Parsing tokens into a [`SyntaxTree`] of declarations
//! - [`Decl`] - Declaration payloads (types, variables, functions)
//! - [`Span`] - Source locations for diagnostics
//! - [`Error`] - Parse and tree access errors
//!
//! # Architecture
//!
//! ```text
//! "struct Button { @Chainable var onTap: (() -> Void)? }"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     LEXER       │  → [Ident(struct), Ident(Button), LBrace, At, ...]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     PARSER      │  → Type(Button) ─► Variable(onTap)
//! └─────────────────┘
//! ```
//!
//! Only declarations are modelled. Types, initializers and bodies are kept
//! as their source text.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decl;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;
pub mod tree;


pub use decl::{
    Attribute, BindingKind, Decl, EffectSpecifiers, FunctionDecl, Modifier, OtherDecl, Parameter,
    Pattern, PatternBinding, TypeDecl, TypeKind, VariableDecl, Visibility,
    render_parameter_clause,
};
pub use error::{Error, ErrorKind, Result};
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tree::{Ancestors, Node, NodeId, SyntaxTree};
