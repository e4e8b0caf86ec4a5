//! Chainable - builder-method synthesis for annotated declarations
//!
//! This crate re-exports all layers of the Chainable system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: chainable_expand  - Classification, scanning, synthesis, diagnostics
//! Layer 0: chainable_syntax  - Lexer, parser, declaration tree
//! ```

pub use chainable_expand as expand;
pub use chainable_syntax as syntax;
