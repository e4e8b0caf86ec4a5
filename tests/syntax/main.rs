//! Integration tests for Layer 0: Syntax
//!
//! Tests for the lexer, parser, and declaration tree.

mod lexer;
mod parser;
