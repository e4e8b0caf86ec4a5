//! Cross-layer integration tests for Chainable
//!
//! Tests that run sources through parsing, expansion and splicing together.

mod scenarios;
mod splicing;
