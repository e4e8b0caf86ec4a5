//! Integration tests for Layer 1: Expand
//!
//! Tests for classification, context scanning, synthesis, and diagnostics.

mod classify;
mod diagnostics;
mod synthesis;
