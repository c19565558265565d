//! Integration tests for Layer 1: Tags
//!
//! Tests for argument compilation, chain resolution, the core handlers, and
//! custom handler registration.

mod arguments;
