//! Integration tests for Layer 2: Entity
//!
//! Tests for script loading, inheritance resolution, custom collaborators,
//! and spawn planning.

mod common;
mod inheritance;
mod spawning;
