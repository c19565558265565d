//! Quill - Entity script templates resolved through a tag-expression engine
//!
//! This crate re-exports all layers of the Quill system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: quill_entity     - Scripts, inheritance resolution, spawn planning
//! Layer 1: quill_tags       - Argument compiler, tag chains, tag handlers
//! Layer 0: quill_foundation - Core types (Value, Type, Error, collections)
//! ```

pub use quill_entity as entity;
pub use quill_foundation as foundation;
pub use quill_tags as tags;
