//! Core operations.
//!
//! This module contains the business logic for layoutlog commands,
//! separated from CLI argument parsing and output rendering.

pub mod collect;

pub use collect::collect;
