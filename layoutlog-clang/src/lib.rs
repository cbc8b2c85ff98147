//! Reader for clang record-layout dumps.
//!
//! clang prints every record layout it computes when run with
//! `-Xclang -fdump-record-layouts`. This crate turns that text back into
//! [`RecordDecl`](layoutlog_core::RecordDecl)s plus their rendered layout, so a
//! layoutlog session can be fed without linking against the compiler.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod parse;

pub use error::{Error, Result};
pub use parse::{DumpedRecord, parse_dump};
