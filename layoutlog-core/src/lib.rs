//! Layout collection and persistence for layoutlog.
//!
//! A [`Session`] gathers the rendered layout of every record type the host
//! compiler defines into a [`LayoutTable`], deduplicated by qualified name.
//! At the end of the session the table is either dumped to a stream or
//! persisted into a pair of log files, optionally merged under a file lock so
//! that parallel compiler invocations can share one output path.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod emit;
mod error;
pub mod merge;
mod options;
mod record;
mod session;
mod table;

pub use emit::{SEPARATOR, View};
pub use error::{Error, Result};
pub use merge::{LogLock, LogPaths, MergeStats};
pub use options::{Emission, Options, ParsedArgs, USAGE};
pub use record::{BaseSpecifier, LayoutRenderer, RecordDecl, TagKind};
pub use session::{Finalized, Observation, Session, SessionStats, finalize};
pub use table::{LayoutEntry, LayoutTable, RecordOutcome};
