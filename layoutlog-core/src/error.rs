use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for layoutlog-core operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to open '{path}' for writing")]
    #[diagnostic(
        code(layoutlog::open_output),
        help("check that the --output directory exists and is writable")
    )]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open lock file '{path}'")]
    #[diagnostic(code(layoutlog::open_lock))]
    OpenLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to acquire exclusive lock on '{path}'")]
    #[diagnostic(code(layoutlog::lock))]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read existing name list '{path}'")]
    #[diagnostic(code(layoutlog::read_names))]
    ReadNames {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(layoutlog::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to '{path}'")]
    #[diagnostic(
        code(layoutlog::append),
        help(
            "layout blocks are appended before their names; the layout log may now hold blocks whose names are missing from the list log"
        )
    )]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to emit layouts")]
    #[diagnostic(code(layoutlog::emit))]
    Emit {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn open_output(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::OpenOutput {
            path: path.into(),
            source,
        })
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Write {
            path: path.into(),
            source,
        })
    }

    pub(crate) fn append(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Append {
            path: path.into(),
            source,
        })
    }
}
