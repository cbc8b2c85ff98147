use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for dump parsing (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("record layout block has no record line")]
    #[diagnostic(
        code(layoutlog::dump::missing_record),
        help("expected a line like `0 | struct ns::Name` after the header")
    )]
    MissingRecord {
        #[source_code]
        src: NamedSource<String>,
        #[label("block starts here")]
        span: SourceSpan,
    },

    #[error("unrecognized record kind '{keyword}'")]
    #[diagnostic(code(layoutlog::dump::unknown_kind))]
    UnknownKind {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected struct, class or union")]
        span: SourceSpan,
        keyword: String,
    },
}
