//! Host boundary types.
//!
//! The compiler front end describes each defined record with a [`RecordDecl`]
//! and renders layouts on demand through a [`LayoutRenderer`].

use std::fmt;

/// Tag kind of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Struct,
    Class,
    Union,
}

impl TagKind {
    /// Keyword spelling of the tag kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Class => "class",
            Self::Union => "union",
        }
    }

    /// Parse a tag keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "struct" => Some(Self::Struct),
            "class" => Some(Self::Class),
            "union" => Some(Self::Union),
            _ => None,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direct base class of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseSpecifier {
    /// Base resolves to a complete record.
    Resolved { name: String },
    /// Dependent or incomplete base with no record behind it.
    Unresolved,
}

impl BaseSpecifier {
    pub fn resolved(name: impl Into<String>) -> Self {
        Self::Resolved { name: name.into() }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// A record type definition as seen by the host compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecl {
    pub kind: TagKind,
    pub qualified_name: String,
    pub bases: Vec<BaseSpecifier>,
}

impl RecordDecl {
    pub fn new(kind: TagKind, qualified_name: impl Into<String>) -> Self {
        Self {
            kind,
            qualified_name: qualified_name.into(),
            bases: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: BaseSpecifier) -> Self {
        self.bases.push(base);
        self
    }

    /// Whether the record can be laid out and persisted.
    ///
    /// Records with an unresolved base cannot be laid out, and names must fit
    /// on one line of the list log and read back unchanged.
    pub fn is_eligible(&self) -> bool {
        !self.qualified_name.is_empty()
            && !self.qualified_name.contains(['\n', '\r'])
            && self.bases.iter().all(BaseSpecifier::is_resolved)
    }
}

/// Renders the layout text of a record.
///
/// Implemented for any `Fn(&RecordDecl) -> String`, so tests and front ends
/// can pass closures.
pub trait LayoutRenderer {
    fn render(&self, record: &RecordDecl) -> String;
}

impl<F> LayoutRenderer for F
where
    F: Fn(&RecordDecl) -> String,
{
    fn render(&self, record: &RecordDecl) -> String {
        self(record)
    }
}
