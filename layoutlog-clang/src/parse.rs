use layoutlog_core::{BaseSpecifier, RecordDecl, TagKind};
use miette::{NamedSource, SourceSpan};

use crate::error::{Error, Result};

const DUMP_HEADER: &str = "*** Dumping";
const AST_LAYOUT_HEADER: &str = "*** Dumping AST Record Layout";
const BASE_SUFFIXES: [&str; 3] = [" (base)", " (primary base)", " (virtual base)"];

/// A record read from a layout dump, with the text clang rendered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpedRecord {
    pub decl: RecordDecl,
    pub layout: String,
}

/// Parse the output of `clang -Xclang -fdump-record-layouts`.
///
/// Every `*** Dumping AST Record Layout` block yields one record, in input
/// order. Other dump blocks and stray lines are ignored.
pub fn parse_dump(src: &str, filename: &str) -> Result<Vec<DumpedRecord>> {
    let ctx = DumpSource { src, filename };
    let mut records = Vec::new();
    let mut block: Option<Block<'_>> = None;
    let mut in_ast_block = false;

    for line in lines_with_offsets(src) {
        if line.text.starts_with(DUMP_HEADER) {
            if let Some(done) = block.take() {
                records.push(done.finish(&ctx)?);
            }
            in_ast_block = line.text.trim_end().starts_with(AST_LAYOUT_HEADER);
            if in_ast_block {
                block = Some(Block::new(line.offset, line.text.len()));
            }
            continue;
        }
        if in_ast_block {
            if let Some(block) = block.as_mut() {
                block.lines.push(line);
            }
        }
    }
    if let Some(done) = block.take() {
        records.push(done.finish(&ctx)?);
    }

    tracing::debug!(file = filename, records = records.len(), "Parsed layout dump");
    Ok(records)
}

struct DumpSource<'a> {
    src: &'a str,
    filename: &'a str,
}

impl DumpSource<'_> {
    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename, self.src.to_string())
    }

    fn missing_record(&self, span: SourceSpan) -> Box<Error> {
        Box::new(Error::MissingRecord {
            src: self.named_source(),
            span,
        })
    }

    fn unknown_kind(&self, keyword: &str, span: SourceSpan) -> Box<Error> {
        Box::new(Error::UnknownKind {
            src: self.named_source(),
            span,
            keyword: keyword.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    offset: usize,
    /// Line content including its terminator, if any.
    raw: &'a str,
    /// Line content without the terminator.
    text: &'a str,
}

impl Line<'_> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn span(&self) -> SourceSpan {
        SourceSpan::from((self.offset, self.text.len()))
    }
}

fn lines_with_offsets(src: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    src.split_inclusive('\n').map(move |raw| {
        let line = Line {
            offset,
            raw,
            text: raw.trim_end_matches(['\n', '\r']),
        };
        offset += raw.len();
        line
    })
}

struct Block<'a> {
    header: SourceSpan,
    lines: Vec<Line<'a>>,
}

impl<'a> Block<'a> {
    fn new(offset: usize, len: usize) -> Self {
        Self {
            header: SourceSpan::from((offset, len)),
            lines: Vec::new(),
        }
    }

    fn finish(self, ctx: &DumpSource<'_>) -> Result<DumpedRecord> {
        let start = self.lines.iter().position(|l| !l.is_blank());
        let end = self.lines.iter().rposition(|l| !l.is_blank());
        let (Some(start), Some(end)) = (start, end) else {
            return Err(ctx.missing_record(self.header));
        };
        let body = &self.lines[start..=end];

        let record_line = body[0];
        let mut decl = parse_record_line(&record_line, ctx)?;
        decl.bases = body[1..].iter().filter_map(parse_direct_base).collect();

        let mut layout: String = body.iter().map(|l| l.raw).collect();
        if !layout.ends_with('\n') {
            layout.push('\n');
        }

        Ok(DumpedRecord { decl, layout })
    }
}

/// Split a dump line into its offset column and its member column.
///
/// The member column keeps the single space clang prints after `|`.
fn columns(text: &str) -> Option<(&str, &str)> {
    let (offset, member) = text.split_once('|')?;
    Some((offset.trim(), member))
}

fn parse_record_line(line: &Line<'_>, ctx: &DumpSource<'_>) -> Result<RecordDecl> {
    let Some((_, member)) = columns(line.text) else {
        return Err(ctx.missing_record(line.span()));
    };
    let member = member.trim();
    let Some((keyword, name)) = member.split_once(' ') else {
        return Err(ctx.missing_record(line.span()));
    };
    let kind = TagKind::from_keyword(keyword)
        .ok_or_else(|| ctx.unknown_kind(keyword, line.span()))?;

    Ok(RecordDecl::new(kind, name.trim()))
}

/// A direct base is a depth-one member tagged with a base suffix.
fn parse_direct_base(line: &Line<'_>) -> Option<BaseSpecifier> {
    let (_, member) = columns(line.text)?;
    let indent = member.len() - member.trim_start_matches(' ').len();
    // One separator space, then two spaces per nesting level.
    if indent != 3 {
        return None;
    }

    let member = member.trim();
    let rest = BASE_SUFFIXES
        .iter()
        .find_map(|&suffix| member.strip_suffix(suffix))?;
    let (keyword, name) = rest.split_once(' ')?;
    TagKind::from_keyword(keyword)?;

    Some(BaseSpecifier::resolved(name.trim()))
}
