//! Text views over recorded layouts.

use std::io::{self, Write};

use crate::table::LayoutEntry;

/// Prefix of the line that opens each block of the full view.
pub const SEPARATOR: &str = "------ Record Decl: ";

/// How entries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// One qualified name per line.
    Names,
    /// Separator line plus the verbatim layout text, per entry.
    Full,
}

/// Write `entries` in the given view, in slice order.
pub fn write_view<W: Write + ?Sized>(
    out: &mut W,
    entries: &[LayoutEntry],
    view: View,
) -> io::Result<()> {
    for entry in entries {
        match view {
            View::Names => write_name(out, entry)?,
            View::Full => write_block(out, entry)?,
        }
    }
    out.flush()
}

/// Render `entries` to a string in the given view.
pub fn render_view(entries: &[LayoutEntry], view: View) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_view(&mut buf, entries, view);
    String::from_utf8_lossy(&buf).into_owned()
}

pub(crate) fn write_name<W: Write + ?Sized>(out: &mut W, entry: &LayoutEntry) -> io::Result<()> {
    writeln!(out, "{}", entry.name)
}

/// A block always ends with a newline so the next separator starts a line.
pub(crate) fn write_block<W: Write + ?Sized>(out: &mut W, entry: &LayoutEntry) -> io::Result<()> {
    writeln!(out, "{}{}", SEPARATOR, entry.name)?;
    out.write_all(entry.layout.as_bytes())?;
    if !entry.layout.is_empty() && !entry.layout.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<LayoutEntry> {
        vec![
            LayoutEntry::new("A::B", "         0 | struct A::B\n           | [sizeof=1]\n"),
            LayoutEntry::new("C::D", "         0 | struct C::D\n           | [sizeof=4]\n"),
        ]
    }

    #[test]
    fn test_names_view() {
        insta::assert_snapshot!(render_view(&sample(), View::Names), @r"
        A::B
        C::D
        ");
    }

    #[test]
    fn test_full_view() {
        insta::assert_snapshot!(render_view(&sample(), View::Full), @r"
        ------ Record Decl: A::B
                 0 | struct A::B
                   | [sizeof=1]
        ------ Record Decl: C::D
                 0 | struct C::D
                   | [sizeof=4]
        ");
    }

    #[test]
    fn test_full_view_keeps_layout_verbatim() {
        let entries = vec![LayoutEntry::new("A::B", "L1\n"), LayoutEntry::new("C::D", "L2\n")];
        let out = render_view(&entries, View::Full);

        assert_eq!(out.matches(SEPARATOR).count(), 2);
        assert_eq!(out, "------ Record Decl: A::B\nL1\n------ Record Decl: C::D\nL2\n");
    }

    #[test]
    fn test_block_terminates_unterminated_layout() {
        let entries = vec![LayoutEntry::new("A", "no newline"), LayoutEntry::new("B", "")];
        let out = render_view(&entries, View::Full);
        assert_eq!(out, "------ Record Decl: A\nno newline\n------ Record Decl: B\n");
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert!(render_view(&[], View::Full).is_empty());
        assert!(render_view(&[], View::Names).is_empty());
    }
}
