//! Persisting a session's layouts into the shared log pair.
//!
//! [`overwrite`] assumes it owns the output path and rewrites both logs.
//! [`merge`] cooperates with other sessions on the same path: under the
//! exclusive lock it reads the names already persisted, diffs the session's
//! names against them, and appends only what is missing. Mixing both modes on
//! one path is unsupported.

mod lock;
mod paths;

use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

pub use lock::LogLock;
use lock::ensure_parent;
pub use paths::LogPaths;

use crate::{
    emit::{self, View},
    error::{Error, Result},
    table::LayoutEntry,
};

/// Counts from a concurrent merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Names found in the list log when the lock was taken.
    pub existing: usize,
    /// Entries appended by this merge.
    pub appended: usize,
}

/// Truncate both logs and write every entry, in slice order.
pub fn overwrite(entries: &[LayoutEntry], paths: &LogPaths) -> Result<()> {
    let mut list = create(&paths.list)?;
    let mut layout = create(&paths.layout)?;

    emit::write_view(&mut list, entries, View::Names)
        .map_err(|e| Error::write(&paths.list, e))?;
    emit::write_view(&mut layout, entries, View::Full)
        .map_err(|e| Error::write(&paths.layout, e))?;

    tracing::debug!(
        list = %paths.list.display(),
        entries = entries.len(),
        "Wrote layout logs"
    );
    Ok(())
}

/// Append the entries whose names are not yet in the list log.
///
/// Runs entirely under the exclusive lock on `paths.lock`, which is released
/// on every return path. New entries are appended in sorted name order. Layout
/// blocks are written and synced before their names, so a failure part way
/// leaves at worst blocks whose names are missing from the list log. Both logs
/// are opened before anything is written.
pub fn merge(entries: &[LayoutEntry], paths: &LogPaths) -> Result<MergeStats> {
    let _lock = LogLock::acquire(&paths.lock)?;

    let mut existing = read_names(&paths.list)?;
    existing.sort_unstable();

    let mut calculated: Vec<&LayoutEntry> = entries.iter().collect();
    calculated.sort_unstable_by(|a, b| a.name.cmp(&b.name));

    let fresh = sorted_difference(&calculated, &existing);
    let stats = MergeStats {
        existing: existing.len(),
        appended: fresh.len(),
    };

    if !fresh.is_empty() {
        let mut layout = open_append(&paths.layout)?;
        let mut list = open_append(&paths.list)?;
        write_ahead(&fresh, (&paths.layout, &mut layout), (&paths.list, &mut list))?;
    }

    tracing::debug!(
        list = %paths.list.display(),
        existing = stats.existing,
        appended = stats.appended,
        "Merged layout logs"
    );
    Ok(stats)
}

/// Read the names persisted in a list log. A missing file has no names.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(Box::new(Error::ReadNames {
            path: path.to_path_buf(),
            source,
        })),
    }
}

/// Entries of `calculated` whose names are absent from `existing`.
///
/// Both inputs must be sorted by name.
fn sorted_difference<'a>(
    calculated: &[&'a LayoutEntry],
    existing: &[String],
) -> Vec<&'a LayoutEntry> {
    let mut existing = existing.iter().peekable();
    let mut fresh = Vec::new();

    for &entry in calculated {
        while existing
            .next_if(|name| name.as_str() < entry.name.as_str())
            .is_some()
        {}
        if existing.peek().is_some_and(|name| **name == entry.name) {
            continue;
        }
        fresh.push(entry);
    }
    fresh
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    ensure_parent(path).map_err(|e| Error::open_output(path, e))?;
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::open_output(path, e))
}

/// A log file whose appended bytes can be forced to stable storage.
trait SyncLog: Write {
    fn sync(&mut self) -> io::Result<()>;
}

impl SyncLog for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

fn open_append(path: &Path) -> Result<File> {
    ensure_parent(path).map_err(|e| Error::open_output(path, e))?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::open_output(path, e))
}

/// Append `fresh` as layout blocks, sync, then append their names.
fn write_ahead<L, N>(
    fresh: &[&LayoutEntry],
    (layout_path, layout): (&Path, &mut L),
    (list_path, list): (&Path, &mut N),
) -> Result<()>
where
    L: SyncLog,
    N: SyncLog,
{
    append_all(layout_path, layout, fresh, emit::write_block)?;
    append_all(list_path, list, fresh, emit::write_name)
}

fn append_all<'o, W, F>(path: &Path, out: &'o mut W, entries: &[&LayoutEntry], mut write: F) -> Result<()>
where
    W: SyncLog,
    F: FnMut(&mut BufWriter<&'o mut W>, &LayoutEntry) -> io::Result<()>,
{
    let mut buf = BufWriter::new(out);
    for &entry in entries {
        write(&mut buf, entry).map_err(|e| Error::append(path, e))?;
    }
    let out = buf
        .into_inner()
        .map_err(|e| Error::append(path, e.into_error()))?;
    out.sync().map_err(|e| Error::append(path, e))
}
