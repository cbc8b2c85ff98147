//! One processing session: observe records, then finalize once.

use std::io::Write;

use crate::{
    emit::{self, View},
    error::{Error, Result},
    merge::{self, LogPaths, MergeStats},
    options::{Emission, Options},
    record::{LayoutRenderer, RecordDecl},
    table::{LayoutTable, RecordOutcome},
};

/// What happened to an observed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Recorded,
    Duplicate,
    Filtered,
    /// Record shape the table must never see (unresolved base, bad name).
    Ineligible,
}

/// Per-session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub recorded: usize,
    pub duplicates: usize,
    pub filtered: usize,
    pub ineligible: usize,
}

/// What finalization wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finalized {
    /// Full view written to the provided sink.
    Emitted { entries: usize },
    /// Both logs truncated and rewritten.
    Overwritten { paths: LogPaths, entries: usize },
    /// New entries merged into the shared logs.
    Merged { paths: LogPaths, stats: MergeStats },
}

/// Owns the options and layout table for one compilation input.
#[derive(Debug)]
pub struct Session {
    options: Options,
    table: LayoutTable,
    stats: SessionStats,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            table: LayoutTable::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn table(&self) -> &LayoutTable {
        &self.table
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Record a defined type, rendering its layout only if it is new.
    pub fn observe(&mut self, record: &RecordDecl, renderer: &dyn LayoutRenderer) -> Observation {
        if !record.is_eligible() {
            tracing::trace!(name = %record.qualified_name, "Skipping ineligible record");
            self.stats.ineligible += 1;
            return Observation::Ineligible;
        }

        let outcome = self
            .table
            .record_if_new(&record.qualified_name, &self.options.filter, || {
                renderer.render(record)
            });

        match outcome {
            RecordOutcome::Inserted => {
                self.stats.recorded += 1;
                Observation::Recorded
            }
            RecordOutcome::Duplicate => {
                self.stats.duplicates += 1;
                Observation::Duplicate
            }
            RecordOutcome::Filtered => {
                self.stats.filtered += 1;
                Observation::Filtered
            }
        }
    }

    /// End the session, handing the table to the selected emission path.
    pub fn finalize(self, sink: &mut dyn Write) -> Result<Finalized> {
        finalize(self.table, &self.options, sink)
    }
}

/// Consume `table` through the emission path selected by `options`.
///
/// `sink` is only written in direct mode.
pub fn finalize(table: LayoutTable, options: &Options, sink: &mut dyn Write) -> Result<Finalized> {
    let entries = table.drain();

    match options.emission() {
        Emission::Direct => {
            emit::write_view(sink, &entries, View::Full)
                .map_err(|source| Box::new(Error::Emit { source }))?;
            Ok(Finalized::Emitted {
                entries: entries.len(),
            })
        }
        Emission::Overwrite(base) => {
            let paths = LogPaths::new(base);
            merge::overwrite(&entries, &paths)?;
            Ok(Finalized::Overwritten {
                paths,
                entries: entries.len(),
            })
        }
        Emission::Merge(base) => {
            let paths = LogPaths::new(base);
            let stats = merge::merge(&entries, &paths)?;
            Ok(Finalized::Merged { paths, stats })
        }
    }
}
