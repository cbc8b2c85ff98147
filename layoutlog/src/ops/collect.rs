//! Collect operation - one session over parsed layout dumps.

use std::io::Write;

use layoutlog_clang::DumpedRecord;
use layoutlog_core::{Options, RecordDecl, Result, Session};

use crate::reports::CollectReport;

/// Options for the collect operation.
pub struct CollectOptions {
    /// Number of inputs the records were read from.
    pub inputs: usize,
}

/// Execute the collect operation.
///
/// Observes every record, then finalizes the session. `sink` receives the
/// layouts in direct mode.
pub fn collect(
    records: &[DumpedRecord],
    options: Options,
    opts: CollectOptions,
    sink: &mut dyn Write,
) -> Result<CollectReport> {
    let mut session = Session::new(options);

    for record in records {
        session.observe(&record.decl, &|_: &RecordDecl| record.layout.clone());
    }

    let stats = session.stats();
    let filter = session.options().filter.clone();
    let finalized = session.finalize(sink)?;

    Ok(CollectReport {
        inputs: opts.inputs,
        records: records.len(),
        filter,
        stats,
        finalized,
    })
}

#[cfg(test)]
mod tests {
    use layoutlog_clang::parse_dump;
    use layoutlog_core::{Finalized, LogPaths};
    use tempfile::TempDir;

    use super::*;

    const DUMP: &str = "
*** Dumping AST Record Layout
         0 | struct app::Config
         0 |   int level
           | [sizeof=4, dsize=4, align=4,
           |  nvsize=4, nvalign=4]

*** Dumping AST Record Layout
         0 | struct app::Config
         0 |   int level
           | [sizeof=4, dsize=4, align=4,
           |  nvsize=4, nvalign=4]
";

    fn records() -> Vec<DumpedRecord> {
        parse_dump(DUMP, "dump.txt").unwrap()
    }

    #[test]
    fn test_collect_direct() {
        let mut out = Vec::new();
        let report = collect(
            &records(),
            Options::default(),
            CollectOptions { inputs: 1 },
            &mut out,
        )
        .unwrap();

        assert_eq!(report.records, 2);
        assert_eq!(report.stats.recorded, 1);
        assert_eq!(report.stats.duplicates, 1);
        assert_eq!(report.finalized, Finalized::Emitted { entries: 1 });
        assert!(
            String::from_utf8(out)
                .unwrap()
                .starts_with("------ Record Decl: app::Config\n")
        );
    }

    #[test]
    fn test_collect_reports_filter() {
        let options = Options {
            filter: "other::".into(),
            ..Options::default()
        };
        let report = collect(
            &records(),
            options,
            CollectOptions { inputs: 1 },
            &mut std::io::sink(),
        )
        .unwrap();

        assert_eq!(report.filter, "other::");
        assert_eq!(report.stats.filtered, 2);
        assert_eq!(report.finalized, Finalized::Emitted { entries: 0 });
    }

    #[test]
    fn test_collect_concurrent_twice() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("layouts");
        let options = Options {
            output: Some(base.clone()),
            concurrent: true,
            ..Options::default()
        };

        for _ in 0..2 {
            collect(
                &records(),
                options.clone(),
                CollectOptions { inputs: 1 },
                &mut std::io::sink(),
            )
            .unwrap();
        }

        let paths = LogPaths::new(&base);
        assert_eq!(std::fs::read_to_string(&paths.list).unwrap(), "app::Config\n");
    }
}
