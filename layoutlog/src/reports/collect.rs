//! Collect command report data structures.

use layoutlog_core::{Finalized, SessionStats};

use super::output::{Output, Report};

/// Report data from one collect session.
#[derive(Debug)]
pub struct CollectReport {
    /// Number of dump inputs read.
    pub inputs: usize,
    /// Records found across all inputs.
    pub records: usize,
    /// Qualified name filter in effect; empty for none.
    pub filter: String,
    /// What the session did with them.
    pub stats: SessionStats,
    /// What finalization wrote.
    pub finalized: Finalized,
}

impl Report for CollectReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Session");
        out.key_value_indented("inputs", &self.inputs.to_string());
        out.key_value_indented("records", &self.records.to_string());
        if !self.filter.is_empty() {
            out.key_value_indented("filter", &self.filter);
        }
        out.key_value_indented("recorded", &self.stats.recorded.to_string());
        out.key_value_indented("duplicates", &self.stats.duplicates.to_string());
        out.key_value_indented("filtered", &self.stats.filtered.to_string());
        out.key_value_indented("ineligible", &self.stats.ineligible.to_string());

        match &self.finalized {
            Finalized::Emitted { entries } => {
                out.key_value("Dumped", &format!("{} layouts", entries));
            }
            Finalized::Overwritten { paths, entries } => {
                out.section("Wrote");
                out.key_value_indented("names", &paths.list.display().to_string());
                out.key_value_indented("layouts", &paths.layout.display().to_string());
                out.key_value_indented("entries", &entries.to_string());
            }
            Finalized::Merged { paths, stats } => {
                out.section("Merged");
                out.key_value_indented("names", &paths.list.display().to_string());
                out.key_value_indented("layouts", &paths.layout.display().to_string());
                out.key_value_indented("existing", &stats.existing.to_string());
                out.key_value_indented("appended", &stats.appended.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use layoutlog_core::{LogPaths, MergeStats};

    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Output for Recorder {
        fn section(&mut self, name: &str) {
            self.0.push(format!("{}:", name));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.0.push(format!("{}: {}", key, value));
        }

        fn key_value_indented(&mut self, key: &str, value: &str) {
            self.0.push(format!("  {}: {}", key, value));
        }
    }

    #[test]
    fn test_render_merge_report() {
        let report = CollectReport {
            inputs: 2,
            records: 5,
            filter: "app::".into(),
            stats: SessionStats {
                recorded: 3,
                duplicates: 2,
                filtered: 0,
                ineligible: 0,
            },
            finalized: Finalized::Merged {
                paths: LogPaths::new("out/app"),
                stats: MergeStats {
                    existing: 10,
                    appended: 1,
                },
            },
        };

        let mut out = Recorder::default();
        report.render(&mut out);

        assert_eq!(out.0[0], "Session:");
        assert!(out.0.contains(&"  filter: app::".to_string()));
        assert!(out.0.contains(&"Merged:".to_string()));
        assert!(out.0.contains(&"  names: out/app.list.log".to_string()));
        assert!(out.0.contains(&"  appended: 1".to_string()));
    }
}
