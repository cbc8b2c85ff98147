//! Plugin option parsing.
//!
//! The host forwards a flat list of tokens (`--filter=foo`, `--concurrent`, ...).
//! Tokens are order independent, except that `--help` short-circuits
//! everything else. Unrecognized tokens are ignored.

use std::path::{Path, PathBuf};

const FILTER_PREFIX: &str = "--filter=";
const OUTPUT_PREFIX: &str = "--output=";

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
layoutlog, dumps the memory layout of C/C++ classes and structs.
Options:
    --verbose           Dump detailed information when running.
    --help              Print this help message.
    --filter=[string]   Only dump the layout of class/struct whose qualified name has [string].
    --output=[path]     Write [path].list.log and [path].layout.log instead of dumping to stderr.
    --concurrent        Merge into the --output logs under a file lock, skipping names already recorded.
";

/// Parsed session options. Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Echo tokens and parsed values to the diagnostic stream.
    pub verbose: bool,
    /// Qualified name substring filter. Empty means no filtering.
    pub filter: String,
    /// Base path of the log files; `None` selects direct emission.
    pub output: Option<PathBuf>,
    /// Merge into existing logs under a lock instead of overwriting them.
    pub concurrent: bool,
}

/// Outcome of parsing a token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedArgs {
    /// `--help` was requested; the session must not run.
    Help,
    /// Options for a session.
    Run(Options),
}

/// Where a session's table goes at teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission<'a> {
    /// Render the full view to the provided sink.
    Direct,
    /// Truncate and rewrite the log pair at this base path.
    Overwrite(&'a Path),
    /// Merge into the log pair at this base path under the lock.
    Merge(&'a Path),
}

impl Options {
    /// Parse plugin tokens.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> ParsedArgs {
        let mut options = Options::default();

        for arg in args {
            match arg.as_ref() {
                "--help" => return ParsedArgs::Help,
                "--verbose" => options.verbose = true,
                "--concurrent" => options.concurrent = true,
                _ => {}
            }
        }

        for arg in args {
            let arg = arg.as_ref();
            if let Some(filter) = arg.strip_prefix(FILTER_PREFIX) {
                options.filter = filter.to_string();
            } else if let Some(output) = arg.strip_prefix(OUTPUT_PREFIX) {
                options.output = (!output.is_empty()).then(|| PathBuf::from(output));
            }
        }

        ParsedArgs::Run(options)
    }

    /// Select the teardown path for these options.
    ///
    /// `concurrent` only matters together with an output path.
    pub fn emission(&self) -> Emission<'_> {
        match (&self.output, self.concurrent) {
            (None, _) => Emission::Direct,
            (Some(path), false) => Emission::Overwrite(path),
            (Some(path), true) => Emission::Merge(path),
        }
    }

    /// Echo the raw tokens and the parsed values when verbose.
    pub fn trace_args<S: AsRef<str>>(&self, args: &[S]) {
        if !self.verbose {
            return;
        }
        for arg in args {
            tracing::debug!("Arg: {}", arg.as_ref());
        }
        if !self.filter.is_empty() {
            tracing::debug!("Qualified name filter is {}", self.filter);
        }
        match self.emission() {
            Emission::Direct => tracing::debug!("Dumping layouts to the diagnostic stream"),
            Emission::Overwrite(path) => {
                tracing::debug!(path = %path.display(), "Overwriting layout logs")
            }
            Emission::Merge(path) => {
                tracing::debug!(path = %path.display(), "Merging into layout logs under lock")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Options {
        match Options::parse(args) {
            ParsedArgs::Run(options) => options,
            ParsedArgs::Help => panic!("unexpected --help"),
        }
    }

    #[test]
    fn test_defaults() {
        let options = run(&[]);
        assert_eq!(options, Options::default());
        assert_eq!(options.emission(), Emission::Direct);
    }

    #[test]
    fn test_help_short_circuits() {
        assert_eq!(
            Options::parse(&["--verbose", "--filter=x", "--help"]),
            ParsedArgs::Help
        );
    }

    #[test]
    fn test_all_options() {
        let options = run(&["--concurrent", "--output=out/layouts", "--filter=ns::", "--verbose"]);
        assert!(options.verbose);
        assert!(options.concurrent);
        assert_eq!(options.filter, "ns::");
        assert_eq!(options.output, Some(PathBuf::from("out/layouts")));
        assert_eq!(options.emission(), Emission::Merge(Path::new("out/layouts")));
    }

    #[test]
    fn test_output_without_concurrent_overwrites() {
        let options = run(&["--output=logs"]);
        assert_eq!(options.emission(), Emission::Overwrite(Path::new("logs")));
    }

    #[test]
    fn test_concurrent_without_output_is_direct() {
        let options = run(&["--concurrent"]);
        assert_eq!(options.emission(), Emission::Direct);
    }

    #[test]
    fn test_empty_values() {
        let options = run(&["--filter=", "--output="]);
        assert!(options.filter.is_empty());
        assert_eq!(options.output, None);
    }

    #[test]
    fn test_last_value_wins_and_unknown_ignored() {
        let options = run(&["--filter=a", "--bogus", "--filter=b"]);
        assert_eq!(options.filter, "b");
    }
}
