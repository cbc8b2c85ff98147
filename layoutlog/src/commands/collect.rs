use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use clap::Args;
use eyre::{Context, Result};
use layoutlog_clang::{DumpedRecord, parse_dump};
use layoutlog_core::{Options, ParsedArgs, USAGE};

use super::UnwrapOrExit;
use crate::{
    logging, ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CollectCommand {
    /// Record-layout dumps from `clang -Xclang -fdump-record-layouts` (`-` or none reads stdin)
    pub inputs: Vec<PathBuf>,

    /// Plugin option token, repeatable: --verbose, --filter=<s>, --output=<path>, --concurrent, --help
    #[arg(long = "plugin-arg", value_name = "TOKEN", allow_hyphen_values = true)]
    pub plugin_args: Vec<String>,
}

impl CollectCommand {
    pub fn run(&self) -> Result<()> {
        let options = match Options::parse(&self.plugin_args) {
            ParsedArgs::Help => {
                eprint!("{}", USAGE);
                return Ok(());
            }
            ParsedArgs::Run(options) => options,
        };

        logging::init(options.verbose)?;
        options.trace_args(&self.plugin_args);
        let verbose = options.verbose;

        let records = self.read_records()?;
        tracing::debug!(records = records.len(), "Read layout dumps");
        let report = ops::collect(
            &records,
            options,
            ops::collect::CollectOptions {
                inputs: self.inputs.len().max(1),
            },
            &mut io::stderr().lock(),
        )
        .unwrap_or_exit();

        if verbose {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }

    fn read_records(&self) -> Result<Vec<DumpedRecord>> {
        if self.inputs.is_empty() {
            return read_input(Path::new("-"));
        }

        let mut records = Vec::new();
        for input in &self.inputs {
            records.extend(read_input(input)?);
        }
        Ok(records)
    }
}

fn read_input(path: &Path) -> Result<Vec<DumpedRecord>> {
    let (content, filename) = if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .wrap_err("Failed to read layout dump from stdin")?;
        (content, "<stdin>".to_string())
    } else {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read layout dump '{}'", path.display()))?;
        (content, path.display().to_string())
    };

    Ok(parse_dump(&content, &filename).unwrap_or_exit())
}
