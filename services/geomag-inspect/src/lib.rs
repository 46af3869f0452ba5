//! Diagnostic front end over `geomag-reader`.
//!
//! Reads one container, either as a named source or after detecting its
//! source from the key set, and prints a [`Report`] of the normalized model.

pub mod config;
pub mod report;

use std::io::Write;

use geomag_reader::{read_auto, read_model};
use tracing::info;

pub use config::{Args, OutputFormat, SourceArg};
pub use report::Report;

/// Read the container named by `args` and build its report.
pub fn inspect(args: &Args) -> anyhow::Result<Report> {
    let result = match args.source {
        SourceArg::Auto => read_auto(&args.path),
        SourceArg::Known(source) => read_model(&args.path, source).map(|model| (source, model)),
    };
    let (source, model) = result.map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!(
            "failed to read {} as {} ({})",
            args.path.display(),
            args.source,
            kind
        ))
    })?;

    info!(
        path = %args.path.display(),
        source = %source,
        times = model.time_len(),
        "Read model"
    );

    Ok(Report::new(&args.path, source, &model))
}

/// Inspect and write the report to `out` in the configured format.
pub fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let report = inspect(args)?;
    report.write_to(args.format, out)
}
