//! Command-line configuration for the inspector.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use geomag_reader::Source;

/// Read a geomagnetic model container and summarize the normalized model.
#[derive(Parser, Debug, Clone)]
#[command(name = "geomag-inspect")]
#[command(about = "Summarize a geomagnetic model container (calc, CHAOS, COVOBS, KALMAG, prior)")]
pub struct Args {
    /// Container to read
    pub path: PathBuf,

    /// Container source, or `auto` to detect it from the key set
    #[arg(short, long, default_value = "auto", env = "GEOMAG_SOURCE")]
    pub source: SourceArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "GEOMAG_FORMAT")]
    pub format: OutputFormat,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, default_value = "info", env = "GEOMAG_LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Which reader to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    Auto,
    Known(Source),
}

impl FromStr for SourceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(SourceArg::Auto);
        }
        s.parse::<Source>().map(SourceArg::Known)
    }
}

impl fmt::Display for SourceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceArg::Auto => f.write_str("auto"),
            SourceArg::Known(source) => write!(f, "{}", source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
