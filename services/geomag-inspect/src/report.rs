//! What the inspector prints for one container.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use geomag_common::{Model, ModelSummary};
use geomag_reader::Source;
use serde::Serialize;

use crate::config::OutputFormat;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub path: PathBuf,
    pub source: Source,
    #[serde(flatten)]
    pub summary: ModelSummary,
}

impl Report {
    pub fn new(path: &Path, source: Source, model: &Model) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
            summary: model.summary(),
        }
    }

    pub fn write_to(&self, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
        match format {
            OutputFormat::Text => write!(out, "{}", self)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "path: {}", self.path.display())?;
        writeln!(f, "source: {}", self.source)?;
        write!(f, "{}", self.summary)
    }
}
