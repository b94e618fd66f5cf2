use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

/// How the result line is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of one successful probe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub library: PathBuf,
    pub symbol: String,
    pub a: i32,
    pub b: i32,
    pub result: i32,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}) = {}", self.symbol, self.a, self.b, self.result)
    }
}

impl ProbeReport {
    /// Write the report as a single line.
    pub fn write_to<W: Write>(&self, mut out: W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => writeln!(out, "{}", self),
            OutputFormat::Json => {
                let line = serde_json::to_string(self).map_err(io::Error::other)?;
                writeln!(out, "{}", line)
            }
        }
    }
}
