//! Command line parsing and configuration layering.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{LIBRARY_ENV, ProbeConfig};
use crate::error::ProbeResult;
use crate::report::OutputFormat;

/// Load the leo native library, call `leo_sum` once and print the result.
#[derive(Parser, Debug)]
#[command(name = "leo-probe")]
#[command(version)]
pub struct Cli {
    /// Path of the native library [default: platform name of `leo` in the working directory]
    #[arg(short = 'l', long = "library", env = LIBRARY_ENV)]
    pub library: Option<PathBuf>,

    /// Exported symbol to bind
    #[arg(long = "symbol")]
    pub symbol: Option<String>,

    /// First operand
    #[arg(short = 'a', allow_negative_numbers = true)]
    pub a: Option<i32>,

    /// Second operand
    #[arg(short = 'b', allow_negative_numbers = true)]
    pub b: Option<i32>,

    /// JSON config file, or a directory containing leo-probe.json
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Output format of the result line
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then environment and flags.
    pub fn resolve_config(&self) -> ProbeResult<ProbeConfig> {
        let mut config = match &self.config {
            Some(path) => ProbeConfig::from_file(path)?,
            None => ProbeConfig::default(),
        };

        if let Some(library) = &self.library {
            config = config.set_library(library);
        }
        if let Some(symbol) = &self.symbol {
            config = config.set_symbol(symbol);
        }
        let (a, b) = (self.a.unwrap_or(config.a), self.b.unwrap_or(config.b));

        Ok(config.set_args(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_gives_defaults() {
        let cli = Cli::parse_from(["leo-probe"]);
        assert_eq!(cli.format, OutputFormat::Text);

        let config = cli.resolve_config().unwrap();
        assert_eq!(config.symbol, "leo_sum");
        assert_eq!((config.a, config.b), (5, 7));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("probe.json");
        std::fs::write(&file, r#"{ "library": "from-file.so", "a": 1, "b": 2 }"#).unwrap();

        let cli = Cli::parse_from([
            "leo-probe",
            "--config",
            file.to_str().unwrap(),
            "--library",
            "from-flag.so",
            "-b",
            "-3",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.library, PathBuf::from("from-flag.so"));
        assert_eq!((config.a, config.b), (1, -3));
    }

    #[test]
    fn json_format_flag() {
        let cli = Cli::parse_from(["leo-probe", "--format", "json", "-v"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }
}
