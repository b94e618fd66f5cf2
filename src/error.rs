//! Error types for the probe and the stub library builder.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type ProbeResult<T> = Result<T, ProbeError>;

/// Everything that can stop a probe run. All of them are fatal.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The library file does not exist at the resolved path.
    #[error("Could not find {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be mapped as a native module.
    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The module does not export the requested symbol.
    #[error("Symbol `{symbol}` not found: {reason}")]
    SymbolNotFound { symbol: String, reason: String },

    /// The symbol was found but cannot be bound to `fn(i32, i32) -> i32`.
    #[error("Symbol `{symbol}` does not match int32(int32, int32): {reason}")]
    SignatureMismatch { symbol: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProbeError {
    /// Map error to a process exit code.
    ///
    /// Codes come from sysexits.h:
    /// - 66: library file missing (EX_NOINPUT)
    /// - 69: library could not be loaded (EX_UNAVAILABLE)
    /// - 70: symbol missing or unusable (EX_SOFTWARE)
    /// - 78: bad configuration (EX_CONFIG)
    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeError::NotFound { .. } => 66,
            ProbeError::Load { .. } => 69,
            ProbeError::SymbolNotFound { .. } => 70,
            ProbeError::SignatureMismatch { .. } => 70,
            ProbeError::Config(_) => 78,
        }
    }
}

/// Errors raised while compiling a stub library.
#[derive(Debug, Error)]
pub enum StubError {
    #[error("rustc not found in path")]
    RustcNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rustc failed with status {status}: {stderr}")]
    Compile { status: ExitStatus, stderr: String },
}
