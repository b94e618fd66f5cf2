//! # leo-probe
//!
//! A smoke check for the FFI boundary of the `leo` native library.
//!
//! The probe locates the library, loads it, binds the exported
//! `int32 leo_sum(int32, int32)` and calls it once, printing
//! `leo_sum(5, 7) = 12`. Any failure along the way is fatal and maps to a
//! distinct exit code.
//!
//! ## Quick Start
//!
//! ```no_run
//! use leo_probe::{ProbeConfig, probe};
//!
//! let config = ProbeConfig::default().set_library("./build/libleo.so");
//! let report = probe::run(&config).unwrap();
//!
//! assert_eq!(report.to_string(), "leo_sum(5, 7) = 12");
//! ```
//!
//! Stages can also be driven one at a time:
//!
//! ```no_run
//! use leo_probe::probe;
//!
//! let handle = probe::locate("leo.dll").unwrap().load().unwrap();
//! let leo_sum = handle.bind("leo_sum").unwrap();
//!
//! assert_eq!(leo_sum.invoke(2, 3), 5);
//! ```
//!
//! ```no_run
//! use leo_probe::StubLibrary;
//!
//! // Compile a stand-in library exporting leo_sum on a worker thread
//! let rx = StubLibrary::default()
//!     .set_output_path("./build")
//!     .spawn();
//!
//! let library = rx.recv().unwrap().unwrap();
//! assert!(library.exists());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod stub;

pub use cli::Cli;
pub use config::ProbeConfig;
pub use error::{ProbeError, ProbeResult, StubError};
pub use report::{OutputFormat, ProbeReport};
pub use stub::StubLibrary;
