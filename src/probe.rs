//! The locate, load, bind, invoke sequence.
//!
//! Each stage is its own type, so a symbol can only be bound on a loaded
//! library and only invoked once bound. The bound function borrows the
//! library, which is unloaded when [`LibraryHandle`] is dropped.

use std::io::Write;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::error::{ProbeError, ProbeResult};
use crate::report::{OutputFormat, ProbeReport};

/// `int32 leo_sum(int32 a, int32 b)`
pub type LeoSumFn = unsafe extern "C" fn(a: i32, b: i32) -> i32;

/// A library path that was checked to exist.
#[derive(Debug)]
pub struct Located {
    path: PathBuf,
}

/// Resolve `path` against the working directory and check it exists.
pub fn locate<P: AsRef<Path>>(path: P) -> ProbeResult<Located> {
    let path = path.as_ref();
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    if !path.exists() {
        return Err(ProbeError::NotFound { path });
    }

    debug!(path = %path.display(), "located library");
    Ok(Located { path })
}

impl Located {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map the module into the process.
    pub fn load(self) -> ProbeResult<LibraryHandle> {
        // Loading runs the module's initialisers; nothing else is assumed
        // about the library.
        let library = unsafe { Library::new(&self.path) }.map_err(|source| ProbeError::Load {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "loaded library");
        Ok(LibraryHandle {
            path: self.path,
            library,
        })
    }
}

/// A loaded native module.
#[derive(Debug)]
pub struct LibraryHandle {
    path: PathBuf,
    library: Library,
}

impl LibraryHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve `symbol` as a [`LeoSumFn`].
    pub fn bind(&self, symbol: &str) -> ProbeResult<Bound<'_>> {
        if symbol.is_empty() || symbol.contains('\0') {
            return Err(ProbeError::SymbolNotFound {
                symbol: symbol.escape_debug().to_string(),
                reason: "not a valid symbol name".to_string(),
            });
        }

        let raw: Symbol<'_, Option<LeoSumFn>> = unsafe { self.library.get(symbol.as_bytes()) }
            .map_err(|e| ProbeError::SymbolNotFound {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        let func = raw.lift_option().ok_or_else(|| ProbeError::SignatureMismatch {
            symbol: symbol.to_string(),
            reason: "symbol resolves to a null address".to_string(),
        })?;

        debug!(symbol, "bound symbol");
        Ok(Bound {
            symbol: symbol.to_string(),
            func,
        })
    }
}

/// A symbol bound to `int32(int32, int32)`, valid while its library is loaded.
pub struct Bound<'lib> {
    symbol: String,
    func: Symbol<'lib, LeoSumFn>,
}

impl Bound<'_> {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Call the native function.
    ///
    /// A fault inside the callee is not recoverable and takes the process down.
    pub fn invoke(&self, a: i32, b: i32) -> i32 {
        let result = unsafe { (*self.func)(a, b) };
        debug!(symbol = %self.symbol, a, b, result, "invoked");
        result
    }
}

/// Print the result line.
pub fn report<W: Write>(out: W, report: &ProbeReport, format: OutputFormat) -> std::io::Result<()> {
    report.write_to(out, format)
}

/// Run every stage up to the call and return what should be reported.
pub fn run(config: &ProbeConfig) -> ProbeResult<ProbeReport> {
    let located = locate(&config.library)?;
    let handle = located.load()?;
    let bound = handle.bind(&config.symbol)?;
    let result = bound.invoke(config.a, config.b);

    info!(library = %handle.path().display(), symbol = %config.symbol, result, "probe succeeded");
    Ok(ProbeReport {
        library: handle.path().to_path_buf(),
        symbol: config.symbol.clone(),
        a: config.a,
        b: config.b,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("leo.dll");

        let err = locate(&missing).unwrap_err();
        match err {
            ProbeError::NotFound { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn locate_makes_path_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libleo.so");
        std::fs::write(&file, b"").unwrap();

        let located = locate(&file).unwrap();
        assert!(located.path().is_absolute());
    }

    #[test]
    fn relative_missing_path_reports_absolute() {
        let err = locate("definitely-not-here/leo.dll").unwrap_err();
        let ProbeError::NotFound { path } = err else {
            panic!("expected NotFound");
        };
        assert!(path.is_absolute());
        assert!(path.ends_with("definitely-not-here/leo.dll"));
    }

    #[test]
    fn garbage_file_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(libloading::library_filename("leo"));
        std::fs::write(&file, b"this is not a shared object").unwrap();

        let err = locate(&file).unwrap().load().unwrap_err();
        assert!(matches!(err, ProbeError::Load { .. }));
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn run_stops_at_locate() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProbeConfig::default().set_library(dir.path().join("missing.so"));

        let err = run(&config).unwrap_err();
        assert_eq!(err.exit_code(), 66);
    }
}
