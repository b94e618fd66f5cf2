use std::{path::PathBuf, process::Command, sync::mpsc::{self, Receiver}, thread};

use tracing::debug;

use crate::error::StubError;

type BuildResult = Result<PathBuf, StubError>;

/// Source of the default stub: `leo_sum` returning `a.wrapping_add(b)`.
pub const LEO_SUM_STUB: &str = include_str!("../fixtures/leo_stub.rs");

enum Source {
    File(PathBuf),
    Text(String),
}

/// Compiles a small native library with `rustc` so the probe has something
/// to load.
pub struct StubLibrary {
    args: Vec<String>,
    source: Source,
    name: String,
    output_path: PathBuf,
}

impl Default for StubLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl StubLibrary {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            source: Source::Text(LEO_SUM_STUB.to_string()),
            name: "leo".to_string(),
            output_path: PathBuf::from("build"),
        }
    }

    pub fn add_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<String>, {
        self.args.push(arg.into());
        self
    }

    pub fn set_source<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>, {
        self.source = Source::File(path.into());
        self
    }

    pub fn set_source_text<T>(mut self, text: T) -> Self
    where
        T: Into<String>, {
        self.source = Source::Text(text.into());
        self
    }

    /// Crate name of the stub, also used for the library file name.
    pub fn set_name<T>(mut self, name: T) -> Self
    where
        T: Into<String>, {
        self.name = name.into();
        self
    }

    pub fn set_output_path<T>(mut self, path: T) -> Self
    where
        T: Into<PathBuf>, {
        self.output_path = path.into();
        self
    }

    /// Path the library will be written to.
    pub fn library_path(&self) -> PathBuf {
        self.output_path.join(libloading::library_filename(&self.name))
    }

    pub fn build(&mut self) -> BuildResult {
        self.execute()
    }

    pub fn spawn(mut self) -> Receiver<BuildResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(self.execute());
        });

        rx
    }

    fn execute(&mut self) -> BuildResult {
        let rustc = find_rustc()?;

        if !self.output_path.exists() {
            std::fs::create_dir_all(&self.output_path)?;
        }

        let source = match &self.source {
            Source::File(path) => path.clone(),
            Source::Text(text) => {
                let path = self.output_path.join(format!("{}_stub.rs", self.name));
                std::fs::write(&path, text)?;
                path
            }
        };

        let library = self.library_path();
        debug!(rustc = %rustc.display(), source = %source.display(), library = %library.display(), "compiling stub");

        let output = Command::new(rustc)
            .args(["--crate-type", "cdylib"])
            .args(["--crate-name", self.name.as_str()])
            .args(["--edition", "2021"])
            .arg("-o")
            .arg(&library)
            .arg(&source)
            .args(&self.args)
            .output()?;

        if !output.status.success() {
            return Err(StubError::Compile {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(library)
    }
}

/// `$RUSTC` when set, otherwise `rustc` from the path.
fn find_rustc() -> Result<PathBuf, StubError> {
    if let Some(rustc) = std::env::var_os("RUSTC").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(rustc));
    }
    which::which("rustc").map_err(|_| StubError::RustcNotFound)
}
