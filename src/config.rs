use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, ProbeResult};

/// File name looked up when a directory is given as the config path.
pub const CONFIG_FILE_NAME: &str = "leo-probe.json";

/// Environment variable that overrides the library location.
pub const LIBRARY_ENV: &str = "LEO_DLL_PATH";

pub const DEFAULT_SYMBOL: &str = "leo_sum";
pub const DEFAULT_A: i32 = 5;
pub const DEFAULT_B: i32 = 7;

/// What to load, what to bind and what to call it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default = "default_library")]
    pub library: PathBuf,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_a")]
    pub a: i32,
    #[serde(default = "default_b")]
    pub b: i32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            symbol: default_symbol(),
            a: DEFAULT_A,
            b: DEFAULT_B,
        }
    }
}

impl ProbeConfig {
    /// Read a JSON config. Missing fields fall back to the defaults.
    ///
    /// `path` may point at the file itself or at the directory holding
    /// `leo-probe.json`.
    pub fn from_file<T>(path: T) -> ProbeResult<Self>
    where
        T: Into<PathBuf>, {
        let path = path.into();

        let path = if path.is_dir() {
            path.join(CONFIG_FILE_NAME)
        } else {
            path
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ProbeError::Config(format!("{}: {}", path.display(), e)))?;
        let config: ProbeConfig = serde_json::from_str(&content)
            .map_err(|e| ProbeError::Config(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    pub fn set_library<T>(mut self, library: T) -> Self
    where
        T: Into<PathBuf>, {
        self.library = library.into();
        self
    }

    pub fn set_symbol<T>(mut self, symbol: T) -> Self
    where
        T: Into<String>, {
        self.symbol = symbol.into();
        self
    }

    pub fn set_args(mut self, a: i32, b: i32) -> Self {
        self.a = a;
        self.b = b;
        self
    }
}

/// Platform file name of the `leo` library, relative to the working directory.
pub fn default_library() -> PathBuf {
    PathBuf::from(libloading::library_filename("leo"))
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

fn default_a() -> i32 {
    DEFAULT_A
}

fn default_b() -> i32 {
    DEFAULT_B
}
