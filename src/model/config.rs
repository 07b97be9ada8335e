use std::path::PathBuf;

/// Environment variable naming the todo document
pub const STORE_PATH_ENV: &str = "TODO_PATH";

/// File name used under `$HOME` when nothing else is configured
pub const DEFAULT_STORE_FILE: &str = "todo";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no todo file configured: pass --file, set TODO_PATH, or set HOME")]
    NoStorePath,
}

/// Where the todo document lives.
///
/// Built once at startup and handed to the store adapter, so nothing below
/// the CLI reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig { path: path.into() }
    }

    /// Pick the store path: an explicit flag wins, then the environment
    /// override, then `<home>/todo`. Empty strings count as unset.
    pub fn resolve(
        flag: Option<PathBuf>,
        env_path: Option<String>,
        home: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = flag.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(StoreConfig::new(path));
        }
        if let Some(path) = env_path.filter(|p| !p.is_empty()) {
            return Ok(StoreConfig::new(path));
        }
        home.filter(|h| !h.as_os_str().is_empty())
            .map(|h| StoreConfig::new(h.join(DEFAULT_STORE_FILE)))
            .ok_or(ConfigError::NoStorePath)
    }

    /// Resolve against the process environment.
    pub fn from_env(flag: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve(
            flag,
            std::env::var(STORE_PATH_ENV).ok(),
            std::env::var_os("HOME").map(PathBuf::from),
        )
    }
}
