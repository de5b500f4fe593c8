//! Configuration loading with an embedded fallback
//!
//! The default `config.yaml` is compiled into the binary:
//!
//! - If no config path is given: use the embedded config only (no filesystem access)
//! - If a path is given and the file exists: use it
//! - If a path is given but the file is missing: fall back to the embedded config

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Where the active configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
    /// A path was configured but does not exist
    Missing(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "embedded"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Missing(path) => {
                write!(f, "embedded ({} not found)", path.display())
            }
        }
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from --config or CONFIG_FILE)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the user asked for one.
    /// If `None`, the embedded config is used exclusively.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    pub fn config_source(&self) -> ConfigSource {
        match self.config_file {
            Some(ref path) if path.exists() => ConfigSource::File(path.clone()),
            Some(ref path) => ConfigSource::Missing(path.clone()),
            None => ConfigSource::Embedded,
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to the embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
            tracing::warn!(path = %path.display(), "Config file not found, using embedded config");
        }
        Self::read_embedded_config()
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The config compiled into the binary
    pub fn read_embedded_config() -> io::Result<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
    }

    pub fn read_embedded_config_string() -> io::Result<String> {
        let bytes = Self::read_embedded_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Extract the embedded config to the filesystem (init command)
    ///
    /// Writes to `output`, else the configured path, else `./config.yaml`.
    pub fn init(&self, output: Option<&Path>, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        let path = output
            .map(Path::to_path_buf)
            .or_else(|| self.config_file.clone())
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = Self::read_embedded_config()?;
        fs::write(&path, &*data)?;
        tracing::info!(path = %path.display(), "Extracted embedded config");
        report.written.push(path.display().to_string());

        Ok(report)
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        EmbeddedConfig::iter().map(|s| s.to_string()).collect()
    }
}
