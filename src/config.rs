use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Locale;
use crate::tempfiles::DefaultTempFileWriter;
use crate::{tglog_debug, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Locale used when a command does not name one.
    pub locale: Option<Locale>,
    /// Registry file used when a command does not name one.
    pub registry: Option<String>,
    /// Folder for debug temp files. Defaults to [`Config::resolve_temp_dir`].
    pub temp_dir: Option<String>,
    pub temp_prefix: Option<String>,
    /// Keep debug temp files after a command finishes.
    #[serde(default)]
    pub keep_temp_files: bool,
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".taskgroups"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    pub fn registry_path(&self) -> Option<PathBuf> {
        self.registry.as_deref().map(expand_tilde)
    }

    /// The OS temp directory if it exists, otherwise the home directory.
    ///
    /// Resolved once at setup and handed to the temp file writer as data.
    pub fn resolve_temp_dir() -> Result<PathBuf> {
        let tmp = std::env::temp_dir();
        if !tmp.as_os_str().is_empty() && tmp.is_dir() {
            return Ok(tmp);
        }
        tglog_debug!(
            "Temp dir {} unusable, falling back to home directory",
            tmp.display()
        );
        dirs::home_dir().ok_or(Error::NoHomeDir)
    }

    /// Build a temp file writer from this configuration. Unless
    /// `keep_temp_files` is set, the writer removes its files when dropped.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `temp_dir` is set but is not an existing
    /// directory.
    pub fn temp_file_writer(&self) -> Result<DefaultTempFileWriter> {
        let mut builder = DefaultTempFileWriter::builder(Self::resolve_temp_dir()?)
            .delete_on_drop(!self.keep_temp_files);
        if let Some(dir) = &self.temp_dir {
            builder = builder.temp_files_folder(expand_tilde(dir))?;
        }
        if let Some(prefix) = &self.temp_prefix {
            builder = builder.prefix(prefix);
        }
        Ok(builder.build())
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tglog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tglog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        tglog_debug!(
            "Config loaded: locale={:?}, registry={:?}, temp_dir={:?}",
            config.locale,
            config.registry,
            config.temp_dir
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let app_dir = Self::app_dir()?;
        tglog_debug!("Config::save app_dir={}", app_dir.display());
        if !app_dir.exists() {
            tglog_debug!("Creating app directory");
            fs::create_dir_all(&app_dir)?;
        }
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, toml::to_string_pretty(self)?)?;
        tglog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
