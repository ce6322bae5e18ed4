use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::{Result, TabataError};
use crate::locale::Locale;
use crate::runtime::DEFAULT_TICK_MS;

pub const MIN_TICK_MS: u64 = 10;
pub const MAX_TICK_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub tick_ms: u64,
    pub sound: bool,
    pub celebration: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            tick_ms: DEFAULT_TICK_MS,
            sound: true,
            celebration: true,
        }
    }
}

impl Config {
    pub fn clamped_tick_ms(&self) -> u64 {
        self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| TabataError::Config {
                path: self.path.clone(),
                source,
            })
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files fall back to defaults
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Config::default(),
            Err(err) => {
                tracing::warn!(error = %err, "using default config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(|source| TabataError::Config {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
