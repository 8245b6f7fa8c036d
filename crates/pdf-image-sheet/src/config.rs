use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::counter::JsonCounterStore;
use crate::delivery::DirectorySink;
use crate::types::*;

/// Where documents go and where the counter lives
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetConfig {
    /// Directory produced documents are saved into
    pub output_dir: PathBuf,
    /// JSON file holding the document counter
    pub counter_path: PathBuf,
}

impl Default for SheetConfig {
    fn default() -> Self {
        let output_dir = dirs::download_dir()
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let counter_path =
            JsonCounterStore::default_path().unwrap_or_else(|| PathBuf::from("counter.json"));
        Self {
            output_dir,
            counter_path,
        }
    }
}

impl SheetConfig {
    /// `<config dir>/pdf-image-sheet/config.json`
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("pdf-image-sheet");
        path.push("config.json");
        Some(path)
    }

    /// Load config from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| SheetError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path` if it exists, defaults otherwise
    #[cfg(feature = "serde")]
    pub async fn load_or_default(path: impl AsRef<std::path::Path>) -> Result<Self> {
        match Self::load(path.as_ref()).await {
            Err(SheetError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.as_ref().display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save config to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.as_ref().parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(SheetError::Config("Output directory is empty".to_string()));
        }
        if self.counter_path.as_os_str().is_empty() {
            return Err(SheetError::Config("Counter path is empty".to_string()));
        }
        if self.counter_path.is_dir() {
            return Err(SheetError::Config(format!(
                "Counter path {} is a directory",
                self.counter_path.display()
            )));
        }
        Ok(())
    }

    pub fn counter_store(&self) -> JsonCounterStore {
        JsonCounterStore::new(&self.counter_path)
    }

    pub fn sink(&self) -> DirectorySink {
        DirectorySink::new(&self.output_dir)
    }
}
