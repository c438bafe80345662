use crate::schema::ClientConfig;
use facesession_types::{FaceError, Result};
use std::path::{Path, PathBuf};

/// The persisted settings file backing a [`ClientConfig`].
///
/// Settings are re-read on every [`load`](Self::load) so edits made between
/// calls (e.g. by `facesession settings set`) are always picked up.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the current settings, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the settings file exists but cannot be parsed.
    #[allow(clippy::result_large_err)]
    pub fn load(&self) -> std::result::Result<ClientConfig, figment::Error> {
        let config = ClientConfig::from_file(&self.path)?;
        tracing::debug!(path = %self.path.display(), complete = config.is_complete(), "settings loaded");
        Ok(config)
    }

    /// Loads what is stored on disk without environment overrides.
    ///
    /// Use this for read-modify-write so an override never gets persisted.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the settings file exists but cannot be parsed.
    #[allow(clippy::result_large_err)]
    pub fn load_persisted(&self) -> std::result::Result<ClientConfig, figment::Error> {
        ClientConfig::from_file_persisted(&self.path)
    }

    /// Writes the settings as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`FaceError::Io`] if the file cannot be written.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FaceError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json).map_err(|e| FaceError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
