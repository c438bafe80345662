use facesession_types::{FaceError, Result};
use std::path::PathBuf;

/// Return the user's home directory, or error if unset.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| FaceError::Config("cannot determine home directory".into()))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(home_dir()?
        .join(".config")
        .join("facesession")
        .join("settings.json"))
}

/// Directory picked images are copied into.
pub fn cache_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".cache").join("facesession"))
}
