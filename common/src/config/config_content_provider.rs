use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Source of raw configuration text.
pub trait ConfigContentProvider {
    /// `Ok(None)` means there is no configuration yet and defaults apply.
    fn read_content(&self) -> Result<Option<String>, ConfigError>;
    fn write_content(&self, content: &str) -> Result<(), ConfigError>;
    fn describe(&self) -> String;
}

pub struct FileContentConfigProvider {
    path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.describe(),
            source,
        }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn read_content(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn write_content(&self, content: &str) -> Result<(), ConfigError> {
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
