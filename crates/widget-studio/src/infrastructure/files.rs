//! File-system config documents.
//!
//! [`JsonFile`] is the file-open / file-save mechanism for the CLI.  Writes go
//! to a temporary sibling file first and are then renamed over the target, so
//! an interrupted save never leaves a half-written config behind.

use std::path::{Path, PathBuf};

use crate::application::ports::{ConfigDocument, FileError};

/// A config document stored at a path on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative image paths in this config are resolved from.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config.json".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn io_error(&self, source: std::io::Error) -> FileError {
        FileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigDocument for JsonFile {
    fn read_text(&self) -> Result<Option<String>, FileError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| FileError::NotText {
                path: self.path.clone(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write_text(&self, text: &str) -> Result<(), FileError> {
        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| FileError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let temp = self.temp_path();
        std::fs::write(&temp, text).map_err(|e| self.io_error(e))?;
        if let Err(e) = std::fs::rename(&temp, &self.path) {
            std::fs::remove_file(&temp).ok();
            return Err(self.io_error(e));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("widget_studio_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_read_missing_file_returns_none() {
        let file = JsonFile::new("/nonexistent/path/that/cannot/exist/config.json");
        assert!(file.read_text().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        // Arrange
        let dir = temp_dir();
        let file = JsonFile::new(dir.join("nested").join("config.json"));

        // Act
        file.write_text("{\"a\": 1}").unwrap();
        let text = file.read_text().unwrap();

        // Assert
        assert_eq!(text.as_deref(), Some("{\"a\": 1}"));
        assert!(!dir.join("nested").join(".config.json.tmp").exists());

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let dir = temp_dir();
        let file = JsonFile::new(dir.join("config.json"));

        file.write_text("first").unwrap();
        file.write_text("second").unwrap();

        assert_eq!(file.read_text().unwrap().as_deref(), Some("second"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_binary_file_is_not_text() {
        let dir = temp_dir();
        let path = dir.join("config.json");
        std::fs::write(&path, [0xFF, 0xFE, 0x00]).unwrap();

        let result = JsonFile::new(&path).read_text();

        assert!(matches!(result, Err(FileError::NotText { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_base_dir_of_bare_file_name_is_current_dir() {
        assert_eq!(JsonFile::new("config.json").base_dir(), PathBuf::from("."));
        assert_eq!(
            JsonFile::new("widgets/config.json").base_dir(),
            PathBuf::from("widgets")
        );
    }
}
