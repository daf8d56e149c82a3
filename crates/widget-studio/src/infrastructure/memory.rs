//! In-memory document and image source for tests.
//!
//! `MemoryDocument` is a shared handle: cloning it gives a second handle to
//! the same text, so a test can hand one clone to an [`EditSession`] and keep
//! the other to inspect what was written.
//!
//! [`EditSession`]: crate::application::session::EditSession

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use widget_core::domain::image::data_uri;
use widget_core::{ImageResolver, ResolveError, ResolvedImage};

use crate::application::ports::{ConfigDocument, FileError, ImageError, ImageSource};

#[derive(Debug, Default)]
struct DocumentState {
    text: Option<String>,
    writes: usize,
    fail_writes: bool,
}

/// A config document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Arc<Mutex<DocumentState>>,
}

impl MemoryDocument {
    /// A document that does not exist yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A document containing `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        let doc = Self::default();
        doc.lock().text = Some(text.into());
        doc
    }

    /// A missing document whose every write fails with an I/O error.
    pub fn failing_writes() -> Self {
        let doc = Self::default();
        doc.lock().fail_writes = true;
        doc
    }

    /// Current text, if any.
    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigDocument for MemoryDocument {
    fn read_text(&self) -> Result<Option<String>, FileError> {
        Ok(self.text())
    }

    fn write_text(&self, text: &str) -> Result<(), FileError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(FileError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        state.text = Some(text.to_string());
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Images keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    images: HashMap<PathBuf, ResolvedImage>,
}

impl MemoryImages {
    /// Adds an image at `path`.
    pub fn with(mut self, path: impl Into<PathBuf>, mime: &str, bytes: &[u8]) -> Self {
        self.images.insert(
            path.into(),
            ResolvedImage {
                mime: mime.to_string(),
                bytes: bytes.to_vec(),
            },
        );
        self
    }

    fn get(&self, path: &Path) -> Option<&ResolvedImage> {
        self.images.get(path)
    }
}

impl ImageSource for MemoryImages {
    fn acquire(&self, path: &Path) -> Result<String, ImageError> {
        let image = self
            .get(path)
            .ok_or_else(|| ImageError::NotFound(path.to_path_buf()))?;
        Ok(data_uri(&image.mime, &image.bytes))
    }
}

impl ImageResolver for MemoryImages {
    fn resolve(&self, reference: &str) -> Result<ResolvedImage, ResolveError> {
        self.get(Path::new(reference))
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(reference.to_string()))
    }
}
