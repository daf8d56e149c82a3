//! File-system image source.
//!
//! Turns an image file into a `data:` URI so the reference stored in the
//! config stays valid after the file is moved or the config is shared.  The
//! same type serves as the [`ImageResolver`] used by export, where local paths
//! already stored in a config are embedded.
//!
//! Relative paths are resolved against `base_dir`, normally the directory of
//! the config file being edited.

use std::path::{Path, PathBuf};

use tracing::debug;
use widget_core::domain::image::{data_uri, mime_for_extension};
use widget_core::{ImageResolver, ResolveError, ResolvedImage};

use crate::application::ports::{ImageError, ImageSource};

/// Reads images from disk, enforcing a size limit.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    base_dir: PathBuf,
    max_bytes: u64,
}

impl FsImageSource {
    pub fn new(base_dir: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_bytes,
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Reads the image at `path` and determines its MIME type.
    ///
    /// # Errors
    ///
    /// See [`ImageError`]; the extension must name a known image type.
    pub fn read(&self, path: &Path) -> Result<ResolvedImage, ImageError> {
        let full = self.resolve_path(path);
        let mime = full
            .extension()
            .and_then(|e| e.to_str())
            .and_then(mime_for_extension)
            .ok_or_else(|| ImageError::UnsupportedType(full.clone()))?;

        let meta = std::fs::metadata(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ImageError::NotFound(full.clone()),
            _ => ImageError::Io {
                path: full.clone(),
                source: e,
            },
        })?;
        if meta.len() > self.max_bytes {
            return Err(ImageError::TooLarge {
                path: full,
                size: meta.len(),
                limit: self.max_bytes,
            });
        }

        let bytes = std::fs::read(&full).map_err(|source| ImageError::Io {
            path: full.clone(),
            source,
        })?;
        debug!("read {} ({} bytes, {mime})", full.display(), bytes.len());
        Ok(ResolvedImage {
            mime: mime.to_string(),
            bytes,
        })
    }
}

impl ImageSource for FsImageSource {
    fn acquire(&self, path: &Path) -> Result<String, ImageError> {
        let image = self.read(path)?;
        Ok(data_uri(&image.mime, &image.bytes))
    }
}

impl ImageResolver for FsImageSource {
    fn resolve(&self, reference: &str) -> Result<ResolvedImage, ResolveError> {
        self.read(Path::new(reference)).map_err(|e| match e {
            ImageError::NotFound(_) => ResolveError::NotFound(reference.to_string()),
            ImageError::Io { source, .. } => ResolveError::Unreadable {
                reference: reference.to_string(),
                message: source.to_string(),
            },
            other @ (ImageError::TooLarge { .. } | ImageError::UnsupportedType(_)) => {
                ResolveError::Rejected {
                    reference: reference.to_string(),
                    reason: other.to_string(),
                }
            }
        })
    }
}
