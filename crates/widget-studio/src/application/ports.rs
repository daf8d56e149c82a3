//! Seams between the editing session and the outside world.
//!
//! The session never opens files itself.  It talks to a [`ConfigDocument`]
//! (the file-open / file-save mechanism) and an [`ImageSource`] (the image
//! picker).  The infrastructure layer provides file-system implementations;
//! tests use the in-memory ones from `infrastructure::memory`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reading or writing a config document.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    NotText { path: PathBuf },
}

/// Where a config's JSON text is loaded from and saved to.
pub trait ConfigDocument {
    /// Returns the document text, or `None` if it does not exist yet.
    fn read_text(&self) -> Result<Option<String>, FileError>;

    /// Replaces the document with `text`.
    fn write_text(&self, text: &str) -> Result<(), FileError>;

    /// Short description for log and error messages (usually the path).
    fn describe(&self) -> String;
}

/// Failure turning a user-selected image into a resource reference.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image {path} is {size} bytes, larger than the {limit}-byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("unsupported image type: {0}")]
    UnsupportedType(PathBuf),
}

/// The image-selection mechanism.
pub trait ImageSource {
    /// Reads the image at `path` and returns a displayable, self-contained
    /// resource reference for it (a data URI).
    fn acquire(&self, path: &Path) -> Result<String, ImageError>;
}
