//! Portable export: embedding image bytes before a config leaves the session.
//!
//! A config may reference images in ways that only work on the machine (or in
//! the browser session) that produced it.  [`make_portable`] rewrites each
//! image field so the exported file is self-contained:
//!
//! | Reference kind | Export behaviour                                   |
//! |----------------|----------------------------------------------------|
//! | empty          | kept                                               |
//! | data URI       | kept                                               |
//! | http(s) URL    | kept                                               |
//! | local path     | read through the [`ImageResolver`], embedded       |
//! | blob URL       | rejected: the bytes are gone once the session ends |
//! | bad data URI   | rejected                                           |
//!
//! Reading bytes is the caller's business, so the resolver is a trait; the
//! CLI supplies a file-system implementation and tests supply an in-memory
//! one.

use thiserror::Error;
use tracing::debug;

use crate::domain::config::{ChatWidgetConfig, FieldKey};
use crate::domain::image::{data_uri, ImageRef};

/// Image bytes plus the MIME type to label them with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Failure to turn a reference into bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("cannot read image {reference}: {message}")]
    Unreadable { reference: String, message: String },
    #[error("image {reference} rejected: {reason}")]
    Rejected { reference: String, reason: String },
}

/// Loads the bytes behind a local image reference.
#[cfg_attr(test, mockall::automock)]
pub trait ImageResolver {
    /// Resolves `reference` (a local path as stored in the config).
    fn resolve(&self, reference: &str) -> Result<ResolvedImage, ResolveError>;
}

/// Errors returned by [`make_portable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The field holds a reference that cannot be embedded.
    #[error("`{field}` cannot be exported: {reason}")]
    NotPortable { field: FieldKey, reason: &'static str },

    /// The resolver failed for a local path.
    #[error("`{field}` could not be embedded: {source}")]
    Resolve {
        field: FieldKey,
        #[source]
        source: ResolveError,
    },
}

/// Returns a copy of `config` whose image fields are all portable.
///
/// # Errors
///
/// [`ExportError::NotPortable`] for blob URLs and malformed data URIs,
/// [`ExportError::Resolve`] if a local path cannot be read.
pub fn make_portable(
    config: &ChatWidgetConfig,
    resolver: &dyn ImageResolver,
) -> Result<ChatWidgetConfig, ExportError> {
    let mut out = config.clone();
    for field in FieldKey::IMAGES {
        let reference = config.get(field);
        match ImageRef::classify(reference) {
            ImageRef::Empty | ImageRef::DataUri { .. } | ImageRef::Remote => {}
            ImageRef::Blob => {
                return Err(ExportError::NotPortable {
                    field,
                    reason: "blob URLs expire with the session that created them; re-attach the image",
                })
            }
            ImageRef::MalformedDataUri => {
                return Err(ExportError::NotPortable {
                    field,
                    reason: "data URI has no valid base64 payload",
                })
            }
            ImageRef::LocalPath(path) => {
                let image = resolver
                    .resolve(path)
                    .map_err(|source| ExportError::Resolve { field, source })?;
                debug!(
                    "embedding {} ({} bytes, {}) into {field}",
                    path,
                    image.bytes.len(),
                    image.mime
                );
                out = out.with_field(field, data_uri(&image.mime, &image.bytes));
            }
        }
    }
    Ok(out)
}
