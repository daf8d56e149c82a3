//! Image resource references.
//!
//! `avatarImage` and `launcherImage` hold an opaque string.  The store never
//! looks inside it, but callers need to know whether a saved file will still
//! display its images after it is reloaded somewhere else:
//!
//! | Reference                      | Kind        | Survives a reload? |
//! |--------------------------------|-------------|--------------------|
//! | `""`                           | `Empty`     | yes                |
//! | `data:image/png;base64,iVBO…`  | `DataUri`   | yes                |
//! | `https://cdn.example/a.png`    | `Remote`    | yes                |
//! | `blob:http://localhost/1f2e…`  | `Blob`      | no (session-only)  |
//! | `./avatar.png`                 | `LocalPath` | only on this disk  |
//!
//! Embedding the bytes as a data URI is how a config becomes portable; see
//! [`data_uri`].

use base64::{engine::general_purpose, Engine as _};

/// Classification of an image reference string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    /// No image selected.
    Empty,
    /// Self-contained `data:` URI.
    DataUri { mime: &'a str },
    /// A `data:` URI without a `;base64,` payload, or whose payload does not
    /// decode.
    MalformedDataUri,
    /// Browser object URL; only valid during the session that created it.
    Blob,
    /// `http://` or `https://` URL.
    Remote,
    /// Anything else is treated as a file-system path.
    LocalPath(&'a str),
}

impl<'a> ImageRef<'a> {
    /// Classifies `reference` without touching the referenced resource.
    pub fn classify(reference: &'a str) -> ImageRef<'a> {
        if reference.is_empty() {
            return ImageRef::Empty;
        }
        if let Some(rest) = strip_prefix_ignore_case(reference, "data:") {
            return match parse_data_uri(rest) {
                Some((mime, _)) => ImageRef::DataUri { mime },
                None => ImageRef::MalformedDataUri,
            };
        }
        if strip_prefix_ignore_case(reference, "blob:").is_some() {
            return ImageRef::Blob;
        }
        if strip_prefix_ignore_case(reference, "http://").is_some()
            || strip_prefix_ignore_case(reference, "https://").is_some()
        {
            return ImageRef::Remote;
        }
        ImageRef::LocalPath(reference)
    }

    /// Returns `true` if a file containing this reference can be reloaded
    /// elsewhere and still show the image.
    pub fn is_portable(&self) -> bool {
        matches!(self, ImageRef::Empty | ImageRef::DataUri { .. } | ImageRef::Remote)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}

/// Splits `<mime>[;<param>]*;base64,<payload>` (the part after `data:`) and
/// decodes the payload.
fn parse_data_uri(rest: &str) -> Option<(&str, Vec<u8>)> {
    let (header, payload) = rest.split_once(',')?;
    let params = strip_suffix_ignore_case(header, ";base64")?;
    let mime = params.split(';').next().unwrap_or_default();
    let bytes = general_purpose::STANDARD.decode(payload).ok()?;
    Some((mime, bytes))
}

/// Builds a `data:<mime>;base64,<payload>` reference embedding `bytes`.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(bytes))
}

/// Decodes the payload of a base64 data URI.
///
/// Returns `None` if `reference` is not a well-formed base64 data URI.
pub fn decode_data_uri(reference: &str) -> Option<(String, Vec<u8>)> {
    let rest = strip_prefix_ignore_case(reference, "data:")?;
    parse_data_uri(rest).map(|(mime, bytes)| (mime.to_string(), bytes))
}

/// Guesses an image MIME type from a file extension.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}
