//! Infrastructure layer for widget-studio.
//!
//! Everything that touches the file system lives here:
//!
//! - **`files`**   – [`JsonFile`], the file-open / file-save mechanism for
//!   config documents.
//! - **`images`**  – [`FsImageSource`], the image picker: image file → data URI.
//! - **`storage`** – TOML settings for the studio itself.
//! - **`memory`**  – In-memory stand-ins for the two ports, used by tests.

pub mod files;
pub mod images;
pub mod memory;
pub mod storage;

pub use files::JsonFile;
pub use images::FsImageSource;
pub use storage::settings::{load_settings, save_settings, settings_file_path, StudioSettings};
