//! Application layer for widget-studio.
//!
//! The use cases of the editor, written against the ports in [`ports`] so
//! they never touch the file system directly.
//!
//! - **`session`** – Open a config document, edit it through the
//!   `ConfigStore`, save or export it.
//! - **`preview`** – Render the live-preview HTML for a config.
//! - **`ports`**   – The `ConfigDocument` and `ImageSource` traits.

pub mod ports;
pub mod preview;
pub mod session;

pub use ports::{ConfigDocument, FileError, ImageError, ImageSource};
pub use session::{EditSession, SessionError};
