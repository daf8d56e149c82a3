//! Application layer: the stateful store and the export use case.
//!
//! - **`config_store`** – [`ConfigStore`], the owner of the config being
//!   edited.  All reads and writes from a caller go through it.
//! - **`export`** – [`make_portable`], which embeds local images so a saved
//!   file can be reloaded anywhere.

pub mod config_store;
pub mod export;

pub use config_store::{to_json, ConfigStore, StoreError, StoreState};
pub use export::{make_portable, ExportError, ImageResolver, ResolveError, ResolvedImage};
