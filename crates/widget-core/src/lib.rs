//! # widget-core
//!
//! The model behind the chat widget editor: a nine-field appearance config,
//! the store that owns it during an editing session, and the JSON file
//! contract used to save and load it.
//!
//! # Architecture
//!
//! ```text
//! caller (CLI, form UI, tests)
//!         │  patch_field / set_image_field / serialize / deserialize
//!         ▼
//! application/   ConfigStore, make_portable
//!         │
//!         ▼
//! domain/        ChatWidgetConfig, FieldKey, schema, lint, image, color
//! ```
//!
//! The domain layer is pure.  The application layer holds the one piece of
//! state (the current config) and defines the [`ImageResolver`] seam through
//! which a caller supplies image bytes for export.
//!
//! # Example
//!
//! ```rust
//! use widget_core::ConfigStore;
//!
//! let mut store = ConfigStore::new();
//! store.patch_field("botName", "Helper").unwrap();
//!
//! let text = store.serialize();
//! let mut reloaded = ConfigStore::new();
//! reloaded.deserialize(&text).unwrap();
//! assert_eq!(reloaded.get_config().bot_name, "Helper");
//! ```

pub mod application;
pub mod domain;

pub use application::{
    make_portable, ConfigStore, ExportError, ImageResolver, ResolveError, ResolvedImage,
    StoreError, StoreState,
};
pub use domain::{
    lint, ChatWidgetConfig, Diagnostic, FieldKey, FontPreset, ImageRef, MalformedConfig,
    SchemaViolation, Severity,
};
