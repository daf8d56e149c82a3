//! Domain layer: the widget config model and the rules about its contents.
//!
//! Nothing in here performs I/O or keeps state between calls.  Every function
//! takes a value and returns a value, which is what lets the store above it
//! guarantee "either the whole operation happened or nothing did".
//!
//! - **`config`** – [`ChatWidgetConfig`], [`FieldKey`], [`FontPreset`].
//! - **`schema`** – Validation of loaded JSON documents.
//! - **`color`**  – `#RRGGBB` helpers.
//! - **`image`**  – Classification of image references, data URI encoding.
//! - **`lint`**   – Advisory diagnostics on field contents.

pub mod color;
pub mod config;
pub mod image;
pub mod lint;
pub mod schema;

pub use config::{ChatWidgetConfig, FieldKey, FontPreset, UnknownFieldKey};
pub use image::ImageRef;
pub use lint::{lint, Diagnostic, Severity};
pub use schema::{MalformedConfig, SchemaViolation};
