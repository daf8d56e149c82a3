//! EditSession: one editing session over one config document.
//!
//! A session owns a [`ConfigStore`] and the [`ConfigDocument`] it was loaded
//! from.  Each CLI invocation opens a session, applies one change, and saves:
//!
//! ```text
//! open(document)      read text ─► ConfigStore::deserialize   (or defaults)
//! set_field / attach  ConfigStore::patch_field / set_image_field
//! save()              ConfigStore::serialize ─► write text
//! ```
//!
//! # Input tidying
//!
//! The store stores whatever it is given.  The session is the "form" in front
//! of it, so it does the small conveniences a form would do before patching:
//!
//! - color fields: `e63a1e`, `#fa0` → `#E63A1E`, `#FFAA00`
//! - `fontFamily`: a preset label such as `roboto` → `Roboto, sans-serif`
//!
//! Values that do not match are still stored verbatim, with a warning.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use widget_core::application::to_json;
use widget_core::domain::color::normalize_hex_color;
use widget_core::{
    lint, make_portable, ChatWidgetConfig, ConfigStore, Diagnostic, ExportError, FieldKey,
    FontPreset, ImageResolver, StoreError, StoreState,
};

use super::ports::{ConfigDocument, FileError, ImageError, ImageSource};

/// Errors produced while editing a config document.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The document exists but does not contain a widget config.
    #[error("cannot load {document}: {source}")]
    Load {
        document: String,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A config being edited, plus the document it is saved to.
pub struct EditSession<D: ConfigDocument> {
    document: D,
    store: ConfigStore,
    /// Config as last read from or written to the document.
    saved: Option<ChatWidgetConfig>,
}

impl<D: ConfigDocument> EditSession<D> {
    /// Loads `document`, or starts from the default config if it does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// [`SessionError::File`] if the document cannot be read and
    /// [`SessionError::Load`] if its text is not a widget config.  In both
    /// cases nothing is written.
    pub fn open(document: D) -> Result<Self, SessionError> {
        let mut store = ConfigStore::new();
        let saved = match document.read_text()? {
            Some(text) => {
                let config = store.deserialize(&text).map_err(|source| {
                    if let StoreError::MalformedConfig(malformed) = &source {
                        for violation in malformed.violations() {
                            warn!("{}: {violation}", document.describe());
                        }
                    }
                    SessionError::Load {
                        document: document.describe(),
                        source,
                    }
                })?;
                debug!("loaded {}", document.describe());
                Some(config)
            }
            None => {
                info!("{} does not exist; starting from defaults", document.describe());
                None
            }
        };
        Ok(Self {
            document,
            store,
            saved,
        })
    }

    /// Starts a default-seeded session that will overwrite `document` on save.
    pub fn create(document: D) -> Self {
        Self {
            document,
            store: ConfigStore::new(),
            saved: None,
        }
    }

    pub fn config(&self) -> &ChatWidgetConfig {
        self.store.get_config()
    }

    pub fn state(&self) -> StoreState {
        self.store.state()
    }

    /// `true` if the config differs from what the document holds.
    pub fn has_unsaved_changes(&self) -> bool {
        self.saved.as_ref() != Some(self.store.get_config())
    }

    /// Patches one field, tidying colors and font names first.
    ///
    /// # Errors
    ///
    /// [`SessionError::Store`] if `name` is not a config field.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<ChatWidgetConfig, SessionError> {
        let value = match name.parse::<FieldKey>() {
            Ok(key) => tidy_value(key, value),
            // Let the store report the unknown key.
            Err(_) => value.to_string(),
        };
        debug!("{name} = {value:?}");
        Ok(self.store.patch_field(name, value)?)
    }

    /// Reads an image through `source` and stores its reference in `field`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Image`] if the image cannot be acquired, or
    /// [`SessionError::Store`] if `field` is not an image field.
    pub fn attach_image(
        &mut self,
        field: FieldKey,
        path: &Path,
        source: &dyn ImageSource,
    ) -> Result<ChatWidgetConfig, SessionError> {
        let reference = source.acquire(path)?;
        let config = self.store.set_image_field(field.as_str(), reference)?;
        info!("attached {} as {field}", path.display());
        Ok(config)
    }

    /// Clears an image field.
    ///
    /// # Errors
    ///
    /// [`SessionError::Store`] if `field` is not an image field.
    pub fn detach_image(&mut self, field: FieldKey) -> Result<ChatWidgetConfig, SessionError> {
        Ok(self.store.set_image_field(field.as_str(), "")?)
    }

    /// Discards every change and returns to the default config.
    pub fn reset(&mut self) -> ChatWidgetConfig {
        self.store.reset()
    }

    /// Advisory findings about the current config.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        lint(self.store.get_config())
    }

    /// The current config as file text.
    pub fn to_text(&self) -> String {
        self.store.serialize()
    }

    /// Writes the current config back to the document.
    ///
    /// # Errors
    ///
    /// [`SessionError::File`] if the write fails; the in-memory config is
    /// kept either way.
    pub fn save(&mut self) -> Result<(), SessionError> {
        for d in self.diagnostics() {
            warn!("{d}");
        }
        self.document.write_text(&self.store.serialize())?;
        self.saved = Some(self.store.get_config().clone());
        info!("saved {}", self.document.describe());
        Ok(())
    }

    /// Writes a self-contained copy of the config to `target`, embedding any
    /// local image paths through `resolver`.  The session's own config and
    /// document are not changed.
    ///
    /// # Errors
    ///
    /// [`SessionError::Export`] if an image cannot be embedded, or
    /// [`SessionError::File`] if `target` cannot be written.
    pub fn export_to(
        &self,
        target: &dyn ConfigDocument,
        resolver: &dyn ImageResolver,
    ) -> Result<ChatWidgetConfig, SessionError> {
        let portable = make_portable(self.store.get_config(), resolver)?;
        target.write_text(&to_json(&portable))?;
        info!("exported {} to {}", self.document.describe(), target.describe());
        Ok(portable)
    }
}

/// Applies the form conveniences described in the module docs.
fn tidy_value(key: FieldKey, value: &str) -> String {
    if key.is_color() {
        return match normalize_hex_color(value) {
            Some(hex) => hex,
            None => {
                warn!("{key}: {value:?} is not a hex color; storing it as given");
                value.to_string()
            }
        };
    }
    if key == FieldKey::FontFamily {
        if let Some(preset) = FontPreset::lookup(value) {
            return preset.css_stack().to_string();
        }
        warn!("{key}: {value:?} is not a preset font; storing it as a custom font stack");
    }
    value.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
