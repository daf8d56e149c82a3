//! ConfigStore: the single owner of the config being edited.
//!
//! One store exists per editing session.  It is an ordinary owned value: the
//! caller creates it, passes `&mut ConfigStore` to whatever needs to change
//! it, and drops it when the session ends.  There is no global instance.
//!
//! # Operations
//!
//! | Operation           | Changes state? | Can fail with                |
//! |---------------------|----------------|------------------------------|
//! | `get_config`        | no             | –                            |
//! | `patch_field`       | yes            | `StoreError::InvalidField`   |
//! | `set_image_field`   | yes            | `StoreError::InvalidField`   |
//! | `serialize`         | no             | –                            |
//! | `deserialize`       | yes            | `StoreError::MalformedConfig`|
//! | `reset`             | yes            | –                            |
//!
//! Every mutating operation computes the complete next value first and only
//! then replaces the stored one, so a failed call leaves the store exactly as
//! it was.
//!
//! # State
//!
//! ```text
//!             deserialize
//!   Initialized ────────► Loaded
//!        ▲                  │ ▲
//!        └──── reset ───────┘ └─ deserialize
//! ```
//!
//! Field patches keep the current state.

use thiserror::Error;

use crate::domain::config::{ChatWidgetConfig, FieldKey};
use crate::domain::schema::{self, MalformedConfig};

/// Errors returned by [`ConfigStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller named a field that does not exist (or, for
    /// `set_image_field`, a field that is not an image field).
    ///
    /// This is a programming error in the caller, not bad user input.
    #[error("invalid config field: {name:?}")]
    InvalidField { name: String },

    /// `deserialize` was given text that is not a widget config.
    ///
    /// The previous config is still active.
    #[error("malformed config: {0}")]
    MalformedConfig(#[from] MalformedConfig),
}

/// Where the current config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Seeded with [`ChatWidgetConfig::default`].
    Initialized,
    /// Replaced by a successful [`ConfigStore::deserialize`].
    Loaded,
}

/// Holds exactly one [`ChatWidgetConfig`] and mediates every change to it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: ChatWidgetConfig,
    state: StoreState,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates a store seeded with the default config.
    pub fn new() -> Self {
        Self {
            config: ChatWidgetConfig::default(),
            state: StoreState::Initialized,
        }
    }

    /// Creates a store around an existing config, in the `Loaded` state.
    pub fn with_config(config: ChatWidgetConfig) -> Self {
        Self {
            config,
            state: StoreState::Loaded,
        }
    }

    /// The current config.
    pub fn get_config(&self) -> &ChatWidgetConfig {
        &self.config
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Sets the field named `name` to `value` and returns the new config.
    ///
    /// `name` is the camelCase JSON key.  The value is stored verbatim.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidField`] if `name` is not one of the nine keys.
    pub fn patch_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<ChatWidgetConfig, StoreError> {
        let key = parse_key(name)?;
        Ok(self.apply(key, value.into()))
    }

    /// Stores an image reference produced by the caller.
    ///
    /// The reference is opaque to the store; no bytes are read.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidField`] unless `field` is `avatarImage` or
    /// `launcherImage`.
    pub fn set_image_field(
        &mut self,
        field: &str,
        resource_ref: impl Into<String>,
    ) -> Result<ChatWidgetConfig, StoreError> {
        let key = parse_key(field)?;
        if !key.is_image() {
            return Err(StoreError::InvalidField {
                name: field.to_string(),
            });
        }
        Ok(self.apply(key, resource_ref.into()))
    }

    /// Pretty-printed JSON with 2-space indentation and fixed key order.
    pub fn serialize(&self) -> String {
        to_json(&self.config)
    }

    /// Parses `text`, validates its shape, and replaces the current config.
    ///
    /// # Errors
    ///
    /// [`StoreError::MalformedConfig`] if `text` is not JSON or is not a
    /// complete widget config.  The current config is left untouched.
    pub fn deserialize(&mut self, text: &str) -> Result<ChatWidgetConfig, StoreError> {
        let config = schema::parse_config(text)?;
        self.config = config.clone();
        self.state = StoreState::Loaded;
        Ok(config)
    }

    /// Restores the default config.
    pub fn reset(&mut self) -> ChatWidgetConfig {
        self.config = ChatWidgetConfig::default();
        self.state = StoreState::Initialized;
        self.config.clone()
    }

    fn apply(&mut self, key: FieldKey, value: String) -> ChatWidgetConfig {
        let next = self.config.with_field(key, value);
        self.config = next.clone();
        next
    }
}

fn parse_key(name: &str) -> Result<FieldKey, StoreError> {
    name.parse().map_err(|_| StoreError::InvalidField {
        name: name.to_string(),
    })
}

/// Serializes any config the same way [`ConfigStore::serialize`] does.
pub fn to_json(config: &ChatWidgetConfig) -> String {
    // A struct of nine `String`s has no map keys or non-finite floats, the
    // only inputs for which serde_json serialization can fail.
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| unreachable!("config serialization failed: {e}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
