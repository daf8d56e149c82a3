//! The chat widget appearance model.
//!
//! [`ChatWidgetConfig`] is the only entity in the system: nine string fields
//! describing how a chat widget looks.  Every field is required, so a value
//! of this type can never be "partially populated".
//!
//! # Field keys
//!
//! Callers that work with field *names* (form inputs, the CLI `set` command,
//! JSON object keys) go through [`FieldKey`].  Its string form is exactly the
//! camelCase key used in the persisted JSON file:
//!
//! ```text
//! configName  botName  fontFamily  headerColor  headerFontColor
//! backgroundColor  chatFontColor  avatarImage  launcherImage
//! ```
//!
//! # Pure updates
//!
//! [`ChatWidgetConfig::with_field`] never mutates `self`; it returns a new
//! value with one field replaced.  The store in the application layer swaps
//! its owned value for the returned one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Default `configName` for a fresh editing session.
pub const DEFAULT_CONFIG_NAME: &str = "config-1";
/// Default `botName`.
pub const DEFAULT_BOT_NAME: &str = "Chatbot";
/// Default header background.
pub const DEFAULT_HEADER_COLOR: &str = "#E63A1E";
/// Default header text color.
pub const DEFAULT_HEADER_FONT_COLOR: &str = "#FFFFFF";
/// Default chat body background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#E8E1DB";
/// Default chat body text color.
pub const DEFAULT_CHAT_FONT_COLOR: &str = "#323130";

// ── Field keys ────────────────────────────────────────────────────────────────

/// Returned when a string does not name one of the nine config fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized config field: {0:?}")]
pub struct UnknownFieldKey(pub String);

/// Identifies one of the nine fields of [`ChatWidgetConfig`].
///
/// Declaration order is the serialization order of the JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    ConfigName,
    BotName,
    FontFamily,
    HeaderColor,
    HeaderFontColor,
    BackgroundColor,
    ChatFontColor,
    AvatarImage,
    LauncherImage,
}

impl FieldKey {
    /// Every field, in serialization order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::ConfigName,
        FieldKey::BotName,
        FieldKey::FontFamily,
        FieldKey::HeaderColor,
        FieldKey::HeaderFontColor,
        FieldKey::BackgroundColor,
        FieldKey::ChatFontColor,
        FieldKey::AvatarImage,
        FieldKey::LauncherImage,
    ];

    /// The four `#RRGGBB` color fields.
    pub const COLORS: [FieldKey; 4] = [
        FieldKey::HeaderColor,
        FieldKey::HeaderFontColor,
        FieldKey::BackgroundColor,
        FieldKey::ChatFontColor,
    ];

    /// The two image reference fields.
    pub const IMAGES: [FieldKey; 2] = [FieldKey::AvatarImage, FieldKey::LauncherImage];

    /// The camelCase key used in the JSON file.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::ConfigName => "configName",
            FieldKey::BotName => "botName",
            FieldKey::FontFamily => "fontFamily",
            FieldKey::HeaderColor => "headerColor",
            FieldKey::HeaderFontColor => "headerFontColor",
            FieldKey::BackgroundColor => "backgroundColor",
            FieldKey::ChatFontColor => "chatFontColor",
            FieldKey::AvatarImage => "avatarImage",
            FieldKey::LauncherImage => "launcherImage",
        }
    }

    /// Returns `true` for `avatarImage` and `launcherImage`.
    pub fn is_image(self) -> bool {
        Self::IMAGES.contains(&self)
    }

    /// Returns `true` for the four color fields.
    pub fn is_color(self) -> bool {
        Self::COLORS.contains(&self)
    }

    /// Human-readable form label, e.g. `headerFontColor` → `Header Font Color`.
    pub fn label(self) -> String {
        let mut label = String::new();
        for (i, ch) in self.as_str().chars().enumerate() {
            if i == 0 {
                label.extend(ch.to_uppercase());
            } else if ch.is_ascii_uppercase() {
                label.push(' ');
                label.push(ch);
            } else {
                label.push(ch);
            }
        }
        label
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFieldKey(s.to_string()))
    }
}

// ── Font presets ──────────────────────────────────────────────────────────────

/// The font stacks offered by the editor.
///
/// `fontFamily` is stored as a plain string so custom stacks survive a load;
/// this enum only describes the presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontPreset {
    #[default]
    SpaceGrotesk,
    Arial,
    Roboto,
}

impl FontPreset {
    pub const ALL: [FontPreset; 3] = [FontPreset::SpaceGrotesk, FontPreset::Arial, FontPreset::Roboto];

    /// The CSS `font-family` value stored in the config.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontPreset::SpaceGrotesk => "Space Grotesk, sans-serif",
            FontPreset::Arial => "Arial, sans-serif",
            FontPreset::Roboto => "Roboto, sans-serif",
        }
    }

    /// Label shown in the font picker.
    pub fn label(self) -> &'static str {
        match self {
            FontPreset::SpaceGrotesk => "Space Grotesk",
            FontPreset::Arial => "Arial",
            FontPreset::Roboto => "Roboto",
        }
    }

    /// Finds the preset whose CSS stack is exactly `stack`.
    pub fn from_css_stack(stack: &str) -> Option<FontPreset> {
        FontPreset::ALL.into_iter().find(|p| p.css_stack() == stack)
    }

    /// Finds a preset by label or CSS stack, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<FontPreset> {
        let name = name.trim();
        FontPreset::ALL.into_iter().find(|p| {
            p.label().eq_ignore_ascii_case(name) || p.css_stack().eq_ignore_ascii_case(name)
        })
    }
}

// ── Config entity ─────────────────────────────────────────────────────────────

/// Appearance configuration for one chat widget.
///
/// Field order here is the key order of the serialized JSON; `serde_json`
/// writes struct fields in declaration order, which is what makes
/// serialization byte-for-byte reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChatWidgetConfig {
    /// Free-form label for this configuration.
    pub config_name: String,
    /// Name shown in the widget header and greeting.
    pub bot_name: String,
    /// CSS font stack; normally one of [`FontPreset`].
    pub font_family: String,
    pub header_color: String,
    pub header_font_color: String,
    pub background_color: String,
    pub chat_font_color: String,
    /// Empty, or a resource reference (see [`crate::domain::image::ImageRef`]).
    pub avatar_image: String,
    /// Empty, or a resource reference.
    pub launcher_image: String,
}

impl Default for ChatWidgetConfig {
    /// The seeded config every new editing session starts from.
    ///
    /// | Field           | Default                     |
    /// |-----------------|-----------------------------|
    /// | configName      | `config-1`                  |
    /// | botName         | `Chatbot`                   |
    /// | fontFamily      | `Space Grotesk, sans-serif` |
    /// | headerColor     | `#E63A1E`                   |
    /// | headerFontColor | `#FFFFFF`                   |
    /// | backgroundColor | `#E8E1DB`                   |
    /// | chatFontColor   | `#323130`                   |
    /// | avatarImage     | empty                       |
    /// | launcherImage   | empty                       |
    fn default() -> Self {
        Self {
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            font_family: FontPreset::default().css_stack().to_string(),
            header_color: DEFAULT_HEADER_COLOR.to_string(),
            header_font_color: DEFAULT_HEADER_FONT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            chat_font_color: DEFAULT_CHAT_FONT_COLOR.to_string(),
            avatar_image: String::new(),
            launcher_image: String::new(),
        }
    }
}

impl ChatWidgetConfig {
    /// Reads a field by key.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::ConfigName => &self.config_name,
            FieldKey::BotName => &self.bot_name,
            FieldKey::FontFamily => &self.font_family,
            FieldKey::HeaderColor => &self.header_color,
            FieldKey::HeaderFontColor => &self.header_font_color,
            FieldKey::BackgroundColor => &self.background_color,
            FieldKey::ChatFontColor => &self.chat_font_color,
            FieldKey::AvatarImage => &self.avatar_image,
            FieldKey::LauncherImage => &self.launcher_image,
        }
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut String {
        match key {
            FieldKey::ConfigName => &mut self.config_name,
            FieldKey::BotName => &mut self.bot_name,
            FieldKey::FontFamily => &mut self.font_family,
            FieldKey::HeaderColor => &mut self.header_color,
            FieldKey::HeaderFontColor => &mut self.header_font_color,
            FieldKey::BackgroundColor => &mut self.background_color,
            FieldKey::ChatFontColor => &mut self.chat_font_color,
            FieldKey::AvatarImage => &mut self.avatar_image,
            FieldKey::LauncherImage => &mut self.launcher_image,
        }
    }

    /// Returns a copy of `self` with `key` set to `value`.  No validation.
    #[must_use]
    pub fn with_field(&self, key: FieldKey, value: impl Into<String>) -> ChatWidgetConfig {
        let mut next = self.clone();
        *next.slot_mut(key) = value.into();
        next
    }

    /// Iterates `(key, value)` pairs in serialization order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        FieldKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Keys whose values differ between `self` and `other`.
    pub fn diff(&self, other: &ChatWidgetConfig) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|&key| self.get(key) != other.get(key))
            .collect()
    }

    /// The preset matching `font_family`, if any.
    pub fn font_preset(&self) -> Option<FontPreset> {
        FontPreset::from_css_stack(&self.font_family)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_has_documented_values() {
        // Arrange / Act
        let cfg = ChatWidgetConfig::default();

        // Assert
        assert_eq!(cfg.config_name, "config-1");
        assert_eq!(cfg.bot_name, "Chatbot");
        assert_eq!(cfg.font_family, "Space Grotesk, sans-serif");
        assert_eq!(cfg.header_color, "#E63A1E");
        assert_eq!(cfg.header_font_color, "#FFFFFF");
        assert_eq!(cfg.background_color, "#E8E1DB");
        assert_eq!(cfg.chat_font_color, "#323130");
        assert_eq!(cfg.avatar_image, "");
        assert_eq!(cfg.launcher_image, "");
    }

    #[test]
    fn test_default_font_is_a_preset() {
        let cfg = ChatWidgetConfig::default();
        assert_eq!(cfg.font_preset(), Some(FontPreset::SpaceGrotesk));
    }

    // ── FieldKey ──────────────────────────────────────────────────────────────

    #[test]
    fn test_field_key_parses_every_camel_case_name() {
        for key in FieldKey::ALL {
            assert_eq!(key.as_str().parse::<FieldKey>(), Ok(key));
        }
    }

    #[test]
    fn test_field_key_rejects_unknown_name() {
        // Arrange / Act
        let result = "notAField".parse::<FieldKey>();

        // Assert
        assert_eq!(result, Err(UnknownFieldKey("notAField".to_string())));
    }

    #[test]
    fn test_field_key_parsing_is_case_sensitive() {
        assert!("BotName".parse::<FieldKey>().is_err());
        assert!("bot_name".parse::<FieldKey>().is_err());
    }

    #[test]
    fn test_field_key_label_splits_camel_case() {
        assert_eq!(FieldKey::HeaderFontColor.label(), "Header Font Color");
        assert_eq!(FieldKey::BotName.label(), "Bot Name");
        assert_eq!(FieldKey::LauncherImage.label(), "Launcher Image");
    }

    #[test]
    fn test_field_key_groups_are_disjoint() {
        for key in FieldKey::ALL {
            assert!(!(key.is_color() && key.is_image()), "{key} is in both groups");
        }
        assert_eq!(FieldKey::ALL.iter().filter(|k| k.is_color()).count(), 4);
        assert_eq!(FieldKey::ALL.iter().filter(|k| k.is_image()).count(), 2);
    }

    // ── FontPreset ────────────────────────────────────────────────────────────

    #[test]
    fn test_font_preset_lookup_accepts_label_and_stack() {
        assert_eq!(FontPreset::lookup("roboto"), Some(FontPreset::Roboto));
        assert_eq!(FontPreset::lookup("Arial, sans-serif"), Some(FontPreset::Arial));
        assert_eq!(FontPreset::lookup("Comic Sans"), None);
    }

    #[test]
    fn test_custom_font_has_no_preset() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::FontFamily, "Inter, sans-serif");
        assert_eq!(cfg.font_preset(), None);
    }

    // ── with_field ────────────────────────────────────────────────────────────

    #[test]
    fn test_with_field_changes_only_the_named_field() {
        // Arrange
        let before = ChatWidgetConfig::default();

        // Act
        let after = before.with_field(FieldKey::BotName, "Helper");

        // Assert
        assert_eq!(after.bot_name, "Helper");
        assert_eq!(before.diff(&after), vec![FieldKey::BotName]);
    }

    #[test]
    fn test_with_field_does_not_mutate_original() {
        let before = ChatWidgetConfig::default();
        let _ = before.with_field(FieldKey::HeaderColor, "#000000");
        assert_eq!(before.header_color, DEFAULT_HEADER_COLOR);
    }

    #[test]
    fn test_get_reads_back_every_field_written() {
        let mut cfg = ChatWidgetConfig::default();
        for key in FieldKey::ALL {
            cfg = cfg.with_field(key, format!("value-of-{key}"));
        }
        for (key, value) in cfg.fields() {
            assert_eq!(value, format!("value-of-{key}"));
        }
    }
}
