//! Advisory checks on field contents.
//!
//! The store accepts any string for any field.  The linter is
//! where a caller finds out that a color is not `#RRGGBB` or that an image
//! will not survive being saved.  Diagnostics never block an operation.

use std::fmt;

use super::color::is_hex_color;
use super::config::{ChatWidgetConfig, FieldKey, FontPreset};
use super::image::ImageRef;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The widget renders, but probably not as intended.
    Warning,
    /// The value cannot be rendered at all.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A finding about one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub field: FieldKey,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.field, self.message)
    }
}

/// Checks every field and returns the findings in serialization order.
pub fn lint(config: &ChatWidgetConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for (field, value) in config.fields() {
        match field {
            FieldKey::ConfigName | FieldKey::BotName => {
                if value.trim().is_empty() {
                    out.push(warn(field, "is empty"));
                }
            }
            FieldKey::FontFamily => {
                if value.trim().is_empty() {
                    out.push(warn(field, "is empty; the browser default font will be used"));
                } else if FontPreset::from_css_stack(value).is_none() {
                    out.push(warn(field, format!("{value:?} is not one of the preset fonts")));
                }
            }
            FieldKey::AvatarImage | FieldKey::LauncherImage => lint_image(field, value, &mut out),
            _ if field.is_color() => {
                if !is_hex_color(value) {
                    out.push(warn(field, format!("{value:?} is not a #RRGGBB color")));
                }
            }
            _ => {}
        }
    }
    out
}

/// Returns `true` if any diagnostic is an [`Severity::Error`].
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

fn lint_image(field: FieldKey, value: &str, out: &mut Vec<Diagnostic>) {
    match ImageRef::classify(value) {
        ImageRef::Empty | ImageRef::Remote => {}
        ImageRef::DataUri { mime } => {
            if !mime.starts_with("image/") {
                out.push(warn(field, format!("embedded data has non-image type {mime:?}")));
            }
        }
        ImageRef::MalformedDataUri => out.push(Diagnostic {
            field,
            severity: Severity::Error,
            message: "data URI has no valid base64 payload".to_string(),
        }),
        ImageRef::Blob => out.push(warn(
            field,
            "blob URL is only valid in the session that created it; re-attach the image",
        )),
        ImageRef::LocalPath(path) => out.push(warn(
            field,
            format!("local path {path:?} is not embedded; export will inline it"),
        )),
    }
}

fn warn(field: FieldKey, message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        field,
        severity: Severity::Warning,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        assert!(lint(&ChatWidgetConfig::default()).is_empty());
    }

    #[test]
    fn test_bad_color_is_a_warning() {
        // Arrange
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::HeaderColor, "red");

        // Act
        let diagnostics = lint(&cfg);

        // Assert
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, FieldKey::HeaderColor);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(!has_errors(&diagnostics));
    }

    #[test]
    fn test_custom_font_is_a_warning() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::FontFamily, "Inter");
        let diagnostics = lint(&cfg);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, FieldKey::FontFamily);
    }

    #[test]
    fn test_empty_bot_name_is_a_warning() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::BotName, "   ");
        let diagnostics = lint(&cfg);
        assert_eq!(diagnostics[0].field, FieldKey::BotName);
        assert_eq!(diagnostics[0].message, "is empty");
    }

    #[test]
    fn test_blob_image_is_a_warning() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::AvatarImage, "blob:http://x/1");
        let diagnostics = lint(&cfg);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("re-attach"));
    }

    #[test]
    fn test_malformed_data_uri_is_an_error() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::LauncherImage, "data:image/png,xyz");
        let diagnostics = lint(&cfg);
        assert!(has_errors(&diagnostics));
    }

    #[test]
    fn test_undecodable_data_uri_payload_is_an_error() {
        // Arrange
        let cfg = ChatWidgetConfig::default()
            .with_field(FieldKey::AvatarImage, "data:image/png;base64,@@@not base64@@@");

        // Act
        let diagnostics = lint(&cfg);

        // Assert
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, FieldKey::AvatarImage);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_diagnostic_display_includes_field_and_severity() {
        let d = warn(FieldKey::ChatFontColor, "is odd");
        assert_eq!(d.to_string(), "warning: chatFontColor: is odd");
    }
}
