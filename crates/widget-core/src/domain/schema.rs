//! Shape validation for loaded config documents.
//!
//! A config file is accepted only if it is a JSON object with exactly the
//! nine known keys, each holding a string.  Validation collects every
//! violation rather than stopping at the first, so the caller can show the
//! user everything that is wrong with a file in one message.
//!
//! Nothing here checks field *contents* (colors, fonts, image references);
//! that is the linter's job and it never blocks a load.

use serde_json::{Map, Value};
use thiserror::Error;

use super::config::{ChatWidgetConfig, FieldKey};

/// One way in which a JSON document fails to be a widget config.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The top-level value is not an object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// A required key is absent.
    #[error("missing required field `{0}`")]
    MissingField(FieldKey),

    /// A known key holds something other than a string.
    #[error("field `{field}` must be a string, found {found}")]
    WrongType { field: FieldKey, found: &'static str },

    /// A key that is not one of the nine config fields.
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

/// Why a text could not be loaded as a config.
#[derive(Debug, Error)]
pub enum MalformedConfig {
    /// The text is not valid JSON.
    #[error("not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The text is JSON but does not have the config's shape.
    #[error("config does not match the widget schema: {}", join_violations(.0))]
    Schema(Vec<SchemaViolation>),
}

impl MalformedConfig {
    /// Schema violations, or an empty slice for syntax errors.
    pub fn violations(&self) -> &[SchemaViolation] {
        match self {
            MalformedConfig::Syntax(_) => &[],
            MalformedConfig::Schema(violations) => violations,
        }
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses `text` as JSON and validates it into a [`ChatWidgetConfig`].
///
/// # Errors
///
/// [`MalformedConfig::Syntax`] if `text` is not JSON, otherwise
/// [`MalformedConfig::Schema`] listing every shape violation.
pub fn parse_config(text: &str) -> Result<ChatWidgetConfig, MalformedConfig> {
    let value: Value = serde_json::from_str(text).map_err(MalformedConfig::Syntax)?;
    validate(&value).map_err(MalformedConfig::Schema)
}

/// Validates an already-parsed JSON value.
///
/// # Errors
///
/// Returns every [`SchemaViolation`] found, in a stable order: unknown keys
/// (alphabetical), then missing or mistyped fields in serialization order.
pub fn validate(value: &Value) -> Result<ChatWidgetConfig, Vec<SchemaViolation>> {
    let Value::Object(object) = value else {
        return Err(vec![SchemaViolation::NotAnObject {
            found: json_type_name(value),
        }]);
    };

    let mut violations = unknown_keys(object);
    let mut config = ChatWidgetConfig::default();

    for key in FieldKey::ALL {
        match object.get(key.as_str()) {
            Some(Value::String(s)) => config = config.with_field(key, s.as_str()),
            Some(other) => violations.push(SchemaViolation::WrongType {
                field: key,
                found: json_type_name(other),
            }),
            None => violations.push(SchemaViolation::MissingField(key)),
        }
    }

    if violations.is_empty() {
        Ok(config)
    } else {
        Err(violations)
    }
}

fn unknown_keys(object: &Map<String, Value>) -> Vec<SchemaViolation> {
    let mut unknown: Vec<&String> = object
        .keys()
        .filter(|k| k.parse::<FieldKey>().is_err())
        .collect();
    unknown.sort();
    unknown
        .into_iter()
        .map(|k| SchemaViolation::UnknownField(k.clone()))
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r##"{
        "configName": "config-1",
        "botName": "Chatbot",
        "fontFamily": "Space Grotesk, sans-serif",
        "headerColor": "#E63A1E",
        "headerFontColor": "#FFFFFF",
        "backgroundColor": "#E8E1DB",
        "chatFontColor": "#323130",
        "avatarImage": "",
        "launcherImage": ""
    }"##;

    #[test]
    fn test_parse_full_document_yields_config() {
        // Arrange / Act
        let cfg = parse_config(FULL).expect("full document must parse");

        // Assert
        assert_eq!(cfg, ChatWidgetConfig::default());
    }

    #[test]
    fn test_parse_invalid_json_is_syntax_error() {
        let err = parse_config("{not json").unwrap_err();
        assert!(matches!(err, MalformedConfig::Syntax(_)));
        assert!(err.violations().is_empty());
    }

    #[test]
    fn test_top_level_array_is_not_an_object() {
        let err = parse_config("[1, 2]").unwrap_err();
        assert_eq!(
            err.violations(),
            &[SchemaViolation::NotAnObject { found: "an array" }]
        );
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        // Arrange: only two of the nine keys
        let text = r#"{"configName": "x", "botName": "y"}"#;

        // Act
        let err = parse_config(text).unwrap_err();

        // Assert
        let missing: Vec<_> = err
            .violations()
            .iter()
            .filter_map(|v| match v {
                SchemaViolation::MissingField(k) => Some(*k),
                _ => None,
            })
            .collect();
        assert_eq!(missing, FieldKey::ALL[2..].to_vec());
    }

    #[test]
    fn test_non_string_value_is_wrong_type() {
        let text = FULL.replace(r#""botName": "Chatbot""#, r#""botName": 42"#);
        let err = parse_config(&text).unwrap_err();
        assert_eq!(
            err.violations(),
            &[SchemaViolation::WrongType {
                field: FieldKey::BotName,
                found: "a number",
            }]
        );
    }

    #[test]
    fn test_null_value_is_wrong_type() {
        let text = FULL.replace(r#""avatarImage": """#, r#""avatarImage": null"#);
        let err = parse_config(&text).unwrap_err();
        assert_eq!(
            err.violations(),
            &[SchemaViolation::WrongType {
                field: FieldKey::AvatarImage,
                found: "null",
            }]
        );
    }

    #[test]
    fn test_unknown_keys_are_reported_alphabetically() {
        let text = FULL.replacen('{', r#"{"zeta": "1", "alpha": "2","#, 1);
        let err = parse_config(&text).unwrap_err();
        assert_eq!(
            err.violations(),
            &[
                SchemaViolation::UnknownField("alpha".to_string()),
                SchemaViolation::UnknownField("zeta".to_string()),
            ]
        );
    }

    #[test]
    fn test_schema_error_message_lists_every_violation() {
        let err = parse_config(r#"{"botName": true}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing required field `configName`"));
        assert!(message.contains("field `botName` must be a string, found a boolean"));
    }

    #[test]
    fn test_empty_string_values_are_accepted() {
        // Only shape is checked; contents are the linter's concern.
        let text = FULL.replace(r#""botName": "Chatbot""#, r#""botName": """#);
        let cfg = parse_config(&text).expect("empty strings are valid strings");
        assert_eq!(cfg.bot_name, "");
    }
}
