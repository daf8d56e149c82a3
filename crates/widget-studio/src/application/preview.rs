//! Live-preview rendering.
//!
//! Produces a standalone HTML page showing the widget the way the config
//! describes it: a header bar with the bot name, a chat body with the avatar
//! and greeting, a message input, and the launcher button.
//!
//! Every config value is untrusted text as far as HTML is concerned (a bot
//! name can contain `<`), so all interpolation goes through [`escape`].

use std::fmt::{self, Write as _};

use widget_core::domain::color::is_hex_color;
use widget_core::domain::config::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_CHAT_FONT_COLOR, DEFAULT_HEADER_COLOR,
    DEFAULT_HEADER_FONT_COLOR,
};
use widget_core::{ChatWidgetConfig, FieldKey, FontPreset, ImageRef};

/// Placeholder text shown in the message input.
pub const INPUT_PLACEHOLDER: &str = "Need help? Type here...";

/// The greeting shown in the chat body.
pub fn greeting(bot_name: &str) -> String {
    format!("Hi! I'm {bot_name}. How can I assist you today?")
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = "\
body { margin: 0; padding: 40px; background: #f4f4f4; font-family: sans-serif; }
.chat-widget { width: 340px; border-radius: 8px; overflow: hidden; box-shadow: 0 4px 16px rgba(0,0,0,.15); }
.chat-header { padding: 14px 16px; font-weight: bold; }
.chat-body { display: flex; align-items: flex-start; padding: 15px; min-height: 160px; }
.chat-body img { width: 40px; height: 40px; border-radius: 50%; object-fit: cover; margin-right: 10px; }
.chat-input input { width: 100%; box-sizing: border-box; padding: 10px 40px 10px 12px; border: 1px solid #ddd; }
.launcher { margin-top: 16px; width: 56px; height: 56px; border-radius: 50%; border: none; padding: 0; overflow: hidden; }
.launcher img { width: 100%; height: 100%; object-fit: cover; }
";

/// Renders the preview page for `config`.
///
/// Image fields are shown only when they hold something a browser can load
/// (a data URI, a URL, or a path); an empty or malformed reference is
/// omitted.  Colors that are not `#RRGGBB` and font stacks containing CSS
/// punctuation are replaced by the defaults inside `style` attributes.
pub fn render_html(config: &ChatWidgetConfig) -> String {
    let mut html = String::new();
    write_page(&mut html, config)
        .unwrap_or_else(|e| unreachable!("formatting into a String failed: {e}"));
    html
}

fn write_page(html: &mut String, config: &ChatWidgetConfig) -> fmt::Result {
    let bot = escape(&config.bot_name);

    write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} preview</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n",
        title = escape(&config.config_name),
    )?;
    writeln!(
        html,
        "<div class=\"chat-widget\" style=\"font-family: {}\">",
        escape(style_font(&config.font_family))
    )?;
    writeln!(
        html,
        "  <div class=\"chat-header\" style=\"background-color: {}; color: {}\"><span>{bot}</span></div>",
        style_color(config, FieldKey::HeaderColor),
        style_color(config, FieldKey::HeaderFontColor),
    )?;
    writeln!(
        html,
        "  <div class=\"chat-body\" style=\"background-color: {}; color: {}\">",
        style_color(config, FieldKey::BackgroundColor),
        style_color(config, FieldKey::ChatFontColor),
    )?;
    if is_displayable(&config.avatar_image) {
        writeln!(
            html,
            "    <img src=\"{}\" alt=\"Avatar\">",
            escape(&config.avatar_image)
        )?;
    }
    writeln!(html, "    <p>{}</p>", escape(&greeting(&config.bot_name)))?;
    html.push_str("  </div>\n");
    writeln!(
        html,
        "  <div class=\"chat-input\"><input type=\"text\" placeholder=\"{}\"></div>",
        escape(INPUT_PLACEHOLDER)
    )?;
    html.push_str("</div>\n");
    if is_displayable(&config.launcher_image) {
        writeln!(
            html,
            "<button class=\"launcher\" style=\"background-color: {}\"><img src=\"{}\" alt=\"Launcher\"></button>",
            style_color(config, FieldKey::HeaderColor),
            escape(&config.launcher_image),
        )?;
    }
    html.push_str("</body>\n</html>\n");
    Ok(())
}

fn is_displayable(reference: &str) -> bool {
    !matches!(
        ImageRef::classify(reference),
        ImageRef::Empty | ImageRef::MalformedDataUri
    )
}

/// The color for `key` if it is `#RRGGBB`, otherwise the field's default.
fn style_color(config: &ChatWidgetConfig, key: FieldKey) -> &str {
    let value = config.get(key);
    if is_hex_color(value) {
        return value;
    }
    match key {
        FieldKey::HeaderColor => DEFAULT_HEADER_COLOR,
        FieldKey::HeaderFontColor => DEFAULT_HEADER_FONT_COLOR,
        FieldKey::BackgroundColor => DEFAULT_BACKGROUND_COLOR,
        _ => DEFAULT_CHAT_FONT_COLOR,
    }
}

/// The font stack if it is plain family names, otherwise the default preset.
fn style_font(stack: &str) -> &str {
    let plain = !stack.trim().is_empty()
        && stack
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | ',' | '-' | '_' | '"' | '\''));
    if plain {
        stack
    } else {
        FontPreset::default().css_stack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_greeting_includes_bot_name() {
        assert_eq!(greeting("Helper"), "Hi! I'm Helper. How can I assist you today?");
    }

    #[test]
    fn test_render_default_config_shows_header_and_greeting() {
        // Arrange
        let cfg = ChatWidgetConfig::default();

        // Act
        let html = render_html(&cfg);

        // Assert
        assert!(html.contains("<span>Chatbot</span>"));
        assert!(html.contains("background-color: #E63A1E; color: #FFFFFF"));
        assert!(html.contains("background-color: #E8E1DB; color: #323130"));
        assert!(html.contains("font-family: Space Grotesk, sans-serif"));
        assert!(html.contains("Hi! I&#39;m Chatbot. How can I assist you today?"));
        assert!(html.contains("placeholder=\"Need help? Type here...\""));
    }

    #[test]
    fn test_render_without_images_omits_img_tags() {
        let html = render_html(&ChatWidgetConfig::default());
        assert!(!html.contains("<img"));
        assert!(!html.contains("class=\"launcher\""));
    }

    #[test]
    fn test_render_with_images_includes_them() {
        let cfg = ChatWidgetConfig::default()
            .with_field(FieldKey::AvatarImage, "data:image/png;base64,AAAA")
            .with_field(FieldKey::LauncherImage, "https://cdn.example/l.png");

        let html = render_html(&cfg);

        assert!(html.contains("<img src=\"data:image/png;base64,AAAA\" alt=\"Avatar\">"));
        assert!(html.contains("<img src=\"https://cdn.example/l.png\" alt=\"Launcher\">"));
    }

    #[test]
    fn test_render_escapes_hostile_bot_name() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::BotName, "<script>x</script>");
        let html = render_html(&cfg);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn test_render_escapes_attribute_breakout() {
        let cfg = ChatWidgetConfig::default().with_field(FieldKey::BotName, "x\" onclick=\"y");
        let html = render_html(&cfg);
        assert!(!html.contains("onclick=\"y"));
    }

    #[test]
    fn test_non_hex_color_falls_back_to_default_in_style() {
        // Arrange
        let cfg = ChatWidgetConfig::default()
            .with_field(FieldKey::HeaderColor, "red; background:url(x)")
            .with_field(FieldKey::ChatFontColor, "#00FF00");

        // Act
        let html = render_html(&cfg);

        // Assert
        assert!(!html.contains("background:url"));
        assert!(html.contains("background-color: #E63A1E; color: #FFFFFF"));
        assert!(html.contains("background-color: #E8E1DB; color: #00FF00"));
    }

    #[test]
    fn test_font_with_css_punctuation_falls_back_to_default() {
        let custom = ChatWidgetConfig::default().with_field(FieldKey::FontFamily, "Inter, sans-serif");
        let hostile = ChatWidgetConfig::default()
            .with_field(FieldKey::FontFamily, "Arial; background:url(x)");

        assert!(render_html(&custom).contains("font-family: Inter, sans-serif"));
        let html = render_html(&hostile);
        assert!(!html.contains("background:url"));
        assert!(html.contains("font-family: Space Grotesk, sans-serif"));
    }

    #[test]
    fn test_undecodable_data_uri_is_not_rendered() {
        let cfg = ChatWidgetConfig::default()
            .with_field(FieldKey::AvatarImage, "data:image/png;base64,@@@not base64@@@");
        assert!(!render_html(&cfg).contains("<img"));
    }
}
