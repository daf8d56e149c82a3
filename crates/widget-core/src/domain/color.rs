//! `#RRGGBB` color helpers.
//!
//! The store accepts any string for a color field, the same way the color
//! picker in the original editor never rejected input.  These helpers are for
//! callers that want to check or tidy a value before patching it, and for the
//! linter.

/// Returns `true` if `value` is exactly `#` followed by six hex digits.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Normalizes a user-typed color to upper-case `#RRGGBB`.
///
/// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB` (surrounding whitespace is
/// ignored).  Returns `None` for anything else.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match digits.len() {
        6 => digits.to_string(),
        // #RGB is shorthand for #RRGGBB.
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex_color_accepts_six_digit_form() {
        assert!(is_hex_color("#E63A1E"));
        assert!(is_hex_color("#e63a1e"));
    }

    #[test]
    fn test_is_hex_color_rejects_other_forms() {
        assert!(!is_hex_color("E63A1E"));
        assert!(!is_hex_color("#FFF"));
        assert!(!is_hex_color("#GGGGGG"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn test_normalize_uppercases_and_adds_hash() {
        assert_eq!(normalize_hex_color("e63a1e").as_deref(), Some("#E63A1E"));
        assert_eq!(normalize_hex_color(" #ffffff ").as_deref(), Some("#FFFFFF"));
    }

    #[test]
    fn test_normalize_expands_short_form() {
        assert_eq!(normalize_hex_color("#fa0").as_deref(), Some("#FFAA00"));
    }

    #[test]
    fn test_normalize_rejects_non_hex() {
        assert_eq!(normalize_hex_color("blue"), None);
        assert_eq!(normalize_hex_color("#12345"), None);
        assert_eq!(normalize_hex_color("#"), None);
    }
}
