//! Style formatter: pure string transforms wrapping text in markup.
//!
//! The markup these produce is exactly what [`crate::text::measure`] strips,
//! so styled text measures and wraps the same as its plain form.

use super::measure::strip_markup;

/// Wrap a whole string in a color tag.
#[inline]
pub fn colored(text: &str, color: &str) -> String {
    format!("<color={color}>{text}</color>")
}

/// Wrap a whole string in a size tag.
#[inline]
pub fn sized(text: &str, size: u16) -> String {
    format!("<size={size}>{text}</size>")
}

/// Color only the character range `[start, end)` of `text`.
///
/// Indices are character positions into the unstyled text. `start` is
/// clamped to `end`, both are clamped to the text length, and any prefix or
/// suffix outside the range is left untouched. An empty range returns the
/// text unchanged.
pub fn colored_range(text: &str, color: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let end = end.min(chars.len());
    let start = start.min(end);
    if start == end {
        return text.to_string();
    }

    let prefix: String = chars[..start].iter().collect();
    let slice: String = chars[start..end].iter().collect();
    let suffix: String = chars[end..].iter().collect();
    format!("{prefix}<color={color}>{slice}</color>{suffix}")
}

/// Strip any existing markup, then re-color the whole string.
///
/// Used for focus highlighting so nested colors never conflict.
#[inline]
pub fn recolored(text: &str, color: &str) -> String {
    colored(&strip_markup(text), color)
}

// =============================================================================
// StyleSheet
// =============================================================================

/// The palette a menu styles its elements with. Plain data; hosts override
/// individual entries to match their scheme.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// Focused, available element.
    pub selected: String,
    /// Unavailable, unfocused element.
    pub disabled: String,
    /// Unavailable element under the cursor; takes precedence over `disabled`.
    pub disabled_selected: String,
    /// Window title text.
    pub title: String,
    /// De-emphasized glyphs: exhausted scroll indicators, inline suggestions.
    pub dim: String,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            selected: "#ffd75f".to_string(),
            disabled: "#5f5f5f".to_string(),
            disabled_selected: "#875f5f".to_string(),
            title: "#87afff".to_string(),
            dim: "#444444".to_string(),
        }
    }
}
