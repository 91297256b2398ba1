//! Text measurement for mixed-width glyphs and inline markup.
//!
//! Display text may embed `<...>` style markup produced by [`crate::text::style`].
//! Markup spans never occupy cells, so every measurement strips them first.
//!
//! Width rules:
//! - ASCII printable: 1 cell
//! - ASCII control: 0 cells
//! - Full-width (any non-ASCII glyph): starts at 2.5 cells and shrinks by
//!   0.075 for each full-width glyph already counted in the same call,
//!   floored at 2.0. Long CJK runs render narrower than their count
//!   suggests in the target proportional font; this reproduces that.
//!
//! The accumulated total is truncated to an integer at the end, so
//! `display_width("中中中")` is `trunc(2.5 + 2.425 + 2.35) = 7`.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

/// Base cell contribution of the first full-width glyph in a measurement.
pub(crate) const FULL_WIDTH_BASE: f64 = 2.5;
/// Per-glyph narrowing applied to each subsequent full-width glyph.
pub(crate) const FULL_WIDTH_DECAY: f64 = 0.075;
/// Narrowing never exceeds this, keeping every glyph at least 2.0 wide.
pub(crate) const FULL_WIDTH_DECAY_CAP: f64 = 0.5;

/// Cell contribution of one glyph, given how many full-width glyphs came
/// before it in the same measurement.
pub(crate) fn glyph_width(c: char, full_width_seen: usize) -> f64 {
    if c.is_ascii() {
        // Control characters report no width; printable ASCII is 1 cell.
        UnicodeWidthChar::width(c).unwrap_or(0).min(1) as f64
    } else {
        FULL_WIDTH_BASE - (full_width_seen as f64 * FULL_WIDTH_DECAY).min(FULL_WIDTH_DECAY_CAP)
    }
}

/// Strip all matched `<...>` markup spans from a string.
///
/// Spans do not nest. An unmatched `<` with no closing `>` is kept as
/// literal text. Returns `Cow::Borrowed` when the input has no markup.
pub fn strip_markup(s: &str) -> Cow<'_, str> {
    if !s.contains('<') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        result.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                // No closing bracket: literal text, keep it.
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    Cow::Owned(result)
}

/// Measure the display width of a string in cells.
///
/// Markup is stripped first and never counts. Full-width glyphs use the
/// per-call decay described in the module docs; the total is truncated.
pub fn display_width(text: &str) -> usize {
    let stripped = strip_markup(text);
    let mut total = 0.0f64;
    let mut full_width_seen = 0usize;

    for c in stripped.chars() {
        total += glyph_width(c, full_width_seen);
        if !c.is_ascii() {
            full_width_seen += 1;
        }
    }

    total as usize
}

/// Shorten a string to at most `max` display cells.
///
/// Markup tags never count and are copied through whole, so a span clipped
/// mid-way still carries its closing tag. Visible glyphs accumulate with
/// the same decay as [`display_width`]; the first glyph that would push
/// the truncated total past `max` is dropped along with everything visible
/// after it.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut total = 0.0f64;
    let mut full_width_seen = 0usize;
    let mut clipped = false;

    let mut push_visible = |seg: &str, out: &mut String| {
        for c in seg.chars() {
            if clipped {
                return;
            }
            let w = glyph_width(c, full_width_seen);
            if (total + w) as usize > max {
                clipped = true;
                return;
            }
            total += w;
            if !c.is_ascii() {
                full_width_seen += 1;
            }
            out.push(c);
        }
    };

    let mut rest = text;
    while let Some(open) = rest.find('<') {
        push_visible(&rest[..open], &mut out);
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[open..open + close + 1]);
                rest = &rest[open + close + 1..];
            }
            None => {
                // No closing bracket: literal text, counted like any other.
                rest = &rest[open..];
                break;
            }
        }
    }
    push_visible(rest, &mut out);
    out
}

/// Integer width without the full-width decay: full-width = 2, ASCII
/// printable = 1, control = 0. Markup is stripped.
///
/// Used where exact integer comparisons matter, such as padding math and
/// arrow column bookkeeping.
pub fn width_aware_len(text: &str) -> usize {
    let stripped = strip_markup(text);
    stripped
        .chars()
        .map(|c| {
            if c.is_ascii() {
                UnicodeWidthChar::width(c).unwrap_or(0).min(1)
            } else {
                2
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("a b c"), 5);
    }

    #[test]
    fn test_display_width_control_chars() {
        assert_eq!(display_width("\t"), 0);
        assert_eq!(display_width("a\tb"), 2);
    }

    #[test]
    fn test_display_width_full_width_decay() {
        // 2.5 -> 2
        assert_eq!(display_width("中"), 2);
        // 2.5 + 2.425 = 4.925 -> 4
        assert_eq!(display_width("中中"), 4);
        // 2.5 + 2.425 + 2.35 = 7.275 -> 7
        assert_eq!(display_width("中中中"), 7);
    }

    #[test]
    fn test_display_width_decay_floor() {
        // After seven glyphs the decay caps at 0.5, so every further glyph
        // contributes exactly 2.0.
        let ten: String = "中".repeat(10);
        let eleven: String = "中".repeat(11);
        assert_eq!(display_width(&eleven) - display_width(&ten), 2);
    }

    #[test]
    fn test_display_width_mixed() {
        // "a" (1.0) + "中" (2.5) + "b" (1.0) = 4.5 -> 4
        assert_eq!(display_width("a中b"), 4);
    }

    #[test]
    fn test_display_width_strips_markup() {
        assert_eq!(display_width("<color=#ff0000>red</color>"), 3);
        assert_eq!(display_width("<b>中</b>"), 2);
    }

    #[test]
    fn test_display_width_decay_resets_per_call() {
        let w = display_width("中中");
        assert_eq!(display_width("中中"), w);
    }

    #[test]
    fn test_strip_markup_borrows_when_clean() {
        assert!(matches!(strip_markup("plain"), Cow::Borrowed(_)));
        assert_eq!(strip_markup("plain"), "plain");
    }

    #[test]
    fn test_strip_markup_removes_spans() {
        assert_eq!(strip_markup("<color=red>x</color>"), "x");
        assert_eq!(strip_markup("a<b>c<d>e"), "ace");
        assert_eq!(strip_markup("<only>"), "");
    }

    #[test]
    fn test_strip_markup_unmatched_open() {
        assert_eq!(strip_markup("a < b"), "a < b");
        assert_eq!(strip_markup("tail<"), "tail<");
    }

    #[test]
    fn test_strip_markup_empty() {
        assert_eq!(strip_markup(""), "");
        assert_eq!(display_width("<a><b>"), 0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello world", 5), "hello");
        assert_eq!(truncate_to_width("short", 10), "short");
        // A wide glyph that does not fit whole is dropped, and with it
        // everything after.
        assert_eq!(truncate_to_width("ab中cd", 3), "ab");
    }

    #[test]
    fn test_truncate_keeps_markup_tags() {
        assert_eq!(
            truncate_to_width("<color=red>abcdef</color>", 3),
            "<color=red>abc</color>"
        );
        // 2.5 + 2.425 fits in 4 cells, the third glyph does not.
        assert_eq!(truncate_to_width("<b>中中中</b>", 4), "<b>中中</b>");
    }

    #[test]
    fn test_width_aware_len() {
        assert_eq!(width_aware_len("abc"), 3);
        assert_eq!(width_aware_len("中中中"), 6);
        assert_eq!(width_aware_len("a中b"), 4);
        assert_eq!(width_aware_len("<color=x>ab</color>"), 2);
        assert_eq!(width_aware_len("a\tb"), 2);
    }
}
