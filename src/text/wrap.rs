//! Width-constrained, markup-safe line wrapping.
//!
//! Two strategies, picked per segment:
//! - All-ASCII text (after markup is stripped): greedy word packing on
//!   spaces. A single word wider than the limit gets its own line.
//! - Mixed-width text: character greedy packing using the same decayed
//!   full-width accumulation as [`display_width`], restarted per output
//!   line. An open `<...>` tag is copied verbatim into the current line,
//!   never split, and contributes no width.
//!
//! Wrapping is a pure function of its input: re-wrapping any output line at
//! the same limit yields that line unchanged.

use super::measure::{display_width, glyph_width, strip_markup};

/// Wrap text into lines no wider than `limit` cells.
///
/// Explicit newlines always break; interior blank lines are preserved.
/// Empty input produces no lines.
pub fn wrap(text: &str, limit: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let segments: Vec<&str> = text.split('\n').collect();
    let mut lines = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            // Blank line between paragraphs; a trailing newline adds nothing.
            if i + 1 < segments.len() {
                lines.push(String::new());
            }
            continue;
        }
        wrap_segment(segment, limit, &mut lines);
    }

    lines
}

fn wrap_segment(segment: &str, limit: usize, lines: &mut Vec<String>) {
    let stripped = strip_markup(segment);
    if stripped.chars().all(|c| c.is_ascii()) {
        wrap_words(segment, limit, lines);
    } else {
        wrap_chars(segment, limit, lines);
    }
}

/// Greedy word packing for ASCII text. Markup rides along inside words and
/// does not count toward width.
fn wrap_words(segment: &str, limit: usize, lines: &mut Vec<String>) {
    let mut current = String::new();

    for word in segment.split(' ') {
        if current.is_empty() {
            current = word.to_string();
            continue;
        }
        let candidate = format!("{current} {word}");
        if display_width(&candidate) <= limit {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
}

/// Character greedy packing for mixed-width text. Each output line restarts
/// the full-width decay, matching what `display_width` reports for it.
fn wrap_chars(segment: &str, limit: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut acc = 0.0f64;
    let mut full_width_seen = 0usize;
    let mut visible = 0usize;
    let mut rest = segment;

    while !rest.is_empty() {
        // A matched tag is copied whole into the current line, zero width.
        if rest.starts_with('<') {
            if let Some(close) = rest[1..].find('>') {
                let after = 1 + close + 1;
                current.push_str(&rest[..after]);
                rest = &rest[after..];
                continue;
            }
        }

        let Some(c) = rest.chars().next() else { break };
        rest = &rest[c.len_utf8()..];

        let w = glyph_width(c, full_width_seen);
        if visible > 0 && (acc + w) as usize > limit {
            lines.push(std::mem::take(&mut current));
            acc = 0.0;
            full_width_seen = 0;
            visible = 0;
        }

        current.push(c);
        acc += w;
        visible += 1;
        if !c.is_ascii() {
            full_width_seen += 1;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_wrap_short_line() {
        assert_eq!(wrap("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(
            wrap("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_oversized_word_own_line() {
        assert_eq!(
            wrap("a extraordinarily b", 6),
            vec!["a", "extraordinarily", "b"]
        );
    }

    #[test]
    fn test_wrap_newlines() {
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap("a\n", 10), vec!["a"]);
    }

    #[test]
    fn test_wrap_full_width_chars() {
        // Each line restarts the decay: first two glyphs are 4.925 -> 4,
        // adding a third reaches 7.275 -> 7 which exceeds 6.
        assert_eq!(wrap("中中中中", 6), vec!["中中", "中中"]);
    }

    #[test]
    fn test_wrap_mixed_respects_limit() {
        for line in wrap("ab中cd中ef中gh", 5) {
            assert!(display_width(&line) <= 5, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_wrap_never_splits_markup() {
        let lines = wrap("<color=#00ff00>中中中中中</color>", 6);
        for line in &lines {
            let opens = line.matches('<').count();
            let closes = line.matches('>').count();
            assert_eq!(opens, closes, "split tag in {line:?}");
        }
        // Tag characters count nothing toward width.
        let rejoined: String = lines.join("");
        assert_eq!(
            crate::text::measure::strip_markup(&rejoined),
            "中中中中中"
        );
    }

    #[test]
    fn test_wrap_markup_in_ascii_words() {
        let lines = wrap("pick <color=red>one</color> now", 8);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "pick <color=red>one</color>");
        assert_eq!(lines[1], "now");
    }

    #[test]
    fn test_wrap_idempotent_ascii() {
        let first = wrap("the quick brown fox jumps over the lazy dog", 11);
        for line in &first {
            assert_eq!(wrap(line, 11), vec![line.clone()]);
        }
    }

    #[test]
    fn test_wrap_idempotent_mixed() {
        let first = wrap("ab中cd中中ef中gh中中中", 7);
        for line in &first {
            assert_eq!(wrap(line, 7), vec![line.clone()]);
        }
    }
}
