//! Scrollable text state: clamped offset and per-width wrap cache.
//!
//! The visible window `[offset, offset + view_height)` never exceeds the
//! wrapped line count. Wrapping is recomputed lazily and cached per content
//! width; changing the content or the width drops the cache.

use crate::text::wrap::wrap;

/// Indicator glyph above the text when earlier lines exist.
pub const SCROLL_UP_GLYPH: char = '\u{25b2}'; // black up-pointing triangle
/// Indicator glyph below the text when later lines exist.
pub const SCROLL_DOWN_GLYPH: char = '\u{25bc}'; // black down-pointing triangle

#[derive(Debug, Clone)]
struct WrapCache {
    width: usize,
    lines: Vec<String>,
}

/// State of a scrollable text element.
#[derive(Debug, Clone)]
pub struct ScrollTextState {
    content: String,
    offset: usize,
    /// Rows of text visible at once.
    pub view_height: usize,
    cache: Option<WrapCache>,
}

impl ScrollTextState {
    pub fn new(content: &str, view_height: usize) -> Self {
        Self {
            content: content.to_string(),
            offset: 0,
            view_height: view_height.max(1),
            cache: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Replace the content. The wrap cache is dropped and the offset is
    /// re-clamped on the next read.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cache = None;
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    fn ensure_cache(&mut self, width: usize) -> &WrapCache {
        let stale = self
            .cache
            .as_ref()
            .is_none_or(|c| c.width != width);
        if stale {
            self.cache = Some(WrapCache {
                width,
                lines: wrap(&self.content, width),
            });
        }
        // Just populated above when stale.
        self.cache.as_ref().expect("wrap cache populated")
    }

    /// Total wrapped line count at `width`.
    pub fn line_count(&mut self, width: usize) -> usize {
        self.ensure_cache(width).lines.len()
    }

    fn max_offset(&mut self, width: usize) -> usize {
        self.line_count(width).saturating_sub(self.view_height)
    }

    /// Scroll by a line delta, clamped. Returns `true` if the offset moved.
    pub fn scroll_by(&mut self, delta: i32, width: usize) -> bool {
        let max = self.max_offset(width) as i64;
        let before = self.offset;
        self.offset = (self.offset as i64 + delta as i64).clamp(0, max) as usize;
        self.offset != before
    }

    pub fn at_top(&self) -> bool {
        self.offset == 0
    }

    pub fn at_bottom(&mut self, width: usize) -> bool {
        self.offset >= self.max_offset(width)
    }

    /// The lines currently in view, offset re-clamped against the cache.
    pub fn visible_lines(&mut self, width: usize) -> Vec<String> {
        let max = self.max_offset(width);
        self.offset = self.offset.min(max);
        let offset = self.offset;
        let view = self.view_height;
        let cache = self.ensure_cache(width);
        cache
            .lines
            .iter()
            .skip(offset)
            .take(view)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text() -> String {
        (1..=10)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_visible_window() {
        let mut st = ScrollTextState::new(&long_text(), 3);
        assert_eq!(st.visible_lines(20), vec!["line 1", "line 2", "line 3"]);
        st.scroll_by(2, 20);
        assert_eq!(st.visible_lines(20), vec!["line 3", "line 4", "line 5"]);
    }

    #[test]
    fn test_scroll_clamps_at_ends() {
        let mut st = ScrollTextState::new(&long_text(), 3);
        assert!(!st.scroll_by(-1, 20));
        assert!(st.at_top());

        assert!(st.scroll_by(100, 20));
        assert_eq!(st.offset(), 7);
        assert!(st.at_bottom(20));
        assert!(!st.scroll_by(1, 20));
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut st = ScrollTextState::new("one\ntwo", 5);
        assert!(!st.scroll_by(1, 20));
        assert!(st.at_top());
        assert!(st.at_bottom(20));
    }

    #[test]
    fn test_cache_invalidated_by_width_change() {
        let mut st = ScrollTextState::new("aaaa bbbb cccc", 2);
        assert_eq!(st.line_count(14), 1);
        assert_eq!(st.line_count(4), 3);
    }

    #[test]
    fn test_offset_reclamped_after_content_change() {
        let mut st = ScrollTextState::new(&long_text(), 3);
        st.scroll_by(7, 20);
        st.set_content("just one line");
        assert_eq!(st.visible_lines(20), vec!["just one line"]);
        assert_eq!(st.offset(), 0);
    }

    #[test]
    fn test_wrapped_height_counts() {
        let mut st = ScrollTextState::new("aaaa bbbb cccc dddd", 2);
        assert_eq!(st.line_count(9), 2);
        assert_eq!(st.line_count(4), 4);
    }
}
