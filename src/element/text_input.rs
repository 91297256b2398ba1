//! Text input editing state: caret, selection range, inline prediction.
//!
//! Caret and selection positions are character indices. Caret movement
//! steps by grapheme cluster so combining sequences never split. A
//! prediction-enabled input resolves the first case-insensitive prefix
//! match from its sorted candidate list as an inline suggestion; accepting
//! it replaces the full content.

use unicode_segmentation::UnicodeSegmentation;

use crate::text::style::{colored, colored_range};

/// Glyph drawn at the caret position while editing.
pub const CARET_GLYPH: char = '\u{258c}'; // left half block

/// Editing state of a text input element.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    text: String,
    /// Caret as a character index into `text`, `0..=len`.
    caret: usize,
    /// Selected character range `[start, end)`, if any.
    selection: Option<(usize, usize)>,
    editing: bool,
    /// Maximum content length in characters; 0 means unlimited.
    pub max_length: usize,
    /// Sorted prediction candidates; empty disables prediction.
    predictions: Vec<String>,
}

impl TextInputState {
    pub fn new(initial: &str) -> Self {
        Self {
            text: initial.to_string(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Enter edit mode. The caret starts at the end of the content and any
    /// stale selection is dropped.
    pub fn begin_edit(&mut self) {
        self.editing = true;
        self.selection = None;
        self.caret = self.char_count();
    }

    /// Leave edit mode, clearing caret and selection.
    pub fn end_edit(&mut self) {
        self.editing = false;
        self.selection = None;
        self.caret = 0;
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = self.caret.min(self.char_count());
        self.selection = None;
    }

    /// Replace the candidate list, keeping it sorted for prefix resolution.
    pub fn set_predictions(&mut self, mut candidates: Vec<String>) {
        candidates.sort();
        self.predictions = candidates;
    }

    // =========================================================================
    // Caret movement
    // =========================================================================

    /// Grapheme boundary strictly after `caret`, as a char index.
    fn next_boundary(&self) -> usize {
        let mut count = 0;
        for g in self.text.graphemes(true) {
            let len = g.chars().count();
            if count + len > self.caret {
                return count + len;
            }
            count += len;
        }
        count
    }

    /// Grapheme boundary strictly before `caret`, as a char index.
    fn prev_boundary(&self) -> usize {
        let mut prev = 0;
        let mut count = 0;
        for g in self.text.graphemes(true) {
            if count >= self.caret {
                break;
            }
            prev = count;
            count += g.chars().count();
        }
        prev
    }

    pub fn move_left(&mut self) {
        if let Some((start, _)) = self.selection.take() {
            self.caret = start;
        } else {
            self.caret = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if let Some((_, end)) = self.selection.take() {
            self.caret = end.min(self.char_count());
        } else if self.caret < self.char_count() {
            self.caret = self.next_boundary();
        }
    }

    pub fn move_home(&mut self) {
        self.selection = None;
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.selection = None;
        self.caret = self.char_count();
    }

    /// Select the character range `[start, end)`, clamped and normalized.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_count();
        let end = end.min(len);
        let start = start.min(end);
        self.selection = if start == end { None } else { Some((start, end)) };
        self.caret = end;
    }

    pub fn select_all(&mut self) {
        self.select(0, self.char_count());
    }

    // =========================================================================
    // Editing
    // =========================================================================

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection.take() else {
            return false;
        };
        let chars: Vec<char> = self.text.chars().collect();
        let end = end.min(chars.len());
        let start = start.min(end);
        let mut kept: Vec<char> = Vec::with_capacity(chars.len() - (end - start));
        kept.extend(&chars[..start]);
        kept.extend(&chars[end..]);
        self.text = kept.into_iter().collect();
        self.caret = start;
        true
    }

    /// Insert a character at the caret, replacing any selection. Ignored
    /// when the content is already at `max_length`.
    pub fn insert(&mut self, c: char) {
        self.delete_selection();
        if self.max_length > 0 && self.char_count() >= self.max_length {
            return;
        }
        let mut chars: Vec<char> = self.text.chars().collect();
        let at = self.caret.min(chars.len());
        chars.insert(at, c);
        self.text = chars.into_iter().collect();
        self.caret = at + 1;
    }

    /// Delete the grapheme before the caret, or the selection if present.
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.caret == 0 {
            return;
        }
        let start = self.prev_boundary();
        let end = self.caret;
        let chars: Vec<char> = self.text.chars().collect();
        let mut kept: Vec<char> = Vec::with_capacity(chars.len());
        kept.extend(&chars[..start]);
        kept.extend(&chars[end.min(chars.len())..]);
        self.text = kept.into_iter().collect();
        self.caret = start;
    }

    /// Delete the grapheme after the caret, or the selection if present.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.caret >= self.char_count() {
            return;
        }
        let end = self.next_boundary();
        let chars: Vec<char> = self.text.chars().collect();
        let mut kept: Vec<char> = Vec::with_capacity(chars.len());
        kept.extend(&chars[..self.caret]);
        kept.extend(&chars[end.min(chars.len())..]);
        self.text = kept.into_iter().collect();
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// First candidate with a case-insensitive prefix match on the current
    /// content. Empty content and exact matches yield nothing.
    pub fn suggestion(&self) -> Option<&str> {
        if self.text.is_empty() {
            return None;
        }
        let needle = self.text.to_lowercase();
        self.predictions
            .iter()
            .find(|c| {
                let lower = c.to_lowercase();
                lower.starts_with(&needle) && lower != needle
            })
            .map(String::as_str)
    }

    /// Replace the full content with the current suggestion, if any.
    /// Returns `true` when content changed.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(s) = self.suggestion().map(str::to_string) else {
            return false;
        };
        self.text = s;
        self.caret = self.char_count();
        self.selection = None;
        true
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Render the content for display: caret glyph inserted while editing,
    /// selection highlighted, suggestion remainder dimmed.
    pub fn display(&self, selection_color: &str, dim_color: &str) -> String {
        if !self.editing {
            return self.text.clone();
        }

        if let Some((start, end)) = self.selection {
            return colored_range(&self.text, selection_color, start, end);
        }

        let chars: Vec<char> = self.text.chars().collect();
        let at = self.caret.min(chars.len());
        let mut out: String = chars[..at].iter().collect();
        out.push(CARET_GLYPH);
        out.extend(&chars[at..]);

        // Inline suggestion: show the not-yet-typed remainder dimmed, only
        // when the caret sits at the end of the content.
        if at == chars.len() {
            if let Some(s) = self.suggestion() {
                let remainder: String = s.chars().skip(chars.len()).collect();
                out.push_str(&colored(&remainder, dim_color));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_caret() {
        let mut input = TextInputState::new("");
        input.begin_edit();
        for c in "abc".chars() {
            input.insert(c);
        }
        assert_eq!(input.text(), "abc");
        assert_eq!(input.caret(), 3);
    }

    #[test]
    fn test_insert_mid_text() {
        let mut input = TextInputState::new("ac");
        input.begin_edit();
        input.move_left();
        input.insert('b');
        assert_eq!(input.text(), "abc");
        assert_eq!(input.caret(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInputState::new("abc");
        input.begin_edit();
        input.backspace();
        assert_eq!(input.text(), "ab");
        input.move_home();
        input.delete_forward();
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn test_backspace_at_start_noop() {
        let mut input = TextInputState::new("ab");
        input.begin_edit();
        input.move_home();
        input.backspace();
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_max_length() {
        let mut input = TextInputState::new("");
        input.max_length = 2;
        input.begin_edit();
        for c in "abcd".chars() {
            input.insert(c);
        }
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_selection_replace_on_insert() {
        let mut input = TextInputState::new("hello world");
        input.begin_edit();
        input.select(6, 11);
        input.insert('X');
        assert_eq!(input.text(), "hello X");
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn test_selection_clamps() {
        let mut input = TextInputState::new("abc");
        input.select(2, 99);
        assert_eq!(input.selection(), Some((2, 3)));
        input.select(5, 2);
        assert_eq!(input.selection(), None);
    }

    #[test]
    fn test_edit_mode_clears_transients() {
        let mut input = TextInputState::new("abc");
        input.begin_edit();
        assert_eq!(input.caret(), 3);
        input.select(0, 2);
        input.end_edit();
        assert!(!input.is_editing());
        assert_eq!(input.selection(), None);
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn test_grapheme_movement() {
        // "e" + combining acute forms one grapheme of two chars.
        let mut input = TextInputState::new("ae\u{301}b");
        input.begin_edit();
        assert_eq!(input.caret(), 4);
        input.move_left();
        assert_eq!(input.caret(), 3);
        input.move_left();
        assert_eq!(input.caret(), 1);
        input.move_right();
        assert_eq!(input.caret(), 3);
    }

    #[test]
    fn test_grapheme_backspace_removes_cluster() {
        let mut input = TextInputState::new("ae\u{301}");
        input.begin_edit();
        input.backspace();
        assert_eq!(input.text(), "a");
    }

    #[test]
    fn test_display_caret_glyph() {
        let mut input = TextInputState::new("ab");
        assert_eq!(input.display("s", "d"), "ab");
        input.begin_edit();
        input.move_home();
        input.move_right();
        assert_eq!(input.display("s", "d"), format!("a{CARET_GLYPH}b"));
    }

    #[test]
    fn test_display_selection_highlight() {
        let mut input = TextInputState::new("abcd");
        input.begin_edit();
        input.select(1, 3);
        assert_eq!(input.display("sel", "d"), "a<color=sel>bc</color>d");
    }

    #[test]
    fn test_suggestion_prefix_match() {
        let mut input = TextInputState::new("");
        input.set_predictions(vec!["Warrior".into(), "Mage".into(), "Monk".into()]);
        input.begin_edit();
        for c in "mo".chars() {
            input.insert(c);
        }
        assert_eq!(input.suggestion(), Some("Monk"));
        assert!(input.accept_suggestion());
        assert_eq!(input.text(), "Monk");
        assert_eq!(input.caret(), 4);
    }

    #[test]
    fn test_suggestion_skips_exact_and_empty() {
        let mut input = TextInputState::new("");
        input.set_predictions(vec!["mage".into()]);
        assert_eq!(input.suggestion(), None);
        input.set_text("mage");
        assert_eq!(input.suggestion(), None);
        assert!(!input.accept_suggestion());
    }

    #[test]
    fn test_suggestion_rendered_dim() {
        let mut input = TextInputState::new("");
        input.set_predictions(vec!["north".into()]);
        input.begin_edit();
        for c in "no".chars() {
            input.insert(c);
        }
        let shown = input.display("s", "#444");
        assert!(shown.contains(CARET_GLYPH));
        assert!(shown.contains("<color=#444>rth</color>"));
    }
}
