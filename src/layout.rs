//! Window placement and focus navigation.
//!
//! A layout hangs a stack of windows from one of nine screen anchors and
//! stacks them along a primary axis with a uniform gap. The same layout
//! also resolves directional focus moves: element steps skip unavailable
//! elements, cross into neighboring windows along the stacking axis, and
//! are absorbed at the outer edges rather than wrapping.

use tracing::trace;

use crate::text::style::StyleSheet;
use crate::types::{Anchor, Axis, Rect, Vec2};
use crate::window::Window;

/// Focus position as (window index, element index).
pub type Selection = (usize, usize);

/// Anchored, axis-stacked window arrangement.
#[derive(Clone, Copy)]
pub struct Layout {
    pub anchor: Anchor,
    pub axis: Axis,
    /// Cells between neighboring windows along the axis.
    pub gap: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            anchor: Anchor::Center,
            axis: Axis::Vertical,
            gap: 1,
        }
    }
}

impl Layout {
    pub fn new(anchor: Anchor, axis: Axis) -> Self {
        Self {
            anchor,
            axis,
            ..Self::default()
        }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Measure every window, place the stack against the anchor, and assign
    /// window (and element) bounds. Off-axis alignment inside the stack
    /// follows the anchor's factor on that axis.
    pub fn arrange(&self, windows: &mut [Window], sheet: &StyleSheet, screen: Rect) {
        if windows.is_empty() {
            return;
        }
        let sizes: Vec<(u16, u16)> = windows.iter_mut().map(|w| w.size(sheet)).collect();
        let gap_total = self.gap * (sizes.len() as u16 - 1);

        let (block_w, block_h) = match self.axis {
            Axis::Vertical => (
                sizes.iter().map(|s| s.0).max().unwrap_or(0),
                sizes.iter().map(|s| s.1).sum::<u16>() + gap_total,
            ),
            Axis::Horizontal => (
                sizes.iter().map(|s| s.0).sum::<u16>() + gap_total,
                sizes.iter().map(|s| s.1).max().unwrap_or(0),
            ),
        };

        let origin = self.anchor.origin(screen, (block_w, block_h));
        trace!(?origin, block_w, block_h, "layout pass");

        let mut cursor = origin;
        for (window, (w, h)) in windows.iter_mut().zip(sizes) {
            match self.axis {
                Axis::Vertical => {
                    let x = origin.x + block_w.saturating_sub(w) * self.anchor.column() / 2;
                    window.set_bounds(Rect::new(x, cursor.y, w, h));
                    cursor.y += h + self.gap;
                }
                Axis::Horizontal => {
                    let y = origin.y + block_h.saturating_sub(h) * self.anchor.row() / 2;
                    window.set_bounds(Rect::new(cursor.x, y, w, h));
                    cursor.x += w + self.gap;
                }
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// First focusable position: the first window holding an available
    /// element, entered at its first available element.
    pub fn first_selection(windows: &[Window]) -> Option<Selection> {
        windows
            .iter()
            .enumerate()
            .find_map(|(w, window)| window.first_available().map(|e| (w, e)))
    }

    /// Resolve a directional move from `selection`. Unavailable elements
    /// and empty windows are skipped; moves past the outer edge are
    /// absorbed, returning the selection unchanged.
    pub fn navigate(&self, windows: &[Window], selection: Selection, step: Vec2) -> Selection {
        if step.y != 0 {
            self.navigate_vertical(windows, selection, step.y.signum())
        } else if step.x != 0 {
            self.navigate_horizontal(windows, selection, step.x.signum())
        } else {
            selection
        }
    }

    fn navigate_vertical(&self, windows: &[Window], selection: Selection, dir: i32) -> Selection {
        let (w, e) = selection;
        let Some(window) = windows.get(w) else {
            return selection;
        };
        if let Some(next) = scan_elements(window, e, dir) {
            return (w, next);
        }
        // Past the window edge: cross into the neighbor when the stack
        // itself runs vertically.
        if self.axis == Axis::Vertical {
            if let Some(nw) = scan_windows(windows, w, dir) {
                let entry = if dir > 0 {
                    windows[nw].first_available()
                } else {
                    windows[nw].last_available()
                };
                if let Some(ne) = entry {
                    return (nw, ne);
                }
            }
        }
        selection
    }

    fn navigate_horizontal(&self, windows: &[Window], selection: Selection, dir: i32) -> Selection {
        if self.axis != Axis::Horizontal {
            return selection;
        }
        let (w, e) = selection;
        if let Some(nw) = scan_windows(windows, w, dir) {
            // Carry the element index across, landing on the nearest
            // available element of the target window.
            if let Some(ne) = nearest_available(&windows[nw], e) {
                return (nw, ne);
            }
        }
        selection
    }
}

/// Next available element index past `from` in direction `dir`.
fn scan_elements(window: &Window, from: usize, dir: i32) -> Option<usize> {
    let len = window.len();
    let mut i = from as i64 + dir as i64;
    while i >= 0 && (i as usize) < len {
        let idx = i as usize;
        if window.element(idx).is_some_and(|e| e.is_available()) {
            return Some(idx);
        }
        i += dir as i64;
    }
    None
}

/// Next window past `from` in direction `dir` holding at least one
/// available element.
fn scan_windows(windows: &[Window], from: usize, dir: i32) -> Option<usize> {
    let len = windows.len();
    let mut i = from as i64 + dir as i64;
    while i >= 0 && (i as usize) < len {
        let idx = i as usize;
        if windows[idx].has_available() {
            return Some(idx);
        }
        i += dir as i64;
    }
    None
}

/// Available element closest to `target`, ties resolving upward.
fn nearest_available(window: &Window, target: usize) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, element) in window.elements().enumerate() {
        if !element.is_available() {
            continue;
        }
        let distance = i.abs_diff(target);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outline, Point, SizePolicy};

    fn sheet() -> StyleSheet {
        StyleSheet::default()
    }

    fn plain_window(id: &str, buttons: usize) -> Window {
        let mut w = Window::new(id);
        w.outline = Outline::None;
        for i in 0..buttons {
            w.add_button(&format!("{id}-{i}"), format!("Item {i}"));
        }
        w
    }

    fn fixed_window(id: &str, width: u16, buttons: usize) -> Window {
        let mut w = plain_window(id, buttons);
        w.size_policy = SizePolicy::Fixed(width);
        w
    }

    #[test]
    fn test_arrange_centered_vertical() {
        let s = sheet();
        let mut ws = vec![fixed_window("a", 10, 2), fixed_window("b", 20, 1)];
        let layout = Layout::default();
        layout.arrange(&mut ws, &s, Rect::new(0, 0, 80, 24));

        // Block is 20 wide, 4 tall (2 + gap 1 + 1), centered.
        assert_eq!(ws[0].bounds(), Rect::new(35, 10, 10, 2));
        assert_eq!(ws[1].bounds(), Rect::new(30, 13, 20, 1));
    }

    #[test]
    fn test_arrange_corner_anchors() {
        let s = sheet();
        let screen = Rect::new(0, 0, 80, 24);

        let mut ws = vec![fixed_window("a", 10, 2)];
        Layout::new(Anchor::TopLeft, Axis::Vertical).arrange(&mut ws, &s, screen);
        assert_eq!(ws[0].bounds().x, 0);
        assert_eq!(ws[0].bounds().y, 0);

        Layout::new(Anchor::BottomRight, Axis::Vertical).arrange(&mut ws, &s, screen);
        assert_eq!(ws[0].bounds(), Rect::new(70, 22, 10, 2));
    }

    #[test]
    fn test_arrange_horizontal_row() {
        let s = sheet();
        let mut ws = vec![fixed_window("a", 10, 1), fixed_window("b", 10, 3)];
        let layout = Layout::new(Anchor::BottomCenter, Axis::Horizontal);
        layout.arrange(&mut ws, &s, Rect::new(0, 0, 80, 24));

        // Row of 21 columns at the bottom; the shorter window aligns to the
        // bottom edge with it.
        assert_eq!(ws[0].bounds(), Rect::new(29, 23, 10, 1));
        assert_eq!(ws[1].bounds(), Rect::new(40, 21, 10, 3));
    }

    #[test]
    fn test_arrange_assigns_element_rows() {
        let s = sheet();
        let mut ws = vec![fixed_window("a", 10, 2)];
        Layout::new(Anchor::TopLeft, Axis::Vertical).arrange(&mut ws, &s, Rect::new(0, 0, 80, 24));
        let second = ws[0].element(1).and_then(|e| e.bounds()).unwrap();
        assert_eq!((second.x, second.y), (0, 1));
    }

    #[test]
    fn test_first_selection_skips_empty_and_unavailable() {
        let mut ws = vec![plain_window("a", 2), plain_window("b", 2)];
        ws[0].element_mut(0).unwrap().set_available(false);
        ws[0].element_mut(1).unwrap().set_available(false);
        ws[1].element_mut(0).unwrap().set_available(false);
        assert_eq!(Layout::first_selection(&ws), Some((1, 1)));
    }

    #[test]
    fn test_navigate_skips_unavailable_element() {
        let mut ws = vec![plain_window("a", 3)];
        ws[0].element_mut(1).unwrap().set_available(false);
        let layout = Layout::default();
        assert_eq!(layout.navigate(&ws, (0, 0), Vec2::DOWN), (0, 2));
        assert_eq!(layout.navigate(&ws, (0, 2), Vec2::UP), (0, 0));
    }

    #[test]
    fn test_navigate_crosses_windows_vertically() {
        let ws = vec![plain_window("a", 2), plain_window("b", 2)];
        let layout = Layout::default();
        assert_eq!(layout.navigate(&ws, (0, 1), Vec2::DOWN), (1, 0));
        // Moving back up enters at the last available element.
        assert_eq!(layout.navigate(&ws, (1, 0), Vec2::UP), (0, 1));
    }

    #[test]
    fn test_navigate_skips_whole_window() {
        let mut ws = vec![plain_window("a", 1), plain_window("b", 1), plain_window("c", 1)];
        ws[1].element_mut(0).unwrap().set_available(false);
        let layout = Layout::default();
        assert_eq!(layout.navigate(&ws, (0, 0), Vec2::DOWN), (2, 0));
    }

    #[test]
    fn test_navigate_absorbed_at_edges() {
        let ws = vec![plain_window("a", 2)];
        let layout = Layout::default();
        assert_eq!(layout.navigate(&ws, (0, 0), Vec2::UP), (0, 0));
        assert_eq!(layout.navigate(&ws, (0, 1), Vec2::DOWN), (0, 1));
        // Horizontal input is not navigation on a vertical stack.
        assert_eq!(layout.navigate(&ws, (0, 0), Vec2::RIGHT), (0, 0));
    }

    #[test]
    fn test_navigate_horizontal_carries_element_index() {
        let mut ws = vec![plain_window("a", 4), plain_window("b", 2)];
        ws[1].element_mut(1).unwrap().set_available(false);
        let layout = Layout::new(Anchor::Center, Axis::Horizontal);
        // Element 3 does not exist on the target; land on the nearest
        // available, which is element 0.
        assert_eq!(layout.navigate(&ws, (0, 3), Vec2::RIGHT), (1, 0));
        assert_eq!(layout.navigate(&ws, (1, 0), Vec2::LEFT), (0, 0));
    }

    #[test]
    fn test_anchor_origin_oversized_block() {
        let origin = Anchor::Center.origin(Rect::new(0, 0, 10, 10), (20, 20));
        assert_eq!(origin, Point::new(0, 0));
    }
}
