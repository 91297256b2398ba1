//! Core types shared across the framework.
//!
//! Geometry (`Point`, `Vec2`, `Rect`), window placement (`Anchor`, `Axis`,
//! `SizePolicy`, `Outline`), element values (`Value`) and the abstract input
//! event vocabulary (`InputEvent`) the host feeds into a menu.

// =============================================================================
// Geometry
// =============================================================================

/// A screen position in character cells. Origin is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A direction or delta vector. Positive `y` points down, positive `x` right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const DOWN: Vec2 = Vec2 { x: 0, y: 1 };
    pub const UP: Vec2 = Vec2 { x: 0, y: -1 };
    pub const LEFT: Vec2 = Vec2 { x: -1, y: 0 };
    pub const RIGHT: Vec2 = Vec2 { x: 1, y: 0 };
}

/// A rectangle in character cells: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rect.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }
}

// =============================================================================
// Window placement
// =============================================================================

/// One of nine screen positions a layout hangs from (3 rows, 3 columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Horizontal factor: 0 = left edge, 1 = centered, 2 = right edge.
    pub(crate) fn column(self) -> u16 {
        match self {
            Anchor::TopLeft | Anchor::MiddleLeft | Anchor::BottomLeft => 0,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => 1,
            Anchor::TopRight | Anchor::MiddleRight | Anchor::BottomRight => 2,
        }
    }

    /// Vertical factor: 0 = top edge, 1 = centered, 2 = bottom edge.
    pub(crate) fn row(self) -> u16 {
        match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => 0,
            Anchor::MiddleLeft | Anchor::Center | Anchor::MiddleRight => 1,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => 2,
        }
    }

    /// Place a box of `size` inside `screen` according to this anchor.
    pub(crate) fn origin(self, screen: Rect, size: (u16, u16)) -> Point {
        let (w, h) = size;
        let free_x = screen.width.saturating_sub(w);
        let free_y = screen.height.saturating_sub(h);
        let x = screen.x + free_x * self.column() / 2;
        let y = screen.y + free_y * self.row() / 2;
        Point::new(x, y)
    }
}

/// Primary stacking axis of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// How a window determines its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Grow to fit the widest element, respecting the minimum width.
    Auto,
    /// Fixed content width in cells.
    Fixed(u16),
}

/// Outline style drawn around a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outline {
    None,
    #[default]
    Single,
    Double,
}

// =============================================================================
// Element values
// =============================================================================

/// The committed value an element hands to its action callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Plain buttons carry no value.
    #[default]
    None,
    /// Toggle state after the flip.
    Bool(bool),
    /// Slider count or the choice value mapped from the current index.
    Index(i64),
    /// Text input content.
    Text(String),
}

// =============================================================================
// Input events
// =============================================================================

/// Abstract input events delivered by the host to the active menu.
///
/// The framework never polls devices itself; an adapter (see [`crate::input`])
/// or the host translates whatever it reads into these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Activate the focused element.
    Confirm,
    /// Back out: close the menu or jump to the designated cancel choice.
    Cancel,
    /// Directional navigation (or value adjustment for valued elements).
    Move(Vec2),
    /// Wheel or stick scroll, in lines.
    Scroll(Vec2),
    /// Primary mouse button pressed at a position.
    MouseConfirmPressed(Point),
    /// Primary mouse button released at a position.
    MouseConfirmReleased(Point),
    /// Secondary mouse button, treated like Cancel.
    MouseCancel,
    /// Pointer moved; focus follows the element under it.
    PointerMoved(Point),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(5, 4)));
        assert!(!r.contains(Point::new(6, 4)));
        assert!(!r.contains(Point::new(2, 5)));
        assert!(!r.contains(Point::new(1, 3)));
    }

    #[test]
    fn test_anchor_origin_corners() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(Anchor::TopLeft.origin(screen, (10, 4)), Point::new(0, 0));
        assert_eq!(Anchor::TopRight.origin(screen, (10, 4)), Point::new(70, 0));
        assert_eq!(
            Anchor::BottomLeft.origin(screen, (10, 4)),
            Point::new(0, 20)
        );
        assert_eq!(Anchor::Center.origin(screen, (10, 4)), Point::new(35, 10));
    }

    #[test]
    fn test_anchor_origin_oversized_content() {
        // Content larger than the screen clamps to the screen origin.
        let screen = Rect::new(0, 0, 8, 4);
        assert_eq!(Anchor::Center.origin(screen, (20, 10)), Point::new(0, 0));
    }
}
