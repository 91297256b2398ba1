//! # menuforge
//!
//! Retained-mode menu framework for text UIs.
//!
//! Menus are built once from windows of focusable elements (buttons,
//! toggles, sliders, selections, text inputs, scrollable text) and mutated
//! through setters afterwards. A dirty flag per window defers redrawing:
//! every mutation invalidates the caches it touches and flags the window,
//! and the host repaints only when [`menu::Menu::take_redraw`] reports a
//! change. Everything is single-threaded and synchronous.
//!
//! ## Architecture
//!
//! ```text
//! InputEvent → Menu dispatch → Navigator / Element actions → dirty flags
//!                                                               ↓
//! host renderer ← display lines ← Window ← Layout (anchor + axis)
//! ```
//!
//! Text is measured and wrapped through [`text`], which understands inline
//! `<...>` markup (never counted, never split) and full-width glyphs (CJK
//! runs narrow slightly as they grow, matching the target font).
//!
//! ## Modules
//!
//! - [`types`] - Core types (Point, Rect, Anchor, Value, InputEvent)
//! - [`text`] - Width measurement, markup-safe wrapping, style markup
//! - [`element`] - Element variants and their state machines
//! - [`window`] - Windows: factories, focus, sizing, rendering to lines
//! - [`layout`] - Anchored window placement and focus navigation
//! - [`menu`] - The menu controller and overlay factories
//! - [`context`] - The explicit menu stack owning input routing
//! - [`input`] - crossterm event adapter
//!
//! ## Example
//!
//! ```ignore
//! use menuforge::{Menu, UiContext, Window, InputEvent};
//!
//! let mut window = Window::new("main");
//! window.set_title("Main Menu");
//! window.add_button("play", "Play").set_action(|_| start_game());
//! window.add_toggle("sound", "Sound", true);
//! window.add_slider("volume", "Volume", 0, 10);
//!
//! let mut menu = Menu::new("main");
//! menu.add_window(window);
//!
//! let mut ui = UiContext::new();
//! ui.push(menu);
//! ui.dispatch(InputEvent::Confirm);
//! ```

pub mod context;
pub mod element;
pub mod error;
pub mod input;
pub mod layout;
pub mod menu;
pub mod text;
pub mod types;
pub mod window;

// Re-export commonly used items
pub use types::*;

pub use context::UiContext;
pub use element::{
    ArrowHit, ChoiceList, Element, ElementKind, LabelSource, ScrollTextState, TextInputState,
};
pub use error::ConfigError;
pub use layout::{Layout, Selection};
pub use menu::{CancelBehavior, Menu};
pub use text::{
    colored, colored_range, display_width, sized, strip_markup, truncate_to_width, wrap,
    StyleSheet,
};
pub use window::Window;
