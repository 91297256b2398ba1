//! Thin adapter from `crossterm` events to the crate's [`InputEvent`].
//!
//! The core never polls a device. A host reading `crossterm::event::read()`
//! (or anything else) feeds whatever it gets through [`convert_event`] and
//! hands the result to the active menu or [`crate::context::UiContext`].
//! While a text input is in edit mode, raw key events go through
//! [`apply_edit_key`] first so typed characters reach the field instead of
//! the navigator.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use crate::element::TextInputState;
use crate::types::{InputEvent, Point, Vec2};

/// Lines a PageUp/PageDown jump scrolls.
const PAGE_SCROLL_LINES: i32 = 3;

/// Translate a terminal event into an abstract input event. Repeats and
/// releases are ignored; unmapped keys yield `None`.
pub fn convert_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => convert_key(key),
        Event::Mouse(mouse) => convert_mouse(mouse),
        _ => None,
    }
}

fn convert_key(key: &KeyEvent) -> Option<InputEvent> {
    let event = match key.code {
        KeyCode::Enter => InputEvent::Confirm,
        KeyCode::Esc => InputEvent::Cancel,
        KeyCode::Up | KeyCode::Char('k') => InputEvent::Move(Vec2::UP),
        KeyCode::Down | KeyCode::Char('j') => InputEvent::Move(Vec2::DOWN),
        KeyCode::Left | KeyCode::Char('h') => InputEvent::Move(Vec2::LEFT),
        KeyCode::Right | KeyCode::Char('l') => InputEvent::Move(Vec2::RIGHT),
        KeyCode::PageUp => InputEvent::Scroll(Vec2::new(0, -PAGE_SCROLL_LINES)),
        KeyCode::PageDown => InputEvent::Scroll(Vec2::new(0, PAGE_SCROLL_LINES)),
        _ => return None,
    };
    Some(event)
}

fn convert_mouse(mouse: &MouseEvent) -> Option<InputEvent> {
    let position = Point::new(mouse.column, mouse.row);
    let event = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputEvent::MouseConfirmPressed(position),
        MouseEventKind::Up(MouseButton::Left) => InputEvent::MouseConfirmReleased(position),
        MouseEventKind::Down(MouseButton::Right) => InputEvent::MouseCancel,
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            InputEvent::PointerMoved(position)
        }
        MouseEventKind::ScrollUp => InputEvent::Scroll(Vec2::new(0, -1)),
        MouseEventKind::ScrollDown => InputEvent::Scroll(Vec2::new(0, 1)),
        _ => return None,
    };
    Some(event)
}

/// Feed one key press to a text input in edit mode. Returns whether the
/// key was consumed; Enter and Esc are left for the menu's dispatch.
pub fn apply_edit_key(input: &mut TextInputState, key: &KeyEvent) -> bool {
    if !input.is_editing() || key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Tab => {
            input.accept_suggestion();
        }
        _ => return false,
    }
    true
}
