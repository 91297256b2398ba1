//! The UI context: an explicitly constructed, owned stack of menus.
//!
//! The top of the stack is the input target. Opening an overlay is a push,
//! which rebinds input to it; restoring the previous target is a pop. A
//! menu that closes itself during dispatch (Cancel, typically) is popped
//! automatically, so the previous menu resumes without host bookkeeping.

use tracing::debug;

use crate::menu::Menu;
use crate::types::{InputEvent, Rect};

#[derive(Default)]
pub struct UiContext {
    stack: Vec<Menu>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push a menu and open it; it becomes the input target.
    pub fn push(&mut self, mut menu: Menu) -> &mut Menu {
        debug!(id = %menu.id(), depth = self.stack.len() + 1, "menu pushed");
        menu.open(false);
        self.stack.push(menu);
        let index = self.stack.len() - 1;
        &mut self.stack[index]
    }

    /// Pop the top menu, closing it silently if still open. Input falls
    /// back to the menu below.
    pub fn pop(&mut self) -> Option<Menu> {
        let mut menu = self.stack.pop()?;
        if menu.is_open() {
            menu.close(false);
        }
        debug!(id = %menu.id(), depth = self.stack.len(), "menu popped");
        Some(menu)
    }

    pub fn top(&self) -> Option<&Menu> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Menu> {
        self.stack.last_mut()
    }

    /// Route an event to the top menu. A menu that closed itself while
    /// handling it is popped afterwards.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        let Some(top) = self.stack.last_mut() else {
            return false;
        };
        let handled = top.dispatch(event);
        while self.stack.last().is_some_and(|m| !m.is_open()) {
            self.pop();
        }
        handled
    }

    /// Forward the frame tick to every open menu in the stack.
    pub fn tick(&mut self) {
        for menu in &mut self.stack {
            if menu.is_open() {
                menu.tick();
            }
        }
    }

    /// True when any menu in the stack needs a redraw; drains all flags.
    pub fn take_redraw(&mut self) -> bool {
        let mut any = false;
        for menu in &mut self.stack {
            any |= menu.take_redraw();
        }
        any
    }

    /// Render every open menu bottom-up, so overlays paint over their
    /// parents.
    pub fn render(&mut self, screen: Rect) -> Vec<(Rect, Vec<String>)> {
        let mut out = Vec::new();
        for menu in &mut self.stack {
            if menu.is_open() {
                out.extend(menu.render(screen));
            }
        }
        out
    }
}
