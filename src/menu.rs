//! The menu controller: windows, the current selection, input dispatch and
//! the open/close lifecycle.
//!
//! A menu owns its windows and a [`Layout`]. Input arrives as abstract
//! [`InputEvent`]s through a single [`Menu::dispatch`] entry point; the menu
//! validates the selection, routes directional input through the layout's
//! navigator and everything else to the focused element.
//!
//! Transient overlays (confirmation dialogs, pickers, text capture, context
//! menus) are ordinary menus built by the factory constructors at the bottom
//! of this module. They hand control back through narrow closures; stacking
//! them is the job of [`crate::context::UiContext`].

use std::rc::Rc;

use tracing::debug;

use crate::element::{ArrowHit, Element, ElementKind, Invalidate};
use crate::layout::{Layout, Selection};
use crate::text::style::StyleSheet;
use crate::types::{Anchor, Axis, InputEvent, Outline, Point, Rect, Value, Vec2};
use crate::window::Window;

/// What Cancel does when no element-local state absorbs it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelBehavior {
    /// Close the menu, invoking its close callback.
    CloseMenu,
    /// Jump the cursor to a designated choice without closing, the
    /// confirmation-dialog pattern.
    RedirectTo { window: usize, element: usize },
}

/// Arrow hit tolerance for mouse presses, in cells.
const ARROW_TOLERANCE: f64 = 1.0;

pub struct Menu {
    id: String,
    pub layout: Layout,
    pub style: StyleSheet,
    pub cancel_behavior: CancelBehavior,
    windows: Vec<Window>,
    selection: Option<Selection>,
    /// Selection at the last close, restored by `open(true)`.
    saved_selection: Option<Selection>,
    is_open: bool,
    input_enabled: bool,
    /// Element under the primary button at press time; release triggers
    /// only when it lands on the same element.
    pressed: Option<Selection>,
    on_close: Option<Box<dyn Fn()>>,
}

impl Menu {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            layout: Layout::default(),
            style: StyleSheet::default(),
            cancel_behavior: CancelBehavior::CloseMenu,
            windows: Vec::new(),
            selection: None,
            saved_selection: None,
            is_open: false,
            input_enabled: true,
            pressed: None,
            on_close: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Gate dispatch without closing, for busy states.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    pub fn set_on_close(&mut self, callback: impl Fn() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    // =========================================================================
    // Windows
    // =========================================================================

    pub fn add_window(&mut self, window: Window) -> &mut Window {
        self.windows.push(window);
        let index = self.windows.len() - 1;
        &mut self.windows[index]
    }

    pub fn window(&self, index: usize) -> Option<&Window> {
        self.windows.get(index)
    }

    pub fn window_mut(&mut self, index: usize) -> Option<&mut Window> {
        self.windows.get_mut(index)
    }

    pub fn window_by_id(&mut self, id: &str) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the menu. With `restore_focus` the selection saved at the last
    /// close is revalidated and reused; otherwise focus lands on the first
    /// available element.
    pub fn open(&mut self, restore_focus: bool) {
        self.is_open = true;
        self.pressed = None;
        let restored = restore_focus
            .then_some(self.saved_selection)
            .flatten()
            .filter(|&sel| self.is_selectable(sel));
        let selection = restored.or_else(|| Layout::first_selection(&self.windows));
        self.apply_selection(selection);
        debug!(id = %self.id, ?selection, "menu opened");
        for window in &self.windows {
            window.request_redraw();
        }
    }

    /// Close the menu, remembering the selection for a later restoring
    /// open. The close callback fires only when `invoke_callback` is set,
    /// so a completed overlay can close silently.
    pub fn close(&mut self, invoke_callback: bool) {
        self.is_open = false;
        self.pressed = None;
        self.saved_selection = self.selection;
        self.apply_selection(None);
        debug!(id = %self.id, "menu closed");
        if invoke_callback {
            if let Some(callback) = &self.on_close {
                callback();
            }
        }
    }

    /// Per-frame housekeeping: window update hooks, then flagged toggle
    /// sources.
    pub fn tick(&mut self) {
        for window in &mut self.windows {
            window.invoke_update();
            window.sync_toggles();
        }
    }

    /// Drain the redraw flags of all windows; true when any was set since
    /// the last drain.
    pub fn take_redraw(&mut self) -> bool {
        let mut any = false;
        for window in &self.windows {
            any |= window.take_dirty();
        }
        any
    }

    /// Lay the windows out and pull the styled lines for each, as
    /// (bounds, lines) pairs for the host renderer.
    pub fn render(&mut self, screen: Rect) -> Vec<(Rect, Vec<String>)> {
        self.layout.arrange(&mut self.windows, &self.style, screen);
        let style = self.style.clone();
        self.windows
            .iter_mut()
            .map(|w| (w.bounds(), w.display_lines(&style)))
            .collect()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn is_selectable(&self, (w, e): Selection) -> bool {
        self.windows
            .get(w)
            .and_then(|win| win.element(e))
            .is_some_and(Element::is_available)
    }

    /// Move focus to an exact position; rejected when unavailable.
    pub fn select(&mut self, window: usize, element: usize) -> bool {
        if self.is_selectable((window, element)) {
            self.apply_selection(Some((window, element)));
            true
        } else {
            false
        }
    }

    fn apply_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
        for (w, window) in self.windows.iter_mut().enumerate() {
            let focused = selection.and_then(|(sw, se)| (sw == w).then_some(se));
            window.set_focused_index(focused);
        }
    }

    /// Drop a stale selection: element removed, turned unavailable, or the
    /// menu never had one. Runs before every dispatch.
    fn ensure_selection_valid(&mut self) {
        match self.selection {
            Some(sel) if self.is_selectable(sel) => {}
            _ => {
                let fresh = Layout::first_selection(&self.windows);
                self.apply_selection(fresh);
            }
        }
    }

    fn focused_element_mut(&mut self) -> Option<&mut Element> {
        let (w, e) = self.selection?;
        self.windows.get_mut(w)?.element_mut(e)
    }

    pub fn focused_element(&self) -> Option<&Element> {
        let (w, e) = self.selection?;
        self.windows.get(w)?.element(e)
    }

    /// Position of the element under `point`, via cached bounds.
    fn hit_test(&self, point: Point) -> Option<Selection> {
        for (w, window) in self.windows.iter().enumerate() {
            if !window.bounds().contains(point) {
                continue;
            }
            if let Some(e) = window.element_at(point) {
                return Some((w, e));
            }
        }
        None
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Single entry point for host input. Returns whether the event was
    /// consumed; a closed or input-disabled menu consumes nothing.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        if !self.is_open || !self.input_enabled {
            return false;
        }
        self.ensure_selection_valid();

        match event {
            InputEvent::Confirm => self.handle_confirm(),
            InputEvent::Cancel | InputEvent::MouseCancel => self.handle_cancel(),
            InputEvent::Move(v) => self.handle_move(v),
            InputEvent::Scroll(v) => self.handle_scroll(v),
            InputEvent::MouseConfirmPressed(p) => self.handle_press(p),
            InputEvent::MouseConfirmReleased(p) => self.handle_release(p),
            InputEvent::PointerMoved(p) => self.handle_pointer(p),
        }
    }

    fn handle_confirm(&mut self) -> bool {
        let Some(element) = self.focused_element_mut() else {
            return false;
        };
        // Confirm while editing commits the text instead of re-entering
        // edit mode.
        if element.text_input().is_some_and(|i| i.is_editing()) {
            element.commit_text();
        } else {
            element.trigger();
        }
        true
    }

    fn handle_cancel(&mut self) -> bool {
        // Element-local transient state absorbs Cancel first.
        if let Some(element) = self.focused_element_mut() {
            if element.text_input().is_some_and(|i| i.is_editing()) {
                element.cancel_edit();
                return true;
            }
            if element.is_awaiting_confirm() {
                element.cancel_confirm();
                return true;
            }
        }
        match self.cancel_behavior {
            CancelBehavior::CloseMenu => {
                self.close(true);
                true
            }
            CancelBehavior::RedirectTo { window, element } => {
                self.select(window, element);
                true
            }
        }
    }

    fn handle_move(&mut self, v: Vec2) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        // On a vertical stack, horizontal input adjusts the focused valued
        // element instead of navigating.
        if v.x != 0 && self.layout.axis == Axis::Vertical {
            let delta = v.x.signum() as i64;
            if let Some(element) = self.focused_element_mut() {
                element.step_value(delta);
            }
            return true;
        }
        let next = self.layout.navigate(&self.windows, selection, v);
        if next != selection {
            self.apply_selection(Some(next));
        }
        true
    }

    fn handle_scroll(&mut self, v: Vec2) -> bool {
        if v.y == 0 {
            return false;
        }
        let Some(element) = self.focused_element_mut() else {
            return false;
        };
        let width = element
            .bounds()
            .map(|b| b.width as usize)
            .unwrap_or(usize::MAX);
        match &mut element.kind {
            ElementKind::ScrollText(st) => {
                let moved = st.scroll_by(v.y, width);
                if moved {
                    element.invalidate(Invalidate::CONTENT);
                }
                moved
            }
            // Wheel over a valued element adjusts its count.
            _ => element.step_value(v.y.signum() as i64),
        }
    }

    fn handle_press(&mut self, point: Point) -> bool {
        self.pressed = None;
        let Some(hit) = self.hit_test(point) else {
            return false;
        };
        if !self.is_selectable(hit) {
            return false;
        }
        self.apply_selection(Some(hit));
        // A press on a slider arrow steps immediately and never arms the
        // press-release pair.
        if let Some(element) = self.focused_element_mut() {
            if let Some(arrow) = element.hover_on_arrow(point, ARROW_TOLERANCE) {
                let delta = match arrow {
                    ArrowHit::Decrement => -1,
                    ArrowHit::Increment => 1,
                };
                element.step_value(delta);
                return true;
            }
        }
        self.pressed = Some(hit);
        true
    }

    fn handle_release(&mut self, point: Point) -> bool {
        let Some(armed) = self.pressed.take() else {
            return false;
        };
        if self.hit_test(point) != Some(armed) || !self.is_selectable(armed) {
            return false;
        }
        // Hover may have wandered between press and release; the armed
        // element gets the trigger.
        self.apply_selection(Some(armed));
        self.handle_confirm()
    }

    fn handle_pointer(&mut self, point: Point) -> bool {
        // Hover never steals focus from an active edit.
        if self
            .focused_element()
            .and_then(Element::text_input)
            .is_some_and(|i| i.is_editing())
        {
            return false;
        }
        let Some(hit) = self.hit_test(point) else {
            return false;
        };
        if Some(hit) == self.selection || !self.is_selectable(hit) {
            return false;
        }
        self.apply_selection(Some(hit));
        true
    }
}

// =============================================================================
// Overlay factories
// =============================================================================

impl Menu {
    /// A yes/no dialog. `on_pick(true)` on Yes, `on_pick(false)` on No;
    /// Cancel jumps the cursor to No instead of closing.
    pub fn confirmation(id: &str, message: &str, on_pick: impl Fn(bool) + 'static) -> Menu {
        let on_pick = Rc::new(on_pick);
        let mut menu = Menu::new(id);
        menu.layout = Layout::new(Anchor::Center, Axis::Vertical);
        menu.cancel_behavior = CancelBehavior::RedirectTo {
            window: 0,
            element: 1,
        };

        let mut window = Window::new("confirm");
        window.outline = Outline::Double;
        window.set_title(message);
        {
            let on_pick = on_pick.clone();
            window
                .add_button("yes", "Yes")
                .set_action(move |_| on_pick(true));
        }
        window
            .add_button("no", "No")
            .set_action(move |_| on_pick(false));
        menu.add_window(window);
        menu
    }

    /// An in-place picker: one button per label, handing the picked index
    /// back through `on_pick`.
    pub fn selection_picker(
        id: &str,
        title: &str,
        labels: &[&str],
        on_pick: impl Fn(i64) + 'static,
    ) -> Menu {
        let on_pick = Rc::new(on_pick);
        let mut menu = Menu::new(id);
        menu.layout = Layout::new(Anchor::Center, Axis::Vertical);

        let mut window = Window::new("picker");
        if !title.is_empty() {
            window.set_title(title);
        }
        for (i, label) in labels.iter().enumerate() {
            let on_pick = on_pick.clone();
            window
                .add_button(&format!("pick-{i}"), *label)
                .set_action(move |_| on_pick(i as i64));
        }
        menu.add_window(window);
        menu
    }

    /// A context menu popping near the pointer: the host passes a screen
    /// rect at the pointer position when rendering.
    pub fn context_menu(id: &str, labels: &[&str], on_pick: impl Fn(i64) + 'static) -> Menu {
        let mut menu = Menu::selection_picker(id, "", labels, on_pick);
        menu.layout = Layout::new(Anchor::TopLeft, Axis::Vertical);
        menu
    }

    /// A single-field text capture. Confirm commits through `on_text`;
    /// the first Cancel leaves edit mode, the second closes through
    /// `on_cancel`.
    pub fn text_capture(
        id: &str,
        title: &str,
        initial: &str,
        on_text: impl Fn(&str) + 'static,
        on_cancel: impl Fn() + 'static,
    ) -> Menu {
        let mut menu = Menu::new(id);
        menu.layout = Layout::new(Anchor::Center, Axis::Vertical);
        menu.set_on_close(on_cancel);

        let mut window = Window::new("capture");
        window.set_title(title);
        let field = window.add_text_input("input", "", initial);
        field.set_action(move |value| {
            if let Value::Text(text) = value {
                on_text(text);
            }
        });
        if let Some(input) = field.text_input_mut() {
            input.begin_edit();
        }
        menu.add_window(window);
        menu
    }
}
