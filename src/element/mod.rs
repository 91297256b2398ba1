//! Elements: focusable units of interactive content inside a window.
//!
//! One `Element` struct carries the shared contract (label, availability,
//! focus, cached content and bounds, action slots); `ElementKind` is the
//! closed set of variants: button (optionally decorated with double-confirm
//! state), toggle, slider, selection, single-selection, quick-select, text
//! input and scrollable text.
//!
//! Cached fields follow a dirty-flag discipline: mutators invalidate, reads
//! recompute. Related invalidations are bundled behind [`Invalidate`] so a
//! mutation site cannot forget one of them.

pub mod choice;
pub mod scroll_text;
pub mod text_input;

use std::cell::Cell;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::error::ConfigError;
use crate::text::measure::{strip_markup, width_aware_len};
use crate::text::style::{recolored, StyleSheet};
use crate::types::{Point, Rect, Value};

pub use choice::{ChoiceList, IndexState};
pub use scroll_text::{ScrollTextState, SCROLL_DOWN_GLYPH, SCROLL_UP_GLYPH};
pub use text_input::{TextInputState, CARET_GLYPH};

/// Arrow glyph stepping a slider down.
pub const ARROW_DEC_GLYPH: char = '\u{25c4}'; // black left-pointing pointer
/// Arrow glyph stepping a slider up.
pub const ARROW_INC_GLYPH: char = '\u{25ba}'; // black right-pointing pointer

// =============================================================================
// Callback and label slots
// =============================================================================

/// Action callback invoked with the committed value.
pub type CommitFn = Rc<dyn Fn(&Value)>;
/// Side callback fired when a double-confirm button starts awaiting.
pub type AwaitFn = Rc<dyn Fn()>;
/// Localization lookup for tag labels.
pub type LocalizeFn = Rc<dyn Fn(&str) -> String>;

/// Where an element's label text comes from. Resolved lazily and cached
/// until invalidated.
#[derive(Clone)]
pub enum LabelSource {
    /// A fixed string.
    Static(String),
    /// A computed string, re-run on each (re)resolution.
    Computed(Rc<dyn Fn() -> String>),
    /// A localization tag, resolved through the owning window's localizer.
    Tag(String),
}

impl From<&str> for LabelSource {
    fn from(s: &str) -> Self {
        LabelSource::Static(s.to_string())
    }
}

impl From<String> for LabelSource {
    fn from(s: String) -> Self {
        LabelSource::Static(s)
    }
}

// =============================================================================
// Invalidation
// =============================================================================

bitflags::bitflags! {
    /// Which cached fields a mutation drops.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Invalidate: u8 {
        /// Cached formatted content (and arrow bookmarks).
        const CONTENT  = 1 << 0;
        /// Cached resolved label; implies CONTENT.
        const LABEL    = 1 << 1;
        /// Cached screen rectangle.
        const POSITION = 1 << 2;
    }
}

// =============================================================================
// Variants
// =============================================================================

/// Pending-confirmation decorator state on a button.
#[derive(Debug, Clone)]
pub struct ConfirmState {
    /// Text shown in place of the label while awaiting the second trigger.
    pub prompt: String,
    pub awaiting: bool,
}

/// The closed set of element variants.
pub enum ElementKind {
    Button {
        confirm: Option<ConfirmState>,
    },
    Toggle {
        on: bool,
        source: Option<Rc<dyn Fn() -> bool>>,
        needs_sync: bool,
        on_text: String,
        off_text: String,
    },
    /// Countable or choice-backed value stepped with arrows.
    Slider {
        index: IndexState,
        choices: Option<ChoiceList>,
    },
    /// Cycles to the next choice on trigger.
    Selection {
        index: IndexState,
        choices: ChoiceList,
    },
    /// Commits the current choice on trigger without cycling.
    SingleSelection {
        index: IndexState,
        choices: ChoiceList,
    },
    /// Modular cyclic stepping, optionally gated backward.
    QuickSelect {
        index: IndexState,
        choices: ChoiceList,
        can_cycle_backward: bool,
    },
    TextInput(TextInputState),
    ScrollText(ScrollTextState),
}

/// Which slider arrow a pointer is hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHit {
    Decrement,
    Increment,
}

// =============================================================================
// Element
// =============================================================================

/// A focusable unit of content. Created through a window factory method and
/// mutated through setters for the rest of the window's life.
pub struct Element {
    id: String,
    label: LabelSource,
    localizer: Option<LocalizeFn>,
    pub(crate) kind: ElementKind,
    available: bool,
    in_focus: bool,
    /// Sizing hint: flexible elements may be padded to the window width.
    pub flexible: bool,

    cached_label: Option<String>,
    cached_content: Option<String>,
    pub(crate) bounds: Option<Rect>,
    /// Character index of the decrement arrow in the rendered line.
    first_char_index: Option<usize>,
    /// Character index of the increment arrow in the rendered line.
    last_char_index: Option<usize>,

    /// Shared with the owning window; set to request a redraw.
    dirty: Rc<Cell<bool>>,
    on_commit: Option<CommitFn>,
    on_await: Option<AwaitFn>,
}

impl Element {
    pub(crate) fn new(
        id: &str,
        label: LabelSource,
        kind: ElementKind,
        dirty: Rc<Cell<bool>>,
        localizer: Option<LocalizeFn>,
    ) -> Self {
        Self {
            id: id.to_string(),
            label,
            localizer,
            kind,
            available: true,
            in_focus: false,
            flexible: false,
            cached_label: None,
            cached_content: None,
            bounds: None,
            first_char_index: None,
            last_char_index: None,
            dirty,
            on_commit: None,
            on_await: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_focused(&self) -> bool {
        self.in_focus
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Rows this element occupies inside its window.
    pub fn height(&self) -> u16 {
        match &self.kind {
            // Indicator row above and below the visible text.
            ElementKind::ScrollText(st) => st.view_height as u16 + 2,
            _ => 1,
        }
    }

    // =========================================================================
    // Invalidation and redraw
    // =========================================================================

    /// Drop the named caches and request a redraw.
    pub fn invalidate(&mut self, what: Invalidate) {
        if what.intersects(Invalidate::LABEL) {
            self.cached_label = None;
        }
        if what.intersects(Invalidate::CONTENT | Invalidate::LABEL) {
            self.cached_content = None;
            self.first_char_index = None;
            self.last_char_index = None;
        }
        if what.intersects(Invalidate::POSITION) {
            self.bounds = None;
        }
        self.dirty.set(true);
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_label(&mut self, label: impl Into<LabelSource>) {
        self.label = label.into();
        self.invalidate(Invalidate::LABEL | Invalidate::POSITION);
    }

    /// Bind the commit action. Missing callbacks are always safe no-ops.
    pub fn set_action(&mut self, action: impl Fn(&Value) + 'static) {
        self.on_commit = Some(Rc::new(action));
    }

    /// Bind the side callback fired when double-confirm starts awaiting.
    pub fn set_await_action(&mut self, action: impl Fn() + 'static) {
        self.on_await = Some(Rc::new(action));
    }

    /// Change availability. No-op when unchanged; losing availability
    /// cancels a pending double-confirm.
    pub fn set_available(&mut self, available: bool) {
        if self.available == available {
            return;
        }
        self.available = available;
        if !available {
            self.reset_confirm();
        }
        self.invalidate(Invalidate::CONTENT);
    }

    /// Focus flag, managed by the owning window. Losing focus cancels a
    /// pending double-confirm so no stale prompt survives.
    pub(crate) fn set_focus(&mut self, focused: bool) {
        if self.in_focus == focused {
            return;
        }
        self.in_focus = focused;
        if !focused {
            // Blur drops transient state: a pending double-confirm and any
            // in-progress edit.
            self.reset_confirm();
            self.cancel_edit();
        }
        trace!(id = %self.id, focused, "element focus changed");
        self.invalidate(Invalidate::CONTENT);
    }

    /// Back out of a pending double-confirm without committing.
    pub fn cancel_confirm(&mut self) {
        self.reset_confirm();
    }

    fn reset_confirm(&mut self) {
        if let ElementKind::Button {
            confirm: Some(c), ..
        } = &mut self.kind
        {
            if c.awaiting {
                c.awaiting = false;
                self.invalidate(Invalidate::CONTENT | Invalidate::POSITION);
            }
        }
    }

    // =========================================================================
    // Label
    // =========================================================================

    /// Resolve the label, caching until invalidated.
    pub fn label_text(&mut self) -> String {
        if self.cached_label.is_none() {
            let resolved = match &self.label {
                LabelSource::Static(s) => s.clone(),
                LabelSource::Computed(f) => f(),
                LabelSource::Tag(tag) => match &self.localizer {
                    Some(lookup) => lookup(tag),
                    None => tag.clone(),
                },
            };
            self.cached_label = Some(resolved);
        }
        self.cached_label.clone().unwrap_or_default()
    }

    // =========================================================================
    // Content and display
    // =========================================================================

    /// Canonical content string: label plus current value, cached until a
    /// mutation invalidates it.
    pub fn formatted_content(&mut self, sheet: &StyleSheet) -> String {
        if self.cached_content.is_none() {
            let content = self.build_content(sheet);
            let chars: Vec<char> = content.chars().collect();
            self.first_char_index = chars.iter().position(|&c| c == ARROW_DEC_GLYPH);
            self.last_char_index = chars.iter().rposition(|&c| c == ARROW_INC_GLYPH);
            self.cached_content = Some(content);
        }
        self.cached_content.clone().unwrap_or_default()
    }

    fn build_content(&mut self, sheet: &StyleSheet) -> String {
        let label = self.label_text();
        match &self.kind {
            ElementKind::Button { confirm } => match confirm {
                Some(c) if c.awaiting => c.prompt.clone(),
                _ => label,
            },
            ElementKind::Toggle {
                on,
                on_text,
                off_text,
                ..
            } => {
                let state = if *on { on_text } else { off_text };
                format!("{label}: {state}")
            }
            ElementKind::Slider { index, choices } => {
                let value = match choices {
                    Some(list) => list
                        .label(index.count() as usize)
                        .unwrap_or_default()
                        .to_string(),
                    None => index.count().to_string(),
                };
                format!("{label} {ARROW_DEC_GLYPH} {value} {ARROW_INC_GLYPH}")
            }
            ElementKind::Selection { index, choices }
            | ElementKind::SingleSelection { index, choices } => {
                let value = choices.label(index.count() as usize).unwrap_or_default();
                format!("{label}: {value}")
            }
            ElementKind::QuickSelect { index, choices, .. } => {
                let value = choices.label(index.count() as usize).unwrap_or_default();
                if label.is_empty() {
                    format!("{ARROW_DEC_GLYPH} {value} {ARROW_INC_GLYPH}")
                } else {
                    format!("{label} {ARROW_DEC_GLYPH} {value} {ARROW_INC_GLYPH}")
                }
            }
            ElementKind::TextInput(input) => {
                let value = input.display(&sheet.selected, &sheet.dim);
                if label.is_empty() {
                    value
                } else {
                    format!("{label}: {value}")
                }
            }
            ElementKind::ScrollText(st) => st.content().to_string(),
        }
    }

    /// Content re-colored for the focus/availability cross-product.
    ///
    /// `suppress_highlight` is set by single-button windows, whose selected
    /// visual is the window border instead of the element.
    pub fn display_text(&mut self, sheet: &StyleSheet, suppress_highlight: bool) -> String {
        let content = self.formatted_content(sheet);
        let highlight = self.in_focus && !suppress_highlight;
        if !self.available {
            let color = if highlight {
                &sheet.disabled_selected
            } else {
                &sheet.disabled
            };
            recolored(&content, color)
        } else if highlight {
            recolored(&content, &sheet.selected)
        } else {
            content
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn commit(&self, value: Value) {
        if let Some(cb) = self.on_commit.clone() {
            cb(&value);
        }
    }

    /// Current committed value of this element.
    pub fn value(&self) -> Value {
        match &self.kind {
            ElementKind::Button { .. } | ElementKind::ScrollText(_) => Value::None,
            ElementKind::Toggle { on, .. } => Value::Bool(*on),
            ElementKind::Slider { index, choices } => Value::Index(match choices {
                Some(list) => list.value(index.count() as usize).unwrap_or(index.count()),
                None => index.count(),
            }),
            ElementKind::Selection { index, choices }
            | ElementKind::SingleSelection { index, choices }
            | ElementKind::QuickSelect { index, choices, .. } => {
                Value::Index(choices.value(index.count() as usize).unwrap_or(index.count()))
            }
            ElementKind::TextInput(input) => Value::Text(input.text().to_string()),
        }
    }

    /// Activate this element: the Confirm action.
    pub fn trigger(&mut self) {
        enum Outcome {
            Commit,
            Await,
            Nothing,
        }

        let outcome = match &mut self.kind {
            ElementKind::Button { confirm: None } => Outcome::Commit,
            ElementKind::Button {
                confirm: Some(state),
            } => {
                if state.awaiting {
                    state.awaiting = false;
                    Outcome::Commit
                } else {
                    state.awaiting = true;
                    Outcome::Await
                }
            }
            ElementKind::Toggle { .. } => {
                self.toggle();
                return;
            }
            ElementKind::Selection { index, .. } => {
                index.step_cyclic(1, true);
                Outcome::Commit
            }
            ElementKind::Slider { .. }
            | ElementKind::SingleSelection { .. }
            | ElementKind::QuickSelect { .. } => Outcome::Commit,
            ElementKind::TextInput(input) => {
                input.begin_edit();
                Outcome::Nothing
            }
            ElementKind::ScrollText(_) => Outcome::Nothing,
        };

        match outcome {
            Outcome::Commit => {
                self.invalidate(Invalidate::CONTENT | Invalidate::POSITION);
                self.commit(self.value());
            }
            Outcome::Await => {
                // The confirm prompt may be wider than the label.
                self.invalidate(Invalidate::CONTENT | Invalidate::POSITION);
                if let Some(cb) = self.on_await.clone() {
                    cb();
                }
            }
            Outcome::Nothing => {
                self.invalidate(Invalidate::CONTENT);
            }
        }
    }

    /// Flip a toggle and commit the new state. No-op on other kinds.
    pub fn toggle(&mut self) {
        if let ElementKind::Toggle { on, .. } = &mut self.kind {
            *on = !*on;
            let value = Value::Bool(*on);
            self.invalidate(Invalidate::CONTENT);
            self.commit(value);
        }
    }

    // =========================================================================
    // Counted values
    // =========================================================================

    /// Current count/index for counted kinds.
    pub fn count(&self) -> Option<i64> {
        match &self.kind {
            ElementKind::Slider { index, .. }
            | ElementKind::Selection { index, .. }
            | ElementKind::SingleSelection { index, .. }
            | ElementKind::QuickSelect { index, .. } => Some(index.count()),
            _ => None,
        }
    }

    /// Label of the currently selected choice.
    pub fn choice_label(&self) -> Option<&str> {
        let (index, choices) = self.choice_parts()?;
        choices.label(index.count() as usize)
    }

    /// Application value of the currently selected choice.
    pub fn choice_value(&self) -> Option<i64> {
        let (index, choices) = self.choice_parts()?;
        choices.value(index.count() as usize)
    }

    fn choice_parts(&self) -> Option<(&IndexState, &ChoiceList)> {
        match &self.kind {
            ElementKind::Slider {
                index,
                choices: Some(choices),
            } => Some((index, choices)),
            ElementKind::Selection { index, choices }
            | ElementKind::SingleSelection { index, choices }
            | ElementKind::QuickSelect { index, choices, .. } => Some((index, choices)),
            _ => None,
        }
    }

    fn index_state_mut(&mut self) -> Option<&mut IndexState> {
        match &mut self.kind {
            ElementKind::Slider { index, .. }
            | ElementKind::Selection { index, .. }
            | ElementKind::SingleSelection { index, .. }
            | ElementKind::QuickSelect { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Assign a count. The value is clamped into range; the action fires
    /// only when the requested value was accepted exactly.
    pub fn set_count(&mut self, requested: i64) -> bool {
        let Some(index) = self.index_state_mut() else {
            return false;
        };
        let exact = index.set_count(requested);
        self.invalidate(Invalidate::CONTENT);
        if exact {
            self.commit(self.value());
        }
        exact
    }

    /// Step the value by a delta: cyclic for quick-selects, clamped (with
    /// the exact-match commit rule) otherwise. Toggles flip.
    ///
    /// Returns `true` when this element consumed the step.
    pub fn step_value(&mut self, delta: i64) -> bool {
        match &mut self.kind {
            ElementKind::Toggle { .. } => {
                self.toggle();
                true
            }
            ElementKind::QuickSelect {
                index,
                can_cycle_backward,
                ..
            } => {
                let cycle_backward = *can_cycle_backward;
                let changed = index.step_cyclic(delta, cycle_backward);
                self.invalidate(Invalidate::CONTENT);
                if changed {
                    self.commit(self.value());
                }
                true
            }
            ElementKind::Slider { index, .. }
            | ElementKind::Selection { index, .. }
            | ElementKind::SingleSelection { index, .. } => {
                let exact = index.step(delta);
                self.invalidate(Invalidate::CONTENT);
                if exact {
                    self.commit(self.value());
                }
                true
            }
            _ => false,
        }
    }

    /// Step a quick-select forward, wrapping.
    pub fn set_next_choice(&mut self) -> bool {
        self.step_value(1)
    }

    /// Step a quick-select backward; wraps only when backward cycling is on.
    pub fn set_previous_choice(&mut self) -> bool {
        self.step_value(-1)
    }

    /// Replace the choice list. On mismatch the prior list is kept and a
    /// diagnostic is surfaced; on success the index range re-clamps.
    pub fn set_choices(
        &mut self,
        labels: Vec<String>,
        values: Vec<i64>,
    ) -> Result<(), ConfigError> {
        let list = match ChoiceList::new(labels, values) {
            Ok(list) => list,
            Err(e) => {
                warn!(id = %self.id, error = %e, "choice list rejected");
                return Err(e);
            }
        };
        let len = list.len();
        match &mut self.kind {
            ElementKind::Slider { index, choices } => {
                *choices = Some(list);
                index.set_range(0, len as i64 - 1);
            }
            ElementKind::Selection { index, choices }
            | ElementKind::SingleSelection { index, choices }
            | ElementKind::QuickSelect { index, choices, .. } => {
                *choices = list;
                index.set_range(0, len as i64 - 1);
            }
            _ => {
                warn!(id = %self.id, "set_choices on a non-choice element");
                return Ok(());
            }
        }
        self.invalidate(Invalidate::CONTENT | Invalidate::POSITION);
        Ok(())
    }

    /// Remove the choice carrying `value`; silent no-op when absent or on
    /// non-choice kinds.
    pub fn remove_choice(&mut self, value: i64) {
        let removed = match &mut self.kind {
            ElementKind::Slider {
                index,
                choices: Some(list),
            } => {
                list.remove_value(value);
                index.set_range(0, list.len() as i64 - 1);
                true
            }
            ElementKind::Selection { index, choices }
            | ElementKind::SingleSelection { index, choices }
            | ElementKind::QuickSelect { index, choices, .. } => {
                if choices.len() > 1 {
                    choices.remove_value(value);
                    index.set_range(0, choices.len() as i64 - 1);
                }
                true
            }
            _ => false,
        };
        if removed {
            self.invalidate(Invalidate::CONTENT);
        }
    }

    /// Range of a countable slider.
    pub fn set_slider_range(&mut self, min: i64, max: i64) {
        if let ElementKind::Slider {
            index,
            choices: None,
        } = &mut self.kind
        {
            index.set_range(min, max);
            self.invalidate(Invalidate::CONTENT);
        }
    }

    // =========================================================================
    // Toggle sync
    // =========================================================================

    /// Bind a pull source for a toggle: the flag re-reads through it on the
    /// next `sync` after `mark_needs_sync`.
    pub fn set_toggle_source(&mut self, source: impl Fn() -> bool + 'static) {
        if let ElementKind::Toggle {
            source: slot,
            needs_sync,
            ..
        } = &mut self.kind
        {
            *slot = Some(Rc::new(source));
            *needs_sync = true;
        }
    }

    /// Replace the on/off state texts of a toggle.
    pub fn set_toggle_labels(&mut self, on_text: &str, off_text: &str) {
        if let ElementKind::Toggle {
            on_text: on_slot,
            off_text: off_slot,
            ..
        } = &mut self.kind
        {
            *on_slot = on_text.to_string();
            *off_slot = off_text.to_string();
            self.invalidate(Invalidate::CONTENT | Invalidate::POSITION);
        }
    }

    /// Flag the toggle for resynchronization on the next frame tick.
    pub fn mark_needs_sync(&mut self) {
        if let ElementKind::Toggle { needs_sync, .. } = &mut self.kind {
            *needs_sync = true;
        }
    }

    /// Pull the toggle source if flagged. Checked on demand, not
    /// continuously.
    pub fn sync(&mut self) {
        let pulled = match &mut self.kind {
            ElementKind::Toggle {
                on,
                source: Some(source),
                needs_sync: needs_sync @ true,
                ..
            } => {
                *needs_sync = false;
                let source = source.clone();
                let fresh = source();
                if fresh != *on {
                    *on = fresh;
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
        if pulled {
            self.invalidate(Invalidate::CONTENT);
        }
    }

    // =========================================================================
    // Variant access
    // =========================================================================

    pub fn text_input(&self) -> Option<&TextInputState> {
        match &self.kind {
            ElementKind::TextInput(input) => Some(input),
            _ => None,
        }
    }

    pub fn text_input_mut(&mut self) -> Option<&mut TextInputState> {
        self.invalidate(Invalidate::CONTENT);
        match &mut self.kind {
            ElementKind::TextInput(input) => Some(input),
            _ => None,
        }
    }

    /// Leave edit mode without committing; the text as typed stays.
    pub fn cancel_edit(&mut self) {
        if let ElementKind::TextInput(input) = &mut self.kind {
            if input.is_editing() {
                input.end_edit();
                self.invalidate(Invalidate::CONTENT);
            }
        }
    }

    /// Leave edit mode and commit the final text.
    pub fn commit_text(&mut self) {
        if let ElementKind::TextInput(input) = &mut self.kind {
            input.end_edit();
            self.invalidate(Invalidate::CONTENT);
            self.commit(self.value());
        }
    }

    pub fn scroll_text_mut(&mut self) -> Option<&mut ScrollTextState> {
        self.invalidate(Invalidate::CONTENT);
        match &mut self.kind {
            ElementKind::ScrollText(st) => Some(st),
            _ => None,
        }
    }

    /// Whether a pending double-confirm is awaiting its second trigger.
    pub fn is_awaiting_confirm(&self) -> bool {
        matches!(
            &self.kind,
            ElementKind::Button {
                confirm: Some(ConfirmState { awaiting: true, .. })
            }
        )
    }

    // =========================================================================
    // Arrow hover hit-testing
    // =========================================================================

    /// Which arrow, if any, the pointer is within `tolerance` cells of.
    /// Ties resolve toward the nearer arrow by squared distance. Requires
    /// cached bounds and a rendered content line with arrow bookmarks.
    pub fn hover_on_arrow(&self, pointer: Point, tolerance: f64) -> Option<ArrowHit> {
        let bounds = self.bounds?;
        let content = self.cached_content.as_deref()?;
        let stripped = strip_markup(content);
        let chars: Vec<char> = stripped.chars().collect();

        let column = |char_idx: usize| -> u16 {
            let prefix: String = chars.iter().take(char_idx).collect();
            width_aware_len(&prefix) as u16
        };

        let dec = Point::new(bounds.x + column(self.first_char_index?), bounds.y);
        let inc = Point::new(bounds.x + column(self.last_char_index?), bounds.y);

        let dist2 = |p: Point| -> f64 {
            let dx = pointer.x as f64 - p.x as f64;
            let dy = pointer.y as f64 - p.y as f64;
            dx * dx + dy * dy
        };

        let (d_dec, d_inc) = (dist2(dec), dist2(inc));
        let limit = tolerance * tolerance;
        if d_dec.min(d_inc) > limit {
            return None;
        }
        if d_dec <= d_inc {
            Some(ArrowHit::Decrement)
        } else {
            Some(ArrowHit::Increment)
        }
    }
}
