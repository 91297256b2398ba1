//! Windows: titled, outlined groups of vertically stacked elements.
//!
//! A window owns its elements and mediates everything about them: creation
//! through factory methods, focus bookkeeping, sizing, and rendering to
//! styled text lines. Sizing is width-aware so full-width glyphs in labels
//! do not shear the border.
//!
//! A window with exactly one element mirrors that element's focus onto its
//! border and suppresses the element's own highlight, so a lone button
//! reads as a selected framed widget rather than a framed selected line.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::element::{
    ChoiceList, ConfirmState, Element, ElementKind, IndexState, LabelSource, LocalizeFn,
    ScrollTextState, TextInputState, SCROLL_DOWN_GLYPH, SCROLL_UP_GLYPH,
};
use crate::error::ConfigError;
use crate::text::measure::{display_width, strip_markup, truncate_to_width, width_aware_len};
use crate::text::style::{colored, StyleSheet};
use crate::types::{Outline, Point, Rect, SizePolicy, Value};

/// Border glyph set for one outline style.
struct BorderChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

const SINGLE_BORDER: BorderChars = BorderChars {
    top_left: '\u{250c}',
    top_right: '\u{2510}',
    bottom_left: '\u{2514}',
    bottom_right: '\u{2518}',
    horizontal: '\u{2500}',
    vertical: '\u{2502}',
};

const DOUBLE_BORDER: BorderChars = BorderChars {
    top_left: '\u{2554}',
    top_right: '\u{2557}',
    bottom_left: '\u{255a}',
    bottom_right: '\u{255d}',
    horizontal: '\u{2550}',
    vertical: '\u{2551}',
};

/// A titled group of elements rendered inside an optional border.
pub struct Window {
    id: String,
    title: Option<String>,
    pub outline: Outline,
    pub size_policy: SizePolicy,
    /// Lower bound on the total width under `SizePolicy::Auto`.
    pub min_width: u16,
    elements: Vec<Element>,
    /// Assigned by the layout pass.
    pub(crate) bounds: Rect,
    dirty: Rc<Cell<bool>>,
    localizer: Option<LocalizeFn>,
    on_update: Option<Box<dyn Fn()>>,
}

impl Window {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: None,
            outline: Outline::default(),
            size_policy: SizePolicy::Auto,
            min_width: 0,
            elements: Vec::new(),
            bounds: Rect::default(),
            dirty: Rc::new(Cell::new(true)),
            localizer: None,
            on_update: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
        self.dirty.set(true);
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Localizer used by subsequently added tag-labelled elements.
    pub fn set_localizer(&mut self, lookup: impl Fn(&str) -> String + 'static) {
        self.localizer = Some(Rc::new(lookup));
    }

    /// Hook invoked before each frame tick, for refreshing availability
    /// and sync flags from application state.
    pub fn set_update(&mut self, hook: impl Fn() + 'static) {
        self.on_update = Some(Box::new(hook));
    }

    pub fn invoke_update(&mut self) {
        if let Some(hook) = &self.on_update {
            hook();
        }
    }

    /// Shared redraw flag; the menu drains it once per frame.
    pub(crate) fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn request_redraw(&self) {
        self.dirty.set(true);
    }

    // =========================================================================
    // Element factories
    // =========================================================================

    fn push(&mut self, id: &str, label: LabelSource, kind: ElementKind) -> &mut Element {
        let element = Element::new(id, label, kind, self.dirty.clone(), self.localizer.clone());
        self.elements.push(element);
        self.dirty.set(true);
        let index = self.elements.len() - 1;
        &mut self.elements[index]
    }

    pub fn add_button(&mut self, id: &str, label: impl Into<LabelSource>) -> &mut Element {
        self.push(id, label.into(), ElementKind::Button { confirm: None })
    }

    /// A button requiring a second trigger; the prompt replaces the label
    /// while awaiting.
    pub fn add_confirm_button(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        prompt: &str,
    ) -> &mut Element {
        let confirm = Some(ConfirmState {
            prompt: prompt.to_string(),
            awaiting: false,
        });
        self.push(id, label.into(), ElementKind::Button { confirm })
    }

    pub fn add_toggle(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        on: bool,
    ) -> &mut Element {
        let kind = ElementKind::Toggle {
            on,
            source: None,
            needs_sync: false,
            on_text: "On".to_string(),
            off_text: "Off".to_string(),
        };
        self.push(id, label.into(), kind)
    }

    /// A countable slider over `min..=max`.
    pub fn add_slider(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        min: i64,
        max: i64,
    ) -> &mut Element {
        let kind = ElementKind::Slider {
            index: IndexState::new(min, max),
            choices: None,
        };
        self.push(id, label.into(), kind)
    }

    /// A slider stepping through labelled choices.
    pub fn add_choice_slider(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        labels: Vec<String>,
        values: Vec<i64>,
    ) -> Result<&mut Element, ConfigError> {
        let choices = ChoiceList::new(labels, values)?;
        let kind = ElementKind::Slider {
            index: IndexState::for_choices(choices.len()),
            choices: Some(choices),
        };
        Ok(self.push(id, label.into(), kind))
    }

    /// Cycles to the next choice on trigger.
    pub fn add_selection(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        labels: Vec<String>,
        values: Vec<i64>,
    ) -> Result<&mut Element, ConfigError> {
        let choices = ChoiceList::new(labels, values)?;
        let kind = ElementKind::Selection {
            index: IndexState::for_choices(choices.len()),
            choices,
        };
        Ok(self.push(id, label.into(), kind))
    }

    /// Commits the current choice on trigger without cycling.
    pub fn add_single_selection(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        labels: Vec<String>,
        values: Vec<i64>,
    ) -> Result<&mut Element, ConfigError> {
        let choices = ChoiceList::new(labels, values)?;
        let kind = ElementKind::SingleSelection {
            index: IndexState::for_choices(choices.len()),
            choices,
        };
        Ok(self.push(id, label.into(), kind))
    }

    /// Modular stepping through choices, optionally gated backward.
    pub fn add_quick_select(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        labels: Vec<String>,
        can_cycle_backward: bool,
    ) -> Result<&mut Element, ConfigError> {
        let choices = ChoiceList::from_labels(labels)?;
        let kind = ElementKind::QuickSelect {
            index: IndexState::for_choices(choices.len()),
            choices,
            can_cycle_backward,
        };
        Ok(self.push(id, label.into(), kind))
    }

    pub fn add_text_input(
        &mut self,
        id: &str,
        label: impl Into<LabelSource>,
        initial: &str,
    ) -> &mut Element {
        let kind = ElementKind::TextInput(TextInputState::new(initial));
        self.push(id, label.into(), kind)
    }

    pub fn add_scroll_text(&mut self, id: &str, content: &str, view_height: usize) -> &mut Element {
        let kind = ElementKind::ScrollText(ScrollTextState::new(content, view_height));
        self.push(id, label_for_scroll(id), kind)
    }

    // =========================================================================
    // Element access
    // =========================================================================

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    pub fn element_by_id(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    /// Remove the element carrying `id`; silent no-op when absent.
    pub fn remove_element(&mut self, id: &str) {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        if self.elements.len() != before {
            self.dirty.set(true);
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.dirty.set(true);
    }

    /// Index of the first available element, scanning forward.
    pub fn first_available(&self) -> Option<usize> {
        self.elements.iter().position(Element::is_available)
    }

    /// Index of the last available element, scanning backward.
    pub fn last_available(&self) -> Option<usize> {
        self.elements.iter().rposition(Element::is_available)
    }

    pub fn has_available(&self) -> bool {
        self.first_available().is_some()
    }

    /// Value of the element carrying `id`, if present.
    pub fn value_of(&self, id: &str) -> Option<Value> {
        self.elements.iter().find(|e| e.id() == id).map(Element::value)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused_index(&self) -> Option<usize> {
        self.elements.iter().position(Element::is_focused)
    }

    /// Move focus to `index`, blurring every other element. `None` blurs
    /// the whole window.
    pub fn set_focused_index(&mut self, index: Option<usize>) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.set_focus(Some(i) == index);
        }
    }

    /// Re-read all flagged toggle sources.
    pub fn sync_toggles(&mut self) {
        for element in &mut self.elements {
            element.sync();
        }
    }

    // =========================================================================
    // Sizing and rendering
    // =========================================================================

    fn border_chars(&self) -> Option<&'static BorderChars> {
        match self.outline {
            Outline::None => None,
            Outline::Single => Some(&SINGLE_BORDER),
            Outline::Double => Some(&DOUBLE_BORDER),
        }
    }

    /// Columns added around the content: border plus one space padding per
    /// side, or nothing when borderless.
    fn frame_width(&self) -> u16 {
        match self.outline {
            Outline::None => 0,
            _ => 4,
        }
    }

    fn frame_height(&self) -> u16 {
        match self.outline {
            Outline::None => 0,
            _ => 2,
        }
    }

    /// Widest content line in columns, including the title.
    fn content_width(&mut self, sheet: &StyleSheet) -> u16 {
        let mut widest = self
            .title
            .as_deref()
            .map(|t| width_aware_len(t) + 2)
            .unwrap_or(0);
        for element in &mut self.elements {
            // Scroll text content is multi-line; measure per line.
            let content = element.formatted_content(sheet);
            let longest = content.lines().map(width_aware_len).max().unwrap_or(0);
            widest = widest.max(longest);
        }
        widest as u16
    }

    fn content_height(&self) -> u16 {
        self.elements.iter().map(|e| u32::from(e.height())).sum::<u32>() as u16
    }

    /// Total size: content measured width-aware, grown to the minimum
    /// width, or pinned by a fixed policy.
    pub fn size(&mut self, sheet: &StyleSheet) -> (u16, u16) {
        let height = self.content_height() + self.frame_height();
        let width = match self.size_policy {
            SizePolicy::Fixed(w) => w,
            SizePolicy::Auto => {
                (self.content_width(sheet) + self.frame_width()).max(self.min_width)
            }
        };
        (width, height)
    }

    /// Record the layout-assigned rectangle and derive per-element bounds.
    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            debug!(id = %self.id, ?bounds, "window placed");
            self.dirty.set(true);
        }
        self.bounds = bounds;
        let inset_x = if self.outline == Outline::None { 0 } else { 2 };
        let inset_y = if self.outline == Outline::None { 0 } else { 1 };
        let inner_width = bounds.width.saturating_sub(self.frame_width());
        let mut row = bounds.y + inset_y;
        for element in &mut self.elements {
            let height = element.height();
            element.bounds = Some(Rect::new(bounds.x + inset_x, row, inner_width, height));
            row += height;
        }
    }

    /// Element index under `point`, if any.
    pub fn element_at(&self, point: Point) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.bounds.is_some_and(|b| b.contains(point)))
    }

    /// Whether the border mirrors the focus of a lone element.
    fn mirrors_focus(&self) -> bool {
        self.elements.len() == 1
    }

    /// Render to styled lines of uniform display width.
    pub fn display_lines(&mut self, sheet: &StyleSheet) -> Vec<String> {
        let (width, _) = self.size(sheet);
        let inner = width.saturating_sub(self.frame_width()) as usize;
        let suppress = self.mirrors_focus();
        let border_focused = suppress
            && self
                .elements
                .first()
                .is_some_and(|e| e.is_focused() && e.is_available());

        let mut content_lines: Vec<String> = Vec::new();
        let element_count = self.elements.len();
        for i in 0..element_count {
            let is_scroll = matches!(self.elements[i].kind, ElementKind::ScrollText(_));
            if is_scroll {
                content_lines.extend(self.scroll_lines(i, inner, sheet));
            } else {
                let line = self.elements[i].display_text(sheet, suppress);
                content_lines.push(pad_to(&line, inner));
            }
        }

        let Some(chars) = self.border_chars() else {
            return content_lines;
        };

        let mut lines = Vec::with_capacity(content_lines.len() + 2);
        lines.push(top_border(chars, self.title.as_deref(), width as usize));
        for line in content_lines {
            lines.push(format!(
                "{v} {line} {v}",
                v = chars.vertical
            ));
        }
        lines.push(bottom_border(chars, width as usize));

        if border_focused {
            lines
                .into_iter()
                .map(|l| colored(&strip_markup(&l), &sheet.selected))
                .collect()
        } else {
            lines
        }
    }

    /// Indicator row, visible slice, indicator row. Indicators dim out at
    /// the corresponding end of the content.
    fn scroll_lines(&mut self, index: usize, inner: usize, sheet: &StyleSheet) -> Vec<String> {
        let dim = sheet.dim.clone();
        // Read through the kind directly: this is a render, not a mutation,
        // and must not re-flag the dirty bit.
        let ElementKind::ScrollText(st) = &mut self.elements[index].kind else {
            return Vec::new();
        };
        let mut lines = Vec::with_capacity(st.view_height + 2);

        let up = indicator_line(SCROLL_UP_GLYPH, st.at_top(), inner, &dim);
        lines.push(up);
        let mut visible = st.visible_lines(inner);
        visible.resize(st.view_height, String::new());
        for line in visible {
            lines.push(pad_to(&line, inner));
        }
        let down = indicator_line(SCROLL_DOWN_GLYPH, st.at_bottom(inner), inner, &dim);
        lines.push(down);
        lines
    }
}

fn label_for_scroll(id: &str) -> LabelSource {
    LabelSource::Static(id.to_string())
}

/// Fit to exactly `inner` display columns, markup-aware: overlong lines
/// are clipped so a fixed width cannot shear the border, short ones are
/// padded with trailing spaces.
fn pad_to(line: &str, inner: usize) -> String {
    let mut fitted = if display_width(line) > inner {
        truncate_to_width(line, inner)
    } else {
        line.to_string()
    };
    let used = display_width(&fitted);
    fitted.extend(std::iter::repeat_n(' ', inner.saturating_sub(used)));
    fitted
}

/// Centered scroll indicator, dimmed when scrolling that way is exhausted.
fn indicator_line(glyph: char, exhausted: bool, inner: usize, dim_color: &str) -> String {
    let lead = inner.saturating_sub(1) / 2;
    let trail = inner.saturating_sub(lead + 1);
    let mut line = String::new();
    line.extend(std::iter::repeat_n(' ', lead));
    if exhausted {
        line.push_str(&colored(&glyph.to_string(), dim_color));
    } else {
        line.push(glyph);
    }
    line.extend(std::iter::repeat_n(' ', trail));
    line
}

fn top_border(chars: &BorderChars, title: Option<&str>, width: usize) -> String {
    let mut line = String::new();
    line.push(chars.top_left);
    match title {
        Some(title) if width > 4 => {
            let title_width = width_aware_len(title);
            let span = width - 2;
            if title_width + 2 <= span {
                line.push(chars.horizontal);
                line.push(' ');
                line.push_str(title);
                line.push(' ');
                let used = title_width + 3;
                for _ in used..span {
                    line.push(chars.horizontal);
                }
            } else {
                for _ in 0..span {
                    line.push(chars.horizontal);
                }
            }
        }
        _ => {
            for _ in 0..width.saturating_sub(2) {
                line.push(chars.horizontal);
            }
        }
    }
    line.push(chars.top_right);
    line
}

fn bottom_border(chars: &BorderChars, width: usize) -> String {
    let mut line = String::new();
    line.push(chars.bottom_left);
    for _ in 0..width.saturating_sub(2) {
        line.push(chars.horizontal);
    }
    line.push(chars.bottom_right);
    line
}
