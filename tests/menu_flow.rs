//! End-to-end menu scenarios through the public API: build windows, open a
//! menu, feed abstract input events, observe committed values.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use menuforge::{
    InputEvent, Menu, Outline, Point, Rect, UiContext, Value, Vec2, Window,
};

fn events(menu: &mut Menu, sequence: &[InputEvent]) {
    for event in sequence {
        menu.dispatch(event.clone());
    }
}

#[test]
fn settings_menu_full_walkthrough() {
    let committed: Rc<RefCell<Vec<(String, Value)>>> = Rc::new(RefCell::new(Vec::new()));
    let record = |id: &str| {
        let committed = committed.clone();
        let id = id.to_string();
        move |v: &Value| committed.borrow_mut().push((id.clone(), v.clone()))
    };

    let mut window = Window::new("settings");
    window.set_title("Settings");
    window.add_toggle("music", "Music", false).set_action(record("music"));
    window.add_slider("volume", "Volume", 0, 10).set_action(record("volume"));
    window
        .add_selection(
            "quality",
            "Quality",
            vec!["Low".into(), "High".into()],
            vec![0, 1],
        )
        .expect("parallel lists")
        .set_action(record("quality"));

    let mut menu = Menu::new("settings");
    menu.add_window(window);
    menu.open(false);

    // Toggle music on, raise volume twice, cycle quality once.
    events(
        &mut menu,
        &[
            InputEvent::Confirm,
            InputEvent::Move(Vec2::DOWN),
            InputEvent::Move(Vec2::RIGHT),
            InputEvent::Move(Vec2::RIGHT),
            InputEvent::Move(Vec2::DOWN),
            InputEvent::Confirm,
        ],
    );

    assert_eq!(
        committed.borrow().as_slice(),
        &[
            ("music".to_string(), Value::Bool(true)),
            ("volume".to_string(), Value::Index(1)),
            ("volume".to_string(), Value::Index(2)),
            ("quality".to_string(), Value::Index(1)),
        ]
    );
}

#[test]
fn navigation_skips_unavailable_and_absorbs_at_edges() {
    let mut top = Window::new("top");
    top.add_button("a", "A");
    top.add_button("b", "B");
    let mut bottom = Window::new("bottom");
    bottom.add_button("c", "C");

    let mut menu = Menu::new("m");
    menu.add_window(top);
    menu.add_window(bottom);
    menu.window_mut(0)
        .unwrap()
        .element_by_id("b")
        .unwrap()
        .set_available(false);
    menu.open(false);

    // Down skips the unavailable element and crosses into the next window.
    menu.dispatch(InputEvent::Move(Vec2::DOWN));
    assert_eq!(menu.selection(), Some((1, 0)));

    // Past the last window: absorbed, not wrapped.
    menu.dispatch(InputEvent::Move(Vec2::DOWN));
    assert_eq!(menu.selection(), Some((1, 0)));

    menu.dispatch(InputEvent::Move(Vec2::UP));
    assert_eq!(menu.selection(), Some((0, 0)));
    menu.dispatch(InputEvent::Move(Vec2::UP));
    assert_eq!(menu.selection(), Some((0, 0)));
}

#[test]
fn double_confirm_commits_only_on_uninterrupted_second_trigger() {
    let fired = Rc::new(Cell::new(0));
    let mut window = Window::new("w");
    {
        let fired = fired.clone();
        window
            .add_confirm_button("wipe", "Erase save", "Really erase?")
            .set_action(move |_| fired.set(fired.get() + 1));
    }
    let mut menu = Menu::new("m");
    menu.add_window(window);
    menu.open(false);

    // Trigger, trigger: exactly one commit.
    events(&mut menu, &[InputEvent::Confirm, InputEvent::Confirm]);
    assert_eq!(fired.get(), 1);

    // Trigger, availability loss, availability restore, trigger: the
    // pending state was reset, so this starts a fresh await.
    menu.dispatch(InputEvent::Confirm);
    menu.window_mut(0)
        .unwrap()
        .element_by_id("wipe")
        .unwrap()
        .set_available(false);
    menu.window_mut(0)
        .unwrap()
        .element_by_id("wipe")
        .unwrap()
        .set_available(true);
    menu.dispatch(InputEvent::Confirm);
    assert_eq!(fired.get(), 1);
    assert!(menu.focused_element().unwrap().is_awaiting_confirm());
}

#[test]
fn choice_mismatch_keeps_prior_list_working() {
    let mut window = Window::new("w");
    window
        .add_choice_slider(
            "mode",
            "Mode",
            vec!["Story".into(), "Arcade".into()],
            vec![100, 200],
        )
        .expect("parallel lists");
    let mut menu = Menu::new("m");
    menu.add_window(window);
    menu.open(false);

    let element = menu.window_mut(0).unwrap().element_by_id("mode").unwrap();
    let rejected = element.set_choices(vec!["only-one".into()], vec![1, 2]);
    assert!(rejected.is_err());

    // The prior list still drives stepping and value mapping.
    menu.dispatch(InputEvent::Move(Vec2::RIGHT));
    assert_eq!(
        menu.focused_element().unwrap().choice_label(),
        Some("Arcade")
    );
    assert_eq!(menu.focused_element().unwrap().choice_value(), Some(200));
}

#[test]
fn scroll_text_clamps_and_reports_edges() {
    let text = (1..=8).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut window = Window::new("log");
    window.outline = Outline::None;
    window.size_policy = menuforge::SizePolicy::Fixed(12);
    window.add_scroll_text("log", &text, 3);

    let mut menu = Menu::new("m");
    menu.add_window(window);
    menu.open(false);
    menu.render(Rect::new(0, 0, 40, 20));

    // Scrolling past the bottom clamps; the event stops reporting movement.
    for _ in 0..10 {
        menu.dispatch(InputEvent::Scroll(Vec2::new(0, 2)));
    }
    assert!(!menu.dispatch(InputEvent::Scroll(Vec2::new(0, 1))));

    // And back to the top.
    for _ in 0..10 {
        menu.dispatch(InputEvent::Scroll(Vec2::new(0, -2)));
    }
    assert!(!menu.dispatch(InputEvent::Scroll(Vec2::new(0, -1))));
}

#[test]
fn overlay_text_capture_hands_result_back() {
    let renamed: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

    let mut base = Window::new("base");
    base.add_button("rename", "Rename profile");
    let mut base_menu = Menu::new("base");
    base_menu.add_window(base);

    let mut ui = UiContext::new();
    ui.push(base_menu);

    // The overlay captures input while on the stack.
    {
        let renamed = renamed.clone();
        let overlay = Menu::text_capture(
            "rename",
            "New name",
            "Player",
            move |text| *renamed.borrow_mut() = Some(text.to_string()),
            || {},
        );
        ui.push(overlay);
    }
    assert_eq!(ui.len(), 2);

    {
        let field = ui
            .top_mut()
            .unwrap()
            .window_mut(0)
            .unwrap()
            .element_by_id("input")
            .unwrap();
        let state = field.text_input_mut().unwrap();
        state.insert(' ');
        state.insert('2');
    }
    ui.dispatch(InputEvent::Confirm);
    assert_eq!(renamed.borrow().as_deref(), Some("Player 2"));

    // Done with the overlay; the base menu is the target again.
    ui.pop();
    assert_eq!(ui.top().map(Menu::id), Some("base"));
    assert!(ui.dispatch(InputEvent::Confirm));
}

#[test]
fn mouse_press_and_release_pair_must_match() {
    let fired = Rc::new(Cell::new(false));
    let mut window = Window::new("w");
    {
        let fired = fired.clone();
        window.add_button("a", "Alpha").set_action(move |_| fired.set(true));
    }
    window.add_button("b", "Beta");

    let mut menu = Menu::new("m");
    menu.layout.anchor = menuforge::Anchor::TopLeft;
    menu.add_window(window);
    menu.open(false);
    menu.render(Rect::new(0, 0, 40, 20));

    let alpha = menu.window(0).unwrap().element(0).unwrap().bounds().unwrap();
    let beta = menu.window(0).unwrap().element(1).unwrap().bounds().unwrap();

    // Press on one element, release on another: no trigger.
    menu.dispatch(InputEvent::MouseConfirmPressed(Point::new(alpha.x, alpha.y)));
    menu.dispatch(InputEvent::MouseConfirmReleased(Point::new(beta.x, beta.y)));
    assert!(!fired.get());

    // Matching pair triggers.
    menu.dispatch(InputEvent::MouseConfirmPressed(Point::new(alpha.x, alpha.y)));
    menu.dispatch(InputEvent::MouseConfirmReleased(Point::new(alpha.x, alpha.y)));
    assert!(fired.get());
}
