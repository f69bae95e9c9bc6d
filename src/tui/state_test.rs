use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::auth::{Account, InMemoryAuth};
use crate::cart::InMemoryCart;
use crate::catalog::Catalog;
use crate::resolver::{Mode, TermPolicy};
use crate::storefront::Storefront;
use crate::tui::state::{Focus, InputMode, StatusLine, TuiApp, truncate_display};
use crate::tui::theme::Theme;

fn app() -> TuiApp {
    let storefront = Storefront::new(
        Arc::new(Catalog::builtin().unwrap()),
        TermPolicy::Trimmed,
        Box::new(InMemoryAuth::new(vec![Account::demo()])),
        Box::new(InMemoryCart::new()),
    );
    TuiApp::new(storefront, Theme::dark())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_str(app: &mut TuiApp, s: &str) {
    for c in s.chars() {
        assert!(!app.handle_key(key(KeyCode::Char(c))));
    }
}

#[test]
fn test_typing_updates_search() {
    let mut app = app();
    type_str(&mut app, "roll");
    assert_eq!(app.storefront.filter().search_term, "roll");
    let view = app.storefront.view();
    assert_eq!(view.mode, Mode::Filtered);
    assert_eq!(view.sections[0].dishes.len(), 1);

    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.storefront.filter().search_term, "rol");
}

#[test]
fn test_focus_cycles() {
    let mut app = app();
    assert_eq!(app.focus, Focus::Search);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Categories);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Dishes);
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Search);
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.focus, Focus::Dishes);
}

#[test]
fn test_category_grid_toggles_filter() {
    let mut app = app();
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.category_cursor, 1);
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.storefront.filter().active_category(), Some("burgers"));
    assert_eq!(
        app.storefront.view().sections[0].title,
        "Burgers Dishes"
    );

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.storefront.filter().active_category(), None);

    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Left));
    let last = app.storefront.catalog().categories().len() - 1;
    assert_eq!(app.category_cursor, last);
}

#[test]
fn test_add_and_decrement_selected_dish() {
    let mut app = app();
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.focus, Focus::Dishes);

    // First row of the default view is the first popular dish.
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Char('+')));
    assert_eq!(app.storefront.cart().quantity_of("1"), 2);
    assert_eq!(
        app.status,
        Some(StatusLine::Info("Added Margherita Pizza (x2)".to_string()))
    );

    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected_dish_id().as_deref(), Some("3"));
    app.handle_key(key(KeyCode::Char('-')));
    assert!(matches!(app.status, Some(StatusLine::Error(_))));

    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Char('-')));
    assert_eq!(app.storefront.cart().quantity_of("1"), 1);
}

#[test]
fn test_dish_cursor_stays_in_view() {
    let mut app = app();
    app.focus = Focus::Dishes;
    let total = app.visible_dish_count();
    for _ in 0..total + 5 {
        app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.dish_cursor, total - 1);

    app.dish_cursor = 50;
    app.clamp_dish_cursor();
    assert_eq!(app.dish_cursor, total - 1);
}

#[test]
fn test_escape_clears_filters() {
    let mut app = app();
    type_str(&mut app, "pizza");
    app.storefront.select_category(Some("pizza"));
    app.focus = Focus::Dishes;
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.storefront.view().mode, Mode::Default);
    assert_eq!(app.focus, Focus::Search);
}

#[test]
fn test_login_prompt() {
    let mut app = app();
    app.handle_key(ctrl('l'));
    assert_eq!(app.input_mode, InputMode::Login);
    type_str(&mut app, "demo@sbfoods.com password123");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.input_mode, InputMode::Browse);
    assert_eq!(app.storefront.current_user().unwrap().name, "Demo User");
    // Typing in the prompt does not touch the search box.
    assert!(app.storefront.filter().search_term.is_empty());

    app.handle_key(ctrl('o'));
    assert!(app.storefront.current_user().is_none());

    app.handle_key(ctrl('l'));
    type_str(&mut app, "demo@sbfoods.com wrong");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(
        app.status,
        Some(StatusLine::Error("Invalid email or password".to_string()))
    );
}

#[test]
fn test_quit_keys() {
    let mut app = app();
    assert!(!app.handle_key(ctrl('c')));
    assert!(app.handle_key(ctrl('c')));
    assert!(app.handle_key(ctrl('q')));
}

#[test]
fn test_truncate_display_wide_chars() {
    assert_eq!(truncate_display("hello", 3), "hel");
    assert_eq!(truncate_display("🍕🍔", 3), "🍕");
    assert_eq!(truncate_display("abc", 0), "");
}

#[test]
fn test_theme_from_name_falls_back_to_dark() {
    assert_eq!(Theme::from_name("light").name, "light");
    assert_eq!(Theme::from_name("dark").name, "dark");
    assert_eq!(Theme::from_name("neon").name, "dark");
}
