use std::sync::Arc;

use ratatui::{Terminal, backend::TestBackend};

use crate::auth::{Account, InMemoryAuth};
use crate::cart::InMemoryCart;
use crate::catalog::Catalog;
use crate::resolver::TermPolicy;
use crate::storefront::Storefront;
use crate::tui::state::TuiApp;
use crate::tui::theme::Theme;

fn app(catalog: Catalog) -> TuiApp {
    let storefront = Storefront::new(
        Arc::new(catalog),
        TermPolicy::Trimmed,
        Box::new(InMemoryAuth::new(vec![Account::demo()])),
        Box::new(InMemoryCart::new()),
    );
    TuiApp::new(storefront, Theme::light())
}

fn render(app: &mut TuiApp, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.view(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_default_page_renders_all_regions() {
    let mut app = app(Catalog::builtin().unwrap());
    let screen = render(&mut app, 160, 50);
    assert!(screen.contains("SB Foods"));
    assert!(screen.contains("Delicious food, delivered fresh"));
    assert!(screen.contains("Categories"));
    assert!(screen.contains("Popular Dishes (5)"));
    assert!(screen.contains("Late Night Cravings"));
    assert!(screen.contains("Guest"));
    assert!(screen.contains("All rights reserved"));
}

#[test]
fn test_filtered_page_renders_title() {
    let mut app = app(Catalog::builtin().unwrap());
    app.storefront.select_category(Some("sushi"));
    let screen = render(&mut app, 160, 50);
    assert!(screen.contains("Sushi Dishes (2)"));
    assert!(!screen.contains("Popular Dishes"));
}

#[test]
fn test_empty_catalog_renders() {
    let mut app = app(Catalog::new(Vec::new()));
    let screen = render(&mut app, 80, 30);
    assert!(screen.contains("No dishes found"));
    assert!(screen.contains("No late-night restaurants right now"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let mut app = app(Catalog::builtin().unwrap());
    render(&mut app, 20, 8);
}
