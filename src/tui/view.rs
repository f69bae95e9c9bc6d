use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::catalog::{Dish, format_cents};
use crate::resolver::same_category;
use crate::tui::state::{Focus, InputMode, StatusLine, TuiApp, truncate_display};
use crate::tui::theme::Theme;

const HERO_LINES: [&str; 2] = [
    "Delicious food, delivered fresh",
    "Order from the best restaurants in town, day or night",
];

const KEY_HELP: &str = "Tab focus  ←/→ category  ↑/↓ dish  Enter select/add  +/- qty  Esc clear  ^L sign in  ^O sign out  ^Q quit";

const FOOTER_LINES: [&str; 3] = [
    "SB Foods - Your favorite food delivered fresh, anytime, anywhere.",
    "About Us · Restaurants · Contact | Help Center · Track Order · FAQs | (555) 123-4567 · support@sbfoods.com · 123 Food Street, City",
    "© 2025 SB Foods. All rights reserved. Built with ❤ for food lovers.",
];

/// Late-night rows shown before the section is cut off.
const MAX_LATE_NIGHT_ROWS: u16 = 4;

impl TuiApp {
    pub fn view(&mut self, f: &mut Frame) {
        let size = f.area();
        let late_rows = (self.storefront.late_night_restaurants().len() as u16)
            .clamp(1, MAX_LATE_NIGHT_ROWS);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Header with search
                Constraint::Length(2),             // Hero
                Constraint::Length(3),             // Category grid
                Constraint::Min(5),                // Dish sections
                Constraint::Length(late_rows + 2), // Late night
                Constraint::Length(3),             // Footer
                Constraint::Length(1),             // Status
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        render_hero(f, chunks[1], &self.theme);
        self.render_categories(f, chunks[2]);
        self.render_dishes(f, chunks[3]);
        self.render_late_night(f, chunks[4]);
        render_footer(f, chunks[5], &self.theme);
        self.render_status(f, chunks[6]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let focused = self.focus == Focus::Search || self.input_mode == InputMode::Login;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" SB Foods ", theme.brand_style))
            .border_style(if focused {
                theme.focus_border_style
            } else {
                theme.border_style
            });
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(44)])
            .split(inner);

        let prompt = match self.input_mode {
            InputMode::Login => format!("Sign in: {}", mask_password(&self.login_input)),
            InputMode::Browse => {
                let term = &self.storefront.filter().search_term;
                if term.is_empty() && self.focus != Focus::Search {
                    "Search dishes, restaurants...".to_string()
                } else {
                    format!("Search: {term}")
                }
            }
        };
        let caret = if focused { "▏" } else { "" };
        let prompt = truncate_display(&prompt, cols[0].width.saturating_sub(1) as usize);
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prompt, theme.input_style),
                Span::styled(caret, theme.focus_border_style),
            ])),
            cols[0],
        );

        let cart = self.storefront.cart();
        let user = self
            .storefront
            .current_user()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Guest".to_string());
        let summary = format!(
            "{user}  |  Cart: {} ({})",
            cart.item_count(),
            format_cents(cart.subtotal_cents())
        );
        f.render_widget(
            Paragraph::new(summary)
                .style(theme.header_style)
                .alignment(Alignment::Right),
            cols[1],
        );
    }

    fn render_categories(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let focused = self.focus == Focus::Categories;
        let active = self.storefront.filter().active_category();

        let spans: Vec<Span> = self
            .storefront
            .catalog()
            .categories()
            .iter()
            .enumerate()
            .flat_map(|(i, c)| {
                let mut style = if active.is_some_and(|a| same_category(a, &c.slug)) {
                    theme.category_selected_style
                } else {
                    theme.category_style
                };
                if focused && i == self.category_cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                [
                    Span::styled(format!(" {} {} ", c.icon, c.name), style),
                    Span::raw(" "),
                ]
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Categories ")
            .border_style(if focused {
                theme.focus_border_style
            } else {
                theme.border_style
            });
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_dishes(&mut self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let focused = self.focus == Focus::Dishes;
        let cursor = self.dish_cursor;
        let width = area.width.saturating_sub(2) as usize;
        let resolution = self.storefront.view();

        let mut items = Vec::new();
        let mut selected = None;
        let mut flat = 0usize;
        for section in &resolution.sections {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{} ({})", section.title, section.dishes.len()),
                theme.section_title_style,
            ))));
            if section.dishes.is_empty() {
                items.push(ListItem::new(Line::from(Span::styled(
                    "  No dishes found",
                    theme.footer_style,
                ))));
            }
            for dish in &section.dishes {
                if flat == cursor {
                    selected = Some(items.len());
                }
                items.push(dish_item(dish, width, theme));
                flat += 1;
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .border_style(if focused {
                theme.focus_border_style
            } else {
                theme.border_style
            });
        let list = List::new(items).block(block).highlight_style(if focused {
            theme.dish_selected_style
        } else {
            Style::default()
        });
        let mut state = ListState::default().with_selected(selected);
        f.render_stateful_widget(list, area, &mut state);
    }

    fn render_late_night(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let width = area.width.saturating_sub(2) as usize;
        let restaurants = self.storefront.late_night_restaurants();
        let lines: Vec<Line> = if restaurants.is_empty() {
            vec![Line::from(Span::styled(
                "No late-night restaurants right now",
                theme.footer_style,
            ))]
        } else {
            restaurants
                .iter()
                .take(MAX_LATE_NIGHT_ROWS as usize)
                .map(|r| {
                    let text = format!(
                        "{}  ·  {}  ·  ★{:.1}  ·  {}  ·  open until {}",
                        r.name, r.cuisine, r.rating, r.delivery_time, r.open_until
                    );
                    Line::from(Span::styled(
                        truncate_display(&text, width),
                        theme.late_night_style,
                    ))
                })
                .collect()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Late Night Cravings ")
            .border_style(theme.border_style);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let (text, style) = match &self.status {
            Some(StatusLine::Info(msg)) => (msg.as_str(), theme.status_style),
            Some(StatusLine::Error(msg)) => (msg.as_str(), theme.error_style),
            None => (KEY_HELP, theme.footer_style),
        };
        f.render_widget(
            Paragraph::new(truncate_display(text, area.width as usize)).style(style),
            area,
        );
    }
}

fn render_hero(f: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = vec![
        Line::from(Span::styled(HERO_LINES[0], theme.hero_style)),
        Line::from(Span::styled(HERO_LINES[1], theme.header_style)),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let width = area.width as usize;
    let lines: Vec<Line> = FOOTER_LINES
        .iter()
        .map(|l| Line::from(truncate_display(l, width)))
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .style(theme.footer_style)
            .alignment(Alignment::Center),
        area,
    );
}

fn dish_item(dish: &Dish, width: usize, theme: &Theme) -> ListItem<'static> {
    let marker = if dish.is_popular { "  ★ Popular" } else { "" };
    let text = format!(
        "  [{}] {} · {}  {}  ★{:.1}  {} min",
        dish.id,
        dish.name,
        dish.restaurant,
        dish.price_label(),
        dish.rating,
        dish.prep_minutes
    );
    let text = truncate_display(&text, width.saturating_sub(marker.chars().count()));
    ListItem::new(Line::from(vec![
        Span::styled(text, theme.dish_style),
        Span::styled(marker, theme.popular_style),
    ]))
}

/// Shows the email and hides everything after the first space.
fn mask_password(input: &str) -> String {
    match input.split_once(' ') {
        Some((email, password)) => format!("{email} {}", "*".repeat(password.chars().count())),
        None => input.to_string(),
    }
}
