use std::time::Instant;

use unicode_width::UnicodeWidthChar;

use crate::storefront::Storefront;
use crate::tui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Categories,
    Dishes,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Categories,
            Focus::Categories => Focus::Dishes,
            Focus::Dishes => Focus::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::Dishes,
            Focus::Categories => Focus::Search,
            Focus::Dishes => Focus::Categories,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    /// Typing `email password` into the sign-in prompt.
    Login,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

pub struct TuiApp {
    pub storefront: Storefront,
    pub theme: Theme,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub login_input: String,
    /// Index into the catalog's category list.
    pub category_cursor: usize,
    /// Index into the flattened dishes of the current view.
    pub dish_cursor: usize,
    pub status: Option<StatusLine>,
    pub(crate) last_ctrl_c_at: Option<Instant>,
}

impl TuiApp {
    pub fn new(storefront: Storefront, theme: Theme) -> Self {
        Self {
            storefront,
            theme,
            focus: Focus::Search,
            input_mode: InputMode::Browse,
            login_input: String::new(),
            category_cursor: 0,
            dish_cursor: 0,
            status: None,
            last_ctrl_c_at: None,
        }
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusLine::Info(msg.into()));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusLine::Error(msg.into()));
    }

    /// Number of rows the dish cursor can move over.
    pub fn visible_dish_count(&mut self) -> usize {
        self.storefront.view().dishes().count()
    }

    pub fn selected_dish_id(&mut self) -> Option<String> {
        let idx = self.dish_cursor;
        self.storefront
            .view()
            .dishes()
            .nth(idx)
            .map(|d| d.id.clone())
    }

    /// Keep the dish cursor inside the current view after a filter change.
    pub fn clamp_dish_cursor(&mut self) {
        let count = self.visible_dish_count();
        if self.dish_cursor >= count {
            self.dish_cursor = count.saturating_sub(1);
        }
    }
}

pub fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if ch_w == 0 {
            out.push(ch);
            continue;
        }
        if width + ch_w > max {
            break;
        }
        out.push(ch);
        width += ch_w;
    }
    out
}
