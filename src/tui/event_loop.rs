use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::tui::state::{Focus, InputMode, TuiApp};

impl TuiApp {
    pub fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show);
                let _ = terminal::disable_raw_mode();
            }
        }
        info!(theme = %self.theme.name, "starting tui");
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        let _guard = TuiGuard;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        self.event_loop(&mut terminal)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let mut dirty = true;
        loop {
            if dirty {
                terminal.draw(|f| self.view(f))?;
                dirty = false;
            }
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    if self.handle_key(k) {
                        return Ok(());
                    }
                    self.clamp_dish_cursor();
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }

    /// Apply one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, k: KeyEvent) -> bool {
        if k.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_control_key(k.code);
        }
        match self.input_mode {
            InputMode::Login => self.handle_login_key(k.code),
            InputMode::Browse => self.handle_browse_key(k.code),
        }
        false
    }

    fn handle_control_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('c') => {
                let now = Instant::now();
                if let Some(prev) = self.last_ctrl_c_at
                    && now.duration_since(prev) <= Duration::from_secs(3)
                {
                    return true;
                }
                self.last_ctrl_c_at = Some(now);
                self.info("Press Ctrl+C again within 3s to exit");
            }
            KeyCode::Char('q') => return true,
            KeyCode::Char('l') => {
                self.input_mode = InputMode::Login;
                self.login_input.clear();
                self.info("Sign in: type <email> <password> and press Enter");
            }
            KeyCode::Char('o') => match self.storefront.logout() {
                Some(user) => self.info(format!("Signed out {}", user.name)),
                None => self.error("Not signed in"),
            },
            _ => {}
        }
        false
    }

    fn handle_login_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Browse;
                self.login_input.clear();
                self.info("Sign-in cancelled");
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.login_input);
                self.input_mode = InputMode::Browse;
                let Some((email, password)) = line.trim().split_once(' ') else {
                    self.error("Enter <email> <password>");
                    return;
                };
                let result = self
                    .storefront
                    .login(email, password.trim())
                    .map(|u| u.name.clone());
                match result {
                    Ok(name) => self.info(format!("Welcome, {name}")),
                    Err(e) => self.error(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.login_input.pop();
            }
            KeyCode::Char(c) => self.login_input.push(c),
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match (self.focus, code) {
            (_, KeyCode::Tab) => self.focus = self.focus.next(),
            (_, KeyCode::BackTab) => self.focus = self.focus.prev(),
            (_, KeyCode::Esc) => {
                self.storefront.clear_filters();
                self.dish_cursor = 0;
                self.focus = Focus::Search;
                self.info("Filters cleared");
            }
            (Focus::Search, KeyCode::Char(c)) => {
                let mut term = self.storefront.filter().search_term.clone();
                term.push(c);
                self.storefront.set_search_term(term);
                self.dish_cursor = 0;
            }
            (Focus::Search, KeyCode::Backspace) => {
                let mut term = self.storefront.filter().search_term.clone();
                if term.pop().is_some() {
                    self.storefront.set_search_term(term);
                    self.dish_cursor = 0;
                }
            }
            (Focus::Search, KeyCode::Down | KeyCode::Enter) => self.focus = Focus::Dishes,
            (Focus::Categories, KeyCode::Left) => {
                let n = self.storefront.catalog().categories().len();
                if n > 0 {
                    self.category_cursor = (self.category_cursor + n - 1) % n;
                }
            }
            (Focus::Categories, KeyCode::Right) => {
                let n = self.storefront.catalog().categories().len();
                if n > 0 {
                    self.category_cursor = (self.category_cursor + 1) % n;
                }
            }
            (Focus::Categories, KeyCode::Enter | KeyCode::Char(' ')) => self.toggle_focused_category(),
            (Focus::Dishes, KeyCode::Up) => self.dish_cursor = self.dish_cursor.saturating_sub(1),
            (Focus::Dishes, KeyCode::Down) => {
                if self.dish_cursor + 1 < self.visible_dish_count() {
                    self.dish_cursor += 1;
                }
            }
            (Focus::Dishes, KeyCode::Enter | KeyCode::Char('+')) => self.add_selected_dish(),
            (Focus::Dishes, KeyCode::Char('-')) => self.decrement_selected_dish(),
            _ => {}
        }
    }

    fn toggle_focused_category(&mut self) {
        let Some((slug, name)) = self
            .storefront
            .catalog()
            .categories()
            .get(self.category_cursor)
            .map(|c| (c.slug.clone(), c.name.clone()))
        else {
            return;
        };
        let selected = self.storefront.toggle_category(&slug);
        self.dish_cursor = 0;
        debug!(%slug, selected, "category toggled");
        if selected {
            self.info(format!("Showing {name}"));
        } else {
            self.info("Showing all categories");
        }
    }

    fn add_selected_dish(&mut self) {
        let Some(id) = self.selected_dish_id() else {
            self.error("No dish selected");
            return;
        };
        match self.storefront.add_to_cart(&id) {
            Ok(quantity) => {
                let name = self.dish_name(&id);
                self.info(format!("Added {name} (x{quantity})"));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn decrement_selected_dish(&mut self) {
        let Some(id) = self.selected_dish_id() else {
            return;
        };
        match self.storefront.decrement_in_cart(&id) {
            Ok(0) => {
                let name = self.dish_name(&id);
                self.info(format!("Removed {name} from cart"));
            }
            Ok(quantity) => {
                let name = self.dish_name(&id);
                self.info(format!("{name} (x{quantity})"));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn dish_name(&self, id: &str) -> String {
        self.storefront
            .catalog()
            .find(id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
