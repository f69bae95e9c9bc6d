use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub brand_style: Style,
    pub header_style: Style,
    pub input_style: Style,
    pub focus_border_style: Style,
    pub border_style: Style,
    pub hero_style: Style,
    pub category_style: Style,
    pub category_selected_style: Style,
    pub section_title_style: Style,
    pub dish_style: Style,
    pub dish_selected_style: Style,
    pub popular_style: Style,
    pub late_night_style: Style,
    pub footer_style: Style,
    pub status_style: Style,
    pub error_style: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            brand_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            header_style: Style::default().fg(Color::White),
            input_style: Style::default().fg(Color::White),
            focus_border_style: Style::default().fg(Color::LightRed),
            border_style: Style::default().fg(Color::DarkGray),
            hero_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            category_style: Style::default().fg(Color::Gray),
            category_selected_style: Style::default().bg(Color::Red).fg(Color::White),
            section_title_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            dish_style: Style::default().fg(Color::White),
            dish_selected_style: Style::default().bg(Color::DarkGray).fg(Color::White),
            popular_style: Style::default().fg(Color::LightYellow),
            late_night_style: Style::default().fg(Color::LightMagenta),
            footer_style: Style::default().fg(Color::Gray),
            status_style: Style::default().fg(Color::Green),
            error_style: Style::default().fg(Color::Red),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            brand_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            header_style: Style::default().fg(Color::Black),
            input_style: Style::default().fg(Color::Black),
            focus_border_style: Style::default().fg(Color::Red),
            border_style: Style::default().fg(Color::Gray),
            hero_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            category_style: Style::default().fg(Color::DarkGray),
            category_selected_style: Style::default().bg(Color::Red).fg(Color::White),
            section_title_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            dish_style: Style::default().fg(Color::Black),
            dish_selected_style: Style::default().bg(Color::Gray).fg(Color::Black),
            popular_style: Style::default().fg(Color::Red),
            late_night_style: Style::default().fg(Color::Magenta),
            footer_style: Style::default().fg(Color::DarkGray),
            status_style: Style::default().fg(Color::Green),
            error_style: Style::default().fg(Color::Red),
        }
    }

    /// Unknown names fall back to the dark theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}
