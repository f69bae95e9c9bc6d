pub mod event_loop;
pub mod state;
pub mod theme;
pub mod view;

pub use state::TuiApp;
pub use theme::Theme;

#[cfg(test)]
mod state_test;
#[cfg(test)]
mod view_test;
