mod app;
mod event;
pub mod keymap;
pub mod theme;
mod ui;

use anyhow::Result;

pub use app::{App, ToastStyle, View};

use crate::config::Config;
use crate::store::Fixtures;

pub fn run(fixtures: Fixtures, config: &Config) -> Result<()> {
    let mut app = App::new(fixtures, config);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
