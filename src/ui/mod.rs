mod chrome;
mod layout;
mod page;
mod text;

use std::time::Instant;

use ratatui::Frame;

use crate::app::App;

pub use chrome::draw_chrome;
pub use layout::{UiLayout, split_layout};
pub use page::draw_page;

pub fn draw_app(frame: &mut Frame<'_>, layout: UiLayout, app: &App, now: Instant) {
    draw_page(frame, layout.viewer, app, now);
    draw_chrome(frame, layout, app, now);
}
