//! Terminal UI rendering.

pub mod modal;
pub mod status_bar;
pub mod task_table;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Task table fills the screen with a one-line status bar below.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    task_table::render(frame, chunks[0], app);
    status_bar::render(frame, chunks[1], app);

    // Modal overlays sit on top of the table.
    modal::render(frame, chunks[0], app);
}
