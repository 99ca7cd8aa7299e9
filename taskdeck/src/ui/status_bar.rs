//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.add_modal.is_open() {
        "Tab: switch field | Enter: create | Esc: cancel"
    } else if app.remove_modal.is_open() {
        "y/Enter: delete | n/Esc: keep"
    } else if app.edit_modal.is_open() {
        "s: cycle status | u: toggle description lock | Enter: save | Esc: close"
    } else {
        "a: add | e: edit | d: delete | 1-4: sort | ←→: page | ↑↓: select | Enter: expand | r: reload | q: quit"
    };

    let mut spans = vec![
        Span::styled("TaskDeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ];
    if !app.status_line.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(app.status_line.as_str(), theme::error()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
