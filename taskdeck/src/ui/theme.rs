//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};
use taskdeck_proto::TaskStatus;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Error indicator color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the task table.
pub const TABLE_TITLE: Color = Color::Green;

/// Color for a task still waiting to be picked up.
pub const STATUS_TODO: Color = Color::Yellow;

/// Color for a task in flight.
pub const STATUS_IN_PROGRESS: Color = Color::Cyan;

/// Color for a finished task.
pub const STATUS_DONE: Color = Color::Green;

/// Color associated with a task status badge.
#[must_use]
pub const fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => STATUS_TODO,
        TaskStatus::InProgress => STATUS_IN_PROGRESS,
        TaskStatus::Done => STATUS_DONE,
    }
}

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (metadata, help hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused form fields, modal borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected row style.
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for error messages in the status bar.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
