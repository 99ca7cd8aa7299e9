//! Modal overlay rendering.
//!
//! Each open workflow renders as a centered box over the task table.
//! When several modals are open at once they stack in a fixed order:
//! add, then edit, then remove on top.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::theme;
use crate::app::{AddField, App};

/// A centered rectangle taking `percent_x` by `percent_y` of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render whichever modals are open, topmost last.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if app.add_modal.is_open() {
        render_add(frame, area, app);
    }
    if app.edit_modal.is_open() {
        render_edit(frame, area, app);
    }
    if app.remove_modal.is_open() {
        render_remove(frame, area, app);
    }
}

fn render_add(frame: &mut Frame, area: Rect, app: &App) {
    let Some(draft) = app.add_modal.draft() else {
        return;
    };
    let rect = centered_rect(60, 40, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Add task ")
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    let field_block = |label: &'static str, focused: bool| {
        Block::default().title(label).borders(Borders::ALL).border_style(
            if focused {
                theme::highlighted()
            } else {
                theme::dimmed()
            },
        )
    };

    frame.render_widget(
        Paragraph::new(draft.title.as_str())
            .block(field_block("Title", app.add_focus == AddField::Title)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(draft.description.as_str())
            .wrap(Wrap { trim: false })
            .block(field_block(
                "Description",
                app.add_focus == AddField::Description,
            )),
        chunks[1],
    );
}

fn render_edit(frame: &mut Frame, area: Rect, app: &App) {
    let Some(snapshot) = app.edit_modal.snapshot() else {
        return;
    };
    let rect = centered_rect(60, 50, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(format!(" Edit task {} ", snapshot.id))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(snapshot.draft.title.as_str(), theme::bold()),
        ])),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Status: "),
            Span::styled(
                snapshot.draft.status.label(),
                theme::normal().fg(theme::status_color(snapshot.draft.status)),
            ),
            Span::styled("  (s to cycle)", theme::dimmed()),
        ])),
        chunks[1],
    );

    let lock_hint = if app.edit_modal.description_editable() {
        " Description (editing) "
    } else {
        " Description (locked — u to unlock) "
    };
    frame.render_widget(
        Paragraph::new(snapshot.draft.description.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(lock_hint)
                    .borders(Borders::ALL)
                    .border_style(if app.edit_modal.description_editable() {
                        theme::highlighted()
                    } else {
                        theme::dimmed()
                    }),
            ),
        chunks[2],
    );
}

fn render_remove(frame: &mut Frame, area: Rect, app: &App) {
    let Some(snapshot) = app.remove_modal.snapshot() else {
        return;
    };
    let rect = centered_rect(50, 25, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(" Remove task ")
        .borders(Borders::ALL)
        .border_style(theme::error());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines = vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(snapshot.draft.title.as_str(), theme::bold()),
            Span::raw("?"),
        ]),
        Line::raw(""),
        Line::from(Span::styled("y/Enter: delete   n/Esc: keep", theme::dimmed())),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        inner,
    );
}
