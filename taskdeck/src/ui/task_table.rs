//! Task table rendering.
//!
//! Renders the current page of the derived view as a four-column table.
//! The header shows the active sort with a direction arrow; an expanded
//! row grows to show its full description.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Row, Table},
};

use taskdeck_proto::Task;

use super::theme;
use crate::app::App;
use crate::view::{SortDirection, SortField, SortSpec};

/// Header label for `field`, with an arrow when it is the active sort key.
fn header_label(field: SortField, sort: SortSpec) -> String {
    if sort.field == Some(field) {
        let arrow = match sort.direction {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        };
        format!("{} {arrow}", field.label())
    } else {
        field.label().to_string()
    }
}

fn task_row<'a>(task: &'a Task, expanded: bool, selected: bool) -> Row<'a> {
    let row_style = if selected {
        theme::selected()
    } else {
        theme::normal()
    };
    let status = Span::styled(
        task.status.label(),
        row_style.fg(theme::status_color(task.status)),
    );

    if expanded {
        // Give the description its own lines below the title so the
        // full text is visible.
        let description: Vec<Line<'_>> = std::iter::once(Line::raw(""))
            .chain(task.description.lines().map(Line::raw))
            .collect();
        let height = u16::try_from(description.len() + 1).unwrap_or(u16::MAX);
        Row::new(vec![
            Cell::from(task.id.to_string()),
            Cell::from(Text::from(
                std::iter::once(Line::raw(task.title.as_str()))
                    .chain(description)
                    .collect::<Vec<_>>(),
            )),
            Cell::from(status),
        ])
        .style(row_style)
        .height(height.max(1))
    } else {
        Row::new(vec![
            Cell::from(task.id.to_string()),
            Cell::from(task.title.as_str()),
            Cell::from(status),
        ])
        .style(row_style)
    }
}

/// Render the task table with sort headers and a page indicator.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let page_tasks = app.view.current_page(&app.tasks);

    let header = Row::new(vec![
        Cell::from(format!("[1] {}", header_label(SortField::Id, app.view.sort))),
        Cell::from(format!(
            "[2] {}  /  [3] {}",
            header_label(SortField::Title, app.view.sort),
            header_label(SortField::Description, app.view.sort),
        )),
        Cell::from(format!(
            "[4] {}",
            header_label(SortField::Status, app.view.sort)
        )),
    ])
    .style(theme::bold());

    let rows: Vec<Row<'_>> = page_tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let expanded = app.view.expanded == Some(task.id);
            task_row(task, expanded, i == app.selected)
        })
        .collect();

    let title = format!(
        " Tasks ({}) | page {}/{} ",
        app.tasks.len(),
        app.view.page,
        app.view.page_count(app.tasks.len()).max(1),
    );
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::TABLE_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(13),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_marks_active_sort_with_arrow() {
        let sort = SortSpec {
            field: Some(SortField::Title),
            direction: SortDirection::Desc,
        };
        assert_eq!(header_label(SortField::Title, sort), "Title ▼");
        assert_eq!(header_label(SortField::Id, sort), "Id");
    }

    #[test]
    fn header_without_sort_has_no_arrow() {
        let sort = SortSpec::default();
        assert_eq!(header_label(SortField::Status, sort), "Status");
    }
}
