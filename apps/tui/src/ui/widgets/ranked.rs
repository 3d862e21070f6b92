use covid_dashboard_core::view::format_count;
use covid_dashboard_core::Lifecycle;
use ratatui::layout::{Alignment, Constraint, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::ui::widgets::tables::{scroll_offset, visible_rows};

pub const COUNT_WIDTH: u16 = 12;
const COLUMN_SPACING: u16 = 2;

/// Which part of a ranked row a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCell {
    Count,
    Country,
}

pub const fn first_row_y(area: Rect) -> u16 {
    area.y + 1
}

fn rows_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn offset(app: &App, area: Rect) -> usize {
    scroll_offset(app.row_count(), visible_rows(area.height), app.selected_row)
}

/// Resolves a screen position to the ranked row under it.
pub fn row_at(app: &App, area: Rect, column: u16, row: u16) -> Option<(usize, RowCell)> {
    let inner = rows_area(area);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }

    let index = offset(app, area) + usize::from(row - inner.y);
    if index >= app.row_count() {
        return None;
    }

    let cell = if column < inner.x + COUNT_WIDTH {
        RowCell::Count
    } else {
        RowCell::Country
    };
    Some((index, cell))
}

pub fn render_ranked(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Countries by confirmed ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match app.dashboard.summary() {
        Lifecycle::Succeeded(view) if view.ranked.is_empty() => {
            let paragraph = Paragraph::new("No countries reported")
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
        Lifecycle::Succeeded(view) => {
            let start = offset(app, area);
            let rows = view
                .ranked
                .iter()
                .enumerate()
                .skip(start)
                .take(visible_rows(area.height))
                .map(|(index, row)| {
                    let style = if index == app.selected_row {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else if app.dashboard.pending_slug() == Some(row.slug.as_str()) {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    Row::new(vec![
                        Cell::from(
                            TextLine::from(format_count(row.confirmed)).alignment(Alignment::Right),
                        ),
                        Cell::from(row.country.as_str()),
                    ])
                    .style(style)
                })
                .collect::<Vec<_>>();

            let table = Table::new(
                rows,
                [Constraint::Length(COUNT_WIDTH), Constraint::Min(10)],
            )
            .column_spacing(COLUMN_SPACING)
            .block(block);
            f.render_widget(table, area);
        }
        Lifecycle::Failed(error) => {
            let paragraph = Paragraph::new(format!("Error: {error}"))
                .style(Style::default().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        Lifecycle::Idle | Lifecycle::InFlight(_) => {
            let paragraph = Paragraph::new("Loading summary...")
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
        }
    }
}
