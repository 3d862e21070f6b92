use chrono::Local;
use covid_dashboard_core::view::format_timestamp;
use covid_dashboard_core::Lifecycle;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let updated = match app.dashboard.summary() {
        Lifecycle::Succeeded(view) => format_timestamp(&view.last_updated, &Local),
        Lifecycle::Failed(_) => "unavailable".to_string(),
        Lifecycle::Idle | Lifecycle::InFlight(_) => "...".to_string(),
    };

    let line = TextLine::from(vec![
        Span::styled(
            "Global COVID-19 Statistics",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Last updated: {updated}"),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let paragraph = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}
