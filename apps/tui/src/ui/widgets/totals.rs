use covid_dashboard_core::view::format_count;
use covid_dashboard_core::{CaseStatus, Lifecycle};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub const CONFIRMED_COLOR: Color = Color::Rgb(254, 183, 43);

const fn status_color(status: CaseStatus) -> Color {
    match status {
        CaseStatus::Confirmed => CONFIRMED_COLOR,
        CaseStatus::Deaths => Color::Red,
        CaseStatus::Recovered => Color::Green,
    }
}

pub fn render_totals(app: &App, f: &mut Frame<'_>, areas: [Rect; 3]) {
    let statuses = [
        CaseStatus::Confirmed,
        CaseStatus::Deaths,
        CaseStatus::Recovered,
    ];

    for (status, area) in statuses.into_iter().zip(areas) {
        let color = status_color(status);
        let block = Block::default()
            .title(format!(" {} ", status.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));

        let (text, style) = match app.dashboard.summary() {
            Lifecycle::Succeeded(_) => (
                format_count(app.dashboard.totals().get(status)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Lifecycle::Failed(error) => (error.clone(), Style::default().fg(Color::Red)),
            Lifecycle::Idle | Lifecycle::InFlight(_) => {
                ("Loading...".to_string(), Style::default().fg(Color::Gray))
            }
        };

        let paragraph = Paragraph::new(text)
            .style(style)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}
