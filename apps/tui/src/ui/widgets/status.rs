use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

const SHORTCUTS: &str = "↑/↓ select  Enter load  click row  Esc cancel  q quit";

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled(SHORTCUTS, Style::default().fg(Color::DarkGray))];

    if !app.status_message.is_empty() {
        let color = if app.status_message.starts_with("Error") {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(color),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}
