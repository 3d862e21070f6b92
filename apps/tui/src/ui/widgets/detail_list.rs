use covid_dashboard_core::view::{format_count, DetailList, ListNode};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

use crate::app::App;

pub fn render_detail_list(
    app: &App,
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    list: &DetailList,
    color: Color,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    if list.is_empty() {
        let hint = if app.dashboard.options().breakdown {
            "Select a country"
        } else {
            "Start with --breakdown to list daily counts"
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let lines = list
        .nodes()
        .iter()
        .map(|node| match node {
            ListNode::Spinner => Throbber::default()
                .label("Loading...")
                .style(Style::default().fg(color))
                .to_line(&app.throbber),
            ListNode::Row(row) => TextLine::from(vec![
                Span::styled(row.date_label.clone(), Style::default().fg(Color::Gray)),
                Span::raw("  "),
                Span::styled(format_count(row.cases), Style::default().fg(color)),
            ]),
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
