use chrono::Local;
use covid_dashboard_core::view::{format_count, format_timestamp, ChartView, DetailList, ListNode};
use covid_dashboard_core::{CaseStatus, Lifecycle};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::state::WebState;

const CONFIRMED_COLOR: Color = Color::Rgb(254, 183, 43);

pub fn render_dashboard(state: &WebState, f: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[2]);

    let detail = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(detail[1]);

    render_header(state, f, rows[0]);
    render_totals(state, f, rows[1]);
    render_ranked(state, f, body[0]);
    render_chart(state, f, detail[0]);
    render_list(
        state,
        f,
        lists[0],
        "Deaths",
        state.dashboard.deaths_list(),
        Color::Red,
    );
    render_list(
        state,
        f,
        lists[1],
        "Recovered",
        state.dashboard.recovered_list(),
        Color::Green,
    );
    render_footer(state, f, rows[3]);
}

fn render_header(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let updated = match state.dashboard.summary() {
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
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_totals(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let panels = [
        (CaseStatus::Confirmed, CONFIRMED_COLOR),
        (CaseStatus::Deaths, Color::Red),
        (CaseStatus::Recovered, Color::Green),
    ];

    for ((status, color), column) in panels.into_iter().zip(columns.iter()) {
        let text = match state.dashboard.summary() {
            Lifecycle::Succeeded(_) => format_count(state.dashboard.totals().get(status)),
            Lifecycle::Failed(error) => error.clone(),
            Lifecycle::Idle | Lifecycle::InFlight(_) => "Loading...".to_string(),
        };

        let block = Block::default()
            .title(format!(" {} ", status.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, *column);
    }
}

fn render_ranked(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Countries by confirmed ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let view = match state.dashboard.summary() {
        Lifecycle::Succeeded(view) => view,
        Lifecycle::Failed(error) => {
            let paragraph = Paragraph::new(format!("Error: {error}"))
                .style(Style::default().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
            return;
        }
        Lifecycle::Idle | Lifecycle::InFlight(_) => {
            let paragraph = Paragraph::new("Loading summary...")
                .block(block)
                .alignment(Alignment::Center);
            f.render_widget(paragraph, area);
            return;
        }
    };

    let visible = usize::from(area.height.saturating_sub(2));
    let offset = if state.selected_row >= visible {
        state.selected_row + 1 - visible
    } else {
        0
    };

    let lines = view
        .ranked
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, row)| {
            let style = if index == state.selected_row {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            TextLine::from(vec![
                Span::styled(format!("{:>12}", format_count(row.confirmed)), style),
                Span::styled(format!("  {}", row.country), style),
            ])
        })
        .collect::<Vec<_>>();

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_chart(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Country detail ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CONFIRMED_COLOR));

    let message = match state.dashboard.detail() {
        Lifecycle::Succeeded(detail) if !detail.chart.is_empty() => {
            render_series(&detail.chart, f, area, block);
            return;
        }
        Lifecycle::Succeeded(_) => "No cases reported".to_string(),
        Lifecycle::InFlight(_) => format!("{} Loading...", state.spinner()),
        Lifecycle::Failed(error) => format!("Error: {error}"),
        Lifecycle::Idle => "Press Enter on a country to chart its last two weeks".to_string(),
    };

    let paragraph = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[allow(clippy::cast_precision_loss)]
fn render_series(chart: &ChartView, f: &mut Frame<'_>, area: Rect, block: Block<'_>) {
    let points = chart.points();
    let (y_min, y_max) = chart.y_range();

    let dataset = Dataset::default()
        .name(chart.label)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(CONFIRMED_COLOR))
        .data(&points);

    let block = block.title_bottom(TextLine::from(format!(" {} ", chart.label)).right_aligned());
    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, chart.x_max()])
                .labels(chart.x_labels()),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min as f64, y_max as f64])
                .labels(chart.y_labels()),
        );

    f.render_widget(widget, area);
}

fn render_list(
    state: &WebState,
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

    let lines = if list.is_empty() {
        let hint = if state.dashboard.options().breakdown {
            "Select a country"
        } else {
            "Add ?breakdown=1 to list daily counts"
        };
        vec![TextLine::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        list.nodes()
            .iter()
            .map(|node| match node {
                ListNode::Spinner => TextLine::from(Span::styled(
                    format!("{} Loading...", state.spinner()),
                    Style::default().fg(color),
                )),
                ListNode::Row(row) => TextLine::from(vec![
                    Span::styled(row.date_label.clone(), Style::default().fg(Color::Gray)),
                    Span::raw("  "),
                    Span::styled(format_count(row.cases), Style::default().fg(color)),
                ]),
            })
            .collect()
    };

    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_footer(state: &WebState, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled(
        "↑/↓ select  Enter load  Esc cancel",
        Style::default().fg(Color::DarkGray),
    )];
    if !state.status.is_empty() {
        let color = if state.status.starts_with("Error") {
            Color::Red
        } else {
            Color::Yellow
        };
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(state.status.as_str(), Style::default().fg(color)));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}
