use covid_dashboard_core::view::ChartView;
use covid_dashboard_core::Lifecycle;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;
use throbber_widgets_tui::Throbber;

use crate::app::App;
use crate::ui::widgets::totals::CONFIRMED_COLOR;

pub fn render_chart(app: &App, f: &mut Frame<'_>, area: Rect) {
    let slug = match app.dashboard.detail() {
        Lifecycle::Succeeded(detail) => Some(detail.slug.as_str()),
        _ => app.dashboard.pending_slug(),
    };
    let title = slug
        .and_then(|slug| app.dashboard.country_name(slug))
        .map_or_else(|| " Country detail ".to_string(), |name| format!(" {name} "));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CONFIRMED_COLOR));

    match app.dashboard.detail() {
        Lifecycle::Succeeded(detail) if !detail.chart.is_empty() => {
            render_series(&detail.chart, f, area, block);
            if let Ok(mut effect) = app.chart_fx.lock() {
                if let Some(effect) = effect.as_mut() {
                    f.buffer_mut().render_effect(effect, area, app.last_tick);
                }
            }
        }
        Lifecycle::Succeeded(_) => {
            placeholder(f, area, block, TextLine::from("No cases reported"));
        }
        Lifecycle::InFlight(_) => {
            let line = Throbber::default()
                .label("Loading...")
                .style(Style::default().fg(CONFIRMED_COLOR))
                .to_line(&app.throbber);
            placeholder(f, area, block, line);
        }
        Lifecycle::Failed(error) => {
            let paragraph = Paragraph::new(format!("Error: {error}"))
                .style(Style::default().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        Lifecycle::Idle => {
            placeholder(
                f,
                area,
                block,
                TextLine::from("Select a country to chart its last two weeks"),
            );
        }
    }
}

fn placeholder(f: &mut Frame<'_>, area: Rect, block: Block<'_>, line: TextLine<'_>) {
    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::Gray))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

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
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

    f.render_widget(widget, area);
}
