// UI module for the terminal dashboard
// Draws every panel from the current dashboard state

pub mod layout;
pub mod widgets;

use ratatui::style::Color;
use ratatui::Frame;

use crate::app::App;
use layout::DashboardLayout;
use widgets::{chart, detail_list, header, ranked, status, totals};

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = DashboardLayout::new(f.area());

    header::render_header(app, f, layout.header);
    totals::render_totals(app, f, layout.totals);
    ranked::render_ranked(app, f, layout.ranked);
    chart::render_chart(app, f, layout.chart);
    detail_list::render_detail_list(
        app,
        f,
        layout.deaths,
        "Deaths",
        app.dashboard.deaths_list(),
        Color::Red,
    );
    detail_list::render_detail_list(
        app,
        f,
        layout.recovered,
        "Recovered",
        app.dashboard.recovered_list(),
        Color::Green,
    );
    status::render_status(app, f, layout.footer);
}
