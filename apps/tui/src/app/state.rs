use covid_dashboard_core::dashboard::DetailView;
use covid_dashboard_core::{
    Dashboard, DashboardError, DashboardOptions, DetailRequest, DetailSeries, Lifecycle,
    RequestToken, Summary,
};
use ratatui::style::Color;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;

use crate::app::input::helpers::{step_down, step_up};

const SPINNER_FRAME: Duration = Duration::from_millis(100);
const CHART_FADE_MS: u32 = 450;

/// Results delivered by fetch tasks.
#[derive(Debug)]
pub enum FetchEvent {
    Summary {
        token: RequestToken,
        result: Result<Summary, DashboardError>,
    },
    Detail {
        token: RequestToken,
        result: Result<DetailSeries, DashboardError>,
    },
}

pub struct App {
    pub running: bool,
    pub dashboard: Dashboard,
    pub selected_row: usize,
    pub status_message: String,
    pub initial_country: Option<String>,
    pub throbber: ThrobberState,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub chart_fx: Mutex<Option<Effect>>,
    spinner_elapsed: Duration,
}

impl App {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            running: true,
            dashboard: Dashboard::new(options),
            selected_row: 0,
            status_message: String::new(),
            initial_country: None,
            throbber: ThrobberState::default(),
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            chart_fx: Mutex::new(None),
            spinner_elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_initial_country(mut self, slug: Option<String>) -> Self {
        self.initial_country = slug;
        self
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.spinner_elapsed += self.last_tick;
        while self.spinner_elapsed >= SPINNER_FRAME {
            self.spinner_elapsed -= SPINNER_FRAME;
            self.throbber.calc_next();
        }
    }

    pub fn row_count(&self) -> usize {
        self.dashboard.ranked_rows().len()
    }

    pub fn selected_slug(&self) -> Option<&str> {
        self.dashboard
            .ranked_rows()
            .get(self.selected_row)
            .map(|row| row.slug.as_str())
    }

    pub fn select_previous(&mut self, step: usize) {
        self.selected_row = step_up(self.selected_row, step);
    }

    pub fn select_next(&mut self, step: usize) {
        self.selected_row = step_down(self.selected_row, step, self.row_count());
    }

    pub fn select_first(&mut self) {
        self.selected_row = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
    }

    pub fn activate_selected(&mut self) -> Option<DetailRequest> {
        self.activate_row(self.selected_row)
    }

    /// Starts the detail load for a row and selects it; a no-op while another load runs.
    pub fn activate_row(&mut self, index: usize) -> Option<DetailRequest> {
        let row = self.dashboard.ranked_rows().get(index)?.clone();
        let request = self.dashboard.select_country(&row.slug)?;
        self.selected_row = index;
        self.status_message = format!("Loading {}...", row.country);
        Some(request)
    }

    pub fn cancel_detail(&mut self) -> bool {
        let cancelled = self.dashboard.cancel_detail();
        if cancelled {
            self.status_message = "Request cancelled".to_string();
        }
        cancelled
    }

    /// Applies a fetch result and returns a follow-up detail request, if any.
    pub fn apply_fetch_event(&mut self, event: FetchEvent) -> Option<DetailRequest> {
        match event {
            FetchEvent::Summary { token, result } => {
                if !self.dashboard.finish_summary(token, result) {
                    return None;
                }
                if let Some(error) = self.dashboard.summary().error() {
                    self.status_message = format!("Error: {error}");
                    return None;
                }
                self.status_message.clear();
                self.selected_row = 0;
                self.activate_initial_country()
            }
            FetchEvent::Detail { token, result } => {
                if !self.dashboard.finish_detail(token, result) {
                    return None;
                }
                match self.dashboard.detail() {
                    Lifecycle::Succeeded(DetailView { slug, .. }) => {
                        let name = self.dashboard.country_name(slug).unwrap_or(slug);
                        self.status_message = format!("Loaded {name}");
                        self.start_chart_fade();
                    }
                    Lifecycle::Failed(error) => {
                        self.status_message = format!("Error: {error}");
                    }
                    Lifecycle::Idle | Lifecycle::InFlight(_) => {}
                }
                None
            }
        }
    }

    fn activate_initial_country(&mut self) -> Option<DetailRequest> {
        let slug = self.initial_country.take()?;
        let index = self
            .dashboard
            .ranked_rows()
            .iter()
            .position(|row| row.slug == slug);

        if let Some(index) = index {
            return self.activate_row(index);
        }

        self.status_message = format!("Unknown country: {slug}");
        None
    }

    fn start_chart_fade(&self) {
        if let Ok(mut effect) = self.chart_fx.lock() {
            *effect = Some(fx::fade_from_fg(
                Color::Black,
                (CHART_FADE_MS, Interpolation::QuadOut),
            ));
        }
    }
}
