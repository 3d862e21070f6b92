use covid_dashboard_core::{Dashboard, DashboardOptions, DetailRequest, Lifecycle};
use ratzilla::event::KeyCode;

use crate::animation::{advance_animation_counter, spinner_frame, AnimationMode};

const PAGE_STEP: usize = 10;

/// Page state shared between the key handler, the fetch futures and the draw loop.
pub struct WebState {
    pub dashboard: Dashboard,
    pub selected_row: usize,
    pub status: String,
    spinner_counter: f64,
    last_tick: Option<f64>,
}

impl WebState {
    pub fn new(options: DashboardOptions) -> Self {
        Self {
            dashboard: Dashboard::new(options),
            selected_row: 0,
            status: String::new(),
            spinner_counter: 0.0,
            last_tick: None,
        }
    }

    pub fn tick(&mut self, now_seconds: f64) {
        let mode = if self.dashboard.is_detail_loading() {
            AnimationMode::Running
        } else {
            AnimationMode::Paused
        };
        (self.spinner_counter, self.last_tick) =
            advance_animation_counter(self.spinner_counter, self.last_tick, now_seconds, mode);
    }

    pub fn spinner(&self) -> &'static str {
        spinner_frame(self.spinner_counter)
    }

    /// Returns the detail load to start, if the key activated a row.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<DetailRequest> {
        let rows = self.dashboard.ranked_rows().len();
        let last = rows.saturating_sub(1);

        match key {
            KeyCode::Up => self.selected_row = self.selected_row.saturating_sub(1),
            KeyCode::Down => self.selected_row = (self.selected_row + 1).min(last),
            KeyCode::PageUp => self.selected_row = self.selected_row.saturating_sub(PAGE_STEP),
            KeyCode::PageDown => self.selected_row = (self.selected_row + PAGE_STEP).min(last),
            KeyCode::Home => self.selected_row = 0,
            KeyCode::End => self.selected_row = last,
            KeyCode::Esc => {
                if self.dashboard.cancel_detail() {
                    self.status = "Request cancelled".to_string();
                }
            }
            KeyCode::Enter => return self.activate_selected(),
            _ => {}
        }
        None
    }

    fn activate_selected(&mut self) -> Option<DetailRequest> {
        let row = self.dashboard.ranked_rows().get(self.selected_row)?.clone();
        let request = self.dashboard.select_country(&row.slug)?;
        self.status = format!("Loading {}...", row.country);
        Some(request)
    }

    pub fn after_summary(&mut self) {
        self.selected_row = 0;
        self.status = self
            .dashboard
            .summary()
            .error()
            .map(|error| format!("Error: {error}"))
            .unwrap_or_default();
    }

    pub fn after_detail(&mut self) {
        self.status = match self.dashboard.detail() {
            Lifecycle::Succeeded(detail) => {
                let name = self
                    .dashboard
                    .country_name(&detail.slug)
                    .unwrap_or(&detail.slug);
                format!("Loaded {name}")
            }
            Lifecycle::Failed(error) => format!("Error: {error}"),
            Lifecycle::Idle | Lifecycle::InFlight(_) => String::new(),
        };
    }
}
