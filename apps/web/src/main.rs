mod animation;
mod fetch;
mod render;
mod state;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use covid_dashboard_core::api::DEFAULT_BASE_URL;
use covid_dashboard_core::{ApiConfig, DashboardOptions, DetailRequest, RequestToken};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen_futures::spawn_local;

use state::WebState;

type SharedState = Rc<RefCell<WebState>>;

fn main() -> io::Result<()> {
    let api = ApiConfig::new(option_env!("COVID_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL));
    let state = Rc::new(RefCell::new(WebState::new(page_options())));

    let summary_token = state.borrow_mut().dashboard.begin_summary();
    if let Some(token) = summary_token {
        spawn_local(load_summary(state.clone(), api.clone(), token));
    }

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| {
            let request = state.borrow_mut().handle_key(event.code);
            if let Some(request) = request {
                spawn_local(load_detail(state.clone(), api.clone(), request));
            }
        }
    });

    terminal.draw_web(move |f| {
        let mut state = state.borrow_mut();
        state.tick(js_sys::Date::now() / 1000.0);
        render::render_dashboard(&state, f);
    });

    Ok(())
}

/// `?breakdown=1` in the page URL turns on the deaths and recovered fetches.
fn page_options() -> DashboardOptions {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();

    let breakdown = search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| matches!(pair, "breakdown=1" | "breakdown=true" | "breakdown"));

    DashboardOptions {
        breakdown,
        ..DashboardOptions::default()
    }
}

async fn load_summary(state: SharedState, api: ApiConfig, token: RequestToken) {
    let result = fetch::fetch_summary(&api).await;
    if let Err(error) = &result {
        web_sys::console::error_1(&format!("Failed to load summary: {error}").into());
    }

    let mut state = state.borrow_mut();
    if state.dashboard.finish_summary(token, result) {
        state.after_summary();
    }
}

async fn load_detail(state: SharedState, api: ApiConfig, request: DetailRequest) {
    let result = fetch::fetch_detail(&api, &request).await;
    if let Err(error) = &result {
        web_sys::console::error_1(
            &format!("Failed to load country {}: {error}", request.slug).into(),
        );
    }

    let mut state = state.borrow_mut();
    if state.dashboard.finish_detail(request.token, result) {
        state.after_detail();
    } else {
        web_sys::console::log_1(&format!("Dropped stale response for {}", request.slug).into());
    }
}
