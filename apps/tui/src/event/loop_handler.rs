use color_eyre::eyre::eyre;
use color_eyre::Result;
use covid_dashboard_core::{DetailRequest, RequestToken};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::app::{handle_key, handle_mouse, Action, App, FetchEvent};
use crate::client::ApiClient;
use crate::ui;

// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

fn spawn_summary(
    client: &ApiClient,
    token: RequestToken,
    tx: UnboundedSender<FetchEvent>,
) -> JoinHandle<()> {
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.fetch_summary().await;
        if tx.send(FetchEvent::Summary { token, result }).is_err() {
            debug!("dashboard closed before the summary arrived");
        }
    })
}

fn spawn_detail(
    client: &ApiClient,
    request: DetailRequest,
    tx: UnboundedSender<FetchEvent>,
) -> JoinHandle<()> {
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.fetch_detail(&request).await;
        let event = FetchEvent::Detail {
            token: request.token,
            result,
        };
        if tx.send(event).is_err() {
            debug!(slug = %request.slug, "dashboard closed before the detail arrived");
        }
    })
}

/// Applies every finished fetch and returns the follow-up detail load, if one was started.
fn drain_results(app: &mut App, rx: &mut UnboundedReceiver<FetchEvent>) -> Option<DetailRequest> {
    let mut follow_up = None;
    while let Ok(event) = rx.try_recv() {
        if let Some(request) = app.apply_fetch_event(event) {
            follow_up = Some(request);
        }
    }
    follow_up
}

fn read_action(
    terminal: &Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<Option<Action>> {
    if !matches!(
        event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
        Ok(true)
    ) {
        return Ok(None);
    }

    let action = match event::read() {
        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => handle_key(app, key.code),
        Ok(Event::Mouse(mouse)) => {
            let size = terminal.size()?;
            handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height))
        }
        // Resize is picked up by the next draw
        Ok(_) | Err(_) => None,
    };
    Ok(action)
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &ApiClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut detail_task: Option<JoinHandle<()>> = None;

    let summary_task = app
        .dashboard
        .begin_summary()
        .map(|token| spawn_summary(client, token, tx.clone()));

    while app.running {
        // Update animations
        app.update();

        if let Some(request) = drain_results(app, &mut rx) {
            detail_task = Some(spawn_detail(client, request, tx.clone()));
        }

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        match read_action(terminal, app)? {
            Some(Action::LoadDetail(request)) => {
                info!(slug = %request.slug, "loading country detail");
                detail_task = Some(spawn_detail(client, request, tx.clone()));
            }
            Some(Action::Cancelled) => {
                if let Some(task) = detail_task.take() {
                    task.abort();
                }
            }
            None => {}
        }
    }

    for task in summary_task.into_iter().chain(detail_task) {
        task.abort();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{series, summary};
    use covid_dashboard_core::{DashboardOptions, DetailSeries};

    #[tokio::test]
    async fn summary_then_initial_country_detail() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(DashboardOptions::default())
            .with_initial_country(Some("spain".to_string()));
        let token = app.dashboard.begin_summary().unwrap();

        tx.send(FetchEvent::Summary {
            token,
            result: Ok(summary()),
        })
        .unwrap();
        let request = drain_results(&mut app, &mut rx).unwrap();
        assert_eq!(request.slug, "spain");
        assert!(app.dashboard.is_detail_loading());

        tx.send(FetchEvent::Detail {
            token: request.token,
            result: Ok(DetailSeries {
                confirmed: series(14),
                ..DetailSeries::default()
            }),
        })
        .unwrap();
        assert!(drain_results(&mut app, &mut rx).is_none());
        assert!(!app.dashboard.is_detail_loading());
        assert_eq!(app.status_message, "Loaded Spain");
    }

    #[tokio::test]
    async fn late_detail_after_cancel_is_dropped() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(DashboardOptions::default());
        let token = app.dashboard.begin_summary().unwrap();
        tx.send(FetchEvent::Summary {
            token,
            result: Ok(summary()),
        })
        .unwrap();
        drain_results(&mut app, &mut rx);

        let request = app.activate_selected().unwrap();
        assert!(app.cancel_detail());

        tx.send(FetchEvent::Detail {
            token: request.token,
            result: Ok(DetailSeries {
                confirmed: series(3),
                ..DetailSeries::default()
            }),
        })
        .unwrap();
        drain_results(&mut app, &mut rx);

        assert!(app.dashboard.detail().value().is_none());
        assert_eq!(app.status_message, "Request cancelled");
    }
}
