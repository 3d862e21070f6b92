pub mod helpers;

use covid_dashboard_core::DetailRequest;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::state::App;
use crate::ui::layout::DashboardLayout;
use crate::ui::widgets::ranked;

const PAGE_STEP: usize = 10;

/// Work the event loop has to start or stop on behalf of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadDetail(DetailRequest),
    Cancelled,
}

pub fn handle_key(app: &mut App, key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q' | 'Q') => {
            app.running = false;
            None
        }
        KeyCode::Esc => app.cancel_detail().then_some(Action::Cancelled),
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next(1);
            None
        }
        KeyCode::PageUp => {
            app.select_previous(PAGE_STEP);
            None
        }
        KeyCode::PageDown => {
            app.select_next(PAGE_STEP);
            None
        }
        KeyCode::Home => {
            app.select_first();
            None
        }
        KeyCode::End => {
            app.select_last();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected().map(Action::LoadDetail),
        _ => None,
    }
}

/// Clicks anywhere on a ranked row, count or country cell, load that row.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, frame_area: Rect) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = DashboardLayout::new(frame_area);
            let (index, _cell) = ranked::row_at(app, layout.ranked, mouse.column, mouse.row)?;
            app.activate_row(index).map(Action::LoadDetail)
        }
        MouseEventKind::ScrollUp => {
            app.select_previous(1);
            None
        }
        MouseEventKind::ScrollDown => {
            app.select_next(1);
            None
        }
        _ => None,
    }
}
