pub mod files_panel;
pub mod footer;
pub mod login;
pub mod password_popup;
pub mod status_bar;
pub mod vault_panel;

use crate::app::{App, Screen};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub fn draw<B: Backend>(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Login => login::draw::<B>(f, app),
        Screen::Dashboard => draw_dashboard::<B>(f, app),
    }
}

fn draw_dashboard<B: Backend>(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(3),    // Panels
                Constraint::Length(1), // Status bar
                Constraint::Length(3), // Footer
            ]
            .as_ref(),
        )
        .split(f.size());

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[0]);

    files_panel::draw::<B>(f, app, panels[0]);
    vault_panel::draw::<B>(f, app, panels[1]);
    status_bar::draw_status_bar::<B>(f, app, chunks[1]);
    footer::draw_footer::<B>(f, app, chunks[2]);

    // The restore password prompt floats over everything else.
    if app.restore.is_awaiting_password() {
        password_popup::draw::<B>(f, app);
    }
}

/// Helper function to center a rectangle with given width and height
pub(crate) fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height.saturating_sub(height)) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height.saturating_sub(height)) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
