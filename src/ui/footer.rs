use crate::app::{ActivePanel, App};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_footer<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (nav_text, action_text) = if app.restore.is_awaiting_password() {
        ("Type password", "[Enter] Restore [Esc] Cancel")
    } else {
        match app.active_panel {
            ActivePanel::Files => (
                "↑/k: Up  ↓/j: Down  [Enter] Open  [u] Go up  [Tab] Vault",
                "[b] Backup [r] Reload [o] Logout [q] Quit",
            ),
            ActivePanel::Vault => (
                "↑/k: Up  ↓/j: Down  [Enter] Restore  [Tab] Files",
                "[r] Reload [o] Logout [q] Quit",
            ),
        }
    };

    let nav_help = Paragraph::new(nav_text).style(Style::default().fg(Color::Gray));
    let action_help = Paragraph::new(action_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(ratatui::layout::Alignment::Right);

    f.render_widget(nav_help, footer[0]);
    f.render_widget(action_help, footer[1]);
}
